// Texture loading and management

use anyhow::Result;
use image::GenericImageView;
use std::collections::HashMap;
use std::path::Path;

/// Handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

/// A loaded texture with GPU resources
///
/// The bind group keeps the underlying view and sampler alive, so the
/// texture is ready to bind as-is.
pub struct Texture {
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from encoded image bytes (PNG/JPEG)
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let dimensions = img.dimensions();
        let rgba = img.to_rgba8();
        Self::from_rgba(
            device,
            queue,
            layout,
            &rgba,
            dimensions.0,
            dimensions.1,
            Some(label),
        )
    }

    /// Create a texture from a raw RGBA8 buffer
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: Option<&str>,
    ) -> Result<Self> {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label,
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Ok(Self {
            bind_group,
            width,
            height,
        })
    }
}

/// Manages texture loading and caching
pub struct TextureManager {
    textures: Vec<Texture>,
    path_to_handle: HashMap<String, TextureHandle>,
}

impl TextureManager {
    /// Create a new texture manager
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            path_to_handle: HashMap::new(),
        }
    }

    /// Load a texture from a file path, reusing a previous load of the same
    /// path
    pub fn load_texture<P: AsRef<Path>>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: P,
    ) -> Result<TextureHandle> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        if let Some(&handle) = self.path_to_handle.get(&path_str) {
            return Ok(handle);
        }

        let bytes = std::fs::read(&path)?;
        let texture = Texture::from_bytes(device, queue, layout, &bytes, &path_str)?;

        let handle = TextureHandle(self.textures.len());
        self.textures.push(texture);
        self.path_to_handle.insert(path_str, handle);

        Ok(handle)
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0)
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}
