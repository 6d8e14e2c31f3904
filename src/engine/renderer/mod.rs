// Rendering system using wgpu

mod camera;
mod overlay;
mod sprite;
pub mod texture;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use overlay::StatusOverlay;
pub use sprite::SpriteRenderer;
pub use texture::{TextureHandle, TextureManager};
pub use vertex::{Instance, Vertex};

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;
use winit::window::Window;

use crate::engine::assets::{AssetLoader, AssetType};
use crate::engine::physics::Body;

/// Name of the sprite shared by every body
const BODY_SPRITE: &str = "crate.png";

/// Name of the status line font
const STATUS_FONT: &str = "DejaVuSans.ttf";

/// Pixel size of the status line text
const STATUS_FONT_PX: f32 = 20.0;

/// Main renderer responsible for initializing wgpu and drawing each frame
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    camera: Camera,
    overlay: StatusOverlay,
    body_texture: TextureHandle,
}

impl Renderer {
    /// Create a renderer for the given window and load the two startup
    /// assets. A missing sprite or font is fatal.
    pub async fn new(
        window: Arc<Window>,
        assets: &AssetLoader,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let sprite_renderer = SpriteRenderer::new(&device, &config)?;

        let mut texture_manager = TextureManager::new();
        let body_texture = texture_manager
            .load_texture(
                &device,
                &queue,
                sprite_renderer.texture_bind_group_layout(),
                assets.resolve_path(AssetType::Texture, BODY_SPRITE),
            )
            .with_context(|| format!("Failed to load sprite '{}'", BODY_SPRITE))?;
        if let Some(texture) = texture_manager.get(body_texture) {
            info!(
                "Loaded sprite '{}' ({}x{})",
                BODY_SPRITE, texture.width, texture.height
            );
        }

        let font_bytes = assets
            .load_bytes(AssetType::Font, STATUS_FONT)
            .with_context(|| format!("Failed to load font '{}'", STATUS_FONT))?;
        let overlay = StatusOverlay::new(&device, &font_bytes, STATUS_FONT_PX)?;

        let mut camera = Camera::new(canvas_width, canvas_height);
        camera.resize(size.width as f32, size.height as f32);

        info!(
            "Renderer initialized with {}x{} surface",
            size.width, size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            sprite_renderer,
            texture_manager,
            camera,
            overlay,
            body_texture,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.camera
                .resize(new_size.width as f32, new_size.height as f32);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Render one frame: every body at its current position, then the
    /// status line on top.
    pub fn render(&mut self, bodies: &[Body], status: &str) -> Result<()> {
        self.overlay.set_text(
            &self.device,
            &self.queue,
            self.sprite_renderer.texture_bind_group_layout(),
            status,
        )?;

        let instances: Vec<Instance> = bodies
            .iter()
            .map(|body| Instance::new(body.position(), body.size()))
            .collect();
        self.sprite_renderer
            .prepare(&self.device, &self.queue, &self.camera, &instances);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let texture = self
                .texture_manager
                .get(self.body_texture)
                .ok_or_else(|| anyhow::anyhow!("Body texture missing from manager"))?;
            self.sprite_renderer.draw(&mut render_pass, texture);
            self.overlay.draw(&mut render_pass, &self.sprite_renderer);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get a reference to the camera (cursor mapping)
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}
