// Status line overlay: rasterizes the HUD string with fontdue and draws it
// as one textured quad through the sprite pipeline

use anyhow::Result;
use fontdue::layout::{CoordinateSystem, Layout, TextStyle};
use fontdue::{Font, FontSettings};
use glam::Vec2;
use wgpu::util::DeviceExt;

use super::sprite::SpriteRenderer;
use super::texture::Texture;
use super::vertex::Instance;

/// Canvas position of the overlay's top-left corner
const OVERLAY_POSITION: Vec2 = Vec2::new(10.0, 8.0);

/// Pixel margin baked around the rasterized text
const PADDING: u32 = 2;

/// One line of white text, re-rasterized only when its content changes.
///
/// The gravity readout changes a few times a minute at most, so a cached
/// CPU rasterization beats carrying a full glyph-atlas pipeline for a
/// single status string.
pub struct StatusOverlay {
    font: Font,
    font_px: f32,
    text: String,
    texture: Option<Texture>,
    instance_buffer: wgpu::Buffer,
}

impl StatusOverlay {
    /// Create an overlay from raw TTF/OTF bytes
    pub fn new(device: &wgpu::Device, font_bytes: &[u8], font_px: f32) -> Result<Self> {
        let font = Font::from_bytes(font_bytes, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to parse font: {e}"))?;

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Overlay Instance Buffer"),
            contents: bytemuck::cast_slice(&[Instance::new(OVERLAY_POSITION, Vec2::ZERO)]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            font,
            font_px,
            text: String::new(),
            texture: None,
            instance_buffer,
        })
    }

    /// Update the overlay text, re-rasterizing if it changed
    pub fn set_text(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        text: &str,
    ) -> Result<()> {
        if text == self.text {
            return Ok(());
        }
        self.text = text.to_string();

        let Some((rgba, width, height)) = self.rasterize(text) else {
            self.texture = None;
            return Ok(());
        };

        self.texture = Some(Texture::from_rgba(
            device,
            queue,
            layout,
            &rgba,
            width,
            height,
            Some("Overlay Texture"),
        )?);

        let instance = Instance::new(OVERLAY_POSITION, Vec2::new(width as f32, height as f32));
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&[instance]));

        Ok(())
    }

    /// Draw the overlay quad. Runs inside the frame's render pass, after
    /// the sprites.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        sprite_renderer: &'a SpriteRenderer,
    ) {
        if let Some(texture) = &self.texture {
            sprite_renderer.draw_single(render_pass, texture, &self.instance_buffer);
        }
    }

    /// Rasterize `text` into a white-on-transparent RGBA buffer. Returns
    /// `None` for strings with no visible glyphs.
    fn rasterize(&self, text: &str) -> Option<(Vec<u8>, u32, u32)> {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.append(&[&self.font], &TextStyle::new(text, self.font_px, 0));

        let glyphs = layout.glyphs();
        let mut max_x = 0.0_f32;
        let mut max_y = 0.0_f32;
        for glyph in glyphs {
            max_x = max_x.max(glyph.x + glyph.width as f32);
            max_y = max_y.max(glyph.y + glyph.height as f32);
        }
        if max_x <= 0.0 || max_y <= 0.0 {
            return None;
        }

        let width = max_x.ceil() as u32 + 2 * PADDING;
        let height = max_y.ceil() as u32 + 2 * PADDING;
        let mut rgba = vec![0u8; (width * height * 4) as usize];

        for glyph in glyphs {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (_, coverage) = self.font.rasterize_config(glyph.key);

            let origin_x = glyph.x as i64 + PADDING as i64;
            let origin_y = glyph.y as i64 + PADDING as i64;
            for row in 0..glyph.height {
                for col in 0..glyph.width {
                    let x = origin_x + col as i64;
                    let y = origin_y + row as i64;
                    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                        continue;
                    }
                    let alpha = coverage[row * glyph.width + col];
                    let offset = ((y as u32 * width + x as u32) * 4) as usize;
                    rgba[offset] = 0xff;
                    rgba[offset + 1] = 0xff;
                    rgba[offset + 2] = 0xff;
                    rgba[offset + 3] = rgba[offset + 3].max(alpha);
                }
            }
        }

        Some((rgba, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_font() -> Font {
        let bytes = std::fs::read("assets/fonts/DejaVuSans.ttf").expect("font asset present");
        Font::from_bytes(bytes, FontSettings::default()).expect("valid font")
    }

    // Rasterization is pure CPU work, so it is testable without a GPU by
    // exercising the layout path directly.
    #[test]
    fn test_rasterize_produces_opaque_pixels() {
        let font = test_font();
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.append(&[&font], &TextStyle::new("Gravity: 1.00", 20.0, 0));

        let glyphs = layout.glyphs();
        assert!(!glyphs.is_empty());

        // Every visible glyph rasterizes to a bitmap of the promised size
        for glyph in glyphs {
            let (metrics, coverage) = font.rasterize_config(glyph.key);
            assert_eq!(metrics.width, glyph.width);
            assert_eq!(metrics.height, glyph.height);
            assert_eq!(coverage.len(), glyph.width * glyph.height);
        }

        // And at least one pixel of the string is fully opaque
        let opaque = glyphs.iter().any(|glyph| {
            let (_, coverage) = font.rasterize_config(glyph.key);
            coverage.iter().any(|&alpha| alpha > 0)
        });
        assert!(opaque);
    }
}
