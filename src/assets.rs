// Sprite frames for the painters.
// Visual: each painter is drawn from one of these images per animation frame.
// A frame that can't be read is replaced by a plain placeholder blob so the toy
// still runs (and still paints) without its art.

use std::path::Path;

use glam::Vec2;
use tracing::{debug, warn};

/// A decoded image, one 0xAARRGGBB entry per pixel.
#[derive(Clone)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Sprite {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Pixel at (x, y); callers keep coordinates in bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Decode an image file (PNG, JPEG, ...) into ARGB.
    pub fn load(path: &Path) -> Result<Self, image::ImageError> {
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
            })
            .collect();
        Ok(Self { width: width as usize, height: height as usize, pixels })
    }

    /// A soft grey egg with a darker "beak" at the bottom-left, where the brush usually is.
    /// `variant` nudges the shade so animation frames are distinguishable.
    pub fn placeholder(variant: usize) -> Self {
        let (width, height) = (160usize, 200usize);
        let shade = 0xC0u32.saturating_sub(variant as u32 * 0x18);
        let body = 0xFF00_0000 | (shade << 16) | (shade << 8) | shade;
        let beak = 0xFF40_4040;

        let (cx, cy) = (width as f32 * 0.55, height as f32 * 0.4);
        let (rx, ry) = (width as f32 * 0.4, height as f32 * 0.38);
        let mut pixels = vec![0u32; width * height];
        for y in 0..height {
            for x in 0..width {
                let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
                let e = ((fx - cx) / rx).powi(2) + ((fy - cy) / ry).powi(2);
                let in_beak = fx < width as f32 * 0.35 && fy > height as f32 * 0.65 && (fx + fy) > 150.0;
                if e <= 1.0 {
                    pixels[y * width + x] = body;
                } else if in_beak {
                    pixels[y * width + x] = beak;
                }
            }
        }
        Self { width, height, pixels }
    }
}

/// Load every frame of one painter, resolving sources against `root`.
pub fn load_frames(root: &Path, sources: &[String]) -> Vec<Sprite> {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let path = root.join(source);
            match Sprite::load(&path) {
                Ok(sprite) => {
                    debug!(path = %path.display(), width = sprite.width, height = sprite.height, "loaded frame");
                    sprite
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "frame unavailable, using placeholder");
                    Sprite::placeholder(i)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_placeholders() {
        let sources = vec!["definitely/not/here0.png".to_string(), "nope1.png".to_string()];
        let frames = load_frames(Path::new("/nonexistent-root"), &sources);
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|f| f.pixels.len() == f.width * f.height));
        // Frames differ so animation is visible.
        assert_ne!(frames[0].pixels, frames[1].pixels);
    }

    #[test]
    fn placeholder_is_opaque_in_the_middle_and_clear_in_the_corner() {
        let s = Sprite::placeholder(0);
        assert_eq!(s.pixel(s.width / 2, s.height / 3) >> 24, 0xFF);
        assert_eq!(s.pixel(s.width - 1, 0) >> 24, 0);
        assert_eq!(s.size(), Vec2::new(160.0, 200.0));
    }

    #[test]
    fn loads_a_png_as_argb() {
        let dir = std::env::temp_dir().join(format!("inkling-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("frame.png");
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([0x11, 0x22, 0x33, 0xFF]));
        img.put_pixel(1, 0, image::Rgba([0xAA, 0xBB, 0xCC, 0x00]));
        img.save(&path).expect("write png");

        let sprite = Sprite::load(&path).expect("decode png");
        assert_eq!((sprite.width, sprite.height), (2, 1));
        assert_eq!(sprite.pixel(0, 0), 0xFF11_2233);
        assert_eq!(sprite.pixel(1, 0), 0x00AA_BBCC);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
