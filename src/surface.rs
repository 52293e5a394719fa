//! Software pixel surfaces: fill, colour-keyed blit, and image decode.
//!
//! The screen is composed here on the CPU each frame, then handed to the
//! GPU presenter as a single texture upload.

use std::path::Path;

use image::DynamicImage;

use crate::error::{DemoError, Result};

/// One RGBA8 pixel.
pub type Pixel = [u8; 4];

/// Axis-aligned rectangle in pixels. `x`/`y` may be negative when a blit
/// destination hangs off the top-left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Overlap of two rectangles, `None` if they don't touch.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

/// Row-major RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
    /// RGB treated as transparent when this surface is a blit source.
    color_key: Option<[u8; 3]>,
}

impl Surface {
    pub fn filled(width: u32, height: u32, color: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
            color_key: None,
        }
    }

    /// Decode an image file into an RGBA surface.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| DemoError::AssetLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(&img))
    }

    pub fn from_image(img: &DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            pixels: bytemuck::cast_slice::<u8, Pixel>(rgba.as_raw()).to_vec(),
            color_key: None,
        }
    }

    pub fn with_color_key(mut self, key: [u8; 3]) -> Self {
        self.color_key = Some(key);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Raw bytes for texture upload, 4 per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn fill(&mut self, color: Pixel) {
        self.pixels.fill(color);
    }

    /// Copy `clip` of `src` (whole surface when `None`) so its top-left lands
    /// at `(x, y)`. Both rectangles are clipped to their surfaces; pixels
    /// matching the source colour key are skipped.
    pub fn blit(&mut self, src: &Surface, clip: Option<Rect>, x: i32, y: i32) {
        let clip = clip.unwrap_or_else(|| src.bounds());
        let Some(from) = clip.intersect(&src.bounds()) else {
            return;
        };
        // Trimming the clip on the left/top shifts the destination with it.
        let dest = Rect::new(x + (from.x - clip.x), y + (from.y - clip.y), from.w, from.h);
        let Some(to) = dest.intersect(&self.bounds()) else {
            return;
        };

        let sx0 = from.x + (to.x - dest.x);
        let sy0 = from.y + (to.y - dest.y);
        for row in 0..to.h as i32 {
            let src_row = (sy0 + row) as usize * src.width as usize;
            let dst_row = (to.y + row) as usize * self.width as usize;
            for col in 0..to.w as i32 {
                let px = src.pixels[src_row + (sx0 + col) as usize];
                if let Some(key) = src.color_key {
                    if px[..3] == key {
                        continue;
                    }
                }
                self.pixels[dst_row + (to.x + col) as usize] = px;
            }
        }
    }
}
