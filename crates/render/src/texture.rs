//! Procedural textures.

/// Tightly packed RGBA8 image, rows ordered bottom-up.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

const CHECKER_SIZE: u32 = 256;
const CHECKER_CELL: u32 = 8;
const CHECKER_DARK: u8 = 200;
const CHECKER_LIGHT: u8 = 255;

/// 256x256 checkerboard of 8 px cells, light gray on white.
///
/// Cell `(x, y)` counted from the top-left is gray when `x + y` is even.
/// Rows are stored bottom-up, so texcoord `v = 0` is the bottom of the image.
pub fn checkerboard_texture() -> TextureData {
    let mut pixels = Vec::with_capacity((CHECKER_SIZE * CHECKER_SIZE * 4) as usize);
    for row in 0..CHECKER_SIZE {
        let y = CHECKER_SIZE - 1 - row;
        for x in 0..CHECKER_SIZE {
            let cell = x / CHECKER_CELL + y / CHECKER_CELL;
            let v = if cell % 2 == 0 {
                CHECKER_DARK
            } else {
                CHECKER_LIGHT
            };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    tracing::debug!(size = CHECKER_SIZE, cell = CHECKER_CELL, "checkerboard generated");
    TextureData {
        width: CHECKER_SIZE,
        height: CHECKER_SIZE,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_dimensions() {
        let tex = checkerboard_texture();
        assert_eq!(tex.width, 256);
        assert_eq!(tex.height, 256);
        assert_eq!(tex.pixels.len(), 256 * 256 * 4);
    }

    #[test]
    fn cells_alternate() {
        let tex = checkerboard_texture();
        // Stored row 255 is image row 0, cell (0, 0): gray.
        assert_eq!(tex.pixel(0, 255), [200, 200, 200, 255]);
        assert_eq!(tex.pixel(7, 248), [200, 200, 200, 255]);
        assert_eq!(tex.pixel(8, 255), [255, 255, 255, 255]);
        assert_eq!(tex.pixel(8, 247), [200, 200, 200, 255]);
        // Image row 255 lands in cell row 31.
        assert_eq!(tex.pixel(0, 0), [255, 255, 255, 255]);
    }
}
