use crate::foundation::{
    error::{TexAnimError, TexAnimResult},
    math::Fnv1a64,
};

/// Channel layout of a packed 32-bit pixel, expressed as four bit shifts.
///
/// The layout is resolved once per batch operation and passed by value into the blend loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    red_shift: u8,
    green_shift: u8,
    blue_shift: u8,
    alpha_shift: u8,
}

impl PixelFormat {
    /// `R, G, B, A` bytes in memory on a little-endian host (`0xAABBGGRR` as an integer).
    pub const RGBA8: Self = Self {
        red_shift: 0,
        green_shift: 8,
        blue_shift: 16,
        alpha_shift: 24,
    };

    /// `0xAARRGGBB` as an integer.
    pub const ARGB32: Self = Self {
        red_shift: 16,
        green_shift: 8,
        blue_shift: 0,
        alpha_shift: 24,
    };

    /// Create a validated layout: shifts must be distinct byte offsets in `{0, 8, 16, 24}`.
    pub fn new(red_shift: u8, green_shift: u8, blue_shift: u8, alpha_shift: u8) -> TexAnimResult<Self> {
        let shifts = [red_shift, green_shift, blue_shift, alpha_shift];
        let mut seen = 0u8;
        for s in shifts {
            if s > 24 || s % 8 != 0 {
                return Err(TexAnimError::validation(format!(
                    "channel shift {s} is not a byte offset"
                )));
            }
            let bit = 1u8 << (s / 8);
            if seen & bit != 0 {
                return Err(TexAnimError::validation("channel shifts must be distinct"));
            }
            seen |= bit;
        }
        Ok(Self {
            red_shift,
            green_shift,
            blue_shift,
            alpha_shift,
        })
    }

    /// Bit offset of the red channel.
    pub fn red_shift(self) -> u8 {
        self.red_shift
    }

    /// Bit offset of the green channel.
    pub fn green_shift(self) -> u8 {
        self.green_shift
    }

    /// Bit offset of the blue channel.
    pub fn blue_shift(self) -> u8 {
        self.blue_shift
    }

    /// Bit offset of the alpha channel.
    pub fn alpha_shift(self) -> u8 {
        self.alpha_shift
    }

    /// Split a packed pixel into `[r, g, b, a]`.
    #[inline]
    pub fn unpack(self, px: u32) -> [u8; 4] {
        [
            (px >> self.red_shift) as u8,
            (px >> self.green_shift) as u8,
            (px >> self.blue_shift) as u8,
            (px >> self.alpha_shift) as u8,
        ]
    }

    /// Pack `[r, g, b, a]` into one pixel.
    #[inline]
    pub fn pack(self, rgba: [u8; 4]) -> u32 {
        (u32::from(rgba[0]) << self.red_shift)
            | (u32::from(rgba[1]) << self.green_shift)
            | (u32::from(rgba[2]) << self.blue_shift)
            | (u32::from(rgba[3]) << self.alpha_shift)
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::RGBA8
    }
}

/// Decoded, straight-alpha image stored as packed 32-bit pixels, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocate a fully transparent buffer.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap existing packed pixels; `pixels.len()` must equal `width * height`.
    pub fn from_pixels(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<u32>,
    ) -> TexAnimResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TexAnimError::validation(format!(
                "pixel buffer of {width}x{height} expects {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Convert an `image` RGBA8 buffer into the given layout.
    pub fn from_rgba_image(img: &image::RgbaImage, format: PixelFormat) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .as_raw()
            .chunks_exact(4)
            .map(|c| format.pack([c[0], c[1], c[2], c[3]]))
            .collect();
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Convert back into an `image` RGBA8 buffer.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut raw = Vec::with_capacity(self.pixels.len() * 4);
        for &px in &self.pixels {
            raw.extend_from_slice(&self.format.unpack(px));
        }
        image::RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Re-pack every pixel into `format`. Returns a plain clone when the layout already matches.
    pub fn to_format(&self, format: PixelFormat) -> Self {
        if format == self.format {
            return self.clone();
        }
        let from = self.format;
        Self {
            width: self.width,
            height: self.height,
            format,
            pixels: self
                .pixels
                .iter()
                .map(|&px| format.pack(from.unpack(px)))
                .collect(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout of the stored pixels.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Read one packed pixel. Panics when `(x, y)` is out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    /// Write one packed pixel. Panics when `(x, y)` is out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: u32) {
        let i = self.index(x, y);
        self.pixels[i] = px;
    }

    /// Overwrite the whole buffer with `src` in place.
    ///
    /// Panics when `src` differs in size or layout.
    pub fn copy_from(&mut self, src: &PixelBuffer) {
        assert!(
            src.width == self.width && src.height == self.height && src.format == self.format,
            "copy_from: {}x{} {:?} into {}x{} {:?}",
            src.width,
            src.height,
            src.format,
            self.width,
            self.height,
            self.format
        );
        self.pixels.copy_from_slice(&src.pixels);
    }

    /// Return `true` when the `w x h` rectangle at `(x, y)` lies fully inside the buffer.
    pub fn contains_rect(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        u64::from(x) + u64::from(w) <= u64::from(self.width)
            && u64::from(y) + u64::from(h) <= u64::from(self.height)
    }

    pub(crate) fn row(&self, y: u32, x: u32, w: u32) -> &[u32] {
        let start = self.index(x, y);
        &self.pixels[start..start + w as usize]
    }

    pub(crate) fn row_mut(&mut self, y: u32, x: u32, w: u32) -> &mut [u32] {
        let start = self.index(x, y);
        &mut self.pixels[start..start + w as usize]
    }

    /// Content hash over geometry, layout and pixels.
    pub(crate) fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        let f = self.format;
        h.write_bytes(&[f.red_shift(), f.green_shift(), f.blue_shift(), f.alpha_shift()]);
        for &px in &self.pixels {
            h.write_u32(px);
        }
        h.finish()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} buffer",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
