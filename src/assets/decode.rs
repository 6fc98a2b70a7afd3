use crate::{
    foundation::error::{TexAnimError, TexAnimResult},
    raster::buffer::{PixelBuffer, PixelFormat},
};

/// Decode any image format supported by the `image` crate into a straight-alpha buffer.
pub fn decode_image(bytes: &[u8], format: PixelFormat) -> TexAnimResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| TexAnimError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(TexAnimError::decode("image has zero width or height"));
    }
    Ok(PixelBuffer::from_rgba_image(&rgba, format))
}

/// Encode a buffer as PNG bytes.
pub fn encode_png(buf: &PixelBuffer) -> TexAnimResult<Vec<u8>> {
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(buf.to_rgba_image())
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| TexAnimError::Other(anyhow::Error::new(e).context("encode png")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
