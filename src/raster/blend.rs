//! Rectangular block copy and cross-fade between regions of packed pixel buffers.
//!
//! Both operations clip the rectangle against source and destination bounds, so they never fail.

use super::buffer::{PixelBuffer, PixelFormat};

/// Straight-alpha color as `[r, g, b, a]`.
pub type Rgba8 = [u8; 4];

/// Linear blend of two straight-alpha colors, `t = 0` yields `a` and `t = 1` yields `b`.
///
/// A fully transparent side contributes no color: its RGB is replaced by the other side's RGB
/// before interpolating. Alpha always interpolates.
pub fn lerp_rgba(a: Rgba8, b: Rgba8, t: f32) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let (mut a, mut b) = (a, b);
    if a[3] == 0 {
        a[..3].copy_from_slice(&b[..3]);
    } else if b[3] == 0 {
        b[..3].copy_from_slice(&a[..3]);
    }

    std::array::from_fn(|i| lerp_u8(a[i], b[i], t))
}

/// [`lerp_rgba`] over packed pixels in `format`.
pub fn lerp_color(format: PixelFormat, c1: u32, c2: u32, t: f32) -> u32 {
    format.pack(lerp_rgba(format.unpack(c1), format.unpack(c2), t))
}

/// Copy the `w x h` region at `(u, v)` of `src` to `(du, dv)` of `dst`.
#[allow(clippy::too_many_arguments)]
pub fn copy_rect(
    src: &PixelBuffer,
    u: u32,
    v: u32,
    w: u32,
    h: u32,
    dst: &mut PixelBuffer,
    du: u32,
    dv: u32,
) {
    let w = w
        .min(src.width().saturating_sub(u))
        .min(dst.width().saturating_sub(du));
    let h = h
        .min(src.height().saturating_sub(v))
        .min(dst.height().saturating_sub(dv));
    if w == 0 || h == 0 {
        return;
    }

    let (sf, df) = (src.format(), dst.format());
    for ry in 0..h {
        let s = src.row(v + ry, u, w);
        let d = dst.row_mut(dv + ry, du, w);
        if sf == df {
            d.copy_from_slice(s);
        } else {
            for (dp, &sp) in d.iter_mut().zip(s) {
                *dp = df.pack(sf.unpack(sp));
            }
        }
    }
}

/// Write a cross-fade of two `w x h` regions of `src`, at `(u0, v0)` and `(u1, v1)`, to
/// `(du, dv)` of `dst`. `blend = 0` is the first region, `blend = 1` the second.
#[allow(clippy::too_many_arguments)]
pub fn blend_copy_rect(
    src: &PixelBuffer,
    u0: u32,
    v0: u32,
    u1: u32,
    v1: u32,
    w: u32,
    h: u32,
    dst: &mut PixelBuffer,
    du: u32,
    dv: u32,
    blend: f32,
) {
    let w = w
        .min(src.width().saturating_sub(u0.max(u1)))
        .min(dst.width().saturating_sub(du));
    let h = h
        .min(src.height().saturating_sub(v0.max(v1)))
        .min(dst.height().saturating_sub(dv));
    if w == 0 || h == 0 {
        return;
    }

    let (sf, df) = (src.format(), dst.format());
    for ry in 0..h {
        let a = src.row(v0 + ry, u0, w);
        let b = src.row(v1 + ry, u1, w);
        let d = dst.row_mut(dv + ry, du, w);
        for ((dp, &pa), &pb) in d.iter_mut().zip(a).zip(b) {
            *dp = df.pack(lerp_rgba(sf.unpack(pa), sf.unpack(pb), blend));
        }
    }
}

#[inline]
fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = f32::from(a);
    let b = f32::from(b);
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
