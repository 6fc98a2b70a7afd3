use super::*;

#[test]
fn pack_unpack_respects_channel_shifts() {
    let rgba = [10u8, 20, 30, 40];
    assert_eq!(PixelFormat::RGBA8.pack(rgba), 0x281E_140A);
    assert_eq!(PixelFormat::ARGB32.pack(rgba), 0x280A_141E);
    assert_eq!(PixelFormat::ARGB32.unpack(0x280A_141E), rgba);
}

#[test]
fn format_new_rejects_bad_shifts() {
    assert!(PixelFormat::new(0, 8, 16, 24).is_ok());
    assert!(PixelFormat::new(0, 0, 16, 24).is_err());
    assert!(PixelFormat::new(0, 8, 12, 24).is_err());
    assert!(PixelFormat::new(0, 8, 16, 32).is_err());
    assert!(PixelFormat::new(32, 8, 16, 0).is_err());
}

#[test]
fn shifts_are_readable_but_only_set_through_new() {
    let f = PixelFormat::new(24, 16, 8, 0).unwrap();
    assert_eq!(
        [f.red_shift(), f.green_shift(), f.blue_shift(), f.alpha_shift()],
        [24, 16, 8, 0]
    );
    assert_eq!(f.unpack(f.pack([1, 2, 3, 4])), [1, 2, 3, 4]);
    assert_eq!(PixelFormat::ARGB32.red_shift(), 16);
}

#[test]
fn from_pixels_checks_length() {
    assert!(PixelBuffer::from_pixels(2, 2, PixelFormat::RGBA8, vec![0; 4]).is_ok());
    assert!(PixelBuffer::from_pixels(2, 2, PixelFormat::RGBA8, vec![0; 3]).is_err());
}

#[test]
fn rgba_image_conversion_preserves_bytes() {
    let img = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 4, 250, 251, 252, 253]).unwrap();
    let buf = PixelBuffer::from_rgba_image(&img, PixelFormat::ARGB32);
    assert_eq!(buf.format().unpack(buf.get_pixel(1, 0)), [250, 251, 252, 253]);
    assert_eq!(buf.to_rgba_image(), img);
}

#[test]
fn to_format_repacks_pixels() {
    let mut buf = PixelBuffer::new(1, 1, PixelFormat::RGBA8);
    buf.set_pixel(0, 0, PixelFormat::RGBA8.pack([9, 8, 7, 6]));
    let converted = buf.to_format(PixelFormat::ARGB32);
    assert_eq!(converted.format(), PixelFormat::ARGB32);
    assert_eq!(PixelFormat::ARGB32.unpack(converted.get_pixel(0, 0)), [9, 8, 7, 6]);
}

#[test]
fn copy_from_overwrites_in_place() {
    let mut dst = PixelBuffer::new(2, 2, PixelFormat::RGBA8);
    let src = PixelBuffer::from_pixels(2, 2, PixelFormat::RGBA8, vec![7; 4]).unwrap();
    dst.copy_from(&src);
    assert_eq!(dst.pixels(), &[7, 7, 7, 7]);
}

#[test]
#[should_panic(expected = "copy_from")]
fn copy_from_panics_on_geometry_mismatch() {
    let mut dst = PixelBuffer::new(2, 2, PixelFormat::RGBA8);
    dst.copy_from(&PixelBuffer::new(3, 2, PixelFormat::RGBA8));
}

#[test]
fn contains_rect_edges() {
    let buf = PixelBuffer::new(16, 8, PixelFormat::RGBA8);
    assert!(buf.contains_rect(0, 0, 16, 8));
    assert!(buf.contains_rect(8, 4, 8, 4));
    assert!(!buf.contains_rect(9, 0, 8, 1));
    assert!(!buf.contains_rect(0, 0, 1, 9));
}

#[test]
fn fingerprint_tracks_content() {
    let a = PixelBuffer::new(2, 2, PixelFormat::RGBA8);
    let mut b = a.clone();
    assert_eq!(a.fingerprint(), b.fingerprint());
    b.set_pixel(1, 1, 1);
    assert_ne!(a.fingerprint(), b.fingerprint());
}
