use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let mut raw = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..(w * h) {
        raw.extend_from_slice(&px);
    }
    let img = image::RgbaImage::from_raw(w, h, raw).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, [100, 50, 200, 128]);

    let bmp = decode_image(&buf).unwrap();
    assert_eq!(bmp.width(), 1);
    assert_eq!(bmp.height(), 1);
    assert_eq!(
        bmp.as_premul_bytes(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_svg_ok_and_err() {
    let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="3"><rect width="4" height="3" fill="red"/></svg>"#;
    let bmp = decode_image(ok).unwrap();
    assert_eq!((bmp.width(), bmp.height()), (4, 3));
    assert_eq!(bmp.pixel(1, 1), Some([255, 0, 0, 255]));

    assert!(decode_image(br#"<svg"#).is_err());
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn fit_decode_downscales_preserving_aspect() {
    let buf = png_bytes(40, 20, [0, 0, 0, 255]);
    let bmp = decode_image_fit(&buf, 10, 10).unwrap();
    assert_eq!((bmp.width(), bmp.height()), (10, 5));

    let bmp = decode_image_fit(&buf, 100, 100).unwrap();
    assert_eq!((bmp.width(), bmp.height()), (40, 20));
}

#[test]
fn fit_within_never_upscales() {
    assert_eq!(fit_within(10, 10, 20, 20), (10, 10));
    assert_eq!(fit_within(100, 50, 20, 20), (20, 10));
    assert_eq!(fit_within(1, 1000, 10, 10), (1, 10));
}
