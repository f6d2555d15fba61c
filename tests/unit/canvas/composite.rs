use super::*;
use crate::{
    canvas::surface::StickerContent,
    foundation::core::{Point, StickerId},
};

#[test]
fn empty_canvas_renders_clear_color() {
    let canvas = StickerCanvas::new(8, 4).unwrap();
    let out = canvas.render(None, Rgba8::TRANSPARENT).unwrap();
    assert_eq!((out.width(), out.height()), (8, 4));
    assert!(out.is_fully_transparent());

    let out = canvas.render(None, Rgba8::rgb(0, 255, 0)).unwrap();
    assert_eq!(out.pixel(3, 2), Some([0, 255, 0, 255]));
}

#[test]
fn stickers_paint_at_their_frames_in_insertion_order() {
    let mut canvas = StickerCanvas::new(40, 40).unwrap();
    let red = StickerBitmap::solid(10, 10, [255, 0, 0, 255]).unwrap();
    let blue = StickerBitmap::solid(10, 10, [0, 0, 255, 255]).unwrap();

    let a = canvas.add_sticker(StickerContent::Image(red), false).unwrap();
    canvas.set_center(a, Point::new(10.0, 10.0));
    let b = canvas.add_sticker(StickerContent::Image(blue), false).unwrap();
    canvas.set_center(b, Point::new(14.0, 14.0));
    assert!(a < b && a != StickerId(0));

    let out = canvas.render(None, Rgba8::TRANSPARENT).unwrap();
    assert_eq!(out.pixel(6, 6), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(13, 13), Some([0, 0, 255, 255]));
    assert_eq!(out.pixel(30, 30), Some([0, 0, 0, 0]));
}

#[test]
fn background_is_stretched_to_canvas() {
    let canvas = StickerCanvas::new(20, 20).unwrap();
    let bg = StickerBitmap::solid(2, 2, [10, 20, 30, 255]).unwrap();
    let out = canvas.render(Some(&bg), Rgba8::TRANSPARENT).unwrap();
    assert_eq!(out.pixel(10, 10), Some([10, 20, 30, 255]));
}

#[test]
fn render_is_deterministic() {
    let mut canvas = StickerCanvas::new(32, 32).unwrap();
    let bmp = StickerBitmap::solid(7, 5, [200, 100, 50, 255]).unwrap();
    let id = canvas.add_sticker(StickerContent::Image(bmp), false).unwrap();
    canvas.set_scale(id, 1.5);
    let a = canvas.render(None, Rgba8::BLACK).unwrap();
    let b = canvas.render(None, Rgba8::BLACK).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
}
