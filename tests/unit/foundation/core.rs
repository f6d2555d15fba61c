use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(serde_json::json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 0, 0));

    let c: Rgba8 = serde_json::from_value(serde_json::json!("0000FF80")).unwrap();
    assert_eq!(c, Rgba8::rgba(0, 0, 255, 0x80));

    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zz0000").is_err());
}

#[test]
fn parses_byte_arrays_and_serializes_as_hex() {
    let c: Rgba8 = serde_json::from_value(serde_json::json!([1, 2, 3])).unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    assert_eq!(serde_json::to_value(c).unwrap(), serde_json::json!("#010203"));

    let c = Rgba8::rgba(1, 2, 3, 4);
    assert_eq!(c.to_hex(), "#01020304");
}

#[test]
fn with_alpha_replaces_channel_and_clamps() {
    let c = Rgba8::rgb(10, 20, 30);
    assert_eq!(c.with_alpha(0.5).a, 128);
    assert_eq!(c.with_alpha(2.0).a, 255);
    assert_eq!(c.with_alpha(-1.0).a, 0);
    assert_eq!(c.with_alpha(f32::NAN), c);
}

#[test]
fn white_detection_ignores_alpha() {
    assert!(Rgba8::WHITE.is_white());
    assert!(Rgba8::rgba(255, 255, 255, 10).is_white());
    assert!(!Rgba8::rgb(255, 255, 0).is_white());
}
