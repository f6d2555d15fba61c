use super::*;

#[test]
fn every_builtin_outline_rasterizes_with_coverage() {
    for group in BUILTIN_GROUPS {
        assert!(!group.is_empty());
        for art in *group {
            let bmp = art.rasterize().unwrap();
            assert_eq!((bmp.width(), bmp.height()), (BUILTIN_STICKER_PX, BUILTIN_STICKER_PX));
            assert!(!bmp.is_fully_transparent(), "{} rendered empty", art.name);
        }
    }
}

#[test]
fn diamond_center_is_filled_and_corner_is_empty() {
    let bmp = rasterize_outline("M12 2 L22 12 L12 22 L2 12 Z", Rgba8::rgb(0, 0, 255), 48).unwrap();
    assert_eq!(bmp.pixel(24, 24), Some([0, 0, 255, 255]));
    assert_eq!(bmp.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn rasterization_is_deterministic() {
    let a = BUILTIN_GROUPS[1][0].rasterize().unwrap();
    let b = BUILTIN_GROUPS[1][0].rasterize().unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn bad_outlines_are_rejected() {
    assert!(rasterize_outline("", Rgba8::WHITE, 8).is_err());
    assert!(rasterize_outline("M 1 Q", Rgba8::WHITE, 8).is_err());
}
