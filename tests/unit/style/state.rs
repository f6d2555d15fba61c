use super::*;

fn config() -> TextConfig {
    TextConfig {
        min_font_size: 10.0,
        max_font_size: 12.0,
        default_font_size: 11.0,
        colors: vec![Rgba8::WHITE, Rgba8::rgb(255, 0, 0), Rgba8::rgb(0, 0, 255)],
        system_font: None,
        fonts_dir: None,
    }
}

fn snapshot(color: Rgba8) -> StickerText {
    StickerText {
        image: crate::assets::bitmap::StickerBitmap::transparent(4, 4).unwrap(),
        text: "edit me".to_string(),
        color,
        background: true,
        font_size: 12.0,
        font_name: Some("Brand".to_string()),
        bold: true,
        italic: false,
        underline: true,
        strikethrough: false,
        alpha: 0.5,
    }
}

#[test]
fn new_state_starts_from_config_defaults() {
    let s = StyleState::new(&config());
    assert_eq!(s.text(), "");
    assert_eq!(s.font_size(), 11.0);
    assert_eq!(s.color(), Rgba8::WHITE);
    assert_eq!(s.color_choice(), ColorChoice::Palette(0));
    assert_eq!(s.custom_color(), Rgba8::rgb(0, 0, 255));
    assert_eq!(s.alpha(), 1.0);
    assert!(!s.bold() && !s.italic() && !s.underline() && !s.strikethrough());
    assert!(!s.background());
}

#[test]
fn font_size_steps_stop_at_configured_bounds() {
    let mut s = StyleState::new(&config());
    assert!(s.increase_font_size());
    assert!(!s.increase_font_size());
    assert_eq!(s.font_size(), 12.0);
    assert!(s.decrease_font_size());
    assert!(s.decrease_font_size());
    assert!(!s.decrease_font_size());
    assert_eq!(s.font_size(), 10.0);
}

#[test]
fn alpha_is_clamped_and_nan_ignored() {
    let mut s = StyleState::new(&config());
    s.set_alpha(1.7);
    assert_eq!(s.alpha(), 1.0);
    s.set_alpha(-3.0);
    assert_eq!(s.alpha(), 0.0);
    s.set_alpha(0.4);
    s.set_alpha(f32::NAN);
    assert_eq!(s.alpha(), 0.4);
}

#[test]
fn toggles_flip_and_report_the_new_value() {
    let mut s = StyleState::new(&config());
    assert!(s.toggle_bold());
    assert!(s.toggle_italic());
    assert!(s.toggle_underline());
    assert!(!s.toggle_underline());
    assert!(s.toggle_strikethrough());
    assert!(s.toggle_background());
    assert!(s.bold() && s.italic() && !s.underline() && s.strikethrough() && s.background());
}

#[test]
fn background_swaps_foreground_for_contrast() {
    let cfg = config();
    let mut s = StyleState::new(&cfg);
    assert_eq!(s.foreground(), Rgba8::WHITE);
    assert_eq!(s.background_fill(), None);

    s.toggle_background();
    assert_eq!(s.foreground(), Rgba8::BLACK);
    assert_eq!(s.background_fill(), Some(Rgba8::WHITE));

    assert!(s.select_palette_color(&cfg, 1));
    assert_eq!(s.foreground(), Rgba8::WHITE);
    assert_eq!(s.background_fill(), Some(Rgba8::rgb(255, 0, 0)));

    s.set_alpha(0.0);
    assert_eq!(s.foreground().a, 0);
    assert_eq!(s.background_fill().map(|c| c.a), Some(0));
}

#[test]
fn palette_and_custom_selection() {
    let cfg = config();
    let mut s = StyleState::new(&cfg);
    assert!(!s.select_palette_color(&cfg, 9));
    assert_eq!(s.color_choice(), ColorChoice::Palette(0));

    s.select_custom_color(Rgba8::rgb(1, 2, 3));
    assert_eq!(s.color(), Rgba8::rgb(1, 2, 3));
    assert_eq!(s.color_choice(), ColorChoice::Custom);
    assert_eq!(s.custom_color(), Rgba8::rgb(1, 2, 3));
}

#[test]
fn editing_restores_every_field_from_a_snapshot() {
    let cfg = config();
    let s = StyleState::from_sticker_text(&cfg, &snapshot(Rgba8::rgb(255, 0, 0)));
    assert_eq!(s.text(), "edit me");
    assert_eq!(s.font_name(), Some("Brand"));
    assert_eq!(s.font_size(), 12.0);
    assert!(s.bold() && !s.italic() && s.underline() && !s.strikethrough() && s.background());
    assert_eq!(s.alpha(), 0.5);
    assert_eq!(s.color_choice(), ColorChoice::Palette(1));

    let s = StyleState::from_sticker_text(&cfg, &snapshot(Rgba8::rgb(9, 9, 9)));
    assert_eq!(s.color_choice(), ColorChoice::Custom);
    assert_eq!(s.custom_color(), Rgba8::rgb(9, 9, 9));
    assert_eq!(s.color(), Rgba8::rgb(9, 9, 9));
}

#[test]
fn empty_palette_falls_back_to_white() {
    let cfg = TextConfig {
        colors: Vec::new(),
        ..config()
    };
    let s = StyleState::new(&cfg);
    assert_eq!(s.color(), Rgba8::WHITE);
    assert_eq!(s.color_choice(), ColorChoice::Custom);
}
