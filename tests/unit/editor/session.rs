use std::io::Cursor;

use super::*;
use crate::{
    assets::bitmap::StickerBitmap,
    assets::loader::{FsImageLoader, ImageLoadCallback},
    config::model::{PresetSticker, PresetText},
    editor::tools::Tool,
    foundation::core::{Point, Rect, Rgba8},
    layout::placement::{ANCHOR_MARGIN, AnchorPosition, PlacementSpec},
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "stickerkit_editor_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, vec![200u8; (w * h * 4) as usize]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn config(width: u32, height: u32) -> StickerConfig {
    let mut cfg = StickerConfig::default();
    cfg.canvas.width = width;
    cfg.canvas.height = height;
    cfg
}

fn editor(width: u32, height: u32) -> StickerEditor {
    StickerEditor::headless(config(width, height), std::env::temp_dir()).unwrap()
}

fn square_chartlet(px: u32) -> Chartlet {
    Chartlet::new(ChartletSource::Image(
        StickerBitmap::solid(px, px, [0, 128, 255, 255]).unwrap(),
    ))
}

#[test]
fn image_chartlet_is_inserted_selected_at_center() {
    let mut ed = editor(300, 200);
    let id = ed.insert_chartlet(&square_chartlet(20)).unwrap().unwrap();
    assert_eq!(ed.surface().selected(), Some(id));
    assert_eq!(ed.surface().center(id), Some(Point::new(150.0, 100.0)));
    assert_eq!(ed.pending_placements().count(), 0);
    assert_eq!(ed.settle_layout(), 0);
    assert_eq!(
        ed.surface().frame(id),
        Some(Rect::new(140.0, 90.0, 160.0, 110.0))
    );
}

#[test]
fn insertion_tears_down_active_draw_tool() {
    let mut ed = editor(100, 100);
    ed.tools_mut().select(Tool::Graffiti);
    ed.insert_chartlet(&square_chartlet(4)).unwrap();
    assert_eq!(ed.tools().selected(), None);
    assert!(!ed.tools().is_draw_enabled());

    ed.tools_mut().select(Tool::Chartlet);
    ed.insert_chartlet(&square_chartlet(4)).unwrap();
    assert_eq!(ed.tools().selected(), Some(Tool::Chartlet));
}

#[test]
fn undecodable_data_is_skipped_in_image_mode_and_kept_in_video_mode() {
    let bad = Chartlet::new(ChartletSource::Data(Arc::new(b"not an image".to_vec())));
    let mut ed = editor(100, 100);
    assert_eq!(ed.insert_chartlet(&bad).unwrap(), None);
    assert!(ed.surface().is_empty());

    let good = Chartlet::new(ChartletSource::Data(Arc::new(png_bytes(6, 4))));
    let id = ed.insert_chartlet(&good).unwrap().unwrap();
    ed.settle_layout();
    assert_eq!(ed.surface().frame(id).map(|r| r.size()), Some((6.0, 4.0).into()));

    let mut video = editor(100, 100).with_mode(EditorMode::Video);
    assert_eq!(video.mode(), EditorMode::Video);
    let id = video.insert_chartlet(&good).unwrap().unwrap();
    assert_eq!(video.surface().sticker_ids(), vec![id]);
}

#[test]
fn url_chartlet_without_loader_is_ignored() {
    let mut ed = editor(100, 100);
    let c = Chartlet::new(ChartletSource::Url("https://example.invalid/a.png".into()));
    assert_eq!(ed.insert_chartlet(&c).unwrap(), None);
    assert!(ed.pump_downloads().unwrap().is_empty());
    assert!(ed.surface().is_empty());
}

#[test]
fn url_chartlet_lands_on_pump() {
    let dir = temp_dir("download");
    std::fs::write(dir.join("a.png"), png_bytes(8, 8)).unwrap();
    let mut ed = editor(100, 100).with_loader(Box::new(FsImageLoader::new(&dir)));

    let c = Chartlet::new(ChartletSource::Url("a.png".into()));
    assert_eq!(ed.insert_chartlet(&c).unwrap(), None);
    assert!(ed.surface().is_empty());

    let ids = ed.pump_downloads().unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(ed.surface().selected(), Some(ids[0]));

    let missing = Chartlet::new(ChartletSource::Url("missing.png".into()));
    ed.insert_chartlet(&missing).unwrap();
    assert!(ed.pump_downloads().unwrap().is_empty());
    assert_eq!(ed.surface().len(), 1);
}

struct Parked(Rc<RefCell<Vec<(ImageRequest, ImageLoadCallback)>>>);

impl ImageLoader for Parked {
    fn load(&mut self, request: ImageRequest, done: ImageLoadCallback) {
        self.0.borrow_mut().push((request, done));
    }
}

#[test]
fn download_requests_carry_mode_cache_policy_and_canvas_size() {
    let parked = Rc::new(RefCell::new(Vec::new()));
    let mut ed = editor(120, 80)
        .with_mode(EditorMode::Video)
        .with_loader(Box::new(Parked(Rc::clone(&parked))));
    ed.insert_chartlet(&Chartlet::new(ChartletSource::Url("x".into())))
        .unwrap();

    let (request, done) = parked.borrow_mut().pop().unwrap();
    assert_eq!(request.cache, CachePolicy::ExpireFromMemory);
    assert_eq!(request.target_size, Some((120.0, 80.0).into()));

    done(Ok(LoadedImage {
        image: None,
        data: Some(Arc::new(png_bytes(3, 3))),
    }));
    assert_eq!(ed.pump_downloads().unwrap().len(), 1);
}

#[test]
fn catalog_entries_insert_by_index() {
    let mut ed = editor(200, 200);
    ed.catalog_mut().load_titles();
    ed.catalog_mut().pump();
    assert_eq!(ed.catalog().selected_index(), Some(0));

    let id = ed.insert_from_catalog(0, 0).unwrap().unwrap();
    assert_eq!(ed.surface().selected(), Some(id));
    assert!(ed.insert_from_catalog(0, 99).is_err());
    assert!(ed.insert_from_catalog(42, 0).is_err());
}

#[test]
fn captions_stack_below_the_sticker_in_name_then_description_order() {
    let mut ed = editor(600, 600);
    let chartlet = square_chartlet(40)
        .with_name("Star")
        .with_description("A bright star");
    let id = ed.insert_chartlet(&chartlet).unwrap().unwrap();

    let ids = ed.surface().sticker_ids();
    assert_eq!(ids.len(), 3);
    assert_eq!(ed.surface().selected(), Some(id));
    let (name, desc) = (ids[1], ids[2]);
    assert_eq!(ed.surface().sticker_text(name).unwrap().text, "Star");
    assert_eq!(ed.surface().sticker_text(desc).unwrap().text, "A bright star");

    assert_eq!(ed.pending_placements().count(), 2);
    assert_eq!(ed.settle_layout(), 2);
    assert_eq!(ed.pending_placements().count(), 0);

    let sticker = ed.surface().frame(id).unwrap();
    let first = ed.surface().frame(name).unwrap();
    let second = ed.surface().frame(desc).unwrap();
    assert!((first.y0 - (sticker.y1 + STACK_SPACING)).abs() < 1e-9);
    assert!((second.y0 - (first.y1 + STACK_SPACING)).abs() < 1e-9);
    assert!((first.center().x - sticker.center().x).abs() < 1e-9);
    assert!((second.center().x - sticker.center().x).abs() < 1e-9);
}

#[test]
fn placements_for_removed_stickers_are_dropped() {
    let mut ed = editor(300, 300);
    ed.insert_chartlet(&square_chartlet(10).with_name("n")).unwrap();
    assert_eq!(ed.pending_placements().count(), 1);
    ed.remove_all();
    assert_eq!(ed.pending_placements().count(), 0);
    assert_eq!(ed.settle_layout(), 0);
}

#[test]
fn text_insert_edit_and_update_round_trip_the_style() {
    let mut ed = editor(200, 200);
    let mut style = ed.new_style();
    assert!(style.toggle_bold());
    let id = ed.insert_text(&style).unwrap();
    assert_eq!(ed.surface().selected(), Some(id));

    let mut reopened = ed.edit_style(id).unwrap();
    assert!(reopened.bold());
    assert!(reopened.toggle_underline());
    assert_eq!(ed.update_text(&reopened).unwrap(), Some(id));
    assert!(ed.surface().sticker_text(id).unwrap().underline);

    ed.surface_mut().deselect_all();
    assert_eq!(ed.update_text(&reopened).unwrap(), None);
}

#[test]
fn presets_are_placed_and_left_unselected() {
    let dir = temp_dir("presets");
    std::fs::write(dir.join("logo.png"), png_bytes(10, 10)).unwrap();

    let mut cfg = config(400, 300);
    cfg.preset_stickers = vec![
        PresetSticker {
            source: PresetStickerSource::Image("logo.png".into()),
            placement: PlacementSpec::at(AnchorPosition::TopRight).with_scale(2.0),
        },
        PresetSticker {
            source: PresetStickerSource::Url("https://example.invalid/x.png".into()),
            placement: PlacementSpec::at(AnchorPosition::Center),
        },
        PresetSticker {
            source: PresetStickerSource::Image("absent.png".into()),
            placement: PlacementSpec::at(AnchorPosition::Center),
        },
    ];
    cfg.preset_texts = vec![PresetText {
        text: String::new(),
        font_size: 30.0,
        color: Rgba8::WHITE,
        position: AnchorPosition::BottomLeft,
    }];

    let mut ed = StickerEditor::headless(cfg, &dir).unwrap();
    let ids = ed.apply_presets();
    assert_eq!(ids.len(), 2);
    assert_eq!(ed.surface().selected(), None);

    assert_eq!(
        ed.surface().center(ids[0]),
        Some(Point::new(400.0 - ANCHOR_MARGIN, ANCHOR_MARGIN))
    );
    assert_eq!(ed.surface().scale(ids[0]), Some(2.0));
    assert_eq!(
        ed.surface().center(ids[1]),
        Some(Point::new(ANCHOR_MARGIN, 300.0 - ANCHOR_MARGIN))
    );
    assert!(ed.surface().sticker_text(ids[1]).unwrap().bold);
}

#[test]
fn headless_rejects_invalid_config() {
    assert!(StickerEditor::headless(config(0, 10), std::env::temp_dir()).is_err());
}

#[test]
fn default_config_text_and_captions_have_ink() {
    let mut ed = editor(400, 400);
    let mut style = ed.new_style();
    style.set_text("Hello world");
    let id = ed.insert_text(&style).unwrap();
    let text = ed.surface().sticker_text(id).unwrap();
    assert!(text.image.width() > 30);
    assert!(!text.image.is_fully_transparent());

    ed.insert_chartlet(&square_chartlet(10).with_name("Star"))
        .unwrap()
        .unwrap();
    let caption = *ed.surface().sticker_ids().last().unwrap();
    let caption = ed.surface().sticker_text(caption).unwrap();
    assert_eq!(caption.text, "Star");
    assert!(!caption.image.is_fully_transparent());
}

#[test]
fn unrenderable_preset_text_is_skipped_without_dropping_the_rest() {
    let preset = |text: &str, font_size: f32| PresetText {
        text: text.to_string(),
        font_size,
        color: Rgba8::WHITE,
        position: AnchorPosition::Center,
    };
    let mut cfg = config(300, 300);
    cfg.preset_texts = vec![
        preset("before", 20.0),
        preset("far too wide", 20000.0),
        preset("after", 20.0),
    ];
    let mut ed = StickerEditor::headless(cfg, std::env::temp_dir()).unwrap();
    ed.surface_mut()
        .add_sticker(
            StickerContent::Image(StickerBitmap::solid(2, 2, [0, 0, 0, 255]).unwrap()),
            true,
        )
        .unwrap();

    let ids = ed.apply_presets();
    assert_eq!(ids.len(), 2);
    let texts: Vec<_> = ids
        .iter()
        .map(|id| ed.surface().sticker_text(*id).unwrap().text.clone())
        .collect();
    assert_eq!(texts, ["before", "after"]);
    assert_eq!(ed.surface().selected(), None);
}
