use super::*;

#[test]
fn graffiti_is_torn_down_by_insertion() {
    let mut tools = ToolSelection::new();
    tools.select(Tool::Graffiti);
    assert!(tools.is_draw_enabled() && tools.brush_controls_visible());

    assert!(tools.guard_sticker_insertion());
    assert_eq!(tools.selected(), None);
    assert_eq!(tools.last_selected(), None);
    assert!(!tools.is_draw_enabled() && !tools.brush_controls_visible());
}

#[test]
fn mosaic_is_torn_down_by_insertion() {
    let mut tools = ToolSelection::new();
    tools.select(Tool::Mosaic);
    assert!(tools.is_mosaic_enabled() && tools.mosaic_controls_visible());

    assert!(tools.guard_sticker_insertion());
    assert_eq!(tools.selected(), None);
    assert!(!tools.is_mosaic_enabled() && !tools.mosaic_controls_visible());
}

#[test]
fn other_tools_are_left_untouched() {
    for tool in [Tool::Chartlet, Tool::Text, Tool::Crop, Tool::Filter, Tool::Music] {
        let mut tools = ToolSelection::new();
        tools.select(tool);
        let before = tools.clone();
        assert!(!tools.guard_sticker_insertion(), "{tool:?}");
        assert_eq!(tools, before);
    }
}

#[test]
fn no_tool_is_a_no_op() {
    let mut tools = ToolSelection::new();
    assert!(!tools.guard_sticker_insertion());
    assert_eq!(tools, ToolSelection::default());
}

#[test]
fn switching_away_from_graffiti_turns_drawing_off() {
    let mut tools = ToolSelection::new();
    tools.select(Tool::Graffiti);
    tools.select(Tool::Chartlet);
    assert!(!tools.is_draw_enabled());
    assert_eq!(tools.last_selected(), Some(Tool::Chartlet));
    assert!(!tools.guard_sticker_insertion());
    assert_eq!(tools.selected(), Some(Tool::Chartlet));
}
