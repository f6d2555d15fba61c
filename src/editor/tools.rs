#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Editor toolbar tools.
pub enum Tool {
    /// Freehand drawing.
    Graffiti,
    /// Mosaic brush.
    Mosaic,
    /// Chartlet picker.
    Chartlet,
    /// Text sticker editor.
    Text,
    /// Crop and rotate.
    Crop,
    /// Color filters.
    Filter,
    /// Background music (video editing).
    Music,
}

impl Tool {
    /// Tools that capture canvas touches while active.
    pub fn is_draw_tool(self) -> bool {
        matches!(self, Tool::Graffiti | Tool::Mosaic)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Toolbar selection plus the drawing state owned by the draw tools.
pub struct ToolSelection {
    selected: Option<Tool>,
    last_selected: Option<Tool>,
    draw_enabled: bool,
    mosaic_enabled: bool,
    brush_controls_visible: bool,
    mosaic_controls_visible: bool,
}

impl ToolSelection {
    /// No tool selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active tool.
    pub fn selected(&self) -> Option<Tool> {
        self.selected
    }

    /// Most recently selected tool, cleared when a draw tool is torn down.
    pub fn last_selected(&self) -> Option<Tool> {
        self.last_selected
    }

    /// Whether graffiti drawing captures touches.
    pub fn is_draw_enabled(&self) -> bool {
        self.draw_enabled
    }

    /// Whether mosaic drawing captures touches.
    pub fn is_mosaic_enabled(&self) -> bool {
        self.mosaic_enabled
    }

    /// Whether the brush controls are shown.
    pub fn brush_controls_visible(&self) -> bool {
        self.brush_controls_visible
    }

    /// Whether the mosaic controls are shown.
    pub fn mosaic_controls_visible(&self) -> bool {
        self.mosaic_controls_visible
    }

    /// Activate `tool`. Graffiti and mosaic switch their drawing mode and controls on.
    pub fn select(&mut self, tool: Tool) {
        self.selected = Some(tool);
        self.last_selected = Some(tool);
        self.draw_enabled = tool == Tool::Graffiti;
        self.mosaic_enabled = tool == Tool::Mosaic;
        self.brush_controls_visible = tool == Tool::Graffiti;
        self.mosaic_controls_visible = tool == Tool::Mosaic;
    }

    /// Tear down graffiti/mosaic if it was the last selected tool.
    pub fn deselect_draw_tool(&mut self) -> bool {
        if !self.last_selected.is_some_and(Tool::is_draw_tool) {
            return false;
        }
        self.draw_enabled = false;
        self.mosaic_enabled = false;
        self.brush_controls_visible = false;
        self.mosaic_controls_visible = false;
        self.last_selected = None;
        true
    }

    /// Run before any sticker insertion or text update: drawing stops and a selected
    /// graffiti/mosaic tool is cleared. Other tools are left alone.
    pub fn guard_sticker_insertion(&mut self) -> bool {
        let mut changed = self.deselect_draw_tool();
        if self.selected.is_some_and(Tool::is_draw_tool) {
            self.selected = None;
            changed = true;
        }
        if changed {
            tracing::debug!("draw tools deselected for sticker insertion");
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/tools.rs"]
mod tests;
