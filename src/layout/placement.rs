use crate::foundation::{
    core::{Point, Rect, Size},
    error::{StickerError, StickerResult},
};

/// Inward margin applied by named anchors on their edge-adjacent axes.
pub const ANCHOR_MARGIN: f64 = 60.0;

/// Vertical gap between a sticker and a caption stacked below it.
pub const STACK_SPACING: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Where a generated sticker's center lands on the canvas.
pub enum AnchorPosition {
    /// `(margin, margin)`.
    TopLeft,
    /// `(width / 2, margin)`.
    TopCenter,
    /// `(width - margin, margin)`.
    TopRight,
    /// `(margin, height / 2)`.
    CenterLeft,
    /// Canvas midpoint.
    #[default]
    Center,
    /// `(width - margin, height / 2)`.
    CenterRight,
    /// `(margin, height - margin)`.
    BottomLeft,
    /// `(width / 2, height - margin)`.
    BottomCenter,
    /// `(width - margin, height - margin)`.
    BottomRight,
    /// Relative point in `[0, 1]²`, scaled by the canvas size with no margin.
    Custom {
        /// Horizontal fraction of the canvas width.
        x: f64,
        /// Vertical fraction of the canvas height.
        y: f64,
    },
}

impl AnchorPosition {
    /// Every named anchor, in reading order.
    pub const NAMED: [AnchorPosition; 9] = [
        AnchorPosition::TopLeft,
        AnchorPosition::TopCenter,
        AnchorPosition::TopRight,
        AnchorPosition::CenterLeft,
        AnchorPosition::Center,
        AnchorPosition::CenterRight,
        AnchorPosition::BottomLeft,
        AnchorPosition::BottomCenter,
        AnchorPosition::BottomRight,
    ];

    /// Reject custom points outside `[0, 1]`.
    pub fn validate(&self) -> StickerResult<()> {
        if let AnchorPosition::Custom { x, y } = *self {
            for (name, v) in [("x", x), ("y", y)] {
                if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                    return Err(StickerError::validation(format!(
                        "custom anchor {name} must be finite and within [0, 1]"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Anchor plus an optional uniform scale for a generated sticker.
pub struct PlacementSpec {
    /// Anchor of the sticker center.
    pub position: AnchorPosition,
    /// Uniform scale, `None` keeps 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl PlacementSpec {
    /// Placement at `position` with no scale.
    pub fn at(position: AnchorPosition) -> Self {
        Self {
            position,
            scale: None,
        }
    }

    /// Set the uniform scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Check the anchor and scale.
    pub fn validate(&self) -> StickerResult<()> {
        self.position.validate()?;
        if let Some(s) = self.scale
            && (!s.is_finite() || s <= 0.0)
        {
            return Err(StickerError::validation("placement scale must be finite and > 0"));
        }
        Ok(())
    }
}

/// Center point for a sticker placed at `position` on a canvas of `canvas` size.
///
/// Custom points are not clamped; callers validate them at configuration time.
pub fn resolve(position: AnchorPosition, canvas: Size) -> Point {
    let (w, h) = (canvas.width, canvas.height);
    let m = ANCHOR_MARGIN;
    let (x, y) = match position {
        AnchorPosition::TopLeft => (m, m),
        AnchorPosition::TopCenter => (w * 0.5, m),
        AnchorPosition::TopRight => (w - m, m),
        AnchorPosition::CenterLeft => (m, h * 0.5),
        AnchorPosition::Center => (w * 0.5, h * 0.5),
        AnchorPosition::CenterRight => (w - m, h * 0.5),
        AnchorPosition::BottomLeft => (m, h - m),
        AnchorPosition::BottomCenter => (w * 0.5, h - m),
        AnchorPosition::BottomRight => (w - m, h - m),
        AnchorPosition::Custom { x, y } => (w * x, h * y),
    };
    Point::new(x, y)
}

/// Center for a sticker of size `next` stacked `spacing` below the settled frame `previous`,
/// sharing its horizontal center.
pub fn stack_below(previous: Rect, next: Size, spacing: f64) -> Point {
    let top = previous.y1 + spacing;
    Point::new(previous.center().x, top + next.height * 0.5)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
