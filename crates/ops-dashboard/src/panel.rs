//! Column selector panel: open state and placement beneath its trigger

use crate::constants::PANEL_VIEWPORT_MARGIN;

/// Trigger geometry measured by the surface, in viewport pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Anchor {
    /// Left edge of the trigger
    pub left: f64,
    /// Bottom edge of the trigger
    pub bottom: f64,
    /// Current rendered width of the panel (0 while hidden)
    pub panel_width: f64,
    pub viewport_width: f64,
}

/// Fixed-position coordinates of the open panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPosition {
    pub left: f64,
    pub top: f64,
}

impl PanelPosition {
    /// Left-aligned under the trigger, kept inside the viewport
    pub fn beneath(anchor: &Anchor) -> Self {
        let max_left = (anchor.viewport_width - anchor.panel_width - PANEL_VIEWPORT_MARGIN).max(PANEL_VIEWPORT_MARGIN);
        Self {
            left: anchor.left.max(PANEL_VIEWPORT_MARGIN).min(max_left),
            top: anchor.bottom,
        }
    }
}

/// Open while it holds a position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPanel {
    position: Option<PanelPosition>,
}

impl ColumnPanel {
    pub fn is_open(&self) -> bool {
        self.position.is_some()
    }

    /// Trigger click: open beneath the anchor, or close when already open
    pub fn toggle(&mut self, anchor: &Anchor) {
        self.position = match self.position {
            Some(_) => None,
            None => Some(PanelPosition::beneath(anchor)),
        };
    }

    /// Resize/scroll while open. A closed panel stays closed.
    pub fn reposition(&mut self, anchor: &Anchor) -> bool {
        if self.position.is_none() {
            return false;
        }
        self.position = Some(PanelPosition::beneath(anchor));
        true
    }

    /// Returns whether the panel was open
    pub fn close(&mut self) -> bool {
        self.position.take().is_some()
    }

    /// Inline style for the panel element
    pub fn style(&self) -> String {
        match self.position {
            None => "display: none;".to_string(),
            Some(pos) => format!("display: block; position: fixed; left: {}px; top: {}px;", pos.left, pos.top),
        }
    }

    /// Value for the panel's aria-hidden attribute
    pub fn aria_hidden(&self) -> &'static str {
        if self.is_open() { "false" } else { "true" }
    }
}
