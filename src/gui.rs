//!
//! Host container for patch widgets.
//!
//! The Gui maps patch coordinates (pixels in the patch file) to
//! terminal cells, and keeps a registry of the widgets attached to it.
//! It doesn't own the widget states, those stay with the application.
//!
//! A Gui is only usable after it got a parent area with
//! [Gui::set_parent_area]. Before that every attach fails with
//! [WidgetError::InvalidGui].
//!

use crate::_private::NonExhaustive;
use crate::WidgetError;
use format_num_pattern::Locale;
use ratatui::layout::{Position, Rect};

/// Kind of an attached widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Numberbox,
}

/// Registry handle for an attached widget.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u32);

impl WidgetId {
    #[inline]
    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedWidget {
    pub id: WidgetId,
    pub kind: WidgetKind,
    /// Area as known at attach time.
    pub area: Rect,
}

/// Configuration for a Gui.
#[derive(Debug, Clone)]
pub struct GuiConfig {
    /// Patch pixels per terminal column.
    pub cell_width: u16,
    /// Patch pixels per terminal row.
    pub cell_height: u16,
    /// Locale for number formatting.
    pub locale: Locale,
    /// Maximum fraction digits for newly created number boxes.
    pub max_fraction_digits: u8,

    pub non_exhaustive: NonExhaustive,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            cell_width: 7,
            cell_height: 14,
            locale: Locale::default(),
            max_fraction_digits: 6,
            non_exhaustive: NonExhaustive,
        }
    }
}

/// Host container.
#[derive(Debug, Clone)]
pub struct Gui {
    config: GuiConfig,
    parent: Option<Rect>,
    widgets: Vec<AttachedWidget>,
    next_id: u32,
}

impl Default for Gui {
    fn default() -> Self {
        Self::with_config(GuiConfig::default())
    }
}

impl Gui {
    /// New gui without a parent area.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GuiConfig) -> Self {
        Self {
            config,
            parent: None,
            widgets: Default::default(),
            next_id: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Locale used for number formatting.
    #[inline]
    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    /// Area the patch is shown in.
    pub fn set_parent_area(&mut self, area: Rect) {
        self.parent = Some(area);
    }

    #[inline]
    pub fn parent_area(&self) -> Option<Rect> {
        self.parent
    }

    /// The gui has a parent area and usable cell metrics.
    pub fn is_valid(&self) -> bool {
        match self.parent {
            Some(parent) => {
                !parent.is_empty() && self.config.cell_width > 0 && self.config.cell_height > 0
            }
            None => false,
        }
    }

    /// Map patch coordinates to a terminal cell.
    ///
    /// Negative coordinates end up at the origin of the parent area,
    /// coordinates beyond the parent area are clamped to its last cell.
    pub fn patch_to_cell(&self, x: i64, y: i64) -> Position {
        let parent = self.parent.unwrap_or_default();
        let cw = self.config.cell_width.max(1) as i64;
        let ch = self.config.cell_height.max(1) as i64;

        let col = (x.max(0) / cw).min(parent.width.saturating_sub(1) as i64) as u16;
        let row = (y.max(0) / ch).min(parent.height.saturating_sub(1) as i64) as u16;

        Position::new(parent.x + col, parent.y + row)
    }

    /// Register a widget.
    pub fn attach(&mut self, kind: WidgetKind, area: Rect) -> Result<WidgetId, WidgetError> {
        if !self.is_valid() {
            return Err(WidgetError::InvalidGui);
        }
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        self.widgets.push(AttachedWidget { id, kind, area });
        Ok(id)
    }

    /// Remove a widget from the registry.
    pub fn detach(&mut self, id: WidgetId) -> bool {
        let len = self.widgets.len();
        self.widgets.retain(|v| v.id != id);
        self.widgets.len() != len
    }

    /// Update the area of a registered widget.
    pub fn relayout(&mut self, id: WidgetId, area: Rect) -> bool {
        if let Some(w) = self.widgets.iter_mut().find(|v| v.id == id) {
            w.area = area;
            true
        } else {
            false
        }
    }

    pub fn widget(&self, id: WidgetId) -> Option<&AttachedWidget> {
        self.widgets.iter().find(|v| v.id == id)
    }

    pub fn widgets(&self) -> &[AttachedWidget] {
        &self.widgets
    }

    /// Topmost widget at the given cell.
    pub fn widget_at(&self, pos: Position) -> Option<&AttachedWidget> {
        self.widgets.iter().rev().find(|v| v.area.contains(pos))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        let mut gui = Gui::new();
        assert!(!gui.is_valid());
        gui.set_parent_area(Rect::new(0, 0, 0, 10));
        assert!(!gui.is_valid());
        gui.set_parent_area(Rect::new(0, 0, 80, 24));
        assert!(gui.is_valid());

        let mut gui = Gui::with_config(GuiConfig {
            cell_width: 0,
            ..Default::default()
        });
        gui.set_parent_area(Rect::new(0, 0, 80, 24));
        assert!(!gui.is_valid());
    }

    #[test]
    fn test_patch_to_cell() {
        let mut gui = Gui::new();
        gui.set_parent_area(Rect::new(2, 1, 80, 24));
        assert_eq!(gui.patch_to_cell(0, 0), Position::new(2, 1));
        assert_eq!(gui.patch_to_cell(70, 28), Position::new(12, 3));
        assert_eq!(gui.patch_to_cell(-20, -5), Position::new(2, 1));
        assert_eq!(gui.patch_to_cell(10_000, 10_000), Position::new(81, 24));
    }

    #[test]
    fn test_attach_detach() {
        let mut gui = Gui::new();
        assert!(matches!(
            gui.attach(WidgetKind::Numberbox, Rect::new(0, 0, 5, 1)),
            Err(WidgetError::InvalidGui)
        ));
        assert!(gui.is_empty());

        gui.set_parent_area(Rect::new(0, 0, 80, 24));
        let a = gui
            .attach(WidgetKind::Numberbox, Rect::new(0, 0, 5, 1))
            .expect("attach");
        let b = gui
            .attach(WidgetKind::Numberbox, Rect::new(2, 0, 5, 1))
            .expect("attach");
        assert_ne!(a, b);
        assert_eq!(gui.len(), 2);
        assert_eq!(gui.widget_at(Position::new(3, 0)).map(|v| v.id), Some(b));
        assert_eq!(gui.widget_at(Position::new(0, 0)).map(|v| v.id), Some(a));

        assert!(gui.relayout(a, Rect::new(10, 10, 5, 1)));
        assert_eq!(gui.widget(a).map(|v| v.area), Some(Rect::new(10, 10, 5, 1)));

        assert!(gui.detach(a));
        assert!(!gui.detach(a));
        assert!(!gui.relayout(a, Rect::default()));
        assert_eq!(gui.len(), 1);
        assert!(gui.widget(a).is_none());
    }
}
