//! Editor/preview split.
//!
//! The editor takes `editor_width` percent of the pane area, the preview the
//! rest, separated by a one-column splitter that can be dragged with the
//! mouse. The width is always kept within [`MIN_EDITOR_WIDTH`] and
//! [`MAX_EDITOR_WIDTH`].

use ratatui::layout::Rect;

pub const MIN_EDITOR_WIDTH: u16 = 20;
pub const MAX_EDITOR_WIDTH: u16 = 80;
pub const DEFAULT_EDITOR_WIDTH: u16 = 50;

/// Clamp a width percentage into the allowed range.
///
/// Values are rounded to the nearest integer after clamping. NaN counts as
/// the minimum.
pub fn clamp_width(percent: f64) -> u16 {
    if percent.is_nan() {
        return MIN_EDITOR_WIDTH;
    }
    let clamped = percent.clamp(f64::from(MIN_EDITOR_WIDTH), f64::from(MAX_EDITOR_WIDTH));
    // Within 20.0..=80.0, so the cast is lossless after rounding.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = clamped.round() as u16;
    rounded
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Rectangles for one frame of the split view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneRects {
    pub editor: Rect,
    pub splitter: Option<Rect>,
    pub preview: Option<Rect>,
}

/// Width ratio, preview visibility and drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutState {
    editor_width: u16,
    preview_visible: bool,
    drag: DragState,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            editor_width: DEFAULT_EDITOR_WIDTH,
            preview_visible: true,
            drag: DragState::Idle,
        }
    }
}

impl LayoutState {
    /// Start from an explicit width (clamped) and visibility.
    pub fn new(editor_width: u16, preview_visible: bool) -> Self {
        Self {
            editor_width: clamp_width(f64::from(editor_width)),
            preview_visible,
            drag: DragState::Idle,
        }
    }

    /// Editor share of the pane area, in percent.
    pub const fn editor_width(&self) -> u16 {
        self.editor_width
    }

    pub const fn preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub const fn drag(&self) -> DragState {
        self.drag
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging)
    }

    /// Pointer pressed on the splitter.
    pub const fn begin_drag(&mut self) {
        self.drag = DragState::Dragging;
    }

    /// Pointer released anywhere.
    pub const fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Follow the pointer while dragging.
    ///
    /// Returns `true` when the width changed. Outside a drag, and for a
    /// zero-width container, nothing happens.
    pub fn drag_to(&mut self, pointer_x: u16, container_x: u16, container_width: u16) -> bool {
        if !self.is_dragging() || container_width == 0 {
            return false;
        }
        let offset = f64::from(pointer_x) - f64::from(container_x);
        let fraction = offset / f64::from(container_width);
        let width = clamp_width(fraction * 100.0);
        let changed = width != self.editor_width;
        self.editor_width = width;
        changed
    }

    pub const fn toggle_preview(&mut self) {
        self.preview_visible = !self.preview_visible;
        if !self.preview_visible {
            self.drag = DragState::Idle;
        }
    }

    /// Split `area` into editor, splitter and preview.
    ///
    /// With the preview hidden the editor fills the area and there is no
    /// splitter. Areas too narrow for three columns also collapse to the
    /// editor alone.
    pub fn split(&self, area: Rect) -> PaneRects {
        if !self.preview_visible || area.width < 3 {
            return PaneRects {
                editor: area,
                splitter: None,
                preview: None,
            };
        }
        let usable = area.width - 1;
        let editor_cols = (u32::from(usable) * u32::from(self.editor_width) / 100)
            .clamp(1, u32::from(usable) - 1);
        // Bounded by `usable`, which is a u16.
        #[allow(clippy::cast_possible_truncation)]
        let editor_cols = editor_cols as u16;
        let editor = Rect {
            width: editor_cols,
            ..area
        };
        let splitter = Rect {
            x: area.x + editor_cols,
            width: 1,
            ..area
        };
        let preview = Rect {
            x: splitter.x + 1,
            width: usable - editor_cols,
            ..area
        };
        PaneRects {
            editor,
            splitter: Some(splitter),
            preview: Some(preview),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_even_split_with_preview() {
        let layout = LayoutState::default();
        assert_eq!(layout.editor_width(), 50);
        assert!(layout.preview_visible());
        assert_eq!(layout.drag(), DragState::Idle);
    }

    #[test]
    fn test_clamp_width_bounds() {
        assert_eq!(clamp_width(10.0), 20);
        assert_eq!(clamp_width(95.0), 80);
        assert_eq!(clamp_width(42.4), 42);
        assert_eq!(clamp_width(42.6), 43);
        assert_eq!(clamp_width(f64::NAN), 20);
        assert_eq!(clamp_width(f64::NEG_INFINITY), 20);
        assert_eq!(clamp_width(f64::INFINITY), 80);
    }

    #[test]
    fn test_new_clamps_configured_width() {
        assert_eq!(LayoutState::new(5, true).editor_width(), 20);
        assert_eq!(LayoutState::new(99, true).editor_width(), 80);
    }

    #[test]
    fn test_drag_only_applies_while_dragging() {
        let mut layout = LayoutState::default();
        assert!(!layout.drag_to(30, 0, 100));
        assert_eq!(layout.editor_width(), 50);

        layout.begin_drag();
        assert!(layout.drag_to(30, 0, 100));
        assert_eq!(layout.editor_width(), 30);

        layout.end_drag();
        assert!(!layout.drag_to(70, 0, 100));
        assert_eq!(layout.editor_width(), 30);
    }

    #[test]
    fn test_drag_respects_container_offset_and_limits() {
        let mut layout = LayoutState::default();
        layout.begin_drag();
        layout.drag_to(15, 10, 100);
        assert_eq!(layout.editor_width(), 20);
        layout.drag_to(200, 10, 100);
        assert_eq!(layout.editor_width(), 80);
        layout.drag_to(0, 10, 100);
        assert_eq!(layout.editor_width(), 20);
    }

    #[test]
    fn test_drag_with_zero_width_container_is_ignored() {
        let mut layout = LayoutState::default();
        layout.begin_drag();
        assert!(!layout.drag_to(10, 0, 0));
        assert_eq!(layout.editor_width(), 50);
    }

    #[test]
    fn test_toggle_preview_hides_and_cancels_drag() {
        let mut layout = LayoutState::default();
        layout.begin_drag();
        layout.toggle_preview();
        assert!(!layout.preview_visible());
        assert!(!layout.is_dragging());
        layout.toggle_preview();
        assert!(layout.preview_visible());
    }

    #[test]
    fn test_split_covers_area_without_overlap() {
        let layout = LayoutState::new(30, true);
        let area = Rect::new(0, 1, 101, 20);
        let rects = layout.split(area);
        let splitter = rects.splitter.unwrap();
        let preview = rects.preview.unwrap();
        assert_eq!(rects.editor.width, 30);
        assert_eq!(splitter.x, 30);
        assert_eq!(preview.x, 31);
        assert_eq!(rects.editor.width + splitter.width + preview.width, area.width);
        assert_eq!(preview.y, 1);
        assert_eq!(preview.height, 20);
    }

    #[test]
    fn test_split_without_preview_gives_editor_everything() {
        let mut layout = LayoutState::default();
        layout.toggle_preview();
        let area = Rect::new(0, 0, 80, 24);
        let rects = layout.split(area);
        assert_eq!(rects.editor, area);
        assert_eq!(rects.splitter, None);
        assert_eq!(rects.preview, None);
    }

    #[test]
    fn test_split_tiny_area_collapses() {
        let rects = LayoutState::default().split(Rect::new(0, 0, 2, 5));
        assert_eq!(rects.preview, None);
    }

    proptest! {
        #[test]
        fn prop_clamp_law(fraction in -2.0f64..3.0) {
            let width = clamp_width(fraction * 100.0);
            let expected = (fraction * 100.0).clamp(20.0, 80.0).round();
            prop_assert!((20..=80).contains(&width));
            prop_assert!((f64::from(width) - expected).abs() < f64::EPSILON);
        }

        #[test]
        fn prop_split_partitions_width(width in 3u16..400, percent in 0u16..120) {
            let layout = LayoutState::new(percent, true);
            let rects = layout.split(Rect::new(0, 0, width, 10));
            let splitter = rects.splitter.unwrap();
            let preview = rects.preview.unwrap();
            prop_assert!(rects.editor.width >= 1);
            prop_assert!(preview.width >= 1);
            prop_assert_eq!(rects.editor.width + splitter.width + preview.width, width);
        }
    }
}
