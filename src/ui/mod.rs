//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: Projecting the model into a frame
//! - [`toolbar`]: Formatting buttons and their hit areas
//! - [`style`]: Theming and colors

pub mod style;

mod overlays;
mod render;
mod status;
mod toolbar;

pub use render::{
    EditorGeometry, ScreenAreas, editor_geometry, line_number_width, pane_body, render,
    screen_areas,
};
pub use status::status_text;
pub use toolbar::{ToolbarAction, toolbar_action_at, toolbar_buttons};

pub const PREVIEW_LEFT_PADDING: u16 = 1;
