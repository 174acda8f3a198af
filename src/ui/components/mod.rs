//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button_row, BUTTON_HEIGHT};
pub use dialog::{centered_rect, render_error_dialog};
