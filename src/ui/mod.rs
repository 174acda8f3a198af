//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::FormState;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match &app.state.form {
        FormState::Login(form) => forms::draw_login(frame, main_area, form),
        FormState::Register(form) => forms::draw_register(frame, main_area, form),
        FormState::Survey(form) => forms::draw_survey(
            frame,
            main_area,
            form,
            form.is_ready(App::today()),
            form.is_safe(&app.filter),
            app.is_submitting(),
        ),
        FormState::None => {}
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog overlays everything
    if let Some(error) = app.state.current_error() {
        let queued = app.state.error_queue.len().saturating_sub(1);
        render_error_dialog(frame, error, queued);
    }
}
