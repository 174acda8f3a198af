//! Form rendering module
//!
//! - `field_renderer`: text boxes, checkboxes and choices
//! - `login_form`, `register_form`: account screens
//! - `survey_form`: the scrollable survey

mod field_renderer;
mod login_form;
mod register_form;
mod survey_form;

pub use login_form::draw_login;
pub use register_form::draw_register;
pub use survey_form::draw_survey;
