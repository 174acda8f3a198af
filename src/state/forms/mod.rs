//! Form domain layer
//!
//! Type-safe form handling for the login, register and survey views.

mod content_filter;
mod field;
mod form_state;
mod survey_form;

pub use content_filter::ContentFilter;
pub use field::FormField;
pub use form_state::{ContactMethod, FormState, LoginForm, RegisterForm};
pub use survey_form::{AiModel, SurveyFocus, SurveyForm};
