//! Application state definitions

use super::forms::FormState;
use super::submission::SurveySubmitter;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Survey,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Survey => "AI Survey",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    /// Previous views with the form each one had when left
    pub view_history: Vec<(View, FormState)>,

    // Form of the current view
    pub form: FormState,
    pub submitter: SurveySubmitter,

    // Session
    pub logged_in_user: Option<String>,

    // UI state
    pub error_queue: VecDeque<String>,
    pub status_message: Option<String>,
}

impl AppState {
    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Error currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_login() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Login);
        assert!(matches!(state.form, FormState::None));
        assert!(state.logged_in_user.is_none());
    }

    #[test]
    fn test_errors_are_shown_in_order() {
        let mut state = AppState::default();
        assert!(!state.has_errors());
        state.push_error("first".to_string());
        state.push_error("second".to_string());

        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_dismiss_on_empty_queue_is_noop() {
        let mut state = AppState::default();
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }

    #[test]
    fn test_view_titles() {
        assert_eq!(View::Login.title(), "Login");
        assert_eq!(View::Register.title(), "Register");
        assert_eq!(View::Survey.title(), "AI Survey");
    }
}
