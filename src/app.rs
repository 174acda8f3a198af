//! Application state and core logic

use crate::api::{ApiClient, ApiClientTrait, ApiError, ApiResponse};
use crate::config::TuiConfig;
use crate::platform::{is_submit_key, is_text_input};
use crate::state::{
    AppState, ContentFilter, FormState, LoginForm, RegisterForm, SubmitOutcome, SurveyFocus,
    SurveyForm, View,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{info, warn};

type SubmissionResult = Result<ApiResponse, ApiError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Survey API client
    pub api: Arc<dyn ApiClientTrait>,
    /// Denylist applied to survey answers
    pub filter: ContentFilter,
    /// Whether the app should quit
    quit: bool,
    /// Result channel of the survey request in flight
    pending_submission: Option<oneshot::Receiver<SubmissionResult>>,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let api = ApiClient::new(config.api_address(), config.request_timeout())?;
        let filter = config.content_filter();
        info!(
            "Using survey API at {} with {} forbidden patterns",
            api.base_url(),
            filter.patterns().len()
        );
        Ok(Self::with_client(Arc::new(api), filter))
    }

    /// Create an App around an existing client, starting at the login view
    pub fn with_client(api: Arc<dyn ApiClientTrait>, filter: ContentFilter) -> Self {
        let state = AppState {
            form: FormState::Login(LoginForm::new()),
            ..Default::default()
        };
        Self {
            state,
            api,
            filter,
            quit: false,
            pending_submission: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// True while a survey request is outstanding
    pub fn is_submitting(&self) -> bool {
        self.state.submitter.is_in_flight()
    }

    /// Date used for the birth date check
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Login => self.handle_login_key(key).await?,
            View::Register => self.handle_register_key(key).await?,
            View::Survey => self.handle_survey_key(key),
        }

        Ok(())
    }

    /// Navigate to a new view, remembering the current one
    pub fn navigate(&mut self, view: View, form: FormState) {
        let previous_form = std::mem::replace(&mut self.state.form, form);
        self.state
            .view_history
            .push((self.state.current_view, previous_form));
        self.state.current_view = view;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        if let Some((view, form)) = self.state.view_history.pop() {
            self.state.current_view = view;
            self.state.form = form;
        }
    }

    /// Switch view and forget history (login, logout, finished registration)
    fn reset_to(&mut self, view: View, form: FormState) {
        self.state.view_history.clear();
        self.state.current_view = view;
        self.state.form = form;
    }

    /// Handle keys in Login view
    async fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        let FormState::Login(form) = &mut self.state.form else {
            return Ok(());
        };
        let on_buttons = form.is_buttons_row_active();

        match key.code {
            _ if is_submit_key(&key) => self.login().await,
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            KeyCode::Left | KeyCode::Right if on_buttons => form.toggle_button(),
            // Button order: 0=Login, 1=Register
            KeyCode::Enter if on_buttons => match form.selected_button {
                0 => self.login().await,
                _ => self.navigate(View::Register, FormState::Register(RegisterForm::new())),
            },
            KeyCode::Enter if form.active_field_index == 1 => self.login().await,
            KeyCode::Enter => self.state.form.next_field(),
            KeyCode::Char(c) if !on_buttons && is_text_input(&key) => {
                self.state.form.input_char(c)
            }
            KeyCode::Backspace if !on_buttons => self.state.form.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Check the login form and call the API
    async fn login(&mut self) {
        let FormState::Login(form) = &self.state.form else {
            return;
        };
        let request = match form.to_request() {
            Ok(request) => request,
            Err(message) => {
                self.push_error(message);
                return;
            }
        };

        let result = self
            .api
            .login(&request)
            .await
            .and_then(|response| response.into_result("Unknown error"));
        match result {
            Ok(_) => {
                info!("Logged in as {}", request.identifier);
                self.state.logged_in_user = Some(request.identifier.clone());
                self.reset_to(
                    View::Survey,
                    FormState::Survey(SurveyForm::new(request.identifier)),
                );
                self.state.status_message = Some("Login successful!".to_string());
            }
            Err(ApiError::Rejected(message)) => {
                self.push_error(format!("Login failed: {message}"));
            }
            Err(e) => {
                warn!("Login request failed: {}", e);
                self.push_error("An error occurred. Please try again.");
            }
        }
    }

    /// Handle keys in Register view
    async fn handle_register_key(&mut self, key: KeyEvent) -> Result<()> {
        let FormState::Register(form) = &mut self.state.form else {
            return Ok(());
        };
        let on_buttons = form.is_buttons_row_active();
        let on_method = form.is_method_row_active();

        match key.code {
            _ if is_submit_key(&key) => self.register().await,
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            KeyCode::Left | KeyCode::Right if on_method => form.method.toggle(),
            KeyCode::Left | KeyCode::Right if on_buttons => form.toggle_button(),
            // Button order: 0=Register, 1=Back
            KeyCode::Enter if on_buttons => match form.selected_button {
                0 => self.register().await,
                _ => self.go_back(),
            },
            KeyCode::Enter => self.state.form.next_field(),
            KeyCode::Esc => self.go_back(),
            KeyCode::Char(c) if !on_buttons && is_text_input(&key) => {
                self.state.form.input_char(c)
            }
            KeyCode::Backspace if !on_buttons => self.state.form.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Check the register form and call the API
    async fn register(&mut self) {
        let FormState::Register(form) = &self.state.form else {
            return;
        };
        let request = match form.to_request() {
            Ok(request) => request,
            Err(message) => {
                self.push_error(message);
                return;
            }
        };

        let result = self
            .api
            .register(&request)
            .await
            .and_then(|response| response.into_result("Unknown error"));
        match result {
            Ok(_) => {
                let identifier = request.email.or(request.phone).unwrap_or_default();
                info!("Registered {}", identifier);
                self.reset_to(
                    View::Login,
                    FormState::Login(LoginForm::with_identifier(identifier)),
                );
                self.state.status_message =
                    Some("Registration successful! Please log in.".to_string());
            }
            Err(ApiError::Rejected(message)) => {
                self.push_error(format!("Registration failed: {message}"));
            }
            Err(e) => {
                warn!("Register request failed: {}", e);
                self.push_error("An error occurred. Please try again.");
            }
        }
    }

    /// Handle keys in Survey view
    fn handle_survey_key(&mut self, key: KeyEvent) {
        if is_submit_key(&key) {
            self.submit_survey();
            return;
        }

        let in_flight = self.is_submitting();
        let multiline = self.state.form.is_active_field_multiline();
        let FormState::Survey(form) = &mut self.state.form else {
            return;
        };

        match key.code {
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            KeyCode::Left if form.is_buttons_row_active() => form.prev_button(),
            KeyCode::Right if form.is_buttons_row_active() => form.next_button(),
            // Button order: 0=Send, 1=Log out
            KeyCode::Enter if form.is_buttons_row_active() => match form.selected_button {
                0 => self.submit_survey(),
                _ => self.logout(),
            },
            KeyCode::Esc => self.logout(),
            // The form is frozen while its submission is outstanding
            _ if in_flight => {
                self.state.status_message = Some("Submitting survey...".to_string());
            }
            KeyCode::Enter if multiline => self.state.form.input_char('\n'),
            KeyCode::Enter => match form.focus {
                SurveyFocus::Model(model) => {
                    form.toggle_model(model);
                }
                _ => self.state.form.next_field(),
            },
            KeyCode::Char(c) if is_text_input(&key) => self.state.form.input_char(c),
            KeyCode::Backspace => self.state.form.backspace(),
            _ => {}
        }
    }

    /// Leave the survey and return to login
    fn logout(&mut self) {
        if self.is_submitting() {
            self.state.status_message =
                Some("Wait for the submission to finish before leaving".to_string());
            return;
        }
        let identifier = self.state.logged_in_user.take().unwrap_or_default();
        self.reset_to(
            View::Login,
            FormState::Login(LoginForm::with_identifier(identifier)),
        );
    }

    /// Validate the survey and start its request in the background
    pub fn submit_survey(&mut self) {
        let FormState::Survey(form) = &self.state.form else {
            return;
        };
        let submission = match self.state.submitter.begin(form, &self.filter, Self::today()) {
            Ok(submission) => submission,
            Err(outcome) => {
                self.report_outcome(outcome);
                return;
            }
        };

        info!("Submitting survey for {}", submission.user);
        self.state.status_message = Some("Submitting survey...".to_string());

        let (tx, rx) = oneshot::channel();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let result = api.submit_survey(&submission).await;
            // Receiver is gone only if the app quit
            let _ = tx.send(result);
        });
        self.pending_submission = Some(rx);
    }

    /// Collect the result of a finished survey request, if any
    pub fn poll_submission(&mut self) {
        let Some(rx) = self.pending_submission.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(ApiError::Cancelled),
        };
        self.pending_submission = None;

        let outcome = match &mut self.state.form {
            FormState::Survey(form) => self.state.submitter.finish(form, result),
            _ => {
                // Should not happen: leaving the survey is blocked while submitting
                let mut detached = SurveyForm::new(String::new());
                self.state.submitter.finish(&mut detached, result)
            }
        };
        self.report_outcome(outcome);
    }

    fn report_outcome(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Ignored => {
                self.state.status_message = Some(outcome.message());
            }
            _ if outcome.is_error() => {
                self.state.status_message = None;
                self.push_error(outcome.message());
            }
            _ => self.state.status_message = Some(outcome.message()),
        }
    }
}
