//! Form state management and form structs

use super::field::FormField;
use super::survey_form::SurveyForm;
use crate::api::{LoginRequest, RegisterRequest};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    /// The focused text field, or None when focus is on a non-text row
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Enum representing the form of the current view
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Login(LoginForm),
    Register(RegisterForm),
    Survey(SurveyForm),
}

impl FormState {
    pub fn next_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.next_field(),
            FormState::Register(f) => f.next_field(),
            FormState::Survey(f) => f.next_field(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.prev_field(),
            FormState::Register(f) => f.prev_field(),
            FormState::Survey(f) => f.prev_field(),
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self {
            FormState::None => None,
            FormState::Login(f) => f.get_active_field_mut(),
            FormState::Register(f) => f.get_active_field_mut(),
            FormState::Survey(f) => f.get_active_field_mut(),
        }
    }

    /// Route a typed character to the focused input
    pub fn input_char(&mut self, c: char) {
        match self {
            FormState::None => {}
            FormState::Survey(f) => f.input_char(c),
            FormState::Register(f) => f.input_char(c),
            FormState::Login(f) => {
                if let Some(field) = f.get_active_field_mut() {
                    field.push_char(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self {
            FormState::None => {}
            FormState::Survey(f) => f.backspace(),
            _ => {
                if let Some(field) = self.get_active_field_mut() {
                    field.pop_char();
                }
            }
        }
    }

    pub fn is_active_field_multiline(&self) -> bool {
        match self {
            FormState::None => false,
            FormState::Login(f) => f
                .get_field(f.active_field())
                .is_some_and(|f| f.is_multiline),
            FormState::Register(f) => f
                .get_field(f.active_field())
                .is_some_and(|f| f.is_multiline),
            FormState::Survey(f) => f
                .get_field(f.active_field())
                .is_some_and(|f| f.is_multiline),
        }
    }

    /// True when focus is on the buttons row
    pub fn is_buttons_row_active(&self) -> bool {
        match self {
            FormState::None => false,
            FormState::Login(f) => f.is_buttons_row_active(),
            FormState::Register(f) => f.is_buttons_row_active(),
            FormState::Survey(f) => f.is_buttons_row_active(),
        }
    }
}

// Login Form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub identifier: FormField,
    pub password: FormField,
    pub active_field_index: usize,
    /// Which button is selected on the buttons row (0=Login, 1=Register)
    pub selected_button: usize,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            identifier: FormField::text("identifier", "Email or Phone", false),
            password: FormField::secret("password", "Password"),
            active_field_index: 0,
            selected_button: 0,
        }
    }

    /// Login form with the identifier filled in (after registering)
    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        let mut form = Self::new();
        form.identifier.set_text(identifier);
        form.active_field_index = 1;
        form
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == 2
    }

    pub fn toggle_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % 2;
    }

    /// Build the login request, or the message explaining what is missing
    pub fn to_request(&self) -> Result<LoginRequest, &'static str> {
        if self.identifier.is_blank() || self.password.as_text().is_empty() {
            return Err("Email/Phone and Password are required");
        }
        Ok(LoginRequest {
            identifier: self.identifier.trimmed().to_string(),
            password: self.password.as_text().to_string(),
        })
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    fn field_count(&self) -> usize {
        3 // identifier, password, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.identifier),
            1 => Some(&mut self.password),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.identifier),
            1 => Some(&self.password),
            _ => None,
        }
    }
}

/// How a new account is identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
}

impl ContactMethod {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Email => Self::Phone,
            Self::Phone => Self::Email,
        };
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

// Register Form
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub method: ContactMethod,
    pub email: FormField,
    pub phone: FormField,
    pub password: FormField,
    pub confirm: FormField,
    /// 0=method, 1=email/phone, 2=password, 3=confirm, 4=buttons
    pub active_field_index: usize,
    /// Which button is selected on the buttons row (0=Register, 1=Back)
    pub selected_button: usize,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            method: ContactMethod::default(),
            email: FormField::text("email", "Email", false),
            phone: FormField::text("phone", "Phone", false),
            password: FormField::secret("password", "Password"),
            confirm: FormField::secret("confirm", "Confirm Password"),
            active_field_index: 0,
            selected_button: 0,
        }
    }

    pub fn is_method_row_active(&self) -> bool {
        self.active_field_index == 0
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == 4
    }

    pub fn toggle_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % 2;
    }

    /// The contact field for the current method
    pub fn contact(&self) -> &FormField {
        match self.method {
            ContactMethod::Email => &self.email,
            ContactMethod::Phone => &self.phone,
        }
    }

    fn contact_mut(&mut self) -> &mut FormField {
        match self.method {
            ContactMethod::Email => &mut self.email,
            ContactMethod::Phone => &mut self.phone,
        }
    }

    /// Space on the method row switches email/phone
    pub fn input_char(&mut self, c: char) {
        if self.is_method_row_active() {
            if c == ' ' {
                self.method.toggle();
            }
        } else if let Some(field) = self.get_active_field_mut() {
            field.push_char(c);
        }
    }

    /// Build the register request, or the message explaining what is wrong
    pub fn to_request(&self) -> Result<RegisterRequest, &'static str> {
        if self.password.as_text() != self.confirm.as_text() {
            return Err("Passwords do not match");
        }
        if self.password.as_text().is_empty() {
            return Err("Password is required.");
        }
        let contact = self.contact();
        if contact.is_blank() {
            return Err(match self.method {
                ContactMethod::Email => "Email is required.",
                ContactMethod::Phone => "Phone is required.",
            });
        }
        let value = Some(contact.trimmed().to_string());
        let (email, phone) = match self.method {
            ContactMethod::Email => (value, None),
            ContactMethod::Phone => (None, value),
        };
        Ok(RegisterRequest {
            email,
            phone,
            password: self.password.as_text().to_string(),
        })
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RegisterForm {
    fn field_count(&self) -> usize {
        5
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(4);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            1 => Some(self.contact_mut()),
            2 => Some(&mut self.password),
            3 => Some(&mut self.confirm),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            1 => Some(self.contact()),
            2 => Some(&self.password),
            3 => Some(&self.confirm),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(state: &mut FormState, text: &str) {
        for c in text.chars() {
            state.input_char(c);
        }
    }

    mod form_state_enum {
        use super::*;

        #[test]
        fn test_default_is_none() {
            let state = FormState::default();
            assert!(matches!(state, FormState::None));
        }

        #[test]
        fn test_next_field_on_none_is_noop() {
            let mut state = FormState::None;
            state.next_field(); // Should not panic
            state.prev_field();
            state.input_char('x');
            state.backspace();
        }

        #[test]
        fn test_get_active_field_mut_none_returns_none() {
            let mut state = FormState::None;
            assert!(state.get_active_field_mut().is_none());
        }

        #[test]
        fn test_input_routes_to_login_field() {
            let mut state = FormState::Login(LoginForm::new());
            type_text(&mut state, "jane@example.com");
            state.backspace();
            if let FormState::Login(ref f) = state {
                assert_eq!(f.identifier.as_text(), "jane@example.co");
            } else {
                panic!("expected login form");
            }
        }

        #[test]
        fn test_input_routes_to_survey_field() {
            let mut state = FormState::Survey(SurveyForm::new("u"));
            state.next_field(); // birth date
            type_text(&mut state, "2000-01-01");
            if let FormState::Survey(ref f) = state {
                assert_eq!(f.birth_date.as_text(), "2000-01-01");
            } else {
                panic!("expected survey form");
            }
        }

        #[test]
        fn test_use_case_is_multiline() {
            let mut form = SurveyForm::new("u");
            form.focus = crate::state::SurveyFocus::UseCase;
            let state = FormState::Survey(form);
            assert!(state.is_active_field_multiline());
        }

        #[test]
        fn test_buttons_row_detection() {
            let mut state = FormState::Login(LoginForm::new());
            assert!(!state.is_buttons_row_active());
            state.prev_field();
            assert!(state.is_buttons_row_active());
        }
    }

    mod login_form {
        use super::*;

        #[test]
        fn test_new_has_correct_defaults() {
            let form = LoginForm::new();
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.selected_button, 0);
            assert!(form.password.is_secret);
        }

        #[test]
        fn test_with_identifier_focuses_password() {
            let form = LoginForm::with_identifier("5551234");
            assert_eq!(form.identifier.as_text(), "5551234");
            assert_eq!(form.active_field_index, 1);
        }

        #[test]
        fn test_blank_fields_are_rejected() {
            let mut form = LoginForm::new();
            form.identifier.set_text("  ");
            form.password.set_text("secret");
            assert_eq!(
                form.to_request().unwrap_err(),
                "Email/Phone and Password are required"
            );
        }

        #[test]
        fn test_whitespace_password_is_sent_verbatim() {
            let mut form = LoginForm::new();
            form.identifier.set_text("jane@example.com");
            form.password.set_text("   ");
            let request = form.to_request().unwrap();
            assert_eq!(request.password, "   ");

            form.password.clear();
            assert!(form.to_request().is_err());
        }

        #[test]
        fn test_request_trims_identifier_only() {
            let mut form = LoginForm::new();
            form.identifier.set_text(" jane@example.com ");
            form.password.set_text(" pw ");
            let request = form.to_request().unwrap();
            assert_eq!(request.identifier, "jane@example.com");
            assert_eq!(request.password, " pw ");
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = LoginForm::new();
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 2);
            assert!(form.get_active_field_mut().is_none());
        }

        #[test]
        fn test_toggle_button_wraps() {
            let mut form = LoginForm::new();
            form.toggle_button();
            assert_eq!(form.selected_button, 1);
            form.toggle_button();
            assert_eq!(form.selected_button, 0);
        }
    }

    mod register_form {
        use super::*;

        fn filled(method: ContactMethod) -> RegisterForm {
            let mut form = RegisterForm::new();
            form.method = method;
            form.email.set_text("jane@example.com");
            form.phone.set_text("5551234");
            form.password.set_text("pw");
            form.confirm.set_text("pw");
            form
        }

        #[test]
        fn test_space_on_method_row_toggles() {
            let mut form = RegisterForm::new();
            form.input_char(' ');
            assert_eq!(form.method, ContactMethod::Phone);
            form.input_char('a');
            assert_eq!(form.method, ContactMethod::Phone);
        }

        #[test]
        fn test_contact_field_follows_method() {
            let mut form = RegisterForm::new();
            form.active_field_index = 1;
            form.input_char('5');
            assert_eq!(form.email.as_text(), "5");
            form.method.toggle();
            form.input_char('6');
            assert_eq!(form.phone.as_text(), "6");
            assert_eq!(form.get_field(1).unwrap().name, "phone");
        }

        #[test]
        fn test_password_mismatch() {
            let mut form = filled(ContactMethod::Email);
            form.confirm.set_text("other");
            assert_eq!(form.to_request().unwrap_err(), "Passwords do not match");
        }

        #[test]
        fn test_missing_password() {
            let mut form = filled(ContactMethod::Email);
            form.password.clear();
            form.confirm.clear();
            assert_eq!(form.to_request().unwrap_err(), "Password is required.");
        }

        #[test]
        fn test_missing_contact() {
            let mut form = filled(ContactMethod::Phone);
            form.phone.set_text(" ");
            assert_eq!(form.to_request().unwrap_err(), "Phone is required.");
        }

        #[test]
        fn test_email_request_sends_only_email() {
            let request = filled(ContactMethod::Email).to_request().unwrap();
            assert_eq!(request.email.as_deref(), Some("jane@example.com"));
            assert!(request.phone.is_none());
        }

        #[test]
        fn test_phone_request_sends_only_phone() {
            let request = filled(ContactMethod::Phone).to_request().unwrap();
            assert!(request.email.is_none());
            assert_eq!(request.phone.as_deref(), Some("5551234"));
        }

        #[test]
        fn test_field_count_and_clamp() {
            let mut form = RegisterForm::new();
            assert_eq!(form.field_count(), 5);
            form.set_active_field(9);
            assert!(form.is_buttons_row_active());
        }
    }
}
