//! Survey form: fields, model selection and the readiness check

use super::content_filter::ContentFilter;
use super::field::FormField;
use super::form_state::Form;
use crate::api::SurveySubmission;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Birth date input format
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// AI models offered in the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AiModel {
    #[serde(rename = "ChatGPT")]
    ChatGpt,
    Bard,
    Claude,
    Copilot,
}

impl AiModel {
    /// All models in display order
    pub const ALL: [AiModel; 4] = [
        AiModel::ChatGpt,
        AiModel::Bard,
        AiModel::Claude,
        AiModel::Copilot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ChatGpt => "ChatGPT",
            Self::Bard => "Bard",
            Self::Claude => "Claude",
            Self::Copilot => "Copilot",
        }
    }
}

/// Selected models plus one reason per selected model.
///
/// Invariant: every key of `reasons` is in `selected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSelection {
    selected: Vec<AiModel>,
    reasons: BTreeMap<AiModel, String>,
}

impl ModelSelection {
    pub fn is_selected(&self, model: AiModel) -> bool {
        self.selected.contains(&model)
    }

    /// Selected models, in the order they were selected
    pub fn selected(&self) -> &[AiModel] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn select(&mut self, model: AiModel) {
        if !self.is_selected(model) {
            self.selected.push(model);
        }
    }

    /// Deselect a model and drop its reason
    pub fn deselect(&mut self, model: AiModel) {
        self.selected.retain(|m| *m != model);
        self.reasons.remove(&model);
    }

    /// Flip selection; returns the new state
    pub fn toggle(&mut self, model: AiModel) -> bool {
        if self.is_selected(model) {
            self.deselect(model);
            false
        } else {
            self.select(model);
            true
        }
    }

    pub fn reason(&self, model: AiModel) -> Option<&str> {
        self.reasons.get(&model).map(String::as_str)
    }

    /// Set the reason for a selected model. Returns false (and stores
    /// nothing) when the model is not selected.
    pub fn set_reason(&mut self, model: AiModel, reason: impl Into<String>) -> bool {
        if !self.is_selected(model) {
            return false;
        }
        self.reasons.insert(model, reason.into());
        true
    }

    /// Mutable access to a selected model's reason, creating it empty
    pub fn reason_mut(&mut self, model: AiModel) -> Option<&mut String> {
        if !self.is_selected(model) {
            return None;
        }
        Some(self.reasons.entry(model).or_default())
    }

    /// Selected models that have no non-blank reason
    pub fn missing_reasons(&self) -> Vec<AiModel> {
        self.selected
            .iter()
            .copied()
            .filter(|m| self.reason(*m).map_or(true, |r| r.trim().is_empty()))
            .collect()
    }

    /// All reason values (selected models only)
    pub fn reasons(&self) -> impl Iterator<Item = (AiModel, &str)> {
        self.reasons.iter().map(|(m, r)| (*m, r.as_str()))
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.reasons.clear();
    }
}

/// Scalar text fields of the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyField {
    Name,
    BirthDate,
    Education,
    City,
    Gender,
    UseCase,
}

/// Focus target within the survey form. The order of focus targets depends on
/// which models are selected, so focus is tracked by target rather than index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurveyFocus {
    #[default]
    Name,
    BirthDate,
    Education,
    City,
    Gender,
    Model(AiModel),
    Reason(AiModel),
    UseCase,
    /// Send / Back buttons row
    Buttons,
}

/// Survey button row: 0 = Send, 1 = Back
pub const SURVEY_BUTTON_COUNT: usize = 2;

#[derive(Debug, Clone)]
pub struct SurveyForm {
    /// Identifier of the logged-in user, kept across resets
    pub user: String,
    pub name: FormField,
    pub birth_date: FormField,
    pub education: FormField,
    pub city: FormField,
    pub gender: FormField,
    pub models: ModelSelection,
    pub use_case: FormField,
    pub focus: SurveyFocus,
    pub selected_button: usize,
}

impl SurveyForm {
    /// Empty survey for `user`; the name field starts out as the identifier
    pub fn new(user: impl Into<String>) -> Self {
        let user = user.into();
        let mut name = FormField::text("name", "Name Surname", false);
        name.set_text(user.clone());
        Self {
            user,
            name,
            birth_date: FormField::text("birth_date", "Birth Date (e.g. 2000-01-01)", false),
            education: FormField::text("education", "Education Level", false),
            city: FormField::text("city", "City", false),
            gender: FormField::text("gender", "Gender", false),
            models: ModelSelection::default(),
            use_case: FormField::text(
                "use_case",
                "Any use case of AI that is beneficial in daily life",
                true,
            ),
            focus: SurveyFocus::default(),
            selected_button: 0,
        }
    }

    /// Restore initial values, keeping the user identifier and re-seeding the name
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.user));
    }

    pub fn field(&self, field: SurveyField) -> &FormField {
        match field {
            SurveyField::Name => &self.name,
            SurveyField::BirthDate => &self.birth_date,
            SurveyField::Education => &self.education,
            SurveyField::City => &self.city,
            SurveyField::Gender => &self.gender,
            SurveyField::UseCase => &self.use_case,
        }
    }

    pub fn field_mut(&mut self, field: SurveyField) -> &mut FormField {
        match field {
            SurveyField::Name => &mut self.name,
            SurveyField::BirthDate => &mut self.birth_date,
            SurveyField::Education => &mut self.education,
            SurveyField::City => &mut self.city,
            SurveyField::Gender => &mut self.gender,
            SurveyField::UseCase => &mut self.use_case,
        }
    }

    /// Scalar fields in form order
    pub fn scalar_fields(&self) -> [&FormField; 6] {
        [
            &self.name,
            &self.birth_date,
            &self.education,
            &self.city,
            &self.gender,
            &self.use_case,
        ]
    }

    /// Every free-text value: scalar fields plus each reason
    pub fn free_text(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = self
            .scalar_fields()
            .into_iter()
            .map(FormField::as_text)
            .collect();
        texts.extend(self.models.reasons().map(|(_, r)| r));
        texts
    }

    /// Toggle a model, moving focus off its reason row if that row disappears
    pub fn toggle_model(&mut self, model: AiModel) -> bool {
        let selected = self.models.toggle(model);
        if !selected && self.focus == SurveyFocus::Reason(model) {
            self.focus = SurveyFocus::Model(model);
        }
        selected
    }

    /// Parsed birth date, if it is a valid calendar date
    pub fn parsed_birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.birth_date.trimmed(), BIRTH_DATE_FORMAT).ok()
    }

    /// Labels of every unmet requirement, empty when the form is ready
    pub fn missing_fields(&self, today: NaiveDate) -> Vec<String> {
        let mut missing: Vec<String> = [
            &self.name,
            &self.birth_date,
            &self.education,
            &self.city,
            &self.gender,
        ]
        .into_iter()
        .filter(|f| f.is_blank())
        .map(|f| f.label.clone())
        .collect();

        if !self.birth_date.is_blank() {
            match self.parsed_birth_date() {
                None => missing.push("Birth Date (use YYYY-MM-DD)".to_string()),
                Some(date) if date > today => {
                    missing.push("Birth Date (cannot be in the future)".to_string())
                }
                Some(_) => {}
            }
        }

        if self.models.is_empty() {
            missing.push("AI Models (select at least one)".to_string());
        }
        for model in self.models.missing_reasons() {
            missing.push(format!("Cons of {}", model.label()));
        }

        if self.use_case.is_blank() {
            missing.push(self.use_case.label.clone());
        }

        missing
    }

    /// Readiness predicate: all fields complete and the birth date valid
    pub fn is_ready(&self, today: NaiveDate) -> bool {
        self.missing_fields(today).is_empty()
    }

    /// Safety predicate over every free-text value
    pub fn is_safe(&self, filter: &ContentFilter) -> bool {
        filter.is_safe(self.free_text())
    }

    /// Build the submission record. Returns None if the birth date does not
    /// parse; callers check readiness first.
    pub fn to_submission(&self) -> Option<SurveySubmission> {
        let birth_date = self.parsed_birth_date()?;
        Some(SurveySubmission {
            user: self.user.clone(),
            name: self.name.trimmed().to_string(),
            birth_date,
            education: self.education.trimmed().to_string(),
            city: self.city.trimmed().to_string(),
            gender: self.gender.trimmed().to_string(),
            models: self.models.selected().to_vec(),
            model_cons: self
                .models
                .reasons()
                .map(|(m, r)| (m, r.trim().to_string()))
                .collect(),
            use_case: self.use_case.trimmed().to_string(),
        })
    }

    /// Focus targets in navigation order for the current selection
    pub fn focus_order(&self) -> Vec<SurveyFocus> {
        let mut order = vec![
            SurveyFocus::Name,
            SurveyFocus::BirthDate,
            SurveyFocus::Education,
            SurveyFocus::City,
            SurveyFocus::Gender,
        ];
        order.extend(AiModel::ALL.iter().map(|m| SurveyFocus::Model(*m)));
        order.extend(self.models.selected().iter().map(|m| SurveyFocus::Reason(*m)));
        order.push(SurveyFocus::UseCase);
        order.push(SurveyFocus::Buttons);
        order
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.focus == SurveyFocus::Buttons
    }

    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % SURVEY_BUTTON_COUNT;
    }

    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = SURVEY_BUTTON_COUNT - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    /// Type a character into the focused text input.
    /// Space on a model checkbox toggles it instead.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            SurveyFocus::Model(model) => {
                if c == ' ' {
                    self.toggle_model(model);
                }
            }
            SurveyFocus::Reason(model) => {
                if let Some(reason) = self.models.reason_mut(model) {
                    reason.push(c);
                }
            }
            _ => {
                if let Some(field) = self.get_active_field_mut() {
                    field.push_char(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            SurveyFocus::Reason(model) => {
                if let Some(reason) = self.models.reason_mut(model) {
                    reason.pop();
                }
            }
            _ => {
                if let Some(field) = self.get_active_field_mut() {
                    field.pop_char();
                }
            }
        }
    }

    fn focused_scalar(&self) -> Option<SurveyField> {
        match self.focus {
            SurveyFocus::Name => Some(SurveyField::Name),
            SurveyFocus::BirthDate => Some(SurveyField::BirthDate),
            SurveyFocus::Education => Some(SurveyField::Education),
            SurveyFocus::City => Some(SurveyField::City),
            SurveyFocus::Gender => Some(SurveyField::Gender),
            SurveyFocus::UseCase => Some(SurveyField::UseCase),
            SurveyFocus::Model(_) | SurveyFocus::Reason(_) | SurveyFocus::Buttons => None,
        }
    }
}

impl Form for SurveyForm {
    fn field_count(&self) -> usize {
        self.focus_order().len()
    }
    fn active_field(&self) -> usize {
        self.focus_order()
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0)
    }
    fn set_active_field(&mut self, index: usize) {
        let order = self.focus_order();
        let index = index.min(order.len() - 1);
        self.focus = order[index];
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        let field = self.focused_scalar()?;
        Some(self.field_mut(field))
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        let field = match self.focus_order().get(index)? {
            SurveyFocus::Name => SurveyField::Name,
            SurveyFocus::BirthDate => SurveyField::BirthDate,
            SurveyFocus::Education => SurveyField::Education,
            SurveyFocus::City => SurveyField::City,
            SurveyFocus::Gender => SurveyField::Gender,
            SurveyFocus::UseCase => SurveyField::UseCase,
            _ => return None,
        };
        Some(self.field(field))
    }
}
