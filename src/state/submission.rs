//! Survey submission state machine
//!
//! Idle -> Validating -> (rejected | Submitting) -> (succeeded | failed) -> Idle.
//! Content screening runs before the completeness check, and neither
//! rejection reaches the network.

use super::forms::{ContentFilter, SurveyForm};
use crate::api::{ApiError, ApiResponse, SurveySubmission};
use chrono::NaiveDate;
use tracing::{info, warn};

const UNSAFE_MESSAGE: &str =
    "Your answers contain characters or phrases that are not allowed. Please remove them and try again.";
const SUCCESS_MESSAGE: &str = "Survey submitted successfully!";
const REJECTED_FALLBACK: &str = "Submission failed";
const TRANSPORT_MESSAGE: &str = "An error occurred while submitting the survey.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Result of one submit trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    RejectedUnsafe,
    RejectedIncomplete { missing: Vec<String> },
    Succeeded { message: String },
    Failed { message: String },
    /// A submission was already in flight; the trigger was dropped
    Ignored,
}

impl SubmitOutcome {
    /// Message shown to the user
    pub fn message(&self) -> String {
        match self {
            Self::RejectedUnsafe => UNSAFE_MESSAGE.to_string(),
            Self::RejectedIncomplete { missing } => {
                format!("Please fill in all fields: {}", missing.join(", "))
            }
            Self::Succeeded { message } | Self::Failed { message } => message.clone(),
            Self::Ignored => "Submission already in progress".to_string(),
        }
    }

    /// Outcomes that go to the error dialog rather than the status bar
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::RejectedUnsafe | Self::RejectedIncomplete { .. } | Self::Failed { .. }
        )
    }
}

/// Drives a survey form through the submission states
#[derive(Debug, Default)]
pub struct SurveySubmitter {
    phase: SubmissionPhase,
}

impl SurveySubmitter {
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase() == SubmissionPhase::Submitting
    }

    /// Validate the form and enter Submitting.
    ///
    /// `Ok` carries the record to send; `Err` carries the final outcome when
    /// nothing should be sent. The form is never modified here.
    pub fn begin(
        &mut self,
        form: &SurveyForm,
        filter: &ContentFilter,
        today: NaiveDate,
    ) -> Result<SurveySubmission, SubmitOutcome> {
        if self.phase != SubmissionPhase::Idle {
            warn!("Submit triggered while {:?}; ignoring", self.phase);
            return Err(SubmitOutcome::Ignored);
        }
        self.phase = SubmissionPhase::Validating;

        if let Some(pattern) = filter.find_violation(form.free_text()) {
            warn!("Survey rejected: input matched forbidden pattern {:?}", pattern);
            self.phase = SubmissionPhase::Idle;
            return Err(SubmitOutcome::RejectedUnsafe);
        }

        let missing = form.missing_fields(today);
        let submission = match form.to_submission() {
            Some(submission) if missing.is_empty() => submission,
            _ => {
                info!("Survey rejected: {} requirement(s) unmet", missing.len());
                self.phase = SubmissionPhase::Idle;
                return Err(SubmitOutcome::RejectedIncomplete { missing });
            }
        };

        self.phase = SubmissionPhase::Submitting;
        Ok(submission)
    }

    /// Apply the API result: reset the form on success, keep it otherwise
    pub fn finish(
        &mut self,
        form: &mut SurveyForm,
        result: Result<ApiResponse, ApiError>,
    ) -> SubmitOutcome {
        self.phase = SubmissionPhase::Idle;

        match result.and_then(|response| response.into_result(REJECTED_FALLBACK)) {
            Ok(message) => {
                info!("Survey submitted for {}", form.user);
                form.reset();
                SubmitOutcome::Succeeded {
                    message: message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| SUCCESS_MESSAGE.to_string()),
                }
            }
            Err(ApiError::Rejected(message)) => {
                warn!("Survey rejected by server: {}", message);
                SubmitOutcome::Failed { message }
            }
            Err(e) => {
                warn!("Survey submission error: {}", e);
                SubmitOutcome::Failed {
                    message: TRANSPORT_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Run the whole flow inline against `client`
    #[cfg(test)]
    pub async fn submit<C: crate::api::ApiClientTrait + ?Sized>(
        &mut self,
        form: &mut SurveyForm,
        filter: &ContentFilter,
        today: NaiveDate,
        client: &C,
    ) -> SubmitOutcome {
        let submission = match self.begin(form, filter, today) {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };
        let result = client.submit_survey(&submission).await;
        self.finish(form, result)
    }
}
