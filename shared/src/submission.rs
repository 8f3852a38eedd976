use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Shown when the server gives no usable error message
pub const GENERIC_ERROR_MESSAGE: &str = "An unknown error occurred!";

/// Shown when a successful response carries no redirect target
pub const UNHANDLED_SUCCESS_MESSAGE: &str =
    "Payment succeeded, but the server response has no \"redirect_to\"; this case is not handled yet.";

/// Body of a successful (HTTP 200) submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSuccessResponse {
    #[serde(default)]
    pub redirect_to: Option<String>,
    /// Anything else the server sent along (order id, mandate token, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of a rejected submission.
///
/// Every key is optional and read on its own: a key that is null or has an
/// unexpected shape decodes as empty without discarding the others.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentErrorResponse {
    #[serde(default, deserialize_with = "lenient_message")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_names")]
    pub missing_parameters: Vec<String>,
    #[serde(default, deserialize_with = "lenient_field_errors")]
    pub field_errors: BTreeMap<String, String>,
}

fn lenient_message<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(message_text(&Value::deserialize(deserializer)?))
}

fn lenient_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let names = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::String(name) => vec![name],
        _ => Vec::new(),
    };
    Ok(names)
}

fn lenient_field_errors<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let errors = match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .iter()
            .filter_map(|(name, message)| message_text(message).map(|text| (name.clone(), text)))
            .collect(),
        _ => BTreeMap::new(),
    };
    Ok(errors)
}

/// A message given either as a string or as a list of strings (joined)
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

/// Failure details after decoding, with the fallback message already applied
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFailure {
    pub message: String,
    pub missing_fields: Vec<String>,
    pub field_errors: BTreeMap<String, String>,
}

impl From<PaymentErrorResponse> for PaymentFailure {
    fn from(response: PaymentErrorResponse) -> Self {
        Self {
            message: response
                .error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            missing_fields: response.missing_parameters,
            field_errors: response.field_errors,
        }
    }
}

/// Outcome of one submit cycle
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success {
        redirect_to: Option<String>,
        extra: serde_json::Map<String, serde_json::Value>,
    },
    Failure(PaymentFailure),
}

impl SubmissionResult {
    /// Decode a server response.
    ///
    /// Only HTTP 200 with a JSON object body counts as success; anything else
    /// goes through the error path, using whatever error payload can be read.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 200 {
            return match serde_json::from_str::<PaymentSuccessResponse>(body) {
                Ok(response) => SubmissionResult::Success {
                    redirect_to: response.redirect_to.filter(|target| !target.is_empty()),
                    extra: response.extra,
                },
                Err(_) => Self::generic_failure(),
            };
        }
        let response = serde_json::from_str::<PaymentErrorResponse>(body).unwrap_or_default();
        SubmissionResult::Failure(response.into())
    }

    /// The request never produced a response
    pub fn transport_failure() -> Self {
        Self::generic_failure()
    }

    fn generic_failure() -> Self {
        SubmissionResult::Failure(PaymentErrorResponse::default().into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }
}

/// Server-driven annotations currently shown on the form.
///
/// Every submit cycle starts from [`FormFeedback::default`], so markers never
/// accumulate across retries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormFeedback {
    pub error_message: Option<String>,
    pub missing_fields: BTreeSet<String>,
    pub field_errors: BTreeMap<String, String>,
    pub unhandled_success: Option<String>,
}

impl FormFeedback {
    pub fn from_failure(failure: &PaymentFailure) -> Self {
        Self {
            error_message: Some(failure.message.clone()),
            missing_fields: failure.missing_fields.iter().cloned().collect(),
            field_errors: failure.field_errors.clone(),
            unhandled_success: None,
        }
    }

    pub fn unhandled_success() -> Self {
        Self {
            unhandled_success: Some(UNHANDLED_SUCCESS_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    pub fn is_missing(&self, name: &str) -> bool {
        self.missing_fields.contains(name)
    }

    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.field_errors.get(name).map(String::as_str)
    }

    pub fn shows_error_frame(&self) -> bool {
        self.error_message.is_some()
    }
}

/// What the page does once a submit cycle has a response
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Navigate away; the form stays disabled
    Redirect(String),
    /// Succeeded without a target; the form stays disabled behind a banner
    UnhandledSuccess(serde_json::Map<String, Value>),
    /// Form is usable again and shows the failure
    Rejected(PaymentFailure),
}

/// State of the submit cycle of one form.
///
/// Only one request may be in flight. A cycle that ended in success keeps
/// the form disabled, so it never starts again.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionCycle {
    in_progress: bool,
    feedback: FormFeedback,
}

impl SubmissionCycle {
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn feedback(&self) -> &FormFeedback {
        &self.feedback
    }

    /// Start a cycle and clear the previous feedback.
    ///
    /// Returns `false`, leaving everything untouched, while another cycle is
    /// running or after a success.
    pub fn begin(&mut self) -> bool {
        if self.in_progress {
            return false;
        }
        self.in_progress = true;
        self.feedback = FormFeedback::default();
        true
    }

    pub fn finish(&mut self, result: SubmissionResult) -> CycleOutcome {
        match result {
            SubmissionResult::Success {
                redirect_to: Some(target),
                ..
            } => CycleOutcome::Redirect(target),
            SubmissionResult::Success {
                redirect_to: None,
                extra,
            } => {
                self.feedback = FormFeedback::unhandled_success();
                CycleOutcome::UnhandledSuccess(extra)
            }
            SubmissionResult::Failure(failure) => {
                self.feedback = FormFeedback::from_failure(&failure);
                self.in_progress = false;
                CycleOutcome::Rejected(failure)
            }
        }
    }
}
