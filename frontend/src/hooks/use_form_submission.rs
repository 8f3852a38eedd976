use shared::{CycleOutcome, FormFeedback, SubmissionCycle};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Where and how a form is submitted
#[derive(Clone, PartialEq)]
pub struct FormSubmissionConfig {
    pub action: String,
    /// Logging component name
    pub component: &'static str,
    /// Scroll the window back to the top after a failed submit
    pub scroll_to_top_on_failure: bool,
}

impl Default for FormSubmissionConfig {
    fn default() -> Self {
        Self {
            action: String::new(),
            component: "form-submission",
            scroll_to_top_on_failure: true,
        }
    }
}

pub struct UseFormSubmissionResult {
    /// Request in flight (or succeeded without a redirect); controls are disabled
    pub in_progress: bool,
    pub feedback: FormFeedback,
    /// Submit already-serialized name/value pairs
    pub submit: Callback<Vec<(String, String)>>,
}

/// Hook running one asynchronous submit cycle at a time.
///
/// Each cycle clears previous feedback before the request goes out. On
/// failure the form is re-enabled and `on_failure` runs after the feedback is
/// set; on success the browser navigates to `redirect_to`, or the form stays
/// disabled with an "unhandled success" banner when the server sent none.
#[hook]
pub fn use_form_submission(
    api_client: &ApiClient,
    config: FormSubmissionConfig,
    on_failure: Callback<()>,
) -> UseFormSubmissionResult {
    // The ref is the source of truth for the in-flight guard; the state
    // mirrors it for rendering.
    let cycle = use_mut_ref(SubmissionCycle::default);
    let rendered = use_state(SubmissionCycle::default);

    let submit = {
        let rendered = rendered.clone();

        use_callback(
            (api_client.clone(), config, on_failure),
            move |fields: Vec<(String, String)>, (api_client, config, on_failure)| {
                if !cycle.borrow_mut().begin() {
                    Logger::warn_with_component(config.component, "Submit ignored, a request is already in flight");
                    return;
                }
                rendered.set(cycle.borrow().clone());
                Logger::info_with_component(
                    config.component,
                    &format!("Submitting {} fields to {}", fields.len(), config.action),
                );

                let api_client = api_client.clone();
                let config = config.clone();
                let on_failure = on_failure.clone();
                let rendered = rendered.clone();
                let cycle = cycle.clone();

                spawn_local(async move {
                    let result = api_client.submit_form(&config.action, &fields).await;
                    let outcome = cycle.borrow_mut().finish(result);
                    rendered.set(cycle.borrow().clone());

                    match outcome {
                        CycleOutcome::Redirect(target) => {
                            Logger::info_with_component(
                                config.component,
                                &format!("Submit succeeded, redirecting to {}", target),
                            );
                            if let Err(e) = gloo::utils::window().location().set_href(&target) {
                                Logger::error_with_component(
                                    config.component,
                                    &format!("Redirect to {} failed: {:?}", target, e),
                                );
                            }
                        }
                        CycleOutcome::UnhandledSuccess(extra) => {
                            let payload = serde_json::Value::Object(extra).to_string();
                            Logger::error_with_component(
                                config.component,
                                &format!("Submit succeeded but the response has no redirect_to: {}", payload),
                            );
                        }
                        CycleOutcome::Rejected(failure) => {
                            Logger::warn_with_component(
                                config.component,
                                &format!(
                                    "Submit rejected: {} (missing: {:?}, field errors: {})",
                                    failure.message,
                                    failure.missing_fields,
                                    failure.field_errors.len()
                                ),
                            );
                            if config.scroll_to_top_on_failure {
                                gloo::utils::window().scroll_to_with_x_and_y(0.0, 0.0);
                            }
                            on_failure.emit(());
                        }
                    }
                });
            },
        )
    };

    UseFormSubmissionResult {
        in_progress: rendered.in_progress(),
        feedback: rendered.feedback().clone(),
        submit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_config_default() {
        let config = FormSubmissionConfig::default();
        assert!(config.action.is_empty());
        assert_eq!(config.component, "form-submission");
        assert!(config.scroll_to_top_on_failure);
    }

    #[wasm_bindgen_test]
    fn test_config_without_scrolling() {
        let config = FormSubmissionConfig {
            action: "/payments/api/subscription/amount/".to_string(),
            scroll_to_top_on_failure: false,
            ..FormSubmissionConfig::default()
        };
        assert_eq!(config.component, "form-submission");
        assert!(!config.scroll_to_top_on_failure);
    }
}
