use gloo::net::http::Request;
use shared::SubmissionResult;
use web_sys::UrlSearchParams;

use crate::services::logging::Logger;

/// API client for posting forms to the payment endpoints
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`; an empty base resolves actions against the page origin
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, action: &str) -> String {
        if self.base_url.is_empty() || action.starts_with("http://") || action.starts_with("https://") {
            action.to_string()
        } else {
            format!("{}{}", self.base_url, action)
        }
    }

    /// Submit serialized form fields and decode the outcome.
    ///
    /// Never fails: transport problems come back as
    /// [`SubmissionResult::Failure`] with the generic message.
    pub async fn submit_form(&self, action: &str, fields: &[(String, String)]) -> SubmissionResult {
        match self.post_form(action, fields).await {
            Ok((status, body)) => {
                Logger::debug_with_component("api", &format!("{} answered with HTTP {}", action, status));
                SubmissionResult::from_response(status, &body)
            }
            Err(e) => {
                Logger::error_with_component("api", &format!("Submitting to {} failed: {}", action, e));
                SubmissionResult::transport_failure()
            }
        }
    }

    /// POST `fields` URL-encoded; returns status and raw body
    async fn post_form(&self, action: &str, fields: &[(String, String)]) -> Result<(u16, String), String> {
        let body = encode_form_body(fields)?;

        let response = Request::post(&self.url_for(action))
            .header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(body)
            .map_err(|e| format!("Failed to build request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response: {}", e))?;
        Ok((status, body))
    }
}

/// `application/x-www-form-urlencoded` body, in field order
pub fn encode_form_body(fields: &[(String, String)]) -> Result<String, String> {
    let params = UrlSearchParams::new().map_err(|e| format!("Failed to create form body: {:?}", e))?;
    for (name, value) in fields {
        params.append(name, value);
    }
    Ok(params.to_string().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_form_body_keeps_order_and_escapes() {
        let fields = vec![
            ("amount".to_string(), "20".to_string()),
            ("address".to_string(), "Main St 1 & 2".to_string()),
            ("ajax_form_id".to_string(), "payments-form".to_string()),
        ];
        let body = encode_form_body(&fields).unwrap();
        assert_eq!(body, "amount=20&address=Main+St+1+%26+2&ajax_form_id=payments-form");
    }

    #[wasm_bindgen_test]
    fn test_url_resolution() {
        let relative = ApiClient::with_base_url(String::new());
        assert_eq!(relative.url_for("/pay"), "/pay");

        let absolute = ApiClient::with_base_url("https://example.org/".to_string());
        assert_eq!(absolute.url_for("/pay"), "https://example.org/pay");
        assert_eq!(absolute.url_for("https://other.org/pay"), "https://other.org/pay");
    }
}
