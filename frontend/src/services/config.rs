use anyhow::{Context, Result};
use shared::PaymentsConfig;

use crate::services::logging::Logger;

/// Id of the `<script type="application/json">` element carrying the deployment config
pub const CONFIG_ELEMENT_ID: &str = "payments-config";

/// Read the injected configuration, falling back to defaults when it is absent or broken
pub fn load_config() -> PaymentsConfig {
    match read_config() {
        Ok(Some(config)) => {
            Logger::debug_with_component("config", "Loaded payment configuration from page");
            config
        }
        Ok(None) => {
            Logger::info_with_component(
                "config",
                &format!("No #{} element found, using default payment configuration", CONFIG_ELEMENT_ID),
            );
            PaymentsConfig::default()
        }
        Err(e) => {
            Logger::error_with_component(
                "config",
                &format!("Ignoring payment configuration: {:#}", e),
            );
            PaymentsConfig::default()
        }
    }
}

fn read_config() -> Result<Option<PaymentsConfig>> {
    let document = gloo::utils::document();
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(None);
    };
    let json = element.text_content().unwrap_or_default();
    let config = PaymentsConfig::from_json(&json)
        .with_context(|| format!("#{} does not hold a usable configuration", CONFIG_ELEMENT_ID))?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn inject(json: &str) -> web_sys::Element {
        let document = gloo::utils::document();
        if let Some(existing) = document.get_element_by_id(CONFIG_ELEMENT_ID) {
            existing.remove();
        }
        let script = document.create_element("script").unwrap();
        script.set_id(CONFIG_ELEMENT_ID);
        script.set_attribute("type", "application/json").unwrap();
        script.set_text_content(Some(json));
        gloo::utils::body().append_child(&script).unwrap();
        script
    }

    #[wasm_bindgen_test]
    fn test_load_config_from_page() {
        let script = inject(r#"{"min": 3, "max": 50, "initial": 10, "formAction": "/pay"}"#);
        let config = load_config();
        assert_eq!(config.min, 3.0);
        assert_eq!(config.max, 50.0);
        assert_eq!(config.form_action, "/pay");
        script.remove();
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_falls_back_to_defaults() {
        let script = inject(r#"{"min": 30, "max": 10}"#);
        assert_eq!(load_config(), PaymentsConfig::default());
        script.remove();
    }

    #[wasm_bindgen_test]
    fn test_missing_config_uses_defaults() {
        if let Some(existing) = gloo::utils::document().get_element_by_id(CONFIG_ELEMENT_ID) {
            existing.remove();
        }
        assert_eq!(load_config(), PaymentsConfig::default());
    }
}
