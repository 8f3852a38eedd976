use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::{DebitPeriod, PaymentType};

/// Deployment configuration injected by the hosting page.
///
/// Every key is optional in the injected JSON; missing keys fall back to
/// [`PaymentsConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentsConfig {
    /// Lowest selectable amount
    pub min: f64,
    /// End of the slider track and floor of the maximum label
    pub max: f64,
    /// Amount preselected on load
    pub initial: f64,
    /// Highest amount the server accepts (typed input may exceed the slider track)
    pub maximum_allowed: f64,
    pub step: f64,
    /// Upper bounds (exclusive) of the low, medium and high tiers
    pub tier_thresholds: [f64; 3],
    /// Allowed debit periods, in slider order
    pub periods: Vec<DebitPeriod>,
    pub period_labels: BTreeMap<DebitPeriod, String>,
    pub period_months: BTreeMap<DebitPeriod, u32>,
    pub accepted_payment_types: Vec<PaymentType>,
    pub form_id: String,
    pub form_action: String,
    pub subscription_form_id: String,
    /// Empty string disables the subscription amount form
    pub subscription_action: String,
    /// Prefix for relative form actions; empty means the page origin
    pub api_base_url: String,
    pub slider_color: String,
    pub slider_background_color: String,
    pub log_endpoint: Option<String>,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 20.0,
            initial: 5.0,
            maximum_allowed: 100.0,
            step: 1.0,
            tier_thresholds: [5.0, 10.0, 15.0],
            periods: DebitPeriod::ALL.to_vec(),
            period_labels: DebitPeriod::ALL
                .iter()
                .map(|period| (*period, period.default_label().to_string()))
                .collect(),
            period_months: DebitPeriod::ALL
                .iter()
                .map(|period| (*period, period.default_months()))
                .collect(),
            accepted_payment_types: vec![PaymentType::DirectDebit],
            form_id: "payments-form".to_string(),
            form_action: "/payments/api/make_payment/".to_string(),
            subscription_form_id: "subscription-form".to_string(),
            subscription_action: String::new(),
            api_base_url: String::new(),
            slider_color: "#5a9e2f".to_string(),
            slider_background_color: "#e6e6e6".to_string(),
            log_endpoint: None,
        }
    }
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("minimum amount {min} must be below the slider maximum {max}")]
    EmptyRange { min: f64, max: f64 },
    #[error("maximum allowed amount {maximum_allowed} must not be below the slider maximum {max}")]
    AllowedBelowSlider { maximum_allowed: f64, max: f64 },
    #[error("initial amount {initial} lies outside {min}..={maximum_allowed}")]
    InitialOutOfBounds {
        initial: f64,
        min: f64,
        maximum_allowed: f64,
    },
    #[error("step must be positive, got {0}")]
    InvalidStep(f64),
    #[error("tier thresholds must be ascending: {0:?}")]
    UnorderedThresholds([f64; 3]),
    #[error("debit period list is empty")]
    NoPeriods,
    #[error("debit period '{0}' has no month count")]
    MissingPeriodMonths(DebitPeriod),
    #[error("no payment type is accepted")]
    NoPaymentTypes,
}

impl PaymentsConfig {
    /// Parse a JSON configuration document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: PaymentsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min < self.max) {
            return Err(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.maximum_allowed < self.max {
            return Err(ConfigError::AllowedBelowSlider {
                maximum_allowed: self.maximum_allowed,
                max: self.max,
            });
        }
        if self.initial < self.min || self.initial > self.maximum_allowed {
            return Err(ConfigError::InitialOutOfBounds {
                initial: self.initial,
                min: self.min,
                maximum_allowed: self.maximum_allowed,
            });
        }
        if !(self.step > 0.0) {
            return Err(ConfigError::InvalidStep(self.step));
        }
        let [low, medium, high] = self.tier_thresholds;
        if !(low <= medium && medium <= high) {
            return Err(ConfigError::UnorderedThresholds(self.tier_thresholds));
        }
        if self.periods.is_empty() {
            return Err(ConfigError::NoPeriods);
        }
        if let Some(period) = self
            .periods
            .iter()
            .find(|period| !self.period_months.contains_key(period))
        {
            return Err(ConfigError::MissingPeriodMonths(*period));
        }
        if self.accepted_payment_types.is_empty() {
            return Err(ConfigError::NoPaymentTypes);
        }
        Ok(())
    }

    /// Month count for a period, falling back to the period's natural length
    pub fn months_for(&self, period: DebitPeriod) -> u32 {
        self.period_months
            .get(&period)
            .copied()
            .unwrap_or_else(|| period.default_months())
    }

    pub fn label_for(&self, period: DebitPeriod) -> &str {
        self.period_labels
            .get(&period)
            .map(String::as_str)
            .unwrap_or_else(|| period.default_label())
    }

    pub fn subscription_form_enabled(&self) -> bool {
        !self.subscription_action.trim().is_empty()
    }
}

/// Failure while turning injected JSON into a usable configuration
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("configuration rejected: {0}")]
    Invalid(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(PaymentsConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PaymentsConfig::from_json(r#"{"min": 2, "max": 30, "initial": 10}"#).unwrap();
        assert_eq!(config.min, 2.0);
        assert_eq!(config.max, 30.0);
        assert_eq!(config.initial, 10.0);
        assert_eq!(config.maximum_allowed, 100.0);
        assert_eq!(config.form_id, "payments-form");
        assert_eq!(config.periods.len(), 4);
    }

    #[test]
    fn test_period_tables_from_json() {
        let json = r#"{
            "periods": ["m", "y"],
            "periodLabels": {"m": "monatlich", "y": "jährlich"},
            "periodMonths": {"m": 1, "y": 12}
        }"#;
        let config = PaymentsConfig::from_json(json).unwrap();
        assert_eq!(config.periods, vec![DebitPeriod::Monthly, DebitPeriod::Yearly]);
        assert_eq!(config.label_for(DebitPeriod::Yearly), "jährlich");
        assert_eq!(config.months_for(DebitPeriod::Yearly), 12);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let result = PaymentsConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigLoadError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_inconsistent_values() {
        let config = PaymentsConfig {
            min: 20.0,
            max: 20.0,
            ..PaymentsConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyRange { .. })));

        let config = PaymentsConfig {
            maximum_allowed: 10.0,
            ..PaymentsConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::AllowedBelowSlider { .. })));

        let config = PaymentsConfig {
            initial: 0.5,
            ..PaymentsConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InitialOutOfBounds { .. })));

        let config = PaymentsConfig {
            step: 0.0,
            ..PaymentsConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidStep(0.0)));

        let config = PaymentsConfig {
            tier_thresholds: [10.0, 5.0, 15.0],
            ..PaymentsConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::UnorderedThresholds(_))));

        let config = PaymentsConfig {
            accepted_payment_types: vec![],
            ..PaymentsConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoPaymentTypes));
    }

    #[test]
    fn test_validate_requires_months_for_every_period() {
        let mut config = PaymentsConfig::default();
        config.period_months.remove(&DebitPeriod::HalfYearly);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingPeriodMonths(DebitPeriod::HalfYearly))
        );
    }

    #[test]
    fn test_subscription_form_toggle() {
        let mut config = PaymentsConfig::default();
        assert!(!config.subscription_form_enabled());
        config.subscription_action = "/payments/api/subscription/amount/".to_string();
        assert!(config.subscription_form_enabled());
    }
}
