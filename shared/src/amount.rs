use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PaymentsConfig;

/// How often a subscription is debited
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DebitPeriod {
    #[serde(rename = "m")]
    Monthly,
    #[serde(rename = "q")]
    Quarterly,
    #[serde(rename = "h")]
    HalfYearly,
    #[serde(rename = "y")]
    Yearly,
}

impl DebitPeriod {
    pub const ALL: [DebitPeriod; 4] = [
        DebitPeriod::Monthly,
        DebitPeriod::Quarterly,
        DebitPeriod::HalfYearly,
        DebitPeriod::Yearly,
    ];

    /// Wire value used in the `debit_period` form field
    pub fn code(&self) -> &'static str {
        match self {
            DebitPeriod::Monthly => "m",
            DebitPeriod::Quarterly => "q",
            DebitPeriod::HalfYearly => "h",
            DebitPeriod::Yearly => "y",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|period| period.code() == code)
    }

    pub fn default_months(&self) -> u32 {
        match self {
            DebitPeriod::Monthly => 1,
            DebitPeriod::Quarterly => 3,
            DebitPeriod::HalfYearly => 6,
            DebitPeriod::Yearly => 12,
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            DebitPeriod::Monthly => "monthly",
            DebitPeriod::Quarterly => "quarterly",
            DebitPeriod::HalfYearly => "half-yearly",
            DebitPeriod::Yearly => "yearly",
        }
    }
}

impl fmt::Display for DebitPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mutually exclusive outcome messages shown below the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl AmountTier {
    pub const ALL: [AmountTier; 4] = [
        AmountTier::Low,
        AmountTier::Medium,
        AmountTier::High,
        AmountTier::VeryHigh,
    ];

    pub fn for_amount(value: f64, thresholds: &[f64; 3]) -> Self {
        if value < thresholds[0] {
            AmountTier::Low
        } else if value < thresholds[1] {
            AmountTier::Medium
        } else if value < thresholds[2] {
            AmountTier::High
        } else {
            AmountTier::VeryHigh
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            AmountTier::Low => "low-amount",
            AmountTier::Medium => "medium-amount",
            AmountTier::High => "high-amount",
            AmountTier::VeryHigh => "very-high-amount",
        }
    }
}

/// Everything the amount widget renders after one update.
///
/// Two updates with the same resulting value compare equal, which is what
/// makes re-applying a value a visual no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderUpdate {
    /// Clamped, step-snapped amount written to both the slider and the text field
    pub value: f64,
    /// The text field should be focused with its content selected
    pub select_all: bool,
    pub fill_percentage: u8,
    pub gradient_style: String,
    pub tier: AmountTier,
    pub max_label: String,
    /// New state of an enabled-on-change submit button; `None` leaves it untouched
    pub submit_enabled: Option<bool>,
}

impl SliderUpdate {
    pub fn text_value(&self) -> String {
        format_amount(self.value)
    }
}

/// Bounds and presentation settings of the amount slider
#[derive(Debug, Clone, PartialEq)]
pub struct AmountSlider {
    min: f64,
    max: f64,
    maximum_allowed: f64,
    step: f64,
    initial: f64,
    tier_thresholds: [f64; 3],
    color: String,
    background_color: String,
}

impl AmountSlider {
    pub fn new(config: &PaymentsConfig) -> Self {
        Self {
            min: config.min,
            max: config.max,
            maximum_allowed: config.maximum_allowed,
            step: config.step,
            initial: config.initial,
            tier_thresholds: config.tier_thresholds,
            color: config.slider_color.clone(),
            background_color: config.slider_background_color.clone(),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// End of the slider track
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Highest amount a value is clamped to
    pub fn upper_bound(&self) -> f64 {
        self.maximum_allowed
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// Update path shared by the slider and the text field.
    ///
    /// `raw` is whatever the control produced; anything that is not a finite
    /// number resets to the initial amount.
    pub fn apply(&self, raw: &str, initial: bool) -> SliderUpdate {
        match parse_amount(raw) {
            Some(value) => {
                let out_of_range = value < self.min || value > self.maximum_allowed;
                self.render(self.clamp(value), out_of_range, initial)
            }
            None => self.render(self.initial_value(), true, initial),
        }
    }

    /// Same as [`AmountSlider::apply`] for values that are already numeric
    pub fn apply_value(&self, value: f64, initial: bool) -> SliderUpdate {
        if !value.is_finite() {
            return self.render(self.initial_value(), true, initial);
        }
        let out_of_range = value < self.min || value > self.maximum_allowed;
        self.render(self.clamp(value), out_of_range, initial)
    }

    /// Update run once on load; leaves enabled-on-change buttons alone
    pub fn initial_update(&self) -> SliderUpdate {
        self.render(self.initial_value(), false, true)
    }

    /// The starting amount kept off the step grid (an existing subscription
    /// may sit between steps), only held inside the allowed range
    fn initial_value(&self) -> f64 {
        self.initial.max(self.min).min(self.maximum_allowed)
    }

    /// Snap to the step grid anchored at `min`, then clamp into the allowed range
    pub fn clamp(&self, value: f64) -> f64 {
        let snapped = self.min + ((value - self.min) / self.step).round() * self.step;
        let snapped = (snapped * 1_000_000.0).round() / 1_000_000.0;
        snapped.max(self.min).min(self.maximum_allowed)
    }

    pub fn fill_percentage(&self, value: f64) -> u8 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 100;
        }
        (100.0 * (value - self.min) / span).round().clamp(0.0, 100.0) as u8
    }

    pub fn gradient_style(&self, percentage: u8) -> String {
        let color = &self.color;
        let background = &self.background_color;
        format!(
            "background: {color}; \
             background: -webkit-linear-gradient(left, {color} {percentage}%, {background} {percentage}%); \
             background: linear-gradient(to right, {color} {percentage}%, {background} {percentage}%)"
        )
    }

    fn render(&self, value: f64, select_all: bool, initial: bool) -> SliderUpdate {
        let fill_percentage = self.fill_percentage(value);
        SliderUpdate {
            value,
            select_all,
            fill_percentage,
            gradient_style: self.gradient_style(fill_percentage),
            tier: AmountTier::for_amount(value, &self.tier_thresholds),
            max_label: format!("{} €", format_amount(value.max(self.max))),
            submit_enabled: if initial {
                None
            } else {
                Some(value != self.initial_value())
            },
        }
    }
}

/// Parse user input as an amount; accepts a decimal comma
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Whole amounts render without decimals, everything else with two
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Total debited per period; derived, never stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebitSchedule {
    pub amount: f64,
    pub period: DebitPeriod,
    pub months: u32,
}

impl DebitSchedule {
    pub fn new(amount: f64, period: DebitPeriod, config: &PaymentsConfig) -> Self {
        Self {
            amount,
            period,
            months: config.months_for(period),
        }
    }

    pub fn total(&self) -> f64 {
        self.amount * f64::from(self.months)
    }

    /// e.g. "15 € quarterly"
    pub fn describe(&self, config: &PaymentsConfig) -> String {
        format!(
            "{} € {}",
            format_amount(self.total()),
            config.label_for(self.period)
        )
    }
}

/// Period selected by a discrete slider position; out-of-range indices stick to the ends
pub fn period_at(config: &PaymentsConfig, index: usize) -> DebitPeriod {
    config
        .periods
        .get(index)
        .or_else(|| config.periods.last())
        .copied()
        .unwrap_or(DebitPeriod::Monthly)
}

pub fn period_index(config: &PaymentsConfig, period: DebitPeriod) -> usize {
    config
        .periods
        .iter()
        .position(|candidate| *candidate == period)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> AmountSlider {
        AmountSlider::new(&PaymentsConfig::default())
    }

    #[test]
    fn test_values_stay_within_bounds() {
        let slider = slider();
        for raw in ["-50", "0", "0.4", "1", "7", "19.6", "20", "99", "100", "101", "5000", "1e9"] {
            let update = slider.apply(raw, false);
            assert!(
                update.value >= slider.min() && update.value <= slider.upper_bound(),
                "{} resolved to {}",
                raw,
                update.value
            );
        }
    }

    #[test]
    fn test_non_numeric_resets_to_initial_and_selects() {
        let slider = slider();
        for raw in ["", "abc", "12abc", "NaN", "inf", "   "] {
            let update = slider.apply(raw, false);
            assert_eq!(update.value, 5.0, "input {:?}", raw);
            assert!(update.select_all, "input {:?}", raw);
        }
    }

    #[test]
    fn test_out_of_range_clamps_and_selects() {
        let slider = slider();

        let above = slider.apply("250", false);
        assert_eq!(above.value, 100.0);
        assert!(above.select_all);

        let below = slider.apply("0", false);
        assert_eq!(below.value, 1.0);
        assert!(below.select_all);

        let inside = slider.apply("12", false);
        assert_eq!(inside.value, 12.0);
        assert!(!inside.select_all);
    }

    #[test]
    fn test_values_snap_to_step() {
        let slider = slider();
        assert_eq!(slider.apply("7.4", false).value, 7.0);
        assert_eq!(slider.apply("7.6", false).value, 8.0);
        assert_eq!(slider.apply("7,6", false).value, 8.0);

        let config = PaymentsConfig {
            step: 0.5,
            ..PaymentsConfig::default()
        };
        let half_steps = AmountSlider::new(&config);
        assert_eq!(half_steps.apply("2.3", false).value, 2.5);
    }

    #[test]
    fn test_fill_percentage_and_gradient() {
        let slider = slider();
        assert_eq!(slider.apply("1", false).fill_percentage, 0);
        assert_eq!(slider.apply("20", false).fill_percentage, 100);
        // 100 * (10 - 1) / 19 = 47.37
        let update = slider.apply("10", false);
        assert_eq!(update.fill_percentage, 47);
        assert!(update.gradient_style.contains("linear-gradient(to right, #5a9e2f 47%, #e6e6e6 47%)"));
        // typed amounts beyond the track keep a full bar
        assert_eq!(slider.apply("60", false).fill_percentage, 100);
    }

    #[test]
    fn test_tier_boundaries() {
        let slider = slider();
        assert_eq!(slider.apply("4", false).tier, AmountTier::Low);
        assert_eq!(slider.apply("5", false).tier, AmountTier::Medium);
        assert_eq!(slider.apply("9", false).tier, AmountTier::Medium);
        assert_eq!(slider.apply("10", false).tier, AmountTier::High);
        assert_eq!(slider.apply("14", false).tier, AmountTier::High);
        assert_eq!(slider.apply("15", false).tier, AmountTier::VeryHigh);
        assert_eq!(slider.apply("80", false).tier, AmountTier::VeryHigh);
    }

    #[test]
    fn test_max_label_follows_larger_amounts() {
        let slider = slider();
        assert_eq!(slider.apply("3", false).max_label, "20 €");
        assert_eq!(slider.apply("35", false).max_label, "35 €");
    }

    #[test]
    fn test_enabled_on_change_button() {
        let slider = slider();
        assert_eq!(slider.initial_update().submit_enabled, None);
        assert_eq!(slider.apply("5", false).submit_enabled, Some(false));
        assert_eq!(slider.apply("6", false).submit_enabled, Some(true));
        assert_eq!(slider.apply("5", false).submit_enabled, Some(false));
        // garbage resets to the initial amount, so the button stays disabled
        assert_eq!(slider.apply("x", false).submit_enabled, Some(false));
    }

    #[test]
    fn test_initial_amount_between_steps_is_kept() {
        let config = PaymentsConfig {
            initial: 7.5,
            ..PaymentsConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        let slider = AmountSlider::new(&config);

        let start = slider.initial_update();
        assert_eq!(start.value, 7.5);
        assert_eq!(start.text_value(), "7.50");

        let reset = slider.apply("abc", false);
        assert_eq!(reset.value, 7.5);
        assert!(reset.select_all);
        assert_eq!(reset.submit_enabled, Some(false));

        // typed amounts still land on the grid, which differs from the start
        assert_eq!(slider.apply("7.5", false).value, 8.0);
        assert_eq!(slider.apply("7.5", false).submit_enabled, Some(true));
    }

    #[test]
    fn test_reapplying_same_value_is_identical() {
        let slider = slider();
        let first = slider.apply("12", false);
        let second = slider.apply_value(first.value, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_initial_update_renders_initial_amount() {
        let update = slider().initial_update();
        assert_eq!(update.value, 5.0);
        assert!(!update.select_all);
        assert_eq!(update.text_value(), "5");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5.0), "5");
        assert_eq!(format_amount(7.5), "7.50");
    }

    #[test]
    fn test_debit_schedule_total() {
        let config = PaymentsConfig::default();
        let schedule = DebitSchedule::new(5.0, DebitPeriod::Quarterly, &config);
        assert_eq!(schedule.total(), 15.0);
        assert_eq!(schedule.describe(&config), "15 € quarterly");

        let yearly = DebitSchedule::new(2.5, DebitPeriod::Yearly, &config);
        assert_eq!(yearly.describe(&config), "30 € yearly");
    }

    #[test]
    fn test_period_slider_positions() {
        let config = PaymentsConfig {
            periods: vec![DebitPeriod::Monthly, DebitPeriod::HalfYearly],
            ..PaymentsConfig::default()
        };
        assert_eq!(period_at(&config, 0), DebitPeriod::Monthly);
        assert_eq!(period_at(&config, 1), DebitPeriod::HalfYearly);
        assert_eq!(period_at(&config, 7), DebitPeriod::HalfYearly);
        assert_eq!(period_index(&config, DebitPeriod::HalfYearly), 1);
        assert_eq!(period_index(&config, DebitPeriod::Yearly), 0);
    }

    #[test]
    fn test_period_codes() {
        assert_eq!(DebitPeriod::from_code("h"), Some(DebitPeriod::HalfYearly));
        assert_eq!(DebitPeriod::from_code("weekly"), None);
        assert_eq!(DebitPeriod::Yearly.to_string(), "y");
    }
}
