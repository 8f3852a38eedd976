use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{AmountSlider, DebitPeriod, DebitSchedule, PaymentsConfig};

/// Payment methods the server may accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "dd")]
    DirectDebit,
    #[serde(rename = "cc")]
    CreditCard,
    #[serde(rename = "paypal")]
    Paypal,
}

impl PaymentType {
    pub const ALL: [PaymentType; 3] = [
        PaymentType::DirectDebit,
        PaymentType::CreditCard,
        PaymentType::Paypal,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PaymentType::DirectDebit => "dd",
            PaymentType::CreditCard => "cc",
            PaymentType::Paypal => "paypal",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::DirectDebit => "Direct Debit (SEPA)",
            PaymentType::CreditCard => "Credit Card",
            PaymentType::Paypal => "Paypal",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Tabs of the multi-step payment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormStep {
    Amount,
    PersonalData,
    PaymentDetails,
    Summary,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Amount,
        FormStep::PersonalData,
        FormStep::PaymentDetails,
        FormStep::Summary,
    ];

    /// Pane id, without the leading `#`
    pub fn pane_id(&self) -> &'static str {
        match self {
            FormStep::Amount => "step1",
            FormStep::PersonalData => "step2",
            FormStep::PaymentDetails => "step3",
            FormStep::Summary => "step4",
        }
    }

    /// Tab link target, e.g. `#step3`
    pub fn anchor(&self) -> String {
        format!("#{}", self.pane_id())
    }

    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let id = anchor.trim_start_matches('#');
        Self::ALL.iter().copied().find(|step| step.pane_id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormStep::Amount => "Amount",
            FormStep::PersonalData => "Personal data",
            FormStep::PaymentDetails => "Payment details",
            FormStep::Summary => "Summary",
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            FormStep::Amount => Some(FormStep::PersonalData),
            FormStep::PersonalData => Some(FormStep::PaymentDetails),
            FormStep::PaymentDetails => Some(FormStep::Summary),
            FormStep::Summary => None,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            FormStep::Amount => None,
            FormStep::PersonalData => Some(FormStep::Amount),
            FormStep::PaymentDetails => Some(FormStep::PersonalData),
            FormStep::Summary => Some(FormStep::PaymentDetails),
        }
    }
}

/// Membership in a conditional-select-container: the field is only required
/// while `select` holds `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalGroup {
    pub select: PaymentField,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Number,
    Checkbox,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentField {
    Amount,
    DebitPeriod,
    PaymentType,
    FirstName,
    LastName,
    Email,
    Address,
    PostalCode,
    City,
    Country,
    IsOrganisation,
    Organisation,
    Iban,
    Bic,
    AccountHolder,
    TosCheck,
    PrivacyPolicyCheck,
}

impl PaymentField {
    /// Serialization order of the payment form
    pub const ALL: [PaymentField; 17] = [
        PaymentField::Amount,
        PaymentField::DebitPeriod,
        PaymentField::PaymentType,
        PaymentField::FirstName,
        PaymentField::LastName,
        PaymentField::Email,
        PaymentField::Address,
        PaymentField::PostalCode,
        PaymentField::City,
        PaymentField::Country,
        PaymentField::IsOrganisation,
        PaymentField::Organisation,
        PaymentField::Iban,
        PaymentField::Bic,
        PaymentField::AccountHolder,
        PaymentField::TosCheck,
        PaymentField::PrivacyPolicyCheck,
    ];

    /// Fields copied into the summary placeholders
    pub const SUMMARY: [PaymentField; 10] = [
        PaymentField::Amount,
        PaymentField::AccountHolder,
        PaymentField::Iban,
        PaymentField::Bic,
        PaymentField::FirstName,
        PaymentField::LastName,
        PaymentField::Address,
        PaymentField::PostalCode,
        PaymentField::City,
        PaymentField::Country,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PaymentField::Amount => "amount",
            PaymentField::DebitPeriod => "debit_period",
            PaymentField::PaymentType => "payment_type",
            PaymentField::FirstName => "first_name",
            PaymentField::LastName => "last_name",
            PaymentField::Email => "email",
            PaymentField::Address => "address",
            PaymentField::PostalCode => "postal_code",
            PaymentField::City => "city",
            PaymentField::Country => "country",
            PaymentField::IsOrganisation => "is_organisation",
            PaymentField::Organisation => "organisation",
            PaymentField::Iban => "iban",
            PaymentField::Bic => "bic",
            PaymentField::AccountHolder => "account_holder",
            PaymentField::TosCheck => "tos_check",
            PaymentField::PrivacyPolicyCheck => "privacy_policy_check",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentField::Amount => "Amount",
            PaymentField::DebitPeriod => "Debit period",
            PaymentField::PaymentType => "Payment method",
            PaymentField::FirstName => "First name",
            PaymentField::LastName => "Last name",
            PaymentField::Email => "Email",
            PaymentField::Address => "Street and number",
            PaymentField::PostalCode => "Postal code",
            PaymentField::City => "City",
            PaymentField::Country => "Country",
            PaymentField::IsOrganisation => "I am paying for an organisation",
            PaymentField::Organisation => "Organisation",
            PaymentField::Iban => "IBAN",
            PaymentField::Bic => "BIC",
            PaymentField::AccountHolder => "Account holder",
            PaymentField::TosCheck => "I accept the terms of service",
            PaymentField::PrivacyPolicyCheck => "I accept the privacy policy",
        }
    }

    pub fn input_kind(&self) -> InputKind {
        match self {
            PaymentField::Amount => InputKind::Number,
            PaymentField::Email => InputKind::Email,
            PaymentField::DebitPeriod | PaymentField::PaymentType => InputKind::Select,
            PaymentField::IsOrganisation
            | PaymentField::TosCheck
            | PaymentField::PrivacyPolicyCheck => InputKind::Checkbox,
            _ => InputKind::Text,
        }
    }

    /// Tab the field is rendered on
    pub fn step(&self) -> FormStep {
        match self {
            PaymentField::Amount | PaymentField::DebitPeriod => FormStep::Amount,
            PaymentField::FirstName
            | PaymentField::LastName
            | PaymentField::Email
            | PaymentField::Address
            | PaymentField::PostalCode
            | PaymentField::City
            | PaymentField::Country
            | PaymentField::IsOrganisation
            | PaymentField::Organisation => FormStep::PersonalData,
            PaymentField::PaymentType
            | PaymentField::Iban
            | PaymentField::Bic
            | PaymentField::AccountHolder => FormStep::PaymentDetails,
            PaymentField::TosCheck | PaymentField::PrivacyPolicyCheck => FormStep::Summary,
        }
    }

    /// Whether the field can be required at all
    pub fn base_required(&self) -> bool {
        !matches!(self, PaymentField::IsOrganisation | PaymentField::Organisation)
    }

    pub fn conditional_group(&self) -> Option<ConditionalGroup> {
        match self {
            PaymentField::Iban | PaymentField::Bic | PaymentField::AccountHolder => {
                Some(ConditionalGroup {
                    select: PaymentField::PaymentType,
                    value: PaymentType::DirectDebit.code(),
                })
            }
            _ => None,
        }
    }

    /// Step outside of which the field is never required
    pub fn only_required_step(&self) -> Option<FormStep> {
        match self {
            PaymentField::TosCheck | PaymentField::PrivacyPolicyCheck => Some(FormStep::Summary),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed view-model of the payment form
#[derive(Debug, Clone, PartialEq)]
pub struct FormModel {
    values: BTreeMap<PaymentField, String>,
    active_step: FormStep,
}

const CHECKED: &str = "on";

impl FormModel {
    pub fn new(config: &PaymentsConfig) -> Self {
        let mut values: BTreeMap<PaymentField, String> = PaymentField::ALL
            .iter()
            .map(|field| (*field, String::new()))
            .collect();
        values.insert(
            PaymentField::Amount,
            AmountSlider::new(config).initial_update().text_value(),
        );
        let period = config.periods.first().copied().unwrap_or(DebitPeriod::Monthly);
        values.insert(PaymentField::DebitPeriod, period.code().to_string());
        let payment_type = config
            .accepted_payment_types
            .first()
            .copied()
            .unwrap_or(PaymentType::DirectDebit);
        values.insert(PaymentField::PaymentType, payment_type.code().to_string());
        Self {
            values,
            active_step: FormStep::Amount,
        }
    }

    pub fn value(&self, field: PaymentField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, field: PaymentField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn is_checked(&self, field: PaymentField) -> bool {
        self.value(field) == CHECKED
    }

    pub fn set_checked(&mut self, field: PaymentField, checked: bool) {
        let value = if checked { CHECKED } else { "" };
        self.set_value(field, value);
    }

    pub fn active_step(&self) -> FormStep {
        self.active_step
    }

    pub fn set_active_step(&mut self, step: FormStep) {
        self.active_step = step;
    }

    /// A rejected submit always lands on the payment details step
    pub fn submission_rejected(&mut self) {
        self.active_step = FormStep::PaymentDetails;
    }

    /// First step holding a required field that is still empty
    pub fn first_incomplete_step(&self) -> Option<FormStep> {
        self.missing_required().iter().map(|field| field.step()).min()
    }

    pub fn payment_type(&self) -> Option<PaymentType> {
        PaymentType::from_code(self.value(PaymentField::PaymentType))
    }

    pub fn debit_period(&self) -> Option<DebitPeriod> {
        DebitPeriod::from_code(self.value(PaymentField::DebitPeriod))
    }

    /// Whether the container tagged `group` is the selected one for its selector
    pub fn group_selected(&self, group: &ConditionalGroup) -> bool {
        self.value(group.select) == group.value
    }

    /// Required-ness as rendered on the input.
    ///
    /// Step scoping wins over conditional groups: a field outside its step is
    /// never required.
    pub fn is_required(&self, field: PaymentField) -> bool {
        if !field.base_required() {
            return false;
        }
        if let Some(step) = field.only_required_step() {
            if step != self.active_step {
                return false;
            }
        }
        match field.conditional_group() {
            Some(group) => self.group_selected(&group),
            None => true,
        }
    }

    pub fn required_fields(&self) -> Vec<PaymentField> {
        PaymentField::ALL
            .iter()
            .copied()
            .filter(|field| self.is_required(*field))
            .collect()
    }

    /// Required fields that are currently empty (or unchecked)
    pub fn missing_required(&self) -> Vec<PaymentField> {
        self.required_fields()
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect()
    }

    /// Flat name/value list as a browser would submit it, plus the form id.
    ///
    /// Unchecked checkboxes are left out.
    pub fn serialize(&self, form_id: &str) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = PaymentField::ALL
            .iter()
            .filter(|field| field.input_kind() != InputKind::Checkbox || self.is_checked(**field))
            .map(|field| (field.name().to_string(), self.value(*field).to_string()))
            .collect();
        pairs.push(("ajax_form_id".to_string(), form_id.to_string()));
        pairs
    }
}

/// Values shown on the summary step
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSummary {
    pub items: Vec<(PaymentField, String)>,
    pub payment_type: Option<PaymentType>,
    /// e.g. "15 € quarterly", when a debit period is chosen
    pub debit_total: Option<String>,
    pub debit_period_label: Option<String>,
}

impl PaymentSummary {
    pub fn from_model(model: &FormModel, config: &PaymentsConfig) -> Self {
        let items = PaymentField::SUMMARY
            .iter()
            .map(|field| (*field, model.value(*field).to_string()))
            .collect();
        let amount = crate::parse_amount(model.value(PaymentField::Amount));
        let period = model.debit_period();
        let debit_total = match (amount, period) {
            (Some(amount), Some(period)) => {
                Some(DebitSchedule::new(amount, period, config).describe(config))
            }
            _ => None,
        };
        Self {
            items,
            payment_type: model.payment_type(),
            debit_total,
            debit_period_label: period.map(|period| config.label_for(period).to_string()),
        }
    }

    pub fn item(&self, field: PaymentField) -> &str {
        self.items
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Exactly one payment-type block is visible
    pub fn shows_payment_type(&self, kind: PaymentType) -> bool {
        self.payment_type == Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> FormModel {
        FormModel::new(&PaymentsConfig::default())
    }

    #[test]
    fn test_new_model_defaults() {
        let model = model();
        assert_eq!(model.value(PaymentField::Amount), "5");
        assert_eq!(model.debit_period(), Some(DebitPeriod::Monthly));
        assert_eq!(model.payment_type(), Some(PaymentType::DirectDebit));
        assert_eq!(model.active_step(), FormStep::Amount);
    }

    #[test]
    fn test_new_model_amount_matches_slider() {
        let config = PaymentsConfig {
            initial: 5.5,
            ..PaymentsConfig::default()
        };
        let model = FormModel::new(&config);
        assert_eq!(
            model.value(PaymentField::Amount),
            AmountSlider::new(&config).initial_update().text_value()
        );
        assert_eq!(model.value(PaymentField::Amount), "5.50");
    }

    #[test]
    fn test_rejected_submit_returns_to_payment_details() {
        let mut model = model();
        model.set_active_step(FormStep::Summary);
        assert!(model.is_required(PaymentField::TosCheck));

        model.submission_rejected();
        assert_eq!(model.active_step(), FormStep::PaymentDetails);
        assert!(!model.is_required(PaymentField::TosCheck));
    }

    #[test]
    fn test_first_incomplete_step() {
        let mut model = model();
        model.set_active_step(FormStep::PaymentDetails);
        assert_eq!(model.first_incomplete_step(), Some(FormStep::PersonalData));

        for field in PaymentField::ALL {
            if field.step() == FormStep::PersonalData && model.is_required(field) {
                model.set_value(field, "x");
            }
        }
        assert_eq!(model.first_incomplete_step(), Some(FormStep::PaymentDetails));

        model.set_value(PaymentField::PaymentType, "cc");
        assert_eq!(model.first_incomplete_step(), None);
    }

    #[test]
    fn test_conditional_group_follows_selection() {
        let mut model = model();
        for field in [PaymentField::Iban, PaymentField::Bic, PaymentField::AccountHolder] {
            assert!(model.is_required(field));
        }

        model.set_value(PaymentField::PaymentType, "cc");
        for field in [PaymentField::Iban, PaymentField::Bic, PaymentField::AccountHolder] {
            assert!(!model.is_required(field));
        }
        // unrelated fields are untouched by the group
        assert!(model.is_required(PaymentField::Email));

        model.set_value(PaymentField::PaymentType, "dd");
        assert!(model.is_required(PaymentField::Iban));
    }

    #[test]
    fn test_step_scoped_fields_follow_active_step() {
        let mut model = model();
        for step in FormStep::ALL {
            model.set_active_step(step);
            let expected = step == FormStep::Summary;
            assert_eq!(model.is_required(PaymentField::TosCheck), expected, "{:?}", step);
            assert_eq!(model.is_required(PaymentField::PrivacyPolicyCheck), expected, "{:?}", step);
        }
    }

    #[test]
    fn test_optional_fields_never_required() {
        let mut model = model();
        model.set_checked(PaymentField::IsOrganisation, true);
        assert!(!model.is_required(PaymentField::Organisation));
        assert!(!model.is_required(PaymentField::IsOrganisation));
    }

    #[test]
    fn test_missing_required_on_payment_details_step() {
        let mut model = model();
        model.set_active_step(FormStep::PaymentDetails);
        let missing = model.missing_required();
        assert!(missing.contains(&PaymentField::Iban));
        assert!(missing.contains(&PaymentField::LastName));
        // the terms checkbox belongs to the summary step
        assert!(!missing.contains(&PaymentField::TosCheck));
        assert!(!missing.contains(&PaymentField::Amount));
    }

    #[test]
    fn test_serialize_appends_form_id_and_skips_unchecked_boxes() {
        let mut model = model();
        model.set_value(PaymentField::Amount, "20");
        model.set_value(PaymentField::Iban, "DE89370400440532013000");
        model.set_checked(PaymentField::TosCheck, true);

        let pairs = model.serialize("payments-form");
        assert_eq!(pairs.first(), Some(&("amount".to_string(), "20".to_string())));
        assert!(pairs.contains(&("iban".to_string(), "DE89370400440532013000".to_string())));
        assert!(pairs.contains(&("tos_check".to_string(), "on".to_string())));
        assert!(!pairs.iter().any(|(name, _)| name == "privacy_policy_check"));
        assert!(!pairs.iter().any(|(name, _)| name == "is_organisation"));
        assert_eq!(
            pairs.last(),
            Some(&("ajax_form_id".to_string(), "payments-form".to_string()))
        );
    }

    #[test]
    fn test_summary_copies_fields_and_selects_payment_type() {
        let config = PaymentsConfig::default();
        let mut model = FormModel::new(&config);
        model.set_value(PaymentField::Amount, "12");
        model.set_value(PaymentField::FirstName, "Hans");
        model.set_value(PaymentField::LastName, "Mueller");
        model.set_value(PaymentField::Iban, "DE89370400440532013000");
        model.set_value(PaymentField::DebitPeriod, "q");

        let summary = PaymentSummary::from_model(&model, &config);
        assert_eq!(summary.items.len(), 10);
        assert_eq!(summary.item(PaymentField::Amount), "12");
        assert_eq!(summary.item(PaymentField::LastName), "Mueller");
        assert_eq!(summary.item(PaymentField::City), "");
        assert!(summary.shows_payment_type(PaymentType::DirectDebit));
        assert!(!summary.shows_payment_type(PaymentType::Paypal));
        assert_eq!(summary.debit_total.as_deref(), Some("36 € quarterly"));
        assert_eq!(summary.debit_period_label.as_deref(), Some("quarterly"));
    }

    #[test]
    fn test_step_anchors() {
        assert_eq!(FormStep::PaymentDetails.anchor(), "#step3");
        assert_eq!(FormStep::from_anchor("#step4"), Some(FormStep::Summary));
        assert_eq!(FormStep::from_anchor("step1"), Some(FormStep::Amount));
        assert_eq!(FormStep::from_anchor("#step9"), None);
        assert_eq!(FormStep::Summary.next(), None);
        assert_eq!(FormStep::Amount.previous(), None);
    }

    #[test]
    fn test_field_names_round_trip_through_lookup() {
        assert_eq!(PaymentField::from_name("last_name"), Some(PaymentField::LastName));
        assert_eq!(PaymentField::from_name("ajax_form_id"), None);
    }
}
