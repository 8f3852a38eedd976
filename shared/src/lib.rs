//! View-model of the payment form: configuration, amount slider math, field
//! catalogue with required-ness rules, summary and submission results.
//!
//! Nothing in here touches the browser, so all of it is tested natively.

mod amount;
mod config;
mod fields;
mod submission;

pub use amount::{
    format_amount, parse_amount, period_at, period_index, AmountSlider, AmountTier, DebitPeriod,
    DebitSchedule, SliderUpdate,
};
pub use config::{ConfigError, ConfigLoadError, PaymentsConfig};
pub use fields::{
    ConditionalGroup, FormModel, FormStep, InputKind, PaymentField, PaymentSummary, PaymentType,
};
pub use submission::{
    CycleOutcome, FormFeedback, PaymentErrorResponse, PaymentFailure, PaymentSuccessResponse,
    SubmissionCycle, SubmissionResult, GENERIC_ERROR_MESSAGE, UNHANDLED_SUCCESS_MESSAGE,
};
