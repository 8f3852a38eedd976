pub mod amount_selector;
pub mod debit_period_selector;
pub mod error_frame;
pub mod form_field;
pub mod payment_details;
pub mod payment_form;
pub mod payment_summary;
pub mod step_tabs;
pub mod subscription_amount_form;
