pub mod use_amount_slider;
pub mod use_form_submission;
