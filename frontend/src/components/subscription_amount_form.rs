use shared::{format_amount, AmountSlider, PaymentField, PaymentsConfig, SliderUpdate};
use yew::prelude::*;

use crate::components::amount_selector::AmountSelector;
use crate::components::error_frame::ErrorFrame;
use crate::hooks::use_form_submission::{use_form_submission, FormSubmissionConfig};
use crate::services::api::ApiClient;

const COMPONENT: &str = "subscription-form";

#[derive(Properties, PartialEq)]
pub struct SubscriptionAmountFormProps {
    pub config: PaymentsConfig,
    pub api_client: ApiClient,
}

/// Changes the amount of an existing subscription.
///
/// The submit button only becomes active once the amount differs from the
/// current one.
#[function_component(SubscriptionAmountForm)]
pub fn subscription_amount_form(props: &SubscriptionAmountFormProps) -> Html {
    let config = &props.config;
    let slider = use_memo(config.clone(), |config| AmountSlider::new(config));
    let amount = use_state(|| format_amount(config.initial));
    let submit_enabled = use_state(|| false);

    let submission = use_form_submission(
        &props.api_client,
        FormSubmissionConfig {
            action: config.subscription_action.clone(),
            component: COMPONENT,
            scroll_to_top_on_failure: false,
        },
        Callback::noop(),
    );
    let disabled = submission.in_progress;

    let on_amount_change = {
        let amount = amount.clone();
        let submit_enabled = submit_enabled.clone();
        Callback::from(move |update: SliderUpdate| {
            if let Some(enabled) = update.submit_enabled {
                submit_enabled.set(enabled);
            }
            amount.set(update.text_value());
        })
    };

    let on_submit = {
        let submit = submission.submit.clone();
        let amount = amount.clone();
        let form_id = config.subscription_form_id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(vec![
                (PaymentField::Amount.name().to_string(), (*amount).clone()),
                ("ajax_form_id".to_string(), form_id.clone()),
            ]);
        })
    };

    html! {
        <form
            id={config.subscription_form_id.clone()}
            action={config.subscription_action.clone()}
            method="post"
            class={classes!("subscription-form", disabled.then_some("disabled"))}
            onsubmit={on_submit}
        >
            <ErrorFrame feedback={submission.feedback.clone()} />
            <AmountSelector
                slider={(*slider).clone()}
                id_prefix={config.subscription_form_id.clone()}
                autofocus=false
                {disabled}
                missing={submission.feedback.is_missing(PaymentField::Amount.name())}
                error={submission.feedback.field_error(PaymentField::Amount.name()).map(str::to_string)}
                on_change={on_amount_change}
            />
            <button
                type="submit"
                class={classes!("btn", "btn-primary", "enabled-on-change", (!*submit_enabled).then_some("disabled"))}
                disabled={disabled || !*submit_enabled}
            >
                {"Change amount"}
            </button>
        </form>
    }
}
