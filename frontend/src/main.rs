mod components;
mod hooks;
mod services;

use components::payment_form::{PaymentForm, PaymentFormProps};
use components::subscription_amount_form::{SubscriptionAmountForm, SubscriptionAmountFormProps};
use services::api::ApiClient;
use services::config::load_config;
use services::logging::Logger;

/// Mount point of the multi-step payment form
const PAYMENT_FORM_ROOT: &str = "payment-form-root";
/// Mount point of the subscription amount form
const SUBSCRIPTION_FORM_ROOT: &str = "subscription-form-root";

fn main() {
    let config = load_config();
    Logger::set_endpoint(config.log_endpoint.clone());
    let api_client = ApiClient::with_base_url(config.api_base_url.clone());
    let document = gloo::utils::document();
    let mut mounted = 0;

    if let Some(root) = document.get_element_by_id(PAYMENT_FORM_ROOT) {
        yew::Renderer::<PaymentForm>::with_root_and_props(
            root,
            PaymentFormProps {
                config: config.clone(),
                api_client: api_client.clone(),
            },
        )
        .render();
        mounted += 1;
    }

    if let Some(root) = document.get_element_by_id(SUBSCRIPTION_FORM_ROOT) {
        if config.subscription_form_enabled() {
            yew::Renderer::<SubscriptionAmountForm>::with_root_and_props(
                root,
                SubscriptionAmountFormProps {
                    config: config.clone(),
                    api_client,
                },
            )
            .render();
            mounted += 1;
        } else {
            Logger::warn_with_component(
                "main",
                "Subscription form root present but no subscriptionAction configured",
            );
        }
    }

    if mounted == 0 {
        Logger::warn_with_component("main", "No payment form mount point found on this page");
    }
}
