use shared::{PaymentField, PaymentSummary, PaymentType};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaymentSummaryProps {
    pub summary: Option<PaymentSummary>,
    /// "Change amount" link; jumps back to the slider and focuses it
    pub on_change_amount: Callback<()>,
}

fn payment_type_text(kind: PaymentType) -> &'static str {
    match kind {
        PaymentType::DirectDebit => {
            "The amount will be collected from the account above by SEPA direct debit. \
             You will receive the mandate reference by email."
        }
        PaymentType::CreditCard => "You will be asked for your card details after confirming.",
        PaymentType::Paypal => "You will be forwarded to PayPal after confirming.",
    }
}

#[function_component(PaymentSummaryView)]
pub fn payment_summary_view(props: &PaymentSummaryProps) -> Html {
    let on_change_amount = {
        let on_change_amount = props.on_change_amount.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_change_amount.emit(());
        })
    };

    let item = |field: PaymentField| -> String {
        props
            .summary
            .as_ref()
            .map(|summary| summary.item(field).to_string())
            .unwrap_or_default()
    };

    html! {
        <div class="payment-summary">
            <dl class="summary-items">
                {for PaymentField::SUMMARY.iter().map(|field| html! {
                    <>
                        <dt>{field.label()}</dt>
                        <dd data-summary-item={field.name()}>
                            {item(*field)}
                            {if *field == PaymentField::Amount {
                                html! { <span class="summary-currency">{" €"}</span> }
                            } else { html! {} }}
                        </dd>
                    </>
                })}
            </dl>

            {match props.summary.as_ref().and_then(|summary| summary.debit_total.clone()) {
                Some(total) => html! { <p class="summary-debit-total">{total}</p> },
                None => html! {},
            }}

            <a href="#step1" class="focus-slider-onclick" onclick={on_change_amount}>
                {"Change amount"}
            </a>

            {for PaymentType::ALL.iter().map(|kind| {
                let visible = props
                    .summary
                    .as_ref()
                    .map(|summary| summary.shows_payment_type(*kind))
                    .unwrap_or(false);
                html! {
                    <div data-summary-payment-type={kind.code()} hidden={!visible}>
                        <h4>{kind.label()}</h4>
                        <p>{payment_type_text(*kind)}</p>
                    </div>
                }
            })}
        </div>
    }
}
