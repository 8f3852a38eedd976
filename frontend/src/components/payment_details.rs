use shared::{FormFeedback, FormModel, PaymentField, PaymentType, PaymentsConfig};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::form_field::FormField;

#[derive(Properties, PartialEq)]
pub struct PaymentDetailsProps {
    pub config: PaymentsConfig,
    pub model: FormModel,
    pub feedback: FormFeedback,
    pub disabled: bool,
    pub on_change: Callback<(PaymentField, String)>,
}

fn fields_for(kind: PaymentType) -> &'static [PaymentField] {
    match kind {
        PaymentType::DirectDebit => &[
            PaymentField::AccountHolder,
            PaymentField::Iban,
            PaymentField::Bic,
        ],
        PaymentType::CreditCard | PaymentType::Paypal => &[],
    }
}

/// Payment method selector and its conditional-select-containers
#[function_component(PaymentDetails)]
pub fn payment_details(props: &PaymentDetailsProps) -> Html {
    let model = &props.model;
    let selected = model.value(PaymentField::PaymentType).to_string();
    let select_name = PaymentField::PaymentType.name();

    let on_select = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit((PaymentField::PaymentType, select.value()));
        })
    };

    html! {
        <div class="payment-details">
            <div class="form-group conditional-select">
                <label for="id_payment_type">{PaymentField::PaymentType.label()}</label>
                <select
                    id="id_payment_type"
                    name={select_name}
                    class={classes!(
                        "form-control",
                        props.feedback.is_missing(select_name).then_some("missing"),
                    )}
                    required=true
                    disabled={props.disabled}
                    onchange={on_select}
                >
                    {for props.config.accepted_payment_types.iter().map(|kind| html! {
                        <option value={kind.code()} selected={kind.code() == selected}>
                            {kind.label()}
                        </option>
                    })}
                </select>
            </div>

            {for props.config.accepted_payment_types.iter().map(|kind| {
                let is_selected = kind.code() == selected;
                html! {
                    <div
                        class="conditional-select-container"
                        data-select-name={select_name}
                        data-select-value={kind.code()}
                        hidden={!is_selected}
                    >
                        {for fields_for(*kind).iter().map(|field| html! {
                            <FormField
                                field={*field}
                                value={model.value(*field).to_string()}
                                required={model.is_required(*field)}
                                disabled={props.disabled}
                                missing={props.feedback.is_missing(field.name())}
                                error={props.feedback.field_error(field.name()).map(str::to_string)}
                                on_change={props.on_change.clone()}
                            />
                        })}
                    </div>
                }
            })}
        </div>
    }
}
