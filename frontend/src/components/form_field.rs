use shared::{InputKind, PaymentField};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub field: PaymentField,
    pub value: String,
    pub required: bool,
    pub disabled: bool,
    /// Server reported the field as missing
    #[prop_or_default]
    pub missing: bool,
    /// Server-side message rendered right after the input
    #[prop_or_default]
    pub error: Option<String>,
    pub on_change: Callback<(PaymentField, String)>,
}

/// Labelled input for one payment field, carrying the `missing`/`error` markers
#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let field = props.field;
    let id = format!("id_{}", field.name());
    let marker_classes = classes!(
        "form-control",
        props.missing.then_some("missing"),
        props.error.is_some().then_some("error"),
    );
    let error_message = match props.error.as_ref() {
        Some(message) => html! { <span class="field-error-message">{message}</span> },
        None => html! {},
    };

    match field.input_kind() {
        InputKind::Checkbox => {
            let on_change = props.on_change.clone();
            let onchange = Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let value = if input.checked() { "on" } else { "" };
                on_change.emit((field, value.to_string()));
            });

            html! {
                <div class="form-group form-check">
                    <input
                        type="checkbox"
                        id={id.clone()}
                        name={field.name()}
                        class={marker_classes}
                        checked={props.value == "on"}
                        required={props.required}
                        disabled={props.disabled}
                        {onchange}
                    />
                    {error_message}
                    <label for={id} class="form-check-label">{field.label()}</label>
                </div>
            }
        }
        kind => {
            let input_type = match kind {
                InputKind::Email => "email",
                _ => "text",
            };
            let on_change = props.on_change.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_change.emit((field, input.value()));
            });

            html! {
                <div class="form-group">
                    <label for={id.clone()}>{field.label()}</label>
                    <input
                        type={input_type}
                        id={id}
                        name={field.name()}
                        class={marker_classes}
                        value={props.value.clone()}
                        required={props.required}
                        disabled={props.disabled}
                        {oninput}
                    />
                    {error_message}
                </div>
            }
        }
    }
}
