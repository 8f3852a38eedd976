use shared::{format_amount, AmountSlider, AmountTier, SliderUpdate};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_amount_slider::use_amount_slider;

#[derive(Properties, PartialEq)]
pub struct AmountSelectorProps {
    pub slider: AmountSlider,
    /// Name of the text input inside the surrounding form
    #[prop_or(AttrValue::Static("amount"))]
    pub name: AttrValue,
    /// Prefix of the element ids, unique per form on the page
    #[prop_or(AttrValue::Static("amount"))]
    pub id_prefix: AttrValue,
    /// Take focus when first rendered
    #[prop_or(true)]
    pub autofocus: bool,
    pub disabled: bool,
    #[prop_or_default]
    pub missing: bool,
    #[prop_or_default]
    pub error: Option<String>,
    /// Incremented by the parent to move focus into the text field
    #[prop_or_default]
    pub focus_request: u32,
    pub on_change: Callback<SliderUpdate>,
}

fn tier_message(tier: AmountTier) -> &'static str {
    match tier {
        AmountTier::Low => "Every euro helps keep the platform running.",
        AmountTier::Medium => "Thank you! This covers your share of the running costs.",
        AmountTier::High => "Great! You are also supporting people who cannot pay.",
        AmountTier::VeryHigh => "Amazing! You are helping the platform grow.",
    }
}

/// Range slider bound to a numeric text field
#[function_component(AmountSelector)]
pub fn amount_selector(props: &AmountSelectorProps) -> Html {
    let text_ref = use_node_ref();
    let slider = use_amount_slider(&props.slider, text_ref.clone(), props.on_change.clone());
    let update = &slider.update;

    // Focus (without selecting) on mount when asked to, and on every parent request
    {
        let text_ref = text_ref.clone();
        let autofocus = props.autofocus;
        use_effect_with(props.focus_request, move |request| {
            if autofocus || *request > 0 {
                if let Some(input) = text_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    let on_text_input = {
        let on_raw_input = slider.on_raw_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_raw_input.emit(input.value());
        })
    };

    let on_text_change = {
        let on_raw_input = slider.on_raw_input.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_raw_input.emit(input.value());
        })
    };

    let on_text_click = Callback::from(|e: MouseEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.select();
    });

    let on_frame_click = {
        let text_ref = text_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = text_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        })
    };

    let on_slide = {
        let on_raw_input = slider.on_raw_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_raw_input.emit(input.value());
        })
    };

    let text_classes = classes!(
        "amount-input",
        props.missing.then_some("missing"),
        props.error.is_some().then_some("error"),
    );

    html! {
        <div class="payment-slider">
            <div class="amount-frame" onclick={on_frame_click}>
                <div class="slider-container">
                    <input
                        type="text"
                        id={format!("{}-value", props.id_prefix)}
                        ref={text_ref}
                        name={props.name.clone()}
                        class={text_classes}
                        inputmode="decimal"
                        value={update.text_value()}
                        required=true
                        disabled={props.disabled}
                        oninput={on_text_input}
                        onchange={on_text_change}
                        onclick={on_text_click}
                    />
                    <span class="currency">{"€"}</span>
                </div>
                {match props.error.as_ref() {
                    Some(message) => html! { <span class="field-error-message">{message}</span> },
                    None => html! {},
                }}
            </div>

            <input
                type="range"
                id={format!("{}-slider", props.id_prefix)}
                class="slider"
                aria-label="Amount"
                min={props.slider.min().to_string()}
                max={props.slider.max().to_string()}
                step={props.slider.step().to_string()}
                value={update.value.min(props.slider.max()).to_string()}
                style={update.gradient_style.clone()}
                disabled={props.disabled}
                oninput={on_slide}
            />

            <div class="slider-labels">
                <span class="min-amount-label">{format!("{} €", format_amount(props.slider.min()))}</span>
                <span class="max-amount-label">{update.max_label.clone()}</span>
            </div>

            {for AmountTier::ALL.iter().map(|tier| html! {
                <div
                    class={classes!("donation-outcome", tier.css_class())}
                    hidden={*tier != update.tier}
                >
                    {tier_message(*tier)}
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use shared::PaymentsConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[function_component(TwoSelectors)]
    fn two_selectors() -> Html {
        let slider = AmountSlider::new(&PaymentsConfig::default());
        html! {
            <>
                <AmountSelector
                    slider={slider.clone()}
                    id_prefix="payments-form"
                    disabled=false
                    on_change={Callback::noop()}
                />
                <AmountSelector
                    slider={slider}
                    id_prefix="subscription-form"
                    autofocus=false
                    disabled=false
                    on_change={Callback::noop()}
                />
            </>
        }
    }

    #[wasm_bindgen_test]
    async fn test_selectors_on_one_page_have_distinct_ids() {
        let document = gloo::utils::document();
        let root = document.create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();

        yew::Renderer::<TwoSelectors>::with_root(root.clone()).render();
        TimeoutFuture::new(10).await;

        for id in [
            "payments-form-value",
            "payments-form-slider",
            "subscription-form-value",
            "subscription-form-slider",
        ] {
            let element = document.get_element_by_id(id);
            assert!(element.is_some(), "missing #{}", id);
        }
        assert!(document.get_element_by_id("value").is_none());
    }
}
