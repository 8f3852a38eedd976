use shared::{AmountSlider, SliderUpdate};
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub struct UseAmountSliderResult {
    pub update: SliderUpdate,
    /// Feed raw values from either the range control or the text field
    pub on_raw_input: Callback<String>,
}

/// Hook keeping the amount slider and its text field in sync.
///
/// Both controls go through [`AmountSlider::apply`]. The clamped value is
/// written back into the text field directly, since a controlled input whose
/// rendered value did not change would otherwise keep showing rejected text.
/// Whenever an update asks for it, the text field is focused and its content
/// selected after rendering.
#[hook]
pub fn use_amount_slider(
    slider: &AmountSlider,
    text_ref: NodeRef,
    on_change: Callback<SliderUpdate>,
) -> UseAmountSliderResult {
    let update = use_state(|| slider.initial_update());
    let select_counter = use_mut_ref(|| 0u32);
    let select_trigger = use_state(|| 0u32);

    let on_raw_input = {
        let update = update.clone();
        let select_trigger = select_trigger.clone();
        let text_ref = text_ref.clone();

        use_callback(
            (slider.clone(), on_change),
            move |raw: String, (slider, on_change)| {
                let next = slider.apply(&raw, false);

                let text = next.text_value();
                if let Some(input) = text_ref.cast::<HtmlInputElement>() {
                    if input.value() != text {
                        input.set_value(&text);
                    }
                }

                if next.select_all {
                    let mut counter = select_counter.borrow_mut();
                    *counter += 1;
                    select_trigger.set(*counter);
                }

                on_change.emit(next.clone());
                update.set(next);
            },
        )
    };

    use_effect_with(*select_trigger, move |trigger| {
        if *trigger > 0 {
            if let Some(input) = text_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
                input.select();
            }
        }
        || ()
    });

    UseAmountSliderResult {
        update: (*update).clone(),
        on_raw_input,
    }
}
