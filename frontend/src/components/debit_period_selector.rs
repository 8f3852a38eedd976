use shared::{period_at, period_index, DebitPeriod, DebitSchedule, PaymentField, PaymentsConfig};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DebitPeriodSelectorProps {
    pub config: PaymentsConfig,
    /// Current monthly amount
    pub amount: f64,
    pub period: DebitPeriod,
    pub disabled: bool,
    pub on_change: Callback<DebitPeriod>,
}

/// Discrete slider over the allowed debit periods, with the derived total per debit
#[function_component(DebitPeriodSelector)]
pub fn debit_period_selector(props: &DebitPeriodSelectorProps) -> Html {
    let config = &props.config;
    let index = period_index(config, props.period);
    let last_index = config.periods.len().saturating_sub(1);
    let schedule = DebitSchedule::new(props.amount, props.period, config);

    let on_slide = {
        let config = config.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let index = input.value().parse::<usize>().unwrap_or(0);
            on_change.emit(period_at(&config, index));
        })
    };

    html! {
        <div class="debit-period-slider">
            <input type="hidden" name={PaymentField::DebitPeriod.name()} value={props.period.code()} />
            <input
                type="range"
                id="debit-period-slider"
                class="slider"
                aria-label="Debit period"
                min="0"
                max={last_index.to_string()}
                step="1"
                value={index.to_string()}
                disabled={props.disabled || last_index == 0}
                oninput={on_slide}
            />
            <div class="debit-period-labels">
                {for config.periods.iter().map(|period| html! {
                    <span class={classes!("debit-period-label", (*period == props.period).then_some("active"))}>
                        {config.label_for(*period)}
                    </span>
                })}
            </div>
            <p class="debit-total">
                {format!("You will be debited {}", schedule.describe(config))}
            </p>
        </div>
    }
}
