use shared::FormStep;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StepTabsProps {
    pub active: FormStep,
    pub disabled: bool,
    pub on_select: Callback<FormStep>,
}

#[function_component(StepTabs)]
pub fn step_tabs(props: &StepTabsProps) -> Html {
    html! {
        <ul class="nav nav-tabs payment-steps" role="tablist">
            {for FormStep::ALL.iter().map(|step| {
                let step = *step;
                let onclick = {
                    let on_select = props.on_select.clone();
                    let disabled = props.disabled;
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        if !disabled {
                            on_select.emit(step);
                        }
                    })
                };
                html! {
                    <li class={classes!("nav-item", (step == props.active).then_some("active"))}>
                        <a
                            href={step.anchor()}
                            data-toggle="tab"
                            role="tab"
                            aria-selected={(step == props.active).to_string()}
                            {onclick}
                        >
                            {step.title()}
                        </a>
                    </li>
                }
            })}
        </ul>
    }
}
