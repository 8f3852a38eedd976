use gloo::timers::callback::Timeout;
use shared::{
    parse_amount, AmountSlider, DebitPeriod, FormModel, FormStep, PaymentField, PaymentSummary,
    PaymentsConfig, SliderUpdate,
};
use std::rc::Rc;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use crate::components::amount_selector::AmountSelector;
use crate::components::debit_period_selector::DebitPeriodSelector;
use crate::components::error_frame::ErrorFrame;
use crate::components::form_field::FormField;
use crate::components::payment_details::PaymentDetails;
use crate::components::payment_summary::PaymentSummaryView;
use crate::components::step_tabs::StepTabs;
use crate::hooks::use_form_submission::{use_form_submission, FormSubmissionConfig};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "payment-form";

/// Delay before focusing the amount field after switching back to its tab
const FOCUS_SLIDER_DELAY_MS: u32 = 200;

const PERSONAL_FIELDS: [PaymentField; 7] = [
    PaymentField::FirstName,
    PaymentField::LastName,
    PaymentField::Email,
    PaymentField::Address,
    PaymentField::PostalCode,
    PaymentField::City,
    PaymentField::Country,
];

const CONSENT_FIELDS: [PaymentField; 2] = [PaymentField::TosCheck, PaymentField::PrivacyPolicyCheck];

pub enum FormAction {
    SetValue(PaymentField, String),
    SetStep(FormStep),
    SubmissionRejected,
}

/// Reducer state around the shared view-model
#[derive(Clone, PartialEq)]
pub struct FormState {
    pub model: FormModel,
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut model = self.model.clone();
        match action {
            FormAction::SetValue(field, value) => model.set_value(field, value),
            FormAction::SetStep(step) => model.set_active_step(step),
            FormAction::SubmissionRejected => model.submission_rejected(),
        }
        Rc::new(FormState { model })
    }
}

#[derive(Properties, PartialEq)]
pub struct PaymentFormProps {
    pub config: PaymentsConfig,
    pub api_client: ApiClient,
}

/// Multi-step payment form: step navigation, required-ness, summary and submission
#[function_component(PaymentForm)]
pub fn payment_form(props: &PaymentFormProps) -> Html {
    let config = &props.config;
    let state = use_reducer(|| FormState {
        model: FormModel::new(&props.config),
    });
    let summary = use_state(|| Option::<PaymentSummary>::None);
    let focus_request = use_state(|| 0u32);
    let form_ref = use_node_ref();
    let slider = use_memo(config.clone(), |config| AmountSlider::new(config));

    let on_failure = {
        let dispatcher = state.dispatcher();
        use_callback((), move |_: (), _| {
            dispatcher.dispatch(FormAction::SubmissionRejected);
        })
    };

    let submission = use_form_submission(
        &props.api_client,
        FormSubmissionConfig {
            action: config.form_action.clone(),
            component: COMPONENT,
            ..FormSubmissionConfig::default()
        },
        on_failure,
    );
    let disabled = submission.in_progress;
    let model = &state.model;
    let feedback = &submission.feedback;

    let on_field_change = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(field, value): (PaymentField, String)| {
            if field == PaymentField::PaymentType {
                Logger::debug_with_component(
                    COMPONENT,
                    &format!("Conditional group {} switched to '{}'", field.name(), value),
                );
            }
            dispatcher.dispatch(FormAction::SetValue(field, value));
        })
    };

    let on_amount_change = {
        let dispatcher = state.dispatcher();
        Callback::from(move |update: SliderUpdate| {
            dispatcher.dispatch(FormAction::SetValue(PaymentField::Amount, update.text_value()));
        })
    };

    let on_period_change = {
        let dispatcher = state.dispatcher();
        Callback::from(move |period: DebitPeriod| {
            dispatcher.dispatch(FormAction::SetValue(
                PaymentField::DebitPeriod,
                period.code().to_string(),
            ));
        })
    };

    // Moving on to the summary requires a valid form; otherwise the browser shows
    // why, on the step holding the first empty required field
    let advance_to_summary = {
        let form_ref = form_ref.clone();
        let summary = summary.clone();
        let dispatcher = state.dispatcher();
        let model = model.clone();
        let config = config.clone();
        Callback::from(move |_: ()| {
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            if form.check_validity() {
                summary.set(Some(PaymentSummary::from_model(&model, &config)));
                dispatcher.dispatch(FormAction::SetStep(FormStep::Summary));
                Logger::info_with_component(COMPONENT, "Form valid, showing summary");
            } else {
                let missing: Vec<&str> = model
                    .missing_required()
                    .iter()
                    .map(|field| field.name())
                    .collect();
                Logger::debug_with_component(
                    COMPONENT,
                    &format!("Form invalid before summary, empty required fields: {:?}", missing),
                );
                match model.first_incomplete_step() {
                    Some(step) if step != model.active_step() => {
                        dispatcher.dispatch(FormAction::SetStep(step));
                        // report once the pane is no longer hidden
                        Timeout::new(0, move || {
                            form.report_validity();
                        })
                        .forget();
                    }
                    _ => {
                        form.report_validity();
                    }
                }
            }
        })
    };

    let on_step_select = {
        let dispatcher = state.dispatcher();
        let advance_to_summary = advance_to_summary.clone();
        let active = model.active_step();
        Callback::from(move |step: FormStep| {
            if step == active {
                return;
            }
            if step == FormStep::Summary {
                advance_to_summary.emit(());
                return;
            }
            Logger::debug_with_component(COMPONENT, &format!("Showing step {}", step.anchor()));
            dispatcher.dispatch(FormAction::SetStep(step));
        })
    };

    let on_change_amount = {
        let dispatcher = state.dispatcher();
        let focus_request = focus_request.clone();
        Callback::from(move |_: ()| {
            dispatcher.dispatch(FormAction::SetStep(FormStep::Amount));
            let focus_request = focus_request.clone();
            Timeout::new(FOCUS_SLIDER_DELAY_MS, move || {
                focus_request.set(*focus_request + 1);
            })
            .forget();
        })
    };

    let on_submit = {
        let submit = submission.submit.clone();
        let model = model.clone();
        let form_id = config.form_id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(model.serialize(&form_id));
        })
    };

    let step_button = |label: &'static str, target: Option<FormStep>, class: &'static str| -> Html {
        match target {
            Some(step) => {
                let on_step_select = on_step_select.clone();
                let onclick = Callback::from(move |_: MouseEvent| on_step_select.emit(step));
                html! {
                    <button type="button" class={classes!("btn", class)} {disabled} {onclick}>
                        {label}
                    </button>
                }
            }
            None => html! {},
        }
    };

    let field_props = |field: PaymentField| {
        html! {
            <FormField
                {field}
                value={model.value(field).to_string()}
                required={model.is_required(field)}
                {disabled}
                missing={feedback.is_missing(field.name())}
                error={feedback.field_error(field.name()).map(str::to_string)}
                on_change={on_field_change.clone()}
            />
        }
    };

    let active = model.active_step();
    let pane_classes = |step: FormStep| classes!("tab-pane", (step == active).then_some("active"));
    let amount = parse_amount(model.value(PaymentField::Amount)).unwrap_or(config.initial);
    let period = model.debit_period().unwrap_or(DebitPeriod::Monthly);

    html! {
        <form
            id={config.form_id.clone()}
            action={config.form_action.clone()}
            method="post"
            class={classes!("payments-form", disabled.then_some("disabled"))}
            ref={form_ref}
            onsubmit={on_submit}
        >
            <ErrorFrame feedback={feedback.clone()} />

            <StepTabs active={active} {disabled} on_select={on_step_select.clone()} />

            <div class="tab-content">
                <div id={FormStep::Amount.pane_id()} class={pane_classes(FormStep::Amount)} hidden={active != FormStep::Amount}>
                    <AmountSelector
                        slider={(*slider).clone()}
                        id_prefix={config.form_id.clone()}
                        {disabled}
                        missing={feedback.is_missing(PaymentField::Amount.name())}
                        error={feedback.field_error(PaymentField::Amount.name()).map(str::to_string)}
                        focus_request={*focus_request}
                        on_change={on_amount_change}
                    />
                    <DebitPeriodSelector
                        config={config.clone()}
                        {amount}
                        {period}
                        {disabled}
                        on_change={on_period_change}
                    />
                    {step_button("Next", FormStep::Amount.next(), "btn-primary")}
                </div>

                <div id={FormStep::PersonalData.pane_id()} class={pane_classes(FormStep::PersonalData)} hidden={active != FormStep::PersonalData}>
                    {for PERSONAL_FIELDS.iter().map(|field| field_props(*field))}
                    {field_props(PaymentField::IsOrganisation)}
                    {if model.is_checked(PaymentField::IsOrganisation) {
                        field_props(PaymentField::Organisation)
                    } else { html! {} }}
                    {step_button("Back", FormStep::PersonalData.previous(), "btn-secondary")}
                    {step_button("Next", FormStep::PersonalData.next(), "btn-primary")}
                </div>

                <div id={FormStep::PaymentDetails.pane_id()} class={pane_classes(FormStep::PaymentDetails)} hidden={active != FormStep::PaymentDetails}>
                    <PaymentDetails
                        config={config.clone()}
                        model={model.clone()}
                        feedback={feedback.clone()}
                        {disabled}
                        on_change={on_field_change.clone()}
                    />
                    {step_button("Back", FormStep::PaymentDetails.previous(), "btn-secondary")}
                    {step_button("Continue to summary", FormStep::PaymentDetails.next(), "btn-primary to-step4-button")}
                </div>

                <div id={FormStep::Summary.pane_id()} class={pane_classes(FormStep::Summary)} hidden={active != FormStep::Summary}>
                    <PaymentSummaryView summary={(*summary).clone()} on_change_amount={on_change_amount} />
                    <div data-only-required-step={FormStep::Summary.anchor()}>
                        {for CONSENT_FIELDS.iter().map(|field| field_props(*field))}
                    </div>
                    {step_button("Back", FormStep::Summary.previous(), "btn-secondary")}
                    <button type="submit" class="btn btn-primary submit-payment" {disabled}>
                        {if disabled { "Processing payment..." } else { "Confirm payment" }}
                    </button>
                </div>
            </div>
        </form>
    }
}
