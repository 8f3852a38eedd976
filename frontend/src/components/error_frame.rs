use shared::FormFeedback;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorFrameProps {
    pub feedback: FormFeedback,
}

/// General error panel plus the banner for successful responses without a redirect
#[function_component(ErrorFrame)]
pub fn error_frame(props: &ErrorFrameProps) -> Html {
    let feedback = &props.feedback;

    html! {
        <>
            <div class="error-frame form-message error" hidden={!feedback.shows_error_frame()}>
                <p class="error-message">
                    {feedback.error_message.clone().unwrap_or_default()}
                </p>
            </div>
            {if let Some(message) = feedback.unhandled_success.as_ref() {
                html! {
                    <div class="unhandled-success-banner form-message warning" role="alert">
                        {message}
                    </div>
                }
            } else { html! {} }}
        </>
    }
}
