use crate::wizard::Step;
use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Advisory validation message next to a field; renders nothing when the
/// field passes.
pub fn field_error(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class="field-error" { (message) }
        }
    }
}

/// The 1..5 wizard progress strip.
pub fn step_progress(current: Step) -> Markup {
    html! {
        ol class="step-progress" {
            @for step in Step::ALL {
                li class=(if step == current { "step active" } else { "step" }) {
                    span class="step-number" { (step.number()) }
                    span class="step-title" { (step.title()) }
                }
            }
        }
    }
}
