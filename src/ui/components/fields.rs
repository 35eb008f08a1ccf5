use dioxus::prelude::*;

use crate::domain::entities::forms::{ContributionType, Month};
use crate::usecase::services::outcome::Outcome;

pub const FIELD_STYLE: &str =
    "width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 8px; box-sizing: border-box;";
pub const PRIMARY_BUTTON_STYLE: &str =
    "width: 100%; padding: 10px; margin-top: 12px; background: #172554; color: #fff; border: none; border-radius: 8px; font-weight: 600; cursor: pointer;";
pub const CARD_STYLE: &str =
    "max-width: 460px; margin: 0 auto; padding: 20px; background: #fff; border-radius: 10px; box-shadow: 0 6px 18px rgba(0,0,0,0.12);";

#[component]
pub fn TextField(
    label: &'static str,
    value: String,
    placeholder: &'static str,
    #[props(default = "text")] input_type: &'static str,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div { style: "margin-bottom: 10px;",
            label { style: "display: block; font-size: 14px; margin-bottom: 4px;", "{label}" }
            input {
                style: FIELD_STYLE,
                r#type: input_type,
                value: value,
                placeholder: placeholder,
                oninput: move |event| on_input.call(event.value()),
            }
        }
    }
}

#[component]
pub fn MonthSelect(
    value: String,
    #[props(default = false)] with_placeholder: bool,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        div { style: "margin-bottom: 10px;",
            label { style: "display: block; font-size: 14px; margin-bottom: 4px;", "Month" }
            select {
                style: FIELD_STYLE,
                value: value.clone(),
                onchange: move |event| on_change.call(event.value()),
                if with_placeholder {
                    option { value: "", "Select Month" }
                }
                {Month::ALL.iter().map(|month| {
                    let name = month.name();
                    rsx!(
                        option { key: "{name}", value: name, selected: value == name, "{name}" }
                    )
                })}
            }
        }
    }
}

#[component]
pub fn ContributionTypeSelect(
    value: String,
    #[props(default = false)] with_any: bool,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        div { style: "margin-bottom: 10px;",
            label { style: "display: block; font-size: 14px; margin-bottom: 4px;", "Contribution Type" }
            select {
                style: FIELD_STYLE,
                value: value.clone(),
                onchange: move |event| on_change.call(event.value()),
                if with_any {
                    option { value: "", "Any type" }
                }
                {ContributionType::ALL.iter().map(|kind| {
                    let name = kind.as_str();
                    rsx!(
                        option { key: "{name}", value: name, selected: value == name, "{name}" }
                    )
                })}
            }
        }
    }
}

#[component]
pub fn OutcomeLine(outcome: Option<Outcome>) -> Element {
    let Some(outcome) = outcome else {
        return rsx! {};
    };
    let color = if outcome.is_success() { "#15803d" } else { "#dc2626" };
    let message = outcome.message().to_string();

    rsx! {
        p { style: "color: {color}; text-align: center; font-weight: 600;", "{message}" }
    }
}
