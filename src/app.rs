use dioxus::prelude::*;

use crate::infra::config::load_config;
use crate::ui::screens::home::HomeMenu;
use crate::ui::screens::lookups::{DuesListScreen, DuesStatusScreen, LevyListScreen};
use crate::ui::screens::members::MembersScreen;
use crate::ui::screens::payments::{PayDuesScreen, PayLevyScreen, RegisterScreen};
use crate::ui::state::app_state::{AppServices, AppState, Screen};

const PAGE_STYLE: &str =
    "font-family: sans-serif; min-height: 100vh; padding: 16px; background: #f3f4f6; box-sizing: border-box;";

#[component]
pub fn App() -> Element {
    let services = use_hook(|| {
        load_config()
            .map(AppServices::new)
            .map_err(|err| format!("{err:#}"))
    });
    let AppState { mut screen } = AppState::new();

    let services = match services {
        Ok(services) => services,
        Err(err) => {
            return rsx! {
                div { style: PAGE_STYLE,
                    p { style: "color: #dc2626;", "Could not load configuration: {err}" }
                }
            };
        }
    };

    let current = screen();
    let body = match current {
        Screen::Home => rsx! { HomeMenu { screen: screen } },
        Screen::Register => rsx! { RegisterScreen { services: services.clone(), screen: screen } },
        Screen::Members => rsx! { MembersScreen { services: services.clone() } },
        Screen::PayDues => rsx! { PayDuesScreen { services: services.clone(), screen: screen } },
        Screen::ListDues => rsx! { DuesListScreen { services: services.clone() } },
        Screen::PayLevy => rsx! { PayLevyScreen { services: services.clone() } },
        Screen::ListLevies => rsx! { LevyListScreen { services: services.clone() } },
        Screen::CheckDues => rsx! { DuesStatusScreen { services: services.clone() } },
    };

    rsx! {
        div { style: PAGE_STYLE,
            if current != Screen::Home {
                button {
                    style: "margin-bottom: 12px; padding: 6px 12px; border-radius: 6px; border: 1px solid #ccc; background: #fff; cursor: pointer;",
                    onclick: move |_| screen.set(Screen::Home),
                    "‹ Back"
                }
            }
            {body}
        }
    }
}
