use dioxus::prelude::*;

use crate::ui::state::app_state::Screen;

const MENU_BUTTON_STYLE: &str =
    "display: block; width: 100%; padding: 14px; margin-bottom: 10px; background: #172554; color: #fff; border: none; border-radius: 10px; font-size: 16px; cursor: pointer;";

#[component]
pub fn HomeMenu(screen: Signal<Screen>) -> Element {
    let mut screen = screen;

    rsx! {
        div { style: "max-width: 420px; margin: 0 auto; padding: 20px;",
            h1 { style: "text-align: center; margin-bottom: 4px;", "Mikados" }
            p { style: "text-align: center; color: #555; margin-top: 0;", "ST PETER CLAVER SEMINARY OKPALA" }
            {Screen::MENU.iter().map(|target| {
                let target = *target;
                let title = target.title();
                rsx!(
                    button {
                        key: "{title}",
                        style: MENU_BUTTON_STYLE,
                        onclick: move |_| screen.set(target),
                        "{title}"
                    }
                )
            })}
            p { style: "text-align: center; color: #888; font-size: 12px; margin-top: 20px;", "For Mikados || @ All Right Reserved" }
        }
    }
}
