use std::time::Duration;

use chrono::{Datelike, Local};
use dioxus::prelude::*;

use crate::domain::entities::forms::{
    DuesPaymentForm, LevyPaymentForm, RegistrationForm, OTP_LENGTH,
};
use crate::platform::desktop::blocking::run_in_background;
use crate::ui::components::fields::{
    ContributionTypeSelect, MonthSelect, OutcomeLine, TextField, CARD_STYLE, PRIMARY_BUTTON_STYLE,
};
use crate::ui::state::app_state::{AppServices, Screen, SubmissionState};

/// Successful registrations and dues payments return to the menu after this delay.
pub const RETURN_HOME_DELAY: Duration = Duration::from_secs(2);

async fn return_home_later(mut screen: Signal<Screen>) {
    tokio::time::sleep(RETURN_HOME_DELAY).await;
    screen.set(Screen::Home);
}

#[component]
fn SchoolBanner(title: &'static str) -> Element {
    rsx! {
        h1 { style: "text-align: center; margin-bottom: 4px;", "{title}" }
        p { style: "text-align: center; color: #555; margin-top: 0;", "ST PETER CLAVER SEMINARY OKPALA" }
    }
}

#[component]
pub fn RegisterScreen(services: AppServices, screen: Signal<Screen>) -> Element {
    let SubmissionState {
        mut form,
        mut busy,
        mut outcome,
    } = SubmissionState::new(RegistrationForm::default);
    let payments = services.payments.clone();
    let snapshot = form();

    rsx! {
        div { style: CARD_STYLE,
            SchoolBanner { title: "Welcome Back!" }
            TextField {
                label: "Full Name",
                value: snapshot.full_name.clone(),
                placeholder: "Username",
                on_input: move |value: String| form.write().full_name = value,
            }
            TextField {
                label: "Fee",
                value: snapshot.fee.clone(),
                placeholder: "Enter fee amount",
                input_type: "number",
                on_input: move |value: String| form.write().fee = value,
            }
            TextField {
                label: "OTP",
                value: snapshot.otp.clone(),
                placeholder: "5-digit OTP",
                on_input: move |value: String| form.write().otp = value,
            }
            OutcomeLine { outcome: outcome() }
            button {
                style: PRIMARY_BUTTON_STYLE,
                disabled: busy(),
                onclick: move |_| {
                    busy.set(true);
                    outcome.set(None);
                    let submitted = form.peek().clone();
                    let payments = payments.clone();
                    spawn(async move {
                        let Some(result) =
                            run_in_background("register member", move || payments.register(&submitted)).await
                        else {
                            return;
                        };
                        let succeeded = result.is_success();
                        outcome.set(Some(result));
                        busy.set(false);
                        if succeeded {
                            return_home_later(screen).await;
                        }
                    });
                },
                if busy() { "Registering..." } else { "Register" }
            }
            p { style: "text-align: center; color: #888; font-size: 12px;", "For Mikados students only || @ All Right Reserved" }
        }
    }
}

#[component]
pub fn PayDuesScreen(services: AppServices, screen: Signal<Screen>) -> Element {
    let SubmissionState {
        mut form,
        mut busy,
        mut outcome,
    } = SubmissionState::new(DuesPaymentForm::default);
    let payments = services.payments.clone();
    let snapshot = form();
    let otp_incomplete = snapshot.otp.trim().len() != OTP_LENGTH;

    rsx! {
        div { style: CARD_STYLE,
            SchoolBanner { title: "Monthly Dues" }
            TextField {
                label: "Full Name",
                value: snapshot.full_name.clone(),
                placeholder: "Enter your full name",
                on_input: move |value: String| form.write().full_name = value,
            }
            MonthSelect {
                value: snapshot.month.clone(),
                with_placeholder: true,
                on_change: move |value: String| form.write().month = value,
            }
            TextField {
                label: "Year",
                value: snapshot.year.clone(),
                placeholder: "Enter year",
                input_type: "number",
                on_input: move |value: String| form.write().year = value,
            }
            TextField {
                label: "OTP",
                value: snapshot.otp.clone(),
                placeholder: "5-digit OTP",
                on_input: move |value: String| form.write().otp = value,
            }
            OutcomeLine { outcome: outcome() }
            button {
                style: PRIMARY_BUTTON_STYLE,
                disabled: busy() || otp_incomplete,
                onclick: move |_| {
                    busy.set(true);
                    outcome.set(None);
                    let submitted = form.peek().clone();
                    let payments = payments.clone();
                    spawn(async move {
                        let Some(result) =
                            run_in_background("pay monthly dues", move || payments.pay_monthly_dues(&submitted)).await
                        else {
                            return;
                        };
                        let succeeded = result.is_success();
                        outcome.set(Some(result));
                        busy.set(false);
                        if succeeded {
                            return_home_later(screen).await;
                        }
                    });
                },
                if busy() { "Processing..." } else { "Pay Now" }
            }
            p { style: "text-align: center; color: #888; font-size: 12px;", "For Mikados students only || @ All Right Reserved" }
        }
    }
}

#[component]
pub fn PayLevyScreen(services: AppServices) -> Element {
    let SubmissionState {
        mut form,
        mut busy,
        mut outcome,
    } = SubmissionState::new(|| LevyPaymentForm::new(Local::now().year()));
    let payments = services.payments.clone();
    let snapshot = form();

    rsx! {
        div { style: CARD_STYLE,
            SchoolBanner { title: "Levy Contribution" }
            TextField {
                label: "Owner Name",
                value: snapshot.owner_name.clone(),
                placeholder: "Enter owner name",
                on_input: move |value: String| form.write().owner_name = value,
            }
            TextField {
                label: "Contributor Name",
                value: snapshot.contributor_name.clone(),
                placeholder: "Enter contributor name",
                on_input: move |value: String| form.write().contributor_name = value,
            }
            TextField {
                label: "Amount",
                value: snapshot.amount.clone(),
                placeholder: "Enter amount",
                input_type: "number",
                on_input: move |value: String| form.write().amount = value,
            }
            MonthSelect {
                value: snapshot.month.clone(),
                on_change: move |value: String| form.write().month = value,
            }
            TextField {
                label: "Year",
                value: snapshot.year.clone(),
                placeholder: "Enter year",
                input_type: "number",
                on_input: move |value: String| form.write().year = value,
            }
            ContributionTypeSelect {
                value: snapshot.contribution_type.clone(),
                on_change: move |value: String| form.write().contribution_type = value,
            }
            TextField {
                label: "OTP",
                value: snapshot.otp.clone(),
                placeholder: "5-digit OTP",
                on_input: move |value: String| form.write().otp = value,
            }
            OutcomeLine { outcome: outcome() }
            button {
                style: PRIMARY_BUTTON_STYLE,
                disabled: busy(),
                onclick: move |_| {
                    busy.set(true);
                    outcome.set(None);
                    let submitted = form.peek().clone();
                    let payments = payments.clone();
                    spawn(async move {
                        let result =
                            run_in_background("pay levy", move || payments.pay_levy(&submitted)).await;
                        if let Some(result) = result {
                            outcome.set(Some(result));
                        }
                        busy.set(false);
                    });
                },
                if busy() { "Processing..." } else { "Submit Contribution" }
            }
        }
    }
}
