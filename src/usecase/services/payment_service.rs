use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::forms::{DuesPaymentForm, LevyPaymentForm, RegistrationForm};
use crate::usecase::ports::api::{
    Ack, FetchError, MembershipApi, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE,
};
use crate::usecase::services::outcome::Outcome;

pub const INVALID_OTP_MESSAGE: &str = "Invalid OTP. Please try again.";
pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful!";
pub const DUES_SUCCESS_MESSAGE: &str = "Payment successful!";
pub const LEVY_SUCCESS_MESSAGE: &str = "Contribution was successful!";

pub struct PaymentService {
    api: Arc<dyn MembershipApi>,
}

impl PaymentService {
    pub fn new(api: Arc<dyn MembershipApi>) -> Self {
        Self { api }
    }

    pub fn register(&self, form: &RegistrationForm) -> Outcome {
        match form.validate() {
            Ok(request) => submission_outcome(
                self.api.register_member(&request),
                REGISTRATION_SUCCESS_MESSAGE,
            ),
            Err(err) => {
                debug!(error = %err, "registration form rejected");
                Outcome::Error(err.to_string())
            }
        }
    }

    pub fn pay_monthly_dues(&self, form: &DuesPaymentForm) -> Outcome {
        match form.validate() {
            Ok(request) => {
                submission_outcome(self.api.pay_monthly_dues(&request), DUES_SUCCESS_MESSAGE)
            }
            Err(err) => {
                debug!(error = %err, "dues payment form rejected");
                Outcome::Error(err.to_string())
            }
        }
    }

    pub fn pay_levy(&self, form: &LevyPaymentForm) -> Outcome {
        match form.validate() {
            Ok(request) => submission_outcome(self.api.pay_levy(&request), LEVY_SUCCESS_MESSAGE),
            Err(err) => {
                debug!(error = %err, "levy payment form rejected");
                Outcome::Error(err.to_string())
            }
        }
    }
}

fn mentions_invalid_otp(message: &str) -> bool {
    message.to_lowercase().contains("invalid otp")
}

/// The API can report a bad OTP inside a 2xx body, so the acknowledgement
/// message is checked as well as the error paths.
pub fn submission_outcome(result: Result<Ack, FetchError>, success_message: &str) -> Outcome {
    match result {
        Ok(ack) if ack.message.as_deref().is_some_and(mentions_invalid_otp) => {
            Outcome::Error(INVALID_OTP_MESSAGE.to_string())
        }
        Ok(_) => Outcome::Success(success_message.to_string()),
        Err(err) => Outcome::Error(submission_error_message(&err)),
    }
}

fn submission_error_message(err: &FetchError) -> String {
    match err.server_message() {
        Some(message) if mentions_invalid_otp(message) => INVALID_OTP_MESSAGE.to_string(),
        Some(message) => message.to_string(),
        None => match err {
            FetchError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        },
    }
}
