use thiserror::Error;

use crate::domain::entities::forms::{
    DuesPaymentRequest, DuesQuery, DuesStatusQuery, LevyPaymentRequest, LevyQuery,
    RegistrationRequest,
};
use crate::domain::entities::record::{DuesStatus, LevyContribution, Member, MonthlyDue};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// `data` is missing or is not the shape the endpoint promises.
    #[error("Unexpected response from server: {0}")]
    Shape(String),
    /// The envelope came back with `status: false`.
    #[error("{0}")]
    Rejected(String),
    #[error("{message}")]
    Status { code: u16, message: String },
    #[error("Network error. Please try again.")]
    Transport(String),
    #[error("Could not read server response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Message the server attached to the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FetchError::Rejected(message) => Some(message),
            FetchError::Status { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing<R> {
    pub message: Option<String>,
    pub records: Vec<R>,
}

pub trait MembershipApi: Send + Sync {
    fn fetch_members(&self) -> Result<Vec<Member>, FetchError>;

    fn register_member(&self, request: &RegistrationRequest) -> Result<Ack, FetchError>;
    fn pay_monthly_dues(&self, request: &DuesPaymentRequest) -> Result<Ack, FetchError>;
    fn pay_levy(&self, request: &LevyPaymentRequest) -> Result<Ack, FetchError>;

    fn list_monthly_dues(&self, query: &DuesQuery) -> Result<Listing<MonthlyDue>, FetchError>;
    fn list_levies(&self, query: &LevyQuery) -> Result<Listing<LevyContribution>, FetchError>;
    fn check_dues(&self, query: &DuesStatusQuery) -> Result<DuesStatus, FetchError>;
}
