use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::forms::{DuesLookupForm, DuesStatusForm, LevyLookupForm, Month};
use crate::domain::entities::record::{DuesStatus, LevyContribution, Member, MonthlyDue};
use crate::usecase::ports::api::{FetchError, MembershipApi};

pub const FETCH_SUCCESS_MESSAGE: &str = "Data fetched successfully!";
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again.";
pub const NO_RECORDS_MESSAGE: &str = "No record yet!";
pub const NO_DUES_DATA_MESSAGE: &str = "No data found";
pub const DUES_STATUS_FAILED_MESSAGE: &str = "Failed to fetch data";

#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<R> {
    pub message: String,
    pub records: Vec<R>,
}

pub struct QueryService {
    api: Arc<dyn MembershipApi>,
}

impl QueryService {
    pub fn new(api: Arc<dyn MembershipApi>) -> Self {
        Self { api }
    }

    pub fn fetch_members(&self) -> Result<Vec<Member>, FetchError> {
        self.api.fetch_members()
    }

    /// Keeps only rows for the requested month and year; the endpoint has
    /// been seen returning other periods for the same member.
    pub fn list_monthly_dues(&self, form: &DuesLookupForm) -> Result<Lookup<MonthlyDue>, String> {
        let query = form.validate().map_err(|err| err.to_string())?;
        let listing = self.api.list_monthly_dues(&query).map_err(lookup_error)?;
        let fetched = listing.records.len();
        let records: Vec<MonthlyDue> = listing
            .records
            .into_iter()
            .filter(|due| {
                Month::parse(&due.month) == Some(query.month) && due.year.trim() == query.year
            })
            .collect();
        debug!(fetched, kept = records.len(), "filtered monthly dues by period");

        Ok(Lookup {
            message: listing
                .message
                .unwrap_or_else(|| FETCH_SUCCESS_MESSAGE.to_string()),
            records,
        })
    }

    pub fn list_levies(&self, form: &LevyLookupForm) -> Result<Lookup<LevyContribution>, String> {
        let query = form.validate().map_err(|err| err.to_string())?;
        let listing = self.api.list_levies(&query).map_err(lookup_error)?;
        Ok(Lookup {
            message: listing
                .message
                .unwrap_or_else(|| FETCH_SUCCESS_MESSAGE.to_string()),
            records: listing.records,
        })
    }

    pub fn check_dues(&self, form: &DuesStatusForm) -> Result<DuesStatus, String> {
        let query = form.validate().map_err(|err| err.to_string())?;
        match self.api.check_dues(&query) {
            Ok(status) if status.is_empty() => Err(NO_DUES_DATA_MESSAGE.to_string()),
            Ok(status) => Ok(status),
            Err(err) => {
                debug!(error = %err, "dues status lookup failed");
                Err(DUES_STATUS_FAILED_MESSAGE.to_string())
            }
        }
    }
}

fn lookup_error(err: FetchError) -> String {
    match err {
        FetchError::Rejected(message) => message,
        other => {
            debug!(error = %other, "lookup failed");
            LOOKUP_FAILED_MESSAGE.to_string()
        }
    }
}
