use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::entities::forms::{
    DuesPaymentRequest, DuesQuery, DuesStatusQuery, LevyPaymentRequest, LevyQuery,
    RegistrationRequest,
};
use crate::domain::entities::record::{DuesStatus, LevyContribution, Member, MonthlyDue};
use crate::infra::config::AppConfig;
use crate::infra::http::envelope::{
    envelope_message, interpret_response, object_from_envelope, optional_records_from_envelope,
    records_from_envelope,
};
use crate::usecase::ports::api::{Ack, FetchError, Listing, MembershipApi};

/// Blocking client for the association's JSON API.
///
/// A fresh `reqwest` client is built per call so that it is created and
/// dropped on the blocking-pool thread started by `run_in_background`, never
/// on a runtime worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpApi {
    base_url: String,
    timeout: Duration,
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/mikados/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn client(&self) -> Result<Client, FetchError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))
    }

    fn get(&self, path: &str, params: &[(&'static str, String)]) -> Result<Value, FetchError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = self
            .client()?
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(params)
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        read_envelope(response).inspect_err(|err| warn!(%url, error = %err, "GET failed"))
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, FetchError> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let response = self
            .client()?
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        read_envelope(response).inspect_err(|err| warn!(%url, error = %err, "POST failed"))
    }
}

fn read_envelope(response: Response) -> Result<Value, FetchError> {
    let code = response.status().as_u16();
    let text = response
        .text()
        .map_err(|err| FetchError::Transport(err.to_string()))?;
    interpret_response(code, &text)
}

fn ack(body: &Value) -> Ack {
    Ack {
        message: envelope_message(body),
    }
}

impl MembershipApi for HttpApi {
    fn fetch_members(&self) -> Result<Vec<Member>, FetchError> {
        let body = self.get("all", &[])?;
        let members = records_from_envelope::<Member>(&body)
            .inspect_err(|err| warn!(error = %err, "member list has unexpected shape"))?;
        info!(count = members.len(), "fetched members");
        Ok(members)
    }

    fn register_member(&self, request: &RegistrationRequest) -> Result<Ack, FetchError> {
        let body = self.post("register", request)?;
        info!(full_name = %request.full_name, "registration submitted");
        Ok(ack(&body))
    }

    fn pay_monthly_dues(&self, request: &DuesPaymentRequest) -> Result<Ack, FetchError> {
        let body = self.post("monthly-dues/pay", request)?;
        info!(
            full_name = %request.full_name,
            month = request.month.name(),
            year = %request.year,
            "monthly dues payment submitted"
        );
        Ok(ack(&body))
    }

    fn pay_levy(&self, request: &LevyPaymentRequest) -> Result<Ack, FetchError> {
        let body = self.post("levy-contributions/pay", request)?;
        info!(
            owner = %request.owner_name,
            contribution_type = request.contribution_type.as_str(),
            "levy contribution submitted"
        );
        Ok(ack(&body))
    }

    fn list_monthly_dues(&self, query: &DuesQuery) -> Result<Listing<MonthlyDue>, FetchError> {
        let body = self.get("monthly-dues", &query.params())?;
        let records = optional_records_from_envelope::<MonthlyDue>(&body)?;
        info!(count = records.len(), "fetched monthly dues");
        Ok(Listing {
            message: envelope_message(&body),
            records,
        })
    }

    fn list_levies(&self, query: &LevyQuery) -> Result<Listing<LevyContribution>, FetchError> {
        let body = self.get("levy-contributions", &query.params())?;
        let records = optional_records_from_envelope::<LevyContribution>(&body)?;
        info!(count = records.len(), "fetched levy contributions");
        Ok(Listing {
            message: envelope_message(&body),
            records,
        })
    }

    fn check_dues(&self, query: &DuesStatusQuery) -> Result<DuesStatus, FetchError> {
        let body = self.get("check-monthly-dues", &query.params())?;
        object_from_envelope::<DuesStatus>(&body)
    }
}
