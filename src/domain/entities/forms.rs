use serde::Serialize;
use thiserror::Error;

pub const OTP_LENGTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("OTP must be 5 digits.")]
    InvalidOtp,
    #[error("{0} must be a positive number.")]
    InvalidAmount(&'static str),
    #[error("Year must be a four-digit number.")]
    InvalidYear,
    #[error("Unknown month: {0}")]
    UnknownMonth(String),
    #[error("Unknown contribution type: {0}")]
    UnknownContributionType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// 1-based calendar number.
    pub fn number(self) -> u32 {
        Month::ALL
            .iter()
            .position(|month| *month == self)
            .map(|idx| idx as u32 + 1)
            .unwrap_or(1)
    }

    pub fn parse(value: &str) -> Option<Month> {
        let value = value.trim();
        Month::ALL
            .iter()
            .copied()
            .find(|month| month.name().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionType {
    Wedding,
    Burial,
    Ordination,
}

impl ContributionType {
    pub const ALL: [ContributionType; 3] = [
        ContributionType::Wedding,
        ContributionType::Burial,
        ContributionType::Ordination,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContributionType::Wedding => "wedding",
            ContributionType::Burial => "burial",
            ContributionType::Ordination => "ordination",
        }
    }

    pub fn parse(value: &str) -> Option<ContributionType> {
        let value = value.trim();
        ContributionType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
    }
}

pub fn parse_otp(value: &str) -> Result<u32, FormError> {
    let value = value.trim();
    if value.len() != OTP_LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormError::InvalidOtp);
    }
    value.parse::<u32>().map_err(|_| FormError::InvalidOtp)
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value.to_string())
    }
}

fn parse_positive_amount(value: &str, field: &'static str) -> Result<f64, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .ok_or(FormError::InvalidAmount(field))
}

fn parse_year(value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required("Year"));
    }
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value.to_string())
    } else {
        Err(FormError::InvalidYear)
    }
}

fn parse_month(value: &str) -> Result<Month, FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Required("Month"));
    }
    Month::parse(value).ok_or_else(|| FormError::UnknownMonth(value.trim().to_string()))
}

fn optional_text(value: &str) -> String {
    value.trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub full_name: String,
    pub fee: f64,
    pub otp: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub fee: String,
    pub otp: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegistrationRequest, FormError> {
        Ok(RegistrationRequest {
            full_name: required(&self.full_name, "Full name")?,
            fee: parse_positive_amount(&self.fee, "Fee")?,
            otp: parse_otp(&self.otp)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesPaymentRequest {
    pub full_name: String,
    pub month: Month,
    pub year: String,
    pub otp: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuesPaymentForm {
    pub full_name: String,
    pub month: String,
    pub year: String,
    pub otp: String,
}

impl DuesPaymentForm {
    pub fn validate(&self) -> Result<DuesPaymentRequest, FormError> {
        Ok(DuesPaymentRequest {
            full_name: required(&self.full_name, "Full name")?,
            month: parse_month(&self.month)?,
            year: parse_year(&self.year)?,
            otp: parse_otp(&self.otp)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevyPaymentRequest {
    pub owner_name: String,
    pub contributor_name: String,
    pub amount: f64,
    pub month: Month,
    pub year: String,
    pub otp: u32,
    pub contribution_type: ContributionType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevyPaymentForm {
    pub owner_name: String,
    pub contributor_name: String,
    pub amount: String,
    pub month: String,
    pub year: String,
    pub otp: String,
    pub contribution_type: String,
}

impl LevyPaymentForm {
    pub fn new(current_year: i32) -> Self {
        Self {
            owner_name: String::new(),
            contributor_name: String::new(),
            amount: String::new(),
            month: Month::January.name().to_string(),
            year: current_year.to_string(),
            otp: String::new(),
            contribution_type: ContributionType::Wedding.as_str().to_string(),
        }
    }

    pub fn validate(&self) -> Result<LevyPaymentRequest, FormError> {
        let owner_name = required(&self.owner_name, "Owner name")?;
        let contributor_name = required(&self.contributor_name, "Contributor name")?;
        let amount = parse_positive_amount(&self.amount, "Amount")?;
        let month = parse_month(&self.month)?;
        let year = parse_year(&self.year)?;
        let contribution_type = ContributionType::parse(&self.contribution_type).ok_or_else(
            || FormError::UnknownContributionType(self.contribution_type.trim().to_string()),
        )?;
        let otp = parse_otp(&self.otp)?;
        Ok(LevyPaymentRequest {
            owner_name,
            contributor_name,
            amount,
            month,
            year,
            otp,
            contribution_type,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuesQuery {
    pub reg_number: String,
    pub month: Month,
    pub year: String,
}

impl DuesQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("regNumber", self.reg_number.clone()),
            ("month", self.month.name().to_string()),
            ("year", self.year.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuesLookupForm {
    pub reg_number: String,
    pub month: String,
    pub year: String,
}

impl DuesLookupForm {
    pub fn new(current_year: i32) -> Self {
        Self {
            reg_number: String::new(),
            month: Month::January.name().to_string(),
            year: current_year.to_string(),
        }
    }

    pub fn validate(&self) -> Result<DuesQuery, FormError> {
        Ok(DuesQuery {
            reg_number: optional_text(&self.reg_number),
            month: parse_month(&self.month)?,
            year: parse_year(&self.year)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevyQuery {
    pub owner_name: String,
    pub contributor_name: String,
    pub month: Month,
    pub year: String,
    pub contribution_type: String,
}

impl LevyQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ownerName", self.owner_name.clone()),
            ("contributorName", self.contributor_name.clone()),
            ("month", self.month.name().to_string()),
            ("year", self.year.clone()),
            ("contributionType", self.contribution_type.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevyLookupForm {
    pub owner_name: String,
    pub contributor_name: String,
    pub month: String,
    pub year: String,
    pub contribution_type: String,
}

impl LevyLookupForm {
    pub fn new(current_year: i32) -> Self {
        Self {
            owner_name: String::new(),
            contributor_name: String::new(),
            month: Month::January.name().to_string(),
            year: current_year.to_string(),
            contribution_type: String::new(),
        }
    }

    pub fn validate(&self) -> Result<LevyQuery, FormError> {
        Ok(LevyQuery {
            owner_name: optional_text(&self.owner_name),
            contributor_name: optional_text(&self.contributor_name),
            month: parse_month(&self.month)?,
            year: parse_year(&self.year)?,
            contribution_type: optional_text(&self.contribution_type),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuesStatusQuery {
    pub year: String,
    pub reg_number: String,
}

impl DuesStatusQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("year", self.year.clone()),
            ("regNumber", self.reg_number.clone()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuesStatusForm {
    pub reg_number: String,
    pub year: String,
}

impl DuesStatusForm {
    pub fn validate(&self) -> Result<DuesStatusQuery, FormError> {
        Ok(DuesStatusQuery {
            reg_number: required(&self.reg_number, "Registration number")?,
            year: parse_year(&self.year)?,
        })
    }
}
