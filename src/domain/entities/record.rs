use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::domain::entities::forms::Month;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

/// Comparable projection of one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Date(Option<DateTime<Utc>>),
}

/// Missing numbers and dates order before every present value.
pub fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Text(left), SortValue::Text(right)) => left.cmp(right),
        (SortValue::Number(left), SortValue::Number(right)) => match (left, right) {
            (Some(left), Some(right)) => left.total_cmp(right),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        },
        (SortValue::Date(left), SortValue::Date(right)) => left.cmp(right),
        _ => Ordering::Equal,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column<K> {
    pub label: &'static str,
    pub sort_key: Option<K>,
}

pub trait TableRecord {
    type SortKey: Copy + Eq + std::fmt::Debug + Send + Sync + 'static;

    fn columns() -> Vec<Column<Self::SortKey>>;
    fn display_field(&self) -> &str;
    fn sort_value(&self, key: Self::SortKey) -> SortValue<'_>;
    fn cells(&self) -> Vec<String>;
    fn record_id(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortKey {
    Name,
    JoinedDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub full_name: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub reg_number: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl TableRecord for Member {
    type SortKey = MemberSortKey;

    fn columns() -> Vec<Column<MemberSortKey>> {
        vec![
            Column {
                label: "NAME",
                sort_key: Some(MemberSortKey::Name),
            },
            Column {
                label: "JOINED DATE",
                sort_key: Some(MemberSortKey::JoinedDate),
            },
        ]
    }

    fn display_field(&self) -> &str {
        &self.full_name
    }

    fn sort_value(&self, key: MemberSortKey) -> SortValue<'_> {
        match key {
            MemberSortKey::Name => SortValue::Text(&self.full_name),
            MemberSortKey::JoinedDate => SortValue::Date(parse_timestamp(&self.created_at)),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![self.full_name.clone(), format_joined_date(&self.created_at)]
    }

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuesSortKey {
    RegNumber,
    Amount,
    Period,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDue {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub reg_number: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    pub month: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
}

impl TableRecord for MonthlyDue {
    type SortKey = DuesSortKey;

    fn columns() -> Vec<Column<DuesSortKey>> {
        vec![
            Column {
                label: "Reg Number",
                sort_key: Some(DuesSortKey::RegNumber),
            },
            Column {
                label: "Amount",
                sort_key: Some(DuesSortKey::Amount),
            },
            Column {
                label: "Month",
                sort_key: Some(DuesSortKey::Period),
            },
            Column {
                label: "Year",
                sort_key: Some(DuesSortKey::Period),
            },
        ]
    }

    fn display_field(&self) -> &str {
        &self.reg_number
    }

    fn sort_value(&self, key: DuesSortKey) -> SortValue<'_> {
        match key {
            DuesSortKey::RegNumber => SortValue::Text(&self.reg_number),
            DuesSortKey::Amount => SortValue::Number(parse_amount(&self.amount)),
            DuesSortKey::Period => SortValue::Date(period_start(&self.year, &self.month)),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.reg_number.clone(),
            format_naira(&self.amount),
            self.month.clone(),
            self.year.clone(),
        ]
    }

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevySortKey {
    Owner,
    Contributor,
    Amount,
    Period,
    ContributionType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevyContribution {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub owner_name: String,
    pub contributor_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    pub month: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub contribution_type: String,
}

impl TableRecord for LevyContribution {
    type SortKey = LevySortKey;

    fn columns() -> Vec<Column<LevySortKey>> {
        vec![
            Column {
                label: "Owner",
                sort_key: Some(LevySortKey::Owner),
            },
            Column {
                label: "Contributor",
                sort_key: Some(LevySortKey::Contributor),
            },
            Column {
                label: "Amount",
                sort_key: Some(LevySortKey::Amount),
            },
            Column {
                label: "Month",
                sort_key: Some(LevySortKey::Period),
            },
            Column {
                label: "Year",
                sort_key: Some(LevySortKey::Period),
            },
            Column {
                label: "Type",
                sort_key: Some(LevySortKey::ContributionType),
            },
        ]
    }

    fn display_field(&self) -> &str {
        &self.contributor_name
    }

    fn sort_value(&self, key: LevySortKey) -> SortValue<'_> {
        match key {
            LevySortKey::Owner => SortValue::Text(&self.owner_name),
            LevySortKey::Contributor => SortValue::Text(&self.contributor_name),
            LevySortKey::Amount => SortValue::Number(parse_amount(&self.amount)),
            LevySortKey::Period => SortValue::Date(period_start(&self.year, &self.month)),
            LevySortKey::ContributionType => SortValue::Text(&self.contribution_type),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.owner_name.clone(),
            self.contributor_name.clone(),
            format_naira(&self.amount),
            self.month.clone(),
            self.year.clone(),
            self.contribution_type.clone(),
        ]
    }

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Paid and unpaid months of one member for one year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesStatus {
    #[serde(default)]
    pub full_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub reg_number: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub paid_months: Vec<String>,
    #[serde(default)]
    pub unpaid_months: Vec<String>,
}

impl DuesStatus {
    pub fn is_empty(&self) -> bool {
        self.paid_months.is_empty() && self.unpaid_months.is_empty()
    }

    /// Pairs paid and unpaid months side by side, padding the shorter list with blanks.
    pub fn month_rows(&self) -> Vec<(String, String)> {
        let len = self.paid_months.len().max(self.unpaid_months.len());
        (0..len)
            .map(|idx| {
                (
                    self.paid_months.get(idx).cloned().unwrap_or_default(),
                    self.unpaid_months.get(idx).cloned().unwrap_or_default(),
                )
            })
            .collect()
    }
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn format_joined_date(value: &str) -> String {
    parse_timestamp(value)
        .map(|stamp| stamp.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| value.to_string())
}

fn period_start(year: &str, month: &str) -> Option<DateTime<Utc>> {
    let year = year.trim().parse::<i32>().ok()?;
    let month = Month::parse(month)?;
    NaiveDate::from_ymd_opt(year, month.number(), 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

fn format_naira(amount: &str) -> String {
    format!("₦{amount}")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<RawScalar> for String {
    fn from(value: RawScalar) -> Self {
        match value {
            RawScalar::Text(text) => text,
            RawScalar::Int(number) => number.to_string(),
            RawScalar::Float(number) => number.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawScalar::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawScalar>::deserialize(deserializer).map(|value| value.map(String::from))
}
