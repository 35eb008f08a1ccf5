use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;

use crate::domain::entities::forms::{
    parse_otp, ContributionType, DuesLookupForm, DuesPaymentForm, DuesPaymentRequest, DuesQuery,
    DuesStatusForm, DuesStatusQuery, FormError, LevyLookupForm, LevyPaymentForm,
    LevyPaymentRequest, LevyQuery, Month, RegistrationForm, RegistrationRequest,
};
use crate::domain::entities::record::{
    format_joined_date, DuesSortKey, DuesStatus, LevyContribution, LevySortKey, Member,
    MemberSortKey, MonthlyDue, SortDirection, TableRecord,
};
use crate::domain::table_view::{
    clamp_page, page_count, page_slice, visible_set, LoadState, TableNotice, TableView,
};
use crate::infra::config::{load_config_from, AppConfig, API_URL_ENV, PAGE_SIZE_ENV};
use crate::infra::export::csv::export_visible_to_csv;
use crate::infra::http::client::HttpApi;
use crate::infra::http::envelope::{
    interpret_response, object_from_envelope, optional_records_from_envelope,
    records_from_envelope,
};
use crate::platform::desktop::blocking::{run_blocking, run_in_background};
use crate::ui::components::table::{notice_message, sort_key_at, table_model};
use crate::ui::state::app_state::{AppServices, Screen};
use crate::usecase::ports::api::{
    Ack, FetchError, Listing, MembershipApi, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE,
};
use crate::usecase::services::outcome::Outcome;
use crate::usecase::services::payment_service::{
    submission_outcome, PaymentService, DUES_SUCCESS_MESSAGE, INVALID_OTP_MESSAGE,
    LEVY_SUCCESS_MESSAGE, REGISTRATION_SUCCESS_MESSAGE,
};
use crate::usecase::services::query_service::{
    QueryService, DUES_STATUS_FAILED_MESSAGE, FETCH_SUCCESS_MESSAGE, LOOKUP_FAILED_MESSAGE,
    NO_DUES_DATA_MESSAGE,
};
use crate::*;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("mikados-{prefix}-{nanos}"))
}

fn member(id: &str, name: &str, created_at: &str) -> Member {
    Member {
        id: Some(id.to_string()),
        full_name: name.to_string(),
        reg_number: None,
        created_at: created_at.to_string(),
    }
}

fn numbered_members(count: usize) -> Vec<Member> {
    (0..count)
        .map(|idx| {
            member(
                &format!("m{idx}"),
                &format!("Member {idx:02}"),
                "2024-01-01T00:00:00Z",
            )
        })
        .collect()
}

fn due(reg: &str, amount: &str, month: &str, year: &str) -> MonthlyDue {
    MonthlyDue {
        id: None,
        reg_number: reg.to_string(),
        amount: amount.to_string(),
        month: month.to_string(),
        year: year.to_string(),
    }
}

fn names(view: &TableView<Member>) -> Vec<String> {
    view.visible()
        .iter()
        .map(|row| row.record.full_name.clone())
        .collect()
}

#[derive(Default)]
struct FakeApi {
    members: Option<Result<Vec<Member>, FetchError>>,
    ack: Option<Result<Ack, FetchError>>,
    dues: Option<Result<Listing<MonthlyDue>, FetchError>>,
    levies: Option<Result<Listing<LevyContribution>, FetchError>>,
    status: Option<Result<DuesStatus, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn record(&self, call: &str) {
        self.calls
            .lock()
            .expect("calls lock should not be poisoned")
            .push(call.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls lock should not be poisoned")
            .clone()
    }

    fn ack(&self) -> Result<Ack, FetchError> {
        self.ack.clone().unwrap_or_else(|| Ok(Ack::default()))
    }
}

impl MembershipApi for FakeApi {
    fn fetch_members(&self) -> Result<Vec<Member>, FetchError> {
        self.record("fetch_members");
        self.members.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn register_member(&self, request: &RegistrationRequest) -> Result<Ack, FetchError> {
        self.record(&format!("register:{}", request.full_name));
        self.ack()
    }

    fn pay_monthly_dues(&self, request: &DuesPaymentRequest) -> Result<Ack, FetchError> {
        self.record(&format!("dues:{}:{}", request.full_name, request.month.name()));
        self.ack()
    }

    fn pay_levy(&self, request: &LevyPaymentRequest) -> Result<Ack, FetchError> {
        self.record(&format!("levy:{}", request.contribution_type.as_str()));
        self.ack()
    }

    fn list_monthly_dues(&self, query: &DuesQuery) -> Result<Listing<MonthlyDue>, FetchError> {
        self.record(&format!("list_dues:{}", query.month.name()));
        self.dues.clone().unwrap_or_else(|| {
            Ok(Listing {
                message: None,
                records: Vec::new(),
            })
        })
    }

    fn list_levies(&self, query: &LevyQuery) -> Result<Listing<LevyContribution>, FetchError> {
        self.record(&format!("list_levies:{}", query.year));
        self.levies.clone().unwrap_or_else(|| {
            Ok(Listing {
                message: None,
                records: Vec::new(),
            })
        })
    }

    fn check_dues(&self, query: &DuesStatusQuery) -> Result<DuesStatus, FetchError> {
        self.record(&format!("check_dues:{}", query.reg_number));
        self.status
            .clone()
            .unwrap_or_else(|| Err(FetchError::Transport("offline".to_string())))
    }
}

fn payments_with(api: FakeApi) -> (Arc<FakeApi>, PaymentService) {
    let api = Arc::new(api);
    (api.clone(), PaymentService::new(api))
}

fn queries_with(api: FakeApi) -> (Arc<FakeApi>, QueryService) {
    let api = Arc::new(api);
    (api.clone(), QueryService::new(api))
}

fn valid_dues_form() -> DuesPaymentForm {
    DuesPaymentForm {
        full_name: "Chinedu Okafor".to_string(),
        month: "March".to_string(),
        year: "2024".to_string(),
        otp: "12345".to_string(),
    }
}

#[test]
fn filter_keeps_only_case_insensitive_substring_matches() {
    let records = vec![
        member("1", "Ada Obi", ""),
        member("2", "Ngozi Adaeze", ""),
        member("3", "Chika Eze", ""),
    ];

    let visible = visible_set(&records, "ADA", None);
    let matched: Vec<&str> = visible.iter().map(|row| row.record.display_field()).collect();

    assert_eq!(matched, vec!["Ada Obi", "Ngozi Adaeze"]);
    for row in &visible {
        assert!(row.record.full_name.to_lowercase().contains("ada"));
    }
}

#[test]
fn empty_filter_keeps_fetch_order() {
    let records = vec![
        member("1", "Zed", ""),
        member("2", "Amy", ""),
        member("3", "Kay", ""),
    ];
    let view = TableView::with_records(10, records);

    assert_eq!(names(&view), vec!["Zed", "Amy", "Kay"]);
    assert!(view.sort().is_none(), "no sort should be active initially");
}

#[test]
fn sorting_same_key_twice_reverses_order() {
    let records = vec![
        member("1", "Bola", ""),
        member("2", "Ada", ""),
        member("3", "Chika", ""),
        member("4", "Ada", ""),
    ];
    let mut view = TableView::with_records(10, records);

    view.set_sort(MemberSortKey::Name);
    let ascending: Vec<usize> = view.visible().iter().map(|row| row.position).collect();
    assert_eq!(
        view.sort().map(|spec| spec.direction),
        Some(SortDirection::Asc)
    );

    view.set_sort(MemberSortKey::Name);
    let descending: Vec<usize> = view.visible().iter().map(|row| row.position).collect();
    assert_eq!(
        view.sort().map(|spec| spec.direction),
        Some(SortDirection::Desc)
    );

    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
    assert_eq!(ascending, vec![1, 3, 0, 2]);
}

#[test]
fn sorting_a_new_key_starts_ascending() {
    let mut view = TableView::with_records(10, numbered_members(3));
    view.set_sort(MemberSortKey::Name);
    view.set_sort(MemberSortKey::Name);
    view.set_sort(MemberSortKey::JoinedDate);

    let spec = view.sort().expect("sort should be set");
    assert_eq!(spec.key, MemberSortKey::JoinedDate);
    assert_eq!(spec.direction, SortDirection::Asc);
}

#[test]
fn sorting_by_joined_date_orders_chronologically() {
    let records = vec![
        member("a", "Late", "2024-03-01T10:00:00.000Z"),
        member("b", "Early", "2023-11-15T08:30:00.000Z"),
        member("c", "Middle", "2024-01-20T12:00:00.000Z"),
    ];
    let mut view = TableView::with_records(10, records);

    view.set_sort(MemberSortKey::JoinedDate);
    assert_eq!(names(&view), vec!["Early", "Middle", "Late"]);

    view.set_sort(MemberSortKey::JoinedDate);
    assert_eq!(names(&view), vec!["Late", "Middle", "Early"]);
}

#[test]
fn sort_persists_across_filter_changes() {
    let records = vec![
        member("1", "Ada Zed", ""),
        member("2", "Ada Amy", ""),
        member("3", "Bola", ""),
    ];
    let mut view = TableView::with_records(10, records);
    view.set_sort(MemberSortKey::Name);
    view.set_filter("ada");

    assert_eq!(names(&view), vec!["Ada Amy", "Ada Zed"]);
}

#[test]
fn twenty_five_records_make_three_pages() {
    let mut view = TableView::with_records(10, numbered_members(25));

    assert_eq!(view.page_count(), 3);
    let first = view.get_page();
    assert_eq!(first.rows.len(), 10);
    assert_eq!(first.total, 25);

    view.set_page(3);
    let last = view.get_page();
    assert_eq!(last.page, 3);
    assert_eq!(last.rows.len(), 5);
    assert_eq!(last.rows[0].record.full_name, "Member 20");
}

#[test]
fn page_requests_are_clamped() {
    let mut view = TableView::with_records(10, numbered_members(25));
    let count = view.page_count();

    view.set_page(count + 5);
    assert_eq!(view.page(), count);

    view.set_page(0);
    assert_eq!(view.page(), 1);

    view.set_page(count);
    let at_last: Vec<usize> = view.get_page().rows.iter().map(|row| row.position).collect();
    view.set_page(count + 5);
    let past_last: Vec<usize> = view.get_page().rows.iter().map(|row| row.position).collect();
    assert_eq!(at_last, past_last);
}

#[test]
fn changing_filter_resets_to_first_page() {
    let mut view = TableView::with_records(10, numbered_members(25));
    view.set_page(3);
    assert_eq!(view.page(), 3);

    view.set_filter("Member 2");
    assert_eq!(view.page(), 1);
    assert_eq!(view.visible_len(), 5);
}

#[test]
fn paging_helpers_handle_edges() {
    assert_eq!(page_count(0, 10), 0);
    assert_eq!(page_count(10, 10), 1);
    assert_eq!(page_count(11, 10), 2);
    assert_eq!(clamp_page(7, 0), 1);
    assert_eq!(clamp_page(0, 4), 1);
    assert_eq!(clamp_page(9, 4), 4);

    let items: Vec<u32> = (1..=12).collect();
    assert_eq!(page_slice(&items, 2, 5), &[6, 7, 8, 9, 10]);
    assert_eq!(page_slice(&items, 3, 5), &[11, 12]);
    assert!(page_slice(&items, 4, 5).is_empty());
}

#[test]
fn reload_clamps_page_to_smaller_record_set() {
    let mut view = TableView::with_records(10, numbered_members(25));
    view.set_page(3);

    view.load(Ok::<_, String>(numbered_members(4)));

    assert_eq!(view.page(), 1);
    assert_eq!(view.get_page().rows.len(), 4);
}

#[test]
fn refetch_keeps_page_filter_and_sort() {
    let mut view = TableView::with_records(10, numbered_members(25));
    view.set_sort(MemberSortKey::Name);
    view.set_page(3);

    view.begin_loading();
    assert_eq!(view.notice(), Some(TableNotice::Loading));
    view.load(Ok::<_, String>(numbered_members(25)));

    assert_eq!(view.page(), 3);
    assert_eq!(view.get_page().rows.len(), 5);
    assert_eq!(view.sort().map(|spec| spec.key), Some(MemberSortKey::Name));

    view.set_filter("member 1");
    view.begin_loading();
    view.load(Ok::<_, String>(numbered_members(25)));
    assert_eq!(view.filter(), "member 1");
    assert_eq!(view.page(), 1);
}

#[test]
fn non_array_data_leaves_empty_failed_table() {
    let body = json!({ "status": true, "data": "not-an-array" });
    let result = records_from_envelope::<Member>(&body);
    assert!(matches!(result, Err(FetchError::Shape(_))), "got {result:?}");

    let mut view = TableView::<Member>::new(10);
    view.load(result);

    assert!(view.records().is_empty());
    assert!(matches!(view.state(), LoadState::Failed(_)));
    assert!(matches!(view.notice(), Some(TableNotice::Failed(_))));
    assert_eq!(view.page_count(), 0);
    assert_eq!(view.page(), 1);
}

#[test]
fn notices_follow_load_state() {
    let mut view = TableView::<Member>::new(10);
    assert_eq!(view.notice(), Some(TableNotice::Loading));

    view.load(Ok::<_, String>(Vec::new()));
    assert_eq!(view.notice(), Some(TableNotice::NoRecords));

    view.load(Ok::<_, String>(numbered_members(2)));
    assert_eq!(view.notice(), None);

    view.set_filter("nobody");
    assert_eq!(view.notice(), Some(TableNotice::NoMatches));

    view.begin_loading();
    assert!(view.records().is_empty());
    assert_eq!(view.notice(), Some(TableNotice::Loading));
}

#[test]
fn row_keys_prefer_record_id() {
    let mut records = numbered_members(2);
    records[1].id = None;
    let view = TableView::with_records(10, records);
    let keys: Vec<String> = view.visible().iter().map(|row| row.key()).collect();

    assert_eq!(keys, vec!["m0".to_string(), "row-1".to_string()]);
}

#[test]
fn member_deserializes_api_fields() {
    let body = json!({
        "status": true,
        "data": [
            { "_id": "abc", "fullName": "Ada Obi", "regNumber": 1042, "createdAt": "2024-02-03T04:05:06.000Z" },
            { "fullName": "Bola Ade", "regNumber": "MK-7" }
        ]
    });

    let members = records_from_envelope::<Member>(&body).expect("members should decode");

    assert_eq!(members[0].id.as_deref(), Some("abc"));
    assert_eq!(members[0].reg_number.as_deref(), Some("1042"));
    assert_eq!(members[0].cells(), vec!["Ada Obi", "2024-02-03"]);
    assert_eq!(members[1].reg_number.as_deref(), Some("MK-7"));
    assert!(members[1].created_at.is_empty());
}

#[test]
fn joined_date_falls_back_to_raw_text() {
    assert_eq!(format_joined_date("2024-05-06"), "2024-05-06");
    assert_eq!(format_joined_date("yesterday"), "yesterday");
}

#[test]
fn dues_period_sort_uses_calendar_order() {
    let records = vec![
        due("1", "500", "March", "2024"),
        due("2", "500", "January", "2024"),
        due("3", "500", "December", "2023"),
    ];
    let mut view = TableView::with_records(10, records);
    view.set_sort(DuesSortKey::Period);

    let regs: Vec<&str> = view
        .visible()
        .iter()
        .map(|row| row.record.reg_number.as_str())
        .collect();
    assert_eq!(regs, vec!["3", "2", "1"]);
}

#[test]
fn dues_amount_sort_is_numeric() {
    let records = vec![
        due("a", "1000", "May", "2024"),
        due("b", "200", "May", "2024"),
        due("c", "30", "May", "2024"),
    ];
    let mut view = TableView::with_records(10, records);
    view.set_sort(DuesSortKey::Amount);

    let amounts: Vec<&str> = view
        .visible()
        .iter()
        .map(|row| row.record.amount.as_str())
        .collect();
    assert_eq!(amounts, vec!["30", "200", "1000"]);
}

fn levy(contributor: &str, amount: &str, month: &str, year: &str) -> LevyContribution {
    LevyContribution {
        id: None,
        owner_name: "Ada Obi".to_string(),
        contributor_name: contributor.to_string(),
        amount: amount.to_string(),
        month: month.to_string(),
        year: year.to_string(),
        contribution_type: "wedding".to_string(),
    }
}

fn contributors(view: &TableView<LevyContribution>) -> Vec<String> {
    view.visible()
        .iter()
        .map(|row| row.record.contributor_name.clone())
        .collect()
}

#[test]
fn levy_sort_puts_unparseable_values_first() {
    let records = vec![
        levy("March payer", "1500", "March", "2024"),
        levy("Garbled", "n/a", "Sometime", "2024"),
        levy("January payer", "200", "January", "2024"),
        levy("December payer", "900", "December", "2023"),
    ];
    let mut view = TableView::with_records(10, records);

    view.set_sort(LevySortKey::Period);
    assert_eq!(
        contributors(&view),
        vec!["Garbled", "December payer", "January payer", "March payer"]
    );
    let model = table_model(&view);
    assert_eq!(model.headers[3].indicator, "↑");
    assert_eq!(model.headers[4].indicator, "↑");

    view.set_sort(LevySortKey::Amount);
    assert_eq!(
        contributors(&view),
        vec!["Garbled", "January payer", "December payer", "March payer"]
    );

    view.set_sort(LevySortKey::Amount);
    assert_eq!(
        contributors(&view),
        vec!["March payer", "December payer", "January payer", "Garbled"]
    );
}

#[test]
fn table_model_marks_active_sort_column() {
    let mut view = TableView::with_records(10, numbered_members(12));
    view.set_sort(MemberSortKey::JoinedDate);
    view.set_sort(MemberSortKey::JoinedDate);

    let model = table_model(&view);

    assert_eq!(model.headers.len(), 2);
    assert_eq!(model.headers[0].indicator, "");
    assert_eq!(model.headers[1].indicator, "↓");
    assert!(model.headers.iter().all(|header| header.sortable));
    assert_eq!(model.rows.len(), 10);
    assert_eq!(model.page_count, 2);
    assert_eq!(model.total, 12);
    assert_eq!(sort_key_at::<Member>(1), Some(MemberSortKey::JoinedDate));
    assert_eq!(sort_key_at::<Member>(5), None);
}

#[test]
fn table_model_reports_one_page_when_empty() {
    let view = TableView::<Member>::with_records(10, Vec::new());
    let model = table_model(&view);

    assert_eq!(model.page, 1);
    assert_eq!(model.page_count, 1);
    assert_eq!(
        model.notice.as_ref().map(notice_message).as_deref(),
        Some("No record yet!")
    );
}

#[test]
fn interpret_response_maps_statuses() {
    let ok = interpret_response(200, r#"{"status":true,"data":[]}"#).expect("2xx should pass");
    assert_eq!(ok["status"], json!(true));

    let rejected = interpret_response(200, r#"{"status":false,"message":"Invalid OTP"}"#);
    assert_eq!(rejected, Err(FetchError::Rejected("Invalid OTP".to_string())));

    let status = interpret_response(404, r#"{"message":"Member not found"}"#);
    assert_eq!(
        status,
        Err(FetchError::Status {
            code: 404,
            message: "Member not found".to_string()
        })
    );

    let opaque = interpret_response(502, "<html>bad gateway</html>");
    assert_eq!(
        opaque,
        Err(FetchError::Status {
            code: 502,
            message: GENERIC_ERROR_MESSAGE.to_string()
        })
    );

    assert!(matches!(
        interpret_response(200, "not json"),
        Err(FetchError::Decode(_))
    ));
}

#[test]
fn lookup_envelopes_treat_missing_data_as_empty() {
    let empty: Vec<MonthlyDue> =
        optional_records_from_envelope(&json!({ "status": true, "data": null }))
            .expect("null data should be empty");
    assert!(empty.is_empty());

    let missing: Vec<MonthlyDue> = optional_records_from_envelope(&json!({ "status": true }))
        .expect("missing data should be empty");
    assert!(missing.is_empty());

    let strict = records_from_envelope::<MonthlyDue>(&json!({ "status": true }));
    assert!(matches!(strict, Err(FetchError::Shape(_))));

    let dues: Vec<MonthlyDue> = optional_records_from_envelope(&json!({
        "data": [{ "regNumber": 12, "amount": 500, "month": "May", "year": 2024 }]
    }))
    .expect("dues should decode");
    assert_eq!(dues[0].reg_number, "12");
    assert_eq!(dues[0].year, "2024");
    assert_eq!(dues[0].cells()[1], "₦500");
}

#[test]
fn dues_status_decodes_from_object_envelope() {
    let body = json!({
        "data": {
            "fullName": "Ada Obi",
            "regNumber": "77",
            "year": 2024,
            "paidMonths": ["January", "February", "March"],
            "unpaidMonths": ["April"]
        }
    });

    let status: DuesStatus = object_from_envelope(&body).expect("status should decode");

    assert!(!status.is_empty());
    assert_eq!(status.year, "2024");
    assert_eq!(
        status.month_rows(),
        vec![
            ("January".to_string(), "April".to_string()),
            ("February".to_string(), String::new()),
            ("March".to_string(), String::new()),
        ]
    );

    let wrong = object_from_envelope::<DuesStatus>(&json!({ "data": [] }));
    assert!(matches!(wrong, Err(FetchError::Shape(_))));
}

#[test]
fn otp_must_be_exactly_five_digits() {
    assert_eq!(parse_otp("12345"), Ok(12345));
    assert_eq!(parse_otp(" 00042 "), Ok(42));
    assert_eq!(parse_otp("1234"), Err(FormError::InvalidOtp));
    assert_eq!(parse_otp("123456"), Err(FormError::InvalidOtp));
    assert_eq!(parse_otp("12a45"), Err(FormError::InvalidOtp));
}

#[test]
fn registration_form_validates_fields() {
    let mut form = RegistrationForm::default();
    assert_eq!(form.validate(), Err(FormError::Required("Full name")));

    form.full_name = "  Ada Obi ".to_string();
    form.fee = "-5".to_string();
    assert_eq!(form.validate(), Err(FormError::InvalidAmount("Fee")));

    form.fee = "2500".to_string();
    form.otp = "54321".to_string();
    let request = form.validate().expect("form should be valid");
    assert_eq!(request.full_name, "Ada Obi");
    assert_eq!(request.fee, 2500.0);

    let wire = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(wire, json!({ "fullName": "Ada Obi", "fee": 2500.0, "otp": 54321 }));
}

#[test]
fn levy_form_defaults_and_wire_shape() {
    let form = LevyPaymentForm::new(2025);
    assert_eq!(form.month, "January");
    assert_eq!(form.year, "2025");
    assert_eq!(form.contribution_type, "wedding");

    let filled = LevyPaymentForm {
        owner_name: "Ada".to_string(),
        contributor_name: "Bola".to_string(),
        amount: "1500".to_string(),
        otp: "11111".to_string(),
        contribution_type: "Burial".to_string(),
        ..form
    };
    let request = filled.validate().expect("levy form should be valid");
    assert_eq!(request.contribution_type, ContributionType::Burial);

    let wire = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(wire["contributionType"], json!("burial"));
    assert_eq!(wire["month"], json!("January"));
    assert_eq!(wire["ownerName"], json!("Ada"));
}

#[test]
fn lookup_forms_build_query_params() {
    let mut dues = DuesLookupForm::new(2024);
    dues.month = "april".to_string();
    let query = dues.validate().expect("dues lookup should be valid");
    assert_eq!(query.month, Month::April);
    assert_eq!(
        query.params(),
        vec![
            ("regNumber", String::new()),
            ("month", "April".to_string()),
            ("year", "2024".to_string()),
        ]
    );

    let mut levy = LevyLookupForm::new(2024);
    levy.year = "24".to_string();
    assert_eq!(levy.validate(), Err(FormError::InvalidYear));

    let status = DuesStatusForm {
        reg_number: String::new(),
        year: "2024".to_string(),
    };
    assert_eq!(
        status.validate(),
        Err(FormError::Required("Registration number"))
    );
}

#[test]
fn registration_success_reports_message() {
    let (api, payments) = payments_with(FakeApi::default());
    let form = RegistrationForm {
        full_name: "Ada Obi".to_string(),
        fee: "1000".to_string(),
        otp: "12345".to_string(),
    };

    let outcome = payments.register(&form);

    assert_eq!(
        outcome,
        Outcome::Success(REGISTRATION_SUCCESS_MESSAGE.to_string())
    );
    assert_eq!(api.calls(), vec!["register:Ada Obi".to_string()]);
}

#[test]
fn invalid_form_never_reaches_api() {
    let (api, payments) = payments_with(FakeApi::default());
    let mut form = valid_dues_form();
    form.otp = "12".to_string();

    let outcome = payments.pay_monthly_dues(&form);

    assert!(!outcome.is_success());
    assert_eq!(outcome.message(), FormError::InvalidOtp.to_string());
    assert!(api.calls().is_empty(), "api should not be called");
}

#[test]
fn invalid_otp_in_success_body_is_an_error() {
    let (_, payments) = payments_with(FakeApi {
        ack: Some(Ok(Ack {
            message: Some("Invalid OTP supplied".to_string()),
        })),
        ..FakeApi::default()
    });

    let outcome = payments.pay_monthly_dues(&valid_dues_form());

    assert_eq!(outcome, Outcome::Error(INVALID_OTP_MESSAGE.to_string()));
}

#[test]
fn submission_errors_map_to_user_messages() {
    assert_eq!(
        submission_outcome(Ok(Ack::default()), DUES_SUCCESS_MESSAGE),
        Outcome::Success(DUES_SUCCESS_MESSAGE.to_string())
    );
    assert_eq!(
        submission_outcome(
            Err(FetchError::Status {
                code: 400,
                message: "invalid OTP".to_string()
            }),
            DUES_SUCCESS_MESSAGE
        ),
        Outcome::Error(INVALID_OTP_MESSAGE.to_string())
    );
    assert_eq!(
        submission_outcome(
            Err(FetchError::Rejected("Member already exists".to_string())),
            REGISTRATION_SUCCESS_MESSAGE
        ),
        Outcome::Error("Member already exists".to_string())
    );
    assert_eq!(
        submission_outcome(
            Err(FetchError::Transport("timed out".to_string())),
            LEVY_SUCCESS_MESSAGE
        ),
        Outcome::Error(NETWORK_ERROR_MESSAGE.to_string())
    );
    assert_eq!(
        submission_outcome(
            Err(FetchError::Decode("eof".to_string())),
            LEVY_SUCCESS_MESSAGE
        ),
        Outcome::Error(GENERIC_ERROR_MESSAGE.to_string())
    );
}

#[test]
fn levy_payment_succeeds_with_contribution_message() {
    let (api, payments) = payments_with(FakeApi::default());
    let form = LevyPaymentForm {
        owner_name: "Ada".to_string(),
        contributor_name: "Bola".to_string(),
        amount: "2000".to_string(),
        otp: "22222".to_string(),
        ..LevyPaymentForm::new(2024)
    };

    let outcome = payments.pay_levy(&form);

    assert_eq!(outcome, Outcome::Success(LEVY_SUCCESS_MESSAGE.to_string()));
    assert_eq!(api.calls(), vec!["levy:wedding".to_string()]);
}

#[test]
fn dues_listing_drops_other_periods() {
    let (_, queries) = queries_with(FakeApi {
        dues: Some(Ok(Listing {
            message: None,
            records: vec![
                due("1", "500", "March", "2024"),
                due("1", "500", "April", "2024"),
                due("2", "500", "march", "2024"),
                due("3", "500", "March", "2023"),
            ],
        })),
        ..FakeApi::default()
    });
    let mut form = DuesLookupForm::new(2024);
    form.month = "March".to_string();

    let lookup = queries
        .list_monthly_dues(&form)
        .expect("lookup should succeed");

    assert_eq!(lookup.message, FETCH_SUCCESS_MESSAGE);
    let regs: Vec<&str> = lookup
        .records
        .iter()
        .map(|due| due.reg_number.as_str())
        .collect();
    assert_eq!(regs, vec!["1", "2"]);
}

#[test]
fn lookup_errors_surface_server_rejections_only() {
    let (_, queries) = queries_with(FakeApi {
        levies: Some(Err(FetchError::Rejected("No contributions found".to_string()))),
        ..FakeApi::default()
    });
    assert_eq!(
        queries.list_levies(&LevyLookupForm::new(2024)),
        Err("No contributions found".to_string())
    );

    let (_, queries) = queries_with(FakeApi {
        dues: Some(Err(FetchError::Transport("refused".to_string()))),
        ..FakeApi::default()
    });
    assert_eq!(
        queries.list_monthly_dues(&DuesLookupForm::new(2024)),
        Err(LOOKUP_FAILED_MESSAGE.to_string())
    );
}

#[test]
fn empty_dues_status_reports_no_data() {
    let empty = DuesStatus {
        full_name: "Ada".to_string(),
        reg_number: "7".to_string(),
        year: "2024".to_string(),
        paid_months: Vec::new(),
        unpaid_months: Vec::new(),
    };
    let (api, queries) = queries_with(FakeApi {
        status: Some(Ok(empty)),
        ..FakeApi::default()
    });
    let form = DuesStatusForm {
        reg_number: "7".to_string(),
        year: "2024".to_string(),
    };

    assert_eq!(
        queries.check_dues(&form),
        Err(NO_DUES_DATA_MESSAGE.to_string())
    );
    assert_eq!(api.calls(), vec!["check_dues:7".to_string()]);

    let (_, failing) = queries_with(FakeApi::default());
    assert_eq!(
        failing.check_dues(&form),
        Err(DUES_STATUS_FAILED_MESSAGE.to_string())
    );
}

#[test]
fn services_share_one_api() {
    let services = AppServices::with_api(AppConfig::default(), Arc::new(FakeApi::default()));
    let copy = services.clone();
    assert!(services == copy);

    let members = services
        .queries
        .fetch_members()
        .expect("fake fetch should succeed");
    assert!(members.is_empty());
}

#[test]
fn menu_lists_every_screen_but_home() {
    assert_eq!(Screen::MENU.len(), 7);
    assert!(!Screen::MENU.contains(&Screen::Home));
    assert_eq!(Screen::Register.title(), "Member Registration");
}

#[test]
fn http_endpoint_joins_base_url() {
    let config = AppConfig {
        api_base_url: "https://example.test/".to_string(),
        ..AppConfig::default()
    };
    let api = HttpApi::new(&config);

    assert_eq!(api.endpoint("all"), "https://example.test/mikados/all");
    assert_eq!(
        api.endpoint("/monthly-dues/pay"),
        "https://example.test/mikados/monthly-dues/pay"
    );
}

#[test]
fn config_defaults_when_file_missing() {
    let temp_dir = unique_test_dir("config-missing");
    let path = temp_dir.join("config.toml");

    let config = load_config_from(Some(path.as_path()), |_| None).expect("defaults should load");

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.page_size, 10);
}

#[test]
fn config_file_and_env_overrides_apply() {
    let temp_dir = unique_test_dir("config-file");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("config.toml");
    fs::write(
        &path,
        "api_base_url = \"http://localhost:4000\"\npage_size = 14\nlog_level = \"debug\"\n",
    )
    .expect("should write config");

    let from_file = load_config_from(Some(path.as_path()), |_| None).expect("config should load");
    assert_eq!(from_file.api_base_url, "http://localhost:4000");
    assert_eq!(from_file.page_size, 14);
    assert_eq!(from_file.request_timeout_secs, 30);
    assert_eq!(from_file.log_level, "debug");

    let overridden = load_config_from(Some(path.as_path()), |key| match key {
        API_URL_ENV => Some("https://staging.example.test".to_string()),
        PAGE_SIZE_ENV => Some("25".to_string()),
        _ => None,
    })
    .expect("overrides should load");
    assert_eq!(overridden.api_base_url, "https://staging.example.test");
    assert_eq!(overridden.page_size, 25);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn config_rejects_invalid_values() {
    let bad_size = load_config_from(None, |key| {
        (key == PAGE_SIZE_ENV).then(|| "0".to_string())
    });
    assert!(bad_size.is_err(), "zero page size should be rejected");

    let not_number = load_config_from(None, |key| {
        (key == PAGE_SIZE_ENV).then(|| "ten".to_string())
    });
    assert!(not_number.is_err(), "non-numeric page size should be rejected");

    let bad_url = load_config_from(None, |key| {
        (key == API_URL_ENV).then(|| "ftp://example.test".to_string())
    });
    assert!(bad_url.is_err(), "non-http url should be rejected");
}

#[test]
fn csv_export_writes_visible_rows_in_order() {
    let temp_dir = unique_test_dir("csv-export");
    let csv_path = temp_dir.join("out").join("members.csv");
    let records = vec![
        member("1", "Bola, Ade", "2024-01-02T00:00:00Z"),
        member("2", "Ada Obi", "2024-01-01T00:00:00Z"),
        member("3", "Chika", "2024-01-03T00:00:00Z"),
    ];
    let mut view = TableView::with_records(2, records);
    view.set_filter("a");
    view.set_sort(MemberSortKey::Name);

    let count = export_visible_to_csv(&view, &csv_path).expect("export should succeed");

    assert_eq!(count, 3);
    let text = fs::read_to_string(&csv_path).expect("should read exported csv");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "NAME,JOINED DATE",
            "Ada Obi,2024-01-01",
            "\"Bola, Ade\",2024-01-02",
            "Chika,2024-01-03",
        ]
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn run_blocking_returns_worker_result() {
    let records = numbered_members(3);
    let view = TableView::with_records(10, records);

    let total = run_blocking("count", || view.visible_len());

    assert_eq!(total, 3);
}

#[test]
fn run_in_background_keeps_runtime_free() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("should build runtime");
    let (tx, rx) = std::sync::mpsc::channel::<u32>();

    let received = runtime.block_on(async move {
        let waiting = run_in_background("wait for runtime", move || {
            rx.recv().expect("should receive from runtime task")
        });
        tokio::spawn(async move {
            tx.send(7).expect("should send to background task");
        });
        waiting.await
    });

    assert_eq!(received, Some(7));
}

#[test]
fn run_in_background_loads_table_after_fetch() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("should build runtime");
    let (_, queries) = queries_with(FakeApi {
        members: Some(Ok(numbered_members(12))),
        ..FakeApi::default()
    });
    let queries = Arc::new(queries);
    let mut view = TableView::<Member>::new(10);
    view.begin_loading();
    assert_eq!(view.notice(), Some(TableNotice::Loading));

    let fetched = runtime
        .block_on(run_in_background("fetch members", move || queries.fetch_members()))
        .expect("task should not be cancelled");
    view.load(fetched);

    assert_eq!(view.state(), &LoadState::Ready);
    assert_eq!(view.page_count(), 2);
}

#[test]
fn ensure_webview_data_dir_creates_subdir() {
    let temp_dir = unique_test_dir("webview-data-dir");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let webview_dir =
        ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

    assert_eq!(webview_dir, temp_dir.join("webview2"));
    assert!(webview_dir.is_dir(), "webview2 directory should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
