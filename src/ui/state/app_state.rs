use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::record::TableRecord;
use crate::domain::table_view::TableView;
use crate::infra::config::AppConfig;
use crate::infra::http::client::HttpApi;
use crate::usecase::ports::api::MembershipApi;
use crate::usecase::services::outcome::Outcome;
use crate::usecase::services::payment_service::PaymentService;
use crate::usecase::services::query_service::QueryService;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Register,
    Members,
    PayDues,
    ListDues,
    PayLevy,
    ListLevies,
    CheckDues,
}

impl Screen {
    pub const MENU: [Screen; 7] = [
        Screen::Register,
        Screen::Members,
        Screen::PayDues,
        Screen::ListDues,
        Screen::PayLevy,
        Screen::ListLevies,
        Screen::CheckDues,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Mikados",
            Screen::Register => "Member Registration",
            Screen::Members => "All Members",
            Screen::PayDues => "Pay Monthly Dues",
            Screen::ListDues => "List Monthly Dues",
            Screen::PayLevy => "Levy Contributions",
            Screen::ListLevies => "List all Contributions",
            Screen::CheckDues => "Check Dues",
        }
    }
}

#[derive(Clone)]
pub struct AppServices {
    pub config: Arc<AppConfig>,
    pub queries: Arc<QueryService>,
    pub payments: Arc<PaymentService>,
}

impl AppServices {
    pub fn new(config: AppConfig) -> Self {
        let api = Arc::new(HttpApi::new(&config));
        Self::with_api(config, api)
    }

    pub fn with_api(config: AppConfig, api: Arc<dyn MembershipApi>) -> Self {
        Self {
            config: Arc::new(config),
            queries: Arc::new(QueryService::new(api.clone())),
            payments: Arc::new(PaymentService::new(api)),
        }
    }
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
            && Arc::ptr_eq(&self.queries, &other.queries)
            && Arc::ptr_eq(&self.payments, &other.payments)
    }
}

pub struct AppState {
    pub screen: Signal<Screen>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: use_signal(|| Screen::Home),
        }
    }
}

pub struct SubmissionState<F: 'static> {
    pub form: Signal<F>,
    pub busy: Signal<bool>,
    pub outcome: Signal<Option<Outcome>>,
}

impl<F: 'static> SubmissionState<F> {
    pub fn new(init: impl FnOnce() -> F) -> Self {
        Self {
            form: use_signal(init),
            busy: use_signal(|| false),
            outcome: use_signal(|| None::<Outcome>),
        }
    }
}

pub struct LookupState<F: 'static, R: TableRecord + 'static> {
    pub form: Signal<F>,
    pub busy: Signal<bool>,
    pub outcome: Signal<Option<Outcome>>,
    pub table: Signal<TableView<R>>,
    pub searched: Signal<bool>,
}

impl<F: 'static, R: TableRecord + 'static> LookupState<F, R> {
    pub fn new(init: impl FnOnce() -> F, page_size: usize) -> Self {
        Self {
            form: use_signal(init),
            busy: use_signal(|| false),
            outcome: use_signal(|| None::<Outcome>),
            table: use_signal(move || TableView::<R>::new(page_size)),
            searched: use_signal(|| false),
        }
    }
}
