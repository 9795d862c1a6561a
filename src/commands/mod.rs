//! CLI commands, one module per panel page

pub mod account;
pub mod auth;
pub mod booking;
pub mod category;
pub mod dashboard;
pub mod notification;
pub mod plan;
pub mod product;
pub mod utils;
pub mod vendor;

use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use tracing::debug;

use vendor_panel::api::ApiClient;
use vendor_panel::config::{self, ApiConfig};
use vendor_panel::guard::{Navigation, PlanGuard};
use vendor_panel::session::{KvStore, SessionManager};

/// Everything a page needs: the API client, the session and the guard
pub struct Panel {
    pub api: ApiClient,
    pub session: SessionManager,
    pub config: ApiConfig,
    guard: PlanGuard,
}

impl Panel {
    /// Load configuration and the stored session
    pub fn open() -> Result<Self> {
        let config = ApiConfig::load()?;
        let store = KvStore::open(config::session_db_path()?)?;
        Self::with(config, store)
    }

    pub fn with(config: ApiConfig, store: KvStore) -> Result<Self> {
        let session = SessionManager::load(store)?;
        let api = ApiClient::new(&config)?.with_token(session.token());
        debug!(base_url = %config.base_url, "panel opened");
        Ok(Self {
            api,
            session,
            config,
            guard: PlanGuard::default(),
        })
    }

    /// Pick up a new token after the session changed
    pub fn refresh_client(&mut self) {
        self.api = self.api.clone().with_token(self.session.token());
    }

    pub fn vendor_id(&self) -> Result<String> {
        Ok(self.session.require()?.vendor_id.clone())
    }

    pub fn restaurant_name(&self) -> String {
        self.session
            .current()
            .map(|s| s.display_name().to_string())
            .unwrap_or_else(|| "Restaurant".to_string())
    }

    /// Run the plan guard for `route`; prints the purchase prompt when blocked
    pub async fn enter(&self, route: &str) -> Result<bool> {
        if self.guard.is_exempt(route) {
            return Ok(true);
        }
        let vendor_id = self.vendor_id()?;
        let status = self.api.plan_status(&vendor_id).await?;

        match self.guard.check(route, status.is_active(Utc::now())) {
            Navigation::Proceed(_) => Ok(true),
            Navigation::PlanRequired { requested } => {
                println!("{}", "Plan required".yellow().bold());
                println!(
                    "An active plan is needed to open {}. Your plan is missing or expired.",
                    requested
                );
                println!("Run `vendor-panel plans list` and `vendor-panel plans buy <PLAN_ID>`.");
                Ok(false)
            }
        }
    }
}
