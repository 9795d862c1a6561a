//! Logged-in vendor session
//!
//! The session is loaded once at start-up, rewritten whenever authentication
//! changes, and cleared on logout. Nothing else reads the store directly.

pub mod store;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::models::Vendor;
pub use store::KvStore;

/// Keys written to the store
pub mod keys {
    pub const VENDOR_ID: &str = "vendorId";
    pub const VENDOR: &str = "vendor";
    pub const TOKEN: &str = "token";
    pub const RESTAURANT_NAME: &str = "restaurantName";
    pub const EMAIL: &str = "email";
    pub const MOBILE: &str = "mobile";
    pub const LOCATION: &str = "location";
    pub const IMAGE: &str = "image";
}

/// Identity of the logged-in vendor
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub vendor_id: String,
    pub token: Option<String>,
    pub vendor: Option<Vendor>,
}

impl Session {
    pub fn display_name(&self) -> &str {
        self.vendor
            .as_ref()
            .map(|v| v.restaurant_name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.vendor_id)
    }
}

pub struct SessionManager {
    store: KvStore,
    current: Option<Session>,
}

impl SessionManager {
    /// Read the session from the store
    pub fn load(store: KvStore) -> Result<Self> {
        let current = match store.get(keys::VENDOR_ID)? {
            Some(vendor_id) if !vendor_id.is_empty() => {
                let vendor = match store.get(keys::VENDOR)? {
                    Some(json) => match serde_json::from_str::<Vendor>(&json) {
                        Ok(v) => Some(v),
                        Err(e) => {
                            warn!(error = %e, "cached vendor profile is unreadable");
                            None
                        }
                    },
                    None => None,
                };
                Some(Session {
                    vendor_id,
                    token: store.get(keys::TOKEN)?,
                    vendor,
                })
            }
            _ => None,
        };
        debug!(logged_in = current.is_some(), "session loaded");
        Ok(Self { store, current })
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The session, or [`ApiError::NotLoggedIn`]
    pub fn require(&self) -> Result<&Session, ApiError> {
        self.current.as_ref().ok_or(ApiError::NotLoggedIn)
    }

    pub fn token(&self) -> Option<String> {
        self.current.as_ref().and_then(|s| s.token.clone())
    }

    /// Record a successful OTP verification
    pub fn sign_in(&mut self, token: Option<String>, vendor: Vendor) -> Result<()> {
        let profile = serde_json::to_string(&vendor)?;
        let mut entries = vec![
            (keys::VENDOR_ID, Some(vendor.id.as_str())),
            (keys::TOKEN, token.as_deref()),
        ];
        entries.extend(profile_entries(&vendor, &profile));
        self.store
            .set_many(&entries)
            .context("Failed to save session")?;
        self.current = Some(Session {
            vendor_id: vendor.id.clone(),
            token,
            vendor: Some(vendor),
        });
        debug!("session refreshed after sign-in");
        Ok(())
    }

    /// Replace the cached profile after a refresh
    pub fn update_profile(&mut self, vendor: Vendor) -> Result<()> {
        let session = self.current.as_mut().ok_or(ApiError::NotLoggedIn)?;
        if session.vendor_id != vendor.id {
            anyhow::bail!(
                "Profile {} does not belong to the logged-in vendor {}",
                vendor.id,
                session.vendor_id
            );
        }
        let profile = serde_json::to_string(&vendor)?;
        self.store
            .set_many(&profile_entries(&vendor, &profile))
            .context("Failed to cache vendor profile")?;
        session.vendor = Some(vendor);
        Ok(())
    }

    /// Forget everything
    pub fn sign_out(&mut self) -> Result<()> {
        self.store.clear()?;
        self.current = None;
        debug!("session cleared");
        Ok(())
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }
}

/// Cached profile JSON plus the flat fields pages read directly
fn profile_entries<'a>(vendor: &'a Vendor, profile: &'a str) -> Vec<(&'static str, Option<&'a str>)> {
    vec![
        (keys::VENDOR, Some(profile)),
        (keys::RESTAURANT_NAME, Some(vendor.restaurant_name.as_str())),
        (keys::EMAIL, Some(vendor.email.as_str())),
        (keys::MOBILE, Some(vendor.mobile.as_str())),
        (keys::LOCATION, vendor.location.as_deref()),
        (keys::IMAGE, vendor.image.as_deref()),
    ]
}
