//! Vendor profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the restaurant is accepting orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VendorStatus {
    #[default]
    #[serde(rename = "active", alias = "Active")]
    Active,
    #[serde(rename = "inactive", alias = "Inactive")]
    Inactive,
}

impl VendorStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" | "on" | "open" => Some(Self::Active),
            "inactive" | "off" | "closed" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// A registered restaurant vendor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: VendorStatus,
    #[serde(default)]
    pub is_plan_purchased: bool,
    #[serde(default)]
    pub plan_expiry: Option<DateTime<Utc>>,
}

/// Registration form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVendor {
    pub restaurant_name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_from_api_json() {
        let json = r#"{
            "_id": "v1",
            "restaurantName": "Spice Hut",
            "email": "owner@spicehut.in",
            "mobile": "9876543210",
            "status": "inactive",
            "isPlanPurchased": true,
            "planExpiry": "2026-12-31T00:00:00Z"
        }"#;
        let vendor: Vendor = serde_json::from_str(json).unwrap();
        assert_eq!(vendor.id, "v1");
        assert_eq!(vendor.restaurant_name, "Spice Hut");
        assert_eq!(vendor.status, VendorStatus::Inactive);
        assert!(vendor.is_plan_purchased);
        assert!(vendor.plan_expiry.is_some());
        assert!(vendor.location.is_none());
    }

    #[test]
    fn test_vendor_status_parse_and_toggle() {
        assert_eq!(VendorStatus::parse("Active"), Some(VendorStatus::Active));
        assert_eq!(VendorStatus::parse("off"), Some(VendorStatus::Inactive));
        assert_eq!(VendorStatus::parse("maybe"), None);
        assert_eq!(VendorStatus::Active.toggled(), VendorStatus::Inactive);
        assert_eq!(VendorStatus::Inactive.to_string(), "inactive");
    }
}
