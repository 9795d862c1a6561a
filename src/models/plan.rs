//! Subscription plans

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de_amount;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, alias = "planName")]
    pub name: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub price: f64,
    #[serde(default, alias = "duration")]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Vendor's plan purchase state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatus {
    #[serde(default, alias = "isPlanPurchased")]
    pub is_purchased: bool,
    #[serde(default, alias = "planExpiry")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub plan_name: Option<String>,
}

impl PlanStatus {
    /// Purchased and not yet expired
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.is_purchased && self.expiry_date.is_some_and(|expiry| expiry > now)
    }
}

/// Checkout order created for a plan purchase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOrder {
    #[serde(alias = "id")]
    pub order_id: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, alias = "checkoutUrl")]
    pub payment_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_plan_active_requires_future_expiry() {
        let now = Utc::now();
        let active = PlanStatus {
            is_purchased: true,
            expiry_date: Some(now + Duration::days(3)),
            plan_name: None,
        };
        let expired = PlanStatus {
            is_purchased: true,
            expiry_date: Some(now - Duration::days(1)),
            plan_name: None,
        };
        let no_expiry = PlanStatus {
            is_purchased: true,
            expiry_date: None,
            plan_name: None,
        };
        let unpaid = PlanStatus {
            is_purchased: false,
            expiry_date: Some(now + Duration::days(3)),
            plan_name: None,
        };
        assert!(active.is_active(now));
        assert!(!expired.is_active(now));
        assert!(!no_expiry.is_active(now));
        assert!(!unpaid.is_active(now));
    }

    #[test]
    fn test_plan_status_aliases() {
        let status: PlanStatus = serde_json::from_str(
            r#"{ "isPlanPurchased": true, "planExpiry": "2030-01-01T00:00:00Z" }"#,
        )
        .unwrap();
        assert!(status.is_purchased);
        assert!(status.expiry_date.is_some());
    }
}
