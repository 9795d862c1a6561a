//! Records mirrored from the vendor API

pub mod account;
pub mod catalog;
pub mod notification;
pub mod order;
pub mod plan;
pub mod product;
pub mod vendor;

pub use account::{AccountType, BankAccount};
pub use catalog::{Category, Subcategory};
pub use notification::Notification;
pub use order::{Order, OrderLine, OrderStatus};
pub use plan::{Plan, PlanStatus};
pub use product::{ItemStatus, RecommendedItem, RestaurantProduct};
pub use vendor::{Vendor, VendorStatus};

/// Deserialize a number that some endpoints send as a string
pub(crate) fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
        Null,
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) if s.trim().is_empty() => Ok(0.0),
        Amount::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Amount::Null => Ok(0.0),
    }
}

/// Format a rupee amount for tables and invoices
pub fn format_amount(amount: f64) -> String {
    format!("₹{:.2}", amount)
}
