//! Customer orders (bookings)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::de_amount;

/// Order lifecycle as reported by the server
///
/// Transitions are validated server-side; the client only offers the fixed
/// list in [`OrderStatus::OPTIONS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Prepared,
    OutForDelivery,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Statuses a vendor may request
    pub const OPTIONS: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Rejected,
        OrderStatus::Prepared,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn parse(s: &str) -> Self {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            "prepared" => Self::Prepared,
            "outfordelivery" => Self::OutForDelivery,
            "delivered" => Self::Delivered,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Parse only one of the fixed options
    pub fn parse_option(s: &str) -> Option<Self> {
        match Self::parse(s) {
            Self::Other(_) => None,
            status => Some(status),
        }
    }

    /// Shown on the cancelled bookings page
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Prepared => "Prepared",
            Self::OutForDelivery => "Out For Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Customer reference on an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, alias = "name")]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "phone")]
    pub mobile: Option<String>,
}

impl Customer {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// One product line in an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default, alias = "productName")]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, deserialize_with = "de_amount")]
    pub price: f64,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, alias = "userId")]
    pub user: Option<Customer>,
    #[serde(default)]
    pub products: Vec<OrderLine>,
    #[serde(default, deserialize_with = "de_amount")]
    pub sub_total: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub delivery_charge: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub coupon_discount: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_payable: f64,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn customer_name(&self) -> String {
        self.user
            .as_ref()
            .map(Customer::display_name)
            .unwrap_or_else(|| "-".to_string())
    }

    /// Sum of product lines
    pub fn lines_total(&self) -> f64 {
        self.products.iter().map(OrderLine::line_total).sum()
    }
}
