//! Booking list as a spreadsheet (CSV) or JSON

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::Order;

/// Output format for booking exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Json,
}

impl SheetFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" | "xls" | "excel" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

pub const HEADER: [&str; 11] = [
    "Order ID",
    "Date",
    "Customer",
    "Items",
    "Sub Total",
    "Delivery Charge",
    "Coupon Discount",
    "Total Payable",
    "Status",
    "Payment Method",
    "Payment Status",
];

/// One sheet row per order
pub fn row(order: &Order) -> Vec<String> {
    let items = order
        .products
        .iter()
        .map(|p| format!("{} x{}", p.name, p.quantity))
        .collect::<Vec<_>>()
        .join("; ");

    vec![
        order.id.clone(),
        order
            .created_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
        order.customer_name(),
        items,
        format!("{:.2}", order.sub_total),
        format!("{:.2}", order.delivery_charge),
        format!("{:.2}", order.coupon_discount),
        format!("{:.2}", order.total_payable),
        order.order_status.to_string(),
        order.payment_method.clone().unwrap_or_default(),
        order.payment_status.clone().unwrap_or_default(),
    ]
}

/// Quote a field when it holds a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn to_csv(orders: &[&Order]) -> String {
    let mut out = csv_line(&HEADER);
    out.push_str("\r\n");
    for order in orders {
        out.push_str(&csv_line(&row(order)));
        out.push_str("\r\n");
    }
    out
}

/// File name used when a sheet is saved without an explicit path
pub fn default_file_name(format: SheetFormat, date: NaiveDate) -> String {
    format!("bookings-{}.{}", date.format("%Y%m%d"), format.extension())
}

pub fn render(orders: &[&Order], format: SheetFormat) -> Result<String> {
    Ok(match format {
        SheetFormat::Csv => to_csv(orders),
        SheetFormat::Json => serde_json::to_string_pretty(orders)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::Customer;
    use crate::models::{OrderLine, OrderStatus};

    fn order() -> Order {
        Order {
            id: "o1".to_string(),
            user: Some(Customer {
                first_name: "Rao, Asha".to_string(),
                ..Default::default()
            }),
            products: vec![
                OrderLine {
                    name: "Dosa".to_string(),
                    quantity: 2,
                    price: 60.0,
                },
                OrderLine {
                    name: "6\" Pizza".to_string(),
                    quantity: 1,
                    price: 200.0,
                },
            ],
            sub_total: 320.0,
            total_payable: 320.0,
            order_status: OrderStatus::OutForDelivery,
            payment_method: Some("COD".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let o = order();
        let csv = to_csv(&[&o]);
        let mut lines = csv.split("\r\n");
        assert!(lines.next().unwrap().starts_with("Order ID,Date,Customer"));
        let data = lines.next().unwrap();
        assert!(data.starts_with("o1,,\"Rao, Asha\",\"Dosa x2; 6\"\" Pizza x1\",320.00"));
        assert!(data.contains("Out For Delivery,COD,"));
    }

    #[test]
    fn test_empty_list_has_header_only() {
        let csv = to_csv(&[]);
        assert_eq!(csv.matches("\r\n").count(), 1);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(SheetFormat::from_str("Excel"), Some(SheetFormat::Csv));
        assert_eq!(SheetFormat::from_str("json"), Some(SheetFormat::Json));
        assert_eq!(SheetFormat::from_str("pdf"), None);
    }

    #[test]
    fn test_json_render() {
        let o = order();
        let json = render(&[&o], SheetFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["_id"], "o1");
    }

    #[test]
    fn test_default_file_name_uses_extension() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(
            default_file_name(SheetFormat::Csv, date),
            "bookings-20261017.csv"
        );
        let json = SheetFormat::from_str("json").unwrap();
        assert_eq!(default_file_name(json, date), "bookings-20261017.json");
    }
}
