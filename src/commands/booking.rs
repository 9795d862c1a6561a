//! Bookings (orders) pages and exports

use anyhow::{bail, Context, Result};
use chrono::Local;
use comfy_table::Cell;

use super::utils::{self, count_line, or_dash};
use super::Panel;
use vendor_panel::export::{invoice, sheet, InvoiceFormat, InvoiceLayout, SheetFormat};
use vendor_panel::filter::Searchable;
use vendor_panel::models::{format_amount, Order, OrderStatus};

/// Which bookings to show
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<OrderStatus>,
    /// Only rejected or cancelled bookings
    pub cancelled: bool,
    pub search: Option<String>,
}

impl BookingFilter {
    pub fn keeps(&self, order: &Order) -> bool {
        if self.cancelled && !order.order_status.is_cancelled() {
            return false;
        }
        if self.status.as_ref().is_some_and(|s| *s != order.order_status) {
            return false;
        }
        match self.search.as_deref() {
            Some(q) => order.matches(q),
            None => true,
        }
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.keeps(o)).collect()
    }
}

async fn fetch(panel: &Panel) -> Result<Vec<Order>> {
    let vendor_id = panel.vendor_id()?;
    let mut orders = panel.api.orders(&vendor_id).await?;
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
}

async fn find(panel: &Panel, order_id: &str) -> Result<Order> {
    fetch(panel)
        .await?
        .into_iter()
        .find(|o| o.id == order_id)
        .with_context(|| format!("Booking not found: {}", order_id))
}

pub async fn list(panel: &Panel, filter: &BookingFilter, limit: Option<usize>) -> Result<String> {
    let orders = fetch(panel).await?;
    let mut shown = filter.apply(&orders);
    let matched = shown.len();
    if let Some(n) = limit {
        shown.truncate(n);
    }

    let mut table = utils::table([
        "Order", "Date", "Customer", "Items", "Total", "Status", "Payment",
    ]);
    for o in &shown {
        table.add_row(vec![
            Cell::new(&o.id),
            Cell::new(
                o.created_at
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(o.customer_name()),
            Cell::new(o.products.len()),
            Cell::new(format_amount(o.total_payable)),
            Cell::new(&o.order_status),
            Cell::new(format!(
                "{} / {}",
                or_dash(o.payment_method.as_deref()),
                or_dash(o.payment_status.as_deref())
            )),
        ]);
    }

    let noun = if filter.cancelled {
        "cancelled bookings"
    } else {
        "bookings"
    };
    let mut footer = count_line(shown.len(), orders.len(), noun);
    if shown.len() < matched {
        footer.push_str(&format!(" ({} matched)", matched));
    }
    Ok(format!("{}\n\n{}", table, footer))
}

pub async fn view(panel: &Panel, order_id: &str) -> Result<String> {
    let order = find(panel, order_id).await?;

    let mut lines = vec![
        format!("Booking: {}", order.id),
        format!("Status: {}", order.order_status),
        format!("Customer: {}", order.customer_name()),
    ];
    if let Some(user) = &order.user {
        lines.push(format!("Email: {}", or_dash(user.email.as_deref())));
        lines.push(format!("Phone: {}", or_dash(user.mobile.as_deref())));
    }
    lines.push(format!(
        "Address: {}",
        or_dash(order.delivery_address.as_deref())
    ));
    lines.push(String::new());

    let mut table = utils::table(["Item", "Qty", "Price", "Amount"]);
    for p in &order.products {
        table.add_row(vec![
            Cell::new(&p.name),
            Cell::new(p.quantity),
            Cell::new(format_amount(p.price)),
            Cell::new(format_amount(p.line_total())),
        ]);
    }
    lines.push(table.to_string());
    lines.push(String::new());
    lines.push(format!("Sub total: {}", format_amount(order.sub_total)));
    lines.push(format!(
        "Delivery charge: {}",
        format_amount(order.delivery_charge)
    ));
    lines.push(format!(
        "Coupon discount: {}",
        format_amount(order.coupon_discount)
    ));
    lines.push(format!(
        "Total payable: {}",
        format_amount(order.total_payable)
    ));
    lines.push(format!(
        "Payment: {} ({})",
        or_dash(order.payment_method.as_deref()),
        or_dash(order.payment_status.as_deref())
    ));
    Ok(lines.join("\n"))
}

pub async fn set_status(panel: &Panel, order_id: &str, status: &str) -> Result<String> {
    let Some(status) = OrderStatus::parse_option(status) else {
        let options: Vec<String> = OrderStatus::OPTIONS
            .iter()
            .map(|s| s.label().to_string())
            .collect();
        bail!("Unknown status '{}'. Choose one of: {}", status, options.join(", "));
    };
    let message = panel.api.update_order_status(order_id, &status).await?;
    utils::success(&message);
    println!("Booking {} is now {}", order_id, status);
    list(panel, &BookingFilter::default(), None).await
}

pub async fn delete(panel: &Panel, order_id: &str, yes: bool) -> Result<Option<String>> {
    if !utils::confirm(&format!("Delete booking {}?", order_id), yes)? {
        return Ok(None);
    }
    let message = panel.api.delete_order(order_id).await?;
    utils::success(&message);
    list(panel, &BookingFilter::default(), None).await.map(Some)
}

/// Export the filtered list without another round-trip per row
pub async fn export(
    panel: &Panel,
    filter: &BookingFilter,
    format: SheetFormat,
    output: Option<&str>,
    save: bool,
) -> Result<()> {
    let orders = fetch(panel).await?;
    let shown = filter.apply(&orders);
    if shown.is_empty() {
        println!("No bookings match the current filter.");
        return Ok(());
    }
    let content = sheet::render(&shown, format)?;
    let default_name = save.then(|| sheet::default_file_name(format, Local::now().date_naive()));
    utils::write_output(&content, output.or(default_name.as_deref()))
}

pub async fn invoice(
    panel: &Panel,
    order_id: &str,
    format: InvoiceFormat,
    output: Option<&str>,
) -> Result<()> {
    let order = find(panel, order_id).await?;
    let content = invoice::render(
        &order,
        &panel.restaurant_name(),
        format,
        InvoiceLayout::default(),
    );
    utils::write_output(&content, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendor_panel::models::order::Customer;

    fn order(id: &str, name: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            user: Some(Customer {
                first_name: name.to_string(),
                ..Default::default()
            }),
            order_status: status,
            ..Default::default()
        }
    }

    fn orders() -> Vec<Order> {
        vec![
            order("o1", "Asha", OrderStatus::Pending),
            order("o2", "Vikram", OrderStatus::Rejected),
            order("o3", "Meera", OrderStatus::Cancelled),
            order("o4", "Asha", OrderStatus::Delivered),
        ]
    }

    fn ids(orders: Vec<&Order>) -> Vec<&str> {
        orders.into_iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn test_default_filter_keeps_all() {
        let all = orders();
        assert_eq!(BookingFilter::default().apply(&all).len(), 4);
    }

    #[test]
    fn test_cancelled_filter() {
        let all = orders();
        let filter = BookingFilter {
            cancelled: true,
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&all)), vec!["o2", "o3"]);
    }

    #[test]
    fn test_status_and_search_combine() {
        let all = orders();
        let filter = BookingFilter {
            status: Some(OrderStatus::Delivered),
            search: Some("asha".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&all)), vec!["o4"]);
    }

    #[tokio::test]
    async fn test_mutations_show_refetched_list() {
        use axum::extract::Path;
        use axum::routing::{delete as delete_route, get, put};
        use axum::{Json, Router};
        use serde_json::{json, Value};
        use std::sync::atomic::Ordering;
        use std::sync::{Arc, Mutex};

        let stored = Arc::new(Mutex::new(vec![
            json!({ "_id": "o1", "orderStatus": "Pending" }),
            json!({ "_id": "o2", "orderStatus": "Accepted" }),
        ]));
        let (listing, removing, updating) = (stored.clone(), stored.clone(), stored.clone());
        let routes = Router::new()
            .route(
                "/vendor/orders/{vendor_id}",
                get(move || {
                    let listing = listing.clone();
                    async move { Json(Value::Array(listing.lock().unwrap().clone())) }
                }),
            )
            .route(
                "/order/{id}",
                delete_route(move |Path(id): Path<String>| {
                    let removing = removing.clone();
                    async move {
                        removing.lock().unwrap().retain(|o| o["_id"] != id.as_str());
                        Json(json!({ "success": true, "message": "Booking deleted" }))
                    }
                }),
            )
            .route(
                "/order/{id}/status",
                put(move |Path(id): Path<String>, Json(body): Json<Value>| {
                    let updating = updating.clone();
                    async move {
                        for o in updating.lock().unwrap().iter_mut() {
                            if o["_id"] == id.as_str() {
                                o["orderStatus"] = body["orderStatus"].clone();
                            }
                        }
                        Json(json!({ "success": true, "message": "Status updated" }))
                    }
                }),
            );
        let (panel, hits) = crate::commands::testing::signed_in_panel(routes).await;

        let output = set_status(&panel, "o2", "delivered").await.unwrap();
        assert!(output.contains("Delivered"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        let output = delete(&panel, "o1", true).await.unwrap().unwrap();
        assert!(!output.contains("o1"));
        assert!(output.contains("o2"));
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }
}
