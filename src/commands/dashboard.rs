//! Dashboard summary

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::collections::BTreeMap;

use super::Panel;
use vendor_panel::models::{format_amount, Order, OrderStatus};

/// Figures shown on the dashboard
#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub total_orders: usize,
    pub today_orders: usize,
    pub delivered_revenue: f64,
    pub by_status: BTreeMap<String, usize>,
}

/// Summarize orders; "today" is the calendar day of `now` in `tz`
pub fn summarize<Tz: TimeZone>(orders: &[Order], now: DateTime<Utc>, tz: &Tz) -> Summary {
    let today = now.with_timezone(tz).date_naive();
    let mut summary = Summary {
        total_orders: orders.len(),
        ..Default::default()
    };
    for order in orders {
        *summary
            .by_status
            .entry(order.order_status.to_string())
            .or_default() += 1;
        if order
            .created_at
            .is_some_and(|d| d.with_timezone(tz).date_naive() == today)
        {
            summary.today_orders += 1;
        }
        if order.order_status == OrderStatus::Delivered {
            summary.delivered_revenue += order.total_payable;
        }
    }
    summary
}

pub async fn execute(panel: &Panel) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let orders = panel.api.orders(&vendor_id).await?;
    let unread = panel.api.unread_count(&vendor_id).await?;
    let summary = summarize(&orders, Utc::now(), &Local);

    let mut lines = vec![
        format!("Dashboard: {}", panel.restaurant_name()),
        String::new(),
        format!("Total orders: {}", summary.total_orders),
        format!("Orders today: {}", summary.today_orders),
        format!("Delivered revenue: {}", format_amount(summary.delivered_revenue)),
        format!("Unread notifications: {}", unread),
    ];
    if !summary.by_status.is_empty() {
        lines.push(String::new());
        for (status, count) in &summary.by_status {
            lines.push(format!("  {:<18} {}", status, count));
        }
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn order(status: OrderStatus, total: f64, created_at: Option<DateTime<Utc>>) -> Order {
        Order {
            id: "o".to_string(),
            order_status: status,
            total_payable: total,
            created_at,
            ..Default::default()
        }
    }

    #[test]
    fn test_summarize() {
        let now = Utc::now();
        let orders = vec![
            order(OrderStatus::Delivered, 200.0, Some(now)),
            order(OrderStatus::Delivered, 100.0, Some(now - Duration::days(2))),
            order(OrderStatus::Pending, 50.0, Some(now)),
            order(OrderStatus::Rejected, 75.0, None),
        ];
        let s = summarize(&orders, now, &Utc);
        assert_eq!(s.total_orders, 4);
        assert_eq!(s.today_orders, 2);
        assert_eq!(s.delivered_revenue, 300.0);
        assert_eq!(s.by_status.get("Delivered"), Some(&2));
        assert_eq!(s.by_status.get("Rejected"), Some(&1));
    }

    #[test]
    fn test_today_uses_vendor_local_day() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        // 00:30 on 18 Oct in IST
        let now = "2026-10-17T19:00:00Z".parse::<DateTime<Utc>>().unwrap();
        // 22:30 on 17 Oct in IST, same UTC day as `now`
        let late = "2026-10-17T17:00:00Z".parse::<DateTime<Utc>>().unwrap();
        // 00:10 on 18 Oct in IST
        let early = "2026-10-17T18:40:00Z".parse::<DateTime<Utc>>().unwrap();

        let orders = vec![
            order(OrderStatus::Pending, 10.0, Some(late)),
            order(OrderStatus::Pending, 10.0, Some(early)),
        ];
        assert_eq!(summarize(&orders[..1], now, &ist).today_orders, 0);
        assert_eq!(summarize(&orders, now, &ist).today_orders, 1);
        assert_eq!(summarize(&orders, now, &Utc).today_orders, 2);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[], Utc::now(), &Utc), Summary::default());
    }
}
