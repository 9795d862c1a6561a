//! Subscription plans and payment

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::Cell;
use owo_colors::OwoColorize;

use super::utils;
use super::Panel;
use vendor_panel::models::{format_amount, PlanStatus};

pub async fn list(panel: &Panel) -> Result<String> {
    let plans = panel.api.plans().await.context("Failed to load plans")?;

    let mut table = utils::table(["ID", "Plan", "Price", "Duration", "Features"]);
    for p in &plans {
        table.add_row(vec![
            Cell::new(&p.id),
            Cell::new(&p.name),
            Cell::new(format_amount(p.price)),
            Cell::new(
                p.duration_days
                    .map(|d| format!("{} days", d))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(p.features.join("\n")),
        ]);
    }
    Ok(format!("{}\n\n{} plans", table, plans.len()))
}

pub fn describe(status: &PlanStatus) -> String {
    let now = Utc::now();
    let name = status.plan_name.as_deref().unwrap_or("Plan");
    match status.expiry_date {
        _ if status.is_active(now) => {
            let expiry = status
                .expiry_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            format!("{} active until {}", name, expiry)
        }
        Some(expiry) if status.is_purchased => {
            format!("{} expired on {}", name, expiry.format("%Y-%m-%d"))
        }
        _ => "No plan purchased".to_string(),
    }
}

pub async fn status(panel: &Panel) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let status = panel.api.plan_status(&vendor_id).await?;
    let line = describe(&status);
    Ok(if status.is_active(Utc::now()) {
        line.green().to_string()
    } else {
        line.yellow().to_string()
    })
}

/// Create a checkout order; payment happens on the hosted page
pub async fn buy(panel: &Panel, plan_id: &str) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let order = panel.api.create_checkout(&vendor_id, plan_id).await?;

    let mut lines = vec![
        format!("Checkout order: {}", order.order_id),
        format!(
            "Amount: {} {}",
            format_amount(order.amount),
            order.currency.as_deref().unwrap_or("INR")
        ),
    ];
    match &order.payment_url {
        Some(url) => lines.push(format!("Complete payment at: {}", url)),
        None => {
            if let Some(key) = &order.key {
                lines.push(format!("Checkout key: {}", key));
            }
            lines.push("Complete payment in the checkout, then run:".to_string());
        }
    }
    lines.push(format!(
        "  vendor-panel plans capture <PAYMENT_ID> --order {} --plan {}",
        order.order_id, plan_id
    ));
    Ok(lines.join("\n"))
}

pub async fn capture(
    panel: &mut Panel,
    payment_id: &str,
    order_id: &str,
    plan_id: &str,
) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let message = panel
        .api
        .capture_payment(&vendor_id, plan_id, order_id, payment_id)
        .await?;
    utils::success(&message);

    // Profile carries the purchase flag and expiry
    match panel.api.vendor(&vendor_id).await {
        Ok(vendor) => panel.session.update_profile(vendor)?,
        Err(e) => tracing::warn!(error = %e, "failed to refresh profile after payment"),
    }
    status(panel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_describe_states() {
        let now = Utc::now();
        let active = PlanStatus {
            is_purchased: true,
            expiry_date: Some(now + Duration::days(10)),
            plan_name: Some("Gold".to_string()),
        };
        assert!(describe(&active).starts_with("Gold active until"));

        let expired = PlanStatus {
            is_purchased: true,
            expiry_date: Some(now - Duration::days(1)),
            plan_name: None,
        };
        assert!(describe(&expired).starts_with("Plan expired on"));

        assert_eq!(describe(&PlanStatus::default()), "No plan purchased");
    }
}
