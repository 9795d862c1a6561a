//! Notification count, list and watch

use anyhow::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use std::time::Duration;

use super::utils::{self, count_line};
use super::Panel;
use vendor_panel::filter::search;
use vendor_panel::notify::{self, CountChange};

pub async fn count(panel: &Panel) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let unread = panel.api.unread_count(&vendor_id).await?;
    Ok(format!("{} unread notifications", unread))
}

pub async fn list(panel: &Panel, query: Option<&str>, mark_read: bool) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let mut notifications = panel.api.notifications(&vendor_id).await?;
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let shown = search(&notifications, query);

    let mut table = utils::table(["", "Date", "Title", "Message"]);
    for n in &shown {
        table.add_row(vec![
            Cell::new(if n.is_read { "" } else { "●" }),
            Cell::new(
                n.created_at
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(&n.title),
            Cell::new(&n.message),
        ]);
    }

    if mark_read && notifications.iter().any(|n| !n.is_read) {
        let message = panel.api.mark_notifications_read(&vendor_id).await?;
        utils::success(&message);
    }

    Ok(format!(
        "{}\n\n{}",
        table,
        count_line(shown.len(), notifications.len(), "notifications")
    ))
}

fn describe(change: &CountChange) -> Option<String> {
    match change {
        CountChange::Initial(n) => Some(format!("{} unread notifications", n)),
        CountChange::Increased { from, to } => Some(format!(
            "{} new notification(s), {} unread",
            to - from,
            to
        )),
        CountChange::Decreased { to, .. } => Some(format!("{} unread notifications", to)),
        CountChange::Unchanged(_) => None,
    }
}

/// Poll the unread count until interrupted
pub async fn watch(panel: &Panel, interval_secs: Option<u64>, max_polls: Option<usize>) -> Result<()> {
    let vendor_id = panel.vendor_id()?;
    let secs = interval_secs.unwrap_or(panel.config.poll_interval_secs).max(1);
    println!(
        "Watching notifications every {}s (Ctrl+C to stop)",
        secs
    );

    let api = &panel.api;
    let vendor_id = vendor_id.as_str();
    let polling = notify::poll(
        Duration::from_secs(secs),
        max_polls,
        move || api.unread_count(vendor_id),
        |change| {
            let Some(line) = describe(&change) else {
                return;
            };
            if change.should_alert() {
                print!("\x07");
                println!("{}", line.yellow().bold());
            } else {
                println!("{}", line.dimmed());
            }
        },
    );

    tokio::select! {
        _ = polling => {}
        _ = tokio::signal::ctrl_c() => println!(),
    }
    Ok(())
}
