//! Restaurant open/closed status

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use super::Panel;
use vendor_panel::models::VendorStatus;

/// What to do with the status
pub enum StatusAction {
    Show,
    Set(VendorStatus),
    Toggle,
}

pub async fn execute(panel: &Panel, action: StatusAction) -> Result<()> {
    let vendor_id = panel.vendor_id()?;
    let current = panel.api.vendor_status(&vendor_id).await?;

    let target = match action {
        StatusAction::Show => {
            println!("Restaurant is {}", paint(current));
            return Ok(());
        }
        StatusAction::Set(status) => status,
        StatusAction::Toggle => current.toggled(),
    };

    if target == current {
        println!("Restaurant is already {}", paint(current));
        return Ok(());
    }

    let message = panel.api.set_vendor_status(&vendor_id, target).await?;
    utils::success(&message);
    println!("Restaurant is now {}", paint(target));
    Ok(())
}

fn paint(status: VendorStatus) -> String {
    match status {
        VendorStatus::Active => status.to_string().green().to_string(),
        VendorStatus::Inactive => status.to_string().red().to_string(),
    }
}
