//! Bank account pages

use anyhow::{Context, Result};
use comfy_table::Cell;

use super::utils::{self, count_line};
use super::Panel;
use vendor_panel::filter::search;
use vendor_panel::models::account::AccountEdit;
use vendor_panel::models::BankAccount;

pub async fn list(panel: &Panel, query: Option<&str>) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let accounts = panel.api.accounts(&vendor_id).await?;
    let shown = search(&accounts, query);

    let mut table = utils::table([
        "ID", "Holder", "Account", "IFSC", "Bank", "Branch", "Type", "Primary",
    ]);
    for a in &shown {
        table.add_row(vec![
            Cell::new(&a.id),
            Cell::new(&a.account_holder_name),
            Cell::new(a.masked_number()),
            Cell::new(&a.ifsc_code),
            Cell::new(&a.bank_name),
            Cell::new(&a.branch_name),
            Cell::new(a.account_type),
            Cell::new(if a.is_primary { "★" } else { "" }),
        ]);
    }
    Ok(format!(
        "{}\n\n{}",
        table,
        count_line(shown.len(), accounts.len(), "accounts")
    ))
}

pub async fn add(panel: &Panel, mut account: BankAccount) -> Result<String> {
    account.vendor_id = panel.vendor_id()?;
    account.ifsc_code = account.ifsc_code.trim().to_uppercase();
    let message = panel.api.add_account(&account).await?;
    utils::success(&message);
    list(panel, None).await
}

/// Rebuild the full account from the stored one plus the edits
pub async fn edit(panel: &Panel, account_id: &str, mut edit: AccountEdit) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let accounts = panel.api.accounts(&vendor_id).await?;
    let original = accounts
        .iter()
        .find(|a| a.id == account_id)
        .with_context(|| format!("Account not found: {}", account_id))?;

    edit.ifsc_code = edit.ifsc_code.map(|c| c.trim().to_uppercase());
    let merged = edit.merge_into(original);
    let message = panel.api.update_account(&merged).await?;
    utils::success(&message);
    list(panel, None).await
}

pub async fn delete(panel: &Panel, account_id: &str, yes: bool) -> Result<Option<String>> {
    if !utils::confirm(&format!("Delete bank account {}?", account_id), yes)? {
        return Ok(None);
    }
    let message = panel.api.delete_account(account_id).await?;
    utils::success(&message);
    list(panel, None).await.map(Some)
}

pub async fn set_primary(panel: &Panel, account_id: &str) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let message = panel.api.set_primary_account(&vendor_id, account_id).await?;
    utils::success(&message);
    list(panel, None).await
}
