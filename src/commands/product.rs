//! Product (recommended item) pages

use anyhow::{bail, Context, Result};
use comfy_table::Cell;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use super::utils::{self, count_line, or_dash};
use super::Panel;
use vendor_panel::filter::{search, Searchable};
use vendor_panel::models::product::{ItemEdit, NewItem};
use vendor_panel::models::{format_amount, ItemStatus, RecommendedItem};

/// An item together with the product document that holds it
pub struct ListedItem {
    pub product_id: String,
    pub item: RecommendedItem,
}

impl Searchable for ListedItem {
    fn display_fields(&self) -> Vec<String> {
        let mut fields = self.item.display_fields();
        fields.push(self.product_id.clone());
        fields
    }
}

async fn vendor_items(panel: &Panel) -> Result<Vec<ListedItem>> {
    let vendor_id = panel.vendor_id()?;
    let products = panel.api.products().await?;
    Ok(products
        .into_iter()
        .filter(|p| p.vendor_id.as_deref() == Some(vendor_id.as_str()))
        .flat_map(|p| {
            let product_id = p.id;
            p.recommended.into_iter().map(move |item| ListedItem {
                product_id: product_id.clone(),
                item,
            })
        })
        .collect())
}

fn status_cell(status: ItemStatus) -> String {
    match status {
        ItemStatus::Active => "active".green().to_string(),
        ItemStatus::Inactive => "inactive".red().to_string(),
    }
}

pub async fn list(panel: &Panel, query: Option<&str>) -> Result<String> {
    let listed = vendor_items(panel).await?;
    let shown = search(&listed, query);

    let mut table = utils::table([
        "Product", "Item", "Name", "Price", "Half", "Full", "Discount", "Category", "Status",
    ]);
    for ListedItem { product_id, item } in shown.iter().copied() {
        table.add_row(vec![
            Cell::new(product_id),
            Cell::new(&item.id),
            Cell::new(&item.name),
            Cell::new(format_amount(item.price)),
            Cell::new(format_amount(item.half_plate_price)),
            Cell::new(format_amount(item.full_plate_price)),
            Cell::new(format!("{}%", item.discount)),
            Cell::new(or_dash(item.category.as_ref().map(|c| c.label()))),
            Cell::new(status_cell(item.status)),
        ]);
    }
    Ok(format!(
        "{}\n\n{}",
        table,
        count_line(shown.len(), listed.len(), "items")
    ))
}

async fn fetch_item(panel: &Panel, product_id: &str, item_id: &str) -> Result<RecommendedItem> {
    let product = panel.api.product(product_id).await?;
    product
        .item(item_id)
        .cloned()
        .with_context(|| format!("Item {} not found in product {}", item_id, product_id))
}

pub async fn view(panel: &Panel, product_id: &str, item_id: &str) -> Result<String> {
    let item = fetch_item(panel, product_id, item_id).await?;

    let mut lines = vec![
        format!("Item: {}", item.name),
        format!("ID: {}", item.id),
        format!("Status: {}", status_cell(item.status)),
        format!("Price: {}", format_amount(item.price)),
        format!("Half plate: {}", format_amount(item.half_plate_price)),
        format!("Full plate: {}", format_amount(item.full_plate_price)),
        format!("Discount: {}%", item.discount),
        format!(
            "Category: {}",
            or_dash(item.category.as_ref().map(|c| c.label()))
        ),
        format!(
            "Tags: {}",
            if item.tags.is_empty() {
                "-".to_string()
            } else {
                item.tags.join(", ")
            }
        ),
        format!("Image: {}", or_dash(item.image.as_deref())),
    ];
    if let Some(content) = item.content.as_deref().filter(|c| !c.is_empty()) {
        lines.push(String::new());
        lines.push(content.to_string());
    }

    lines.push(String::new());
    match item.average_rating() {
        Some(avg) => {
            lines.push(format!("Reviews: {} (avg {:.1})", item.reviews.len(), avg));
            for review in &item.reviews {
                lines.push(format!(
                    "  {} {:.1}  {}",
                    or_dash(review.user_name.as_deref()),
                    review.rating,
                    review.comment.as_deref().unwrap_or("")
                ));
            }
        }
        None => lines.push("No reviews yet.".to_string()),
    }
    Ok(lines.join("\n"))
}

pub async fn create(panel: &Panel, item: NewItem, image: Option<PathBuf>) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let message = panel
        .api
        .create_item(&vendor_id, &item, image.as_deref())
        .await?;
    utils::success(&message);
    list(panel, None).await
}

/// Merge the edits over the stored item and send the whole item back
pub async fn edit(
    panel: &Panel,
    product_id: &str,
    item_id: &str,
    edit: ItemEdit,
) -> Result<String> {
    if edit.is_empty() {
        bail!("Nothing to update. Pass at least one field to change");
    }
    let original = fetch_item(panel, product_id, item_id).await?;
    let merged = edit.merge_into(&original);
    let message = panel.api.update_item(product_id, &merged).await?;
    utils::success(&message);
    list(panel, None).await
}

pub async fn toggle(panel: &Panel, product_id: &str, item_id: &str) -> Result<String> {
    let mut item = fetch_item(panel, product_id, item_id).await?;
    let result = panel
        .api
        .toggle_item_status(product_id, &mut item, |status| {
            println!("{}: {}", item_id, status_cell(*status));
        })
        .await;

    match result {
        Ok(status) => {
            utils::success(&format!("{} is now {}", item.name, status));
            list(panel, None).await
        }
        Err(e) => Err(e).context(format!("Status change reverted, {} is {}", item.name, item.status)),
    }
}

pub async fn delete(
    panel: &Panel,
    product_id: &str,
    item_id: &str,
    yes: bool,
) -> Result<Option<String>> {
    if !utils::confirm(&format!("Delete item {}?", item_id), yes)? {
        return Ok(None);
    }
    let message = panel.api.delete_item(product_id, item_id).await?;
    utils::success(&message);
    list(panel, None).await.map(Some)
}
