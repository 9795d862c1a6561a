//! Category and subcategory pages

use anyhow::{bail, Result};
use comfy_table::Cell;
use std::path::PathBuf;

use super::utils::{self, count_line, or_dash};
use super::Panel;
use vendor_panel::api::{ApiClient, CategoryForm, RenameForm, SubcategoryForm};
use vendor_panel::filter::search;
use vendor_panel::models::Category;

/// Categories owned by the vendor
pub async fn own_categories(api: &ApiClient, vendor_id: &str) -> Result<Vec<Category>> {
    let mut categories = api.categories().await?;
    categories.retain(|c| c.vendor_id.as_deref() == Some(vendor_id));
    Ok(categories)
}

pub async fn list(panel: &Panel, query: Option<&str>) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let categories = own_categories(&panel.api, &vendor_id).await?;
    let shown = search(&categories, query);

    let mut table = utils::table(["ID", "Name", "Subcategories", "Image"]);
    for c in &shown {
        let subs = c
            .subcategories
            .iter()
            .map(|s| s.sub_category_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&c.id),
            Cell::new(&c.category_name),
            Cell::new(if subs.is_empty() { "-".to_string() } else { subs }),
            Cell::new(or_dash(c.image.as_deref())),
        ]);
    }

    Ok(format!(
        "{}\n\n{}",
        table,
        count_line(shown.len(), categories.len(), "categories")
    ))
}

pub async fn view(panel: &Panel, category_id: &str) -> Result<String> {
    let vendor_id = panel.vendor_id()?;
    let categories = own_categories(&panel.api, &vendor_id).await?;
    let Some(category) = categories.into_iter().find(|c| c.id == category_id) else {
        bail!("Category not found: {}", category_id);
    };

    let mut lines = vec![
        format!("Category: {}", category.category_name),
        format!("ID: {}", category.id),
        format!("Image: {}", or_dash(category.image.as_deref())),
    ];
    if let Some(image) = category.image.as_deref() {
        if let Ok(url) = panel.api.base_url().join(image.trim_start_matches('/')) {
            lines.push(format!("Image URL: {}", url));
        }
    }
    lines.push(String::new());
    if category.subcategories.is_empty() {
        lines.push("No subcategories.".to_string());
    } else {
        let mut table = utils::table(["ID", "Subcategory", "Image"]);
        for s in &category.subcategories {
            table.add_row(vec![
                Cell::new(&s.id),
                Cell::new(&s.sub_category_name),
                Cell::new(or_dash(s.image.as_deref())),
            ]);
        }
        lines.push(table.to_string());
    }
    Ok(lines.join("\n"))
}

pub async fn create(panel: &Panel, name: String, image: Option<PathBuf>) -> Result<String> {
    let form = CategoryForm {
        vendor_id: panel.vendor_id()?,
        name,
        image,
    };
    let message = panel.api.create_category(&form).await?;
    utils::success(&message);
    list(panel, None).await
}

pub async fn edit(
    panel: &Panel,
    category_id: &str,
    name: Option<String>,
    image: Option<PathBuf>,
) -> Result<String> {
    let message = panel
        .api
        .update_category(category_id, &RenameForm { name, image })
        .await?;
    utils::success(&message);
    list(panel, None).await
}

pub async fn delete(panel: &Panel, category_id: &str, yes: bool) -> Result<Option<String>> {
    if !utils::confirm(
        &format!("Delete category {} and its subcategories?", category_id),
        yes,
    )? {
        return Ok(None);
    }
    let message = panel.api.delete_category(category_id).await?;
    utils::success(&message);
    list(panel, None).await.map(Some)
}

pub async fn list_subcategories(
    panel: &Panel,
    category_id: &str,
    query: Option<&str>,
) -> Result<String> {
    let subcategories = panel.api.subcategories(category_id).await?;
    let shown = search(&subcategories, query);

    let mut table = utils::table(["ID", "Name", "Image"]);
    for s in &shown {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(&s.sub_category_name),
            Cell::new(or_dash(s.image.as_deref())),
        ]);
    }
    Ok(format!(
        "{}\n\n{}",
        table,
        count_line(shown.len(), subcategories.len(), "subcategories")
    ))
}

pub async fn create_subcategory(
    panel: &Panel,
    category_id: String,
    name: String,
    image: Option<PathBuf>,
) -> Result<String> {
    let form = SubcategoryForm {
        category_id,
        name,
        image,
    };
    let message = panel.api.create_subcategory(&form).await?;
    utils::success(&message);
    list_subcategories(panel, &form.category_id, None).await
}

pub async fn edit_subcategory(
    panel: &Panel,
    category_id: &str,
    subcategory_id: &str,
    name: Option<String>,
    image: Option<PathBuf>,
) -> Result<String> {
    let message = panel
        .api
        .update_subcategory(subcategory_id, &RenameForm { name, image })
        .await?;
    utils::success(&message);
    list_subcategories(panel, category_id, None).await
}

pub async fn delete_subcategory(
    panel: &Panel,
    category_id: &str,
    subcategory_id: &str,
    yes: bool,
) -> Result<Option<String>> {
    if !utils::confirm(&format!("Delete subcategory {}?", subcategory_id), yes)? {
        return Ok(None);
    }
    let message = panel.api.delete_subcategory(subcategory_id).await?;
    utils::success(&message);
    list_subcategories(panel, category_id, None).await.map(Some)
}
