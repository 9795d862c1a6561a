//! Restaurant product endpoints

use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::json;
use std::path::Path;

use super::client::{image_part, seg, ApiClient};
use super::endpoints;
use super::error::{ApiError, ApiResult};
use crate::models::product::NewItem;
use crate::models::{ItemStatus, RecommendedItem, RestaurantProduct};
use crate::optimistic::Optimistic;
use crate::validate;

impl NewItem {
    pub fn validate(&self, image: Option<&Path>) -> ApiResult<()> {
        validate::required("Item name", &self.name)?;
        validate::required("Category", &self.category_id)?;
        if !(self.price > 0.0) {
            return Err(ApiError::Validation("Price must be greater than zero".to_string()));
        }
        if self.discount.is_some_and(|d| !(0.0..=100.0).contains(&d)) {
            return Err(ApiError::Validation(
                "Discount must be between 0 and 100".to_string(),
            ));
        }
        validate::existing_image(image, "Item image")
    }
}

fn item_path(product_id: &str, item_id: &str) -> String {
    format!(
        "{}/{}/recommended/{}",
        endpoints::PRODUCTS,
        seg(product_id),
        seg(item_id)
    )
}

impl ApiClient {
    // ========== Product API ==========

    pub async fn products(&self) -> ApiResult<Vec<RestaurantProduct>> {
        self.get(endpoints::PRODUCTS).await
    }

    pub async fn product(&self, product_id: &str) -> ApiResult<RestaurantProduct> {
        self.get(&format!("{}/{}", endpoints::PRODUCTS, seg(product_id)))
            .await
    }

    pub async fn create_item(
        &self,
        vendor_id: &str,
        item: &NewItem,
        image: Option<&Path>,
    ) -> ApiResult<String> {
        item.validate(image)?;
        let mut form = Form::new()
            .text("vendorId", vendor_id.to_string())
            .text("name", item.name.trim().to_string())
            .text("price", item.price.to_string())
            .text("category", item.category_id.clone())
            .text("tags", item.tags.join(","));
        if let Some(v) = item.half_plate_price {
            form = form.text("halfPlatePrice", v.to_string());
        }
        if let Some(v) = item.full_plate_price {
            form = form.text("fullPlatePrice", v.to_string());
        }
        if let Some(v) = item.discount {
            form = form.text("discount", v.to_string());
        }
        if let Some(content) = &item.content {
            form = form.text("content", content.clone());
        }
        if let Some(image) = image {
            form = form.part("image", image_part(image).await?);
        }
        self.multipart(Method::POST, endpoints::PRODUCTS, form).await
    }

    /// Replace a recommended item with its full, merged representation
    pub async fn update_item(&self, product_id: &str, item: &RecommendedItem) -> ApiResult<String> {
        self.put_ack(&item_path(product_id, &item.id), &json!({ "recommended": item }))
            .await
    }

    pub async fn set_item_status(
        &self,
        product_id: &str,
        item_id: &str,
        status: ItemStatus,
    ) -> ApiResult<String> {
        self.put_ack(
            &format!("{}/status", item_path(product_id, item_id)),
            &json!({ "status": status }),
        )
        .await
    }

    /// Flip an item's status optimistically
    ///
    /// `item` shows the new status at once and is restored if the server
    /// rejects the change. `on_change` sees every status the item takes.
    pub async fn toggle_item_status<F>(
        &self,
        product_id: &str,
        item: &mut RecommendedItem,
        on_change: F,
    ) -> ApiResult<ItemStatus>
    where
        F: FnMut(&ItemStatus),
    {
        let next = item.status.toggled();
        let item_id = item.id.clone();
        let mut status = Optimistic::new(item.status);
        let result = status
            .apply(
                next,
                on_change,
                async { self.set_item_status(product_id, &item_id, next).await.map(|_| ()) },
            )
            .await;
        item.status = status.into_inner();
        result.map(|()| item.status)
    }

    pub async fn delete_item(&self, product_id: &str, item_id: &str) -> ApiResult<String> {
        self.delete(&item_path(product_id, item_id)).await
    }
}
