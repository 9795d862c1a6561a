//! Order (booking) endpoints

use serde_json::json;

use super::client::{seg, ApiClient};
use super::endpoints;
use super::error::ApiResult;
use crate::models::{Order, OrderStatus};

impl ApiClient {
    // ========== Order API ==========

    pub async fn orders(&self, vendor_id: &str) -> ApiResult<Vec<Order>> {
        self.get(&format!("{}/{}", endpoints::ORDERS, seg(vendor_id)))
            .await
    }

    /// Request a status change; the server decides whether it is legal
    pub async fn update_order_status(&self, order_id: &str, status: &OrderStatus) -> ApiResult<String> {
        self.put_ack(
            &format!("{}/{}/status", endpoints::ORDER, seg(order_id)),
            &json!({ "orderStatus": status }),
        )
        .await
    }

    pub async fn delete_order(&self, order_id: &str) -> ApiResult<String> {
        self.delete(&format!("{}/{}", endpoints::ORDER, seg(order_id)))
            .await
    }
}
