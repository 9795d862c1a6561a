//! Notification endpoints

use serde::Deserialize;

use super::client::{seg, ApiClient};
use super::endpoints;
use super::error::ApiResult;
use crate::models::Notification;

#[derive(Debug, Deserialize)]
struct UnreadCount {
    #[serde(alias = "unreadCount")]
    count: u64,
}

impl ApiClient {
    // ========== Notification API ==========

    pub async fn unread_count(&self, vendor_id: &str) -> ApiResult<u64> {
        let body: UnreadCount = self
            .get(&format!(
                "{}/{}/unread-count",
                endpoints::NOTIFICATIONS,
                seg(vendor_id)
            ))
            .await?;
        Ok(body.count)
    }

    pub async fn notifications(&self, vendor_id: &str) -> ApiResult<Vec<Notification>> {
        self.get(&format!("{}/{}", endpoints::NOTIFICATIONS, seg(vendor_id)))
            .await
    }

    pub async fn mark_notifications_read(&self, vendor_id: &str) -> ApiResult<String> {
        self.put_ack(
            &format!("{}/{}/read", endpoints::NOTIFICATIONS, seg(vendor_id)),
            &serde_json::json!({}),
        )
        .await
    }
}
