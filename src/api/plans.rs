//! Plan and payment endpoints

use serde_json::json;

use super::client::{seg, ApiClient};
use super::endpoints;
use super::error::ApiResult;
use crate::models::plan::CheckoutOrder;
use crate::models::{Plan, PlanStatus};

impl ApiClient {
    // ========== Plan API ==========

    pub async fn plans(&self) -> ApiResult<Vec<Plan>> {
        self.get(endpoints::PLANS).await
    }

    pub async fn plan_status(&self, vendor_id: &str) -> ApiResult<PlanStatus> {
        self.get(&format!("{}/{}", endpoints::VENDOR_PLAN, seg(vendor_id)))
            .await
    }

    // ========== Payment API ==========

    pub async fn create_checkout(&self, vendor_id: &str, plan_id: &str) -> ApiResult<CheckoutOrder> {
        self.post(
            endpoints::PAYMENT_CREATE_ORDER,
            &json!({ "vendorId": vendor_id, "planId": plan_id }),
        )
        .await
    }

    /// Report a completed checkout so the server can capture the payment
    pub async fn capture_payment(
        &self,
        vendor_id: &str,
        plan_id: &str,
        order_id: &str,
        payment_id: &str,
    ) -> ApiResult<String> {
        self.post_ack(
            endpoints::PAYMENT_CAPTURE,
            &json!({
                "vendorId": vendor_id,
                "planId": plan_id,
                "orderId": order_id,
                "paymentId": payment_id,
            }),
        )
        .await
    }
}
