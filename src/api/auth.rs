//! Vendor authentication and profile endpoints

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::client::{seg, ApiClient};
use super::endpoints;
use super::error::ApiResult;
use crate::models::vendor::NewVendor;
use crate::models::{Vendor, VendorStatus};

/// First login step; the server echoes the OTP for autofill
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "_id", alias = "id")]
    pub vendor_id: String,
    #[serde(default, deserialize_with = "super::de_opt_code")]
    pub otp: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub vendor: Vendor,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpResponse {
    #[serde(default, deserialize_with = "super::de_opt_code")]
    pub otp: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    vendor_id: &'a str,
    otp: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct StatusBody {
    status: VendorStatus,
}

impl ApiClient {
    // ========== Auth API ==========

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.post(
            endpoints::VENDOR_LOGIN,
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn verify_otp(&self, vendor_id: &str, otp: &str) -> ApiResult<VerifyResponse> {
        self.post(endpoints::VENDOR_VERIFY_OTP, &VerifyRequest { vendor_id, otp })
            .await
    }

    pub async fn resend_otp(&self, vendor_id: &str) -> ApiResult<OtpResponse> {
        self.post(endpoints::VENDOR_RESEND_OTP, &json!({ "vendorId": vendor_id }))
            .await
    }

    pub async fn register(&self, vendor: &NewVendor) -> ApiResult<String> {
        self.post_ack(endpoints::VENDOR_REGISTER, vendor).await
    }

    // ========== Vendor API ==========

    pub async fn vendor(&self, vendor_id: &str) -> ApiResult<Vendor> {
        self.get(&format!("{}/{}", endpoints::VENDOR, seg(vendor_id)))
            .await
    }

    pub async fn vendor_status(&self, vendor_id: &str) -> ApiResult<VendorStatus> {
        let body: StatusBody = self
            .get(&format!("{}/{}", endpoints::VENDOR_STATUS, seg(vendor_id)))
            .await?;
        Ok(body.status)
    }

    pub async fn set_vendor_status(
        &self,
        vendor_id: &str,
        status: VendorStatus,
    ) -> ApiResult<String> {
        self.put_ack(
            &format!("{}/{}", endpoints::VENDOR_STATUS, seg(vendor_id)),
            &json!({ "status": status }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_numeric_otp() {
        let r: LoginResponse =
            serde_json::from_str(r#"{ "success": true, "vendorId": "v1", "otp": 42 }"#).unwrap();
        assert_eq!(r.vendor_id, "v1");
        assert_eq!(r.otp.as_deref(), Some("0042"));
    }

    #[test]
    fn test_login_response_without_otp() {
        let r: LoginResponse = serde_json::from_str(r#"{ "vendorId": "v1" }"#).unwrap();
        assert!(r.otp.is_none());
    }
}
