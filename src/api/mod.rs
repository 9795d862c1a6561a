//! Typed client for the vendor REST API

mod accounts;
mod auth;
mod catalog;
pub mod client;
pub mod error;
mod notifications;
mod orders;
mod plans;
mod products;

pub use auth::{LoginResponse, OtpResponse, VerifyResponse};
pub use catalog::{CategoryForm, RenameForm, SubcategoryForm};
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};

/// Endpoint paths, relative to the configured base URL
pub mod endpoints {
    pub const VENDOR_LOGIN: &str = "vendor/login";
    pub const VENDOR_VERIFY_OTP: &str = "vendor/verify-otp";
    pub const VENDOR_RESEND_OTP: &str = "vendor/resend-otp";
    pub const VENDOR_REGISTER: &str = "vendor/register";
    pub const VENDOR: &str = "vendor";
    pub const VENDOR_STATUS: &str = "vendor/status";
    pub const VENDOR_PLAN: &str = "vendor/plan";
    pub const PLANS: &str = "plans";
    pub const PAYMENT_CREATE_ORDER: &str = "payment/create-order";
    pub const PAYMENT_CAPTURE: &str = "payment/capture";
    pub const CATEGORIES: &str = "restaurant/categories";
    pub const CATEGORY: &str = "restaurant/category";
    pub const SUBCATEGORY: &str = "restaurant/subcategory";
    pub const PRODUCTS: &str = "restaurant-products";
    pub const ACCOUNTS: &str = "vendor/accounts";
    pub const ACCOUNT: &str = "vendor/account";
    pub const ORDERS: &str = "vendor/orders";
    pub const ORDER: &str = "order";
    pub const NOTIFICATIONS: &str = "vendor/notifications";
}

/// Accept a code sent either as a JSON string or a number
pub(crate) fn de_opt_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|c| match c {
        Code::Text(s) => s,
        Code::Number(n) => format!("{:04}", n),
    }))
}
