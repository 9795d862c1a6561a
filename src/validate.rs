//! Form checks run before any request is sent

use std::path::Path;

use crate::api::{ApiError, ApiResult};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const OTP_LEN: usize = 4;
pub const IFSC_LEN: usize = 11;
pub const MOBILE_LEN: usize = 10;

fn invalid(message: impl Into<String>) -> ApiError {
    ApiError::Validation(message.into())
}

pub fn required(label: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{} is required", label)));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace
pub fn email(value: &str) -> ApiResult<()> {
    let value = value.trim();
    let bad = || invalid("Please enter a valid email address");

    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(bad());
    }
    let (local, domain) = value.split_once('@').ok_or_else(bad)?;
    if local.is_empty() || domain.contains('@') {
        return Err(bad());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(bad)?;
    if host.is_empty() || tld.is_empty() {
        return Err(bad());
    }
    Ok(())
}

pub fn password(value: &str) -> ApiResult<()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn otp(value: &str) -> ApiResult<()> {
    if value.len() != OTP_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("OTP must be exactly {} digits", OTP_LEN)));
    }
    Ok(())
}

pub fn ifsc(value: &str) -> ApiResult<()> {
    if value.trim().chars().count() != IFSC_LEN {
        return Err(invalid(format!(
            "IFSC code must be exactly {} characters",
            IFSC_LEN
        )));
    }
    Ok(())
}

pub fn account_number(value: &str) -> ApiResult<()> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("Account number must contain digits only"));
    }
    Ok(())
}

pub fn mobile(value: &str) -> ApiResult<()> {
    let value = value.trim();
    if value.len() != MOBILE_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!(
            "Mobile number must be {} digits",
            MOBILE_LEN
        )));
    }
    Ok(())
}

/// The image must be given and point at a readable file
pub fn existing_image(path: Option<&Path>, label: &str) -> ApiResult<()> {
    match path {
        None => Err(invalid(format!("{} is required", label))),
        Some(p) if !p.is_file() => Err(invalid(format!(
            "{} not found: {}",
            label,
            p.display()
        ))),
        Some(_) => Ok(()),
    }
}
