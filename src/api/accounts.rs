//! Bank account endpoints

use serde_json::json;

use super::client::{seg, ApiClient};
use super::endpoints;
use super::error::ApiResult;
use crate::models::BankAccount;
use crate::validate;

impl BankAccount {
    /// Checks applied before an add or edit is submitted
    pub fn validate(&self) -> ApiResult<()> {
        validate::required("Account holder name", &self.account_holder_name)?;
        validate::account_number(&self.account_number)?;
        validate::ifsc(&self.ifsc_code)?;
        validate::required("Bank name", &self.bank_name)?;
        validate::required("Branch name", &self.branch_name)?;
        Ok(())
    }
}

impl ApiClient {
    // ========== Account API ==========

    pub async fn accounts(&self, vendor_id: &str) -> ApiResult<Vec<BankAccount>> {
        self.get(&format!("{}/{}", endpoints::ACCOUNTS, seg(vendor_id)))
            .await
    }

    pub async fn add_account(&self, account: &BankAccount) -> ApiResult<String> {
        account.validate()?;
        self.post_ack(endpoints::ACCOUNT, account).await
    }

    /// Send the full account object; the API does not accept partial patches
    pub async fn update_account(&self, account: &BankAccount) -> ApiResult<String> {
        account.validate()?;
        self.put_ack(
            &format!("{}/{}", endpoints::ACCOUNT, seg(&account.id)),
            account,
        )
        .await
    }

    pub async fn delete_account(&self, account_id: &str) -> ApiResult<String> {
        self.delete(&format!("{}/{}", endpoints::ACCOUNT, seg(account_id)))
            .await
    }

    /// Ask the server to make this the primary account
    pub async fn set_primary_account(&self, vendor_id: &str, account_id: &str) -> ApiResult<String> {
        self.put_ack(
            &format!("{}/{}/primary", endpoints::ACCOUNT, seg(account_id)),
            &json!({ "vendorId": vendor_id, "isPrimary": true }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{AccountType, BankAccount};

    fn account(ifsc: &str) -> BankAccount {
        BankAccount {
            vendor_id: "v1".to_string(),
            account_holder_name: "Ravi".to_string(),
            account_number: "123456789".to_string(),
            ifsc_code: ifsc.to_string(),
            bank_name: "SBI".to_string(),
            branch_name: "MG Road".to_string(),
            account_type: AccountType::Savings,
            ..Default::default()
        }
    }

    #[test]
    fn test_ifsc_must_be_eleven_chars() {
        assert!(account("SBIN0000001").validate().is_ok());
        let err = account("SBIN001").validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("IFSC"));
    }

    #[test]
    fn test_required_fields() {
        let mut missing = account("SBIN0000001");
        missing.branch_name.clear();
        assert!(missing.validate().is_err());
    }
}
