//! Vendor bank accounts

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    #[serde(rename = "Savings", alias = "savings")]
    Savings,
    #[serde(rename = "Current", alias = "current")]
    Current,
}

impl AccountType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "saving" => Some(Self::Savings),
            "current" => Some(Self::Current),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => write!(f, "Savings"),
            Self::Current => write!(f, "Current"),
        }
    }
}

/// Payout account; the server keeps at most one primary per vendor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default)]
    pub account_holder_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub ifsc_code: String,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub is_primary: bool,
}

impl BankAccount {
    /// Account number with all but the last four digits hidden
    pub fn masked_number(&self) -> String {
        let n = self.account_number.chars().count();
        if n <= 4 {
            return self.account_number.clone();
        }
        let tail: String = self.account_number.chars().skip(n - 4).collect();
        format!("{}{}", "*".repeat(n - 4), tail)
    }
}

/// Edited account fields; `None` keeps the original value
#[derive(Debug, Clone, Default)]
pub struct AccountEdit {
    pub account_holder_name: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub bank_name: Option<String>,
    pub branch_name: Option<String>,
    pub account_type: Option<AccountType>,
}

impl AccountEdit {
    /// Rebuild the full account object the API expects
    pub fn merge_into(self, original: &BankAccount) -> BankAccount {
        BankAccount {
            id: original.id.clone(),
            vendor_id: original.vendor_id.clone(),
            account_holder_name: self
                .account_holder_name
                .unwrap_or_else(|| original.account_holder_name.clone()),
            account_number: self
                .account_number
                .unwrap_or_else(|| original.account_number.clone()),
            ifsc_code: self.ifsc_code.unwrap_or_else(|| original.ifsc_code.clone()),
            bank_name: self.bank_name.unwrap_or_else(|| original.bank_name.clone()),
            branch_name: self.branch_name.unwrap_or_else(|| original.branch_name.clone()),
            account_type: self.account_type.unwrap_or(original.account_type),
            is_primary: original.is_primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> BankAccount {
        BankAccount {
            id: "a1".to_string(),
            vendor_id: "v1".to_string(),
            account_holder_name: "Ravi Kumar".to_string(),
            account_number: "123456789012".to_string(),
            ifsc_code: "HDFC0001234".to_string(),
            bank_name: "HDFC".to_string(),
            branch_name: "Indiranagar".to_string(),
            account_type: AccountType::Current,
            is_primary: true,
        }
    }

    #[test]
    fn test_masked_number() {
        assert_eq!(account().masked_number(), "********9012");
        let short = BankAccount {
            account_number: "12".to_string(),
            ..Default::default()
        };
        assert_eq!(short.masked_number(), "12");
    }

    #[test]
    fn test_merge_keeps_primary_flag() {
        let edit = AccountEdit {
            branch_name: Some("Koramangala".to_string()),
            ..Default::default()
        };
        let merged = edit.merge_into(&account());
        assert_eq!(merged.branch_name, "Koramangala");
        assert_eq!(merged.ifsc_code, "HDFC0001234");
        assert!(merged.is_primary);
    }

    #[test]
    fn test_new_account_omits_empty_id() {
        let mut new = account();
        new.id.clear();
        let json = serde_json::to_value(&new).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["ifscCode"], "HDFC0001234");
        assert_eq!(json["accountType"], "Current");
    }

    #[test]
    fn test_account_type_parse() {
        assert_eq!(AccountType::parse("SAVINGS"), Some(AccountType::Savings));
        assert_eq!(AccountType::parse("current"), Some(AccountType::Current));
        assert_eq!(AccountType::parse("joint"), None);
    }
}
