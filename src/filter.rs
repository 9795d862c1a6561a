//! Free-text search over list pages

use crate::models::{
    BankAccount, Category, Notification, Order, RecommendedItem, Subcategory,
};

/// Fields a record shows in its list row
pub trait Searchable {
    fn display_fields(&self) -> Vec<String>;

    /// Case-insensitive substring match on any display field
    fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.display_fields()
            .iter()
            .any(|f| f.to_lowercase().contains(&needle))
    }
}

/// Records matching `query`; `None` or blank keeps everything
pub fn search<'a, T: Searchable>(items: &'a [T], query: Option<&str>) -> Vec<&'a T> {
    match query {
        Some(q) if !q.trim().is_empty() => items.iter().filter(|i| i.matches(q)).collect(),
        _ => items.iter().collect(),
    }
}

impl Searchable for Category {
    fn display_fields(&self) -> Vec<String> {
        let mut fields = vec![self.id.clone(), self.category_name.clone()];
        fields.extend(self.subcategories.iter().map(|s| s.sub_category_name.clone()));
        fields
    }
}

impl Searchable for Subcategory {
    fn display_fields(&self) -> Vec<String> {
        vec![self.id.clone(), self.sub_category_name.clone()]
    }
}

impl Searchable for RecommendedItem {
    fn display_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.id.clone(),
            self.name.clone(),
            self.status.to_string(),
            self.price.to_string(),
        ];
        if let Some(category) = &self.category {
            fields.push(category.label().to_string());
        }
        fields.extend(self.tags.iter().cloned());
        fields
    }
}

impl Searchable for BankAccount {
    fn display_fields(&self) -> Vec<String> {
        vec![
            self.account_holder_name.clone(),
            self.account_number.clone(),
            self.ifsc_code.clone(),
            self.bank_name.clone(),
            self.branch_name.clone(),
            self.account_type.to_string(),
        ]
    }
}

impl Searchable for Order {
    fn display_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.id.clone(),
            self.customer_name(),
            self.order_status.to_string(),
            self.total_payable.to_string(),
        ];
        fields.extend(self.payment_method.clone());
        fields.extend(self.payment_status.clone());
        fields.extend(self.delivery_address.clone());
        if let Some(user) = &self.user {
            fields.extend(user.email.clone());
            fields.extend(user.mobile.clone());
        }
        fields.extend(self.products.iter().map(|p| p.name.clone()));
        fields
    }
}

impl Searchable for Notification {
    fn display_fields(&self) -> Vec<String> {
        vec![self.title.clone(), self.message.clone()]
    }
}
