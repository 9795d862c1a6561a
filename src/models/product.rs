//! Restaurant products and their recommended items

use serde::{Deserialize, Serialize};
use std::fmt;

use super::de_amount;

/// Availability of a recommended item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    #[serde(rename = "active", alias = "Active")]
    Active,
    #[serde(rename = "inactive", alias = "Inactive")]
    Inactive,
}

impl ItemStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// Category reference, either a bare id or a populated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(rename = "categoryName", default)]
        category_name: String,
    },
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated { id, .. } => id,
        }
    }

    /// Human-readable label, falling back to the id
    pub fn label(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated { category_name, id } if category_name.is_empty() => id,
            Self::Populated { category_name, .. } => category_name,
        }
    }
}

/// Customer review on an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A dish listed by a vendor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedItem {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub price: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub half_plate_price: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub full_plate_price: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub discount: f64,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl RecommendedItem {
    /// Average rating, if any reviews exist
    pub fn average_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: f32 = self.reviews.iter().map(|r| r.rating).sum();
        Some(total / self.reviews.len() as f32)
    }
}

/// Product document holding a vendor's recommended items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProduct {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub recommended: Vec<RecommendedItem>,
}

impl RestaurantProduct {
    pub fn item(&self, item_id: &str) -> Option<&RecommendedItem> {
        self.recommended.iter().find(|i| i.id == item_id)
    }
}

/// Edited fields of a recommended item; `None` keeps the original value
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub half_plate_price: Option<f64>,
    pub full_plate_price: Option<f64>,
    pub discount: Option<f64>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub content: Option<String>,
}

impl ItemEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.half_plate_price.is_none()
            && self.full_plate_price.is_none()
            && self.discount.is_none()
            && self.category_id.is_none()
            && self.tags.is_none()
            && self.content.is_none()
    }

    /// Merge the edits over the original item
    ///
    /// The API replaces the whole item, so untouched fields (status, reviews,
    /// image) must be carried over from the original.
    pub fn merge_into(self, original: &RecommendedItem) -> RecommendedItem {
        RecommendedItem {
            id: original.id.clone(),
            name: self.name.unwrap_or_else(|| original.name.clone()),
            price: self.price.unwrap_or(original.price),
            half_plate_price: self.half_plate_price.unwrap_or(original.half_plate_price),
            full_plate_price: self.full_plate_price.unwrap_or(original.full_plate_price),
            discount: self.discount.unwrap_or(original.discount),
            status: original.status,
            category: self
                .category_id
                .map(CategoryRef::Id)
                .or_else(|| original.category.clone()),
            tags: self.tags.unwrap_or_else(|| original.tags.clone()),
            reviews: original.reviews.clone(),
            content: self.content.or_else(|| original.content.clone()),
            image: original.image.clone(),
        }
    }
}

/// Fields for a new recommended item (sent as multipart)
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub half_plate_price: Option<f64>,
    pub full_plate_price: Option<f64>,
    pub discount: Option<f64>,
    pub category_id: String,
    pub tags: Vec<String>,
    pub content: Option<String>,
}
