//! Restaurant categories and subcategories

use serde::{Deserialize, Serialize};

/// Menu category owned by a vendor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default, alias = "name")]
    pub category_name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// Child of a category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default, alias = "subcategoryName", alias = "name")]
    pub sub_category_name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_with_nested_subcategories() {
        let json = r#"{
            "_id": "c1",
            "vendorId": "v1",
            "categoryName": "Starters",
            "image": "uploads/starters.png",
            "subcategories": [
                { "_id": "s1", "categoryId": "c1", "subCategoryName": "Veg" },
                { "id": "s2", "name": "Non-Veg" }
            ]
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.category_name, "Starters");
        assert_eq!(category.subcategories.len(), 2);
        assert_eq!(category.subcategories[1].id, "s2");
        assert_eq!(category.subcategories[1].sub_category_name, "Non-Veg");
    }
}
