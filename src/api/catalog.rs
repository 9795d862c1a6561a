//! Category and subcategory endpoints

use reqwest::multipart::Form;
use reqwest::Method;
use std::path::PathBuf;

use super::client::{image_part, seg, ApiClient};
use super::endpoints;
use super::error::{ApiError, ApiResult};
use crate::models::{Category, Subcategory};
use crate::validate;

/// Category create form
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub vendor_id: String,
    pub name: String,
    pub image: Option<PathBuf>,
}

impl CategoryForm {
    /// A new category needs a name and a main image
    pub fn validate(&self) -> ApiResult<()> {
        validate::required("Category name", &self.name)?;
        validate::existing_image(self.image.as_deref(), "Main image")?;
        Ok(())
    }
}

/// Subcategory create form
#[derive(Debug, Clone, Default)]
pub struct SubcategoryForm {
    pub category_id: String,
    pub name: String,
    pub image: Option<PathBuf>,
}

impl SubcategoryForm {
    pub fn validate(&self) -> ApiResult<()> {
        validate::required("Category", &self.category_id)?;
        validate::required("Subcategory name", &self.name)?;
        validate::existing_image(self.image.as_deref(), "Image")?;
        Ok(())
    }
}

/// Partial update for a category or subcategory
#[derive(Debug, Clone, Default)]
pub struct RenameForm {
    pub name: Option<String>,
    pub image: Option<PathBuf>,
}

impl RenameForm {
    fn validate(&self) -> ApiResult<()> {
        let has_name = self.name.as_deref().is_some_and(|n| !n.trim().is_empty());
        if !has_name && self.image.is_none() {
            return Err(ApiError::Validation("Nothing to update".to_string()));
        }
        if self.image.is_some() {
            validate::existing_image(self.image.as_deref(), "Image")?;
        }
        Ok(())
    }
}

impl ApiClient {
    // ========== Category API ==========

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.get(endpoints::CATEGORIES).await
    }

    pub async fn create_category(&self, form: &CategoryForm) -> ApiResult<String> {
        form.validate()?;
        let mut multipart = Form::new()
            .text("categoryName", form.name.trim().to_string())
            .text("vendorId", form.vendor_id.clone());
        if let Some(image) = &form.image {
            multipart = multipart.part("image", image_part(image).await?);
        }
        self.multipart(Method::POST, endpoints::CATEGORY, multipart)
            .await
    }

    pub async fn update_category(&self, category_id: &str, form: &RenameForm) -> ApiResult<String> {
        form.validate()?;
        let multipart = rename_form(form, "categoryName").await?;
        self.multipart(
            Method::PUT,
            &format!("{}/{}", endpoints::CATEGORY, seg(category_id)),
            multipart,
        )
        .await
    }

    pub async fn delete_category(&self, category_id: &str) -> ApiResult<String> {
        self.delete(&format!("{}/{}", endpoints::CATEGORY, seg(category_id)))
            .await
    }

    // ========== Subcategory API ==========

    pub async fn subcategories(&self, category_id: &str) -> ApiResult<Vec<Subcategory>> {
        self.get(&format!(
            "{}/{}/subcategories",
            endpoints::CATEGORY,
            seg(category_id)
        ))
        .await
    }

    pub async fn create_subcategory(&self, form: &SubcategoryForm) -> ApiResult<String> {
        form.validate()?;
        let mut multipart = Form::new()
            .text("subCategoryName", form.name.trim().to_string())
            .text("categoryId", form.category_id.clone());
        if let Some(image) = &form.image {
            multipart = multipart.part("image", image_part(image).await?);
        }
        self.multipart(Method::POST, endpoints::SUBCATEGORY, multipart)
            .await
    }

    pub async fn update_subcategory(
        &self,
        subcategory_id: &str,
        form: &RenameForm,
    ) -> ApiResult<String> {
        form.validate()?;
        let multipart = rename_form(form, "subCategoryName").await?;
        self.multipart(
            Method::PUT,
            &format!("{}/{}", endpoints::SUBCATEGORY, seg(subcategory_id)),
            multipart,
        )
        .await
    }

    pub async fn delete_subcategory(&self, subcategory_id: &str) -> ApiResult<String> {
        self.delete(&format!("{}/{}", endpoints::SUBCATEGORY, seg(subcategory_id)))
            .await
    }
}

async fn rename_form(form: &RenameForm, name_field: &'static str) -> ApiResult<Form> {
    let mut multipart = Form::new();
    if let Some(name) = form.name.as_deref().filter(|n| !n.trim().is_empty()) {
        multipart = multipart.text(name_field, name.trim().to_string());
    }
    if let Some(image) = &form.image {
        multipart = multipart.part("image", image_part(image).await?);
    }
    Ok(multipart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_category_without_image_is_rejected() {
        let form = CategoryForm {
            vendor_id: "v1".to_string(),
            name: "Starters".to_string(),
            image: None,
        };
        let err = form.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Main image"));
    }

    #[test]
    fn test_category_with_blank_name_is_rejected() {
        let image = NamedTempFile::new().unwrap();
        let form = CategoryForm {
            vendor_id: "v1".to_string(),
            name: "   ".to_string(),
            image: Some(image.path().to_path_buf()),
        };
        assert!(form.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_category_with_image_passes() {
        let image = NamedTempFile::new().unwrap();
        let form = CategoryForm {
            vendor_id: "v1".to_string(),
            name: "Starters".to_string(),
            image: Some(image.path().to_path_buf()),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_empty_rename_is_rejected() {
        let form = RenameForm::default();
        assert!(form.validate().unwrap_err().is_validation());
    }
}
