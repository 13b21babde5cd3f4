use super::{FieldErrors, Form, Validate};
use crate::models::{Category, CategoryPayload};
use crate::storage::LocalImage;

/// URL slug for a name: lower-case ASCII alphanumerics joined by single dashes
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Category form. The slug follows the name until it is edited by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    name: String,
    slug: String,
    pub description: String,
    slug_edited: bool,
}

impl CategoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone().unwrap_or_default(),
            slug_edited: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if !self.slug_edited && !self.name.is_empty() {
            self.slug = slugify(&self.name);
        }
    }

    /// Manual slug edit; stops the slug from following the name
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug_edited = true;
        self.slug = slug.into();
    }
}

impl Validate for CategoryForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("name", &self.name, "Name is required.");
        errors.required("slug", &self.slug, "Slug is required.");
        errors.into_result()
    }
}

impl Form for CategoryForm {
    type Payload = CategoryPayload;

    fn payload(&self, _uploaded: Vec<String>) -> CategoryPayload {
        let description = self.description.trim();
        CategoryPayload {
            name: self.name.trim().to_string(),
            slug: self.slug.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        }
    }

    fn pending_images(&self) -> &[LocalImage] {
        &[]
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
