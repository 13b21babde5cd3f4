use super::{FieldErrors, Form, Validate};
use crate::models::{ExtraFeature, Id, Product, ProductPayload};
use crate::storage::{LocalImage, PRODUCTS_FOLDER};

/// Add/edit form for a shop listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    /// Selected category id, as picked from the category list
    pub category: String,
    pub brand: String,
    pub quantity: i64,
    pub mrp: f64,
    pub selling_price: f64,
    /// Newly picked files, uploaded on submit
    pub images: Vec<LocalImage>,
    /// URLs already stored for the listing being edited
    pub existing_images: Vec<String>,
    pub extra_features: Vec<ExtraFeature>,
}

impl ProductForm {
    /// Pre-fill the form from a stored listing
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.as_ref().map(Id::to_string).unwrap_or_default(),
            brand: product.brand.clone(),
            quantity: i64::from(product.quantity),
            mrp: product.mrp,
            selling_price: product.selling_price,
            images: Vec::new(),
            existing_images: product.images.clone(),
            extra_features: product.extra_features.clone(),
        }
    }

    pub fn add_feature(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extra_features.push(ExtraFeature::new(key, value));
    }

    pub fn remove_feature(&mut self, index: usize) {
        if index < self.extra_features.len() {
            self.extra_features.remove(index);
        }
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }
}

impl Validate for ProductForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("title", &self.title, "Title is required.");
        errors.required("description", &self.description, "Description is required.");
        errors.required("category", &self.category, "Category ID is required.");
        errors.required("brand", &self.brand, "Brand is required.");
        errors.at_least("quantity", self.quantity, 0, "Quantity cannot be negative");
        errors.amount("mrp", self.mrp, "MRP cannot be negative.");
        errors.amount("selling_price", self.selling_price, "Price cannot be negative.");
        if self.images.is_empty() && self.existing_images.is_empty() {
            errors.add("images", "At least one image is required");
        }
        errors.features("extra_features", &self.extra_features);
        errors.into_result()
    }
}

impl Form for ProductForm {
    type Payload = ProductPayload;

    fn upload_folder(&self) -> Option<&'static str> {
        Some(PRODUCTS_FOLDER)
    }

    fn pending_images(&self) -> &[LocalImage] {
        &self.images
    }

    fn payload(&self, uploaded: Vec<String>) -> ProductPayload {
        let category = self.category.trim();
        let category = category
            .parse::<i64>()
            .map(Id::Int)
            .unwrap_or_else(|_| Id::from(category));

        let mut images = self.existing_images.clone();
        images.extend(uploaded);

        ProductPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category,
            brand: self.brand.trim().to_string(),
            quantity: u32::try_from(self.quantity).unwrap_or_default(),
            mrp: self.mrp,
            selling_price: self.selling_price,
            images,
            extra_features: self.extra_features.clone(),
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductForm {
        ProductForm {
            title: "Drafter".to_string(),
            description: "Mini drafter for ED".to_string(),
            category: "4".to_string(),
            brand: "Omega".to_string(),
            quantity: 1,
            mrp: 600.0,
            selling_price: 250.0,
            images: vec![LocalImage::new("drafter.jpg", vec![0])],
            ..Default::default()
        }
    }

    #[test]
    fn filled_form_is_valid() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn blank_form_reports_every_required_field() {
        let errors = ProductForm::default().validate().unwrap_err();
        for field in ["title", "description", "category", "brand", "images"] {
            assert!(!errors.get(field).is_empty(), "missing error for {field}");
        }
        assert!(errors.get("quantity").is_empty());
    }

    #[test]
    fn negative_numbers_and_blank_features_fail() {
        let mut form = filled();
        form.quantity = -1;
        form.selling_price = -10.0;
        form.add_feature("warranty", "");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("quantity"), ["Quantity cannot be negative".to_string()]);
        assert_eq!(errors.get("selling_price"), ["Price cannot be negative.".to_string()]);
        assert_eq!(errors.get("extra_features.0.value"), ["Feature value is required".to_string()]);
    }

    #[test]
    fn nan_prices_are_rejected() {
        let mut form = filled();
        form.mrp = f64::NAN;
        form.selling_price = f64::NAN;
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("mrp"), ["Must be a valid amount.".to_string()]);
        assert_eq!(errors.get("selling_price"), ["Must be a valid amount.".to_string()]);
    }

    #[test]
    fn existing_images_satisfy_image_rule() {
        let mut form = filled();
        form.images.clear();
        form.existing_images = vec!["https://cdn.test/a.jpg".to_string()];
        assert!(form.validate().is_ok());
    }

    #[test]
    fn payload_puts_retained_images_first() {
        let mut form = filled();
        form.existing_images = vec!["https://cdn.test/old.jpg".to_string()];
        let payload = form.payload(vec!["https://cdn.test/new.jpg".to_string()]);
        assert_eq!(payload.category, Id::Int(4));
        assert_eq!(payload.images, vec!["https://cdn.test/old.jpg", "https://cdn.test/new.jpg"]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut form = filled();
        form.reset();
        assert_eq!(form, ProductForm::default());
    }
}
