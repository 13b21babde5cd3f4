use super::{FieldErrors, Form, Validate};
use crate::models::{ExtraFeature, Property, PropertyPayload};
use crate::storage::{LocalImage, PROPERTIES_FOLDER};

/// Add/edit form for a housing listing
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub images: Vec<LocalImage>,
    pub existing_images: Vec<String>,
    pub rent_per_month: f64,
    pub security_deposit: f64,
    pub furnished: bool,
    pub total_vacancy: i64,
    pub available_vacancy: i64,
    pub sharing: i64,
    pub custom_features: Vec<ExtraFeature>,
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            location: String::new(),
            images: Vec::new(),
            existing_images: Vec::new(),
            rent_per_month: 0.0,
            security_deposit: 0.0,
            furnished: false,
            total_vacancy: 1,
            available_vacancy: 0,
            sharing: 1,
            custom_features: Vec::new(),
        }
    }
}

impl PropertyForm {
    pub fn from_property(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            description: property.description.clone(),
            location: property.location.clone(),
            images: Vec::new(),
            existing_images: property.images.clone(),
            rent_per_month: property.rent_per_month,
            security_deposit: property.security_deposit,
            furnished: property.furnished,
            total_vacancy: i64::from(property.total_vacancy),
            available_vacancy: i64::from(property.available_vacancy),
            sharing: i64::from(property.sharing),
            custom_features: property.custom_features.clone(),
        }
    }

    pub fn add_feature(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom_features.push(ExtraFeature::new(key, value));
    }

    pub fn remove_feature(&mut self, index: usize) {
        if index < self.custom_features.len() {
            self.custom_features.remove(index);
        }
    }
}

impl Validate for PropertyForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("title", &self.title, "Title is required.");
        errors.required("description", &self.description, "Description is required.");
        errors.required("location", &self.location, "Location is required.");
        if self.images.is_empty() && self.existing_images.is_empty() {
            errors.add("images", "At least one image is required");
        }
        errors.amount("rent_per_month", self.rent_per_month, "Rent cannot be negative.");
        errors.amount(
            "security_deposit",
            self.security_deposit,
            "Security deposit cannot be negative.",
        );
        errors.at_least("total_vacancy", self.total_vacancy, 1, "Total vacancy must be at least 1");
        errors.at_least(
            "available_vacancy",
            self.available_vacancy,
            0,
            "Available vacancy cannot be negative",
        );
        errors.at_least("sharing", self.sharing, 1, "Sharing must be at least 1");
        errors.features("custom_features", &self.custom_features);
        errors.into_result()
    }
}

impl Form for PropertyForm {
    type Payload = PropertyPayload;

    fn upload_folder(&self) -> Option<&'static str> {
        Some(PROPERTIES_FOLDER)
    }

    fn pending_images(&self) -> &[LocalImage] {
        &self.images
    }

    fn payload(&self, uploaded: Vec<String>) -> PropertyPayload {
        let mut images = self.existing_images.clone();
        images.extend(uploaded);

        PropertyPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            images,
            rent_per_month: self.rent_per_month,
            security_deposit: self.security_deposit,
            furnished: self.furnished,
            total_vacancy: u32::try_from(self.total_vacancy).unwrap_or_default(),
            available_vacancy: u32::try_from(self.available_vacancy).unwrap_or_default(),
            sharing: u32::try_from(self.sharing).unwrap_or_default(),
            custom_features: self.custom_features.clone(),
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
