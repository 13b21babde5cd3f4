use crate::models::ExtraFeature;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation messages, keyed by field path (`title`, `extra_features.1.key`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Messages for one field, empty if it passed
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub(crate) fn required(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    pub(crate) fn at_least<T: PartialOrd>(&mut self, field: &str, value: T, min: T, message: &str) {
        // Unordered values (NaN) fail too
        if !matches!(value.partial_cmp(&min), Some(Ordering::Greater | Ordering::Equal)) {
            self.add(field, message);
        }
    }

    /// Money field: finite and not negative
    pub(crate) fn amount(&mut self, field: &str, value: f64, message: &str) {
        if !value.is_finite() {
            self.add(field, "Must be a valid amount.");
        } else {
            self.at_least(field, value, 0.0, message);
        }
    }

    /// Every key/value pair must be filled in
    pub(crate) fn features(&mut self, field: &str, features: &[ExtraFeature]) {
        for (i, feature) in features.iter().enumerate() {
            self.required(&format!("{}.{}.key", field, i), &feature.key, "Feature key is required");
            self.required(
                &format!("{}.{}.value", field, i),
                &feature.value,
                "Feature value is required",
            );
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Schema check run before anything is sent
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}
