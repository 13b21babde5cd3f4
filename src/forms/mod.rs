//! Form state, schema validation, and the submit flow.
//!
//! A form validates locally, uploads any picked images, then hands its payload to
//! the matching REST call. See [`submit`] for the sequencing.

mod category;
mod product;
mod profile;
mod property;
pub mod submit;
mod validation;

pub use category::{slugify, CategoryForm};
pub use product::ProductForm;
pub use profile::ProfileForm;
pub use property::PropertyForm;
pub use submit::{submit, Outcome};
pub use validation::{FieldErrors, Validate};

use crate::storage::LocalImage;

/// A submittable form
pub trait Form: Validate {
    type Payload;

    /// Bucket folder for this form's images; `None` when it has no uploads
    fn upload_folder(&self) -> Option<&'static str> {
        None
    }

    /// Local files to upload before sending
    fn pending_images(&self) -> &[LocalImage];

    /// Build the request body, with `uploaded` public URLs in place of local files
    fn payload(&self, uploaded: Vec<String>) -> Self::Payload;

    /// Clear the form after a successful submission
    fn reset(&mut self);
}
