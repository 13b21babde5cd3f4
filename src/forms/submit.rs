use super::{CategoryForm, Form, ProductForm, ProfileForm, PropertyForm};
use crate::api::ApiClient;
use crate::error::{MarketError, Result};
use crate::models::{Category, Id, Product, Property, UserProfile};
use crate::notify::{Notice, Notifier};
use crate::storage::{upload_all, ObjectStorage};
use std::future::Future;
use tracing::{debug, info};

/// Notification text for one kind of submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub success: &'static str,
    pub detail: Option<&'static str>,
    pub failure: &'static str,
    /// Clear the form once the backend accepts it
    pub reset: bool,
}

pub const ADD_PRODUCT: Outcome = Outcome {
    success: "Product Added Successfully!",
    detail: Some("Wait For Approval"),
    failure: "Error Adding Product",
    reset: true,
};

pub const EDIT_PRODUCT: Outcome = Outcome {
    success: "Product Updated Successfully!",
    detail: None,
    failure: "Error Updating Product",
    reset: false,
};

pub const ADD_PROPERTY: Outcome = Outcome {
    success: "Property Added Successfully!",
    detail: None,
    failure: "Error Adding Property",
    reset: true,
};

pub const EDIT_PROPERTY: Outcome = Outcome {
    success: "Property Updated Successfully!",
    detail: None,
    failure: "Error Updating Property",
    reset: false,
};

pub const ADD_CATEGORY: Outcome = Outcome {
    success: "Category Added Successfully!",
    detail: None,
    failure: "Error Adding Category",
    reset: true,
};

pub const EDIT_CATEGORY: Outcome = Outcome {
    success: "Category Updated Successfully!",
    detail: None,
    failure: "Error Updating Category",
    reset: false,
};

pub const UPDATE_PROFILE: Outcome = Outcome {
    success: "Profile Updated Successfully!",
    detail: None,
    failure: "Something Unexpected Happened!",
    reset: false,
};

const UPLOAD_FAILED: &str = "Error Uploading Images";

async fn fail(notifier: &dyn Notifier, title: &str, err: MarketError) -> MarketError {
    notifier
        .notify(Notice::failure(title).with_description(err.to_string()))
        .await;
    err
}

/// Validate `form`, upload its images, and pass the payload to `send`.
///
/// - Invalid input returns [`MarketError::Validation`] before any I/O and emits no notice.
/// - A failed upload emits a destructive notice and skips `send`.
/// - A failed `send` emits a destructive notice; the form keeps its values.
/// - Success emits the outcome's confirmation and resets the form if configured.
pub async fn submit<F, T, S, Fut>(
    form: &mut F,
    storage: Option<&dyn ObjectStorage>,
    notifier: &dyn Notifier,
    outcome: Outcome,
    send: S,
) -> Result<T>
where
    F: Form,
    S: FnOnce(F::Payload) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Err(errors) = form.validate() {
        debug!("Submission blocked: {}", errors);
        return Err(MarketError::Validation(errors));
    }

    let mut uploaded = Vec::new();
    if let (Some(folder), images) = (form.upload_folder(), form.pending_images()) {
        if !images.is_empty() {
            let Some(storage) = storage else {
                let err = MarketError::Config("no object storage configured".to_string());
                return Err(fail(notifier, UPLOAD_FAILED, err).await);
            };
            uploaded = match upload_all(storage, folder, images).await {
                Ok(urls) => urls,
                Err(err) => return Err(fail(notifier, UPLOAD_FAILED, err).await),
            };
        }
    }

    match send(form.payload(uploaded)).await {
        Ok(value) => {
            let mut notice = Notice::success(outcome.success);
            if let Some(detail) = outcome.detail {
                notice = notice.with_description(detail);
            }
            notifier.notify(notice).await;
            if outcome.reset {
                form.reset();
            }
            info!("{}", outcome.success);
            Ok(value)
        }
        Err(err) => Err(fail(notifier, outcome.failure, err).await),
    }
}

pub async fn add_product(
    api: &ApiClient,
    storage: &dyn ObjectStorage,
    notifier: &dyn Notifier,
    form: &mut ProductForm,
) -> Result<Product> {
    submit(form, Some(storage), notifier, ADD_PRODUCT, |payload| async move {
        api.shop().add_product(&payload).await
    })
    .await
}

pub async fn edit_product(
    api: &ApiClient,
    storage: &dyn ObjectStorage,
    notifier: &dyn Notifier,
    id: &Id,
    form: &mut ProductForm,
) -> Result<Product> {
    submit(form, Some(storage), notifier, EDIT_PRODUCT, |payload| async move {
        api.shop().edit_product(id, &payload).await
    })
    .await
}

pub async fn add_property(
    api: &ApiClient,
    storage: &dyn ObjectStorage,
    notifier: &dyn Notifier,
    form: &mut PropertyForm,
) -> Result<Property> {
    submit(form, Some(storage), notifier, ADD_PROPERTY, |payload| async move {
        api.rent().add_property(&payload).await
    })
    .await
}

pub async fn edit_property(
    api: &ApiClient,
    storage: &dyn ObjectStorage,
    notifier: &dyn Notifier,
    id: &Id,
    form: &mut PropertyForm,
) -> Result<Property> {
    submit(form, Some(storage), notifier, EDIT_PROPERTY, |payload| async move {
        api.rent().edit_property(id, &payload).await
    })
    .await
}

pub async fn add_category(
    api: &ApiClient,
    notifier: &dyn Notifier,
    form: &mut CategoryForm,
) -> Result<Category> {
    submit(form, None, notifier, ADD_CATEGORY, |payload| async move {
        api.admin().add_category(&payload).await
    })
    .await
}

pub async fn edit_category(
    api: &ApiClient,
    notifier: &dyn Notifier,
    id: &Id,
    form: &mut CategoryForm,
) -> Result<Category> {
    submit(form, None, notifier, EDIT_CATEGORY, |payload| async move {
        api.admin().edit_category(id, &payload).await
    })
    .await
}

pub async fn update_profile(
    api: &ApiClient,
    notifier: &dyn Notifier,
    form: &mut ProfileForm,
) -> Result<UserProfile> {
    submit(form, None, notifier, UPDATE_PROFILE, |payload| async move {
        api.profile().update(&payload).await
    })
    .await
}
