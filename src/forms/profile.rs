use super::{FieldErrors, Form, Validate};
use crate::models::{ProfilePayload, UserProfile};
use crate::storage::LocalImage;

const MOBILE_MIN: usize = 10;
const MOBILE_MAX: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub institute: String,
    pub department: String,
    pub division: String,
    pub mobile_number: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let name = profile
            .name
            .clone()
            .or_else(|| profile.user.as_ref().map(|u| u.username.clone()))
            .unwrap_or_default();

        Self {
            name,
            institute: profile.institute.clone().unwrap_or_default(),
            department: profile.department.clone().unwrap_or_default(),
            division: profile.division.clone().unwrap_or_default(),
            mobile_number: profile.mobile_number.clone().unwrap_or_default(),
        }
    }
}

impl Validate for ProfileForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.required("name", &self.name, "Name is required.");
        errors.required("institute", &self.institute, "Institute is required.");
        errors.required("department", &self.department, "Department is required.");
        errors.required("division", &self.division, "Division is required.");

        let digits = self.mobile_number.trim().chars().count();
        if digits < MOBILE_MIN {
            errors.add("mobile_number", "Mobile number must be at least 10 digits.");
        } else if digits > MOBILE_MAX {
            errors.add("mobile_number", "Mobile number is too long.");
        }
        errors.into_result()
    }
}

impl Form for ProfileForm {
    type Payload = ProfilePayload;

    fn payload(&self, _uploaded: Vec<String>) -> ProfilePayload {
        ProfilePayload {
            name: self.name.trim().to_string(),
            institute: self.institute.trim().to_string(),
            department: self.department.trim().to_string(),
            division: self.division.trim().to_string(),
            mobile_number: self.mobile_number.trim().to_string(),
        }
    }

    fn pending_images(&self) -> &[LocalImage] {
        &[]
    }

    /// Profile edits stay on screen after saving
    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Id, User};

    fn filled() -> ProfileForm {
        ProfileForm {
            name: "asha".to_string(),
            institute: "COEP".to_string(),
            department: "Mechanical".to_string(),
            division: "B".to_string(),
            mobile_number: "9876543210".to_string(),
        }
    }

    #[test]
    fn mobile_length_bounds() {
        let mut form = filled();
        assert!(form.validate().is_ok());

        form.mobile_number = "12345".to_string();
        assert_eq!(
            form.validate().unwrap_err().get("mobile_number"),
            ["Mobile number must be at least 10 digits.".to_string()]
        );

        form.mobile_number = "+91 98765 43210 99".to_string();
        assert_eq!(
            form.validate().unwrap_err().get("mobile_number"),
            ["Mobile number is too long.".to_string()]
        );
    }

    #[test]
    fn prefill_falls_back_to_username() {
        let profile = UserProfile {
            user: Some(User {
                id: Id::Int(5),
                username: "ravi".to_string(),
                email: "ravi@example.com".to_string(),
            }),
            institute: Some("VIT".to_string()),
            ..Default::default()
        };
        let form = ProfileForm::from_profile(&profile);
        assert_eq!(form.name, "ravi");
        assert_eq!(form.institute, "VIT");
        assert!(form.department.is_empty());
    }
}
