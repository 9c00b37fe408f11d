//! Client-side validation for the sign-in and sign-up forms. Validation
//! errors are keyed by form field and never reach the network layer.

use super::{
    identifier::{self, is_valid_email, is_valid_phone, normalize_phone},
    types::{Credentials, RegistrationData},
};
use crate::errors::FieldErrors;
use secrecy::{ExposeSecret, SecretString};

/// Minimum accepted password length at sign-up.
pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Default)]
pub struct SignInForm {
    pub identifier: String,
    pub password: SecretString,
}

impl SignInForm {
    /// # Errors
    /// Returns per-field messages when the identifier or password is unusable.
    pub fn validate(self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();
        let raw_identifier = self.identifier.trim();

        if raw_identifier.is_empty() {
            errors.push("identifier", "Email, phone or organization ID is required.");
        } else if identifier::classify(raw_identifier).is_none() {
            errors.push(
                "identifier",
                "Enter a valid email, phone number or organization ID.",
            );
        }
        if self.password.expose_secret().trim().is_empty() {
            errors.push("password", "Password is required.");
        }

        if errors.is_empty() {
            Ok(Credentials::new(
                identifier::normalize(raw_identifier),
                self.password,
            ))
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub organization_id: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignUpForm {
    /// # Errors
    /// Returns per-field messages for every invalid field.
    pub fn validate(self) -> Result<RegistrationData, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();
        let email = self.email.trim();
        let mobile = self.mobile.trim();
        let organization_id = self.organization_id.trim();
        let password = self.password.expose_secret();

        if name.is_empty() {
            errors.push("name", "Name is required.");
        }
        if email.is_empty() {
            errors.push("email", "Email is required.");
        } else if !is_valid_email(email) {
            errors.push("email", "Enter a valid email address.");
        }
        if mobile.is_empty() {
            errors.push("mobile", "Mobile number is required.");
        } else if !is_valid_phone(mobile) {
            errors.push("mobile", "Enter a valid mobile number.");
        }
        if organization_id.is_empty() {
            errors.push("organizationId", "Organization ID is required.");
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            errors.push(
                "password",
                format!("Password must be at least {MIN_PASSWORD_CHARS} characters."),
            );
        } else if password != self.confirm_password.expose_secret() {
            errors.push("confirmPassword", "Passwords do not match.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RegistrationData {
            name: name.to_string(),
            email: email.to_lowercase(),
            mobile: normalize_phone(mobile),
            organization_id: organization_id.to_string(),
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_sign_up() -> SignUpForm {
        SignUpForm {
            name: " Ada Lovelace ".to_string(),
            email: "Ada@Lab.org".to_string(),
            mobile: "+1 415 555 0123".to_string(),
            organization_id: "ORG-42".to_string(),
            password: SecretString::from("correct horse"),
            confirm_password: SecretString::from("correct horse"),
        }
    }

    #[test]
    fn sign_in_requires_both_fields() {
        let Err(errors) = SignInForm::default().validate() else {
            panic!("empty form must fail");
        };
        assert!(errors.get("identifier").is_some());
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn sign_in_rejects_unclassifiable_identifier() {
        let form = SignInForm {
            identifier: "alice".to_string(),
            password: SecretString::from("pw"),
        };
        let Err(errors) = form.validate() else {
            panic!("bad identifier must fail");
        };
        assert_eq!(errors.len(), 1);
        assert!(errors.get("identifier").is_some());
    }

    #[test]
    fn sign_in_normalizes_identifier() {
        let form = SignInForm {
            identifier: " A@B.com ".to_string(),
            password: SecretString::from("pw"),
        };
        let Ok(credentials) = form.validate() else {
            panic!("valid form must pass");
        };
        assert_eq!(credentials.login_identifier(), Some("a@b.com"));
        assert_eq!(credentials.password.expose_secret(), "pw");
    }

    #[test]
    fn sign_up_produces_registration_data() {
        let Ok(data) = valid_sign_up().validate() else {
            panic!("valid form must pass");
        };
        assert_eq!(data.name, "Ada Lovelace");
        assert_eq!(data.email, "ada@lab.org");
        assert_eq!(data.mobile, "+14155550123");
        assert_eq!(data.organization_id, "ORG-42");
    }

    #[test]
    fn sign_up_reports_each_invalid_field() {
        let form = SignUpForm {
            name: String::new(),
            email: "nope".to_string(),
            mobile: "123".to_string(),
            organization_id: " ".to_string(),
            password: SecretString::from("short"),
            confirm_password: SecretString::from("short"),
        };
        let Err(errors) = form.validate() else {
            panic!("invalid form must fail");
        };
        for field in ["name", "email", "mobile", "organizationId", "password"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn sign_up_checks_confirmation() {
        let mut form = valid_sign_up();
        form.confirm_password = SecretString::from("different horse");
        let Err(errors) = form.validate() else {
            panic!("mismatch must fail");
        };
        assert_eq!(
            errors.get("confirmPassword"),
            Some("Passwords do not match.")
        );
    }
}
