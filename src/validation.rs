use validator::{Validate, ValidationErrors};

use crate::error::AppError;

pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const CREDENTIALS_REQUIRED: &str = "Username and password are required";
pub const NOTE_REQUIRED: &str = "Note text cannot be empty";
pub const USERNAME_TOO_LONG: &str = "Username must be at most 80 characters";
pub const EMAIL_TOO_LONG: &str = "Email must be at most 120 characters";
pub const PASSWORD_TOO_LONG: &str = "Password must be at most 72 bytes";

/// bcrypt ignores everything past this many bytes of the password.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Validate)]
pub struct Registration {
    #[validate(length(min = 1, max = 80, code = "username_length"))]
    pub username: String,
    #[validate(length(min = 1, max = 120, code = "email_length"), email(code = "email"))]
    pub email: String,
    #[validate(length(min = 1, code = "required"))]
    pub password: String,
    #[validate(
        length(min = 1, code = "required"),
        must_match(other = "password", code = "mismatch")
    )]
    pub confirm_password: String,
}

#[derive(Debug, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, code = "required"))]
    pub username: String,
    #[validate(length(min = 1, code = "required"))]
    pub password: String,
}

fn has_code(errors: &ValidationErrors, code: &str) -> bool {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .any(|error| error.code == code)
}

impl Registration {
    fn is_incomplete(&self) -> bool {
        [
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ]
        .iter()
        .any(|field| field.is_empty())
    }

    /// Checks the form in the order the visitor is told about problems:
    /// missing fields, mismatched passwords, overlong fields, then a
    /// malformed email.
    pub fn check(&self) -> Result<(), AppError> {
        let errors = self.validate().err();
        let has = |code: &str| errors.as_ref().is_some_and(|e| has_code(e, code));

        let message = if self.is_incomplete() {
            FIELDS_REQUIRED
        } else if has("mismatch") {
            PASSWORDS_MISMATCH
        } else if has("username_length") {
            USERNAME_TOO_LONG
        } else if has("email_length") {
            EMAIL_TOO_LONG
        } else if self.password.len() > MAX_PASSWORD_BYTES {
            PASSWORD_TOO_LONG
        } else if errors.is_some() {
            INVALID_EMAIL
        } else {
            return Ok(());
        };

        Err(AppError::Validation(message.to_string()))
    }
}

impl Credentials {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|_| AppError::Validation(CREDENTIALS_REQUIRED.to_string()))
    }
}
