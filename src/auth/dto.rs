use serde::Deserialize;

use crate::error::FormError;

/// Registration form body. Missing fields deserialize as blank.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub login: String,
    #[serde(default, rename = "pass")]
    pub password: String,
    #[serde(default, rename = "rep_pass")]
    pub confirm: String,
}

impl RegisterForm {
    /// Field checks that need no storage access, first failure wins.
    pub fn validate(&self) -> Result<(), FormError> {
        if is_blank(&self.login) || is_blank(&self.password) || is_blank(&self.confirm) {
            return Err(FormError::MissingFields);
        }
        if self.password != self.confirm {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Login form body.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub login: String,
    #[serde(default, rename = "pass")]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if is_blank(&self.login) || is_blank(&self.password) {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
