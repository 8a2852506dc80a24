use crate::domain::model::NewStudent;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use serde::Deserialize;

pub const MIN_AGE: u32 = 0;
pub const MAX_AGE: u32 = 150;

/// Raw fields posted by the add-student form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
}

fn form_error(field: &str, err: RegistryError) -> RegistryError {
    let reason = match err {
        RegistryError::InvalidConfigValueError { reason, .. } => reason,
        other => other.to_string(),
    };
    RegistryError::InvalidFormField {
        field: field.to_string(),
        reason,
    }
}

impl StudentForm {
    pub fn into_new_student(self) -> Result<NewStudent> {
        validate_non_empty_string("name", &self.name).map_err(|e| form_error("name", e))?;

        let age_text = self.age.trim();
        let age: u32 = age_text.parse().map_err(|_| RegistryError::InvalidFormField {
            field: "age".to_string(),
            reason: format!("'{}' is not a whole number", age_text),
        })?;
        validate_range("age", age, MIN_AGE, MAX_AGE).map_err(|e| form_error("age", e))?;

        Ok(NewStudent {
            name: self.name.trim().to_string(),
            age,
        })
    }
}
