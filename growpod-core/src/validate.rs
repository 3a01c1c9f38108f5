//! Client-side form validation.
//!
//! Forms are checked before any request is built, so an invalid form never
//! reaches the backend.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::model::Plant;

static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("valid zip code pattern"));

static COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid count pattern"));

/// Plant type used when the form leaves it unset.
pub const DEFAULT_PLANT_TYPE_ID: &str = "1";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid {field}: {value}")]
    Pattern { field: &'static str, value: String },

    #[error("{field} must be at least {min}")]
    Min { field: &'static str, min: u64 },
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(value)
    }
}

/// A US zip code (`12345` or `12345-6789`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipCode(String);

impl ZipCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value = required("zip code", input)?;
        if !ZIP_CODE.is_match(value) {
            return Err(ValidationError::Pattern {
                field: "zip code",
                value: value.to_string(),
            });
        }
        Ok(ZipCode(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Add-plant form.
#[derive(Debug, Clone, Default)]
pub struct PlantForm {
    pub nickname: String,
    pub count: String,
    pub plant_type_id: Option<String>,
}

impl PlantForm {
    pub fn validate(&self) -> Result<Plant, ValidationError> {
        let nickname = required("nickname", &self.nickname)?;
        let count = required("count", &self.count)?;

        if !COUNT.is_match(count) {
            return Err(ValidationError::Pattern {
                field: "count",
                value: count.to_string(),
            });
        }
        let count: u64 = count.parse().map_err(|_| ValidationError::Pattern {
            field: "count",
            value: count.to_string(),
        })?;
        if count < 1 {
            return Err(ValidationError::Min {
                field: "count",
                min: 1,
            });
        }

        let plant_type_id = self
            .plant_type_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_PLANT_TYPE_ID);

        Ok(Plant {
            id: String::new(),
            nickname: nickname.to_string(),
            count,
            plant_type_id: plant_type_id.to_string(),
        })
    }
}

/// Create-garden form.
#[derive(Debug, Clone, Default)]
pub struct GardenForm {
    pub name: String,
    pub description: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidGarden {
    pub name: String,
    pub description: String,
    pub zip: ZipCode,
}

impl GardenForm {
    pub fn validate(&self) -> Result<ValidGarden, ValidationError> {
        let name = required("name", &self.name)?;
        let description = required("description", &self.description)?;
        let zip = ZipCode::parse(&self.zip)?;

        Ok(ValidGarden {
            name: name.to_string(),
            description: description.to_string(),
            zip,
        })
    }
}

/// New-user (sign-up) form.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub biography: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidSignUp {
    pub biography: String,
    pub zip: ZipCode,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<ValidSignUp, ValidationError> {
        let zip = ZipCode::parse(&self.zip)?;
        let biography = required("biography", &self.biography)?;

        Ok(ValidSignUp {
            biography: biography.to_string(),
            zip,
        })
    }
}
