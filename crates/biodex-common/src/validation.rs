//! Species form validation.
//!
//! Submitted forms are checked and normalised here before anything is sent to
//! the hosted backend: text fields are trimmed, blank optional fields become
//! absent, the population is coerced to a positive integer and the image must
//! be a well-formed URL. All violations are collected so the form can show
//! them together.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::entities::{Kingdom, SpeciesFields};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

/// Population as it arrives from a form: a JSON number or the raw input text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PopulationInput {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Raw add/edit species submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeciesForm {
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub kingdom: Option<String>,
    #[serde(default)]
    pub total_population: Option<PopulationInput>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub endangered: Option<bool>,
}

impl SpeciesForm {
    pub fn validate(&self) -> Result<SpeciesFields, Vec<FieldError>> {
        let mut errors = Vec::new();

        let scientific_name = non_blank(self.scientific_name.as_deref());
        if scientific_name.is_none() {
            errors.push(FieldError::new("scientific_name", "Scientific name is required"));
        }

        let kingdom = match self.kingdom.as_deref().map(str::trim) {
            None | Some("") => Kingdom::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                let options: Vec<&str> = Kingdom::ALL.iter().map(Kingdom::as_str).collect();
                errors.push(FieldError::new(
                    "kingdom",
                    format!("Kingdom must be one of {}", options.join(", ")),
                ));
                Kingdom::default()
            }),
        };

        let total_population = match coerce_population(self.total_population.as_ref()) {
            Ok(p) => p,
            Err(msg) => {
                errors.push(FieldError::new("total_population", msg));
                None
            }
        };

        let image = non_blank(self.image.as_deref());
        if let Some(url) = image.as_deref() {
            if Url::parse(url).is_err() {
                errors.push(FieldError::new("image", "Image must be a valid URL"));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SpeciesFields {
            scientific_name: scientific_name.unwrap_or_default(),
            common_name: non_blank(self.common_name.as_deref()),
            kingdom,
            total_population,
            image,
            description: non_blank(self.description.as_deref()),
            endangered: self.endangered.unwrap_or(false),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn coerce_population(input: Option<&PopulationInput>) -> Result<Option<i64>, &'static str> {
    const NOT_POSITIVE: &str = "Population must be a positive integer";

    let n = match input {
        None => return Ok(None),
        Some(PopulationInput::Int(n)) => *n,
        Some(PopulationInput::Float(f)) => {
            if !f.is_finite() || f.fract() != 0.0 || *f > i64::MAX as f64 {
                return Err(NOT_POSITIVE);
            }
            *f as i64
        }
        Some(PopulationInput::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>().map_err(|_| "Population must be a number")?
        }
    };

    if n < 1 {
        return Err(NOT_POSITIVE);
    }
    Ok(Some(n))
}
