use crate::utils::error::PredictError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the four inputs on the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Size,
    Bedrooms,
    Age,
    Location,
}

impl FieldName {
    /// Form order; also the order fields are rendered and prompted in.
    pub const ALL: [FieldName; 4] = [
        FieldName::Size,
        FieldName::Bedrooms,
        FieldName::Age,
        FieldName::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Size => "size",
            FieldName::Bedrooms => "bedrooms",
            FieldName::Age => "age",
            FieldName::Location => "location",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Size => "Square Footage",
            FieldName::Bedrooms => "Bedrooms",
            FieldName::Age => "Property Age (Years)",
            FieldName::Location => "Location Rank (1-10)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldName::Size => "e.g. 2500",
            FieldName::Bedrooms => "e.g. 3",
            FieldName::Age => "e.g. 10",
            FieldName::Location => "e.g. 7",
        }
    }

    fn index(&self) -> usize {
        match self {
            FieldName::Size => 0,
            FieldName::Bedrooms => 1,
            FieldName::Age => 2,
            FieldName::Location => 3,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s.trim())
            .ok_or_else(|| PredictError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// Raw, unvalidated text of every form field.
///
/// Every field always has a slot, so a lookup can never miss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: [String; 4],
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: FieldName) -> &str {
        &self.values[name.index()]
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        self.values[name.index()] = value.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        FieldName::ALL
            .into_iter()
            .map(move |name| (name, self.get(name)))
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }
}

/// Parse user text the way a browser `Number()` call would, except that
/// blank input also yields `NaN`. Never fails.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Payload posted to the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(serialize_with = "serialize_js_number")]
    pub size: f64,
    #[serde(serialize_with = "serialize_js_number")]
    pub bedrooms: f64,
    #[serde(serialize_with = "serialize_js_number")]
    pub age: f64,
    #[serde(serialize_with = "serialize_js_number")]
    pub location: f64,
}

impl PredictionRequest {
    pub fn from_form(form: &FormState) -> Self {
        Self {
            size: coerce_number(form.get(FieldName::Size)),
            bedrooms: coerce_number(form.get(FieldName::Bedrooms)),
            age: coerce_number(form.get(FieldName::Age)),
            location: coerce_number(form.get(FieldName::Location)),
        }
    }

    pub fn get(&self, name: FieldName) -> f64 {
        match name {
            FieldName::Size => self.size,
            FieldName::Bedrooms => self.bedrooms,
            FieldName::Age => self.age,
            FieldName::Location => self.location,
        }
    }

    /// Fields that coerced to a non-finite value and will go out as `null`.
    pub fn non_numeric_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|name| !self.get(*name).is_finite())
            .collect()
    }
}

// Largest integer an f64 holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Integral values go out as JSON integers and non-finite values as `null`,
/// matching what `JSON.stringify` produces for the same numbers.
fn serialize_js_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        serializer.serialize_none()
    } else if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub model: String,
    pub prediction: String,
    pub performance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub best_model: String,
    pub comparison: Vec<ComparisonRow>,
}
