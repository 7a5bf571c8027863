//! Domain model for a promotion: a time-bounded discount offer tied to a
//! product.
//!
//! The model owns the wire shape and its validation rules; storage is the
//! repository's concern.

use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use thiserror::Error;

/// Raised when a promotion payload fails validation during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataValidationError {
    #[error("Invalid Promotion: missing {0}")]
    MissingField(&'static str),

    #[error("Invalid type for {expected} [{field}]")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Unknown promotion category '{0}'")]
    InvalidCategory(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    UnparseableDate(String),

    #[error("Invalid end date before start date")]
    EndDateBeforeStartDate,
}

/// The discount mechanic a promotion applies.
///
/// `discount_x` and `discount_y` on [`Promotion`] take their meaning from
/// this variant (e.g. buy `discount_x` get `discount_y` free).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Category {
    #[default]
    Unknown,
    PercentageDiscountX,
    BuyXGetYFree,
    SpendXSaveY,
}

impl Category {
    /// Case-insensitive lookup by enumeration member name.
    pub fn parse(value: &str) -> Result<Self, DataValidationError> {
        value
            .parse()
            .map_err(|_| DataValidationError::InvalidCategory(value.to_string()))
    }
}

/// A promotion record.
///
/// `id` is assigned by the store on creation and stays `None` until then.
/// All other fields carry the defaults applied by [`Promotion::new`] unless a
/// payload supplies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub id: Option<i32>,
    pub name: String,
    pub category: Category,
    pub discount_x: i32,
    pub discount_y: Option<i32>,
    pub product_id: i32,
    pub description: String,
    pub validity: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Promotion {
    /// A fresh, unpersisted promotion with default field values. Both dates
    /// default to the creation date.
    pub fn new() -> Self {
        let today = Utc::now().date_naive();
        Self {
            id: None,
            name: String::new(),
            category: Category::default(),
            discount_x: 0,
            discount_y: None,
            product_id: 0,
            description: String::new(),
            validity: false,
            start_date: today,
            end_date: today,
        }
    }

    /// Serializes the promotion into a JSON mapping. Dates render as
    /// `YYYY-MM-DD`, the category as its upper-case member name, and an
    /// absent `discount_y` as null.
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "category": self.category.to_string(),
            "discount_x": self.discount_x,
            "discount_y": self.discount_y,
            "product_id": self.product_id,
            "description": self.description,
            "validity": self.validity,
            "start_date": self.start_date.to_string(),
            "end_date": self.end_date.to_string(),
        })
    }

    /// Populates the promotion from an untyped JSON mapping.
    ///
    /// Keys absent from the payload keep their current values; `product_id`,
    /// `description` and `name` are always required. The first rule violated
    /// is the error returned, and on any error the promotion is left
    /// untouched: fields are staged on a working copy that only replaces
    /// `self` once every rule has passed.
    pub fn deserialize(&mut self, payload: &Value) -> Result<(), DataValidationError> {
        let data = payload.as_object().ok_or(DataValidationError::InvalidType {
            field: "body",
            expected: "object",
        })?;
        let mut draft = self.clone();

        draft.name = match data.get("name") {
            Some(value) => text_value(value, "name")?,
            None => return Err(DataValidationError::MissingField("name")),
        };

        if let Some(value) = data.get("category") {
            let raw = value.as_str().ok_or(DataValidationError::InvalidType {
                field: "category",
                expected: "string",
            })?;
            draft.category = Category::parse(raw)?;
        }

        if let Some(value) = data.get("discount_x") {
            draft.discount_x = int_value(value, "discount_x")?;
        }

        if let Some(value) = data.get("discount_y") {
            draft.discount_y = if value.is_null() {
                None
            } else {
                Some(int_value(value, "discount_y")?)
            };
        }

        draft.product_id = match data.get("product_id") {
            Some(value) => int_value(value, "product_id")?,
            None => return Err(DataValidationError::MissingField("product_id")),
        };

        draft.description = match data.get("description") {
            Some(value) => text_value(value, "description")?,
            None => return Err(DataValidationError::MissingField("description")),
        };

        if let Some(value) = data.get("validity") {
            draft.validity = value.as_bool().ok_or(DataValidationError::InvalidType {
                field: "validity",
                expected: "bool",
            })?;
        }

        if let Some(value) = data.get("start_date") {
            draft.start_date = date_value(value, "start_date")?;
        }

        if let Some(value) = data.get("end_date") {
            // Ordered against the start date this same payload may have set.
            let end_date = date_value(value, "end_date")?;
            if end_date < draft.start_date {
                return Err(DataValidationError::EndDateBeforeStartDate);
            }
            draft.end_date = end_date;
        }

        *self = draft;
        Ok(())
    }
}

impl Default for Promotion {
    fn default() -> Self {
        Self::new()
    }
}

fn text_value(value: &Value, field: &'static str) -> Result<String, DataValidationError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(DataValidationError::InvalidType {
            field,
            expected: "string",
        })
}

/// Strict integer coercion: booleans, floats and numeric strings are all
/// rejected as wrong-type.
fn int_value(value: &Value, field: &'static str) -> Result<i32, DataValidationError> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or(DataValidationError::InvalidType {
            field,
            expected: "int",
        })
}

pub(crate) fn date_value(
    value: &Value,
    field: &'static str,
) -> Result<NaiveDate, DataValidationError> {
    let raw = value.as_str().ok_or(DataValidationError::InvalidType {
        field,
        expected: "string",
    })?;
    raw.parse::<NaiveDate>()
        .map_err(|_| DataValidationError::UnparseableDate(raw.to_string()))
}
