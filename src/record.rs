//! Model and identifier contracts.
//!
//! A [`Record`] is the entity a controller serves. The controller never looks
//! inside one except to apply a partial update, which goes through the typed
//! [`Record::apply_patch`] instead of arbitrary attribute assignment.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use uuid::Uuid;

/// Partial update payload: field name to new value
pub type FieldMap = serde_json::Map<String, Value>;

/// Errors raised while applying a [`FieldMap`] to a record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Unknown or immutable field: {field}")]
    InvalidField { field: String },

    #[error("Invalid value for field {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl PatchError {
    pub fn invalid_field(field: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Display) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

/// The scalar kind backing a [`RecordId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum IdKind {
    Text,
    Integer,
    Uuid,
}

/// An identifier that uniquely addresses one record
pub trait RecordId:
    Clone + Eq + Hash + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: IdKind;
}

impl RecordId for String {
    const KIND: IdKind = IdKind::Text;
}

impl RecordId for Uuid {
    const KIND: IdKind = IdKind::Uuid;
}

macro_rules! integer_ids {
    ($($ty:ty),*) => {
        $(impl RecordId for $ty {
            const KIND: IdKind = IdKind::Integer;
        })*
    };
}

integer_ids!(i32, i64, u32, u64);

/// An entity served by a generic controller
///
/// Usually implemented with `#[derive(Record)]`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: RecordId;

    /// Name of the identifier field
    const ID_FIELD: &'static str;

    /// Fields a partial update may assign
    const MUTABLE_FIELDS: &'static [&'static str];

    fn id(&self) -> &Self::Id;

    /// Assign a single field from its JSON value
    fn apply_field(&mut self, field: &str, value: Value) -> Result<(), PatchError>;

    /// Apply every entry of `patch`, or none of them
    ///
    /// # Errors
    /// `InvalidField` for keys outside [`Record::MUTABLE_FIELDS`], `InvalidValue`
    /// when a value does not fit the field's type. The record is unchanged on error.
    fn apply_patch(&mut self, patch: FieldMap) -> Result<(), PatchError> {
        if let Some(field) = patch
            .keys()
            .find(|key| !Self::MUTABLE_FIELDS.contains(&key.as_str()))
        {
            return Err(PatchError::invalid_field(field.as_str()));
        }

        let mut staged = self.clone();
        for (field, value) in patch {
            staged.apply_field(&field, value)?;
        }
        *self = staged;
        Ok(())
    }
}
