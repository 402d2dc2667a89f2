//! Field tables.
//!
//! Every section, document and entity declares its fields explicitly and in
//! order through [`Fields::fields`]. Diffing and flattening walk these tables;
//! nothing is discovered at runtime.

use std::fmt;

use crate::error::{TypeError, TypeResult};

/// A sub-document that can be reduced to the ordered sequence of its values.
///
/// Entities embed flattened sub-documents positionally when they are reported
/// without a counterpart, and compare them as whole units otherwise.
pub trait Flatten {
    /// Field values in declaration order.
    fn flatten(&self) -> Vec<Option<String>>;
}

/// The value held by one declared field.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// Free text, possibly absent.
    Scalar(Option<&'a str>),
    /// An owned sub-document.
    Nested(&'a dyn Flatten),
}

impl FieldValue<'_> {
    /// Returns `true` for sub-document fields.
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    /// The scalar text, or `None` for absent scalars and sub-documents.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => *value,
            Self::Nested(_) => None,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Self::Nested(doc) => f.debug_tuple("Nested").field(&doc.flatten()).finish(),
        }
    }
}

/// One entry of a field table.
#[derive(Clone, Copy, Debug)]
pub struct Field<'a> {
    pub name: &'static str,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub fn scalar(name: &'static str, value: &'a Option<String>) -> Self {
        Self {
            name,
            value: FieldValue::Scalar(value.as_deref()),
        }
    }

    pub fn nested(name: &'static str, value: &'a dyn Flatten) -> Self {
        Self {
            name,
            value: FieldValue::Nested(value),
        }
    }
}

/// A kind with a declared, ordered field table.
pub trait Fields {
    /// Kind name used in reports and error messages.
    const KIND: &'static str;

    /// All fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Look up a field by name.
    ///
    /// Undeclared names are an error, never a silent `None`.
    fn field(&self, name: &str) -> TypeResult<FieldValue<'_>> {
        self.fields()
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| f.value)
            .ok_or_else(|| TypeError::UnknownField {
                kind: Self::KIND.to_string(),
                field: name.to_string(),
            })
    }

    /// Declared field names in order.
    fn field_names(&self) -> Vec<&'static str> {
        self.fields().into_iter().map(|f| f.name).collect()
    }
}

/// Owned scalar values of a table, in order. Sub-documents are skipped.
pub(crate) fn scalar_values(fields: Vec<Field<'_>>) -> Vec<Option<String>> {
    fields
        .into_iter()
        .filter_map(|f| match f.value {
            FieldValue::Scalar(value) => Some(value.map(str::to_owned)),
            FieldValue::Nested(_) => None,
        })
        .collect()
}
