//! Sub-documents owned by a principal entity.

use serde::{Deserialize, Serialize};

use crate::field::{scalar_values, Field, Fields, Flatten};

/// An identity or ownership document.
///
/// Used both for a principal's proof of identity and for its ownership and
/// control document; the two share one shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub issuing_agency: Option<String>,
    pub country: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
}

impl Fields for Document {
    const KIND: &'static str = "Document";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("document_type", &self.document_type),
            Field::scalar("document_number", &self.document_number),
            Field::scalar("issuing_agency", &self.issuing_agency),
            Field::scalar("country", &self.country),
            Field::scalar("issue_date", &self.issue_date),
            Field::scalar("expiry_date", &self.expiry_date),
        ]
    }
}

impl Flatten for Document {
    fn flatten(&self) -> Vec<Option<String>> {
        scalar_values(self.fields())
    }
}

/// Supplementary evidence of a principal's identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdditionalEvidence {
    pub document_type: Option<String>,
    pub description: Option<String>,
}

impl Fields for AdditionalEvidence {
    const KIND: &'static str = "AdditionalEvidence";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("document_type", &self.document_type),
            Field::scalar("description", &self.description),
        ]
    }
}

impl Flatten for AdditionalEvidence {
    fn flatten(&self) -> Vec<Option<String>> {
        scalar_values(self.fields())
    }
}
