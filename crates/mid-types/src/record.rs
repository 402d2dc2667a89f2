//! The top-level record and its principal information.

use serde::{Deserialize, Serialize};

use crate::entity::{IntermediateEntities, PrincipalEntities};
use crate::error::{TypeError, TypeResult};
use crate::part::SectionRef;
use crate::section::{AmlReview, BusinessInfo, LegalAddress, Profile};

/// Ownership structure: the complex-structure flag plus both entity
/// collections, either of which may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrincipalInfo {
    pub is_this_ownership_a_complex_structure: Option<String>,
    #[serde(default)]
    pub principal_entities: PrincipalEntities,
    #[serde(default)]
    pub intermediate_entities: IntermediateEntities,
}

/// One merchant profile as held by a single source.
///
/// `mid_number` identifies the record externally and takes no part in
/// comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mid {
    pub mid_number: String,
    pub profile: Profile,
    pub legal_address: LegalAddress,
    pub business_info: BusinessInfo,
    pub aml_review: AmlReview,
    pub principal_info: PrincipalInfo,
}

impl Mid {
    /// Parse a record from JSON.
    ///
    /// Every section must be present; unknown keys and wrongly typed values
    /// are schema violations.
    pub fn from_json(json: &str) -> TypeResult<Self> {
        serde_json::from_str(json).map_err(|e| TypeError::Schema(e.to_string()))
    }

    pub fn to_json(&self) -> TypeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// All sections, in comparison order.
    pub fn sections(&self) -> [SectionRef<'_>; 5] {
        [
            SectionRef::Profile(&self.profile),
            SectionRef::LegalAddress(&self.legal_address),
            SectionRef::BusinessInfo(&self.business_info),
            SectionRef::AmlReview(&self.aml_review),
            SectionRef::PrincipalInfo(&self.principal_info),
        ]
    }
}
