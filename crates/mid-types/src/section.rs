//! Fixed-shape scalar sections of a record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{Field, Fields};

/// The sections of a [`Mid`](crate::Mid), in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    Profile,
    LegalAddress,
    BusinessInfo,
    #[serde(rename = "AMLReview")]
    AmlReview,
    PrincipalInfo,
}

impl SectionKind {
    /// Every section in the order records are compared.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Profile,
        SectionKind::LegalAddress,
        SectionKind::BusinessInfo,
        SectionKind::AmlReview,
        SectionKind::PrincipalInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::LegalAddress => "LegalAddress",
            Self::BusinessInfo => "BusinessInfo",
            Self::AmlReview => "AMLReview",
            Self::PrincipalInfo => "PrincipalInfo",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A section made only of named scalar fields.
pub trait Section: Fields {
    const SECTION: SectionKind;
}

/// Turnover and country of operations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub company_annual_turnover: Option<String>,
    pub country_of_primary_business_operations: Option<String>,
}

impl Fields for Profile {
    const KIND: &'static str = "Profile";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("company_annual_turnover", &self.company_annual_turnover),
            Field::scalar(
                "country_of_primary_business_operations",
                &self.country_of_primary_business_operations,
            ),
        ]
    }
}

impl Section for Profile {
    const SECTION: SectionKind = SectionKind::Profile;
}

/// Registered legal address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegalAddress {
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub address_line_3: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl Fields for LegalAddress {
    const KIND: &'static str = "LegalAddress";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("address_line_1", &self.address_line_1),
            Field::scalar("address_line_2", &self.address_line_2),
            Field::scalar("address_line_3", &self.address_line_3),
            Field::scalar("city", &self.city),
            Field::scalar("county", &self.county),
            Field::scalar("country", &self.country),
            Field::scalar("postal_code", &self.postal_code),
        ]
    }
}

impl Section for LegalAddress {
    const SECTION: SectionKind = SectionKind::LegalAddress;
}

/// Business registration details.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusinessInfo {
    pub full_legal_name: Option<String>,
    pub business_registration_number: Option<String>,
    pub country_of_formation: Option<String>,
}

impl Fields for BusinessInfo {
    const KIND: &'static str = "BusinessInfo";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("full_legal_name", &self.full_legal_name),
            Field::scalar(
                "business_registration_number",
                &self.business_registration_number,
            ),
            Field::scalar("country_of_formation", &self.country_of_formation),
        ]
    }
}

impl Section for BusinessInfo {
    const SECTION: SectionKind = SectionKind::BusinessInfo;
}

/// Anti-money-laundering review outcome and the first customer document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmlReview {
    #[serde(rename = "SCDD")]
    pub scdd: Option<String>,
    pub cst_doc_1_document_type: Option<String>,
    pub cst_doc_1_issuing_agency: Option<String>,
    pub cst_doc_1_country: Option<String>,
}

impl Fields for AmlReview {
    const KIND: &'static str = "AMLReview";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("SCDD", &self.scdd),
            Field::scalar("cst_doc_1_document_type", &self.cst_doc_1_document_type),
            Field::scalar("cst_doc_1_issuing_agency", &self.cst_doc_1_issuing_agency),
            Field::scalar("cst_doc_1_country", &self.cst_doc_1_country),
        ]
    }
}

impl Section for AmlReview {
    const SECTION: SectionKind = SectionKind::AmlReview;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_order_is_fixed() {
        let names: Vec<_> = SectionKind::ALL.iter().map(SectionKind::as_str).collect();
        assert_eq!(
            names,
            vec!["Profile", "LegalAddress", "BusinessInfo", "AMLReview", "PrincipalInfo"]
        );
    }

    #[test]
    fn kind_serializes_with_report_name() {
        let json = serde_json::to_string(&SectionKind::AmlReview).unwrap();
        assert_eq!(json, "\"AMLReview\"");
    }

    #[test]
    fn legal_address_field_table_order() {
        let address = LegalAddress::default();
        assert_eq!(
            address.field_names(),
            vec![
                "address_line_1",
                "address_line_2",
                "address_line_3",
                "city",
                "county",
                "country",
                "postal_code"
            ]
        );
    }

    #[test]
    fn aml_review_uses_wire_name_for_scdd() {
        let review: AmlReview = serde_json::from_str(r#"{"SCDD": "yes"}"#).unwrap();
        assert_eq!(review.scdd.as_deref(), Some("yes"));
        assert_eq!(review.field("SCDD").unwrap().as_text(), Some("yes"));
    }

    #[test]
    fn missing_fields_deserialize_as_absent() {
        let profile: Profile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result = serde_json::from_str::<BusinessInfo>(r#"{"nickname": "x"}"#);
        assert!(result.is_err());
    }
}
