//! Keyed entities and the collections that hold them.
//!
//! Entities are matched across records by an [`IdentityKey`] that is derived
//! once, when the entity is built, and never recomputed. Field data sits in a
//! plain `*Details` struct; the entity wraps it read-only so the key cannot
//! drift from the fields it was derived from.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::document::{AdditionalEvidence, Document};
use crate::field::{Field, Fields};

/// The key two entities are matched on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// `first_last`, each part trimmed and lower-cased.
    ///
    /// An absent name part contributes an empty string.
    pub fn principal(first_name: Option<&str>, last_name: Option<&str>) -> Self {
        let part = |s: Option<&str>| s.unwrap_or_default().trim().to_lowercase();
        Self(format!("{}_{}", part(first_name), part(last_name)))
    }

    /// The name exactly as given, with no normalization.
    pub fn verbatim(name: Option<&str>) -> Self {
        Self(name.unwrap_or_default().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The entity collections of a record's principal information.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    IntermediateEntities,
    PrincipalEntities,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntermediateEntities => "IntermediateEntities",
            Self::PrincipalEntities => "PrincipalEntities",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyed record held in an [`EntityCollection`].
///
/// The identity key is not part of the field table.
pub trait Entity: Fields {
    const ENTITY: EntityKind;

    fn identity_key(&self) -> &IdentityKey;

    /// Human-readable name used to label differences.
    fn label(&self) -> String;

    /// Placeholder reported on both sides when both collections are empty.
    ///
    /// Kinds that do not report empty grids return `None`.
    fn empty_grid_marker(_label: &str) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

// ---------------------------------------------------------------------------
// PrincipalEntity
// ---------------------------------------------------------------------------

/// Field data of a principal (owner, director, signer).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrincipalDetails {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub principal_interest: Option<String>,
    pub beneficial_owner: Option<String>,
    pub responsible_party: Option<String>,
    pub authorized_signer: Option<String>,
    pub director: Option<String>,
    pub us_citizen: Option<String>,
    pub salutation: Option<String>,
    pub date_of_birth: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub state_or_province: Option<String>,
    pub email: Option<String>,
    pub phone_int_code: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub citizenship1: Option<String>,
    pub citizenship2: Option<String>,
    pub country_of_permanent_residence: Option<String>,
    #[serde(default)]
    pub proof_of_identity: Document,
    #[serde(default)]
    pub additional_evidence_of_identity: AdditionalEvidence,
    #[serde(default)]
    pub ownership_docs: Document,
}

impl PrincipalDetails {
    /// Details with only a first and last name set.
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Default::default()
        }
    }
}

/// A principal with its identity key fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PrincipalDetails", into = "PrincipalDetails")]
pub struct PrincipalEntity {
    key: IdentityKey,
    details: PrincipalDetails,
}

impl PrincipalEntity {
    pub fn new(details: PrincipalDetails) -> Self {
        let key = IdentityKey::principal(
            details.first_name.as_deref(),
            details.last_name.as_deref(),
        );
        Self { key, details }
    }

    pub fn into_details(self) -> PrincipalDetails {
        self.details
    }
}

impl From<PrincipalDetails> for PrincipalEntity {
    fn from(details: PrincipalDetails) -> Self {
        Self::new(details)
    }
}

impl From<PrincipalEntity> for PrincipalDetails {
    fn from(entity: PrincipalEntity) -> Self {
        entity.details
    }
}

impl Deref for PrincipalEntity {
    type Target = PrincipalDetails;

    fn deref(&self) -> &PrincipalDetails {
        &self.details
    }
}

impl Fields for PrincipalEntity {
    const KIND: &'static str = "PrincipalEntity";

    fn fields(&self) -> Vec<Field<'_>> {
        let d = &self.details;
        vec![
            Field::scalar("first_name", &d.first_name),
            Field::scalar("middle_name", &d.middle_name),
            Field::scalar("last_name", &d.last_name),
            Field::scalar("principal_interest", &d.principal_interest),
            Field::scalar("beneficial_owner", &d.beneficial_owner),
            Field::scalar("responsible_party", &d.responsible_party),
            Field::scalar("authorized_signer", &d.authorized_signer),
            Field::scalar("director", &d.director),
            Field::scalar("us_citizen", &d.us_citizen),
            Field::scalar("salutation", &d.salutation),
            Field::scalar("date_of_birth", &d.date_of_birth),
            Field::scalar("address_line_1", &d.address_line_1),
            Field::scalar("address_line_2", &d.address_line_2),
            Field::scalar("city", &d.city),
            Field::scalar("postal_code", &d.postal_code),
            Field::scalar("country", &d.country),
            Field::scalar("state_or_province", &d.state_or_province),
            Field::scalar("email", &d.email),
            Field::scalar("phone_int_code", &d.phone_int_code),
            Field::scalar("mobile", &d.mobile),
            Field::scalar("phone", &d.phone),
            Field::scalar("fax", &d.fax),
            Field::scalar("citizenship1", &d.citizenship1),
            Field::scalar("citizenship2", &d.citizenship2),
            Field::scalar(
                "country_of_permanent_residence",
                &d.country_of_permanent_residence,
            ),
            Field::nested("proof_of_identity", &d.proof_of_identity),
            Field::nested(
                "additional_evidence_of_identity",
                &d.additional_evidence_of_identity,
            ),
            Field::nested("ownership_docs", &d.ownership_docs),
        ]
    }
}

impl Entity for PrincipalEntity {
    const ENTITY: EntityKind = EntityKind::PrincipalEntities;

    fn identity_key(&self) -> &IdentityKey {
        &self.key
    }

    fn label(&self) -> String {
        format!(
            "{} {}",
            self.details.first_name.as_deref().unwrap_or_default(),
            self.details.last_name.as_deref().unwrap_or_default()
        )
    }
}

// ---------------------------------------------------------------------------
// IntermediateEntity
// ---------------------------------------------------------------------------

/// Field data of an intermediate owning entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntermediateDetails {
    pub entity_name: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub ownership: Option<String>,
}

impl IntermediateDetails {
    pub fn named(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: Some(entity_name.into()),
            ..Default::default()
        }
    }
}

/// An intermediate owner, keyed by its entity name exactly as written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IntermediateDetails", into = "IntermediateDetails")]
pub struct IntermediateEntity {
    key: IdentityKey,
    details: IntermediateDetails,
}

impl IntermediateEntity {
    pub fn new(details: IntermediateDetails) -> Self {
        let key = IdentityKey::verbatim(details.entity_name.as_deref());
        Self { key, details }
    }

    pub fn into_details(self) -> IntermediateDetails {
        self.details
    }
}

impl From<IntermediateDetails> for IntermediateEntity {
    fn from(details: IntermediateDetails) -> Self {
        Self::new(details)
    }
}

impl From<IntermediateEntity> for IntermediateDetails {
    fn from(entity: IntermediateEntity) -> Self {
        entity.details
    }
}

impl Deref for IntermediateEntity {
    type Target = IntermediateDetails;

    fn deref(&self) -> &IntermediateDetails {
        &self.details
    }
}

impl Fields for IntermediateEntity {
    const KIND: &'static str = "IntermediateEntity";

    fn fields(&self) -> Vec<Field<'_>> {
        let d = &self.details;
        vec![
            Field::scalar("entity_name", &d.entity_name),
            Field::scalar("address_line_1", &d.address_line_1),
            Field::scalar("address_line_2", &d.address_line_2),
            Field::scalar("city", &d.city),
            Field::scalar("postal_code", &d.postal_code),
            Field::scalar("country", &d.country),
            Field::scalar("state", &d.state),
            Field::scalar("ownership", &d.ownership),
        ]
    }
}

impl Entity for IntermediateEntity {
    const ENTITY: EntityKind = EntityKind::IntermediateEntities;

    fn identity_key(&self) -> &IdentityKey {
        &self.key
    }

    fn label(&self) -> String {
        self.details.entity_name.clone().unwrap_or_default()
    }

    /// The marker carries the label as its name and empty strings elsewhere.
    fn empty_grid_marker(label: &str) -> Option<Self> {
        let blank = || Some(String::new());
        Some(Self::new(IntermediateDetails {
            entity_name: Some(label.to_string()),
            address_line_1: blank(),
            address_line_2: blank(),
            city: blank(),
            postal_code: blank(),
            country: blank(),
            state: blank(),
            ownership: blank(),
        }))
    }
}

// ---------------------------------------------------------------------------
// EntityCollection
// ---------------------------------------------------------------------------

/// An ordered sequence of entities of one kind.
///
/// Order carries no meaning for comparison; entities are matched by key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityCollection<E> {
    entities: Vec<E>,
}

pub type PrincipalEntities = EntityCollection<PrincipalEntity>;
pub type IntermediateEntities = EntityCollection<IntermediateEntity>;

impl<E> EntityCollection<E> {
    pub fn new(entities: Vec<E>) -> Self {
        Self { entities }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entities.iter()
    }
}

impl<E> Default for EntityCollection<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E> From<Vec<E>> for EntityCollection<E> {
    fn from(entities: Vec<E>) -> Self {
        Self::new(entities)
    }
}

impl<E> FromIterator<E> for EntityCollection<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, E> IntoIterator for &'a EntityCollection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
