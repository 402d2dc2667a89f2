//! Record model for merchant profile reconciliation.
//!
//! A [`Mid`] record is one merchant/entity profile as held by a single
//! source. Two records from independent sources share this schema and are
//! compared field by field by the `mid-diff` engine.
//!
//! # Key Types
//!
//! - [`Mid`] -- Top-level record: four scalar sections plus [`PrincipalInfo`]
//! - [`Profile`], [`LegalAddress`], [`BusinessInfo`], [`AmlReview`] -- Fixed-shape scalar sections
//! - [`PrincipalEntity`] / [`IntermediateEntity`] -- Keyed entities held in an [`EntityCollection`]
//! - [`Document`] / [`AdditionalEvidence`] -- Sub-documents owned by a principal
//! - [`Fields`] / [`Field`] / [`FieldValue`] -- Explicit, ordered field tables
//! - [`MidPart`] / [`SectionRef`] -- Borrowed views used for kind-checked comparison

pub mod document;
pub mod entity;
pub mod error;
pub mod field;
pub mod part;
pub mod record;
pub mod section;

pub use document::{AdditionalEvidence, Document};
pub use entity::{
    Entity, EntityCollection, EntityKind, IdentityKey, IntermediateDetails, IntermediateEntities,
    IntermediateEntity, PrincipalDetails, PrincipalEntities, PrincipalEntity,
};
pub use error::{TypeError, TypeResult};
pub use field::{Field, FieldValue, Fields, Flatten};
pub use part::{MidPart, PartKind, SectionRef};
pub use record::{Mid, PrincipalInfo};
pub use section::{AmlReview, BusinessInfo, LegalAddress, Profile, Section, SectionKind};
