//! Report schema.
//!
//! Reports serialize to the nested JSON shape downstream consumers read:
//! field maps keep declaration order and flattened entities are positional
//! arrays.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use mid_types::{EntityKind, FieldValue, SectionKind};

use crate::error::{DiffError, DiffResult};

/// A literal field value as it appears in a report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    /// A scalar, exactly as held by its source.
    Text(Option<String>),
    /// A flattened sub-document.
    Tuple(Vec<Option<String>>),
}

impl ReportValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }
}

impl From<FieldValue<'_>> for ReportValue {
    fn from(value: FieldValue<'_>) -> Self {
        match value {
            FieldValue::Scalar(text) => Self::Text(text.map(str::to_owned)),
            FieldValue::Nested(doc) => Self::Tuple(doc.flatten()),
        }
    }
}

/// Left and right values of one differing field.
pub type ValuePair = (ReportValue, ReportValue);

/// An entity with no counterpart, as its field values in declaration order.
pub type FlatEntity = Vec<ReportValue>;

/// Differing fields in declaration order. Serializes as a JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldDiffs {
    entries: Vec<(&'static str, ValuePair)>,
}

impl FieldDiffs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, left: ReportValue, right: ReportValue) {
        self.entries.push((field, (left, right)));
    }

    pub fn get(&self, field: &str) -> Option<&ValuePair> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, pair)| pair)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ValuePair)> {
        self.entries.iter().map(|(name, pair)| (*name, pair))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for FieldDiffs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, pair) in &self.entries {
            map.serialize_entry(name, pair)?;
        }
        map.end()
    }
}

/// Differences within one scalar section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SectionDiff {
    pub section: SectionKind,
    pub fields: FieldDiffs,
}

/// Differences between two entities sharing an identity key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityDiff {
    pub label: String,
    pub fields: FieldDiffs,
}

/// Reconciliation of two entity collections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CollectionDiff {
    #[serde(skip)]
    pub kind: EntityKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shared_entity_diffs: Vec<EntityDiff>,
    pub left_only_entities: Vec<FlatEntity>,
    pub right_only_entities: Vec<FlatEntity>,
    pub left_empty: bool,
    pub right_empty: bool,
}

impl CollectionDiff {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            shared_entity_diffs: Vec::new(),
            left_only_entities: Vec::new(),
            right_only_entities: Vec::new(),
            left_empty: false,
            right_empty: false,
        }
    }

    /// Returns `true` if any entity differs or is one-sided.
    pub fn has_entries(&self) -> bool {
        !self.shared_entity_diffs.is_empty()
            || !self.left_only_entities.is_empty()
            || !self.right_only_entities.is_empty()
    }

    /// Number of entities present on the left only.
    pub fn left_only_count(&self) -> usize {
        self.left_only_entities.len()
    }

    /// Number of entities present on the right only.
    pub fn right_only_count(&self) -> usize {
        self.right_only_entities.len()
    }

    /// Number of shared entities whose fields differ.
    pub fn shared_diff_count(&self) -> usize {
        self.shared_entity_diffs.len()
    }

    /// Shared-entity difference for the given label.
    pub fn shared(&self, label: &str) -> Option<&EntityDiff> {
        self.shared_entity_diffs.iter().find(|d| d.label == label)
    }
}

/// One entry of the principal information report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "sub_section")]
pub enum PrincipalSubDiff {
    /// The complex-ownership-structure flag differs.
    #[serde(rename = "IsComplexStructure")]
    ComplexStructure { vals: ValuePair },
    IntermediateEntities(CollectionDiff),
    PrincipalEntities(CollectionDiff),
}

impl From<CollectionDiff> for PrincipalSubDiff {
    fn from(diff: CollectionDiff) -> Self {
        match diff.kind {
            EntityKind::IntermediateEntities => Self::IntermediateEntities(diff),
            EntityKind::PrincipalEntities => Self::PrincipalEntities(diff),
        }
    }
}

/// Differences within the principal information section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrincipalInfoDiff {
    pub section: SectionKind,
    pub sub_sections: Vec<PrincipalSubDiff>,
}

impl PrincipalInfoDiff {
    pub fn new(sub_sections: Vec<PrincipalSubDiff>) -> Self {
        Self {
            section: SectionKind::PrincipalInfo,
            sub_sections,
        }
    }

    pub fn complex_structure(&self) -> Option<&ValuePair> {
        self.sub_sections.iter().find_map(|s| match s {
            PrincipalSubDiff::ComplexStructure { vals } => Some(vals),
            _ => None,
        })
    }

    pub fn collection(&self, kind: EntityKind) -> Option<&CollectionDiff> {
        self.sub_sections.iter().find_map(|s| match s {
            PrincipalSubDiff::IntermediateEntities(d) | PrincipalSubDiff::PrincipalEntities(d)
                if d.kind == kind =>
            {
                Some(d)
            }
            _ => None,
        })
    }
}

/// The outcome of comparing one part of two records.
///
/// `NoDiff` means nothing to report. Two empty intermediate grids are a
/// `Collection`, never `NoDiff`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffOutcome {
    NoDiff,
    Section(SectionDiff),
    Collection(CollectionDiff),
    PrincipalInfo(PrincipalInfoDiff),
}

impl DiffOutcome {
    pub fn is_no_diff(&self) -> bool {
        matches!(self, Self::NoDiff)
    }

    /// The report entry for this outcome, if any.
    ///
    /// A lone collection diff belongs to the principal information section.
    pub fn into_entry(self) -> Option<ReportEntry> {
        match self {
            Self::NoDiff => None,
            Self::Section(diff) => Some(ReportEntry::Section(diff)),
            Self::Collection(diff) => Some(ReportEntry::PrincipalInfo(PrincipalInfoDiff::new(
                vec![diff.into()],
            ))),
            Self::PrincipalInfo(diff) => Some(ReportEntry::PrincipalInfo(diff)),
        }
    }
}

/// One section's entry in a [`MidReport`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportEntry {
    Section(SectionDiff),
    PrincipalInfo(PrincipalInfoDiff),
}

impl ReportEntry {
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Section(diff) => diff.section,
            Self::PrincipalInfo(diff) => diff.section,
        }
    }
}

/// Every discrepancy between two records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MidReport {
    pub kyc_id: String,
    pub adloc_id: String,
    pub diffs: Vec<ReportEntry>,
}

impl MidReport {
    pub fn new(kyc_id: impl Into<String>, adloc_id: impl Into<String>) -> Self {
        Self {
            kyc_id: kyc_id.into(),
            adloc_id: adloc_id.into(),
            diffs: Vec::new(),
        }
    }

    /// Returns `true` if the records agree everywhere.
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// Number of differing sections.
    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn section(&self, kind: SectionKind) -> Option<&ReportEntry> {
        self.diffs.iter().find(|e| e.kind() == kind)
    }

    pub fn section_fields(&self, kind: SectionKind) -> Option<&FieldDiffs> {
        match self.section(kind)? {
            ReportEntry::Section(diff) => Some(&diff.fields),
            ReportEntry::PrincipalInfo(_) => None,
        }
    }

    pub fn principal_info(&self) -> Option<&PrincipalInfoDiff> {
        self.diffs.iter().find_map(|e| match e {
            ReportEntry::PrincipalInfo(diff) => Some(diff),
            ReportEntry::Section(_) => None,
        })
    }

    pub fn to_json(&self) -> DiffResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiffError::Serialization(e.to_string()))
    }
}
