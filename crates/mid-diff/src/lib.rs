//! Diff engine for merchant profile reconciliation.
//!
//! Compares two [`Mid`](mid_types::Mid) records from independent sources and
//! reports every field-level and entity-level discrepancy, section by section.
//!
//! # Key Types
//!
//! - [`Differ`] -- Runs comparisons under a [`DiffConfig`]
//! - [`Normalization`] -- Equality policy for scalar fields (trim + case-fold)
//! - [`DiffOutcome`] -- Result of comparing one part: no diff, section, collection, or principal info
//! - [`MidReport`] / [`ReportEntry`] -- Record-level report
//! - [`CollectionDiff`] / [`EntityDiff`] -- Entity reconciliation results
//! - [`MidDiffExt`] -- `get_diffs_from` on records

pub mod config;
pub mod error;
pub mod normalize;
pub mod reconcile;
pub mod record_diff;
pub mod report;
pub mod section_diff;

pub use config::{DiffConfig, DEFAULT_EMPTY_GRID_LABEL};
pub use error::{DiffError, DiffResult};
pub use normalize::{normalized_eq, Normalization};
pub use reconcile::flatten_entity;
pub use record_diff::MidDiffExt;
pub use report::{
    CollectionDiff, DiffOutcome, EntityDiff, FieldDiffs, FlatEntity, MidReport, PrincipalInfoDiff,
    PrincipalSubDiff, ReportEntry, ReportValue, SectionDiff, ValuePair,
};

/// Runs comparisons under one configuration.
///
/// Holds no state besides the configuration; one `Differ` can serve any
/// number of comparisons, from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    config: DiffConfig,
}

impl Differ {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }
}
