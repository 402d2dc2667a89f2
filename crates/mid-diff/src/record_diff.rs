//! Record-level orchestration.
//!
//! Walks the sections of two records in declaration order and collects every
//! non-empty section outcome into a [`MidReport`].

use tracing::{debug, info};

use mid_types::{Mid, MidPart, PartKind, PrincipalInfo, SectionRef};

use crate::error::{DiffError, DiffResult};
use crate::report::{DiffOutcome, MidReport, PrincipalInfoDiff, PrincipalSubDiff, ReportValue};
use crate::Differ;

impl Differ {
    /// Compare two records section by section.
    ///
    /// `mid_number` identifies each side in the report and is never compared.
    pub fn diff_records(&self, left: &Mid, right: &Mid) -> MidReport {
        let mut report = MidReport::new(&left.mid_number, &right.mid_number);
        let outcomes = [
            self.diff_section(&left.profile, &right.profile),
            self.diff_section(&left.legal_address, &right.legal_address),
            self.diff_section(&left.business_info, &right.business_info),
            self.diff_section(&left.aml_review, &right.aml_review),
            self.diff_principal_info(&left.principal_info, &right.principal_info),
        ];
        report
            .diffs
            .extend(outcomes.into_iter().filter_map(DiffOutcome::into_entry));

        info!(
            kyc = %report.kyc_id,
            adloc = %report.adloc_id,
            sections = report.len(),
            "records compared"
        );
        report
    }

    /// Compare a record against any part, failing unless it is a record.
    pub fn try_diff_records(&self, left: &Mid, right: MidPart<'_>) -> DiffResult<MidReport> {
        match right {
            MidPart::Record(right) => Ok(self.diff_records(left, right)),
            other => Err(DiffError::KindMismatch {
                left: PartKind::Record,
                right: other.kind(),
            }),
        }
    }

    /// Compare principal information: the complex-structure flag, then
    /// intermediate entities, then principal entities.
    ///
    /// A differing flag is reported on its own even when no entity differs.
    pub fn diff_principal_info(&self, left: &PrincipalInfo, right: &PrincipalInfo) -> DiffOutcome {
        let mut sub_sections = Vec::new();

        let (left_flag, right_flag) = (
            &left.is_this_ownership_a_complex_structure,
            &right.is_this_ownership_a_complex_structure,
        );
        if left_flag != right_flag {
            debug!("complex structure flag differs");
            sub_sections.push(PrincipalSubDiff::ComplexStructure {
                vals: (
                    ReportValue::Text(left_flag.clone()),
                    ReportValue::Text(right_flag.clone()),
                ),
            });
        }

        let collections = [
            self.reconcile(&left.intermediate_entities, &right.intermediate_entities),
            self.reconcile(&left.principal_entities, &right.principal_entities),
        ];
        for outcome in collections {
            if let DiffOutcome::Collection(diff) = outcome {
                sub_sections.push(diff.into());
            }
        }

        if sub_sections.is_empty() {
            DiffOutcome::NoDiff
        } else {
            DiffOutcome::PrincipalInfo(PrincipalInfoDiff::new(sub_sections))
        }
    }

    /// Compare two sections held dynamically.
    ///
    /// Fails with [`DiffError::KindMismatch`] when the sections are of
    /// different kinds.
    pub fn diff_parts(&self, left: SectionRef<'_>, right: SectionRef<'_>) -> DiffResult<DiffOutcome> {
        let outcome = match (left, right) {
            (SectionRef::Profile(a), SectionRef::Profile(b)) => self.diff_section(a, b),
            (SectionRef::LegalAddress(a), SectionRef::LegalAddress(b)) => self.diff_section(a, b),
            (SectionRef::BusinessInfo(a), SectionRef::BusinessInfo(b)) => self.diff_section(a, b),
            (SectionRef::AmlReview(a), SectionRef::AmlReview(b)) => self.diff_section(a, b),
            (SectionRef::PrincipalInfo(a), SectionRef::PrincipalInfo(b)) => {
                self.diff_principal_info(a, b)
            }
            (a, b) => {
                return Err(DiffError::KindMismatch {
                    left: PartKind::Section(a.kind()),
                    right: PartKind::Section(b.kind()),
                })
            }
        };
        Ok(outcome)
    }

    /// Structural equality of two sections held dynamically.
    pub fn parts_equal(&self, left: SectionRef<'_>, right: SectionRef<'_>) -> DiffResult<bool> {
        Ok(self.diff_parts(left, right)?.is_no_diff())
    }
}

/// Record comparison under the default configuration.
pub trait MidDiffExt {
    /// Every discrepancy between `self` (left) and `other` (right).
    ///
    /// A record compared with itself still reports the empty-grid marker
    /// when its intermediate entity grid is empty, so the diff list is empty
    /// only for records with at least one intermediate entity.
    fn get_diffs_from(&self, other: &Mid) -> MidReport;

    /// As [`get_diffs_from`](Self::get_diffs_from), for a dynamically held
    /// counterpart.
    fn try_get_diffs_from(&self, other: MidPart<'_>) -> DiffResult<MidReport>;
}

impl MidDiffExt for Mid {
    fn get_diffs_from(&self, other: &Mid) -> MidReport {
        Differ::default().diff_records(self, other)
    }

    fn try_get_diffs_from(&self, other: MidPart<'_>) -> DiffResult<MidReport> {
        Differ::default().try_diff_records(self, other)
    }
}
