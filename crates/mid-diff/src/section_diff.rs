//! Section-level diff: compare two scalar sections field by field.

use tracing::debug;

use mid_types::{Field, FieldValue, Section};

use crate::report::{DiffOutcome, FieldDiffs, ReportValue, SectionDiff};
use crate::Differ;

impl Differ {
    /// Returns `true` if every field pair is normalized-equal.
    pub fn sections_equal<S: Section>(&self, left: &S, right: &S) -> bool {
        self.diff_fields(left.fields(), right.fields()).is_empty()
    }

    /// Compare two sections of the same kind.
    ///
    /// Differing fields are reported with their literal values, not the
    /// normalized forms they were compared by.
    pub fn diff_section<S: Section>(&self, left: &S, right: &S) -> DiffOutcome {
        let fields = self.diff_fields(left.fields(), right.fields());
        if fields.is_empty() {
            return DiffOutcome::NoDiff;
        }
        debug!(section = %S::SECTION, fields = fields.len(), "section differs");
        DiffOutcome::Section(SectionDiff {
            section: S::SECTION,
            fields,
        })
    }

    /// Pairwise comparison of two field tables of the same kind.
    pub(crate) fn diff_fields(&self, left: Vec<Field<'_>>, right: Vec<Field<'_>>) -> FieldDiffs {
        let mut diffs = FieldDiffs::new();
        for (l, r) in left.into_iter().zip(right) {
            debug_assert_eq!(l.name, r.name, "field tables out of step");
            if self.field_differs(l.value, r.value) {
                diffs.push(l.name, l.value.into(), r.value.into());
            }
        }
        diffs
    }

    /// Scalars compare under the configured normalization; sub-documents
    /// compare raw, as whole tuples.
    pub(crate) fn field_differs(&self, left: FieldValue<'_>, right: FieldValue<'_>) -> bool {
        match (left, right) {
            (FieldValue::Scalar(a), FieldValue::Scalar(b)) => {
                !self.config().normalization.equal(a, b)
            }
            (a, b) => ReportValue::from(a) != ReportValue::from(b),
        }
    }
}
