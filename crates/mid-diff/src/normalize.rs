//! Scalar equality policy.
//!
//! Field values are free text maintained by hand in two systems, so
//! formatting differences such as `"USA "` vs `"usa"` are not discrepancies.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// How scalar values are normalized before comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Normalization {
    /// Strip leading and trailing whitespace.
    pub trim: bool,
    /// Compare case-insensitively.
    pub case_fold: bool,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            trim: true,
            case_fold: true,
        }
    }
}

impl Normalization {
    /// Raw equality: no trimming, no case folding.
    pub fn strict() -> Self {
        Self {
            trim: false,
            case_fold: false,
        }
    }

    pub fn normalize<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let value = if self.trim { value.trim() } else { value };
        if self.case_fold {
            Cow::Owned(value.to_lowercase())
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Compare two possibly-absent values.
    ///
    /// Absent values are never normalized: `None` equals only `None`, and is
    /// distinct from an empty string.
    pub fn equal(&self, a: Option<&str>, b: Option<&str>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.normalize(a) == self.normalize(b),
            (a, b) => a == b,
        }
    }
}

/// Equality under the default normalization.
pub fn normalized_eq(a: Option<&str>, b: Option<&str>) -> bool {
    Normalization::default().equal(a, b)
}
