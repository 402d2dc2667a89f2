//! Borrowed views over the comparable parts of a record.
//!
//! The typed API makes comparing mismatched kinds unrepresentable. These
//! views exist for callers that hold parts dynamically; the diff engine
//! checks their kinds before comparing and rejects mismatches.

use std::fmt;

use crate::record::{Mid, PrincipalInfo};
use crate::section::{AmlReview, BusinessInfo, LegalAddress, Profile, SectionKind};

/// One section of a record.
#[derive(Clone, Copy, Debug)]
pub enum SectionRef<'a> {
    Profile(&'a Profile),
    LegalAddress(&'a LegalAddress),
    BusinessInfo(&'a BusinessInfo),
    AmlReview(&'a AmlReview),
    PrincipalInfo(&'a PrincipalInfo),
}

impl SectionRef<'_> {
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Profile(_) => SectionKind::Profile,
            Self::LegalAddress(_) => SectionKind::LegalAddress,
            Self::BusinessInfo(_) => SectionKind::BusinessInfo,
            Self::AmlReview(_) => SectionKind::AmlReview,
            Self::PrincipalInfo(_) => SectionKind::PrincipalInfo,
        }
    }
}

/// Any comparable part: a whole record or one of its sections.
#[derive(Clone, Copy, Debug)]
pub enum MidPart<'a> {
    Record(&'a Mid),
    Section(SectionRef<'a>),
}

impl MidPart<'_> {
    pub fn kind(&self) -> PartKind {
        match self {
            Self::Record(_) => PartKind::Record,
            Self::Section(section) => PartKind::Section(section.kind()),
        }
    }
}

/// The kind of a [`MidPart`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    Record,
    Section(SectionKind),
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record => f.write_str("Mid"),
            Self::Section(kind) => write!(f, "{kind}"),
        }
    }
}

impl<'a> From<&'a Mid> for MidPart<'a> {
    fn from(mid: &'a Mid) -> Self {
        Self::Record(mid)
    }
}

impl<'a> From<SectionRef<'a>> for MidPart<'a> {
    fn from(section: SectionRef<'a>) -> Self {
        Self::Section(section)
    }
}

macro_rules! section_ref_from {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for SectionRef<'a> {
                fn from(section: &'a $ty) -> Self {
                    Self::$ty(section)
                }
            }

            impl<'a> From<&'a $ty> for MidPart<'a> {
                fn from(section: &'a $ty) -> Self {
                    Self::Section(SectionRef::$ty(section))
                }
            }
        )*
    };
}

section_ref_from!(Profile, LegalAddress, BusinessInfo, AmlReview, PrincipalInfo);
