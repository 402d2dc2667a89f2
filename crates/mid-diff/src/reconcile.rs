//! Entity collection reconciliation.
//!
//! Matches two unordered collections of one entity kind by identity key and
//! classifies every key as shared-with-differences, left-only or right-only.
//!
//! Duplicate keys within one side are not rejected: the first entity carrying
//! a key is the one paired and reported, and later entities with the same key
//! are skipped entirely.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use mid_types::{Entity, EntityCollection, IdentityKey};

use crate::report::{CollectionDiff, DiffOutcome, EntityDiff, FlatEntity, ReportValue};
use crate::Differ;

impl Differ {
    /// Reconcile two collections of the same entity kind.
    ///
    /// Returns [`DiffOutcome::NoDiff`] only when no entity differs and none is
    /// one-sided. When both collections are empty and the kind has an
    /// empty-grid marker, the marker is reported on both sides instead.
    pub fn reconcile<E: Entity>(
        &self,
        left: &EntityCollection<E>,
        right: &EntityCollection<E>,
    ) -> DiffOutcome {
        let mut diff = CollectionDiff::new(E::ENTITY);
        diff.left_empty = left.is_empty();
        diff.right_empty = right.is_empty();

        if left.is_empty() && right.is_empty() {
            return self.empty_grid::<E>(diff);
        }

        let left_index = first_by_key(left);
        let right_index = first_by_key(right);

        for entity in distinct(left) {
            match right_index.get(entity.identity_key()) {
                Some(counterpart) => {
                    if let Some(entity_diff) = self.diff_entity(entity, *counterpart) {
                        diff.shared_entity_diffs.push(entity_diff);
                    }
                }
                None => {
                    debug!(kind = %E::ENTITY, key = %entity.identity_key(), "left-only entity");
                    diff.left_only_entities.push(flatten_entity(entity));
                }
            }
        }

        for entity in distinct(right) {
            if !left_index.contains_key(entity.identity_key()) {
                debug!(kind = %E::ENTITY, key = %entity.identity_key(), "right-only entity");
                diff.right_only_entities.push(flatten_entity(entity));
            }
        }

        if diff.has_entries() {
            DiffOutcome::Collection(diff)
        } else {
            DiffOutcome::NoDiff
        }
    }

    /// Compare two entities sharing a key, field by field.
    pub fn diff_entity<E: Entity>(&self, left: &E, right: &E) -> Option<EntityDiff> {
        let fields = self.diff_fields(left.fields(), right.fields());
        if fields.is_empty() {
            return None;
        }
        Some(EntityDiff {
            label: left.label(),
            fields,
        })
    }

    fn empty_grid<E: Entity>(&self, mut diff: CollectionDiff) -> DiffOutcome {
        if !self.config().report_empty_grid {
            return DiffOutcome::NoDiff;
        }
        match E::empty_grid_marker(&self.config().empty_grid_label) {
            Some(marker) => {
                debug!(kind = %E::ENTITY, "both grids empty");
                let flat = flatten_entity(&marker);
                diff.left_only_entities.push(flat.clone());
                diff.right_only_entities.push(flat);
                DiffOutcome::Collection(diff)
            }
            None => DiffOutcome::NoDiff,
        }
    }
}

/// An entity's field values in declaration order, sub-documents embedded as
/// tuples.
pub fn flatten_entity<E: Entity>(entity: &E) -> FlatEntity {
    entity
        .fields()
        .into_iter()
        .map(|f| ReportValue::from(f.value))
        .collect()
}

fn first_by_key<E: Entity>(collection: &EntityCollection<E>) -> HashMap<&IdentityKey, &E> {
    let mut index = HashMap::with_capacity(collection.len());
    for entity in collection {
        index.entry(entity.identity_key()).or_insert(entity);
    }
    index
}

/// First entity per key, in iteration order.
fn distinct<E: Entity>(collection: &EntityCollection<E>) -> Vec<&E> {
    let mut seen = HashSet::with_capacity(collection.len());
    let mut firsts = Vec::with_capacity(collection.len());
    for entity in collection {
        if seen.insert(entity.identity_key()) {
            firsts.push(entity);
        } else {
            debug!(kind = %E::ENTITY, key = %entity.identity_key(), "duplicate identity key skipped");
        }
    }
    firsts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfig;
    use mid_types::{
        AdditionalEvidence, Document, EntityKind, IntermediateDetails, IntermediateEntities,
        IntermediateEntity, PrincipalDetails, PrincipalEntities, PrincipalEntity,
    };
    use proptest::prelude::*;

    fn intermediate(name: &str, city: &str) -> IntermediateEntity {
        IntermediateEntity::new(IntermediateDetails {
            city: Some(city.into()),
            country: Some("US".into()),
            ..IntermediateDetails::named(name)
        })
    }

    fn intermediates(entities: Vec<IntermediateEntity>) -> IntermediateEntities {
        entities.into()
    }

    fn principal(first: &str, last: &str, email: &str) -> PrincipalEntity {
        PrincipalEntity::new(PrincipalDetails {
            email: Some(email.into()),
            proof_of_identity: Document {
                document_type: Some("Passport".into()),
                document_number: Some("P1".into()),
                ..Default::default()
            },
            ..PrincipalDetails::named(first, last)
        })
    }

    fn collection(outcome: DiffOutcome) -> CollectionDiff {
        match outcome {
            DiffOutcome::Collection(diff) => diff,
            other => panic!("expected collection diff, got {:?}", other),
        }
    }

    fn text(s: &str) -> ReportValue {
        ReportValue::text(s)
    }

    #[test]
    fn identical_collections_no_diff() {
        let differ = Differ::default();
        let a = intermediates(vec![intermediate("Acme", "Reno"), intermediate("Beta", "Elko")]);
        assert!(differ.reconcile(&a, &a).is_no_diff());
    }

    #[test]
    fn order_does_not_matter() {
        let differ = Differ::default();
        let a = intermediates(vec![intermediate("Acme", "Reno"), intermediate("Beta", "Elko")]);
        let b = intermediates(vec![intermediate("Beta", "elko "), intermediate("Acme", "RENO")]);
        assert!(differ.reconcile(&a, &b).is_no_diff());
    }

    #[test]
    fn left_only_entity_flattened_in_field_order() {
        let differ = Differ::default();
        let a = intermediates(vec![intermediate("Acme", "Reno"), intermediate("Beta", "Elko")]);
        let b = intermediates(vec![intermediate("Beta", "Elko")]);
        let diff = collection(differ.reconcile(&a, &b));

        assert_eq!(diff.kind, EntityKind::IntermediateEntities);
        assert!(diff.shared_entity_diffs.is_empty());
        assert!(diff.right_only_entities.is_empty());
        assert_eq!(
            diff.left_only_entities,
            vec![vec![
                text("Acme"),
                ReportValue::Text(None),
                ReportValue::Text(None),
                text("Reno"),
                ReportValue::Text(None),
                text("US"),
                ReportValue::Text(None),
                ReportValue::Text(None),
            ]]
        );
        assert!(!diff.left_empty);
        assert!(!diff.right_empty);
    }

    #[test]
    fn shared_entity_reports_changed_fields_only() {
        let differ = Differ::default();
        let a = intermediates(vec![intermediate("Acme", "Reno")]);
        let b = intermediates(vec![intermediate("Acme", "Sparks")]);
        let diff = collection(differ.reconcile(&a, &b));

        assert_eq!(diff.shared_entity_diffs.len(), 1);
        let shared = diff.shared("Acme").unwrap();
        assert_eq!(shared.fields.names(), vec!["city"]);
        assert_eq!(shared.fields.get("city"), Some(&(text("Reno"), text("Sparks"))));
    }

    #[test]
    fn intermediate_key_is_case_sensitive() {
        let differ = Differ::default();
        let a = intermediates(vec![intermediate("Acme", "Reno")]);
        let b = intermediates(vec![intermediate("ACME", "Reno")]);
        let diff = collection(differ.reconcile(&a, &b));
        assert_eq!(diff.left_only_entities.len(), 1);
        assert_eq!(diff.right_only_entities.len(), 1);
        assert!(diff.shared_entity_diffs.is_empty());
    }

    #[test]
    fn both_empty_intermediates_report_marker() {
        let differ = Differ::default();
        let diff = collection(differ.reconcile(&IntermediateEntities::empty(), &IntermediateEntities::empty()));
        let mut marker = vec![text("THE GRID IS EMPTY - NO DATA")];
        marker.extend(std::iter::repeat(text("")).take(7));
        assert_eq!(diff.left_only_entities, vec![marker.clone()]);
        assert_eq!(diff.right_only_entities, vec![marker]);
        assert!(diff.left_empty && diff.right_empty);
    }

    #[test]
    fn marker_label_and_switch_follow_config() {
        let differ = Differ::new(DiffConfig {
            empty_grid_label: "NONE".into(),
            ..Default::default()
        });
        let diff = collection(differ.reconcile(&IntermediateEntities::empty(), &IntermediateEntities::empty()));
        assert_eq!(diff.left_only_entities[0][0], text("NONE"));

        let quiet = Differ::new(DiffConfig {
            report_empty_grid: false,
            ..Default::default()
        });
        assert!(quiet
            .reconcile(&IntermediateEntities::empty(), &IntermediateEntities::empty())
            .is_no_diff());
    }

    #[test]
    fn both_empty_principals_no_diff() {
        let differ = Differ::default();
        assert!(differ
            .reconcile(&PrincipalEntities::empty(), &PrincipalEntities::empty())
            .is_no_diff());
    }

    #[test]
    fn one_empty_side_flags_emptiness() {
        let differ = Differ::default();
        let a = intermediates(vec![intermediate("Acme", "Reno")]);
        let diff = collection(differ.reconcile(&IntermediateEntities::empty(), &a));
        assert!(diff.left_empty);
        assert!(!diff.right_empty);
        assert_eq!(diff.right_only_entities.len(), 1);
        assert!(diff.left_only_entities.is_empty());
    }

    #[test]
    fn principals_match_on_normalized_name() {
        let differ = Differ::default();
        let a: PrincipalEntities = vec![principal("John", "Smith", "j@x.com")].into();
        let b: PrincipalEntities = vec![principal(" john", "SMITH ", "k@x.com")].into();
        let diff = collection(differ.reconcile(&a, &b));
        assert!(diff.left_only_entities.is_empty());
        assert!(diff.right_only_entities.is_empty());
        let shared = diff.shared("John Smith").unwrap();
        assert_eq!(shared.fields.names(), vec!["email"]);
        assert_eq!(
            shared.fields.get("email"),
            Some(&(text("j@x.com"), text("k@x.com")))
        );
    }

    #[test]
    fn principal_formatting_only_no_diff() {
        let differ = Differ::default();
        let a: PrincipalEntities = vec![principal("John", "Smith", "j@x.com")].into();
        let b: PrincipalEntities = vec![principal("John", "Smith", " J@X.com")].into();
        assert!(differ.reconcile(&a, &b).is_no_diff());
    }

    #[test]
    fn principal_document_compared_as_whole_tuple() {
        let differ = Differ::default();
        let a: PrincipalEntities = vec![principal("John", "Smith", "j@x.com")].into();
        let mut changed = principal("John", "Smith", "j@x.com").into_details();
        changed.proof_of_identity.document_number = Some("p1".into());
        let b: PrincipalEntities = vec![PrincipalEntity::new(changed)].into();

        let diff = collection(differ.reconcile(&a, &b));
        let shared = diff.shared("John Smith").unwrap();
        assert_eq!(shared.fields.names(), vec!["proof_of_identity"]);
        let (left, right) = shared.fields.get("proof_of_identity").unwrap();
        let ReportValue::Tuple(left) = left else {
            panic!("expected tuple");
        };
        let ReportValue::Tuple(right) = right else {
            panic!("expected tuple");
        };
        assert_eq!(left.len(), 6);
        assert_eq!(left[1].as_deref(), Some("P1"));
        assert_eq!(right[1].as_deref(), Some("p1"));
    }

    #[test]
    fn left_only_principal_embeds_documents() {
        let differ = Differ::default();
        let mut details = principal("Ann", "Lee", "a@x.com").into_details();
        details.additional_evidence_of_identity = AdditionalEvidence {
            document_type: Some("Bill".into()),
            description: None,
        };
        let a: PrincipalEntities = vec![PrincipalEntity::new(details)].into();
        let diff = collection(differ.reconcile(&a, &PrincipalEntities::empty()));

        let flat = &diff.left_only_entities[0];
        assert_eq!(flat.len(), 28);
        assert_eq!(flat[0], text("Ann"));
        assert_eq!(flat[2], text("Lee"));
        assert!(matches!(&flat[25], ReportValue::Tuple(doc) if doc.len() == 6));
        assert_eq!(
            flat[26],
            ReportValue::Tuple(vec![Some("Bill".into()), None])
        );
        assert!(diff.right_empty);
    }

    #[test]
    fn duplicate_left_keys_first_wins() {
        let differ = Differ::default();
        let mut first = principal("John", "Smith", "first@x.com").into_details();
        first.city = Some("Reno".into());
        let mut second = principal("john", "smith", "second@x.com").into_details();
        second.city = Some("Elko".into());
        let a: PrincipalEntities =
            vec![PrincipalEntity::new(first), PrincipalEntity::new(second)].into();
        let b: PrincipalEntities = vec![principal("John", "Smith", "first@x.com")].into();

        let diff = collection(differ.reconcile(&a, &b));
        // Only the first duplicate is paired; the second is neither paired
        // nor reported as left-only.
        assert_eq!(diff.shared_entity_diffs.len(), 1);
        let shared = &diff.shared_entity_diffs[0];
        assert_eq!(shared.label, "John Smith");
        assert_eq!(shared.fields.names(), vec!["city"]);
        assert_eq!(shared.fields.get("city").unwrap().0, text("Reno"));
        assert!(diff.left_only_entities.is_empty());
        assert!(diff.right_only_entities.is_empty());
    }

    #[test]
    fn duplicate_left_only_keys_reported_once() {
        let differ = Differ::default();
        let a = intermediates(vec![intermediate("Acme", "Reno"), intermediate("Acme", "Elko")]);
        let b = intermediates(vec![intermediate("Beta", "Reno")]);
        let diff = collection(differ.reconcile(&a, &b));
        assert_eq!(diff.left_only_entities.len(), 1);
        assert_eq!(diff.left_only_entities[0][3], text("Reno"));
    }

    #[test]
    fn duplicate_right_keys_first_wins() {
        let differ = Differ::default();
        let a = intermediates(vec![intermediate("Acme", "Reno")]);
        let b = intermediates(vec![intermediate("Acme", "Reno"), intermediate("Acme", "Elko")]);
        assert!(differ.reconcile(&a, &b).is_no_diff());
    }

    #[test]
    fn swapping_sides_reverses_document_pairs() {
        let differ = Differ::default();
        let a: PrincipalEntities = vec![principal("John", "Smith", "j@x.com")].into();
        let mut changed = principal("John", "Smith", "k@x.com").into_details();
        changed.proof_of_identity.document_number = Some("P2".into());
        let b: PrincipalEntities = vec![PrincipalEntity::new(changed)].into();

        let forward = collection(differ.reconcile(&a, &b));
        let backward = collection(differ.reconcile(&b, &a));
        let f = forward.shared("John Smith").unwrap();
        let r = backward.shared("John Smith").unwrap();
        assert_eq!(f.fields.names(), vec!["email", "proof_of_identity"]);
        assert_eq!(f.fields.names(), r.fields.names());
        for (name, (left, right)) in f.fields.iter() {
            let (r_left, r_right) = r.fields.get(name).unwrap();
            assert_eq!(left, r_right);
            assert_eq!(right, r_left);
        }
        let (left_doc, _) = f.fields.get("proof_of_identity").unwrap();
        assert!(matches!(left_doc, ReportValue::Tuple(doc) if doc[1].as_deref() == Some("P1")));
        assert!(forward.left_only_entities.is_empty() && backward.right_only_entities.is_empty());
    }

    fn grid(entries: &[(u8, u8)]) -> IntermediateEntities {
        entries
            .iter()
            .map(|(name, city)| intermediate(&format!("E{name}"), &format!("C{city}")))
            .collect()
    }

    proptest! {
        #[test]
        fn swapping_sides_mirrors_the_report(
            left in prop::collection::vec((0u8..6, 0u8..3), 0..6),
            right in prop::collection::vec((0u8..6, 0u8..3), 0..6),
        ) {
            let differ = Differ::default();
            let (l, r) = (grid(&left), grid(&right));
            let forward = differ.reconcile(&l, &r);
            let backward = differ.reconcile(&r, &l);

            match (forward, backward) {
                (DiffOutcome::NoDiff, DiffOutcome::NoDiff) => {}
                (DiffOutcome::Collection(f), DiffOutcome::Collection(b)) => {
                    prop_assert_eq!(&f.left_only_entities, &b.right_only_entities);
                    prop_assert_eq!(&f.right_only_entities, &b.left_only_entities);
                    prop_assert_eq!(f.left_empty, b.right_empty);
                    prop_assert_eq!(f.right_empty, b.left_empty);
                    prop_assert_eq!(f.shared_entity_diffs.len(), b.shared_entity_diffs.len());
                    for shared in &f.shared_entity_diffs {
                        let mirrored = b.shared(&shared.label).unwrap();
                        prop_assert_eq!(shared.fields.names(), mirrored.fields.names());
                        for (name, (left, right)) in shared.fields.iter() {
                            let (m_left, m_right) = mirrored.fields.get(name).unwrap();
                            prop_assert_eq!(left, m_right);
                            prop_assert_eq!(right, m_left);
                        }
                    }
                }
                (f, b) => prop_assert!(false, "asymmetric outcome: {:?} vs {:?}", f, b),
            }
        }
    }
}
