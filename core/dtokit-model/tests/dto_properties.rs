//! Property-based tests for hydration, equality and hashing.

use dtokit_model::{Dto, Error, Mapping, dto};
use proptest::prelude::*;
use serde_json::{Value, json};

dto! {
    pub struct Dummy {
        id: i64,
        name: String,
        email: String,
        score: f64,
        active: bool,
    }
}

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn complete_mapping() -> impl Strategy<Value = Mapping> {
    (
        any::<i64>(),
        "[a-z]{1,12}",
        "[a-z]{1,8}@[a-z]{1,8}\\.io",
        -1.0e6f64..1.0e6,
        any::<bool>(),
    )
        .prop_map(|(id, name, email, score, active)| {
            let mut mapping = Mapping::new();
            mapping.insert("id".into(), json!(id));
            mapping.insert("name".into(), json!(name));
            mapping.insert("email".into(), json!(email));
            mapping.insert("score".into(), json!(score));
            mapping.insert("active".into(), json!(active));
            mapping
        })
}

fn partial_mapping() -> impl Strategy<Value = Mapping> {
    (complete_mapping(), prop::collection::vec(any::<bool>(), 5)).prop_map(|(full, keep)| {
        full.into_iter()
            .zip(keep)
            .map(|((key, value), keep)| (key, if keep { value } else { Value::Null }))
            .collect()
    })
}

proptest! {
    /// normalize(hydrate(m)) == m for complete, valid mappings
    #[test]
    fn hydrate_round_trips(mapping in complete_mapping()) {
        let dto = Dummy::from_source(Some(&Value::Object(mapping.clone()))).unwrap();
        prop_assert!(dto.is_complete());
        prop_assert_eq!(dto.to_mapping(), mapping);
    }

    /// equal instances always hash equal
    #[test]
    fn equality_implies_equal_hash(a in partial_mapping(), b in partial_mapping()) {
        let a = Dummy::from_source(Some(&Value::Object(a))).unwrap();
        let b = Dummy::from_source(Some(&Value::Object(b))).unwrap();
        if a == b {
            prop_assert_eq!(a.hash_code(), b.hash_code());
        }
        prop_assert_eq!(a.hash_code(), a.clone().hash_code());
    }

    /// undeclared keys are never silently ignored
    #[test]
    fn unknown_key_always_rejected(key in "[a-z_]{1,16}", value in any::<i32>()) {
        prop_assume!(!Dummy::dto_schema().contains(&key));
        let mut mapping = Mapping::new();
        mapping.insert(key, json!(value));
        let err = Dummy::from_source(Some(&Value::Object(mapping))).unwrap_err();
        let is_unknown = matches!(err, Error::UnknownField { .. });
        prop_assert!(is_unknown);
    }

    /// completeness is exactly "no null field"
    #[test]
    fn complete_iff_no_null(mapping in partial_mapping()) {
        let expected = mapping.values().all(|v| !v.is_null());
        let dto = Dummy::from_source(Some(&Value::Object(mapping))).unwrap();
        prop_assert_eq!(dto.is_complete(), expected);
    }
}
