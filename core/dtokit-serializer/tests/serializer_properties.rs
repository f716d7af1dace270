//! Property-based tests for wire round-trips.

use dtokit_model::{Dto, dto};
use dtokit_serializer::{Serializer, SerializerConfig};
use proptest::prelude::*;

dto! {
    pub struct Dummy {
        id: i64,
        name: String,
        email: String,
        active: bool,
    }
}

fn complete_dummy() -> impl Strategy<Value = Dummy> {
    (any::<i64>(), ".{0,24}", "[a-z]{1,8}@[a-z]{1,8}\\.io", any::<bool>()).prop_map(
        |(id, name, email, active)| Dummy {
            id: Some(id),
            name: Some(name),
            email: Some(email),
            active: Some(active),
        },
    )
}

proptest! {
    /// deserialize(serialize(d)) into a fresh instance equals d
    #[test]
    fn serialize_round_trips(original in complete_dummy(), pretty in any::<bool>()) {
        let config = if pretty { SerializerConfig::pretty() } else { SerializerConfig::default() };
        let mut source = original.clone();
        let text = Serializer::with_config(&mut source, config).serialize().unwrap();

        let mut fresh = Dummy::default();
        Serializer::new(&mut fresh).deserialize(&text).unwrap();
        prop_assert_eq!(&fresh, &original);
        prop_assert_eq!(fresh.hash_code(), original.hash_code());
    }

    /// decode(encode(m)) yields the normalized form of m
    #[test]
    fn encode_then_decode_is_identity(original in complete_dummy()) {
        let mapping = serde_json::Value::Object(original.to_mapping());
        let mut first = Dummy::default();
        let text = Serializer::new(&mut first).encode(&mapping).unwrap();

        let mut second = Dummy::default();
        let decoded = Serializer::new(&mut second).decode(&text).unwrap();
        prop_assert_eq!(serde_json::Value::Object(decoded), mapping);
    }
}
