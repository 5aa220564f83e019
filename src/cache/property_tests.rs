//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to check the contracts that must hold for every key and
//! payload, not just the handful of values unit tests pick.

use proptest::prelude::*;
use serde_json::Value;

use crate::backend::MemoryStore;
use crate::cache::{validate_name, Cache, DefaultValue, ResolvedTtl, Ttl, FORBIDDEN_NAME_CHARS};
use crate::config::Options;

// == Strategies ==
/// Generates keys free of the reserved character set.
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,64}"
}

/// Generates storable payloads across every supported JSON kind.
fn payload_strategy() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        prop::num::f64::NORMAL.prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,64}".prop_map(Value::from),
    ];
    // one level of nesting is enough to exercise the recursive cases
    prop_oneof![
        scalar.clone(),
        prop::collection::vec(scalar.clone(), 0..4).prop_map(Value::from),
        prop::collection::btree_map("[a-z]{1,8}", scalar, 0..4)
            .prop_map(|map| Value::from(serde_json::Map::from_iter(map))),
    ]
}

fn memory_cache() -> Cache<MemoryStore> {
    Cache::memory(Options::new()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing any payload and reading it back before expiry returns the
    // exact payload that was stored.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), payload in payload_strategy()) {
        let cache = memory_cache();

        prop_assert!(cache.set(&key, payload.clone(), Ttl::Forever).unwrap());
        let retrieved = cache.get(&key, DefaultValue::of("sentinel")).unwrap();
        prop_assert_eq!(retrieved, payload);
    }

    // The envelope codec is lossless for every storable payload.
    #[test]
    fn prop_codec_roundtrip(payload in payload_strategy()) {
        use crate::cache::CacheRecord;

        let record = CacheRecord::new(payload, Some(60));
        let bytes = record.encode().unwrap();
        let decoded = CacheRecord::decode(&bytes).unwrap();
        prop_assert_eq!(decoded, record);
    }

    // Writing a second payload under the same key fully replaces the first.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        first in payload_strategy(),
        second in payload_strategy()
    ) {
        let cache = memory_cache();

        cache.set(&key, first, Ttl::Forever).unwrap();
        cache.set(&key, second.clone(), Ttl::Forever).unwrap();

        let retrieved = cache.get(&key, DefaultValue::null()).unwrap();
        prop_assert_eq!(retrieved, second);
    }

    // After delete, the key reads as a miss; deleting again still succeeds.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), payload in payload_strategy()) {
        let cache = memory_cache();

        cache.set(&key, payload, Ttl::Forever).unwrap();
        prop_assert!(cache.has(&key).unwrap());

        prop_assert!(cache.delete(&key).unwrap());
        prop_assert!(!cache.has(&key).unwrap());
        prop_assert!(cache.delete(&key).unwrap());
    }

    // A name containing any reserved character is rejected; a clean name
    // never is. Validation itself must not panic on arbitrary input.
    #[test]
    fn prop_name_validation(name in "\\PC{0,32}") {
        let contains_reserved = name.chars().any(|c| FORBIDDEN_NAME_CHARS.contains(c));
        let verdict = validate_name(&name, FORBIDDEN_NAME_CHARS);
        prop_assert_eq!(verdict.is_err(), contains_reserved);
    }

    // Relative TTLs resolve to themselves; negative ones resolve to Expired.
    #[test]
    fn prop_ttl_resolution(seconds in -3_600i64..3_600) {
        let resolved = Ttl::Duration(chrono::Duration::seconds(seconds)).resolve();
        if seconds < 0 {
            prop_assert_eq!(resolved, ResolvedTtl::Expired);
        } else {
            prop_assert_eq!(resolved, ResolvedTtl::Seconds(seconds as u64));
        }
    }
}
