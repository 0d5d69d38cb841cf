//! Property tests for round-trip fidelity classification

use codec_bench::bench::FieldOutcome;
use codec_bench::prelude::*;
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>().prop_map(Value::Float),
        "[a-z ]{0,8}".prop_map(Value::Text),
        "[a-z]{1,8}".prop_map(Value::Symbol),
    ]
}

fn any_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::vec((inner.clone(), inner), 0..4).prop_map(Value::Mapping),
        ]
    })
}

/// Values every serde-based format can carry: no symbols, finite floats,
/// unique text keys
fn plain_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1e12f64..1e12).prop_map(Value::Float),
        "[a-z ]{0,8}".prop_map(Value::Text),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(|fields| {
                Value::Mapping(fields.into_iter().map(|(k, v)| (Value::Text(k), v)).collect())
            }),
        ]
    })
}

fn sample_of(values: Vec<Value>) -> Sample {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (format!("f{}", i), v))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bincode_round_trips_any_value(value in any_value()) {
        let payload = BincodeCodec.serialize(&value).unwrap();
        prop_assert_eq!(BincodeCodec.deserialize(&payload).unwrap(), value);
    }

    #[test]
    fn classification_matches_round_trip(values in prop::collection::vec(any_value(), 1..5)) {
        let registry = CodecRegistry::with_defaults().unwrap();
        let sample = sample_of(values);
        let report = check_fidelity(&registry, &sample);

        for codec in registry.list() {
            let result = report.get(codec.name()).unwrap();
            for (field, original) in sample.iter() {
                let round_trip = codec
                    .serialize(original)
                    .and_then(|payload| codec.deserialize(&payload));
                match result.outcome(field).unwrap() {
                    FieldOutcome::Supported => {
                        prop_assert_eq!(round_trip.unwrap(), original.clone());
                    }
                    FieldOutcome::Mismatch { round_tripped } => {
                        prop_assert_ne!(round_tripped, original);
                    }
                    FieldOutcome::Failed { .. } => {
                        prop_assert!(round_trip.is_err());
                    }
                }
            }
        }
    }

    #[test]
    fn plain_values_survive_every_format(value in plain_value()) {
        let registry = CodecRegistry::with_defaults().unwrap();
        let sample = Sample::new().with_field("value", value);
        let report = check_fidelity(&registry, &sample);

        for result in &report.results {
            prop_assert!(
                result.is_supported("value"),
                "{} lost {:?}",
                result.codec,
                result.outcome("value")
            );
        }
    }

    #[test]
    fn symbols_never_survive_serde_formats(name in "[a-z]{1,8}") {
        let registry = CodecRegistry::with_defaults().unwrap();
        let sample = Sample::new().with_field("tag", Value::symbol(name));
        let report = check_fidelity(&registry, &sample);

        for result in report.results.iter().filter(|r| r.codec != "bincode") {
            prop_assert_eq!(result.unsupported(), vec!["tag"]);
        }
        prop_assert!(report.get("bincode").unwrap().is_supported("tag"));
    }
}
