//! Codec round-trip laws, checked over generated values: for every family
//! value `v`, `decode(encode(v)) == v`, and the encoded object leads with
//! the family's discriminator field.

use meshwire_model::{
    codec::{decode_tagged, encode_tagged},
    families::{
        AzureBlobStore, BackupStorage, FileShare, NamedPartitionScheme,
        PartitionInstanceCountScaleMechanism, PartitionScheme, ScalingMechanism,
        UniformInt64RangePartitionScheme,
    },
    registry::TaggedFamily,
};
use proptest::prelude::*;

fn assert_round_trips<F>(value: &F)
where
    F: TaggedFamily + PartialEq + std::fmt::Debug,
{
    let encoded = encode_tagged(value).unwrap();
    let obj = encoded.as_object().unwrap();
    assert_eq!(
        obj.keys().next().map(String::as_str),
        Some(F::KIND_FIELD),
        "discriminator must be the first wire field"
    );
    assert_eq!(&decode_tagged::<F>(&encoded).unwrap(), value);
}

fn field_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_\\-]{1,24}"
}

fn backup_storage() -> impl Strategy<Value = BackupStorage> {
    prop_oneof![
        (proptest::option::of(field_text()), field_text(), field_text()).prop_map(
            |(friendly, conn, container)| {
                BackupStorage::AzureBlobStore(
                    AzureBlobStore::new(friendly, conn, container).unwrap(),
                )
            }
        ),
        (
            proptest::option::of(field_text()),
            field_text(),
            proptest::option::of(field_text()),
            proptest::option::of(field_text()),
        )
            .prop_map(|(friendly, path, user, password)| {
                BackupStorage::FileShare(
                    FileShare::new(friendly, path, user, password).unwrap(),
                )
            }),
    ]
}

fn partition_scheme() -> impl Strategy<Value = PartitionScheme> {
    prop_oneof![
        Just(PartitionScheme::Singleton),
        (1..=1024_i64, any::<i64>(), any::<i64>()).prop_map(|(count, a, b)| {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            PartitionScheme::UniformInt64Range(
                UniformInt64RangePartitionScheme::new(count, low, high).unwrap(),
            )
        }),
        proptest::collection::vec(field_text(), 1..8).prop_map(|names| {
            let count = i64::try_from(names.len()).unwrap();
            PartitionScheme::Named(NamedPartitionScheme::new(count, names).unwrap())
        }),
    ]
}

fn scaling_mechanism() -> impl Strategy<Value = ScalingMechanism> {
    (1..=1000_i64, 0..=1000_i64, 1..=100_i64).prop_map(|(min, extra, increment)| {
        ScalingMechanism::PartitionInstanceCount(
            PartitionInstanceCountScaleMechanism::new(min, min + extra, increment).unwrap(),
        )
    })
}

proptest! {
    #[test]
    fn backup_storage_round_trips(value in backup_storage()) {
        assert_round_trips(&value);
    }

    #[test]
    fn partition_schemes_round_trip(value in partition_scheme()) {
        assert_round_trips(&value);
    }

    #[test]
    fn scaling_mechanisms_round_trip(value in scaling_mechanism()) {
        assert_round_trips(&value);
    }

    // Decoding is pure: the same payload always yields the same value.
    #[test]
    fn decoding_is_deterministic(value in backup_storage()) {
        let encoded = encode_tagged(&value).unwrap();
        let first: BackupStorage = decode_tagged(&encoded).unwrap();
        let second: BackupStorage = decode_tagged(&encoded).unwrap();
        prop_assert_eq!(first, second);
    }
}
