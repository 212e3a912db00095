//! Tests for job module

use super::*;
use crate::error::Error;
use crate::table::TableMetadata;
use crate::types::{keys, JobProperties};
use pretty_assertions::assert_eq;

fn dated_table() -> TableMetadata {
    TableMetadata::new("t", "/wh/t")
        .with_column("id", "int")
        .with_partition_column("year", "int")
        .with_partition_column("month", "string")
        .with_partition_column("day", "string")
}

// ============================================================================
// JobWriteDescriptor Tests
// ============================================================================

#[test]
fn test_write_descriptor_new_has_no_location() {
    let desc = JobWriteDescriptor::new(dated_table());
    assert!(desc.location().is_none());
}

#[test]
fn test_materialization() {
    let partial = JobWriteDescriptor::new(dated_table()).with_partition_value("year", "2024");
    assert!(!partial.is_fully_materialized());
    assert_eq!(partial.dynamic_partition_keys(), vec!["month", "day"]);

    let full = partial
        .with_partition_value("month", "05")
        .with_partition_value("day", "01");
    assert!(full.is_fully_materialized());
    assert!(full.dynamic_partition_keys().is_empty());
}

#[test]
fn test_unpartitioned_is_fully_materialized() {
    let desc = JobWriteDescriptor::new(TableMetadata::new("t", "/wh/t"));
    assert!(desc.is_fully_materialized());
}

#[test]
fn test_empty_overrides_are_absent() {
    let desc = JobWriteDescriptor::new(dated_table())
        .with_custom_dynamic_root("")
        .with_custom_dynamic_path("")
        .with_location_override("");

    assert!(desc.custom_dynamic_root().is_none());
    assert!(desc.custom_dynamic_path().is_none());
    assert!(desc.location_override().is_none());
}

#[test]
fn test_set_location() {
    let mut desc = JobWriteDescriptor::new(dated_table());
    desc.set_location("/wh/t/_SCRATCH_a1".to_string());
    assert_eq!(desc.location(), Some("/wh/t/_SCRATCH_a1"));

    desc.clear_location();
    assert!(desc.location().is_none());
}

// ============================================================================
// DynamicPartitionContext Tests
// ============================================================================

#[test]
fn test_context_dynamic_mode() {
    let ctx = DynamicPartitionContext::dynamic("job17");
    assert_eq!(
        ctx.mode().unwrap(),
        WriteMode::Dynamic {
            dyn_hash: "job17".to_string()
        }
    );
    assert!(ctx.mode().unwrap().is_dynamic());
}

#[test]
fn test_context_static_mode() {
    let ctx = DynamicPartitionContext::scratch("a1");
    assert_eq!(
        ctx.mode().unwrap(),
        WriteMode::Static {
            id_hash: "a1".to_string()
        }
    );
}

#[test]
fn test_context_dynamic_wins_over_scratch() {
    let ctx = DynamicPartitionContext {
        dyn_hash: Some("d".to_string()),
        id_hash: Some("s".to_string()),
    };
    assert!(ctx.mode().unwrap().is_dynamic());
}

#[test]
fn test_context_neither_marker() {
    let err = DynamicPartitionContext::default().mode().unwrap_err();
    assert!(matches!(err, Error::MissingState { .. }));
}

#[test]
fn test_context_from_ids_drops_empty_values() {
    assert_eq!(
        DynamicPartitionContext::from_ids(Some(""), Some("a1")),
        DynamicPartitionContext::scratch("a1")
    );
    assert_eq!(
        DynamicPartitionContext::from_ids(None, Some("")),
        DynamicPartitionContext::default()
    );
}

#[test]
fn test_context_from_job_properties() {
    let mut props = JobProperties::new();
    props.insert(keys::DYNAMIC_PARTITIONING_JOB_ID.to_string(), String::new());
    props.insert(keys::OUTPUT_ID_HASH.to_string(), "a1".to_string());

    let ctx = DynamicPartitionContext::from_job_properties(&props);
    assert_eq!(ctx, DynamicPartitionContext::scratch("a1"));
}

// ============================================================================
// Codec Tests
// ============================================================================

#[test]
fn test_codec_round_trip_preserves_location() {
    let codec = Base64JsonCodec;
    let mut desc = JobWriteDescriptor::new(dated_table())
        .with_partition_value("year", "2024")
        .with_custom_dynamic_path("${year}/x");
    desc.set_location("/wh/t/_DYNTEMP_job17".to_string());

    let encoded = encode(&codec, &desc).unwrap();
    assert!(!encoded.contains('{'));

    let decoded: JobWriteDescriptor = decode(&codec, &encoded).unwrap();
    assert_eq!(decoded, desc);
    assert_eq!(decoded.location(), Some("/wh/t/_DYNTEMP_job17"));
}

#[test]
fn test_codec_rejects_invalid_base64() {
    let result: crate::Result<JobWriteDescriptor> = decode(&Base64JsonCodec, "not base64!!");
    assert!(matches!(result, Err(Error::Base64(_))));
}

#[test]
fn test_codec_rejects_wrong_shape() {
    let codec = Base64JsonCodec;
    let encoded = codec.encode(&serde_json::json!({"unexpected": true})).unwrap();
    let result: crate::Result<JobWriteDescriptor> = decode(&codec, &encoded);
    assert!(matches!(result, Err(Error::Decode { .. })));
}

#[test]
fn test_codec_read_descriptor_list() {
    let codec = Base64JsonCodec;
    let list = vec![
        JobReadDescriptor::new(dated_table()),
        JobReadDescriptor::new(dated_table()).with_filter("year = 2024"),
    ];
    let encoded = encode(&codec, &list).unwrap();
    let decoded: Vec<JobReadDescriptor> = decode(&codec, &encoded).unwrap();
    assert_eq!(decoded, list);
}
