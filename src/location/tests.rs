//! Tests for location module

use super::*;
use crate::error::Error;
use crate::job::{
    decode, encode, Base64JsonCodec, DynamicPartitionContext, JobWriteDescriptor, WriteMode,
};
use crate::table::TableMetadata;
use crate::types::{keys, JobProperties};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn unpartitioned() -> TableMetadata {
    TableMetadata::new("t", "/wh/t").with_column("id", "int")
}

fn year_month() -> TableMetadata {
    TableMetadata::new("t", "/wh/t")
        .with_column("id", "int")
        .with_partition_column("year", "int")
        .with_partition_column("month", "string")
}

fn dynamic(hash: &str) -> WriteMode {
    WriteMode::Dynamic {
        dyn_hash: hash.to_string(),
    }
}

fn scratch(hash: &str) -> WriteMode {
    WriteMode::Static {
        id_hash: hash.to_string(),
    }
}

// ============================================================================
// Plan Selection Tests
// ============================================================================

#[test]
fn test_plan_template_for_dynamic_with_custom_path() {
    let desc = JobWriteDescriptor::new(year_month().external())
        .with_custom_dynamic_path("${year}/${month}");
    assert_eq!(
        decide_output_plan(&desc, &dynamic("d")),
        OutputPlan::OverrideByTemplate {
            template: "${year}/${month}".to_string()
        }
    );
}

#[test]
fn test_plan_template_ignored_for_static() {
    let desc = JobWriteDescriptor::new(year_month().external())
        .with_partition_value("year", "2024")
        .with_partition_value("month", "05")
        .with_custom_dynamic_path("${year}/${month}");
    assert_eq!(
        decide_output_plan(&desc, &scratch("s")),
        OutputPlan::PartitionPath
    );
}

#[test]
fn test_plan_location_override_for_external_static() {
    let desc = JobWriteDescriptor::new(year_month().external())
        .with_location_override("/data/landing");
    assert_eq!(
        decide_output_plan(&desc, &scratch("s")),
        OutputPlan::OverrideByLocation {
            location: "/data/landing".to_string()
        }
    );
}

#[test]
fn test_plan_location_override_needs_external() {
    let desc = JobWriteDescriptor::new(unpartitioned()).with_location_override("/data/landing");
    assert_eq!(
        decide_output_plan(&desc, &scratch("s")),
        OutputPlan::Unpartitioned
    );
}

#[test]
fn test_plan_location_override_ignored_for_dynamic() {
    let desc = JobWriteDescriptor::new(year_month().external())
        .with_location_override("/data/landing");
    assert_eq!(
        decide_output_plan(&desc, &dynamic("d")),
        OutputPlan::DynamicPartitions
    );
}

#[test]
fn test_plan_unpartitioned() {
    let desc = JobWriteDescriptor::new(unpartitioned());
    assert_eq!(
        decide_output_plan(&desc, &scratch("s")),
        OutputPlan::Unpartitioned
    );
}

#[test]
fn test_plan_partition_path_for_static() {
    let desc = JobWriteDescriptor::new(year_month()).with_partition_value("year", "2024");
    assert_eq!(
        decide_output_plan(&desc, &scratch("s")),
        OutputPlan::PartitionPath
    );
}

#[test]
fn test_plan_partition_path_for_fully_known_dynamic() {
    let desc = JobWriteDescriptor::new(year_month())
        .with_partition_value("year", "2024")
        .with_partition_value("month", "05");
    assert_eq!(
        decide_output_plan(&desc, &dynamic("d")),
        OutputPlan::PartitionPath
    );
}

// ============================================================================
// Working Directory Tests
// ============================================================================

#[test]
fn test_working_directory_static() {
    let desc = JobWriteDescriptor::new(year_month());
    let dir = working_directory(&desc, &scratch("a1")).unwrap();
    assert_eq!(dir.to_string(), "/wh/t/_SCRATCH_a1");
}

#[test]
fn test_working_directory_dynamic() {
    let desc = JobWriteDescriptor::new(year_month());
    let dir = working_directory(&desc, &dynamic("job17")).unwrap();
    assert_eq!(dir.to_string(), "/wh/t/_DYNTEMP_job17");
}

#[test]
fn test_working_directory_custom_root_for_external() {
    let desc = JobWriteDescriptor::new(year_month().external()).with_custom_dynamic_root("custom");
    let dir = working_directory(&desc, &dynamic("job17")).unwrap();
    assert_eq!(dir.to_string(), "/wh/t/custom/_DYNTEMP_job17");
}

#[test]
fn test_working_directory_custom_root_ignored_for_managed() {
    let desc = JobWriteDescriptor::new(year_month()).with_custom_dynamic_root("custom");
    let dir = working_directory(&desc, &dynamic("job17")).unwrap();
    assert_eq!(dir.to_string(), "/wh/t/_DYNTEMP_job17");
}

#[test]
fn test_working_directory_custom_root_ignored_for_static() {
    let desc = JobWriteDescriptor::new(year_month().external()).with_custom_dynamic_root("custom");
    let dir = working_directory(&desc, &scratch("a1")).unwrap();
    assert_eq!(dir.to_string(), "/wh/t/_SCRATCH_a1");
}

#[test]
fn test_working_directory_keeps_scheme() {
    let table = TableMetadata::new("t", "hdfs://nn:8020/wh/t/");
    let desc = JobWriteDescriptor::new(table);
    let dir = working_directory(&desc, &scratch("a1")).unwrap();
    assert_eq!(dir.to_string(), "hdfs://nn:8020/wh/t/_SCRATCH_a1");
}

#[test]
fn test_working_directory_invalid_table_location() {
    let desc = JobWriteDescriptor::new(TableMetadata::new("t", ""));
    assert!(matches!(
        working_directory(&desc, &scratch("a1")),
        Err(Error::InvalidPath { .. })
    ));
}

#[test]
fn test_distinct_hashes_give_disjoint_working_directories() {
    let desc = JobWriteDescriptor::new(year_month());
    for (a, b) in [
        (scratch("a1"), scratch("a2")),
        (dynamic("job17"), dynamic("job18")),
    ] {
        let dir_a = working_directory(&desc, &a).unwrap();
        let dir_b = working_directory(&desc, &b).unwrap();
        assert_ne!(dir_a, dir_b);
        assert!(!dir_a.to_string().starts_with(&format!("{dir_b}/")));
        assert!(!dir_b.to_string().starts_with(&format!("{dir_a}/")));
    }
}

// ============================================================================
// Resolution Tests
// ============================================================================

#[test]
fn test_resolve_unpartitioned_is_scratch_dir() {
    let mut desc = JobWriteDescriptor::new(unpartitioned());
    let resolution =
        resolve_output_location(&mut desc, &DynamicPartitionContext::scratch("a1")).unwrap();

    assert_eq!(resolution.plan, OutputPlan::Unpartitioned);
    assert_eq!(resolution.relative_path, "");
    assert_eq!(resolution.location, resolution.working_directory);
    assert_eq!(desc.location(), Some("/wh/t/_SCRATCH_a1"));
    assert!(resolution.publish_output_dir);
}

#[test]
fn test_resolve_fully_materialized_static() {
    let mut desc = JobWriteDescriptor::new(year_month())
        .with_partition_value("year", "2024")
        .with_partition_value("month", "05");
    let resolution =
        resolve_output_location(&mut desc, &DynamicPartitionContext::scratch("a1")).unwrap();

    assert_eq!(resolution.relative_path, "year=2024/month=05");
    assert_eq!(desc.location(), Some("/wh/t/_SCRATCH_a1/year=2024/month=05"));
    assert!(resolution.publish_output_dir);

    let mut props = JobProperties::new();
    assert!(publish_output_dir(&resolution, &mut props));
    assert_eq!(
        props.get(keys::OUTPUT_DIR).map(String::as_str),
        Some("/wh/t/_SCRATCH_a1/year=2024/month=05")
    );
}

#[test]
fn test_resolve_partial_dynamic() {
    let mut desc = JobWriteDescriptor::new(year_month()).with_partition_value("year", "2024");
    let resolution =
        resolve_output_location(&mut desc, &DynamicPartitionContext::dynamic("job17")).unwrap();

    assert_eq!(resolution.working_directory.to_string(), "/wh/t/_DYNTEMP_job17");
    assert_eq!(desc.location(), Some("/wh/t/_DYNTEMP_job17"));
    assert!(!resolution.publish_output_dir);

    let mut props = JobProperties::new();
    assert!(!publish_output_dir(&resolution, &mut props));
    assert!(!props.contains_key(keys::OUTPUT_DIR));
}

#[test]
fn test_resolve_partial_static_never_publishes() {
    let mut desc = JobWriteDescriptor::new(year_month()).with_partition_value("year", "2024");
    let resolution =
        resolve_output_location(&mut desc, &DynamicPartitionContext::scratch("a1")).unwrap();

    assert_eq!(desc.location(), Some("/wh/t/_SCRATCH_a1/year=2024"));
    assert!(!resolution.publish_output_dir);
}

#[test]
fn test_resolve_external_location_override() {
    let mut desc = JobWriteDescriptor::new(year_month().external())
        .with_partition_value("year", "2024")
        .with_partition_value("month", "05")
        .with_location_override("/data/landing");
    let resolution =
        resolve_output_location(&mut desc, &DynamicPartitionContext::scratch("a1")).unwrap();

    assert_eq!(resolution.relative_path, "");
    assert_eq!(desc.location(), Some("/wh/t/_SCRATCH_a1"));
    assert_eq!(desc.location_override(), Some("/data/landing"));
    assert!(resolution.publish_output_dir);
}

#[test]
fn test_resolve_custom_template_fills_known_values() {
    let mut desc = JobWriteDescriptor::new(year_month().external())
        .with_partition_value("year", "2024")
        .with_custom_dynamic_root("landing")
        .with_custom_dynamic_path("out/${year}/${month}");
    let resolution =
        resolve_output_location(&mut desc, &DynamicPartitionContext::dynamic("job17")).unwrap();

    assert_eq!(resolution.relative_path, "out/2024/[^/]*");
    assert_eq!(
        desc.location(),
        Some("/wh/t/landing/_DYNTEMP_job17/out/2024/[^/]*")
    );
    assert!(!resolution.publish_output_dir);
}

#[test]
fn test_resolve_custom_template_without_values() {
    let mut desc = JobWriteDescriptor::new(year_month().external())
        .with_custom_dynamic_path("${year}/${month}");
    let resolution =
        resolve_output_location(&mut desc, &DynamicPartitionContext::dynamic("j")).unwrap();

    assert_eq!(resolution.relative_path, "[^/]*/[^/]*");
    assert_eq!(desc.location(), Some("/wh/t/_DYNTEMP_j/[^/]*/[^/]*"));
}

#[test]
fn test_resolve_escapes_partition_values() {
    let table = TableMetadata::new("t", "/wh/t").with_partition_column("ts", "string");
    let mut desc = JobWriteDescriptor::new(table).with_partition_value("ts", "2024-05-01 10:00");
    resolve_output_location(&mut desc, &DynamicPartitionContext::scratch("a1")).unwrap();
    assert_eq!(
        desc.location(),
        Some("/wh/t/_SCRATCH_a1/ts=2024-05-01 10%3A00")
    );
}

#[test]
fn test_resolve_replaces_stale_location() {
    let mut desc = JobWriteDescriptor::new(unpartitioned());
    resolve_output_location(&mut desc, &DynamicPartitionContext::scratch("a1")).unwrap();
    resolve_output_location(&mut desc, &DynamicPartitionContext::scratch("b2")).unwrap();
    assert_eq!(desc.location(), Some("/wh/t/_SCRATCH_b2"));
}

#[test]
fn test_resolve_without_markers_fails() {
    let mut desc = JobWriteDescriptor::new(unpartitioned());
    let err = resolve_output_location(&mut desc, &DynamicPartitionContext::default()).unwrap_err();
    assert!(matches!(err, Error::MissingState { .. }));
    assert!(desc.location().is_none());
}

#[test]
fn test_resolution_round_trip_is_stable() {
    let codec = Base64JsonCodec;
    let mut desc = JobWriteDescriptor::new(year_month())
        .with_partition_value("year", "2024")
        .with_partition_value("month", "05");
    resolve_output_location(&mut desc, &DynamicPartitionContext::scratch("a1")).unwrap();

    let decoded: JobWriteDescriptor = decode(&codec, &encode(&codec, &desc).unwrap()).unwrap();
    assert_eq!(decoded.location(), desc.location());
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_validation_rejects_unknown_partition_key() {
    let mut desc = JobWriteDescriptor::new(year_month()).with_partition_value("region", "eu");
    let err = resolve_output_location(&mut desc, &DynamicPartitionContext::scratch("a1")).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(err.to_string().contains("region"));
}

#[test]
fn test_validation_rejects_template_on_managed_table() {
    let desc = JobWriteDescriptor::new(year_month()).with_custom_dynamic_path("${year}");
    let err = validate_write_request(&desc, &dynamic("d")).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_validation_rejects_template_with_unknown_column() {
    let desc = JobWriteDescriptor::new(year_month().external())
        .with_custom_dynamic_path("${year}/${region}");
    let err = validate_write_request(&desc, &dynamic("d")).unwrap_err();
    assert!(err.to_string().contains("region"));
}

#[test_case("/shared/${year}/${month}" ; "absolute path")]
#[test_case("../../${year}" ; "parent segments")]
#[test_case("out/../../${year}" ; "nested parent segment")]
#[test_case("s3a://shared/${year}" ; "qualified uri")]
fn test_validation_rejects_template_escaping_working_directory(template: &str) {
    let mut desc = JobWriteDescriptor::new(year_month().external())
        .with_custom_dynamic_path(template);
    let err =
        resolve_output_location(&mut desc, &DynamicPartitionContext::dynamic("a")).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("working directory"));
    assert!(desc.location().is_none());
}

#[test]
fn test_validation_allows_dots_inside_segments() {
    let desc = JobWriteDescriptor::new(year_month().external())
        .with_custom_dynamic_path("v1..2/${year}");
    assert!(validate_write_request(&desc, &dynamic("d")).is_ok());
}

#[test]
fn test_validation_accepts_consistent_requests() {
    let desc = JobWriteDescriptor::new(year_month().external())
        .with_partition_value("year", "2024")
        .with_custom_dynamic_path("${year}/${month}")
        .with_location_override("/data/landing");
    assert!(validate_write_request(&desc, &dynamic("d")).is_ok());
    assert!(validate_write_request(&desc, &scratch("s")).is_ok());
}
