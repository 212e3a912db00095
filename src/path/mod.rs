//! Storage path module
//!
//! Pure string composition of storage locations. Nothing here touches a
//! filesystem.
//!
//! # Overview
//!
//! - `StoragePath` - Location with optional scheme and authority, joined the
//!   way Hadoop paths are
//! - `make_part_name` / `partition_path` - `col=value/...` partition
//!   directory names with path escaping

mod partition;
mod storage_path;

pub use partition::{escape_path_name, make_part_name, partition_path};
pub use storage_path::StoragePath;
