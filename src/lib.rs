pub mod codec;
pub mod config;
pub mod scan;
pub mod sync;
pub mod utils;

// Re-export commonly used types
pub use codec::{Codec, CodecError, CodecKind};
pub use config::{read_config, ConfigError, OggifyConfig};
pub use scan::{scan_dest, scan_source, DestScan, ScanError, SourceScan};
pub use sync::{
    build_sync_plan, execute_sync, ExecuteError, ExecuteOptions, PlanError, SyncPlan, SyncReport,
};
