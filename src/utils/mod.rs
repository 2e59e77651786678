mod path;

pub use path::{relative_str, swap_extension};

/// Default encoding quality (oggenc scale, 0-10)
pub const DEFAULT_QUALITY: u8 = 5;

/// Default niceness for codec processes
pub const DEFAULT_NICE: i32 = 10;

/// Name of the optional config file, looked up in the working directory
pub const CONFIG_FILE: &str = "oggify.json";
