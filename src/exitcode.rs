/// Standard Unix exit codes for the bmtree CLI.
///
/// These follow the BSD convention where possible.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error: invalid arguments, unknown ids, failed commands
pub const USAGE: i32 = 64;

/// Neither the configured source nor the built-in data could be loaded
pub const UNAVAILABLE: i32 = 69;

/// Operation was cancelled by user (typically Ctrl+C)
pub const CANCEL: i32 = 130;
