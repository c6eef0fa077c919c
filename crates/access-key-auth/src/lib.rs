pub mod types;
pub mod utils;

mod auth;
mod code;

// re-exports
pub use auth::AccessKeyAuth;
pub use code::AccessCode;
pub use types::{AccessKeyError, Timestamp, CODE_LEN, DEFAULT_TIMING_OFFSET, WINDOW_STEP};
pub use utils::{current_timestamp, parse_timing_offset, seconds_left_in_window, window_for};
