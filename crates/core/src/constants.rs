/// Default timeout for remote API requests, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
