pub mod error_mask;
pub mod rate_limit;
pub mod security_headers;
