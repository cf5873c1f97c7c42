//! Authentication: JWT middleware and rate limiting

pub mod jwt;
pub mod rate_limit;
