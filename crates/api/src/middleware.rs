//! Request extractors for gateway-provided identity and content context.

pub mod context;
