pub mod banner;
pub mod tracing;
