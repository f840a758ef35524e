pub mod builder;
pub mod collector;
