pub mod config;
pub mod delay;
pub mod error;
pub mod event;
pub mod report;
pub mod service;
pub mod slot;
pub mod state;
pub mod tokio;
pub mod validator;
