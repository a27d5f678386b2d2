pub mod config;
pub mod error;
pub mod fetch;
pub mod harmonize;
pub mod pipeline;
pub mod process;
pub mod reference;
pub mod store;
pub mod summary;
