pub mod cache;
pub mod client;
pub mod error;
pub mod lead;
pub mod operations;
pub mod registration;
pub mod transport;
