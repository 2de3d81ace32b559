pub mod client_file;
pub mod error;
pub mod event;
pub mod fetcher;
pub mod replay;
pub mod types;
