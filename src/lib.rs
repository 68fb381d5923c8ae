pub mod answers;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod output;
pub mod scoring;
pub mod server;
pub mod snapshot;
pub mod survey;
