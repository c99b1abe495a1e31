pub mod config;
pub mod dataset;
pub mod filter;
pub mod logging;
pub mod output;
pub mod scoring;
