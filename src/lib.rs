pub mod cli;
pub mod client;
pub mod config;
pub mod model;
pub mod page;
pub mod pipeline;
pub mod storage;
