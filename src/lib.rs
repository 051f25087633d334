pub mod config;
pub mod error;
pub mod fake_feed;
pub mod feed;
pub mod football_data;
pub mod http_client;
pub mod kv_store;
pub mod logging;
pub mod picks;
pub mod pools;
pub mod settlement;
pub mod state;
