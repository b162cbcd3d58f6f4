pub mod config;
pub mod logging;

pub mod batch;
pub mod download;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http;
pub mod naming;
pub mod profile;
pub mod share_link;
pub mod storage;

pub use error::Error;
