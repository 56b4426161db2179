pub mod buildorder;
pub mod cache;
pub mod config;
pub mod console;
pub mod depend;
pub mod error;
pub mod local;
pub mod operations;
pub mod resolve;
pub mod rpc;

pub use config::AurConfig;
pub use error::AurError;

pub type Result<T> = std::result::Result<T, AurError>;
