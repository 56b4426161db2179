pub mod buildorder;
pub mod clone;
pub mod info;
pub mod outdated;
pub mod resolve;
pub mod search;

pub use buildorder::buildorder;
pub use clone::{CloneOptions, CloneOutcome, clone};
pub use info::{InfoResult, info};
pub use outdated::{OutdatedEntry, outdated};
pub use resolve::{ProviderGroup, resolve};
pub use search::search;
