use std::env;
use std::path::PathBuf;

pub const DEFAULT_AUR_BASEURL: &str = "https://aur.archlinux.org";

#[derive(Debug, Clone)]
pub struct AurConfig {
    /// Base URL of the AUR instance to query.
    pub baseurl: String,
    /// Optional path to a local database snapshot. Without one, every
    /// dependency resolves against the AUR alone.
    pub database: Option<PathBuf>,
}

impl AurConfig {
    pub fn from_env() -> Self {
        let baseurl = env::var("AURGRAPH_BASEURL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_AUR_BASEURL.to_string());
        let database = env::var_os("AURGRAPH_DATABASE").map(PathBuf::from);

        AurConfig { baseurl, database }
    }
}
