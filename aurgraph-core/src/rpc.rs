use crate::depend::DependencyKind;
use crate::{AurError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One package record as returned by the AUR RPC interface.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Package {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "PackageBase", default)]
    pub pkgbase: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Depends", default)]
    pub depends: Vec<String>,
    #[serde(rename = "MakeDepends", default)]
    pub makedepends: Vec<String>,
    #[serde(rename = "CheckDepends", default)]
    pub checkdepends: Vec<String>,
    #[serde(rename = "OptDepends", default)]
    pub optdepends: Vec<String>,
    #[serde(rename = "Provides", default)]
    pub provides: Vec<String>,
}

impl Package {
    pub fn dependencies(&self, kind: DependencyKind) -> &[String] {
        match kind {
            DependencyKind::Depend => &self.depends,
            DependencyKind::MakeDepend => &self.makedepends,
            DependencyKind::CheckDepend => &self.checkdepends,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    pub results: Vec<Package>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBy {
    Name,
    NameDesc,
    Provides,
}

impl SearchBy {
    fn as_str(self) -> &'static str {
        match self {
            SearchBy::Name => "name",
            SearchBy::NameDesc => "name-desc",
            SearchBy::Provides => "provides",
        }
    }
}

/// Client side of the remote metadata service. `info` is the batching
/// contract the resolver relies on: all names go out in a single request.
#[allow(async_fn_in_trait)]
pub trait AurClient {
    async fn info(&self, names: &[String]) -> Result<Vec<Package>>;
    async fn search(&self, term: &str, by: SearchBy) -> Result<Vec<Package>>;
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    baseurl: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(baseurl: &str) -> Self {
        HttpClient {
            baseurl: baseurl.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_rpc(&self, url: String) -> Result<Vec<Package>> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| AurError::Http {
                url: url.clone(),
                source,
            })?;

        let payload: RpcResponse = response
            .error_for_status()
            .map_err(|source| AurError::Http {
                url: url.clone(),
                source,
            })?
            .json()
            .await
            .map_err(|source| AurError::Http {
                url: url.clone(),
                source,
            })?;

        if let Some(reason) = payload.error {
            return Err(AurError::Rpc { reason });
        }

        Ok(payload.results)
    }
}

impl AurClient for HttpClient {
    async fn info(&self, names: &[String]) -> Result<Vec<Package>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut url = format!("{}/rpc/v5/info?", self.baseurl);
        for (idx, name) in names.iter().enumerate() {
            if idx > 0 {
                url.push('&');
            }
            let _ = write!(url, "arg[]={}", urlencoding::encode(name));
        }

        self.get_rpc(url).await
    }

    async fn search(&self, term: &str, by: SearchBy) -> Result<Vec<Package>> {
        let url = format!(
            "{}/rpc/v5/search/{}?by={}",
            self.baseurl,
            urlencoding::encode(term),
            by.as_str()
        );

        self.get_rpc(url).await
    }
}
