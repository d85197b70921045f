// File: src/loader/core.rs
use crate::loader::error::{LoadError, LoadResultExt};
use crate::loader::middleware::{FreshFetchLayer, FreshFetchService};

use http::{Request, Uri};
use hyper::body::Body as _;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use std::future::poll_fn;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tower::ServiceExt;
use tower_layer::Layer;
use url::Url;

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;
type FetchClient = FreshFetchService<HttpsClient>;

/// Where the data documents live. Resource paths are resolved relative to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Remote(Url),
    Local(PathBuf),
}

impl DataSource {
    /// `http(s)://` locations are remote, `file://` URLs and plain paths are
    /// local directories. A remote base always acts as a directory, with or
    /// without its trailing slash.
    pub fn parse(location: &str) -> Result<Self, LoadError> {
        let location = location.trim();
        let invalid = |reason: String| LoadError::InvalidLocation {
            location: location.to_string(),
            reason,
        };

        if location.starts_with("http://") || location.starts_with("https://") {
            let mut url = Url::parse(location).map_err(|e| invalid(e.to_string()))?;
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            return Ok(DataSource::Remote(url));
        }

        if location.starts_with("file://") {
            let url = Url::parse(location).map_err(|e| invalid(e.to_string()))?;
            let path = url
                .to_file_path()
                .map_err(|_| invalid("not a local file path".to_string()))?;
            return Ok(DataSource::Local(path));
        }

        if location.is_empty() {
            return Ok(DataSource::Local(PathBuf::from(".")));
        }
        Ok(DataSource::Local(PathBuf::from(location)))
    }

    fn remote_url(base: &Url, path: &str) -> Result<Url, LoadError> {
        base.join(path).map_err(|e| LoadError::InvalidLocation {
            location: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn local_path(base: &Path, path: &str) -> PathBuf {
        base.join(path.trim_start_matches("./"))
    }
}

#[derive(Clone, Debug)]
pub struct Loader {
    source: DataSource,
    client: Option<FetchClient>,
}

impl Loader {
    pub fn new(source: &str, user_agent: &str) -> Result<Self, LoadError> {
        let source = DataSource::parse(source)?;
        let client = match &source {
            DataSource::Remote(_) => Some(FreshFetchLayer::new(user_agent).layer(build_client())),
            DataSource::Local(_) => None,
        };
        Ok(Self { source, client })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetches the raw bytes of `path`. One attempt, no retries, no cache.
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        match (&self.source, &self.client) {
            (DataSource::Remote(base), Some(client)) => {
                let url = DataSource::remote_url(base, path)?;
                log::debug!("GET {}", url);
                fetch_remote(client.clone(), &url, path).await
            }
            (DataSource::Remote(_), None) => Err(LoadError::Transport {
                path: path.to_string(),
                reason: "no HTTP client".to_string(),
            }),
            (DataSource::Local(base), _) => {
                let file = DataSource::local_path(base, path);
                log::debug!("Reading {}", file.display());
                tokio::fs::read(&file).await.map_err(|source| LoadError::Io {
                    path: file.display().to_string(),
                    source,
                })
            }
        }
    }

    /// Fetches and parses `path` as JSON.
    pub async fn load<T: DeserializeOwned>(&self, path: &str) -> Result<T, LoadError> {
        let bytes = self.fetch(path).await?;
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Fail-soft load: any failure yields `fallback`.
    pub async fn load_or<T: DeserializeOwned>(&self, path: &str, fallback: T) -> T {
        self.load(path).await.or_fallback(fallback)
    }

    /// Turns a path found inside a document (e.g. a report link) into a link a
    /// browser can open. Absolute URLs are returned untouched.
    pub fn resolve_link(&self, path: &str) -> String {
        if Url::parse(path).is_ok() {
            return path.to_string();
        }
        match &self.source {
            DataSource::Remote(base) => DataSource::remote_url(base, path)
                .map(String::from)
                .unwrap_or_else(|_| path.to_string()),
            DataSource::Local(base) => {
                let file = DataSource::local_path(base, path);
                std::path::absolute(&file)
                    .ok()
                    .and_then(|abs| Url::from_file_path(abs).ok())
                    .map(String::from)
                    .unwrap_or_else(|| file.display().to_string())
            }
        }
    }
}

fn build_client() -> HttpsClient {
    let mut root_store = rustls::RootCertStore::empty();
    let result = rustls_native_certs::load_native_certs();
    root_store.add_parsable_certificates(result.certs);
    if root_store.is_empty() {
        log::warn!("No system certificates found; https sources will fail to verify");
    }
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let https_connector = HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .build();

    Client::builder(TokioExecutor::new()).build(https_connector)
}

async fn fetch_remote(client: FetchClient, url: &Url, path: &str) -> Result<Vec<u8>, LoadError> {
    let transport = |reason: String| LoadError::Transport {
        path: path.to_string(),
        reason,
    };

    let uri: Uri = url.as_str().parse().map_err(|e: http::uri::InvalidUri| {
        LoadError::InvalidLocation {
            location: url.to_string(),
            reason: e.to_string(),
        }
    })?;
    let request = Request::get(uri)
        .body(String::new())
        .map_err(|e| transport(e.to_string()))?;

    let response = client
        .oneshot(request)
        .await
        .map_err(|e| transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            path: path.to_string(),
            status,
        });
    }

    let mut body = response.into_body();
    let mut bytes = Vec::new();
    while let Some(frame) = poll_fn(|cx| Pin::new(&mut body).poll_frame(cx)).await {
        let frame = frame.map_err(|e| transport(e.to_string()))?;
        if let Ok(data) = frame.into_data() {
            bytes.extend_from_slice(&data);
        }
    }
    Ok(bytes)
}
