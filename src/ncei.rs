#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::Year;
use crate::error::MirrorError;
use crate::listing::{FileFetcher, RemoteIndex, data_files_in, subdir_url, year_subdirs_in};

/// Prefix of the hidden file a download is streamed into before it is
/// moved over the destination.
pub const DOWNLOAD_PREFIX: &str = ".gpcp-download";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Blocking client for the NCEI GPCP access pages.
#[derive(Clone)]
pub struct NceiHttpClient {
    client: Client,
    base_url: Url,
}

impl NceiHttpClient {
    pub fn new(base_url: Url) -> Result<Self, MirrorError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("gpcp-mirror/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| MirrorError::NceiHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| MirrorError::NceiHttp(err.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn get(&self, url: &Url) -> Result<reqwest::blocking::Response, MirrorError> {
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|err| MirrorError::NceiHttp(err.to_string()))?;
        Self::handle_status(response)
    }

    fn get_text(&self, url: &Url) -> Result<String, MirrorError> {
        self.get(url)?
            .text()
            .map_err(|err| MirrorError::NceiHttp(err.to_string()))
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, MirrorError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let reason = response.status().canonical_reason().unwrap_or("request failed");
        let message = format!("{reason} ({})", response.url());
        Err(MirrorError::NceiStatus { status, message })
    }
}

impl RemoteIndex for NceiHttpClient {
    fn year_subdirs(&self, year: &Year) -> Result<Vec<String>, MirrorError> {
        let html = self.get_text(&self.base_url)?;
        Ok(year_subdirs_in(&html, year))
    }

    fn data_files(&self, subdir: &str) -> Result<Vec<String>, MirrorError> {
        let url = subdir_url(&self.base_url, subdir)?;
        let html = self.get_text(&url)?;
        Ok(data_files_in(&html))
    }
}

impl FileFetcher for NceiHttpClient {
    fn download(&self, url: &Url, destination: &Path) -> Result<(), MirrorError> {
        let mut response = self.get(url)?;
        let parent = destination.parent().ok_or_else(|| {
            MirrorError::Filesystem(format!("invalid destination {}", destination.display()))
        })?;
        let mut builder = tempfile::Builder::new();
        builder.prefix(DOWNLOAD_PREFIX);
        // mode is masked by the umask, same as a plain create
        #[cfg(unix)]
        builder.permissions(std::fs::Permissions::from_mode(0o666));
        let mut temp = builder
            .tempfile_in(parent)
            .map_err(|err| MirrorError::Filesystem(err.to_string()))?;
        std::io::copy(&mut response, temp.as_file_mut())
            .map_err(|err| MirrorError::NceiHttp(format!("{url}: {err}")))?;
        temp.persist(destination)
            .map_err(|err| MirrorError::Filesystem(err.to_string()))?;
        Ok(())
    }
}
