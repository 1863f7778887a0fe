pub mod aggregation;
pub mod mirror;
pub mod schema;
pub mod search;
pub mod transport;

use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::path::Path;
use url::Url;

use crate::utils::errors::CurseMetaError;
use search::MetaSearch;
use transport::Transport;

/// Fields every addon shape agrees on.
pub trait AddonRecord {
    fn id(&self) -> u32;
    fn name(&self) -> &str;
    fn summary(&self) -> &str;
    fn category_ids(&self) -> Vec<u32>;
}

/// Fields every addon file shape agrees on.
pub trait AddonFileRecord {
    fn file_id(&self) -> u32;
    fn file_name(&self) -> &str;
    fn download_url(&self) -> Option<&str>;
    /// Opaque content hash; only meaningful for equality.
    fn package_fingerprint(&self) -> u64;
}

/// Read access to one of the addon metadata services.
///
/// Lookups never surface transport or decoding failures: a single lookup
/// comes back as `None` and a batch simply leaves the failed entries out. The
/// failure is logged. The only errors returned are caller mistakes, which are
/// reported before anything is sent.
pub trait MetadataClient {
    type Addon: AddonRecord + DeserializeOwned;
    type AddonFile: AddonFileRecord + DeserializeOwned;

    fn transport(&self) -> &dyn Transport;

    fn fetch_addon(&self, addon_id: u32) -> Option<Self::Addon>;

    fn fetch_addon_file(&self, addon_id: u32, file_id: u32) -> Option<Self::AddonFile>;

    fn fetch_addons(&self, addon_ids: &[u32]) -> Result<Vec<Self::Addon>>;

    /// Fetches the files named by the pairs `(addon_ids[i], file_ids[i])`.
    fn fetch_addon_files(&self, addon_ids: &[u32], file_ids: &[u32])
        -> Result<Vec<Self::AddonFile>>;

    /// Returns the addon's description as raw HTML.
    fn fetch_description(&self, addon_id: u32) -> Option<String>;

    fn search(&self, query: &MetaSearch) -> Vec<Self::Addon> {
        warn!(
            "Search for game {} is not offered by this endpoint",
            query.game_id()
        );
        Vec::new()
    }

    /// Downloads the file itself (not its metadata) to `path`.
    fn download_file(&self, file: &Self::AddonFile, path: &Path) -> Result<()> {
        let download_url = file
            .download_url()
            .ok_or_else(|| anyhow!(CurseMetaError::MissingDownloadUrl(file.file_id())))?;
        let url = Url::parse(download_url)
            .map_err(|_| anyhow!(CurseMetaError::InvalidUrl(download_url.to_string())))?;

        self.transport()
            .download_to_file(&url, path)
            .with_context(|| format!("Failed to download file {}", file.file_id()))
    }
}

pub(crate) fn ensure_same_length(addon_ids: &[u32], file_ids: &[u32]) -> Result<()> {
    if addon_ids.len() != file_ids.len() {
        return Err(anyhow!(CurseMetaError::MismatchedBatchLengths(
            addon_ids.len(),
            file_ids.len()
        )));
    }
    Ok(())
}

/// Appends `segments` to the path of `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!(CurseMetaError::InvalidUrl(base.to_string())))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn fetch_json<T: DeserializeOwned>(transport: &dyn Transport, url: &Url) -> Result<T> {
    let body = transport.get_bytes(url)?;
    serde_json::from_slice(&body)
        .map_err(CurseMetaError::from)
        .with_context(|| format!("Failed to parse response from {}", url))
}

/// Fetches a JSON array and decodes each element on its own, dropping the ones
/// that don't fit `T`.
pub(crate) fn fetch_json_array<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &Url,
) -> Result<Vec<T>> {
    let elements: Vec<Value> = fetch_json(transport, url)?;
    Ok(parse_each(elements))
}

pub(crate) fn parse_each<T: DeserializeOwned>(elements: Vec<Value>) -> Vec<T> {
    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!("Skipping malformed element at index {}: {}", index, err);
                None
            }
        })
        .collect()
}

/// Converts a failed lookup into `None`, logging why.
pub(crate) fn or_absent<T>(result: Result<T>, what: impl Display) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Failed to fetch {}: {:#}", what, err);
            None
        }
    }
}
