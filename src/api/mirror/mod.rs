pub mod schema;

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use log::warn;
use serde_json::Value;
use url::Url;

use crate::api::transport::{HttpTransport, Transport};
use crate::api::{
    endpoint, ensure_same_length, fetch_json, fetch_json_array, or_absent, MetadataClient,
};
use crate::utils::errors::CurseMetaError;
use schema::{Addon, AddonFile};

const MIRROR_API_URL_PROD: &str = "https://cursemeta.dries007.net/";

/// The mirror refuses batch lookups larger than this.
pub const MAX_BATCH_IDS: usize = 50;

/// Client for the community-run CurseMeta mirror (`/api/v3/direct`).
pub struct MirrorClient<T = HttpTransport> {
    transport: T,
    base_url: Url,
}

impl MirrorClient<HttpTransport> {
    pub fn new() -> Result<Self> {
        Self::with_base_url(MIRROR_API_URL_PROD, HttpTransport::new()?)
    }
}

impl<T: Transport> MirrorClient<T> {
    /// Creates a client against another host, e.g. a mock server.
    pub fn with_base_url(base_url: &str, transport: T) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|_| anyhow!(CurseMetaError::InvalidUrl(base_url.to_string())))?;
        Ok(Self {
            transport,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn direct_url(&self, rest: &[&str]) -> Result<Url> {
        let mut segments = vec!["api", "v3", "direct", "addon"];
        segments.extend_from_slice(rest);
        endpoint(&self.base_url, &segments)
    }

    /// Fetches the files named by the pairs `(addon_ids[i], file_ids[i])` in
    /// one request, keyed by the identifier the mirror assigns to each pair.
    ///
    /// The keys are passed through exactly as the mirror sends them.
    pub fn fetch_addon_files_map(
        &self,
        addon_ids: &[u32],
        file_ids: &[u32],
    ) -> Result<IndexMap<String, AddonFile>> {
        ensure_same_length(addon_ids, file_ids)?;
        if addon_ids.is_empty() {
            return Ok(IndexMap::new());
        }

        let result = self.direct_url(&["files"]).and_then(|mut url| {
            {
                let mut query = url.query_pairs_mut();
                for (addon_id, file_id) in addon_ids.iter().zip(file_ids) {
                    query
                        .append_pair("addon", &addon_id.to_string())
                        .append_pair("file", &file_id.to_string());
                }
            }
            fetch_json::<IndexMap<String, Value>>(&self.transport, &url)
        });

        let entries = or_absent(
            result,
            format_args!("{} files from the mirror", addon_ids.len()),
        )
        .unwrap_or_default();

        Ok(entries
            .into_iter()
            .filter_map(|(key, value)| unwrap_single_file(&key, value).map(|file| (key, file)))
            .collect())
    }
}

/// The mirror wraps each file of a batch response in a one-element array.
fn unwrap_single_file(key: &str, value: Value) -> Option<AddonFile> {
    let element = match value {
        Value::Array(elements) => elements.into_iter().next(),
        _ => None,
    };
    let Some(element) = element else {
        warn!("Skipping entry '{}': expected a one-element array", key);
        return None;
    };

    match serde_json::from_value(element) {
        Ok(file) => Some(file),
        Err(err) => {
            warn!("Skipping malformed file for entry '{}': {}", key, err);
            None
        }
    }
}

impl<T: Transport> MetadataClient for MirrorClient<T> {
    type Addon = Addon;
    type AddonFile = AddonFile;

    fn transport(&self) -> &dyn Transport {
        &self.transport
    }

    fn fetch_addon(&self, addon_id: u32) -> Option<Addon> {
        let addon = self
            .fetch_addons(&[addon_id])
            .ok()?
            .into_iter()
            .find(|addon| addon.id == addon_id);
        if addon.is_none() {
            warn!("Mirror returned no addon {}", addon_id);
        }
        addon
    }

    fn fetch_addon_file(&self, addon_id: u32, file_id: u32) -> Option<AddonFile> {
        let addon = addon_id.to_string();
        let file = file_id.to_string();
        let result = self
            .direct_url(&[addon.as_str(), "file", file.as_str()])
            .and_then(|url| fetch_json::<AddonFile>(&self.transport, &url));
        or_absent(
            result,
            format_args!("file {} of addon {}", file_id, addon_id),
        )
    }

    /// Fetches up to [`MAX_BATCH_IDS`] addons in one request.
    fn fetch_addons(&self, addon_ids: &[u32]) -> Result<Vec<Addon>> {
        if addon_ids.len() > MAX_BATCH_IDS {
            return Err(anyhow!(CurseMetaError::TooManyIds(
                addon_ids.len(),
                MAX_BATCH_IDS
            )));
        }
        if addon_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = self.direct_url(&[]).and_then(|mut url| {
            {
                let mut query = url.query_pairs_mut();
                for addon_id in addon_ids {
                    query.append_pair("id", &addon_id.to_string());
                }
            }
            fetch_json_array::<Addon>(&self.transport, &url)
        });

        let addons = or_absent(result, format_args!("{} addons from the mirror", addon_ids.len()))
            .unwrap_or_default();
        Ok(addons
            .into_iter()
            .filter(|addon| {
                let requested = addon_ids.contains(&addon.id);
                if !requested {
                    warn!("Mirror returned addon {} which was not requested", addon.id);
                }
                requested
            })
            .collect())
    }

    fn fetch_addon_files(&self, addon_ids: &[u32], file_ids: &[u32]) -> Result<Vec<AddonFile>> {
        Ok(self
            .fetch_addon_files_map(addon_ids, file_ids)?
            .into_values()
            .collect())
    }

    fn fetch_description(&self, addon_id: u32) -> Option<String> {
        let addon = addon_id.to_string();
        let result = self
            .direct_url(&[addon.as_str(), "description"])
            .and_then(|url| self.transport.get_text(&url));
        or_absent(result, format_args!("description of addon {}", addon_id))
    }
}
