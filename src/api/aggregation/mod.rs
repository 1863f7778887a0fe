pub mod schema;

use anyhow::{anyhow, Context, Result};
use url::Url;

use crate::api::search::MetaSearch;
use crate::api::transport::{HttpTransport, Transport};
use crate::api::{
    endpoint, ensure_same_length, fetch_json, fetch_json_array, or_absent, MetadataClient,
};
use crate::utils::errors::CurseMetaError;
use schema::{Addon, AddonFile};

const AGGREGATION_API_URL_PROD: &str = "https://addons-ecs.forgesvc.net";

/// Client for the first-party addon aggregation service (`/api/v2`).
pub struct AggregationClient<T = HttpTransport> {
    transport: T,
    base_url: Url,
}

impl AggregationClient<HttpTransport> {
    pub fn new() -> Result<Self> {
        Self::with_base_url(AGGREGATION_API_URL_PROD, HttpTransport::new()?)
    }
}

impl<T: Transport> AggregationClient<T> {
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

    fn addon_url(&self, addon_id: u32, rest: &[&str]) -> Result<Url> {
        let addon_id = addon_id.to_string();
        let mut segments = vec!["api", "v2", "addon", addon_id.as_str()];
        segments.extend_from_slice(rest);
        endpoint(&self.base_url, &segments)
    }

    /// Returns the changelog of one file as raw HTML.
    pub fn fetch_addon_file_changelog(&self, addon_id: u32, file_id: u32) -> Option<String> {
        let file = file_id.to_string();
        let result = self
            .addon_url(addon_id, &["file", file.as_str(), "changelog"])
            .and_then(|url| self.transport.get_text(&url));
        or_absent(
            result,
            format_args!("changelog of file {} of addon {}", file_id, addon_id),
        )
    }

    /// Lists every file of an addon. Files the service describes in a shape we
    /// can't read are left out.
    pub fn fetch_all_addon_files(&self, addon_id: u32) -> Vec<AddonFile> {
        let result = self
            .addon_url(addon_id, &["files"])
            .and_then(|url| fetch_json_array::<AddonFile>(&self.transport, &url));
        or_absent(result, format_args!("files of addon {}", addon_id)).unwrap_or_default()
    }

    fn search_url(&self, query: &MetaSearch) -> Result<Url> {
        let mut url = endpoint(&self.base_url, &["api", "v2", "addon", "search"])?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        Ok(url)
    }
}

impl<T: Transport> MetadataClient for AggregationClient<T> {
    type Addon = Addon;
    type AddonFile = AddonFile;

    fn transport(&self) -> &dyn Transport {
        &self.transport
    }

    fn fetch_addon(&self, addon_id: u32) -> Option<Addon> {
        let result = self
            .addon_url(addon_id, &[])
            .and_then(|url| fetch_json::<Addon>(&self.transport, &url));
        or_absent(result, format_args!("addon {}", addon_id))
    }

    fn fetch_addon_file(&self, addon_id: u32, file_id: u32) -> Option<AddonFile> {
        let file = file_id.to_string();
        let result = self
            .addon_url(addon_id, &["file", file.as_str()])
            .and_then(|url| fetch_json::<AddonFile>(&self.transport, &url));
        or_absent(
            result,
            format_args!("file {} of addon {}", file_id, addon_id),
        )
    }

    /// One request per id; this service has no batch lookup.
    fn fetch_addons(&self, addon_ids: &[u32]) -> Result<Vec<Addon>> {
        Ok(addon_ids
            .iter()
            .filter_map(|&addon_id| self.fetch_addon(addon_id))
            .collect())
    }

    /// One request per pair; this service has no batch lookup.
    fn fetch_addon_files(&self, addon_ids: &[u32], file_ids: &[u32]) -> Result<Vec<AddonFile>> {
        ensure_same_length(addon_ids, file_ids)?;

        Ok(addon_ids
            .iter()
            .zip(file_ids)
            .filter_map(|(&addon_id, &file_id)| self.fetch_addon_file(addon_id, file_id))
            .collect())
    }

    fn fetch_description(&self, addon_id: u32) -> Option<String> {
        let result = self
            .addon_url(addon_id, &["description"])
            .and_then(|url| self.transport.get_text(&url));
        or_absent(result, format_args!("description of addon {}", addon_id))
    }

    fn search(&self, query: &MetaSearch) -> Vec<Addon> {
        let result = self
            .search_url(query)
            .and_then(|url| fetch_json_array::<Addon>(&self.transport, &url))
            .with_context(|| format!("Search failed for '{}'", query.query_string()));
        or_absent(result, format_args!("search results for game {}", query.game_id()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::search::SortMethod;
    use crate::api::transport::MockTransport;
    use crate::api::AddonRecord;

    const BASE: &str = "https://aggregation.test";

    fn client(transport: MockTransport) -> AggregationClient<MockTransport> {
        AggregationClient::with_base_url(BASE, transport).unwrap()
    }

    #[test]
    fn test_fetch_addon() {
        let client = client(
            MockTransport::new()
                .with_response("/api/v2/addon/310111", r#"{"id":310111,"name":"REI"}"#),
        );

        let addon = client.fetch_addon(310111).unwrap();
        assert_eq!(addon.id(), 310111);
        assert_eq!(addon.name, "REI");
        assert_eq!(
            client.transport.requests()[0].as_str(),
            "https://aggregation.test/api/v2/addon/310111"
        );
    }

    #[test]
    fn test_fetch_addon_absent_on_failure() {
        let client = client(
            MockTransport::new().with_response("/api/v2/addon/2", r#"{"id":"two"}"#),
        );

        assert!(client.fetch_addon(1).is_none());
        assert!(client.fetch_addon(2).is_none());
    }

    #[test]
    fn test_fetch_addons_drops_failures() {
        let client = client(
            MockTransport::new()
                .with_response("/api/v2/addon/1", r#"{"id":1,"name":"A"}"#)
                .with_response("/api/v2/addon/3", r#"{"id":3,"name":"C"}"#),
        );

        let addons = client.fetch_addons(&[1, 2, 3]).unwrap();
        assert_eq!(addons.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(client.transport.request_count(), 3);
    }

    #[test]
    fn test_fetch_addon_file_and_changelog() {
        let client = client(
            MockTransport::new()
                .with_response(
                    "/api/v2/addon/32274/file/2709306",
                    r#"{"id":2709306,"fileName":"jei.jar","packageFingerprint":12}"#,
                )
                .with_response(
                    "/api/v2/addon/32274/file/2709306/changelog",
                    "<p>Fixed things</p>",
                ),
        );

        let file = client.fetch_addon_file(32274, 2709306).unwrap();
        assert_eq!(file.file_id, 2709306);
        assert_eq!(file.file_name, "jei.jar");
        assert_eq!(
            client.fetch_addon_file_changelog(32274, 2709306).as_deref(),
            Some("<p>Fixed things</p>")
        );
        assert!(client.fetch_addon_file_changelog(32274, 1).is_none());
    }

    #[test]
    fn test_fetch_addon_files_checks_lengths_first() {
        let client = client(MockTransport::new());

        let err = client.fetch_addon_files(&[1, 2], &[3]).unwrap_err();
        assert!(err
            .downcast_ref::<CurseMetaError>()
            .is_some_and(CurseMetaError::is_invalid_argument));
        assert_eq!(client.transport.request_count(), 0);
    }

    #[test]
    fn test_fetch_addon_files_pairs_ids() {
        let client = client(
            MockTransport::new()
                .with_response("/api/v2/addon/1/file/10", r#"{"id":10}"#)
                .with_response("/api/v2/addon/2/file/20", r#"{"id":20}"#),
        );

        let files = client.fetch_addon_files(&[1, 2], &[10, 20]).unwrap();
        assert_eq!(
            files.iter().map(|f| f.file_id).collect::<Vec<_>>(),
            vec![10, 20]
        );
    }

    #[test]
    fn test_fetch_all_addon_files_skips_bad_elements() {
        let client = client(MockTransport::new().with_response(
            "/api/v2/addon/5/files",
            r#"[{"id":1},{"id":"x"},7,{"id":3}]"#,
        ));

        let files = client.fetch_all_addon_files(5);
        assert_eq!(files.iter().map(|f| f.file_id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(client.fetch_all_addon_files(6).is_empty());
    }

    #[test]
    fn test_fetch_description_is_raw_html() {
        let client = client(
            MockTransport::new().with_response("/api/v2/addon/7/description", "<h1>Hi</h1>"),
        );

        assert_eq!(client.fetch_description(7).as_deref(), Some("<h1>Hi</h1>"));
        assert!(client.fetch_description(8).is_none());
    }

    #[test]
    fn test_search_sends_query_and_parses_results() {
        let client = client(MockTransport::new().with_response(
            "/api/v2/addon/search",
            r#"[{"id":1,"name":"A"},{"bad":true},{"id":2,"name":"B"}]"#,
        ));

        let addons = MetaSearch::new(432)
            .sort(SortMethod::Popularity)
            .search_filter("a b")
            .search(&client);
        assert_eq!(addons.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);

        let request = &client.transport.requests()[0];
        assert_eq!(
            request.query(),
            Some("gameId=432&index=0&pageSize=50&sort=Popularity&isSortDescending=false&searchFilter=a+b")
        );
    }

    #[test]
    fn test_search_empty_on_failure() {
        let client = client(MockTransport::new());
        assert!(MetaSearch::new(432).search(&client).is_empty());
    }
}
