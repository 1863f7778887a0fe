use std::fmt;
use url::form_urlencoded;

use crate::api::MetadataClient;

/// Page size the search endpoint uses when none is given; also its maximum.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Ordering offered by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMethod {
    #[default]
    Featured,
    Popularity,
    LastUpdated,
    Name,
    Author,
    TotalDownloads,
    Category,
    GameVersion,
}

impl SortMethod {
    /// The value sent as `sort=`.
    pub fn name(&self) -> &'static str {
        match self {
            SortMethod::Featured => "Featured",
            SortMethod::Popularity => "Popularity",
            SortMethod::LastUpdated => "LastUpdated",
            SortMethod::Name => "Name",
            SortMethod::Author => "Author",
            SortMethod::TotalDownloads => "TotalDownloads",
            SortMethod::Category => "Category",
            SortMethod::GameVersion => "GameVersion",
        }
    }
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single page request against the addon search endpoint.
///
/// ```no_run
/// use cursemeta::{AggregationClient, MetaSearch, SortMethod};
///
/// let client = AggregationClient::new()?;
/// let addons = MetaSearch::new(432)
///     .sort(SortMethod::Popularity)
///     .search_filter("roughly enough")
///     .game_version("1.14.4")
///     .search(&client);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaSearch {
    game_id: u32,
    section_id: Option<u32>,
    category_id: Option<u32>,
    sort: SortMethod,
    sort_descending: bool,
    game_version: Option<String>,
    index: u32,
    page_size: u32,
    search_filter: Option<String>,
}

impl MetaSearch {
    pub fn new(game_id: u32) -> Self {
        Self {
            game_id,
            section_id: None,
            category_id: None,
            sort: SortMethod::default(),
            sort_descending: false,
            game_version: None,
            index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            search_filter: None,
        }
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn section_id(mut self, section_id: u32) -> Self {
        self.section_id = Some(section_id);
        self
    }

    pub fn category_id(mut self, category_id: u32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn sort(mut self, sort: SortMethod) -> Self {
        self.sort = sort;
        self
    }

    pub fn sort_descending(mut self, sort_descending: bool) -> Self {
        self.sort_descending = sort_descending;
        self
    }

    pub fn game_version(mut self, game_version: impl Into<String>) -> Self {
        self.game_version = Some(game_version.into());
        self
    }

    /// Zero-based index of the first result to return.
    pub fn page_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn search_filter(mut self, search_filter: impl Into<String>) -> Self {
        self.search_filter = Some(search_filter.into());
        self
    }

    /// Query parameters in the order the endpoint expects them, unencoded.
    /// Options that were never set are left out entirely.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("gameId", self.game_id.to_string()),
            ("index", self.index.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("sort", self.sort.name().to_string()),
            ("isSortDescending", self.sort_descending.to_string()),
        ];

        if let Some(section_id) = self.section_id {
            pairs.push(("sectionId", section_id.to_string()));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(("categoryId", category_id.to_string()));
        }
        if let Some(game_version) = &self.game_version {
            pairs.push(("gameVersion", game_version.clone()));
        }
        if let Some(search_filter) = &self.search_filter {
            pairs.push(("searchFilter", search_filter.clone()));
        }

        pairs
    }

    /// The percent-encoded query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }

    /// Runs the search; an empty list means nothing matched or the request failed.
    pub fn search<C: MetadataClient + ?Sized>(&self, client: &C) -> Vec<C::Addon> {
        client.search(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(search: &MetaSearch) -> Vec<&'static str> {
        search.query_pairs().into_iter().map(|(key, _)| key).collect()
    }

    #[test]
    fn test_default_query() {
        let query = MetaSearch::new(432).query_string();
        assert_eq!(
            query,
            "gameId=432&index=0&pageSize=50&sort=Featured&isSortDescending=false"
        );
        for absent in ["sectionId", "categoryId", "gameVersion", "searchFilter"] {
            assert!(!query.contains(absent), "{} should be omitted", absent);
        }
    }

    #[test]
    fn test_all_options_in_fixed_order() {
        let search = MetaSearch::new(432)
            .search_filter("jei")
            .game_version("1.14.4")
            .category_id(423)
            .section_id(6)
            .sort(SortMethod::TotalDownloads)
            .sort_descending(true)
            .page_index(2)
            .page_size(25);

        assert_eq!(
            keys(&search),
            vec![
                "gameId",
                "index",
                "pageSize",
                "sort",
                "isSortDescending",
                "sectionId",
                "categoryId",
                "gameVersion",
                "searchFilter",
            ]
        );
        assert_eq!(
            search.query_string(),
            "gameId=432&index=2&pageSize=25&sort=TotalDownloads&isSortDescending=true\
             &sectionId=6&categoryId=423&gameVersion=1.14.4&searchFilter=jei"
        );
    }

    #[test]
    fn test_search_filter_is_encoded() {
        let query = MetaSearch::new(432)
            .search_filter("rei & jei")
            .query_string();

        assert!(query.ends_with("&searchFilter=rei+%26+jei"));
        let parsed: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(parsed.len(), 6);
        assert_eq!(
            parsed.last(),
            Some(&("searchFilter".to_string(), "rei & jei".to_string()))
        );
    }

    #[test]
    fn test_sort_method_names() {
        assert_eq!(SortMethod::default(), SortMethod::Featured);
        assert_eq!(SortMethod::LastUpdated.to_string(), "LastUpdated");
        assert_eq!(SortMethod::GameVersion.name(), "GameVersion");
    }
}
