use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};

use crate::api::schema::{FileRelationType, FileReleaseType, ProjectStatus};
use crate::api::{AddonFileRecord, AddonRecord};
use crate::utils::parse_timestamp;

/// Response from GET /api/v2/addon/{addonId}
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Addon {
    pub id: u32,
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub authors: Vec<AddonAuthor>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub attachments: Vec<AddonAttachment>,
    #[serde(rename = "websiteUrl", default)]
    pub website_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameId", default)]
    pub game_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub summary: String,
    /// The file the service currently offers as the latest release.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "defaultFileId", default)]
    pub default_file_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "downloadCount", default)]
    pub download_count: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "latestFiles", default)]
    pub latest_files: Vec<LatestFile>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub categories: Vec<AddonCategory>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "primaryCategoryId", default)]
    pub primary_category_id: u32,
    #[serde(rename = "categorySection", default)]
    pub category_section: Option<AddonCategorySection>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub slug: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameVersionLatestFiles", default)]
    pub game_version_latest_files: Vec<GameVersionLatestFile>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "popularityScore", default)]
    pub popularity_score: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gamePopularityRank", default)]
    pub game_popularity_rank: u32,
    #[serde(rename = "primaryLanguage", default)]
    pub primary_language: Option<String>,
    #[serde(rename = "gameSlug", default)]
    pub game_slug: Option<String>,
    #[serde(rename = "gameName", default)]
    pub game_name: Option<String>,
    #[serde(rename = "portalName", default)]
    pub portal_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "dateModified", default)]
    pub date_modified: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "dateCreated", default)]
    pub date_created: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "dateReleased", default)]
    pub date_released: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isAvailable", default)]
    pub is_available: bool,
    // The service spells this key wrong.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isExperiemental", default)]
    pub is_experimental: bool,
}

impl Addon {
    pub fn date_created(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.date_created)
    }

    pub fn date_modified(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.date_modified)
    }

    pub fn date_released(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.date_released)
    }
}

impl AddonRecord for Addon {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> &str {
        &self.summary
    }

    fn category_ids(&self) -> Vec<u32> {
        self.categories.iter().map(|c| c.category_id).collect()
    }
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddonAttachment {
    pub id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "projectId", default)]
    pub project_id: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub status: u32,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddonAuthor {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "projectId", default)]
    pub project_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "userId", default)]
    pub user_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "twitchId", default)]
    pub twitch_id: u32,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddonCategory {
    #[serde(rename = "categoryId")]
    pub category_id: u32,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "parentId", default)]
    pub parent_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "rootId", default)]
    pub root_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "projectId", default)]
    pub project_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "avatarId", default)]
    pub avatar_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameId", default)]
    pub game_id: u32,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddonCategorySection {
    pub id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameId", default)]
    pub game_id: u32,
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "packageType", default)]
    pub package_type: u32,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "initialInclusionPattern", default)]
    pub initial_inclusion_pattern: Option<String>,
    #[serde(rename = "extraIncludePattern", default)]
    pub extra_include_pattern: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameCategoryId", default)]
    pub game_category_id: u32,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GameVersionLatestFile {
    #[serde(rename = "gameVersion")]
    pub game_version: String,
    #[serde(rename = "projectFileId")]
    pub project_file_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "projectFileName", default)]
    pub project_file_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileType", default)]
    pub file_type: FileReleaseType,
}

/// A file summary embedded in [`Addon::latest_files`].
///
/// This is a richer shape than [`AddonFile`]; the service includes indexing
/// details here that the file endpoints leave out.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LatestFile {
    pub id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileName", default)]
    pub file_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileDate", default)]
    pub file_date: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileLength", default)]
    pub file_length: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "releaseType", default)]
    pub release_type: FileReleaseType,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileStatus", default)]
    pub file_status: u32,
    #[serde(rename = "downloadUrl", default)]
    pub download_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isAlternate", default)]
    pub is_alternate: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "alternateFileId", default)]
    pub alternate_file_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub dependencies: Vec<LatestFileDependency>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isAvailable", default)]
    pub is_available: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub modules: Vec<LatestFileModule>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "packageFingerprint", default)]
    pub package_fingerprint: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameVersion", default)]
    pub game_version: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "sortableGameVersion", default)]
    pub sortable_game_version: Vec<SortableGameVersion>,
    #[serde(rename = "installMetadata", default)]
    pub install_metadata: Value,
    #[serde(default)]
    pub changelog: Value,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "hasInstallScript", default)]
    pub has_install_script: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isCompatibleWithClient", default)]
    pub is_compatible_with_client: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "categorySectionPackageType", default)]
    pub category_section_package_type: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "restrictProjectFileAccess", default)]
    pub restrict_project_file_access: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "projectStatus", default)]
    pub project_status: ProjectStatus,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "renderCacheId", default)]
    pub render_cache_id: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "projectId", default)]
    pub project_id: u32,
    #[serde(rename = "parentProjectFileId", default)]
    pub parent_project_file_id: Option<u32>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "packageFingerprintId", default)]
    pub package_fingerprint_id: u64,
    #[serde(rename = "gameVersionDateReleased", default)]
    pub game_version_date_released: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameVersionMappingId", default)]
    pub game_version_mapping_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameVersionId", default)]
    pub game_version_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameId", default)]
    pub game_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isServerPack", default)]
    pub is_server_pack: bool,
    #[serde(rename = "serverPackFileId", default)]
    pub server_pack_file_id: Option<u32>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LatestFileDependency {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: u32,
    #[serde(rename = "addonId")]
    pub addon_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "type", default)]
    pub relation_type: FileRelationType,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileId", default)]
    pub file_id: u32,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LatestFileModule {
    #[serde(rename = "foldername")]
    pub folder_name: String,
    pub fingerprint: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "type", default)]
    pub module_type: u32,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SortableGameVersion {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameVersionPadded", default)]
    pub game_version_padded: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameVersion", default)]
    pub game_version: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameVersionReleaseDate", default)]
    pub game_version_release_date: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameVersionName", default)]
    pub game_version_name: String,
}

/// Response from GET /api/v2/addon/{addonId}/file/{fileId}
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddonFile {
    #[serde(rename = "id")]
    pub file_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileName", default)]
    pub file_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileDate", default)]
    pub file_date: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileLength", default)]
    pub file_length: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "releaseType", default)]
    pub release_type: FileReleaseType,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileStatus", default)]
    pub file_status: u32,
    #[serde(rename = "downloadUrl", default)]
    pub download_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isAlternate", default)]
    pub is_alternate: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "alternateFileId", default)]
    pub alternate_file_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub dependencies: Vec<FileDependency>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isAvailable", default)]
    pub is_available: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub modules: Vec<FileModule>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "packageFingerprint", default)]
    pub package_fingerprint: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameVersion", default)]
    pub game_version: Vec<String>,
    #[serde(rename = "installMetadata", default)]
    pub install_metadata: Value,
    #[serde(rename = "serverPackFileId", default)]
    pub server_pack_file_id: Option<u32>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "hasInstallScript", default)]
    pub has_install_script: bool,
}

impl AddonFile {
    pub fn file_date(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.file_date)
    }
}

impl AddonFileRecord for AddonFile {
    fn file_id(&self) -> u32 {
        self.file_id
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    fn package_fingerprint(&self) -> u64 {
        self.package_fingerprint
    }
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FileDependency {
    #[serde(rename = "addonId")]
    pub addon_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "type", default)]
    pub relation_type: FileRelationType,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FileModule {
    #[serde(rename = "folderName")]
    pub folder_name: String,
    pub fingerprint: u64,
}
