use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::api::schema::{FileRelationType, FileReleaseType, ProjectStatus};
use crate::api::{AddonFileRecord, AddonRecord};
use crate::utils::parse_timestamp;

/// An element of GET /api/v3/direct/addon?id=...
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Addon {
    pub id: u32,
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub authors: Vec<AddonAuthor>,
    #[serde(rename = "websiteUrl", default)]
    pub website_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gameId", default)]
    pub game_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub summary: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "defaultFileId", default)]
    pub default_file_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "downloadCount", default)]
    pub download_count: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "latestFiles", default)]
    pub latest_files: Vec<AddonFile>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub categories: Vec<AddonCategory>,
    #[serde(rename = "primaryAuthorName", default)]
    pub primary_author_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub stage: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "primaryCategoryId", default)]
    pub primary_category_id: u32,
    #[serde(rename = "categorySection", default)]
    pub category_section: Option<AddonCategorySection>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub slug: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "popularityScore", default)]
    pub popularity_score: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "gamePopularityRank", default)]
    pub game_popularity_rank: u32,
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

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddonAuthor {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddonCategory {
    #[serde(rename = "categoryId")]
    pub category_id: u32,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
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
}

/// Response from GET /api/v3/direct/addon/{addonId}/file/{fileId}
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddonFile {
    #[serde(rename = "id")]
    pub file_id: u32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileName", default)]
    pub file_name: String,
    /// Name the file is saved under; can differ from `file_name`.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "fileNameOnDisk", default)]
    pub file_name_on_disk: String,
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
    #[serde(rename = "foldername")]
    pub folder_name: String,
    pub fingerprint: u64,
}
