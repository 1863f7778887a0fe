//! Numeric code vocabularies shared by both service shapes.
//!
//! Codes outside the known lists are kept as `Unknown` so they encode back
//! to the same number.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "u32", into = "u32")]
pub enum ProjectStatus {
    #[default]
    New,
    ChangesRequired,
    UnderSoftReview,
    Approved,
    Rejected,
    ChangesMade,
    Inactive,
    Abandoned,
    Deleted,
    UnderReview,
    Unknown(u32),
}

impl From<u32> for ProjectStatus {
    fn from(val: u32) -> Self {
        match val {
            1 => ProjectStatus::New,
            2 => ProjectStatus::ChangesRequired,
            3 => ProjectStatus::UnderSoftReview,
            4 => ProjectStatus::Approved,
            5 => ProjectStatus::Rejected,
            6 => ProjectStatus::ChangesMade,
            7 => ProjectStatus::Inactive,
            8 => ProjectStatus::Abandoned,
            9 => ProjectStatus::Deleted,
            10 => ProjectStatus::UnderReview,
            other => ProjectStatus::Unknown(other),
        }
    }
}

impl From<ProjectStatus> for u32 {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::New => 1,
            ProjectStatus::ChangesRequired => 2,
            ProjectStatus::UnderSoftReview => 3,
            ProjectStatus::Approved => 4,
            ProjectStatus::Rejected => 5,
            ProjectStatus::ChangesMade => 6,
            ProjectStatus::Inactive => 7,
            ProjectStatus::Abandoned => 8,
            ProjectStatus::Deleted => 9,
            ProjectStatus::UnderReview => 10,
            ProjectStatus::Unknown(code) => code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "u32", into = "u32")]
pub enum FileReleaseType {
    #[default]
    Release,
    Beta,
    Alpha,
    Unknown(u32),
}

impl From<u32> for FileReleaseType {
    fn from(val: u32) -> Self {
        match val {
            1 => FileReleaseType::Release,
            2 => FileReleaseType::Beta,
            3 => FileReleaseType::Alpha,
            other => FileReleaseType::Unknown(other),
        }
    }
}

impl From<FileReleaseType> for u32 {
    fn from(release_type: FileReleaseType) -> Self {
        match release_type {
            FileReleaseType::Release => 1,
            FileReleaseType::Beta => 2,
            FileReleaseType::Alpha => 3,
            FileReleaseType::Unknown(code) => code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "u32", into = "u32")]
pub enum FileRelationType {
    EmbeddedLibrary,
    OptionalDependency,
    #[default]
    RequiredDependency,
    Tool,
    Incompatible,
    Include,
    Unknown(u32),
}

impl From<u32> for FileRelationType {
    fn from(val: u32) -> Self {
        match val {
            1 => FileRelationType::EmbeddedLibrary,
            2 => FileRelationType::OptionalDependency,
            3 => FileRelationType::RequiredDependency,
            4 => FileRelationType::Tool,
            5 => FileRelationType::Incompatible,
            6 => FileRelationType::Include,
            other => FileRelationType::Unknown(other),
        }
    }
}

impl From<FileRelationType> for u32 {
    fn from(relation_type: FileRelationType) -> Self {
        match relation_type {
            FileRelationType::EmbeddedLibrary => 1,
            FileRelationType::OptionalDependency => 2,
            FileRelationType::RequiredDependency => 3,
            FileRelationType::Tool => 4,
            FileRelationType::Incompatible => 5,
            FileRelationType::Include => 6,
            FileRelationType::Unknown(code) => code,
        }
    }
}
