//! Core types for folders, files and users as the content API returns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

string_id!(
    /// FolderId: backend identifier of a folder
    FolderId
);
string_id!(
    /// FileId: backend identifier of a file or link record
    FileId
);
string_id!(
    /// TagId: backend identifier of a tag
    TagId
);
string_id!(
    /// GroupId: backend identifier of a visibility group
    GroupId
);
string_id!(UserId);

/// Kind of stored item. Links are records pointing at external URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Pdf,
    Word,
    Excel,
    Pptx,
    Image,
    VideoLink,
    GenericLink,
    Video,
    Audio,
    #[serde(other)]
    Other,
}

impl FileType {
    pub const ALL: [FileType; 10] = [
        FileType::Pdf,
        FileType::Word,
        FileType::Excel,
        FileType::Pptx,
        FileType::Image,
        FileType::VideoLink,
        FileType::GenericLink,
        FileType::Video,
        FileType::Audio,
        FileType::Other,
    ];

    /// Wire name used in query strings and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Word => "word",
            FileType::Excel => "excel",
            FileType::Pptx => "pptx",
            FileType::Image => "image",
            FileType::VideoLink => "video_link",
            FileType::GenericLink => "generic_link",
            FileType::Video => "video",
            FileType::Audio => "audio",
            FileType::Other => "other",
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, FileType::VideoLink | FileType::GenericLink)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown file type: {}", s))
    }
}

/// Group reference as embedded in folders, files and users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    #[serde(rename = "_id")]
    pub id: GroupId,
    #[serde(default)]
    pub name: String,
}

/// Tag reference as embedded in file records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    #[serde(rename = "_id")]
    pub id: TagId,
    #[serde(default)]
    pub name: String,
}

/// Folder metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMeta {
    #[serde(rename = "_id")]
    pub id: FolderId,
    pub name: String,
    #[serde(default)]
    pub parent_folder: Option<FolderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_group: Option<GroupRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// File or link metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    #[serde(rename = "_id")]
    pub id: FileId,
    pub filename: String,
    pub file_type: FileType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default)]
    pub folder: Option<FolderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_group: Option<GroupRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// Authenticated user as returned by `/users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub groups: Vec<GroupRef>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
