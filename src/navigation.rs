//! Navigation keys
//!
//! A `NavigationKey` names what should currently be displayed: a folder (or the
//! synthetic root) plus the search, filter and sort settings applied to its files.
//! Keys are plain immutable values; a new key is built for every navigation or
//! filter edit and compared by value.

use crate::types::{FileType, FolderId, TagId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Location in the folder hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FolderRef {
    #[default]
    Root,
    Folder(FolderId),
}

impl FolderRef {
    pub fn is_root(&self) -> bool {
        matches!(self, FolderRef::Root)
    }

    pub fn folder_id(&self) -> Option<&FolderId> {
        match self {
            FolderRef::Root => None,
            FolderRef::Folder(id) => Some(id),
        }
    }
}

impl From<Option<FolderId>> for FolderRef {
    fn from(id: Option<FolderId>) -> Self {
        id.map(FolderRef::Folder).unwrap_or_default()
    }
}

impl fmt::Display for FolderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderRef::Root => f.write_str("<root>"),
            FolderRef::Folder(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "filename")]
    Name,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::CreatedAt => "createdAt",
            SortBy::Name => "filename",
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortBy::CreatedAt),
            "filename" | "name" => Ok(SortBy::Name),
            other => Err(format!("Unknown sort field: {} (expected 'createdAt' or 'filename')", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order: {} (expected 'asc' or 'desc')", other)),
        }
    }
}

/// Search, filter and sort settings for the file listing
///
/// The default is no search, no type filter, no tags, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    pub search_term: String,
    pub file_type: Option<FileType>,
    pub tag_ids: BTreeSet<TagId>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl FilterSpec {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_file_type(mut self, file_type: Option<FileType>) -> Self {
        self.file_type = file_type;
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TagId>,
    {
        self.tag_ids = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn sorted(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Build the query for listing files of `folder_id`
    pub fn to_query(&self, folder_id: &FolderId) -> FileListQuery {
        let search = self.search_term.trim();
        FileListQuery {
            folder_id: folder_id.to_string(),
            search: (!search.is_empty()).then(|| self.search_term.clone()),
            file_type: self.file_type.map(|t| t.as_str().to_string()),
            tags: (!self.tag_ids.is_empty()).then(|| {
                self.tag_ids
                    .iter()
                    .map(TagId::as_str)
                    .collect::<Vec<_>>()
                    .join(",")
            }),
            sort_by: self.sort_by.as_str().to_string(),
            sort_order: self.sort_order.as_str().to_string(),
        }
    }
}

/// Query parameters for `GET /files`
///
/// Blank filters are left out entirely: the backend reads an empty `search` or
/// `tags` value as a filter that matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListQuery {
    pub folder_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub sort_by: String,
    pub sort_order: String,
}

/// What the loader should display: a folder plus its file filters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NavigationKey {
    pub folder: FolderRef,
    pub filters: FilterSpec,
}

impl NavigationKey {
    pub fn new(folder: FolderRef, filters: FilterSpec) -> Self {
        Self { folder, filters }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn folder(id: impl Into<FolderId>) -> Self {
        Self::new(FolderRef::Folder(id.into()), FilterSpec::default())
    }

    /// Same folder, different filters
    pub fn with_filters(&self, filters: FilterSpec) -> Self {
        Self::new(self.folder.clone(), filters)
    }

    /// Whether moving from `self` to `next` changes which folder is shown
    pub fn changes_folder(&self, next: &NavigationKey) -> bool {
        self.folder != next.folder
    }
}
