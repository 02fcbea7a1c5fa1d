use crate::folder::{ContainerId, FolderId};
use chrono::{DateTime, Utc};
use clipdeck_core::Identified;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable clip identifier as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipType {
    #[default]
    Text,
    Image,
    Html,
    Rtf,
    File,
    Url,
}

impl ClipType {
    pub fn label(&self) -> &'static str {
        match self {
            ClipType::Text => "Text",
            ClipType::Image => "Image",
            ClipType::Html => "HTML",
            ClipType::Rtf => "Rich Text",
            ClipType::File => "File",
            ClipType::Url => "URL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipItem {
    pub id: ClipId,
    pub clip_type: ClipType,
    pub preview: String,
    pub folder_id: Option<FolderId>,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub source_app: Option<String>,
}

impl ClipItem {
    pub fn new(id: ClipId, clip_type: ClipType, preview: impl Into<String>) -> Self {
        Self {
            id,
            clip_type,
            preview: preview.into(),
            folder_id: None,
            is_pinned: false,
            created_at: Utc::now(),
            source_app: None,
        }
    }

    /// Whether the clip is listed in `container`. The all-items bucket lists
    /// everything and the pinned category lists pinned clips.
    pub fn belongs_to(&self, container: &ContainerId) -> bool {
        match container {
            None => true,
            Some(folder) if folder.is_pinned_category() => self.is_pinned,
            Some(folder) => self.folder_id.as_ref() == Some(folder),
        }
    }

    /// Header title: the source application, else the clip type.
    pub fn title(&self) -> String {
        match &self.source_app {
            Some(app) => app.clone(),
            None => self.clip_type.label().to_uppercase(),
        }
    }
}

impl Identified for ClipItem {
    type Id = ClipId;

    fn id(&self) -> &ClipId {
        &self.id
    }
}
