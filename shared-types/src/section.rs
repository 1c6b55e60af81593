use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Type tag of a page section.
///
/// Stored data may carry a type this build does not know; it deserializes to
/// `Unknown` and renders nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SectionKind {
    Hero,
    About,
    Video,
    Jobs,
    #[serde(other)]
    Unknown,
}

impl SectionKind {
    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::Hero => "Hero",
            SectionKind::About => "About",
            SectionKind::Video => "Video",
            SectionKind::Jobs => "Jobs",
            SectionKind::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageSection {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Text for Hero/About, a video URL or data URL for Video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image_url: Option<String>,
    /// Render position; dense 0..n-1 after any edit
    pub order: i32,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct AddSectionRequest {
    #[serde(rename = "type")]
    pub kind: SectionKind,
}

/// Partial section edit. An empty `backgroundImageUrl` clears the image.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateSectionRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub background_image_url: Option<String>,
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct MoveSectionRequest {
    pub direction: MoveDirection,
}
