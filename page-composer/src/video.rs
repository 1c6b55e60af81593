use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
        .unwrap()
});

static VIMEO_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"vimeo\.com/(\d+)").unwrap());

/// Player URLs that are passed through as-is when no id could be extracted.
const EMBED_PREFIXES: &[&str] = &["https://www.youtube.com/embed/", "https://player.vimeo.com/"];

/// Playable form of a Video section's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "camelCase")]
pub enum VideoSource {
    /// A video uploaded through the editor, kept as a `data:video/...` URL
    Uploaded(String),
    /// A YouTube or Vimeo player URL for an iframe
    Embed(String),
}

impl VideoSource {
    pub fn url(&self) -> &str {
        match self {
            VideoSource::Uploaded(url) | VideoSource::Embed(url) => url,
        }
    }
}

/// Resolves section content to something playable, or `None` when the
/// content is empty or not a recognised video reference.
///
/// Surrounding whitespace from the editor field is ignored, so an uploaded
/// `data:video` payload comes back trimmed.
pub fn resolve_video(content: &str) -> Option<VideoSource> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }

    if content.starts_with("data:video") {
        return Some(VideoSource::Uploaded(content.to_string()));
    }

    if let Some(id) = YOUTUBE_ID.captures(content).and_then(|c| c.get(1)) {
        return Some(VideoSource::Embed(format!(
            "https://www.youtube.com/embed/{}",
            id.as_str()
        )));
    }

    if let Some(id) = VIMEO_ID.captures(content).and_then(|c| c.get(1)) {
        return Some(VideoSource::Embed(format!(
            "https://player.vimeo.com/video/{}",
            id.as_str()
        )));
    }

    if EMBED_PREFIXES.iter().any(|prefix| content.starts_with(prefix)) {
        return Some(VideoSource::Embed(content.to_string()));
    }

    None
}

/// The normalized URL for a video reference.
pub fn resolve_embed_url(content: &str) -> Option<String> {
    resolve_video(content).map(|source| source.url().to_string())
}
