//! Ordering and editing of a company's section list.
//!
//! The editor works on a full copy of the list and persists it in a single
//! company update, so every function here mutates a `Vec<PageSection>` in place.
//! There is no version check: the last save wins.

use shared_types::{MoveDirection, PageSection, SectionKind, UpdateSectionRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    #[error("a page can only contain one Jobs section")]
    DuplicateJobsSection,
    #[error("section '{0}' not found")]
    NotFound(String),
    #[error("sections of unknown type cannot be added")]
    UnsupportedKind,
}

/// Visible sections in render order. Ties keep their list order.
pub fn visible_in_order(sections: &[PageSection]) -> Vec<&PageSection> {
    let mut visible: Vec<&PageSection> = sections.iter().filter(|s| s.is_visible).collect();
    visible.sort_by_key(|s| s.order);
    visible
}

pub fn sort_by_order(sections: &mut [PageSection]) {
    sections.sort_by_key(|s| s.order);
}

/// Sorts by `order` and rewrites it as 0..n-1.
pub fn normalize_order(sections: &mut [PageSection]) {
    sort_by_order(sections);
    for (index, section) in sections.iter_mut().enumerate() {
        section.order = index as i32;
    }
}

pub fn has_jobs_section(sections: &[PageSection]) -> bool {
    sections.iter().any(|s| s.kind == SectionKind::Jobs)
}

/// Appends a new section after the current last one.
pub fn add_section(
    sections: &mut Vec<PageSection>,
    kind: SectionKind,
    id: String,
) -> Result<&PageSection, SectionError> {
    match kind {
        SectionKind::Unknown => return Err(SectionError::UnsupportedKind),
        SectionKind::Jobs if has_jobs_section(sections) => {
            return Err(SectionError::DuplicateJobsSection)
        }
        _ => {}
    }

    let order = sections
        .iter()
        .map(|s| s.order)
        .max()
        .map(|max| max + 1)
        .unwrap_or(0);

    let (title, content) = match kind {
        SectionKind::Video => ("Our Culture", String::new()),
        _ => ("New Section", "Add your content here...".to_string()),
    };

    sections.push(PageSection {
        id,
        kind,
        title: Some(title.to_string()),
        content: Some(content),
        background_image_url: None,
        order,
        is_visible: true,
    });

    Ok(&sections[sections.len() - 1])
}

pub fn remove_section(
    sections: &mut Vec<PageSection>,
    id: &str,
) -> Result<PageSection, SectionError> {
    let index = position(sections, id)?;
    let removed = sections.remove(index);
    normalize_order(sections);
    Ok(removed)
}

/// Swaps a section with its neighbour in render order. Moving the first
/// section up or the last one down leaves the order as it was.
pub fn move_section(
    sections: &mut [PageSection],
    id: &str,
    direction: MoveDirection,
) -> Result<(), SectionError> {
    normalize_order(sections);
    let index = position(sections, id)?;

    match direction {
        MoveDirection::Up if index > 0 => sections.swap(index, index - 1),
        MoveDirection::Down if index + 1 < sections.len() => sections.swap(index, index + 1),
        _ => {}
    }

    for (index, section) in sections.iter_mut().enumerate() {
        section.order = index as i32;
    }
    Ok(())
}

pub fn update_section<'a>(
    sections: &'a mut [PageSection],
    id: &str,
    patch: UpdateSectionRequest,
) -> Result<&'a PageSection, SectionError> {
    let index = position(sections, id)?;
    let section = &mut sections[index];

    if let Some(title) = patch.title {
        section.title = Some(title);
    }
    if let Some(content) = patch.content {
        section.content = Some(content);
    }
    if let Some(url) = patch.background_image_url {
        section.background_image_url = if url.trim().is_empty() { None } else { Some(url) };
    }
    if let Some(visible) = patch.is_visible {
        section.is_visible = visible;
    }

    Ok(section)
}

fn position(sections: &[PageSection], id: &str) -> Result<usize, SectionError> {
    sections
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| SectionError::NotFound(id.to_string()))
}
