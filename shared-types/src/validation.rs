use crate::company::BrandConfig;
use crate::section::{PageSection, SectionKind};
use crate::slug::is_valid_slug;

/// A rejected field value. Raised before anything is sent to the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_slug(field: &str, slug: &str) -> Result<(), ValidationError> {
    if !is_valid_slug(slug) {
        return Err(ValidationError::new(
            field,
            "must contain only lowercase letters, numbers and hyphens, and cannot start or end with a hyphen",
        ));
    }
    Ok(())
}

/// First path segments the service routes itself; a company slug equal to one
/// of these would shadow its own careers page.
pub const RESERVED_COMPANY_SLUGS: &[&str] = &["api", "admin", "health"];

pub fn validate_company_slug(field: &str, slug: &str) -> Result<(), ValidationError> {
    validate_slug(field, slug)?;
    if RESERVED_COMPANY_SLUGS.contains(&slug) {
        return Err(ValidationError::new(field, format!("'{slug}' is reserved")));
    }
    Ok(())
}

/// An absolute `http`/`https` URL with a host part.
pub fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.starts_with('/') && !url.chars().any(char::is_whitespace),
        None => false,
    }
}

pub fn validate_http_url(field: &str, url: &str) -> Result<(), ValidationError> {
    if !is_http_url(url) {
        return Err(ValidationError::new(field, "must be an http or https URL"));
    }
    Ok(())
}

/// Accepts `#RGB` and `#RRGGBB`.
pub fn is_valid_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

pub fn validate_brand_config(config: &BrandConfig) -> Result<(), ValidationError> {
    if !is_valid_hex_color(&config.primary_color) {
        return Err(ValidationError::new(
            "primaryColor",
            format!("'{}' is not a hex color", config.primary_color),
        ));
    }
    if !is_valid_hex_color(&config.secondary_color) {
        return Err(ValidationError::new(
            "secondaryColor",
            format!("'{}' is not a hex color", config.secondary_color),
        ));
    }
    Ok(())
}

/// Checks a section list that is about to be written.
///
/// Unknown section types are accepted when reading stored data but never on write.
pub fn validate_sections(sections: &[PageSection]) -> Result<(), ValidationError> {
    let mut seen_ids = std::collections::HashSet::new();
    let mut jobs_sections = 0;

    for section in sections {
        if section.id.trim().is_empty() {
            return Err(ValidationError::new("pageSections", "section id is required"));
        }
        if !seen_ids.insert(section.id.as_str()) {
            return Err(ValidationError::new(
                "pageSections",
                format!("duplicate section id '{}'", section.id),
            ));
        }
        match section.kind {
            SectionKind::Unknown => {
                return Err(ValidationError::new(
                    "pageSections",
                    format!("section '{}' has an unsupported type", section.id),
                ));
            }
            SectionKind::Jobs => jobs_sections += 1,
            _ => {}
        }
    }

    if jobs_sections > 1 {
        return Err(ValidationError::new(
            "pageSections",
            "a page can only contain one Jobs section",
        ));
    }

    Ok(())
}
