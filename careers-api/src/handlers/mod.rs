pub mod admin;
pub mod auth;
pub mod companies;
pub mod jobs;
pub mod public;

use page_composer::{ComposeOptions, DEFAULT_EXCERPT_LENGTH};

/// Rendering settings shared by the public page handlers.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub excerpt_length: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }
}

impl PageSettings {
    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            excerpt_length: self.excerpt_length,
            ..ComposeOptions::default()
        }
    }
}
