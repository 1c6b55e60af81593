//! Page Composer Crate
//!
//! Turns a company's stored page configuration into the careers page visitors
//! see. Nothing in here touches storage or the network; the API crate loads
//! entities and hands them to these functions.
//!
//! # Modules
//!
//! - `sections`: ordering and editing of a company's section list
//! - `compose`: builds a render model from visible sections and jobs
//! - `render`: HTML output for the careers page, job detail and not-found pages
//! - `video`: normalizes YouTube/Vimeo/uploaded video content to an embeddable URL
//! - `theme`: hero colors/backgrounds and font stacks derived from the brand
//! - `filter`: search and facet filtering over a job list
//! - `excerpt`: plain-text excerpts of rich-text descriptions
//! - `richtext`: description sanitizing and the editor's formatting commands
//!
//! # Example
//!
//! ```rust,ignore
//! use page_composer::{compose_page, render::render_careers_page, ComposeOptions, JobQuery};
//!
//! let page = compose_page(&company, &jobs, &JobQuery::default(), &ComposeOptions::default());
//! let html = render_careers_page(&page);
//! ```

pub mod compose;
pub mod excerpt;
pub mod filter;
pub mod render;
pub mod richtext;
pub mod sections;
pub mod theme;
pub mod video;

pub use compose::{compose_page, ComposeOptions, ComposedPage, JobBoard, JobCard, RenderedSection};
pub use excerpt::{excerpt, strip_tags, DEFAULT_EXCERPT_LENGTH};
pub use filter::{employment_type_options, filter_jobs, location_options, JobQuery, ALL};
pub use richtext::{clean_html, sanitize, FormatCommand, RichTextBuffer, RichTextError};
pub use sections::SectionError;
pub use video::{resolve_embed_url, resolve_video, VideoSource};
