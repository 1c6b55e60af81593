//! HTML output for the public pages.

pub mod html;

pub use html::{escape_html, render_careers_page, render_job_detail, render_not_found};
