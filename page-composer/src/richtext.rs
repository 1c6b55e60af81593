//! Job description rich text: cleanup, sanitizing and the editor's
//! formatting commands.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Tags that survive [`sanitize`]. Attributes are always dropped.
pub const ALLOWED_TAGS: &[&str] = &["p", "br", "strong", "b", "em", "i", "h3", "ul", "ol", "li"];

static TRACKING_ATTRIBUTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s*data-(?:start|end)="[^"]*""#).unwrap());
static SCRIPT_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());
static STYLE_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").unwrap());

/// Removes the `data-start`/`data-end` offsets pasted-in content carries.
pub fn clean_html(html: &str) -> String {
    TRACKING_ATTRIBUTES.replace_all(html, "").trim().to_string()
}

/// Reduces HTML to the allowed formatting tags.
///
/// Script and style elements are dropped with their content; any other tag is
/// removed while its inner text is kept. Angle brackets left in the text, such
/// as an unterminated `<img ...`, are escaped so they can never open a tag.
pub fn sanitize(html: &str) -> String {
    let html = SCRIPT_ELEMENT.replace_all(html, "");
    let html = STYLE_ELEMENT.replace_all(&html, "");
    let html = COMMENT.replace_all(&html, "");

    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for caps in TAG.captures_iter(&html) {
        let Some(tag) = caps.get(0) else { continue };
        push_text(&mut out, &html[last..tag.start()]);
        last = tag.end();

        let name = caps[2].to_ascii_lowercase();
        if !ALLOWED_TAGS.contains(&name.as_str()) {
            continue;
        }
        match (&caps[1], name.as_str()) {
            ("/", "br") => {}
            (slash, _) => {
                out.push('<');
                out.push_str(slash);
                out.push_str(&name);
                out.push('>');
            }
        }
    }
    push_text(&mut out, &html[last..]);
    out
}

fn push_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RichTextError {
    #[error("Selection {start}..{end} is outside the text or splits a character")]
    InvalidSelection { start: usize, end: usize },

    #[error("Selection is empty")]
    EmptySelection,

    #[error("Selection starts or ends inside a tag")]
    SelectionInsideTag,

    #[error("Selection already contains markup")]
    SelectionContainsMarkup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatCommand {
    Bold,
    Italic,
    Heading,
    BulletList,
    NumberedList,
    Undo,
    Redo,
}

/// Editable description text with undo/redo history.
#[derive(Debug, Clone, Default)]
pub struct RichTextBuffer {
    html: String,
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
}

impl RichTextBuffer {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Self::default()
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Replaces the whole text, e.g. after typing.
    pub fn set_html(&mut self, html: impl Into<String>) {
        let html = html.into();
        if html != self.html {
            self.push_edit(html);
        }
    }

    /// Runs a command against a byte range of the current text.
    ///
    /// Returns whether the text changed. `Undo`/`Redo` ignore the selection
    /// and are no-ops when their history is empty.
    pub fn apply(
        &mut self,
        command: FormatCommand,
        selection: Range<usize>,
    ) -> Result<bool, RichTextError> {
        let replacement = match command {
            FormatCommand::Undo => return Ok(self.undo()),
            FormatCommand::Redo => return Ok(self.redo()),
            FormatCommand::Bold => wrap(self.selected(&selection)?, "strong"),
            FormatCommand::Italic => wrap(self.selected(&selection)?, "em"),
            FormatCommand::Heading => wrap(self.selected(&selection)?, "h3"),
            FormatCommand::BulletList => list(self.selected(&selection)?, "ul")?,
            FormatCommand::NumberedList => list(self.selected(&selection)?, "ol")?,
        };

        let mut html = String::with_capacity(self.html.len() + replacement.len());
        html.push_str(&self.html[..selection.start]);
        html.push_str(&replacement);
        html.push_str(&self.html[selection.end..]);
        self.push_edit(html);
        Ok(true)
    }

    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack.push(std::mem::replace(&mut self.html, previous));
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push(std::mem::replace(&mut self.html, next));
                true
            }
            None => false,
        }
    }

    fn push_edit(&mut self, html: String) {
        self.undo_stack.push(std::mem::replace(&mut self.html, html));
        self.redo_stack.clear();
    }

    fn selected(&self, selection: &Range<usize>) -> Result<&str, RichTextError> {
        let Range { start, end } = selection.clone();
        let text = self
            .html
            .get(start..end)
            .ok_or(RichTextError::InvalidSelection { start, end })?;
        if text.trim().is_empty() {
            return Err(RichTextError::EmptySelection);
        }
        if text.contains('<') || text.contains('>') {
            return Err(RichTextError::SelectionContainsMarkup);
        }

        let before = &self.html[..start];
        let inside_tag = match (before.rfind('<'), before.rfind('>')) {
            (Some(open), Some(close)) => open > close,
            (Some(_), None) => true,
            _ => false,
        };
        if inside_tag {
            return Err(RichTextError::SelectionInsideTag);
        }

        Ok(text)
    }
}

fn wrap(text: &str, tag: &str) -> String {
    format!("<{tag}>{text}</{tag}>")
}

fn list(text: &str, tag: &str) -> Result<String, RichTextError> {
    let items: String = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| wrap(line, "li"))
        .collect();
    if items.is_empty() {
        return Err(RichTextError::EmptySelection);
    }
    Ok(wrap(&items, tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_html_strips_offsets() {
        let html = r#"  <p data-start="0" data-end="12">Hello <strong data-start="6" data-end="11">world</strong></p> "#;
        assert_eq!(clean_html(html), "<p>Hello <strong>world</strong></p>");
        assert_eq!(clean_html("<p>plain</p>"), "<p>plain</p>");
    }

    #[test]
    fn test_sanitize_keeps_allowed_tags_without_attributes() {
        let html = r#"<p class="lead" onclick="steal()">Hi<br/><B>there</B></p><h3 id="x">Role</h3>"#;
        assert_eq!(sanitize(html), "<p>Hi<br><b>there</b></p><h3>Role</h3>");
    }

    #[test]
    fn test_sanitize_drops_scripts_and_unknown_tags() {
        let html = "<div><p>Apply <a href=\"javascript:x()\">here</a></p><script>alert('x')</script>\
                    <STYLE>p{color:red}</STYLE><!-- note --><img src=x onerror=y></div>";
        assert_eq!(sanitize(html), "<p>Apply here</p>");
    }

    #[test]
    fn test_sanitize_escapes_unterminated_tags() {
        let html = "<p>Join us</p><img src=x onerror=alert(document.cookie)";
        let cleaned = sanitize(html);
        assert_eq!(cleaned, "<p>Join us</p>&lt;img src=x onerror=alert(document.cookie)");
        assert!(!cleaned.contains("<img"));

        assert_eq!(sanitize("<p>a<b"), "<p>a&lt;b");
        assert_eq!(sanitize("1 < 2 > 0"), "1 &lt; 2 &gt; 0");
        assert_eq!(sanitize(&cleaned), cleaned);
    }

    #[test]
    fn test_sanitize_is_stable_on_clean_input() {
        let html = "<ul><li>Rust</li><li><em>SQL</em></li></ul>";
        assert_eq!(sanitize(html), html);
        assert_eq!(sanitize(&sanitize(html)), html);
    }

    #[test]
    fn test_bold_and_undo_redo() {
        let mut buffer = RichTextBuffer::new("<p>Hello world</p>");
        assert!(buffer.apply(FormatCommand::Bold, 9..14).unwrap());
        assert_eq!(buffer.html(), "<p>Hello <strong>world</strong></p>");
        assert!(buffer.can_undo());

        assert!(buffer.apply(FormatCommand::Undo, 0..0).unwrap());
        assert_eq!(buffer.html(), "<p>Hello world</p>");
        assert!(buffer.can_redo());

        assert!(buffer.apply(FormatCommand::Redo, 0..0).unwrap());
        assert_eq!(buffer.html(), "<p>Hello <strong>world</strong></p>");
        assert!(!buffer.apply(FormatCommand::Redo, 0..0).unwrap());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut buffer = RichTextBuffer::new("Hello world");
        buffer.apply(FormatCommand::Italic, 0..5).unwrap();
        buffer.undo();
        assert!(buffer.can_redo());
        buffer.apply(FormatCommand::Heading, 0..11).unwrap();
        assert_eq!(buffer.html(), "<h3>Hello world</h3>");
        assert!(!buffer.can_redo());
    }

    #[test]
    fn test_lists_wrap_each_line() {
        let mut buffer = RichTextBuffer::new("Rust\n\n SQL \nDocker");
        let len = buffer.html().len();
        buffer.apply(FormatCommand::BulletList, 0..len).unwrap();
        assert_eq!(buffer.html(), "<ul><li>Rust</li><li>SQL</li><li>Docker</li></ul>");

        let mut buffer = RichTextBuffer::new("One\nTwo");
        buffer.apply(FormatCommand::NumberedList, 0..7).unwrap();
        assert_eq!(buffer.html(), "<ol><li>One</li><li>Two</li></ol>");
    }

    #[test]
    fn test_invalid_selections_leave_text_unchanged() {
        let mut buffer = RichTextBuffer::new("<p>Zürich office</p>");
        assert_eq!(
            buffer.apply(FormatCommand::Bold, 5..7),
            Err(RichTextError::InvalidSelection { start: 5, end: 7 })
        );
        assert_eq!(
            buffer.apply(FormatCommand::Bold, 3..100),
            Err(RichTextError::InvalidSelection { start: 3, end: 100 })
        );
        assert_eq!(buffer.apply(FormatCommand::Bold, 3..3), Err(RichTextError::EmptySelection));
        assert_eq!(
            buffer.apply(FormatCommand::Bold, 0..6),
            Err(RichTextError::SelectionContainsMarkup)
        );
        assert_eq!(
            buffer.apply(FormatCommand::Bold, 1..2),
            Err(RichTextError::SelectionInsideTag)
        );
        assert_eq!(buffer.html(), "<p>Zürich office</p>");
        assert!(!buffer.can_undo());
    }
}
