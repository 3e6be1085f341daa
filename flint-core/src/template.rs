use std::fmt;

use crate::block::markdown_to_tree;
use crate::inline::ParseError;
use crate::node::{HtmlNode, RenderError};

pub const TITLE_TOKEN: &str = "{{ Title }}";
pub const CONTENT_TOKEN: &str = "{{ Content }}";

#[derive(Debug)]
pub enum PageError {
    MissingTitle,
    Parse(ParseError),
    Render(RenderError),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::MissingTitle => write!(f, "no top-level heading to use as a title"),
            PageError::Parse(e) => write!(f, "markdown error: {}", e),
            PageError::Render(e) => write!(f, "render error: {}", e),
        }
    }
}

impl std::error::Error for PageError {}

impl From<ParseError> for PageError {
    fn from(err: ParseError) -> Self {
        PageError::Parse(err)
    }
}

impl From<RenderError> for PageError {
    fn from(err: RenderError) -> Self {
        PageError::Render(err)
    }
}

/// The first `# ` line names the page.
pub fn extract_title(markdown: &str) -> Result<String, PageError> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(PageError::MissingTitle)
}

/// Convert a document and substitute it into the template. The tokens are
/// literal text, replaced globally; everything else in the template passes
/// through untouched.
pub fn render_page(markdown: &str, template: &str) -> Result<String, PageError> {
    let mut tree = markdown_to_tree(markdown)?;
    strip_title_heading(&mut tree);
    let content = tree.render()?;
    let title = extract_title(markdown)?;
    Ok(template
        .replace(TITLE_TOKEN, &title)
        .replace(CONTENT_TOKEN, &content))
}

// The template places the title itself, so the heading that produced it is
// dropped from the content. Only the first h1; everything after stays.
fn strip_title_heading(tree: &mut HtmlNode) {
    if let HtmlNode::Parent { children: Some(children), .. } = tree {
        let mut found = false;
        children.retain(|child| {
            if found {
                return true;
            }
            if matches!(child, HtmlNode::Parent { tag, .. } if tag == "h1") {
                found = true;
                return false;
            }
            true
        });
    }
}
