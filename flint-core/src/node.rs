use std::fmt;

/// Attribute pairs in insertion order. Order is part of the serialized
/// output, so this stays a plain list rather than a map.
pub type Attrs = Vec<(String, String)>;

#[derive(Debug)]
pub enum RenderError {
    EmptyValue(String),
    MissingChildren(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::EmptyValue(tag) => write!(f, "leaf <{}> must have a value", tag),
            RenderError::MissingChildren(tag) => {
                write!(f, "parent <{}> must have a children value", tag)
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// A renderable piece of markup: either a leaf (text, possibly wrapped in a
/// tag) or a parent element with child nodes.
///
/// Absent and empty are different things here. A parent whose `children` is
/// `None` cannot be rendered, while `Some(vec![])` is a valid element with
/// an empty body. Likewise a tagged leaf needs a non-empty `value`, but a
/// tagless leaf is raw text and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf {
        tag: Option<String>,
        value: Option<String>,
        attrs: Attrs,
    },
    Parent {
        tag: String,
        children: Option<Vec<HtmlNode>>,
        attrs: Attrs,
    },
}

impl HtmlNode {
    /// Raw text with no surrounding tag.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    pub fn leaf_with_attrs(
        tag: impl Into<String>,
        value: impl Into<String>,
        attrs: Attrs,
    ) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attrs,
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: tag.into(),
            children: Some(children),
            attrs: Vec::new(),
        }
    }

    /// Serialize the node and everything under it. No whitespace is
    /// injected between siblings; the output is one concatenated line.
    pub fn render(&self) -> Result<String, RenderError> {
        match self {
            HtmlNode::Leaf { tag: None, value, .. } => {
                Ok(value.clone().unwrap_or_default())
            }
            HtmlNode::Leaf { tag: Some(tag), value, attrs } => {
                if is_void(tag) {
                    return Ok(format!("<{}{}/>", tag, render_attrs(attrs)));
                }
                match value.as_deref() {
                    Some(v) if !v.is_empty() => {
                        Ok(format!("<{0}{1}>{2}</{0}>", tag, render_attrs(attrs), v))
                    }
                    _ => Err(RenderError::EmptyValue(tag.clone())),
                }
            }
            HtmlNode::Parent { tag, children, attrs } => {
                let children = children
                    .as_ref()
                    .ok_or_else(|| RenderError::MissingChildren(tag.clone()))?;
                let mut out = format!("<{}{}>", tag, render_attrs(attrs));
                for child in children {
                    out.push_str(&child.render()?);
                }
                out.push_str(&format!("</{}>", tag));
                Ok(out)
            }
        }
    }
}

// Void elements carry everything in their attributes and serialize
// self-closing; their value is never consulted.
fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr")
}

fn render_attrs(attrs: &Attrs) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, value))
        .collect()
}
