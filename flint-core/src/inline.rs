use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::node::HtmlNode;

// Compiled once; alt text runs to the first `]`, urls to the first `)`.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    UnclosedDelimiter(String),
    MissingUrl(SpanKind),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnclosedDelimiter(delimiter) => {
                write!(f, "invalid markdown, formatted section not closed: {}", delimiter)
            }
            ParseError::MissingUrl(SpanKind::Image) => write!(f, "an image must have a url"),
            ParseError::MissingUrl(_) => write!(f, "a link must have a url"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A contiguously-typed run of inline text. `url` is only meaningful for
/// links and images, where it must be present and non-empty by the time the
/// span is lowered to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub kind: SpanKind,
    pub url: Option<String>,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    pub fn with_url(text: impl Into<String>, kind: SpanKind, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            url: Some(url.into()),
        }
    }

    fn plain(text: &str) -> Self {
        Self::new(text, SpanKind::Plain)
    }
}

/// Lex raw text into typed spans. Staged: delimiter splitting for bold,
/// italic and code in that fixed order, then image extraction, then link
/// extraction. Images must come first because image syntax is link syntax
/// prefixed with `!`.
pub fn parse_inline(text: &str) -> Result<Vec<TextSpan>, ParseError> {
    let mut spans = vec![TextSpan::plain(text)];
    spans = split_delimiter(spans, "**", SpanKind::Bold)?;
    spans = split_delimiter(spans, "_", SpanKind::Italic)?;
    spans = split_delimiter(spans, "`", SpanKind::Code)?;
    spans = split_images(spans);
    spans = split_links(spans);
    Ok(spans)
}

/// Split every plain span on a paired delimiter. Splitting yields an odd
/// piece count when every opener is closed; an even count means a dangling
/// delimiter. Even-indexed pieces stay plain, odd-indexed become `kind`,
/// and empty pieces are dropped.
fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>, ParseError> {
    let mut out = Vec::new();
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }
        let pieces: Vec<&str> = span.text.split(delimiter).collect();
        if pieces.len() % 2 == 0 {
            return Err(ParseError::UnclosedDelimiter(delimiter.to_string()));
        }
        for (i, piece) in pieces.iter().enumerate() {
            if piece.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(TextSpan::plain(piece));
            } else {
                out.push(TextSpan::new(*piece, kind));
            }
        }
    }
    Ok(out)
}

fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    let mut out = Vec::new();
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }
        let text = &span.text;
        let mut last = 0;
        for caps in IMAGE_RE.captures_iter(text) {
            let m = caps.get(0).unwrap();
            if m.start() > last {
                out.push(TextSpan::plain(&text[last..m.start()]));
            }
            out.push(TextSpan::with_url(&caps[1], SpanKind::Image, &caps[2]));
            last = m.end();
        }
        if last < text.len() {
            out.push(TextSpan::plain(&text[last..]));
        }
    }
    out
}

fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    let mut out = Vec::new();
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }
        let text = &span.text;
        let mut last = 0;
        for caps in LINK_RE.captures_iter(text) {
            let m = caps.get(0).unwrap();
            // Link syntax behind a `!` is image syntax; anything the image
            // pass left in place must stay literal text.
            if m.start() > 0 && text.as_bytes()[m.start() - 1] == b'!' {
                continue;
            }
            if m.start() > last {
                out.push(TextSpan::plain(&text[last..m.start()]));
            }
            out.push(TextSpan::with_url(&caps[1], SpanKind::Link, &caps[2]));
            last = m.end();
        }
        if last < text.len() {
            out.push(TextSpan::plain(&text[last..]));
        }
    }
    out
}

/// Lower a span to its markup node. Links and images without a usable url
/// are rejected here rather than at construction, so the lexer itself never
/// fails on them.
pub fn span_to_node(span: &TextSpan) -> Result<HtmlNode, ParseError> {
    match span.kind {
        SpanKind::Plain => Ok(HtmlNode::text(&span.text)),
        SpanKind::Bold => Ok(HtmlNode::leaf("b", &span.text)),
        SpanKind::Italic => Ok(HtmlNode::leaf("i", &span.text)),
        SpanKind::Code => Ok(HtmlNode::leaf("code", &span.text)),
        SpanKind::Link => {
            let url = require_url(span)?;
            Ok(HtmlNode::leaf_with_attrs(
                "a",
                &span.text,
                vec![("href".to_string(), url)],
            ))
        }
        SpanKind::Image => {
            let url = require_url(span)?;
            Ok(HtmlNode::leaf_with_attrs(
                "img",
                "",
                vec![
                    ("src".to_string(), url),
                    ("alt".to_string(), span.text.clone()),
                ],
            ))
        }
    }
}

fn require_url(span: &TextSpan) -> Result<String, ParseError> {
    match span.url.as_deref() {
        Some(url) if !url.is_empty() => Ok(url.to_string()),
        _ => Err(ParseError::MissingUrl(span.kind)),
    }
}
