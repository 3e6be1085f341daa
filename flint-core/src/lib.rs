pub mod block;
pub mod config;
pub mod inline;
pub mod node;
pub mod site;
pub mod template;

// Re-export main types
pub use block::{BlockType, block_to_node, classify, markdown_to_tree, split_blocks};
pub use config::Config;
pub use inline::{ParseError, SpanKind, TextSpan, parse_inline};
pub use node::{HtmlNode, RenderError};
pub use site::{BuildError, Site};
pub use template::{PageError, extract_title, render_page};
