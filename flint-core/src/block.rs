use crate::inline::{self, ParseError, SpanKind, TextSpan};
use crate::node::HtmlNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// Split a document into blank-line-delimited blocks. Every line is trimmed
/// individually (source documents are often indented wholesale), then the
/// block itself; blocks empty after trimming are dropped.
pub fn split_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    for chunk in markdown.split("\n\n") {
        let joined = chunk.lines().map(str::trim).collect::<Vec<_>>().join("\n");
        let block = joined.trim();
        if !block.is_empty() {
            blocks.push(block.to_string());
        }
    }
    blocks
}

/// Classify a block. Total: checks run in a fixed order, first match wins,
/// and anything ambiguous or malformed falls back to a paragraph.
pub fn classify(block: &str) -> BlockType {
    if heading_level(block).is_some() {
        return BlockType::Heading;
    }
    if block.starts_with("```") && block.ends_with("```") {
        return BlockType::Code;
    }
    if block.starts_with('>') {
        if block.lines().all(|line| line.starts_with('>')) {
            return BlockType::Quote;
        }
        return BlockType::Paragraph;
    }
    if block.starts_with("- ") {
        if block.lines().all(|line| line.starts_with("- ")) {
            return BlockType::UnorderedList;
        }
        return BlockType::Paragraph;
    }
    if block.starts_with("1. ") {
        let mut counter = 1;
        for line in block.lines() {
            if !line.starts_with(&format!("{counter}. ")) {
                return BlockType::Paragraph;
            }
            counter += 1;
        }
        return BlockType::OrderedList;
    }
    BlockType::Paragraph
}

// 1-6 hashes followed by a space; anything else is not a heading.
fn heading_level(block: &str) -> Option<usize> {
    let hashes = block.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) && block[hashes..].starts_with(' ') {
        Some(hashes)
    } else {
        None
    }
}

/// Lower one classified block to its markup node.
pub fn block_to_node(block: &str, kind: BlockType) -> Result<HtmlNode, ParseError> {
    match kind {
        BlockType::Paragraph => {
            let text = block.replace('\n', " ");
            let children = text_to_children(text.trim())?;
            Ok(HtmlNode::parent("p", children))
        }
        BlockType::Heading => {
            // classify() only admits levels 1-6.
            let level = block.chars().take_while(|&c| c == '#').count();
            let text = block.get(level + 1..).unwrap_or("");
            let children = text_to_children(text)?;
            Ok(HtmlNode::parent(format!("h{level}"), children))
        }
        BlockType::Code => {
            let lines: Vec<&str> = block.split('\n').collect();
            let content = if lines.len() >= 3 {
                format!("{}\n", lines[1..lines.len() - 1].join("\n"))
            } else {
                String::new()
            };
            // Code contents are never inline-parsed; the whole body is one
            // code span.
            let code = inline::span_to_node(&TextSpan::new(content, SpanKind::Code))?;
            Ok(HtmlNode::parent("pre", vec![code]))
        }
        BlockType::Quote => {
            let text = block
                .lines()
                .map(|line| {
                    line.strip_prefix("> ")
                        .or_else(|| line.strip_prefix('>'))
                        .unwrap_or(line)
                })
                .collect::<Vec<_>>()
                .join(" ");
            let children = text_to_children(&text)?;
            Ok(HtmlNode::parent("blockquote", children))
        }
        BlockType::UnorderedList => {
            let mut items = Vec::new();
            for line in block.lines() {
                if line.len() <= 2 {
                    continue;
                }
                let children = text_to_children(line[2..].trim())?;
                items.push(HtmlNode::parent("li", children));
            }
            Ok(HtmlNode::parent("ul", items))
        }
        BlockType::OrderedList => {
            let mut items = Vec::new();
            for (i, line) in block.lines().enumerate() {
                let marker = format!("{}. ", i + 1);
                if line.len() <= marker.len() {
                    continue;
                }
                let children = text_to_children(line[marker.len()..].trim())?;
                items.push(HtmlNode::parent("li", children));
            }
            Ok(HtmlNode::parent("ol", items))
        }
    }
}

fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, ParseError> {
    inline::parse_inline(text)?
        .iter()
        .map(inline::span_to_node)
        .collect()
}

/// Lower a whole document to a `<div>` wrapping one node per block. An
/// input with no blocks yields a div with an empty (but present) child
/// list.
pub fn markdown_to_tree(markdown: &str) -> Result<HtmlNode, ParseError> {
    let mut children = Vec::new();
    for block in split_blocks(markdown) {
        children.push(block_to_node(&block, classify(&block))?);
    }
    Ok(HtmlNode::parent("div", children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_blocks() {
        let md = "\n    This is **bolded** paragraph\n\n    This is another paragraph with _italic_ text and `code` here\n    This is the same paragraph on a new line\n\n    - This is a list\n    - with items\n    ";
        assert_eq!(
            split_blocks(md),
            vec![
                "This is **bolded** paragraph".to_string(),
                "This is another paragraph with _italic_ text and `code` here\nThis is the same paragraph on a new line".to_string(),
                "- This is a list\n- with items".to_string(),
            ]
        );
    }

    #[test]
    fn test_split_blocks_collapses_extra_blank_lines() {
        assert_eq!(
            split_blocks("first\n\n\n\nsecond"),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_heading_classification() {
        assert_eq!(classify("# Heading 1"), BlockType::Heading);
        assert_eq!(classify("## Heading 2"), BlockType::Heading);
        assert_eq!(classify("###### Heading 6"), BlockType::Heading);
        assert_eq!(classify("####### Too many hashes"), BlockType::Paragraph);
        assert_eq!(classify("#No space"), BlockType::Paragraph);
    }

    #[test]
    fn test_code_classification() {
        assert_eq!(classify("```\ncode here\n```"), BlockType::Code);
        assert_eq!(classify("```\nmulti\nline\ncode\n```"), BlockType::Code);
        assert_eq!(classify("```\nunclosed code block"), BlockType::Paragraph);
        assert_eq!(classify("code with ``` in the middle"), BlockType::Paragraph);
    }

    #[test]
    fn test_quote_classification() {
        assert_eq!(classify(">quote"), BlockType::Quote);
        assert_eq!(classify(">line 1\n>line 2"), BlockType::Quote);
        assert_eq!(classify(">line 1\nline 2"), BlockType::Paragraph);
    }

    #[test]
    fn test_blank_line_inside_quote_demotes_to_paragraph() {
        assert_eq!(classify("> line 1\n\n> line 2"), BlockType::Paragraph);
    }

    #[test]
    fn test_unordered_list_classification() {
        assert_eq!(classify("- item"), BlockType::UnorderedList);
        assert_eq!(classify("- item 1\n- item 2"), BlockType::UnorderedList);
        assert_eq!(classify("- item 1\ntext"), BlockType::Paragraph);
        assert_eq!(classify("-no space"), BlockType::Paragraph);
    }

    #[test]
    fn test_ordered_list_classification() {
        assert_eq!(classify("1. item"), BlockType::OrderedList);
        assert_eq!(classify("1. item 1\n2. item 2\n3. item 3"), BlockType::OrderedList);
        assert_eq!(classify("1. item 1\n3. item 3"), BlockType::Paragraph);
        assert_eq!(classify("2. item 1"), BlockType::Paragraph);
        assert_eq!(classify("0. item 1"), BlockType::Paragraph);
        assert_eq!(classify("1. item 1\ntext"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(classify(""), BlockType::Paragraph);
        assert_eq!(classify("Just a paragraph"), BlockType::Paragraph);
        assert_eq!(classify("Multi-line\nparagraph text"), BlockType::Paragraph);
    }

    #[test]
    fn test_paragraphs() {
        let md = "\n    This is **bolded** paragraph\n    text in a p\n    tag here\n\n    This is another paragraph with _italic_ text and `code` here\n\n    ";
        let html = markdown_to_tree(md).unwrap().render().unwrap();
        assert_eq!(
            html,
            "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p><p>This is another paragraph with <i>italic</i> text and <code>code</code> here</p></div>"
        );
    }

    #[test]
    fn test_code_block_preserves_inline_markers() {
        let md = "```\nThis is text that _should_ remain\nthe **same** even with inline stuff\n```";
        let html = markdown_to_tree(md).unwrap().render().unwrap();
        assert_eq!(
            html,
            "<div><pre><code>This is text that _should_ remain\nthe **same** even with inline stuff\n</code></pre></div>"
        );
    }

    #[test]
    fn test_degenerate_code_block_fails_at_render() {
        // A fence with no body builds an empty code leaf, which is only
        // rejected when rendered.
        let tree = markdown_to_tree("```\n```").unwrap();
        assert!(tree.render().is_err());
    }

    #[test]
    fn test_headings() {
        let md = "# Heading 1\n\n## Heading 2\n\n### Heading 3";
        let html = markdown_to_tree(md).unwrap().render().unwrap();
        assert_eq!(
            html,
            "<div><h1>Heading 1</h1><h2>Heading 2</h2><h3>Heading 3</h3></div>"
        );
    }

    #[test]
    fn test_quote_block_joins_lines_with_spaces() {
        let md = "> line 1\n> line 2";
        let html = markdown_to_tree(md).unwrap().render().unwrap();
        assert_eq!(html, "<div><blockquote>line 1 line 2</blockquote></div>");
    }

    #[test]
    fn test_bare_quote_marker_is_stripped() {
        let md = ">no space\n>here either";
        let html = markdown_to_tree(md).unwrap().render().unwrap();
        assert_eq!(html, "<div><blockquote>no space here either</blockquote></div>");
    }

    #[test]
    fn test_unordered_list() {
        let md = "- first item\n- second **bold** item";
        let html = markdown_to_tree(md).unwrap().render().unwrap();
        assert_eq!(
            html,
            "<div><ul><li>first item</li><li>second <b>bold</b> item</li></ul></div>"
        );
    }

    #[test]
    fn test_ordered_list() {
        let md = "1. first\n2. second\n3. third";
        let html = markdown_to_tree(md).unwrap().render().unwrap();
        assert_eq!(
            html,
            "<div><ol><li>first</li><li>second</li><li>third</li></ol></div>"
        );
    }

    #[test]
    fn test_list_skips_degenerate_items() {
        // Markerless tails never survive split_blocks' trimming, but the
        // lowering guards against them on its own.
        let ul = block_to_node("- first\n- ", BlockType::UnorderedList).unwrap();
        assert_eq!(ul.render().unwrap(), "<ul><li>first</li></ul>");

        let ol = block_to_node("1. first\n2. ", BlockType::OrderedList).unwrap();
        assert_eq!(ol.render().unwrap(), "<ol><li>first</li></ol>");
    }

    #[test]
    fn test_empty_document_renders_empty_div() {
        let html = markdown_to_tree("").unwrap().render().unwrap();
        assert_eq!(html, "<div></div>");
    }

    #[test]
    fn test_unclosed_bold_in_block_is_fatal() {
        assert!(markdown_to_tree("some **unterminated text").is_err());
    }
}
