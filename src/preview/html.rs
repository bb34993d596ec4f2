//! HTML rendition of the preview.
//!
//! Walks the same comrak tree as the terminal renderer and writes each
//! element with the tag, class and inline CSS from the style table. Raw HTML
//! in the source is escaped, never passed through.

use std::fmt::Write as _;

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, parse_document};

use super::render::{classify, markdown_options};
use super::theme::{Element, ElementStyle, element_style};

/// Render a markdown body to an HTML fragment.
pub fn render_html(body: &str) -> String {
    let arena = Arena::new();
    let options = markdown_options();
    let root = parse_document(&arena, body, &options);
    let mut out = String::new();
    write_children(root, &mut out, false);
    out
}

/// Render a complete standalone HTML page with the title in `<title>`.
pub fn render_html_document(title: &str, body: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(title));
    out.push_str("</head>\n<body>\n");
    out.push_str(&render_html(body));
    out.push_str("</body>\n</html>\n");
    out
}

/// Escape text for HTML content and double-quoted attribute values.
pub fn escape_html(text: &str) -> String {
    escape_with(comrak::html::escape, text.as_bytes())
}

/// Escape a link or image target for an attribute.
///
/// Script and file URLs, and data URLs other than raster images, are blanked.
pub fn escape_url(url: &str) -> String {
    if is_dangerous_url(url) {
        return String::new();
    }
    escape_with(comrak::html::escape_href, url.as_bytes())
}

fn escape_with(escape: EscapeFn, bytes: &[u8]) -> String {
    let mut out = Vec::with_capacity(bytes.len());
    // Writing into a Vec cannot fail
    let _ = escape(&mut out, bytes);
    String::from_utf8_lossy(&out).into_owned()
}

type EscapeFn = fn(&mut dyn std::io::Write, &[u8]) -> std::io::Result<()>;

const DANGEROUS_SCHEMES: &[&str] = &["javascript:", "vbscript:", "file:", "data:"];
const SAFE_DATA_IMAGES: &[&str] = &[
    "data:image/png",
    "data:image/gif",
    "data:image/jpeg",
    "data:image/webp",
];

fn is_dangerous_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    DANGEROUS_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
        && !SAFE_DATA_IMAGES.iter().any(|prefix| url.starts_with(prefix))
}

fn open_tag(out: &mut String, style: &ElementStyle, extra: &str) {
    out.push('<');
    out.push_str(style.tag);
    if !style.class.is_empty() {
        let _ = write!(out, " class=\"{}\"", style.class);
    }
    if !style.css.is_empty() {
        let _ = write!(out, " style=\"{}\"", style.css);
    }
    out.push_str(extra);
    out.push('>');
}

fn close_tag(out: &mut String, style: &ElementStyle) {
    let _ = write!(out, "</{}>", style.tag);
}

fn write_children<'a>(node: &'a AstNode<'a>, out: &mut String, in_paragraph: bool) {
    for child in node.children() {
        write_node(child, out, in_paragraph);
    }
}

fn write_node<'a>(node: &'a AstNode<'a>, out: &mut String, in_paragraph: bool) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Text(text) => out.push_str(&escape_html(&text)),
        NodeValue::HtmlInline(raw) => out.push_str(&escape_html(&raw)),
        NodeValue::HtmlBlock(block) => {
            let style = element_style(Element::Paragraph);
            open_tag(out, style, "");
            out.push_str(&escape_html(block.literal.trim_end_matches('\n')));
            close_tag(out, style);
            out.push('\n');
        }
        NodeValue::SoftBreak => out.push('\n'),
        NodeValue::LineBreak => out.push_str("<br />\n"),
        NodeValue::Code(code) => {
            // The padded, tinted code style applies inside paragraphs only
            if in_paragraph {
                open_tag(out, element_style(Element::InlineCode), "");
            } else {
                out.push_str("<code>");
            }
            out.push_str(&escape_html(&code.literal));
            out.push_str("</code>");
        }
        NodeValue::Link(link) => {
            let style = element_style(Element::Link);
            let extra = format!(
                " href=\"{}\" target=\"_blank\" rel=\"noreferrer\"",
                escape_url(&link.url)
            );
            open_tag(out, style, &extra);
            write_children(node, out, in_paragraph);
            close_tag(out, style);
        }
        NodeValue::Image(image) => {
            let mut alt = String::new();
            collect_plain(node, &mut alt);
            let _ = write!(
                out,
                "<img src=\"{}\" alt=\"{}\" />",
                escape_url(&image.url),
                escape_html(&alt)
            );
        }
        NodeValue::CodeBlock(block) => {
            let style = element_style(Element::CodeBlock);
            open_tag(out, style, "");
            out.push_str("<code>");
            out.push_str(&escape_html(&block.literal));
            out.push_str("</code>");
            close_tag(out, style);
            out.push('\n');
        }
        NodeValue::ThematicBreak => {
            let style = element_style(Element::Rule);
            let _ = writeln!(out, "<{} style=\"{}\" />", style.tag, style.css);
        }
        NodeValue::TaskItem(checked) => {
            let style = element_style(Element::ListItem);
            open_tag(out, style, "");
            let state = if checked.is_some() { " checked" } else { "" };
            let _ = write!(out, "<input type=\"checkbox\" disabled{state} /> ");
            write_tight_item(node, out);
            close_tag(out, style);
            out.push('\n');
        }
        NodeValue::Item(_) => {
            let style = element_style(Element::ListItem);
            open_tag(out, style, "");
            write_tight_item(node, out);
            close_tag(out, style);
            out.push('\n');
        }
        NodeValue::List(list) => {
            let style = element_style(if list.list_type == ListType::Ordered {
                Element::OrderedList
            } else {
                Element::UnorderedList
            });
            let extra = if list.list_type == ListType::Ordered && list.start != 1 {
                format!(" start=\"{}\"", list.start)
            } else {
                String::new()
            };
            open_tag(out, style, &extra);
            out.push('\n');
            write_children(node, out, false);
            close_tag(out, style);
            out.push('\n');
        }
        NodeValue::Table(_) => write_table(node, out),
        ref other => match classify(other) {
            Some(element) => {
                let style = element_style(element);
                let block = !matches!(
                    element,
                    Element::Strong | Element::Emphasis | Element::Strikethrough
                );
                open_tag(out, style, "");
                if element == Element::BlockQuote {
                    out.push('\n');
                }
                write_children(node, out, element == Element::Paragraph || in_paragraph);
                close_tag(out, style);
                if block {
                    out.push('\n');
                }
            }
            None => write_children(node, out, in_paragraph),
        },
    }
}

/// List item content; a lone paragraph is written without its `<p>`.
fn write_tight_item<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.children() {
        if matches!(child.data.borrow().value, NodeValue::Paragraph) {
            write_children(child, out, true);
        } else {
            write_node(child, out, false);
        }
    }
}

fn write_table<'a>(node: &'a AstNode<'a>, out: &mut String) {
    let table = element_style(Element::Table);
    open_tag(out, table, "");
    out.push('\n');
    let mut body_open = false;
    for row in node.children() {
        let NodeValue::TableRow(header) = row.data.borrow().value else {
            continue;
        };
        let cell_style = if header {
            out.push_str("<thead>\n");
            element_style(Element::TableHeader)
        } else {
            if !body_open {
                out.push_str("<tbody>\n");
                body_open = true;
            }
            element_style(Element::TableCell)
        };
        out.push_str("<tr>");
        for cell in row.children() {
            open_tag(out, cell_style, "");
            write_children(cell, out, true);
            close_tag(out, cell_style);
        }
        out.push_str("</tr>\n");
        if header {
            out.push_str("</thead>\n");
        }
    }
    if body_open {
        out.push_str("</tbody>\n");
    }
    close_tag(out, table);
    out.push('\n');
}

fn collect_plain<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::Code(code) => out.push_str(&code.literal),
            _ => collect_plain(child, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_h1_carries_border_and_size_override() {
        let html = render_html("# Hello");
        assert_eq!(
            html,
            "<h1 style=\"padding-bottom:.2em;font-size:1.7em;border-bottom:1px solid #ffc4dd\">Hello</h1>\n"
        );
    }

    #[test]
    fn test_links_open_in_new_context_without_referrer() {
        let html = render_html("[site](https://example.com)");
        assert!(html.contains(
            "<a class=\"underline\" href=\"https://example.com\" target=\"_blank\" rel=\"noreferrer\">site</a>"
        ));
    }

    #[test]
    fn test_paragraph_preserves_whitespace() {
        let html = render_html("one\ntwo");
        assert_eq!(html, "<p style=\"white-space:pre-wrap\">one\ntwo</p>\n");
    }

    #[test]
    fn test_inline_code_in_paragraph_is_tinted() {
        let html = render_html("use `x`");
        assert!(html.contains("<code style=\"background-color:#1a1d38;padding:.2em .4em;border-radius:4px\">x</code>"));
    }

    #[test]
    fn test_code_block_code_is_untinted() {
        let html = render_html("```\nfn main() {}\n```");
        assert!(html.starts_with("<pre style=\"margin:1.3rem 0;padding:1em;background-color:#1a1d38"));
        assert!(html.contains("<code>fn main() {}\n</code>"));
    }

    #[test]
    fn test_strong_uses_green_class() {
        let html = render_html("**b**");
        assert!(html.contains("<strong class=\"text-green-500\" style=\"color:#22c55e\">b</strong>"));
    }

    #[test]
    fn test_table_cells_are_centered() {
        let html = render_html("| a |\n|---|\n| b |");
        assert!(html.contains("<th style=\"padding:.5em;text-align:center;border:1px solid #ffc4dd;color:#ffc4dd\">a</th>"));
        assert!(html.contains("<td style=\"padding:.5em;text-align:center;border:1px solid #ffc4dd\">b</td>"));
        assert!(html.contains("<thead>") && html.contains("<tbody>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_html("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_list_items_are_tight() {
        let html = render_html("- a\n- b");
        assert_eq!(
            html,
            "<ul class=\"list-disc list-inside\" style=\"padding-left:1.8em;list-style:disc inside\">\n<li>a</li>\n<li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_script_urls_are_blanked() {
        let html = render_html("[click](javascript:alert(1)) ![i](JavaScript:alert(2))");
        assert!(!html.to_ascii_lowercase().contains("javascript"));
        assert!(html.contains("<a class=\"underline\" href=\"\" target=\"_blank\" rel=\"noreferrer\">click</a>"));
        assert!(html.contains("<img src=\"\" alt=\"i\" />"));
    }

    #[test]
    fn test_url_escaping() {
        assert_eq!(escape_url("vbscript:msgbox"), "");
        assert_eq!(escape_url("data:text/html,x"), "");
        assert_eq!(escape_url("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
        assert_eq!(escape_url("notes.md"), "notes.md");
        assert_eq!(escape_url("https://a.b/?q=1&r=\"x\""), "https://a.b/?q=1&amp;r=%22x%22");
    }

    #[test]
    fn test_document_wraps_title() {
        let html = render_html_document("A & B", "text");
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<p style=\"white-space:pre-wrap\">text</p>"));
    }

    #[test]
    fn test_empty_body_renders_nothing() {
        assert_eq!(render_html(""), "");
    }

    proptest! {
        #[test]
        fn html_rendering_is_deterministic(body in "[#*>`|a-z \\n-]{0,120}") {
            prop_assert_eq!(render_html(&body), render_html(&body));
        }
    }
}
