//! Markdown to styled terminal rows.
//!
//! Block nodes are classified into an [`Element`] and handed to the renderer
//! registered for that element; inline nodes are flattened into styled spans
//! using the same style table.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};
use ratatui::style::Style;

use super::theme::{Element, PINK, element_style};
use super::types::{PreviewLine, PreviewLink, PreviewSpan, RenderedPreview};
use super::wrap::{
    display_width, spans_width, split_hard_lines, truncate_spans, truncate_text, wrap_spans,
};

/// comrak options shared by the terminal and HTML renditions.
pub fn markdown_options() -> Options {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options
}

/// Render a markdown body for a pane `width` cells wide.
///
/// Never fails: comrak accepts any input, and an empty body yields no rows.
pub fn render_preview(body: &str, width: usize) -> RenderedPreview {
    let width = width.max(1);
    if body.trim().is_empty() {
        return RenderedPreview::new(Vec::new(), Vec::new(), width);
    }

    let arena = Arena::new();
    let options = markdown_options();
    let root = parse_document(&arena, body, &options);

    let mut renderer = Renderer::new(width);
    renderer.render_children(root);
    let preview = renderer.finish();
    tracing::debug!(
        lines = preview.line_count(),
        links = preview.links().len(),
        width,
        "rendered preview"
    );
    preview
}

/// Map a node to the element whose style override applies to it.
pub fn classify(value: &NodeValue) -> Option<Element> {
    match value {
        NodeValue::Heading(heading) => Some(Element::heading(heading.level)),
        NodeValue::Paragraph | NodeValue::HtmlBlock(_) => Some(Element::Paragraph),
        NodeValue::Code(_) => Some(Element::InlineCode),
        NodeValue::Strong => Some(Element::Strong),
        NodeValue::Emph => Some(Element::Emphasis),
        NodeValue::Strikethrough => Some(Element::Strikethrough),
        NodeValue::List(list) => Some(match list.list_type {
            ListType::Bullet => Element::UnorderedList,
            ListType::Ordered => Element::OrderedList,
        }),
        NodeValue::Item(_) | NodeValue::TaskItem(_) => Some(Element::ListItem),
        NodeValue::BlockQuote => Some(Element::BlockQuote),
        NodeValue::CodeBlock(_) => Some(Element::CodeBlock),
        NodeValue::ThematicBreak => Some(Element::Rule),
        NodeValue::Link(_) => Some(Element::Link),
        NodeValue::Table(_) => Some(Element::Table),
        NodeValue::TableCell => Some(Element::TableCell),
        _ => None,
    }
}

type BlockRenderer = for<'a> fn(&mut Renderer, &'a AstNode<'a>, Element);

/// Renderer registered for each element.
///
/// Inline elements only reach this table when they appear outside a
/// paragraph, in which case they render like one.
fn renderer_for(element: Element) -> BlockRenderer {
    match element {
        Element::Heading1
        | Element::Heading2
        | Element::Heading3
        | Element::Heading4
        | Element::Heading5
        | Element::Heading6 => Renderer::heading,
        Element::Paragraph
        | Element::InlineCode
        | Element::Strong
        | Element::Emphasis
        | Element::Strikethrough
        | Element::Link => Renderer::paragraph,
        Element::UnorderedList | Element::OrderedList => Renderer::list,
        Element::ListItem => Renderer::item,
        Element::BlockQuote => Renderer::block_quote,
        Element::CodeBlock => Renderer::code_block,
        Element::Rule => Renderer::rule,
        Element::Table | Element::TableHeader | Element::TableCell => Renderer::table,
    }
}

struct Renderer {
    width: usize,
    lines: Vec<PreviewLine>,
    urls: Vec<String>,
    /// Spans drawn in front of every row (quote gutters, list indents).
    prefix: Vec<PreviewSpan>,
    /// Marker for the next list item row.
    pending_marker: Option<String>,
}

impl Renderer {
    const fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            urls: Vec::new(),
            prefix: Vec::new(),
            pending_marker: None,
        }
    }

    fn render_children<'a>(&mut self, node: &'a AstNode<'a>) {
        for child in node.children() {
            self.render_block(child);
        }
    }

    fn render_block<'a>(&mut self, node: &'a AstNode<'a>) {
        let element = classify(&node.data.borrow().value);
        match element {
            Some(element) => renderer_for(element)(self, node, element),
            None => self.render_children(node),
        }
    }

    // --- Block renderers ---

    fn heading<'a>(&mut self, node: &'a AstNode<'a>, element: Element) {
        let style = element_style(element);
        self.ensure_spacers(style.space_before);
        let spans = self.inline_spans(node, style.text);
        self.push_wrapped(&spans);
        if style.rule_below {
            let rule_width = self.width.saturating_sub(spans_width(&self.prefix));
            let mut row = self.prefix.clone();
            row.push(PreviewSpan::new("─".repeat(rule_width), Style::new().fg(PINK)));
            self.lines.push(PreviewLine::new(row));
        }
        self.ensure_spacers(style.space_after);
    }

    fn paragraph<'a>(&mut self, node: &'a AstNode<'a>, element: Element) {
        let style = element_style(element);
        let spans = self.inline_spans(node, element_style(Element::Paragraph).text);
        self.push_wrapped(&spans);
        if self.pending_marker.is_none() && !self.in_list() {
            self.ensure_spacers(style.space_after);
        }
    }

    fn list<'a>(&mut self, node: &'a AstNode<'a>, element: Element) {
        let style = element_style(element);
        let NodeValue::List(list) = node.data.borrow().value.clone() else {
            return;
        };
        let nested = self.in_list();
        self.prefix.push(PreviewSpan::new(" ".repeat(style.indent), Style::new()));
        let count = node.children().count();
        let number_width = (list.start + count.saturating_sub(1)).to_string().len();
        let delimiter = match list.delimiter {
            comrak::nodes::ListDelimType::Paren => ')',
            comrak::nodes::ListDelimType::Period => '.',
        };

        for (index, child) in node.children().enumerate() {
            let marker = match list.list_type {
                ListType::Bullet => "• ".to_string(),
                ListType::Ordered => {
                    format!("{:>number_width$}{delimiter} ", list.start + index)
                }
            };
            self.pending_marker = Some(marker);
            self.render_block(child);
            self.pending_marker = None;
        }

        self.prefix.pop();
        if !nested {
            self.ensure_spacers(style.space_after);
        }
    }

    fn item<'a>(&mut self, node: &'a AstNode<'a>, _element: Element) {
        if let NodeValue::TaskItem(checked) = node.data.borrow().value {
            let box_marker = if checked.is_some() { "☑ " } else { "☐ " };
            self.pending_marker = Some(box_marker.to_string());
        }
        let marker = self.pending_marker.clone().unwrap_or_default();
        let had_content = node.children().next().is_some();
        for child in node.children() {
            self.render_block(child);
        }
        // An empty item still shows its marker
        if !had_content && self.pending_marker.is_some() {
            let mut row = self.prefix.clone();
            row.push(PreviewSpan::new(marker, element_style(Element::ListItem).text));
            self.lines.push(PreviewLine::new(row));
            self.pending_marker = None;
        }
    }

    fn block_quote<'a>(&mut self, node: &'a AstNode<'a>, element: Element) {
        let style = element_style(element);
        self.ensure_spacers(style.space_before);
        let start = self.lines.len();
        self.prefix.push(PreviewSpan::new(
            style.gutter.unwrap_or_default(),
            Style::new().fg(PINK),
        ));
        self.render_children(node);
        while self.lines.len() > start && self.lines.last().is_some_and(PreviewLine::is_spacer) {
            self.lines.pop();
        }
        self.prefix.pop();
        self.ensure_spacers(style.space_after);
    }

    fn code_block<'a>(&mut self, node: &'a AstNode<'a>, element: Element) {
        let style = element_style(element);
        let data = node.data.borrow();
        let NodeValue::CodeBlock(block) = &data.value else {
            return;
        };
        self.ensure_spacers(style.space_before);
        let pad = " ".repeat(style.indent);
        let inner = self
            .width
            .saturating_sub(spans_width(&self.prefix) + 2 * style.indent)
            .max(1);
        let literal = block.literal.trim_end_matches('\n');
        let padding_row = " ".repeat(inner + 2 * style.indent);

        let push_row = |lines: &mut Vec<PreviewLine>, prefix: &[PreviewSpan], text: String| {
            let mut row = prefix.to_vec();
            row.push(PreviewSpan::new(text, style.text));
            lines.push(PreviewLine::new(row));
        };

        push_row(&mut self.lines, &self.prefix, padding_row.clone());
        for raw in literal.split('\n') {
            let expanded = raw.replace('\t', "    ");
            let text = truncate_text(&expanded, inner);
            let fill = inner.saturating_sub(display_width(&text));
            push_row(
                &mut self.lines,
                &self.prefix,
                format!("{pad}{text}{}{pad}", " ".repeat(fill)),
            );
        }
        push_row(&mut self.lines, &self.prefix, padding_row);
        self.ensure_spacers(style.space_after);
    }

    fn rule<'a>(&mut self, _node: &'a AstNode<'a>, element: Element) {
        let style = element_style(element);
        self.ensure_spacers(style.space_before);
        let rule_width = self.width.saturating_sub(spans_width(&self.prefix));
        let mut row = self.prefix.clone();
        row.push(PreviewSpan::new("━".repeat(rule_width), style.text));
        self.lines.push(PreviewLine::new(row));
        self.ensure_spacers(style.space_after);
    }

    fn table<'a>(&mut self, node: &'a AstNode<'a>, element: Element) {
        let style = element_style(element);
        let (rows, has_header) = collect_table_rows(node);
        let available = self.width.saturating_sub(spans_width(&self.prefix));
        let table = layout_table(rows, has_header, available);
        if table.is_empty() {
            return;
        }
        self.ensure_spacers(style.space_before);
        for spans in table {
            let mut row = self.prefix.clone();
            row.extend(spans);
            self.lines.push(PreviewLine::new(row));
        }
        self.ensure_spacers(style.space_after);
    }

    // --- Rows and spacing ---

    fn in_list(&self) -> bool {
        self.pending_marker.is_some()
            || self
                .prefix
                .iter()
                .any(|span| !span.text().is_empty() && span.text().trim().is_empty())
    }

    /// Wrap spans into rows behind the current prefix, honouring hard breaks.
    fn push_wrapped(&mut self, spans: &[PreviewSpan]) {
        let item_style = element_style(Element::ListItem).text;
        let hanging = self
            .pending_marker
            .as_ref()
            .map_or(0, |marker| display_width(marker));
        let mut prefix_next = self.prefix.clone();
        if hanging > 0 {
            prefix_next.push(PreviewSpan::new(" ".repeat(hanging), Style::new()));
        }

        for hard in split_hard_lines(spans) {
            let mut prefix_first = self.prefix.clone();
            if let Some(marker) = self.pending_marker.take() {
                prefix_first.push(PreviewSpan::new(marker, item_style));
            } else if hanging > 0 {
                prefix_first = prefix_next.clone();
            }
            for row in wrap_spans(&hard, self.width, &prefix_first, &prefix_next) {
                self.lines.push(PreviewLine::new(row));
            }
        }
    }

    /// Make sure at least `count` spacer rows end the output so far.
    fn ensure_spacers(&mut self, count: usize) {
        // Margins never push content down from the top of the pane
        if self.lines.is_empty() {
            return;
        }
        let existing = self
            .lines
            .iter()
            .rev()
            .take_while(|line| line.is_spacer())
            .count();
        let gutter: Vec<PreviewSpan> = self
            .prefix
            .iter()
            .filter(|span| !span.text().trim().is_empty())
            .cloned()
            .collect();
        for _ in existing..count {
            self.lines.push(PreviewLine::spacer(gutter.clone()));
        }
    }

    // --- Inline content ---

    fn inline_spans<'a>(&mut self, node: &'a AstNode<'a>, base: Style) -> Vec<PreviewSpan> {
        let mut spans = Vec::new();
        self.collect_inline(node, base, None, &mut spans);
        spans
    }

    fn collect_inline<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        style: Style,
        link: Option<usize>,
        spans: &mut Vec<PreviewSpan>,
    ) {
        match &node.data.borrow().value {
            NodeValue::List(_) | NodeValue::Item(_) => {}
            NodeValue::Text(text) => {
                spans.push(PreviewSpan::new(text.clone(), style).with_link(link));
            }
            NodeValue::Code(code) => {
                let code_style = style.patch(element_style(Element::InlineCode).text);
                spans.push(PreviewSpan::new(format!(" {} ", code.literal), code_style).with_link(link));
            }
            NodeValue::HtmlInline(raw) => {
                spans.push(PreviewSpan::new(raw.clone(), style).with_link(link));
            }
            NodeValue::HtmlBlock(block) => {
                let literal = block.literal.trim_end_matches('\n');
                spans.push(PreviewSpan::new(literal, style).with_link(link));
            }
            NodeValue::SoftBreak | NodeValue::LineBreak => {
                spans.push(PreviewSpan::new("\n", style).with_link(link));
            }
            NodeValue::Link(target) => {
                self.urls.push(target.url.clone());
                let id = Some(self.urls.len() - 1);
                let next = style.patch(element_style(Element::Link).text);
                for child in node.children() {
                    self.collect_inline(child, next, id, spans);
                }
            }
            value => {
                let next = match classify(value) {
                    Some(element @ (Element::Strong | Element::Emphasis | Element::Strikethrough)) => {
                        style.patch(element_style(element).text)
                    }
                    _ => style,
                };
                for child in node.children() {
                    self.collect_inline(child, next, link, spans);
                }
            }
        }
    }

    /// Trim trailing spacers and resolve link ids to [`PreviewLink`]s.
    fn finish(mut self) -> RenderedPreview {
        while self.lines.last().is_some_and(PreviewLine::is_spacer) {
            self.lines.pop();
        }

        let mut remap: Vec<Option<usize>> = vec![None; self.urls.len()];
        let mut links: Vec<PreviewLink> = Vec::new();
        let mut last_line: Vec<usize> = Vec::new();
        for (line_idx, line) in self.lines.iter_mut().enumerate() {
            for span in line.spans_mut() {
                let Some(id) = span.link() else {
                    continue;
                };
                let idx = match remap[id] {
                    Some(idx) => idx,
                    None => {
                        links.push(PreviewLink {
                            text: String::new(),
                            url: self.urls[id].clone(),
                            line: line_idx,
                        });
                        last_line.push(line_idx);
                        remap[id] = Some(links.len() - 1);
                        links.len() - 1
                    }
                };
                let link = &mut links[idx];
                if last_line[idx] != line_idx && !link.text.ends_with(' ') {
                    link.text.push(' ');
                }
                last_line[idx] = line_idx;
                link.text.push_str(span.text());
                span.set_link(Some(idx));
            }
        }
        for link in &mut links {
            link.text = link.text.trim().to_string();
        }

        RenderedPreview::new(self.lines, links, self.width)
    }
}

/// Lay out a bordered table centered in `available` cells.
///
/// Short rows are padded with empty cells; columns shrink from the widest
/// until the table fits.
pub(crate) fn layout_table(
    mut rows: Vec<Vec<String>>,
    has_header: bool,
    available: usize,
) -> Vec<Vec<PreviewSpan>> {
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }
    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(display_width(cell));
        }
    }

    // Row width is 1 + sum(col_width + 3).
    let available = available.max(4);
    while 1 + col_widths.iter().sum::<usize>() + 3 * num_cols > available {
        let Some((widest, _)) = col_widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if col_widths[widest] <= 1 {
            break;
        }
        col_widths[widest] -= 1;
    }
    let table_width = 1 + col_widths.iter().sum::<usize>() + 3 * num_cols;
    let margin = " ".repeat(available.saturating_sub(table_width) / 2);
    let border = element_style(Element::Table).text;
    let border_row = |text: String| {
        vec![
            PreviewSpan::new(margin.clone(), Style::new()),
            PreviewSpan::new(text, border),
        ]
    };

    let mut out = vec![border_row(table_border(&col_widths, '┌', '┬', '┐'))];
    for (idx, cells) in rows.iter().enumerate() {
        let cell_element = if has_header && idx == 0 {
            Element::TableHeader
        } else {
            Element::TableCell
        };
        let mut row = vec![PreviewSpan::new(margin.clone(), Style::new())];
        row.extend(table_row(cells, &col_widths, border, element_style(cell_element).text));
        out.push(row);
        if has_header && idx == 0 && rows.len() > 1 {
            out.push(border_row(table_border(&col_widths, '├', '┼', '┤')));
        }
    }
    out.push(border_row(table_border(&col_widths, '└', '┴', '┘')));
    out
}

fn collect_table_rows<'a>(table: &'a AstNode<'a>) -> (Vec<Vec<String>>, bool) {
    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table.children() {
        let NodeValue::TableRow(header) = row_node.data.borrow().value else {
            continue;
        };
        has_header |= header;
        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }
    (rows, has_header)
}

fn table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        if idx + 1 < widths.len() {
            out.push(middle);
        }
    }
    out.push(right);
    out
}

/// One table row; every cell is centered.
fn table_row(cells: &[String], widths: &[usize], border: Style, text: Style) -> Vec<PreviewSpan> {
    let mut out = vec![PreviewSpan::new("│", border)];
    for (idx, width) in widths.iter().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), *width);
        let padding = width.saturating_sub(display_width(&content));
        let left = padding / 2;
        let right = padding - left;
        out.push(PreviewSpan::new(" ".repeat(left + 1), Style::new()));
        out.push(PreviewSpan::new(content, text));
        out.push(PreviewSpan::new(" ".repeat(right + 1), Style::new()));
        out.push(PreviewSpan::new("│", border));
    }
    out
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) | NodeValue::HtmlInline(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

/// Clip rendered rows to `width` cells; used when the pane shrinks between
/// renders.
pub fn clip_line(line: &PreviewLine, width: usize) -> Vec<PreviewSpan> {
    truncate_spans(line.spans(), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::theme::{GREEN, MIDNIGHT_BLUE};
    use proptest::prelude::*;

    fn texts(preview: &RenderedPreview) -> Vec<String> {
        preview.lines().iter().map(PreviewLine::text).collect()
    }

    #[test]
    fn test_empty_body_renders_no_lines() {
        assert!(render_preview("", 40).is_empty());
        assert!(render_preview("   \n\n", 40).is_empty());
    }

    #[test]
    fn test_h1_draws_pink_rule_below() {
        let preview = render_preview("# Hello", 20);
        let lines = texts(&preview);
        assert_eq!(lines[0], "Hello");
        assert_eq!(lines[1], "─".repeat(20));
        let rule_span = &preview.lines()[1].spans()[0];
        assert_eq!(rule_span.style().fg, Some(PINK));
    }

    #[test]
    fn test_h3_has_padding_above_and_no_rule() {
        let preview = render_preview("text\n\n### Three", 20);
        let lines = texts(&preview);
        assert_eq!(lines, vec!["text", "", "", "Three"]);
    }

    #[test]
    fn test_paragraph_keeps_soft_breaks() {
        let preview = render_preview("one\ntwo", 40);
        assert_eq!(texts(&preview), vec!["one", "two"]);
    }

    #[test]
    fn test_inline_code_is_padded_on_midnight_blue() {
        let preview = render_preview("run `ls` now", 40);
        let code = preview.lines()[0]
            .spans()
            .iter()
            .find(|s| s.text() == " ls ")
            .expect("code span");
        assert_eq!(code.style().bg, Some(MIDNIGHT_BLUE));
    }

    #[test]
    fn test_strong_is_green() {
        let preview = render_preview("a **b** c", 40);
        let strong = preview.lines()[0]
            .spans()
            .iter()
            .find(|s| s.text() == "b")
            .expect("strong span");
        assert_eq!(strong.style().fg, Some(GREEN));
    }

    #[test]
    fn test_bullet_list_is_indented_with_disc_markers() {
        let preview = render_preview("- one\n- two", 40);
        assert_eq!(texts(&preview), vec!["  • one", "  • two"]);
    }

    #[test]
    fn test_ordered_list_uses_decimal_markers() {
        let preview = render_preview("1. one\n2. two", 40);
        assert_eq!(texts(&preview), vec!["  1. one", "  2. two"]);
    }

    #[test]
    fn test_nested_list_indents_further() {
        let preview = render_preview("- a\n  - b", 40);
        assert_eq!(texts(&preview), vec!["  • a", "    • b"]);
    }

    #[test]
    fn test_task_items_show_boxes() {
        let preview = render_preview("- [x] done\n- [ ] todo", 40);
        assert_eq!(texts(&preview), vec!["  ☑ done", "  ☐ todo"]);
    }

    #[test]
    fn test_block_quote_has_pink_gutter_and_margins() {
        let preview = render_preview("before\n\n> quoted\n\nafter", 40);
        let lines = texts(&preview);
        assert_eq!(lines, vec!["before", "", "┃ quoted", "", "after"]);
        assert_eq!(preview.lines()[2].spans()[0].style().fg, Some(PINK));
    }

    #[test]
    fn test_code_block_fills_width_with_background() {
        let preview = render_preview("```\nlet x = 1;\n```", 20);
        let lines = texts(&preview);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], format!(" let x = 1;{} ", " ".repeat(8)));
        for line in preview.lines() {
            assert_eq!(line.spans()[0].style().bg, Some(MIDNIGHT_BLUE));
            assert_eq!(line.width(), 20);
        }
    }

    #[test]
    fn test_rule_spans_the_width() {
        let preview = render_preview("a\n\n---\n\nb", 10);
        assert!(texts(&preview).contains(&"━".repeat(10)));
    }

    #[test]
    fn test_table_is_centered_with_centered_cells() {
        let preview = render_preview("| a | bb |\n|---|---|\n| ccc | d |", 30);
        let lines = texts(&preview);
        // Table is 12 cells wide; (30 - 12) / 2 = 9 cells of margin
        assert_eq!(lines[0], format!("{}┌─────┬────┐", " ".repeat(9)));
        assert_eq!(lines[1], format!("{}│  a  │ bb │", " ".repeat(9)));
        assert_eq!(lines[2], format!("{}├─────┼────┤", " ".repeat(9)));
        assert_eq!(lines[3], format!("{}│ ccc │ d  │", " ".repeat(9)));
        assert_eq!(lines[4], format!("{}└─────┴────┘", " ".repeat(9)));
        let header = preview.lines()[1]
            .spans()
            .iter()
            .find(|s| s.text() == "a")
            .expect("header cell");
        assert_eq!(header.style().fg, Some(PINK));
    }

    #[test]
    fn test_links_are_underlined_and_recorded() {
        let preview = render_preview("see [docs](https://example.com) here", 40);
        let links = preview.links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "docs");
        assert_eq!(links[0].url, "https://example.com");
        assert_eq!(links[0].line, 0);
        assert_eq!(preview.link_at(0, 4).map(|l| l.url.as_str()), Some("https://example.com"));
        assert!(preview.link_at(0, 0).is_none());
    }

    #[test]
    fn test_autolinks_are_recognized() {
        let preview = render_preview("visit https://example.org today", 60);
        assert_eq!(preview.links().len(), 1);
        assert_eq!(preview.links()[0].url, "https://example.org");
    }

    #[test]
    fn test_raw_html_is_shown_literally() {
        let preview = render_preview("<b>bold</b>", 40);
        assert_eq!(texts(&preview), vec!["<b>bold</b>"]);
    }

    #[test]
    fn test_classify_maps_lists_by_type() {
        let arena = Arena::new();
        let root = parse_document(&arena, "- a\n\n1. b", &markdown_options());
        let kinds: Vec<_> = root
            .children()
            .filter_map(|n| classify(&n.data.borrow().value))
            .collect();
        assert_eq!(kinds, vec![Element::UnorderedList, Element::OrderedList]);
    }

    proptest! {
        #[test]
        fn rendering_is_deterministic(body in "[#*>`|a-z \\n-]{0,120}", width in 8..80usize) {
            prop_assert_eq!(render_preview(&body, width), render_preview(&body, width));
        }

        #[test]
        fn rendering_never_panics(body in "\\PC{0,200}", width in 1..100usize) {
            let _ = render_preview(&body, width);
        }
    }
}
