//! A small raw-markup interpreter for the scratch frame.
//!
//! Tags are tokenized with a regex and mapped onto the preview style table.
//! Unknown tags are dropped, the contents of `script`, `style` and `title`
//! are skipped, and whitespace collapses outside `pre`. Nothing is sanitized;
//! this only ever draws styled text.

use std::sync::LazyLock;

use ratatui::style::Style;
use regex::{Captures, Regex};

use crate::preview::{
    Element, PINK, PreviewLine, PreviewSpan, display_width, element_style, layout_table,
    spans_width, split_hard_lines, truncate_text, wrap_spans,
};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^>"']|"[^"]*"|'[^']*')*?)(/?)>"#)
        .expect("valid tag regex")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("valid entity regex")
});

/// Interpret `source` as markup and lay it out `width` cells wide.
pub fn render_markup(source: &str, width: usize) -> Vec<PreviewLine> {
    let mut interp = Interpreter::new(width.max(1));
    let mut last = 0usize;
    for caps in TAG_RE.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        interp.text(&source[last..whole.start()]);
        last = whole.end();
        let Some(name) = caps.get(2) else {
            // Comment
            continue;
        };
        let name = name.as_str().to_ascii_lowercase();
        if caps.get(1).is_some_and(|m| !m.as_str().is_empty()) {
            interp.close(&name);
        } else {
            let self_closing = caps.get(4).is_some_and(|m| !m.as_str().is_empty());
            interp.open(&name, self_closing);
        }
    }
    interp.text(&source[last..]);
    interp.finish()
}

/// Replace the common named and numeric character references.
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => name
                    .strip_prefix("#x")
                    .or_else(|| name.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| name.strip_prefix('#').map(str::parse::<u32>))
                    .and_then(Result::ok)
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

#[derive(Debug, Default)]
struct TableState {
    rows: Vec<Vec<String>>,
    has_header: bool,
    in_cell: bool,
}

struct Interpreter {
    width: usize,
    lines: Vec<PreviewLine>,
    spans: Vec<PreviewSpan>,
    block: Element,
    /// Inline styles, each already patched over the one below.
    inline: Vec<Style>,
    pre: bool,
    skip: Option<String>,
    quote_depth: usize,
    /// One entry per open list; `Some(n)` is the next ordinal.
    lists: Vec<Option<usize>>,
    pending_marker: Option<String>,
    table: Option<TableState>,
}

impl Interpreter {
    const fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            spans: Vec::new(),
            block: Element::Paragraph,
            inline: Vec::new(),
            pre: false,
            skip: None,
            quote_depth: 0,
            lists: Vec::new(),
            pending_marker: None,
            table: None,
        }
    }

    fn current_style(&self) -> Style {
        self.inline
            .last()
            .copied()
            .unwrap_or_else(|| element_style(self.block).text)
    }

    fn push_inline(&mut self, element: Element) {
        let style = self.current_style().patch(element_style(element).text);
        self.inline.push(style);
    }

    fn text(&mut self, raw: &str) {
        if self.skip.is_some() || raw.is_empty() {
            return;
        }
        let decoded = decode_entities(raw);

        if let Some(table) = self.table.as_mut() {
            if table.in_cell
                && let Some(cell) = table.rows.last_mut().and_then(|row| row.last_mut())
            {
                cell.push_str(&collapse_whitespace(&decoded));
            }
            return;
        }

        let text = if self.pre {
            decoded
        } else {
            let collapsed = collapse_whitespace(&decoded);
            let at_break = self
                .spans
                .last()
                .is_none_or(|span| span.text().ends_with([' ', '\n']));
            if at_break {
                collapsed.trim_start().to_string()
            } else {
                collapsed
            }
        };
        if !text.is_empty() {
            let style = self.current_style();
            self.spans.push(PreviewSpan::new(text, style));
        }
    }

    fn open(&mut self, name: &str, self_closing: bool) {
        if self.skip.is_some() {
            return;
        }
        match name {
            "script" | "style" | "title" if !self_closing => self.skip = Some(name.to_string()),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush();
                let level = name[1..].parse::<u8>().unwrap_or(1);
                self.block = Element::heading(level);
                self.ensure_spacers(element_style(self.block).space_before);
            }
            "p" | "div" => {
                self.flush();
                self.block = Element::Paragraph;
            }
            "br" => {
                let style = self.current_style();
                self.spans.push(PreviewSpan::new("\n", style));
            }
            "hr" => {
                self.flush();
                let style = element_style(Element::Rule);
                self.ensure_spacers(style.space_before);
                let mut row = self.prefix();
                let rule_width = self.width.saturating_sub(spans_width(&row));
                row.push(PreviewSpan::new("━".repeat(rule_width), style.text));
                self.lines.push(PreviewLine::new(row));
                self.ensure_spacers(style.space_after);
            }
            "pre" => {
                self.flush();
                self.ensure_spacers(element_style(Element::CodeBlock).space_before);
                self.pre = true;
                self.block = Element::CodeBlock;
            }
            "blockquote" => {
                self.flush();
                self.ensure_spacers(element_style(Element::BlockQuote).space_before);
                self.quote_depth += 1;
            }
            "ul" | "ol" => {
                self.flush();
                self.lists.push((name == "ol").then_some(1));
            }
            "li" => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let marker = format!("{next}. ");
                        *next += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.pending_marker = Some(marker);
            }
            "table" => {
                self.flush();
                self.table = Some(TableState::default());
            }
            "tr" => {
                if let Some(table) = self.table.as_mut() {
                    table.rows.push(Vec::new());
                }
            }
            "th" | "td" => {
                if let Some(table) = self.table.as_mut() {
                    if table.rows.is_empty() {
                        table.rows.push(Vec::new());
                    }
                    if name == "th" && table.rows.len() == 1 {
                        table.has_header = true;
                    }
                    if let Some(row) = table.rows.last_mut() {
                        row.push(String::new());
                    }
                    table.in_cell = true;
                }
            }
            "strong" | "b" => self.push_inline(Element::Strong),
            "em" | "i" => self.push_inline(Element::Emphasis),
            "del" | "s" | "strike" => self.push_inline(Element::Strikethrough),
            "code" if !self.pre => self.push_inline(Element::InlineCode),
            "a" => self.push_inline(Element::Link),
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        if let Some(skipped) = &self.skip {
            if skipped == name {
                self.skip = None;
            }
            return;
        }
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "div" => {
                self.flush();
                self.block = Element::Paragraph;
            }
            "pre" => {
                self.flush();
                self.pre = false;
                self.block = Element::Paragraph;
                self.ensure_spacers(element_style(Element::CodeBlock).space_after);
            }
            "blockquote" => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.ensure_spacers(element_style(Element::BlockQuote).space_after);
            }
            "ul" | "ol" => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.ensure_spacers(element_style(Element::UnorderedList).space_after);
                }
            }
            "li" => self.flush(),
            "th" | "td" => {
                if let Some(table) = self.table.as_mut() {
                    table.in_cell = false;
                }
            }
            "table" => self.emit_table(),
            "strong" | "b" | "em" | "i" | "del" | "s" | "strike" | "a" => {
                self.inline.pop();
            }
            "code" if !self.pre => {
                self.inline.pop();
            }
            _ => {}
        }
    }

    fn prefix(&self) -> Vec<PreviewSpan> {
        let mut prefix = Vec::new();
        if let Some(gutter) = element_style(Element::BlockQuote).gutter {
            for _ in 0..self.quote_depth {
                prefix.push(PreviewSpan::new(gutter, Style::new().fg(PINK)));
            }
        }
        let indent = element_style(Element::UnorderedList).indent;
        for _ in 0..self.lists.len() {
            prefix.push(PreviewSpan::new(" ".repeat(indent), Style::new()));
        }
        prefix
    }

    /// Emit the pending inline text as rows of the current block.
    fn flush(&mut self) {
        let spans = std::mem::take(&mut self.spans);
        let marker = self.pending_marker.take();
        if spans.is_empty() && marker.is_none() {
            return;
        }
        let style = element_style(self.block);
        let prefix = self.prefix();

        if self.pre {
            let inner = self.width.saturating_sub(spans_width(&prefix) + 2 * style.indent).max(1);
            let pad = " ".repeat(style.indent);
            let text: String = spans.iter().map(PreviewSpan::text).collect();
            for raw in text.trim_matches('\n').split('\n') {
                let clipped = truncate_text(raw, inner);
                let fill = inner.saturating_sub(display_width(&clipped));
                let mut row = prefix.clone();
                row.push(PreviewSpan::new(
                    format!("{pad}{clipped}{}{pad}", " ".repeat(fill)),
                    style.text,
                ));
                self.lines.push(PreviewLine::new(row));
            }
            return;
        }

        let mut prefix_first = prefix.clone();
        let mut prefix_next = prefix.clone();
        if let Some(marker) = marker {
            prefix_next.push(PreviewSpan::new(" ".repeat(display_width(&marker)), Style::new()));
            prefix_first.push(PreviewSpan::new(marker, element_style(Element::ListItem).text));
        }
        for (idx, hard) in split_hard_lines(&spans).iter().enumerate() {
            let first = if idx == 0 { &prefix_first } else { &prefix_next };
            for row in wrap_spans(hard, self.width, first, &prefix_next) {
                self.lines.push(PreviewLine::new(row));
            }
        }

        if style.rule_below {
            let mut row = prefix;
            let rule_width = self.width.saturating_sub(spans_width(&row));
            row.push(PreviewSpan::new("─".repeat(rule_width), Style::new().fg(PINK)));
            self.lines.push(PreviewLine::new(row));
        }
        if self.lists.is_empty() {
            self.ensure_spacers(style.space_after);
        }
    }

    fn emit_table(&mut self) {
        let Some(table) = self.table.take() else {
            return;
        };
        let style = element_style(Element::Table);
        let prefix = self.prefix();
        let available = self.width.saturating_sub(spans_width(&prefix));
        let rows = layout_table(table.rows, table.has_header, available);
        if rows.is_empty() {
            return;
        }
        self.ensure_spacers(style.space_before);
        for spans in rows {
            let mut row = prefix.clone();
            row.extend(spans);
            self.lines.push(PreviewLine::new(row));
        }
        self.ensure_spacers(style.space_after);
    }

    fn ensure_spacers(&mut self, count: usize) {
        if self.lines.is_empty() {
            return;
        }
        let existing = self
            .lines
            .iter()
            .rev()
            .take_while(|line| line.is_spacer())
            .count();
        for _ in existing..count {
            self.lines.push(PreviewLine::spacer(Vec::new()));
        }
    }

    fn finish(mut self) -> Vec<PreviewLine> {
        self.flush();
        self.emit_table();
        while self.lines.last().is_some_and(PreviewLine::is_spacer) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Collapse runs of ASCII whitespace to one space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_ws = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{GREEN, MIDNIGHT_BLUE};

    fn texts(lines: &[PreviewLine]) -> Vec<String> {
        lines.iter().map(PreviewLine::text).collect()
    }

    #[test]
    fn test_default_scratch_text_renders_heading() {
        let lines = render_markup("<h1>Hello World</h1>", 20);
        assert_eq!(texts(&lines), vec!["Hello World".to_string(), "─".repeat(20)]);
        assert_eq!(lines[1].spans()[0].style().fg, Some(PINK));
    }

    #[test]
    fn test_unknown_tags_are_dropped() {
        let lines = render_markup("<blink>hi</blink> <x-foo>there</x-foo>", 40);
        assert_eq!(texts(&lines), vec!["hi there"]);
    }

    #[test]
    fn test_script_and_style_contents_are_skipped() {
        let lines = render_markup("<style>p{}</style><script>alert(1)</script><p>ok</p>", 40);
        assert_eq!(texts(&lines), vec!["ok"]);
    }

    #[test]
    fn test_whitespace_collapses_outside_pre() {
        let lines = render_markup("<p>a \n   b</p>", 40);
        assert_eq!(texts(&lines), vec!["a b"]);
    }

    #[test]
    fn test_pre_keeps_line_breaks_on_midnight_blue() {
        let lines = render_markup("<pre>a\n  b</pre>", 10);
        assert_eq!(texts(&lines), vec![" a        ", "   b      "]);
        assert_eq!(lines[0].spans()[0].style().bg, Some(MIDNIGHT_BLUE));
    }

    #[test]
    fn test_entities_decode() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt; &#65;&#x42; &bogus;"), "a & b <c> AB &bogus;");
    }

    #[test]
    fn test_strong_and_b_are_green() {
        let lines = render_markup("<p><b>x</b> <strong>y</strong></p>", 40);
        let greens = lines[0]
            .spans()
            .iter()
            .filter(|s| s.style().fg == Some(GREEN))
            .count();
        assert_eq!(greens, 2);
    }

    #[test]
    fn test_lists_render_markers() {
        let lines = render_markup("<ul><li>a</li><li>b</li></ul><ol><li>c</li></ol>", 40);
        assert_eq!(texts(&lines), vec!["  • a", "  • b", "", "  1. c"]);
    }

    #[test]
    fn test_br_breaks_line() {
        let lines = render_markup("one<br>two", 40);
        assert_eq!(texts(&lines), vec!["one", "two"]);
    }

    #[test]
    fn test_table_uses_centered_layout() {
        let lines = render_markup("<table><tr><th>h</th></tr><tr><td>v</td></tr></table>", 9);
        assert_eq!(texts(&lines), vec!["  ┌───┐", "  │ h │", "  ├───┤", "  │ v │", "  └───┘"]);
    }

    #[test]
    fn test_comments_are_ignored() {
        let lines = render_markup("a<!-- <h1>no</h1> -->b", 40);
        assert_eq!(texts(&lines), vec!["ab"]);
    }

    #[test]
    fn test_empty_source_renders_nothing() {
        assert!(render_markup("", 40).is_empty());
    }
}
