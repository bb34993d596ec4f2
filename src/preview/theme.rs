//! Element style overrides for the preview pane.
//!
//! One row per overridable markdown element. The terminal renderer reads the
//! [`Style`] and spacing fields; the HTML rendition reads the tag, class and
//! inline CSS. Both look rows up through [`element_style`].

use ratatui::style::{Color, Modifier, Style};

/// Accent used for rules, borders and header cells (`#ffc4dd`).
pub const PINK: Color = Color::Rgb(0xff, 0xc4, 0xdd);
/// Code background (`#1a1d38`).
pub const MIDNIGHT_BLUE: Color = Color::Rgb(0x1a, 0x1d, 0x38);
/// Strong text (`#22c55e`).
pub const GREEN: Color = Color::Rgb(0x22, 0xc5, 0x5e);
/// Body text.
pub const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);

/// Markdown elements that carry a style override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Paragraph,
    InlineCode,
    Strong,
    Emphasis,
    Strikethrough,
    UnorderedList,
    OrderedList,
    ListItem,
    BlockQuote,
    CodeBlock,
    Rule,
    Link,
    Table,
    TableHeader,
    TableCell,
}

impl Element {
    pub const COUNT: usize = 21;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::Heading4,
        Self::Heading5,
        Self::Heading6,
        Self::Paragraph,
        Self::InlineCode,
        Self::Strong,
        Self::Emphasis,
        Self::Strikethrough,
        Self::UnorderedList,
        Self::OrderedList,
        Self::ListItem,
        Self::BlockQuote,
        Self::CodeBlock,
        Self::Rule,
        Self::Link,
        Self::Table,
        Self::TableHeader,
        Self::TableCell,
    ];

    /// Heading element for a level; levels past 6 use the level-6 row.
    pub const fn heading(level: u8) -> Self {
        match level {
            0 | 1 => Self::Heading1,
            2 => Self::Heading2,
            3 => Self::Heading3,
            4 => Self::Heading4,
            5 => Self::Heading5,
            _ => Self::Heading6,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_heading(self) -> bool {
        matches!(
            self,
            Self::Heading1
                | Self::Heading2
                | Self::Heading3
                | Self::Heading4
                | Self::Heading5
                | Self::Heading6
        )
    }
}

/// Style override for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementStyle {
    /// HTML tag name.
    pub tag: &'static str,
    /// Class attribute for the HTML rendition, empty for none.
    pub class: &'static str,
    /// Inline CSS for the HTML rendition, empty for none.
    pub css: &'static str,
    /// Terminal text style, patched over the enclosing style.
    pub text: Style,
    /// Blank rows kept above the block.
    pub space_before: usize,
    /// Blank rows kept below the block.
    pub space_after: usize,
    /// Left indent in cells for nested content.
    pub indent: usize,
    /// Draw a pink rule under the block.
    pub rule_below: bool,
    /// Left gutter drawn in front of every row of the block.
    pub gutter: Option<&'static str>,
}

impl ElementStyle {
    const fn new(tag: &'static str, css: &'static str, text: Style) -> Self {
        Self {
            tag,
            class: "",
            css,
            text,
            space_before: 0,
            space_after: 0,
            indent: 0,
            rule_below: false,
            gutter: None,
        }
    }

    const fn class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }

    const fn spacing(mut self, before: usize, after: usize) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    const fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    const fn rule_below(mut self) -> Self {
        self.rule_below = true;
        self
    }

    const fn gutter(mut self, gutter: &'static str) -> Self {
        self.gutter = Some(gutter);
        self
    }
}

const HEADING: Style = Style::new().fg(WHITE).add_modifier(Modifier::BOLD);

/// Rows are in [`Element::ALL`] order.
static STYLE_TABLE: [ElementStyle; Element::COUNT] = [
    ElementStyle::new(
        "h1",
        "padding-bottom:.2em;font-size:1.7em;border-bottom:1px solid #ffc4dd",
        HEADING,
    )
    .spacing(0, 1)
    .rule_below(),
    ElementStyle::new(
        "h2",
        "padding-top:2.3em;padding-bottom:.3em;font-size:1.5em;border-bottom:1px solid #ffc4dd",
        HEADING,
    )
    .spacing(2, 1)
    .rule_below(),
    ElementStyle::new(
        "h3",
        "padding-top:2.25em;padding-bottom:.5em;font-size:1.3em",
        HEADING,
    )
    .spacing(2, 1),
    ElementStyle::new(
        "h4",
        "padding-top:2.25em;padding-bottom:.5em;font-size:1.1em",
        HEADING,
    )
    .spacing(2, 1),
    ElementStyle::new(
        "h5",
        "padding-top:2.25em;padding-bottom:.5em;font-size:1em",
        Style::new().fg(WHITE).add_modifier(Modifier::BOLD.union(Modifier::ITALIC)),
    )
    .spacing(2, 1),
    ElementStyle::new(
        "h6",
        "padding-top:2.25em;padding-bottom:.5em;font-size:0.9em",
        Style::new().fg(WHITE).add_modifier(Modifier::ITALIC),
    )
    .spacing(2, 1),
    ElementStyle::new("p", "white-space:pre-wrap", Style::new().fg(WHITE)).spacing(0, 1),
    ElementStyle::new(
        "code",
        "background-color:#1a1d38;padding:.2em .4em;border-radius:4px",
        Style::new().fg(WHITE).bg(MIDNIGHT_BLUE),
    ),
    ElementStyle::new(
        "strong",
        "color:#22c55e",
        Style::new().fg(GREEN).add_modifier(Modifier::BOLD),
    )
    .class("text-green-500"),
    ElementStyle::new("em", "", Style::new().add_modifier(Modifier::ITALIC)),
    ElementStyle::new("del", "", Style::new().add_modifier(Modifier::CROSSED_OUT)),
    ElementStyle::new(
        "ul",
        "padding-left:1.8em;list-style:disc inside",
        Style::new(),
    )
    .class("list-disc list-inside")
    .spacing(0, 1)
    .indent(2),
    ElementStyle::new(
        "ol",
        "padding-left:1.8em;list-style:decimal inside",
        Style::new(),
    )
    .class("list-decimal list-inside")
    .spacing(0, 1)
    .indent(2),
    ElementStyle::new("li", "", Style::new().fg(WHITE)),
    ElementStyle::new(
        "blockquote",
        "font-size:0.9em;margin:1.4em 0;border-left:3px solid #ffc4dd;padding:2px 0 .2px .7em",
        Style::new().fg(WHITE),
    )
    .spacing(1, 1)
    .gutter("┃ "),
    ElementStyle::new(
        "pre",
        "margin:1.3rem 0;padding:1em;background-color:#1a1d38;color:#fff;border-radius:5px",
        Style::new().fg(WHITE).bg(MIDNIGHT_BLUE),
    )
    .spacing(1, 1)
    .indent(1),
    ElementStyle::new("hr", "border-top:2px solid #ffc4dd;margin:2.5rem 0", Style::new().fg(PINK))
        .spacing(1, 1),
    ElementStyle::new("a", "", Style::new().add_modifier(Modifier::UNDERLINED)).class("underline"),
    ElementStyle::new(
        "table",
        "width:auto;margin:1.2rem auto;font-size:0.95em;line-height:1.5;display:block",
        Style::new().fg(PINK),
    )
    .spacing(1, 1),
    ElementStyle::new(
        "th",
        "padding:.5em;text-align:center;border:1px solid #ffc4dd;color:#ffc4dd",
        Style::new().fg(PINK).add_modifier(Modifier::BOLD),
    ),
    ElementStyle::new(
        "td",
        "padding:.5em;text-align:center;border:1px solid #ffc4dd",
        Style::new().fg(WHITE),
    ),
];

/// Style override row for an element.
pub fn element_style(element: Element) -> &'static ElementStyle {
    &STYLE_TABLE[element.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lists_every_element_in_index_order() {
        for (idx, element) in Element::ALL.iter().enumerate() {
            assert_eq!(element.index(), idx);
        }
    }

    #[test]
    fn test_heading_rows_use_heading_tags() {
        for level in 1..=6u8 {
            let style = element_style(Element::heading(level));
            assert_eq!(style.tag, format!("h{level}"));
        }
    }

    #[test]
    fn test_heading_level_past_six_clamps() {
        assert_eq!(Element::heading(9), Element::Heading6);
    }

    #[test]
    fn test_only_first_two_headings_draw_a_rule() {
        let ruled: Vec<_> = Element::ALL
            .iter()
            .filter(|e| e.is_heading() && element_style(**e).rule_below)
            .collect();
        assert_eq!(ruled, vec![&Element::Heading1, &Element::Heading2]);
    }

    #[test]
    fn test_headings_below_first_get_top_padding() {
        assert_eq!(element_style(Element::Heading1).space_before, 0);
        for level in 2..=6u8 {
            assert!(element_style(Element::heading(level)).space_before > 0);
        }
    }

    #[test]
    fn test_table_cells_are_centered_with_pink_border() {
        for cell in [Element::TableHeader, Element::TableCell] {
            let css = element_style(cell).css;
            assert!(css.contains("text-align:center"));
            assert!(css.contains("border:1px solid #ffc4dd"));
        }
    }

    #[test]
    fn test_code_block_is_white_on_midnight_blue() {
        let style = element_style(Element::CodeBlock).text;
        assert_eq!(style.fg, Some(WHITE));
        assert_eq!(style.bg, Some(MIDNIGHT_BLUE));
    }

    #[test]
    fn test_strong_is_green() {
        assert_eq!(element_style(Element::Strong).text.fg, Some(GREEN));
    }
}
