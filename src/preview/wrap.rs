//! Span wrapping and truncation by terminal display width.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::types::PreviewSpan;

pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cut `text` to at most `max_width` display cells.
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

pub fn spans_width(spans: &[PreviewSpan]) -> usize {
    spans.iter().map(PreviewSpan::width).sum()
}

/// Cut a run of spans to at most `max_width` display cells.
pub fn truncate_spans(spans: &[PreviewSpan], max_width: usize) -> Vec<PreviewSpan> {
    let mut out = Vec::new();
    let mut remaining = max_width;
    for span in spans {
        if remaining == 0 {
            break;
        }
        let taken = truncate_text(span.text(), remaining);
        let taken_width = display_width(&taken);
        if !taken.is_empty() {
            out.push(PreviewSpan::new(taken, span.style()).with_link(span.link()));
        }
        if taken_width < span.width() {
            break;
        }
        remaining -= taken_width;
    }
    out
}

/// Split spans at embedded newlines into hard rows.
///
/// Paragraph text keeps its line breaks, so every `\n` starts a new row
/// before any soft wrapping happens.
pub fn split_hard_lines(spans: &[PreviewSpan]) -> Vec<Vec<PreviewSpan>> {
    let mut rows = vec![Vec::new()];
    for span in spans {
        let mut parts = span.text().split('\n');
        if let Some(first) = parts.next()
            && !first.is_empty()
            && let Some(row) = rows.last_mut()
        {
            row.push(PreviewSpan::new(first, span.style()).with_link(span.link()));
        }
        for part in parts {
            let mut row = Vec::new();
            if !part.is_empty() {
                row.push(PreviewSpan::new(part, span.style()).with_link(span.link()));
            }
            rows.push(row);
        }
    }
    rows
}

/// Greedy word wrap of one hard row.
///
/// `prefix_first` starts the first output row and `prefix_next` every
/// continuation row. Leading whitespace on continuation rows is dropped; a
/// single word wider than the row is hard-split.
pub fn wrap_spans(
    spans: &[PreviewSpan],
    width: usize,
    prefix_first: &[PreviewSpan],
    prefix_next: &[PreviewSpan],
) -> Vec<Vec<PreviewSpan>> {
    let mut tokens: Vec<PreviewSpan> = Vec::new();
    for span in spans {
        tokens.extend(split_inline_tokens(span));
    }

    let mut lines: Vec<Vec<PreviewSpan>> = Vec::new();
    let mut current: Vec<PreviewSpan> = prefix_first.to_vec();
    let mut prefix_count = prefix_first.len();
    let mut current_len = spans_width(prefix_first);
    let mut has_word = false;
    let next_len = spans_width(prefix_next);

    for mut token in tokens {
        let token_len = token.width();
        let token_is_ws = is_whitespace_span(&token);

        if current_len + token_len > width && has_word {
            break_row(&mut lines, &mut current, &mut prefix_count, prefix_next);
            current_len = next_len;
            has_word = false;
        }

        if token_is_ws {
            // Leading whitespace survives on the first row only, clipped to fit
            if !has_word && !lines.is_empty() {
                continue;
            }
            let room = width.saturating_sub(current_len);
            if token_len > room {
                let clipped = truncate_text(token.text(), room);
                if clipped.is_empty() {
                    continue;
                }
                token = PreviewSpan::new(clipped, token.style()).with_link(token.link());
            }
            current_len += token.width();
            current.push(token);
            continue;
        }

        if current_len + token_len > width {
            // Word longer than a whole row
            let mut rest = token;
            loop {
                let room = width.saturating_sub(current_len).max(1);
                let head = truncate_text(rest.text(), room);
                if head.is_empty() || head.len() == rest.text().len() {
                    current_len += rest.width();
                    current.push(rest);
                    break;
                }
                let tail = rest.text()[head.len()..].to_string();
                current.push(PreviewSpan::new(head, rest.style()).with_link(rest.link()));
                break_row(&mut lines, &mut current, &mut prefix_count, prefix_next);
                current_len = next_len;
                rest = PreviewSpan::new(tail, rest.style()).with_link(rest.link());
            }
            has_word = true;
            continue;
        }

        current_len += token_len;
        current.push(token);
        has_word = true;
    }

    if has_word || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn break_row(
    lines: &mut Vec<Vec<PreviewSpan>>,
    current: &mut Vec<PreviewSpan>,
    prefix_count: &mut usize,
    prefix_next: &[PreviewSpan],
) {
    let mut row = std::mem::replace(current, prefix_next.to_vec());
    while row.len() > *prefix_count && row.last().is_some_and(is_whitespace_span) {
        row.pop();
    }
    lines.push(row);
    *prefix_count = prefix_next.len();
}

fn is_whitespace_span(span: &PreviewSpan) -> bool {
    span.text().chars().all(char::is_whitespace)
}

/// Split a span into word and whitespace runs.
///
/// Spans with a background (inline code) stay whole so their padding wraps
/// with them.
fn split_inline_tokens(span: &PreviewSpan) -> Vec<PreviewSpan> {
    if span.style().bg.is_some() {
        return vec![span.clone()];
    }
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        match ws_state {
            Some(state) if state == is_ws => buf.push(ch),
            Some(_) => {
                out.push(PreviewSpan::new(std::mem::take(&mut buf), span.style()).with_link(span.link()));
                buf.push(ch);
                ws_state = Some(is_ws);
            }
            None => {
                buf.push(ch);
                ws_state = Some(is_ws);
            }
        }
    }

    if !buf.is_empty() {
        out.push(PreviewSpan::new(buf, span.style()).with_link(span.link()));
    }
    out
}
