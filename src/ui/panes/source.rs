//! Source code pane rendering with syntax highlighting
//!
//! Displays the program with line numbers and basic highlighting. The line
//! of a fault is drawn on a red background; after a clean run the line of
//! the last executed statement is marked instead.
//!
//! The pane uses a simple character tokenizer to apply styles without
//! requiring the full lexer, so it also works on source that failed to lex.

use crate::ui::theme::{pane_border, PALETTE};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for one line of script source
pub fn highlight_source_code(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Comments run to the end of the line
        if c == '#' {
            flush_word(&mut spans, &mut current_word, false);
            spans.push(Span::styled(
                chars[i..].iter().collect::<String>(),
                Style::default().fg(PALETTE.muted),
            ));
            break;
        }

        if c == '"' || c == '\'' {
            flush_word(&mut spans, &mut current_word, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                if chars[end] == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            let end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(PALETTE.string),
            ));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' && c != '.' {
            flush_word(&mut spans, &mut current_word, c == '(');

            let style = match c {
                '{' | '}' | '(' | ')' => Style::default().fg(PALETTE.keyword),
                _ => Style::default().fg(PALETTE.text),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String, is_call: bool) {
    if !word.is_empty() {
        let style = get_keyword_style(word, is_call);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn get_keyword_style(word: &str, is_call: bool) -> Style {
    match word {
        "let" | "pub" | "fn" | "if" | "return" | "print" => Style::default()
            .fg(PALETTE.keyword)
            .add_modifier(Modifier::BOLD),
        "and" | "or" | "not" => Style::default().fg(PALETTE.keyword),
        "true" | "false" => Style::default().fg(PALETTE.literal),
        _ if word.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
            Style::default().fg(PALETTE.literal)
        }
        _ if is_call => Style::default().fg(PALETTE.callable),
        _ => Style::default().fg(PALETTE.text),
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    marked_line: usize,
    is_error: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(pane_border(is_focused));

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_marked = line_num == marked_line;
            let line_num_str = format!("{:4} ", line_num);
            let mut content_line = highlight_source_code(line);

            let num_style = if is_marked && is_error {
                Style::default()
                    .fg(PALETTE.fault)
                    .add_modifier(Modifier::BOLD)
            } else if is_marked {
                Style::default()
                    .fg(PALETTE.ok)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(PALETTE.muted)
            };

            if is_marked && is_error {
                // Override all styling so the fault line stands out
                let error_style = Style::default()
                    .bg(PALETTE.fault)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content_line.spans {
                    span.style = error_style;
                }
            } else if is_marked {
                let current = Style::default().bg(PALETTE.band);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(current);
                }
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
