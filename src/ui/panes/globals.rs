//! Global bindings pane rendering

use super::output::clamp_scroll;
use crate::interpreter::Globals;
use crate::memory::value::Value;
use crate::ui::theme::{pane_border, PALETTE};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn value_style(value: &Value) -> Style {
    let color = match value {
        Value::Number(_) | Value::Bool(_) => PALETTE.literal,
        Value::Str(_) => PALETTE.string,
        Value::Closure(_) | Value::Native(_) => PALETTE.callable,
        Value::Error(_) => PALETTE.fault,
        Value::Nil => PALETTE.muted,
    };
    Style::default().fg(color)
}

/// One `name = value` row
pub fn binding_line<'a>(name: &'a str, value: &Value) -> Line<'a> {
    Line::from(vec![
        Span::styled(name, Style::default().fg(PALETTE.binding)),
        Span::styled(" = ", Style::default().fg(PALETTE.muted)),
        Span::styled(value.to_string(), value_style(value)),
    ])
}

/// Render the final global bindings, sorted by name
pub fn render_globals_pane(
    frame: &mut Frame,
    area: Rect,
    globals: &Globals,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Global Memory ")
        .borders(Borders::ALL)
        .border_style(pane_border(is_focused));

    if globals.is_empty() {
        let paragraph = Paragraph::new("(no bindings)")
            .block(block)
            .style(Style::default().fg(PALETTE.muted));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = clamp_scroll(*scroll_offset, globals.len(), visible_height);

    let items: Vec<ListItem> = globals
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(name, value)| ListItem::new(binding_line(name, value)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_line_text() {
        let line = binding_line("total", &Value::Number(12.0));
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(text, "total = 12");
        assert_eq!(line.spans[2].style.fg, Some(PALETTE.literal));
    }
}
