use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::{AppState, ToastLevel};

pub fn draw_status(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = Vec::new();
    if let Some(top) = state.nav.top() {
        if top.editing() {
            spans.push(Span::styled("[editing] ", state.theme.text_editing_bold()));
        }
        spans.push(Span::styled(top.hints(), state.theme.text_muted()));
    }
    if let Some(t) = &state.toast {
        if !spans.is_empty() {
            spans.push(Span::raw("  |  "));
        }
        let color = state.theme.toast_color(t.level);
        let tag = match t.level {
            ToastLevel::Success => "[OK]",
            ToastLevel::Error => "[ERROR]",
        };
        spans.push(Span::styled(
            format!("{tag} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(t.text.clone(), Style::default().fg(color)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
