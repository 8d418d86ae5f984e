use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Breadcrumb of the navigation stack, root first.
pub fn draw_header(f: &mut Frame, area: Rect, titles: &[String], theme: &Theme) {
    let mut spans: Vec<Span> = Vec::new();
    let last = titles.len().saturating_sub(1);
    for (i, t) in titles.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", theme.text_muted()));
        }
        let style = if i == last {
            theme.text_active_bold()
        } else {
            theme.text_muted()
        };
        spans.push(Span::styled(t.clone(), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
