use crate::form_core::{Accessory, Control, Controls, FormDriver, Row};
use crate::theme::Theme;
use crate::widgets::chrome::panel_block;
use ratatui::prelude::*;
use ratatui::widgets::*;

pub fn draw_form<S: 'static>(f: &mut Frame, area: Rect, form: &FormDriver<S>, theme: &Theme) {
    let block = panel_block(form.title(), true, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // One chunk per section sized from the last measured height, plus a spacer.
    let mut constraints: Vec<Constraint> = form
        .section_heights()
        .iter()
        .map(|h| Constraint::Length(h.saturating_add(1)))
        .collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::vertical(constraints).split(inner);

    let mut flat = 0usize;
    for (i, section) in form.sections().iter().enumerate() {
        let mut lines: Vec<Line> = Vec::new();
        for row in &section.rows {
            lines.push(row_line(
                row,
                form.controls(),
                flat == form.selected,
                inner.width,
                theme,
            ));
            flat += 1;
        }
        if let Some(text) = section.footer_text(form.controls()) {
            for l in text.lines() {
                lines.push(Line::from(Span::styled(format!("  {l}"), theme.text_muted())));
            }
        }
        f.render_widget(Paragraph::new(lines), chunks[i]);
    }
}

pub fn control_value(controls: &Controls, row_control: crate::form_core::ControlId) -> String {
    match controls.get(row_control) {
        Some(Control::Toggle { on }) => {
            if *on {
                "On".into()
            } else {
                "Off".into()
            }
        }
        Some(Control::Label { text }) => text.clone().unwrap_or_default(),
        None => String::new(),
    }
}

fn row_line<S>(
    row: &Row<S>,
    controls: &Controls,
    selected: bool,
    width: u16,
    theme: &Theme,
) -> Line<'static> {
    let sel = if selected { '›' } else { ' ' };
    let left = format!("{sel} {}", row.label);
    let mut right = control_value(controls, row.control);
    if row.accessory == Accessory::Disclosure {
        right.push_str(" >");
    }
    right.push(' ');
    let used = left.chars().count() + right.chars().count();
    let pad = (width as usize).saturating_sub(used).max(1);
    let (label_style, value_style) = if selected {
        (theme.list_cursor_style(), theme.text_active_bold())
    } else {
        (Style::default(), Style::default())
    };
    Line::from(vec![
        Span::styled(left, label_style),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, value_style),
    ])
}
