use crate::app::Effect;
use crate::form_core::{ControlEventKind, ScreenId};
use crate::theme::Theme;
use crate::widgets::chrome::panel_block;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::crossterm::event as rt_event;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};
use std::any::Any;
use tui_textarea::{CursorMove, Input, Key, TextArea};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditPhase {
    Editing,
    Submitted,
}

/// Single text field editor. Every completed edit is forwarded to `on_change`
/// verbatim; an explicit submit also pops the screen.
pub struct TextDriver {
    id: ScreenId,
    title: String,
    label: String,
    input: TextArea<'static>,
    phase: EditPhase,
    on_change: Box<dyn Fn(String) -> Vec<Effect>>,
}

impl TextDriver {
    pub fn new(
        title: impl Into<String>,
        label: impl Into<String>,
        text: impl Into<String>,
        on_change: impl Fn(String) -> Vec<Effect> + 'static,
    ) -> Self {
        let mut input = TextArea::new(vec![text.into()]);
        input.move_cursor(CursorMove::End);
        input.set_cursor_line_style(Style::default());
        Self {
            id: ScreenId::next(),
            title: title.into(),
            label: label.into(),
            input,
            // Opens focused.
            phase: EditPhase::Editing,
            on_change: Box::new(on_change),
        }
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn text(&self) -> String {
        self.input.lines().join("")
    }

    pub fn focus(&mut self) {
        self.phase = EditPhase::Editing;
    }

    /// Focus lost without submitting.
    pub fn end_editing(&mut self) -> Vec<Effect> {
        self.finish(ControlEventKind::EditingEnded)
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        self.finish(ControlEventKind::EditingSubmitted)
    }

    /// Back navigation: the field loses focus first, then the screen pops.
    pub fn back(&mut self) -> Vec<Effect> {
        let mut effects = self.end_editing();
        effects.push(Effect::Pop { screen: self.id });
        effects
    }

    /// Feeds one key to the field. Line breaks are dropped; the field holds one line.
    pub fn input(&mut self, input: impl Into<Input>) {
        let input = input.into();
        if breaks_line(&input) {
            return;
        }
        if self.phase == EditPhase::Submitted {
            self.focus();
        }
        let _ = self.input.input(input);
    }

    fn finish(&mut self, kind: ControlEventKind) -> Vec<Effect> {
        let mut effects = Vec::new();
        // on_change fires once per focus session; repeated submits only re-request the pop.
        if self.phase == EditPhase::Editing {
            self.phase = EditPhase::Submitted;
            effects.extend((self.on_change)(self.text()));
        }
        if kind == ControlEventKind::EditingSubmitted {
            effects.push(Effect::Pop { screen: self.id });
        }
        effects
    }
}

fn breaks_line(input: &Input) -> bool {
    match input.key {
        Key::Enter | Key::Char('\n') | Key::Char('\r') => true,
        Key::Char('m') | Key::Char('j') => input.ctrl,
        _ => false,
    }
}

// Re-encodes the app's key event for the textarea, which reads ratatui's crossterm.
fn rt_key(key: KeyEvent) -> Option<rt_event::KeyEvent> {
    let code = match key.code {
        KeyCode::Char(c) => rt_event::KeyCode::Char(c),
        KeyCode::Backspace => rt_event::KeyCode::Backspace,
        KeyCode::Delete => rt_event::KeyCode::Delete,
        KeyCode::Left => rt_event::KeyCode::Left,
        KeyCode::Right => rt_event::KeyCode::Right,
        KeyCode::Up => rt_event::KeyCode::Up,
        KeyCode::Down => rt_event::KeyCode::Down,
        KeyCode::Home => rt_event::KeyCode::Home,
        KeyCode::End => rt_event::KeyCode::End,
        KeyCode::PageUp => rt_event::KeyCode::PageUp,
        KeyCode::PageDown => rt_event::KeyCode::PageDown,
        _ => return None,
    };
    let modifiers = rt_event::KeyModifiers::from_bits_truncate(key.modifiers.bits());
    Some(rt_event::KeyEvent::new(code, modifiers))
}

impl crate::widgets::Widget for TextDriver {
    fn id(&self) -> ScreenId {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, _tick: u64) {
        let block = panel_block(&self.title, self.phase == EditPhase::Editing, theme);
        let inner = block.inner(area);
        f.render_widget(block, area);
        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(inner);
        let (border, cursor) = match self.phase {
            EditPhase::Editing => (
                theme.text_editing_bold(),
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            EditPhase::Submitted => (theme.text_muted(), Style::default()),
        };
        self.input.set_cursor_style(cursor);
        self.input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(self.label.clone()),
        );
        f.render_widget(&self.input, chunks[0]);
    }
    fn on_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.back(),
            KeyCode::Tab => match self.phase {
                EditPhase::Editing => self.end_editing(),
                EditPhase::Submitted => {
                    self.focus();
                    Vec::new()
                }
            },
            _ => {
                if let Some(key) = rt_key(key) {
                    TextDriver::input(self, key);
                }
                Vec::new()
            }
        }
    }
    fn hints(&self) -> &'static str {
        "Enter save • Tab focus • Esc back"
    }
    fn editing(&self) -> bool {
        self.phase() == EditPhase::Editing
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Widget;
    use crossterm::event::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn recording(text: &str) -> (TextDriver, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let d = TextDriver::new("Hotspot Password", "Password", text, move |t| {
            sink.borrow_mut().push(t);
            Vec::new()
        });
        (d, seen)
    }

    fn pops(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::Pop { .. }))
            .count()
    }

    #[test]
    fn opens_focused_with_given_text() {
        let (d, seen) = recording("hello");
        assert_eq!(d.phase(), EditPhase::Editing);
        assert_eq!(d.text(), "hello");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn submit_forwards_text_once_and_pops() {
        let (mut d, seen) = recording("");
        for c in "newpass".chars() {
            d.on_key(key(KeyCode::Char(c)));
        }
        let effects = d.on_key(key(KeyCode::Enter));
        assert_eq!(*seen.borrow(), vec!["newpass".to_string()]);
        assert_eq!(pops(&effects), 1);
        assert_eq!(d.phase(), EditPhase::Submitted);
    }

    #[test]
    fn defocus_with_cleared_field_forwards_empty_without_pop() {
        let (mut d, seen) = recording("hello");
        for _ in 0..5 {
            d.on_key(key(KeyCode::Backspace));
        }
        let effects = d.on_key(key(KeyCode::Tab));
        assert_eq!(*seen.borrow(), vec![String::new()]);
        assert_eq!(pops(&effects), 0);
        assert_eq!(d.phase(), EditPhase::Submitted);
    }

    #[test]
    fn repeated_submit_does_not_refire_change() {
        let (mut d, seen) = recording("abc");
        let first = d.on_key(key(KeyCode::Enter));
        let second = d.on_key(key(KeyCode::Enter));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(pops(&first), 1);
        assert_eq!(pops(&second), 1);
    }

    #[test]
    fn typing_after_defocus_starts_a_new_edit() {
        let (mut d, seen) = recording("ab");
        d.on_key(key(KeyCode::Tab));
        d.on_key(key(KeyCode::Char('c')));
        assert_eq!(d.phase(), EditPhase::Editing);
        d.on_key(key(KeyCode::Enter));
        assert_eq!(*seen.borrow(), vec!["ab".to_string(), "abc".to_string()]);
    }

    #[test]
    fn back_ends_editing_then_pops() {
        let (mut d, seen) = recording("xyz");
        let effects = d.on_key(key(KeyCode::Esc));
        assert_eq!(*seen.borrow(), vec!["xyz".to_string()]);
        assert!(matches!(effects.last(), Some(Effect::Pop { screen }) if *screen == d.id()));
    }

    #[test]
    fn line_breaks_never_split_the_field() {
        let (mut d, seen) = recording("ab");
        d.on_key(key(KeyCode::Left));
        d.on_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL));
        d.on_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL));
        d.on_key(key(KeyCode::Char('\n')));
        d.on_key(key(KeyCode::Char('\r')));
        assert_eq!(d.input.lines().len(), 1);
        assert_eq!(d.text(), "ab");
        d.on_key(key(KeyCode::Enter));
        assert_eq!(*seen.borrow(), vec!["ab".to_string()]);
    }

    #[test]
    fn cursor_keys_reach_the_textarea() {
        let (mut d, seen) = recording("ab");
        d.on_key(key(KeyCode::Home));
        d.on_key(key(KeyCode::Char('x')));
        d.on_key(key(KeyCode::Up));
        d.on_key(key(KeyCode::PageDown));
        d.on_key(key(KeyCode::End));
        d.on_key(key(KeyCode::Char('y')));
        d.on_key(key(KeyCode::Enter));
        assert_eq!(*seen.borrow(), vec!["xaby".to_string()]);
    }

    fn border_color(d: &mut TextDriver, theme: &Theme) -> Option<Color> {
        use ratatui::backend::TestBackend;
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|f| d.render(f, f.area(), theme, 0)).unwrap();
        Some(terminal.backend().buffer()[(0, 0)].fg)
    }

    #[test]
    fn panel_border_dims_once_submitted() {
        let theme = Theme::default();
        let (mut d, _) = recording("ab");
        assert_eq!(border_color(&mut d, &theme), theme.border_focused().fg);
        d.on_key(key(KeyCode::Tab));
        assert_eq!(border_color(&mut d, &theme), theme.border_unfocused().fg);
    }
}
