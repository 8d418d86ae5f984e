use crate::app::Effect;
use crate::form_core::{Edit, FormDriver, ScreenId};
use crate::theme::Theme;
use crate::widgets::form::draw_form;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::any::Any;

impl<S: Serialize + 'static> crate::widgets::Widget for FormDriver<S> {
    fn id(&self) -> ScreenId {
        FormDriver::id(self)
    }
    fn title(&self) -> &str {
        FormDriver::title(self)
    }
    fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, _tick: u64) {
        draw_form(f, area, self, theme);
    }
    fn on_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let count = self.row_count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                Vec::new()
            }
            KeyCode::Char(' ') => self.flip_toggle(self.selected),
            KeyCode::Enter | KeyCode::Right => {
                let sel = self.selected;
                match self.row(sel).map(|r| r.is_selectable()) {
                    Some(true) => self.select_row(sel),
                    Some(false) if key.code == KeyCode::Enter => self.flip_toggle(sel),
                    _ => Vec::new(),
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => vec![Effect::Pop {
                screen: FormDriver::id(self),
            }],
            _ => Vec::new(),
        }
    }
    fn apply_edit(&mut self, edit: Edit) -> bool {
        FormDriver::apply_edit(self, edit)
    }
    fn hints(&self) -> &'static str {
        "↑/↓ move • Space toggle • Enter open • F12 log • Esc quit"
    }
    fn stats(&self) -> Option<String> {
        Some(format!(
            "replays={} updates={} reactions={} controls={}",
            self.replay_count(),
            self.observer().update_count(),
            self.observer().reaction_count(),
            self.controls().count(),
        ))
    }
    fn snapshot(&self) -> Option<JsonValue> {
        serde_json::to_value(self.state()).ok()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
