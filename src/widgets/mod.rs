pub mod chrome;
pub mod form;
pub mod form_widget;
pub mod header;
pub mod status_bar;
pub mod text_input;

use crate::app::Effect;
use crate::form_core::{Edit, ScreenId};
use crate::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use serde_json::Value as JsonValue;
use std::any::Any;

/// A screen on the navigation stack.
pub trait Widget {
    fn id(&self) -> ScreenId;
    fn title(&self) -> &str;
    fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, tick: u64);
    fn on_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let _ = key;
        Vec::new()
    }
    /// Returns false when the screen holds no state the edit applies to.
    fn apply_edit(&mut self, edit: Edit) -> bool {
        let _ = edit;
        false
    }
    fn hints(&self) -> &'static str {
        ""
    }
    fn editing(&self) -> bool {
        false
    }
    /// One-line counters for the debug pane.
    fn stats(&self) -> Option<String> {
        None
    }
    /// Current state as JSON, for screens that own a serializable state.
    fn snapshot(&self) -> Option<JsonValue> {
        None
    }
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
