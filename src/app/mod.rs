use crate::form_core::{Edit, ScreenId};
use crate::ui::AppState;
use crate::widgets::Widget;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub enum AppMsg {
    Key(KeyEvent),
    Tick,
}

/// Requests returned by screens; the shell runs them in order right after the
/// event that produced them.
pub enum Effect {
    Mutate {
        target: ScreenId,
        edit: Edit,
    },
    Push {
        from: ScreenId,
        screen: Box<dyn Widget>,
    },
    Pop {
        screen: ScreenId,
    },
    CopyToClipboard {
        text: String,
    },
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        AppMsg::Tick => {
            state.tick = state.tick.wrapping_add(1);
            if let Some(t) = &state.toast {
                if state.tick >= t.expires_at_tick {
                    state.toast = None;
                }
            }
        }
        AppMsg::Key(key) => match key.code {
            KeyCode::F(12) => {
                state.show_debug = !state.show_debug;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(v) = state.root_state_json() {
                    let text = serde_json::to_string_pretty(&v).unwrap_or_else(|_| v.to_string());
                    effects.push(Effect::CopyToClipboard { text });
                }
            }
            _ => {
                if let Some(top) = state.nav.top_mut() {
                    effects = top.on_key(key);
                }
            }
        },
    }
    effects
}
