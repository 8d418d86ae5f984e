use crate::app::{update, AppMsg, Effect};
use crate::model::AppConfig;
use crate::nav::stack::NavStack;
use crate::theme::Theme;
use crate::widgets::header::draw_header;
use crate::widgets::status_bar::draw_status;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub(crate) struct Toast {
    pub(crate) text: String,
    pub(crate) level: ToastLevel,
    pub(crate) expires_at_tick: u64,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) theme: Theme,
    pub(crate) nav: NavStack,
    pub(crate) tick: u64,
    pub(crate) toast: Option<Toast>,
    pub(crate) show_debug: bool,
    pub(crate) debug_log: VecDeque<String>,
    pub(crate) should_quit: bool,
    // State of the root screen at the moment it was dismissed.
    pub(crate) final_state: Option<JsonValue>,
}

impl AppState {
    pub(crate) fn new(config: AppConfig) -> Self {
        let mut state = AppState {
            theme: Theme::from_name(config.theme),
            config,
            ..Default::default()
        };
        let root = crate::hotspot::hotspot_driver(&state.config);
        state.dbg(format!("root {} :: {}", root.id(), root.title()));
        state.nav.push(Box::new(root));
        state
    }

    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg.into());
    }

    pub(crate) fn root_state_json(&self) -> Option<JsonValue> {
        self.nav.root().and_then(|w| w.snapshot())
    }

    fn show_toast(&mut self, text: impl Into<String>, level: ToastLevel, seconds: u64) {
        let ticks = seconds.saturating_mul(5); // ~200ms tick
        self.toast = Some(Toast {
            text: text.into(),
            level,
            expires_at_tick: self.tick.saturating_add(ticks),
        });
    }
}

pub(crate) fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::Mutate { target, edit } => {
                match state.nav.find_mut(target).map(|w| w.apply_edit(edit)) {
                    Some(true) => {
                        let stats = state.nav.find_mut(target).and_then(|w| w.stats());
                        state.dbg(format!("mutate {target} {}", stats.unwrap_or_default()));
                    }
                    Some(false) => state.dbg(format!("dropped edit for {target}: state mismatch")),
                    None => state.dbg(format!("dropped edit for {target}: not on stack")),
                }
            }
            Effect::Push { from, screen } => {
                if state.nav.top().map(|w| w.id()) != Some(from) {
                    state.dbg(format!("push requested by {from} which is not on top"));
                }
                state.dbg(format!("push {} :: {}", screen.id(), screen.title()));
                state.nav.push(screen);
                state.dbg(format!("depth {}", state.nav.depth()));
            }
            Effect::Pop { screen } => match state.nav.pop_if_top(screen) {
                Some(w) => {
                    state.dbg(format!("pop {} :: {}", w.id(), w.title()));
                    if state.nav.is_empty() {
                        state.final_state = w.snapshot();
                        state.should_quit = true;
                    }
                }
                None => state.dbg(format!("ignored pop for {screen}: not on top")),
            },
            Effect::CopyToClipboard { text } => {
                match arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
                    Ok(()) => state.show_toast("Copied to clipboard!", ToastLevel::Success, 3),
                    Err(e) => {
                        let msg = format!("Clipboard unavailable: {e}");
                        state.dbg(&msg);
                        state.show_toast(msg, ToastLevel::Error, 3);
                    }
                }
            }
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub fn run() -> Result<()> {
    let cfg = load_config()?;
    let mut state = AppState::new(cfg);
    if env_flag("HOTSPOT_TUI_HEADLESS") {
        return run_headless(state, env_flag("HOTSPOT_TUI_SMOKE_SUMMARY"));
    }
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let res = event_loop(&mut terminal, &mut state);
    disable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res?;
    if let Some(line) = final_state_line(&state) {
        println!("{line}");
    }
    Ok(())
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut AppState) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    while !state.should_quit {
        terminal.draw(|f| ui(f, state))?;
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let effects = update(state, AppMsg::Key(key));
                    run_effects(state, effects);
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            let _ = update(state, AppMsg::Tick);
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn run_headless(mut state: AppState, summary: bool) -> Result<()> {
    let script = std::env::var("HOTSPOT_TUI_KEYS").unwrap_or_default();
    let keys = parse_key_script(&script)?;
    let backend = ratatui::backend::TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|f| ui(f, &mut state))?;
    for key in keys {
        if state.should_quit {
            break;
        }
        let effects = update(&mut state, AppMsg::Key(key));
        run_effects(&mut state, effects);
        terminal.draw(|f| ui(f, &mut state))?;
    }
    if let Some(line) = final_state_line(&state) {
        println!("{line}");
    }
    if summary {
        let final_state = state
            .final_state
            .clone()
            .or_else(|| state.root_state_json());
        let summary = serde_json::json!({
            "state": final_state,
            "screens": state.nav.titles(),
            "quit": state.should_quit,
            "log_lines": state.debug_log.len(),
        });
        println!("{summary}");
    }
    Ok(())
}

/// JSON line printed on exit once the root screen has been dismissed.
pub(crate) fn final_state_line(state: &AppState) -> Option<String> {
    state.final_state.as_ref().map(|v| v.to_string())
}

/// Parses a comma separated key script such as `down,enter,text:newpass,enter`.
pub(crate) fn parse_key_script(script: &str) -> Result<Vec<KeyEvent>> {
    let mut keys = Vec::new();
    for tok in script.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some(text) = tok.strip_prefix("text:") {
            keys.extend(
                text.chars()
                    .map(|c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
            continue;
        }
        let key = match tok.to_ascii_lowercase().as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "left" => KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            "right" => KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "tab" => KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            "space" => KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            "backspace" => KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            "f12" => KeyEvent::new(KeyCode::F(12), KeyModifiers::NONE),
            "ctrl+c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            _ => {
                let mut chars = tok.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
                    _ => anyhow::bail!("unknown key in script: {tok}"),
                }
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

pub(crate) fn load_config() -> Result<AppConfig> {
    // 1) Explicit path wins and must exist
    if let Ok(path) = std::env::var("HOTSPOT_TUI_CONFIG") {
        return read_config(Path::new(&path));
    }
    // 2) CWD/hotspot.yaml, then CWD/.tui/hotspot.yaml
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidates = [
        cwd.join("hotspot.yaml"),
        cwd.join(".tui").join("hotspot.yaml"),
    ];
    for p in &candidates {
        if p.exists() {
            return read_config(p);
        }
    }
    Ok(AppConfig::default())
}

pub(crate) fn read_config(path: &Path) -> Result<AppConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("reading config: {path:?}"))?;
    serde_yaml::from_str(&s).with_context(|| format!("parsing config: {path:?}"))
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let b = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            "Debug",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
    // Take last lines that fit below the border
    let h = area.height.saturating_sub(1) as usize;
    let total = state.debug_log.len();
    let start = total.saturating_sub(h);
    let lines: Vec<Line> = state
        .debug_log
        .iter()
        .skip(start)
        .map(|s| Line::raw(s.clone()))
        .collect();
    let p = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(b)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

pub(crate) fn ui(f: &mut Frame, state: &mut AppState) {
    let screen = f.area();
    f.render_widget(Block::default().style(state.theme.base_style()), screen);

    let debug_h = if state.show_debug { 8 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(debug_h),
        Constraint::Length(1),
    ])
    .split(screen);

    draw_header(f, chunks[0], &state.nav.titles(), &state.theme);
    let tick = state.tick;
    if let Some(top) = state.nav.top_mut() {
        top.render(f, chunks[1], &state.theme, tick);
    }
    if state.show_debug {
        draw_debug(f, chunks[2], state);
    }
    draw_status(f, chunks[3], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn screen_text(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, state)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn key_script_parses_named_keys_and_text() {
        let keys = parse_key_script(" down, enter ,text:ab,x,ctrl+c,,F12").unwrap();
        let codes: Vec<KeyCode> = keys.iter().map(|k| k.code).collect();
        assert_eq!(
            codes,
            vec![
                KeyCode::Down,
                KeyCode::Enter,
                KeyCode::Char('a'),
                KeyCode::Char('b'),
                KeyCode::Char('x'),
                KeyCode::Char('c'),
                KeyCode::F(12),
            ]
        );
        assert!(keys[5].modifiers.contains(KeyModifiers::CONTROL));
        assert!(parse_key_script("").unwrap().is_empty());
    }

    #[test]
    fn scripted_quit_yields_final_state_line() {
        let mut state = AppState::new(AppConfig::default());
        assert_eq!(final_state_line(&state), None);
        for key in parse_key_script("space,q").unwrap() {
            let effects = update(&mut state, AppMsg::Key(key));
            run_effects(&mut state, effects);
        }
        assert!(state.should_quit);
        let line = final_state_line(&state).unwrap();
        let v: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(v["is_enabled"], false);
        assert_eq!(v["password"], "hello");
    }

    #[test]
    fn key_script_rejects_unknown_words() {
        let err = parse_key_script("down,jump").unwrap_err();
        assert!(err.to_string().contains("jump"));
    }

    #[test]
    fn missing_config_file_reports_path() {
        let path = std::env::temp_dir().join("hotspot-tui-missing-config.yaml");
        let err = read_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("reading config"));
    }

    #[test]
    fn config_file_seeds_initial_state() {
        let path = std::env::temp_dir().join(format!(
            "hotspot-tui-config-{}.yaml",
            std::process::id()
        ));
        fs::write(&path, "title: Tether\ninitial:\n  password: s3cret\n").unwrap();
        let cfg = read_config(&path).unwrap();
        let _ = fs::remove_file(&path);
        let state = AppState::new(cfg);
        let json = state.root_state_json().unwrap();
        assert_eq!(json["password"], "s3cret");
        assert_eq!(json["is_enabled"], true);
        assert_eq!(state.nav.titles(), vec!["Tether".to_string()]);
    }

    #[test]
    fn rendered_screen_shows_rows_and_footer() {
        let mut state = AppState::new(AppConfig::default());
        let text = screen_text(&mut state);
        assert!(text.contains("Personal Hotspot Settings"));
        assert!(text.contains("Personal Hotspot Enabled"));
        assert!(text.contains("On"));
        assert!(text.contains("hello"));
    }

    #[test]
    fn rendered_footer_disappears_after_toggle_off() {
        let mut state = AppState::new(AppConfig::default());
        let effects = update(
            &mut state,
            AppMsg::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
        );
        run_effects(&mut state, effects);
        let text = screen_text(&mut state);
        assert!(!text.contains("Personal Hotspot Enabled"));
        assert!(text.contains("Off"));
    }

    #[test]
    fn debug_pane_lists_effects() {
        let mut state = AppState::new(AppConfig::default());
        let effects = update(
            &mut state,
            AppMsg::Key(KeyEvent::new(KeyCode::F(12), KeyModifiers::NONE)),
        );
        assert!(effects.is_empty());
        assert!(state.show_debug);
        let text = screen_text(&mut state);
        assert!(text.contains("Debug"));
        assert!(text.contains("root screen#"));
    }
}
