use crate::form_core::{
    Control, ControlEventKind, Controls, FormDriver, Mutator, Navigator, Observer, Row, Section,
};
use crate::model::{AppConfig, Hotspot};
use crate::widgets::text_input::TextDriver;

pub const TOGGLE_LABEL: &str = "Personal Hotspot";
pub const PASSWORD_LABEL: &str = "Password";
pub const PASSWORD_TITLE: &str = "Hotspot Password";

/// Builds the Personal Hotspot form: a toggle section whose footer tracks the
/// enabled flag, and a password row that opens a text editor.
pub fn hotspot_form(
    state: &Hotspot,
    change: Mutator<Hotspot>,
    nav: Navigator,
    controls: &mut Controls,
) -> (Vec<Section<Hotspot>>, Observer<Hotspot>) {
    let mut observer: Observer<Hotspot> = Observer::new();

    let toggle = controls.toggle(state.is_enabled);
    observer.react(toggle, ControlEventKind::ValueChanged, move |c| match c {
        Control::Toggle { on } => {
            let on = *on;
            vec![change.request(move |s: &mut Hotspot| s.is_enabled = on)]
        }
        _ => Vec::new(),
    });
    observer.on_update(move |s, cs| {
        cs.set_toggle(toggle, s.is_enabled);
    });

    let detail = controls.label(Some(state.password.clone()));
    observer.on_update(move |s, cs| {
        cs.set_label(detail, Some(s.password.clone()));
    });
    let password_row = Row::new(PASSWORD_LABEL, detail).on_select(move |s: &Hotspot| {
        let editor = TextDriver::new(
            PASSWORD_TITLE,
            PASSWORD_LABEL,
            s.password.clone(),
            move |text| vec![change.request(move |h: &mut Hotspot| h.password = text)],
        );
        vec![nav.push(Box::new(editor))]
    });

    let footer = controls.label(state.enabled_section_title().map(String::from));
    observer.on_update(move |s, cs| {
        cs.set_label(footer, s.enabled_section_title().map(String::from));
    });

    let sections = vec![
        Section::new(vec![Row::new(TOGGLE_LABEL, toggle)]).with_footer(footer),
        Section::new(vec![password_row]),
    ];
    (sections, observer)
}

pub fn hotspot_driver(config: &AppConfig) -> FormDriver<Hotspot> {
    FormDriver::new(config.title.clone(), config.initial.clone(), hotspot_form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Effect;
    use crate::widgets::Widget;

    fn driver(is_enabled: bool, password: &str) -> FormDriver<Hotspot> {
        let config = AppConfig {
            initial: Hotspot {
                is_enabled,
                password: password.into(),
            },
            ..Default::default()
        };
        hotspot_driver(&config)
    }

    fn footer(d: &FormDriver<Hotspot>) -> Option<String> {
        d.sections()[0].footer_text(d.controls()).map(String::from)
    }

    fn apply_all(d: &mut FormDriver<Hotspot>, effects: Vec<Effect>) {
        for eff in effects {
            if let Effect::Mutate { target, edit } = eff {
                assert_eq!(target, d.id());
                assert!(d.apply_edit(edit));
            }
        }
    }

    #[test]
    fn initial_render_reflects_state() {
        let d = driver(true, "hello");
        assert_eq!(d.title(), "Personal Hotspot Settings");
        assert_eq!(d.sections().len(), 2);
        let toggle = d.row(0).unwrap();
        let password = d.row(1).unwrap();
        assert_eq!(toggle.label, "Personal Hotspot");
        assert_eq!(d.controls().is_on(toggle.control), Some(true));
        assert_eq!(footer(&d).as_deref(), Some("Personal Hotspot Enabled"));
        assert_eq!(d.controls().text(password.control), Some("hello"));
        assert!(password.is_selectable());
        assert!(!toggle.is_selectable());
        assert!(d.sections()[1].footer.is_none());
    }

    #[test]
    fn disabled_state_has_no_footer() {
        let d = driver(false, "hello");
        assert_eq!(footer(&d), None);
        assert_eq!(d.section_heights(), &[1, 1]);
    }

    #[test]
    fn replay_is_idempotent_for_any_state() {
        for (on, pw) in [(true, "hello"), (false, ""), (true, "ünïcode pass")] {
            let mut d = driver(on, pw);
            d.replay();
            assert_eq!(d.controls(), driver(on, pw).controls());
        }
    }

    #[test]
    fn mutation_equals_edit_applied_to_state() {
        let mut d = driver(true, "hello");
        d.apply(|s| s.password.push('!'));
        assert_eq!(
            d.state(),
            &Hotspot {
                is_enabled: true,
                password: "hello!".into()
            }
        );
        assert_eq!(d.replay_count(), 1);
        assert_eq!(d.controls().text(d.row(1).unwrap().control), Some("hello!"));
    }

    #[test]
    fn flipping_toggle_off_removes_footer() {
        let mut d = driver(true, "hello");
        let effects = d.flip_toggle(0);
        apply_all(&mut d, effects);
        assert!(!d.state().is_enabled);
        assert_eq!(d.replay_count(), 1);
        assert_eq!(footer(&d), None);
        assert_eq!(d.section_heights(), &[1, 1]);
        d.replay();
        assert_eq!(d.controls().is_on(d.row(0).unwrap().control), Some(false));
    }

    #[test]
    fn selecting_password_pushes_editor_seeded_with_current_password() {
        let mut d = driver(true, "hello");
        d.apply(|s| s.password = "changed".into());
        let effects = d.select_row(1);
        assert_eq!(effects.len(), 1);
        match effects.into_iter().next() {
            Some(Effect::Push { from, screen }) => {
                assert_eq!(from, d.id());
                assert_eq!(screen.title(), "Hotspot Password");
                let editor = screen.as_any().downcast_ref::<TextDriver>().unwrap();
                assert_eq!(editor.text(), "changed");
            }
            _ => panic!("expected Push"),
        }
    }

    #[test]
    fn editor_change_targets_parent_password_only() {
        let mut d = driver(true, "hello");
        let mut editor = match d.select_row(1).into_iter().next() {
            Some(Effect::Push { screen, .. }) => screen,
            _ => panic!("expected Push"),
        };
        let editor = editor.as_any_mut().downcast_mut::<TextDriver>().unwrap();
        let effects = editor.submit();
        apply_all(&mut d, effects);
        assert_eq!(d.state().password, "hello");
        assert!(d.state().is_enabled);
        assert_eq!(d.replay_count(), 1);
    }
}
