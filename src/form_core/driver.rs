use super::controls::{ControlId, Controls};
use super::handle::{Edit, Mutator, Navigator, ScreenId};
use super::observer::{ControlEvent, Observer};
use super::section::{Row, Section};
use crate::app::Effect;

/// Owns one screen's authoritative state together with what its builder produced.
pub struct FormDriver<S> {
    id: ScreenId,
    title: String,
    state: S,
    sections: Vec<Section<S>>,
    controls: Controls,
    observer: Observer<S>,
    section_heights: Vec<u16>,
    replays: usize,
    pub(crate) selected: usize,
}

impl<S: 'static> FormDriver<S> {
    pub fn new<F>(title: impl Into<String>, initial: S, build: F) -> Self
    where
        F: FnOnce(&S, Mutator<S>, Navigator, &mut Controls) -> (Vec<Section<S>>, Observer<S>),
    {
        let id = ScreenId::next();
        let mut controls = Controls::new();
        let (sections, observer) = build(
            &initial,
            Mutator::new(id),
            Navigator::new(id),
            &mut controls,
        );
        let mut driver = Self {
            id,
            title: title.into(),
            state: initial,
            sections,
            controls,
            observer,
            section_heights: Vec::new(),
            replays: 0,
            selected: 0,
        };
        driver.reload_section_footers();
        driver
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn sections(&self) -> &[Section<S>] {
        &self.sections
    }

    pub fn observer(&self) -> &Observer<S> {
        &self.observer
    }

    pub fn section_heights(&self) -> &[u16] {
        &self.section_heights
    }

    /// Number of observer replays since construction.
    pub fn replay_count(&self) -> usize {
        self.replays
    }

    #[cfg(test)]
    pub fn apply(&mut self, f: impl FnOnce(&mut S)) {
        f(&mut self.state);
        self.replay();
    }

    /// Applies an edit delivered through an effect. Returns false when the edit
    /// was built for a different state type; nothing is replayed in that case.
    pub fn apply_edit(&mut self, edit: Edit) -> bool {
        if !edit.apply(&mut self.state) {
            return false;
        }
        self.replay();
        true
    }

    /// Re-renders every control from the current state without rebuilding sections.
    pub fn replay(&mut self) {
        self.observer.update(&self.state, &mut self.controls);
        self.replays += 1;
        self.reload_section_footers();
    }

    pub fn reload_section_footers(&mut self) {
        self.section_heights = self
            .sections
            .iter()
            .map(|s| s.height(&self.controls))
            .collect();
    }

    pub fn handle(&self, event: ControlEvent) -> Vec<Effect> {
        self.observer.dispatch(event, &self.controls)
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    /// Row by flat index across all sections.
    pub fn row(&self, index: usize) -> Option<&Row<S>> {
        self.sections.iter().flat_map(|s| s.rows.iter()).nth(index)
    }

    pub fn select_row(&self, index: usize) -> Vec<Effect> {
        match self.row(index) {
            Some(row) => row.select(&self.state),
            None => Vec::new(),
        }
    }

    /// User flips the toggle of row `index`: the control changes first, then
    /// its value-changed reactions run.
    pub fn flip_toggle(&mut self, index: usize) -> Vec<Effect> {
        let Some(control) = self.row(index).map(|r| r.control) else {
            return Vec::new();
        };
        self.set_toggle_from_user(control)
    }

    fn set_toggle_from_user(&mut self, control: ControlId) -> Vec<Effect> {
        let Some(on) = self.controls.is_on(control) else {
            return Vec::new();
        };
        self.controls.set_toggle(control, !on);
        self.handle(ControlEvent::value_changed(control))
    }
}
