use super::controls::{Control, ControlId, Controls};
use crate::app::Effect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEventKind {
    ValueChanged,
    EditingEnded,
    EditingSubmitted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlEvent {
    pub control: ControlId,
    pub kind: ControlEventKind,
}

impl ControlEvent {
    pub fn value_changed(control: ControlId) -> Self {
        Self {
            control,
            kind: ControlEventKind::ValueChanged,
        }
    }
}

type UpdateFn<S> = Box<dyn Fn(&S, &mut Controls)>;
type ReactionFn = Box<dyn Fn(&Control) -> Vec<Effect>>;

struct Reaction {
    control: ControlId,
    kind: ControlEventKind,
    handler: ReactionFn,
}

/// Update closures plus the reactions that must live as long as the screen.
pub struct Observer<S> {
    reactions: Vec<Reaction>,
    updates: Vec<UpdateFn<S>>,
}

impl<S> Default for Observer<S> {
    fn default() -> Self {
        Self {
            reactions: Vec::new(),
            updates: Vec::new(),
        }
    }
}

impl<S> Observer<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_update(&mut self, f: impl Fn(&S, &mut Controls) + 'static) {
        self.updates.push(Box::new(f));
    }

    pub fn react(
        &mut self,
        control: ControlId,
        kind: ControlEventKind,
        handler: impl Fn(&Control) -> Vec<Effect> + 'static,
    ) {
        self.reactions.push(Reaction {
            control,
            kind,
            handler: Box::new(handler),
        });
    }

    /// Replays every update closure in registration order.
    pub fn update(&self, state: &S, controls: &mut Controls) {
        for u in &self.updates {
            u(state, controls);
        }
    }

    /// Runs the reactions registered for `event`, reading the control's current value.
    pub fn dispatch(&self, event: ControlEvent, controls: &Controls) -> Vec<Effect> {
        let Some(control) = controls.get(event.control) else {
            return Vec::new();
        };
        self.reactions
            .iter()
            .filter(|r| r.control == event.control && r.kind == event.kind)
            .flat_map(|r| (r.handler)(control))
            .collect()
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    pub fn update_count(&self) -> usize {
        self.updates.len()
    }
}
