use super::controls::{ControlId, Controls};
use crate::app::Effect;

pub type SelectFn<S> = Box<dyn Fn(&S) -> Vec<Effect>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Accessory {
    #[default]
    None,
    Disclosure,
}

pub struct Row<S> {
    pub label: String,
    pub control: ControlId,
    pub accessory: Accessory,
    on_select: Option<SelectFn<S>>,
}

impl<S> Row<S> {
    pub fn new(label: impl Into<String>, control: ControlId) -> Self {
        Self {
            label: label.into(),
            control,
            accessory: Accessory::None,
            on_select: None,
        }
    }

    /// Makes the row navigable: selecting it runs `f` against the current state.
    pub fn on_select(mut self, f: impl Fn(&S) -> Vec<Effect> + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self.accessory = Accessory::Disclosure;
        self
    }

    pub fn is_selectable(&self) -> bool {
        self.on_select.is_some()
    }

    pub fn select(&self, state: &S) -> Vec<Effect> {
        match &self.on_select {
            Some(f) => f(state),
            None => Vec::new(),
        }
    }
}

pub struct Section<S> {
    pub rows: Vec<Row<S>>,
    pub footer: Option<ControlId>,
}

impl<S> Section<S> {
    pub fn new(rows: Vec<Row<S>>) -> Self {
        Self { rows, footer: None }
    }

    pub fn with_footer(mut self, footer: ControlId) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn footer_text<'a>(&self, controls: &'a Controls) -> Option<&'a str> {
        controls.text(self.footer?)
    }

    /// Lines the section occupies: one per row plus the footer when present.
    pub fn height(&self, controls: &Controls) -> u16 {
        let footer = self
            .footer_text(controls)
            .map(|t| t.lines().count().max(1))
            .unwrap_or(0);
        (self.rows.len() + footer) as u16
    }
}
