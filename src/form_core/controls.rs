/// Index of a control inside a screen's [`Controls`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

impl ControlId {
    #[cfg(test)]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    Toggle { on: bool },
    // Row detail text or a section footer; `None` hides it.
    Label { text: Option<String> },
}

/// Arena holding every live control of one screen. Rows, footers and update
/// closures refer to controls by [`ControlId`] only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Controls {
    slots: Vec<Control>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, control: Control) -> ControlId {
        self.slots.push(control);
        ControlId(self.slots.len() - 1)
    }

    pub fn toggle(&mut self, on: bool) -> ControlId {
        self.insert(Control::Toggle { on })
    }

    pub fn label(&mut self, text: Option<String>) -> ControlId {
        self.insert(Control::Label { text })
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.slots.get(id.0)
    }

    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Returns false when `id` is not a toggle.
    pub fn set_toggle(&mut self, id: ControlId, value: bool) -> bool {
        match self.slots.get_mut(id.0) {
            Some(Control::Toggle { on }) => {
                *on = value;
                true
            }
            _ => false,
        }
    }

    /// Returns false when `id` is not a label.
    pub fn set_label(&mut self, id: ControlId, value: Option<String>) -> bool {
        match self.slots.get_mut(id.0) {
            Some(Control::Label { text }) => {
                *text = value;
                true
            }
            _ => false,
        }
    }

    pub fn is_on(&self, id: ControlId) -> Option<bool> {
        match self.get(id)? {
            Control::Toggle { on } => Some(*on),
            _ => None,
        }
    }

    pub fn text(&self, id: ControlId) -> Option<&str> {
        match self.get(id)? {
            Control::Label { text } => text.as_deref(),
            _ => None,
        }
    }
}
