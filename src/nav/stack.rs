use crate::form_core::ScreenId;
use crate::widgets::Widget;

/// Screens currently shown, root first. Only the top one receives keys.
#[derive(Default)]
pub struct NavStack {
    screens: Vec<Box<dyn Widget>>,
}

impl NavStack {
    pub fn push(&mut self, screen: Box<dyn Widget>) {
        self.screens.push(screen);
    }

    /// Pops only when `id` is the top screen; a stale pop never removes another screen.
    pub fn pop_if_top(&mut self, id: ScreenId) -> Option<Box<dyn Widget>> {
        if self.screens.last().map(|w| w.id()) == Some(id) {
            self.screens.pop()
        } else {
            None
        }
    }

    pub fn top(&self) -> Option<&dyn Widget> {
        self.screens.last().map(|w| w.as_ref())
    }

    pub fn top_mut(&mut self) -> Option<&mut Box<dyn Widget>> {
        self.screens.last_mut()
    }

    pub fn root(&self) -> Option<&dyn Widget> {
        self.screens.first().map(|w| w.as_ref())
    }

    pub fn find_mut(&mut self, id: ScreenId) -> Option<&mut Box<dyn Widget>> {
        self.screens.iter_mut().find(|w| w.id() == id)
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn titles(&self) -> Vec<String> {
        self.screens.iter().map(|w| w.title().to_string()).collect()
    }
}
