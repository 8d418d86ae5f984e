//! Declarative form binding: a builder describes rows and how to re-render
//! them from state, a driver owns the state and replays the observer after
//! every edit.

pub mod controls;
pub mod driver;
pub mod handle;
pub mod observer;
pub mod section;

pub use controls::{Control, ControlId, Controls};
pub use driver::FormDriver;
pub use handle::{Edit, Mutator, Navigator, ScreenId};
pub use observer::{ControlEvent, ControlEventKind, Observer};
pub use section::{Accessory, Row, Section};
