mod app;
mod form_core;
mod hotspot;
mod model;
mod nav;
mod theme;
mod ui;
mod widgets;

use anyhow::Result;

fn main() -> Result<()> {
    ui::run()
}
