use anyhow::Result;

use crate::tui::app;

pub fn run(demo: bool) -> Result<()> {
    app::run(demo)
}
