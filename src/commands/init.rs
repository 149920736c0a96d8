//! `kvlt init` — scaffold `kvlt/map.kvlt` in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};

use crate::map;

const STARTER_MAP: &str = "\
# kvlt map file
# One band per line: Name [tag] [tag] ...
#   [active]   — currently active act
#   [core]     — inner-circle act ([primary] also counts as core)
#   [external] — outside the scene, hidden by the external filter
# Indented attributes belong to the band above:
#   members: comma, separated, people
#   note: free text shown on the card

Mayhem [primary] [active]
  members: euronymous, necrobutcher, hellhammer, attila
  note: Oslo 1984, the inner circle

Burzum [core]
  members: varg
  note: One-man project, Bergen

Darkthrone [core] [active]
  members: fenriz, nocturno culto
  note: Unholy trinity era onwards
";

pub fn run() -> Result<()> {
    let cwd = std::env::current_dir()?;
    init_at(&cwd)?;
    println!("Initialised kvlt/map.kvlt");
    println!("Run `kvlt view` to browse the map.");
    Ok(())
}

fn init_at(dir: &Path) -> Result<()> {
    let map_path = map::map_path(dir);
    if map_path.exists() {
        bail!("already initialised: {}", map_path.display());
    }
    fs::create_dir_all(map::kvlt_dir(dir))?;
    fs::write(&map_path, STARTER_MAP)?;
    Ok(())
}
