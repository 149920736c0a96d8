//! Parser for `map.kvlt`, the band map file.
//!
//! Line-oriented format: a band declaration per non-indented line, with
//! optional indented attribute lines belonging to the band above.
//!
//! ```text
//! # comments and blank lines are skipped
//! Mayhem [primary] [active]
//!   members: euronymous, necrobutcher, hellhammer
//!   note: Oslo 1984, the inner circle
//! Dead Kennedys [external]
//! ```
//!
//! Bracket tags on the declaration line are category labels; `[active]` is
//! special-cased into the active flag. Attributes are `members:` (comma
//! list) and `note:` (free text). Anything else is an error.

use anyhow::{bail, Result};

use crate::graph::model::{Band, MapData};

pub fn parse(content: &str) -> Result<MapData> {
    let mut map = MapData::new();

    for (idx, raw) in content.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indented = raw.starts_with(' ') || raw.starts_with('\t');
        if indented {
            let Some(band) = map.bands.last_mut() else {
                bail!("line {}: attribute before any band declaration", lineno);
            };
            apply_attribute(band, trimmed, lineno)?;
        } else {
            let band = parse_declaration(trimmed, lineno)?;
            if map.contains(&band.name) {
                bail!("line {}: duplicate band: {}", lineno, band.name);
            }
            map.bands.push(band);
        }
    }

    Ok(map)
}

/// A declaration line: the band name followed by zero or more `[tag]`
/// markers. `[active]` sets the flag instead of becoming a category.
fn parse_declaration(line: &str, lineno: usize) -> Result<Band> {
    let name_end = line.find('[').unwrap_or(line.len());
    let name = line[..name_end].trim();
    if name.is_empty() {
        bail!("line {}: band declaration has no name", lineno);
    }

    let mut band = Band::new(name);
    let mut rest = line[name_end..].trim();
    while !rest.is_empty() {
        if !rest.starts_with('[') {
            bail!("line {}: expected [tag], found: {}", lineno, rest);
        }
        let Some(close) = rest.find(']') else {
            bail!("line {}: unclosed [tag]", lineno);
        };
        let tag = rest[1..close].trim();
        if tag.is_empty() {
            bail!("line {}: empty [tag]", lineno);
        }
        if tag == "active" {
            band.active = true;
        } else {
            band.tags.push(tag.to_string());
        }
        rest = rest[close + 1..].trim_start();
    }

    Ok(band)
}

fn apply_attribute(band: &mut Band, line: &str, lineno: usize) -> Result<()> {
    let Some((key, value)) = line.split_once(':') else {
        bail!("line {}: attribute missing ':' separator", lineno);
    };
    let value = value.trim();
    match key.trim() {
        "members" => {
            band.members = value
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }
        "note" => band.note = value.to_string(),
        other => bail!("line {}: unknown attribute: {}", lineno, other),
    }
    Ok(())
}
