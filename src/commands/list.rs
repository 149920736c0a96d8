//! `kvlt list` — print all bands in map order.

use anyhow::Result;

use crate::graph::model::{Band, MapData};
use crate::map;
use crate::parser::map as map_parser;

pub fn run() -> Result<()> {
    let root = map::find_root()?;
    let content = std::fs::read_to_string(map::map_path(&root))?;
    let data = map_parser::parse(&content)?;

    if data.bands.is_empty() {
        println!("  No bands.");
    } else {
        for line in list_bands(&data) {
            println!("  {}", line);
        }
    }
    Ok(())
}

fn list_bands(data: &MapData) -> Vec<String> {
    data.bands.iter().map(band_line).collect()
}

fn band_line(band: &Band) -> String {
    let mut line = band.name.clone();
    for tag in &band.tags {
        line.push_str(&format!(" [{}]", tag));
    }
    if band.active {
        line.push_str(" [active]");
    }
    if !band.members.is_empty() {
        line.push_str(&format!(" : {}", band.members.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_bands_preserves_map_order_and_tags() {
        let data = map_parser::parse(
            "Mayhem [primary] [active]\n  members: euronymous, necrobutcher\nBurzum [core]\n",
        )
        .unwrap();
        assert_eq!(
            list_bands(&data),
            vec![
                "Mayhem [primary] [active] : euronymous, necrobutcher".to_string(),
                "Burzum [core]".to_string(),
            ]
        );
    }

    #[test]
    fn band_line_omits_empty_members() {
        let data = map_parser::parse("Ildjarn\n").unwrap();
        assert_eq!(band_line(&data.bands[0]), "Ildjarn");
    }
}
