//! `kvlt members` — print the member index with per-member band counts.

use anyhow::Result;

use crate::graph::model::MapData;
use crate::map;
use crate::parser::map as map_parser;

pub fn run() -> Result<()> {
    let root = map::find_root()?;
    let content = std::fs::read_to_string(map::map_path(&root))?;
    let data = map_parser::parse(&content)?;

    let lines = member_lines(&data);
    if lines.is_empty() {
        println!("  No members listed.");
    } else {
        for line in lines {
            println!("  {}", line);
        }
    }
    Ok(())
}

fn member_lines(data: &MapData) -> Vec<String> {
    data.members()
        .into_iter()
        .map(|member| {
            let count = data.band_count_for(&member);
            let plural = if count == 1 { "band" } else { "bands" };
            format!("{} ({} {})", member, count, plural)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_lines_count_bands() {
        let data = map_parser::parse(
            "Mayhem\n  members: euronymous, hellhammer\nArcturus\n  members: hellhammer\n",
        )
        .unwrap();
        assert_eq!(
            member_lines(&data),
            vec![
                "euronymous (1 band)".to_string(),
                "hellhammer (2 bands)".to_string(),
            ]
        );
    }

    #[test]
    fn empty_map_has_no_member_lines() {
        let data = map_parser::parse("Ildjarn\n").unwrap();
        assert!(member_lines(&data).is_empty());
    }
}
