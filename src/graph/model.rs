/// Category labels that filtering cares about. Other tags are carried
/// through untouched and ignored by the filter pass.
pub const TAG_CORE: &str = "core";
pub const TAG_PRIMARY: &str = "primary";
pub const TAG_EXTERNAL: &str = "external";

/// A node in the map — one band or act in the genealogy.
///
/// The set of bands is fixed once the map file is loaded; nothing in the
/// crate inserts or removes bands afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    /// Lowercased hyphen slug of the name. Opaque; kept for listings.
    pub id: String,
    pub name: String,
    /// Free-form description line, may be empty.
    pub note: String,
    /// "Currently active act" flag.
    pub active: bool,
    /// Category labels in declaration order (`core`, `primary`,
    /// `external`, anything else).
    pub tags: Vec<String>,
    /// Associated people, in declaration order. May be empty.
    pub members: Vec<String>,
}

impl Band {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slug(&name),
            name,
            note: String::new(),
            active: false,
            tags: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True when tagged `core` or `primary` — the "core only" filter
    /// accepts both.
    pub fn is_core(&self) -> bool {
        self.has_tag(TAG_CORE) || self.has_tag(TAG_PRIMARY)
    }

    pub fn is_external(&self) -> bool {
        self.has_tag(TAG_EXTERNAL)
    }

    /// Everything the search pass can match against: name, tags, members
    /// and note, space-joined in that order.
    pub fn search_text(&self) -> String {
        let mut parts = vec![self.name.clone()];
        parts.extend(self.tags.iter().cloned());
        parts.extend(self.members.iter().cloned());
        if !self.note.is_empty() {
            parts.push(self.note.clone());
        }
        parts.join(" ")
    }

    /// The raw comma-joined member string. Member selection matches by
    /// substring containment on this string, not by exact list membership,
    /// so identifiers that are substrings of one another will cross-match.
    pub fn members_joined(&self) -> String {
        self.members.join(",")
    }
}

/// The full map: an ordered, fixed collection of bands.
///
/// Order is preserved exactly as it appears in `map.kvlt`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MapData {
    pub bands: Vec<Band>,
}

impl MapData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Band> {
        self.bands.iter().find(|b| b.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bands.iter().any(|b| b.name == name)
    }

    /// Add a band. Panics if the name is already present.
    pub fn add_band(&mut self, band: Band) {
        assert!(!self.contains(&band.name), "duplicate band: {}", band.name);
        self.bands.push(band);
    }

    /// All members across all bands, first-appearance order, de-duplicated.
    /// This is the member-tag surface the TUI renders.
    pub fn members(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for band in &self.bands {
            for member in &band.members {
                if !seen.iter().any(|m| m == member) {
                    seen.push(member.clone());
                }
            }
        }
        seen
    }

    /// How many bands list `member` (substring containment, matching the
    /// selection semantics).
    pub fn band_count_for(&self, member: &str) -> usize {
        self.bands
            .iter()
            .filter(|b| b.members_joined().contains(member))
            .count()
    }
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(name: &str, tags: &[&str], members: &[&str]) -> Band {
        let mut b = Band::new(name);
        b.tags = tags.iter().map(|t| t.to_string()).collect();
        b.members = members.iter().map(|m| m.to_string()).collect();
        b
    }

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(Band::new("Dark Funeral").id, "dark-funeral");
        assert_eq!(Band::new("Emperor").id, "emperor");
        assert_eq!(Band::new("1349").id, "1349");
    }

    #[test]
    fn core_accepts_core_and_primary_tags() {
        assert!(band("a", &["core"], &[]).is_core());
        assert!(band("b", &["primary"], &[]).is_core());
        assert!(!band("c", &["external"], &[]).is_core());
    }

    #[test]
    fn search_text_covers_name_tags_members_note() {
        let mut b = band("Mayhem", &["primary"], &["euronymous"]);
        b.note = "Oslo 1984".to_string();
        let text = b.search_text();
        assert!(text.contains("Mayhem"));
        assert!(text.contains("primary"));
        assert!(text.contains("euronymous"));
        assert!(text.contains("Oslo 1984"));
    }

    #[test]
    fn members_index_preserves_first_appearance_order() {
        let mut map = MapData::new();
        map.add_band(band("a", &[], &["varg", "fenriz"]));
        map.add_band(band("b", &[], &["fenriz", "nocturno"]));
        assert_eq!(map.members(), vec!["varg", "fenriz", "nocturno"]);
    }

    #[test]
    fn band_count_uses_substring_containment() {
        let mut map = MapData::new();
        map.add_band(band("a", &[], &["euronymous"]));
        map.add_band(band("b", &[], &["ron"]));
        // "ron" is a substring of "euronymous", so it counts both.
        assert_eq!(map.band_count_for("ron"), 2);
        assert_eq!(map.band_count_for("euronymous"), 1);
    }

    #[test]
    #[should_panic(expected = "duplicate band")]
    fn add_band_rejects_duplicates() {
        let mut map = MapData::new();
        map.add_band(Band::new("Mayhem"));
        map.add_band(Band::new("Mayhem"));
    }
}
