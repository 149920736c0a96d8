//! The filter/search/highlight reconciler.
//!
//! Derived per-band visibility is a pure function of the current UI state,
//! recomputed in full after every state-changing event. Three stages run in
//! precedence order, each overriding the previous wholesale:
//!
//! 1. base filter pass — the conjunction of the enabled filter predicates;
//!    sets `hidden` only, never `highlighted`.
//! 2. search overlay — a non-empty query replaces stage 1 per band:
//!    visible and highlighted iff the case-folded text matches. Search does
//!    NOT compose with the filters; it supersedes them while active. This
//!    is inherited behavior, kept deliberately.
//! 3. member overlay — a selected member replaces both earlier stages:
//!    visible and highlighted iff the band's joined member string contains
//!    the selection. A live query stays in the input but has no effect.

pub mod debounce;
pub mod filters;
pub mod selection;

pub use debounce::{Debounce, SEARCH_DEBOUNCE};
pub use filters::Filters;
pub use selection::Selection;

use crate::graph::model::Band;

/// Derived presentation state for one band. Never stored; the render layer
/// consumes a fresh vector each pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeFlags {
    pub hidden: bool,
    pub highlighted: bool,
}

/// Normalize a raw search box buffer into the query the reconciler uses.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Compute the flags for every band. Total over any input; parallel to
/// `bands` by index.
pub fn reconcile(
    bands: &[Band],
    filters: &Filters,
    raw_query: &str,
    selection: &Selection,
) -> Vec<NodeFlags> {
    let mut flags: Vec<NodeFlags> = bands
        .iter()
        .map(|band| NodeFlags {
            hidden: !filters.allows(band),
            highlighted: false,
        })
        .collect();

    let query = normalize_query(raw_query);
    if !query.is_empty() {
        for (band, flag) in bands.iter().zip(flags.iter_mut()) {
            let matches = band.search_text().to_lowercase().contains(&query);
            *flag = NodeFlags {
                hidden: !matches,
                highlighted: matches,
            };
        }
    }

    if let Some(member) = selection.active() {
        for (band, flag) in bands.iter().zip(flags.iter_mut()) {
            let has_member = band.members_joined().contains(member);
            *flag = NodeFlags {
                hidden: !has_member,
                highlighted: has_member,
            };
        }
    }

    flags
}

/// Index of the first highlighted band, the scroll-into-view target after a
/// member-selection pass.
pub fn first_highlighted(flags: &[NodeFlags]) -> Option<usize> {
    flags.iter().position(|f| f.highlighted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::Band;

    fn band(name: &str, active: bool, tags: &[&str], members: &str) -> Band {
        let mut b = Band::new(name);
        b.active = active;
        b.tags = tags.iter().map(|t| t.to_string()).collect();
        b.members = members
            .split(',')
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        b
    }

    /// The §8 scenario set: one active primary band with members, one
    /// inactive external band without.
    fn scenario() -> Vec<Band> {
        vec![
            band("Mayhem", true, &["primary"], "euronymous,necrobutcher"),
            band("Dead Kennedys", false, &["external"], ""),
        ]
    }

    #[test]
    fn no_state_shows_everything_unhighlighted() {
        let bands = scenario();
        let flags = reconcile(&bands, &Filters::default(), "", &Selection::new());
        assert!(flags.iter().all(|f| !f.hidden && !f.highlighted));
    }

    #[test]
    fn active_filter_hides_inactive_band() {
        let bands = scenario();
        let filters = Filters {
            active: true,
            ..Default::default()
        };
        let flags = reconcile(&bands, &filters, "", &Selection::new());
        assert!(!flags[0].hidden);
        assert!(flags[1].hidden);
        // The filter pass never highlights.
        assert!(flags.iter().all(|f| !f.highlighted));
    }

    #[test]
    fn filter_pass_is_a_conjunction() {
        let bands = vec![
            band("a", true, &["core"], ""),
            band("b", false, &["core"], ""),
            band("c", true, &["external"], ""),
        ];
        let filters = Filters {
            active: true,
            core: true,
            external: true,
        };
        let flags = reconcile(&bands, &filters, "", &Selection::new());
        assert!(!flags[0].hidden);
        assert!(flags[1].hidden); // not active
        assert!(flags[2].hidden); // external, and not core
    }

    #[test]
    fn search_overrides_filters_entirely() {
        let bands = scenario();
        let filters = Filters {
            active: true,
            ..Default::default()
        };
        // "dead" matches only the band the active filter would hide.
        let flags = reconcile(&bands, &filters, "dead", &Selection::new());
        assert!(flags[0].hidden);
        assert!(!flags[0].highlighted);
        assert!(!flags[1].hidden);
        assert!(flags[1].highlighted);
    }

    #[test]
    fn search_is_case_folded_and_trimmed() {
        let bands = scenario();
        let flags = reconcile(&bands, &Filters::default(), "  MAYHEM ", &Selection::new());
        assert!(flags[0].highlighted);
        assert!(flags[1].hidden);
    }

    #[test]
    fn search_matches_member_and_note_text() {
        let bands = scenario();
        let flags = reconcile(&bands, &Filters::default(), "necro", &Selection::new());
        assert!(flags[0].highlighted);
        assert!(flags[1].hidden);
    }

    #[test]
    fn empty_query_after_clear_restores_filter_state() {
        let bands = scenario();
        let filters = Filters {
            active: true,
            ..Default::default()
        };
        let during = reconcile(&bands, &filters, "dead", &Selection::new());
        assert!(during[1].highlighted);
        let after = reconcile(&bands, &filters, "", &Selection::new());
        assert!(!after[0].hidden);
        assert!(after[1].hidden);
        assert!(after.iter().all(|f| !f.highlighted));
    }

    #[test]
    fn member_selection_overrides_search_and_filters() {
        let bands = scenario();
        let filters = Filters {
            active: true,
            core: true,
            external: true,
        };
        let mut sel = Selection::new();
        sel.toggle("euronymous");
        // The query would pick band 1; the selection picks band 0 anyway.
        let flags = reconcile(&bands, &filters, "dead", &sel);
        assert!(!flags[0].hidden);
        assert!(flags[0].highlighted);
        assert!(flags[1].hidden);
        assert!(!flags[1].highlighted);
    }

    #[test]
    fn reselecting_member_restores_filter_only_state() {
        let bands = scenario();
        let filters = Filters {
            active: true,
            ..Default::default()
        };
        let mut sel = Selection::new();
        sel.toggle("euronymous");
        sel.toggle("euronymous");
        let flags = reconcile(&bands, &filters, "", &sel);
        let base = reconcile(&bands, &filters, "", &Selection::new());
        assert_eq!(flags, base);
    }

    #[test]
    fn member_matching_is_substring_containment() {
        // Known correctness gap, preserved: "ron" is inside "euronymous".
        let bands = scenario();
        let mut sel = Selection::new();
        sel.toggle("ron");
        let flags = reconcile(&bands, &Filters::default(), "", &sel);
        assert!(flags[0].highlighted);
        assert!(flags[1].hidden);
    }

    #[test]
    fn member_with_no_bands_hides_everything() {
        let bands = scenario();
        let mut sel = Selection::new();
        sel.toggle("abbath");
        let flags = reconcile(&bands, &Filters::default(), "", &sel);
        assert!(flags.iter().all(|f| f.hidden && !f.highlighted));
        assert_eq!(first_highlighted(&flags), None);
    }

    #[test]
    fn highlighted_is_never_hidden() {
        let bands = scenario();
        let states = [
            ("", None),
            ("dead", None),
            ("mayhem", None),
            ("", Some("euronymous")),
            ("dead", Some("euronymous")),
        ];
        for (query, member) in states {
            let mut sel = Selection::new();
            if let Some(m) = member {
                sel.toggle(m);
            }
            for filters in [
                Filters::default(),
                Filters {
                    active: true,
                    core: true,
                    external: true,
                },
            ] {
                let flags = reconcile(&bands, &filters, query, &sel);
                assert!(
                    flags.iter().all(|f| !(f.hidden && f.highlighted)),
                    "hidden+highlighted for query={:?} member={:?}",
                    query,
                    member
                );
            }
        }
    }

    #[test]
    fn first_highlighted_finds_scroll_target() {
        let bands = scenario();
        let mut sel = Selection::new();
        sel.toggle("euronymous");
        let flags = reconcile(&bands, &Filters::default(), "", &sel);
        assert_eq!(first_highlighted(&flags), Some(0));
    }
}
