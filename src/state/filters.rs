use serde::{Deserialize, Serialize};

use crate::graph::model::Band;

/// The three independent visibility filters. Persisted as a JSON triple
/// under the `bm-map-filters` key; the field names are the storage format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Show only currently active acts.
    pub active: bool,
    /// Show only bands tagged `core` or `primary`.
    pub core: bool,
    /// Hide bands tagged `external`.
    pub external: bool,
}

impl Filters {
    /// The base visibility pass: the conjunction of every enabled
    /// predicate. Order among the three does not matter.
    pub fn allows(&self, band: &Band) -> bool {
        let mut should_show = true;
        if self.active && !band.active {
            should_show = false;
        }
        if self.core && !band.is_core() {
            should_show = false;
        }
        if self.external && band.is_external() {
            should_show = false;
        }
        should_show
    }
}
