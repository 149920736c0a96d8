/// The member-selection state machine: at most one member is selected at a
/// time. Page-lifetime, never persisted.
///
/// Transitions: toggling the selected member deselects it; toggling a
/// different member replaces the selection; `clear` (outside interaction,
/// Escape) always returns to no selection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    member: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.member.as_deref()
    }

    pub fn is_selected(&self, member: &str) -> bool {
        self.member.as_deref() == Some(member)
    }

    /// Toggle `member`: returns true when the member ends up selected,
    /// false when the toggle deselected it.
    pub fn toggle(&mut self, member: &str) -> bool {
        if self.is_selected(member) {
            self.member = None;
            false
        } else {
            self.member = Some(member.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.member = None;
    }
}
