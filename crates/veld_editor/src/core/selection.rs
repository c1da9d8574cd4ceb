//! Selection and highlight groups.
//!
//! Both are ordered sets of guids referencing nodes owned by the scene
//! graph. Set semantics: adding an already-present member is a no-op;
//! insertion order is preserved for UI display. Membership deltas raise the
//! dirty flag, which the editor turns into change notifications.

use super::Guid;

/// The set of objects the user is currently manipulating.
#[derive(Clone, Debug, Default)]
pub struct SelectionGroup {
    /// Currently selected objects (in selection order)
    members: Vec<Guid>,
    /// Whether membership changed since the flag was last taken
    dirty: bool,
}

impl SelectionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all members in insertion order.
    pub fn members(&self) -> &[Guid] {
        &self.members
    }

    /// The primary (last selected) object.
    pub fn primary(&self) -> Option<Guid> {
        self.members.last().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, guid: Guid) -> bool {
        self.members.contains(&guid)
    }

    /// Check and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    /// Add a member. No-op if already present.
    pub fn add(&mut self, guid: Guid) {
        if !self.members.contains(&guid) {
            self.members.push(guid);
            self.dirty = true;
        }
    }

    /// Remove a member. No-op if absent.
    pub fn remove(&mut self, guid: Guid) {
        let before = self.members.len();
        self.members.retain(|&g| g != guid);
        if self.members.len() != before {
            self.dirty = true;
        }
    }

    /// Toggle a member's presence.
    pub fn toggle(&mut self, guid: Guid) {
        if self.contains(guid) {
            self.remove(guid);
        } else {
            self.add(guid);
        }
    }

    /// Replace the whole membership with a single object.
    pub fn replace(&mut self, guid: Guid) {
        if self.members.len() != 1 || self.members[0] != guid {
            self.members.clear();
            self.members.push(guid);
            self.dirty = true;
        }
    }

    /// Replace the whole membership.
    pub fn replace_all(&mut self, guids: impl IntoIterator<Item = Guid>) {
        self.members.clear();
        for guid in guids {
            if !self.members.contains(&guid) {
                self.members.push(guid);
            }
        }
        self.dirty = true;
    }

    /// Clear all members.
    pub fn clear(&mut self) {
        if !self.members.is_empty() {
            self.members.clear();
            self.dirty = true;
        }
    }
}

/// A possibly-larger set used purely for visual emphasis (e.g. hover).
///
/// Same set semantics as [`SelectionGroup`], kept as its own type because
/// highlight membership changes independently of selection.
#[derive(Clone, Debug, Default)]
pub struct HighlightGroup {
    members: Vec<Guid>,
    dirty: bool,
}

impl HighlightGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[Guid] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, guid: Guid) -> bool {
        self.members.contains(&guid)
    }

    pub fn take_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub fn add(&mut self, guid: Guid) {
        if !self.members.contains(&guid) {
            self.members.push(guid);
            self.dirty = true;
        }
    }

    pub fn remove(&mut self, guid: Guid) {
        let before = self.members.len();
        self.members.retain(|&g| g != guid);
        if self.members.len() != before {
            self.dirty = true;
        }
    }

    pub fn clear(&mut self) {
        if !self.members.is_empty() {
            self.members.clear();
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_add_is_set() {
        let mut sel = SelectionGroup::new();
        let a = Guid::new();
        sel.add(a);
        sel.add(a);
        assert_eq!(sel.len(), 1);
        assert!(sel.contains(a));
    }

    #[test]
    fn test_selection_insertion_order() {
        let mut sel = SelectionGroup::new();
        let a = Guid::new();
        let b = Guid::new();
        let c = Guid::new();
        sel.add(a);
        sel.add(b);
        sel.add(c);
        assert_eq!(sel.members(), &[a, b, c]);
        assert_eq!(sel.primary(), Some(c));
    }

    #[test]
    fn test_selection_replace() {
        let mut sel = SelectionGroup::new();
        let a = Guid::new();
        let b = Guid::new();
        sel.add(a);
        sel.replace(b);
        assert_eq!(sel.len(), 1);
        assert!(sel.contains(b));
        assert!(!sel.contains(a));
    }

    #[test]
    fn test_selection_dirty_on_delta_only() {
        let mut sel = SelectionGroup::new();
        let a = Guid::new();

        sel.add(a);
        assert!(sel.take_dirty());

        // No delta, no dirty
        sel.add(a);
        sel.remove(Guid::new());
        assert!(!sel.take_dirty());
    }

    #[test]
    fn test_highlight_group() {
        let mut hl = HighlightGroup::new();
        let a = Guid::new();
        hl.add(a);
        assert!(hl.contains(a));
        assert!(hl.take_dirty());
        hl.remove(a);
        assert!(hl.is_empty());
        assert!(hl.take_dirty());
    }
}
