/// A draft copy of a value that is edited in isolation and then committed
/// or thrown away.
///
/// The buffer is closed until [`EditBuffer::open`] snapshots the
/// authoritative value. While open, [`EditBuffer::sync`] replaces the draft
/// when the authoritative value changed underneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer<T> {
    base: Option<T>,
    draft: Option<T>,
}

impl<T> Default for EditBuffer<T> {
    fn default() -> Self {
        Self {
            base: None,
            draft: None,
        }
    }
}

impl<T: Clone + PartialEq> EditBuffer<T> {
    /// Opens the buffer on a copy of `current`, dropping any previous draft.
    pub fn open(&mut self, current: &T) {
        self.base = Some(current.clone());
        self.draft = Some(current.clone());
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Re-snapshots `current` if it differs from the value the draft was
    /// opened on. Returns `true` if the draft was replaced.
    pub fn sync(&mut self, current: &T) -> bool {
        if !self.is_open() || self.base.as_ref() == Some(current) {
            return false;
        }
        self.open(current);
        true
    }

    #[must_use]
    pub fn draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut T> {
        self.draft.as_mut()
    }

    /// Returns `true` if the draft differs from the value it was opened on.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft.is_some() && self.draft != self.base
    }

    /// Closes the buffer and hands back the draft.
    pub fn commit(&mut self) -> Option<T> {
        self.base = None;
        self.draft.take()
    }

    /// Closes the buffer without applying anything.
    pub fn discard(&mut self) {
        self.base = None;
        self.draft = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn closed_until_opened() {
        let mut buf = EditBuffer::<i32>::default();
        assert!(!buf.is_open());
        assert!(buf.draft_mut().is_none());
        assert!(buf.commit().is_none());
    }

    #[test]
    fn commit_returns_edited_draft() {
        let mut buf = EditBuffer::default();
        buf.open(&1);
        *buf.draft_mut().unwrap() = 5;
        assert!(buf.is_dirty());
        assert_eq!(buf.commit(), Some(5));
        assert!(!buf.is_open());
    }

    #[test]
    fn discard_drops_edits() {
        let mut buf = EditBuffer::default();
        buf.open(&"a".to_owned());
        buf.draft_mut().unwrap().push('b');
        buf.discard();
        assert!(!buf.is_open());
        assert!(buf.draft().is_none());
    }

    #[test]
    fn sync_follows_external_changes_only() {
        let mut buf = EditBuffer::default();
        assert!(!buf.sync(&1));
        buf.open(&1);
        *buf.draft_mut().unwrap() = 2;
        assert!(!buf.sync(&1));
        assert_eq!(buf.draft(), Some(&2));
        assert!(buf.sync(&3));
        assert_eq!(buf.draft(), Some(&3));
        assert!(!buf.is_dirty());
    }
}
