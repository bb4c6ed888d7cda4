//! The ordered attachment list.
//!
//! Insertion order is significant: it drives both tile order in the preview
//! grid and field order in the submitted payload.

use crate::types::{Attachment, AttachmentId, MediaKind};

/// Ordered sequence of accepted attachments with unique ids.
#[derive(Clone, Debug)]
pub struct AttachmentList<F> {
    items: Vec<Attachment<F>>,
}

impl<F> Default for AttachmentList<F> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<F> AttachmentList<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attachment at the end.
    ///
    /// Returns false, leaving the list unchanged, if the id is already present.
    pub fn append(&mut self, attachment: Attachment<F>) -> bool {
        if self.contains(attachment.id) {
            tracing::warn!(id = %attachment.id, "duplicate attachment id, not appended");
            return false;
        }
        self.items.push(attachment);
        true
    }

    /// Remove the attachment with the given id.
    ///
    /// Absent ids are a no-op and return `None`.
    pub fn remove(&mut self, id: AttachmentId) -> Option<Attachment<F>> {
        let index = self.items.iter().position(|a| a.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: AttachmentId) -> Option<&Attachment<F>> {
        self.items.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: AttachmentId) -> bool {
        self.items.iter().any(|a| a.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attachment<F>> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = AttachmentId> + '_ {
        self.items.iter().map(|a| a.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_of(&self, kind: MediaKind) -> usize {
        self.items.iter().filter(|a| a.kind == kind).count()
    }

    pub fn total_bytes(&self) -> u64 {
        self.items.iter().map(|a| a.byte_size).sum()
    }
}

impl<'a, F> IntoIterator for &'a AttachmentList<F> {
    type Item = &'a Attachment<F>;
    type IntoIter = std::slice::Iter<'a, Attachment<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IdGenerator, InMemoryFile};

    fn attachment(ids: &mut IdGenerator, kind: MediaKind, size: usize) -> Attachment<InMemoryFile> {
        let content_type = match kind {
            MediaKind::Image => "image/png",
            MediaKind::Video => "video/mp4",
        };
        Attachment {
            id: ids.next_at(1000),
            source: InMemoryFile::new("f", content_type, vec![0u8; size]),
            preview: "data:,".into(),
            kind,
            byte_size: size as u64,
            duration_seconds: None,
        }
    }

    #[test]
    fn test_append_and_remove_preserve_order() {
        let mut ids = IdGenerator::new();
        let mut list = AttachmentList::new();
        let a = attachment(&mut ids, MediaKind::Image, 1);
        let b = attachment(&mut ids, MediaKind::Video, 2);
        let c = attachment(&mut ids, MediaKind::Image, 3);
        let (ida, idb, idc) = (a.id, b.id, c.id);
        assert!(list.append(a));
        assert!(list.append(b));
        assert!(list.append(c));

        assert!(list.remove(idb).is_some());
        assert_eq!(list.ids().collect::<Vec<_>>(), vec![ida, idc]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut ids = IdGenerator::new();
        let mut list = AttachmentList::new();
        list.append(attachment(&mut ids, MediaKind::Image, 1));
        let stranger = ids.next_at(1000);

        assert!(list.remove(stranger).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut ids = IdGenerator::new();
        let mut list = AttachmentList::new();
        let a = attachment(&mut ids, MediaKind::Image, 1);
        assert!(list.append(a.clone()));
        assert!(!list.append(a));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_counts_and_total() {
        let mut ids = IdGenerator::new();
        let mut list = AttachmentList::new();
        list.append(attachment(&mut ids, MediaKind::Image, 100));
        list.append(attachment(&mut ids, MediaKind::Image, 200));
        list.append(attachment(&mut ids, MediaKind::Video, 300));
        assert_eq!(list.count_of(MediaKind::Image), 2);
        assert_eq!(list.count_of(MediaKind::Video), 1);
        assert_eq!(list.total_bytes(), 600);
    }

    #[test]
    fn test_random_add_remove_sequences() {
        // Deterministic pseudo-random walk over appends and removals, checked
        // against a plain Vec model.
        let mut ids = IdGenerator::new();
        let mut list = AttachmentList::new();
        let mut model: Vec<AttachmentId> = Vec::new();
        let mut state: u32 = 0x2545_f491;

        for _ in 0..500 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if state % 3 != 0 || model.is_empty() {
                let a = attachment(&mut ids, MediaKind::Image, 1);
                model.push(a.id);
                list.append(a);
            } else {
                let victim = model.remove(state as usize % model.len());
                assert!(list.remove(victim).is_some());
            }
            assert_eq!(list.ids().collect::<Vec<_>>(), model);
        }
    }
}
