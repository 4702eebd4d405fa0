//! Append-only conversation transcript.
//!
//! Entries are identified by generated ids, never by their display text, so a
//! real response that happens to equal the placeholder sentinel can never be
//! confused with the transient placeholder entry.

/// Identifier for one transcript entry.
pub type EntryId = u64;

/// Display text of the transient placeholder entry.
pub const PLACEHOLDER_TEXT: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub sender: Sender,
    pub text: String,
    pub placeholder: bool,
}

/// Ordered, append-only message sequence; insertion order is display order.
///
/// Mutation is limited to `append_*`, `replace_placeholder` and
/// `remove_placeholder`; callers never get raw mutable access to the
/// sequence.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_id: EntryId,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_user(&mut self, text: impl Into<String>) -> EntryId {
        self.push(Sender::User, text.into(), false)
    }

    pub fn append_bot(&mut self, text: impl Into<String>) -> EntryId {
        self.push(Sender::Bot, text.into(), false)
    }

    /// Appends the transient placeholder shown while a response is pending.
    pub fn append_placeholder(&mut self) -> EntryId {
        self.push(Sender::Bot, PLACEHOLDER_TEXT.to_string(), true)
    }

    fn push(&mut self, sender: Sender, text: String, placeholder: bool) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            sender,
            text,
            placeholder,
        });
        id
    }

    /// Reconciles the placeholder with the real response, in place.
    ///
    /// Returns false when the id does not name a live placeholder.
    pub fn replace_placeholder(&mut self, id: EntryId, text: impl Into<String>) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id && entry.placeholder)
        {
            Some(entry) => {
                entry.text = text.into();
                entry.placeholder = false;
                true
            }
            None => false,
        }
    }

    /// Drops the placeholder entirely; surrounding entries keep their order.
    pub fn remove_placeholder(&mut self, id: EntryId) -> bool {
        match self
            .entries
            .iter()
            .position(|entry| entry.id == id && entry.placeholder)
        {
            Some(position) => {
                self.entries.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn placeholder_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.placeholder)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Sender, Transcript, PLACEHOLDER_TEXT};

    #[test]
    fn entries_keep_insertion_order_and_unique_ids() {
        let mut transcript = Transcript::new();
        let first = transcript.append_user("one");
        let second = transcript.append_bot("two");
        let third = transcript.append_placeholder();

        assert!(first < second && second < third);
        let texts: Vec<&str> = transcript
            .entries()
            .iter()
            .map(|entry| entry.text.as_str())
            .collect();
        assert_eq!(texts, vec!["one", "two", PLACEHOLDER_TEXT]);
    }

    #[test]
    fn replace_reconciles_placeholder_in_place() {
        let mut transcript = Transcript::new();
        transcript.append_user("code");
        let placeholder = transcript.append_placeholder();
        transcript.append_user("later");

        assert!(transcript.replace_placeholder(placeholder, "analysis"));
        assert_eq!(transcript.entries()[1].text, "analysis");
        assert_eq!(transcript.entries()[1].sender, Sender::Bot);
        assert!(!transcript.entries()[1].placeholder);
        assert_eq!(transcript.placeholder_count(), 0);
    }

    #[test]
    fn replace_refuses_reconciled_and_unknown_entries() {
        let mut transcript = Transcript::new();
        let placeholder = transcript.append_placeholder();

        assert!(transcript.replace_placeholder(placeholder, "analysis"));
        assert!(!transcript.replace_placeholder(placeholder, "again"));
        assert!(!transcript.replace_placeholder(999, "missing"));
    }

    #[test]
    fn remove_drops_only_the_placeholder() {
        let mut transcript = Transcript::new();
        let user = transcript.append_user("code");
        let placeholder = transcript.append_placeholder();

        assert!(transcript.remove_placeholder(placeholder));
        assert!(!transcript.remove_placeholder(user));
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.entries()[0].id, user);
    }

    #[test]
    fn sentinel_text_in_a_real_entry_is_not_a_placeholder() {
        let mut transcript = Transcript::new();
        let literal = transcript.append_bot(PLACEHOLDER_TEXT);
        let placeholder = transcript.append_placeholder();

        assert!(!transcript.remove_placeholder(literal));
        assert!(transcript.replace_placeholder(placeholder, "real"));
        assert_eq!(transcript.entries()[0].text, PLACEHOLDER_TEXT);
        assert_eq!(transcript.entries()[1].text, "real");
    }
}
