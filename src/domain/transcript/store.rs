//! TranscriptStore - the ordered, append-only log of conversation turns.
//!
//! The store is the single source of truth the UI renders. Writers go
//! through `append` and `replace_all`; readers take snapshots. Ids come from
//! a high-water mark that only moves forward, so an id is never handed out
//! twice even across a bulk replace.

use std::sync::{PoisonError, RwLock};

use super::errors::TranscriptError;
use super::turn::{Turn, TurnDraft};
use crate::domain::foundation::TurnId;

/// One element of a bulk replacement.
#[derive(Debug, Clone)]
pub enum TranscriptEntry {
    /// A turn already admitted by this store, kept with its id.
    Existing(Turn),
    /// A new turn that receives the next id.
    New(TurnDraft),
}

impl From<Turn> for TranscriptEntry {
    fn from(turn: Turn) -> Self {
        TranscriptEntry::Existing(turn)
    }
}

impl From<TurnDraft> for TranscriptEntry {
    fn from(draft: TurnDraft) -> Self {
        TranscriptEntry::New(draft)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    turns: Vec<Turn>,
    next_id: TurnId,
}

/// Ordered log of turns with store-assigned ids.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    state: RwLock<StoreState>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn at the end and returns its id.
    pub fn append(&self, draft: TurnDraft) -> TurnId {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = state.next_id;
        state.next_id = id.next();
        state.turns.push(Turn::admit(id, draft));
        id
    }

    /// Atomically swaps the whole sequence.
    ///
    /// Existing turns keep their ids; new drafts are numbered after the
    /// current high-water mark. Nothing changes unless the resulting ids are
    /// strictly increasing.
    ///
    /// # Errors
    ///
    /// - `Unissued` if an existing turn carries an id this store never issued
    /// - `OutOfOrder` if the ids would not be strictly increasing
    pub fn replace_all<I>(&self, entries: I) -> Result<Vec<TurnId>, TranscriptError>
    where
        I: IntoIterator<Item = TranscriptEntry>,
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut next_id = state.next_id;
        let mut previous: Option<TurnId> = None;
        let mut turns = Vec::new();

        for entry in entries {
            let turn = match entry {
                TranscriptEntry::Existing(turn) => {
                    if turn.id() >= state.next_id {
                        return Err(TranscriptError::Unissued(turn.id()));
                    }
                    turn
                }
                TranscriptEntry::New(draft) => {
                    let id = next_id;
                    next_id = id.next();
                    Turn::admit(id, draft)
                }
            };
            if let Some(previous) = previous {
                if turn.id() <= previous {
                    return Err(TranscriptError::OutOfOrder {
                        previous,
                        next: turn.id(),
                    });
                }
            }
            previous = Some(turn.id());
            turns.push(turn);
        }

        let ids = turns.iter().map(Turn::id).collect();
        state.turns = turns;
        state.next_id = next_id;
        Ok(ids)
    }

    /// Returns the current ordered sequence.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .turns
            .clone()
    }

    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .turns
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<Turn> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .turns
            .last()
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transcript::Role;
    use proptest::prelude::*;

    #[test]
    fn append_assigns_sequential_ids() {
        let store = TranscriptStore::new();
        let first = store.append(TurnDraft::user("hello"));
        let second = store.append(TurnDraft::assistant("hi"));

        assert_eq!(first, TurnId::from_sequence(0));
        assert_eq!(second, TurnId::from_sequence(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.last().map(|t| t.role()), Some(Role::Assistant));
    }

    #[test]
    fn replace_all_keeps_existing_and_numbers_new() {
        let store = TranscriptStore::new();
        store.append(TurnDraft::user("one"));
        let prior = store.snapshot();

        let entries = prior
            .into_iter()
            .map(TranscriptEntry::from)
            .chain([
                TranscriptEntry::from(TurnDraft::assistant("two")),
                TranscriptEntry::from(TurnDraft::assistant("three")),
            ]);
        let ids = store.replace_all(entries).unwrap();

        assert_eq!(
            ids,
            vec![
                TurnId::from_sequence(0),
                TurnId::from_sequence(1),
                TurnId::from_sequence(2)
            ]
        );
        assert_eq!(store.snapshot()[2].content(), "three");
    }

    #[test]
    fn replace_all_never_reuses_ids() {
        let store = TranscriptStore::new();
        store.append(TurnDraft::user("a"));
        store.append(TurnDraft::user("b"));

        store.replace_all(Vec::new()).unwrap();
        let id = store.append(TurnDraft::user("c"));

        assert_eq!(id, TurnId::from_sequence(2));
    }

    #[test]
    fn replace_all_rejects_reordering_without_mutating() {
        let store = TranscriptStore::new();
        store.append(TurnDraft::user("a"));
        store.append(TurnDraft::user("b"));
        let mut reversed = store.snapshot();
        reversed.reverse();

        let err = store
            .replace_all(reversed.into_iter().map(TranscriptEntry::from))
            .unwrap_err();

        assert_eq!(
            err,
            TranscriptError::OutOfOrder {
                previous: TurnId::from_sequence(1),
                next: TurnId::from_sequence(0),
            }
        );
        assert_eq!(store.snapshot()[0].content(), "a");
    }

    #[test]
    fn replace_all_rejects_foreign_turns() {
        let other = TranscriptStore::new();
        other.append(TurnDraft::user("x"));
        other.append(TurnDraft::user("y"));
        let foreign = other.snapshot().pop().unwrap();

        let store = TranscriptStore::new();
        let err = store
            .replace_all([TranscriptEntry::from(foreign)])
            .unwrap_err();
        assert_eq!(err, TranscriptError::Unissued(TurnId::from_sequence(1)));
        assert!(store.is_empty());
    }

    proptest! {
        #[test]
        fn ids_strictly_increase_across_appends_and_replaces(
            ops in proptest::collection::vec((any::<bool>(), 0usize..4), 1..30)
        ) {
            let store = TranscriptStore::new();
            let mut last_len = 0usize;
            for (bulk, extra) in ops {
                if bulk {
                    let entries = store
                        .snapshot()
                        .into_iter()
                        .map(TranscriptEntry::from)
                        .chain((0..extra).map(|i| TurnDraft::assistant(format!("r{i}")).into()));
                    store.replace_all(entries).unwrap();
                } else {
                    store.append(TurnDraft::user("u"));
                }
                let snapshot = store.snapshot();
                prop_assert!(snapshot.len() >= last_len);
                prop_assert!(snapshot.windows(2).all(|w| w[0].id() < w[1].id()));
                last_len = snapshot.len();
            }
        }
    }
}
