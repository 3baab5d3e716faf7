//! In-memory message store.
//!
//! An ordered list of turns; insertion order is display order. Lives for
//! the duration of one chat process and is never persisted.

use medassist_types::chat::ChatTurn;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn and return its id.
    pub fn push(&mut self, turn: ChatTurn) -> Uuid {
        let id = turn.id;
        self.turns.push(turn);
        id
    }

    /// Remove the turn with the given id, if present.
    pub fn remove(&mut self, id: &Uuid) -> Option<ChatTurn> {
        let index = self.turns.iter().position(|t| &t.id == id)?;
        Some(self.turns.remove(index))
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.turns.iter().any(|t| &t.id == id)
    }

    /// Remove every turn. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.turns.len();
        self.turns.clear();
        removed
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
