use super::judge::Judgement;

/// Per-note judgement state. Terminal after leaving `Pending`; the setters
/// refuse a second transition so no note can be scored twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    Pending,
    Hit(Judgement),
    Missed,
    /// Consumed without a direct judgement. Drumroll end markers land here
    /// once their window resolves.
    Resolved,
}

impl NoteState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Judgement flags for every chart event, indexed by event position.
#[derive(Debug, Clone)]
pub struct PlayState {
    note_states: Vec<NoteState>,
}

impl PlayState {
    pub fn new(note_count: usize) -> Self {
        Self {
            note_states: vec![NoteState::Pending; note_count],
        }
    }

    pub fn reset(&mut self) {
        for state in &mut self.note_states {
            *state = NoteState::Pending;
        }
    }

    /// Mark a hit. Returns false if the note was already judged.
    pub fn set_hit(&mut self, index: usize, judgement: Judgement) -> bool {
        self.transition(index, NoteState::Hit(judgement))
    }

    /// Mark a miss. Returns false if the note was already judged.
    pub fn set_missed(&mut self, index: usize) -> bool {
        self.transition(index, NoteState::Missed)
    }

    /// Mark an implicit resolution (no scoring effect).
    pub fn set_resolved(&mut self, index: usize) -> bool {
        self.transition(index, NoteState::Resolved)
    }

    fn transition(&mut self, index: usize, to: NoteState) -> bool {
        match self.note_states.get_mut(index) {
            Some(state) if state.is_pending() => {
                *state = to;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<NoteState> {
        self.note_states.get(index).copied()
    }

    pub fn is_pending(&self, index: usize) -> bool {
        self.get(index).is_some_and(|s| s.is_pending())
    }

    pub fn all_processed(&self) -> bool {
        self.note_states.iter().all(|s| !s.is_pending())
    }
}
