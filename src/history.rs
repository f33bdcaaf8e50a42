/// Linear undo/redo over immutable snapshots.
///
/// The history always holds at least one snapshot (the initial state) and a cursor pointing at
/// the active one. Committing while some states are undone discards them: the redo branch is
/// lost on a new edit.
#[derive(Debug, Clone)]
pub struct History<S> {
    /// Snapshots in the order they were committed
    snapshots: Vec<S>,
    /// Index of the active snapshot
    cursor: usize,
    /// Maximum number of snapshots kept, oldest dropped first
    limit: Option<usize>,
}

impl<S: Clone> History<S> {
    /// Creates a history seeded with `initial`
    pub fn new(initial: S) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: None,
        }
    }

    /// Creates a history that keeps at most `limit` snapshots (never fewer than one)
    pub fn with_limit(initial: S, limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|limit| limit.max(1)),
            ..Self::new(initial)
        }
    }

    /// Records a new state and makes it the active one
    pub fn commit(&mut self, state: S) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(state);
        self.cursor = self.snapshots.len() - 1;

        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
                self.cursor -= excess;
            }
        }
    }

    /// Steps back one state, or returns `None` at the oldest state
    pub fn undo(&mut self) -> Option<&S> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Steps forward one state, or returns `None` at the newest state
    pub fn redo(&mut self) -> Option<&S> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    /// The active state
    pub fn current(&self) -> &S {
        &self.snapshots[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of snapshots held, including undone ones
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Drops every snapshot and starts over from `initial`
    pub fn reset(&mut self, initial: S) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }
}
