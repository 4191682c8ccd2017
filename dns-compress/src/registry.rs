use tracing::trace;

/// Positions of the names written so far into one message.
///
/// The first entry is always the start of the message itself and is never
/// used as a compression target. The capacity counts every slot of the list,
/// including the start of the message and a terminating slot, so a registry
/// of capacity `n` remembers at most `n - 2` names. Entries are only ever
/// appended; a full or sealed registry silently ignores new names.
#[derive(Debug, Clone)]
pub struct NameRegistry {
    positions: Vec<usize>,
    capacity: usize,
    sealed: bool,
}

impl NameRegistry {
    pub fn new(capacity: usize) -> Self {
        let mut positions = Vec::with_capacity(capacity.max(1));
        positions.push(0);
        Self {
            positions,
            capacity,
            sealed: false,
        }
    }

    /// Number of entries, including the start of the message.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false, the start of the message is always present.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Whether another name could still be recorded.
    pub fn has_room(&self) -> bool {
        !self.sealed && self.positions.len() + 1 < self.capacity
    }

    /// The positions of the recorded names, oldest first.
    pub fn candidates(&self) -> &[usize] {
        &self.positions[1..]
    }

    /// Records a name written at message offset `pos`. Returns false, and
    /// leaves the registry untouched, if there is no room for it.
    pub fn push(&mut self, pos: usize) -> bool {
        if !self.has_room() {
            trace!("Registry full, not recording name at {}", pos);
            return false;
        }
        self.positions.push(pos);
        true
    }

    /// Keeps matching against the recorded names but stops recording new
    /// ones.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Forgets all names, ready for a new message.
    pub fn clear(&mut self) {
        self.positions.truncate(1);
        self.sealed = false;
    }
}
