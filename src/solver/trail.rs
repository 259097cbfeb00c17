use tracing::debug;

use super::assignment::{AssignKind, AssignmentTable, Status, Truth};
use super::data::{Lit, Var};

/// The chronological record of assignments.
///
/// Entries in `[0, head)` have been propagated and are part of the model.
/// Entries in `[head, tail)` are queued unit-propagation work: their records
/// are pending and carry the queued polarity, but no decision level yet.
/// Exactly one literal, the one at `head`, is being propagated at any time
/// inside the propagation loop.
pub(crate) struct Trail {
    sequence: Vec<Lit>,
    head: usize,
    tail: usize,

    /// Positions of decision entries, in order. The k-th decision opened
    /// decision level k + 1.
    decisions: Vec<usize>,

    level: u32,

    table: AssignmentTable,
}

impl Trail {
    pub fn new(num_vars: usize) -> Self {
        Trail {
            sequence: Vec::with_capacity(num_vars * 2),
            head: 0,
            tail: 0,
            decisions: Vec::new(),
            level: 0,
            table: AssignmentTable::new(num_vars),
        }
    }

    pub fn num_vars(&self) -> usize {
        self.table.num_vars()
    }

    pub fn decision_level(&self) -> u32 {
        self.level
    }

    /// Queue `lit` to become true. A decision opens a new decision level.
    /// The model assignment itself is deferred until the propagator consumes
    /// the entry.
    pub fn enqueue(&mut self, lit: Lit, kind: AssignKind) {
        debug_assert_eq!(self.table.status(lit), Status::Available);

        self.table.set_pending(lit, kind);
        if kind == AssignKind::Decision {
            self.decisions.push(self.tail);
            self.level += 1;
        }

        if self.tail == self.sequence.len() {
            self.sequence.push(lit);
        } else {
            self.sequence[self.tail] = lit;
        }
        self.tail += 1;
    }

    pub fn has_pending(&self) -> bool {
        self.head < self.tail
    }

    /// Assign the entry at the propagation frontier and hand it back. The
    /// frontier itself only moves in [`Trail::advance_head`], after the
    /// watch scan for this literal completed without conflict.
    pub fn assign_head(&mut self) -> Lit {
        debug_assert!(self.has_pending());

        let lit = self.sequence[self.head];
        self.table.assign(lit, self.level);
        lit
    }

    pub fn advance_head(&mut self) {
        debug_assert!(self.head < self.tail);
        self.head += 1;
    }

    /// Every variable sits on the propagated prefix of the trail.
    pub fn is_full(&self) -> bool {
        self.head == self.table.num_vars()
    }

    /// The decision that opened the current decision level.
    pub fn last_decision(&self) -> Option<Lit> {
        self.decisions.last().map(|&pos| self.sequence[pos])
    }

    /// Decision literals in trail order, one per level starting at 1.
    pub fn decision_lits(&self) -> impl DoubleEndedIterator<Item = Lit> + '_ {
        self.decisions.iter().map(|&pos| self.sequence[pos])
    }

    /// Release every assignment above `new_level` and discard entries that
    /// were queued but never assigned. Afterwards `head == tail`, both
    /// sitting where the first released entry sat. Calling this twice with
    /// the same level is a no-op the second time.
    pub fn backtrack(&mut self, new_level: u32) {
        debug_assert!(new_level <= self.level);
        debug!("backtracking to level {new_level}, trail = {}", self.fmt_trail());

        let mut cut = self.tail;
        while cut > 0 {
            let lit = self.sequence[cut - 1];
            let keep = matches!(self.table.level(lit), Some(level) if level <= new_level);
            if keep {
                break;
            }
            self.table.release(lit);
            cut -= 1;
        }

        self.head = cut;
        self.tail = cut;
        while matches!(self.decisions.last(), Some(&pos) if pos >= cut) {
            self.decisions.pop();
        }
        self.level = new_level;
    }

    /// All queued entries, propagated prefix first.
    pub fn entries(&self) -> &[Lit] {
        &self.sequence[..self.tail]
    }

    pub fn value(&self, lit: Lit) -> Truth {
        self.table.value(lit)
    }

    pub fn status(&self, lit: Lit) -> Status {
        self.table.status(lit)
    }

    pub fn lit_level(&self, lit: Lit) -> Option<u32> {
        self.table.level(lit)
    }

    pub fn kind(&self, lit: Lit) -> Option<AssignKind> {
        self.table.kind(lit)
    }

    pub fn is_lit_satisfied(&self, lit: Lit) -> bool {
        self.table.is_satisfied(lit)
    }

    pub fn is_clause_satisfied(&self, clause: &[Lit]) -> bool {
        clause.iter().any(|&lit| self.is_lit_satisfied(lit))
    }

    pub fn find_available_var(&self) -> Option<Var> {
        self.table.find_available_var()
    }

    pub fn incr_active(&mut self, lit: Lit) {
        self.table.incr_active(lit);
    }

    pub fn decr_active(&mut self, lit: Lit) {
        self.table.decr_active(lit);
    }

    pub fn num_active(&self, lit: Lit) -> u32 {
        self.table.num_active(lit)
    }

    /// Read access for the invariant audit.
    #[cfg(debug_assertions)]
    pub fn table(&self) -> &AssignmentTable {
        &self.table
    }
}
