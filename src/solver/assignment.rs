use super::data::{Lit, LitVec, Var};

/// Truth recorded for a literal. A pending literal already carries the
/// polarity it was queued with; `Unset` means the variable is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Truth {
    Unset,
    Positive,
    Negative,
}

/// Lifecycle of an assignment record.
///
/// `Pending` covers the trail span between the propagation frontier and the
/// enqueue point. `Deceased` is an assignment made at decision level 0,
/// which backtracking never releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Available,
    Pending,
    Active,
    Deceased,
}

/// Provenance of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AssignKind {
    Decision,
    Propagation,
    ConflictFlip,
}

#[derive(Debug, Clone)]
struct AssignRecord {
    value: Truth,
    status: Status,
    level: Option<u32>,
    kind: Option<AssignKind>,
    num_active: u32,
}

/// The literal/assignment table: one record per literal, two per variable.
///
/// The records of a complementary pair always agree on status and decision
/// level and disagree on truth value while the variable is in play; every
/// mutation below writes both records to keep it that way.
#[derive(Debug)]
pub(crate) struct AssignmentTable {
    records: LitVec<AssignRecord>,
    num_vars: usize,
}

impl AssignmentTable {
    pub fn new(num_vars: usize) -> Self {
        let empty = AssignRecord {
            value: Truth::Unset,
            status: Status::Available,
            level: None,
            kind: None,
            num_active: 0,
        };
        AssignmentTable {
            records: LitVec::new(num_vars, empty),
            num_vars,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn value(&self, lit: Lit) -> Truth {
        self.records[lit].value
    }

    pub fn status(&self, lit: Lit) -> Status {
        self.records[lit].status
    }

    pub fn level(&self, lit: Lit) -> Option<u32> {
        self.records[lit].level
    }

    pub fn kind(&self, lit: Lit) -> Option<AssignKind> {
        self.records[lit].kind
    }

    /// True when the literal is assigned and satisfied in the model.
    pub fn is_satisfied(&self, lit: Lit) -> bool {
        let record = &self.records[lit];
        matches!(record.status, Status::Active | Status::Deceased)
            && record.value == Truth::Positive
    }

    /// Queue `lit` to become true. Records the polarity on both literals
    /// but assigns no decision level; the pair joins the model when the
    /// propagator reaches the trail entry.
    pub fn set_pending(&mut self, lit: Lit, kind: AssignKind) {
        debug_assert_eq!(self.status(lit), Status::Available);

        let record = &mut self.records[lit];
        record.value = Truth::Positive;
        record.status = Status::Pending;
        record.kind = Some(kind);

        let comp = &mut self.records[-lit];
        comp.value = Truth::Negative;
        comp.status = Status::Pending;
        comp.kind = Some(kind);
    }

    /// Promote the pending pair into the model at `level`. Level-0
    /// assignments are permanent and become deceased.
    pub fn assign(&mut self, lit: Lit, level: u32) {
        debug_assert_eq!(self.status(lit), Status::Pending);
        debug_assert_eq!(self.value(lit), Truth::Positive);

        let status = if level == 0 {
            Status::Deceased
        } else {
            Status::Active
        };
        for l in [lit, -lit] {
            let record = &mut self.records[l];
            record.level = Some(level);
            record.status = status;
        }
    }

    /// Return the pair to the free pool, whether it was pending or already
    /// assigned. Deceased records must never come back here.
    pub fn release(&mut self, lit: Lit) {
        debug_assert_ne!(self.status(lit), Status::Deceased);
        debug_assert_ne!(self.status(lit), Status::Available);

        for l in [lit, -lit] {
            let record = &mut self.records[l];
            record.value = Truth::Unset;
            record.status = Status::Available;
            record.level = None;
            record.kind = None;
        }
    }

    pub fn incr_active(&mut self, lit: Lit) {
        self.records[lit].num_active += 1;
    }

    pub fn decr_active(&mut self, lit: Lit) {
        debug_assert!(self.records[lit].num_active > 0);
        self.records[lit].num_active -= 1;
    }

    pub fn num_active(&self, lit: Lit) -> u32 {
        self.records[lit].num_active
    }

    /// Lowest-indexed variable still free for a decision.
    pub fn find_available_var(&self) -> Option<Var> {
        (1..=self.num_vars as i32)
            .map(Var::new)
            .find(|&v| self.status(Lit::from(v)) == Status::Available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_stays_consistent() {
        let mut table = AssignmentTable::new(2);
        let lit = Lit::new(-2);

        table.set_pending(lit, AssignKind::Propagation);
        assert_eq!(table.status(lit), Status::Pending);
        assert_eq!(table.status(-lit), Status::Pending);
        assert_eq!(table.value(lit), Truth::Positive);
        assert_eq!(table.value(-lit), Truth::Negative);
        assert_eq!(table.level(lit), None);

        table.assign(lit, 3);
        assert_eq!(table.status(lit), Status::Active);
        assert_eq!(table.level(lit), Some(3));
        assert_eq!(table.level(-lit), Some(3));
        assert!(table.is_satisfied(lit));
        assert!(!table.is_satisfied(-lit));

        table.release(lit);
        assert_eq!(table.status(lit), Status::Available);
        assert_eq!(table.status(-lit), Status::Available);
        assert_eq!(table.level(lit), None);
        assert_eq!(table.kind(lit), None);
    }

    #[test]
    fn level_zero_assignments_are_deceased() {
        let mut table = AssignmentTable::new(1);
        let lit = Lit::new(1);

        table.set_pending(lit, AssignKind::Propagation);
        table.assign(lit, 0);
        assert_eq!(table.status(lit), Status::Deceased);
        assert_eq!(table.status(-lit), Status::Deceased);
    }

    #[test]
    fn lowest_variable_wins() {
        let mut table = AssignmentTable::new(3);
        assert_eq!(table.find_available_var(), Some(Var::new(1)));

        table.set_pending(Lit::new(-1), AssignKind::Decision);
        assert_eq!(table.find_available_var(), Some(Var::new(2)));

        table.set_pending(Lit::new(2), AssignKind::Decision);
        table.set_pending(Lit::new(3), AssignKind::Decision);
        assert_eq!(table.find_available_var(), None);
    }
}
