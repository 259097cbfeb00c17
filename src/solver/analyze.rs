use tracing::debug;

use super::assignment::AssignKind;
use super::clause::ClauseFlags;
use super::data::Lit;
use super::watch::Watch;
use super::Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RepairResult {
    Unsat,
    Repaired,
}

impl Solver {
    /// Chronological conflict repair: learn the clause that prunes the
    /// current branch, step back one decision level and flip its decision.
    ///
    /// The learned clause negates every decision on the trail, ordered so
    /// the two highest levels come first and become the watched pair. At
    /// level 1 no clause is built; the unit negation of the single decision
    /// is exactly what the flip below enforces.
    pub(crate) fn repair_conflict(&mut self) -> RepairResult {
        self.stats.conflicts += 1;

        let level = self.trail.decision_level();
        debug!("conflict {} at level {level}", self.stats.conflicts);

        if level == 0 {
            return RepairResult::Unsat;
        }

        if level > 1 {
            let learned: Vec<Lit> = self.trail.decision_lits().rev().map(|dec| -dec).collect();
            debug_assert_eq!(learned.len(), level as usize);
            debug!("learned clause {}", self.trail.fmt_clause(&learned));

            let idx = self.clause_db.insert_clause(&learned, ClauseFlags::LEARNED);
            for &lit in &learned {
                self.trail.incr_active(lit);
            }
            for &lit in &learned[0..2] {
                self.watches[-lit].push(Watch { clause: idx });
            }
        }

        let flip = -self
            .trail
            .last_decision()
            .expect("a conflict above level 0 has a decision on the trail");
        self.trail.backtrack(level - 1);
        debug!("flipping decision, enqueueing {flip}");
        self.trail.enqueue(flip, AssignKind::ConflictFlip);

        RepairResult::Repaired
    }
}
