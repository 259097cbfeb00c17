//! Unit propagation over two watched literals.

use tracing::debug;

use super::assignment::{AssignKind, Status, Truth};
use super::clause::ClauseIdx;
use super::Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropagationResult {
    Conflict(ClauseIdx),
    Done,
}

/// What the scan of one watched clause decided.
enum WatchFate {
    /// No replacement watcher found; the clause is unit on its other
    /// watched literal.
    Unit,
    /// The watch moved to a replacement literal.
    Moved,
    /// A candidate literal is deceased and satisfied; the clause is
    /// permanently satisfied.
    Extinct,
}

impl Solver {
    /// Consume the pending trail entries one at a time, scanning the watch
    /// list of each newly true literal and repairing its watches.
    ///
    /// Each step rebuilds the list from scratch and swaps it in exactly
    /// once, either after the full scan or on the conflict exit with the
    /// unprocessed suffix carried over unchanged.
    pub(crate) fn propagate(&mut self) -> PropagationResult {
        while self.trail.has_pending() {
            let lit = self.trail.assign_head();
            debug_assert!(self.trail.is_lit_satisfied(lit));

            let not_lit = -lit;
            let old_watches = std::mem::take(&mut self.watches[lit]);
            let mut kept = Vec::with_capacity(old_watches.len());

            debug!("propagating {lit} over {} clauses", old_watches.len());

            for (pos, &watch) in old_watches.iter().enumerate() {
                let cls_idx = watch.clause;

                // Stale entry for a clause that went extinct through some
                // other watch list; drop it.
                if self.clause_db.is_extinct(cls_idx) {
                    continue;
                }

                // Both watchers sit at positions 0 and 1; put the newly
                // falsified one in front.
                let other = {
                    let cls = self.clause_db.get_mut(cls_idx);
                    if cls[0] != not_lit {
                        cls.swap(0, 1);
                    }
                    debug_assert_eq!(cls[0], not_lit);
                    cls[1]
                };

                // A deceased other watcher must be satisfied (were it
                // permanently false, the conflict would have fired when it
                // was propagated), so the clause is extinct.
                if self.trail.lit_level(other) == Some(0) {
                    self.extinguish(cls_idx);
                    continue;
                }

                // Other watcher already satisfied: the watch pair survives.
                if self.trail.status(other) == Status::Active
                    && self.trail.value(other) == Truth::Positive
                {
                    kept.push(watch);
                    continue;
                }

                let mut fate = WatchFate::Unit;
                let cls = self.clause_db.get_mut(cls_idx);
                for k in 2..cls.len() {
                    let candidate = cls[k];
                    let status = self.trail.status(candidate);

                    if status == Status::Deceased
                        && self.trail.value(candidate) == Truth::Positive
                    {
                        fate = WatchFate::Extinct;
                        break;
                    }

                    let eligible = match status {
                        Status::Pending | Status::Available => true,
                        Status::Active => self.trail.value(candidate) == Truth::Positive,
                        Status::Deceased => false,
                    };
                    if eligible {
                        // The first eligible candidate in clause order wins.
                        cls.swap(0, k);
                        fate = WatchFate::Moved;
                        break;
                    }
                }
                let new_watcher = cls[0];

                match fate {
                    WatchFate::Extinct => self.extinguish(cls_idx),
                    WatchFate::Moved => {
                        self.watches[-new_watcher].push(watch);
                    }
                    WatchFate::Unit => {
                        // The clause stays watched through this literal.
                        kept.push(watch);
                        match self.trail.status(other) {
                            Status::Available => {
                                debug!("unit clause implies {other}");
                                self.trail.enqueue(other, AssignKind::Propagation);
                                self.stats.propagations += 1;
                            }
                            Status::Pending if self.trail.value(other) == Truth::Negative => {
                                // The complementary unit is already queued.
                                // Keep the unprocessed suffix and stop.
                                debug!("conflicting unit {other}, aborting propagation");
                                kept.extend_from_slice(&old_watches[pos + 1..]);
                                self.watches[lit] = kept;
                                return PropagationResult::Conflict(cls_idx);
                            }
                            _ => {
                                // Queued or assigned with the right polarity
                                // already; nothing to do.
                            }
                        }
                    }
                }
            }

            self.watches[lit] = kept;
            self.trail.advance_head();
        }

        PropagationResult::Done
    }

    /// Tombstone a permanently satisfied clause and retire its literals.
    fn extinguish(&mut self, idx: ClauseIdx) {
        debug!("clause {idx:?} is extinct");

        self.clause_db.set_extinct(idx);
        for &lit in self.clause_db.get(idx) {
            self.trail.decr_active(lit);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::solver::data::Lit;
    use crate::solver::Solver;

    #[test]
    fn watch_moves_to_unassigned_literal() {
        // Deciding 1 falsifies the watched -1 in both clauses; the watches
        // must move on instead of reporting units.
        let mut solver = Solver::from_dimacs("p cnf 4 2\n-1 -2 3 0\n-1 -2 -3 0\n").unwrap();
        let result = solver.solve();
        assert!(result.is_sat());
    }

    #[test]
    fn level_zero_satisfaction_extinguishes() {
        let mut solver = Solver::from_dimacs("p cnf 3 3\n1 0\n-2 0\n2 1 3 0\n").unwrap();
        assert_eq!(solver.trail.num_active(Lit::new(3)), 1);

        let result = solver.solve();
        assert!(result.is_sat());

        // Propagating -2 visits the stored clause, finds the other watcher
        // deceased and satisfied, and tombstones the clause.
        let idx = solver.clause_db.indices().next().unwrap();
        assert!(solver.clause_db.is_extinct(idx));
        assert_eq!(solver.trail.num_active(Lit::new(1)), 0);
        assert_eq!(solver.trail.num_active(Lit::new(2)), 0);
        assert_eq!(solver.trail.num_active(Lit::new(3)), 0);
    }

    #[test]
    fn queued_unit_with_matching_polarity_is_a_no_op() {
        // Both clauses become unit on 3 during the same step; the second
        // detection finds it pending with the right polarity.
        let mut solver = Solver::from_dimacs("p cnf 3 3\n1 0\n-1 3 0\n-1 3 0\n").unwrap();
        let result = solver.solve();
        assert!(result.is_sat());
        assert_eq!(solver.stats().propagations, 2);
    }
}
