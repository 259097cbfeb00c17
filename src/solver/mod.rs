mod analyze;
mod assignment;
mod clause;
mod data;
mod log;
mod propagate;
mod trail;
mod watch;

use tracing::debug;

use analyze::RepairResult;
use assignment::{AssignKind, Status, Truth};
use clause::{ClauseDB, ClauseFlags};
use data::LitVec;
pub use data::{Lit, Var};
use propagate::PropagationResult;
use trail::Trail;
use watch::Watch;

use crate::dimacs::Dimacs;
use crate::error::Error;

/// Counters reported on the statistics line.
#[derive(Debug, Default, Clone)]
pub struct Stats {
    pub conflicts: u64,
    pub decisions: u64,
    /// Propagation-kind enqueues, including the initial level-0 units.
    pub propagations: u64,
}

/// Driver states of the search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Decide,
    Propagate,
    Conflict,
}

pub struct Solver {
    clause_db: ClauseDB,

    /// `watches[l]` lists the clauses in which the complement of `l` is one
    /// of the two watched literals; it is scanned when `l` becomes true.
    watches: LitVec<Vec<Watch>>,

    trail: Trail,

    /// Where the driver starts or resumes: `Propagate` once input units are
    /// queued, `Conflict` when contradictory units were queued.
    state: State,

    /// The input contained an empty clause.
    trivially_unsat: bool,

    stats: Stats,
}

pub struct Model<'a> {
    assignment: &'a Trail,
}

impl<'a> Model<'a> {
    /// Get truth assignment of literal.
    pub fn lit(&self, l: i32) -> bool {
        self.assignment.is_lit_satisfied(Lit::new(l))
    }

    pub fn as_vec(&self) -> Vec<i32> {
        (1..=self.assignment.num_vars())
            .map(|i| {
                let i = i as i32;
                i * if self.assignment.is_lit_satisfied(Lit::new(i)) {
                    1
                } else {
                    -1
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for Model<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Model").field(&self.as_vec()).finish()
    }
}

#[derive(Debug)]
pub enum Result<'a> {
    Sat(Model<'a>),
    Unsat,
}

impl<'a> Result<'a> {
    pub fn is_sat(&self) -> bool {
        matches!(self, Result::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Result::Unsat)
    }

    pub fn unwrap_sat(self) -> Model<'a> {
        match self {
            Result::Sat(model) => model,
            Result::Unsat => panic!("Result is not SAT."),
        }
    }
}

impl Solver {
    /// Solver for formulas over `num_vars` variables. All tables are sized
    /// here, once; clauses may not mention variables beyond the count.
    pub fn new(num_vars: usize) -> std::result::Result<Solver, Error> {
        if num_vars >= data::MAX_VARS {
            return Err(Error::Overflow { num_vars });
        }

        Ok(Solver {
            clause_db: ClauseDB::default(),
            watches: LitVec::new(num_vars, Vec::new()),
            trail: Trail::new(num_vars),
            state: State::Decide,
            trivially_unsat: false,
            stats: Stats::default(),
        })
    }

    pub fn from_dimacs(input: &str) -> std::result::Result<Solver, Error> {
        let dimacs = Dimacs::parse(input)?;

        let mut solver = Solver::new(dimacs.num_vars)?;
        for clause in &dimacs.clauses {
            solver.add_clause(clause.iter().copied());
        }

        Ok(solver)
    }

    /// Remove duplicated literals, keeping first occurrences in order.
    /// Returns true if the clause is trivially satisfied (i.e. contains the
    /// positive and negative literal of the same variable).
    fn normalise_clause(cls: &mut Vec<Lit>) -> bool {
        let mut i = 0;
        while i < cls.len() {
            if cls[..i].contains(&cls[i]) {
                cls.remove(i);
                continue;
            }
            if cls[..i].contains(&-cls[i]) {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Load one clause given in DIMACS polarity.
    ///
    /// Panics if a literal names a variable beyond the solver's table.
    pub fn add_clause<I>(&mut self, cls: I)
    where
        I: IntoIterator<Item = i32>,
    {
        let mut cls: Vec<Lit> = cls.into_iter().map(Lit::new).collect();
        for &lit in &cls {
            assert!(
                lit.var().get() as usize <= self.trail.num_vars(),
                "literal {lit} out of range"
            );
        }

        if Self::normalise_clause(&mut cls) {
            return;
        }

        match cls.len() {
            0 => {
                self.trivially_unsat = true;
            }
            1 => self.enqueue_unit(cls[0]),
            _ => {
                let idx = self.clause_db.insert_clause(&cls, ClauseFlags::empty());
                for &lit in &cls {
                    self.trail.incr_active(lit);
                }
                for &lit in &cls[0..2] {
                    self.watches[-lit].push(Watch { clause: idx });
                }
            }
        }
    }

    /// Width-1 input clauses are not stored; the literal goes onto the
    /// trail at level 0 and the driver starts with propagation. A unit
    /// contradicting an already-queued one sends the driver straight into
    /// conflict repair.
    fn enqueue_unit(&mut self, lit: Lit) {
        match self.trail.status(lit) {
            Status::Available => {
                self.trail.enqueue(lit, AssignKind::Propagation);
                self.stats.propagations += 1;
                if self.state == State::Decide {
                    self.state = State::Propagate;
                }
            }
            Status::Pending if self.trail.value(lit) == Truth::Negative => {
                self.state = State::Conflict;
            }
            _ => {
                // duplicate of a queued unit
            }
        }
    }

    /// Lowest-index decision heuristic: queue the positive literal of the
    /// first free variable. None means the assignment is complete.
    fn decide(&mut self) -> Option<Var> {
        if self.trail.is_full() {
            return None;
        }
        let var = self.trail.find_available_var()?;

        self.trail.enqueue(Lit::from(var), AssignKind::Decision);
        self.stats.decisions += 1;
        Some(var)
    }

    pub fn solve(&mut self) -> Result<'_> {
        if self.trivially_unsat {
            debug!("formula contains the empty clause");
            return Result::Unsat;
        }

        loop {
            #[cfg(debug_assertions)]
            self.check_invariants();
            self.log_state();

            match self.state {
                State::Decide => match self.decide() {
                    Some(var) => {
                        debug!("decision {var} opens level {}", self.trail.decision_level());
                        self.state = State::Propagate;
                    }
                    None => {
                        assert!(
                            self.check_assignment(),
                            "Generated assignment doesn't satisfy the input formula"
                        );
                        let model = Model {
                            assignment: &self.trail,
                        };
                        debug!("satisfying assignment found! {:?}", model.as_vec());
                        return Result::Sat(model);
                    }
                },
                State::Propagate => {
                    self.state = match self.propagate() {
                        PropagationResult::Done => State::Decide,
                        PropagationResult::Conflict(idx) => {
                            debug!(
                                "conflict in clause {}",
                                self.trail.fmt_clause(self.clause_db.get(idx))
                            );
                            State::Conflict
                        }
                    };
                }
                State::Conflict => {
                    self.state = match self.repair_conflict() {
                        RepairResult::Unsat => {
                            debug!("unsatisfiable after {} conflicts", self.stats.conflicts);
                            return Result::Unsat;
                        }
                        RepairResult::Repaired => State::Propagate,
                    };
                }
            }
        }
    }

    /// The produced assignment must satisfy every stored clause.
    fn check_assignment(&self) -> bool {
        self.clause_db
            .iter()
            .all(|clause| self.trail.is_clause_satisfied(clause))
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Audit of the global invariants, run at every driver transition in
    /// debug builds: complement consistency, watch coverage, trail
    /// monotonicity, active-literal counts, and (at propagation rest) the
    /// absence of clauses with two false watchers.
    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        let table = self.trail.table();
        let num_vars = table.num_vars();

        for v in 1..=num_vars as i32 {
            let lit = Lit::from(Var::new(v));
            assert_eq!(table.status(lit), table.status(-lit));
            assert_eq!(table.level(lit), table.level(-lit));
            if table.status(lit) == Status::Available {
                assert_eq!(table.level(lit), None);
            } else {
                assert_ne!(table.value(lit), Truth::Unset);
                assert_ne!(table.value(lit), table.value(-lit));
            }
        }

        let mut prev_level = 0;
        for &lit in self.trail.entries() {
            if let Some(level) = self.trail.lit_level(lit) {
                assert!(level >= prev_level, "trail levels must not decrease");
                prev_level = level;
            }
        }

        let mut watch_counts = vec![0usize; self.clause_db.len()];
        let mut active_counts = LitVec::new(num_vars, 0u32);
        for v in 1..=num_vars as i32 {
            for lit in [Lit::new(v), Lit::new(-v)] {
                for watch in &self.watches[lit] {
                    if !self.clause_db.is_extinct(watch.clause) {
                        watch_counts[watch.clause.as_usize()] += 1;
                    }
                }
            }
        }
        for idx in self.clause_db.indices() {
            if self.clause_db.is_extinct(idx) {
                continue;
            }
            let cls = self.clause_db.get(idx);
            for &watcher in &cls[0..2] {
                assert!(
                    self.watches[-watcher].iter().any(|w| w.clause == idx),
                    "clause must be watched through its first two literals"
                );
            }
            assert_eq!(watch_counts[idx.as_usize()], 2);

            for &lit in cls {
                active_counts[lit] += 1;
            }

            if self.state == State::Decide {
                let falsified = |lit: Lit| {
                    table.status(lit) == Status::Active && table.value(lit) == Truth::Negative
                };
                assert!(
                    !(falsified(cls[0]) && falsified(cls[1])),
                    "two false watchers at rest"
                );
            }
        }
        for v in 1..=num_vars as i32 {
            for lit in [Lit::new(v), Lit::new(-v)] {
                assert_eq!(table.num_active(lit), active_counts[lit]);
            }
        }
    }
}
