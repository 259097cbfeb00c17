use tracing::debug;

use super::assignment::{AssignKind, Status, Truth};
use super::data::Lit;
use super::trail::Trail;
use super::Solver;

const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";
const END: &str = "\u{1b}[0m";

impl Solver {
    pub(crate) fn log_state(&self) {
        #[cfg(debug_assertions)]
        for cls in self.clause_db.iter() {
            debug!("{}", self.trail.fmt_clause(cls));
        }
    }
}

impl Trail {
    pub(crate) fn fmt_lit(&self, lit: Lit) -> String {
        match self.status(lit) {
            Status::Active | Status::Deceased => match self.value(lit) {
                Truth::Positive => format!("{GREEN}{lit}{END}"),
                _ => format!("{RED}{lit}{END}"),
            },
            _ => format!("{lit}"),
        }
    }

    pub(crate) fn fmt_clause(&self, clause: &[Lit]) -> String {
        clause
            .iter()
            .map(|&lit| self.fmt_lit(lit))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Trail entries annotated with their provenance: `D`ecision,
    /// `P`ropagation, `F`lip, or `W` for entries still waiting at the tail.
    pub(crate) fn fmt_trail(&self) -> String {
        let entries: Vec<String> = self
            .entries()
            .iter()
            .map(|&lit| {
                let marker = if self.status(lit) == Status::Pending {
                    "W"
                } else {
                    match self.kind(lit) {
                        Some(AssignKind::Decision) => "D",
                        Some(AssignKind::Propagation) => "P",
                        Some(AssignKind::ConflictFlip) => "F",
                        None => "",
                    }
                };
                format!("{lit}{marker}")
            })
            .collect();

        format!("[{}]", entries.join(", "))
    }
}
