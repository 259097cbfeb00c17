/// Clauses are stored continuously in memory.
/// Each stored clause has atleast two literals.
/// The first two literals are watched.
/// A variable can only appear once in a clause.
use std::ops::Range;

use bitflags::bitflags;

use super::Lit;

pub type Clause<'db> = &'db [Lit];
pub type ClauseMut<'db> = &'db mut [Lit];

bitflags! {
    pub struct ClauseFlags: u8 {
        const LEARNED = 0b01;

        /// Proven permanently satisfied. Watch entries still pointing here
        /// are dropped the next time a propagation step visits them.
        const EXTINCT = 0b10;
    }
}

/// Stable handle to a clause in the arena.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ClauseIdx(u32);

impl ClauseIdx {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

struct ClauseMeta {
    range: Range<u32>,
    flags: ClauseFlags,
}

#[derive(Default)]
pub struct ClauseDB {
    clause_data: Vec<Lit>,
    clause_meta: Vec<ClauseMeta>,
}

impl ClauseDB {
    pub fn insert_clause(&mut self, cls: Clause, flags: ClauseFlags) -> ClauseIdx {
        debug_assert!(cls.len() >= 2, "unit clauses are enqueued, not stored");

        let start = self.clause_data.len();
        self.clause_data.extend_from_slice(cls);
        let end = self.clause_data.len();

        debug_assert!(<usize as TryInto<u32>>::try_into(end).is_ok());
        self.clause_meta.push(ClauseMeta {
            range: start as u32..end as u32,
            flags,
        });
        ClauseIdx(self.clause_meta.len() as u32 - 1)
    }

    pub fn get(&self, idx: ClauseIdx) -> Clause {
        let range = &self.clause_meta[idx.as_usize()].range;
        &self.clause_data[range.start as usize..range.end as usize]
    }

    pub fn get_mut(&mut self, idx: ClauseIdx) -> ClauseMut {
        let range = &self.clause_meta[idx.as_usize()].range;
        let range = range.start as usize..range.end as usize;
        &mut self.clause_data[range]
    }

    pub fn is_extinct(&self, idx: ClauseIdx) -> bool {
        self.clause_meta[idx.as_usize()]
            .flags
            .contains(ClauseFlags::EXTINCT)
    }

    pub fn set_extinct(&mut self, idx: ClauseIdx) {
        self.clause_meta[idx.as_usize()]
            .flags
            .insert(ClauseFlags::EXTINCT);
    }

    #[allow(unused)]
    pub fn is_learned(&self, idx: ClauseIdx) -> bool {
        self.clause_meta[idx.as_usize()]
            .flags
            .contains(ClauseFlags::LEARNED)
    }

    pub fn len(&self) -> usize {
        self.clause_meta.len()
    }

    pub fn indices(&self) -> impl Iterator<Item = ClauseIdx> {
        (0..self.clause_meta.len() as u32).map(ClauseIdx)
    }

    pub fn iter(&self) -> impl Iterator<Item = Clause<'_>> {
        self.clause_meta.iter().map(move |meta| {
            &self.clause_data[meta.range.start as usize..meta.range.end as usize]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(cls: &[i32]) -> Vec<Lit> {
        cls.iter().copied().map(Lit::new).collect()
    }

    #[test]
    fn insert_and_get() {
        let mut db = ClauseDB::default();
        let c0 = db.insert_clause(&lits(&[1, -2, 3]), ClauseFlags::empty());
        let c1 = db.insert_clause(&lits(&[-1, 2]), ClauseFlags::LEARNED);

        assert_eq!(db.get(c0), &lits(&[1, -2, 3])[..]);
        assert_eq!(db.get(c1), &lits(&[-1, 2])[..]);
        assert!(!db.is_learned(c0));
        assert!(db.is_learned(c1));
        assert_eq!(db.len(), 2);
    }

    #[test]
    fn literal_order_is_mutable() {
        let mut db = ClauseDB::default();
        let idx = db.insert_clause(&lits(&[1, 2, 3]), ClauseFlags::empty());

        db.get_mut(idx).swap(0, 2);
        assert_eq!(db.get(idx), &lits(&[3, 2, 1])[..]);
    }

    #[test]
    fn extinction_is_sticky() {
        let mut db = ClauseDB::default();
        let idx = db.insert_clause(&lits(&[1, 2]), ClauseFlags::empty());

        assert!(!db.is_extinct(idx));
        db.set_extinct(idx);
        assert!(db.is_extinct(idx));
        // contents are not scrubbed
        assert_eq!(db.get(idx), &lits(&[1, 2])[..]);
    }
}
