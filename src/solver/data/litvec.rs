use super::Lit;

/// Wrapper over Vec which is indexed by [`Lit`].
///
/// The positive and negative literal of a variable occupy adjacent slots, so
/// a table for V variables holds exactly 2V entries. The table is sized once
/// at construction; literals never outgrow it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LitVec<T>(Vec<T>);

impl<T: Clone> LitVec<T> {
    /// Table with one slot per literal of `num_vars` variables.
    pub fn new(num_vars: usize, val: T) -> Self {
        LitVec(vec![val; num_vars * 2])
    }
}

fn lit_to_idx(lit: Lit) -> usize {
    // Literal codes start at variable 1, so the smallest code is 2.
    lit.get() as usize - 2
}

impl<T> std::ops::Index<Lit> for LitVec<T> {
    type Output = T;

    fn index(&self, index: Lit) -> &Self::Output {
        &self.0[lit_to_idx(index)]
    }
}

impl<T> std::ops::IndexMut<Lit> for LitVec<T> {
    fn index_mut(&mut self, index: Lit) -> &mut Self::Output {
        &mut self.0[lit_to_idx(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_to_idx() {
        assert_eq!(lit_to_idx(Lit::new(1)), 0);
        assert_eq!(lit_to_idx(Lit::new(-1)), 1);
        assert_eq!(lit_to_idx(Lit::new(2)), 2);
        assert_eq!(lit_to_idx(Lit::new(-2)), 3);
        assert_eq!(lit_to_idx(Lit::new(3)), 4);
        assert_eq!(lit_to_idx(Lit::new(-3)), 5);
        assert_eq!(lit_to_idx(Lit::new(4)), 6);
        assert_eq!(lit_to_idx(Lit::new(-4)), 7);
    }

    #[test]
    fn test() {
        let mut litvec: LitVec<i32> = LitVec::new(4, 0);

        litvec[Lit::new(1)] = 1;
        litvec[Lit::new(-1)] = -1;

        litvec[Lit::new(3)] = 3;
        litvec[Lit::new(-3)] = -3;

        assert_eq!(litvec[Lit::new(1)], 1);
        assert_eq!(litvec[Lit::new(-1)], -1);
        assert_eq!(litvec[Lit::new(3)], 3);
        assert_eq!(litvec[Lit::new(-3)], -3);
        assert_eq!(litvec[Lit::new(2)], 0);
    }
}
