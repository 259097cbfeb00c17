/// Upper bound on the variable count. The packed literal encoding keeps the
/// sign in the low bit and needs the top bits of the `u32` free, so three
/// bits of headroom are reserved on top of the 2V table size.
pub(crate) const MAX_VARS: usize = 1 << (u32::BITS - 3);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(u32);

impl Var {
    pub fn new(i: i32) -> Self {
        assert!(i > 0, "variables are numbered from 1");
        let i = i as u32;
        assert_eq!(i & (0b11 << 30), 0, "variable index too large");

        Var(i)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Literals are represented as u32.
// The LSB is one, iff the literal is negative.
// The MSB is *always* zero.
// The remaining bits represent the variable.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit(u32);

impl Lit {
    pub fn new(lit: i32) -> Self {
        assert_ne!(lit, 0, "literals cant be zero");

        let new_lit_repr = (lit.unsigned_abs() << 1) | ((lit < 0) as u32);
        assert!(new_lit_repr & (1 << 31) == 0, "Lit magnitude too large.");

        Lit(new_lit_repr)
    }

    /// The external DIMACS form. Inverse of [`Lit::new`] over the valid
    /// range.
    pub fn to_dimacs(self) -> i32 {
        let magnitude = self.var().get() as i32;
        if self.is_pos() {
            magnitude
        } else {
            -magnitude
        }
    }

    pub fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_pos(self) -> bool {
        self.0 & 1 == 0
    }

    #[allow(unused)]
    pub fn is_neg(self) -> bool {
        self.0 & 1 == 1
    }
}

impl From<Var> for Lit {
    fn from(v: Var) -> Self {
        Lit(v.0 << 1)
    }
}

impl std::ops::Neg for Lit {
    type Output = Lit;

    // The complement maps between the positive and negative literal of the
    // same variable. Any bijective involution works here; the low bit flip
    // keeps the pair adjacent in literal-indexed tables.
    fn neg(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

impl std::fmt::Debug for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Lit")
            .field(&format!(
                "{}{}",
                if self.is_pos() { "" } else { "-" },
                self.var().get()
            ))
            .finish()
    }
}

impl std::fmt::Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format!(
            "{}{}",
            if self.is_pos() { "" } else { "-" },
            self.var().get()
        )
        .fmt(f)
    }
}
