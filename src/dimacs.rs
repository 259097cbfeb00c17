use crate::error::Error;

/// Parsed DIMACS CNF input: the header counts and the clauses in external
/// signed-integer form. Unit clauses are kept as-is here; the solver
/// decides how to load them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimacs {
    pub num_vars: usize,
    pub num_clauses: usize,
    pub clauses: Vec<Vec<i32>>,
}

impl Dimacs {
    pub fn parse(input: &str) -> Result<Dimacs, Error> {
        let mut tokens = input
            .lines()
            .map(str::trim_start)
            .filter(|line| !line.starts_with('c'))
            .flat_map(str::split_whitespace);

        if tokens.next() != Some("p") {
            return Err(Error::bad_input("'p' not found"));
        }
        if tokens.next() != Some("cnf") {
            return Err(Error::bad_input("'cnf' not found"));
        }
        let num_vars = match tokens.next().and_then(|t| t.parse::<usize>().ok()) {
            Some(n) => n,
            None => return Err(Error::bad_input("number of vars missing")),
        };
        let num_clauses = match tokens.next().and_then(|t| t.parse::<usize>().ok()) {
            Some(n) => n,
            None => return Err(Error::bad_input("number of clauses not found")),
        };

        let mut clauses = Vec::new();
        let mut clause = Vec::new();
        for token in tokens {
            let lit: i64 = token
                .parse()
                .map_err(|_| Error::bad_input(format!("invalid literal '{token}'")))?;

            if lit == 0 {
                clauses.push(std::mem::take(&mut clause));
                continue;
            }

            let lit = i32::try_from(lit)
                .map_err(|_| Error::bad_input(format!("literal {lit} magnitude too large")))?;
            if lit.unsigned_abs() as usize > num_vars {
                return Err(Error::bad_input(format!(
                    "literal {lit} out of range for {num_vars} vars"
                )));
            }
            clause.push(lit);
        }

        if !clause.is_empty() {
            return Err(Error::bad_input("clause not terminated by 0"));
        }
        if clauses.len() != num_clauses {
            return Err(Error::bad_input(format!(
                "header promises {num_clauses} clauses, found {}",
                clauses.len()
            )));
        }

        Ok(Dimacs {
            num_vars,
            num_clauses,
            clauses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_test() {
        let dimacs = "
        c test comment \n\
        p cnf 3 4      \n\
        1 -2 -3 0      \n\
        2 3 1 0        \n\
        1 0            \n\
        2 0
        ";

        let result = Dimacs::parse(dimacs).unwrap();
        assert_eq!(result.num_vars, 3);
        assert_eq!(result.clauses[0], vec![1, -2, -3]);
        assert_eq!(result.clauses[1], vec![2, 3, 1]);
        assert_eq!(result.clauses[2], vec![1]);
        assert_eq!(result.clauses[3], vec![2]);
    }

    #[test]
    fn clause_may_span_lines() {
        let result = Dimacs::parse("p cnf 4 1\n1 2\n3 4 0\n").unwrap();
        assert_eq!(result.clauses, vec![vec![1, 2, 3, 4]]);
    }

    #[test]
    fn empty_clause_is_kept() {
        let result = Dimacs::parse("p cnf 2 2\n0\n1 2 0\n").unwrap();
        assert_eq!(result.clauses[0], Vec::<i32>::new());
    }

    #[test]
    fn comments_between_clauses() {
        let result = Dimacs::parse("p cnf 2 2\nc first\n1 0\nc second\n-2 0\n").unwrap();
        assert_eq!(result.clauses, vec![vec![1], vec![-2]]);
    }

    fn bad_input(input: &str) -> String {
        match Dimacs::parse(input) {
            Err(Error::BadInput(msg)) => msg,
            other => panic!("expected BadInput, got {other:?}"),
        }
    }

    #[test]
    fn header_errors() {
        assert_eq!(bad_input(""), "'p' not found");
        assert_eq!(bad_input("q cnf 1 1\n1 0\n"), "'p' not found");
        assert_eq!(bad_input("p dnf 1 1\n1 0\n"), "'cnf' not found");
        assert_eq!(bad_input("p cnf x 1\n1 0\n"), "number of vars missing");
        assert_eq!(bad_input("p cnf 1\n"), "number of clauses not found");
    }

    #[test]
    fn body_errors() {
        assert_eq!(
            bad_input("p cnf 2 1\n1 3 0\n"),
            "literal 3 out of range for 2 vars"
        );
        assert_eq!(bad_input("p cnf 2 1\n1 2\n"), "clause not terminated by 0");
        assert_eq!(
            bad_input("p cnf 2 2\n1 2 0\n"),
            "header promises 2 clauses, found 1"
        );
        assert_eq!(bad_input("p cnf 2 1\n1 a 0\n"), "invalid literal 'a'");
    }
}
