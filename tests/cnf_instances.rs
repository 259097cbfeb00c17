use flipsat::{Result, Solver};

fn solve(input: &str) -> (bool, Vec<i32>) {
    let mut solver = Solver::from_dimacs(input).unwrap();
    match solver.solve() {
        Result::Sat(model) => (true, model.as_vec()),
        Result::Unsat => (false, Vec::new()),
    }
}

fn check_model(input: &str, model: &[i32]) {
    let dimacs = flipsat::Dimacs::parse(input).unwrap();
    for clause in &dimacs.clauses {
        assert!(
            clause.iter().any(|&lit| model.contains(&lit)),
            "clause {clause:?} not satisfied by {model:?}"
        );
    }
}

#[test]
fn trivial_sat() {
    let input = include_str!("../cnf_examples/1_1_trivial_sat.dimacs");
    let (sat, model) = solve(input);
    assert!(sat);
    assert_eq!(model, vec![1]);
}

#[test]
fn contradictory_units() {
    let (sat, _) = solve(include_str!("../cnf_examples/1_2_contradictory_units.dimacs"));
    assert!(!sat);
}

#[test]
fn unit_chain() {
    let input = include_str!("../cnf_examples/3_3_unit_chain.dimacs");
    let (sat, model) = solve(input);
    assert!(sat);
    assert_eq!(model, vec![1, 2, 3]);
}

#[test]
fn decision_then_propagation() {
    let input = include_str!("../cnf_examples/2_3_decision_then_propagation.dimacs");
    let (sat, model) = solve(input);
    assert!(sat);
    check_model(input, &model);
}

#[test]
fn flip_to_unsat() {
    let mut solver =
        Solver::from_dimacs(include_str!("../cnf_examples/2_4_flip_to_unsat.dimacs")).unwrap();
    assert!(solver.solve().is_unsat());
    assert_eq!(solver.stats().conflicts, 2);
}

#[test]
fn binary_chain() {
    let input = include_str!("../cnf_examples/3_3_binary_chain.dimacs");
    let (sat, model) = solve(input);
    assert!(sat);
    check_model(input, &model);
}

#[test]
fn learned_clause_flip() {
    let input = include_str!("../cnf_examples/4_2_learned_clause_flip.dimacs");
    let mut solver = Solver::from_dimacs(input).unwrap();
    let model = solver.solve().unwrap_sat().as_vec();
    check_model(input, &model);
    assert_eq!(solver.stats().conflicts, 1);
    assert_eq!(solver.stats().decisions, 4);
}

#[test]
fn pigeonhole_three_in_two() {
    let mut solver =
        Solver::from_dimacs(include_str!("../cnf_examples/6_9_pigeonhole_3_2.dimacs")).unwrap();
    assert!(solver.solve().is_unsat());
    assert!(solver.stats().conflicts > 0);
}

#[test]
fn cycle_coloring() {
    let input = include_str!("../cnf_examples/4_8_cycle_coloring.dimacs");
    let (sat, model) = solve(input);
    assert!(sat);
    check_model(input, &model);
}

#[test]
fn triangle_coloring_is_unsat() {
    let (sat, _) = solve(include_str!("../cnf_examples/3_6_triangle_coloring.dimacs"));
    assert!(!sat);
}
