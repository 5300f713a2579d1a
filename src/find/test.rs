//! End-to-end searches over the built-in backend.

crate::prelude!();

use find::{Answer, GroupFinder, PreorderFinder};
use solver::{Search, Z3};

fn found<T>(answer: Answer<T>) -> (T, verify::Report) {
    match answer {
        Answer::Found { structure, report } => (structure, report),
        answer => panic!("expected `sat`, got `{}`", answer.outcome()),
    }
}

#[test]
fn trivial_group() {
    let mut finder = GroupFinder::new(Conf::group(1), Search::new()).unwrap();
    let (table, report) = found(finder.run().unwrap());
    assert_eq!(table.identity, 0);
    assert_eq!(table.rows, vec![vec![0]]);
    assert!(report.is_ok());
    assert_eq!(report.len(), 4);
}

#[test]
fn small_groups() {
    for size in 1..=4 {
        let mut finder = GroupFinder::new(Conf::group(size), Search::new()).unwrap();
        assert_eq!(finder.solve().unwrap(), Outcome::Sat, "size {}", size);
        let table = finder.extract().unwrap();
        assert_eq!(table.size, size);
        assert!(
            verify::latin_square(&table).is_pass(),
            "size {}:\n{}",
            size,
            table
        );
        let report = finder.verify(&table).unwrap();
        assert!(report.is_ok(), "size {}:\n{}\n{}", size, table, report);
    }
}

#[test]
fn abelian_group() {
    let conf = Conf::group(4).with(Axiom::Commutativity);
    let mut finder = GroupFinder::new(conf, Search::new()).unwrap();
    let (table, report) = found(finder.run().unwrap());
    assert_eq!(report.get(Axiom::Commutativity), Some(&verify::Verdict::Pass));
    assert!(verify::commutativity(&table).is_pass());
    assert!(report.is_ok());
}

#[test]
fn monotone_preorder() {
    let conf = Conf::preorder(3)
        .with(Axiom::Monotonicity)
        .with(Axiom::NonTrivial(NonTrivial::FullNotBelowEmpty));
    let mut finder = PreorderFinder::new(conf, Search::new()).unwrap();
    let (relation, report) = found(finder.run().unwrap());

    assert_eq!(relation.size(), 8);
    for i in 0..8 {
        assert!(relation.get(i, i), "R[{}][{}]", i, i);
        for j in 0..8 {
            if bits::is_subset(i, j) {
                assert!(relation.get(i, j), "R[{}][{}]", i, j);
            }
        }
    }
    assert!(!relation.get(7, 0));
    assert!(verify::transitivity(&relation).is_pass());
    assert!(report.is_ok(), "{}", report);
    assert_eq!(report.len(), 4);
}

#[test]
fn strict_preorder() {
    let conf = Conf::preorder(2).with(Axiom::NonTrivial(NonTrivial::SomeStrictPair));
    let mut finder = PreorderFinder::new(conf, Search::new()).unwrap();
    let (relation, report) = found(finder.run().unwrap());
    assert!(report.is_ok(), "{}", report);
    assert!(verify::some_strict_pair(&relation).is_pass());
    assert!(verify::transitivity(&relation).is_pass());
}

#[test]
fn missing_right_inverse() {
    let mut finder = GroupFinder::new(Conf::group(3), Search::new()).unwrap();
    let no_right_inverse = {
        let vars = finder.vars();
        Expr::and(
            (0..3)
                .map(|b| build_expr!((not (= {vars.get(1, b)} {vars.identity()}))))
                .collect(),
        )
    };
    finder.assert(&no_right_inverse).unwrap();
    assert_eq!(finder.run().unwrap(), Answer::Unsat);
    assert_eq!(finder.outcome(), Some(Outcome::Unsat));

    let err = finder.extract().unwrap_err();
    assert!(err.is_usage());
    assert_eq!(
        err.to_string(),
        "usage error: cannot extract a group after an `unsat` check"
    );
}

#[test]
fn extra_constraints_reset_outcome() {
    let mut finder = GroupFinder::new(Conf::group(2), Search::new()).unwrap();
    assert_eq!(finder.solve().unwrap(), Outcome::Sat);
    assert_eq!(finder.outcome(), Some(Outcome::Sat));

    let one = 1usize;
    let identity_is_one = build_expr!((= {finder.vars().identity()} {one}));
    finder.assert(&identity_is_one).unwrap();
    assert_eq!(finder.outcome(), None);
    assert!(finder.extract().unwrap_err().is_usage());

    let (table, report) = found(finder.run().unwrap());
    assert_eq!(table.identity, 1);
    assert_eq!(table.rows, vec![vec![1, 0], vec![0, 1]]);
    assert!(report.is_ok());

    let not_bool = Expr::from(finder.vars().identity());
    assert!(finder.assert(&not_bool).is_err());
}

#[test]
fn encoding_is_idempotent() {
    let mut finder = GroupFinder::new(Conf::group(2), Search::new()).unwrap();
    assert_eq!(finder.encode().unwrap(), 5 + 2 + 32 + 4);
    assert_eq!(finder.encode().unwrap(), 0);
    assert_eq!(finder.solve().unwrap(), Outcome::Sat);
    assert_eq!(finder.encode().unwrap(), 0);
}

#[test]
fn report_idempotence() {
    let mut finder = GroupFinder::new(Conf::group(3), Search::new()).unwrap();
    let (table, report) = found(finder.run().unwrap());
    assert_eq!(finder.verify(&table).unwrap(), report);
    assert_eq!(finder.verify(&table).unwrap(), finder.verify(&table).unwrap());
}

#[test]
fn configuration_errors() {
    let err = GroupFinder::new(Conf::group(0), Search::new())
        .err()
        .unwrap();
    assert!(err.is_config());

    let err = PreorderFinder::new(Conf::preorder(conf::MAX_UNIVERSE + 1), Search::new())
        .err()
        .unwrap();
    assert!(err.is_config());
}

#[test]
fn usage_errors() {
    let err = GroupFinder::new(Conf::preorder(2), Search::new())
        .err()
        .unwrap();
    assert!(err.is_usage());
    assert_eq!(
        err.to_string(),
        "usage error: cannot build a group finder from a preorder configuration"
    );

    let err = GroupFinder::new(Conf::group(2).with(Axiom::Transitivity), Search::new())
        .err()
        .unwrap();
    assert!(err.is_usage());

    let mut finder = PreorderFinder::new(Conf::preorder(1), Search::new()).unwrap();
    let err = finder.extract().unwrap_err();
    assert!(err.is_usage());
    assert_eq!(
        err.to_string(),
        "usage error: cannot extract a preorder before solving"
    );
}

#[test]
fn unknown_on_node_budget() {
    let mut finder = GroupFinder::new(Conf::group(4), Search::with_max_nodes(5)).unwrap();
    assert_eq!(finder.run().unwrap(), Answer::Unknown);
    assert!(finder.extract().unwrap_err().is_usage());
}

#[test]
fn unknown_on_unbounded_integers() {
    let conf = Conf::group(2).without(Axiom::Domain);
    let mut finder = GroupFinder::new(conf, Search::new()).unwrap();
    assert_eq!(finder.solve().unwrap(), Outcome::Unknown);
}

#[test]
fn boxed_backend() {
    let solver = conf::SolverConf::search().spawn().unwrap();
    let mut finder = GroupFinder::new(Conf::group(2), solver).unwrap();
    let (_, report) = found(finder.run().unwrap());
    assert!(report.is_ok());
}

#[test]
#[ignore]
fn z3_group() {
    let mut finder = GroupFinder::new(Conf::group(4), Z3::default_z3().unwrap()).unwrap();
    let (table, report) = found(finder.run().unwrap());
    assert!(report.is_ok(), "{}", report);
    assert!(verify::latin_square(&table).is_pass());
    finder.into_solver().kill().unwrap();
}

#[test]
#[ignore]
fn z3_monotone_preorder() {
    let conf = Conf::preorder(3)
        .with(Axiom::Monotonicity)
        .with(Axiom::NonTrivial(NonTrivial::FullNotBelowEmpty));
    let mut finder = PreorderFinder::new(conf, Z3::default_z3().unwrap()).unwrap();
    let (relation, report) = found(finder.run().unwrap());
    assert!(report.is_ok(), "{}", report);
    assert!(!relation.get(7, 0));
}

#[test]
#[ignore]
fn z3_missing_right_inverse() {
    let mut finder = GroupFinder::new(Conf::group(3), Z3::default_z3().unwrap()).unwrap();
    let vars = finder.vars();
    let no_right_inverse = Expr::and(
        (0..3)
            .map(|b| build_expr!((not (= {vars.get(1, b)} {vars.identity()}))))
            .collect(),
    );
    finder.assert(&no_right_inverse).unwrap();
    assert_eq!(finder.solve().unwrap(), Outcome::Unsat);
}
