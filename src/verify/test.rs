//! Tests over structure verification.

crate::prelude!();

use extract::{GroupTable, Relation};
use verify::Verdict;

fn table(identity: usize, rows: &[&[usize]]) -> GroupTable {
    GroupTable::new(identity, rows.iter().map(|row| row.to_vec()).collect()).unwrap()
}
fn relation(universe: usize, rows: &[&[bool]]) -> Relation {
    Relation::new(universe, rows.iter().map(|row| row.to_vec()).collect()).unwrap()
}

#[test]
fn cyclic_group() {
    let z3 = table(0, &[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]);
    let report = verify::group(&z3, Kind::Group.axioms().iter().copied()).unwrap();
    assert!(report.is_ok());
    assert_eq!(report.len(), 5);
    assert_eq!(report.passed().count(), 5);
    assert_eq!(report.failures().count(), 0);
    assert!(verify::latin_square(&z3).is_pass());
    assert_eq!(
        report.to_string(),
        "\
domain: pass
identity: pass
associativity: pass
inverse: pass
commutativity: pass"
    );
}

#[test]
fn wrong_identity() {
    let z2 = table(1, &[&[0, 1], &[1, 0]]);
    assert_eq!(verify::identity(&z2), Verdict::fail([0]));
    assert!(verify::inverse(&z2).is_pass());
    assert!(verify::associativity(&z2).is_pass());
}

#[test]
fn missing_inverse() {
    let or = table(0, &[&[0, 1], &[1, 1]]);
    let report = verify::group(&or, Kind::Group.default_axioms().iter().copied()).unwrap();
    assert!(!report.is_ok());
    assert_eq!(report.get(Axiom::Inverse), Some(&Verdict::fail([1])));
    assert_eq!(report.get(Axiom::Identity), Some(&Verdict::Pass));
    assert_eq!(report.get(Axiom::Commutativity), None);
    assert_eq!(
        report.failures().collect::<Vec<_>>(),
        vec![(Axiom::Inverse, &[1][..])],
    );
    assert_eq!(verify::latin_square(&or), Verdict::fail([1, 1]));
}

#[test]
fn non_associative() {
    let tbl = table(0, &[&[0, 1, 2], &[1, 0, 0], &[2, 0, 0]]);
    assert_eq!(verify::associativity(&tbl), Verdict::fail([1, 1, 2]));
    assert!(verify::identity(&tbl).is_pass());
    assert!(verify::commutativity(&tbl).is_pass());
}

#[test]
fn non_commutative() {
    let tbl = table(0, &[&[0, 1], &[0, 1]]);
    assert_eq!(verify::commutativity(&tbl), Verdict::fail([0, 1]));
    assert_eq!(
        verify::commutativity(&tbl).to_string(),
        "fail on 0 1"
    );
}

#[test]
fn out_of_range_values() {
    let tbl = table(0, &[&[0, 5], &[5, 0]]);
    assert_eq!(verify::domain(&tbl), Verdict::fail([0, 1]));
    assert!(!verify::associativity(&tbl).is_pass());
    // `0*0 = 1*1 = e`, out-of-range cells are irrelevant.
    assert!(verify::inverse(&tbl).is_pass());
    assert_eq!(verify::latin_square(&tbl), Verdict::fail([0, 1]));

    let tbl = table(0, &[&[0, 1], &[1, 5]]);
    assert_eq!(verify::domain(&tbl), Verdict::fail([1, 1]));
    assert_eq!(verify::inverse(&tbl), Verdict::fail([1]));
    assert!(verify::identity(&tbl).is_pass());

    let tbl = table(9, &[&[0, 1], &[1, 0]]);
    assert_eq!(verify::domain(&tbl), Verdict::fail([9]));
    assert!(!verify::identity(&tbl).is_pass());
    assert!(!verify::inverse(&tbl).is_pass());
}

#[test]
fn subset_order() {
    let rel = relation(1, &[&[true, true], &[false, true]]);
    let report = verify::preorder(&rel, Kind::Preorder.axioms().iter().copied()).unwrap();
    assert!(report.is_ok(), "{}", report);
    assert_eq!(report.len(), 5);
}

#[test]
fn total_relation() {
    let rel = relation(1, &[&[true, true], &[true, true]]);
    let some_strict_pair = Axiom::NonTrivial(NonTrivial::SomeStrictPair);
    let full_not_below_empty = Axiom::NonTrivial(NonTrivial::FullNotBelowEmpty);
    let report = verify::preorder(
        &rel,
        vec![
            Axiom::Reflexivity,
            Axiom::Transitivity,
            Axiom::Monotonicity,
            full_not_below_empty,
            some_strict_pair,
        ],
    )
    .unwrap();
    assert_eq!(report.passed().count(), 3);
    assert_eq!(
        report.get(full_not_below_empty),
        Some(&Verdict::fail([1, 0]))
    );
    assert_eq!(report.get(some_strict_pair).unwrap().witness(), Some(&[][..]));
    assert_eq!(report.get(some_strict_pair).unwrap().to_string(), "fail");
}

#[test]
fn broken_preorder() {
    let rel = relation(1, &[&[true, true], &[true, false]]);
    assert_eq!(verify::reflexivity(&rel), Verdict::fail([1]));
    assert_eq!(verify::transitivity(&rel), Verdict::fail([1, 0, 1]));
    assert_eq!(verify::monotonicity(&rel), Verdict::fail([1, 1]));
    let report = verify::preorder(&rel, vec![Axiom::Reflexivity]).unwrap();
    assert_eq!(report.to_string(), "reflexivity: fail on 1");
}

#[test]
fn idempotence() {
    let rel = relation(2, &[
        &[true, true, true, true],
        &[false, true, false, true],
        &[false, false, true, true],
        &[false, false, false, true],
    ]);
    let axioms = Kind::Preorder.axioms().iter().copied();
    let fst = verify::preorder(&rel, axioms.clone()).unwrap();
    let snd = verify::preorder(&rel, axioms).unwrap();
    assert!(fst.is_ok(), "{}", fst);
    assert_eq!(fst, snd);

    let or = table(0, &[&[0, 1], &[1, 1]]);
    let axioms = Kind::Group.axioms().iter().copied();
    assert_eq!(
        verify::group(&or, axioms.clone()).unwrap(),
        verify::group(&or, axioms).unwrap(),
    );
}

#[test]
fn wrong_family() {
    let z1 = table(0, &[&[0]]);
    let err = verify::group(&z1, vec![Axiom::Identity, Axiom::Reflexivity]).unwrap_err();
    assert!(err.is_usage());

    let rel = relation(0, &[&[true]]);
    let err = verify::preorder(&rel, vec![Axiom::Inverse]).unwrap_err();
    assert!(err.is_usage());
}
