//! Tests over model extraction.

crate::prelude!();

use store::{RelationVars, TableVars};

fn table_vars(size: usize) -> (solver::Search, TableVars) {
    let mut solver = solver::Search::new();
    let vars = TableVars::new(size, &mut solver).unwrap();
    (solver, vars)
}

#[test]
fn group_table() {
    let (_solver, vars) = table_vars(2);
    let mut model = Valuation::new();
    model.insert(vars.identity(), Cst::int(0)).unwrap();
    for (a, b, ab) in [(0, 0, 0), (0, 1, 1), (1, 0, 1), (1, 1, 0)].iter() {
        model.insert(vars.get(*a, *b), Cst::int(*ab)).unwrap();
    }

    let table = extract::group(&vars, &model).unwrap();
    assert_eq!(table.size, 2);
    assert_eq!(table.identity, 0);
    assert_eq!(table.rows, vec![vec![0, 1], vec![1, 0]]);
    assert_eq!(
        table.to_string(),
        "\
* | 0 1    (identity: 0)
--+----
0 | 0 1
1 | 1 0"
    );
}

#[test]
fn group_table_failures() {
    let (_solver, vars) = table_vars(1);

    let err = extract::group(&vars, &Valuation::new()).unwrap_err();
    assert!(err.is_model());
    assert!(err.to_string().contains("no value for variable `v_0`"));

    let mut model = Valuation::new();
    model.insert(vars.identity(), Cst::int(0)).unwrap();
    model.insert(vars.get(0, 0), Cst::int(-1)).unwrap();
    let err = extract::group(&vars, &model).unwrap_err();
    assert!(err.is_model());
    assert!(err.to_string().contains("is not a table index"));
}

#[test]
fn out_of_range_values_are_extracted() {
    let (_solver, vars) = table_vars(1);
    let mut model = Valuation::new();
    model.insert(vars.identity(), Cst::int(0)).unwrap();
    model.insert(vars.get(0, 0), Cst::int(7)).unwrap();
    let table = extract::group(&vars, &model).unwrap();
    assert_eq!(table.get(0, 0), Some(7));
}

#[test]
fn relation() {
    let mut solver = solver::Search::new();
    let vars = RelationVars::new(1, &mut solver).unwrap();
    let mut model = Valuation::new();
    for (lft, rgt, related) in [(0, 0, true), (0, 1, true), (1, 0, false), (1, 1, true)].iter() {
        model
            .insert(vars.get(*lft, *rgt), Cst::bool(*related))
            .unwrap();
    }

    let relation = extract::relation(&vars, &model).unwrap();
    assert_eq!(relation.size(), 2);
    assert_eq!(relation.universe, 1);
    assert!(relation.get(0, 1));
    assert!(!relation.get(1, 0));
    assert_eq!(
        relation.to_string(),
        "\
0 | 1 1    {} ≤ {} {0}
1 | 0 1    {0} ≤ {0}"
    );

    let mut partial = Valuation::new();
    partial.insert(vars.get(0, 0), Cst::bool(true)).unwrap();
    assert!(extract::relation(&vars, &partial).unwrap_err().is_model());
}

#[test]
fn ill_shaped_structures() {
    assert!(extract::GroupTable::new(0, vec![]).unwrap_err().is_model());
    assert!(extract::GroupTable::new(0, vec![vec![0, 1]])
        .unwrap_err()
        .is_model());
    assert!(extract::Relation::new(1, vec![vec![true]])
        .unwrap_err()
        .is_model());
    assert!(extract::Relation::new(0, vec![vec![true]]).is_ok());
}
