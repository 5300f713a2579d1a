//! Tests over the backends.

crate::prelude!();

use rsmt2::parse::IdentParser;

use solver::{
    smt::{self, SmtParser},
    Search,
};

#[test]
fn valuation() {
    let (b, n) = (Var::new(0, Typ::Bool), Var::new(1, Typ::Int));
    let mut model = Valuation::new();
    assert!(model.is_empty());
    model.insert(b, Cst::bool(true)).unwrap();
    model.insert(n, Cst::int(3)).unwrap();
    assert_eq!(model.len(), 2);
    assert_eq!(model.get(n), Some(&Cst::int(3)));
    assert_eq!(model.get(Var::new(2, Typ::Int)), None);

    let err = model.insert(b, Cst::bool(false)).unwrap_err();
    assert_eq!(err.to_string(), "trying to insert a value for v_0 twice");
    let err = model
        .insert(Var::new(2, Typ::Bool), Cst::int(0))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "trying to give value `0` of type `int` to variable `v_2` of type `bool`"
    );
}

#[test]
fn search_booleans() {
    let mut solver = Search::new();
    let (a, b, c) = (
        solver.declare(Typ::Bool).unwrap(),
        solver.declare(Typ::Bool).unwrap(),
        solver.declare(Typ::Bool).unwrap(),
    );
    assert_ne!(a, b);
    solver.assert(&build_expr!((or {a} {b}))).unwrap();
    solver.assert(&build_expr!((=> {b} {c}))).unwrap();
    solver.assert(&build_expr!((not {c}))).unwrap();
    assert_eq!(solver.check_sat().unwrap(), Outcome::Sat);
    let model = solver.valuation().unwrap();
    assert_eq!(model.len(), 3);
    assert_eq!(model.get(a), Some(&Cst::bool(true)));
    assert_eq!(model.get(b), Some(&Cst::bool(false)));
    assert_eq!(model.get(c), Some(&Cst::bool(false)));

    solver.assert(&build_expr!((not {a}))).unwrap();
    assert!(solver.valuation().unwrap_err().is_usage());
    assert_eq!(solver.check_sat().unwrap(), Outcome::Unsat);
    assert!(solver.valuation().unwrap_err().is_usage());
}

#[test]
fn search_integers() {
    let mut solver = Search::new();
    let (n, m) = (
        solver.declare(Typ::Int).unwrap(),
        solver.declare(Typ::Int).unwrap(),
    );
    let (minus_two, five) = (Cst::int(-2), 5usize);
    solver
        .assert(&build_expr!((and (>= {n} {minus_two.clone()}) (< {n} {five}))))
        .unwrap();
    assert_eq!(solver.check_sat().unwrap(), Outcome::Unknown);

    solver
        .assert(&build_expr!((and (>= {m} {minus_two}) (< {m} {five}))))
        .unwrap();
    solver
        .assert(&build_expr!((not (= {n} {m}))))
        .unwrap();
    assert_eq!(solver.check_sat().unwrap(), Outcome::Sat);
    let model = solver.valuation().unwrap();
    assert_eq!(model.get(n), Some(&Cst::int(-2)));
    assert_eq!(model.get(m), Some(&Cst::int(-1)));

    let three = 3usize;
    solver.assert(&build_expr!((>= {n} {three}))).unwrap();
    solver.assert(&build_expr!((= {n} {m} {three}))).unwrap();
    assert_eq!(solver.check_sat().unwrap(), Outcome::Unsat);
}

#[test]
fn search_empty_domain() {
    let mut solver = Search::new();
    let n = solver.declare(Typ::Int).unwrap();
    let (three, two) = (3usize, 2usize);
    solver
        .assert(&build_expr!((and (>= {n} {three}) (< {n} {two}))))
        .unwrap();
    assert_eq!(solver.check_sat().unwrap(), Outcome::Unsat);
    assert_eq!(solver.nodes(), 0);
}

#[test]
fn search_ground_constraints() {
    let mut solver = Search::new();
    let b = solver.declare(Typ::Bool).unwrap();
    solver.assert(&build_expr!((or {b} (not {b})))).unwrap();
    solver.assert(&build_expr!((= true true))).unwrap();
    assert_eq!(solver.check_sat().unwrap(), Outcome::Sat);
    solver.assert(&build_expr!((and true false))).unwrap();
    assert_eq!(solver.check_sat().unwrap(), Outcome::Unsat);
}

#[test]
fn search_node_budget() {
    let mut solver = Search::with_max_nodes(3);
    let vars: Vec<_> = (0..4).map(|_| solver.declare(Typ::Bool).unwrap()).collect();
    solver
        .assert(&Expr::and(vars.iter().map(Expr::from).collect()))
        .unwrap();
    // narrowed to `true`, one node per variable
    assert_eq!(solver.check_sat().unwrap(), Outcome::Unknown);

    let mut solver = Search::new();
    let vars: Vec<_> = (0..4).map(|_| solver.declare(Typ::Bool).unwrap()).collect();
    solver
        .assert(&Expr::and(vars.iter().map(Expr::from).collect()))
        .unwrap();
    assert_eq!(solver.check_sat().unwrap(), Outcome::Sat);
    assert_eq!(solver.nodes(), 4);
}

#[test]
fn search_illegal_assertions() {
    let mut solver = Search::new();
    let n = solver.declare(Typ::Int).unwrap();
    let err = solver.assert(&Expr::from(n)).unwrap_err();
    assert_eq!(err.to_string(), "cannot assert `v_0` of type `int`");

    let foreign = Var::new(7, Typ::Bool);
    let err = solver.assert(&Expr::from(foreign)).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("unknown variable `v_7` of type `bool`"));

    let ill_typed = Expr::from((expr::Op::And, vec![Expr::from(n), Expr::from(true)]));
    assert!(solver.assert(&ill_typed).is_err());
}

#[test]
fn smt_parser() {
    assert_eq!(SmtParser.parse_ident("v_12").unwrap(), Some(12));
    assert_eq!(SmtParser.parse_ident("k!0").unwrap(), None);
    assert_eq!(SmtParser.parse_type("Bool").unwrap(), Typ::Bool);
    assert_eq!(SmtParser.parse_type(" Int").unwrap(), Typ::Int);
    assert!(SmtParser.parse_type("Real").is_err());
}

fn smt_model(txt: &str) -> Res<smt::SmtModel> {
    let model = RSmtParser::of_str(txt).get_model(false, SmtParser)?;
    Ok(model)
}

#[test]
fn smt_model_entries() {
    let vars = [Var::new(0, Typ::Bool), Var::new(1, Typ::Int), Var::new(2, Typ::Int)];
    let model = smt_model(
        "(model
            (define-fun v_0 () Bool true)
            (define-fun v_1 () Int (- 3))
            (define-fun v_2 () Int 7)
            (define-fun k!0 () Int 1)
            (define-fun v_7 () Int 2)
            (define-fun v_3 ((x!0 Int)) Int (ite (= x!0 1) 2 3))
        )",
    )
    .unwrap();
    assert_eq!(model.len(), 6);
    assert!(model[5].3.is_right());

    let valuation = smt::valuation_of(&vars, model).unwrap();
    assert_eq!(valuation.len(), 3);
    assert_eq!(valuation.get(vars[0]), Some(&Cst::bool(true)));
    assert_eq!(valuation.get(vars[1]), Some(&Cst::int(-3)));
    assert_eq!(valuation.get(vars[2]), Some(&Cst::int(7)));
}

#[test]
fn smt_model_non_constant_value() {
    let vars = [Var::new(0, Typ::Int)];
    let model = smt_model("(model (define-fun v_0 () Int (+ 1 2)))").unwrap();
    assert!(model[0].3.is_right());
    let valuation = smt::valuation_of(&vars, model).unwrap();
    assert!(valuation.is_empty());
}

#[test]
fn smt_model_type_mismatch() {
    let vars = [Var::new(0, Typ::Bool)];
    let model = smt_model("(model (define-fun v_0 () Int 3))").unwrap();
    let err = smt::valuation_of(&vars, model).unwrap_err();
    assert_eq!(
        err.to_string(),
        "trying to give value `3` of type `int` to variable `v_0` of type `bool`, \
        while reading z3's model"
    );
}
