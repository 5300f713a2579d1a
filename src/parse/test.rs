//! Tests over solver value parsing.

crate::prelude!();

#[test]
fn booleans() {
    assert_eq!(parse::cst("true").unwrap(), Cst::bool(true));
    assert_eq!(parse::cst("false").unwrap(), Cst::bool(false));
    assert_eq!(parse::cst("\n  false ").unwrap(), Cst::bool(false));
}

#[test]
fn integers() {
    assert_eq!(parse::cst("0").unwrap(), Cst::int(0));
    assert_eq!(parse::cst("42").unwrap(), Cst::int(42));
    assert_eq!(parse::cst("(- 42)").unwrap(), Cst::int(-42));
    assert_eq!(parse::cst("(-\t1 )").unwrap(), Cst::int(-1));
}

#[test]
fn illegal_values() {
    for txt in &["", "(/ 1 2)", "1.5", "truefalse", "(- true)", "v_3"] {
        let err = parse::cst(txt).unwrap_err();
        assert!(
            err.to_string().starts_with("illegal solver value"),
            "unexpected error `{}` on `{}`",
            err,
            txt
        );
    }
}
