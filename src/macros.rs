//! Finmodel's macros.

/// Imports finmodel's prelude.
#[macro_export]
macro_rules! prelude {
    {} => { use $crate::prelude::*; };
    { pub } => { pub use $crate::prelude::*; };
    { $($imports:tt)* } => { use $crate::prelude::{*, $($imports)*}; };
}

/// Convenience macro, provides a DSL for writing constraint expressions.
///
/// - applications are written SMT-LIB style: `(op arg_1 arg_2 ...)`;
/// - any Rust expression convertible to an [`Expr`] (variable handles, `usize`s, booleans,
///   expressions) can be embedded between braces: `{vars.get(i, j)}`.
///
/// The result is **not** type-checked, see [`Expr::typ`].
///
/// # Examples
///
/// ```rust
/// # use finmodel::expr::{Expr, Typ, Var};
/// let (x, y) = (Var::new(0, Typ::Int), Var::new(1, Typ::Int));
/// let bound = 3usize;
/// let expr = finmodel::build_expr!(
///     (=> (>= {x} {bound}) (= {x} {y}))
/// );
/// assert_eq!(&expr.to_string(), "(=> (>= v_0 3) (= v_0 v_1))");
/// ```
///
/// [`Expr`]: crate::expr::Expr
/// [`Expr::typ`]: crate::expr::Expr::typ
#[macro_export]
macro_rules! build_expr {
    (@op =>) => ( $crate::expr::Op::Implies );
    (@op >=) => ( $crate::expr::Op::Ge );
    (@op <) => ( $crate::expr::Op::Lt );
    (@op =) => ( $crate::expr::Op::Eq );
    (@op not) => ( $crate::expr::Op::Not );
    (@op and) => ( $crate::expr::Op::And );
    (@op or) => ( $crate::expr::Op::Or );
    (@op !) => ( $crate::expr::Op::Not );
    (@op &&) => ( $crate::expr::Op::And );
    (@op ||) => ( $crate::expr::Op::Or );

    (true) => ( $crate::expr::Expr::from(true) );
    (false) => ( $crate::expr::Expr::from(false) );

    ( ($op:tt $($args:tt)*) ) => (
        $crate::expr::Expr::from((
            $crate::build_expr!(@op $op),
            vec![ $($crate::build_expr!($args)),* ],
        ))
    );

    ($e:expr) => ( $crate::expr::Expr::from($e) );
}
