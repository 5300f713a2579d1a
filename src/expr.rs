//! Defines the constraint expressions asserted into a backend.
//!
//! Expressions are built over [`Var`] handles handed out by a [`Backend`] and over boolean/integer
//! constants. The operator set is the one needed to encode finite-domain axioms: equality,
//! conjunction, disjunction, negation, implication, and the two comparisons `>=` and `<` used to
//! bound integer domains.
//!
//! [`Backend`]: crate::solver::Backend

crate::prelude!();

use rsmt2::print::{Expr2Smt, Sort2Smt, Sym2Smt};


pub use crate::build_expr as build;

/// A type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Typ {
    /// Bool type.
    Bool,
    /// Integer type.
    Int,
}
impl Typ {
    /// Creates a bool type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use finmodel::expr::Typ;
    /// let bool_typ = Typ::bool();
    /// assert_eq!(&bool_typ.to_string(), "bool")
    /// ```
    pub fn bool() -> Self {
        Self::Bool
    }
    /// Creates an integer type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use finmodel::expr::Typ;
    /// let int_typ = Typ::int();
    /// assert_eq!(&int_typ.to_string(), "int")
    /// ```
    pub fn int() -> Self {
        Self::Int
    }
}
impl Sort2Smt for Typ {
    fn sort_to_smt2<W: Write>(&self, w: &mut W) -> SmtRes<()> {
        write!(
            w,
            "{}",
            match self {
                Self::Bool => "Bool",
                Self::Int => "Int",
            }
        )?;
        Ok(())
    }
}

/// Constants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cst {
    /// Bool constant.
    B(bool),
    /// Integer constant.
    I(Int),
}
impl Cst {
    /// Creates a boolean constant.
    pub fn bool(b: bool) -> Self {
        Cst::B(b)
    }
    /// Creates an integer constant.
    pub fn int<I: Into<Int>>(i: I) -> Self {
        Cst::I(i.into())
    }

    /// Type of the constant.
    pub fn typ(&self) -> Typ {
        match self {
            Self::B(_) => Typ::Bool,
            Self::I(_) => Typ::Int,
        }
    }

    /// Boolean value, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::B(b) => Some(*b),
            Self::I(_) => None,
        }
    }
    /// Integer value, if any.
    pub fn as_int(&self) -> Option<&Int> {
        match self {
            Self::I(i) => Some(i),
            Self::B(_) => None,
        }
    }
}
impl Expr2Smt<()> for Cst {
    fn expr_to_smt2<W: Write>(&self, w: &mut W, _: ()) -> SmtRes<()> {
        write!(w, "{}", self)?;
        Ok(())
    }
}

/// Operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Op {
    /// Binary implication.
    Implies,
    /// Integer greater-or-equal.
    Ge,
    /// Integer less-than.
    Lt,
    /// N-ary equality.
    Eq,
    /// Negation.
    Not,
    /// N-ary conjunction.
    And,
    /// N-ary disjunction.
    Or,
}
impl Op {
    /// Tries to parse an operator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use finmodel::expr::Op;
    /// assert_eq!(Op::of_str("=>"), Some(Op::Implies));
    /// assert_eq!(Op::of_str("and"), Some(Op::And));
    /// assert_eq!(Op::of_str("⋀"), Some(Op::And));
    /// assert_eq!(Op::of_str("add"), None);
    /// ```
    pub fn of_str<Str: AsRef<str>>(s: Str) -> Option<Self> {
        use Op::*;
        let res = match s.as_ref() {
            "=>" | "implies" | "⇒" => Implies,
            ">=" | "≥" => Ge,
            "<" => Lt,
            "=" => Eq,
            "not" | "!" | "¬" => Not,
            "and" | "&&" | "⋀" => And,
            "or" | "||" | "⋁" => Or,
            _ => return None,
        };
        Some(res)
    }

    /// SMT-LIB representation.
    pub fn smt_str(self) -> &'static str {
        match self {
            Self::Implies => "=>",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Eq => "=",
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Minimal arity of `self`.
    pub fn min_arity(self) -> usize {
        match self {
            Self::Not => 1,
            Self::And | Self::Or | Self::Implies | Self::Eq | Self::Ge | Self::Lt => 2,
        }
    }

    /// Maximal arity for `self`, `None` if infinite.
    ///
    /// Implication is kept binary so that evaluation never has to decide on an associativity.
    pub fn max_arity(self) -> Option<usize> {
        match self {
            Self::Not => Some(1),
            Self::Implies | Self::Ge | Self::Lt => Some(2),
            Self::And | Self::Or | Self::Eq => None,
        }
    }

    /// Type-checks an operator application given the types of its arguments.
    pub fn type_check(self, args: &[Typ]) -> Res<Typ> {
        if args.len() < self.min_arity() {
            bail!(
                "`{}` expects at least {} argument(s)",
                self,
                self.min_arity(),
            )
        }
        if let Some(max) = self.max_arity() {
            if args.len() > max {
                bail!("`{}` expects at most {} argument(s)", self, max)
            }
        }

        match self {
            Self::Implies | Self::And | Self::Or | Self::Not => {
                if args.iter().any(|typ| *typ != Typ::Bool) {
                    bail!("`{}`'s arguments must all be boolean expressions", self)
                }
            }
            Self::Ge | Self::Lt => {
                if args.iter().any(|typ| *typ != Typ::Int) {
                    bail!("`{}`'s arguments must all be integer expressions", self)
                }
            }
            Self::Eq => {
                let first = args[0];
                for typ in &args[1..] {
                    if *typ != first {
                        bail!(
                            "`{}`'s arguments must all have the same type, found `{}` and `{}`",
                            self,
                            first,
                            typ,
                        )
                    }
                }
            }
        }

        Ok(Typ::Bool)
    }
}
impl Expr2Smt<()> for Op {
    fn expr_to_smt2<W: Write>(&self, w: &mut W, _: ()) -> SmtRes<()> {
        write!(w, "{}", self.smt_str())?;
        Ok(())
    }
}

/// A variable handle.
///
/// Handles are created by backends (see [`Backend::declare`]), which guarantee that two distinct
/// declarations never share an index. A handle is only meaningful for the backend session that
/// created it.
///
/// [`Backend::declare`]: crate::solver::Backend::declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var {
    /// Index of the variable in its session.
    idx: usize,
    /// Type of the variable.
    typ: Typ,
}
impl Var {
    /// Constructor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use finmodel::expr::{Var, Typ};
    /// let var = Var::new(7, Typ::Bool);
    /// assert_eq!(var.idx(), 7);
    /// assert_eq!(&var.to_string(), "v_7");
    /// ```
    pub fn new(idx: usize, typ: Typ) -> Self {
        Self { idx, typ }
    }

    /// Index accessor.
    pub fn idx(self) -> usize {
        self.idx
    }
    /// Type accessor.
    pub fn typ(self) -> Typ {
        self.typ
    }

    /// Retrieves the index of a variable from its SMT-LIB symbol, if it is one of ours.
    ///
    /// ```rust
    /// # use finmodel::expr::Var;
    /// assert_eq!(Var::idx_of_symbol("v_42"), Some(42));
    /// assert_eq!(Var::idx_of_symbol("div0"), None);
    /// ```
    pub fn idx_of_symbol(sym: &str) -> Option<usize> {
        sym.trim()
            .strip_prefix("v_")
            .and_then(|idx| usize::from_str_radix(idx, 10).ok())
    }
}
impl Sym2Smt<()> for Var {
    fn sym_to_smt2<W: Write>(&self, w: &mut W, _: ()) -> SmtRes<()> {
        write!(w, "v_{}", self.idx)?;
        Ok(())
    }
}

/// The expression structure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expr {
    /// A constant.
    Cst(Cst),
    /// A variable.
    Var(Var),
    /// An operator application.
    App {
        /// The operator.
        op: Op,
        /// The arguments.
        args: Vec<Expr>,
    },
}
impl Expr {
    /// Variable constructor.
    pub fn new_var(var: Var) -> Self {
        Self::Var(var)
    }

    /// Constant constructor.
    pub fn new_cst(cst: Cst) -> Self {
        Self::Cst(cst)
    }

    /// Type-checked operator application constructor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use finmodel::expr::{Expr, Op, Typ, Var};
    /// let (b, n) = (Var::new(0, Typ::Bool), Var::new(1, Typ::Int));
    /// assert!(Expr::new_op(Op::Not, vec![b.into()]).is_ok());
    /// assert!(Expr::new_op(Op::Not, vec![n.into()]).is_err());
    /// ```
    pub fn new_op(op: Op, args: Vec<Self>) -> Res<Self> {
        let typs = args.iter().map(Self::typ).collect::<Res<Vec<_>>>()?;
        op.type_check(&typs)?;
        Ok(Self::App { op, args })
    }

    /// Conjunction, collapses to `true` when `args` is empty and to its argument when unary.
    pub fn and(mut args: Vec<Self>) -> Self {
        match args.len() {
            0 => true.into(),
            1 => args.remove(0),
            _ => Self::App { op: Op::And, args },
        }
    }
    /// Disjunction, collapses to `false` when `args` is empty and to its argument when unary.
    pub fn or(mut args: Vec<Self>) -> Self {
        match args.len() {
            0 => false.into(),
            1 => args.remove(0),
            _ => Self::App { op: Op::Or, args },
        }
    }
    /// Negation.
    pub fn not(self) -> Self {
        Self::App {
            op: Op::Not,
            args: vec![self],
        }
    }

    /// Type of an expression, fails if some operator application in `self` is ill-typed.
    pub fn typ(&self) -> Res<Typ> {
        match self {
            Self::Cst(cst) => Ok(cst.typ()),
            Self::Var(var) => Ok(var.typ()),
            Self::App { op, args } => {
                let typs = args.iter().map(Self::typ).collect::<Res<Vec<_>>>()?;
                op.type_check(&typs)
                    .chain_err(|| format!("in `{}`", self))
            }
        }
    }

    /// True if `self` is a constant.
    pub fn is_cst(&self) -> bool {
        match self {
            Self::Cst(_) => true,
            Self::Var(_) | Self::App { .. } => false,
        }
    }

    /// Pushes the variables of `self` on `vars`, in order of appearance and with duplicates.
    pub fn vars_into(&self, vars: &mut Vec<Var>) {
        match self {
            Self::Cst(_) => (),
            Self::Var(var) => vars.push(*var),
            Self::App { args, .. } => {
                for arg in args {
                    arg.vars_into(vars)
                }
            }
        }
    }

    /// Set of the variables appearing in `self`.
    pub fn vars(&self) -> Set<Var> {
        let mut vars = vec![];
        self.vars_into(&mut vars);
        vars.into_iter().collect()
    }
}
impl Expr2Smt<()> for Expr {
    fn expr_to_smt2<W: Write>(&self, w: &mut W, _: ()) -> SmtRes<()> {
        match self {
            Self::Cst(cst) => cst.expr_to_smt2(w, ()),
            Self::Var(var) => var.sym_to_smt2(w, ()),
            Self::App { op, args } => {
                write!(w, "(")?;
                op.expr_to_smt2(w, ())?;
                for arg in args {
                    write!(w, " ")?;
                    arg.expr_to_smt2(w, ())?
                }
                write!(w, ")")?;
                Ok(())
            }
        }
    }
}

/// Packs basic trait implementations.
mod trait_impls {
    use super::*;

    impl fmt::Display for Typ {
        fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
            match self {
                Self::Bool => write!(fmt, "bool"),
                Self::Int => write!(fmt, "int"),
            }
        }
    }

    impl fmt::Display for Op {
        fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
            write!(fmt, "{}", self.smt_str())
        }
    }

    impl fmt::Display for Cst {
        fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
            match self {
                Self::B(b) => write!(fmt, "{}", b),
                Self::I(i) => {
                    if i.sign() == Sign::Minus {
                        write!(fmt, "(- {})", -i)
                    } else {
                        write!(fmt, "{}", i)
                    }
                }
            }
        }
    }
    impl From<bool> for Cst {
        fn from(b: bool) -> Self {
            Self::B(b)
        }
    }
    impl From<Int> for Cst {
        fn from(i: Int) -> Self {
            Self::I(i)
        }
    }
    impl From<usize> for Cst {
        fn from(n: usize) -> Self {
            Int::from(n).into()
        }
    }

    impl fmt::Display for Var {
        fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
            write!(fmt, "v_{}", self.idx)
        }
    }

    impl fmt::Display for Expr {
        fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
            match self {
                Self::Cst(cst) => write!(fmt, "{}", cst),
                Self::Var(var) => write!(fmt, "{}", var),
                Self::App { op, args } => {
                    write!(fmt, "({}", op)?;
                    for arg in args {
                        write!(fmt, " {}", arg)?
                    }
                    write!(fmt, ")")
                }
            }
        }
    }
    impl From<Cst> for Expr {
        fn from(cst: Cst) -> Self {
            Self::Cst(cst)
        }
    }
    impl From<bool> for Expr {
        fn from(b: bool) -> Self {
            Self::Cst(b.into())
        }
    }
    impl From<usize> for Expr {
        fn from(n: usize) -> Self {
            Self::Cst(n.into())
        }
    }
    impl From<Int> for Expr {
        fn from(i: Int) -> Self {
            Self::Cst(i.into())
        }
    }
    impl From<Var> for Expr {
        fn from(var: Var) -> Self {
            Self::Var(var)
        }
    }
    impl From<&Var> for Expr {
        fn from(var: &Var) -> Self {
            Self::Var(*var)
        }
    }
    impl From<(Op, Vec<Expr>)> for Expr {
        fn from((op, args): (Op, Vec<Expr>)) -> Self {
            Self::App { op, args }
        }
    }
}
