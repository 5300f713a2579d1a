//! Built-in backtracking backend over finite domains.
//!
//! Boolean variables range over `false, true`. Integer variables must be bounded by top-level
//! assertions of the form `(>= v lo)` and `(< v hi)` (possibly inside a top-level conjunction):
//! checking a session with an unbounded integer variable yields [`Outcome::Unknown`].
//!
//! The search assigns variables in declaration order, smallest value first, and prunes as soon as
//! a constraint evaluates to `false` under the partial assignment. It is complete: when it says
//! `unsat`, there is no model. An optional node budget turns very long searches into
//! [`Outcome::Unknown`].

crate::prelude!();

use expr::Op;

/// Values manipulated during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Val {
    B(bool),
    I(i64),
}
impl Val {
    fn of_cst(cst: &Cst) -> Res<Self> {
        match cst {
            Cst::B(b) => Ok(Self::B(*b)),
            Cst::I(i) => i.to_i64().map(Self::I).ok_or_else(|| {
                format!(
                    "integer constant `{}` is out of range for the built-in search",
                    i
                )
                .into()
            }),
        }
    }
    fn to_cst(self) -> Cst {
        match self {
            Self::B(b) => Cst::bool(b),
            Self::I(i) => Cst::int(i),
        }
    }
    fn as_bool(self) -> Option<bool> {
        match self {
            Self::B(b) => Some(b),
            Self::I(_) => None,
        }
    }
    fn as_int(self) -> Option<i64> {
        match self {
            Self::I(i) => Some(i),
            Self::B(_) => None,
        }
    }
}

/// Inclusive bounds on the values of a variable, booleans are `0` and `1`.
#[derive(Debug, Clone, Copy)]
struct Domain {
    typ: Typ,
    lo: Option<i64>,
    hi: Option<i64>,
}
impl Domain {
    fn new(typ: Typ) -> Self {
        match typ {
            Typ::Bool => Self {
                typ,
                lo: Some(0),
                hi: Some(1),
            },
            Typ::Int => Self {
                typ,
                lo: None,
                hi: None,
            },
        }
    }
    fn raise_lo(&mut self, lo: i64) {
        self.lo = Some(self.lo.map_or(lo, |old| old.max(lo)))
    }
    fn lower_hi(&mut self, hi: i64) {
        self.hi = Some(self.hi.map_or(hi, |old| old.min(hi)))
    }
    fn val(&self, raw: i64) -> Val {
        match self.typ {
            Typ::Bool => Val::B(raw != 0),
            Typ::Int => Val::I(raw),
        }
    }
}

/// Compiled constraint.
#[derive(Debug, Clone)]
enum Term {
    Val(Val),
    Var(usize),
    App(Op, Vec<Term>),
}
impl Term {
    fn eval_bool(&self, asg: &[Option<Val>]) -> Option<bool> {
        self.eval(asg).and_then(Val::as_bool)
    }
    fn eval_int(&self, asg: &[Option<Val>]) -> Option<i64> {
        self.eval(asg).and_then(Val::as_int)
    }

    /// Three-valued evaluation, `None` when the partial assignment does not decide `self`.
    fn eval(&self, asg: &[Option<Val>]) -> Option<Val> {
        let (op, args) = match self {
            Self::Val(val) => return Some(*val),
            Self::Var(idx) => return asg.get(*idx).copied().flatten(),
            Self::App(op, args) => (*op, args),
        };
        let res = match op {
            Op::Not => !args[0].eval_bool(asg)?,
            Op::And => {
                let mut undecided = false;
                for arg in args {
                    match arg.eval_bool(asg) {
                        Some(false) => return Some(Val::B(false)),
                        Some(true) => (),
                        None => undecided = true,
                    }
                }
                if undecided {
                    return None;
                }
                true
            }
            Op::Or => {
                let mut undecided = false;
                for arg in args {
                    match arg.eval_bool(asg) {
                        Some(true) => return Some(Val::B(true)),
                        Some(false) => (),
                        None => undecided = true,
                    }
                }
                if undecided {
                    return None;
                }
                false
            }
            Op::Implies => match args[0].eval_bool(asg) {
                Some(false) => true,
                Some(true) => args[1].eval_bool(asg)?,
                None => {
                    if args[1].eval_bool(asg)? {
                        true
                    } else {
                        return None;
                    }
                }
            },
            Op::Eq => {
                let mut first = None;
                let mut undecided = false;
                for arg in args {
                    match (arg.eval(asg), first) {
                        (Some(val), None) => first = Some(val),
                        (Some(val), Some(fst)) if val != fst => return Some(Val::B(false)),
                        (Some(_), Some(_)) => (),
                        (None, _) => undecided = true,
                    }
                }
                if undecided {
                    return None;
                }
                true
            }
            Op::Ge => args[0].eval_int(asg)? >= args[1].eval_int(asg)?,
            Op::Lt => args[0].eval_int(asg)? < args[1].eval_int(asg)?,
        };
        Some(Val::B(res))
    }
}

/// Result of a search.
enum Flow {
    Found,
    Exhausted,
    OutOfBudget,
}

/// Built-in backtracking backend.
///
/// # Examples
///
/// ```rust
/// # use finmodel::prelude::*;
/// # use finmodel::solver::Search;
/// let mut solver = Search::new();
/// let (n, b) = (solver.declare(Typ::Int).unwrap(), solver.declare(Typ::Bool).unwrap());
/// let (zero, three) = (0usize, 3usize);
/// solver.assert(&build_expr!((and (>= {n} {zero}) (< {n} {three})))).unwrap();
/// solver.assert(&build_expr!((=> (not {b}) (>= {n} {three})))).unwrap();
///
/// assert_eq!(solver.check_sat().unwrap(), Outcome::Sat);
/// let model = solver.valuation().unwrap();
/// assert_eq!(model.get(n), Some(&Cst::int(0)));
/// assert_eq!(model.get(b), Some(&Cst::bool(true)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Search {
    /// Domains of the declared variables, by index.
    domains: Vec<Domain>,
    /// Constraints mentioning at least one variable.
    constraints: Vec<Term>,
    /// Maps variable indices to the constraints mentioning them.
    watches: Vec<Vec<usize>>,
    /// True if a ground constraint evaluated to `false`.
    inconsistent: bool,
    /// Maximal number of search nodes per check.
    max_nodes: Option<u64>,
    /// Number of nodes explored by the last check.
    nodes: u64,
    /// Model of the last check, if it was `sat`.
    model: Option<Vec<Val>>,
}
impl Search {
    /// Constructor, no node budget.
    pub fn new() -> Self {
        Self::default()
    }
    /// Constructor with a node budget.
    pub fn with_max_nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
            ..Self::default()
        }
    }

    /// Number of nodes explored by the last check.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn domain_mut(&mut self, var: Var) -> Res<&mut Domain> {
        match self.domains.get_mut(var.idx()) {
            Some(dom) if dom.typ == var.typ() => Ok(dom),
            _ => bail!("unknown variable `{}` of type `{}`", var, var.typ()),
        }
    }

    /// Narrows domains from the top-level bounds in `expr`.
    fn narrow(&mut self, expr: &Expr) -> Res<()> {
        let (op, args) = match expr {
            Expr::Var(var) => {
                self.domain_mut(*var)?.raise_lo(1);
                return Ok(());
            }
            Expr::App { op, args } => (*op, args.as_slice()),
            Expr::Cst(_) => return Ok(()),
        };
        match (op, args) {
            (Op::And, args) => {
                for arg in args {
                    self.narrow(arg)?
                }
            }
            (Op::Not, [Expr::Var(var)]) => self.domain_mut(*var)?.lower_hi(0),
            (Op::Ge, [Expr::Var(var), Expr::Cst(cst)]) => {
                if let Ok(Val::I(lo)) = Val::of_cst(cst) {
                    self.domain_mut(*var)?.raise_lo(lo)
                }
            }
            (Op::Ge, [Expr::Cst(cst), Expr::Var(var)]) => {
                if let Ok(Val::I(hi)) = Val::of_cst(cst) {
                    self.domain_mut(*var)?.lower_hi(hi)
                }
            }
            (Op::Lt, [Expr::Var(var), Expr::Cst(cst)]) => {
                if let Ok(Val::I(hi)) = Val::of_cst(cst) {
                    self.domain_mut(*var)?.lower_hi(hi.saturating_sub(1))
                }
            }
            (Op::Lt, [Expr::Cst(cst), Expr::Var(var)]) => {
                if let Ok(Val::I(lo)) = Val::of_cst(cst) {
                    self.domain_mut(*var)?.raise_lo(lo.saturating_add(1))
                }
            }
            _ => (),
        }
        Ok(())
    }

    fn compile(&self, expr: &Expr) -> Res<Term> {
        match expr {
            Expr::Cst(cst) => Val::of_cst(cst).map(Term::Val),
            Expr::Var(var) => match self.domains.get(var.idx()) {
                Some(dom) if dom.typ == var.typ() => Ok(Term::Var(var.idx())),
                _ => bail!("unknown variable `{}` of type `{}`", var, var.typ()),
            },
            Expr::App { op, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.compile(arg))
                    .collect::<Res<Vec<_>>>()?;
                Ok(Term::App(*op, args))
            }
        }
    }

    fn dfs(
        &self,
        depth: usize,
        bounds: &[(i64, i64)],
        asg: &mut [Option<Val>],
        nodes: &mut u64,
    ) -> Flow {
        if depth >= bounds.len() {
            return Flow::Found;
        }
        let (lo, hi) = bounds[depth];
        let dom = &self.domains[depth];
        for raw in lo..=hi {
            *nodes += 1;
            if self.max_nodes.map_or(false, |max| *nodes > max) {
                return Flow::OutOfBudget;
            }
            asg[depth] = Some(dom.val(raw));
            let consistent = self.watches[depth]
                .iter()
                .all(|idx| self.constraints[*idx].eval_bool(asg) != Some(false));
            if consistent {
                match self.dfs(depth + 1, bounds, asg, nodes) {
                    Flow::Exhausted => (),
                    flow => return flow,
                }
            }
        }
        asg[depth] = None;
        Flow::Exhausted
    }
}

impl Backend for Search {
    fn declare(&mut self, typ: Typ) -> Res<Var> {
        let var = Var::new(self.domains.len(), typ);
        self.domains.push(Domain::new(typ));
        self.watches.push(vec![]);
        self.model = None;
        Ok(var)
    }

    fn assert(&mut self, expr: &Expr) -> Res<()> {
        let typ = expr.typ()?;
        if typ != Typ::Bool {
            bail!("cannot assert `{}` of type `{}`", expr, typ)
        }
        self.model = None;

        let term = self
            .compile(expr)
            .chain_err(|| format!("while asserting `{}`", expr))?;
        self.narrow(expr)?;

        let vars = expr.vars();
        if vars.is_empty() {
            if term.eval_bool(&[]) == Some(false) {
                debug!(constraint = %expr, "asserted a ground constraint that is false");
                self.inconsistent = true;
            }
            return Ok(());
        }
        let idx = self.constraints.len();
        self.constraints.push(term);
        for var in vars {
            self.watches[var.idx()].push(idx)
        }
        Ok(())
    }

    fn check_sat(&mut self) -> Res<Outcome> {
        self.model = None;
        self.nodes = 0;
        if self.inconsistent {
            return Ok(Outcome::Unsat);
        }

        let mut bounds = Vec::with_capacity(self.domains.len());
        for (idx, dom) in self.domains.iter().enumerate() {
            match (dom.lo, dom.hi) {
                (Some(lo), Some(hi)) => bounds.push((lo, hi)),
                _ => {
                    warn!(
                        var = idx,
                        "unbounded integer variable, the built-in search cannot decide"
                    );
                    return Ok(Outcome::Unknown);
                }
            }
        }
        if bounds.iter().any(|(lo, hi)| lo > hi) {
            return Ok(Outcome::Unsat);
        }

        let mut asg = vec![None; self.domains.len()];
        let mut nodes = 0;
        let flow = self.dfs(0, &bounds, &mut asg, &mut nodes);
        self.nodes = nodes;

        let outcome = match flow {
            Flow::Found => {
                self.model = asg.into_iter().collect();
                Outcome::Sat
            }
            Flow::Exhausted => Outcome::Unsat,
            Flow::OutOfBudget => Outcome::Unknown,
        };
        debug!(
            vars = self.domains.len(),
            constraints = self.constraints.len(),
            nodes,
            %outcome,
            "built-in search done",
        );
        Ok(outcome)
    }

    fn valuation(&mut self) -> Res<Valuation> {
        let model = match self.model.as_ref() {
            Some(model) => model,
            None => bail!(Error::usage(
                "asked for a model but the last check was not `sat`"
            )),
        };
        let mut valuation = Valuation::new();
        for (idx, (val, dom)) in model.iter().zip(&self.domains).enumerate() {
            valuation.insert(Var::new(idx, dom.typ), val.to_cst())?
        }
        Ok(valuation)
    }
}
