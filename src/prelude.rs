//! Common imports throughout this project.

pub use std::{
    collections::{BTreeMap as Map, BTreeSet as Set},
    fmt,
    io::Write,
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

pub use either::Either;
pub use error_chain::bail;
pub use num::{bigint::Sign, BigInt as Int, ToPrimitive};
pub use rsmt2::{parse::SmtParser as RSmtParser, SmtConf, SmtRes, Solver as SmtSolver};
pub use tracing::{debug, info, trace, warn};

pub use crate::{
    bits, build_expr, conf,
    conf::Conf,
    encode,
    encode::{Axiom, Kind, NonTrivial},
    err::{ChainExt, Error, ErrorChain, Res},
    expr,
    expr::{Cst, Expr, Typ, Var},
    extract, find, parse,
    solver::{self, Backend, Outcome, Valuation},
    store, verify,
};

/// A bitmask encoding a subset of a finite universe.
///
/// Bit `k` is set iff element `k` belongs to the subset.
pub type Mask = usize;
