//! A small finite model finder for groups and preorders.
//!
//! Axioms are compiled into constraints over one variable per cell of the structure searched for,
//! a [backend](solver::Backend) decides satisfiability, and the structure read from the model is
//! re-verified independently of the encoding.
//!
//! Two structure families are supported:
//!
//! - groups over `{0, ..., n-1}`, as an `n x n` multiplication table plus an identity element;
//! - preorders over the powerset of `{0, ..., n-1}`, as a `2^n x 2^n` boolean matrix indexed by
//!   [bitmasks](bits).
//!
//! # Examples
//!
//! ```rust
//! use finmodel::{find::{Answer, PreorderFinder}, prelude::*, solver::Search};
//!
//! let conf = Conf::preorder(2)
//!     .with(Axiom::Monotonicity)
//!     .with(Axiom::NonTrivial(NonTrivial::FullNotBelowEmpty));
//! let mut finder = PreorderFinder::new(conf, Search::new()).unwrap();
//! let answer = finder.run().unwrap();
//!
//! let relation = answer.structure().unwrap();
//! assert!(relation.get(0b01, 0b11));
//! assert!(!relation.get(0b11, 0b00));
//! assert!(answer.report().unwrap().is_ok());
//! ```
//!
//! Searches run on the built-in [`Search`](solver::Search) backend above. The
//! [`Z3`](solver::Z3) backend drives an actual SMT solver and scales much further. Logging goes
//! through [`tracing`], installing a subscriber is up to the caller.

#![forbid(missing_docs)]

pub extern crate rsmt2;

mod macros;

pub mod prelude;

pub mod bits;
pub mod conf;
pub mod encode;
pub mod err;
pub mod expr;
pub mod extract;
pub mod find;
pub mod parse;
pub mod solver;
pub mod store;
pub mod verify;
