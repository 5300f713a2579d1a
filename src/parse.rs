//! Parser for the constants a solver prints in its models.
//!
//! Only the values finite-domain searches can produce are recognized: booleans and (possibly
//! negated) integers, *e.g.* `true`, `7`, `(- 7)`.

crate::prelude!();

#[cfg(test)]
mod test;

peg::parser! {
    /// PEG parsing rules for solver values.
    pub grammar rules() for str {
        /// Whitespace.
        rule _() = quiet! { [ ' ' | '\n' | '\t' | '\r' ]* }

        /// Booleans.
        ///
        /// ```rust
        /// # use finmodel::parse::rules::bool;
        /// assert!(bool("true").unwrap());
        /// assert!(!bool("false").unwrap());
        /// ```
        pub rule bool() -> bool
        = "true" { true }
        / "false" { false }

        /// Parses an unsigned [`Int`], cannot be followed by a `.`.
        ///
        /// # Examples
        ///
        /// ```rust
        /// # use finmodel::{parse::rules::uint, prelude::Int};
        /// let n = 72054324;
        /// assert_eq!(uint(&n.to_string()).unwrap(), Int::from(n));
        ///
        /// // Cannot be followed by a `.`.
        /// assert_eq!(
        ///     uint("72054324.").unwrap_err().to_string(),
        ///     "error at 1:1: expected integer"
        /// );
        /// ```
        pub rule uint() -> Int
        = quiet! {
            digits:$("0" / ['1'..='9']['0'..='9']*) !['.'] {?
                Int::parse_bytes(digits.as_bytes(), 10).ok_or("illegal unsigned integer")
            }
        }
        / expected!("integer")

        /// Parses a signed integer, SMT-LIB style.
        pub rule int() -> Int
        = i:uint() { i }
        / "(" _ "-" _ i:uint() _ ")" { -i }

        /// Parses constants.
        pub rule cst() -> Cst
        = _ cst:(
            b:bool() { Cst::B(b) }
            / i:int() { Cst::I(i) }
        ) _ { cst }
        / expected!("bool/int constant")
    }
}

/// Parses a solver value.
///
/// # Examples
///
/// ```rust
/// # use finmodel::{parse, expr::Cst};
/// assert_eq!(parse::cst("true").unwrap(), Cst::bool(true));
/// assert_eq!(parse::cst(" (- 3) ").unwrap(), Cst::int(-3));
/// assert!(parse::cst("(/ 1 2)").is_err());
/// ```
pub fn cst(txt: &str) -> Res<Cst> {
    rules::cst(txt).map_err(|e| format!("illegal solver value `{}`: {}", txt.trim(), e).into())
}
