//! Error-handling.
//!
//! Unsatisfiable and unknown check results are **not** errors, see [`Outcome`]. Neither are
//! verification failures, see [`verify::Report`].
//!
//! [`Outcome`]: crate::solver::Outcome
//! [`verify::Report`]: crate::verify::Report

crate::prelude!();

/// Plain errors.
#[derive(Debug)]
pub enum Error {
    /// IO error from `std`.
    Io(std::io::Error),
    /// Error from [`rsmt2`].
    Smt(rsmt2::errors::Error),
    /// Invalid search configuration, detected before any backend interaction.
    Config(String),
    /// The API was used out of order or with mismatched structure families.
    Usage(String),
    /// The backend's valuation does not describe the declared variables.
    ///
    /// Indicates a modeling bug, not a normal search outcome.
    Model(String),
    /// A simple message.
    Msg(String),
}
impl Error {
    /// Configuration error constructor.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
    /// Usage error constructor.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
    /// Model error constructor.
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// True on configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
    /// True on usage errors.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
    /// True on model errors.
    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }

    /// Extends an error with a chain of errors.
    pub fn extend(self, errs: impl Iterator<Item = Error>) -> ErrorChain {
        ErrorChain::from(self).extend(errs)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(fmt, "{}", e),
            Self::Smt(e) => {
                write!(fmt, "smt-level error:")?;
                for e in e.iter() {
                    write!(fmt, " {}", e)?;
                }
                Ok(())
            }
            Self::Config(msg) => write!(fmt, "configuration error: {}", msg),
            Self::Usage(msg) => write!(fmt, "usage error: {}", msg),
            Self::Model(msg) => write!(fmt, "model error: {}", msg),
            Self::Msg(e) => write!(fmt, "{}", e),
        }
    }
}
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
impl From<rsmt2::errors::Error> for Error {
    fn from(e: rsmt2::errors::Error) -> Self {
        Self::Smt(e)
    }
}
impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.into())
    }
}

/// A source error and a chain of errors.
#[derive(Debug)]
pub struct ErrorChain {
    /// Source error.
    pub source: Error,
    /// Chain of errors on top.
    pub chain: Vec<Error>,
}
impl fmt::Display for ErrorChain {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.iter().enumerate() {
            if idx > 0 {
                write!(fmt, ", ")?;
            }
            write!(fmt, "{}", err)?;
        }
        Ok(())
    }
}
impl std::error::Error for ErrorChain {}
impl ErrorChain {
    /// Constructor.
    pub fn new(source: impl Into<Error>) -> Self {
        Self {
            source: source.into(),
            chain: vec![],
        }
    }

    /// Ref-iterator over all the errors in the chain.
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        Some(&self.source).into_iter().chain(&self.chain)
    }
    /// Own-iterator over all the errors in the chain.
    pub fn into_iter(self) -> impl Iterator<Item = Error> {
        Some(self.source).into_iter().chain(self.chain)
    }

    /// True if some error of the chain is a configuration error.
    pub fn is_config(&self) -> bool {
        self.iter().any(Error::is_config)
    }
    /// True if some error of the chain is a usage error.
    pub fn is_usage(&self) -> bool {
        self.iter().any(Error::is_usage)
    }
    /// True if some error of the chain is a model error.
    pub fn is_model(&self) -> bool {
        self.iter().any(Error::is_model)
    }

    /// Extends the chain.
    pub fn extend(mut self, errs: impl Iterator<Item = Error>) -> Self {
        self.chain.extend(errs);
        self
    }
}
impl From<Error> for ErrorChain {
    fn from(source: Error) -> Self {
        Self::new(source)
    }
}
impl From<std::io::Error> for ErrorChain {
    fn from(e: std::io::Error) -> Self {
        Self::new(e)
    }
}
impl From<rsmt2::errors::Error> for ErrorChain {
    fn from(e: rsmt2::errors::Error) -> Self {
        Self::new(e)
    }
}
impl From<String> for ErrorChain {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
impl From<&str> for ErrorChain {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Result type.
pub type Res<T> = Result<T, ErrorChain>;

/// Error-chaining extension trait.
pub trait ChainExt {
    /// Error-chaining result type.
    type Res;
    /// Chains an error.
    fn chain_err<E>(self, err: impl FnOnce() -> E) -> Self::Res
    where
        E: Into<Error>;
}

impl ChainExt for ErrorChain {
    type Res = ErrorChain;
    fn chain_err<E>(mut self, err: impl FnOnce() -> E) -> Self::Res
    where
        E: Into<Error>,
    {
        self.chain.push(err().into());
        self
    }
}
impl ChainExt for Error {
    type Res = ErrorChain;
    fn chain_err<E>(self, err: impl FnOnce() -> E) -> Self::Res
    where
        E: Into<Error>,
    {
        ErrorChain::from(self).chain_err(err)
    }
}
impl<T, Err> ChainExt for Result<T, Err>
where
    Err: Into<ErrorChain>,
{
    type Res = Res<T>;
    fn chain_err<E>(self, err: impl FnOnce() -> E) -> Self::Res
    where
        E: Into<Error>,
    {
        self.map_err(|e| e.into().chain_err(err))
    }
}
