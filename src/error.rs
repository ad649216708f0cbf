//! Common error type.

use alloc::string::String;

/// Common error type.
#[derive(Debug)]
pub enum Error {
    Symbols(SymbolsError),
    Rule(RuleError),
    Meta(MetaError),
}

#[derive(Debug, Eq, PartialEq)]
pub enum SymbolsError {
    Reinsertion,
}

/// Errors when attaching rewrite rules to a symbol.
#[derive(Debug, Eq, PartialEq)]
pub enum RuleError {
    /// The symbol was declared constant.
    NonRewritable,
}

#[derive(Debug, Eq, PartialEq)]
pub enum MetaError {
    /// A metavariable of that user name already exists.
    Reintroduction(String),
    /// The metavariable was already instantiated.
    Instantiated,
}

impl From<SymbolsError> for Error {
    fn from(err: SymbolsError) -> Self {
        Self::Symbols(err)
    }
}

impl From<RuleError> for Error {
    fn from(err: RuleError) -> Self {
        Self::Rule(err)
    }
}

impl From<MetaError> for Error {
    fn from(err: MetaError) -> Self {
        Self::Meta(err)
    }
}
