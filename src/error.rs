use thiserror::Error;

/// Errors produced by the symbolic-expression layer.
///
/// All variants are precondition violations: they abort the calling
/// operation but leave the expression table intact, so callers can catch
/// them per operation (skip one expression, substitute a placeholder)
/// without tearing the session down.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The expression has no formula attached (default-constructed or
    /// moved-from). Carries the name of the operation that was attempted.
    #[error("{0}: no AST defined")]
    UndefinedExpression(&'static str),

    /// The shared representation mode holds a value outside the recognized
    /// set. This is a configuration bug in the surrounding context, not a
    /// data problem here.
    #[error("invalid AST representation mode: {0}")]
    InvalidRepresentationMode(u32),

    /// Malformed node construction (operand width mismatch, bad extract
    /// range, and the like).
    #[error("malformed AST node: {0}")]
    Ast(String),
}

pub type Result<T> = std::result::Result<T, Error>;
