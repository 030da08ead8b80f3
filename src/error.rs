use crate::problem::VariableId;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LpTextError {
    #[error("input file error: could not read {path}: {source}")]
    InputNotFound {
        path: String,
        source: std::io::Error,
    },

    #[error("input file error: objective function not found, expected a line starting with max or min")]
    MissingObjective,

    #[error("input file error: constraints line not found, no 'st' keyword")]
    MissingConstraintKeyword,

    #[error("line {line}: unexpected relation, expected <=, >= or = but got {symbol}")]
    UnrecognizedRelationSymbol { line: usize, symbol: String },

    #[error("unrecognized monomial: {token:?}")]
    UnrecognizedMonomial { token: String },

    #[error("line {line}: unexpected text {text:?}")]
    UnexpectedToken { line: usize, text: String },

    #[error("line {line}: incomplete constraint, {reason}")]
    IncompleteConstraint { line: usize, reason: String },

    #[error("{0:?} is invalid")]
    InvalidVariable(VariableId),

    #[error("constraints ended without an 'end' line")]
    MissingEnd,
}

pub type LpTextResult<T> = Result<T, LpTextError>;
