mod error;
pub mod monomial;
mod parse_lp;
pub mod problem;
mod standard_form;

pub use crate::error::{LpTextError, LpTextResult};
pub use crate::monomial::extract_coefficient;
pub use crate::parse_lp::{parse_lp, parse_lp_file, LpParser};
pub use crate::problem::{Constraint, ConstraintOp, Direction, Problem, Variable, VariableId};
pub use crate::standard_form::StandardForm;
