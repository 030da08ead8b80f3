use crate::error::LpTextError;
use crate::standard_form::StandardForm;

use std::collections::HashMap;

const LTE_STR: &str = "<=";
const EQ_STR: &str = "=";
const GTE_STR: &str = ">=";

/// A parsed linear program. Variables are kept in order of first appearance,
/// objective first, so a variable's id is also its column in the A-matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    direction: Direction,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    var_ids: HashMap<String, VariableId>, //these strings are duplicated in the variables
}

impl Problem {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            variables: Vec::new(),
            constraints: Vec::new(),
            var_ids: HashMap::new(),
        }
    }

    /// Returns the id of the variable called `name`, adding it with a zero
    /// objective coefficient if it has not been seen yet.
    pub fn var_id(&mut self, name: &str) -> VariableId {
        if let Some(&id) = self.var_ids.get(name) {
            return id;
        }

        let id = VariableId(self.variables.len());
        self.variables.push(Variable::new(id, 0., name.to_string()));
        self.var_ids.insert(name.to_string(), id);
        id
    }

    /// Adds `coeff` to the objective coefficient of `name`. Repeated terms
    /// for the same variable are summed.
    pub fn add_obj_coeff(&mut self, name: &str, coeff: f64) -> VariableId {
        let id = self.var_id(name);
        self.variables[id.0].obj_coeff += coeff;
        id
    }

    pub fn add_constraint(
        &mut self,
        coeffs: Vec<(VariableId, f64)>,
        op: ConstraintOp,
        rhs: f64,
    ) -> Result<(), LpTextError> {
        match coeffs
            .iter()
            .find(|(id, _coeff)| id.0 >= self.variables.len())
        {
            Some((invalid_var, _coeff)) => Err(LpTextError::InvalidVariable(*invalid_var)),

            None => {
                self.constraints.push(Constraint { coeffs, op, rhs });
                Ok(())
            }
        }
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn variables(&self) -> &[Variable] {
        self.variables.as_slice()
    }

    pub fn constraints(&self) -> &[Constraint] {
        self.constraints.as_slice()
    }

    pub fn var_names(&self) -> Vec<&str> {
        self.variables.iter().map(|var| var.name.as_str()).collect()
    }

    pub fn c_vector(&self) -> Vec<f64> {
        self.variables.iter().map(|var| var.obj_coeff).collect()
    }

    /// Constraint rows, each zero-padded to the number of variables.
    pub fn a_matrix(&self) -> Vec<Vec<f64>> {
        let n = self.num_vars();

        self.constraints
            .iter()
            .map(|constraint| constraint.dense_row(n))
            .collect()
    }

    pub fn b_vector(&self) -> Vec<f64> {
        self.constraints.iter().map(|constraint| constraint.rhs).collect()
    }

    pub fn eqin(&self) -> Vec<i8> {
        self.constraints
            .iter()
            .map(|constraint| constraint.op.code())
            .collect()
    }

    pub fn min_max(&self) -> i8 {
        self.direction.code()
    }

    /// Writes the c-vector, A-matrix, b-vector, Eqin, MinMax report.
    pub fn write_report<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        write!(out, "{}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: VariableId,
    pub obj_coeff: f64,
    pub name: String,
}

impl Variable {
    fn new(id: VariableId, obj_coeff: f64, name: String) -> Self {
        Self {
            id,
            obj_coeff,
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub coeffs: Vec<(VariableId, f64)>,
    pub op: ConstraintOp,
    pub rhs: f64,
}

impl Constraint {
    pub fn dense_row(&self, num_vars: usize) -> Vec<f64> {
        let mut row = vec![0.; num_vars];

        for (var, coeff) in &self.coeffs {
            let i: usize = var.into();
            row[i] += coeff;
        }

        row
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VariableId(usize);

impl std::convert::From<usize> for VariableId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl std::convert::From<VariableId> for usize {
    fn from(id: VariableId) -> Self {
        id.0
    }
}

impl std::convert::From<&VariableId> for usize {
    fn from(id: &VariableId) -> Self {
        id.0
    }
}

/// The relation of a constraint row, reported in Eqin as -1, 0 or 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOp {
    Lte,
    Eq,
    Gte,
}

impl ConstraintOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            LTE_STR => Some(ConstraintOp::Lte),
            EQ_STR => Some(ConstraintOp::Eq),
            GTE_STR => Some(ConstraintOp::Gte),
            _ => None,
        }
    }

    pub fn code(self) -> i8 {
        match self {
            ConstraintOp::Lte => -1,
            ConstraintOp::Eq => 0,
            ConstraintOp::Gte => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    pub fn code(self) -> i8 {
        match self {
            Direction::Maximize => 1,
            Direction::Minimize => -1,
        }
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", StandardForm::from(self))
    }
}

impl std::fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConstraintOp::Lte => write!(f, "{}", LTE_STR),
            ConstraintOp::Eq => write!(f, "{}", EQ_STR),
            ConstraintOp::Gte => write!(f, "{}", GTE_STR),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Direction::Maximize => write!(f, "max"),
            Direction::Minimize => write!(f, "min"),
        }
    }
}
