#![allow(non_snake_case)]

use crate::problem::Problem;

/// Dense numeric form of a parsed problem, the shape downstream solvers take:
/// objective `c`, constraint matrix `A` (one row per constraint, one column per
/// variable), right-hand sides `b`, relation codes `eqin` and the direction.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardForm {
    pub c: nalgebra::DVector<f64>,
    pub A: nalgebra::DMatrix<f64>,
    pub b: nalgebra::DVector<f64>,
    pub eqin: Vec<i8>,
    pub min_max: i8,
}

impl std::convert::From<&Problem> for StandardForm {
    fn from(prob: &Problem) -> StandardForm {
        let n = prob.num_vars();
        let m = prob.constraints().len();

        let c = nalgebra::DVector::from_iterator(n, prob.variables().iter().map(|var| var.obj_coeff));

        //variables missing from a row stay zero
        let mut A = nalgebra::DMatrix::zeros(m, n);
        let mut b = nalgebra::DVector::zeros(m);
        let mut eqin = Vec::with_capacity(m);

        for (i, constraint) in prob.constraints().iter().enumerate() {
            b[i] = constraint.rhs;
            eqin.push(constraint.op.code());

            for (id, coeff) in &constraint.coeffs {
                let j: usize = id.into();
                A[(i, j)] += *coeff;
            }
        }

        StandardForm {
            c,
            A,
            b,
            eqin,
            min_max: prob.min_max(),
        }
    }
}

impl std::convert::From<Problem> for StandardForm {
    fn from(prob: Problem) -> StandardForm {
        (&prob).into()
    }
}

impl StandardForm {
    pub fn rows(&self) -> usize {
        self.A.nrows()
    }

    pub fn cols(&self) -> usize {
        self.A.ncols()
    }
}

fn write_list<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter,
    items: impl IntoIterator<Item = T>,
) -> std::fmt::Result {
    write!(f, "[")?;

    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }

        write!(f, "{}", item)?;
    }

    write!(f, "]")
}

impl std::fmt::Display for StandardForm {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "c-vector: ")?;
        write_list(f, self.c.iter())?;

        write!(f, "\n\nA-matrix: [")?;

        for (i, row) in self.A.row_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }

            write_list(f, row.iter())?;
        }

        write!(f, "]\n\nb-vector: ")?;
        write_list(f, self.b.iter())?;

        write!(f, "\n\nEqin: ")?;
        write_list(f, self.eqin.iter())?;

        writeln!(f, "\n\nMinMax: [{}]", self.min_max)
    }
}
