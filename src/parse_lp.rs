use crate::error::{LpTextError, LpTextResult};
use crate::monomial::{monomial, Monomial};
use crate::problem::{ConstraintOp, Direction, Problem};

use nom::branch::alt;
use nom::bytes::complete::{is_a, tag};
use nom::character::complete::{digit1, satisfy, space0, space1};
use nom::combinator::{eof, map, not, peek, value};
use nom::sequence::{preceded, terminated};
use nom::IResult;

use log::{debug, error, trace, warn};

use std::io::Read;
use std::path::Path;

impl std::convert::TryFrom<&str> for Problem {
    type Error = LpTextError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        parse_lp(text)
    }
}

/// Parses LP text with the default [`LpParser`].
pub fn parse_lp(text: &str) -> LpTextResult<Problem> {
    LpParser::default().parse(text)
}

/// Reads and parses an LP file with the default [`LpParser`].
pub fn parse_lp_file<P: AsRef<Path>>(path: P) -> LpTextResult<Problem> {
    LpParser::default().parse_file(path)
}

/// Parser for the plain-text LP format:
///
/// ```text
/// max 2x1 + 3x2
/// st
/// x1 + x2 <= 4
/// x1 + 3x2 <= 6
/// end
/// ```
///
/// The objective is the first line starting with `max` or `min`. Constraints
/// start on the first line starting with `st` (the rest of that line may
/// already hold a constraint) and run until a line reading `end`.
pub struct LpParser {
    require_end: bool,
}

impl std::default::Default for LpParser {
    fn default() -> Self {
        Self { require_end: false }
    }
}

impl LpParser {
    /// With `require_end` unset, running out of lines before `end` keeps the
    /// constraints read so far. With it set, that is a [`LpTextError::MissingEnd`].
    pub fn new(require_end: bool) -> Self {
        Self { require_end }
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> LpTextResult<Problem> {
        let path = path.as_ref();

        let input_not_found = |source: std::io::Error| {
            error!("could not read {}: {}", path.display(), source);

            LpTextError::InputNotFound {
                path: path.display().to_string(),
                source,
            }
        };

        //the file is closed before parsing starts
        let text = {
            let f = std::fs::File::open(path).map_err(input_not_found)?;
            let mut reader = std::io::BufReader::new(f);
            let mut text = String::new();
            reader
                .read_to_string(&mut text)
                .map_err(input_not_found)?;
            text
        };

        debug!("read {} bytes from {}", text.len(), path.display());
        self.parse(&text)
    }

    pub fn parse(&self, text: &str) -> LpTextResult<Problem> {
        let lines: Vec<&str> = text.lines().collect();

        let (obj_index, direction, obj_text) = lines
            .iter()
            .enumerate()
            .find_map(|(index, line)| {
                objective_keyword(line)
                    .ok()
                    .map(|(rest, direction)| (index, direction, rest))
            })
            .ok_or_else(|| {
                error!("objective function not found");
                LpTextError::MissingObjective
            })?;

        debug!("found {} objective on line {}", direction, obj_index + 1);

        let mut prob = Problem::new(direction);
        parse_objective(&mut prob, obj_text, obj_index + 1)?;

        let (st_index, first_text) = lines
            .iter()
            .enumerate()
            .find_map(|(index, line)| {
                constraint_keyword(line)
                    .ok()
                    .map(|(rest, _keyword)| (index, rest))
            })
            .ok_or_else(|| {
                error!("constraints line not found, no 'st' keyword");
                LpTextError::MissingConstraintKeyword
            })?;

        debug!("constraints start on line {}", st_index + 1);

        let mut found_end = false;

        for (index, line) in lines.iter().enumerate().skip(st_index) {
            let text = if index == st_index {
                first_text
            } else if line.trim() == "end" {
                found_end = true;
                break;
            } else {
                *line
            };

            scan_constraint_line(text, index + 1)?.finish(&mut prob, index + 1)?;
        }

        if !found_end {
            if self.require_end {
                error!("constraints ended without an 'end' line");
                return Err(LpTextError::MissingEnd);
            }

            warn!(
                "constraints ended without an 'end' line, keeping the {} read so far",
                prob.constraints().len()
            );
        }

        debug!(
            "parsed {} variables and {} constraints",
            prob.num_vars(),
            prob.constraints().len()
        );

        Ok(prob)
    }
}

//a keyword is a whole word: followed by whitespace or the end of the line
fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(space0, terminated(tag(word), peek(alt((space1, eof)))))
}

//max or min, not followed by a letter: `max2x1` and `min-x1` start an objective, `maximize` does not
fn objective_keyword(line: &str) -> IResult<&str, Direction> {
    let direction = alt((
        value(Direction::Maximize, tag("max")),
        value(Direction::Minimize, tag("min")),
    ));

    preceded(
        space0,
        terminated(direction, not(satisfy(|c| c.is_ascii_lowercase()))),
    )(line)
}

fn constraint_keyword(line: &str) -> IResult<&str, &str> {
    keyword("st")(line)
}

fn parse_objective(prob: &mut Problem, text: &str, line: usize) -> LpTextResult<()> {
    let mut i = text;

    while let Ok((rest, term)) = monomial(i) {
        let coeff = term.coefficient()?;
        trace!("objective term {:?} -> {} {}", term.token, coeff, term.variable);
        prob.add_obj_coeff(term.variable, coeff);
        i = rest;
    }

    expect_exhausted(i, line)
}

fn expect_exhausted(rest: &str, line: usize) -> LpTextResult<()> {
    let rest = rest.trim();

    if rest.is_empty() {
        Ok(())
    } else {
        error!("line {}: unexpected text {:?}", line, rest);

        Err(LpTextError::UnexpectedToken {
            line,
            text: rest.to_string(),
        })
    }
}

/// One token of a constraint line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token<'a> {
    Term(Monomial<'a>),
    Relation(&'a str),
    Rhs(&'a str),
}

impl<'a> Token<'a> {
    fn text(&self) -> &'a str {
        match *self {
            Token::Term(term) => term.token.trim(),
            Token::Relation(symbol) => symbol,
            Token::Rhs(digits) => digits,
        }
    }
}

/// Matches the next token at the front of a constraint line. A monomial is
/// tried first, then a run of relation characters, then an integer.
pub(crate) fn constraint_token(i: &str) -> IResult<&str, Token<'_>> {
    alt((
        map(monomial, Token::Term),
        map(preceded(space0, is_a("<>=")), Token::Relation),
        map(preceded(space0, digit1), Token::Rhs),
    ))(i)
}

/// The constraint read so far from one line.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RowBuffer<'a> {
    terms: Vec<(&'a str, f64)>,
    op: Option<ConstraintOp>,
    rhs: Option<f64>,
}

impl<'a> RowBuffer<'a> {
    fn is_blank(&self) -> bool {
        self.terms.is_empty() && self.op.is_none() && self.rhs.is_none()
    }

    /// Consumes one token. Terms come first, then exactly one relation, then
    /// exactly one right-hand side.
    pub(crate) fn push(mut self, token: Token<'a>, line: usize) -> LpTextResult<Self> {
        let unexpected = |token: Token| {
            error!("line {}: unexpected {:?}", line, token.text());

            LpTextError::UnexpectedToken {
                line,
                text: token.text().to_string(),
            }
        };

        match token {
            Token::Term(term) => {
                if self.op.is_some() {
                    return Err(unexpected(token));
                }

                self.terms.push((term.variable, term.coefficient()?));
            }

            Token::Relation(symbol) => {
                let op = ConstraintOp::from_symbol(symbol).ok_or_else(|| {
                    error!(
                        "line {}: unexpected relation, expected <=, >= or = but got {}",
                        line, symbol
                    );

                    LpTextError::UnrecognizedRelationSymbol {
                        line,
                        symbol: symbol.to_string(),
                    }
                })?;

                if self.op.is_some() {
                    return Err(unexpected(token));
                }

                self.op = Some(op);
            }

            Token::Rhs(digits) => {
                if self.op.is_none() || self.rhs.is_some() {
                    return Err(unexpected(token));
                }

                self.rhs = Some(digits.parse::<f64>().map_err(|_| unexpected(token))?);
            }
        }

        Ok(self)
    }

    /// Adds the row to `prob`. Blank lines add nothing.
    pub(crate) fn finish(self, prob: &mut Problem, line: usize) -> LpTextResult<()> {
        if self.is_blank() {
            trace!("line {}: blank", line);
            return Ok(());
        }

        let incomplete = |reason: &str| {
            error!("line {}: incomplete constraint, {}", line, reason);

            LpTextError::IncompleteConstraint {
                line,
                reason: reason.to_string(),
            }
        };

        match (self.op, self.rhs) {
            (None, _) => Err(incomplete("missing relation")),
            (Some(_), None) => Err(incomplete("missing right-hand side")),

            (Some(_), Some(_)) if self.terms.is_empty() => {
                Err(incomplete("no terms before the relation"))
            }

            (Some(op), Some(rhs)) => {
                let coeffs = self
                    .terms
                    .into_iter()
                    .map(|(name, coeff)| (prob.var_id(name), coeff))
                    .collect();

                trace!("line {}: constraint {} {}", line, op, rhs);
                prob.add_constraint(coeffs, op, rhs)
            }
        }
    }
}

/// Folds the tokens of one constraint line into a [`RowBuffer`]. Every step
/// consumes a non-empty prefix of the remaining text; text matching no token
/// is an error.
pub(crate) fn scan_constraint_line(text: &str, line: usize) -> LpTextResult<RowBuffer<'_>> {
    let mut row = RowBuffer::default();
    let mut i = text;

    while let Ok((rest, token)) = constraint_token(i) {
        trace!("line {}: token {:?}", line, token);
        row = row.push(token, line)?;
        i = rest;
    }

    expect_exhausted(i, line)?;
    Ok(row)
}
