use crate::error::{LpTextError, LpTextResult};

use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1, one_of, satisfy, space0};
use nom::combinator::{consumed, map, opt, recognize};
use nom::multi::many0_count;
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::IResult;

/// One signed term of a linear expression, as it appeared in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monomial<'a> {
    /// the full matched text, including leading whitespace and sign
    pub token: &'a str,
    /// the variable symbol, e.g. `x1`
    pub variable: &'a str,
}

impl<'a> Monomial<'a> {
    pub fn coefficient(&self) -> LpTextResult<f64> {
        extract_coefficient(self.token)
    }
}

/// Matches one monomial at the front of `i`: optional whitespace, an optional
/// sign, an optional decimal magnitude and a variable (a lowercase letter
/// followed by digits).
pub fn monomial(i: &str) -> IResult<&str, Monomial<'_>> {
    let (i, (token, (_ws, _sign, _magnitude, variable))) = consumed(tuple((
        space0,
        opt(terminated(one_of("+-"), space0)),
        opt(terminated(number, space0)),
        variable,
    )))(i)?;

    Ok((i, Monomial { token, variable }))
}

pub(crate) fn variable(i: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(|c| c.is_ascii_lowercase()), digit1))(i)
}

//3, 3., 3.25 or .25
pub(crate) fn number(i: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))(i)
}

/// Returns the coefficient contributed by a monomial token.
///
/// The shapes are tried in order, the first match wins:
///
/// 1. optional `+`, then a number: the number
/// 2. `-`, then a number: the negated number
/// 3. any number of `+`, then a variable: `1`
/// 4. `-`, then a variable: `-1`
///
/// Leading whitespace and whitespace after the sign are ignored. For tokens
/// such as `3x1` only the numeric prefix is read.
pub fn extract_coefficient(token: &str) -> LpTextResult<f64> {
    let unrecognized = || LpTextError::UnrecognizedMonomial {
        token: token.to_string(),
    };

    let explicit_positive = preceded(
        space0,
        preceded(opt(terminated(char('+'), space0)), number),
    );

    let explicit_negative = preceded(space0, preceded(terminated(char('-'), space0), number));

    let implicit_positive = preceded(
        space0,
        preceded(many0_count(terminated(char('+'), space0)), variable),
    );

    let implicit_negative = preceded(space0, preceded(terminated(char('-'), space0), variable));

    let shape: IResult<&str, Shape> = alt((
        map(explicit_positive, |magnitude| Shape::Explicit(1., magnitude)),
        map(explicit_negative, |magnitude| Shape::Explicit(-1., magnitude)),
        map(implicit_positive, |_| Shape::Implicit(1.)),
        map(implicit_negative, |_| Shape::Implicit(-1.)),
    ))(token);

    match shape {
        Ok((_rest, Shape::Explicit(sign, magnitude))) => magnitude
            .parse::<f64>()
            .map(|value| sign * value)
            .map_err(|_| unrecognized()),

        Ok((_rest, Shape::Implicit(value))) => Ok(value),

        Err(_) => Err(unrecognized()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape<'a> {
    Explicit(f64, &'a str),
    Implicit(f64),
}
