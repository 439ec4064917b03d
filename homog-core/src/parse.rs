/// Parser for the textual matrix rendering produced by `Display`
use nom::{
    bytes::complete::take_till1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map_res},
    sequence::{delimited, preceded},
    Finish, IResult,
};
use std::str::FromStr;

use crate::{error::MatrixError, matrix::Matrix4x4, point::Point4, scalar::Scalar};

/// Parses four `(x, y, z, w)` rows. Whitespace between tokens and around
/// rows is ignored, so both the one-row-per-line rendering and a single
/// line are accepted.
impl<T: Scalar + FromStr> FromStr for Matrix4x4<T> {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, MatrixError> {
        match all_consuming(parse_rows::<T>)(s).finish() {
            Ok((_, [r0, r1, r2, r3])) => Ok(Matrix4x4::from_rows(r0, r1, r2, r3)),
            Err(e) => Err(MatrixError::Parse(format!(
                "unexpected input at byte {} ({:?})",
                s.len() - e.input.len(),
                e.code
            ))),
        }
    }
}

fn parse_rows<T: FromStr>(input: &str) -> IResult<&str, [Point4<T>; 4]> {
    let (input, r0) = parse_row(input)?;
    let (input, r1) = parse_row(input)?;
    let (input, r2) = parse_row(input)?;
    let (input, r3) = parse_row(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, [r0, r1, r2, r3]))
}

fn parse_row<T: FromStr>(input: &str) -> IResult<&str, Point4<T>> {
    let (input, _) = preceded(multispace0, char('('))(input)?;
    let (input, x) = parse_component(input)?;
    let (input, _) = char(',')(input)?;
    let (input, y) = parse_component(input)?;
    let (input, _) = char(',')(input)?;
    let (input, z) = parse_component(input)?;
    let (input, _) = char(',')(input)?;
    let (input, w) = parse_component(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, Point4::new(x, y, z, w)))
}

// Anything up to the next separator is handed to `FromStr`, which also
// covers the `inf` and `NaN` renderings of non-finite floats.
fn parse_component<T: FromStr>(input: &str) -> IResult<&str, T> {
    delimited(
        multispace0,
        map_res(
            take_till1(|c: char| c == ',' || c == ')' || c.is_whitespace()),
            str::parse::<T>,
        ),
        multispace0,
    )(input)
}
