//! Parse symmetry declarations, e.g. `sym(0,1) antisym(2,3)`
//!
//! These parsers are implemented using [nom](https://github.com/Geal/nom),
//! and corresponding EBNF-like schema are written in each document page.
//!

use crate::symmetry::{GroupKind, Group};
use nom::{
    branch::*, bytes::complete::*, character::complete::*, combinator::*, multi::*, sequence::*,
    IResult, Parser,
};

/// A group as written, before validation against the number of indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGroup {
    pub kind: GroupKind,
    pub positions: Group,
}

/// position = digit { digit };
pub fn position(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>())(input)
}

/// kind = `sym` | `antisym`;
pub fn kind(input: &str) -> IResult<&str, GroupKind> {
    alt((
        tag("antisym").map(|_| GroupKind::Antisymmetric),
        tag("sym").map(|_| GroupKind::Symmetric),
    ))
    .parse(input)
}

/// group = [kind] `(` [position] { `,` [position] } `)`;
pub fn group(input: &str) -> IResult<&str, RawGroup> {
    tuple((
        kind,
        multispace0,
        char('('),
        multispace0,
        separated_list1(tuple((multispace0, char(','), multispace0)), position),
        multispace0,
        char(')'),
    ))
    .map(|(kind, _, _open, _, positions, _, _close)| RawGroup { kind, positions })
    .parse(input)
}

/// declaration = { [group] }; groups separated by spaces or `,`
pub fn declaration(input: &str) -> IResult<&str, Vec<RawGroup>> {
    let separator = tuple((multispace0, opt(char(',')), multispace0));
    let (input, groups) = many0(preceded(separator, group))(input)?;
    let (input, _tail) = multispace0(input)?;
    Ok((input, groups))
}
