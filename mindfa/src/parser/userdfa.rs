use crate::parser::UserLine;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{anychar, char, digit1, space0};
use nom::combinator::{map, map_res};
use nom::multi::many0;
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::IResult;

pub(crate) fn start_line(input: &str) -> IResult<&str, UserLine> {
    map(
        preceded(
            tuple((alt((tag("Start"), tag("START"))), char(':'), space0)),
            q_state,
        ),
        UserLine::Start,
    )(input)
}

pub(crate) fn accept_line(input: &str) -> IResult<&str, UserLine> {
    map(
        preceded(
            pair(alt((tag("Accept"), tag("ACCEPT"))), char(':')),
            terminated(many0(preceded(separators, q_state)), separators),
        ),
        UserLine::Accept,
    )(input)
}

pub(crate) fn transition_line(input: &str) -> IResult<&str, UserLine> {
    map(
        tuple((
            preceded(pair(char('('), space0), q_state),
            preceded(tuple((space0, char(','), space0)), anychar),
            preceded(
                tuple((space0, char(')'), space0, tag("->"), space0)),
                q_state,
            ),
        )),
        |(from, symbol, to)| UserLine::Transition { from, symbol, to },
    )(input)
}

fn q_state(input: &str) -> IResult<&str, usize> {
    preceded(char('q'), map_res(digit1, str::parse))(input)
}

fn separators(input: &str) -> IResult<&str, &str> {
    take_while(|c| " \t{},".contains(c))(input)
}
