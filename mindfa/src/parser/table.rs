use crate::parser::ParsedDfaFile;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{digit1, multispace0, multispace1, space1};
use nom::combinator::{map, map_res};
use nom::multi::many0;
use nom::sequence::{pair, preceded, tuple};
use nom::IResult;

pub(crate) fn dfa_file(input: &str) -> IResult<&str, ParsedDfaFile> {
    map(
        tuple((
            preceded(pair(multispace0, tag("ALPHABET")), preceded(space1, number)),
            preceded(space1, symbol_run),
            preceded(pair(multispace1, tag("STATES")), preceded(space1, number)),
            preceded(pair(multispace1, tag("START")), preceded(space1, number)),
            preceded(pair(multispace1, tag("ACCEPT")), preceded(space1, number)),
            many0(preceded(space1, number)),
            preceded(multispace1, tag("TRANS")),
            many0(preceded(multispace1, number)),
            tuple((multispace1, tag("END"), multispace0)),
        )),
        |(symbol_count, symbols, state_count, start, accept_count, accepting, _, cells, _)| {
            ParsedDfaFile {
                symbol_count,
                symbols,
                state_count,
                start,
                accept_count,
                accepting,
                cells,
            }
        },
    )(input)
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

fn symbol_run(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}
