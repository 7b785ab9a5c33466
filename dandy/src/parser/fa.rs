//! nom grammar for the §6.2 automaton file format: a handful of numeric header lines
//! followed by one `q c q'` transition per line. Structurally much simpler than a
//! name-based transition table, so the grammar stays a thin wrapper around `nom`'s
//! number/line primitives rather than a hand-rolled scanner.

use nom::bytes::complete::take;
use nom::character::complete::{digit1, line_ending, not_line_ending, space0, space1};
use nom::combinator::{eof, map, map_res, value};
use nom::multi::{count, many0};
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDfa {
    pub max_state: usize,
    pub initial_state: usize,
    pub accepting: Vec<usize>,
    pub alphabet: Vec<u8>,
    pub transitions: Vec<(usize, u8, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNfa {
    pub max_state: usize,
    pub initial: Vec<usize>,
    pub accepting: Vec<usize>,
    pub alphabet: Vec<u8>,
    pub transitions: Vec<(usize, u8, usize)>,
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

fn end_of_line(input: &str) -> IResult<&str, ()> {
    value((), nom::branch::alt((line_ending, eof)))(input)
}

/// A line holding a single number (`Q`, `q0`, `|I|`, `|F|`).
fn count_line(input: &str) -> IResult<&str, usize> {
    terminated(preceded(space0, number), end_of_line)(input)
}

/// Reads exactly `n` whitespace-separated numbers terminated by end-of-line. Declaring
/// the expected count up front (rather than just splitting the line) is what turns a
/// `|F|`/`f1 f2 … f|F|` pair that disagree into a single parse failure instead of a
/// silently-accepted short or long set.
fn sized_number_list(input: &str, n: usize) -> IResult<&str, Vec<usize>> {
    terminated(
        count(preceded(space0, number), n),
        preceded(space0, end_of_line),
    )(input)
}

fn alphabet_line(input: &str) -> IResult<&str, Vec<u8>> {
    map(terminated(not_line_ending, end_of_line), |s: &str| {
        s.bytes().collect()
    })(input)
}

fn symbol_byte(input: &str) -> IResult<&str, u8> {
    map_res(take(1usize), |s: &str| {
        let b = s.as_bytes();
        if b.len() == 1 {
            Ok(b[0])
        } else {
            Err(())
        }
    })(input)
}

fn transition_line(input: &str) -> IResult<&str, (usize, u8, usize)> {
    map(
        tuple((
            preceded(space0, number),
            preceded(space1, symbol_byte),
            preceded(space1, number),
            preceded(space0, end_of_line),
        )),
        |(q1, c, q2, ())| (q1, c, q2),
    )(input)
}

pub(crate) fn full_dfa(input: &str) -> IResult<&str, ParsedDfa> {
    let (input, max_state) = count_line(input)?;
    let (input, initial_state) = count_line(input)?;
    let (input, f_count) = count_line(input)?;
    let (input, accepting) = sized_number_list(input, f_count)?;
    let (input, alphabet) = alphabet_line(input)?;
    let (input, transitions) = many0(transition_line)(input)?;
    Ok((
        input,
        ParsedDfa {
            max_state,
            initial_state,
            accepting,
            alphabet,
            transitions,
        },
    ))
}

pub(crate) fn full_nfa(input: &str) -> IResult<&str, ParsedNfa> {
    let (input, max_state) = count_line(input)?;
    let (input, i_count) = count_line(input)?;
    let (input, initial) = sized_number_list(input, i_count)?;
    let (input, f_count) = count_line(input)?;
    let (input, accepting) = sized_number_list(input, f_count)?;
    let (input, alphabet) = alphabet_line(input)?;
    let (input, transitions) = many0(transition_line)(input)?;
    Ok((
        input,
        ParsedNfa {
            max_state,
            initial,
            accepting,
            alphabet,
            transitions,
        },
    ))
}
