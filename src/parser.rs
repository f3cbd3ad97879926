//! Predicate expression parser using nom.
//!
//! Parses a compact textual form of a predicate tree, used by the CLI.
//!
//! # Syntax Overview
//!
//! ```text
//! lower(users.name)=&age>=|(role,state!=)
//! ───────┬───────── ──┬── ──────┬───────
//!        │            │         └── OR group (one or more nodes)
//!        │            └── AND group (a bare leaf needs no parens)
//!        └── Leaf: optional fold, optional table, optional operator
//! ```
//!
//! A leaf is `[lower(|upper(|upper(lower(][table.]column[)]` followed by an
//! optional operator (`=` when omitted) and an optional `?`. AND groups bind
//! to the leaf first, then OR groups wrap the result:
//! `a&b|c` renders `((a=? AND b=?) OR c=?)`. To OR with an AND group, use
//! parentheses: `x|(y&z)`.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, char, multispace0},
    combinator::{map, map_res, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
};

use crate::ast::{Operator, Predicate};
use crate::error::{QueryError, QueryResult};

/// Parse a complete predicate expression.
pub fn parse_predicate(input: &str) -> QueryResult<Predicate> {
    let input = input.trim();

    match parse_node(input) {
        Ok(("", predicate)) => Ok(predicate),
        Ok((remaining, _)) => Err(QueryError::parse(
            input.len() - remaining.len(),
            format!("Unexpected trailing content: '{}'", remaining),
        )),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(QueryError::parse(
            input.len() - e.input.len(),
            format!("Expected a column near '{}'", e.input),
        )),
        Err(nom::Err::Incomplete(_)) => Err(QueryError::parse(input.len(), "Incomplete input")),
    }
}

/// Wrap a parser so it skips surrounding whitespace.
fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an identifier (table name, column name).
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// Parse `column` or `table.column`.
fn parse_column_path(input: &str) -> IResult<&str, (Option<&str>, &str)> {
    let (input, first) = parse_identifier(input)?;
    let (input, second) = opt(preceded(char('.'), parse_identifier))(input)?;

    Ok((
        input,
        match second {
            Some(column) => (Some(first), column),
            None => (None, first),
        },
    ))
}

/// Column with its case folds: `(lower, upper, table, column)`.
type FoldedColumn<'a> = (bool, bool, Option<&'a str>, &'a str);

/// Parse a column, optionally wrapped in `lower(...)`, `upper(...)` or both.
fn parse_folded_column(input: &str) -> IResult<&str, FoldedColumn<'_>> {
    alt((
        map(
            delimited(tag("upper(lower("), ws(parse_column_path), tag("))")),
            |(t, c)| (true, true, t, c),
        ),
        map(
            delimited(tag("lower("), ws(parse_column_path), char(')')),
            |(t, c)| (true, false, t, c),
        ),
        map(
            delimited(tag("upper("), ws(parse_column_path), char(')')),
            |(t, c)| (false, true, t, c),
        ),
        map(parse_column_path, |(t, c)| (false, false, t, c)),
    ))(input)
}

/// Parse a comparison operator.
fn parse_operator(input: &str) -> IResult<&str, Operator> {
    map_res(
        alt((tag(">="), tag("<="), tag("!="), tag("="), tag(">"), tag("<"))),
        str::parse::<Operator>,
    )(input)
}

/// Parse a single comparison leaf.
fn parse_leaf(input: &str) -> IResult<&str, Predicate> {
    let (input, (lower, upper, table, column)) = parse_folded_column(input)?;
    let (input, _) = multispace0(input)?;
    let (input, op) = opt(parse_operator)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = opt(char('?'))(input)?;

    Ok((
        input,
        Predicate {
            column: column.to_string(),
            table: table.map(str::to_string),
            op: op.unwrap_or_default(),
            lower,
            upper,
            and: Vec::new(),
            or: Vec::new(),
        },
    ))
}

/// Parse `( node, node, ... )` or a bare leaf.
fn parse_group(input: &str) -> IResult<&str, Vec<Predicate>> {
    alt((
        delimited(
            pair(char('('), multispace0),
            separated_list1(ws(char(',')), parse_node),
            pair(multispace0, char(')')),
        ),
        map(parse_leaf, |leaf| vec![leaf]),
    ))(input)
}

/// Parse a leaf with its AND groups, then its OR groups.
fn parse_node(input: &str) -> IResult<&str, Predicate> {
    let (input, mut node) = parse_leaf(input)?;
    let (input, and_groups) = many0(preceded(ws(char('&')), parse_group))(input)?;
    let (input, or_groups) = many0(preceded(ws(char('|')), parse_group))(input)?;

    node.and = and_groups.into_iter().flatten().collect();
    node.or = or_groups.into_iter().flatten().collect();

    Ok((input, node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::where_clause;

    #[test]
    fn test_bare_column() {
        let p = parse_predicate("id").unwrap();
        assert_eq!(p, Predicate::new("id"));
    }

    #[test]
    fn test_operator_and_placeholder() {
        let p = parse_predicate("age >= ?").unwrap();
        assert_eq!(p.op, Operator::Gte);
        assert_eq!(where_clause(&p), "WHERE age>=?");
    }

    #[test]
    fn test_every_operator() {
        for (text, op) in [
            ("a=", Operator::Eq),
            ("a!=", Operator::Ne),
            ("a>", Operator::Gt),
            ("a>=", Operator::Gte),
            ("a<", Operator::Lt),
            ("a<=", Operator::Lte),
        ] {
            assert_eq!(parse_predicate(text).unwrap().op, op, "{text}");
        }
    }

    #[test]
    fn test_qualified_and_folded() {
        let p = parse_predicate("lower(users.name)").unwrap();
        assert!(p.lower && !p.upper);
        assert_eq!(p.table.as_deref(), Some("users"));
        assert_eq!(where_clause(&p), "WHERE lower(users.name)=?");

        let p = parse_predicate("upper(lower(name))!=").unwrap();
        assert_eq!(where_clause(&p), "WHERE upper(lower(name))!=?");
    }

    #[test]
    fn test_column_named_like_a_fold() {
        let p = parse_predicate("lower<").unwrap();
        assert_eq!(where_clause(&p), "WHERE lower<?");
    }

    #[test]
    fn test_and_then_or() {
        let p = parse_predicate("a & b | c").unwrap();
        assert_eq!(where_clause(&p), "WHERE ((a=? AND b=?) OR c=?)");
    }

    #[test]
    fn test_or_of_and_group() {
        let p = parse_predicate("x|(y&z)").unwrap();
        assert_eq!(where_clause(&p), "WHERE (x=? OR (y=? AND z=?))");
    }

    #[test]
    fn test_group_list() {
        let p = parse_predicate("a&(b>, c<=)|(d, e!=)").unwrap();
        assert_eq!(
            where_clause(&p),
            "WHERE ((a=? AND b>? AND c<=?) OR d=? OR e!=?)"
        );
    }

    #[test]
    fn test_trailing_content_error() {
        match parse_predicate("a|b&c") {
            Err(QueryError::Parse { position, .. }) => assert_eq!(position, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_error() {
        assert!(matches!(
            parse_predicate("  "),
            Err(QueryError::Parse { position: 0, .. })
        ));
    }
}
