/// Grammar Parsers
///
/// The primary interface for this module is `parse`, which turns a script
/// into a list of statements. Internally, it dispatches out to individual
/// parsers for specific grammar tokens, each expecting a single
/// `pest::iterators::Pair` and returning the matching piece of the syntax
/// tree.
///
use pest::iterators::Pair;
use pest::Parser;

use crate::ast::*;
use crate::error::{Error, Result};
use crate::internal_err;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct ScriptParser;

pub fn parse(input: &str) -> Result<Vec<Stmt>> {
    let mut pairs = ScriptParser::parse(Rule::program, input)
        .map_err(|e| Error::ParseFailure(Box::new(e)))?;

    let program = pairs.next().map_or(internal_err!(), Ok)?;
    program
        .into_inner()
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(parse_stmt)
        .collect()
}

/// Whether input parses as a complete program
pub fn is_complete(input: &str) -> bool {
    ScriptParser::parse(Rule::program, input).is_ok()
}

fn parse_stmt(pair: Pair<Rule>) -> Result<Stmt> {
    match pair.as_rule() {
        Rule::expr => Ok(Stmt::Expr(parse_expr(pair)?)),
        Rule::assign_name => {
            let mut inner = pair.into_inner();
            let name = inner.next().map_or(internal_err!(), |i| Ok(i.as_str()))?;
            let value = parse_expr(inner.next().map_or(internal_err!(), Ok)?)?;
            Ok(Stmt::Assign(name.to_string(), value))
        }
        Rule::assign_index => {
            let mut inner = pair.into_inner();
            let name = inner.next().map_or(internal_err!(), |i| Ok(i.as_str()))?;

            let mut keys = vec![];
            let mut value = None;
            for next in inner {
                match next.as_rule() {
                    Rule::index => keys.push(parse_index(next)?),
                    Rule::expr => value = Some(parse_expr(next)?),
                    rule => return Err(Error::ParseUnexpected(rule)),
                }
            }

            let value = value.map_or(internal_err!(), Ok)?;
            Ok(Stmt::AssignIndex(name.to_string(), keys, value))
        }
        rule => Err(Error::ParseUnexpected(rule)),
    }
}

fn parse_expr(pair: Pair<Rule>) -> Result<Expr> {
    let mut inner = pair.into_inner();
    let mut result = parse_primary(inner.next().map_or(internal_err!(), Ok)?)?;

    // apply indexing from left to right
    for next in inner {
        let key = parse_index(next)?;
        result = Expr::Index(Box::new(result), Box::new(key));
    }

    Ok(result)
}

fn parse_primary(pair: Pair<Rule>) -> Result<Expr> {
    match pair.as_rule() {
        // parenthesized expression
        Rule::expr => parse_expr(pair),

        // atomic values
        Rule::none => Ok(Expr::None),
        Rule::integer => pair
            .as_str()
            .parse::<i64>()
            .map(Expr::Int)
            .map_err(|_| Error::InvalidArgument(format!("integer {} is too large", pair.as_str()))),
        Rule::float => Ok(Expr::Float(
            pair.as_str().parse::<f64>().map_or(internal_err!(), Ok)?,
        )),
        Rule::string => {
            let inner = pair.into_inner().next().map_or(internal_err!(), Ok)?;
            Ok(Expr::Str(inner.as_str().to_string()))
        }

        // structured values
        Rule::list => Ok(Expr::List(
            pair.into_inner().map(parse_expr).collect::<Result<_>>()?,
        )),

        // calls and symbols
        Rule::call => parse_call(pair),
        Rule::ident => Ok(Expr::Symbol(pair.as_str().to_string())),

        // otherwise fail
        rule => Err(Error::ParseUnexpected(rule)),
    }
}

fn parse_call(pair: Pair<Rule>) -> Result<Expr> {
    let mut inner = pair.into_inner();
    let name = inner.next().map_or(internal_err!(), |i| Ok(i.as_str()))?;

    let args = inner
        .map(|arg| match arg.as_rule() {
            Rule::named => {
                let mut inner = arg.into_inner();
                let name = inner.next().map_or(internal_err!(), |i| Ok(i.as_str()))?;
                let value = parse_expr(inner.next().map_or(internal_err!(), Ok)?)?;
                Ok(Arg::named(name, value))
            }
            _ => Ok(Arg::positional(parse_expr(arg)?)),
        })
        .collect::<Result<_>>()?;

    Ok(Expr::Call(name.to_string(), args))
}

fn parse_index(pair: Pair<Rule>) -> Result<KeyExpr> {
    let key = pair.into_inner().next().map_or(internal_err!(), Ok)?;
    match key.as_rule() {
        Rule::expr => Ok(KeyExpr::Single(parse_expr(key)?)),
        Rule::slice => {
            let (mut start, mut stop, mut step) = (None, None, None);
            for bound in key.into_inner() {
                let rule = bound.as_rule();
                let expr = parse_expr(bound.into_inner().next().map_or(internal_err!(), Ok)?)?;
                match rule {
                    Rule::slice_start => start = Some(expr),
                    Rule::slice_stop => stop = Some(expr),
                    Rule::slice_step => step = Some(expr),
                    rule => return Err(Error::ParseUnexpected(rule)),
                }
            }
            Ok(KeyExpr::Slice(start, stop, step))
        }
        rule => Err(Error::ParseUnexpected(rule)),
    }
}
