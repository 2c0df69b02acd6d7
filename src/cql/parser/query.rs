use crate::cql::parser::guard;
use crate::cql::parser::tokenizer::{Token, tokenize};
use crate::cql::types::{AggSpec, CompareOp, CqlAst, Filter, FilterValue, InterpretMode, RenderFormat, Scope};
use crate::shared::error::CogError;
use std::iter::Peekable;
use std::slice::Iter;
use tracing::{debug, warn};

type TokenIter<'a> = Peekable<Iter<'a, Token>>;

/// Parses a CQL query string into an AST, or fails with a parse-time error.
///
/// Clause order is fixed: `FROM [SELECT] [WHERE] [AGGREGATE] [INTERPRET]
/// [RENDER]`. A repeated or out-of-order clause is a defined parse error.
pub fn parse_query(input: &str) -> Result<CqlAst, CogError> {
    let input = input.trim();
    debug!(target: "cognidb::parse", raw = input, "Parsing CQL query");

    let tokens = tokenize(input);

    if let Err(err) = validate_tokens(&tokens) {
        warn!(target: "cognidb::parse", ?err, "Token validation failed");
        return Err(err);
    }
    guard::check(&tokens)?;

    let mut iter = tokens.iter().peekable();

    match iter.next() {
        Some(Token::Word(w)) if w.eq_ignore_ascii_case("FROM") => {}
        _ => {
            return Err(CogError::Parse(
                "missing mandatory FROM clause or invalid scope format".to_string(),
            ));
        }
    }
    let from = parse_scope(&mut iter)?;

    let mut ast = CqlAst {
        from,
        select: None,
        where_clause: None,
        aggregate: None,
        interpret: None,
        render: None,
    };

    let mut last_rank = 0u8;
    while let Some(token) = iter.peek() {
        let Token::Word(word) = token else {
            return Err(CogError::Parse(format!("unexpected token: {token:?}")));
        };
        let keyword = word.to_ascii_uppercase();
        let Some(rank) = clause_rank(&keyword) else {
            return Err(CogError::Parse(format!("unexpected token in query: {word}")));
        };
        if rank <= last_rank {
            return Err(CogError::Parse(format!(
                "clause {keyword} is repeated or out of order"
            )));
        }
        last_rank = rank;
        iter.next();

        match keyword.as_str() {
            "SELECT" => ast.select = Some(parse_select(&mut iter)?),
            "WHERE" => ast.where_clause = Some(parse_filters(&mut iter)?),
            "AGGREGATE" => ast.aggregate = Some(parse_aggregations(&mut iter)?),
            "INTERPRET" => ast.interpret = Some(parse_interpret(&mut iter)?),
            "RENDER" => ast.render = Some(parse_render(&mut iter)?),
            _ => unreachable!(),
        }
    }

    Ok(ast)
}

fn clause_rank(keyword: &str) -> Option<u8> {
    match keyword {
        "SELECT" => Some(1),
        "WHERE" => Some(2),
        "AGGREGATE" => Some(3),
        "INTERPRET" => Some(4),
        "RENDER" => Some(5),
        _ => None,
    }
}

fn parse_scope(iter: &mut TokenIter) -> Result<Scope, CogError> {
    match iter.next() {
        Some(Token::Word(w)) => match w.to_ascii_lowercase().as_str() {
            "cells" => Ok(Scope::Cells),
            "events" => Ok(Scope::Events),
            "metrics" => Ok(Scope::Metrics),
            "workflow" => match iter.next() {
                Some(Token::Word(name)) => Ok(Scope::Workflow(name.clone())),
                Some(Token::StringLiteral(name)) => Ok(Scope::Workflow(name.clone())),
                _ => Err(CogError::Parse("FROM workflow requires a name".to_string())),
            },
            // Well-formed but unrecognized scope words travel to the engine,
            // which rejects them at execution time.
            _ => Ok(Scope::Other(w.clone())),
        },
        _ => Err(CogError::Parse(
            "missing mandatory FROM clause or invalid scope format".to_string(),
        )),
    }
}

fn parse_select(iter: &mut TokenIter) -> Result<Vec<String>, CogError> {
    let mut fields = vec![expect_word(iter, "SELECT field")?];
    while matches!(iter.peek(), Some(Token::Comma)) {
        iter.next();
        fields.push(expect_word(iter, "SELECT field")?);
    }
    Ok(fields)
}

fn parse_filters(iter: &mut TokenIter) -> Result<Vec<Filter>, CogError> {
    let mut filters = vec![parse_filter_term(iter)?];
    while let Some(Token::Word(w)) = iter.peek() {
        if w.eq_ignore_ascii_case("AND") {
            iter.next();
            filters.push(parse_filter_term(iter)?);
        } else {
            break;
        }
    }
    Ok(filters)
}

fn parse_filter_term(iter: &mut TokenIter) -> Result<Filter, CogError> {
    let field = expect_word(iter, "filter field")?;
    let op = parse_op(iter, &field)?;
    let value = match iter.next() {
        Some(Token::Number(n)) => FilterValue::Number(*n),
        Some(Token::StringLiteral(s)) => FilterValue::coerce(s),
        Some(Token::Word(w)) => FilterValue::coerce(w),
        _ => {
            return Err(CogError::Parse(format!(
                "filter on \"{field}\" is missing a value"
            )));
        }
    };
    Ok(Filter { field, op, value })
}

fn parse_op(iter: &mut TokenIter, field: &str) -> Result<CompareOp, CogError> {
    match iter.next() {
        Some(Token::Symbol('=')) => Ok(CompareOp::Eq),
        Some(Token::Symbol('!')) => match iter.next() {
            Some(Token::Symbol('=')) => Ok(CompareOp::Neq),
            _ => Err(CogError::Parse(format!("expected != after \"{field}\""))),
        },
        Some(Token::Symbol('>')) => {
            if matches!(iter.peek(), Some(Token::Symbol('='))) {
                iter.next();
                Ok(CompareOp::Gte)
            } else {
                Ok(CompareOp::Gt)
            }
        }
        Some(Token::Symbol('<')) => {
            if matches!(iter.peek(), Some(Token::Symbol('='))) {
                iter.next();
                Ok(CompareOp::Lte)
            } else {
                Ok(CompareOp::Lt)
            }
        }
        _ => Err(CogError::Parse(format!(
            "filter on \"{field}\" is missing an operator"
        ))),
    }
}

fn parse_aggregations(iter: &mut TokenIter) -> Result<Vec<AggSpec>, CogError> {
    let mut aggs = vec![parse_agg_term(iter)?];
    while matches!(iter.peek(), Some(Token::Comma)) {
        iter.next();
        aggs.push(parse_agg_term(iter)?);
    }
    Ok(aggs)
}

fn parse_agg_term(iter: &mut TokenIter) -> Result<AggSpec, CogError> {
    let func = expect_word(iter, "aggregation function")?;
    match iter.next() {
        Some(Token::LeftParen) => {}
        _ => {
            return Err(CogError::Parse(format!(
                "aggregation {func} must be written as {func}(field)"
            )));
        }
    }
    let field = match iter.peek() {
        Some(Token::Word(w)) => {
            let f = w.clone();
            iter.next();
            Some(f)
        }
        _ => None,
    };
    match iter.next() {
        Some(Token::RightParen) => {}
        _ => {
            return Err(CogError::Parse(format!(
                "aggregation {func} is missing a closing parenthesis"
            )));
        }
    }

    let require_field = |field: Option<String>, func: &str| {
        field.ok_or_else(|| CogError::Parse(format!("{func}() requires a field")))
    };

    match func.to_ascii_lowercase().as_str() {
        "count" => Ok(AggSpec::Count),
        "avg" => Ok(AggSpec::Avg {
            field: require_field(field, "avg")?,
        }),
        "min" => Ok(AggSpec::Min {
            field: require_field(field, "min")?,
        }),
        "max" => Ok(AggSpec::Max {
            field: require_field(field, "max")?,
        }),
        "distribution" => Ok(AggSpec::Distribution {
            field: require_field(field, "distribution")?,
        }),
        other => Err(CogError::Parse(format!(
            "unknown aggregation function: {other}"
        ))),
    }
}

fn parse_interpret(iter: &mut TokenIter) -> Result<InterpretMode, CogError> {
    let word = expect_word(iter, "INTERPRET mode")?;
    InterpretMode::parse(&word)
        .ok_or_else(|| CogError::Parse(format!("unknown interpretation mode: {word}")))
}

fn parse_render(iter: &mut TokenIter) -> Result<RenderFormat, CogError> {
    let word = expect_word(iter, "RENDER format")?;
    RenderFormat::parse(&word)
        .ok_or_else(|| CogError::Parse(format!("unknown render format: {word}")))
}

fn expect_word(iter: &mut TokenIter, what: &str) -> Result<String, CogError> {
    match iter.next() {
        Some(Token::Word(w)) => Ok(w.clone()),
        Some(other) => Err(CogError::Parse(format!(
            "expected {what}, found {other:?}"
        ))),
        None => Err(CogError::Parse(format!("expected {what}, found end of query"))),
    }
}

/// Validates that there are no invalid tokens (e.g., `<INVALID>`) after tokenization.
fn validate_tokens(tokens: &[Token]) -> Result<(), CogError> {
    for token in tokens {
        if let Token::Word(word) = token {
            if word == "<INVALID>" {
                return Err(CogError::Parse(
                    "found invalid character during tokenization".to_string(),
                ));
            }
        }
    }
    Ok(())
}
