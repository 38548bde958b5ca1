//! The line-oriented grammar text format.
//!
//! ```text
//! S -> "0" S "0"
//! S -> A
//! A -> "epsilon"
//! ```
//!
//! Every line is a single production. Tokens in double quotes are
//! terminals, the others are variables, and the head of the first line is
//! the start variable.

use super::{Cfg, GrammarDef, Symbol};
use crate::{error::ParseError, types::Worklist};
use std::{fmt, fs, path::Path, str::FromStr};

/// Write the canonical text of `cfg`.
///
/// Variables are visited breadth-first from the start variable, so that
/// unreachable variables are not written at all, and the productions of
/// each variable are written in the canonical order.
pub fn render(cfg: &Cfg, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Some(start) = cfg.start() else {
        return Ok(());
    };

    let mut worklist = Worklist::default();
    worklist.push(start);
    let mut first = true;
    while let Some(id) = worklist.pop() {
        let Some(variable) = cfg.variable(id) else {
            continue;
        };
        for production in variable.ordered_productions() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{} -> {}", id, production)?;
            for referenced in production.variables() {
                worklist.push(referenced);
            }
        }
    }
    Ok(())
}

fn parse_symbol(token: &str) -> Result<Symbol, String> {
    match token.strip_prefix('"') {
        Some(rest) => match rest.strip_suffix('"') {
            Some("") => Err("empty terminal".into()),
            Some(value) => Ok(Symbol::terminal(value)),
            None => Err(format!("unterminated terminal `{}'", token)),
        },
        None => Ok(Symbol::variable(token)),
    }
}

#[derive(Debug)]
struct Line {
    line_no: usize,
    head: String,
    symbols: Vec<Symbol>,
}

fn parse_line(line_no: usize, line: &str) -> Result<Line, ParseError> {
    let tokens: Vec<_> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(ParseError::malformed(
            line_no,
            format!("bad production `{}'", line),
        ));
    }
    if tokens[1] != "->" {
        return Err(ParseError::malformed(
            line_no,
            format!("expected `->', found `{}'", tokens[1]),
        ));
    }

    let head = match parse_symbol(tokens[0]) {
        Ok(Symbol::Variable(head)) => head,
        Ok(Symbol::Terminal(..)) => {
            return Err(ParseError::malformed(
                line_no,
                "the head of a production must be a variable",
            ))
        }
        Err(msg) => return Err(ParseError::malformed(line_no, msg)),
    };
    let symbols = tokens[2..]
        .iter()
        .map(|token| parse_symbol(token))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|msg| ParseError::malformed(line_no, msg))?;

    Ok(Line {
        line_no,
        head,
        symbols,
    })
}

impl FromStr for Cfg {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let span = tracing::trace_span!("parse_grammar");
        let _entered = span.enter();

        let mut lines = vec![];
        for (i, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            lines.push(parse_line(i + 1, line)?);
        }

        let Some(first) = lines.first() else {
            return Ok(Cfg::empty());
        };
        let start = first.head.clone();

        // register every variable before attaching any production.
        let mut def = GrammarDef::default();
        for line in &lines {
            def.variable(&line.head);
            for symbol in &line.symbols {
                if let Symbol::Variable(id) = symbol {
                    def.variable(id);
                }
            }
        }
        def.start_symbol(&start);

        for line in lines {
            tracing::trace!("production {} -> {:?}", line.head, line.symbols);
            def.production(&line.head, line.symbols)
                .map_err(|err| ParseError::malformed(line.line_no, err.to_string()))?;
        }

        Ok(def.end())
    }
}

impl Cfg {
    /// Read and parse a grammar text file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let source = fs::read_to_string(path)?;
        source.parse()
    }
}
