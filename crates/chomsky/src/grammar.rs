//! Context-free grammars.

mod epsilon;
pub mod fixpoint;
mod normal_form;
mod simplify;
pub mod text;
mod unit_pair;

pub use self::{
    epsilon::eliminate_epsilon,
    normal_form::{binarize, isolate_start, lift_terminals, to_normal_form},
    simplify::{eliminate_nongenerating, eliminate_unreachable, eliminate_useless},
    unit_pair::eliminate_unit_pairs,
};

use crate::{
    error::GrammarError,
    types::{Map, Set},
    util::{display_fn, write_joined},
    EPSILON,
};
use std::{cmp::Ordering, fmt};

/// A grammar symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(String),
    Variable(String),
}

impl Symbol {
    pub fn terminal(value: impl Into<String>) -> Self {
        Self::Terminal(value.into())
    }

    pub fn variable(id: impl Into<String>) -> Self {
        Self::Variable(id.into())
    }

    /// The reserved terminal standing for the empty string.
    pub fn epsilon() -> Self {
        Self::Terminal(EPSILON.to_owned())
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Self::Terminal(value) if value == EPSILON)
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Variable(id) => Some(id),
            Self::Terminal(..) => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&str> {
        match self {
            Self::Terminal(value) => Some(value),
            Self::Variable(..) => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(value) => write!(f, "\"{}\"", value),
            Self::Variable(id) => f.write_str(id),
        }
    }
}

/// The right-hand side of a production rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    /// The production `"epsilon"`.
    pub fn epsilon() -> Self {
        Self {
            symbols: vec![Symbol::epsilon()],
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols[..]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether this is the single-symbol epsilon production.
    pub fn is_epsilon(&self) -> bool {
        matches!(&self.symbols[..], [symbol] if symbol.is_epsilon())
    }

    /// Return `B` if this production is the unit production `-> B`.
    pub fn unit_target(&self) -> Option<&str> {
        match &self.symbols[..] {
            [symbol] => symbol.as_variable(),
            _ => None,
        }
    }

    /// Iterate over the variable occurrences, including repeated ones.
    pub fn variables(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().filter_map(Symbol::as_variable)
    }

    /// Iterate over the terminal occurrences, including repeated ones.
    pub fn terminals(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().filter_map(Symbol::as_terminal)
    }

    /// The canonical order: longer productions first, then the symbol labels
    /// compared lexicographically.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        other.len().cmp(&self.len()).then_with(|| {
            self.symbols
                .iter()
                .map(ToString::to_string)
                .cmp(other.symbols.iter().map(ToString::to_string))
        })
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.symbols, " ")
    }
}

impl FromIterator<Symbol> for Production {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A variable together with its productions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    id: String,
    productions: Set<Production>,
}

impl Variable {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            productions: Set::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The productions in insertion order.
    pub fn productions(&self) -> &Set<Production> {
        &self.productions
    }

    /// The productions in the canonical order.
    pub fn ordered_productions(&self) -> Vec<&Production> {
        let mut productions: Vec<_> = self.productions.iter().collect();
        productions.sort_by(|a, b| a.canonical_cmp(b));
        productions
    }
}

/// A context-free grammar.
///
/// A grammar without a start variable is the grammar of the empty language.
#[derive(Debug, Clone, PartialEq)]
pub struct Cfg {
    variables: Map<String, Variable>,
    start: Option<String>,
}

impl Cfg {
    /// Define a grammar using the specified function.
    pub fn define<F>(f: F) -> Result<Self, GrammarError>
    where
        F: FnOnce(&mut GrammarDef) -> Result<(), GrammarError>,
    {
        let mut def = GrammarDef::default();
        f(&mut def)?;
        for id in def.variables.keys() {
            check_variable_id(id)?;
        }
        Ok(def.end())
    }

    /// The grammar generating no string at all.
    pub fn empty() -> Self {
        Self {
            variables: Map::default(),
            start: None,
        }
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn is_empty_language(&self) -> bool {
        self.start.is_none()
    }

    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.get(id)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.variables.values()
    }

    /// Return the productions of `id`, or nothing for an unknown variable.
    pub fn productions<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Production> + 'a {
        self.variables
            .get(id)
            .into_iter()
            .flat_map(|v| v.productions.iter())
    }

    pub fn num_productions(&self) -> usize {
        self.variables.values().map(|v| v.productions.len()).sum()
    }

    /// Return a copy whose productions are stored in the canonical order.
    pub fn order_productions(&self) -> Cfg {
        let mut def = GrammarDef::default();
        for variable in self.variables.values() {
            def.variable(&variable.id);
            for production in variable.ordered_productions() {
                def.push(&variable.id, production.clone());
            }
        }
        def.end_with(self.start.clone())
    }

    /// Render every production as `A -> X Y`, one per line, in the order
    /// they are stored.
    pub fn display_rules(&self) -> impl fmt::Display + '_ {
        display_fn(move |f| {
            for variable in self.variables.values() {
                for production in &variable.productions {
                    writeln!(f, "{} -> {}", variable.id, production)?;
                }
            }
            Ok(())
        })
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.variables.get_index_of(id)
    }

    pub(crate) fn id_at(&self, index: usize) -> Option<&str> {
        self.variables.get_index(index).map(|(id, _)| id.as_str())
    }
}

impl fmt::Display for Cfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::render(self, f)
    }
}

/// Reject variable ids that would not read back from the grammar text.
fn check_variable_id(id: &str) -> Result<(), GrammarError> {
    if id.is_empty() {
        return Err("empty variable name".into());
    }
    if id.chars().any(char::is_whitespace) || id.starts_with('"') {
        return Err(format!("invalid variable name `{}'", id).into());
    }
    Ok(())
}

/// Reject terminal values that would not read back from the grammar text.
fn check_terminal(value: &str) -> Result<(), GrammarError> {
    if value.is_empty() {
        return Err("empty terminal".into());
    }
    if value.chars().any(char::is_whitespace) {
        return Err(format!("invalid terminal `{}'", value).into());
    }
    Ok(())
}

/// The contextual values for building a [`Cfg`].
///
/// Every variable mentioned by a production is registered before the
/// production is attached, so a finished grammar never refers to a missing
/// variable.
#[derive(Debug, Default)]
pub struct GrammarDef {
    variables: Map<String, Variable>,
    start: Option<String>,
}

impl GrammarDef {
    /// Declare a variable, returning the symbol referring to it.
    pub fn variable(&mut self, id: &str) -> Symbol {
        if !self.variables.contains_key(id) {
            self.variables.insert(id.to_owned(), Variable::new(id));
        }
        Symbol::variable(id)
    }

    /// Return the terminal symbol for `value`.
    pub fn terminal(&self, value: &str) -> Symbol {
        Symbol::terminal(value)
    }

    /// Add the production `head -> symbols`. Adding a production twice has
    /// no effect.
    pub fn production<I>(&mut self, head: &str, symbols: I) -> Result<(), GrammarError>
    where
        I: IntoIterator<Item = Symbol>,
    {
        check_variable_id(head)?;
        let production = Production::new(symbols);
        if production.is_empty() {
            return Err(format!("empty production for `{}'", head).into());
        }
        for symbol in production.symbols() {
            match symbol {
                Symbol::Variable(id) => check_variable_id(id)?,
                Symbol::Terminal(value) => check_terminal(value)?,
            }
        }
        self.push(head, production);
        Ok(())
    }

    /// Specify the start variable of this grammar.
    pub fn start_symbol(&mut self, id: &str) {
        self.variable(id);
        self.start.replace(id.to_owned());
    }

    pub(crate) fn push(&mut self, head: &str, production: Production) {
        for id in production.variables() {
            self.variable(id);
        }
        self.variable(head);
        if let Some(variable) = self.variables.get_mut(head) {
            variable.productions.insert(production);
        }
    }

    /// Finish the definition.
    ///
    /// Without an explicit start variable the first declared one is used.
    pub(crate) fn end(mut self) -> Cfg {
        let start = self
            .start
            .take()
            .or_else(|| self.variables.keys().next().cloned());
        self.end_with(start)
    }

    pub(crate) fn end_with(self, start: Option<String>) -> Cfg {
        match start {
            Some(start) => {
                let mut def = self;
                def.variable(&start);
                Cfg {
                    variables: def.variables,
                    start: Some(start),
                }
            }
            None => Cfg::empty(),
        }
    }
}
