//! The public facade: a parsed expression with its settings and variable
//! bindings, exposing the query and solve operations.

use core::fmt;
use std::collections::HashMap;

use crate::error::Error;
use crate::node::evaluate::evaluate;
use crate::node::expr::{Context, ExpressionNode, NodeKind};
use crate::node::solve::{self, Solution};
use crate::node::{formalize, group, scanner};
use crate::number::{Number, StorageMode};
use crate::units::UnitProvider;

/// Parse-time settings for a tree. These are fixed once the tree exists -
/// literals are stored in the chosen representation, and variable tokens
/// were classified against the chosen prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage_mode: StorageMode,
    /// The variable prefix, e.g. `$`. With None, any token the classifier
    /// cannot otherwise place becomes a variable.
    pub variable_prefix: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            storage_mode: StorageMode::Double,
            variable_prefix: Some("$".into()),
        }
    }
}

/// A parsed expression or equation, with its variable bindings.
///
/// Binding a variable after parsing is fine: evaluability is derived from
/// the current bindings on every query, not frozen at parse time.
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    settings: Settings,
    variables: HashMap<String, String>,
    root: ExpressionNode,
}

impl Expression {
    /// Parses with default settings: double precision, `$`-prefixed
    /// variables.
    pub fn parse(source: &str, units: &dyn UnitProvider) -> Result<Expression, Error> {
        Self::parse_with(source, Settings::default(), units)
    }

    /// Runs the full pipeline: scan, formalize, pair units, group.
    pub fn parse_with(
        source: &str,
        settings: Settings,
        units: &dyn UnitProvider,
    ) -> Result<Expression, Error> {
        let variables = HashMap::new();
        let root = {
            let ctx = Context {
                mode: settings.storage_mode,
                prefix: settings.variable_prefix.as_deref(),
                variables: &variables,
                units,
            };
            let scanned = scanner::scan(source, &ctx)?;
            let formalized = formalize::formalize(scanned, &ctx)?;
            let paired = formalize::pair_units(formalized, &ctx);
            group::group(paired, &ctx)?
        };

        Ok(Expression {
            source: source.into(),
            settings,
            variables,
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn root(&self) -> &ExpressionNode {
        &self.root
    }

    /// Binds a variable. The name may be given with or without the
    /// configured prefix; values are kept as text and parsed into the
    /// tree's representation at lookup.
    pub fn bind(&mut self, name: &str, value: impl ToString) {
        let key = self.strip_prefix(name).to_string();
        self.variables.insert(key, value.to_string());
    }

    pub fn unbind(&mut self, name: &str) {
        let key = self.strip_prefix(name).to_string();
        self.variables.remove(&key);
    }

    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }

    fn strip_prefix<'n>(&self, name: &'n str) -> &'n str {
        match &self.settings.variable_prefix {
            Some(p) if name.starts_with(p.as_str()) && name.len() > p.len() => &name[p.len()..],
            _ => name,
        }
    }

    fn context<'c>(&'c self, units: &'c dyn UnitProvider) -> Context<'c> {
        Context {
            mode: self.settings.storage_mode,
            prefix: self.settings.variable_prefix.as_deref(),
            variables: &self.variables,
            units,
        }
    }

    /// Whether the tree can currently be evaluated all the way through:
    /// every variable bound, every token classified, and - for an equation -
    /// the two sides measuring compatible things.
    pub fn is_solvable(&self, units: &dyn UnitProvider) -> bool {
        let ctx = self.context(units);
        if self.root.contains_unbound(&ctx) {
            return false;
        }
        if self.root.kind == NodeKind::Equation && self.root.children.len() == 3 {
            return solve::measures_compatible(&self.root.children[0], &self.root.children[2]);
        }
        true
    }

    /// Evaluates the tree. `Ok(None)` means not currently evaluable.
    pub fn execute(&self, units: &dyn UnitProvider) -> Result<Option<Number>, Error> {
        evaluate(&self.root, &self.context(units), false)
    }

    /// Solves a one-unknown equation. `Ok(None)` means the tree is not an
    /// equation with exactly one evaluable side, or the unknown cannot be
    /// isolated.
    pub fn solve(&self, units: &dyn UnitProvider) -> Result<Option<Solution>, Error> {
        solve::solve(&self.root, &self.context(units))
    }

    /// Deep-copies the tree, optionally normalizing every value-unit pair
    /// to its base unit.
    pub fn clone_tree(
        &self,
        base_units: bool,
        units: &dyn UnitProvider,
    ) -> Result<ExpressionNode, Error> {
        solve::clone_tree(&self.root, base_units, &self.context(units))
    }

    /// A visually reduced copy of the tree: the first literal takes
    /// `result`, every later literal becomes 1.
    pub fn simplified(&self, result: Number) -> ExpressionNode {
        solve::simplify(&self.root, result)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
