//! Evaluation of literal expressions into resolved [`Value`]s

use crate::config::BuildConfig;
use crate::lower::flatten::expand_enum_members;
use crate::program::{Literal, ObjectLiteralEntry, Program, Reference};
use crate::types::{EnumValueType, ObjectEntry, Value};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace, warn};

/// Counters describing what the resolver did during one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Constant literals actually evaluated
    pub evaluations: usize,
    /// Constant lookups answered from the cache
    pub cache_hits: usize,
    /// References dropped because the constant was already being resolved
    pub cycles_broken: usize,
    /// Sub-expressions dropped for exceeding the nesting limit
    pub depth_exceeded: usize,
}

/// Resolves literals, memoizing named constants and breaking reference cycles.
///
/// Resolution never fails as a whole: a sub-expression that cannot be
/// resolved yields `None` and callers drop its contribution.
pub struct ValueResolver<'p> {
    program: &'p Program,
    max_depth: usize,
    depth: usize,
    /// Resolved constants with their nesting depth
    resolved: HashMap<&'p str, (Value, usize)>,
    resolving: HashSet<&'p str>,
    stats: ResolverStats,
}

impl<'p> ValueResolver<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self::with_config(program, &BuildConfig::default())
    }

    pub fn with_config(program: &'p Program, config: &BuildConfig) -> Self {
        Self {
            program,
            max_depth: config.max_depth,
            depth: 0,
            resolved: HashMap::with_capacity(program.consts.len()),
            resolving: HashSet::new(),
            stats: ResolverStats::default(),
        }
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    /// Resolve the constant `name`, evaluating its literal at most once.
    ///
    /// A cached value is only spliced in where its nesting still fits under
    /// the depth limit.
    pub fn resolve_const(&mut self, name: &str) -> Option<Value> {
        if let Some((value, depth)) = self.resolved.get(name) {
            trace!("Constant cache hit: {}", name);
            self.stats.cache_hits += 1;
            if self.depth + depth > self.max_depth {
                warn!(
                    "Constant '{}' nests {} levels, exceeding max depth {} here; dropping it",
                    name, depth, self.max_depth
                );
                self.stats.depth_exceeded += 1;
                return None;
            }
            return Some(value.clone());
        }

        let (key, symbol) = self.program.consts.get_key_value(name)?;
        let key = key.as_str();

        if self.resolving.contains(key) {
            warn!("Breaking constant reference cycle at '{}'", name);
            self.stats.cycles_broken += 1;
            return None;
        }

        let literal = symbol.value.as_ref()?;

        self.resolving.insert(key);
        self.stats.evaluations += 1;
        let value = self.resolve_literal(literal);
        self.resolving.remove(key);

        match &value {
            Some(v) => {
                debug!("Resolved constant {} ({})", name, v.kind());
                self.resolved.insert(key, (v.clone(), v.depth()));
            }
            None => debug!("Constant {} did not resolve", name),
        }
        value
    }

    /// Resolve any literal expression
    pub fn resolve_literal(&mut self, literal: &Literal) -> Option<Value> {
        // A reference takes the place of its target and opens no level itself
        if let Literal::Reference(reference) = literal {
            return self.resolve_reference(reference);
        }

        if self.depth >= self.max_depth {
            warn!(
                "Literal nesting exceeds max depth {}, dropping sub-expression",
                self.max_depth
            );
            self.stats.depth_exceeded += 1;
            return None;
        }

        self.depth += 1;
        let value = self.resolve_literal_inner(literal);
        self.depth -= 1;
        value
    }

    fn resolve_literal_inner(&mut self, literal: &Literal) -> Option<Value> {
        match literal {
            Literal::String { value } => Some(Value::string(value.clone())),
            Literal::Int { raw } => match raw.parse::<i64>() {
                Ok(n) => Some(Value::int(n)),
                Err(e) => {
                    debug!("Invalid integer literal '{}': {}", raw, e);
                    None
                }
            },
            Literal::Float { raw } => match raw.parse::<f64>() {
                Ok(f) if f.is_finite() => Some(Value::float(f)),
                Ok(_) => {
                    debug!("Float literal '{}' is out of range", raw);
                    None
                }
                Err(e) => {
                    debug!("Invalid float literal '{}': {}", raw, e);
                    None
                }
            },
            Literal::Bool { value } => Some(Value::bool(*value)),
            Literal::Reference(reference) => self.resolve_reference(reference),
            Literal::Object { entries } => Some(self.resolve_object(entries)),
            Literal::Array { elements } => Some(Value::Array {
                items: elements
                    .iter()
                    .filter_map(|element| self.resolve_literal(element))
                    .collect(),
            }),
        }
    }

    fn resolve_reference(&mut self, reference: &Reference) -> Option<Value> {
        match &reference.member {
            None => self.resolve_const(&reference.name),
            Some(member) => self.resolve_enum_member(&reference.name, member),
        }
    }

    fn resolve_object(&mut self, entries: &[ObjectLiteralEntry]) -> Value {
        let mut resolved = Vec::with_capacity(entries.len());

        for entry in entries {
            match entry {
                ObjectLiteralEntry::Spread(reference) => {
                    if reference.member.is_some() {
                        continue;
                    }
                    match self.resolve_const(&reference.name) {
                        Some(Value::Object { entries }) => resolved.extend(entries),
                        Some(other) => debug!(
                            "Spread of '{}' is a {} value, not an object; skipping",
                            reference.name,
                            other.kind()
                        ),
                        None => debug!("Spread of '{}' did not resolve", reference.name),
                    }
                }
                ObjectLiteralEntry::Field { key, value } => {
                    if let Some(value) = self.resolve_literal(value) {
                        resolved.push(ObjectEntry {
                            key: key.clone(),
                            value,
                        });
                    }
                }
            }
        }

        Value::Object { entries: resolved }
    }

    /// `Enum.Member`, including members inherited through enum spreads
    fn resolve_enum_member(&mut self, enum_name: &str, member_name: &str) -> Option<Value> {
        let symbol = self.program.enums.get(enum_name)?;
        let members = expand_enum_members(self.program, symbol, self.max_depth);
        let member = members.iter().find(|m| m.name == member_name)?;

        match symbol.value_type {
            EnumValueType::Int => member.value.parse::<i64>().ok().map(Value::int),
            EnumValueType::String => Some(Value::string(member.value.clone())),
        }
    }
}
