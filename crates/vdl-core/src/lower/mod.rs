//! Lowering of a validated [`Program`] into an [`IrSchema`]
//!
//! One run owns one [`ValueResolver`], so constant values are shared between
//! annotation arguments, constants and enum member lookups. Nothing survives
//! across runs.

mod convert;
mod flatten;
mod infer;
mod resolve;

pub use flatten::expand_enum_members;
pub use infer::infer_type_from_value;
pub use resolve::{ResolverStats, ValueResolver};

use crate::config::BuildConfig;
use crate::docs::normalize_doc;
use crate::ir::{ConstantDef, DocDef, EnumDef, EnumMember, IrSchema, TypeDef};
use crate::program::{ConstSymbol, EnumSymbol, Program, TypeSymbol};
use crate::types::Value;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Build the IR of `program` with the default [`BuildConfig`]
pub fn from_program(program: &Program) -> IrSchema {
    lower_with_stats(program, &BuildConfig::default()).0
}

/// Build the IR of `program` with an explicit [`BuildConfig`]
pub fn from_program_with(program: &Program, config: &BuildConfig) -> IrSchema {
    lower_with_stats(program, config).0
}

/// Build the IR and report what the value resolver did.
///
/// `depth_exceeded` also counts spreads and inline objects cut by the
/// nesting limit.
#[instrument(
    skip(program, config),
    fields(
        types = program.types.len(),
        enums = program.enums.len(),
        consts = program.consts.len()
    ),
    level = "info"
)]
pub fn lower_with_stats(program: &Program, config: &BuildConfig) -> (IrSchema, ResolverStats) {
    let mut lowering = Lowering::new(program, config);
    let schema = lowering.assemble();
    let stats = lowering.stats();

    debug!(
        "Lowered {} types, {} enums, {} constants, {} docs",
        schema.types.len(),
        schema.enums.len(),
        schema.constants.len(),
        schema.docs.len()
    );
    debug!(
        "Resolver: {} evaluations, {} cache hits, {} cycles broken, {} depth cuts",
        stats.evaluations, stats.cache_hits, stats.cycles_broken, stats.depth_exceeded
    );

    (schema, stats)
}

/// State of a single lowering run
pub(crate) struct Lowering<'p> {
    program: &'p Program,
    resolver: ValueResolver<'p>,
    max_depth: usize,
    /// Current nesting of spreads and inline objects
    depth: usize,
    /// Spreads and inline objects dropped at the nesting limit
    truncated: usize,
}

impl<'p> Lowering<'p> {
    pub(crate) fn new(program: &'p Program, config: &BuildConfig) -> Self {
        Self {
            program,
            resolver: ValueResolver::with_config(program, config),
            max_depth: config.max_depth,
            depth: 0,
            truncated: 0,
        }
    }

    fn stats(&self) -> ResolverStats {
        let mut stats = self.resolver.stats();
        stats.depth_exceeded += self.truncated;
        stats
    }

    /// Descend one nesting level, or refuse at the limit
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            warn!(
                "Type nesting exceeds max depth {}, dropping spread",
                self.max_depth
            );
            self.truncated += 1;
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    fn assemble(&mut self) -> IrSchema {
        let program = self.program;

        // Symbols are visited in name order so that memoized constant
        // resolution, and the cycle cuts it makes, do not depend on table order.
        let mut types: Vec<TypeDef> = sorted_by_name(&program.types)
            .into_iter()
            .map(|symbol| self.convert_type(symbol))
            .collect();
        let mut enums: Vec<EnumDef> = sorted_by_name(&program.enums)
            .into_iter()
            .map(|symbol| self.convert_enum(symbol))
            .collect();
        let mut constants: Vec<ConstantDef> = sorted_by_name(&program.consts)
            .into_iter()
            .map(|symbol| self.convert_constant(symbol))
            .collect();

        types.sort_by(|a, b| a.name.cmp(&b.name));
        enums.sort_by(|a, b| a.name.cmp(&b.name));
        constants.sort_by(|a, b| a.name.cmp(&b.name));

        let docs = program
            .standalone_docs
            .iter()
            .filter_map(|doc| {
                normalize_doc(Some(&doc.content)).map(|content| DocDef {
                    scope: doc.scope.clone(),
                    content,
                })
            })
            .collect();

        IrSchema {
            types,
            enums,
            constants,
            docs,
        }
    }

    fn convert_type(&mut self, symbol: &'p TypeSymbol) -> TypeDef {
        debug!("Converting type {}", symbol.name);
        TypeDef {
            name: symbol.name.clone(),
            doc: normalize_doc(symbol.docstring.as_deref()),
            annotations: self.convert_annotations(&symbol.annotations),
            fields: self.flatten_type_fields(symbol),
        }
    }

    fn convert_enum(&mut self, symbol: &'p EnumSymbol) -> EnumDef {
        debug!("Converting enum {}", symbol.name);
        let members = expand_enum_members(self.program, symbol, self.max_depth)
            .into_iter()
            .map(|member| EnumMember {
                name: member.name.clone(),
                value: member.value.clone(),
                doc: normalize_doc(member.docstring.as_deref()),
                annotations: self.convert_annotations(&member.annotations),
            })
            .collect();

        EnumDef {
            name: symbol.name.clone(),
            doc: normalize_doc(symbol.docstring.as_deref()),
            annotations: self.convert_annotations(&symbol.annotations),
            value_type: symbol.value_type,
            members,
        }
    }

    fn convert_constant(&mut self, symbol: &'p ConstSymbol) -> ConstantDef {
        debug!("Converting constant {}", symbol.name);
        let value = self.resolver.resolve_const(&symbol.name).unwrap_or_else(|| {
            warn!(
                "Constant {} did not resolve, emitting an empty string",
                symbol.name
            );
            Value::string("")
        });

        ConstantDef {
            name: symbol.name.clone(),
            doc: normalize_doc(symbol.docstring.as_deref()),
            annotations: self.convert_annotations(&symbol.annotations),
            type_ref: infer::infer_const_type(self.program, symbol, &value),
            value,
        }
    }
}

fn sorted_by_name<T>(table: &HashMap<String, T>) -> Vec<&T> {
    let mut entries: Vec<(&String, &T)> = table.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter().map(|(_, symbol)| symbol).collect()
}
