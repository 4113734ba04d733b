//! Spread expansion for types, inline objects and enums
//!
//! Spreads are inlined depth-first before the owner's own entries. A spread
//! that targets a symbol already on the current expansion path is a cycle and
//! contributes nothing. The path is scoped per branch, so the same ancestor
//! reached twice through sibling spreads (a diamond) is expanded twice.

use super::Lowering;
use crate::program::{EnumMemberSymbol, EnumSymbol, FieldSymbol, Program, SpreadRef, TypeSymbol};
use crate::types::Field;
use std::collections::HashSet;
use tracing::{trace, warn};

/// Members of `symbol` with every enum spread expanded, inherited members first
pub fn expand_enum_members<'p>(
    program: &'p Program,
    symbol: &'p EnumSymbol,
    max_depth: usize,
) -> Vec<&'p EnumMemberSymbol> {
    let mut path = HashSet::new();
    let mut members = Vec::with_capacity(symbol.members.len());
    collect_enum_members(program, symbol, max_depth, &mut path, &mut members);
    members
}

fn collect_enum_members<'p>(
    program: &'p Program,
    symbol: &'p EnumSymbol,
    max_depth: usize,
    path: &mut HashSet<&'p str>,
    out: &mut Vec<&'p EnumMemberSymbol>,
) {
    path.insert(symbol.name.as_str());

    for spread in &symbol.spreads {
        if spread.member.is_some() {
            continue;
        }
        if path.contains(spread.name.as_str()) {
            trace!("Skipping cyclic enum spread {} -> {}", symbol.name, spread.name);
            continue;
        }
        let Some(target) = program.enums.get(&spread.name) else {
            continue;
        };
        if path.len() >= max_depth {
            warn!(
                "Enum spread chain through '{}' exceeds max depth {}",
                symbol.name, max_depth
            );
            continue;
        }
        collect_enum_members(program, target, max_depth, path, out);
    }

    out.extend(symbol.members.iter());
    path.remove(symbol.name.as_str());
}

impl<'p> Lowering<'p> {
    /// Fields of a named type: spread fields in spread order, then its own
    pub(crate) fn flatten_type_fields(&mut self, symbol: &'p TypeSymbol) -> Vec<Field> {
        let mut path = HashSet::from([symbol.name.as_str()]);
        let mut fields = Vec::with_capacity(symbol.fields.len());
        self.collect_fields(&symbol.fields, &symbol.spreads, &mut path, &mut fields);
        fields
    }

    /// Fields of an anonymous object.
    ///
    /// Inline objects start a fresh path: they may spread the type that
    /// encloses them, which is bounded only by the nesting limit.
    pub(crate) fn flatten_inline_fields(
        &mut self,
        fields: &'p [FieldSymbol],
        spreads: &'p [SpreadRef],
    ) -> Vec<Field> {
        if !self.enter() {
            return Vec::new();
        }
        let mut path = HashSet::new();
        let mut out = Vec::with_capacity(fields.len());
        self.collect_fields(fields, spreads, &mut path, &mut out);
        self.leave();
        out
    }

    fn collect_fields(
        &mut self,
        own: &'p [FieldSymbol],
        spreads: &'p [SpreadRef],
        path: &mut HashSet<&'p str>,
        out: &mut Vec<Field>,
    ) {
        let program = self.program;

        for spread in spreads {
            if spread.member.is_some() {
                continue;
            }
            if path.contains(spread.name.as_str()) {
                trace!("Skipping cyclic type spread of {}", spread.name);
                continue;
            }
            let Some(target) = program.types.get(&spread.name) else {
                continue;
            };
            if !self.enter() {
                continue;
            }

            path.insert(target.name.as_str());
            self.collect_fields(&target.fields, &target.spreads, path, out);
            path.remove(target.name.as_str());

            self.leave();
        }

        for field in own {
            out.push(self.convert_field(field));
        }
    }
}
