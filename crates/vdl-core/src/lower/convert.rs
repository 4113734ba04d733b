//! Conversion of declared field types into normalized [`TypeRef`]s

use super::Lowering;
use crate::docs::normalize_doc;
use crate::program::{AnnotationRef, BaseType, FieldSymbol, FieldType, Program};
use crate::types::{Annotation, Field, PrimitiveType, TypeRef};
use tracing::debug;

/// Primitive for a keyword; unknown keywords fall back to `string`
pub(crate) fn convert_primitive(name: &str) -> PrimitiveType {
    PrimitiveType::from_name(name).unwrap_or_else(|| {
        debug!("Unknown primitive '{}', using string", name);
        PrimitiveType::String
    })
}

/// Reference to a named declaration, enums first
pub(crate) fn named_type_ref(program: &Program, name: &str) -> TypeRef {
    match program.enums.get(name) {
        Some(symbol) => TypeRef::EnumRef {
            name: name.to_string(),
            value_type: symbol.value_type,
        },
        None => TypeRef::TypeName {
            name: name.to_string(),
        },
    }
}

impl<'p> Lowering<'p> {
    pub(crate) fn convert_field(&mut self, field: &'p FieldSymbol) -> Field {
        Field {
            name: field.name.clone(),
            doc: normalize_doc(field.docstring.as_deref()),
            optional: field.optional,
            annotations: self.convert_annotations(&field.annotations),
            type_ref: self.convert_field_type(&field.ty),
        }
    }

    /// `T[]...[]` becomes one `Array` node with the total dimension count
    pub(crate) fn convert_field_type(&mut self, ty: &'p FieldType) -> TypeRef {
        let base = self.convert_base_type(&ty.base);
        if ty.array_dims > 0 {
            TypeRef::array(base, ty.array_dims)
        } else {
            base
        }
    }

    fn convert_base_type(&mut self, base: &'p BaseType) -> TypeRef {
        match base {
            BaseType::Primitive { name } => TypeRef::primitive(convert_primitive(name)),
            BaseType::Custom { name } => named_type_ref(self.program, name),
            BaseType::Map { value } => TypeRef::Map {
                value: Box::new(self.convert_field_type(value)),
            },
            BaseType::Object(object) => TypeRef::Object {
                fields: self.flatten_inline_fields(&object.fields, &object.spreads),
            },
        }
    }

    /// Annotations keep their order; an argument that fails to resolve is omitted
    pub(crate) fn convert_annotations(&mut self, annotations: &[AnnotationRef]) -> Vec<Annotation> {
        annotations
            .iter()
            .map(|annotation| Annotation {
                name: annotation.name.clone(),
                argument: annotation
                    .argument
                    .as_ref()
                    .and_then(|literal| self.resolver.resolve_literal(literal)),
            })
            .collect()
    }
}
