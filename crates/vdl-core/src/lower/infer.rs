//! Type inference for constants

use super::convert::named_type_ref;
use crate::program::{ConstSymbol, Program};
use crate::types::{Field, PrimitiveType, TypeRef, Value};

/// Declared type when it names a primitive, enum or type; inferred otherwise
pub(crate) fn infer_const_type(program: &Program, symbol: &ConstSymbol, value: &Value) -> TypeRef {
    if let Some(declared) = symbol.explicit_type.as_deref() {
        if let Some(primitive) = PrimitiveType::from_name(declared) {
            return TypeRef::primitive(primitive);
        }
        if program.enums.contains_key(declared) || program.types.contains_key(declared) {
            return named_type_ref(program, declared);
        }
    }
    infer_type_from_value(value)
}

/// Structural type of a resolved value.
///
/// Objects become inline objects with one required field per entry. Arrays
/// are typed by their first item; arrays of arrays collapse into one node
/// with the dimensions added up. An empty array is `string[]`.
pub fn infer_type_from_value(value: &Value) -> TypeRef {
    match value {
        Value::String { .. } => TypeRef::primitive(PrimitiveType::String),
        Value::Int { .. } => TypeRef::primitive(PrimitiveType::Int),
        Value::Float { .. } => TypeRef::primitive(PrimitiveType::Float),
        Value::Bool { .. } => TypeRef::primitive(PrimitiveType::Bool),
        Value::Object { entries } => TypeRef::Object {
            fields: entries
                .iter()
                .map(|entry| Field {
                    name: entry.key.clone(),
                    doc: None,
                    optional: false,
                    annotations: Vec::new(),
                    type_ref: infer_type_from_value(&entry.value),
                })
                .collect(),
        },
        Value::Array { items } => match items.first().map(infer_type_from_value) {
            None => TypeRef::array(TypeRef::primitive(PrimitiveType::String), 1),
            Some(TypeRef::Array { item, dims }) => TypeRef::Array {
                item,
                dims: dims + 1,
            },
            Some(item) => TypeRef::array(item, 1),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{EnumSymbol, Literal, ProgramBuilder, TypeSymbol};
    use crate::types::EnumValueType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalar_inference() {
        assert_eq!(
            infer_type_from_value(&Value::string("x")),
            TypeRef::primitive(PrimitiveType::String)
        );
        assert_eq!(
            infer_type_from_value(&Value::int(1)),
            TypeRef::primitive(PrimitiveType::Int)
        );
        assert_eq!(
            infer_type_from_value(&Value::float(1.0)),
            TypeRef::primitive(PrimitiveType::Float)
        );
        assert_eq!(
            infer_type_from_value(&Value::bool(true)),
            TypeRef::primitive(PrimitiveType::Bool)
        );
    }

    #[test]
    fn test_object_inference_keeps_entry_order() {
        let value = Value::object([
            ("host", Value::string("localhost")),
            ("ports", Value::array([Value::int(80)])),
        ]);
        let TypeRef::Object { fields } = infer_type_from_value(&value) else {
            panic!("expected inline object");
        };
        assert_eq!(
            fields,
            vec![
                Field {
                    name: "host".to_string(),
                    doc: None,
                    optional: false,
                    annotations: vec![],
                    type_ref: TypeRef::primitive(PrimitiveType::String),
                },
                Field {
                    name: "ports".to_string(),
                    doc: None,
                    optional: false,
                    annotations: vec![],
                    type_ref: TypeRef::array(TypeRef::primitive(PrimitiveType::Int), 1),
                },
            ]
        );
    }

    #[test]
    fn test_array_inference() {
        assert_eq!(
            infer_type_from_value(&Value::array([])),
            TypeRef::array(TypeRef::primitive(PrimitiveType::String), 1)
        );
        assert_eq!(
            infer_type_from_value(&Value::array([Value::int(1), Value::string("mixed")])),
            TypeRef::array(TypeRef::primitive(PrimitiveType::Int), 1)
        );
        assert_eq!(
            infer_type_from_value(&Value::array([Value::array([Value::int(1)])])),
            TypeRef::array(TypeRef::primitive(PrimitiveType::Int), 2)
        );
        // [[]] is string[][]
        assert_eq!(
            infer_type_from_value(&Value::array([Value::array([])])),
            TypeRef::array(TypeRef::primitive(PrimitiveType::String), 2)
        );
    }

    #[test]
    fn test_explicit_type_wins_when_known() {
        let program = ProgramBuilder::new()
            .enum_decl(EnumSymbol::new("Status", EnumValueType::String).member("Active"))
            .type_decl(TypeSymbol::new("Config"))
            .build();
        let object = Value::object([("port", Value::int(80))]);

        let typed = ConstSymbol::new("c", Literal::int(0)).typed("Config");
        assert_eq!(
            infer_const_type(&program, &typed, &object),
            TypeRef::TypeName {
                name: "Config".to_string()
            }
        );

        let status = ConstSymbol::new("s", Literal::int(0)).typed("Status");
        assert_eq!(
            infer_const_type(&program, &status, &Value::string("Active")),
            TypeRef::EnumRef {
                name: "Status".to_string(),
                value_type: EnumValueType::String,
            }
        );

        let float = ConstSymbol::new("f", Literal::int(0)).typed("float");
        assert_eq!(
            infer_const_type(&program, &float, &Value::int(3)),
            TypeRef::primitive(PrimitiveType::Float)
        );

        let unknown = ConstSymbol::new("u", Literal::int(0)).typed("Nope");
        assert_eq!(
            infer_const_type(&program, &unknown, &Value::int(3)),
            TypeRef::primitive(PrimitiveType::Int)
        );
    }
}
