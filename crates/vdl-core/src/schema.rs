//! JSON Schema describing the serialized IR
//!
//! Published next to `ir.json` so generators written in other languages can
//! validate the document they consume.

use serde_json::{json, Map, Value};

pub const IR_SCHEMA_ID: &str =
    "https://raw.githubusercontent.com/varavelio/vdl/main/toolchain/internal/core/ir/ir.schema.json";

const DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

fn def_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/$defs/{}", name) })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "array", "items": items })
}

fn string() -> Value {
    json!({ "type": "string" })
}

fn object(properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let mut props = Map::new();
    for (name, schema) in properties {
        props.insert(name.to_string(), schema);
    }
    json!({
        "type": "object",
        "properties": props,
        "required": required,
        "additionalProperties": false,
    })
}

/// One member of a `kind`-tagged union
fn tagged(kind: &str, properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let mut props = vec![("kind", json!({ "const": kind }))];
    props.extend(properties);
    let mut all_required = vec!["kind"];
    all_required.extend_from_slice(required);
    object(props, &all_required)
}

/// Properties every declaration carries
fn declaration(mut properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let mut props = vec![
        ("name", string()),
        ("doc", string()),
        ("annotations", array_of(def_ref("Annotation"))),
    ];
    props.append(&mut properties);
    let mut all_required = vec!["name"];
    all_required.extend_from_slice(required);
    object(props, &all_required)
}

fn definitions() -> Map<String, Value> {
    let mut defs = Map::new();

    defs.insert(
        "IrSchema".into(),
        object(
            vec![
                ("types", array_of(def_ref("TypeDef"))),
                ("enums", array_of(def_ref("EnumDef"))),
                ("constants", array_of(def_ref("ConstantDef"))),
                ("docs", array_of(def_ref("DocDef"))),
            ],
            &["types", "enums", "constants", "docs"],
        ),
    );

    defs.insert(
        "PrimitiveType".into(),
        json!({ "type": "string", "enum": ["string", "int", "float", "bool", "datetime"] }),
    );
    defs.insert(
        "EnumValueType".into(),
        json!({ "type": "string", "enum": ["string", "int"] }),
    );

    defs.insert(
        "TypeRef".into(),
        json!({
            "oneOf": [
                tagged("primitive", vec![("primitive", def_ref("PrimitiveType"))], &["primitive"]),
                tagged("type", vec![("name", string())], &["name"]),
                tagged(
                    "enum",
                    vec![("name", string()), ("valueType", def_ref("EnumValueType"))],
                    &["name", "valueType"],
                ),
                tagged(
                    "array",
                    vec![
                        ("item", def_ref("TypeRef")),
                        ("dims", json!({ "type": "integer", "minimum": 1 })),
                    ],
                    &["item", "dims"],
                ),
                tagged("map", vec![("value", def_ref("TypeRef"))], &["value"]),
                tagged("object", vec![("fields", array_of(def_ref("Field")))], &["fields"]),
            ]
        }),
    );

    defs.insert(
        "Value".into(),
        json!({
            "oneOf": [
                tagged("string", vec![("value", string())], &["value"]),
                tagged("int", vec![("value", json!({ "type": "integer" }))], &["value"]),
                tagged("float", vec![("value", json!({ "type": "number" }))], &["value"]),
                tagged("bool", vec![("value", json!({ "type": "boolean" }))], &["value"]),
                tagged("object", vec![("entries", array_of(def_ref("ObjectEntry")))], &["entries"]),
                tagged("array", vec![("items", array_of(def_ref("Value")))], &["items"]),
            ]
        }),
    );

    defs.insert(
        "ObjectEntry".into(),
        object(
            vec![("key", string()), ("value", def_ref("Value"))],
            &["key", "value"],
        ),
    );

    defs.insert(
        "Annotation".into(),
        object(
            vec![("name", string()), ("argument", def_ref("Value"))],
            &["name"],
        ),
    );

    defs.insert(
        "Field".into(),
        declaration(
            vec![
                ("optional", json!({ "type": "boolean" })),
                ("type", def_ref("TypeRef")),
            ],
            &["type"],
        ),
    );

    defs.insert(
        "TypeDef".into(),
        declaration(vec![("fields", array_of(def_ref("Field")))], &["fields"]),
    );

    defs.insert(
        "EnumDef".into(),
        declaration(
            vec![
                ("valueType", def_ref("EnumValueType")),
                ("members", array_of(def_ref("EnumMember"))),
            ],
            &["valueType", "members"],
        ),
    );

    defs.insert(
        "EnumMember".into(),
        declaration(vec![("value", string())], &["value"]),
    );

    defs.insert(
        "ConstantDef".into(),
        declaration(
            vec![("type", def_ref("TypeRef")), ("value", def_ref("Value"))],
            &["type", "value"],
        ),
    );

    defs.insert(
        "DocDef".into(),
        object(
            vec![("scope", string()), ("content", string())],
            &["content"],
        ),
    );

    defs
}

/// JSON Schema (draft 2020-12) of the document produced by [`crate::IrSchema::to_json`]
pub fn ir_json_schema() -> Value {
    json!({
        "$schema": DRAFT,
        "$id": IR_SCHEMA_ID,
        "title": "VDL IR Schema",
        "description": "JSON Schema for the VDL Intermediate Representation",
        "$ref": "#/$defs/IrSchema",
        "$defs": definitions(),
    })
}
