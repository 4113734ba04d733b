//! Tagged unions shared by the IR: type references and resolved values

use serde::{Deserialize, Serialize};

/// Built-in primitive types of the schema language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Int,
    Float,
    Bool,
    Datetime,
}

impl PrimitiveType {
    /// Look up a primitive by its keyword, `None` for anything else
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "datetime" => Some(Self::Datetime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Datetime => "datetime",
        }
    }
}

/// Whether an enum stores string or integer member values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumValueType {
    #[default]
    String,
    Int,
}

/// Normalized description of a field or constant type.
///
/// Multi-dimensional arrays are a single `Array` node carrying `dims`,
/// never nested arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeRef {
    Primitive {
        primitive: PrimitiveType,
    },

    /// Reference to another `TypeDef`
    #[serde(rename = "type")]
    TypeName { name: String },

    /// Reference to an `EnumDef`, carrying its value kind
    #[serde(rename = "enum")]
    EnumRef {
        name: String,
        #[serde(rename = "valueType")]
        value_type: EnumValueType,
    },

    Array {
        item: Box<TypeRef>,
        dims: u32,
    },

    /// Map with implicit string keys
    Map { value: Box<TypeRef> },

    /// Anonymous inline object
    Object { fields: Vec<Field> },
}

impl TypeRef {
    pub fn primitive(primitive: PrimitiveType) -> Self {
        TypeRef::Primitive { primitive }
    }

    pub fn array(item: TypeRef, dims: u32) -> Self {
        TypeRef::Array {
            item: Box::new(item),
            dims,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TypeRef::Primitive { .. } => "primitive",
            TypeRef::TypeName { .. } => "type",
            TypeRef::EnumRef { .. } => "enum",
            TypeRef::Array { .. } => "array",
            TypeRef::Map { .. } => "map",
            TypeRef::Object { .. } => "object",
        }
    }
}

/// A field with its type fully resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

/// Annotation attached to a declaration, with its argument already resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<Value>,
}

/// Fully resolved literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Value {
    String { value: String },
    Int { value: i64 },
    Float { value: f64 },
    Bool { value: bool },
    Object { entries: Vec<ObjectEntry> },
    Array { items: Vec<Value> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub key: String,
    pub value: Value,
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String {
            value: value.into(),
        }
    }

    pub fn int(value: i64) -> Self {
        Value::Int { value }
    }

    pub fn float(value: f64) -> Self {
        Value::Float { value }
    }

    pub fn bool(value: bool) -> Self {
        Value::Bool { value }
    }

    /// Build an object value from `(key, value)` pairs, keeping their order
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object {
            entries: entries
                .into_iter()
                .map(|(key, value)| ObjectEntry {
                    key: key.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array {
            items: items.into_iter().collect(),
        }
    }

    pub fn as_object_entries(&self) -> Option<&[ObjectEntry]> {
        match self {
            Value::Object { entries } => Some(entries),
            _ => None,
        }
    }

    /// Nesting depth, counting scalars and empty containers as 1
    pub fn depth(&self) -> usize {
        let children = match self {
            Value::Object { entries } => entries.iter().map(|e| e.value.depth()).max(),
            Value::Array { items } => items.iter().map(Value::depth).max(),
            _ => None,
        };
        1 + children.unwrap_or(0)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::String { .. } => "string",
            Value::Int { .. } => "int",
            Value::Float { .. } => "float",
            Value::Bool { .. } => "bool",
            Value::Object { .. } => "object",
            Value::Array { .. } => "array",
        }
    }
}
