//! Intermediate representation handed to code generators
//!
//! The IR is flat and fully resolved: spreads are expanded, constants are
//! literal values, docs are normalized strings, and types, enums and
//! constants are sorted by name. Generators need no further semantic
//! reasoning.

use crate::config::EmitConfig;
use crate::error::CoreError;
use crate::types::{Annotation, EnumValueType, Field, TypeRef, Value};
use serde::{Deserialize, Serialize};

/// Root of the IR
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrSchema {
    pub types: Vec<TypeDef>,
    pub enums: Vec<EnumDef>,
    pub constants: Vec<ConstantDef>,
    pub docs: Vec<DocDef>,
}

/// A type with all spreads expanded into concrete fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(rename = "valueType")]
    pub value_type: EnumValueType,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub value: Value,
}

/// Standalone documentation block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub content: String,
}

impl IrSchema {
    pub fn find_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn find_constant(&self, name: &str) -> Option<&ConstantDef> {
        self.constants.iter().find(|c| c.name == name)
    }

    /// Serialize to JSON, pretty-printed with two spaces unless `minify` is set
    pub fn to_json(&self, config: &EmitConfig) -> Result<String, CoreError> {
        let encoded = if config.minify {
            serde_json::to_string(self)
        } else {
            serde_json::to_string_pretty(self)
        };
        encoded.map_err(|e| CoreError::Serialization(format!("failed to encode IR schema: {}", e)))
    }

    pub fn from_json(content: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(content)?)
    }
}

impl TypeDef {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

impl EnumDef {
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }
}
