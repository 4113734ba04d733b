//! Validated program handed over by the semantic analyzer
//!
//! These are the symbol tables the lowering pass reads. They are assumed to
//! be internally consistent: every spread target, type name and reference
//! names an existing declaration. The model is plain serde so analyzers
//! written in any language can hand it over as JSON or YAML.

use crate::error::CoreError;
use crate::types::EnumValueType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub types: HashMap<String, TypeSymbol>,
    #[serde(default)]
    pub enums: HashMap<String, EnumSymbol>,
    #[serde(default)]
    pub consts: HashMap<String, ConstSymbol>,
    #[serde(default, rename = "standaloneDocs")]
    pub standalone_docs: Vec<DocSymbol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSymbol {
    pub name: String,
    #[serde(default)]
    pub docstring: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
    #[serde(default)]
    pub fields: Vec<FieldSymbol>,
    #[serde(default)]
    pub spreads: Vec<SpreadRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSymbol {
    pub name: String,
    #[serde(default)]
    pub docstring: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
    #[serde(default)]
    pub optional: bool,
    #[serde(rename = "type")]
    pub ty: FieldType,
}

/// Declared type of a field: a base type plus array dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldType {
    pub base: BaseType,
    #[serde(default, rename = "arrayDims")]
    pub array_dims: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BaseType {
    /// `string`, `int`, `float`, `bool` or `datetime`
    Primitive { name: String },
    /// Name of a declared type or enum
    Custom { name: String },
    /// `map<V>`; keys are always strings
    Map { value: Box<FieldType> },
    Object(InlineObject),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineObject {
    #[serde(default)]
    pub fields: Vec<FieldSymbol>,
    #[serde(default)]
    pub spreads: Vec<SpreadRef>,
}

/// `...Name` inside a type, enum or inline object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadRef {
    pub name: String,
    /// `...Name.Member` is not a valid spread and is ignored
    #[serde(default)]
    pub member: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumSymbol {
    pub name: String,
    #[serde(default)]
    pub docstring: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
    #[serde(default, rename = "valueType")]
    pub value_type: EnumValueType,
    #[serde(default)]
    pub members: Vec<EnumMemberSymbol>,
    #[serde(default)]
    pub spreads: Vec<SpreadRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMemberSymbol {
    pub name: String,
    /// String form of the member value; the member name when not explicit
    pub value: String,
    #[serde(default)]
    pub docstring: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstSymbol {
    pub name: String,
    #[serde(default)]
    pub docstring: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
    #[serde(default, rename = "explicitType")]
    pub explicit_type: Option<String>,
    #[serde(default)]
    pub value: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRef {
    pub name: String,
    #[serde(default)]
    pub argument: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSymbol {
    /// Declaration the block belongs to, `None` at schema level
    #[serde(default)]
    pub scope: Option<String>,
    pub content: String,
}

/// Literal expression as written in the source.
///
/// Numbers keep their lexed text and are parsed during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Literal {
    String { value: String },
    Int { raw: String },
    Float { raw: String },
    Bool { value: bool },
    Reference(Reference),
    Object { entries: Vec<ObjectLiteralEntry> },
    Array { elements: Vec<Literal> },
}

/// `Name` (a constant) or `Name.Member` (an enum member)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    #[serde(default)]
    pub member: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ObjectLiteralEntry {
    Spread(Reference),
    Field { key: String, value: Literal },
}

impl Program {
    pub fn from_json_str(content: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CoreError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a program file, choosing the format from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            other => Err(CoreError::UnsupportedFormat(format!(
                "{} (extension {:?})",
                path.display(),
                other.unwrap_or("")
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.enums.is_empty()
            && self.consts.is_empty()
            && self.standalone_docs.is_empty()
    }
}

impl TypeSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docstring: None,
            annotations: Vec::new(),
            fields: Vec::new(),
            spreads: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.docstring = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn field(mut self, field: FieldSymbol) -> Self {
        self.fields.push(field);
        self
    }

    pub fn spread(mut self, name: impl Into<String>) -> Self {
        self.spreads.push(SpreadRef::new(name));
        self
    }
}

impl FieldSymbol {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            docstring: None,
            annotations: Vec::new(),
            optional: false,
            ty,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.docstring = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl FieldType {
    pub fn primitive(name: impl Into<String>) -> Self {
        BaseType::Primitive { name: name.into() }.into()
    }

    pub fn custom(name: impl Into<String>) -> Self {
        BaseType::Custom { name: name.into() }.into()
    }

    pub fn map(value: FieldType) -> Self {
        BaseType::Map {
            value: Box::new(value),
        }
        .into()
    }

    pub fn object(object: InlineObject) -> Self {
        BaseType::Object(object).into()
    }

    /// Add `dims` array dimensions: `int` becomes `int[]`, `int[][]`, ...
    pub fn array_of(mut self, dims: u32) -> Self {
        self.array_dims += dims;
        self
    }
}

impl From<BaseType> for FieldType {
    fn from(base: BaseType) -> Self {
        Self {
            base,
            array_dims: 0,
        }
    }
}

impl InlineObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSymbol) -> Self {
        self.fields.push(field);
        self
    }

    pub fn spread(mut self, name: impl Into<String>) -> Self {
        self.spreads.push(SpreadRef::new(name));
        self
    }
}

impl SpreadRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member: None,
        }
    }
}

impl EnumSymbol {
    pub fn new(name: impl Into<String>, value_type: EnumValueType) -> Self {
        Self {
            name: name.into(),
            docstring: None,
            annotations: Vec::new(),
            value_type,
            members: Vec::new(),
            spreads: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.docstring = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Member whose value is its own name
    pub fn member(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let value = name.clone();
        self.member_with_value(name, value)
    }

    pub fn member_with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.members.push(EnumMemberSymbol {
            name: name.into(),
            value: value.into(),
            docstring: None,
            annotations: Vec::new(),
        });
        self
    }

    pub fn spread(mut self, name: impl Into<String>) -> Self {
        self.spreads.push(SpreadRef::new(name));
        self
    }
}

impl ConstSymbol {
    pub fn new(name: impl Into<String>, value: Literal) -> Self {
        Self {
            name: name.into(),
            docstring: None,
            annotations: Vec::new(),
            explicit_type: None,
            value: Some(value),
        }
    }

    pub fn typed(mut self, type_name: impl Into<String>) -> Self {
        self.explicit_type = Some(type_name.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.docstring = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl AnnotationRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
        }
    }

    pub fn with_argument(name: impl Into<String>, argument: Literal) -> Self {
        Self {
            name: name.into(),
            argument: Some(argument),
        }
    }
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Literal::String {
            value: value.into(),
        }
    }

    pub fn int(value: i64) -> Self {
        Literal::Int {
            raw: value.to_string(),
        }
    }

    /// Integer literal from its lexed text
    pub fn int_raw(raw: impl Into<String>) -> Self {
        Literal::Int { raw: raw.into() }
    }

    pub fn float_raw(raw: impl Into<String>) -> Self {
        Literal::Float { raw: raw.into() }
    }

    pub fn bool(value: bool) -> Self {
        Literal::Bool { value }
    }

    /// Reference to another constant
    pub fn reference(name: impl Into<String>) -> Self {
        Literal::Reference(Reference {
            name: name.into(),
            member: None,
        })
    }

    /// Reference to an enum member: `Enum.Member`
    pub fn member(name: impl Into<String>, member: impl Into<String>) -> Self {
        Literal::Reference(Reference {
            name: name.into(),
            member: Some(member.into()),
        })
    }

    pub fn object(entries: impl IntoIterator<Item = ObjectLiteralEntry>) -> Self {
        Literal::Object {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn array(elements: impl IntoIterator<Item = Literal>) -> Self {
        Literal::Array {
            elements: elements.into_iter().collect(),
        }
    }
}

impl ObjectLiteralEntry {
    pub fn field(key: impl Into<String>, value: Literal) -> Self {
        ObjectLiteralEntry::Field {
            key: key.into(),
            value,
        }
    }

    /// `...name` inside an object literal
    pub fn spread(name: impl Into<String>) -> Self {
        ObjectLiteralEntry::Spread(Reference {
            name: name.into(),
            member: None,
        })
    }
}

/// Fluent construction of a [`Program`]
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self {
            program: Program::default(),
        }
    }

    pub fn type_decl(mut self, symbol: TypeSymbol) -> Self {
        self.program.types.insert(symbol.name.clone(), symbol);
        self
    }

    pub fn enum_decl(mut self, symbol: EnumSymbol) -> Self {
        self.program.enums.insert(symbol.name.clone(), symbol);
        self
    }

    pub fn const_decl(mut self, symbol: ConstSymbol) -> Self {
        self.program.consts.insert(symbol.name.clone(), symbol);
        self
    }

    pub fn doc(mut self, content: impl Into<String>) -> Self {
        self.program.standalone_docs.push(DocSymbol {
            scope: None,
            content: content.into(),
        });
        self
    }

    pub fn scoped_doc(mut self, scope: impl Into<String>, content: impl Into<String>) -> Self {
        self.program.standalone_docs.push(DocSymbol {
            scope: Some(scope.into()),
            content: content.into(),
        });
        self
    }

    pub fn build(self) -> Program {
        self.program
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}
