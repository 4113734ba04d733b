//! Test fixtures for VDL IR testing
//!
//! Provides small, representative validated programs, in memory or written
//! to a temporary directory as JSON or YAML.

use std::fs;
use std::path::PathBuf;
use vdl_core::program::{
    AnnotationRef, ConstSymbol, EnumSymbol, FieldSymbol, FieldType, InlineObject, Literal,
    ObjectLiteralEntry, Program, ProgramBuilder, TypeSymbol,
};
use vdl_core::types::EnumValueType;

/// Serialized form of a fixture program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramFormat {
    Json,
    Yaml,
}

impl ProgramFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ProgramFormat::Json => "json",
            ProgramFormat::Yaml => "yaml",
        }
    }
}

/// Temporary directory holding fixture files for one test
pub struct TestFixtures {
    temp_dir: Option<tempfile::TempDir>,
}

impl Default for TestFixtures {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixtures {
    pub fn new() -> Self {
        Self { temp_dir: None }
    }

    /// Root of the fixture directory, created on first use
    pub fn path(&mut self) -> PathBuf {
        self.temp_dir
            .get_or_insert_with(|| tempfile::tempdir().unwrap())
            .path()
            .to_path_buf()
    }

    pub fn write_file(&mut self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Write `program` as `<stem>.json` or `<stem>.yaml`
    pub fn write_program(&mut self, stem: &str, program: &Program, format: ProgramFormat) -> PathBuf {
        let contents = match format {
            ProgramFormat::Json => serde_json::to_string_pretty(program).unwrap(),
            ProgramFormat::Yaml => serde_yaml::to_string(program).unwrap(),
        };
        self.write_file(&format!("{}.{}", stem, format.extension()), &contents)
    }

    /// Write the sample program and return its path
    pub fn setup_sample(&mut self, format: ProgramFormat) -> PathBuf {
        self.write_program("program", &sample_program(), format)
    }
}

fn field(name: &str, ty: FieldType) -> FieldSymbol {
    FieldSymbol::new(name, ty)
}

/// One type with one field
pub fn minimal_program() -> Program {
    ProgramBuilder::new()
        .type_decl(TypeSymbol::new("Ping").field(field("message", FieldType::primitive("string"))))
        .build()
}

/// Small schema touching every lowering feature
pub fn sample_program() -> Program {
    ProgramBuilder::new()
        .doc("\n    # Sample\n\n    Accounts and their settings.\n")
        .doc("   \n")
        .scoped_doc("Settings", "  Runtime settings  ")
        .enum_decl(
            EnumSymbol::new("Status", EnumValueType::String)
                .doc("  Account status  ")
                .member("Active")
                .member("Inactive"),
        )
        .enum_decl(
            EnumSymbol::new("Priority", EnumValueType::Int)
                .member_with_value("Low", "1")
                .member_with_value("High", "2"),
        )
        .type_decl(
            TypeSymbol::new("Base")
                .field(field("id", FieldType::primitive("string")))
                .field(field("createdAt", FieldType::primitive("datetime"))),
        )
        .type_decl(
            TypeSymbol::new("Account")
                .doc("\n    An account.\n")
                .annotation(AnnotationRef::with_argument("table", Literal::string("accounts")))
                .spread("Base")
                .field(field("status", FieldType::custom("Status")))
                .field(field("scores", FieldType::primitive("int").array_of(2)))
                .field(field("labels", FieldType::map(FieldType::primitive("string"))).optional())
                .field(field(
                    "owner",
                    FieldType::object(
                        InlineObject::new().field(field("email", FieldType::primitive("string"))),
                    ),
                )),
        )
        .const_decl(ConstSymbol::new(
            "base",
            Literal::object([
                ObjectLiteralEntry::field("host", Literal::string("localhost")),
                ObjectLiteralEntry::field("port", Literal::int(8080)),
            ]),
        ))
        .const_decl(ConstSymbol::new(
            "cfg",
            Literal::object([
                ObjectLiteralEntry::spread("base"),
                ObjectLiteralEntry::field("secure", Literal::bool(true)),
                ObjectLiteralEntry::field("status", Literal::member("Status", "Active")),
            ]),
        ))
        .const_decl(ConstSymbol::new("empty", Literal::array([])))
        .const_decl(
            ConstSymbol::new("ratio", Literal::float_raw("0.5"))
                .typed("float")
                .doc("Share of traffic"),
        )
        .build()
}

/// `A` and `B` spread each other
pub fn spread_cycle_program() -> Program {
    ProgramBuilder::new()
        .type_decl(
            TypeSymbol::new("A")
                .spread("B")
                .field(field("a", FieldType::primitive("string"))),
        )
        .type_decl(
            TypeSymbol::new("B")
                .spread("A")
                .field(field("b", FieldType::primitive("int"))),
        )
        .build()
}

/// `Both` reaches `Root` through `Left` and through `Right`
pub fn diamond_enum_program() -> Program {
    ProgramBuilder::new()
        .enum_decl(EnumSymbol::new("Root", EnumValueType::String).member("Shared"))
        .enum_decl(
            EnumSymbol::new("Left", EnumValueType::String)
                .spread("Root")
                .member("L"),
        )
        .enum_decl(
            EnumSymbol::new("Right", EnumValueType::String)
                .spread("Root")
                .member("R"),
        )
        .enum_decl(
            EnumSymbol::new("Both", EnumValueType::String)
                .spread("Left")
                .spread("Right")
                .member("Own"),
        )
        .build()
}

/// Constants whose references form cycles, next to healthy ones
pub fn constant_cycle_program() -> Program {
    ProgramBuilder::new()
        .const_decl(ConstSymbol::new(
            "ping",
            Literal::object([
                ObjectLiteralEntry::spread("pong"),
                ObjectLiteralEntry::field("ping", Literal::bool(true)),
            ]),
        ))
        .const_decl(ConstSymbol::new(
            "pong",
            Literal::object([
                ObjectLiteralEntry::spread("ping"),
                ObjectLiteralEntry::field("pong", Literal::bool(true)),
            ]),
        ))
        .const_decl(ConstSymbol::new("selfish", Literal::reference("selfish")))
        .const_decl(ConstSymbol::new(
            "list",
            Literal::array([
                Literal::int(1),
                Literal::reference("selfish"),
                Literal::int(3),
            ]),
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_valid() {
        let sample = sample_program();
        assert!(sample.types.contains_key("Account"));
        assert_eq!(sample.enums["Priority"].value_type, EnumValueType::Int);
        assert_eq!(sample.standalone_docs.len(), 3);

        assert_eq!(spread_cycle_program().types.len(), 2);
        assert_eq!(diamond_enum_program().enums.len(), 4);
    }

    #[test]
    fn fixtures_write_loadable_files() {
        let mut fixtures = TestFixtures::new();
        for format in [ProgramFormat::Json, ProgramFormat::Yaml] {
            let path = fixtures.setup_sample(format);
            let loaded = Program::from_path(&path).unwrap();
            assert_eq!(loaded, sample_program());
        }
    }
}
