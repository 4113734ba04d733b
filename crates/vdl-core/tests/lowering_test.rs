//! End-to-end lowering of fixture programs

use pretty_assertions::assert_eq;
use vdl_core::config::DEFAULT_MAX_DEPTH;
use vdl_core::ir::EnumDef;
use vdl_core::program::{
    ConstSymbol, EnumSymbol, FieldSymbol, FieldType, Literal, ObjectLiteralEntry, ProgramBuilder,
    TypeSymbol,
};
use vdl_core::types::{EnumValueType, PrimitiveType};
use vdl_core::{
    from_program, from_program_with, lower_with_stats, BuildConfig, EmitConfig, IrSchema,
    Program, TypeRef, Value,
};
use vdl_test_fixtures::{
    constant_cycle_program, diamond_enum_program, minimal_program, sample_program,
    spread_cycle_program, ProgramFormat, TestFixtures,
};

fn member_names(def: &EnumDef) -> Vec<&str> {
    def.member_names()
}

#[test]
fn test_minimal_program() {
    let schema = from_program(&minimal_program());
    assert_eq!(schema.types.len(), 1);
    assert_eq!(schema.types[0].field_names(), vec!["message"]);
    assert!(schema.enums.is_empty());
    assert!(schema.constants.is_empty());
}

#[test]
fn test_sample_spread_fields_prefix_own_fields() {
    let schema = from_program(&sample_program());
    let account = schema.find_type("Account").unwrap();
    let base = schema.find_type("Base").unwrap();

    assert_eq!(
        account.field_names(),
        vec!["id", "createdAt", "status", "scores", "labels", "owner"]
    );
    assert_eq!(&account.fields[..base.fields.len()], &base.fields[..]);
}

#[test]
fn test_sample_field_types() {
    let schema = from_program(&sample_program());
    let account = schema.find_type("Account").unwrap();

    assert_eq!(
        account.field("status").unwrap().type_ref,
        TypeRef::EnumRef {
            name: "Status".to_string(),
            value_type: EnumValueType::String,
        }
    );
    assert_eq!(
        account.field("scores").unwrap().type_ref,
        TypeRef::array(TypeRef::primitive(PrimitiveType::Int), 2)
    );

    let labels = account.field("labels").unwrap();
    assert!(labels.optional);
    assert_eq!(
        labels.type_ref,
        TypeRef::Map {
            value: Box::new(TypeRef::primitive(PrimitiveType::String))
        }
    );

    let TypeRef::Object { fields } = &account.field("owner").unwrap().type_ref else {
        panic!("owner should be an inline object");
    };
    assert_eq!(fields[0].name, "email");
}

#[test]
fn test_spread_merge_order() {
    let schema = from_program(&sample_program());
    let cfg = schema.find_constant("cfg").unwrap();

    assert_eq!(
        cfg.value,
        Value::object([
            ("host", Value::string("localhost")),
            ("port", Value::int(8080)),
            ("secure", Value::bool(true)),
            ("status", Value::string("Active")),
        ])
    );

    let TypeRef::Object { fields } = &cfg.type_ref else {
        panic!("cfg should infer an inline object");
    };
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["host", "port", "secure", "status"]);
    assert!(fields.iter().all(|f| !f.optional));
}

#[test]
fn test_empty_array_and_explicit_types() {
    let schema = from_program(&sample_program());

    let empty = schema.find_constant("empty").unwrap();
    assert_eq!(
        empty.type_ref,
        TypeRef::array(TypeRef::primitive(PrimitiveType::String), 1)
    );
    assert_eq!(empty.value, Value::array([]));

    let ratio = schema.find_constant("ratio").unwrap();
    assert_eq!(ratio.type_ref, TypeRef::primitive(PrimitiveType::Float));
    assert_eq!(ratio.doc.as_deref(), Some("Share of traffic"));
}

#[test]
fn test_nested_array_constant_merges_dims() {
    let program = ProgramBuilder::new()
        .const_decl(ConstSymbol::new(
            "matrix",
            Literal::array([
                Literal::array([Literal::int(1), Literal::int(2)]),
                Literal::array([Literal::int(3)]),
            ]),
        ))
        .build();

    let schema = from_program(&program);
    assert_eq!(
        schema.constants[0].type_ref,
        TypeRef::array(TypeRef::primitive(PrimitiveType::Int), 2)
    );
}

#[test]
fn test_cyclic_type_spreads_terminate() {
    let schema = from_program(&spread_cycle_program());
    assert_eq!(schema.find_type("A").unwrap().field_names(), vec!["b", "a"]);
    assert_eq!(schema.find_type("B").unwrap().field_names(), vec!["a", "b"]);
}

#[test]
fn test_diamond_enum_duplicates_shared_member() {
    let schema = from_program(&diamond_enum_program());

    let both = schema.find_enum("Both").unwrap();
    assert_eq!(member_names(both), vec!["Shared", "L", "Shared", "R", "Own"]);
    assert_eq!(member_names(schema.find_enum("Left").unwrap()), vec!["Shared", "L"]);
}

#[test]
fn test_constant_cycles_are_local_failures() {
    let (schema, stats) = lower_with_stats(&constant_cycle_program(), &BuildConfig::default());

    // name order: list, ping, pong, selfish
    assert_eq!(
        schema.find_constant("list").unwrap().value,
        Value::array([Value::int(1), Value::int(3)])
    );
    assert_eq!(
        schema.find_constant("ping").unwrap().value,
        Value::object([("pong", Value::bool(true)), ("ping", Value::bool(true))])
    );
    assert_eq!(
        schema.find_constant("pong").unwrap().value,
        Value::object([("pong", Value::bool(true))])
    );
    assert_eq!(schema.find_constant("selfish").unwrap().value, Value::string(""));
    assert!(stats.cycles_broken >= 3);
}

#[test]
fn test_enum_member_reference_through_spread() {
    let program = ProgramBuilder::new()
        .enum_decl(
            EnumSymbol::new("BaseLevel", EnumValueType::Int).member_with_value("Debug", "10"),
        )
        .enum_decl(
            EnumSymbol::new("Level", EnumValueType::Int)
                .spread("BaseLevel")
                .member_with_value("Error", "50"),
        )
        .const_decl(ConstSymbol::new("threshold", Literal::member("Level", "Debug")).typed("Level"))
        .build();

    let schema = from_program(&program);
    let threshold = schema.find_constant("threshold").unwrap();
    assert_eq!(threshold.value, Value::int(10));
    assert_eq!(
        threshold.type_ref,
        TypeRef::EnumRef {
            name: "Level".to_string(),
            value_type: EnumValueType::Int,
        }
    );
}

#[test]
fn test_integer_overflow_drops_only_that_entry() {
    let program = ProgramBuilder::new()
        .const_decl(ConstSymbol::new(
            "limits",
            Literal::object([
                ObjectLiteralEntry::field("max", Literal::int_raw("9223372036854775808")),
                ObjectLiteralEntry::field("min", Literal::int(i64::MIN)),
            ]),
        ))
        .build();

    let schema = from_program(&program);
    assert_eq!(
        schema.constants[0].value,
        Value::object([("min", Value::int(i64::MIN))])
    );
}

#[test]
fn test_shallow_depth_limit_truncates_spread_chain() {
    let mut builder = ProgramBuilder::new();
    builder = builder.type_decl(
        TypeSymbol::new("T0").field(FieldSymbol::new("f0", FieldType::primitive("string"))),
    );
    for i in 1..6 {
        builder = builder.type_decl(
            TypeSymbol::new(format!("T{}", i))
                .spread(format!("T{}", i - 1))
                .field(FieldSymbol::new(format!("f{}", i), FieldType::primitive("string"))),
        );
    }
    let program = builder.build();

    let full = from_program(&program);
    assert_eq!(
        full.find_type("T5").unwrap().field_names(),
        vec!["f0", "f1", "f2", "f3", "f4", "f5"]
    );

    let (limited, stats) = lower_with_stats(&program, &BuildConfig::new().with_max_depth(2));
    assert_eq!(
        limited.find_type("T5").unwrap().field_names(),
        vec!["f3", "f4", "f5"]
    );
    assert!(stats.depth_exceeded > 0);
    assert_eq!(
        from_program_with(&program, &BuildConfig::new().with_max_depth(2)),
        limited
    );
}

#[test]
fn test_json_round_trip() {
    let schema = from_program(&sample_program());

    for minify in [false, true] {
        let json = schema.to_json(&EmitConfig::new().with_minify(minify)).unwrap();
        let decoded = IrSchema::from_json(&json).unwrap();
        assert_eq!(decoded, schema);
    }
}

#[test]
fn test_out_of_range_float_is_dropped_and_round_trips() {
    let program = ProgramBuilder::new()
        .const_decl(ConstSymbol::new(
            "big",
            Literal::array([Literal::float_raw("1e999"), Literal::float_raw("1.5")]),
        ))
        .build();

    let schema = from_program(&program);
    assert_eq!(schema.constants[0].value, Value::array([Value::float(1.5)]));

    let json = schema.to_json(&EmitConfig::default()).unwrap();
    assert!(!json.contains("null"));
    assert_eq!(IrSchema::from_json(&json).unwrap(), schema);
}

#[test]
fn test_long_constant_chain_stays_within_depth_limit() {
    // c001 = { next: c000 }, c002 = { next: c001 }, ...
    let mut builder = ProgramBuilder::new().const_decl(ConstSymbol::new("c000", Literal::int(0)));
    for i in 1..200 {
        builder = builder.const_decl(ConstSymbol::new(
            format!("c{:03}", i),
            Literal::object([ObjectLiteralEntry::field(
                "next",
                Literal::reference(format!("c{:03}", i - 1)),
            )]),
        ));
    }
    let program = builder.build();

    let (schema, stats) = lower_with_stats(&program, &BuildConfig::default());
    assert!(stats.depth_exceeded > 0);
    assert_eq!(
        schema
            .constants
            .iter()
            .map(|c| c.value.depth())
            .max()
            .unwrap(),
        DEFAULT_MAX_DEPTH
    );

    for minify in [false, true] {
        let json = schema.to_json(&EmitConfig::new().with_minify(minify)).unwrap();
        assert_eq!(IrSchema::from_json(&json).unwrap(), schema);
    }
}

#[test]
fn test_program_files_lower_identically() -> Result<(), Box<dyn std::error::Error>> {
    let mut fixtures = TestFixtures::new();
    let expected = from_program(&sample_program());

    for format in [ProgramFormat::Json, ProgramFormat::Yaml] {
        let path = fixtures.setup_sample(format);
        let program = Program::from_path(&path)?;
        assert_eq!(from_program(&program), expected);
    }

    let unsupported = fixtures.write_file("program.txt", "{}");
    assert!(Program::from_path(&unsupported).is_err());
    Ok(())
}
