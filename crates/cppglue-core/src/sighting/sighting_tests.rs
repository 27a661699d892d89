#![allow(non_snake_case)]

use super::*;

const UNIT_JSON: &str = r#"{
    "main_file": "/src/another_ex.h",
    "declarations": [
        {
            "qualified_name": "n1::n2::n3::alpha",
            "plain_name": "alpha",
            "namespace": "n3",
            "location": { "file": "/src/another_ex.h", "line": 9, "column": 8 },
            "kind": "record",
            "fields": [
                { "name": "b", "qualified_name": "n1::n2::n3::alpha::b",
                  "type": { "spelling": "std::string", "canonical": "std::basic_string<char>" } }
            ]
        },
        {
            "qualified_name": "n1::beta",
            "plain_name": "beta",
            "location": { "file": "/src/another_ex.h", "line": 25, "region": "user" },
            "kind": "enum",
            "integer_type": { "spelling": "int" },
            "enumerators": [
                { "name": "A", "value": -1 },
                { "name": "B", "value": 0 }
            ]
        },
        {
            "qualified_name": "n1::run",
            "plain_name": "run",
            "location": { "file": "/src/another_ex.h", "line": 30 },
            "kind": "function",
            "return_type": { "spelling": "void" },
            "parameters": [
                { "name": "cb", "type": {
                    "spelling": "std::function<int (double)>",
                    "specialization": { "template": "function", "arguments": [
                        { "kind": "function_proto",
                          "return_type": { "spelling": "int" },
                          "parameters": [ { "spelling": "double" } ] }
                    ] }
                } }
            ]
        }
    ],
    "includes": [
        { "name": "vector", "full_path": "/usr/include/c++/13/vector", "region": "system" },
        { "name": "a.h", "full_path": "/src/a.h" }
    ]
}"#;

#[test]
fn UnitSightings___from_json___parses_all_declaration_kinds() {
    let unit = UnitSightings::from_json(UNIT_JSON).unwrap();

    assert_eq!(unit.main_file, "/src/another_ex.h");
    assert_eq!(unit.declarations.len(), 3);
    assert!(matches!(unit.declarations[0].kind, SightingKind::Record { .. }));
    assert!(matches!(unit.declarations[1].kind, SightingKind::Enum { .. }));
    assert!(matches!(unit.declarations[2].kind, SightingKind::Function(_)));
}

#[test]
fn UnitSightings___from_json___keeps_negative_enumerator_values() {
    let unit = UnitSightings::from_json(UNIT_JSON).unwrap();

    let SightingKind::Enum { enumerators, .. } = &unit.declarations[1].kind else {
        panic!("expected enum sighting");
    };
    assert_eq!(enumerators[0].value, -1);
    assert_eq!(enumerators[1].value, 0);
}

#[test]
fn UnitSightings___from_json___applies_defaults() {
    let unit = UnitSightings::from_json(UNIT_JSON).unwrap();
    let record = &unit.declarations[0];

    assert!(record.is_first_declaration);
    assert!(!record.is_implicit);
    assert_eq!(record.location.as_ref().unwrap().region, Region::User);

    let SightingKind::Record { fields } = &record.kind else {
        panic!("expected record sighting");
    };
    assert_eq!(fields[0].access, Access::Public);
}

#[test]
fn UnitSightings___from_json___parses_function_proto_argument() {
    let unit = UnitSightings::from_json(UNIT_JSON).unwrap();

    let SightingKind::Function(function) = &unit.declarations[2].kind else {
        panic!("expected function sighting");
    };
    let specialization = function.parameters[0].ty.specialization.as_ref().unwrap();
    assert_eq!(specialization.template, "function");
    assert!(matches!(
        specialization.arguments[0],
        TemplateArgument::FunctionProto { .. }
    ));
}

#[test]
fn UnitSightings___from_json___parses_include_regions() {
    let unit = UnitSightings::from_json(UNIT_JSON).unwrap();

    assert_eq!(unit.includes[0].region, Region::System);
    assert_eq!(unit.includes[1].region, Region::User);
}

#[test]
fn UnitSightings___from_json___rejects_unknown_kind() {
    let json = r#"{ "declarations": [
        { "qualified_name": "x", "plain_name": "x", "kind": "macro" }
    ] }"#;

    let result = UnitSightings::from_json(json);

    assert!(matches!(result, Err(SightingError::Malformed(_))));
}

#[test]
fn UnitSightings___from_file___missing_file___returns_read_error() {
    let result = UnitSightings::from_file("/nonexistent/unit.json");

    assert!(matches!(result, Err(SightingError::Read { .. })));
}

#[test]
fn SourceLocation___is_valid___requires_file_and_line() {
    let valid = SourceLocation {
        file: "a.h".into(),
        line: 1,
        column: 0,
        region: Region::User,
    };
    let no_file = SourceLocation {
        file: String::new(),
        ..valid.clone()
    };
    let no_line = SourceLocation {
        line: 0,
        ..valid.clone()
    };

    assert!(valid.is_valid());
    assert!(!no_file.is_valid());
    assert!(!no_line.is_valid());
}

#[test]
fn TypeSpelling___named___copies_spelling_to_canonical() {
    let ty = TypeSpelling::named("int");

    assert_eq!(ty.spelling, "int");
    assert_eq!(ty.canonical, "int");
    assert!(ty.specialization.is_none());
}
