#![allow(non_snake_case)]

use super::*;
use cppglue_core::{CallableSignature, Member, QualifiedName};

fn name(qualified: &str) -> QualifiedName {
    let plain = qualified.rsplit("::").next().unwrap_or(qualified);
    QualifiedName::new(plain, qualified)
}

fn typed(plain: &str, ty: &str) -> Member {
    Member {
        ty: QualifiedName::new(ty, ty),
        name: QualifiedName::new(plain, ""),
        is_public: true,
        ..Member::default()
    }
}

fn record(qualified: &str, members: Vec<Member>) -> TypeEntity {
    TypeEntity {
        name: name(qualified),
        is_enum: false,
        members,
    }
}

fn enumeration(qualified: &str, values: &[(&str, i64)]) -> TypeEntity {
    TypeEntity {
        name: name(qualified),
        is_enum: true,
        members: values
            .iter()
            .map(|(plain, value)| Member {
                name: QualifiedName::new(*plain, ""),
                value: *value,
                ..Member::default()
            })
            .collect(),
    }
}

fn method(owner: &str, plain: &str, ret: &str, parameters: Vec<Member>) -> Function {
    Function {
        name: QualifiedName::new(plain, format!("{owner}::{plain}")),
        return_type: QualifiedName::new(ret, ret),
        is_member_function: true,
        owner: Some(name(owner)),
        parameters,
        ..Function::default()
    }
}

fn free(qualified: &str, ret: &str, parameters: Vec<Member>) -> Function {
    Function {
        name: name(qualified),
        return_type: QualifiedName::new(ret, ret),
        parameters,
        ..Function::default()
    }
}

#[test]
fn render_stub___empty_model___imports_only() {
    let out = render_stub(&BindingModel::default(), "shapes");

    assert_eq!(
        out,
        "# Type stubs for the `shapes` extension module.\n\
         # Generated by cppglue. Do not edit.\n\
         \n\
         from enum import IntEnum\n\
         from typing import Callable, Dict, List, Optional, Set, Tuple\n"
    );
}

#[test]
fn render_stub___enum_values___exact_signed_values() {
    let model = BindingModel {
        types: vec![enumeration("n1::beta", &[("A", -1), ("B", 0), ("C", 1)])],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "m");

    assert!(out.contains("class beta(IntEnum):\n    A = -1\n    B = 0\n    C = 1\n"));
}

#[test]
fn render_stub___empty_enum___ellipsis_body() {
    let model = BindingModel {
        types: vec![enumeration("Empty", &[])],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "m");

    assert!(out.contains("class Empty(IntEnum):\n    ...\n"));
}

#[test]
fn render_stub___class___placeholder_then_definition() {
    let model = BindingModel {
        types: vec![record(
            "n1::alpha",
            vec![typed("a", "std::complex<double>"), typed("names", "std::vector<std::string>")],
        )],
        functions: vec![method("n1::alpha", "print", "std::string", vec![typed("imag", "int")])],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "m");

    let placeholder = out.find("class alpha: ...\n");
    let definition = out.find("class alpha:\n");
    assert!(placeholder.is_some() && definition.is_some());
    assert!(placeholder < definition);
    assert!(out.contains(
        "class alpha:\n\
         \x20   def __init__(self) -> None: ...\n\
         \x20   a: complex\n\
         \x20   names: List[str]\n\
         \x20   def print(self, imag: int) -> str: ...\n"
    ));
}

#[test]
fn render_stub___static_method___decorated_without_self() {
    let mut origin = method("geo::Point", "origin", "geo::Point", vec![]);
    origin.is_static = true;
    let model = BindingModel {
        types: vec![record("geo::Point", vec![])],
        functions: vec![origin],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "m");

    assert!(out.contains("    @staticmethod\n    def origin() -> Point: ...\n"));
}

#[test]
fn render_stub___functional_parameter___uses_signature() {
    let callback = Member {
        ty: QualifiedName::new("std::function<int (double)>", "std::function<int (double)>"),
        name: QualifiedName::new("cb", ""),
        is_functional: true,
        signatures: vec![CallableSignature {
            return_type: QualifiedName::new("int", "int"),
            parameters: vec![typed("", "double")],
        }],
        ..Member::default()
    };
    let model = BindingModel {
        functions: vec![free("run", "void", vec![callback])],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "m");

    assert!(out.contains("def run(cb: Callable[[float], int]) -> None: ...\n"));
}

#[test]
fn render_stub___blocks___separated_by_two_blank_lines() {
    let model = BindingModel {
        types: vec![record("A", vec![])],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "m");

    assert!(out.contains("Tuple\n\n\nclass A: ...\n\n\nclass A:\n"));
}

#[test]
fn render_stub___method_of_other_namespace___not_attached() {
    let model = BindingModel {
        types: vec![record("n1::alpha", vec![])],
        functions: vec![method("n2::alpha", "other", "void", vec![])],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "m");

    assert!(!out.contains("other"));
}

#[test]
fn render_init___names___imported_and_listed() {
    let model = BindingModel {
        types: vec![enumeration("beta", &[("A", 0)]), record("alpha", vec![])],
        functions: vec![free("run", "void", vec![])],
        ..BindingModel::default()
    };

    let out = render_init(&model, "shapes");

    assert!(out.contains("from .shapes import beta, alpha, run\n"));
    assert!(out.contains("__all__ = [\n    \"beta\",\n    \"alpha\",\n    \"run\",\n]\n"));
}

#[test]
fn render_init___overloads___listed_once() {
    let model = BindingModel {
        functions: vec![
            free("scale", "void", vec![typed("f", "double")]),
            free("scale", "void", vec![typed("i", "int")]),
        ],
        ..BindingModel::default()
    };

    assert_eq!(exported_names(&model), vec!["scale"]);
}

#[test]
fn render_init___empty_model___star_import() {
    let out = render_init(&BindingModel::default(), "shapes");

    assert!(out.contains("from .shapes import *"));
    assert!(out.contains("__all__ = []\n"));
}

#[test]
fn exported_names___methods___excluded() {
    let model = BindingModel {
        types: vec![record("Point", vec![])],
        functions: vec![method("Point", "norm", "double", vec![])],
        ..BindingModel::default()
    };

    assert_eq!(exported_names(&model), vec!["Point"]);
}

#[test]
fn render_stub___cpp_only_names___escaped_mapped_or_skipped() {
    let mut secret = typed("secret", "int");
    secret.is_public = false;
    let model = BindingModel {
        types: vec![
            enumeration("io::Mode", &[("None", 0), ("All", 1)]),
            record("geo::Point", vec![typed("from", "int"), secret]),
        ],
        functions: vec![
            method("geo::Point", "~Point", "void", vec![]),
            method("geo::Point", "operator==", "bool", vec![typed("other", "const geo::Point &")]),
            free("geo::operator<<", "std::ostream &", vec![]),
        ],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "shapes");

    assert!(out.contains("class Mode(IntEnum):\n    None_ = 0\n    All = 1\n"));
    assert!(out.contains("    from_: int\n"));
    assert!(out.contains("    def __eq__(self, other: Point) -> bool: ...\n"));
    assert!(!out.contains("secret"));
    assert!(!out.contains("~"));
    assert!(!out.contains("operator"));
}

#[test]
fn render_stub___enum_with_only_unnamed_values___ellipsis_body() {
    let model = BindingModel {
        types: vec![enumeration("Odd", &[("", 0)])],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "shapes");

    assert!(out.contains("class Odd(IntEnum):\n    ...\n"));
}

#[test]
fn render_stub___type_seen_twice___defined_once() {
    let model = BindingModel {
        types: vec![record("geo::Point", vec![]), record("geo::Point", vec![])],
        ..BindingModel::default()
    };

    let out = render_stub(&model, "shapes");

    assert_eq!(out.matches("class Point: ...\n").count(), 1);
    assert_eq!(out.matches("class Point:\n").count(), 1);
}

#[test]
fn exported_names___free_operators_skipped_keywords_escaped() {
    let model = BindingModel {
        functions: vec![
            free("geo::operator+", "int", vec![]),
            free("geo::del", "void", vec![]),
        ],
        ..BindingModel::default()
    };

    assert_eq!(exported_names(&model), vec!["del_"]);
}
