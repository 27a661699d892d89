//! Python type stub (`.pyi`) and package shim generation.

use crate::naming::{exposed_members, function_name, parameter_name};
use crate::type_map::{map_member_type, map_type};
use cppglue_core::{BindingModel, Function, TypeEntity};
use std::collections::HashSet;

/// Render the `.pyi` stub for `model`.
///
/// Enumerations come first, then a forward placeholder for every class, then
/// the full class definitions, then free functions.
pub fn render_stub(model: &BindingModel, module: &str) -> String {
    let mut out = format!(
        "# Type stubs for the `{module}` extension module.\n\
         # Generated by cppglue. Do not edit.\n\
         \n\
         from enum import IntEnum\n\
         from typing import Callable, Dict, List, Optional, Set, Tuple\n"
    );

    let records = || model.distinct_types().filter(|t| !t.is_enum);

    let mut blocks: Vec<String> = model
        .distinct_types()
        .filter(|t| t.is_enum)
        .map(render_enum)
        .collect();
    blocks.extend(records().map(|entity| format!("class {}: ...\n", entity.name.plain)));
    blocks.extend(records().map(|entity| render_class(model, entity)));
    blocks.extend(
        model
            .free_functions()
            .filter_map(|function| Some(render_def(function, &function_name(function)?, ""))),
    );

    for block in blocks {
        out.push_str("\n\n");
        out.push_str(&block);
    }
    out
}

/// Render the package `__init__.py` that re-exports the extension's names.
pub fn render_init(model: &BindingModel, module: &str) -> String {
    let mut out = format!(
        "# Re-exports of the `{module}` extension module.\n\
         # Generated by cppglue. Do not edit.\n\
         \n"
    );

    let names = exported_names(model);
    if names.is_empty() {
        out.push_str(&format!("from .{module} import *  # noqa: F401,F403\n\n"));
        out.push_str("__all__ = []\n");
        return out;
    }

    out.push_str(&format!("from .{module} import {}\n\n", names.join(", ")));
    out.push_str("__all__ = [\n");
    for name in &names {
        out.push_str(&format!("    \"{name}\",\n"));
    }
    out.push_str("]\n");
    out
}

/// Top-level names in encounter order: types, then free functions.
pub fn exported_names(model: &BindingModel) -> Vec<String> {
    let mut seen = HashSet::new();
    model
        .types
        .iter()
        .map(|entity| entity.name.plain.clone())
        .chain(model.free_functions().filter_map(function_name))
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect()
}

fn render_enum(entity: &TypeEntity) -> String {
    let mut out = format!("class {}(IntEnum):\n", entity.name.plain);
    let values: Vec<String> = exposed_members(entity)
        .map(|(member, name)| format!("    {name} = {}\n", member.value))
        .collect();

    if values.is_empty() {
        out.push_str("    ...\n");
    }
    out.push_str(&values.concat());
    out
}

fn render_class(model: &BindingModel, entity: &TypeEntity) -> String {
    let mut out = format!("class {}:\n", entity.name.plain);
    out.push_str("    def __init__(self) -> None: ...\n");

    for (member, name) in exposed_members(entity) {
        out.push_str(&format!("    {name}: {}\n", map_member_type(member)));
    }
    for method in model.methods_of(entity) {
        let Some(name) = function_name(method) else {
            continue;
        };
        if method.is_static {
            out.push_str("    @staticmethod\n");
        }
        out.push_str(&render_def(method, &name, "    "));
    }
    out
}

fn render_def(function: &Function, name: &str, indent: &str) -> String {
    let mut params: Vec<String> = Vec::new();
    if function.is_member_function && !function.is_static {
        params.push("self".to_string());
    }
    for (i, param) in function.parameters.iter().enumerate() {
        params.push(format!(
            "{}: {}",
            parameter_name(i, &param.name.plain),
            map_member_type(param)
        ));
    }

    format!(
        "{indent}def {name}({}) -> {}: ...\n",
        params.join(", "),
        map_type(function.return_spelling())
    )
}

#[cfg(test)]
#[path = "stub/stub_tests.rs"]
mod stub_tests;
