//! pybind11 binding source generation.
//!
//! The generated translation unit has three parts: a preamble with the
//! pybind11 includes and the headers seen in the inputs, a first pass that
//! declares every enumeration and class, and a second pass that attaches
//! constructors, fields and methods. Free functions come last.

use crate::naming::{escape_cpp_string, exposed_members, function_name, parameter_name};
use crate::type_map::{map_member_type, map_type};
use cppglue_core::{BindingModel, Function, Member, TypeEntity};
use std::collections::BTreeSet;

const PYBIND11_INCLUDES: &[&str] = &[
    "pybind11/pybind11.h",
    "pybind11/stl.h",
    "pybind11/complex.h",
    "pybind11/functional.h",
];

/// Render the pybind11 module source for `model`.
///
/// Output is byte-identical for equal models.
pub fn render_bindings(model: &BindingModel, module: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("// Python bindings for the `{module}` module.\n"));
    out.push_str("// Generated by cppglue. Do not edit.\n\n");

    for include in PYBIND11_INCLUDES {
        out.push_str(&format!("#include <{include}>\n"));
    }
    out.push('\n');

    out.push_str(&render_header_section(
        "User headers",
        &model.user_headers(),
        |name| format!("#include \"{name}\""),
    ));
    out.push('\n');
    out.push_str(&render_header_section(
        "System headers",
        &model.system_headers(),
        |name| format!("// #include <{name}>"),
    ));
    out.push('\n');

    out.push_str("namespace py = pybind11;\n\n");
    out.push_str(&format!("PYBIND11_MODULE({module}, m) {{\n"));

    let mut blocks = Vec::new();
    for entity in model.distinct_types() {
        if entity.is_enum {
            blocks.push(render_enum(entity));
        } else {
            blocks.push(render_class_declaration(entity));
        }
    }
    for entity in model.distinct_types().filter(|t| !t.is_enum) {
        blocks.push(render_class_body(model, entity));
    }
    for function in model.free_functions() {
        if let Some(name) = function_name(function) {
            blocks.push(render_free_function(function, &name));
        }
    }
    out.push_str(&blocks.join("\n"));

    out.push_str("}\n");
    out
}

/// Human-readable signature used as the docstring: `name(p: T) -> R`.
///
/// Uses the Python-visible name where there is one. The return annotation is
/// omitted for `void` functions.
pub fn describe(function: &Function) -> String {
    let params: Vec<String> = function
        .parameters
        .iter()
        .enumerate()
        .map(|(i, param)| {
            format!(
                "{}: {}",
                parameter_name(i, &param.name.plain),
                map_member_type(param)
            )
        })
        .collect();

    let name = function_name(function).unwrap_or_else(|| function.name.plain.clone());
    let mut description = format!("{name}({})", params.join(", "));
    let return_type = map_type(function.return_spelling());
    if return_type != "None" {
        description.push_str(&format!(" -> {return_type}"));
    }
    description
}

fn render_header_section(
    title: &str,
    names: &BTreeSet<&str>,
    line: impl Fn(&str) -> String,
) -> String {
    let mut out = format!("// {title}\n");
    if names.is_empty() {
        out.push_str("// [none found]\n");
    }
    for &name in names {
        out.push_str(&line(name));
        out.push('\n');
    }
    out
}

fn render_enum(entity: &TypeEntity) -> String {
    let qualified = entity.name.display();
    let mut lines = vec![format!(
        "    py::enum_<{qualified}>(m, \"{}\", py::arithmetic())",
        entity.name.plain
    )];

    for (member, name) in exposed_members(entity) {
        lines.push(format!(
            "        .value(\"{name}\", {qualified}::{plain})",
            plain = member.name.plain
        ));
    }
    lines.push("        .export_values();".to_string());

    lines.join("\n") + "\n"
}

fn render_class_declaration(entity: &TypeEntity) -> String {
    format!(
        "    py::class_<{}> {}(m, \"{}\");\n",
        entity.name.display(),
        class_variable(entity),
        entity.name.plain
    )
}

fn render_class_body(model: &BindingModel, entity: &TypeEntity) -> String {
    let qualified = entity.name.display();
    let mut lines = vec![
        format!("    {}", class_variable(entity)),
        "        .def(py::init<>())".to_string(),
    ];

    for (member, name) in exposed_members(entity) {
        lines.push(format!(
            "        .def_readwrite(\"{name}\", &{qualified}::{plain})",
            plain = member.name.plain
        ));
    }

    for (method, name) in model
        .methods_of(entity)
        .filter_map(|method| function_name(method).map(|name| (method, name)))
    {
        let def = if method.is_static { "def_static" } else { "def" };
        lines.push(format!(
            "        .{def}(\"{name}\", &{qualified}::{plain}{args}, \"{doc}\")",
            plain = method.name.plain,
            args = render_args(&method.parameters),
            doc = escape_cpp_string(&describe(method)),
        ));
    }

    lines.join("\n") + ";\n"
}

fn render_free_function(function: &Function, name: &str) -> String {
    format!(
        "    m.def(\"{name}\", &{}{}, \"{}\");\n",
        function.name.display(),
        render_args(&function.parameters),
        escape_cpp_string(&describe(function)),
    )
}

fn render_args(parameters: &[Member]) -> String {
    parameters
        .iter()
        .enumerate()
        .map(|(i, param)| format!(", py::arg(\"{}\")", parameter_name(i, &param.name.plain)))
        .collect()
}

/// C++ variable holding the `py::class_` of `entity`, unique per qualified name.
fn class_variable(entity: &TypeEntity) -> String {
    let scoped: String = entity
        .name
        .display()
        .replace("::", "_")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{scoped}_class")
}
