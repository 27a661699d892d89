//! Naming helpers shared by the emitters.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `n1::n2::alpha` | [`short_name`] | `alpha` |
//! | `lambda`, index 0 | [`parameter_name`] | `lambda_` |
//! | `""`, index 2 | [`parameter_name`] | `arg2` |
//! | `my_module` | [`is_python_identifier`] | `true` |
//! | `None` | [`attribute_name`] | `None_` |
//! | `operator==` (method) | [`function_name`] | `__eq__` |
//! | `~Point` | [`function_name`] | none |

use cppglue_core::{Function, Member, TypeEntity};

/// Python keywords that cannot be used as names.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Strip everything up to and including the last top-level `::`.
///
/// Separators inside template arguments are ignored, so `a::Box<b::C>` becomes
/// `Box<b::C>`. Distinct types sharing a final segment collapse to the same
/// name.
pub fn short_name(name: &str) -> &str {
    let bytes = name.as_bytes();
    let mut depth = 0usize;
    let mut last = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => last = Some(i),
            _ => {}
        }
    }

    match last {
        Some(i) => &name[i + 2..],
        None => name,
    }
}

/// The Python-visible name of a parameter.
///
/// Unnamed parameters become `arg<index>`; keywords get a trailing underscore.
pub fn parameter_name(index: usize, name: &str) -> String {
    if name.is_empty() {
        format!("arg{index}")
    } else {
        escape_keyword(name)
    }
}

/// The Python-visible name of an enumerator or data member.
///
/// Keywords get a trailing underscore. Returns `None` when the result is still
/// not an identifier.
pub fn attribute_name(name: &str) -> Option<String> {
    let escaped = escape_keyword(name);
    is_python_identifier(&escaped).then_some(escaped)
}

/// The Python-visible name of a function or method.
///
/// Instance operators become special methods (`operator==` to `__eq__`).
/// Destructors, free or static operators and operators without a Python
/// counterpart have no name and are not exposed.
pub fn function_name(function: &Function) -> Option<String> {
    let name = function.name.plain.as_str();
    match operator_symbol(name) {
        Some(symbol) if function.is_member_function && !function.is_static => {
            special_method(symbol, function.parameters.len()).map(str::to_string)
        }
        Some(_) => None,
        None => attribute_name(name),
    }
}

/// Members exposed to Python with their Python names, in declaration order.
///
/// Every enumerator is exposed; record fields only when public.
pub fn exposed_members(entity: &TypeEntity) -> impl Iterator<Item = (&Member, String)> {
    entity
        .members
        .iter()
        .filter(move |member| entity.is_enum || member.is_public)
        .filter_map(|member| attribute_name(&member.name.plain).map(|name| (member, name)))
}

fn escape_keyword(name: &str) -> String {
    if PYTHON_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// The symbol of an `operator` function name (`==`, `[]`, `bool`).
fn operator_symbol(name: &str) -> Option<&str> {
    let rest = name.strip_prefix("operator")?;
    match rest.chars().next() {
        Some(c) if c != '_' && !c.is_ascii_alphanumeric() => Some(rest.trim()),
        _ => None,
    }
}

/// Special method for a member operator taking `arity` explicit parameters.
fn special_method(symbol: &str, arity: usize) -> Option<&'static str> {
    let method = match (symbol, arity) {
        ("==", 1) => "__eq__",
        ("!=", 1) => "__ne__",
        ("<", 1) => "__lt__",
        ("<=", 1) => "__le__",
        (">", 1) => "__gt__",
        (">=", 1) => "__ge__",
        ("+", 1) => "__add__",
        ("-", 1) => "__sub__",
        ("*", 1) => "__mul__",
        ("/", 1) => "__truediv__",
        ("%", 1) => "__mod__",
        ("+", 0) => "__pos__",
        ("-", 0) => "__neg__",
        ("[]", 1) => "__getitem__",
        ("()", _) => "__call__",
        ("bool", 0) => "__bool__",
        _ => return None,
    };
    Some(method)
}

/// Whether `name` can be used as a Python module or attribute name.
///
/// # Examples
///
/// ```
/// use cppglue_codegen::naming::is_python_identifier;
///
/// assert!(is_python_identifier("shapes"));
/// assert!(!is_python_identifier("my-module"));
/// assert!(!is_python_identifier("class"));
/// ```
pub fn is_python_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = match chars.next() {
        Some(first) => first == '_' || first.is_ascii_alphabetic(),
        None => return false,
    };

    starts_ok
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && !PYTHON_KEYWORDS.contains(&name)
}

/// Escape a string for use inside a C++ string literal.
pub fn escape_cpp_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}
