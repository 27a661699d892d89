//! C++ to Python type mapping for stubs and docstrings.
//!
//! # Type Mappings
//!
//! | C++ | Python |
//! |-----|--------|
//! | `void` | `None` |
//! | `int`, `long`, `std::size_t`, `uint8_t`, ... | `int` |
//! | `bool` | `bool` |
//! | `float`, `double`, `long double` | `float` |
//! | `std::string`, `std::string_view`, `const char *` | `str` |
//! | `std::complex<T>` | `complex` |
//! | `std::vector<T>`, `std::list<T>`, `std::deque<T>`, `std::array<T, N>` | `List[T]` |
//! | `std::set<T>`, `std::unordered_set<T>` | `Set[T]` |
//! | `std::map<K, V>`, `std::unordered_map<K, V>` | `Dict[K, V]` |
//! | `std::pair<A, B>`, `std::tuple<A, ...>` | `Tuple[A, ...]` |
//! | `std::optional<T>` | `Optional[T]` |
//! | `std::shared_ptr<T>`, `std::unique_ptr<T>` | `T` |
//! | `std::function<R(A, B)>` | `Callable[[A, B], R]` |
//! | `ns::Other` | `Other` |

use crate::naming::short_name;
use cppglue_core::{CallableSignature, Member, strip_elaborated_keyword};

const INTEGER_TYPES: &[&str] = &[
    "int",
    "signed",
    "unsigned",
    "short",
    "long",
    "long long",
    "signed int",
    "unsigned int",
    "short int",
    "signed short",
    "unsigned short",
    "unsigned short int",
    "long int",
    "signed long",
    "unsigned long",
    "unsigned long int",
    "long long int",
    "signed long long",
    "unsigned long long",
    "unsigned long long int",
    "signed char",
    "unsigned char",
    "size_t",
    "ssize_t",
    "ptrdiff_t",
    "intptr_t",
    "uintptr_t",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
];

const FLOAT_TYPES: &[&str] = &["float", "double", "long double"];

const STRING_TYPES: &[&str] = &["string", "string_view", "wstring", "char", "wchar_t"];

const QUALIFIERS: &[&str] = &["const ", "volatile "];

/// Map a C++ type spelling to its Python typing form.
///
/// # Examples
///
/// ```
/// use cppglue_codegen::type_map::map_type;
///
/// assert_eq!(map_type("std::vector<std::vector<int>>"), "List[List[int]]");
/// assert_eq!(map_type("const std::string &"), "str");
/// assert_eq!(map_type("std::function<int(std::string, double)>"), "Callable[[str, float], int]");
/// ```
pub fn map_type(spelling: &str) -> String {
    let (ty, indirect) = normalize(spelling);

    if ty.is_empty() || ty == "void" {
        return "None".to_string();
    }
    if indirect && ty == "char" {
        return "str".to_string();
    }
    if let Some(primitive) = map_primitive(ty) {
        return primitive.to_string();
    }
    if let Some(mapped) = map_template(ty) {
        return mapped;
    }

    short_name(ty).to_string()
}

/// The Python type of a parameter or data member.
///
/// Functional parameters take their type from the decomposed signature.
pub fn map_member_type(member: &Member) -> String {
    match member.signature() {
        Some(signature) => map_signature(signature),
        None => map_type(member.type_spelling()),
    }
}

/// Render a decomposed callable signature as `Callable[[A, B], R]`.
pub fn map_signature(signature: &CallableSignature) -> String {
    let params: Vec<String> = signature
        .parameters
        .iter()
        .map(|param| map_type(param.type_spelling()))
        .collect();
    let return_type = if signature.return_type.plain.is_empty() {
        &signature.return_type.qualified
    } else {
        &signature.return_type.plain
    };

    format!("Callable[[{}], {}]", params.join(", "), map_type(return_type))
}

/// Split `s` on commas that are not nested inside `<>`, `()` or `[]`.
///
/// Each piece is trimmed; an all-whitespace input yields no pieces.
pub fn split_top_level(s: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    let last = s[start..].trim();
    if !last.is_empty() || !pieces.is_empty() {
        pieces.push(last);
    }
    pieces
}

/// Strip qualifiers, indirection and elaborated keywords.
///
/// Returns the bare type and whether a pointer or reference was removed.
fn normalize(spelling: &str) -> (&str, bool) {
    let mut ty = spelling.trim();
    let mut indirect = false;

    loop {
        let before = ty;

        if let Some(rest) = QUALIFIERS.iter().find_map(|q| ty.strip_prefix(q)) {
            ty = rest.trim_start();
        }
        ty = strip_elaborated_keyword(ty).trim_start();
        for keyword in ["const", "volatile"] {
            if let Some(rest) = ty.strip_suffix(keyword)
                && rest.ends_with([' ', '*', '&'])
            {
                ty = rest.trim_end();
            }
        }
        if let Some(rest) = ty.strip_suffix(['&', '*']) {
            ty = rest.trim_end();
            indirect = true;
        }

        if ty == before {
            return (ty, indirect);
        }
    }
}

fn map_primitive(ty: &str) -> Option<&'static str> {
    let unscoped = ty.strip_prefix("std::").unwrap_or(ty);

    if ty == "bool" {
        Some("bool")
    } else if INTEGER_TYPES.contains(&unscoped) {
        Some("int")
    } else if FLOAT_TYPES.contains(&ty) {
        Some("float")
    } else if STRING_TYPES.contains(&unscoped) {
        Some("str")
    } else {
        None
    }
}

fn map_template(ty: &str) -> Option<String> {
    let (base, args) = split_specialization(ty)?;
    let name = standard_template_name(base)?;
    let mapped = |index: usize| args.get(index).map(|arg| map_type(arg));

    match name {
        "vector" | "list" | "deque" | "array" => Some(format!("List[{}]", mapped(0)?)),
        "set" | "unordered_set" | "multiset" => Some(format!("Set[{}]", mapped(0)?)),
        "map" | "unordered_map" | "multimap" => {
            Some(format!("Dict[{}, {}]", mapped(0)?, mapped(1)?))
        }
        "optional" => Some(format!("Optional[{}]", mapped(0)?)),
        "shared_ptr" | "unique_ptr" => mapped(0),
        "pair" | "tuple" => {
            let items: Vec<String> = args.iter().map(|arg| map_type(arg)).collect();
            Some(format!("Tuple[{}]", items.join(", ")))
        }
        "function" => Some(map_function_type(args.first()?)),
        "complex" => Some("complex".to_string()),
        "basic_string" | "basic_string_view" => Some("str".to_string()),
        _ => None,
    }
}

/// Split `base<args...>` where the first `<` closes at the final `>`.
fn split_specialization(ty: &str) -> Option<(&str, Vec<&str>)> {
    let open = ty.find('<')?;
    let inner = ty.strip_suffix('>')?.get(open + 1..)?;

    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }

    Some((ty[..open].trim_end(), split_top_level(inner)))
}

/// The template name when `base` is unqualified or lives in `std`.
fn standard_template_name(base: &str) -> Option<&str> {
    let name = short_name(base);
    let scope = base[..base.len() - name.len()].trim_end_matches("::");

    if scope.is_empty() || scope == "std" || scope.starts_with("std::") {
        Some(name)
    } else {
        None
    }
}

/// Map a function type `R(A, B)` to `Callable[[A, B], R]`.
fn map_function_type(proto: &str) -> String {
    let Some(open) = top_level_paren(proto) else {
        return "Callable".to_string();
    };
    let Some(params) = proto[open + 1..].trim_end().strip_suffix(')') else {
        return "Callable".to_string();
    };

    let return_type = map_type(&proto[..open]);
    let params: Vec<String> = split_top_level(params)
        .into_iter()
        .filter(|param| *param != "void")
        .map(map_type)
        .collect();

    format!("Callable[[{}], {}]", params.join(", "), return_type)
}

/// Position of the first `(` outside template arguments.
fn top_level_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            '(' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
