//! Declaration sightings reported by the AST Provider.
//!
//! The frontend walks one translation unit and reports every declaration it
//! sees, plus the `#include` directives that appear lexically in the main
//! file. These types are the wire format of that report: they deserialize from
//! the JSON document the frontend writes and are consumed wholesale by the
//! [`DeclarationCollector`](crate::DeclarationCollector).

use crate::error::{SightingError, SightingResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the AST Provider reported for one analyzed unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitSightings {
    /// Path of the main file of the unit.
    #[serde(default)]
    pub main_file: String,

    /// Declarations in traversal order.
    #[serde(default)]
    pub declarations: Vec<DeclarationSighting>,

    /// Direct includes of the main file, in lexical order.
    #[serde(default)]
    pub includes: Vec<IncludeSighting>,
}

impl UnitSightings {
    /// Parse a sightings document from JSON text.
    pub fn from_json(content: &str) -> SightingResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a sightings document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> SightingResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SightingError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}

/// Which part of the source tree a location belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Code written by the user.
    #[default]
    User,
    /// System headers (standard library, SDKs).
    System,
}

/// Source location of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    #[serde(default)]
    pub region: Region,
}

impl SourceLocation {
    /// A location is valid when it names a file and a line.
    pub fn is_valid(&self) -> bool {
        !self.file.is_empty() && self.line > 0
    }
}

/// A single declaration reported by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarationSighting {
    /// Fully scope-prefixed name, as printed by the frontend.
    pub qualified_name: String,

    /// Unqualified name.
    pub plain_name: String,

    /// Name of the directly enclosing namespace, if the parent scope is one.
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub location: Option<SourceLocation>,

    /// Compiler-synthesized declaration.
    #[serde(default)]
    pub is_implicit: bool,

    /// Canonical first redeclaration.
    #[serde(default = "default_true")]
    pub is_first_declaration: bool,

    #[serde(flatten)]
    pub kind: SightingKind,
}

fn default_true() -> bool {
    true
}

/// The declaration-specific part of a sighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SightingKind {
    /// A struct or class.
    Record {
        #[serde(default)]
        fields: Vec<FieldSighting>,
    },

    /// An enumeration.
    Enum {
        integer_type: TypeSpelling,
        #[serde(default)]
        enumerators: Vec<EnumeratorSighting>,
    },

    /// A free function or a method.
    Function(FunctionSighting),
}

/// A data member of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSighting {
    pub name: String,
    #[serde(default)]
    pub qualified_name: String,
    #[serde(rename = "type")]
    pub ty: TypeSpelling,
    #[serde(default)]
    pub access: Access,
}

/// Declared accessibility of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

/// One enumerator with its extended integer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumeratorSighting {
    pub name: String,
    #[serde(default)]
    pub qualified_name: String,
    pub value: i64,
}

/// Function-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSighting {
    pub return_type: TypeSpelling,

    #[serde(default)]
    pub parameters: Vec<ParameterSighting>,

    /// The class a method belongs to. Absent for free functions.
    #[serde(default)]
    pub owner: Option<OwnerSighting>,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_pure_virtual: bool,
}

/// Name of the record that declares a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSighting {
    pub plain_name: String,
    pub qualified_name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSighting {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qualified_name: String,
    #[serde(rename = "type")]
    pub ty: TypeSpelling,
}

/// A type as spelled in source plus its canonical form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSpelling {
    /// The type as written (`std::string`, `const A &`).
    pub spelling: String,

    /// The canonical type (`std::basic_string<char>`).
    #[serde(default)]
    pub canonical: String,

    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_pointer: bool,
    #[serde(default)]
    pub is_reference: bool,

    /// Set when the type is a class template specialization.
    #[serde(default)]
    pub specialization: Option<Specialization>,
}

impl TypeSpelling {
    /// A plain spelling with no qualifiers, canonical form equal to the spelling.
    pub fn named(spelling: impl Into<String>) -> Self {
        let spelling = spelling.into();
        Self {
            canonical: spelling.clone(),
            spelling,
            ..Self::default()
        }
    }
}

/// Template name and arguments of a specialization such as `std::function<int(double)>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    /// Unqualified template name (`function`, `vector`).
    pub template: String,
    #[serde(default)]
    pub arguments: Vec<TemplateArgument>,
}

/// A template argument of a specialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateArgument {
    /// An ordinary type argument.
    Type { ty: TypeSpelling },

    /// A function type such as `int(std::string, double)`.
    FunctionProto {
        return_type: TypeSpelling,
        #[serde(default)]
        parameters: Vec<TypeSpelling>,
    },

    /// Non-type or pack arguments.
    Other,
}

/// A direct `#include` of the main file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeSighting {
    /// Name as written between the delimiters.
    pub name: String,
    /// Resolved path, empty when the file was not found.
    #[serde(default)]
    pub full_path: String,
    #[serde(default)]
    pub region: Region,
}

#[cfg(test)]
#[path = "sighting/sighting_tests.rs"]
mod sighting_tests;
