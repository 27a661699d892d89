//! Filtering declaration sightings into the model.
//!
//! One [`DeclarationCollector`] is created per analyzed unit. It is fed every
//! sighting in traversal order, keeps the ones written by the user, and hands
//! the accumulated [`UnitResult`] back by value from [`DeclarationCollector::finalize`].

use crate::model::{
    CallableSignature, Function, HeaderReference, Member, QualifiedName, TypeEntity, UnitResult,
};
use crate::sighting::{
    Access, DeclarationSighting, EnumeratorSighting, FieldSighting, FunctionSighting,
    IncludeSighting, ParameterSighting, Region, SightingKind, TemplateArgument, TypeSpelling,
    UnitSightings,
};
use std::fmt;
use std::path::Path;

/// Qualified-name prefixes reserved for the implementation.
const RESERVED_PREFIXES: &[&str] = &["std", "__"];

/// Extensions that mark an input file as a header.
const HEADER_EXTENSIONS: &[&str] = &[".h", ".hpp", ".hxx"];

/// Elaborated type keywords dropped from type spellings.
const ELABORATED_KEYWORDS: &[&str] = &["struct ", "class ", "enum ", "union "];

/// Template name of the recognized callable wrapper.
const CALLABLE_WRAPPER: &str = "function";

/// Why a sighting was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Qualified name starts with a reserved prefix (`std`, `__`).
    ReservedPrefix,
    /// Qualified name is empty.
    EmptyName,
    /// Compiler-synthesized declaration.
    Implicit,
    /// Not the first redeclaration.
    Redeclaration,
    /// Location is missing or does not name a file and line.
    InvalidLocation,
    /// Location lies in a system header.
    SystemRegion,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::ReservedPrefix => write!(f, "reserved prefix"),
            ExclusionReason::EmptyName => write!(f, "empty name"),
            ExclusionReason::Implicit => write!(f, "implicit"),
            ExclusionReason::Redeclaration => write!(f, "redeclaration"),
            ExclusionReason::InvalidLocation => write!(f, "invalid location"),
            ExclusionReason::SystemRegion => write!(f, "system region"),
        }
    }
}

/// Outcome of observing one sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The sighting produced a new entity.
    Collected,
    /// The sighting was filtered out.
    Discarded(ExclusionReason),
}

/// Decide whether a sighting belongs to non-user code.
///
/// Returns the first matching reason, or `None` when the sighting is kept.
pub fn exclusion_reason(sighting: &DeclarationSighting) -> Option<ExclusionReason> {
    let name = sighting.qualified_name.as_str();

    if RESERVED_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
        return Some(ExclusionReason::ReservedPrefix);
    }
    if name.is_empty() {
        return Some(ExclusionReason::EmptyName);
    }
    if sighting.is_implicit {
        return Some(ExclusionReason::Implicit);
    }
    if !sighting.is_first_declaration {
        return Some(ExclusionReason::Redeclaration);
    }

    match &sighting.location {
        Some(location) if !location.is_valid() => Some(ExclusionReason::InvalidLocation),
        None => Some(ExclusionReason::InvalidLocation),
        Some(location) if location.region == Region::System => Some(ExclusionReason::SystemRegion),
        Some(_) => None,
    }
}

/// Collects the user declarations of one analyzed unit.
#[derive(Debug, Default)]
pub struct DeclarationCollector {
    types: Vec<TypeEntity>,
    functions: Vec<Function>,
    headers: Vec<HeaderReference>,
}

impl DeclarationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect a whole unit report in one call.
    pub fn collect(unit: &UnitSightings) -> UnitResult {
        let mut collector = Self::new();
        collector.begin_unit(&unit.main_file);

        for include in &unit.includes {
            collector.observe_include(include);
        }
        for sighting in &unit.declarations {
            collector.observe(sighting);
        }

        collector.finalize()
    }

    /// Record the main file of the unit.
    ///
    /// A header passed directly as input becomes a user header reference, so the
    /// bindings include it.
    pub fn begin_unit(&mut self, main_file: &str) {
        let file_name = Path::new(main_file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(main_file);

        if HEADER_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext)) {
            tracing::debug!(header = file_name, "input file is a header");
            self.headers.push(HeaderReference {
                name: file_name.to_string(),
                full_path: main_file.to_string(),
                is_system: false,
                is_input_file: true,
            });
        }
    }

    /// Record a direct include of the main file.
    pub fn observe_include(&mut self, include: &IncludeSighting) {
        self.headers.push(HeaderReference {
            name: include.name.clone(),
            full_path: include.full_path.clone(),
            is_system: include.region == Region::System,
            is_input_file: false,
        });
    }

    /// Consume one declaration sighting.
    pub fn observe(&mut self, sighting: &DeclarationSighting) -> Observation {
        if let Some(reason) = exclusion_reason(sighting) {
            tracing::trace!(name = %sighting.qualified_name, %reason, "discarding declaration");
            return Observation::Discarded(reason);
        }

        let name = QualifiedName::new(&sighting.plain_name, &sighting.qualified_name)
            .with_namespace(sighting.namespace.clone());

        match &sighting.kind {
            SightingKind::Record { fields } => self.types.push(record_entity(name, fields)),
            SightingKind::Enum {
                integer_type,
                enumerators,
            } => self.types.push(enum_entity(name, integer_type, enumerators)),
            SightingKind::Function(function) => {
                self.functions.push(function_entity(name, sighting.namespace.clone(), function))
            }
        }

        Observation::Collected
    }

    /// Hand back everything collected for this unit.
    pub fn finalize(self) -> UnitResult {
        UnitResult {
            types: self.types,
            functions: self.functions,
            headers: self.headers,
        }
    }
}

fn record_entity(name: QualifiedName, fields: &[FieldSighting]) -> TypeEntity {
    let members = fields
        .iter()
        .map(|field| Member {
            is_public: field.access == Access::Public,
            ..typed_member(&field.ty, &field.name, &field.qualified_name)
        })
        .collect();

    TypeEntity {
        name,
        is_enum: false,
        members,
    }
}

fn enum_entity(
    name: QualifiedName,
    integer_type: &TypeSpelling,
    enumerators: &[EnumeratorSighting],
) -> TypeEntity {
    let members = enumerators
        .iter()
        .map(|enumerator| Member {
            ty: QualifiedName::new(&integer_type.spelling, &integer_type.canonical),
            name: QualifiedName::new(&enumerator.name, &enumerator.qualified_name),
            value: enumerator.value,
            is_public: true,
            ..Member::default()
        })
        .collect();

    TypeEntity {
        name,
        is_enum: true,
        members,
    }
}

fn function_entity(
    name: QualifiedName,
    namespace: Option<String>,
    function: &FunctionSighting,
) -> Function {
    let owner = function.owner.as_ref().map(|owner| {
        QualifiedName::new(&owner.plain_name, &owner.qualified_name)
            .with_namespace(owner.namespace.clone())
    });

    Function {
        name,
        return_type: QualifiedName::new(
            &function.return_type.spelling,
            &function.return_type.canonical,
        ),
        namespace,
        is_member_function: owner.is_some(),
        is_pure_virtual: function.is_pure_virtual,
        is_static: function.is_static,
        owner,
        parameters: function.parameters.iter().map(parameter_member).collect(),
    }
}

fn parameter_member(parameter: &ParameterSighting) -> Member {
    let mut member = typed_member(&parameter.ty, &parameter.name, &parameter.qualified_name);
    member.is_public = true;

    if let Some(signature) = callable_signature(&parameter.ty) {
        member.is_functional = true;
        member.signatures = vec![signature];
    }

    member
}

fn typed_member(ty: &TypeSpelling, name: &str, qualified_name: &str) -> Member {
    Member {
        ty: QualifiedName::new(&ty.spelling, &ty.canonical),
        name: QualifiedName::new(name, qualified_name),
        is_const: ty.is_const,
        is_pointer: ty.is_pointer,
        is_reference: ty.is_reference,
        ..Member::default()
    }
}

/// Decompose a `std::function<R(Args...)>` parameter type.
///
/// Only the single function-type argument of the wrapper is decomposed; a
/// wrapper nested inside it stays an opaque type spelling.
fn callable_signature(ty: &TypeSpelling) -> Option<CallableSignature> {
    let specialization = ty.specialization.as_ref()?;
    if specialization.template != CALLABLE_WRAPPER {
        return None;
    }

    let [TemplateArgument::FunctionProto {
        return_type,
        parameters,
    }] = specialization.arguments.as_slice()
    else {
        return None;
    };

    let parameters = parameters
        .iter()
        .map(|param| Member {
            ty: cleaned_name(param),
            is_const: param.is_const,
            is_pointer: param.is_pointer,
            is_reference: param.is_reference,
            is_public: true,
            ..Member::default()
        })
        .collect();

    Some(CallableSignature {
        return_type: cleaned_name(return_type),
        parameters,
    })
}

fn cleaned_name(ty: &TypeSpelling) -> QualifiedName {
    QualifiedName::new(
        strip_elaborated_keyword(&ty.spelling),
        strip_elaborated_keyword(&ty.canonical),
    )
}

/// Remove a leading `struct `, `class `, `enum ` or `union ` keyword.
pub fn strip_elaborated_keyword(spelling: &str) -> &str {
    ELABORATED_KEYWORDS
        .iter()
        .find_map(|keyword| spelling.strip_prefix(keyword))
        .unwrap_or(spelling)
}
