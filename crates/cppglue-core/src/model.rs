//! The collected declaration model.
//!
//! Entities are built once by the [`DeclarationCollector`](crate::DeclarationCollector),
//! appended to the [`ModelAggregator`](crate::ModelAggregator), and read by the
//! emitters through a finished [`BindingModel`]. Nothing mutates an entity after
//! it has been collected.

use std::collections::BTreeSet;

/// A declaration name in its plain and fully qualified forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Unqualified name (`alpha`).
    pub plain: String,

    /// Fully scope-prefixed name (`n1::n2::alpha`). Identity key for cross-references.
    pub qualified: String,

    /// Directly enclosing namespace, when the parent scope is a namespace.
    pub namespace: Option<String>,
}

impl QualifiedName {
    /// Create a name without an enclosing namespace.
    pub fn new(plain: impl Into<String>, qualified: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            qualified: qualified.into(),
            namespace: None,
        }
    }

    /// Attach the enclosing namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    /// The name to use when referring to the declaration from generated C++.
    ///
    /// Falls back to the plain name when no qualified form was recorded.
    pub fn display(&self) -> &str {
        if self.qualified.is_empty() {
            &self.plain
        } else {
            &self.qualified
        }
    }

    pub fn has_namespace(&self) -> bool {
        self.namespace.is_some()
    }
}

/// A data member, enumerator, or parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Member {
    /// Type as spelled (`plain`) and in canonical form (`qualified`).
    pub ty: QualifiedName,
    pub name: QualifiedName,

    /// Enumerator value. Zero for anything that is not an enumerator.
    pub value: i64,

    pub is_const: bool,
    pub is_pointer: bool,
    pub is_reference: bool,
    pub is_public: bool,

    /// The member is a `std::function` parameter decomposed into `signatures`.
    pub is_functional: bool,

    /// Decomposed callable signatures. At most one entry.
    pub signatures: Vec<CallableSignature>,
}

impl Member {
    /// The type spelling to hand to the type mapper.
    pub fn type_spelling(&self) -> &str {
        if self.ty.plain.is_empty() {
            &self.ty.qualified
        } else {
            &self.ty.plain
        }
    }

    /// The decomposed signature of a functional parameter.
    pub fn signature(&self) -> Option<&CallableSignature> {
        if self.is_functional {
            self.signatures.first()
        } else {
            None
        }
    }
}

/// Return and parameter types of a callable wrapper's function type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallableSignature {
    pub return_type: QualifiedName,
    pub parameters: Vec<Member>,
}

/// A struct, class, or enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEntity {
    pub name: QualifiedName,
    pub is_enum: bool,

    /// Data members for records, enumerators for enumerations.
    pub members: Vec<Member>,
}

/// A free function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Function {
    pub name: QualifiedName,
    pub return_type: QualifiedName,
    pub namespace: Option<String>,
    pub is_member_function: bool,
    pub is_pure_virtual: bool,
    pub is_static: bool,

    /// The record declaring this method.
    pub owner: Option<QualifiedName>,

    pub parameters: Vec<Member>,
}

impl Function {
    /// Whether this function is a method of `entity`.
    ///
    /// Association is exact string equality of the qualified names.
    pub fn is_method_of(&self, entity: &TypeEntity) -> bool {
        self.owner
            .as_ref()
            .is_some_and(|owner| owner.qualified == entity.name.qualified)
    }

    /// The return type spelling to hand to the type mapper.
    pub fn return_spelling(&self) -> &str {
        if self.return_type.plain.is_empty() {
            &self.return_type.qualified
        } else {
            &self.return_type.plain
        }
    }
}

/// A direct inclusion seen in the root analyzed unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderReference {
    /// Name as written in the include directive.
    pub name: String,
    pub full_path: String,
    pub is_system: bool,

    /// The header was itself passed as an input file.
    pub is_input_file: bool,
}

/// The result of collecting one analyzed unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitResult {
    pub types: Vec<TypeEntity>,
    pub functions: Vec<Function>,
    pub headers: Vec<HeaderReference>,
}

impl UnitResult {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.functions.is_empty() && self.headers.is_empty()
    }
}

/// The closed model handed to the emitters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingModel {
    pub types: Vec<TypeEntity>,
    pub functions: Vec<Function>,
    pub headers: Vec<HeaderReference>,
}

impl BindingModel {
    /// Methods whose owner is exactly `entity`, in encounter order.
    pub fn methods_of<'a>(&'a self, entity: &'a TypeEntity) -> impl Iterator<Item = &'a Function> {
        self.functions.iter().filter(move |f| f.is_method_of(entity))
    }

    /// Functions that are not class members, in encounter order.
    pub fn free_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(|f| !f.is_member_function)
    }

    /// Records (non-enumeration types), in encounter order.
    pub fn records(&self) -> impl Iterator<Item = &TypeEntity> {
        self.types.iter().filter(|t| !t.is_enum)
    }

    /// Types with repeated qualified names dropped, first occurrence kept.
    ///
    /// A type can only be registered with the extension once, so the emitters
    /// read this rather than `types` directly.
    pub fn distinct_types(&self) -> impl Iterator<Item = &TypeEntity> {
        let mut seen = BTreeSet::new();
        self.types
            .iter()
            .filter(move |t| seen.insert(t.name.qualified.as_str()))
    }

    /// Methods whose owner matches no collected record.
    ///
    /// These are never emitted.
    pub fn orphaned_methods(&self) -> Vec<&Function> {
        let owners: BTreeSet<&str> = self.records().map(|t| t.name.qualified.as_str()).collect();

        self.functions
            .iter()
            .filter(|f| f.is_member_function)
            .filter(|f| match &f.owner {
                Some(owner) => !owners.contains(owner.qualified.as_str()),
                None => true,
            })
            .collect()
    }

    /// Plain names shared by types with different qualified names.
    ///
    /// The type mapper shortens names naively, so these collide in the stub.
    pub fn ambiguous_type_names(&self) -> Vec<String> {
        let mut seen: std::collections::BTreeMap<&str, BTreeSet<&str>> = Default::default();
        for entity in &self.types {
            seen.entry(entity.name.plain.as_str())
                .or_default()
                .insert(entity.name.qualified.as_str());
        }

        seen.into_iter()
            .filter(|(_, qualified)| qualified.len() > 1)
            .map(|(plain, _)| plain.to_string())
            .collect()
    }

    /// Unique user header names, sorted.
    pub fn user_headers(&self) -> BTreeSet<&str> {
        self.headers
            .iter()
            .filter(|h| !h.is_system)
            .map(|h| h.name.as_str())
            .collect()
    }

    /// Unique system header names, sorted.
    pub fn system_headers(&self) -> BTreeSet<&str> {
        self.headers
            .iter()
            .filter(|h| h.is_system)
            .map(|h| h.name.as_str())
            .collect()
    }

    /// Unique full paths of user headers, sorted.
    ///
    /// Headers without a resolved path are skipped.
    pub fn user_header_paths(&self) -> BTreeSet<&str> {
        self.headers
            .iter()
            .filter(|h| !h.is_system && !h.full_path.is_empty())
            .map(|h| h.full_path.as_str())
            .collect()
    }
}
