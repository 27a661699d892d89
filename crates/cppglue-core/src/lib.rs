//! cppglue-core - Declaration model, collection, and aggregation
//!
//! This crate provides the first stage of the binding pipeline:
//! - [`UnitSightings`] and friends, the declaration report of the AST Provider
//! - [`DeclarationCollector`] to filter one unit's sightings into a [`UnitResult`]
//! - [`ModelAggregator`] to merge unit results into a closed [`BindingModel`]

mod aggregator;
mod collector;
mod error;
mod model;
mod sighting;

pub use aggregator::{DuplicatePolicy, ModelAggregator};
pub use collector::{
    DeclarationCollector, ExclusionReason, Observation, exclusion_reason, strip_elaborated_keyword,
};
pub use error::{SightingError, SightingResult};
pub use model::{
    BindingModel, CallableSignature, Function, HeaderReference, Member, QualifiedName, TypeEntity,
    UnitResult,
};
pub use sighting::{
    Access, DeclarationSighting, EnumeratorSighting, FieldSighting, FunctionSighting,
    IncludeSighting, OwnerSighting, ParameterSighting, Region, SightingKind, SourceLocation,
    Specialization, TemplateArgument, TypeSpelling, UnitSightings,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BindingModel, DeclarationCollector, DuplicatePolicy, Function, HeaderReference, Member,
        ModelAggregator, QualifiedName, TypeEntity, UnitResult, UnitSightings,
    };
}
