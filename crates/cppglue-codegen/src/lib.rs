//! cppglue-codegen: artifact generation for cppglue
//!
//! This crate turns a finished [`BindingModel`](cppglue_core::BindingModel)
//! into the files of a buildable Python extension package:
//! - [`binding`]: the pybind11 module source
//! - [`stub`]: the `.pyi` stub and the package `__init__.py`
//! - [`scaffold`]: CMake and Python packaging files from templates
//! - [`materialize`]: compare-before-write output
//!
//! Every emitter reads the model and returns a string; nothing here mutates it.

pub mod artifacts;
pub mod binding;
pub mod error;
pub mod materialize;
pub mod naming;
pub mod scaffold;
pub mod stub;
pub mod type_map;

pub use artifacts::{Artifact, ArtifactPaths, ArtifactSet, StubFiles};
pub use binding::{describe, render_bindings};
pub use error::{CodegenError, CodegenResult};
pub use materialize::{MaterializeReport, Materializer, WriteOutcome};
pub use scaffold::{Scaffold, TemplateContext, TemplateKind, TemplateSet, render_scaffold};
pub use stub::{render_init, render_stub};
pub use type_map::map_type;
