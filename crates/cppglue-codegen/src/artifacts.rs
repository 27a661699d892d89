//! Output artifact layout and assembly.
//!
//! For module `M` in output directory `O`:
//!
//! ```text
//! O/M.cpp                 bindings
//! O/CMakeLists.txt        build descriptor
//! O/cmake/CPM.cmake       vendored package manager bootstrap
//! O/M/setup.py            packaging
//! O/M/pyproject.toml      packaging
//! O/M/M/__init__.py       re-export shim
//! O/M/M/M.pyi             type stub
//! ```

use crate::error::{CodegenError, CodegenResult};
use crate::scaffold::Scaffold;
use crate::stub::{render_init, render_stub};
use cppglue_core::BindingModel;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Where each artifact of a module lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub bindings: PathBuf,
    pub cmake_lists: PathBuf,
    pub cpm: PathBuf,
    pub setup_py: PathBuf,
    pub pyproject: PathBuf,
    pub init_py: PathBuf,
    pub stub: PathBuf,
}

impl ArtifactPaths {
    pub fn new(output_dir: &Path, module: &str) -> Self {
        let project = output_dir.join(module);
        let package = project.join(module);

        Self {
            bindings: output_dir.join(format!("{module}.cpp")),
            cmake_lists: output_dir.join("CMakeLists.txt"),
            cpm: output_dir.join("cmake").join("CPM.cmake"),
            setup_py: project.join("setup.py"),
            pyproject: project.join("pyproject.toml"),
            init_py: package.join("__init__.py"),
            stub: package.join(format!("{module}.pyi")),
        }
    }
}

/// Rendered stub and package shim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFiles {
    pub stub: String,
    pub init_py: String,
}

impl StubFiles {
    pub fn render(model: &BindingModel, module: &str) -> Self {
        Self {
            stub: render_stub(model, module),
            init_py: render_init(model, module),
        }
    }
}

/// One file to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

/// Artifacts of a run, each path at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
    paths: HashSet<PathBuf>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact, rejecting a second artifact for the same path.
    pub fn push(&mut self, path: PathBuf, content: String) -> CodegenResult<()> {
        if !self.paths.insert(path.clone()) {
            return Err(CodegenError::DuplicateArtifact(path));
        }
        self.artifacts.push(Artifact { path, content });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn into_vec(self) -> Vec<Artifact> {
        self.artifacts
    }

    /// Assemble the emitter outputs into their destination paths.
    pub fn assemble(
        paths: &ArtifactPaths,
        bindings: String,
        stubs: StubFiles,
        scaffold: Scaffold,
    ) -> CodegenResult<Self> {
        let mut set = Self::new();
        set.push(paths.bindings.clone(), bindings)?;
        set.push(paths.cmake_lists.clone(), scaffold.cmake_lists)?;
        set.push(paths.cpm.clone(), scaffold.cpm)?;
        set.push(paths.setup_py.clone(), scaffold.setup_py)?;
        set.push(paths.pyproject.clone(), scaffold.pyproject)?;
        set.push(paths.init_py.clone(), stubs.init_py)?;
        set.push(paths.stub.clone(), stubs.stub)?;
        Ok(set)
    }
}
