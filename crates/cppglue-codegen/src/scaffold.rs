//! Build scaffold generation from placeholder templates.
//!
//! Four templates make up the scaffold: the CMake build descriptor, the
//! vendored CPM.cmake bootstrap, and the two Python packaging files. The
//! defaults are embedded in the binary; a template directory can replace them.

use crate::error::{CodegenError, CodegenResult};
use cppglue_core::BindingModel;
use std::collections::BTreeSet;
use std::path::Path;

// ============================================================================
// Embedded Templates
// ============================================================================

mod templates {
    pub const CMAKE_LISTS: &str = include_str!("../templates/CMakeLists.txt.tmpl");
    pub const CPM: &str = include_str!("../templates/CPM.cmake");
    pub const SETUP_PY: &str = include_str!("../templates/setup.py.tmpl");
    pub const PYPROJECT: &str = include_str!("../templates/pyproject.toml.tmpl");
}

/// One of the scaffold templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    CMakeLists,
    Cpm,
    SetupPy,
    Pyproject,
}

impl TemplateKind {
    /// Name of the rendered artifact.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::CMakeLists => "CMakeLists.txt",
            TemplateKind::Cpm => "CPM.cmake",
            TemplateKind::SetupPy => "setup.py",
            TemplateKind::Pyproject => "pyproject.toml",
        }
    }

    /// File name of the template inside a template directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::CMakeLists => "CMakeLists.txt.tmpl",
            TemplateKind::Cpm => "CPM.cmake",
            TemplateKind::SetupPy => "setup.py.tmpl",
            TemplateKind::Pyproject => "pyproject.toml.tmpl",
        }
    }

    fn embedded(&self) -> &'static str {
        match self {
            TemplateKind::CMakeLists => templates::CMAKE_LISTS,
            TemplateKind::Cpm => templates::CPM,
            TemplateKind::SetupPy => templates::SETUP_PY,
            TemplateKind::Pyproject => templates::PYPROJECT,
        }
    }
}

/// The template texts used for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    cmake_lists: String,
    cpm: String,
    setup_py: String,
    pyproject: String,
}

impl TemplateSet {
    /// The templates compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            cmake_lists: TemplateKind::CMakeLists.embedded().to_string(),
            cpm: TemplateKind::Cpm.embedded().to_string(),
            setup_py: TemplateKind::SetupPy.embedded().to_string(),
            pyproject: TemplateKind::Pyproject.embedded().to_string(),
        }
    }

    /// Load every template from `dir`.
    ///
    /// All four files must be present.
    pub fn from_dir(dir: &Path) -> CodegenResult<Self> {
        let load = |kind: TemplateKind| {
            let path = dir.join(kind.file_name());
            std::fs::read_to_string(&path).map_err(|source| CodegenError::TemplateUnreadable {
                name: kind.name().to_string(),
                path,
                source,
            })
        };

        tracing::debug!(dir = %dir.display(), "loading templates");

        Ok(Self {
            cmake_lists: load(TemplateKind::CMakeLists)?,
            cpm: load(TemplateKind::Cpm)?,
            setup_py: load(TemplateKind::SetupPy)?,
            pyproject: load(TemplateKind::Pyproject)?,
        })
    }

    pub fn get(&self, kind: TemplateKind) -> &str {
        match kind {
            TemplateKind::CMakeLists => &self.cmake_lists,
            TemplateKind::Cpm => &self.cpm,
            TemplateKind::SetupPy => &self.setup_py,
            TemplateKind::Pyproject => &self.pyproject,
        }
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::embedded()
    }
}

// ============================================================================
// Template Context
// ============================================================================

/// Values substituted into the templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    /// Replaces `{{module-name}}`.
    pub module_name: String,
    /// Replaces `{{version}}`.
    pub version: String,
}

impl TemplateContext {
    pub fn new(module_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            version: version.into(),
        }
    }

    /// Apply placeholder substitutions to template content.
    ///
    /// Fails if any `{{...}}` placeholder is left afterwards.
    pub fn apply(&self, template_name: &str, template: &str) -> CodegenResult<String> {
        let rendered = template
            .replace("{{module-name}}", &self.module_name)
            .replace("{{version}}", &self.version);

        match find_unresolved(&rendered) {
            Some(placeholder) => Err(CodegenError::UnresolvedPlaceholder {
                template: template_name.to_string(),
                placeholder: placeholder.to_string(),
            }),
            None => Ok(rendered),
        }
    }
}

/// The first `{{name}}` placeholder in `text`.
///
/// Only names made of letters, digits, `-` and `_` count, so brace-heavy
/// content such as `{{}}` is left alone.
pub fn find_unresolved(text: &str) -> Option<&str> {
    let mut rest = text;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        if let Some(end) = after.find("}}") {
            let name = &after[..end];
            if !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                let begin = offset + start;
                return Some(&text[begin..begin + end + 4]);
            }
        }
        offset += start + 2;
        rest = after;
    }
    None
}

// ============================================================================
// Scaffold
// ============================================================================

/// Rendered scaffold files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    pub cmake_lists: String,
    pub cpm: String,
    pub setup_py: String,
    pub pyproject: String,
}

/// Render every scaffold template for `model`.
pub fn render_scaffold(
    model: &BindingModel,
    templates: &TemplateSet,
    ctx: &TemplateContext,
) -> CodegenResult<Scaffold> {
    let render = |kind: TemplateKind| ctx.apply(kind.name(), templates.get(kind));

    let cmake_lists = render(TemplateKind::CMakeLists)?;
    let cmake_lists = annotate_dependencies(
        TemplateKind::CMakeLists.name(),
        &cmake_lists,
        &model.user_header_paths(),
    )?;

    Ok(Scaffold {
        cmake_lists,
        cpm: render(TemplateKind::Cpm)?,
        setup_py: render(TemplateKind::SetupPy)?,
        pyproject: render(TemplateKind::Pyproject)?,
    })
}

/// Insert the unresolved-dependency comment block directly after the `project(` line.
pub fn annotate_dependencies(
    template_name: &str,
    cmake: &str,
    header_paths: &BTreeSet<&str>,
) -> CodegenResult<String> {
    let lines: Vec<&str> = cmake.split_inclusive('\n').collect();
    let project_line = lines
        .iter()
        .position(|line| is_project_command(line))
        .ok_or_else(|| CodegenError::MissingProjectDeclaration(template_name.to_string()))?;

    let mut out = String::with_capacity(cmake.len() + 128);
    for line in &lines[..=project_line] {
        out.push_str(line);
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&dependency_block(header_paths));

    for line in &lines[project_line + 1..] {
        out.push_str(line);
    }
    Ok(out)
}

/// Whether `line` invokes the CMake `project` command, in any case and with
/// optional whitespace before the parenthesis.
fn is_project_command(line: &str) -> bool {
    let line = line.trim_start();
    line.get(..7)
        .is_some_and(|command| command.eq_ignore_ascii_case("project"))
        && line[7..].trim_start().starts_with('(')
}

fn dependency_block(header_paths: &BTreeSet<&str>) -> String {
    if header_paths.is_empty() {
        return "# Unresolved dependencies: none\n".to_string();
    }

    let mut block = String::from(
        "# Unresolved dependencies: user headers included by the generated bindings.\n\
         # Add their directories or libraries to the module target below.\n",
    );
    for path in header_paths {
        block.push_str(&format!("#   {path}\n"));
    }
    block
}
