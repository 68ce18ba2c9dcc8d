//! Usage statistics over the dependencies of an analysis.

use indexmap::IndexMap;
use serde::Serialize;

use depscope_core::{DependencyClass, ResolvedFile};

/// Distinct dependency counts per class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    internal: usize,
    external: usize,
    builtin: usize,
}

impl ClassCounts {
    pub fn internal(&self) -> usize {
        self.internal
    }

    pub fn external(&self) -> usize {
        self.external
    }

    pub fn builtin(&self) -> usize {
        self.builtin
    }

    fn count(&mut self, class: DependencyClass) {
        match class {
            DependencyClass::Internal => self.internal += 1,
            DependencyClass::External => self.external += 1,
            DependencyClass::Builtin => self.builtin += 1,
        }
    }
}

/// One distinct dependency and the files that use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyUsage {
    name: String,
    class: DependencyClass,
    used_in: Vec<String>,
}

impl DependencyUsage {
    /// The resolved path of an internal dependency, otherwise its token.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> DependencyClass {
        self.class
    }

    pub fn used_in(&self) -> &[String] {
        &self.used_in
    }
}

/// Totals and per-dependency usage over a set of resolved files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencySummary {
    total_files: usize,
    total_dependencies: usize,
    total_imports: usize,
    by_class: ClassCounts,
    dependencies: Vec<DependencyUsage>,
}

impl DependencySummary {
    /// Summarizes `files`.
    ///
    /// Dependencies are keyed by their graph target, falling back to the
    /// token for unresolved internal references, and sorted by the number
    /// of files using them, most used first. Ties keep first-seen order.
    pub fn from_files(files: &[ResolvedFile]) -> Self {
        let mut usages: IndexMap<&str, DependencyUsage> = IndexMap::new();
        let mut total_imports = 0;

        for file in files {
            for dependency in file.dependencies() {
                total_imports += 1;
                let name = dependency.target().unwrap_or(dependency.token());
                usages
                    .entry(name)
                    .or_insert_with(|| DependencyUsage {
                        name: name.to_string(),
                        class: dependency.class(),
                        used_in: Vec::new(),
                    })
                    .used_in
                    .push(file.path().to_string());
            }
        }

        let mut dependencies: Vec<DependencyUsage> = usages.into_values().collect();
        dependencies.sort_by(|a, b| b.used_in.len().cmp(&a.used_in.len()));

        let mut by_class = ClassCounts::default();
        for usage in &dependencies {
            by_class.count(usage.class);
        }

        Self {
            total_files: files.len(),
            total_dependencies: dependencies.len(),
            total_imports,
            by_class,
            dependencies,
        }
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    /// Number of distinct dependencies.
    pub fn total_dependencies(&self) -> usize {
        self.total_dependencies
    }

    /// Number of dependency records over all files.
    pub fn total_imports(&self) -> usize {
        self.total_imports
    }

    pub fn by_class(&self) -> ClassCounts {
        self.by_class
    }

    pub fn dependencies(&self) -> &[DependencyUsage] {
        &self.dependencies
    }
}
