//! Name-keyed colormap registry with soft-failing directory loading.
//!
//! The registry owns every `Colormap` it creates and is the single
//! authority for name lookup. Directory loading never aborts the process:
//! each failure is reported as a typed [`LoadIssue`] and the remaining
//! files keep loading.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::colormap::Colormap;
use crate::parse::{self, ParseError};

/// Embedded builtin colormap sources, stem → file contents.
const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("graphite", include_str!("../assets/graphite.csv")),
    ("reflectivity", include_str!("../assets/reflectivity.csv")),
    ("relief", include_str!("../assets/relief.txt")),
    ("velocity", include_str!("../assets/velocity.csv")),
];

/// A non-fatal problem encountered while loading a colormap directory.
///
/// Every issue corresponds to exactly one skipped unit of work: the whole
/// scan for `DirUnreadable`, one file otherwise.
#[derive(Debug, thiserror::Error)]
pub enum LoadIssue {
    #[error("cannot list colormap directory {path}: {source}")]
    DirUnreadable { path: PathBuf, source: io::Error },
    #[error("cannot read {path}: {source}")]
    FileUnreadable { path: PathBuf, source: io::Error },
    #[error("cannot parse {path}: {source}")]
    FileInvalid { path: PathBuf, source: ParseError },
    #[error("{path}: name `{name}` is already registered")]
    NameCollision { path: PathBuf, name: String },
}

/// Rejected registration: the name is already taken.
#[derive(Debug, thiserror::Error)]
#[error("colormap `{name}` is already registered")]
pub struct NameCollision {
    pub name: String,
}

/// Insertion-ordered store of named colormaps.
#[derive(Debug, Default)]
pub struct ColormapRegistry {
    entries: Vec<Colormap>,
    index: HashMap<String, usize>,
}

impl ColormapRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the embedded builtin colormaps and their
    /// reversed variants.
    ///
    /// # Panics
    /// Panics if an embedded asset fails to parse or the builtin names
    /// collide. The assets are compile-time fixed and covered by tests, so
    /// either condition is a bug in this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, src) in BUILTIN_SOURCES {
            let samples = parse::parse_samples(src)
                .unwrap_or_else(|e| panic!("embedded colormap `{name}` is malformed: {e}"));
            registry
                .register_pair(Colormap::new(*name, samples))
                .unwrap_or_else(|e| panic!("embedded colormap names collide: {e}"));
        }
        registry
    }

    /// Build a fresh registry from a directory scan.
    ///
    /// Equivalent to [`new`](Self::new) followed by
    /// [`extend_from_dir`](Self::extend_from_dir).
    pub fn load_dir(dir: impl AsRef<Path>) -> (Self, Vec<LoadIssue>) {
        let mut registry = Self::new();
        let issues = registry.extend_from_dir(dir);
        (registry, issues)
    }

    /// Scan `dir` for colormap source files and register a
    /// forward/reversed pair per parsed file.
    ///
    /// Soft-failing: an unreadable directory yields a single
    /// [`LoadIssue::DirUnreadable`] and leaves the registry as it was;
    /// unreadable or unparseable files are skipped one by one. Entries
    /// whose extension is not in [`parse::DATA_EXTENSIONS`] are ignored
    /// silently, as are entries without a UTF-8 stem. On a name collision
    /// the earlier registration wins and the whole file is skipped, so a
    /// half-registered pair never occurs.
    pub fn extend_from_dir(&mut self, dir: impl AsRef<Path>) -> Vec<LoadIssue> {
        let dir = dir.as_ref();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(source) => {
                let issue = LoadIssue::DirUnreadable {
                    path: dir.to_path_buf(),
                    source,
                };
                tracing::warn!("{issue}");
                return vec![issue];
            }
        };

        let mut issues = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let issue = LoadIssue::DirUnreadable {
                        path: dir.to_path_buf(),
                        source,
                    };
                    tracing::warn!("{issue}");
                    issues.push(issue);
                    continue;
                }
            };
            let path = entry.path();
            let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !parse::DATA_EXTENSIONS.contains(&extension) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let src = match fs::read_to_string(&path) {
                Ok(src) => src,
                Err(source) => {
                    let issue = LoadIssue::FileUnreadable { path, source };
                    tracing::warn!("{issue}");
                    issues.push(issue);
                    continue;
                }
            };
            let samples = match parse::parse_samples(&src) {
                Ok(samples) => samples,
                Err(source) => {
                    let issue = LoadIssue::FileInvalid { path, source };
                    tracing::warn!("{issue}");
                    issues.push(issue);
                    continue;
                }
            };

            match self.register_pair(Colormap::new(stem, samples)) {
                Ok(()) => {
                    tracing::debug!("registered `{stem}` and `{stem}_r` from {}", path.display());
                }
                Err(NameCollision { name }) => {
                    let issue = LoadIssue::NameCollision { path, name };
                    tracing::warn!("{issue}");
                    issues.push(issue);
                }
            }
        }
        issues
    }

    /// Register a single colormap under its exact name.
    pub fn register(&mut self, cmap: Colormap) -> Result<(), NameCollision> {
        if self.index.contains_key(cmap.name()) {
            return Err(NameCollision {
                name: cmap.name().to_owned(),
            });
        }
        self.index.insert(cmap.name().to_owned(), self.entries.len());
        self.entries.push(cmap);
        Ok(())
    }

    /// Register a colormap and its reversed variant.
    ///
    /// Both names are checked before either is inserted, so a rejected
    /// pair leaves the registry untouched.
    pub fn register_pair(&mut self, cmap: Colormap) -> Result<(), NameCollision> {
        let reversed = cmap.reversed();
        for name in [cmap.name(), reversed.name()] {
            if self.index.contains_key(name) {
                return Err(NameCollision {
                    name: name.to_owned(),
                });
            }
        }
        self.register(cmap)?;
        self.register(reversed)
    }

    /// Registered names in registration order.
    ///
    /// With `include_reversed = false`, names carrying the reversed
    /// suffix are filtered out.
    pub fn names(&self, include_reversed: bool) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|cmap| include_reversed || !cmap.is_reversed())
            .map(Colormap::name)
            .collect()
    }

    /// Exact-name lookup. Absence is `None`, never a panic.
    pub fn get(&self, name: &str) -> Option<&Colormap> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// All registered colormaps in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Colormap> {
        self.entries.iter()
    }

    /// Number of registered colormaps, reversed variants included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    fn sample_map(name: &str) -> Colormap {
        Colormap::new(
            name,
            vec![[1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]],
        )
    }

    fn write_source(dir: &Path, file: &str, body: &str) {
        fs::write(dir.join(file), body).unwrap();
    }

    const VALID_SOURCE: &str = "demo colormap\n# R,G,B\n1,0,0\n0,1,0\n0,0,1\n";

    #[test]
    fn test_register_and_get() {
        let mut registry = ColormapRegistry::new();
        registry.register(sample_map("ember")).unwrap();
        assert_eq!(registry.get("ember").unwrap().name(), "ember");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_register_rejects_collision() {
        let mut registry = ColormapRegistry::new();
        registry.register(sample_map("ember")).unwrap();
        let err = registry.register(sample_map("ember")).unwrap_err();
        assert_eq!(err.name, "ember");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_pair_adds_both_variants() {
        let mut registry = ColormapRegistry::new();
        registry.register_pair(sample_map("ember")).unwrap();
        assert_eq!(registry.names(true), vec!["ember", "ember_r"]);
        assert_eq!(registry.names(false), vec!["ember"]);

        let forward = registry.get("ember").unwrap();
        let reversed = registry.get("ember_r").unwrap();
        let mut expected: Vec<[f32; 4]> = forward.samples().to_vec();
        expected.reverse();
        assert_eq!(reversed.samples(), expected.as_slice());
    }

    #[test]
    fn test_register_pair_collision_leaves_registry_untouched() {
        let mut registry = ColormapRegistry::new();
        registry.register(sample_map("ember_r")).unwrap();
        let err = registry.register_pair(sample_map("ember")).unwrap_err();
        assert_eq!(err.name, "ember_r");
        assert!(registry.get("ember").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_preserve_registration_order() {
        let mut registry = ColormapRegistry::new();
        registry.register_pair(sample_map("tide")).unwrap();
        registry.register_pair(sample_map("ember")).unwrap();
        assert_eq!(registry.names(false), vec!["tide", "ember"]);
        assert_eq!(registry.names(true), vec!["tide", "tide_r", "ember", "ember_r"]);
    }

    #[test]
    fn test_load_dir_registers_pairs() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), "foo.csv", VALID_SOURCE);

        let (registry, issues) = ColormapRegistry::load_dir(dir.path());
        assert!(issues.is_empty());
        assert_eq!(registry.names(false), vec!["foo"]);

        let forward = registry.get("foo").unwrap();
        assert_eq!(
            forward.samples(),
            &[
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
            ]
        );
        let reversed = registry.get("foo_r").unwrap();
        assert_eq!(
            reversed.samples(),
            &[
                [0.0, 0.0, 1.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 1.0],
            ]
        );
    }

    #[test]
    fn test_load_dir_missing_directory_is_soft() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let (registry, issues) = ColormapRegistry::load_dir(&missing);
        assert!(registry.is_empty());
        assert!(registry.names(true).is_empty());
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], LoadIssue::DirUnreadable { .. }));
    }

    #[test]
    fn test_load_dir_skips_bad_file_keeps_others() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), "good.csv", VALID_SOURCE);
        write_source(dir.path(), "bad.csv", "no marker here\n1,2,3\n");

        let (registry, issues) = ColormapRegistry::load_dir(dir.path());
        assert_eq!(registry.names(false), vec!["good"]);
        assert_eq!(issues.len(), 1);
        match &issues[0] {
            LoadIssue::FileInvalid { path, source } => {
                assert!(path.ends_with("bad.csv"));
                assert!(matches!(source, ParseError::MissingMarker));
            }
            other => panic!("unexpected issue: {other}"),
        }
    }

    #[test]
    fn test_load_dir_ignores_unknown_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), "foo.csv", VALID_SOURCE);
        write_source(dir.path(), "notes.md", "not a colormap");
        write_source(dir.path(), "raw.dat", "also not");

        let (registry, issues) = ColormapRegistry::load_dir(dir.path());
        assert!(issues.is_empty());
        assert_eq!(registry.names(false), vec!["foo"]);
    }

    #[test]
    fn test_load_dir_duplicate_stem_first_wins() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), "foo.csv", VALID_SOURCE);
        write_source(dir.path(), "foo.txt", "other\n# R,G,B\n9,9,9\n");

        let (registry, issues) = ColormapRegistry::load_dir(dir.path());
        // Iteration order decides which file wins; either way exactly one
        // pair survives and the other file reports a collision.
        assert_eq!(registry.names(false), vec!["foo"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], LoadIssue::NameCollision { .. }));
    }

    #[test]
    fn test_load_dir_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), "foo.csv", VALID_SOURCE);
        write_source(dir.path(), "bar.csv", "other\n# R,G,B\n0,0,255\n255,0,0\n");

        let (first, _) = ColormapRegistry::load_dir(dir.path());
        let (second, _) = ColormapRegistry::load_dir(dir.path());

        let first_names: BTreeSet<_> = first.names(true).into_iter().collect();
        let second_names: BTreeSet<_> = second.names(true).into_iter().collect();
        assert_eq!(first_names, second_names);
        for name in first_names {
            assert_eq!(
                first.get(name).unwrap().samples(),
                second.get(name).unwrap().samples()
            );
        }
    }

    #[test]
    fn test_builtin_assets_all_parse() {
        for (name, src) in BUILTIN_SOURCES {
            let samples = parse::parse_samples(src)
                .unwrap_or_else(|e| panic!("asset `{name}` failed to parse: {e}"));
            for sample in &samples {
                for channel in sample {
                    assert!(
                        (0.0..=1.0).contains(channel),
                        "asset `{name}` channel out of range: {channel}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_builtin_registry_has_paired_variants() {
        let registry = ColormapRegistry::builtin();
        assert!(!registry.is_empty());
        for name in registry.names(false) {
            let reversed = format!("{name}_r");
            assert!(
                registry.get(&reversed).is_some(),
                "missing reversed variant for `{name}`"
            );
        }
        assert_eq!(registry.names(true).len(), registry.names(false).len() * 2);
    }
}
