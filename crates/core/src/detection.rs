//! Main-class detection by superclass chain walking
//!
//! A plugin's entry point is the one class that extends the platform's marker
//! superclass (e.g. `org/bukkit/plugin/java/JavaPlugin`), directly or through
//! intermediate base classes. The scanner indexes every compiled class once,
//! then walks superclass chains with per-class memoization so shared ancestor
//! chains are only resolved once.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use globset::Glob;

use crate::classfile::{parse_class, ClassRecord};
use crate::types::{SpigletError, SpigletResult};

/// Read-only index of compiled classes, keyed by internal class name
#[derive(Debug, Default)]
pub struct ClassIndex {
    records: HashMap<String, ClassRecord>,
}

impl ClassIndex {
    pub fn from_records(records: impl IntoIterator<Item = ClassRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.name.clone(), record))
                .collect(),
        }
    }

    /// Build an index from every `.class` file under `root`
    pub fn from_dir(root: &Path) -> SpigletResult<Self> {
        if !root.is_dir() {
            return Err(SpigletError::Config(format!(
                "Classes directory {} does not exist",
                root.display()
            )));
        }

        let class_glob = Glob::new("**/*.class")
            .map_err(|e| SpigletError::Config(format!("Invalid class glob: {}", e)))?
            .compile_matcher();

        let mut records = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(root.to_path_buf());

        while let Some(current_dir) = queue.pop_front() {
            for entry in fs::read_dir(&current_dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    queue.push_back(path);
                    continue;
                }

                let relative_path = path.strip_prefix(root).unwrap_or(&path);
                if !class_glob.is_match(relative_path) {
                    continue;
                }

                let bytes = fs::read(&path)?;
                records.push(parse_class(&path.display().to_string(), &bytes)?);
            }
        }

        Ok(Self::from_records(records))
    }

    pub fn get(&self, name: &str) -> Option<&ClassRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Where the built classes of a project live, relative to the project root
pub const DEFAULT_CLASSES_DIR: &str = "build/classes";

pub fn default_classes_dir(project_root: &Path) -> PathBuf {
    project_root.join(DEFAULT_CLASSES_DIR)
}

/// Resolve the plugin main class.
///
/// A non-blank `override_main` short-circuits scanning and is returned
/// verbatim, even if it names a class that does not exist. Otherwise every
/// indexed class's superclass chain is walked towards `superclass` (internal
/// form); exactly one match is required. The returned name is in source form
/// (dot-separated).
pub fn detect_main_class(
    index: &ClassIndex,
    superclass: &str,
    override_main: Option<&str>,
) -> SpigletResult<String> {
    if let Some(explicit) = override_main {
        if !explicit.trim().is_empty() {
            return Ok(explicit.to_string());
        }
    }

    let mut memo: HashMap<String, bool> = HashMap::new();
    let mut names: Vec<&String> = index.records.keys().collect();
    names.sort();

    let mut candidates = Vec::new();
    for name in names {
        if chain_reaches(index, name, superclass, &mut memo)? {
            candidates.push(name.replace('/', "."));
        }
    }

    match candidates.len() {
        0 => Err(SpigletError::NoMainClassFound {
            superclass: superclass.replace('/', "."),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(SpigletError::AmbiguousMainClass { candidates }),
    }
}

/// Walk the superclass chain of `start` towards `target`.
///
/// The chain terminates at the target (match), at a class with no superclass,
/// or at a name the index does not know (external, unresolved). A class
/// reappearing in its own ancestor chain is a malformed hierarchy, not a
/// reason to loop.
fn chain_reaches(
    index: &ClassIndex,
    start: &str,
    target: &str,
    memo: &mut HashMap<String, bool>,
) -> SpigletResult<bool> {
    let mut chain: Vec<String> = Vec::new();
    let mut current = start.to_string();

    let matched = loop {
        if let Some(&known) = memo.get(&current) {
            break known;
        }
        if chain.iter().any(|seen| seen == &current) {
            chain.push(current);
            return Err(SpigletError::MalformedClassHierarchy {
                chain: chain.iter().map(|name| name.replace('/', ".")).collect(),
            });
        }
        chain.push(current.clone());

        match index.get(&current).and_then(|record| record.super_name.as_deref()) {
            Some(super_name) if super_name == target => break true,
            Some(super_name) if index.get(super_name).is_some() => {
                current = super_name.to_string();
            }
            // No superclass, or one outside the index: chain ends here
            _ => break false,
        }
    };

    for name in chain {
        memo.insert(name, matched);
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classfile::class_bytes;

    const JAVA_PLUGIN: &str = "org/bukkit/plugin/java/JavaPlugin";

    fn record(name: &str, super_name: Option<&str>) -> ClassRecord {
        ClassRecord {
            name: name.to_string(),
            super_name: super_name.map(|s| s.to_string()),
            interfaces: Vec::new(),
        }
    }

    #[test]
    fn test_single_direct_match() {
        let index = ClassIndex::from_records(vec![
            record("com/example/MyPlugin", Some(JAVA_PLUGIN)),
            record("com/example/Util", Some("java/lang/Object")),
        ]);
        let main = detect_main_class(&index, JAVA_PLUGIN, None).unwrap();
        assert_eq!(main, "com.example.MyPlugin");
    }

    #[test]
    fn test_intermediate_base_also_matches() {
        // Both the intermediate base and the concrete plugin reach the
        // marker, so this is an ambiguity, sorted by name
        let index = ClassIndex::from_records(vec![
            record("com/example/BasePlugin", Some(JAVA_PLUGIN)),
            record("com/example/MyPlugin", Some("com/example/BasePlugin")),
        ]);
        let err = detect_main_class(&index, JAVA_PLUGIN, None).unwrap_err();
        match err {
            SpigletError::AmbiguousMainClass { candidates } => {
                assert_eq!(
                    candidates,
                    vec![
                        "com.example.BasePlugin".to_string(),
                        "com.example.MyPlugin".to_string()
                    ]
                );
            }
            other => panic!("Expected AmbiguousMainClass, got {:?}", other),
        }
    }

    #[test]
    fn test_chain_ending_outside_index_is_no_match() {
        // The superclass is a library class the index has never seen; the
        // chain terminates unresolved instead of erroring
        let index = ClassIndex::from_records(vec![record(
            "com/example/MyThing",
            Some("com/library/ExternalBase"),
        )]);
        let err = detect_main_class(&index, JAVA_PLUGIN, None).unwrap_err();
        assert!(matches!(err, SpigletError::NoMainClassFound { .. }));
    }

    #[test]
    fn test_no_match() {
        let index = ClassIndex::from_records(vec![
            record("com/example/Util", Some("java/lang/Object")),
            record("com/example/Listener", Some("java/lang/Object")),
        ]);
        let err = detect_main_class(&index, JAVA_PLUGIN, None).unwrap_err();
        match err {
            SpigletError::NoMainClassFound { superclass } => {
                assert_eq!(superclass, "org.bukkit.plugin.java.JavaPlugin");
            }
            other => panic!("Expected NoMainClassFound, got {:?}", other),
        }
    }

    #[test]
    fn test_override_short_circuits() {
        let index = ClassIndex::from_records(vec![
            record("com/example/A", Some(JAVA_PLUGIN)),
            record("com/example/B", Some(JAVA_PLUGIN)),
        ]);
        // Ambiguous without an override, but the override wins verbatim even
        // though it names a class the index has never seen
        let main = detect_main_class(&index, JAVA_PLUGIN, Some("com.example.Missing")).unwrap();
        assert_eq!(main, "com.example.Missing");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let index = ClassIndex::from_records(vec![record("com/example/MyPlugin", Some(JAVA_PLUGIN))]);
        let main = detect_main_class(&index, JAVA_PLUGIN, Some("   ")).unwrap();
        assert_eq!(main, "com.example.MyPlugin");
    }

    #[test]
    fn test_self_referential_chain() {
        let index = ClassIndex::from_records(vec![record("com/example/Loop", Some("com/example/Loop"))]);
        let err = detect_main_class(&index, JAVA_PLUGIN, None).unwrap_err();
        match err {
            SpigletError::MalformedClassHierarchy { chain } => {
                assert_eq!(
                    chain,
                    vec!["com.example.Loop".to_string(), "com.example.Loop".to_string()]
                );
            }
            other => panic!("Expected MalformedClassHierarchy, got {:?}", other),
        }
    }

    #[test]
    fn test_two_class_cycle() {
        let index = ClassIndex::from_records(vec![
            record("com/example/A", Some("com/example/B")),
            record("com/example/B", Some("com/example/A")),
        ]);
        let err = detect_main_class(&index, JAVA_PLUGIN, None).unwrap_err();
        assert!(matches!(err, SpigletError::MalformedClassHierarchy { .. }));
    }

    #[test]
    fn test_shared_ancestors_are_memoized() {
        // A deep shared chain stays linear thanks to memoization; this just
        // pins the correctness side of that path
        let mut records = vec![record("com/example/Base0", Some(JAVA_PLUGIN))];
        for i in 1..50 {
            records.push(record(
                &format!("com/example/Base{}", i),
                Some(&format!("com/example/Base{}", i - 1)),
            ));
        }
        let index = ClassIndex::from_records(records);
        let err = detect_main_class(&index, JAVA_PLUGIN, None).unwrap_err();
        match err {
            SpigletError::AmbiguousMainClass { candidates } => {
                assert_eq!(candidates.len(), 50);
            }
            other => panic!("Expected AmbiguousMainClass, got {:?}", other),
        }
    }

    #[test]
    fn test_index_from_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let package = root.join("com").join("example");
        std::fs::create_dir_all(&package).unwrap();

        std::fs::write(
            package.join("MyPlugin.class"),
            class_bytes("com/example/MyPlugin", Some(JAVA_PLUGIN), &[]),
        )
        .unwrap();
        std::fs::write(
            package.join("Util.class"),
            class_bytes("com/example/Util", Some("java/lang/Object"), &[]),
        )
        .unwrap();
        // Non-class files are skipped
        std::fs::write(package.join("notes.txt"), "not a class").unwrap();

        let index = ClassIndex::from_dir(root).unwrap();
        assert_eq!(index.len(), 2);

        let main = detect_main_class(&index, JAVA_PLUGIN, None).unwrap();
        assert_eq!(main, "com.example.MyPlugin");
    }

    #[test]
    fn test_index_from_missing_dir() {
        let err = ClassIndex::from_dir(Path::new("/nonexistent/classes")).unwrap_err();
        assert!(matches!(err, SpigletError::Config(_)));
    }
}
