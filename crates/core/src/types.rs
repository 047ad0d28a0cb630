use thiserror::Error;

/// The main error type for Spiglet operations
#[derive(Debug, Error)]
pub enum SpigletError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task error: {0}")]
    Task(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Malformed class file {path}: {message}")]
    ClassFile { path: String, message: String },

    #[error("No main class found: no class extends {superclass}")]
    NoMainClassFound { superclass: String },

    #[error("Ambiguous main class, candidates: {}", .candidates.join(", "))]
    AmbiguousMainClass { candidates: Vec<String> },

    #[error("Malformed class hierarchy: {}", .chain.join(" -> "))]
    MalformedClassHierarchy { chain: Vec<String> },

    #[error("Cyclic task dependency: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
}

/// Result type alias for Spiglet operations
pub type SpigletResult<T> = Result<T, SpigletError>;
