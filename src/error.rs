use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Astrid.
///
/// Each subsystem defines its own error variant. The session loop matches on
/// these to decide what is fatal, what is reported and survived, and what
/// propagates; internal code continues to use `anyhow::Result` for ad-hoc
/// context chains.
#[derive(Debug, Error)]
pub enum AstridError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Tools ───────────────────────────────────────────────────────────
    #[error("tool: {0}")]
    Tool(#[from] ToolError),

    // ── Remote run ──────────────────────────────────────────────────────
    #[error("run: {0}")]
    Run(#[from] RunError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error(
        "enabled tools {enabled:?} do not match the set advertised at \
         assistant creation {advertised:?}; re-create the assistant"
    )]
    AdvertisedToolsMismatch {
        enabled: Vec<String>,
        advertised: Vec<String>,
    },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Tool errors ────────────────────────────────────────────────────────────

/// Per-call tool failures. These never cross the invoker boundary during run
/// processing; the invoker converts them to failed tool results so the remote
/// side receives them as data.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool {name} is already registered")]
    Duplicate { name: String },

    #[error("tool {name} not found")]
    NotFound { name: String },

    #[error("tool {name} arguments could not be parsed: {message}")]
    ArgumentParse { name: String, message: String },

    #[error("tool {name} execution failed: {message}")]
    Execution { name: String, message: String },
}

// ─── Run errors ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RunError {
    /// The remote requested an action kind this client does not implement.
    /// Fatal: the process must exit rather than guess at an unknown protocol.
    #[error("unsupported required-action kind: {kind}")]
    UnsupportedAction { kind: String },

    /// The run reached `failed`, `cancelled`, `expired`, or an unrecognized
    /// status. Reported to the user instead of returning an empty reply.
    #[error("run {run_id} terminated abnormally with status {status}")]
    TerminatedAbnormally { run_id: String, status: String },

    /// The per-task polling budget was exhausted.
    #[error("run {run_id} did not finish within {budget_secs}s")]
    TimedOut { run_id: String, budget_secs: u64 },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, AstridError>;
