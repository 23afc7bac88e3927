use metadecomp_graph::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No network loaded; load a network before running this step")]
    NoNetwork,

    #[error("No decomposition available; run a decomposition first")]
    NoDecomposition,

    #[error("No overview graph available; build the overview graph first")]
    NoOverview,

    #[error("No subsystems selected")]
    NothingSelected,

    #[error("Species {node} has already been cloned")]
    AlreadyCloned { node: NodeId },

    #[error("Node {node} is not a species")]
    NotASpecies { node: NodeId },

    #[error("Unknown node: {node}")]
    UnknownNode { node: NodeId },

    #[error("Unknown subsystem: {name}")]
    UnknownSubsystem { name: String },

    #[error("Invalid network: {message}")]
    InvalidNetwork { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failure of a single request against an external pathway database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("request timed out")]
    Timeout,

    #[error("empty response")]
    EmptyResponse,
}

/// A non-fatal problem surfaced alongside a successful run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A reaction could not be resolved against the pathway database and was skipped.
    PathwayLookupFailed { reaction: String, message: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::PathwayLookupFailed { reaction, message } => {
                write!(f, "pathway lookup for {reaction} failed: {message}")
            }
        }
    }
}
