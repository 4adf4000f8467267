//! Error type shared by every pipeline stage.
//!
//! - `InvalidGeometry` and `MalformedHierarchy` abort a planning request.
//! - `Unreachable` is an expected outcome (sealed-off goal) and callers are
//!   meant to match on it rather than treat it as a crash.

use std::fmt;

use thiserror::Error;

use crate::navgraph::NodeId;

/// Pipeline stage that produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Select,
    Triangulate,
    Graph,
    Search,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Select => "obstacle selection",
            Stage::Triangulate => "triangulation",
            Stage::Graph => "graph construction",
            Stage::Search => "path search",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error("invalid geometry during {stage} ({subject}): {reason}")]
    InvalidGeometry {
        stage: Stage,
        subject: String,
        reason: String,
    },

    #[error("malformed contour hierarchy at node {node}: {reason}")]
    MalformedHierarchy { node: usize, reason: String },

    #[error("no path from node {} to node {}", start.0, goal.0)]
    Unreachable { start: NodeId, goal: NodeId },
}

impl NavError {
    pub(crate) fn geometry(
        stage: Stage,
        subject: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidGeometry {
            stage,
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn hierarchy(node: usize, reason: impl Into<String>) -> Self {
        Self::MalformedHierarchy {
            node,
            reason: reason.into(),
        }
    }

    /// True for the non-fatal "no connecting path" outcome.
    #[inline]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, NavError::Unreachable { .. })
    }
}

pub type NavResult<T> = Result<T, NavError>;
