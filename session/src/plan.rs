//! TOML plan files.
//!
//! A plan is an ordered batch of requests:
//!
//! ```toml
//! on_error = "continue"
//!
//! [[op]]
//! kind = "add-file"
//! path = "Sources/User.model"
//! group = "Models"
//!
//! [[op]]
//! kind = "move"
//! from = "Components"
//! to = "RegionFare"
//! children = ["8C0E842C2C7F34E500B1D3E2"]
//! ```

use graft_core::ObjectId;
use graft_mutation::{BatchPolicy, MutationRequest};
use serde::Deserialize;

use crate::error::{SessionError, SessionResult};

/// A decoded plan file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    /// What the batch does when one request fails.
    #[serde(default)]
    pub on_error: OnError,
    /// The requests, applied in file order.
    #[serde(default, rename = "op")]
    pub ops: Vec<PlanOp>,
}

/// Failure policy of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnError {
    #[default]
    Continue,
    FailFast,
}

/// One `[[op]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PlanOp {
    AddFile {
        path: String,
        group: String,
        #[serde(default)]
        name: Option<String>,
    },
    AddGroup {
        name: String,
        parent: String,
        #[serde(default)]
        children: Vec<String>,
    },
    Move {
        from: String,
        to: String,
        children: Vec<String>,
    },
}

impl Plan {
    /// Decode a plan from TOML text.
    pub fn from_toml(text: &str) -> SessionResult<Self> {
        toml::from_str(text).map_err(|error| SessionError::invalid_plan(error.to_string()))
    }

    pub fn policy(&self) -> BatchPolicy {
        match self.on_error {
            OnError::Continue => BatchPolicy::ContinueOnError,
            OnError::FailFast => BatchPolicy::FailFast,
        }
    }

    /// Convert every op into a mutation request. Identifier strings are
    /// checked here, so a typo fails the whole plan instead of one
    /// request deep into the batch.
    pub fn requests(&self) -> SessionResult<Vec<MutationRequest>> {
        self.ops.iter().map(PlanOp::to_request).collect()
    }
}

impl PlanOp {
    fn to_request(&self) -> SessionResult<MutationRequest> {
        Ok(match self {
            PlanOp::AddFile { path, group, name } => MutationRequest::AddSourceFile {
                path: path.clone(),
                name: name.clone(),
                parent_group: group.clone(),
            },
            PlanOp::AddGroup {
                name,
                parent,
                children,
            } => MutationRequest::AddGroup {
                name: name.clone(),
                parent_group: parent.clone(),
                children: parse_ids(children)?,
            },
            PlanOp::Move { from, to, children } => MutationRequest::RelocateChildren {
                children: parse_ids(children)?,
                from_group: from.clone(),
                to_group: to.clone(),
            },
        })
    }
}

fn parse_ids(raw: &[String]) -> SessionResult<Vec<ObjectId>> {
    raw.iter()
        .map(|text| {
            ObjectId::parse(text)
                .map_err(|_| SessionError::invalid_plan(format!("malformed identifier `{text}`")))
        })
        .collect()
}
