//! Graft Session
//!
//! Drive one project file through load -> mutate -> validate -> serialize.
//!
//! Responsibilities:
//! - Take the advisory lock before the project file is read
//! - Own the graph and the identifier allocator for the whole pass
//! - Refuse to serialize while validation reports errors
//! - Decode TOML plan files into mutation batches

mod error;
mod lock;
mod plan;
mod session;

pub use error::{SessionError, SessionResult};
pub use lock::ProjectLock;
pub use plan::{OnError, Plan, PlanOp};
pub use session::{Session, SessionState};
