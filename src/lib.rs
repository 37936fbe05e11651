//! Easel is the headless core of a layer-based canvas editor.
//!
//! It owns the two parts of such an editor that have real semantics:
//!
//! - An ordered, mutable set of visual layers ([`scene::LayerStore`]) with
//!   strict z-index uniqueness and cheap swap-based reordering
//! - A polling tracker for asynchronous generation jobs
//!   ([`jobs::tracker::JobTracker`]) with exactly-once terminal delivery and
//!   cooperative cancellation
//!
//! [`session::editor_session::EditorSession`] composes both behind the
//! collaborator boundaries in [`collab`] (project storage, asset library,
//! generation backend, chat). Everything else an editor needs, such as auth,
//! routing and rendering, is reached through those traits and stays out of
//! this crate.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Collaborator contracts and in-memory simulations.
pub mod collab;
/// Generation job tracking.
pub mod jobs;
/// Layer model and store.
pub mod scene;
/// Wire DTOs for the project collaborator.
pub mod schema;
/// Session-oriented editor API.
pub mod session;

pub use crate::foundation::core::{CanvasSize, JobId, Point};
pub use crate::foundation::error::{EaselError, EaselResult};

pub use crate::collab::{
    AssetDoc, BearerToken, ChatMessage, GeneratedImage, GenerationRequest, JobStatus, ModelInfo,
};
pub use crate::jobs::tracker::{JobEvent, JobTracker};
pub use crate::scene::model::{Layer, LayerKind};
pub use crate::scene::store::LayerStore;
pub use crate::schema::{LayerDef, ProjectDef};
pub use crate::session::editor_session::{
    DropPolicy, EditorSession, EditorSessionOpts, SessionEvent,
};
