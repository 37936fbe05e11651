//! Contracts for the external subsystems the editor core depends on.
//!
//! Storage, asset management, generation and chat are collaborators: the
//! core consumes them through the traits below and never implements their
//! internals. [`memory`] provides single-process simulations of each, which
//! the integration tests and any demo host use in place of real HTTP
//! services.

use serde::{Deserialize, Serialize};

use crate::foundation::core::JobId;
use crate::foundation::error::EaselResult;
use crate::schema::{LayerDef, ProjectDef};

/// In-memory collaborator implementations.
pub mod memory;

/// Bearer credential attached to every collaborator call.
///
/// Credentials are issued and refreshed by an external auth context; the
/// core only carries them through and never inspects them.
#[derive(Clone, Debug)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Render the `Authorization` header value for an HTTP transport.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

/// Stored asset record, immutable from the core's perspective.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDoc {
    /// Asset identifier.
    pub id: String,
    /// URL the asset is served from.
    pub url: String,
    /// File name the asset was uploaded with.
    pub original_name: String,
}

/// Parameters for one generation request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Text prompt describing the desired image.
    pub prompt: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of images to produce.
    pub batch: u32,
    /// Base model id, see [`GenerationBackend::models`].
    pub model: String,
    /// Negative prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative: Option<String>,
    /// Guidance scale override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfg: Option<f64>,
    /// Sampler step count override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    /// Seed override for reproducible output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl GenerationRequest {
    /// Request with the backend's default size and a batch of one.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            width: 512,
            height: 512,
            batch: 1,
            model: model.into(),
            negative: None,
            cfg: None,
            steps: None,
            seed: None,
        }
    }
}

/// One generated output image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// URL the result is served from.
    pub url: String,
}

/// Status of a generation job as reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// Still running; poll again later.
    Processing,
    /// Finished; results are final, in backend order.
    Completed(Vec<GeneratedImage>),
    /// Failed with a backend-supplied reason.
    Failed(String),
}

/// Selectable base model for generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Model identifier, referenced by [`GenerationRequest::model`].
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Suggested defaults for new requests.
    pub default_params: ModelParams,
}

/// Default generation parameters a model suggests.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ModelParams {
    /// Default output width.
    pub width: u32,
    /// Default output height.
    pub height: u32,
    /// Default sampler step count.
    pub steps: u32,
    /// Default guidance scale.
    pub cfg: f64,
}

/// One message in the assistant chat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `assistant` or `user`.
    pub role: String,
    /// Message text.
    pub content: String,
}

/// Project persistence collaborator.
pub trait ProjectStore {
    /// Fetch a project document by id.
    fn fetch(&mut self, auth: &BearerToken, project_id: &str) -> EaselResult<ProjectDef>;

    /// Replace the project's full layer sequence in one write.
    ///
    /// All-or-nothing: there is no partial or merge save. Conflict handling
    /// between concurrent writers is the collaborator's concern.
    fn save_layers(
        &mut self,
        auth: &BearerToken,
        project_id: &str,
        layers: &[LayerDef],
    ) -> EaselResult<()>;
}

/// Asset storage collaborator.
pub trait AssetLibrary {
    /// List stored assets, most recent first.
    fn list(&mut self, auth: &BearerToken) -> EaselResult<Vec<AssetDoc>>;

    /// Upload a new asset and return its stored record.
    fn upload(
        &mut self,
        auth: &BearerToken,
        original_name: &str,
        bytes: &[u8],
        tags: &[String],
        category: Option<&str>,
    ) -> EaselResult<AssetDoc>;
}

/// Generation job collaborator.
pub trait GenerationBackend {
    /// List the selectable base models.
    fn models(&mut self, auth: &BearerToken) -> EaselResult<Vec<ModelInfo>>;

    /// Start a generation job and return its id immediately.
    fn submit(&mut self, auth: &BearerToken, request: &GenerationRequest) -> EaselResult<JobId>;

    /// Fetch the current status of a job.
    fn job_status(&mut self, auth: &BearerToken, job: JobId) -> EaselResult<JobStatus>;
}

/// Assistant chat collaborator. Peripheral; not consumed by the session.
pub trait ChatBackend {
    /// Fetch the conversation opener.
    fn messages(&mut self, auth: &BearerToken) -> EaselResult<Vec<ChatMessage>>;

    /// Send one user message and receive the assistant reply.
    fn send(&mut self, auth: &BearerToken, message: &str) -> EaselResult<String>;
}
