//! Single-process, in-memory collaborator implementations.
//!
//! These mirror the demo backend the editor ships with: a project map, an
//! asset list, a generation queue simulated with an incrementing job counter
//! and placeholder result URLs, and an echo chat. A production deployment
//! replaces them with HTTP clients against the real services; the traits are
//! deliberately agnostic so job state can later live in a durable queue.

use std::collections::HashMap;

use crate::collab::{
    AssetDoc, AssetLibrary, BearerToken, ChatBackend, ChatMessage, GeneratedImage,
    GenerationBackend, GenerationRequest, JobStatus, ModelInfo, ModelParams, ProjectStore,
};
use crate::foundation::core::{CanvasSize, JobId};
use crate::foundation::error::{EaselError, EaselResult};
use crate::schema::{LayerDef, ProjectDef};

/// Project store backed by a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryProjects {
    projects: HashMap<String, ProjectDef>,
}

impl InMemoryProjects {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a project with an empty layer set and return it.
    pub fn create(&mut self, title: &str, canvas_size: CanvasSize) -> ProjectDef {
        let project = ProjectDef {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_owned(),
            canvas_size,
            layers: Vec::new(),
            version: 1,
        };
        self.projects.insert(project.id.clone(), project.clone());
        project
    }
}

impl ProjectStore for InMemoryProjects {
    fn fetch(&mut self, _auth: &BearerToken, project_id: &str) -> EaselResult<ProjectDef> {
        self.projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| EaselError::transport(format!("project not found: {project_id}")))
    }

    fn save_layers(
        &mut self,
        _auth: &BearerToken,
        project_id: &str,
        layers: &[LayerDef],
    ) -> EaselResult<()> {
        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| EaselError::transport(format!("project not found: {project_id}")))?;
        project.layers = layers.to_vec();
        project.version += 1;
        Ok(())
    }
}

/// Asset library backed by a process-local list.
#[derive(Debug, Default)]
pub struct InMemoryAssets {
    assets: Vec<AssetDoc>,
}

impl InMemoryAssets {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetLibrary for InMemoryAssets {
    fn list(&mut self, _auth: &BearerToken) -> EaselResult<Vec<AssetDoc>> {
        Ok(self.assets.clone())
    }

    fn upload(
        &mut self,
        _auth: &BearerToken,
        original_name: &str,
        bytes: &[u8],
        _tags: &[String],
        _category: Option<&str>,
    ) -> EaselResult<AssetDoc> {
        if original_name.is_empty() {
            return Err(EaselError::validation("file name is required"));
        }
        if bytes.is_empty() {
            return Err(EaselError::validation("file is empty"));
        }
        let id = uuid::Uuid::new_v4().to_string();
        let asset = AssetDoc {
            url: format!("/uploads/{id}/{original_name}"),
            id,
            original_name: original_name.to_owned(),
        };
        // Fresh uploads go to the front of the listing.
        self.assets.insert(0, asset.clone());
        Ok(asset)
    }
}

#[derive(Debug)]
struct SimJob {
    width: u32,
    height: u32,
    batch: u32,
    polls_seen: u32,
}

/// Simulated generation backend.
///
/// Jobs live in a process-local map keyed by an incrementing counter starting
/// at 1. A job reports `Processing` for a configurable number of status
/// fetches and then completes with `batch` placeholder image URLs of the
/// requested size. This stands in for a real queue plus inference cluster.
#[derive(Debug)]
pub struct SimulatedGenerator {
    jobs: HashMap<u64, SimJob>,
    next_job_id: u64,
    completes_after_polls: u32,
    fail_all: bool,
    image_serial: u64,
}

impl SimulatedGenerator {
    /// Backend whose jobs complete on the first status fetch.
    pub fn new() -> Self {
        Self::completing_after(1)
    }

    /// Backend whose jobs stay `Processing` for `polls` fetches first.
    pub fn completing_after(polls: u32) -> Self {
        Self {
            jobs: HashMap::new(),
            next_job_id: 1,
            completes_after_polls: polls.max(1),
            fail_all: false,
            image_serial: 0,
        }
    }

    /// Backend that reports every job as failed on the first fetch.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new()
        }
    }
}

impl Default for SimulatedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationBackend for SimulatedGenerator {
    fn models(&mut self, _auth: &BearerToken) -> EaselResult<Vec<ModelInfo>> {
        Ok(vec![
            ModelInfo {
                id: "star3".to_owned(),
                name: "Star-3".to_owned(),
                default_params: ModelParams {
                    width: 1024,
                    height: 1024,
                    steps: 25,
                    cfg: 4.5,
                },
            },
            ModelInfo {
                id: "sdxl".to_owned(),
                name: "SDXL".to_owned(),
                default_params: ModelParams {
                    width: 1024,
                    height: 1024,
                    steps: 30,
                    cfg: 7.5,
                },
            },
        ])
    }

    fn submit(&mut self, _auth: &BearerToken, request: &GenerationRequest) -> EaselResult<JobId> {
        if request.prompt.trim().is_empty() {
            return Err(EaselError::validation("prompt is required"));
        }
        let id = self.next_job_id;
        self.next_job_id += 1;
        self.jobs.insert(
            id,
            SimJob {
                width: request.width,
                height: request.height,
                batch: request.batch.max(1),
                polls_seen: 0,
            },
        );
        Ok(JobId(id))
    }

    fn job_status(&mut self, _auth: &BearerToken, job: JobId) -> EaselResult<JobStatus> {
        let entry = self
            .jobs
            .get_mut(&job.0)
            .ok_or_else(|| EaselError::transport(format!("job not found: {job}")))?;

        if self.fail_all {
            self.jobs.remove(&job.0);
            return Ok(JobStatus::Failed("generation failed".to_owned()));
        }

        entry.polls_seen += 1;
        if entry.polls_seen < self.completes_after_polls {
            return Ok(JobStatus::Processing);
        }

        let (width, height, batch) = (entry.width, entry.height, entry.batch);
        self.jobs.remove(&job.0);
        let results = (0..batch)
            .map(|_| {
                self.image_serial += 1;
                GeneratedImage {
                    url: format!(
                        "https://picsum.photos/{width}/{height}?random={}",
                        self.image_serial
                    ),
                }
            })
            .collect();
        Ok(JobStatus::Completed(results))
    }
}

/// Placeholder assistant chat that greets and echoes.
#[derive(Debug, Default)]
pub struct EchoChat;

impl EchoChat {
    /// Create the chat backend.
    pub fn new() -> Self {
        Self
    }
}

impl ChatBackend for EchoChat {
    fn messages(&mut self, _auth: &BearerToken) -> EaselResult<Vec<ChatMessage>> {
        Ok(vec![ChatMessage {
            role: "assistant".to_owned(),
            content: "Hi, I'm your AI designer. Let's start creating!".to_owned(),
        }])
    }

    fn send(&mut self, _auth: &BearerToken, message: &str) -> EaselResult<String> {
        if message.is_empty() {
            return Err(EaselError::validation("message is required"));
        }
        Ok(format!("You said: \"{message}\""))
    }
}
