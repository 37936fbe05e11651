use std::time::{Duration, Instant};

use kurbo::Point;

use crate::collab::{
    AssetDoc, BearerToken, GeneratedImage, GenerationBackend, GenerationRequest, ProjectStore,
};
use crate::foundation::core::{CanvasSize, JobId};
use crate::foundation::error::EaselResult;
use crate::jobs::tracker::{DEFAULT_POLL_INTERVAL, JobEvent, JobTracker};
use crate::scene::model::{Layer, LayerKind};
use crate::scene::store::LayerStore;
use crate::schema::{decode_layers, encode_layers};

/// Where a new layer lands when no pointer location is available, for
/// example on click-to-add from the asset panel.
pub const DEFAULT_INSERT_AT: Point = Point::new(50.0, 50.0);

/// What to do with a drop that lands outside the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropPolicy {
    /// Discard the drop without mutating the layer set.
    #[default]
    Reject,
    /// Clamp the drop point into the canvas bounds and insert.
    Clamp,
}

/// Options controlling session behavior.
#[derive(Clone, Copy, Debug)]
pub struct EditorSessionOpts {
    /// Pause between generation status fetches.
    pub poll_interval: Duration,
    /// Out-of-bounds drop handling.
    pub drop_policy: DropPolicy,
}

impl Default for EditorSessionOpts {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            drop_policy: DropPolicy::default(),
        }
    }
}

/// Event surfaced to the embedding UI by [`EditorSession::pump`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A generation job completed and its results were added as layers.
    LayersAdded {
        /// The completed job.
        job: JobId,
        /// Ids of the inserted layers, in result order.
        layer_ids: Vec<String>,
    },
    /// A generation job failed; the layer set is unchanged.
    GenerationFailed {
        /// The failed job.
        job: JobId,
        /// Reason for display.
        reason: String,
    },
}

/// One open project in the editor.
///
/// The session bridges user and generation intents to [`LayerStore`]
/// mutations and owns the save/load boundary to the project collaborator.
/// All operations run to completion on the calling thread; intents are
/// applied in the order they arrive, so a drag and a job completion can
/// never interleave within a single layer's fields.
pub struct EditorSession {
    project_id: String,
    canvas: CanvasSize,
    store: LayerStore,
    tracker: JobTracker,
    auth: BearerToken,
    opts: EditorSessionOpts,
}

impl EditorSession {
    /// Open a project: fetch it from the collaborator, decode its layers
    /// (repairing any z-index conflicts deterministically) and seed the
    /// store.
    #[tracing::instrument(skip(projects, auth, opts))]
    pub fn open(
        projects: &mut dyn ProjectStore,
        auth: BearerToken,
        project_id: &str,
        opts: EditorSessionOpts,
    ) -> EaselResult<Self> {
        let project = projects.fetch(&auth, project_id)?;
        let mut store = LayerStore::new();
        store.replace_all(decode_layers(&project.layers));
        tracing::debug!(
            project = %project.id,
            layers = store.len(),
            "project opened"
        );
        Ok(Self {
            project_id: project.id,
            canvas: project.canvas_size,
            store,
            tracker: JobTracker::with_interval(opts.poll_interval),
            auth,
            opts,
        })
    }

    /// Id of the open project.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Canvas dimensions of the open project.
    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    /// Number of layers currently on the canvas.
    pub fn layer_count(&self) -> usize {
        self.store.len()
    }

    /// Layers in paint order (back to front).
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.store.ordered_view()
    }

    /// Number of generation jobs still outstanding.
    pub fn active_jobs(&self) -> usize {
        self.tracker.active()
    }

    /// Add an asset to the canvas as a new image layer on top.
    ///
    /// Without an explicit position the layer lands at
    /// [`DEFAULT_INSERT_AT`].
    pub fn insert_from_asset(&mut self, asset: &AssetDoc, position: Option<Point>) -> &Layer {
        let at = position.unwrap_or(DEFAULT_INSERT_AT);
        self.store.add_layer(LayerKind::image(&asset.url), at)
    }

    /// Add an asset dropped onto the stage.
    ///
    /// The canvas-relative position is `screen_point - stage_origin`. Drops
    /// outside the canvas follow the configured [`DropPolicy`]: `Reject`
    /// returns `None` and leaves the store untouched, `Clamp` pins the point
    /// to the nearest edge.
    pub fn insert_from_drop(
        &mut self,
        asset: &AssetDoc,
        screen_point: Point,
        stage_origin: Point,
    ) -> Option<&Layer> {
        let mut at = (screen_point - stage_origin).to_point();
        if !self.canvas.contains(at) {
            match self.opts.drop_policy {
                DropPolicy::Reject => {
                    tracing::debug!(x = at.x, y = at.y, "drop outside canvas rejected");
                    return None;
                }
                DropPolicy::Clamp => at = self.canvas.clamp(at),
            }
        }
        Some(self.store.add_layer(LayerKind::image(&asset.url), at))
    }

    /// Add each generation result as a new image layer, in result order,
    /// each painting above the previous.
    pub fn insert_from_generation_result(&mut self, results: &[GeneratedImage]) -> Vec<String> {
        results
            .iter()
            .map(|img| {
                self.store
                    .add_layer(LayerKind::image(&img.url), DEFAULT_INSERT_AT)
                    .id
                    .clone()
            })
            .collect()
    }

    /// Record the final position of a dragged layer.
    ///
    /// A drag on a layer that no longer exists is a recoverable no-op.
    pub fn handle_drag_end(&mut self, layer_id: &str, position: Point) {
        if let Err(err) = self.store.update_position(layer_id, position) {
            tracing::warn!(layer = layer_id, %err, "drag end for unknown layer ignored");
        }
    }

    /// Move a layer one step toward the top of the paint order.
    pub fn move_layer_up(&mut self, layer_id: &str) {
        if let Err(err) = self.store.move_up(layer_id) {
            tracing::warn!(layer = layer_id, %err, "reorder for unknown layer ignored");
        }
    }

    /// Move a layer one step toward the back of the paint order.
    pub fn move_layer_down(&mut self, layer_id: &str) {
        if let Err(err) = self.store.move_down(layer_id) {
            tracing::warn!(layer = layer_id, %err, "reorder for unknown layer ignored");
        }
    }

    /// Submit a generation request and start tracking the job.
    pub fn generate(
        &mut self,
        backend: &mut dyn GenerationBackend,
        request: &GenerationRequest,
        now: Instant,
    ) -> EaselResult<JobId> {
        self.tracker.submit(backend, &self.auth, request, now)
    }

    /// Poll outstanding jobs once and apply any terminal outcomes.
    ///
    /// Completed jobs have their results inserted as layers; failures are
    /// surfaced for display and never retried.
    pub fn pump(&mut self, backend: &mut dyn GenerationBackend, now: Instant) -> Vec<SessionEvent> {
        let events = self.tracker.poll(backend, &self.auth, now);
        events
            .into_iter()
            .map(|event| match event {
                JobEvent::Completed { job, results } => {
                    let layer_ids = self.insert_from_generation_result(&results);
                    tracing::debug!(job = job.0, count = layer_ids.len(), "results added");
                    SessionEvent::LayersAdded { job, layer_ids }
                }
                JobEvent::Failed { job, reason } => {
                    tracing::warn!(job = job.0, reason, "generation job failed");
                    SessionEvent::GenerationFailed { job, reason }
                }
            })
            .collect()
    }

    /// Persist the layer set to the project collaborator.
    ///
    /// Serializes the ordered view (stable order, so repeated saves of an
    /// unchanged canvas produce identical documents) and issues one
    /// full-replace write. Failure surfaces to the caller; the session does
    /// not retry.
    #[tracing::instrument(skip_all, fields(project = %self.project_id))]
    pub fn save(&self, projects: &mut dyn ProjectStore) -> EaselResult<()> {
        let defs = encode_layers(self.store.ordered_view());
        projects.save_layers(&self.auth, &self.project_id, &defs)
    }

    /// Tear the session down, cancelling all outstanding jobs.
    pub fn close(&mut self) {
        self.tracker.cancel_all();
    }
}
