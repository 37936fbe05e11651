//! Generation lifecycle through a session: submit, poll to completion,
//! results landing as layers; plus the failure and teardown paths.

use std::time::{Duration, Instant};

use easel::collab::memory::{InMemoryProjects, SimulatedGenerator};
use easel::collab::{BearerToken, GenerationBackend, GenerationRequest};
use easel::{CanvasSize, EditorSession, EditorSessionOpts, LayerKind, SessionEvent};

const TICK: Duration = Duration::from_millis(1000);

fn open_session(projects: &mut InMemoryProjects) -> EditorSession {
    let project = projects.create(
        "gen",
        CanvasSize {
            width: 1024,
            height: 1024,
        },
    );
    EditorSession::open(
        projects,
        BearerToken::new("token"),
        &project.id,
        EditorSessionOpts::default(),
    )
    .unwrap()
}

#[test]
fn batch_completion_appends_layers_in_result_order() {
    let mut projects = InMemoryProjects::new();
    let mut session = open_session(&mut projects);
    let mut generator = SimulatedGenerator::completing_after(2);
    let t0 = Instant::now();

    let mut request = GenerationRequest::new("neon skyline", "star3");
    request.batch = 2;
    let job = session.generate(&mut generator, &request, t0).unwrap();
    assert_eq!(session.active_jobs(), 1);

    // First due tick: still processing.
    assert!(session.pump(&mut generator, t0 + TICK).is_empty());
    assert_eq!(session.layer_count(), 0);

    // Second due tick: completion lands both images on the canvas.
    let events = session.pump(&mut generator, t0 + 2 * TICK);
    let [SessionEvent::LayersAdded { job: done, layer_ids }] = events.as_slice() else {
        panic!("expected a single completion event, got {events:?}");
    };
    assert_eq!(*done, job);
    assert_eq!(layer_ids.len(), 2);
    assert_eq!(session.layer_count(), 2);
    assert_eq!(session.active_jobs(), 0);

    // Results stack top-most in order, each above anything older.
    let z: Vec<i64> = session.layers().map(|l| l.z_index).collect();
    assert_eq!(z, vec![1, 2]);
    for layer in session.layers() {
        assert!(matches!(&layer.kind, LayerKind::Image { source } if source.contains("1024/1024")));
    }

    // The terminal event was delivered once; later ticks are silent.
    assert!(session.pump(&mut generator, t0 + 3 * TICK).is_empty());
}

#[test]
fn failure_surfaces_once_and_leaves_canvas_unchanged() {
    let mut projects = InMemoryProjects::new();
    let mut session = open_session(&mut projects);
    let mut generator = SimulatedGenerator::failing();
    let t0 = Instant::now();

    let job = session
        .generate(&mut generator, &GenerationRequest::new("a cat", "star3"), t0)
        .unwrap();

    let events = session.pump(&mut generator, t0 + TICK);
    assert_eq!(
        events,
        vec![SessionEvent::GenerationFailed {
            job,
            reason: "generation failed".to_owned(),
        }]
    );
    assert_eq!(session.layer_count(), 0);
    assert!(session.pump(&mut generator, t0 + 2 * TICK).is_empty());
}

#[test]
fn empty_prompt_is_rejected_before_tracking_starts() {
    let mut projects = InMemoryProjects::new();
    let mut session = open_session(&mut projects);
    let mut generator = SimulatedGenerator::new();

    let err = session
        .generate(
            &mut generator,
            &GenerationRequest::new("  ", "star3"),
            Instant::now(),
        )
        .unwrap_err();
    assert!(matches!(err, easel::EaselError::Validation(_)));
    assert_eq!(session.active_jobs(), 0);
}

#[test]
fn closing_mid_generation_stops_all_polling() {
    let mut projects = InMemoryProjects::new();
    let mut session = open_session(&mut projects);
    let mut generator = SimulatedGenerator::completing_after(5);
    let t0 = Instant::now();

    session
        .generate(&mut generator, &GenerationRequest::new("a cat", "star3"), t0)
        .unwrap();
    session
        .generate(&mut generator, &GenerationRequest::new("a dog", "sdxl"), t0)
        .unwrap();
    assert!(session.pump(&mut generator, t0 + TICK).is_empty());
    assert_eq!(session.active_jobs(), 2);

    session.close();
    assert_eq!(session.active_jobs(), 0);
    assert!(session.pump(&mut generator, t0 + 10 * TICK).is_empty());
    assert_eq!(session.layer_count(), 0);
}

#[test]
fn two_jobs_complete_independently() {
    let mut projects = InMemoryProjects::new();
    let mut session = open_session(&mut projects);
    let mut generator = SimulatedGenerator::completing_after(1);
    let t0 = Instant::now();

    let first = session
        .generate(&mut generator, &GenerationRequest::new("a cat", "star3"), t0)
        .unwrap();
    let second = session
        .generate(
            &mut generator,
            &GenerationRequest::new("a dog", "star3"),
            t0 + Duration::from_millis(400),
        )
        .unwrap();
    assert_ne!(first, second);

    // Only the first job is due at its tick; the second follows on its own
    // cadence.
    let events = session.pump(&mut generator, t0 + TICK);
    assert!(
        matches!(events.as_slice(), [SessionEvent::LayersAdded { job, .. }] if *job == first)
    );
    assert_eq!(session.active_jobs(), 1);

    let events = session.pump(&mut generator, t0 + TICK + Duration::from_millis(400));
    assert!(
        matches!(events.as_slice(), [SessionEvent::LayersAdded { job, .. }] if *job == second)
    );
    assert_eq!(session.active_jobs(), 0);
    assert_eq!(session.layer_count(), 2);
}

#[test]
fn model_catalogue_lists_selectable_backends() {
    let mut generator = SimulatedGenerator::new();
    let models = generator.models(&BearerToken::new("token")).unwrap();
    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["star3", "sdxl"]);
    assert!(models.iter().all(|m| m.default_params.steps > 0));
}
