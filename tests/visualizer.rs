//! End-to-end runs of the visualizer against a recording renderer.

use std::time::Duration;

use rossler_attractor::{
    ControlEvent, DrawCall, Param, Parameters, RevealStatus, Renderer, Visualizer,
    VisualizerConfig,
};

#[derive(Default)]
struct RecordingRenderer {
    lengths: Vec<usize>,
    rotations: Vec<f32>,
}

impl Renderer for RecordingRenderer {
    fn draw_polyline(&mut self, call: &DrawCall<'_>) {
        self.lengths.push(call.points.len());
        self.rotations.push(call.rotation);
    }
}

const FRAME: Duration = Duration::from_millis(16);

fn run(vis: &mut Visualizer, renderer: &mut RecordingRenderer, start: Duration, frames: u32) -> Duration {
    let mut now = start;
    for _ in 0..frames {
        vis.frame(now, renderer);
        now += FRAME;
    }
    now
}

#[test]
fn reveals_full_trajectory_in_batches() {
    let mut vis = Visualizer::default();
    let mut renderer = RecordingRenderer::default();
    run(&mut vis, &mut renderer, Duration::ZERO, 500);

    assert_eq!(renderer.lengths.len(), 500);
    assert_eq!(renderer.lengths[0], 20);
    assert!(renderer.lengths.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*renderer.lengths.last().unwrap(), 10_000);
    assert_eq!(vis.reveal().status(), RevealStatus::HoldingFull);
}

#[test]
fn rapid_edits_regenerate_once() {
    let mut vis = Visualizer::default();
    let mut renderer = RecordingRenderer::default();
    let now = run(&mut vis, &mut renderer, Duration::ZERO, 100);

    for i in 0..5u64 {
        vis.handle(ControlEvent::Increment(Param::C), now + Duration::from_millis(i * 50));
    }
    assert_eq!(vis.session().live().c, 6.2);
    assert_eq!(vis.session().committed().c, 5.7);

    let after = run(&mut vis, &mut renderer, now + Duration::from_millis(250), 20);
    assert_eq!(vis.generations(), 1, "commit fired early");

    run(&mut vis, &mut renderer, after, 60);
    assert_eq!(vis.generations(), 2);
    assert_eq!(vis.trajectory().params(), Parameters::new(0.2, 0.2, 6.2));
    assert!(vis.reveal().visible_count() < 10_000);
}

#[test]
fn restart_resets_reveal() {
    let mut vis = Visualizer::default();
    let mut renderer = RecordingRenderer::default();
    let now = run(&mut vis, &mut renderer, Duration::ZERO, 40);
    assert_eq!(vis.reveal().visible_count(), 800);

    vis.handle(ControlEvent::Restart, now);
    assert_eq!(vis.reveal().visible_count(), 0);
    run(&mut vis, &mut renderer, now, 1);
    assert_eq!(vis.reveal().visible_count(), 20);
}

#[test]
fn reset_commits_defaults_through_commit_path() {
    let mut vis = Visualizer::default();
    let mut renderer = RecordingRenderer::default();
    vis.handle(ControlEvent::Decrement(Param::A), Duration::ZERO);
    let now = run(&mut vis, &mut renderer, Duration::ZERO, 60);
    assert_eq!(vis.trajectory().params().a, 0.1);
    assert_eq!(vis.generations(), 2);

    vis.handle(ControlEvent::Increment(Param::B), now);
    vis.handle(ControlEvent::Reset, now);
    assert_eq!(vis.session().live(), Parameters::DEFAULT);
    run(&mut vis, &mut renderer, now, 1);
    assert_eq!(vis.trajectory().params(), Parameters::DEFAULT);
    assert_eq!(vis.generations(), 3);

    // Nothing left pending from the edit made before the reset.
    run(&mut vis, &mut renderer, now + FRAME, 120);
    assert_eq!(vis.generations(), 3);
}

#[test]
fn pause_freezes_reveal_and_rotation() {
    let mut vis = Visualizer::default();
    let mut renderer = RecordingRenderer::default();
    let now = run(&mut vis, &mut renderer, Duration::ZERO, 10);
    vis.handle(ControlEvent::TogglePause, now);
    let visible = vis.reveal().visible_count();
    run(&mut vis, &mut renderer, now, 10);
    assert_eq!(vis.reveal().visible_count(), visible);
    assert_eq!(vis.frame_count(), 10);
    let frozen = &renderer.rotations[10..];
    assert!(frozen.iter().all(|r| *r == renderer.rotations[9]));
}

#[test]
fn looping_replays_after_period() {
    let mut config = VisualizerConfig::default();
    config.trajectory.point_count = 200;
    let mut vis = Visualizer::new(config);
    vis.handle(ControlEvent::ToggleLooping, Duration::ZERO);
    let mut renderer = RecordingRenderer::default();

    run(&mut vis, &mut renderer, Duration::from_secs(1), 20);
    assert_eq!(vis.reveal().status(), RevealStatus::HoldingFull);

    run(&mut vis, &mut renderer, Duration::from_millis(30_020), 1);
    assert_eq!(vis.reveal().visible_count(), 20);
    assert_eq!(vis.reveal().status(), RevealStatus::Filling);
}

#[test]
fn teardown_drops_pending_commit() {
    let mut vis = Visualizer::default();
    let mut renderer = RecordingRenderer::default();
    vis.handle(ControlEvent::Increment(Param::A), Duration::ZERO);
    vis.teardown();
    run(&mut vis, &mut renderer, Duration::ZERO, 120);
    assert_eq!(vis.generations(), 1);
    assert_eq!(vis.session().committed(), Parameters::DEFAULT);
}

#[test]
fn divergent_parameters_draw_only_finite_prefix() {
    let mut config = VisualizerConfig::default();
    config.trajectory.dt = 0.5;
    config.trajectory.transient_steps = 0;
    config.trajectory.point_count = 200;
    config.session.defaults = Parameters::new(5.0, 5.0, -50.0);
    let mut vis = Visualizer::new(config);
    let mut renderer = RecordingRenderer::default();
    run(&mut vis, &mut renderer, Duration::ZERO, 20);

    let limit = vis.trajectory().first_non_finite().unwrap();
    assert!(renderer.lengths.iter().all(|len| *len <= limit));
    assert_eq!(vis.reveal().status(), RevealStatus::HoldingFull);
}
