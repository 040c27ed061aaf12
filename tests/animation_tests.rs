//! Animation System Tests
//!
//! Tests for:
//! - CurveKind easing identities, index table and plot sampling
//! - Timeline loop/clamp policy
//! - BoneClip hold-edge, lerp and slerp sampling with desynchronized tracks
//! - AnimClip bone indexing and whole-skeleton sampling
//! - Animator binding, ticking and best-effort pose application

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Quat, Vec3};

use contraption::animation::curves::{CurveKind, PLOT_MAX, PLOT_MIN, PLOT_SAMPLES};
use contraption::animation::{
    AnimClip, AnimMoment, Animator, AnimatorState, BoneClip, BoneCursor, SkeletonConsumer,
    Timeline,
};
use contraption::errors::{AnimationError, Result};
use contraption::settings::{AnimatorSettings, DeltaUnit};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// Same rotation, allowing for the q / -q double cover.
fn same_rotation(a: Quat, b: Quat) -> bool {
    a.dot(b).abs() > 1.0 - 1e-5
}

fn walking_bone(name: &str) -> BoneClip {
    BoneClip::new(
        name,
        vec![0.0, 1.0, 2.0],
        vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 0.0)],
        vec![0.0, 4.0],
        vec![Quat::IDENTITY, Quat::from_rotation_y(FRAC_PI_2)],
    )
    .unwrap()
}

// ============================================================================
// Curves
// ============================================================================

#[test]
fn curve_sine_normalization() {
    assert!(approx(CurveKind::EaseInSine.ease(0.0), 0.0));
    assert!(approx(CurveKind::EaseOutSine.ease(1.0), 1.0));
}

#[test]
fn curve_every_family_maps_zero_to_zero_and_one_to_one() {
    for kind in CurveKind::ALL {
        let start = kind.ease(0.0);
        let end = kind.ease(1.0);
        assert!(approx(start, 0.0), "{kind}(0) = {start}");
        assert!((end - 1.0).abs() < 1e-4, "{kind}(1) = {end}");
    }
}

#[test]
fn curve_in_out_variants_pass_through_half() {
    for kind in [
        CurveKind::EaseInOutSine,
        CurveKind::EaseInOutQuad,
        CurveKind::EaseInOutCubic,
        CurveKind::EaseInOutQuart,
        CurveKind::EaseInOutQuint,
        CurveKind::EaseInOutExpo,
        CurveKind::EaseInOutCirc,
        CurveKind::EaseInOutBack,
        CurveKind::EaseInOutElastic,
        CurveKind::EaseInOutBounce,
    ] {
        let mid = kind.ease(0.5);
        assert!((mid - 0.5).abs() < 1e-3, "{kind}(0.5) = {mid}");
    }
}

#[test]
fn curve_back_and_elastic_overshoot() {
    assert!(CurveKind::EaseInBack.ease(0.2) < 0.0);
    assert!(CurveKind::EaseOutBack.ease(0.8) > 1.0);
    let elastic_max = CurveKind::EaseOutElastic
        .plot(PLOT_SAMPLES)
        .into_iter()
        .fold(f32::MIN, f32::max);
    assert!(elastic_max > 1.0);
}

#[test]
fn curve_input_is_clamped() {
    assert!(approx(CurveKind::EaseInQuad.ease(-3.0), 0.0));
    assert!(approx(CurveKind::EaseInQuad.ease(7.0), 1.0));
    assert!(approx(CurveKind::Linear.ease(f32::NAN), 0.0));
}

#[test]
fn curve_polynomial_shapes() {
    assert!(approx(CurveKind::EaseInQuad.ease(0.5), 0.25));
    assert!(approx(CurveKind::EaseOutQuad.ease(0.5), 0.75));
    assert!(approx(CurveKind::EaseInCubic.ease(0.5), 0.125));
    assert!(approx(CurveKind::EaseInOutCubic.ease(0.25), 0.0625));
    assert!(approx(CurveKind::Linear.ease(0.3), 0.3));
}

#[test]
fn curve_index_table() {
    assert_eq!(CurveKind::from_index(0), Some(CurveKind::EaseInSine));
    assert_eq!(CurveKind::from_index(17), Some(CurveKind::EaseInOutExpo));
    assert_eq!(CurveKind::from_index(29), Some(CurveKind::EaseInOutBounce));
    assert_eq!(CurveKind::from_index(30), Some(CurveKind::Linear));
    assert_eq!(CurveKind::EaseOutBounce.index(), 28);
    assert_eq!(CurveKind::EaseInOutElastic.name(), "EaseInOutElastic");
}

#[test]
fn curve_plot_samples_from_zero() {
    let plot = CurveKind::EaseInQuad.plot(PLOT_SAMPLES);
    assert_eq!(plot.len(), 120);
    assert!(approx(plot[0], 0.0));
    assert!(approx(plot[60], 0.25));

    for kind in CurveKind::ALL {
        for value in kind.plot(PLOT_SAMPLES) {
            assert!(
                (PLOT_MIN - 0.2..=PLOT_MAX + 0.2).contains(&value),
                "{kind} leaves the preview range: {value}"
            );
        }
    }
}

// ============================================================================
// Timeline
// ============================================================================

#[test]
fn timeline_loop_wraps_to_zero() {
    let mut timeline = Timeline::new(10.0, true);
    timeline.set_time(9.0);
    timeline.advance(2.0);
    assert!(approx(timeline.time(), 0.0), "got {}", timeline.time());
}

#[test]
fn timeline_clamp_holds_at_duration() {
    let mut timeline = Timeline::new(10.0, false);
    timeline.set_time(9.0);
    timeline.advance(2.0);
    assert!(approx(timeline.time(), 10.0), "got {}", timeline.time());
    assert!(timeline.is_finished());
}

#[test]
fn timeline_zero_delta_is_idempotent() {
    for loops in [true, false] {
        let mut timeline = Timeline::new(10.0, loops);
        timeline.set_time(10.0);
        for _ in 0..5 {
            timeline.advance(0.0);
        }
        assert!(approx(timeline.time(), 10.0));
    }
}

#[test]
fn timeline_exact_end_does_not_wrap() {
    let mut timeline = Timeline::new(4.0, true);
    timeline.advance(4.0);
    assert!(approx(timeline.time(), 4.0));
}

#[test]
fn timeline_unit_interval() {
    let mut timeline = Timeline::new(8.0, true);
    timeline.advance(2.0);
    assert_eq!(timeline.unit_interval(), Some(0.25));

    let empty = Timeline::new(0.0, true);
    assert_eq!(empty.unit_interval(), None);
}

#[test]
fn timeline_never_goes_negative() {
    let mut timeline = Timeline::new(5.0, false);
    timeline.advance(-3.0);
    assert!(approx(timeline.time(), 0.0));
    timeline.set_time(-1.0);
    assert!(approx(timeline.time(), 0.0));
}

// ============================================================================
// BoneClip
// ============================================================================

#[test]
fn bone_clip_holds_first_key_at_or_before_zero() {
    let bone = walking_bone("Hips");
    for t in [0.0, -0.5, -100.0] {
        let moment = bone.sample(t);
        assert_eq!(moment.bone_name, "Hips");
        assert!(approx_vec3(moment.position, Vec3::ZERO));
        assert!(same_rotation(moment.rotation, Quat::IDENTITY));
    }
}

#[test]
fn bone_clip_holds_last_key_past_the_end() {
    let bone = walking_bone("Hips");
    for t in [4.0, 4.5, 1000.0] {
        let moment = bone.sample(t);
        assert!(approx_vec3(moment.position, Vec3::new(1.0, 2.0, 0.0)));
        assert!(same_rotation(moment.rotation, Quat::from_rotation_y(FRAC_PI_2)));
    }
}

#[test]
fn bone_clip_position_is_lerped_between_adjacent_keys() {
    let bone = walking_bone("Hips");
    let (t0, p0) = (1.0, Vec3::new(1.0, 0.0, 0.0));
    let (t1, p1) = (2.0, Vec3::new(1.0, 2.0, 0.0));

    for i in 1..10 {
        let t = t0 + (t1 - t0) * i as f32 / 10.0;
        let expected = p0.lerp(p1, (t - t0) / (t1 - t0));
        let got = bone.sample(t).position;
        assert!(approx_vec3(got, expected), "t={t}: {got} != {expected}");
    }
}

#[test]
fn bone_clip_tracks_are_searched_independently() {
    let bone = walking_bone("Hips");

    // Position track has three keys, rotation track two with a longer span
    let moment = bone.sample(1.5);
    assert!(approx_vec3(moment.position, Vec3::new(1.0, 1.0, 0.0)));
    let expected = Quat::IDENTITY.slerp(Quat::from_rotation_y(FRAC_PI_2), 1.5 / 4.0);
    assert!(same_rotation(moment.rotation, expected));

    let moment = bone.sample(0.5);
    assert!(approx_vec3(moment.position, Vec3::new(0.5, 0.0, 0.0)));
    let expected = Quat::IDENTITY.slerp(Quat::from_rotation_y(FRAC_PI_2), 0.5 / 4.0);
    assert!(same_rotation(moment.rotation, expected));
}

#[test]
fn bone_clip_last_position_key_holds_whole_moment() {
    let bone = walking_bone("Hips");
    let last_rotation = Quat::from_rotation_y(FRAC_PI_2);

    // Rotation track runs to 4, but the pose is held from the last position key
    for t in [2.0, 2.5, 3.0, 3.99] {
        let moment = bone.sample(t);
        assert!(approx_vec3(moment.position, Vec3::new(1.0, 2.0, 0.0)), "t={t}");
        assert!(same_rotation(moment.rotation, last_rotation), "t={t}");

        let mut cursor = BoneCursor::default();
        bone.sample_with_cursor(1.0, &mut cursor);
        let moment = bone.sample_with_cursor(t, &mut cursor);
        assert!(same_rotation(moment.rotation, last_rotation), "cursor t={t}");
    }
}

#[test]
fn bone_clip_slerp_endpoints_are_exact() {
    let r0 = Quat::IDENTITY;
    let r1 = Quat::from_rotation_x(0.8);
    let r2 = Quat::from_rotation_z(-1.2);
    let bone = BoneClip::new(
        "Arm",
        vec![0.0, 2.0],
        vec![Vec3::ZERO, Vec3::ZERO],
        vec![0.0, 1.0, 2.0],
        vec![r0, r1, r2],
    )
    .unwrap();

    assert!(same_rotation(bone.sample(0.0).rotation, r0));
    assert!(same_rotation(bone.sample(1.0).rotation, r1));
    assert!(same_rotation(bone.sample(2.0).rotation, r2));
}

#[test]
fn bone_clip_cursor_sampling_matches_stateless() {
    let bone = walking_bone("Hips");
    let mut cursor = BoneCursor::default();
    for i in 0..=50 {
        let t = i as f32 * 0.1;
        let a = bone.sample(t);
        let b = bone.sample_with_cursor(t, &mut cursor);
        assert!(approx_vec3(a.position, b.position), "t={t}");
        assert!(same_rotation(a.rotation, b.rotation), "t={t}");
    }
}

#[test]
fn bone_clip_normalizes_rotation_keys() {
    let bone = BoneClip::new(
        "Spine",
        vec![0.0],
        vec![Vec3::ZERO],
        vec![0.0],
        vec![Quat::from_xyzw(0.0, 0.0, 0.0, 2.0)],
    )
    .unwrap();
    assert!(approx(bone.sample(0.0).rotation.length(), 1.0));
}

#[test]
fn bone_clip_rejects_malformed_keys() {
    let empty = BoneClip::new("A", vec![], vec![], vec![0.0], vec![Quat::IDENTITY]);
    assert!(matches!(empty, Err(AnimationError::MalformedClip { .. })));

    let decreasing = BoneClip::new(
        "B",
        vec![0.0, 2.0, 1.0],
        vec![Vec3::ZERO; 3],
        vec![0.0],
        vec![Quat::IDENTITY],
    );
    assert!(matches!(decreasing, Err(AnimationError::MalformedClip { .. })));

    let zero_rotation = BoneClip::new(
        "C",
        vec![0.0],
        vec![Vec3::ZERO],
        vec![0.0],
        vec![Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)],
    );
    assert!(matches!(zero_rotation, Err(AnimationError::MalformedClip { .. })));

    let nan_time = BoneClip::new(
        "D",
        vec![f32::NAN],
        vec![Vec3::ZERO],
        vec![0.0],
        vec![Quat::IDENTITY],
    );
    assert!(matches!(nan_time, Err(AnimationError::MalformedClip { .. })));
}

// ============================================================================
// AnimClip
// ============================================================================

#[test]
fn clip_samples_bones_in_insertion_order() {
    let clip = AnimClip::new(
        "walk",
        vec![walking_bone("Hips"), walking_bone("Spine"), walking_bone("Head")],
        4.0,
        1.0,
        true,
    )
    .unwrap();

    let names: Vec<String> = clip
        .sample_all(1.0)
        .into_iter()
        .map(|m| m.bone_name)
        .collect();
    assert_eq!(names, ["Hips", "Spine", "Head"]);
}

#[test]
fn clip_add_bone_overwrites_in_place() {
    let mut clip = AnimClip::new(
        "walk",
        vec![walking_bone("Hips"), walking_bone("Spine")],
        4.0,
        1.0,
        true,
    )
    .unwrap();

    let replacement = BoneClip::constant("Hips", Vec3::splat(9.0), Quat::IDENTITY).unwrap();
    let replaced = clip.add_bone(replacement);
    assert!(replaced.is_some());
    assert_eq!(clip.bones().len(), 2);

    let moments = clip.sample_all(1.0);
    assert_eq!(moments[0].bone_name, "Hips");
    assert!(approx_vec3(moments[0].position, Vec3::splat(9.0)));

    assert!(clip.add_bone(walking_bone("Head")).is_none());
    assert_eq!(clip.bones().len(), 3);
    assert!(clip.bone("Head").is_some());
}

#[test]
fn clip_duration_from_keys() {
    let clip = AnimClip::from_bone_clips("walk", vec![walking_bone("Hips")], 24.0, false).unwrap();
    assert!(approx(clip.duration(), 4.0));
    assert!(approx(clip.ticks_per_second(), 24.0));
    assert!(!clip.loops());
}

#[test]
fn clip_rejects_invalid_timing() {
    let err = AnimClip::new("bad", vec![], -1.0, 24.0, true).unwrap_err();
    assert!(matches!(err, AnimationError::InvalidClipTiming { .. }));

    let err = AnimClip::new("bad", vec![], 1.0, f32::INFINITY, true).unwrap_err();
    assert!(matches!(err, AnimationError::InvalidClipTiming { .. }));
}

// ============================================================================
// Animator
// ============================================================================

#[derive(Default)]
struct RecordingSkeleton {
    known: Vec<&'static str>,
    updates: Vec<AnimMoment>,
    finalized: usize,
}

impl RecordingSkeleton {
    fn with_members(known: &[&'static str]) -> Self {
        Self {
            known: known.to_vec(),
            ..Default::default()
        }
    }
}

impl SkeletonConsumer for RecordingSkeleton {
    fn update_member(&mut self, name: &str, position: Vec3, rotation: Quat) -> Result<()> {
        if !self.known.contains(&name) {
            return Err(AnimationError::MemberNotFound(name.to_string()));
        }
        self.updates.push(AnimMoment::new(name, position, rotation));
        Ok(())
    }

    fn finalize_mesh(&mut self) {
        self.finalized += 1;
    }
}

fn ticks() -> AnimatorSettings {
    AnimatorSettings {
        delta_unit: DeltaUnit::Ticks,
        ..Default::default()
    }
}

#[test]
fn animator_tick_while_idle_is_a_no_op() {
    let mut animator = Animator::default();
    let mut skeleton = RecordingSkeleton::with_members(&["Hips"]);

    assert_eq!(animator.state(), AnimatorState::Idle);
    let report = animator.tick(0.5, &mut skeleton);

    assert_eq!(report.applied, 0);
    assert_eq!(report.missed, 0);
    assert!(skeleton.updates.is_empty());
    assert_eq!(skeleton.finalized, 0);
}

#[test]
fn animator_bind_restarts_timeline() {
    let clip = Arc::new(
        AnimClip::new("walk", vec![walking_bone("Hips")], 4.0, 1.0, false).unwrap(),
    );
    let mut animator = Animator::with_clip(clip.clone(), ticks());
    let mut skeleton = RecordingSkeleton::with_members(&["Hips"]);

    animator.tick(1.5, &mut skeleton);
    assert!(approx(animator.time(), 1.5));

    animator.bind(clip);
    assert_eq!(animator.state(), AnimatorState::Playing);
    assert!(approx(animator.time(), 0.0));
    assert!(approx(animator.timeline().duration(), 4.0));
    assert!(!animator.timeline().loops());
}

#[test]
fn animator_pushes_sampled_pose_and_finalizes() {
    let clip = Arc::new(
        AnimClip::new("walk", vec![walking_bone("Hips")], 4.0, 1.0, true).unwrap(),
    );
    let mut animator = Animator::with_clip(clip, ticks());
    let mut skeleton = RecordingSkeleton::with_members(&["Hips"]);

    let report = animator.tick(1.5, &mut skeleton);

    assert_eq!(report.applied, 1);
    assert_eq!(skeleton.finalized, 1);
    assert!(approx_vec3(skeleton.updates[0].position, Vec3::new(1.0, 1.0, 0.0)));
    assert_eq!(animator.last_moments().len(), 1);
}

#[test]
fn animator_missing_member_does_not_abort_frame() {
    let clip = Arc::new(
        AnimClip::new(
            "walk",
            vec![walking_bone("Hips"), walking_bone("Ghost"), walking_bone("Head")],
            4.0,
            1.0,
            true,
        )
        .unwrap(),
    );
    let mut animator = Animator::with_clip(clip, ticks());
    let mut skeleton = RecordingSkeleton::with_members(&["Hips", "Head"]);

    let report = animator.tick(1.0, &mut skeleton);

    assert_eq!(report.applied, 2);
    assert_eq!(report.missed, 1);
    assert_eq!(skeleton.finalized, 1);
    let names: Vec<&str> = skeleton.updates.iter().map(|m| m.bone_name.as_str()).collect();
    assert_eq!(names, ["Hips", "Head"]);
}

#[test]
fn animator_scales_seconds_by_ticks_per_second() {
    let clip = Arc::new(
        AnimClip::new("walk", vec![walking_bone("Hips")], 40.0, 10.0, true).unwrap(),
    );
    let mut animator = Animator::with_clip(clip, AnimatorSettings::default());
    let mut skeleton = RecordingSkeleton::with_members(&["Hips"]);

    animator.tick(0.25, &mut skeleton);
    assert!(approx(animator.time(), 2.5), "got {}", animator.time());
}

#[test]
fn animator_looping_clip_wraps() {
    let clip = Arc::new(
        AnimClip::new("walk", vec![walking_bone("Hips")], 4.0, 1.0, true).unwrap(),
    );
    let mut animator = Animator::with_clip(clip, ticks());
    let mut skeleton = RecordingSkeleton::with_members(&["Hips"]);

    animator.tick(3.0, &mut skeleton);
    animator.tick(2.0, &mut skeleton);

    assert!(approx(animator.time(), 0.0));
    assert!(approx_vec3(skeleton.updates[1].position, Vec3::ZERO));
}

#[test]
fn animator_unbind_returns_to_idle() {
    let clip = Arc::new(
        AnimClip::new("walk", vec![walking_bone("Hips")], 4.0, 1.0, true).unwrap(),
    );
    let mut animator = Animator::with_clip(clip, ticks());
    assert!(animator.unbind().is_some());
    assert_eq!(animator.state(), AnimatorState::Idle);
    assert!(animator.clip().is_none());
}
