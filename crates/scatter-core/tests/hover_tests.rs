// Pointer routing: ray picking, hover emphasis transitions and click selection.

use glam::{Vec3, Vec4};
use scatter_core::*;

const W: f32 = 800.0;
const H: f32 = 600.0;

fn setup(records: &[CollectionRecord]) -> (Camera, MarkerRegistry) {
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 80.0), Vec3::ZERO, 60.0, 0.1, 1000.0);
    camera.set_aspect_from(W as u32, H as u32);
    let reg = MarkerRegistry::from_collections(records, |t| LabelMetrics::estimate(t, 48.0, 4.0));
    (camera, reg)
}

fn screen_of(camera: &Camera, p: Vec3) -> PointerSample {
    let clip = camera.view_proj() * Vec4::new(p.x, p.y, p.z, 1.0);
    let ndc = clip.truncate() / clip.w;
    PointerSample {
        x: (ndc.x + 1.0) * 0.5 * W,
        y: (1.0 - ndc.y) * 0.5 * H,
        width: W,
        height: H,
    }
}

fn emphasised(reg: &MarkerRegistry) -> Vec<MarkerId> {
    reg.iter().filter(|m| m.scale() != BASE_SCALE).map(|m| m.id).collect()
}

#[test]
fn ray_sphere_hits_front_and_misses_side() {
    let hit = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0).unwrap();
    assert!((hit - 3.0).abs() < 1e-5);
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
    assert!(ray_sphere(Vec3::ZERO, -Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
}

#[test]
fn ray_starting_inside_sphere_hits_exit_point() {
    let t = ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::X, Vec3::new(0.0, 0.0, 5.0), 3.0).unwrap();
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn picks_nearest_marker_along_ray() {
    let (camera, reg) = setup(&[
        CollectionRecord::new("far", [0.0, 0.0, 0.0], 0xff0000),
        CollectionRecord::new("near", [0.0, 0.0, 10.0], 0x00ff00),
    ]);
    let ray = camera.ray_from_ndc(glam::Vec2::ZERO);
    let (id, t) = pick_nearest(&ray, &reg, MARKER_RADIUS).unwrap();
    assert_eq!(reg.get(id).unwrap().name, "near");
    assert!((t - (70.0 - MARKER_RADIUS)).abs() < 1e-3);
}

#[test]
fn hover_emphasises_marker_and_restores_previous() {
    let (camera, mut reg) = setup(&fallback_collections());
    let mut router = PointerRouter::new();
    assert_eq!(router.hover(), HoverState::Unhovered);

    let a = reg.find("Teste A").unwrap();
    let c = reg.find("Teste C").unwrap();

    router.on_pointer_move(screen_of(&camera, reg.world_position(a)));
    let f = router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
    assert_eq!(f.hover, HoverState::HoveringMarker(a));
    assert!(f.hover_changed);
    assert_eq!(reg.get(a).unwrap().scale(), HOVER_SCALE);

    router.on_pointer_move(screen_of(&camera, reg.world_position(c)));
    let f = router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
    assert_eq!(f.hover, HoverState::HoveringMarker(c));
    assert_eq!(reg.get(a).unwrap().scale(), BASE_SCALE);
    assert_eq!(reg.get(c).unwrap().scale(), HOVER_SCALE);

    router.on_pointer_move(PointerSample { x: 5.0, y: 5.0, width: W, height: H });
    let f = router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
    assert_eq!(f.hover, HoverState::Unhovered);
    assert!(emphasised(&reg).is_empty());
}

#[test]
fn at_most_one_marker_emphasised_across_frames() {
    let (camera, mut reg) = setup(&fallback_collections());
    let mut router = PointerRouter::new();
    let targets: Vec<Vec3> = reg.iter().map(|m| reg.world_position(m.id)).collect();
    let path = [0usize, 1, 1, 2, 0, 2, 1, 0];
    for (step, &i) in path.iter().enumerate() {
        let sample = if step % 3 == 2 {
            PointerSample { x: 1.0, y: 1.0, width: W, height: H }
        } else {
            screen_of(&camera, targets[i])
        };
        router.on_pointer_move(sample);
        let f = router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
        let e = emphasised(&reg);
        assert!(e.len() <= 1);
        assert_eq!(e.first().copied(), f.hover.marker());
    }
}

#[test]
fn unchanged_hover_reports_no_transition() {
    let (camera, mut reg) = setup(&fallback_collections());
    let mut router = PointerRouter::new();
    let b = reg.find("Teste B").unwrap();
    router.on_pointer_move(screen_of(&camera, reg.world_position(b)));
    assert!(router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE).hover_changed);
    assert!(!router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE).hover_changed);
}

#[test]
fn click_on_hovered_marker_selects_it() {
    let (camera, mut reg) = setup(&fallback_collections());
    let mut router = PointerRouter::new();
    let b = reg.find("Teste B").unwrap();
    router.on_pointer_move(screen_of(&camera, reg.world_position(b)));
    router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);

    router.on_click();
    let f = router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
    assert_eq!(f.selected, Some(b));
    // the click is consumed
    let f = router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
    assert_eq!(f.selected, None);
}

#[test]
fn click_on_empty_space_selects_nothing() {
    let (camera, mut reg) = setup(&fallback_collections());
    let mut router = PointerRouter::new();
    router.on_pointer_move(PointerSample { x: 2.0, y: 2.0, width: W, height: H });
    router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
    router.on_click();
    let f = router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
    assert_eq!(f.selected, None);
}

#[test]
fn leaving_the_surface_clears_hover() {
    let (camera, mut reg) = setup(&fallback_collections());
    let mut router = PointerRouter::new();
    let b = reg.find("Teste B").unwrap();
    router.on_pointer_move(screen_of(&camera, reg.world_position(b)));
    router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
    router.on_pointer_leave();
    let f = router.update(&camera, &mut reg, MARKER_RADIUS, HOVER_SCALE);
    assert_eq!(f.hover, HoverState::Unhovered);
    assert_eq!(reg.get(b).unwrap().scale(), BASE_SCALE);
}

#[test]
fn unsized_surface_has_no_ndc() {
    let s = PointerSample { x: 10.0, y: 10.0, width: 0.0, height: 0.0 };
    assert!(s.ndc().is_none());
    let c = PointerSample { x: 400.0, y: 300.0, width: W, height: H };
    assert_eq!(c.ndc(), Some(glam::Vec2::ZERO));
}
