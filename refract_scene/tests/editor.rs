use approx::assert_relative_eq;
use refract::{nalgebra::Vector2, Emitter, Float, RefractiveIndex, TraceConfig, TraceState, Viewport};
use refract_scene::{Pending, Placement, PointerButton, Scene, Tool};

const VIEW: Viewport = Viewport::new(1000.0, 1000.0);

fn click(scene: &mut Scene, x: Float, y: Float) {
    scene.click([x, y], PointerButton::Primary).unwrap();
}

#[test]
fn starts_idle() {
    let mut scene = Scene::new();
    assert!(scene.placement().is_idle());
    assert_eq!(scene.prompt(), "Click to select an object");

    // clicking around does nothing
    click(&mut scene, 10.0, 10.0);
    assert!(scene.placement().is_idle());
    assert!(scene.pending().is_none());
    assert!(scene.emitters().is_empty() && scene.mirrors().is_empty() && scene.blocks().is_empty());
}

#[test]
fn placing_a_laser() {
    let mut scene = Scene::new();
    scene.select(Tool::Laser);
    assert_eq!(scene.prompt(), "Click to select Laser Centre");

    click(&mut scene, 100.0, 500.0);
    let Some(Pending::Emitter(preview)) = scene.pending() else {
        panic!("expected a laser preview");
    };
    assert_eq!(preview.decay(), Emitter::PREVIEW_DECAY);
    assert_eq!(scene.prompt(), "Click to select Laser Direction 0.0°");

    scene.pointer_moved([300.0, 500.0]).unwrap();
    assert_eq!(scene.prompt(), "Click to select Laser Direction 90.0°");
    scene.pointer_moved([100.0, 300.0]).unwrap();
    assert_eq!(scene.prompt(), "Click to select Laser Direction 180.0°");

    click(&mut scene, 300.0, 500.0);
    assert!(scene.placement().is_idle());
    assert!(scene.pending().is_none());

    let [laser] = scene.emitters() else {
        panic!("expected one laser");
    };
    assert_eq!(laser.origin(), &Vector2::new(100.0, 500.0));
    assert_relative_eq!(laser.bearing_degrees(), 90.0, epsilon = 1e-9);
    assert_eq!(laser.decay(), Emitter::PLACED_DECAY);
}

#[test]
fn placing_a_mirror() {
    let mut scene = Scene::new();
    scene.select(Tool::Mirror);
    assert_eq!(scene.prompt(), "Click to select Mirror Point 1");

    click(&mut scene, 50.0, 60.0);
    assert_eq!(scene.prompt(), "Click to select Mirror Point 2");

    // the preview never collapses to a point
    scene.pointer_moved([50.0, 60.0]).unwrap();
    let Some(Pending::Mirror(preview)) = scene.pending() else {
        panic!("expected a mirror preview");
    };
    assert_eq!(
        preview.endpoints(),
        [Vector2::new(50.0, 60.0), Vector2::new(51.0, 61.0)]
    );

    click(&mut scene, 150.0, 60.0);
    assert!(scene.placement().is_idle());
    assert_eq!(
        scene.mirrors()[0].endpoints(),
        [Vector2::new(50.0, 60.0), Vector2::new(150.0, 60.0)]
    );
}

#[test]
fn placing_a_block() {
    let mut scene = Scene::new();
    scene.select(Tool::Block);
    assert_eq!(scene.prompt(), "Click to select Block Point 1");

    click(&mut scene, 100.0, 100.0);
    // repeated vertices are ignored
    click(&mut scene, 100.0, 100.0);
    assert_eq!(scene.prompt(), "Click to select Block Point 2");

    click(&mut scene, 200.0, 100.0);
    assert_eq!(scene.prompt(), "Click to select Block Point 3");
    assert!(scene.pending().is_none());

    click(&mut scene, 200.0, 200.0);
    assert_eq!(
        scene.prompt(),
        "Click to select More Block Points, Right-click to stop"
    );
    assert!(matches!(scene.pending(), Some(Pending::Block(_))));

    click(&mut scene, 100.0, 200.0);
    scene
        .click([120.0, 150.0], PointerButton::Secondary)
        .unwrap();

    assert!(scene.placement().is_idle());
    let [block] = scene.blocks() else {
        panic!("expected one block");
    };
    assert_eq!(block.vertices().len(), 4);
    assert_eq!(block.edges().len(), 4);
    assert_eq!(block.index(), RefractiveIndex::CROWN_GLASS);
}

#[test]
fn placing_a_semicircle() {
    let mut scene = Scene::new();
    scene.select(Tool::SemiCircle);
    assert_eq!(scene.prompt(), "Click to select Semicircle Centre");

    click(&mut scene, 500.0, 500.0);
    let Some(Pending::Block(preview)) = scene.pending() else {
        panic!("expected a semicircle preview");
    };
    // unit radius, flat side north-south
    assert_relative_eq!(preview.vertices()[1], Vector2::new(500.0, 501.0), epsilon = 1e-9);

    scene.pointer_moved([500.0, 480.0]).unwrap();
    assert_eq!(scene.prompt(), "Click to select Semicircle Orientation 180.0°");

    click(&mut scene, 500.0, 480.0);
    let [block] = scene.blocks() else {
        panic!("expected one block");
    };
    assert_eq!(block.vertices().len(), 33);
    assert_relative_eq!(block.vertices()[0], Vector2::new(500.0, 520.0), epsilon = 1e-9);
    assert_relative_eq!(block.vertices()[1], Vector2::new(500.0, 480.0), epsilon = 1e-9);
}

#[test]
fn switching_tools_drops_unfinished_objects() {
    let mut scene = Scene::new();

    scene.select(Tool::Laser);
    click(&mut scene, 100.0, 100.0);
    scene.select(Tool::Mirror);
    assert!(scene.pending().is_none());
    assert!(scene.emitters().is_empty());

    click(&mut scene, 10.0, 10.0);
    scene.select(Tool::Block);
    assert!(scene.mirrors().is_empty());
    assert!(matches!(scene.placement(), Placement::BlockVertices { vertices } if vertices.is_empty()));

    // except blocks, which are kept once they have an outline
    for (x, y) in [(10.0, 10.0), (50.0, 10.0), (50.0, 50.0)] {
        click(&mut scene, x, y);
    }
    scene.select(Tool::Laser);
    assert_eq!(scene.blocks().len(), 1);
    assert_eq!(scene.placement(), &Placement::LaserOrigin);
}

#[test]
fn rejects_non_finite_pointers() {
    let mut scene = Scene::new();
    scene.select(Tool::Mirror);
    assert!(scene
        .click([Float::NAN, 0.0], PointerButton::Primary)
        .is_err());
    assert_eq!(scene.placement(), &Placement::MirrorStart);
}

#[test]
fn rejected_clicks_keep_the_placement() {
    // far enough out that a unit offset is lost to rounding
    let far = [1e300, 1e300];
    let mut scene = Scene::new();

    scene.select(Tool::Mirror);
    assert!(scene.click(far, PointerButton::Primary).is_err());
    assert_eq!(scene.placement(), &Placement::MirrorStart);
    assert!(scene.pending().is_none());

    scene.select(Tool::SemiCircle);
    assert!(scene.click(far, PointerButton::Primary).is_err());
    assert_eq!(scene.placement(), &Placement::SemiCircleCenter);
    assert!(scene.pending().is_none());

    // and the next good click carries on from there
    click(&mut scene, 500.0, 500.0);
    assert!(matches!(scene.placement(), Placement::SemiCircleOrientation { .. }));
}

#[test]
fn frames_include_the_preview() {
    let config = TraceConfig::default();
    let mut scene = Scene::new();

    scene.select(Tool::Laser);
    click(&mut scene, 100.0, 500.0);
    click(&mut scene, 200.0, 500.0);

    let frame = scene.trace_frame(VIEW, &config);
    let [path] = &frame.paths[..] else {
        panic!("expected one beam");
    };
    assert_eq!(path.end, TraceState::ExitedBounds);
    assert_relative_eq!(path.samples.last().unwrap().position.x, 1000.0, epsilon = 1e-9);

    // a mirror being placed already blocks the beam
    scene.select(Tool::Mirror);
    click(&mut scene, 300.0, 400.0);
    scene.pointer_moved([300.0, 600.0]).unwrap();

    let frame = scene.trace_frame(VIEW, &config);
    let path = &frame.paths[0];
    let furthest = path
        .samples
        .iter()
        .map(|s| s.position.x)
        .fold(Float::NEG_INFINITY, Float::max);
    assert_relative_eq!(furthest, 300.0, epsilon = 1e-9);
    assert!(path.samples.last().unwrap().position.x <= 0.0);

    // a laser being aimed is traced too
    scene.select(Tool::Laser);
    click(&mut scene, 500.0, 100.0);
    let frame = scene.trace_frame(VIEW, &config);
    assert_eq!(frame.paths.len(), 2);
    assert_eq!(frame.sample_count(), frame.paths[0].samples.len() + frame.paths[1].samples.len());

    scene.emitters_mut()[0].toggle();
    assert_eq!(scene.trace_frame(VIEW, &config).paths.len(), 1);

    scene.reset();
    assert_eq!(scene, Scene::new());
}
