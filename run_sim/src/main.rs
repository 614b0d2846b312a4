mod settings;

use std::{
    error::Error,
    io::{self, BufWriter, Write},
    path::PathBuf,
    sync::OnceLock,
};

use refract::Surface;
use refract_random::{random_simulation, rand::{rngs::StdRng, SeedableRng}};
use refract_scene::{Frame, PointerButton, Scene, Tool};

use settings::SimConfig;

static CONFIG: OnceLock<SimConfig> = OnceLock::new();

/// A laser folded by a mirror into a glass block, next to a semicircular lens.
fn reference_scene() -> Result<Scene, refract::Error> {
    use PointerButton::{Primary, Secondary};

    let mut scene = Scene::new();

    scene.select(Tool::Laser);
    scene.click([100.0, 500.0], Primary)?;
    scene.click([200.0, 500.0], Primary)?;

    scene.select(Tool::Mirror);
    scene.click([350.0, 400.0], Primary)?;
    scene.click([450.0, 600.0], Primary)?;

    scene.select(Tool::Block);
    for p in [[250.0, 650.0], [350.0, 650.0], [350.0, 750.0], [250.0, 750.0]] {
        scene.click(p, Primary)?;
    }
    scene.click([300.0, 700.0], Secondary)?;

    scene.select(Tool::SemiCircle);
    scene.click([700.0, 300.0], Primary)?;
    scene.click([700.0, 200.0], Primary)?;

    Ok(scene)
}

fn trace(config: &SimConfig) -> Result<Frame, Box<dyn Error>> {
    if let Some(seed) = config.seed {
        log::info!("Random scene, seed {seed}");
        let (surfaces, emitters) =
            random_simulation(&mut StdRng::seed_from_u64(seed), &config.viewport);
        let surfaces: &dyn Surface = &surfaces;

        let paths = emitters
            .iter()
            .filter_map(|emitter| emitter.trace(surfaces, config.viewport, &config.trace))
            .map(|trace| trace.run())
            .collect();

        return Ok(Frame { paths });
    }

    let scene = reference_scene()?;
    log::debug!("{}", scene.prompt());
    Ok(scene.trace_frame(config.viewport, &config.trace))
}

fn write_csv(frame: &Frame, out: impl Write) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    writeln!(out, "beam,step,x,y,intensity,r,g,b")?;

    for (beam, path) in frame.paths.iter().enumerate() {
        for (step, s) in path.samples.iter().enumerate() {
            let (p, c) = (s.position, s.color);
            writeln!(
                out,
                "{beam},{step},{},{},{},{},{},{}",
                p.x, p.y, s.intensity, c.r, c.g, c.b
            )?;
        }
    }

    out.flush()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = CONFIG.get_or_init(|| SimConfig::load(config_path.as_deref()));
    config.validate()?;

    let frame = trace(config)?;

    for (beam, path) in frame.paths.iter().enumerate() {
        log::info!("beam {beam}: {:?} after {} steps", path.end, path.steps);
    }
    log::info!(
        "{} beams, {} samples",
        frame.paths.len(),
        frame.sample_count()
    );

    write_csv(&frame, io::stdout().lock())?;
    Ok(())
}
