use std::path::{Path, PathBuf};

use datafile::{Component, TrapRun};
use plotting::{PlotRequest, Series, plot_trajectories};
use tracing::info;

use super::{open_npz, save, stem};
use crate::SimvizErrors;
use crate::config::SimvizConfig;

const AXES: [&str; 3] = ["x", "y", "z"];

pub fn run(config: &SimvizConfig, single: Option<&Path>, runs: &[PathBuf]) -> Result<(), SimvizErrors> {
    if let Some(path) = single {
        let run = TrapRun::load(&mut open_npz(config, path)?)?;
        let mut figure = config.figure();
        plot_trajectories(figure.surface_mut(), &time_request(&run, 2)?);
        save(config, &figure, &format!("single-tz-{}.svg", stem(path)))?;
    }

    for path in runs {
        let run = TrapRun::load(&mut open_npz(config, path)?)?;
        let name = stem(path);
        info!("{name}: {} particles, {} steps", run.n_particles(), run.n_steps());

        let mut figure = config.square_figure();
        plot_trajectories(figure.surface_mut(), &plane_request(&run)?);
        save(config, &figure, &format!("{name}-xy.svg"))?;

        for axis in [0, 2] {
            let mut figure = config.square_figure();
            plot_trajectories(figure.surface_mut(), &phase_request(&run, axis)?);
            save(config, &figure, &format!("{name}-phasespace-{}.svg", AXES[axis]))?;
        }
    }
    Ok(())
}

fn particle_name(p: usize) -> String {
    format!("Particle_{}", p + 1)
}

/// One cartesian coordinate of every particle against time.
pub(crate) fn time_request(run: &TrapRun, axis: usize) -> Result<PlotRequest, SimvizErrors> {
    let mut request = PlotRequest::new()
        .xlabel("t [us]")
        .ylabel(format!("{} [um]", AXES[axis]));
    for p in 0..run.n_particles() {
        let values = run.component(Component::Position, axis, p)?;
        request = request.push(Series::from_xy(particle_name(p), run.times(), &values)?);
    }
    Ok(request)
}

pub(crate) fn plane_request(run: &TrapRun) -> Result<PlotRequest, SimvizErrors> {
    let mut request = PlotRequest::new().xlabel("x [um]").ylabel("y [um]");
    for p in 0..run.n_particles() {
        let x = run.component(Component::Position, 0, p)?;
        let y = run.component(Component::Position, 1, p)?;
        request = request.push(Series::from_xy(particle_name(p), &x, &y)?);
    }
    Ok(request)
}

/// Position against velocity along one axis.
pub(crate) fn phase_request(run: &TrapRun, axis: usize) -> Result<PlotRequest, SimvizErrors> {
    let label = AXES[axis];
    let mut request = PlotRequest::new()
        .xlabel(format!("{label} [um]"))
        .ylabel(format!("v_{label} [um/us]"));
    for p in 0..run.n_particles() {
        let r = run.component(Component::Position, axis, p)?;
        let v = run.component(Component::Velocity, axis, p)?;
        request = request.push(Series::from_xy(particle_name(p), &r, &v)?);
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datafile::MemoryContainer;
    use ndarray::{Array, Array1};
    use plotting::Surface;

    fn run() -> TrapRun {
        let positions = Array::from_shape_fn((3, 5, 2), |(a, i, p)| (a * 10 + i + p * 100) as f64);
        let velocities = positions.mapv(|v| v * 0.5);
        let mut container = MemoryContainer::new()
            .with("times", Array1::linspace(0.0, 0.4, 5).into_dyn())
            .with("positions", positions.into_dyn())
            .with("velocities", velocities.into_dyn());
        TrapRun::load(&mut container).unwrap()
    }

    #[test]
    fn test_time_request() {
        let request = time_request(&run(), 2).unwrap();
        assert_eq!(request.series.len(), 2);
        assert_eq!(request.ylabel.as_deref(), Some("z [um]"));
        assert_eq!(request.series[0].x(), run().times().to_vec());
        assert_eq!(request.series[1].first(), Some((0.0, 120.0)));
    }

    #[test]
    fn test_plane_request_draws_every_particle() {
        let mut surface = Surface::new();
        plot_trajectories(&mut surface, &plane_request(&run()).unwrap());
        assert_eq!(surface.legend_labels(), vec!["Particle 1", "Particle 2"]);
        assert_eq!(surface.markers().count(), 8);
        assert_eq!(surface.xlabel.as_deref(), Some("x [um]"));
    }

    #[test]
    fn test_phase_request() {
        let request = phase_request(&run(), 0).unwrap();
        assert_eq!(request.series[0].last(), Some((4.0, 2.0)));
        assert_eq!(request.ylabel.as_deref(), Some("v_x [um/us]"));
    }
}
