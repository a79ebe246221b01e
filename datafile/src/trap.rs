use ndarray::{Array3, ArrayD, Axis, Ix2, Ix3};

use crate::DataFileErrors;
use crate::container::DatasetContainer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Position,
    Velocity,
}

/// One Penning-trap simulation: sample times plus positions and velocities
/// stored as `[axis, step, particle]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrapRun {
    times: Vec<f64>,
    positions: Array3<f64>,
    velocities: Array3<f64>,
}

impl TrapRun {
    pub fn load(container: &mut impl DatasetContainer) -> Result<Self, DataFileErrors> {
        let times = last_axis(container.dataset("times")?);
        let positions = state_array(container.dataset("positions")?, "positions", times.len())?;
        let velocities = state_array(container.dataset("velocities")?, "velocities", times.len())?;
        if positions.shape() != velocities.shape() {
            return Err(DataFileErrors::Shape {
                name: "velocities".to_string(),
                expected: format!("{:?}", positions.shape()),
                found: velocities.shape().to_vec(),
            });
        }
        Ok(Self {
            times,
            positions,
            velocities,
        })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn n_steps(&self) -> usize {
        self.times.len()
    }

    pub fn n_particles(&self) -> usize {
        self.positions.shape()[2]
    }

    pub fn position(&self, p: usize) -> Result<Vec<[f64; 3]>, DataFileErrors> {
        self.vectors(&self.positions, p)
    }

    pub fn velocity(&self, p: usize) -> Result<Vec<[f64; 3]>, DataFileErrors> {
        self.vectors(&self.velocities, p)
    }

    /// One cartesian axis (0, 1, 2 for x, y, z) of particle `p` over time.
    pub fn component(
        &self,
        kind: Component,
        axis: usize,
        p: usize,
    ) -> Result<Vec<f64>, DataFileErrors> {
        self.check_particle(p)?;
        if axis >= 3 {
            return Err(DataFileErrors::ColumnOutOfRange(axis, 3));
        }
        let data = match kind {
            Component::Position => &self.positions,
            Component::Velocity => &self.velocities,
        };
        Ok(data
            .index_axis(Axis(0), axis)
            .index_axis(Axis(1), p)
            .to_vec())
    }

    fn vectors(&self, data: &Array3<f64>, p: usize) -> Result<Vec<[f64; 3]>, DataFileErrors> {
        self.check_particle(p)?;
        Ok((0..self.n_steps())
            .map(|i| [data[[0, i, p]], data[[1, i, p]], data[[2, i, p]]])
            .collect())
    }

    fn check_particle(&self, p: usize) -> Result<(), DataFileErrors> {
        if p >= self.n_particles() {
            return Err(DataFileErrors::ParticleOutOfRange(p, self.n_particles()));
        }
        Ok(())
    }
}

/// The first lane along the last axis, so `(n,)` and `(1, n)` both give `n` values.
fn last_axis(data: ArrayD<f64>) -> Vec<f64> {
    let n = data.shape().last().copied().unwrap_or(0);
    data.iter().take(n).copied().collect()
}

fn state_array(data: ArrayD<f64>, name: &str, n_steps: usize) -> Result<Array3<f64>, DataFileErrors> {
    let found = data.shape().to_vec();
    let shape_error = || DataFileErrors::Shape {
        name: name.to_string(),
        expected: format!("[3, {n_steps}, n_particles]"),
        found: found.clone(),
    };
    let data = data.into_dimensionality::<Ix3>().map_err(|_| shape_error())?;
    if data.shape()[0] != 3 || data.shape()[1] != n_steps {
        return Err(shape_error());
    }
    Ok(data)
}

/// Escape counts per driving frequency from a parameter sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct EscapeData {
    pub frequencies: Vec<f64>,
    pub escaped: Vec<f64>,
}

impl EscapeData {
    pub fn load(container: &mut impl DatasetContainer) -> Result<Self, DataFileErrors> {
        let data = container.dataset("escape_data")?;
        let found = data.shape().to_vec();
        let data = data
            .into_dimensionality::<Ix2>()
            .ok()
            .filter(|d| d.ncols() >= 2)
            .ok_or_else(|| DataFileErrors::Shape {
                name: "escape_data".to_string(),
                expected: "[n, 2]".to_string(),
                found,
            })?;
        Ok(Self {
            frequencies: data.column(0).to_vec(),
            escaped: data.column(1).to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;
    use ndarray::{Array, IxDyn, array};

    fn two_particle_run() -> MemoryContainer {
        // value encodes axis * 100 + step * 10 + particle
        let positions = Array::from_shape_fn((3, 4, 2), |(a, i, p)| (a * 100 + i * 10 + p) as f64);
        let velocities = positions.mapv(|v| -v);
        MemoryContainer::new()
            .with("times", array![[0.0, 0.1, 0.2, 0.3]].into_dyn())
            .with("positions", positions.into_dyn())
            .with("velocities", velocities.into_dyn())
    }

    #[test]
    fn test_load_trap_run() {
        let run = TrapRun::load(&mut two_particle_run()).unwrap();
        assert_eq!(run.times(), &[0.0, 0.1, 0.2, 0.3]);
        assert_eq!(run.n_particles(), 2);
        assert_eq!(
            run.component(Component::Position, 2, 0).unwrap(),
            vec![200.0, 210.0, 220.0, 230.0]
        );
        assert_eq!(
            run.component(Component::Velocity, 0, 1).unwrap(),
            vec![-1.0, -11.0, -21.0, -31.0]
        );
        assert_eq!(run.position(1).unwrap()[2], [21.0, 121.0, 221.0]);
        assert_eq!(run.velocity(0).unwrap()[0], [0.0, -100.0, -200.0]);
    }

    #[test]
    fn test_particle_out_of_range() {
        let run = TrapRun::load(&mut two_particle_run()).unwrap();
        assert!(matches!(
            run.position(2),
            Err(DataFileErrors::ParticleOutOfRange(2, 2))
        ));
    }

    #[test]
    fn test_bad_positions_shape() {
        let mut container = two_particle_run().with("positions", ArrayD::zeros(IxDyn(&[2, 4, 2])));
        assert!(matches!(
            TrapRun::load(&mut container),
            Err(DataFileErrors::Shape { .. })
        ));
    }

    #[test]
    fn test_escape_data() {
        let mut container = MemoryContainer::new().with(
            "escape_data",
            array![[0.2, 0.0], [0.4, 12.0], [0.6, 100.0]].into_dyn(),
        );
        let data = EscapeData::load(&mut container).unwrap();
        assert_eq!(data.frequencies, vec![0.2, 0.4, 0.6]);
        assert_eq!(data.escaped, vec![0.0, 12.0, 100.0]);
    }
}
