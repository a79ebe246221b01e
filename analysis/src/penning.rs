use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::AnalysisErrors;

/// An ideal Penning trap in simulation units: charge in e, mass in u,
/// lengths in micrometres and times in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenningTrap {
    pub charge: f64,
    pub mass: f64,
    /// characteristic dimension
    pub d: f64,
    /// magnetic field strength
    pub b0: f64,
    /// electrode potential
    pub v0: f64,
}

impl Default for PenningTrap {
    fn default() -> Self {
        Self {
            charge: 1.0,
            mass: 40.0,
            d: 500.0,
            b0: 9.65e1,
            v0: 2.41e6,
        }
    }
}

/// The two rotating components of the radial motion.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Phasors {
    omega_plus: f64,
    omega_minus: f64,
    a_plus: f64,
    a_minus: f64,
    phi_plus: f64,
    phi_minus: f64,
}

impl PenningTrap {
    /// Cyclotron frequency.
    pub fn omega_0(&self) -> f64 {
        self.charge * self.b0 / self.mass
    }

    /// Axial frequency.
    pub fn omega_z(&self) -> f64 {
        (2.0 * self.charge * self.v0 / (self.mass * self.d * self.d)).sqrt()
    }

    /// Modified cyclotron and magnetron frequencies `(omega_+, omega_-)`.
    pub fn radial_frequencies(&self) -> Result<(f64, f64), AnalysisErrors> {
        let w0 = self.omega_0();
        let wz = self.omega_z();
        let omega_0_sq = w0 * w0;
        let two_omega_z_sq = 2.0 * wz * wz;
        if omega_0_sq < two_omega_z_sq {
            return Err(AnalysisErrors::UnboundTrap {
                omega_0_sq,
                two_omega_z_sq,
            });
        }
        let root = (omega_0_sq - two_omega_z_sq).sqrt();
        Ok((0.5 * (w0 + root), 0.5 * (w0 - root)))
    }

    fn phasors(&self, r0: &Vector3<f64>, v0: &Vector3<f64>) -> Result<Phasors, AnalysisErrors> {
        let (wp, wm) = self.radial_frequencies()?;
        let (x0, y0) = (r0[0], r0[1]);
        let (vx0, vy0) = (v0[0], v0[1]);
        let split = wp - wm;

        let a_plus = ((vy0 + x0 * wm).powi(2) + (vx0 - y0 * wm).powi(2)).sqrt() / split;
        let a_minus = ((vy0 + x0 * wp).powi(2) + (vx0 - y0 * wp).powi(2)).sqrt() / split;

        // quadrant correction on both phases keys off the + branch
        let upper = x0 * wp + vy0 >= 0.0;
        let mut phi_plus = ((vx0 - y0 * wm) / (x0 * wm + vy0)).atan();
        if upper {
            phi_plus += std::f64::consts::PI;
        }
        let mut phi_minus = ((vx0 - y0 * wp) / (x0 * wp + vy0)).atan();
        if !upper {
            phi_minus += std::f64::consts::PI;
        }

        Ok(Phasors {
            omega_plus: wp,
            omega_minus: wm,
            a_plus,
            a_minus,
            phi_plus,
            phi_minus,
        })
    }

    /// Exact position at time `t` of a single particle released at `r0`
    /// with velocity `v0`.
    pub fn analytical_position(
        &self,
        t: f64,
        r0: &Vector3<f64>,
        v0: &Vector3<f64>,
    ) -> Result<Vector3<f64>, AnalysisErrors> {
        Ok(self.trajectory(&[t], r0, v0)?[0])
    }

    /// [`PenningTrap::analytical_position`] at every time in `times`.
    pub fn trajectory(
        &self,
        times: &[f64],
        r0: &Vector3<f64>,
        v0: &Vector3<f64>,
    ) -> Result<Vec<Vector3<f64>>, AnalysisErrors> {
        let p = self.phasors(r0, v0)?;
        let wz = self.omega_z();
        Ok(times
            .iter()
            .map(|t| {
                let theta_plus = p.omega_plus * t + p.phi_plus;
                let theta_minus = p.omega_minus * t + p.phi_minus;
                Vector3::new(
                    p.a_plus * theta_plus.cos() + p.a_minus * theta_minus.cos(),
                    -(p.a_plus * theta_plus.sin() + p.a_minus * theta_minus.sin()),
                    r0[2] * (wz * t).cos(),
                )
            })
            .collect())
    }
}

/// Share of particles still confined after a run.
pub fn fraction_inside(escaped: f64, n_particles: usize) -> f64 {
    1.0 - escaped / n_particles as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use utilities::{assert_equal, assert_equal_reltol};

    fn initial() -> (Vector3<f64>, Vector3<f64>) {
        (Vector3::new(20.0, 0.0, 20.0), Vector3::new(0.0, 25.0, 0.0))
    }

    #[test]
    fn test_frequencies() {
        let trap = PenningTrap::default();
        assert_equal(trap.omega_0(), 2.4125);
        assert_equal(trap.omega_z(), 0.482f64.sqrt());
        let (wp, wm) = trap.radial_frequencies().unwrap();
        assert_equal(wp + wm, trap.omega_0());
        assert_equal_reltol(wp * wm, 0.5 * trap.omega_z().powi(2), 1e-12);
    }

    #[test]
    fn test_starts_at_initial_position() {
        let trap = PenningTrap::default();
        let (r0, v0) = initial();
        let r = trap.analytical_position(0.0, &r0, &v0).unwrap();
        assert_abs_diff_eq!(r, r0, epsilon = 1e-10);
    }

    #[test]
    fn test_starts_with_initial_velocity() {
        let trap = PenningTrap::default();
        let (r0, v0) = initial();
        let h = 1e-6;
        let ahead = trap.analytical_position(h, &r0, &v0).unwrap();
        let behind = trap.analytical_position(-h, &r0, &v0).unwrap();
        let v = (ahead - behind) / (2.0 * h);
        assert_abs_diff_eq!(v, v0, epsilon = 1e-4);
    }

    #[test]
    fn test_axial_motion_is_harmonic() {
        let trap = PenningTrap::default();
        let (r0, v0) = initial();
        let period = 2.0 * std::f64::consts::PI / trap.omega_z();
        let half = trap.analytical_position(period / 2.0, &r0, &v0).unwrap();
        assert_abs_diff_eq!(half[2], -20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_radius_stays_bounded() {
        let trap = PenningTrap::default();
        let (r0, v0) = initial();
        let times: Vec<f64> = (0..500).map(|i| i as f64 * 0.1).collect();
        let path = trap.trajectory(&times, &r0, &v0).unwrap();
        let (wp, wm) = trap.radial_frequencies().unwrap();
        let a_plus = (25.0 + 20.0 * wm) / (wp - wm);
        let a_minus = (25.0 + 20.0 * wp) / (wp - wm);
        for r in path {
            let rho = (r[0] * r[0] + r[1] * r[1]).sqrt();
            assert!(rho <= a_plus + a_minus + 1e-9);
            assert!(rho >= (a_minus - a_plus) - 1e-9);
        }
    }

    #[test]
    fn test_unbound_trap() {
        let trap = PenningTrap {
            b0: 1.0,
            ..PenningTrap::default()
        };
        assert!(matches!(
            trap.analytical_position(0.0, &Vector3::zeros(), &Vector3::zeros()),
            Err(AnalysisErrors::UnboundTrap { .. })
        ));
    }

    #[test]
    fn test_fraction_inside() {
        assert_equal(fraction_inside(25.0, 100), 0.75);
        assert_equal(fraction_inside(0.0, 100), 1.0);
        assert!(fraction_inside(100.0, 100).abs() < 1e-15);
    }
}
