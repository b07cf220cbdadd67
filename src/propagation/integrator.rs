use nalgebra::DVector;

use crate::prelude::{Duration, Epoch, Error};

/// Classical fixed step Runge-Kutta 4 integrator,
/// operating on the flattened state vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4 {
    /// Nominal step (s)
    pub step_s: f64,
}

impl Rk4 {
    /// Creates a new [Rk4] integrator
    pub fn new(step_s: f64) -> Self {
        Self { step_s }
    }

    /// Performs a single step of `h` seconds (may be negative).
    pub fn step<F>(&self, t: Epoch, y: &DVector<f64>, h: f64, f: &F) -> Result<DVector<f64>, Error>
    where
        F: Fn(Epoch, &DVector<f64>) -> Result<DVector<f64>, Error>,
    {
        let t_half = t + Duration::from_seconds(h / 2.0);
        let t_full = t + Duration::from_seconds(h);

        let k1 = f(t, y)?;
        let k2 = f(t_half, &(y + &k1 * (h / 2.0)))?;
        let k3 = f(t_half, &(y + &k2 * (h / 2.0)))?;
        let k4 = f(t_full, &(y + &k3 * h))?;

        Ok(y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0))
    }

    /// Integrates from `t0` to `t1`, forward or backward.
    /// The last step is shortened to land exactly on `t1`.
    pub fn integrate<F>(
        &self,
        t0: Epoch,
        y0: DVector<f64>,
        t1: Epoch,
        f: &F,
    ) -> Result<DVector<f64>, Error>
    where
        F: Fn(Epoch, &DVector<f64>) -> Result<DVector<f64>, Error>,
    {
        let nominal = Duration::from_seconds(self.step_s).abs();
        if nominal <= Duration::ZERO {
            return Err(Error::Configuration("integration step below 1ns"));
        }

        let (mut t, mut y) = (t0, y0);

        while t != t1 {
            let remaining = t1 - t;

            let dt = if remaining.abs() < nominal {
                remaining
            } else if remaining > Duration::ZERO {
                nominal
            } else {
                -nominal
            };

            y = self.step(t, &y, dt.to_seconds(), f)?;
            t += dt;
        }

        Ok(y)
    }
}

#[cfg(test)]
mod test {
    use super::Rk4;
    use crate::prelude::{Duration, Epoch, Error};
    use nalgebra::DVector;

    #[test]
    fn exponential_decay() {
        // y' = -y / 10
        let rk4 = Rk4::new(1.0);
        let t0 = Epoch::default();
        let t1 = t0 + Duration::from_seconds(20.5);

        let f = |_: Epoch, y: &DVector<f64>| -> Result<DVector<f64>, Error> { Ok(y * -0.1) };

        let y = rk4
            .integrate(t0, DVector::from_vec(vec![1.0, -2.0]), t1, &f)
            .unwrap();

        let expected = (-2.05_f64).exp();
        assert!((y[0] - expected).abs() < 1.0E-7);
        assert!((y[1] + 2.0 * expected).abs() < 1.0E-7);

        // and back
        let y = rk4.integrate(t1, y, t0, &f).unwrap();
        assert!((y[0] - 1.0).abs() < 1.0E-7);
    }

    #[test]
    fn null_step() {
        let f = |_: Epoch, y: &DVector<f64>| -> Result<DVector<f64>, Error> { Ok(y.clone()) };

        let t0 = Epoch::default();
        let t1 = t0 + Duration::from_seconds(1.0);

        for step_s in [0.0, 1.0E-10] {
            let rk4 = Rk4::new(step_s);
            assert!(matches!(
                rk4.integrate(t0, DVector::from_vec(vec![1.0]), t1, &f),
                Err(Error::Configuration(_))
            ));
        }

        // rejected even when there is nothing to integrate
        let y = Rk4::new(0.0).integrate(t0, DVector::from_vec(vec![1.0]), t0, &f);
        assert!(y.is_err());
    }
}
