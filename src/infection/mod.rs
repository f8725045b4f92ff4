/////////////////////////////////////////////////////////////////////////////////////
//
// Epitools - epidemic model utilities
//
// infection module
//
// converts a gamma-distributed infection onset time into daily probability
// masses used by the transmission step
//
////////////////////////////////////////////////////////////////////////////////////

use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::{ContinuousCDF, Gamma};
use std::error;
use std::fmt;

/// Gamma onset-time distribution with the usual shape / loc / scale
/// parameterization. Holds both the CDF used to discretize the profile and
/// a sampler for drawing individual onset times.
#[derive(Debug, Clone)]
pub struct GammaParams {
    shape: f64,
    loc: f64,
    scale: f64,
    cdf: Gamma,
    sampler: rand_distr::Gamma<f64>,
}

impl GammaParams {
    /// shape and scale must be finite and positive, loc finite.
    pub fn new(shape: f64, loc: f64, scale: f64) -> Result<GammaParams, ProfileError> {
        if !shape.is_finite() || shape <= 0.0 {
            return Err(ProfileError::InvalidGamma { parm: "shape", value: shape });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ProfileError::InvalidGamma { parm: "scale", value: scale });
        }
        if !loc.is_finite() {
            return Err(ProfileError::InvalidGamma { parm: "loc", value: loc });
        }
        Ok(GammaParams {
            shape,
            loc,
            scale,
            cdf: Gamma::new(shape, 1.0 / scale).expect("gamma cdf"),
            sampler: rand_distr::Gamma::new(shape, scale).expect("gamma sampler"),
        })
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn loc(&self) -> f64 {
        self.loc
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Cumulative probability of onset by time x. Zero below loc.
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= self.loc {
            0.0
        } else {
            self.cdf.cdf(x - self.loc)
        }
    }

    /// Draw one continuous onset time.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.loc + self.sampler.sample(rng)
    }
}

/// Discretize the onset distribution into unit-day buckets:
/// mass[d] = CDF(d + 1) - CDF(d), renormalized so the period-day profile
/// sums to 1 despite truncation at period days.
pub fn he_infection_profile(period: usize, gamma: &GammaParams) -> Vec<f64> {
    let mut mass: Vec<f64> = Vec::with_capacity(period);
    for day in 0..period {
        mass.push(gamma.cdf((day + 1) as f64) - gamma.cdf(day as f64));
    }
    normalize(&mut mass);
    mass
}

/// Day-of-first-transmission mass under competing risks: each day's mass is
/// discounted by the probability that no transmission happened on any
/// earlier day, then the result is renormalized.
pub fn home_daily_infectivity(base_mass: &[f64]) -> Vec<f64> {
    let mut mass: Vec<f64> = Vec::with_capacity(base_mass.len());
    let mut escape = 1.0; // probability of reaching the day transmission-free
    for &m in base_mass {
        mass.push(escape * m);
        escape *= 1.0 - m;
    }
    normalize(&mut mass);
    mass
}

fn normalize(mass: &mut [f64]) {
    let total: f64 = mass.iter().sum();
    if total > 0.0 {
        for m in mass.iter_mut() {
            *m /= total;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    InvalidGamma { parm: &'static str, value: f64 },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProfileError::InvalidGamma { parm, value } => {
                write!(f, "bad gamma parameter {} - {}", parm, value)
            }
        }
    }
}

impl error::Error for ProfileError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::seeded_rng;

    #[test]
    fn profile_is_a_probability_mass() {
        let gamma = GammaParams::new(2.0, 0.0, 3.0).unwrap();
        for &period in &[1usize, 7, 14, 60] {
            let mass = he_infection_profile(period, &gamma);
            assert_eq!(mass.len(), period);
            assert!(mass.iter().all(|&m| m >= 0.0));
            let total: f64 = mass.iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn profile_puts_little_mass_on_day_zero() {
        // gamma(shape 2, scale 3) rises from zero, so the first bucket is
        // lighter than the bucket around the mode
        let gamma = GammaParams::new(2.0, 0.0, 3.0).unwrap();
        let mass = he_infection_profile(14, &gamma);
        assert!(mass[0] < mass[2]);
    }

    #[test]
    fn infectivity_is_a_probability_mass_of_same_length() {
        let gamma = GammaParams::new(2.0, 0.0, 3.0).unwrap();
        let base = he_infection_profile(14, &gamma);
        let infectivity = home_daily_infectivity(&base);
        assert_eq!(infectivity.len(), base.len());
        assert!(infectivity.iter().all(|&m| m >= 0.0));
        let total: f64 = infectivity.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn infectivity_decays_geometrically_for_uniform_hazard() {
        // constant per-day hazard m leaves successive days in ratio 1 - m
        let base = vec![0.25; 4];
        let infectivity = home_daily_infectivity(&base);
        for d in 0..3 {
            assert!((infectivity[d + 1] / infectivity[d] - 0.75).abs() < 1e-12);
        }
        assert!(infectivity[0] > infectivity[3]);
    }

    #[test]
    fn gamma_parameters_are_validated() {
        assert!(GammaParams::new(-1.0, 0.0, 1.0).is_err());
        assert!(GammaParams::new(0.0, 0.0, 1.0).is_err());
        assert!(GammaParams::new(2.0, 0.0, 0.0).is_err());
        assert!(GammaParams::new(2.0, f64::NAN, 1.0).is_err());
        assert!(GammaParams::new(2.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn loc_shifts_the_cdf() {
        let base = GammaParams::new(2.0, 0.0, 3.0).unwrap();
        let shifted = GammaParams::new(2.0, 2.0, 3.0).unwrap();
        assert!((shifted.cdf(7.0) - base.cdf(5.0)).abs() < 1e-12);
        assert_eq!(shifted.cdf(1.5), 0.0);
    }

    #[test]
    fn samples_stay_above_loc() {
        let gamma = GammaParams::new(2.0, 5.0, 1.0).unwrap();
        let mut rng = seeded_rng(23);
        for _ in 0..200 {
            assert!(gamma.sample(&mut rng) >= 5.0);
        }
    }
}
