//! Synthetic candidate-site generation.
//!
//! Produces tables of plausible Toronto-area site records for development
//! and testing; the pipeline itself treats any conforming table as opaque
//! input. Every draw comes from a single seeded generator, so a given
//! (n_samples, seed) pair always yields the same table.

use crate::primitives::Vector;
use crate::table::{SiteTable, FEATURE_COLUMNS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Approximate Toronto boundaries.
const LAT_RANGE: (f32, f32) = (43.58, 43.85);
const LON_RANGE: (f32, f32) = (-79.62, -79.12);

/// Generates a table of `n_samples` synthetic candidate sites.
///
/// Attribute distributions: bounded ratios are uniform on their natural
/// ranges; elevation (m) and annual rainfall (mm) are normal;
/// population density is exponential; property value is lognormal.
///
/// # Examples
///
/// ```
/// use esponja::synthetic::generate_sites;
///
/// let table = generate_sites(100, 42);
/// assert_eq!(table.shape(), (100, 15));
///
/// let again = generate_sites(100, 42);
/// let lat = table.column("latitude").expect("column exists");
/// let lat_again = again.column("latitude").expect("column exists");
/// assert_eq!(lat.as_slice(), lat_again.as_slice());
/// ```
#[must_use]
pub fn generate_sites(n_samples: usize, seed: u64) -> SiteTable {
    let mut rng = StdRng::seed_from_u64(seed);

    let columns: Vec<(String, Vector<f32>)> = FEATURE_COLUMNS
        .iter()
        .map(|&name| {
            let values: Vec<f32> = (0..n_samples).map(|_| sample_attribute(name, &mut rng)).collect();
            (name.to_string(), Vector::from_vec(values))
        })
        .collect();

    SiteTable::new(columns).expect("generated columns are well-formed by construction")
}

/// Draws one value for the named attribute.
fn sample_attribute(name: &str, rng: &mut StdRng) -> f32 {
    match name {
        "latitude" => rng.gen_range(LAT_RANGE.0..LAT_RANGE.1),
        "longitude" => rng.gen_range(LON_RANGE.0..LON_RANGE.1),
        "flood_risk" => rng.gen_range(0.0..1.0),
        "elevation" => sample_normal(rng, 100.0, 20.0),
        "proximity_to_water" => rng.gen_range(0.0..5.0), // km
        "green_space_density" => rng.gen_range(0.0..1.0),
        "population_density" => sample_exponential(rng, 1000.0),
        "impervious_surface_ratio" => rng.gen_range(0.3..0.9),
        "annual_rainfall" => sample_normal(rng, 800.0, 50.0), // mm
        "heat_island_intensity" => rng.gen_range(0.0..5.0),   // °C above baseline
        "distance_to_storm_drains" => rng.gen_range(0.0..2.0), // km
        "soil_permeability" => rng.gen_range(0.0..1.0),
        "land_availability" => rng.gen_range(0.0..1.0),
        "property_value" => sample_lognormal(rng, 11.0, 1.0),
        "community_support" => rng.gen_range(0.0..1.0),
        other => unreachable!("unknown feature column '{other}'"),
    }
}

/// Samples N(mean, std) via the Box-Muller transform.
fn sample_normal(rng: &mut StdRng, mean: f32, std: f32) -> f32 {
    let u1: f32 = rng.gen::<f32>().max(1e-10);
    let u2: f32 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
    mean + std * z
}

/// Samples Exp(mean) by inverse CDF.
fn sample_exponential(rng: &mut StdRng, mean: f32) -> f32 {
    let u: f32 = rng.gen::<f32>().max(1e-10);
    -mean * u.ln()
}

/// Samples LogNormal(mu, sigma) as exp of a normal deviate.
fn sample_lognormal(rng: &mut StdRng, mu: f32, sigma: f32) -> f32 {
    sample_normal(rng, mu, sigma).exp()
}
