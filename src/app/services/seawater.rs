//! Seawater property conversions
//!
//! Pressure/depth conversion follows the UNESCO 1983 algorithm (Fofonoff &
//! Millard), with the inverse solved by Newton iteration seeded from Saunders
//! (1981). Density uses the EOS-80 one-atmosphere equation of state, which is
//! potential density when evaluated at zero reference pressure.

/// Depth (m, positive downward) from sea pressure (dbar) and latitude (degrees)
///
/// Returns NaN when either input is NaN.
pub fn depth_from_pressure(pressure: f64, latitude: f64) -> f64 {
    let x = (latitude.to_radians()).sin().powi(2);
    let gravity = 9.780318 * (1.0 + (5.2788e-3 + 2.36e-5 * x) * x) + 1.092e-6 * pressure;
    let p = pressure;
    let numerator = (((-1.82e-15 * p + 2.279e-10) * p - 2.2512e-5) * p + 9.72659) * p;
    (numerator / gravity).abs()
}

/// Sea pressure (dbar) at a depth (m, positive downward) and latitude (degrees)
pub fn pressure_from_depth(depth: f64, latitude: f64) -> f64 {
    if !(depth.is_finite() && latitude.is_finite()) {
        return f64::NAN;
    }
    let depth = depth.abs();

    let c1 = 5.92e-3 + 5.25e-3 * latitude.to_radians().sin().powi(2);
    let mut pressure =
        ((1.0 - c1) - ((1.0 - c1).powi(2) - 8.84e-6 * depth).sqrt()) / 4.42e-6;
    if !pressure.is_finite() {
        pressure = depth;
    }

    const STEP: f64 = 1e-3;
    for _ in 0..6 {
        let residual = depth_from_pressure(pressure, latitude) - depth;
        let slope = (depth_from_pressure(pressure + STEP, latitude)
            - depth_from_pressure(pressure - STEP, latitude))
            / (2.0 * STEP);
        if slope == 0.0 || !slope.is_finite() {
            break;
        }
        pressure -= residual / slope;
        if residual.abs() < 1e-10 {
            break;
        }
    }
    pressure
}

/// Density (kg/m^3) at zero reference pressure from practical salinity and
/// temperature (degC), EOS-80
///
/// Returns NaN when either input is NaN or salinity is negative.
pub fn potential_density(salinity: f64, temperature: f64) -> f64 {
    let t = temperature;
    let s = salinity;

    let rho_water = 999.842594 + 6.793952e-2 * t - 9.095290e-3 * t.powi(2)
        + 1.001685e-4 * t.powi(3)
        - 1.120083e-6 * t.powi(4)
        + 6.536332e-9 * t.powi(5);

    let a = 8.24493e-1 - 4.0899e-3 * t + 7.6438e-5 * t.powi(2) - 8.2467e-7 * t.powi(3)
        + 5.3875e-9 * t.powi(4);
    let b = -5.72466e-3 + 1.0227e-4 * t - 1.6546e-6 * t.powi(2);
    let c = 4.8314e-4;

    rho_water + a * s + b * s.powf(1.5) + c * s * s
}

/// Element-wise depth for a pressure series
pub fn depths_from_pressures(pressures: &[f64], latitude: f64) -> Vec<f64> {
    pressures
        .iter()
        .map(|&p| depth_from_pressure(p, latitude))
        .collect()
}

/// Element-wise pressure for a depth series
pub fn pressures_from_depths(depths: &[f64], latitude: f64) -> Vec<f64> {
    depths
        .iter()
        .map(|&z| pressure_from_depth(z, latitude))
        .collect()
}

/// Element-wise potential density; mismatched lengths use the shorter input
pub fn potential_densities(salinity: &[f64], temperature: &[f64]) -> Vec<f64> {
    salinity
        .iter()
        .zip(temperature)
        .map(|(&s, &t)| potential_density(s, t))
        .collect()
}
