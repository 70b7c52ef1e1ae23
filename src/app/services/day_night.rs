//! Day/night labelling of profiles from solar position
//!
//! Sun elevation follows the NOAA solar calculator (Meeus low-precision
//! series). Sunrise and sunset are located in a window around the profile
//! time and the profile is placed relative to them; polar day and polar night
//! have no transitions in the window and are decided from the instantaneous
//! sun elevation.

use crate::app::interfaces::DayNightClassifier;
use crate::app::models::DayNight;
use crate::constants::{
    DAY_NIGHT_SCAN_STEP_MINUTES, DAY_NIGHT_WINDOW_HOURS, SUNRISE_ELEVATION_DEG,
};
use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;
const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;
const J2000_JULIAN_DAY: f64 = 2_451_545.0;

/// Iterations used to refine a transition inside one scan step
const BISECTION_STEPS: usize = 20;

/// Sun elevation above the horizon in degrees, without refraction
pub fn solar_elevation(latitude: f64, longitude: f64, time: DateTime<Utc>) -> f64 {
    solar_elevation_at(latitude, longitude, unix_seconds(time))
}

fn unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

fn solar_elevation_at(latitude: f64, longitude: f64, unix_secs: f64) -> f64 {
    let julian_day = unix_secs / SECONDS_PER_DAY + UNIX_EPOCH_JULIAN_DAY;
    let t = (julian_day - J2000_JULIAN_DAY) / 36_525.0;

    let mean_longitude = (280.46646 + t * (36_000.76983 + t * 0.000_303_2)).rem_euclid(360.0);
    let mean_anomaly = 357.52911 + t * (35_999.05029 - 0.000_153_7 * t);
    let eccentricity = 0.016_708_634 - t * (0.000_042_037 + 0.000_000_126_7 * t);

    let m = mean_anomaly.to_radians();
    let centre = m.sin() * (1.914_602 - t * (0.004_817 + 0.000_014 * t))
        + (2.0 * m).sin() * (0.019_993 - 0.000_101 * t)
        + (3.0 * m).sin() * 0.000_289;
    let true_longitude = mean_longitude + centre;

    let omega = (125.04 - 1_934.136 * t).to_radians();
    let apparent_longitude = (true_longitude - 0.005_69 - 0.004_78 * omega.sin()).to_radians();

    let mean_obliquity =
        23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.000_59 - t * 0.001_813))) / 60.0) / 60.0;
    let obliquity = (mean_obliquity + 0.002_56 * omega.cos()).to_radians();

    let declination = (obliquity.sin() * apparent_longitude.sin()).asin();

    let y = (obliquity / 2.0).tan().powi(2);
    let l0 = mean_longitude.to_radians();
    let equation_of_time_min = 4.0
        * (y * (2.0 * l0).sin() - 2.0 * eccentricity * m.sin()
            + 4.0 * eccentricity * y * m.sin() * (2.0 * l0).cos()
            - 0.5 * y * y * (4.0 * l0).sin()
            - 1.25 * eccentricity * eccentricity * (2.0 * m).sin())
        .to_degrees();

    let minutes_of_day = unix_secs.rem_euclid(SECONDS_PER_DAY) / 60.0;
    let true_solar_minutes =
        (minutes_of_day + equation_of_time_min + 4.0 * longitude).rem_euclid(1_440.0);
    let hour_angle = (true_solar_minutes / 4.0 - 180.0).to_radians();

    let lat = latitude.to_radians();
    let cos_zenith = (lat.sin() * declination.sin()
        + lat.cos() * declination.cos() * hour_angle.cos())
    .clamp(-1.0, 1.0);

    90.0 - cos_zenith.acos().to_degrees()
}

/// A sunrise or sunset located in the search window
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    unix_secs: f64,
    rising: bool,
}

/// Classifier using sunrise/sunset around the profile time
#[derive(Debug, Clone)]
pub struct SolarClassifier {
    horizon_deg: f64,
    window_hours: i64,
    step_minutes: i64,
}

impl Default for SolarClassifier {
    fn default() -> Self {
        Self {
            horizon_deg: SUNRISE_ELEVATION_DEG,
            window_hours: DAY_NIGHT_WINDOW_HOURS,
            step_minutes: DAY_NIGHT_SCAN_STEP_MINUTES,
        }
    }
}

impl SolarClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn sun_up(&self, latitude: f64, longitude: f64, unix_secs: f64) -> bool {
        solar_elevation_at(latitude, longitude, unix_secs) > self.horizon_deg
    }

    /// Sunrises and sunsets within the window around `centre`, in time order
    fn transitions(&self, latitude: f64, longitude: f64, centre: f64) -> Vec<Transition> {
        let step = (self.step_minutes * 60) as f64;
        let half_window = (self.window_hours * 3_600) as f64;
        let samples = (2.0 * half_window / step).round() as usize;

        let mut transitions = Vec::new();
        let mut previous_time = centre - half_window;
        let mut previous_up = self.sun_up(latitude, longitude, previous_time);

        for i in 1..=samples {
            let time = centre - half_window + i as f64 * step;
            let up = self.sun_up(latitude, longitude, time);
            if up != previous_up {
                let (mut lo, mut hi) = (previous_time, time);
                for _ in 0..BISECTION_STEPS {
                    let mid = 0.5 * (lo + hi);
                    if self.sun_up(latitude, longitude, mid) == previous_up {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                transitions.push(Transition {
                    unix_secs: 0.5 * (lo + hi),
                    rising: up,
                });
            }
            previous_time = time;
            previous_up = up;
        }

        transitions
    }
}

impl DayNightClassifier for SolarClassifier {
    fn classify(&self, latitude: f64, longitude: f64, time: DateTime<Utc>) -> DayNight {
        let t2 = unix_seconds(time);
        let transitions = self.transitions(latitude, longitude, t2);

        let is_day = match transitions.as_slice() {
            [first, second, ..] => {
                let (t0, t1) = (first.unix_secs, second.unix_secs);
                if t0 < t2 && t2 < t1 {
                    first.rising
                } else if t2 > t1 {
                    !first.rising
                } else {
                    !(t2 < t0 && first.rising)
                }
            }
            _ => self.sun_up(latitude, longitude, t2),
        };

        if is_day { DayNight::Day } else { DayNight::Night }
    }
}
