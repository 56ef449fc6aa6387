//! Sight reduction steps, each a pure function of its inputs

use crate::almanac::AstronomicalModel;
use crate::core::angles::{normalize_degrees, normalize_longitude};
use crate::core::{Bearing, GeoPosition, LineOfPosition, Observation, Reduction};
use crate::validation::InputError;
use log::debug;

/// Corrections configured on the session at the time of a reading
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AltitudeCorrections {
    pub index: Option<f64>,
    pub dip: Option<f64>,
}

/// GHA = (SHA + GHA Aries) mod 360
pub fn greenwich_hour_angle(sha: f64, aries_gha: f64) -> f64 {
    normalize_degrees(sha + aries_gha)
}

/// Point directly beneath a body with declination `dec` and hour angle `gha`
pub fn ground_point(dec: f64, gha: f64) -> GeoPosition {
    let lon = normalize_degrees(360.0 - gha + 180.0) - 180.0;
    GeoPosition::new(dec, normalize_longitude(lon))
}

/// Ha: sextant altitude after index error, then dip
pub fn apparent_altitude(sextant_altitude: f64, corrections: &AltitudeCorrections) -> f64 {
    let mut ha = sextant_altitude;
    if let Some(index) = corrections.index {
        ha -= index;
    }
    if let Some(dip) = corrections.dip {
        ha -= dip;
    }
    ha
}

/// Returns (Ha, refraction, Ho); refraction is taken at Ha, not the raw reading
pub fn observed_altitude<M: AstronomicalModel + ?Sized>(
    model: &M,
    sextant_altitude: f64,
    corrections: &AltitudeCorrections,
) -> (f64, f64, f64) {
    let ha = apparent_altitude(sextant_altitude, corrections);
    let refraction = model.refraction(ha);
    (ha, refraction, ha - refraction)
}

/// Reduce one observation to a line of position.
///
/// With a reference position the azimuth to the ground point is measured
/// from it; without one the line carries no azimuth and cannot be solved.
pub fn reduce_sight<M: AstronomicalModel + ?Sized>(
    model: &M,
    observation: Observation,
    corrections: &AltitudeCorrections,
    reference: Option<GeoPosition>,
) -> Result<LineOfPosition, InputError> {
    let body = model
        .body(&observation.body, observation.instant)
        .ok_or_else(|| InputError::UnknownBody {
            body: observation.body.clone(),
            instant: observation.instant.to_rfc3339(),
        })?;

    let aries_gha = model.earth_rotation_angle(observation.instant);
    let gha = greenwich_hour_angle(body.sha, aries_gha);
    let center = ground_point(body.dec, gha);

    let (ha, refraction, ho) = observed_altitude(model, observation.altitude.value(), corrections);

    debug!("Body: {} at {}", observation.body, observation.instant);
    debug!("SHA = {:.4}, DEC = {:.4}, Aries GHA = {:.4}, GHA = {:.4}", body.sha, body.dec, aries_gha, gha);
    debug!("GP = {}", center);
    debug!(
        "Ha = {:.4} (index {:?}, dip {:?}), Ho = {:.4} (refraction {:.4}), zenith = {:.4}",
        ha,
        corrections.index,
        corrections.dip,
        ho,
        refraction,
        90.0 - ho
    );

    let azimuth = reference.map(|from| Bearing {
        degrees: model.initial_azimuth(&from, &center),
        from,
    });

    let reduction = Reduction {
        sha: body.sha,
        dec: body.dec,
        aries_gha,
        gha,
        index: corrections.index,
        dip: corrections.dip,
        ha,
        refraction,
        ho,
    };

    Ok(LineOfPosition::new(observation, center, reduction, azimuth))
}
