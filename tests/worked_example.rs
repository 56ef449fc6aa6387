//! Three-star morning fix of 2018 November 15, checked against values worked
//! by hand from the Nautical Almanac daily pages for that date

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use sightfix::core::spherical::central_angle;
use sightfix::core::{Degrees, FixMethod, GeoPosition, Meters};
use sightfix::processing::{FixSession, Reading, SessionEvent};
use sightfix::ReferenceAlmanac;

const ONE_ARC_MINUTE: f64 = 1.0 / 60.0;

fn dm(degrees: f64, minutes: f64) -> f64 {
    Degrees::from_dm(degrees, minutes).value()
}

struct WorkedSight {
    body: &'static str,
    time: (u32, u32, u32),
    sextant_altitude: f64,
    /// GHA Aries at the sight
    aries_gha: f64,
    gha: f64,
    dec: f64,
    /// Ho after index error, dip for 2 m and refraction
    observed_altitude: f64,
    /// Zn from the dead-reckoning position
    azimuth: f64,
}

fn worked_sights() -> Vec<WorkedSight> {
    vec![
        WorkedSight {
            body: "Dubhe",
            time: (8, 32, 15),
            sextant_altitude: dm(55.0, 18.4),
            aries_gha: dm(182.0, 26.6),
            gha: dm(16.0, 14.2),
            dec: dm(61.0, 38.8),
            observed_altitude: dm(55.0, 15.5),
            azimuth: 17.2,
        },
        WorkedSight {
            body: "Arcturus",
            time: (8, 30, 30),
            sextant_altitude: dm(27.0, 9.0),
            aries_gha: dm(182.0, 0.3),
            gha: dm(327.0, 53.1),
            dec: dm(19.0, 5.3),
            observed_altitude: dm(27.0, 4.9),
            azimuth: 82.4,
        },
        WorkedSight {
            body: "Regulus",
            time: (8, 28, 15),
            sextant_altitude: dm(70.0, 48.7),
            aries_gha: dm(181.0, 26.5),
            gha: dm(29.0, 6.2),
            dec: dm(11.0, 52.5),
            observed_altitude: dm(70.0, 46.2),
            azimuth: 155.9,
        },
    ]
}

fn dead_reckoning() -> GeoPosition {
    GeoPosition::new(dm(29.0, 42.2), -dm(37.0, 2.5))
}

/// Plotted fix: incenter of the cocked hat, 29°40.6'N 36°56.7'W
fn worked_fix() -> GeoPosition {
    GeoPosition::new(dm(29.0, 40.6), -dm(36.0, 56.7))
}

fn sight_log() -> Vec<SessionEvent> {
    let mut events = vec![
        SessionEvent::Date(NaiveDate::from_ymd_opt(2018, 11, 15).unwrap()),
        SessionEvent::DeadReckoning(dead_reckoning()),
        SessionEvent::Zone(0),
        SessionEvent::Index(Degrees::from_arc_minutes(-0.3)),
        SessionEvent::Height(Meters(2.0)),
    ];
    events.extend(worked_sights().iter().map(|sight| {
        let (h, m, s) = sight.time;
        SessionEvent::Reading(Reading {
            body: sight.body.to_string(),
            time: NaiveTime::from_hms_opt(h, m, s).unwrap(),
            altitude: Degrees(sight.sextant_altitude),
        })
    }));
    events
}

fn run_session() -> FixSession<ReferenceAlmanac> {
    let mut session = FixSession::new(ReferenceAlmanac::new());
    let events = sight_log();
    assert_eq!(session.process_all(&events).unwrap(), events.len());
    session
}

#[test]
fn test_ground_points_match_almanac() {
    let session = run_session();
    assert_eq!(session.lines().len(), 3);

    for (line, sight) in session.lines().iter().zip(worked_sights()) {
        let (h, m, s) = sight.time;
        assert_eq!(line.body(), sight.body);
        assert_eq!(
            line.timestamp(),
            Utc.with_ymd_and_hms(2018, 11, 15, h, m, s).unwrap()
        );

        let reduction = line.reduction();
        assert!(
            (reduction.aries_gha - sight.aries_gha).abs() < ONE_ARC_MINUTE,
            "{}: GHA Aries {} vs {}",
            sight.body,
            reduction.aries_gha,
            sight.aries_gha
        );
        assert!(
            (reduction.gha - sight.gha).abs() < ONE_ARC_MINUTE,
            "{}: GHA {} vs {}",
            sight.body,
            reduction.gha,
            sight.gha
        );
        assert!((reduction.dec - sight.dec).abs() < ONE_ARC_MINUTE);

        // West longitude is the GHA for GHA under 180°, east is 360° - GHA
        let expected_lon = if sight.gha < 180.0 { -sight.gha } else { 360.0 - sight.gha };
        assert!((line.center().lat - sight.dec).abs() < ONE_ARC_MINUTE);
        assert!((line.center().lon - expected_lon).abs() < ONE_ARC_MINUTE);
    }
}

#[test]
fn test_zenith_distances_match_worked_reduction() {
    let session = run_session();

    for (line, sight) in session.lines().iter().zip(worked_sights()) {
        let reduction = line.reduction();
        assert!((reduction.index.unwrap() * 60.0 + 0.3).abs() < 1e-9);
        assert!((reduction.dip.unwrap() * 60.0 - 2.5).abs() < 0.05);
        assert!(
            (line.radius() - (90.0 - sight.observed_altitude)).abs() < 0.1 * ONE_ARC_MINUTE,
            "{}: zenith distance {} vs {}",
            sight.body,
            line.radius(),
            90.0 - sight.observed_altitude
        );
        let azimuth = line.azimuth_from(&dead_reckoning()).unwrap();
        assert!((azimuth - sight.azimuth).abs() < 0.5, "{}: Zn {}", sight.body, azimuth);
    }
}

#[test]
fn test_three_star_fix_matches_plot() {
    let session = run_session();
    let fix = session.compute_fix().unwrap();

    assert_eq!(fix.lines_used, 3);
    match fix.method {
        FixMethod::CockedHat { inscribed_radius_nm } => {
            assert!(inscribed_radius_nm > 0.0 && inscribed_radius_nm < 1.0);
        }
        other => panic!("expected a cocked hat, got {:?}", other),
    }

    let miss = central_angle(&fix.position, &worked_fix());
    assert!(
        miss < ONE_ARC_MINUTE,
        "fix {} is {:.2}' from the plotted fix",
        fix.position,
        miss * 60.0
    );
    // The sights move the position about four miles from dead reckoning
    assert!(central_angle(&fix.position, &dead_reckoning()) > 3.0 * ONE_ARC_MINUTE);
}
