//! Report output for lines of position and fixes
//!
//! Reports come in two renderings: degree-minute text for reading off a
//! plotting sheet, and JSON for other tools.

use crate::core::{Fix, FixMethod, GeoPosition, LineOfPosition, ARC_MINUTES_PER_DEGREE, NAUTICAL_MILES_PER_DEGREE};
use crate::validation::GeometryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of position as reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineReport {
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub ground_point: GeoPosition,
    pub observed_altitude_deg: f64,
    pub zenith_distance_deg: f64,
    pub zenith_distance_nm: f64,
    /// Missing when no reference position was set for the reading
    pub azimuth_deg: Option<f64>,
}

/// Outcome of solving the session's lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FixReport {
    Resolved {
        position: GeoPosition,
        resolution: FixMethod,
        lines_used: usize,
    },
    Unresolved {
        reason: String,
    },
}

/// Everything a session produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub reference: Option<GeoPosition>,
    pub lines: Vec<LineReport>,
    pub fix: FixReport,
}

/// Collects session results into a [`SessionReport`]
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    /// Decimal places kept for angles
    pub precision: u8,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn build(
        &self,
        reference: Option<GeoPosition>,
        lines: &[LineOfPosition],
        fix: &Result<Fix, GeometryError>,
    ) -> SessionReport {
        SessionReport {
            reference: reference.map(|position| self.round_position(position)),
            lines: lines.iter().map(|line| self.line_report(line)).collect(),
            fix: match fix {
                Ok(fix) => FixReport::Resolved {
                    position: self.round_position(fix.position),
                    resolution: fix.method,
                    lines_used: fix.lines_used,
                },
                Err(error) => FixReport::Unresolved {
                    reason: error.to_string(),
                },
            },
        }
    }

    fn line_report(&self, line: &LineOfPosition) -> LineReport {
        LineReport {
            body: line.body().to_string(),
            timestamp: line.timestamp(),
            ground_point: self.round_position(line.center()),
            observed_altitude_deg: self.round(line.reduction().ho),
            zenith_distance_deg: self.round(line.radius()),
            zenith_distance_nm: self.round(line.radius() * NAUTICAL_MILES_PER_DEGREE),
            azimuth_deg: line.azimuth().map(|bearing| self.round(bearing.degrees)),
        }
    }

    fn round_position(&self, position: GeoPosition) -> GeoPosition {
        GeoPosition::new(self.round(position.lat), self.round(position.lon))
    }

    fn round(&self, value: f64) -> f64 {
        let multiplier = 10_f64.powi(self.precision as i32);
        (value * multiplier).round() / multiplier
    }
}

/// Hemisphere letter, whole degrees and decimal minutes, e.g. `N 29°42.2'`
fn degrees_minutes(value: f64, positive: char, negative: char) -> String {
    let hemisphere = if value < 0.0 { negative } else { positive };
    // Round on total tenths of a minute so 59.96' carries into the degrees
    let tenths = (value.abs() * ARC_MINUTES_PER_DEGREE * 10.0).round();
    let whole_degrees = (tenths / (ARC_MINUTES_PER_DEGREE * 10.0)).floor();
    let minutes = tenths / 10.0 - whole_degrees * ARC_MINUTES_PER_DEGREE;
    format!("{} {}°{:04.1}'", hemisphere, whole_degrees, minutes)
}

pub fn format_latitude(lat: f64) -> String {
    degrees_minutes(lat, 'N', 'S')
}

pub fn format_longitude(lon: f64) -> String {
    degrees_minutes(lon, 'E', 'W')
}

pub fn format_position(position: &GeoPosition) -> String {
    format!("{}, {}", format_latitude(position.lat), format_longitude(position.lon))
}

/// Human-readable text formatter
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Single line per entry
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_text(&self, report: &SessionReport) -> String {
        let mut output = String::new();

        if !self.compact {
            match &report.reference {
                Some(reference) => output.push_str(&format!("Reference: {}\n", format_position(reference))),
                None => output.push_str("Reference: not set\n"),
            }
            output.push_str(&format!("Lines of position: {}\n", report.lines.len()));
        }

        for line in &report.lines {
            let azimuth = line
                .azimuth_deg
                .map(|az| format!("{:05.1}°", az))
                .unwrap_or_else(|| "---".to_string());
            if self.compact {
                output.push_str(&format!(
                    "{} GP {} Zn {} ZD {:.1}nm\n",
                    line.body,
                    format_position(&line.ground_point),
                    azimuth,
                    line.zenith_distance_nm
                ));
            } else {
                output.push_str(&format!("  {} at {}\n", line.body, line.timestamp.format("%Y-%m-%d %H:%M:%SZ")));
                output.push_str(&format!("    GP:       {}\n", format_position(&line.ground_point)));
                output.push_str(&format!("    Ho:       {:.4}°\n", line.observed_altitude_deg));
                output.push_str(&format!(
                    "    Zenith:   {:.4}° ({:.1} nm)\n",
                    line.zenith_distance_deg, line.zenith_distance_nm
                ));
                output.push_str(&format!("    Azimuth:  {}\n", azimuth));
            }
        }

        match &report.fix {
            FixReport::Resolved { position, resolution, lines_used } => {
                let method = match resolution {
                    FixMethod::TwoLines => "two lines".to_string(),
                    FixMethod::CockedHat { inscribed_radius_nm } => {
                        format!("cocked hat, inscribed radius {:.1} nm", inscribed_radius_nm)
                    }
                };
                output.push_str(&format!(
                    "Fix: {} ({}, {} lines)\n",
                    format_position(position),
                    method,
                    lines_used
                ));
            }
            FixReport::Unresolved { reason } => {
                output.push_str(&format!("No fix: {}\n", reason));
            }
        }

        output
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, report: &SessionReport) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_minutes() {
        assert_eq!(format_latitude(29.0 + 42.2 / 60.0), "N 29°42.2'");
        assert_eq!(format_longitude(-(37.0 + 2.5 / 60.0)), "W 37°02.5'");
        assert_eq!(format_latitude(-0.5), "S 0°30.0'");
        assert_eq!(format_latitude(0.0), "N 0°00.0'");
        assert_eq!(format_longitude(180.0), "E 180°00.0'");
    }

    #[test]
    fn test_minutes_carry_into_degrees() {
        assert_eq!(format_latitude(10.0 + 59.97 / 60.0), "N 11°00.0'");
    }

    #[test]
    fn test_unresolved_fix_report() {
        let fix = Err(GeometryError::InsufficientData { available: 1 });
        let report = ReportBuilder::new().build(None, &[], &fix);
        assert!(report.lines.is_empty());
        match &report.fix {
            FixReport::Unresolved { reason } => assert!(reason.contains('1')),
            other => panic!("expected unresolved fix, got {:?}", other),
        }

        let text = TextFormatter::new().format_text(&report);
        assert!(text.contains("Reference: not set"));
        assert!(text.contains("No fix:"));
    }

    #[test]
    fn test_resolved_fix_report() {
        let fix = Ok(Fix {
            position: GeoPosition::new(20.123_456_789, -40.5),
            method: FixMethod::CockedHat { inscribed_radius_nm: 1.5 },
            lines_used: 3,
        });
        let reference = GeoPosition::new(20.0, -40.0);
        let report = ReportBuilder::new().with_precision(3).build(Some(reference), &[], &fix);

        match report.fix {
            FixReport::Resolved { position, lines_used, .. } => {
                assert_eq!(position.lat, 20.123);
                assert_eq!(position.lon, -40.5);
                assert_eq!(lines_used, 3);
            }
            ref other => panic!("expected resolved fix, got {:?}", other),
        }

        let text = TextFormatter::new().format_text(&report);
        assert!(text.contains("Fix: N 20°07.4', W 40°30.0'"));
        assert!(text.contains("cocked hat, inscribed radius 1.5 nm, 3 lines"));
    }

    #[test]
    fn test_json_report_shape() {
        let fix = Ok(Fix {
            position: GeoPosition::new(1.0, 2.0),
            method: FixMethod::TwoLines,
            lines_used: 2,
        });
        let report = ReportBuilder::new().build(None, &[], &fix);
        let json = JsonFormatter::new().format_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["fix"]["status"], "resolved");
        assert_eq!(value["fix"]["resolution"]["method"], "two_lines");
        assert_eq!(value["fix"]["lines_used"], 2);
        assert!(value["reference"].is_null());

        let parsed: SessionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
