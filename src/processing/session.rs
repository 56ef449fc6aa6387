//! Fix session: configuration accumulator and per-reading sight reduction
//!
//! Session state is a plain value. [`SessionState::apply`] is a pure
//! transition from one state to the next; [`FixSession`] keeps the current
//! state alongside the astronomical model and commits transitions that
//! succeed. A failed event leaves the state exactly as it was.

use crate::algorithms::fix_solver::FixSolver;
use crate::almanac::AstronomicalModel;
use crate::core::{Fix, GeoPosition, LineOfPosition, Observation};
use crate::processing::events::{DirectiveKind, Reading, SessionEvent};
use crate::processing::reduction::{reduce_sight, AltitudeCorrections};
use crate::validation::{AngleField, GeometryError, InputError, InputValidator};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directive values in effect; each new directive replaces the previous one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub date: Option<NaiveDate>,
    /// Signed minutes east of UTC; readings are taken as UTC until set
    pub utc_offset_minutes: Option<i32>,
    /// Index error in degrees. A zero directive clears it, since a zero
    /// correction and no correction cannot be told apart downstream.
    pub index_error: Option<f64>,
    pub height_m: Option<f64>,
    /// Dip derived from `height_m`, degrees
    pub dip: Option<f64>,
    pub dead_reckoning: Option<GeoPosition>,
}

impl SessionConfig {
    pub fn utc_offset(&self) -> i32 {
        self.utc_offset_minutes.unwrap_or(0)
    }

    pub fn corrections(&self) -> AltitudeCorrections {
        AltitudeCorrections {
            index: self.index_error,
            dip: self.dip,
        }
    }

    /// Absolute instant of a local time of day on the configured date
    pub fn resolve_instant(&self, time: NaiveTime) -> Result<DateTime<Utc>, InputError> {
        let date = self.date.ok_or(InputError::MissingDate)?;
        let minutes = self.utc_offset();
        let offset = FixedOffset::east_opt(minutes * 60).ok_or(InputError::InvalidZone { minutes })?;

        offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| InputError::InvalidInstant {
                date: date.to_string(),
                time: time.to_string(),
                offset_minutes: minutes,
            })
    }
}

/// What a successfully applied event produced
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    ConfigUpdated(DirectiveKind),
    LineBuilt(LineOfPosition),
}

/// Result of a state transition
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub outcome: EventOutcome,
}

/// Configuration plus the ordered lines of position built so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    config: SessionConfig,
    lines: Vec<LineOfPosition>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn lines(&self) -> &[LineOfPosition] {
        &self.lines
    }

    /// Next state after `event`; `self` is never modified
    pub fn apply<M: AstronomicalModel + ?Sized>(
        &self,
        event: &SessionEvent,
        model: &M,
    ) -> Result<Transition, InputError> {
        let mut next = self.clone();

        let outcome = match event {
            SessionEvent::Reading(reading) => {
                let line = next.build_line_of_position(reading, model)?;
                next.lines.push(line.clone());
                EventOutcome::LineBuilt(line)
            }
            SessionEvent::Height(height) => {
                let meters = InputValidator::validate_height(*height)?;
                let dip = model.dip(*height);
                info!("Dip = {:.4}° for eye height {} m", dip, meters);
                next.config.height_m = Some(meters);
                next.config.dip = Some(dip);
                EventOutcome::ConfigUpdated(DirectiveKind::Height)
            }
            SessionEvent::Index(index) => {
                let value = InputValidator::validate_angle(AngleField::IndexError, *index)?;
                if value == 0.0 {
                    debug!("Zero index error, no index correction applied");
                    next.config.index_error = None;
                } else {
                    info!("Index error = {:+.4}°", value);
                    next.config.index_error = Some(value);
                }
                EventOutcome::ConfigUpdated(DirectiveKind::Index)
            }
            SessionEvent::Date(date) => {
                next.config.date = Some(*date);
                EventOutcome::ConfigUpdated(DirectiveKind::Date)
            }
            SessionEvent::Zone(minutes) => {
                next.config.utc_offset_minutes = Some(InputValidator::validate_zone(*minutes)?);
                EventOutcome::ConfigUpdated(DirectiveKind::Zone)
            }
            SessionEvent::DeadReckoning(position) => {
                let position = InputValidator::validate_position(*position)?;
                let stale = next.stale_azimuths(&position);
                if stale > 0 {
                    warn!(
                        "{} line(s) of position have azimuths from the previous dead-reckoning position and will not be solved",
                        stale
                    );
                }
                next.config.dead_reckoning = Some(position);
                EventOutcome::ConfigUpdated(DirectiveKind::DeadReckoning)
            }
        };

        Ok(Transition { state: next, outcome })
    }

    /// Lines whose azimuth was measured from somewhere other than `reference`
    fn stale_azimuths(&self, reference: &GeoPosition) -> usize {
        self.lines
            .iter()
            .filter(|line| line.azimuth().is_some() && line.azimuth_from(reference).is_none())
            .count()
    }

    fn build_line_of_position<M: AstronomicalModel + ?Sized>(
        &self,
        reading: &Reading,
        model: &M,
    ) -> Result<LineOfPosition, InputError> {
        let instant = self.config.resolve_instant(reading.time)?;
        InputValidator::validate_angle(AngleField::SextantAltitude, reading.altitude)?;

        let observation = Observation {
            body: reading.body.clone(),
            instant,
            altitude: reading.altitude,
        };

        let line = reduce_sight(
            model,
            observation,
            &self.config.corrections(),
            self.config.dead_reckoning,
        )?;
        InputValidator::validate_zenith_distance(reading.altitude, line.radius())?;
        Ok(line)
    }
}

/// Event processing stopped at `index` because of `error`
#[derive(Debug, Clone, PartialEq, Error)]
#[error("event {index}: {error}")]
pub struct SessionHalt {
    pub index: usize,
    pub error: InputError,
}

/// A sight-reduction session bound to one astronomical model
pub struct FixSession<M: AstronomicalModel> {
    model: M,
    state: SessionState,
    solver: FixSolver,
}

impl<M: AstronomicalModel> FixSession<M> {
    pub fn new(model: M) -> Self {
        Self::with_solver(model, FixSolver::new())
    }

    pub fn with_solver(model: M, solver: FixSolver) -> Self {
        Self {
            model,
            state: SessionState::new(),
            solver,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        self.state.config()
    }

    pub fn lines(&self) -> &[LineOfPosition] {
        self.state.lines()
    }

    /// Apply one event; on error the session is left unchanged
    pub fn process(&mut self, event: &SessionEvent) -> Result<EventOutcome, InputError> {
        let transition = self.state.apply(event, &self.model)?;
        self.state = transition.state;
        Ok(transition.outcome)
    }

    /// Apply events in order, stopping at the first error.
    ///
    /// Returns the number of events applied. Lines built before the failing
    /// event stay in the session.
    pub fn process_all<'e, I>(&mut self, events: I) -> Result<usize, SessionHalt>
    where
        I: IntoIterator<Item = &'e SessionEvent>,
    {
        let mut applied = 0;
        for (index, event) in events.into_iter().enumerate() {
            self.process(event).map_err(|error| SessionHalt { index, error })?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Reduce one reading and append its line of position
    pub fn build_line_of_position(&mut self, reading: &Reading) -> Result<LineOfPosition, InputError> {
        let line = self.state.build_line_of_position(reading, &self.model)?;
        self.state.lines.push(line.clone());
        Ok(line)
    }

    /// Fix from the lines whose azimuth was measured from the current
    /// dead-reckoning position
    pub fn compute_fix(&self) -> Result<Fix, GeometryError> {
        let reference = self
            .config()
            .dead_reckoning
            .ok_or(GeometryError::InsufficientData { available: 0 })?;
        self.solver.solve_lines(reference, self.lines())
    }
}
