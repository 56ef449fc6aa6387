//! Report output for the command line tool and other consumers

pub mod formatting;

pub use formatting::{
    format_latitude, format_longitude, format_position, FixReport, JsonFormatter, LineReport,
    ReportBuilder, SessionReport, TextFormatter,
};
