//! Per-timestep records and summary metrics for a finished run.

use serde::Serialize;
use stormflow_components::{FloodSeverity, Hyetograph, RunoffCoefficient, StormSpec};
use stormflow_core::round_to;
use uom::si::{f64::Time, length::millimeter, time::hour};

use crate::water_balance::Solution;

/// Reported outcome of one timestep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimestepRecord {
    /// Hours since the start of the storm at the end of this timestep,
    /// rounded to 2 decimals.
    pub hour: f64,

    /// Rainfall depth during this timestep, in millimetres (2 decimals).
    pub rainfall_mm: f64,

    /// Ponded water depth at the end of this timestep, in millimetres.
    pub water_depth_mm: f64,

    pub severity: FloodSeverity,
}

impl TimestepRecord {
    /// Hour mark formatted to 2 decimals, such as `"0.50"`.
    #[must_use]
    pub fn hour_label(&self) -> String {
        format!("{:.2}", self.hour)
    }
}

/// Run-level metrics, each rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationSummary {
    /// Total storm depth over storm duration, in mm/h.
    pub average_rainfall_intensity: f64,

    /// Kirpich time of concentration, in hours.
    pub time_of_concentration: f64,

    pub runoff_coefficient: f64,
}

/// Unrounded series for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub timestep_hours: f64,
    pub rainfall_mm: Vec<f64>,
    pub water_depth_mm: Vec<f64>,
}

/// Everything a run reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// One record per timestep, in timestep order.
    pub records: Vec<TimestepRecord>,
    pub summary: SimulationSummary,
    pub series: Series,
}

impl Report {
    /// Record with the greatest water depth, the earliest on ties.
    #[must_use]
    pub fn peak(&self) -> Option<&TimestepRecord> {
        self.records.iter().reduce(|peak, record| {
            if record.water_depth_mm > peak.water_depth_mm {
                record
            } else {
                peak
            }
        })
    }

    /// Most severe rating reached during the run.
    #[must_use]
    pub fn peak_severity(&self) -> FloodSeverity {
        self.records
            .iter()
            .map(|record| record.severity)
            .max()
            .unwrap_or(FloodSeverity::None)
    }
}

/// Packages a solved run into a [`Report`].
///
/// Records come out in the same order as the hyetograph and solution.
#[must_use]
pub fn assemble(
    storm: &StormSpec,
    hyetograph: &Hyetograph,
    solution: &Solution,
    time_of_concentration: Time,
    runoff_coefficient: RunoffCoefficient,
) -> Report {
    let timestep = storm.timestep_duration().get::<hour>();

    let records = solution
        .history
        .iter()
        .enumerate()
        .map(|(step, snapshot)| {
            let water_depth_mm = snapshot.output.water_depth_mm;
            #[allow(clippy::cast_precision_loss)]
            let hour_mark = (step + 1) as f64 * timestep;
            TimestepRecord {
                hour: round_to(hour_mark, 2),
                rainfall_mm: round_to(snapshot.input.rainfall.get::<millimeter>(), 2),
                water_depth_mm,
                severity: FloodSeverity::classify(water_depth_mm),
            }
        })
        .collect();

    let summary = SimulationSummary {
        average_rainfall_intensity: round_to(storm.average_intensity_mm_per_hour(), 2),
        time_of_concentration: round_to(time_of_concentration.get::<hour>(), 2),
        runoff_coefficient: round_to(runoff_coefficient.into_inner(), 2),
    };

    let series = Series {
        timestep_hours: timestep,
        rainfall_mm: hyetograph.depths_mm(),
        water_depth_mm: solution.water_depths_mm(),
    };

    Report {
        records,
        summary,
        series,
    }
}
