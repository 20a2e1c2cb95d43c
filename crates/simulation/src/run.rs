use std::convert::Infallible;

use stormflow_components::{ConcentrationError, kirpich};
use stormflow_core::Observer;
use thiserror::Error;
use tracing::info;
use uom::si::time::hour;

use crate::{Parameters, Report, WaterBalance, report, water_balance::Event};

/// Errors that stop a run before the water balance starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("time of concentration is undefined: {0}")]
    Concentration(#[from] ConcentrationError),
}

/// Runs a simulation and assembles its report.
///
/// # Errors
///
/// Returns a [`SimulationError`] if the time of concentration cannot be
/// computed. Once the water balance starts the run always completes.
pub fn run(parameters: &Parameters) -> Result<Report, SimulationError> {
    run_observed(parameters, ())
}

/// Runs a simulation, passing every water balance step to `observer`.
///
/// # Errors
///
/// See [`run`].
pub fn run_observed<Obs>(parameters: &Parameters, observer: Obs) -> Result<Report, SimulationError>
where
    Obs: Observer<Event, Infallible>,
{
    let Parameters {
        storm,
        channel,
        runoff,
        config,
    } = parameters;

    let coefficient = runoff.coefficient();
    let time_of_concentration = kirpich(channel.length(), channel.slope())?;
    info!(
        runoff_coefficient = coefficient.into_inner(),
        time_of_concentration_h = time_of_concentration.get::<hour>(),
        "catchment response computed"
    );

    let hyetograph = config
        .storm_generator()
        .generate(storm, time_of_concentration);

    let balance = WaterBalance::new(
        *channel,
        runoff.area(),
        coefficient,
        storm.timestep_duration(),
        config,
    );
    let solution = balance.simulate(hyetograph.depths(), observer);

    let report = report::assemble(
        storm,
        &hyetograph,
        &solution,
        time_of_concentration,
        coefficient,
    );
    info!(
        peak_water_depth_mm = solution.peak_water_depth_mm(),
        peak_severity = %report.peak_severity(),
        "simulation complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use stormflow_components::FloodSeverity;

    use crate::Scenario;

    fn parameters(depth_mm: f64, timesteps: usize) -> Parameters {
        parameters_over(depth_mm, 3.0, timesteps)
    }

    fn parameters_over(depth_mm: f64, duration_hours: f64, timesteps: usize) -> Parameters {
        Scenario::from_toml_str(&format!(
            r#"
            [storm]
            total_depth_mm = {depth_mm}
            duration_hours = {duration_hours}
            timesteps = {timesteps}

            [channel]
            length_m = 176.16
            width_m = 0.3045
            height_m = 0.33
            slope = 0.01047

            [runoff]
            coefficient = 0.61
            area_m2 = 19274.25
            "#
        ))
        .unwrap()
        .parameters()
        .unwrap()
    }

    #[test]
    fn reference_storm_report() {
        let report = run(&parameters(100.0, 6)).unwrap();

        let hours: Vec<_> = report.records.iter().map(|r| r.hour_label()).collect();
        assert_eq!(hours, ["0.50", "1.00", "1.50", "2.00", "2.50", "3.00"]);

        let rainfall: Vec<_> = report.records.iter().map(|r| r.rainfall_mm).collect();
        assert_eq!(rainfall, [31.62, 25.87, 20.12, 14.37, 8.62, 2.87]);

        let depths: Vec<_> = report.records.iter().map(|r| r.water_depth_mm).collect();
        assert_eq!(depths, [91.84, 166.14, 222.92, 262.16, 283.86, 288.04]);

        assert_eq!(report.records[0].severity, FloodSeverity::Minor);
        assert!(
            report.records[1..]
                .iter()
                .all(|r| r.severity == FloodSeverity::Moderate)
        );

        assert_eq!(report.summary.average_rainfall_intensity, 33.33);
        assert_eq!(report.summary.time_of_concentration, 0.1);
        assert_eq!(report.summary.runoff_coefficient, 0.61);
    }

    #[test]
    fn hour_marks_round_ties_up() {
        let report = run(&parameters_over(10.0, 1.0, 8)).unwrap();

        let hours: Vec<_> = report.records.iter().map(|r| r.hour).collect();
        assert_eq!(hours, [0.13, 0.25, 0.38, 0.5, 0.63, 0.75, 0.88, 1.0]);

        let labels: Vec<_> = report.records.iter().map(|r| r.hour_label()).collect();
        assert_eq!(
            labels,
            ["0.13", "0.25", "0.38", "0.50", "0.63", "0.75", "0.88", "1.00"]
        );
    }

    #[test]
    fn series_keeps_unrounded_rainfall() {
        let report = run(&parameters(100.0, 6)).unwrap();

        assert_relative_eq!(report.series.timestep_hours, 0.5);
        assert_relative_eq!(
            report.series.rainfall_mm[0],
            31.616_458_910_818_636,
            epsilon = 1e-9
        );
        assert_eq!(report.series.water_depth_mm[5], 288.04);
    }

    #[test]
    fn dry_storm_reports_no_flooding() {
        let report = run(&parameters(0.0, 6)).unwrap();

        assert_eq!(report.records.len(), 6);
        for record in &report.records {
            assert_eq!(record.rainfall_mm, 0.0);
            assert_eq!(record.water_depth_mm, 0.0);
            assert_eq!(record.severity, FloodSeverity::None);
        }
        assert_eq!(report.summary.average_rainfall_intensity, 0.0);
    }

    #[test]
    fn observed_run_matches_unobserved() {
        let mut rainfall = Vec::new();
        let observed = run_observed(&parameters(100.0, 6), |event: &Event| {
            rainfall.push(event.snapshot.input.rainfall);
            None::<Infallible>
        })
        .unwrap();

        assert_eq!(observed, run(&parameters(100.0, 6)).unwrap());
        assert_eq!(rainfall.len(), 6);
    }
}
