//! Line chart of daily average temperatures.

use std::ops::Range;
use std::path::Path;

use chrono::NaiveDate;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters::prelude::*;
use tracing::info;

use crate::dataset::Dataset;
use crate::error::{Result, ScrapeError};

const SIZE: (u32, u32) = (1280, 720);
const TITLE: &str = "Daily Average Temperatures";

/// Axis extents for a dataset: first..last date, min..max temperature padded
/// by one degree on each side.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBounds {
    pub dates: Range<NaiveDate>,
    pub temperatures: Range<f64>,
}

pub fn chart_bounds(dataset: &Dataset) -> Result<ChartBounds> {
    let records = dataset.records();
    let first = records.iter().map(|r| r.date).min().ok_or(ScrapeError::EmptyDataset)?;
    let last = records.iter().map(|r| r.date).max().ok_or(ScrapeError::EmptyDataset)?;
    // A one-day chart still needs a non-empty x axis.
    let last = if last == first {
        first.succ_opt().unwrap_or(first)
    } else {
        last
    };

    let (low, high) = dataset
        .temperatures()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
            (lo.min(t), hi.max(t))
        });

    Ok(ChartBounds {
        dates: first..last,
        temperatures: (low - 1.0)..(high + 1.0),
    })
}

/// Renders `dataset` to `path`: SVG when the extension is `.svg`, PNG otherwise.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn plot_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    let bounds = chart_bounds(dataset)?;

    let mut points: Vec<(NaiveDate, f64)> = dataset
        .records()
        .iter()
        .map(|r| (r.date, r.average_temperature_f))
        .collect();
    points.sort_by_key(|(date, _)| *date);

    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        draw(SVGBackend::new(path, SIZE).into_drawing_area(), &bounds, &points)?;
    } else {
        draw(BitMapBackend::new(path, SIZE).into_drawing_area(), &bounds, &points)?;
    }

    info!(points = points.len(), "Chart written");
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    bounds: &ChartBounds,
    points: &[(NaiveDate, f64)],
) -> Result<()> {
    let plot_err = |e: DrawingAreaErrorKind<DB::ErrorType>| ScrapeError::Plot(e.to_string());

    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 32).into_font())
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.dates.clone(), bounds.temperatures.clone())
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Temperature (°F)")
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
