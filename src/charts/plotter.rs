//! Chart Projection Module
//! Computes the points of each chart as a pure function of the records.

use crate::data::{CarSale, SaleField};
use crate::stats::{AggregateCalculator, StatsError};
use plotters::style::RGBColor;

pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);

/// How a projection is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Line,
}

/// The three charts produced by the visualize command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSpec {
    /// Total units sold per brand
    UnitsByBrand,
    /// Average price per brand
    AveragePriceByBrand,
    /// Total units sold per year
    UnitsByYear,
}

impl ChartSpec {
    pub const ALL: [ChartSpec; 3] = [
        ChartSpec::UnitsByBrand,
        ChartSpec::AveragePriceByBrand,
        ChartSpec::UnitsByYear,
    ];

    pub fn kind(self) -> ChartKind {
        match self {
            ChartSpec::UnitsByBrand => ChartKind::Bar,
            ChartSpec::AveragePriceByBrand => ChartKind::HorizontalBar,
            ChartSpec::UnitsByYear => ChartKind::Line,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartSpec::UnitsByBrand => "Total Units Sold by Car Brand",
            ChartSpec::AveragePriceByBrand => "Average Car Price by Brand",
            ChartSpec::UnitsByYear => "Units Sold Over Years",
        }
    }

    /// Axis captions as (x, y).
    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            ChartSpec::UnitsByBrand => ("Car Brand", "Units Sold"),
            ChartSpec::AveragePriceByBrand => ("Average Price ($)", "Car Brand"),
            ChartSpec::UnitsByYear => ("Year", "Units Sold"),
        }
    }

    pub fn color(self) -> RGBColor {
        match self {
            ChartSpec::UnitsByBrand => SKY_BLUE,
            ChartSpec::AveragePriceByBrand => ORANGE,
            ChartSpec::UnitsByYear => DARK_GREEN,
        }
    }

    /// Output file name without extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartSpec::UnitsByBrand => "units_by_brand",
            ChartSpec::AveragePriceByBrand => "average_price_by_brand",
            ChartSpec::UnitsByYear => "units_by_year",
        }
    }
}

/// Ordered (label, value) points of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartProjection {
    pub spec: ChartSpec,
    pub points: Vec<(String, f64)>,
}

impl ChartProjection {
    pub fn project(records: &[CarSale], spec: ChartSpec) -> Result<Self, StatsError> {
        let aggregate = match spec {
            ChartSpec::UnitsByBrand => {
                AggregateCalculator::sum(records, SaleField::UnitsSold, SaleField::CarBrand)?
            }
            ChartSpec::AveragePriceByBrand => {
                AggregateCalculator::mean(records, SaleField::Price, SaleField::CarBrand)?
            }
            ChartSpec::UnitsByYear => {
                AggregateCalculator::sum(records, SaleField::UnitsSold, SaleField::Year)?
            }
        };

        let points = aggregate
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.as_f64()))
            .collect();

        Ok(Self { spec, points })
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|(label, _)| label.clone()).collect()
    }

    /// Upper bound of the value axis, never below 1.
    pub fn value_ceiling(&self) -> f64 {
        let max = self
            .points
            .iter()
            .map(|(_, v)| *v)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        (max * 1.1).max(1.0)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
