//! Static Chart Renderer
//! Draws chart projections to PNG with plotters and opens them in the
//! system image viewer.
//!
//! Layout per chart:
//! 1. Title centered above the plot
//! 2. Category axis labelled with the group keys, value axis from zero
//! 3. Black-edged bars (vertical or horizontal), or a dashed line with
//!    circle markers

use super::plotter::{ChartKind, ChartProjection};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const TITLE_FONT: (&str, u32) = ("sans-serif", 24);
const LABEL_FONT: (&str, u32) = ("sans-serif", 14);
const DASH_LENGTH: u32 = 8;
const DASH_GAP: u32 = 5;
const MARKER_SIZE: u32 = 4;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to prepare chart directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes one PNG per projection into an output directory.
pub struct ChartRenderer {
    output_dir: PathBuf,
    width: u32,
    height: u32,
    open_charts: bool,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, width: u32, height: u32, open_charts: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            width,
            height,
            open_charts,
        }
    }

    /// Render a projection and, when enabled, open it with the default
    /// viewer. Returns the image path.
    pub fn render(&self, projection: &ChartProjection) -> Result<PathBuf, ChartError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(format!("{}.png", projection.spec.file_stem()));

        self.draw(projection, &path)
            .map_err(|e| ChartError::Draw(e.to_string()))?;
        debug!(path = %path.display(), points = projection.points.len(), "rendered chart");

        if self.open_charts {
            open::that(&path).map_err(|source| ChartError::Open {
                path: path.clone(),
                source,
            })?;
        }

        Ok(path)
    }

    fn draw(&self, projection: &ChartProjection, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        match projection.spec.kind() {
            ChartKind::Bar => Self::draw_bar(&root, projection)?,
            ChartKind::HorizontalBar => Self::draw_horizontal_bar(&root, projection)?,
            ChartKind::Line => Self::draw_line(&root, projection)?,
        }

        root.present()?;
        Ok(())
    }

    fn draw_bar(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        projection: &ChartProjection,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let spec = projection.spec;
        let labels = projection.labels();
        let slots = labels.len().max(1) as u32;
        let (x_desc, y_desc) = spec.axis_labels();

        let mut chart = ChartBuilder::on(root)
            .caption(spec.title(), TITLE_FONT)
            .margin(15)
            .x_label_area_size(90)
            .y_label_area_size(70)
            .build_cartesian_2d((0u32..slots).into_segmented(), 0f64..projection.value_ceiling())?;

        // Brand names run vertically so long names do not overlap
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_labels(slots as usize)
            .x_label_formatter(&|v| Self::segment_label(&labels, v))
            .label_style(LABEL_FONT)
            .x_label_style(LABEL_FONT.into_font().transform(FontTransform::Rotate90))
            .draw()?;

        for style in Self::bar_layers(spec.color()) {
            chart.draw_series(
                Histogram::vertical(&chart)
                    .style(style)
                    .margin(10)
                    .data(
                        projection
                            .points
                            .iter()
                            .enumerate()
                            .map(|(i, (_, v))| (i as u32, *v)),
                    ),
            )?;
        }

        Ok(())
    }

    fn draw_horizontal_bar(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        projection: &ChartProjection,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let spec = projection.spec;
        let labels = projection.labels();
        let slots = labels.len().max(1) as u32;
        let (x_desc, y_desc) = spec.axis_labels();

        let mut chart = ChartBuilder::on(root)
            .caption(spec.title(), TITLE_FONT)
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(0f64..projection.value_ceiling(), (0u32..slots).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .y_labels(slots as usize)
            .y_label_formatter(&|v| Self::segment_label(&labels, v))
            .label_style(LABEL_FONT)
            .draw()?;

        for style in Self::bar_layers(spec.color()) {
            chart.draw_series(
                Histogram::horizontal(&chart)
                    .style(style)
                    .margin(10)
                    .data(
                        projection
                            .points
                            .iter()
                            .enumerate()
                            .map(|(i, (_, v))| (i as u32, *v)),
                    ),
            )?;
        }

        Ok(())
    }

    fn draw_line(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        projection: &ChartProjection,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let spec = projection.spec;
        let labels = projection.labels();
        let slots = labels.len().max(1) as u32;
        let (x_desc, y_desc) = spec.axis_labels();

        let mut chart = ChartBuilder::on(root)
            .caption(spec.title(), TITLE_FONT)
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d((0u32..slots).into_segmented(), 0f64..projection.value_ceiling())?;

        // Grid stays on for the trend chart
        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_labels(slots as usize)
            .x_label_formatter(&|v| Self::segment_label(&labels, v))
            .label_style(LABEL_FONT)
            .draw()?;

        let coords: Vec<(SegmentValue<u32>, f64)> = projection
            .points
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (SegmentValue::CenterOf(i as u32), *v))
            .collect();

        chart.draw_series(DashedLineSeries::new(
            coords.clone(),
            DASH_LENGTH,
            DASH_GAP,
            spec.color().stroke_width(2),
        ))?;
        chart.draw_series(PointSeries::of_element(
            coords,
            MARKER_SIZE,
            spec.color().filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;

        Ok(())
    }

    /// Bar fill followed by its black outline, drawn in that order.
    fn bar_layers(color: RGBColor) -> [ShapeStyle; 2] {
        [color.filled(), BLACK.stroke_width(1)]
    }

    /// Group label for a category slot.
    fn segment_label(labels: &[String], value: &SegmentValue<u32>) -> String {
        match value {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i as usize).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_label_maps_slots_to_groups() {
        let labels = vec!["Audi".to_string(), "BMW".to_string()];
        assert_eq!(
            ChartRenderer::segment_label(&labels, &SegmentValue::CenterOf(1)),
            "BMW"
        );
        assert_eq!(
            ChartRenderer::segment_label(&labels, &SegmentValue::CenterOf(5)),
            ""
        );
        assert_eq!(ChartRenderer::segment_label(&labels, &SegmentValue::Last), "");
    }

    #[test]
    fn test_bars_are_filled_then_outlined_in_black() {
        let [fill, edge] = ChartRenderer::bar_layers(RGBColor(135, 206, 235));
        assert!(fill.filled);
        assert_eq!(fill.color, RGBColor(135, 206, 235).to_rgba());
        assert!(!edge.filled);
        assert_eq!(edge.color, BLACK.to_rgba());
        assert_eq!(edge.stroke_width, 1);
    }

    #[test]
    fn test_render_writes_png_per_chart_kind() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path().join("charts"), 320, 240, false);
        let records = vec![
            crate::data::CarSale::new("Toyota", "Camry", 2021, 25000.0, 10),
            crate::data::CarSale::new("Ford", "F-150", 2020, 40000.0, 7),
        ];

        for spec in crate::charts::ChartSpec::ALL {
            let projection = ChartProjection::project(&records, spec).unwrap();
            let path = renderer.render(&projection).unwrap();
            assert_eq!(path, dir.path().join("charts").join(format!("{}.png", spec.file_stem())));
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_open_error_names_path() {
        let err = ChartError::Open {
            path: PathBuf::from("charts/units_by_year.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no viewer"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to open charts/units_by_year.png: no viewer"
        );
    }
}
