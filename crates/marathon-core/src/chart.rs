//! Screen time vs pause time pie chart.
//!
//! Charts are written as SVG to `<output_dir>/marathon-<request_id>.svg`, so
//! concurrent requests never share a file and a rerender of the same request
//! overwrites its own output.

use std::path::{Path, PathBuf};

use plotters::backend::SVGBackend;
use plotters::drawing::IntoDrawingArea;
use plotters::element::Pie;
use plotters::style::{BLACK, IntoFont, RGBColor, WHITE};

use crate::error::RenderError;
use crate::planner::MarathonPlan;
use crate::request::RequestId;

/// Slice colour for screen time.
const SCREEN_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);
/// Slice colour for pauses.
const PAUSE_COLOR: RGBColor = RGBColor(0x95, 0xa5, 0xa6);

/// Default canvas size in pixels.
const DEFAULT_SIZE: (u32, u32) = (600, 400);

/// Slice labels, in drawing order.
const LABELS: [&str; 2] = ["Watch time", "Pause time"];

/// Renders [`MarathonPlan`] proportions to SVG files.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
}

impl ChartRenderer {
    /// Creates a renderer writing into `output_dir`.
    ///
    /// The directory is created on first render.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            size: DEFAULT_SIZE,
        }
    }

    /// Overrides the canvas size.
    #[must_use]
    pub const fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Directory charts are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output path for `request_id`.
    #[must_use]
    pub fn path_for(&self, request_id: RequestId) -> PathBuf {
        self.output_dir.join(format!("marathon-{request_id}.svg"))
    }

    /// Draws the chart for `plan`, titled with `title`.
    ///
    /// # Errors
    ///
    /// - [`RenderError::EmptyPlan`] when the plan has zero total minutes.
    /// - [`RenderError::Io`] when the output directory cannot be created.
    /// - [`RenderError::Draw`] when drawing or writing the SVG fails.
    pub fn render(
        &self,
        plan: &MarathonPlan,
        title: &str,
        request_id: RequestId,
    ) -> Result<PathBuf, RenderError> {
        if plan.is_empty() {
            return Err(RenderError::EmptyPlan);
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| RenderError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.path_for(request_id);
        draw_pie(&path, self.size, plan, title)?;

        tracing::debug!(path = %path.display(), %request_id, "chart written");
        Ok(path)
    }
}

fn draw_pie(
    path: &Path,
    size: (u32, u32),
    plan: &MarathonPlan,
    title: &str,
) -> Result<(), RenderError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let heading = format!("Time split: {title}");
    let area = root
        .titled(&heading, ("sans-serif", 22.0).into_font().color(&BLACK))
        .map_err(draw_error)?;

    let (width, height) = area.dim_in_pixel();
    let center = (half(width), half(height));
    let radius = f64::from(width.min(height)) * 0.35;
    let sizes = [
        f64::from(plan.screen_minutes),
        f64::from(plan.pause_minutes),
    ];
    let colors = [SCREEN_COLOR, PAUSE_COLOR];

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &LABELS);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 16.0).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 14.0).into_font().color(&WHITE));

    area.draw(&pie).map_err(draw_error)?;
    root.present().map_err(draw_error)?;
    Ok(())
}

fn half(pixels: u32) -> i32 {
    i32::try_from(pixels / 2).unwrap_or(i32::MAX)
}

fn draw_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(err.to_string())
}
