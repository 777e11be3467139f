mod font;

use std::f64::consts::{PI, TAU};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::ReportError;
use crate::models::CategoryTotals;
use crate::report::format_percent;

pub(crate) const CHART_WIDTH: u32 = 1000;
pub(crate) const CHART_HEIGHT: u32 = 800;
const TITLE: &str = "Expenses by Category";
const RADIUS: f64 = 280.0;
const LABEL_RADIUS: f64 = RADIUS * 1.1;
const PERCENT_RADIUS: f64 = RADIUS * 0.6;
const ARC_STEP: f64 = PI / 180.0;

/// One wedge of the pie. Angles are radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slice {
    pub(crate) label: String,
    /// Share of the category sum, in percent.
    pub(crate) share: Decimal,
    pub(crate) start_angle: f64,
    pub(crate) sweep: f64,
}

impl Slice {
    fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }
}

/// Split the full circle between categories, in `CategoryTotals` order.
pub(crate) fn slice_shares(totals: &CategoryTotals) -> Result<Vec<Slice>, ReportError> {
    let sum = totals.total()?;
    if totals.is_empty() || sum <= Decimal::ZERO {
        return Err(ReportError::EmptyCategories);
    }

    let mut start_angle = 0.0;
    let mut slices = Vec::with_capacity(totals.len());
    for (label, amount) in totals.iter() {
        let fraction = amount
            .checked_div(sum)
            .ok_or(ReportError::Overflow("computing slice shares"))?;
        let share = fraction
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(ReportError::Overflow("computing slice shares"))?;
        let sweep = fraction.to_f64().unwrap_or(0.0) * TAU;
        slices.push(Slice {
            label: label.to_string(),
            share,
            start_angle,
            sweep,
        });
        start_angle += sweep;
    }
    Ok(slices)
}

/// Draw the category pie chart and return it PNG-encoded.
pub(crate) fn render_pie_chart(totals: &CategoryTotals) -> Result<Vec<u8>, ReportError> {
    let slices = slice_shares(totals)?;
    let labels = font::ensure_registered();
    if !labels {
        tracing::warn!(
            "no chart font found (set {}); rendering without labels",
            font::FONT_ENV
        );
    }

    let mut pixels = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let center = (CHART_WIDTH as i32 / 2, CHART_HEIGHT as i32 / 2 + 30);
        for (i, slice) in slices.iter().enumerate() {
            let wedge = Polygon::new(wedge_points(center, slice), Palette99::pick(i).filled());
            root.draw(&wedge).map_err(chart_err)?;
        }

        if labels {
            draw_labels(&root, center, &slices)?;
        }
        root.present().map_err(chart_err)?;
    }

    let png = encode_png(&pixels)?;
    tracing::debug!(slices = slices.len(), bytes = png.len(), "chart rendered");
    Ok(png)
}

fn draw_labels(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    center: (i32, i32),
    slices: &[Slice],
) -> Result<(), ReportError> {
    let title_style = TextStyle::from((font::FONT_FAMILY, 32).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(TITLE, (CHART_WIDTH as i32 / 2, 50), title_style))
        .map_err(chart_err)?;

    for slice in slices {
        let angle = slice.mid_angle();
        let side = if angle.sin() >= 0.0 { HPos::Left } else { HPos::Right };
        let label_style = TextStyle::from((font::FONT_FAMILY, 20).into_font())
            .color(&BLACK)
            .pos(Pos::new(side, VPos::Center));
        root.draw(&Text::new(
            slice.label.clone(),
            point_at(center, LABEL_RADIUS, angle),
            label_style,
        ))
        .map_err(chart_err)?;

        let percent_style = TextStyle::from((font::FONT_FAMILY, 18).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            format_percent(slice.share),
            point_at(center, PERCENT_RADIUS, angle),
            percent_style,
        ))
        .map_err(chart_err)?;
    }
    Ok(())
}

fn wedge_points(center: (i32, i32), slice: &Slice) -> Vec<(i32, i32)> {
    let steps = (slice.sweep / ARC_STEP).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = slice.start_angle + slice.sweep * step as f64 / steps as f64;
        points.push(point_at(center, RADIUS, angle));
    }
    points
}

fn point_at(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.sin()).round() as i32,
        center.1 - (radius * angle.cos()).round() as i32,
    )
}

fn encode_png(pixels: &[u8]) -> Result<Vec<u8>, ReportError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(pixels, CHART_WIDTH, CHART_HEIGHT, ColorType::Rgb8)
        .map_err(chart_err)?;
    Ok(png)
}

fn chart_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Chart(err.to_string())
}
