//! Plot area geometry and the axis, title and legend decorations shared by
//! every chart.

use crate::error::Result;
use crate::scale::{LinearScale, format_tick, nice_ticks};
use crate::svg::{Anchor, SvgDocument, TextStyle};

const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#e5e5e5";
const TICK_TARGET: usize = 6;

/// Space left around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub const STANDARD: Margins = Margins {
        left: 80.0,
        right: 40.0,
        top: 50.0,
        bottom: 70.0,
    };

    /// Standard margins with room for a legend on the right.
    pub const WITH_LEGEND: Margins = Margins {
        right: 170.0,
        ..Margins::STANDARD
    };
}

/// Rectangle the data is drawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(canvas_width: f64, canvas_height: f64, margins: Margins) -> Self {
        Self {
            left: margins.left,
            top: margins.top,
            width: (canvas_width - margins.left - margins.right).max(1.0),
            height: (canvas_height - margins.top - margins.bottom).max(1.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal scale over the full width.
    pub fn x_scale(&self, domain: (f64, f64)) -> LinearScale {
        LinearScale::new(domain, (self.left, self.right()))
    }

    /// Vertical scale, larger values further up.
    pub fn y_scale(&self, domain: (f64, f64)) -> LinearScale {
        LinearScale::new(domain, (self.bottom(), self.top))
    }

    /// Centre of the `index`-th of `count` equal bands along the x axis.
    pub fn band_center(&self, index: usize, count: usize) -> f64 {
        let band = self.width / count.max(1) as f64;
        self.left + band * (index as f64 + 0.5)
    }

    pub fn band_width(&self, count: usize) -> f64 {
        self.width / count.max(1) as f64
    }
}

pub fn draw_title(doc: &mut SvgDocument, title: &str) -> Result<()> {
    let x = doc.width() / 2.0;
    doc.text(x, 28.0, title, &TextStyle::title())
}

fn draw_frame(doc: &mut SvgDocument, area: &PlotArea) -> Result<()> {
    doc.line(area.left, area.bottom(), area.right(), area.bottom(), AXIS_COLOR, 1.0)?;
    doc.line(area.left, area.top, area.left, area.bottom(), AXIS_COLOR, 1.0)
}

/// Numeric x axis with ticks and a label below the plot.
pub fn draw_x_axis(doc: &mut SvgDocument, area: &PlotArea, scale: &LinearScale, label: &str) -> Result<()> {
    let (min, max) = scale.domain();
    let ticks = nice_ticks(min, max, TICK_TARGET);
    for tick in &ticks {
        let x = scale.map(*tick);
        doc.line(x, area.bottom(), x, area.bottom() + 5.0, AXIS_COLOR, 1.0)?;
        doc.text(
            x,
            area.bottom() + 18.0,
            &format_tick(*tick, &ticks),
            &TextStyle::small().anchor(Anchor::Middle),
        )?;
    }
    draw_frame(doc, area)?;
    doc.text(
        area.left + area.width / 2.0,
        area.bottom() + 45.0,
        label,
        &TextStyle::label().anchor(Anchor::Middle),
    )
}

/// Numeric y axis with ticks, light grid lines and a rotated label.
pub fn draw_y_axis(doc: &mut SvgDocument, area: &PlotArea, scale: &LinearScale, label: &str) -> Result<()> {
    let (min, max) = scale.domain();
    let ticks = nice_ticks(min, max, TICK_TARGET);
    for tick in &ticks {
        let y = scale.map(*tick);
        doc.line(area.left, y, area.right(), y, GRID_COLOR, 1.0)?;
        doc.line(area.left - 5.0, y, area.left, y, AXIS_COLOR, 1.0)?;
        doc.text(
            area.left - 8.0,
            y + 4.0,
            &format_tick(*tick, &ticks),
            &TextStyle::small().anchor(Anchor::End),
        )?;
    }
    draw_frame(doc, area)?;
    let x = area.left - 55.0;
    let y = area.top + area.height / 2.0;
    doc.text(
        x,
        y,
        label,
        &TextStyle::label().anchor(Anchor::Middle).rotate(-90.0),
    )
}

/// Categorical x axis: one label under each band.
///
/// Labels are slanted when there are many bands.
pub fn draw_band_axis(doc: &mut SvgDocument, area: &PlotArea, labels: &[String], label: &str) -> Result<()> {
    let slanted = labels.len() > 6;
    for (idx, text) in labels.iter().enumerate() {
        let x = area.band_center(idx, labels.len());
        let style = if slanted {
            TextStyle::small().anchor(Anchor::End).rotate(-35.0)
        } else {
            TextStyle::small().anchor(Anchor::Middle)
        };
        doc.text(x, area.bottom() + 16.0, text, &style)?;
    }
    draw_frame(doc, area)?;
    let offset = if slanted { 62.0 } else { 45.0 };
    doc.text(
        area.left + area.width / 2.0,
        area.bottom() + offset,
        label,
        &TextStyle::label().anchor(Anchor::Middle),
    )
}

/// Colour swatches with labels, stacked from `(x, y)` downwards.
pub fn draw_legend(
    doc: &mut SvgDocument,
    x: f64,
    y: f64,
    title: &str,
    entries: &[(String, &str)],
) -> Result<()> {
    doc.text(x, y, title, &TextStyle::label().bold())?;
    for (idx, (label, color)) in entries.iter().enumerate() {
        let row = y + 18.0 * (idx as f64 + 1.0);
        doc.rect(x, row - 10.0, 12.0, 12.0, color, None)?;
        doc.text(x + 18.0, row, label, &TextStyle::small())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_area_geometry() {
        let area = PlotArea::new(800.0, 600.0, Margins::STANDARD);
        assert_eq!(area.right(), 760.0);
        assert_eq!(area.bottom(), 530.0);
        assert_eq!(area.band_center(0, 4), 80.0 + 680.0 / 8.0);
    }

    #[test]
    fn test_y_scale_points_up() {
        let area = PlotArea::new(800.0, 600.0, Margins::STANDARD);
        let scale = area.y_scale((0.0, 10.0));
        assert_eq!(scale.map(0.0), area.bottom());
        assert_eq!(scale.map(10.0), area.top);
    }
}
