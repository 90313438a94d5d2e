//! Minimal SVG document writer on top of `quick-xml`.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{ChartError, Result};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Font settings of one text element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub anchor: Anchor,
    pub bold: bool,
    /// Rotation in degrees around the text origin.
    pub rotate: Option<f64>,
}

impl TextStyle {
    pub fn title() -> Self {
        Self {
            size: 16.0,
            anchor: Anchor::Middle,
            bold: true,
            rotate: None,
        }
    }

    pub fn label() -> Self {
        Self {
            size: 12.0,
            anchor: Anchor::Start,
            bold: false,
            rotate: None,
        }
    }

    pub fn small() -> Self {
        Self {
            size: 10.0,
            ..Self::label()
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

fn num(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn svg_error(err: impl std::fmt::Display) -> ChartError {
    ChartError::Svg(err.to_string())
}

/// An SVG document being written into memory.
pub struct SvgDocument {
    writer: Writer<Vec<u8>>,
    width: u32,
}

impl SvgDocument {
    /// Open a document with a white background.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", SVG_NS));
        root.push_attribute(("width", width.to_string().as_str()));
        root.push_attribute(("height", height.to_string().as_str()));
        root.push_attribute(("viewBox", format!("0 0 {width} {height}").as_str()));
        root.push_attribute(("font-family", FONT_FAMILY));
        writer.write_event(Event::Start(root)).map_err(svg_error)?;

        let mut doc = Self { writer, width };
        doc.rect(0.0, 0.0, f64::from(width), f64::from(height), "white", None)?;
        Ok(doc)
    }

    pub fn width(&self) -> f64 {
        f64::from(self.width)
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, String)]) -> Result<()> {
        let mut element = BytesStart::new(name);
        for (key, value) in attributes {
            element.push_attribute((*key, value.as_str()));
        }
        self.writer
            .write_event(Event::Empty(element))
            .map_err(svg_error)
    }

    /// Filled rectangle with an optional outline.
    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: &str,
        stroke: Option<&str>,
    ) -> Result<()> {
        let mut attributes = vec![
            ("x", num(x)),
            ("y", num(y)),
            ("width", num(width.max(0.0))),
            ("height", num(height.max(0.0))),
            ("fill", fill.to_string()),
        ];
        if let Some(stroke) = stroke {
            attributes.push(("stroke", stroke.to_string()));
            attributes.push(("stroke-width", "1".to_string()));
        }
        self.empty("rect", &attributes)
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) -> Result<()> {
        self.empty(
            "line",
            &[
                ("x1", num(x1)),
                ("y1", num(y1)),
                ("x2", num(x2)),
                ("y2", num(y2)),
                ("stroke", stroke.to_string()),
                ("stroke-width", num(width)),
            ],
        )
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, opacity: f64) -> Result<()> {
        self.empty(
            "circle",
            &[
                ("cx", num(cx)),
                ("cy", num(cy)),
                ("r", num(r)),
                ("fill", fill.to_string()),
                ("fill-opacity", num(opacity)),
            ],
        )
    }

    /// Text element; the content is XML-escaped.
    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) -> Result<()> {
        let mut element = BytesStart::new("text");
        element.push_attribute(("x", num(x).as_str()));
        element.push_attribute(("y", num(y).as_str()));
        element.push_attribute(("font-size", num(style.size).as_str()));
        element.push_attribute(("text-anchor", style.anchor.as_str()));
        if style.bold {
            element.push_attribute(("font-weight", "bold"));
        }
        if let Some(degrees) = style.rotate {
            let transform = format!("rotate({} {} {})", num(degrees), num(x), num(y));
            element.push_attribute(("transform", transform.as_str()));
        }
        self.writer
            .write_event(Event::Start(element))
            .map_err(svg_error)?;
        self.writer
            .write_event(Event::Text(BytesText::new(content)))
            .map_err(svg_error)?;
        self.writer
            .write_event(Event::End(BytesEnd::new("text")))
            .map_err(svg_error)
    }

    /// Close the root element and return the markup.
    pub fn finish(mut self) -> Result<String> {
        self.writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .map_err(svg_error)?;
        String::from_utf8(self.writer.into_inner()).map_err(svg_error)
    }
}
