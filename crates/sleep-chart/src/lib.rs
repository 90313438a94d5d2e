//! Charts of the sleep-health dataset.
//!
//! [`ChartRenderer`] writes one SVG (or PNG) file per chart. Drawing is
//! split from data preparation: the functions in [`data`] compute bins,
//! counts, box statistics and proportions and are plain, testable Rust; the
//! renderer only lays them out.
//!
//! Encoded columns are shown with display labels through
//! [`relabel_codes`], which works on a copy of the table.

pub mod data;
mod error;
mod layout;
mod output;
mod palette;
mod relabel;
mod render;
mod scale;
mod svg;

// === Errors ===
pub use error::{ChartError, Result};

// === Rendering ===
pub use render::ChartRenderer;

// === Data preparation ===
pub use data::{
    AGE_GROUPS, BoxStats, HISTOGRAM_BINS, Histogram, ProportionTable, age_group, box_stats,
    histogram, proportions, value_counts,
};

// === Relabeling ===
pub use relabel::{ColumnLabels, display_values, relabel_codes};

// === Output ===
pub use output::{rasterize_png, slug};
