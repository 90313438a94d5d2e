//! Preprocessing for the sleep health dataset.
//!
//! Turns a freshly loaded table into the clean table every analysis and
//! chart consumes. The stages run in a fixed order:
//!
//! 1. **normalize**: collapse label variants (`"Normal Weight"` -> `"Normal"`)
//! 2. **encode**: replace categorical labels with integer codes
//! 3. **split**: derive typed columns from compound values (`"120/80"`)
//!
//! Each stage is a plain function over a `DataFrame` and can be used on its
//! own. [`preprocess`] runs all of them, starting from a CSV path.
//!
//! # Example
//!
//! ```ignore
//! use sleep_transform::preprocess;
//!
//! let out = preprocess(Path::new("sleep.csv"), &["Gender", "BMI Category"])?;
//! let bmi = out.encodings.get("BMI Category").unwrap();
//! ```
//!
//! Category maps are returned in [`Encodings`](sleep_model::Encodings), never
//! kept in shared state.

mod encode;
mod error;
mod normalize;
mod pipeline;
mod split;

// === Errors ===
pub use error::{PipelineError, Result, Stage, TransformError};

// === Stages ===
pub use encode::{decode_column, encode, encode_column};
pub use normalize::{normalize_column, normalize_labels};
pub use split::split_compound;

// === Pipeline ===
pub use pipeline::{Preprocessed, preprocess, preprocess_frame, preprocess_with};
