//! Presentation of circle packing results.
//!
//! - [`Report`]: plain-text summary with one line per circle
//! - [`write_svg`] and [`save_svg`]: a scalable image of the packing
//!
//! # Features
//!
//! - `plot`: enables [`show`] for viewing a packing in an egui window.
//!   This feature adds dependencies on `eframe` and `egui_plot`.

mod report;
mod svg;

#[cfg(feature = "plot")]
mod plot;

pub use report::Report;
pub use svg::{RenderError, save_svg, write_svg};

#[cfg(feature = "plot")]
pub use plot::show;
