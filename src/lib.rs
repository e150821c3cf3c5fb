//! Linked scatterplot / parallel-plot engine for the Seoul bike-sharing
//! dataset.
//!
//! The crate is a pure core: it loads the hourly rental records, computes
//! chart geometry, tracks brush selections in data space, and keeps the two
//! charts in sync. Drawing is delegated through [`render::Renderer`], which
//! receives declarative [`render::RenderFrame`] values and owns nothing else.
//!
//! Most hosts only need [`Dashboard`]:
//!
//! ```no_run
//! use linkplot_rs::{
//!     Dashboard, ParallelConfig, PlotResult, ScatterConfig, Viewport,
//! };
//! use linkplot_rs::data::load_dataset;
//! use linkplot_rs::interaction::BrushRect;
//!
//! fn main() -> PlotResult<()> {
//!     let viewport = Viewport { width: 900, height: 600 };
//!     let mut dashboard = Dashboard::new(
//!         ScatterConfig::new(viewport),
//!         ParallelConfig::new(viewport),
//!     )?;
//!     dashboard.set_dataset(load_dataset("SeoulBikeData.csv")?)?;
//!
//!     // A drag on the scatterplot restyles both charts.
//!     let state = dashboard.scatter_brush(BrushRect {
//!         x0: 120.0,
//!         y0: 80.0,
//!         x1: 360.0,
//!         y1: 240.0,
//!     })?;
//!     assert!(!state.is_empty());
//!
//!     let frame = dashboard.parallel_frame()?;
//!     assert!(!frame.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! Selections are stored as closed intervals over attribute values, not
//! pixels, so they survive viewport resizes and axis re-assignment on the
//! receiving chart.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{
    AttributeInterval, Dashboard, DotMark, LegendEntry, LinkCoordinator, MarkPhase, ParallelAxis,
    ParallelConfig, ParallelEngine, ParallelSpec, ScatterAxis, ScatterConfig, ScatterEngine,
    ScatterSpec, SegmentMark, SelectionEvent, SelectionOrigin, SelectionState,
};
pub use crate::core::{
    Attribute, BikeRecord, CategoricalAttribute, Dataset, FunctioningDay, Holiday, Interval,
    Margin, PlotArea, Season, Viewport, between,
};
pub use error::{PlotError, PlotResult};
pub use render::{RenderFrame, Renderer};
