//! Chart engines, the selection model, and the linking facade.

mod coordinator;
mod dashboard;
mod parallel;
mod scatter;
mod selection;

use serde::{Deserialize, Serialize};

pub use coordinator::LinkCoordinator;
pub use dashboard::{Dashboard, ScatterAxis};
pub use parallel::{
    ParallelAxis, ParallelConfig, ParallelEngine, ParallelSpec, SegmentMark,
};
pub use scatter::{
    DotMark, LegendEntry, ScatterConfig, ScatterEngine, ScatterSpec,
};
pub use selection::{
    AttributeInterval, SelectionEvent, SelectionOrigin, SelectionState,
};

/// Lifecycle phase of a reconciled mark.
///
/// A mark is `Enter` on the render pass that created it and `Update` on every
/// pass that found it already present. Entering marks take the chart's resting
/// style; updating marks keep whatever styling the current selection gave
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkPhase {
    Enter,
    Update,
}
