use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Attribute, CategoricalAttribute, Dataset};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{BrushRect, BrushSpan};
use crate::render::RenderFrame;

use super::{
    LinkCoordinator, ParallelAxis, ParallelConfig, ParallelEngine, ParallelSpec, ScatterConfig,
    ScatterEngine, ScatterSpec, SelectionEvent, SelectionOrigin, SelectionState,
};

/// Which of the scatterplot's two spatial axes an intent refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScatterAxis {
    X,
    Y,
}

/// Facade owning the dataset, both chart engines, and the link coordinator.
///
/// Hosts wire their UI controls to the intent methods here and hand brush
/// gestures to the `*_brush` entry points; each gesture restyles the chart it
/// happened on, records the selection, and links the other chart.
#[derive(Debug)]
pub struct Dashboard {
    dataset: Dataset,
    scatter: ScatterEngine,
    parallel: ParallelEngine,
    coordinator: LinkCoordinator,
    scatter_spec: ScatterSpec,
    parallel_spec: ParallelSpec,
}

impl Dashboard {
    pub fn new(
        scatter_config: ScatterConfig,
        parallel_config: ParallelConfig,
    ) -> PlotResult<Self> {
        let mut dashboard = Self {
            dataset: Dataset::default(),
            scatter: ScatterEngine::new(scatter_config)?,
            parallel: ParallelEngine::new(parallel_config)?,
            coordinator: LinkCoordinator::new(),
            scatter_spec: ScatterSpec {
                x_attribute: Attribute::RentedBikeCount,
                y_attribute: Attribute::Temperature,
                color_attribute: CategoricalAttribute::Seasons,
            },
            parallel_spec: ParallelSpec {
                lower_attribute: Attribute::Temperature,
                upper_attribute: Attribute::Date,
                lower_inverted: false,
                upper_inverted: false,
            },
        };
        dashboard.render_all()?;
        Ok(dashboard)
    }

    /// Replaces the dataset wholesale and re-renders both charts.
    pub fn set_dataset(&mut self, dataset: Dataset) -> PlotResult<()> {
        debug!(records = dataset.len(), "dataset replaced");
        self.dataset = dataset;
        self.render_all()
    }

    pub fn render_all(&mut self) -> PlotResult<()> {
        self.scatter.render(&self.dataset, self.scatter_spec)?;
        self.parallel.render(&self.dataset, self.parallel_spec)
    }

    /// Routes a scatterplot 2D brush gesture through the link.
    pub fn scatter_brush(&mut self, rect: BrushRect) -> PlotResult<SelectionState> {
        let event = self.scatter.brush(&self.dataset, rect)?;
        Ok(self.route(event))
    }

    /// Routes a parallel-plot lower-axis brush gesture through the link.
    pub fn parallel_lower_brush(&mut self, span: BrushSpan) -> PlotResult<SelectionState> {
        let event = self.parallel.brush_lower(&self.dataset, span)?;
        Ok(self.route(event))
    }

    /// Routes a parallel-plot upper-axis brush gesture through the link.
    pub fn parallel_upper_brush(&mut self, span: BrushSpan) -> PlotResult<SelectionState> {
        let event = self.parallel.brush_upper(&self.dataset, span)?;
        Ok(self.route(event))
    }

    /// Stores the event as the driving selection and pushes it into the
    /// counterpart engine. The receiving engine only restyles; it cannot emit
    /// another event, so routing terminates here by construction.
    ///
    /// A cleared gesture resets the counterpart to resting style instead of
    /// feeding it the full-domain intervals, which every record would pass.
    fn route(&mut self, event: SelectionEvent) -> SelectionState {
        let state = self.coordinator.apply(event);
        match (event.origin, event.cleared) {
            (SelectionOrigin::Scatter, true) => self.parallel.link_external_clear(),
            (SelectionOrigin::Scatter, false) => {
                self.parallel
                    .link_external_selection(&self.dataset, state.dim1(), state.dim2());
            }
            (SelectionOrigin::Parallel, true) => self.scatter.link_external_clear(),
            (SelectionOrigin::Parallel, false) => {
                self.scatter
                    .link_external_selection(&self.dataset, state.dim1(), state.dim2());
            }
        }
        state
    }

    /// Assigns an attribute to one scatterplot axis.
    ///
    /// Rejects the attribute currently on the other axis; the two axes of a
    /// chart never carry the same attribute.
    pub fn set_scatter_axis(&mut self, axis: ScatterAxis, attribute: Attribute) -> PlotResult<()> {
        let mut spec = self.scatter_spec;
        match axis {
            ScatterAxis::X => {
                if attribute == spec.y_attribute {
                    return Err(PlotError::InvalidConfig(format!(
                        "`{}` is already on the y axis",
                        attribute.label()
                    )));
                }
                spec.x_attribute = attribute;
            }
            ScatterAxis::Y => {
                if attribute == spec.x_attribute {
                    return Err(PlotError::InvalidConfig(format!(
                        "`{}` is already on the x axis",
                        attribute.label()
                    )));
                }
                spec.y_attribute = attribute;
            }
        }

        debug!(?axis, attribute = attribute.label(), "scatter axis changed");
        self.scatter.render(&self.dataset, spec)?;
        self.scatter_spec = spec;
        Ok(())
    }

    /// Changes the scatterplot's color-encoding attribute without touching
    /// its axis domains.
    pub fn set_color_encoding(&mut self, attribute: CategoricalAttribute) -> PlotResult<()> {
        debug!(attribute = attribute.label(), "color encoding changed");
        self.scatter.update_dot_colors(&self.dataset, attribute)?;
        self.scatter_spec.color_attribute = attribute;
        Ok(())
    }

    /// Assigns an attribute to one parallel-plot axis.
    pub fn set_parallel_axis(
        &mut self,
        axis: ParallelAxis,
        attribute: Attribute,
    ) -> PlotResult<()> {
        let mut spec = self.parallel_spec;
        match axis {
            ParallelAxis::Lower => {
                if attribute == spec.upper_attribute {
                    return Err(PlotError::InvalidConfig(format!(
                        "`{}` is already on the upper axis",
                        attribute.label()
                    )));
                }
                spec.lower_attribute = attribute;
            }
            ParallelAxis::Upper => {
                if attribute == spec.lower_attribute {
                    return Err(PlotError::InvalidConfig(format!(
                        "`{}` is already on the lower axis",
                        attribute.label()
                    )));
                }
                spec.upper_attribute = attribute;
            }
        }

        debug!(?axis, attribute = attribute.label(), "parallel axis changed");
        self.parallel.render(&self.dataset, spec)?;
        self.parallel_spec = spec;
        Ok(())
    }

    /// Swaps the parallel plot's lower and upper attributes. Inversion flags
    /// stay with their axis position.
    pub fn swap_parallel_axes(&mut self) -> PlotResult<()> {
        let mut spec = self.parallel_spec;
        std::mem::swap(&mut spec.lower_attribute, &mut spec.upper_attribute);

        debug!(
            lower = spec.lower_attribute.label(),
            upper = spec.upper_attribute.label(),
            "parallel axes swapped"
        );
        self.parallel.render(&self.dataset, spec)?;
        self.parallel_spec = spec;
        Ok(())
    }

    /// Toggles one parallel axis's inversion flag.
    pub fn invert_parallel_axis(&mut self, axis: ParallelAxis) -> PlotResult<()> {
        let mut spec = self.parallel_spec;
        match axis {
            ParallelAxis::Lower => spec.lower_inverted = !spec.lower_inverted,
            ParallelAxis::Upper => spec.upper_inverted = !spec.upper_inverted,
        }

        debug!(
            ?axis,
            lower_inverted = spec.lower_inverted,
            upper_inverted = spec.upper_inverted,
            "parallel axis inverted"
        );
        self.parallel.render(&self.dataset, spec)?;
        self.parallel_spec = spec;
        Ok(())
    }

    /// Attributes a picker may offer for one scatterplot axis: everything
    /// except the attribute currently on the other axis.
    #[must_use]
    pub fn allowed_scatter_attributes(&self, axis: ScatterAxis) -> Vec<Attribute> {
        let excluded = match axis {
            ScatterAxis::X => self.scatter_spec.y_attribute,
            ScatterAxis::Y => self.scatter_spec.x_attribute,
        };
        Attribute::ALL
            .iter()
            .copied()
            .filter(|attribute| *attribute != excluded)
            .collect()
    }

    /// Attributes a picker may offer for one parallel-plot axis.
    #[must_use]
    pub fn allowed_parallel_attributes(&self, axis: ParallelAxis) -> Vec<Attribute> {
        let excluded = match axis {
            ParallelAxis::Lower => self.parallel_spec.upper_attribute,
            ParallelAxis::Upper => self.parallel_spec.lower_attribute,
        };
        Attribute::ALL
            .iter()
            .copied()
            .filter(|attribute| *attribute != excluded)
            .collect()
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn scatter(&self) -> &ScatterEngine {
        &self.scatter
    }

    #[must_use]
    pub fn parallel(&self) -> &ParallelEngine {
        &self.parallel
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.coordinator.state()
    }

    #[must_use]
    pub fn scatter_spec(&self) -> ScatterSpec {
        self.scatter_spec
    }

    #[must_use]
    pub fn parallel_spec(&self) -> ParallelSpec {
        self.parallel_spec
    }

    pub fn scatter_frame(&self) -> PlotResult<RenderFrame> {
        self.scatter.render_frame()
    }

    pub fn parallel_frame(&self) -> PlotResult<RenderFrame> {
        self.parallel.render_frame()
    }
}
