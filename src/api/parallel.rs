use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::palette::{NEUTRAL, SequentialScale};
use crate::core::ticks::{format_tick, linear_ticks};
use crate::core::{Attribute, Dataset, Interval, LinearScale, Margin, PlotArea, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{Brush1D, BrushSpan};
use crate::render::{
    Color, RectPrimitive, RenderFrame, SegmentPrimitive, TextHAlign, TextPrimitive,
};

use super::{AttributeInterval, MarkPhase, SelectionEvent, SelectionOrigin};

const TICK_TARGET_COUNT: usize = 10;
const BRUSH_BAND_PX: f64 = 40.0;

/// Which of the two parallel axes an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParallelAxis {
    Lower,
    Upper,
}

/// Parallel-plot engine bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallelConfig {
    pub viewport: Viewport,
    pub margin: Margin,
    pub stroke_width: f64,
    /// Faint opacity of segments outside the active selection.
    pub default_opacity: f64,
    /// Declarative duration hosts should use for mark transitions.
    pub transition_ms: u64,
}

impl ParallelConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin: Margin::new(65, 15, 65, 15),
            stroke_width: 1.0,
            default_opacity: 0.02,
            transition_ms: 2000,
        }
    }

    fn validate(self) -> PlotResult<Self> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.default_opacity.is_finite() || !(0.0..=1.0).contains(&self.default_opacity) {
            return Err(PlotError::InvalidConfig(
                "default opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Axis choices for one parallel-plot render pass.
///
/// Swap and per-axis inversion are not engine operations: controls simply
/// hand the engine a new tuple and it redraws from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelSpec {
    pub lower_attribute: Attribute,
    pub upper_attribute: Attribute,
    pub lower_inverted: bool,
    pub upper_inverted: bool,
}

impl ParallelSpec {
    pub fn validate(self) -> PlotResult<Self> {
        if self.lower_attribute == self.upper_attribute {
            return Err(PlotError::InvalidConfig(format!(
                "lower and upper axes both carry `{}`",
                self.lower_attribute.label()
            )));
        }
        Ok(self)
    }
}

/// Final visual attributes of one record's segment, keyed by record index.
///
/// `x_lower` sits on the bottom axis, `x_upper` on the top axis; the segment
/// spans the full vertical extent of the plot area between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentMark {
    pub x_lower: f64,
    pub x_upper: f64,
    pub stroke: Color,
    pub opacity: f64,
    pub phase: MarkPhase,
}

/// Parallel-coordinates engine: renders one line segment per record between
/// two horizontal axes, owns two coupled 1D brushes, and reports selection
/// changes as `SelectionEvent`s.
#[derive(Debug)]
pub struct ParallelEngine {
    config: ParallelConfig,
    area: PlotArea,
    lower_scale: LinearScale,
    upper_scale: LinearScale,
    lower_brush: Brush1D,
    upper_brush: Brush1D,
    spec: Option<ParallelSpec>,
    /// Un-inverted lower-axis value range, kept for external-link coloring.
    lower_value_range: (f64, f64),
    marks: IndexMap<usize, SegmentMark>,
}

impl ParallelEngine {
    pub fn new(config: ParallelConfig) -> PlotResult<Self> {
        let config = config.validate()?;
        let area = PlotArea::from_viewport(config.viewport, config.margin)?;
        let lower_scale = LinearScale::new(0.0, 1.0, 0.0, area.width)?;
        let upper_scale = LinearScale::new(0.0, 1.0, 0.0, area.width)?;

        Ok(Self {
            config,
            area,
            lower_scale,
            upper_scale,
            lower_brush: Brush1D::default(),
            upper_brush: Brush1D::default(),
            spec: None,
            lower_value_range: (0.0, 1.0),
            marks: IndexMap::new(),
        })
    }

    pub fn clear(&mut self) {
        self.marks.clear();
        self.lower_brush.deactivate();
        self.upper_brush.deactivate();
        self.spec = None;
    }

    /// Full render pass: recomputes both axis domains (reversed when that
    /// axis's inversion flag is set), reconciles one segment per record by
    /// index, and cancels both brushes (axes changed).
    pub fn render(&mut self, data: &Dataset, spec: ParallelSpec) -> PlotResult<()> {
        let spec = spec.validate()?;

        let (lower_min, lower_max) = data.domain(spec.lower_attribute).unwrap_or((0.0, 1.0));
        let (upper_min, upper_max) = data.domain(spec.upper_attribute).unwrap_or((0.0, 1.0));
        self.lower_value_range = (lower_min, lower_max);

        if spec.lower_inverted {
            self.lower_scale.set_domain(lower_max, lower_min)?;
        } else {
            self.lower_scale.set_domain(lower_min, lower_max)?;
        }
        if spec.upper_inverted {
            self.upper_scale.set_domain(upper_max, upper_min)?;
        } else {
            self.upper_scale.set_domain(upper_min, upper_max)?;
        }

        self.spec = Some(spec);
        self.reconcile_marks(data, spec);
        self.lower_brush.deactivate();
        self.upper_brush.deactivate();
        Ok(())
    }

    /// Handles an ongoing drag of the lower-axis brush, in pixel coordinates
    /// along the axis.
    pub fn brush_lower(&mut self, data: &Dataset, span: BrushSpan) -> PlotResult<SelectionEvent> {
        let spec = self.brushable_spec(span)?;
        self.lower_brush.drag(span);
        Ok(self.couple(data, spec))
    }

    /// Handles an ongoing drag of the upper-axis brush.
    pub fn brush_upper(&mut self, data: &Dataset, span: BrushSpan) -> PlotResult<SelectionEvent> {
        let spec = self.brushable_spec(span)?;
        self.upper_brush.drag(span);
        Ok(self.couple(data, spec))
    }

    fn brushable_spec(&self, span: BrushSpan) -> PlotResult<ParallelSpec> {
        let spec = self
            .spec
            .ok_or_else(|| PlotError::InvalidConfig("render before brushing".to_owned()))?;
        if !Interval::new(span.start, span.end).is_finite() {
            return Err(PlotError::InvalidData(
                "brush span must be finite".to_owned(),
            ));
        }
        Ok(spec)
    }

    /// Evaluates the two 1D brushes jointly into one logical 2D region.
    ///
    /// An inactive brush passes its whole axis domain through, so the
    /// intersection reduces to the active brush alone; with both active the
    /// region is the Cartesian product of the two inverse-scaled extents.
    /// With neither active there is no selection and every segment resets.
    fn couple(&mut self, data: &Dataset, spec: ParallelSpec) -> SelectionEvent {
        let (lower_domain_start, lower_domain_end) = self.lower_scale.domain();
        let (upper_domain_start, upper_domain_end) = self.upper_scale.domain();

        let lower_interval = match self.lower_brush.selection() {
            Some(span) if self.lower_brush.is_active() => Interval::new(
                self.lower_scale.invert(span.start),
                self.lower_scale.invert(span.end),
            ),
            _ => Interval::new(lower_domain_start, lower_domain_end),
        };
        let upper_interval = match self.upper_brush.selection() {
            Some(span) if self.upper_brush.is_active() => Interval::new(
                self.upper_scale.invert(span.start),
                self.upper_scale.invert(span.end),
            ),
            _ => Interval::new(upper_domain_start, upper_domain_end),
        };

        let cleared = !self.lower_brush.is_active() && !self.upper_brush.is_active();
        if cleared {
            for mark in self.marks.values_mut() {
                mark.stroke = NEUTRAL;
                mark.opacity = self.config.default_opacity;
            }
        } else {
            let ramp = SequentialScale::between(lower_interval.start, lower_interval.end);
            self.restyle_segments(data, spec, lower_interval, upper_interval, &ramp);
        }

        trace!(
            lower_active = self.lower_brush.is_active(),
            upper_active = self.upper_brush.is_active(),
            ?lower_interval,
            ?upper_interval,
            "parallel brushes coupled"
        );
        SelectionEvent {
            dim1: AttributeInterval::new(spec.lower_attribute, lower_interval),
            dim2: AttributeInterval::new(spec.upper_attribute, upper_interval),
            origin: SelectionOrigin::Parallel,
            cleared,
        }
    }

    /// Applies a selection produced by the other chart.
    ///
    /// Deactivates and hides both of this chart's brushes, then applies the
    /// coloring rule against the external intervals. The sequential ramp here
    /// spans the plot's own full lower-axis value range, since no local
    /// active bound exists. No-op when either interval is absent.
    pub fn link_external_selection(
        &mut self,
        data: &Dataset,
        dim1: Option<AttributeInterval>,
        dim2: Option<AttributeInterval>,
    ) {
        let (Some(dim1), Some(dim2)) = (dim1, dim2) else {
            return;
        };
        let Some(spec) = self.spec else {
            return;
        };

        self.lower_brush.deactivate();
        self.upper_brush.deactivate();

        let (range_min, range_max) = self.lower_value_range;
        let ramp = SequentialScale::between(range_min, range_max);

        for record in data.iter() {
            let inside = dim1.interval.contains(dim1.attribute.value(record))
                && dim2.interval.contains(dim2.attribute.value(record));
            if let Some(mark) = self.marks.get_mut(&record.index) {
                if inside {
                    mark.stroke = ramp.color_for(spec.lower_attribute.value(record));
                    mark.opacity = 1.0;
                } else {
                    mark.stroke = NEUTRAL;
                    mark.opacity = self.config.default_opacity;
                }
            }
        }
    }

    /// Applies a cleared selection from the other chart: every segment
    /// returns to neutral resting style and both local brushes cancel.
    pub fn link_external_clear(&mut self) {
        self.lower_brush.deactivate();
        self.upper_brush.deactivate();
        for mark in self.marks.values_mut() {
            mark.stroke = NEUTRAL;
            mark.opacity = self.config.default_opacity;
        }
    }

    fn restyle_segments(
        &mut self,
        data: &Dataset,
        spec: ParallelSpec,
        lower_interval: Interval,
        upper_interval: Interval,
        ramp: &SequentialScale,
    ) {
        for record in data.iter() {
            let lower_value = spec.lower_attribute.value(record);
            let inside = lower_interval.contains(lower_value)
                && upper_interval.contains(spec.upper_attribute.value(record));
            if let Some(mark) = self.marks.get_mut(&record.index) {
                if inside {
                    mark.stroke = ramp.color_for(lower_value);
                    mark.opacity = 1.0;
                } else {
                    mark.stroke = NEUTRAL;
                    mark.opacity = self.config.default_opacity;
                }
            }
        }
    }

    /// Keyed join of records against existing segments: entering segments
    /// start neutral and faint, updating segments keep their stroke and
    /// opacity while endpoints move, exiting segments disappear.
    fn reconcile_marks(&mut self, data: &Dataset, spec: ParallelSpec) {
        let mut next = IndexMap::with_capacity(data.len());
        let mut entered = 0usize;
        let mut updated = 0usize;

        for record in data.iter() {
            let x_lower = self.lower_scale.scale(spec.lower_attribute.value(record));
            let x_upper = self.upper_scale.scale(spec.upper_attribute.value(record));

            let mark = match self.marks.get(&record.index) {
                Some(existing) => {
                    updated += 1;
                    SegmentMark {
                        x_lower,
                        x_upper,
                        stroke: existing.stroke,
                        opacity: existing.opacity,
                        phase: MarkPhase::Update,
                    }
                }
                None => {
                    entered += 1;
                    SegmentMark {
                        x_lower,
                        x_upper,
                        stroke: NEUTRAL,
                        opacity: self.config.default_opacity,
                        phase: MarkPhase::Enter,
                    }
                }
            };
            next.insert(record.index, mark);
        }

        let exited = self.marks.len() - updated;
        debug!(entered, updated, exited, "parallel marks reconciled");
        self.marks = next;
    }

    /// Deterministic scene for the current engine state.
    pub fn render_frame(&self) -> PlotResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.config.viewport);
        let area = self.area;

        frame.rects.push(RectPrimitive::new(
            area.offset_x,
            area.offset_y + 1.0,
            area.width,
            (area.height - 1.0).max(0.0),
            Color::from_rgb8(0xf9, 0xf9, 0xf9),
        ));

        for mark in self.marks.values() {
            frame.segments.push(SegmentPrimitive::new(
                area.offset_x + mark.x_lower,
                area.offset_y + area.height,
                area.offset_x + mark.x_upper,
                area.offset_y,
                self.config.stroke_width,
                mark.stroke.with_alpha(mark.opacity),
            ));
        }

        if let Some(spec) = self.spec {
            self.push_axis(&mut frame, ParallelAxis::Lower, spec);
            self.push_axis(&mut frame, ParallelAxis::Upper, spec);
        }

        self.push_brush_band(&mut frame, ParallelAxis::Lower);
        self.push_brush_band(&mut frame, ParallelAxis::Upper);

        Ok(frame)
    }

    fn push_axis(&self, frame: &mut RenderFrame, axis: ParallelAxis, spec: ParallelSpec) {
        let area = self.area;
        let (scale, attribute, baseline_y, label_y, tick_offset, rotation) = match axis {
            ParallelAxis::Lower => (
                self.lower_scale,
                spec.lower_attribute,
                area.offset_y + area.height,
                area.offset_y + area.height + f64::from(self.config.margin.bottom) - 5.0,
                16.0,
                30.0,
            ),
            ParallelAxis::Upper => (
                self.upper_scale,
                spec.upper_attribute,
                area.offset_y,
                area.offset_y - 50.0,
                -10.0,
                -30.0,
            ),
        };

        frame.segments.push(SegmentPrimitive::new(
            area.offset_x,
            baseline_y,
            area.offset_x + area.width,
            baseline_y,
            1.0,
            NEUTRAL,
        ));

        let (domain_start, domain_end) = scale.domain();
        let is_date = attribute.is_date();
        for tick in linear_ticks(domain_start, domain_end, TICK_TARGET_COUNT) {
            let x = area.offset_x + scale.scale(tick);
            let label = TextPrimitive::new(
                format_tick(tick, is_date),
                x,
                baseline_y + tick_offset,
                11.0,
                NEUTRAL,
                if is_date {
                    TextHAlign::Left
                } else {
                    TextHAlign::Center
                },
            );
            frame
                .texts
                .push(if is_date { label.rotated(rotation) } else { label });
        }

        frame.texts.push(TextPrimitive::new(
            attribute.label(),
            area.offset_x + area.width / 2.0,
            label_y,
            13.0,
            NEUTRAL,
            TextHAlign::Center,
        ));
    }

    fn push_brush_band(&self, frame: &mut RenderFrame, axis: ParallelAxis) {
        let (brush, band_y) = match axis {
            ParallelAxis::Lower => (self.lower_brush, self.area.offset_y + self.area.height),
            ParallelAxis::Upper => (self.upper_brush, self.area.offset_y - BRUSH_BAND_PX),
        };

        if !brush.handles_visible() {
            return;
        }
        let Some(span) = brush.selection() else {
            return;
        };

        frame.rects.push(RectPrimitive::new(
            self.area.offset_x + span.start.min(span.end),
            band_y,
            (span.end - span.start).abs(),
            BRUSH_BAND_PX,
            Color::rgba(0.47, 0.47, 0.47, 0.3),
        ));
    }

    #[must_use]
    pub fn config(&self) -> ParallelConfig {
        self.config
    }

    #[must_use]
    pub fn spec(&self) -> Option<ParallelSpec> {
        self.spec
    }

    #[must_use]
    pub fn marks(&self) -> &IndexMap<usize, SegmentMark> {
        &self.marks
    }

    #[must_use]
    pub fn lower_brush_active(&self) -> bool {
        self.lower_brush.is_active()
    }

    #[must_use]
    pub fn upper_brush_active(&self) -> bool {
        self.upper_brush.is_active()
    }

    #[must_use]
    pub fn lower_brush_handles_visible(&self) -> bool {
        self.lower_brush.handles_visible()
    }

    #[must_use]
    pub fn upper_brush_handles_visible(&self) -> bool {
        self.upper_brush.handles_visible()
    }

    #[must_use]
    pub fn lower_domain(&self) -> (f64, f64) {
        self.lower_scale.domain()
    }

    #[must_use]
    pub fn upper_domain(&self) -> (f64, f64) {
        self.upper_scale.domain()
    }

    #[must_use]
    pub fn lower_value_range(&self) -> (f64, f64) {
        self.lower_value_range
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.area
    }
}
