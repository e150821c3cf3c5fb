use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::palette::{
    NEUTRAL, functioning_day_color, functioning_day_radius_factor, holiday_color,
    holiday_radius_factor, season_color,
};
use crate::core::ticks::{format_tick, linear_ticks};
use crate::core::{
    Attribute, BikeRecord, CategoricalAttribute, Dataset, Interval, LinearScale, Margin, PlotArea,
    Viewport,
};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{Brush2D, BrushRect};
use crate::render::{
    CirclePrimitive, Color, RectPrimitive, RenderFrame, SegmentPrimitive, TextHAlign,
    TextPrimitive,
};

use super::{AttributeInterval, MarkPhase, SelectionEvent, SelectionOrigin};

const TICK_TARGET_COUNT: usize = 8;
const LEGEND_SPACING_PX: f64 = 100.0;

/// Scatterplot engine bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    pub viewport: Viewport,
    pub margin: Margin,
    /// Base dot radius before categorical resizing.
    pub point_radius: f64,
    /// Opacity of dots outside the active selection.
    pub default_opacity: f64,
    /// Opacity of dots inside the active selection.
    pub brushed_opacity: f64,
    /// Declarative duration hosts should use for mark transitions.
    pub transition_ms: u64,
}

impl ScatterConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin: Margin::new(65, 30, 65, 80),
            point_radius: 3.5,
            default_opacity: 0.2,
            brushed_opacity: 0.6,
            transition_ms: 2000,
        }
    }

    fn validate(self) -> PlotResult<Self> {
        if !self.point_radius.is_finite() || self.point_radius <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "point radius must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("default opacity", self.default_opacity),
            ("brushed opacity", self.brushed_opacity),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidConfig(format!(
                    "{name} must be finite and in [0, 1]"
                )));
            }
        }
        Ok(self)
    }
}

/// Axis and encoding choices for one scatterplot render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub x_attribute: Attribute,
    pub y_attribute: Attribute,
    pub color_attribute: CategoricalAttribute,
}

impl ScatterSpec {
    pub fn validate(self) -> PlotResult<Self> {
        if self.x_attribute == self.y_attribute {
            return Err(PlotError::InvalidConfig(format!(
                "x and y axes both carry `{}`",
                self.x_attribute.label()
            )));
        }
        Ok(self)
    }
}

/// Final visual attributes of one dot, keyed by record index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotMark {
    pub x: f64,
    pub y: f64,
    pub fill: Color,
    pub radius: f64,
    pub opacity: f64,
    pub phase: MarkPhase,
}

/// One swatch of the categorical legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Color,
}

/// Scatterplot engine: renders dots, owns the 2D brush, computes interval
/// membership, and reports selection changes as `SelectionEvent`s.
#[derive(Debug)]
pub struct ScatterEngine {
    config: ScatterConfig,
    area: PlotArea,
    x_scale: LinearScale,
    y_scale: LinearScale,
    brush: Brush2D,
    spec: Option<ScatterSpec>,
    marks: IndexMap<usize, DotMark>,
    legend: SmallVec<[LegendEntry; 4]>,
}

impl ScatterEngine {
    pub fn new(config: ScatterConfig) -> PlotResult<Self> {
        let config = config.validate()?;
        let area = PlotArea::from_viewport(config.viewport, config.margin)?;
        // Placeholder domains; the first render replaces them.
        let x_scale = LinearScale::new(0.0, 1.0, 0.0, area.width)?;
        let y_scale = LinearScale::new(0.0, 1.0, area.height, 0.0)?;

        Ok(Self {
            config,
            area,
            x_scale,
            y_scale,
            brush: Brush2D::default(),
            spec: None,
            marks: IndexMap::new(),
            legend: SmallVec::new(),
        })
    }

    /// Drops all marks, the legend, and the brush. `new` + `clear` together
    /// make initialization idempotent.
    pub fn clear(&mut self) {
        self.marks.clear();
        self.legend.clear();
        self.brush.clear();
        self.spec = None;
    }

    /// Full render pass: recomputes axis domains, reconciles one mark per
    /// record by index, rebuilds the legend, and hides the brush handles
    /// (axes changed, so the dragged rectangle no longer means anything).
    ///
    /// Re-rendering with identical arguments is a visual no-op.
    pub fn render(&mut self, data: &Dataset, spec: ScatterSpec) -> PlotResult<()> {
        let spec = spec.validate()?;

        let (x_min, x_max) = data.domain(spec.x_attribute).unwrap_or((0.0, 1.0));
        let (y_min, y_max) = data.domain(spec.y_attribute).unwrap_or((0.0, 1.0));
        self.x_scale.set_domain(x_min, x_max)?;
        self.y_scale.set_domain(y_min, y_max)?;

        self.spec = Some(spec);
        self.reconcile_marks(data, spec);
        self.rebuild_legend(spec.color_attribute);
        self.brush.hide_handles();
        Ok(())
    }

    /// Re-applies color, size, and position without touching axis domains.
    /// Used when only the color-encoding attribute changes.
    pub fn update_dot_colors(
        &mut self,
        data: &Dataset,
        color_attribute: CategoricalAttribute,
    ) -> PlotResult<()> {
        let mut spec = self
            .spec
            .ok_or_else(|| PlotError::InvalidConfig("render before recoloring".to_owned()))?;
        spec.color_attribute = color_attribute;
        self.spec = Some(spec);
        self.reconcile_marks(data, spec);
        self.rebuild_legend(color_attribute);
        Ok(())
    }

    /// Handles an ongoing 2D brush drag, in pixel coordinates relative to the
    /// plot area.
    ///
    /// A zero-extent rectangle reads as "cleared": handles hide, every dot
    /// returns to default opacity, and the reported intervals span the full
    /// axis domains.
    pub fn brush(&mut self, data: &Dataset, rect: BrushRect) -> PlotResult<SelectionEvent> {
        let spec = self
            .spec
            .ok_or_else(|| PlotError::InvalidConfig("render before brushing".to_owned()))?;
        if !Interval::new(rect.x0, rect.x1).is_finite()
            || !Interval::new(rect.y0, rect.y1).is_finite()
        {
            return Err(PlotError::InvalidData(
                "brush rectangle must be finite".to_owned(),
            ));
        }

        let (x_interval, y_interval, cleared) = match self.brush.drag(rect) {
            Some(rect) => {
                let x_interval =
                    Interval::new(self.x_scale.invert(rect.x0), self.x_scale.invert(rect.x1));
                let y_interval =
                    Interval::new(self.y_scale.invert(rect.y0), self.y_scale.invert(rect.y1));
                self.restyle_opacity(data, spec, x_interval, y_interval);
                (x_interval, y_interval, false)
            }
            None => {
                let (x_min, x_max) = self.x_scale.domain();
                let (y_min, y_max) = self.y_scale.domain();
                let x_interval = Interval::new(x_min, x_max);
                let y_interval = Interval::new(y_min, y_max);
                for mark in self.marks.values_mut() {
                    mark.opacity = self.config.default_opacity;
                }
                (x_interval, y_interval, true)
            }
        };

        trace!(?x_interval, ?y_interval, cleared, "scatter brush");
        Ok(SelectionEvent {
            dim1: AttributeInterval::new(spec.x_attribute, x_interval),
            dim2: AttributeInterval::new(spec.y_attribute, y_interval),
            origin: SelectionOrigin::Scatter,
            cleared,
        })
    }

    /// Applies a selection produced by the other chart.
    ///
    /// Hides this chart's own brush visuals and restyles opacity by testing
    /// each record's two named attribute values against the supplied
    /// intervals. Scales and domains stay untouched. No-op when either
    /// interval is absent.
    pub fn link_external_selection(
        &mut self,
        data: &Dataset,
        dim1: Option<AttributeInterval>,
        dim2: Option<AttributeInterval>,
    ) {
        let (Some(dim1), Some(dim2)) = (dim1, dim2) else {
            return;
        };
        self.brush.hide_handles();

        for record in data.iter() {
            let inside = dim1.interval.contains(dim1.attribute.value(record))
                && dim2.interval.contains(dim2.attribute.value(record));
            if let Some(mark) = self.marks.get_mut(&record.index) {
                mark.opacity = if inside {
                    self.config.brushed_opacity
                } else {
                    self.config.default_opacity
                };
            }
        }
    }

    /// Applies a cleared selection from the other chart: every dot returns
    /// to resting opacity and this chart's own brush visuals hide.
    pub fn link_external_clear(&mut self) {
        self.brush.hide_handles();
        for mark in self.marks.values_mut() {
            mark.opacity = self.config.default_opacity;
        }
    }

    fn restyle_opacity(
        &mut self,
        data: &Dataset,
        spec: ScatterSpec,
        x_interval: Interval,
        y_interval: Interval,
    ) {
        for record in data.iter() {
            let inside = x_interval.contains(spec.x_attribute.value(record))
                && y_interval.contains(spec.y_attribute.value(record));
            if let Some(mark) = self.marks.get_mut(&record.index) {
                mark.opacity = if inside {
                    self.config.brushed_opacity
                } else {
                    self.config.default_opacity
                };
            }
        }
    }

    /// Keyed join of records against existing marks: entering marks appear at
    /// final position with default opacity, updating marks keep their opacity
    /// (a logically active selection survives a re-render), exiting marks
    /// disappear with their records.
    fn reconcile_marks(&mut self, data: &Dataset, spec: ScatterSpec) {
        let mut next = IndexMap::with_capacity(data.len());
        let mut entered = 0usize;
        let mut updated = 0usize;

        for record in data.iter() {
            let x = self.x_scale.scale(spec.x_attribute.value(record));
            let y = self.y_scale.scale(spec.y_attribute.value(record));
            let fill = dot_fill(spec.color_attribute, record);
            let radius = self.config.point_radius * dot_radius_factor(spec.color_attribute, record);

            let mark = match self.marks.get(&record.index) {
                Some(existing) => {
                    updated += 1;
                    DotMark {
                        x,
                        y,
                        fill,
                        radius,
                        opacity: existing.opacity,
                        phase: MarkPhase::Update,
                    }
                }
                None => {
                    entered += 1;
                    DotMark {
                        x,
                        y,
                        fill,
                        radius,
                        opacity: self.config.default_opacity,
                        phase: MarkPhase::Enter,
                    }
                }
            };
            next.insert(record.index, mark);
        }

        let exited = self.marks.len() + entered - next.len();
        debug!(entered, updated, exited, "scatter marks reconciled");
        self.marks = next;
    }

    fn rebuild_legend(&mut self, color_attribute: CategoricalAttribute) {
        self.legend.clear();
        match color_attribute {
            CategoricalAttribute::Seasons => {
                for season in crate::core::Season::ALL {
                    self.legend.push(LegendEntry {
                        label: season.label(),
                        color: season_color(season),
                    });
                }
            }
            CategoricalAttribute::Holiday => {
                for holiday in crate::core::Holiday::ALL {
                    self.legend.push(LegendEntry {
                        label: holiday.label(),
                        color: holiday_color(holiday),
                    });
                }
            }
            CategoricalAttribute::FunctioningDay => {
                for functioning_day in crate::core::FunctioningDay::ALL {
                    self.legend.push(LegendEntry {
                        label: functioning_day.label(),
                        color: functioning_day_color(functioning_day),
                    });
                }
            }
        }
    }

    /// Deterministic scene for the current engine state.
    pub fn render_frame(&self) -> PlotResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.config.viewport);
        let area = self.area;

        frame.rects.push(RectPrimitive::new(
            area.offset_x,
            area.offset_y,
            area.width,
            area.height,
            Color::from_rgb8(0xf9, 0xf9, 0xf9),
        ));

        if let Some(spec) = self.spec {
            self.push_x_axis(&mut frame, spec);
            self.push_y_axis(&mut frame, spec);
        }

        for mark in self.marks.values() {
            frame.circles.push(CirclePrimitive::new(
                area.offset_x + mark.x,
                area.offset_y + mark.y,
                mark.radius,
                mark.fill.with_alpha(mark.opacity),
            ));
        }

        for (position, entry) in self.legend.iter().enumerate() {
            let x = area.offset_x + position as f64 * LEGEND_SPACING_PX;
            let y = area.offset_y - 30.0;
            frame.circles.push(CirclePrimitive::new(x, y, 5.0, entry.color));
            frame.texts.push(TextPrimitive::new(
                entry.label,
                x + 10.0,
                y + 5.0,
                12.0,
                NEUTRAL,
                TextHAlign::Left,
            ));
        }

        if self.brush.handles_visible() {
            if let Some(rect) = self.brush.selection() {
                let x = rect.x0.min(rect.x1);
                let y = rect.y0.min(rect.y1);
                frame.rects.push(RectPrimitive::new(
                    area.offset_x + x,
                    area.offset_y + y,
                    (rect.x1 - rect.x0).abs(),
                    (rect.y1 - rect.y0).abs(),
                    Color::rgba(0.47, 0.47, 0.47, 0.3),
                ));
            }
        }

        Ok(frame)
    }

    fn push_x_axis(&self, frame: &mut RenderFrame, spec: ScatterSpec) {
        let area = self.area;
        let (domain_start, domain_end) = self.x_scale.domain();
        let is_date = spec.x_attribute.is_date();

        for tick in linear_ticks(domain_start, domain_end, TICK_TARGET_COUNT) {
            let x = area.offset_x + self.x_scale.scale(tick);
            frame.segments.push(SegmentPrimitive::new(
                x,
                area.offset_y,
                x,
                area.offset_y + area.height,
                1.0,
                Color::rgba(0.5, 0.5, 0.5, 0.1),
            ));
            let label = TextPrimitive::new(
                format_tick(tick, is_date),
                x,
                area.offset_y + area.height + 16.0,
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
                .push(if is_date { label.rotated(30.0) } else { label });
        }

        frame.texts.push(TextPrimitive::new(
            spec.x_attribute.label(),
            area.offset_x + area.width / 2.0,
            area.offset_y + area.height + f64::from(self.config.margin.bottom) - 5.0,
            13.0,
            NEUTRAL,
            TextHAlign::Center,
        ));
    }

    fn push_y_axis(&self, frame: &mut RenderFrame, spec: ScatterSpec) {
        let area = self.area;
        let (domain_start, domain_end) = self.y_scale.domain();
        let is_date = spec.y_attribute.is_date();

        for tick in linear_ticks(domain_start, domain_end, TICK_TARGET_COUNT) {
            let y = area.offset_y + self.y_scale.scale(tick);
            frame.segments.push(SegmentPrimitive::new(
                area.offset_x,
                y,
                area.offset_x + area.width,
                y,
                1.0,
                Color::rgba(0.5, 0.5, 0.5, 0.1),
            ));
            let label = TextPrimitive::new(
                format_tick(tick, is_date),
                area.offset_x - 8.0,
                y + 4.0,
                11.0,
                NEUTRAL,
                TextHAlign::Right,
            );
            frame
                .texts
                .push(if is_date { label.rotated(-30.0) } else { label });
        }

        frame.texts.push(
            TextPrimitive::new(
                spec.y_attribute.label(),
                area.offset_x - f64::from(self.config.margin.left) + 14.0,
                area.offset_y + area.height / 2.0,
                13.0,
                NEUTRAL,
                TextHAlign::Center,
            )
            .rotated(-90.0),
        );
    }

    #[must_use]
    pub fn config(&self) -> ScatterConfig {
        self.config
    }

    #[must_use]
    pub fn spec(&self) -> Option<ScatterSpec> {
        self.spec
    }

    #[must_use]
    pub fn marks(&self) -> &IndexMap<usize, DotMark> {
        &self.marks
    }

    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    #[must_use]
    pub fn brush_handles_visible(&self) -> bool {
        self.brush.handles_visible()
    }

    #[must_use]
    pub fn x_domain(&self) -> (f64, f64) {
        self.x_scale.domain()
    }

    #[must_use]
    pub fn y_domain(&self) -> (f64, f64) {
        self.y_scale.domain()
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.area
    }
}

fn dot_fill(color_attribute: CategoricalAttribute, record: &BikeRecord) -> Color {
    match color_attribute {
        CategoricalAttribute::Seasons => season_color(record.season),
        CategoricalAttribute::Holiday => holiday_color(record.holiday),
        CategoricalAttribute::FunctioningDay => functioning_day_color(record.functioning_day),
    }
}

fn dot_radius_factor(color_attribute: CategoricalAttribute, record: &BikeRecord) -> f64 {
    match color_attribute {
        CategoricalAttribute::Seasons => 1.0,
        CategoricalAttribute::Holiday => holiday_radius_factor(record.holiday),
        CategoricalAttribute::FunctioningDay => {
            functioning_day_radius_factor(record.functioning_day)
        }
    }
}
