use linkplot_rs::core::{
    Attribute, BikeRecord, CategoricalAttribute, Dataset, FunctioningDay, Holiday, Season,
};
use linkplot_rs::interaction::{BrushRect, BrushSpan};
use linkplot_rs::render::{Color, NullRenderer};
use linkplot_rs::{
    ParallelConfig, ParallelEngine, ParallelSpec, Renderer, ScatterConfig, ScatterEngine,
    ScatterSpec, Viewport,
};

fn record(index: usize, temperature: f64, humidity: f64) -> BikeRecord {
    BikeRecord {
        index,
        date: "01/12/2017".to_owned(),
        timestamp: 1_512_086_400 + index as i64 * 86_400,
        rented_bike_count: 100.0 + index as f64,
        hour: index as f64,
        temperature,
        humidity,
        wind_speed: 1.5,
        visibility: 2000.0,
        dew_point_temperature: -5.0,
        solar_radiation: 0.0,
        rainfall: 0.0,
        snowfall: 0.0,
        season: Season::Winter,
        holiday: Holiday::NoHoliday,
        functioning_day: FunctioningDay::Yes,
    }
}

fn dataset() -> Dataset {
    Dataset::new(vec![
        record(0, 5.0, 40.0),
        record(1, 15.0, 45.0),
        record(2, 25.0, 60.0),
    ])
    .expect("valid dataset")
}

fn scatter_engine() -> ScatterEngine {
    let mut engine =
        ScatterEngine::new(ScatterConfig::new(Viewport::new(600, 500))).expect("valid engine");
    engine
        .render(
            &dataset(),
            ScatterSpec {
                x_attribute: Attribute::Temperature,
                y_attribute: Attribute::Humidity,
                color_attribute: CategoricalAttribute::Seasons,
            },
        )
        .expect("render");
    engine
}

fn parallel_engine() -> ParallelEngine {
    let mut engine =
        ParallelEngine::new(ParallelConfig::new(Viewport::new(600, 500))).expect("valid engine");
    engine
        .render(
            &dataset(),
            ParallelSpec {
                lower_attribute: Attribute::Temperature,
                upper_attribute: Attribute::Date,
                lower_inverted: false,
                upper_inverted: false,
            },
        )
        .expect("render");
    engine
}

#[test]
fn scatter_frame_is_valid_and_complete() {
    let engine = scatter_engine();
    let frame = engine.render_frame().expect("frame");

    frame.validate().expect("valid frame");
    // One circle per record plus one legend swatch per season.
    assert_eq!(frame.circles.len(), 3 + 4);
    assert!(!frame.rects.is_empty());
    assert!(!frame.texts.is_empty());

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("null render");
    assert_eq!(renderer.last_circle_count, frame.circles.len());
}

#[test]
fn scatter_frame_shows_the_brush_rectangle_only_while_handles_are_visible() {
    let data = dataset();
    let mut engine = scatter_engine();
    let baseline_rects = engine.render_frame().expect("frame").rects.len();

    engine
        .brush(&data, BrushRect::new(100.0, 100.0, 300.0, 300.0))
        .expect("brush");
    let frame = engine.render_frame().expect("frame");
    assert_eq!(frame.rects.len(), baseline_rects + 1);

    // A full render hides the handles again.
    engine
        .render(
            &data,
            ScatterSpec {
                x_attribute: Attribute::Hour,
                y_attribute: Attribute::Humidity,
                color_attribute: CategoricalAttribute::Seasons,
            },
        )
        .expect("re-render");
    let frame = engine.render_frame().expect("frame");
    assert_eq!(frame.rects.len(), baseline_rects);
}

#[test]
fn scatter_dots_carry_their_opacity_in_the_fill_alpha() {
    let engine = scatter_engine();
    let frame = engine.render_frame().expect("frame");

    let faint = engine.config().default_opacity;
    let dots: Vec<&_> = frame
        .circles
        .iter()
        .filter(|circle| circle.fill.alpha == faint)
        .collect();
    assert_eq!(dots.len(), 3);
}

#[test]
fn parallel_frame_draws_one_segment_per_record_plus_two_axes() {
    let engine = parallel_engine();
    let frame = engine.render_frame().expect("frame");

    frame.validate().expect("valid frame");
    assert_eq!(frame.segments.len(), 3 + 2);

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("null render");
    assert_eq!(renderer.last_segment_count, frame.segments.len());
}

#[test]
fn parallel_frame_shows_brush_bands_only_while_dragging() {
    let data = dataset();
    let mut engine = parallel_engine();
    let baseline_rects = engine.render_frame().expect("frame").rects.len();

    engine
        .brush_lower(&data, BrushSpan::new(100.0, 400.0))
        .expect("brush");
    let frame = engine.render_frame().expect("frame");
    assert_eq!(frame.rects.len(), baseline_rects + 1);

    engine
        .brush_lower(&data, BrushSpan::new(200.0, 200.0))
        .expect("collapsed brush");
    let frame = engine.render_frame().expect("frame");
    assert_eq!(frame.rects.len(), baseline_rects);
}

#[test]
fn color_lerp_interpolates_componentwise() {
    let black = Color::rgb(0.0, 0.0, 0.0);
    let white = Color::rgb(1.0, 1.0, 1.0);

    let mid = black.lerp(white, 0.5);
    assert!((mid.red - 0.5).abs() <= 1e-9);
    assert!((mid.green - 0.5).abs() <= 1e-9);
    assert!((mid.blue - 0.5).abs() <= 1e-9);

    assert_eq!(black.lerp(white, 0.0), black);
    assert_eq!(black.lerp(white, 1.0), white);
}

#[test]
fn frame_builders_accumulate_primitives() {
    use linkplot_rs::render::{
        CirclePrimitive, RectPrimitive, RenderFrame, SegmentPrimitive, TextHAlign, TextPrimitive,
    };

    let frame = RenderFrame::new(Viewport::new(200, 100))
        .with_rect(RectPrimitive::new(0.0, 0.0, 200.0, 100.0, Color::rgb(1.0, 1.0, 1.0)))
        .with_segment(SegmentPrimitive::new(
            0.0,
            50.0,
            200.0,
            50.0,
            1.0,
            Color::rgb(0.0, 0.0, 0.0),
        ))
        .with_circle(CirclePrimitive::new(100.0, 50.0, 4.0, Color::rgb(0.5, 0.0, 0.0)))
        .with_text(TextPrimitive::new(
            "label",
            100.0,
            90.0,
            11.0,
            Color::rgb(0.0, 0.0, 0.0),
            TextHAlign::Center,
        ));

    frame.validate().expect("valid frame");
    assert!(!frame.is_empty());
    assert_eq!(frame.rects.len(), 1);
    assert_eq!(frame.segments.len(), 1);
    assert_eq!(frame.circles.len(), 1);
    assert_eq!(frame.texts.len(), 1);
}

#[test]
fn empty_engine_still_produces_a_valid_frame() {
    let engine =
        ScatterEngine::new(ScatterConfig::new(Viewport::new(600, 500))).expect("valid engine");
    let frame = engine.render_frame().expect("frame");

    frame.validate().expect("valid frame");
    assert!(frame.circles.is_empty());
}
