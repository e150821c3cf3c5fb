use linkplot_rs::core::palette::NEUTRAL;
use linkplot_rs::core::{
    Attribute, BikeRecord, CategoricalAttribute, Dataset, FunctioningDay, Holiday, Season,
};
use linkplot_rs::interaction::{BrushRect, BrushSpan};
use linkplot_rs::{
    Dashboard, LinkCoordinator, ParallelAxis, ParallelConfig, ScatterAxis, ScatterConfig,
    SelectionEvent, SelectionOrigin, Viewport,
};
use linkplot_rs::{AttributeInterval, Interval};

fn record(index: usize, temperature: f64) -> BikeRecord {
    BikeRecord {
        index,
        date: "01/12/2017".to_owned(),
        timestamp: 1_512_086_400 + index as i64 * 86_400,
        rented_bike_count: 100.0 + index as f64,
        hour: index as f64,
        temperature,
        humidity: 40.0 + index as f64,
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
        record(0, 5.0),
        record(1, 15.0),
        record(2, 25.0),
    ])
    .expect("valid dataset")
}

fn dashboard() -> Dashboard {
    let viewport = Viewport::new(600, 500);
    let mut dashboard = Dashboard::new(
        ScatterConfig::new(viewport),
        ParallelConfig::new(viewport),
    )
    .expect("valid dashboard");
    dashboard.set_dataset(dataset()).expect("set dataset");
    dashboard
}

fn scatter_event(revision_tag: f64) -> SelectionEvent {
    SelectionEvent {
        dim1: AttributeInterval::new(
            Attribute::Temperature,
            Interval::new(0.0, revision_tag),
        ),
        dim2: AttributeInterval::new(Attribute::Humidity, Interval::new(0.0, 1.0)),
        origin: SelectionOrigin::Scatter,
        cleared: false,
    }
}

#[test]
fn coordinator_starts_empty() {
    let coordinator = LinkCoordinator::new();
    let state = coordinator.state();

    assert!(state.is_empty());
    assert_eq!(state.revision(), 0);
    assert!(state.dim1().is_none());
    assert!(state.origin().is_none());
}

#[test]
fn coordinator_keeps_one_driving_chart_at_a_time() {
    let mut coordinator = LinkCoordinator::new();
    coordinator.apply(scatter_event(10.0));

    let parallel_event = SelectionEvent {
        dim1: AttributeInterval::new(Attribute::Hour, Interval::new(2.0, 6.0)),
        dim2: AttributeInterval::new(Attribute::Rainfall, Interval::new(0.0, 3.0)),
        origin: SelectionOrigin::Parallel,
        cleared: false,
    };
    let state = coordinator.apply(parallel_event);

    // The scatter selection is gone entirely, origin included.
    assert_eq!(state.origin(), Some(SelectionOrigin::Parallel));
    let dim1 = state.dim1().expect("dim1");
    assert_eq!(dim1.attribute, Attribute::Hour);
    assert_eq!(dim1.interval, Interval::new(2.0, 6.0));
}

#[test]
fn coordinator_revision_is_monotonic() {
    let mut coordinator = LinkCoordinator::new();
    let mut last = coordinator.state().revision();

    for i in 1..=5 {
        let state = coordinator.apply(scatter_event(i as f64));
        assert!(state.revision() > last);
        last = state.revision();
    }
    assert_eq!(last, 5);
}

#[test]
fn origin_counterpart_flips() {
    assert_eq!(
        SelectionOrigin::Scatter.counterpart(),
        SelectionOrigin::Parallel
    );
    assert_eq!(
        SelectionOrigin::Parallel.counterpart(),
        SelectionOrigin::Scatter
    );
}

#[test]
fn scatter_brush_restyles_the_parallel_plot() {
    let mut dashboard = dashboard();

    // Rented bike count [100.5, 101.5] x temperature [10, 20] keeps record 1.
    let state = dashboard
        .scatter_brush(BrushRect::new(122.5, 92.5, 367.5, 277.5))
        .expect("brush");

    assert_eq!(state.origin(), Some(SelectionOrigin::Scatter));
    assert_eq!(state.revision(), 1);

    let scatter = dashboard.scatter();
    assert_eq!(scatter.marks()[&1].opacity, scatter.config().brushed_opacity);
    assert_eq!(scatter.marks()[&0].opacity, scatter.config().default_opacity);

    let parallel = dashboard.parallel();
    assert_eq!(parallel.marks()[&1].opacity, 1.0);
    assert_ne!(parallel.marks()[&1].stroke, NEUTRAL);
    assert_eq!(
        parallel.marks()[&0].opacity,
        parallel.config().default_opacity
    );
    assert_eq!(
        parallel.marks()[&2].opacity,
        parallel.config().default_opacity
    );
    // The receiving chart shows no brush visuals of its own.
    assert!(!parallel.lower_brush_active());
    assert!(!parallel.upper_brush_active());
}

#[test]
fn parallel_brush_supersedes_a_scatter_selection() {
    let mut dashboard = dashboard();
    dashboard
        .scatter_brush(BrushRect::new(122.5, 92.5, 367.5, 277.5))
        .expect("scatter brush");

    // Temperature [10, 20] on the parallel plot's lower axis keeps record 1.
    let state = dashboard
        .parallel_lower_brush(BrushSpan::new(142.5, 427.5))
        .expect("parallel brush");

    assert_eq!(state.origin(), Some(SelectionOrigin::Parallel));
    assert_eq!(state.revision(), 2);
    assert_eq!(
        state.dim1().expect("dim1").attribute,
        Attribute::Temperature
    );

    let scatter = dashboard.scatter();
    assert_eq!(scatter.marks()[&1].opacity, scatter.config().brushed_opacity);
    assert_eq!(scatter.marks()[&0].opacity, scatter.config().default_opacity);
    assert!(!scatter.brush_handles_visible());
}

#[test]
fn upper_brush_routes_through_the_link_too() {
    let mut dashboard = dashboard();

    // Date axis: select the first two days.
    let state = dashboard
        .parallel_upper_brush(BrushSpan::new(0.0, 300.0))
        .expect("upper brush");

    assert_eq!(state.origin(), Some(SelectionOrigin::Parallel));
    assert_eq!(state.dim2().expect("dim2").attribute, Attribute::Date);

    let scatter = dashboard.scatter();
    assert_eq!(scatter.marks()[&0].opacity, scatter.config().brushed_opacity);
    assert_eq!(scatter.marks()[&1].opacity, scatter.config().brushed_opacity);
    assert_eq!(scatter.marks()[&2].opacity, scatter.config().default_opacity);
}

#[test]
fn clearing_a_scatter_brush_resets_the_parallel_plot() {
    let mut dashboard = dashboard();
    dashboard
        .scatter_brush(BrushRect::new(122.5, 92.5, 367.5, 277.5))
        .expect("scatter brush");
    assert_eq!(dashboard.parallel().marks()[&1].opacity, 1.0);

    let state = dashboard
        .scatter_brush(BrushRect::new(200.0, 100.0, 200.0, 300.0))
        .expect("cleared brush");

    assert!(state.cleared());
    assert_eq!(state.revision(), 2);

    // The counterpart returns to resting style, not highlight-everything.
    let parallel = dashboard.parallel();
    for mark in parallel.marks().values() {
        assert_eq!(mark.stroke, NEUTRAL);
        assert_eq!(mark.opacity, parallel.config().default_opacity);
    }
    let scatter = dashboard.scatter();
    for mark in scatter.marks().values() {
        assert_eq!(mark.opacity, scatter.config().default_opacity);
    }
}

#[test]
fn collapsing_the_parallel_brush_resets_the_scatter_plot() {
    let mut dashboard = dashboard();
    dashboard
        .parallel_lower_brush(BrushSpan::new(142.5, 427.5))
        .expect("parallel brush");
    assert_eq!(
        dashboard.scatter().marks()[&1].opacity,
        dashboard.scatter().config().brushed_opacity
    );

    let state = dashboard
        .parallel_lower_brush(BrushSpan::new(300.0, 300.0))
        .expect("collapsed brush");

    assert!(state.cleared());
    let scatter = dashboard.scatter();
    for mark in scatter.marks().values() {
        assert_eq!(mark.opacity, scatter.config().default_opacity);
    }
    assert!(!scatter.brush_handles_visible());
}

#[test]
fn a_fresh_brush_after_a_clear_drives_the_link_again() {
    let mut dashboard = dashboard();
    dashboard
        .scatter_brush(BrushRect::new(200.0, 100.0, 200.0, 300.0))
        .expect("cleared brush");

    let state = dashboard
        .scatter_brush(BrushRect::new(122.5, 92.5, 367.5, 277.5))
        .expect("scatter brush");

    assert!(!state.cleared());
    assert_eq!(dashboard.parallel().marks()[&1].opacity, 1.0);
}

#[test]
fn axis_intents_reject_the_attribute_on_the_other_axis() {
    let mut dashboard = dashboard();

    // Defaults: scatter x is rented bike count, y is temperature.
    assert!(
        dashboard
            .set_scatter_axis(ScatterAxis::X, Attribute::Temperature)
            .is_err()
    );
    assert!(
        dashboard
            .set_scatter_axis(ScatterAxis::Y, Attribute::RentedBikeCount)
            .is_err()
    );
    // Defaults: parallel lower is temperature, upper is date.
    assert!(
        dashboard
            .set_parallel_axis(ParallelAxis::Lower, Attribute::Date)
            .is_err()
    );
    assert!(
        dashboard
            .set_parallel_axis(ParallelAxis::Upper, Attribute::Temperature)
            .is_err()
    );

    // Rejection leaves the specs untouched.
    assert_eq!(dashboard.scatter_spec().x_attribute, Attribute::RentedBikeCount);
    assert_eq!(dashboard.parallel_spec().upper_attribute, Attribute::Date);
}

#[test]
fn axis_pickers_exclude_the_other_axis() {
    let dashboard = dashboard();

    let allowed = dashboard.allowed_scatter_attributes(ScatterAxis::X);
    assert_eq!(allowed.len(), Attribute::ALL.len() - 1);
    assert!(!allowed.contains(&Attribute::Temperature));

    let allowed = dashboard.allowed_parallel_attributes(ParallelAxis::Upper);
    assert_eq!(allowed.len(), Attribute::ALL.len() - 1);
    assert!(!allowed.contains(&Attribute::Temperature));
}

#[test]
fn changing_an_axis_recomputes_the_domain() {
    let mut dashboard = dashboard();
    dashboard
        .set_scatter_axis(ScatterAxis::X, Attribute::Humidity)
        .expect("set axis");

    assert_eq!(dashboard.scatter_spec().x_attribute, Attribute::Humidity);
    assert_eq!(dashboard.scatter().x_domain(), (40.0, 42.0));
}

#[test]
fn selection_survives_an_axis_change_on_the_receiving_chart() {
    let mut dashboard = dashboard();
    dashboard
        .parallel_lower_brush(BrushSpan::new(142.5, 427.5))
        .expect("parallel brush");

    // Re-render the receiving scatterplot with a new y attribute; record 1
    // keeps its highlight because the interval lives in data space.
    dashboard
        .set_scatter_axis(ScatterAxis::Y, Attribute::Humidity)
        .expect("set axis");

    let scatter = dashboard.scatter();
    assert_eq!(scatter.marks()[&1].opacity, scatter.config().brushed_opacity);
    assert_eq!(scatter.marks()[&0].opacity, scatter.config().default_opacity);
}

#[test]
fn swap_exchanges_attributes_but_not_inversion_flags() {
    let mut dashboard = dashboard();
    dashboard
        .invert_parallel_axis(ParallelAxis::Lower)
        .expect("invert");
    dashboard.swap_parallel_axes().expect("swap");

    let spec = dashboard.parallel_spec();
    assert_eq!(spec.lower_attribute, Attribute::Date);
    assert_eq!(spec.upper_attribute, Attribute::Temperature);
    // The inversion stays with the lower position, not the attribute.
    assert!(spec.lower_inverted);
    assert!(!spec.upper_inverted);
}

#[test]
fn inverting_an_axis_reverses_its_domain() {
    let mut dashboard = dashboard();
    dashboard
        .invert_parallel_axis(ParallelAxis::Lower)
        .expect("invert");
    assert_eq!(dashboard.parallel().lower_domain(), (25.0, 5.0));

    dashboard
        .invert_parallel_axis(ParallelAxis::Lower)
        .expect("invert back");
    assert_eq!(dashboard.parallel().lower_domain(), (5.0, 25.0));
}

#[test]
fn color_encoding_intent_updates_spec_and_legend() {
    let mut dashboard = dashboard();
    dashboard
        .set_color_encoding(CategoricalAttribute::FunctioningDay)
        .expect("recolor");

    assert_eq!(
        dashboard.scatter_spec().color_attribute,
        CategoricalAttribute::FunctioningDay
    );
    let labels: Vec<_> = dashboard
        .scatter()
        .legend()
        .iter()
        .map(|entry| entry.label)
        .collect();
    assert_eq!(labels, vec!["No", "Yes"]);
}

#[test]
fn replacing_the_dataset_re_renders_both_charts() {
    let mut dashboard = dashboard();
    let smaller = Dataset::new(vec![record(0, 5.0), record(1, 15.0)]).expect("valid dataset");
    dashboard.set_dataset(smaller).expect("set dataset");

    assert_eq!(dashboard.scatter().marks().len(), 2);
    assert_eq!(dashboard.parallel().marks().len(), 2);
    assert_eq!(dashboard.scatter().y_domain(), (5.0, 15.0));
}
