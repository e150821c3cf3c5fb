use linkplot_rs::core::Attribute;
use linkplot_rs::{
    AttributeInterval, Interval, ParallelConfig, ParallelSpec, ScatterConfig, ScatterSpec,
    SelectionEvent, SelectionOrigin, SelectionState, Viewport,
};

#[test]
fn selection_state_serializes_round_trip() {
    let mut state = SelectionState::default();
    state.apply(SelectionEvent {
        dim1: AttributeInterval::new(Attribute::Temperature, Interval::new(-3.5, 12.0)),
        dim2: AttributeInterval::new(Attribute::Humidity, Interval::new(40.0, 60.0)),
        origin: SelectionOrigin::Scatter,
        cleared: false,
    });

    let json = serde_json::to_string(&state).expect("serialize");
    let recovered: SelectionState = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(recovered, state);
    assert_eq!(recovered.revision(), 1);
    assert_eq!(recovered.origin(), Some(SelectionOrigin::Scatter));
    assert!(!recovered.cleared());
}

#[test]
fn chart_specs_serialize_round_trip() {
    let scatter = ScatterSpec {
        x_attribute: Attribute::RentedBikeCount,
        y_attribute: Attribute::Temperature,
        color_attribute: linkplot_rs::core::CategoricalAttribute::Holiday,
    };
    let json = serde_json::to_string(&scatter).expect("serialize");
    let recovered: ScatterSpec = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(recovered, scatter);

    let parallel = ParallelSpec {
        lower_attribute: Attribute::Snowfall,
        upper_attribute: Attribute::Date,
        lower_inverted: true,
        upper_inverted: false,
    };
    let json = serde_json::to_string(&parallel).expect("serialize");
    let recovered: ParallelSpec = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(recovered, parallel);
}

#[test]
fn configs_expose_stable_defaults() {
    let scatter = ScatterConfig::new(Viewport::new(600, 500));
    let json = serde_json::to_value(scatter).expect("serialize");

    assert_eq!(json["margin"]["left"], 80);
    assert_eq!(json["point_radius"], 3.5);
    assert_eq!(json["default_opacity"], 0.2);
    assert_eq!(json["brushed_opacity"], 0.6);
    assert_eq!(json["transition_ms"], 2000);

    let parallel = ParallelConfig::new(Viewport::new(600, 500));
    let json = serde_json::to_value(parallel).expect("serialize");

    assert_eq!(json["margin"]["right"], 15);
    assert_eq!(json["default_opacity"], 0.02);
    assert_eq!(json["stroke_width"], 1.0);
}
