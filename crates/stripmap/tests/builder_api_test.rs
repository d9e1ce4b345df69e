//! Integration tests for the DiagramBuilder API
//!
//! These tests verify that the public API works end to end.

use stripmap::{
    DiagramBuilder, StripmapError,
    config::{AppConfig, LayoutConfig, StyleConfig},
    route::Direction,
};

const BRANCHING: &str = r#"{
    "trips": [
        {"id": "main", "name": "Main", "color": [37, 99, 235],
         "inbound": ["A", "B", "C", "D"], "outbound": ["D", "C", "B", "A"]},
        {"id": "branch", "name": "Branch", "color": [22, 163, 74],
         "inbound": ["A", "B", "X", "Y"], "outbound": ["Y", "X", "B", "A"]},
        {"id": "express", "name": "Express", "color": [220, 38, 38],
         "inbound": ["A", "D"], "outbound": ["D", "A"]}
    ],
    "stops": [
        {"id": "A", "name": "Alpha"}, {"id": "B", "name": "Bravo"},
        {"id": "C", "name": "Charlie"}, {"id": "D", "name": "Delta"},
        {"id": "X", "name": "X-ray"}, {"id": "Y", "name": "Yankee"}
    ]
}"#;

#[test]
fn test_parse_and_build() {
    let builder = DiagramBuilder::default();
    let route = builder.parse(BRANCHING).expect("Failed to parse route");
    let output = builder.build(&route);

    assert_eq!(output.stop_positions().len(), 6);
    assert_eq!(output.markers().len(), 12);
    assert_eq!(output.trip_paths().len(), 3);
    assert_eq!(output.labels().len(), 6);
}

#[test]
fn test_render_svg() {
    let builder = DiagramBuilder::default();
    let route = builder.parse(BRANCHING).expect("Failed to parse route");
    let svg = builder
        .render_svg(&builder.build(&route))
        .expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Bravo - B"));
}

#[test]
fn test_render_json_round_trips_through_serde() {
    let builder = DiagramBuilder::default();
    let route = builder.parse(BRANCHING).expect("Failed to parse route");
    let json = builder
        .render_json(&builder.build(&route))
        .expect("Failed to render");

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tripPaths"][2]["id"], "express");
    assert_eq!(
        value["stopPositions"]["B"]["tripIds"],
        serde_json::json!(["main", "branch"])
    );
}

#[test]
fn test_express_connections_are_flagged() {
    let builder = DiagramBuilder::default();
    let route = builder.parse(BRANCHING).expect("Failed to parse route");
    let layout = builder.layout(&route);

    let express: Vec<_> = layout
        .inbound()
        .connections()
        .iter()
        .filter(|c| c.is_express())
        .collect();
    assert_eq!(express.len(), 1);
    assert_eq!((express[0].from(), express[0].to()), ("A", "D"));
    assert!(express[0].is_branch());
}

#[test]
fn test_parse_invalid_input_returns_error() {
    let builder = DiagramBuilder::default();
    for invalid in ["not json", r#"{"stops": []}"#, r#"{"trips": 1, "stops": []}"#] {
        let result = builder.parse(invalid);
        assert!(
            matches!(result, Err(StripmapError::Input { .. })),
            "Should reject {invalid}"
        );
    }
}

#[test]
fn test_invalid_style_fails_render() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        StyleConfig::default().with_background_color("definitely not a color"),
    );
    let builder = DiagramBuilder::new(config);
    let route = builder.parse(BRANCHING).expect("Failed to parse route");

    let result = builder.render_svg(&builder.build(&route));
    assert!(matches!(result, Err(StripmapError::Export(_))));
}

#[test]
fn test_custom_layout_config() {
    let config = AppConfig::new(
        LayoutConfig::default()
            .with_stop_spacing(40.0)
            .with_base_y(100.0, 400.0),
        StyleConfig::default(),
    );
    let builder = DiagramBuilder::new(config);
    let route = builder.parse(BRANCHING).expect("Failed to parse route");
    let layout = builder.layout(&route);

    let d = layout.inbound().stop("D").unwrap().position();
    assert_eq!((d.x(), d.y()), (120.0, 100.0));
    let a = layout.outbound().stop("A").unwrap().position();
    assert_eq!((a.x(), a.y()), (0.0, 400.0));
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let first = builder.parse(BRANCHING).expect("Failed to parse route");
    let second = builder
        .parse(r#"{"trips": [], "stops": []}"#)
        .expect("Failed to parse empty route");

    assert_eq!(builder.build(&first).trip_paths().len(), 3);
    assert!(builder.build(&second).stop_positions().is_empty());
    assert!(builder.layout(&second).consensus_sequence(Direction::Inbound).is_empty());
}
