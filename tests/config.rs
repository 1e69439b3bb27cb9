use tilescape::Error;
use tilescape::config::MapConfig;
use tilescape::geometry::Rect;
use tilescape::renderer::TextureId;
use tilescape::tilemap::{ABSENT, AutoTileKind, Coordinate, GridMap, TileMap, TileSet};

const MAP_JSON: &str = r#"{
    "cell_size": 16,
    "width": 64,
    "height": 48,
    "visible": { "min": [2, 2], "max": [42, 32] },
    "tile_set": {
        "columns": 16,
        "rows": 8,
        "tile_width": 16,
        "tile_height": 16,
        "autotiles": [
            { "base": 0, "kind": "blob" },
            { "base": 64, "kind": "edge" }
        ]
    }
}"#;

fn with_autotiles(autotiles: &str) -> String {
    format!(
        r#"{{ "cell_size": 8, "width": 4, "height": 4,
             "tile_set": {{ "columns": 8, "rows": 8, "tile_width": 8, "tile_height": 8,
                            "autotiles": {autotiles} }} }}"#
    )
}

#[test]
fn test_parse_map_config() {
    let config = MapConfig::from_json(MAP_JSON).unwrap();
    assert_eq!(config.cell_size, 16);
    assert_eq!(config.visible, Some(Rect::new(2, 2, 42, 32)));
    assert_eq!(config.tile_set.autotiles.len(), 2);
    assert_eq!(config.tile_set.autotiles[1].kind, AutoTileKind::Edge);

    let metrics = config.metrics();
    assert_eq!(metrics.cell_size(), 16);
    assert_eq!(metrics.bounds(), Rect::new(32, 32, 672, 512));
}

#[test]
fn test_visible_defaults_to_whole_map() {
    let config = MapConfig::from_json(&with_autotiles("[]")).unwrap();
    assert_eq!(config.visible, None);
    assert_eq!(config.metrics().cell_bounds, Rect::from_size(4, 4));
}

#[test]
fn test_build_grid_map() {
    let config = MapConfig::from_json(MAP_JSON).unwrap();
    let map = GridMap::from_config(&config, TextureId(9)).unwrap();
    assert_eq!(map.tile_set().texture(), TextureId(9));
    assert_eq!(map.tiles().len(), 64 * 48);
    assert_eq!(map.tile_at(Coordinate::from_cell(10, 10)), ABSENT);
    assert!(map.tile_set().is_auto_tile(70).is_some());
    assert!(map.tile_set().is_auto_tile(50).is_none());
}

#[test]
fn test_round_trip_through_json() {
    let config = MapConfig::from_json(MAP_JSON).unwrap();
    let again = MapConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(config, again);
}

#[test]
fn test_rejects_overlapping_runs() {
    let json = with_autotiles(r#"[{ "base": 0, "kind": "blob" }, { "base": 40, "kind": "edge" }]"#);
    let err = MapConfig::from_json(&json).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("overlaps")));
}

#[test]
fn test_rejects_run_past_atlas() {
    let json = with_autotiles(r#"[{ "base": 50, "kind": "edge" }]"#);
    assert!(matches!(MapConfig::from_json(&json), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_rejects_atlas_wider_than_u32_pixels() {
    let json = r#"{ "cell_size": 16, "width": 4, "height": 4,
        "tile_set": { "columns": 65536, "rows": 1, "tile_width": 65536, "tile_height": 16 } }"#;
    let err = MapConfig::from_json(json).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("too large")));
}

#[test]
fn test_rejects_map_beyond_coordinate_range() {
    let json = MAP_JSON.replace(r#""width": 64"#, r#""width": 65537"#);
    assert!(matches!(MapConfig::from_json(&json), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_rejects_zero_cell_size() {
    let json = MAP_JSON.replace(r#""cell_size": 16"#, r#""cell_size": 0"#);
    assert!(matches!(MapConfig::from_json(&json), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_rejects_visible_outside_map() {
    let json = MAP_JSON.replace(r#""max": [42, 32]"#, r#""max": [65, 32]"#);
    assert!(matches!(MapConfig::from_json(&json), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(MapConfig::from_json("{ \"cell_size\": "), Err(Error::Json(_))));
    let unknown = MAP_JSON.replace(r#""width""#, r#""widht""#);
    assert!(matches!(MapConfig::from_json(&unknown), Err(Error::Json(_))));
}
