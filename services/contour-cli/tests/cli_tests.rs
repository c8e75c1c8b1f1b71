//! End-to-end tests for the contour CLI: argument parsing, configuration
//! layering, field loading and JSON output.

use clap::Parser;
use contour_cli::{run, write_output, Args};
use contour_tracer::Anomaly;
use test_utils::{assert_points_approx_eq, fixtures, write_temp_file};

fn no_env(_: &str) -> Option<String> {
    None
}

fn args(input: &tempfile::NamedTempFile, extra: &[&str]) -> Args {
    let input = input.path().to_string_lossy().into_owned();
    let mut argv = vec!["contour-cli".to_string(), input];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn test_run_with_config_file() {
    let input = write_temp_file(fixtures::json::CENTER_PEAK, ".json").unwrap();
    let config = write_temp_file(fixtures::json::LEVEL_ONE_CONFIG, ".json").unwrap();
    let config_path = config.path().to_string_lossy().into_owned();

    let set = run(&args(&input, &["--config", &config_path]), no_env).unwrap();

    assert_eq!(set.levels.len(), 1);
    assert_eq!(set.levels[0].level, 1.0);
    assert_points_approx_eq!(
        set.levels[0].closed_paths[0],
        [(1.0, 0.5), (0.5, 1.0), (1.0, 1.5), (1.5, 1.0)],
        1e-12
    );
}

#[test]
fn test_axes_and_missing_sample() {
    let input = write_temp_file(fixtures::json::CENTER_PEAK_AXES, ".json").unwrap();
    let set = run(
        &args(&input, &["--start", "1", "--end", "1", "--smoothing", "0"]),
        no_env,
    )
    .unwrap();

    let perimeter = set.perimeter.unwrap();
    assert_eq!((perimeter.left, perimeter.right), (10.0, 30.0));
    assert_eq!((perimeter.bottom, perimeter.top), (-1.0, 1.0));

    let level = &set.levels[0];
    assert!(level.edge_paths.is_empty());
    assert_points_approx_eq!(
        level.closed_paths[0],
        [(20.0, -0.5), (15.0, 0.0), (20.0, 0.5), (25.0, 0.0)],
        1e-12
    );
}

#[test]
fn test_flags_override_environment() {
    let input = write_temp_file(fixtures::json::CENTER_PEAK, ".json").unwrap();
    let env = |key: &str| match key {
        "CONTOUR_LEVEL_START" => Some("1".to_string()),
        "CONTOUR_LEVEL_END" => Some("1".to_string()),
        "CONTOUR_FILL" => Some("false".to_string()),
        _ => None,
    };

    let set = run(&args(&input, &[]), env).unwrap();
    assert_eq!(set.levels.len(), 1);
    assert_eq!(set.levels[0].fill_boundary, None);

    let set = run(&args(&input, &["--start", "0.5"]), env).unwrap();
    let levels: Vec<f64> = set.levels.iter().map(|l| l.level).collect();
    assert_eq!(levels, vec![0.5]);
}

#[test]
fn test_interval_picks_levels_from_data_range() {
    let input = write_temp_file(fixtures::json::CENTER_PEAK, ".json").unwrap();
    let set = run(&args(&input, &["--interval", "0.5"]), no_env).unwrap();
    let levels: Vec<f64> = set.levels.iter().map(|l| l.level).collect();
    assert_eq!(levels, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn test_interval_conflicts_with_start() {
    let result = Args::try_parse_from(["contour-cli", "in.json", "--interval", "1", "--start", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_interval_conflicts_with_size() {
    let result = Args::try_parse_from(["contour-cli", "in.json", "--interval", "1", "--size", "2"]);
    assert!(result.is_err());
}

#[test]
fn test_fine_grid_needs_pixel_box() {
    let input = write_temp_file(
        r#"{"z": [[0, 0, 0], [0, 2, 0], [0, 0, 0]], "x": [0, 0.004, 0.008], "y": [0, 0.004, 0.008]}"#,
        ".json",
    )
    .unwrap();
    let level_one = ["--start", "1", "--end", "1"];

    let set = run(&args(&input, &level_one), no_env).unwrap();
    assert_eq!(set.path_count(), 0);
    assert!(matches!(
        set.levels[0].anomalies.as_slice(),
        [Anomaly::DegeneratePath { .. }]
    ));

    let mut boxed = level_one.to_vec();
    boxed.extend(["--pixel-width", "100", "--pixel-height", "100"]);
    let set = run(&args(&input, &boxed), no_env).unwrap();
    assert_eq!(set.levels[0].closed_paths.len(), 1);
    assert_eq!(set.anomaly_count(), 0);
}

#[test]
fn test_pixel_box_flips_y() {
    let input = write_temp_file(fixtures::json::CENTER_PEAK, ".json").unwrap();
    let set = run(
        &args(
            &input,
            &[
                "--start",
                "1",
                "--end",
                "1",
                "--smoothing",
                "0",
                "--pixel-width",
                "200",
                "--pixel-height",
                "100",
            ],
        ),
        no_env,
    )
    .unwrap();

    let perimeter = set.perimeter.unwrap();
    assert_eq!((perimeter.left, perimeter.right), (0.0, 200.0));
    assert_eq!((perimeter.top, perimeter.bottom), (0.0, 100.0));
    assert_points_approx_eq!(
        set.levels[0].closed_paths[0],
        [(100.0, 75.0), (50.0, 50.0), (100.0, 25.0), (150.0, 50.0)],
        1e-9
    );
}

#[test]
fn test_pixel_width_requires_height() {
    let result = Args::try_parse_from(["contour-cli", "in.json", "--pixel-width", "100"]);
    assert!(result.is_err());
}

#[test]
fn test_no_fill_flag() {
    let input = write_temp_file(fixtures::json::CENTER_PEAK, ".json").unwrap();
    let set = run(&args(&input, &["--no-fill", "--sequential"]), no_env).unwrap();
    assert!(set.levels.iter().all(|l| l.fill_boundary.is_none()));
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let input = write_temp_file(fixtures::json::CENTER_PEAK, ".json").unwrap();
    assert!(run(&args(&input, &["--smoothing=-1"]), no_env).is_err());
}

#[test]
fn test_missing_input_file_is_error() {
    let args = Args::try_parse_from(["contour-cli", "/nonexistent/field.json"]).unwrap();
    let err = run(&args, no_env).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read field file"));
}

#[test]
fn test_malformed_input_is_error() {
    let input = write_temp_file(r#"{"values": []}"#, ".json").unwrap();
    assert!(run(&args(&input, &[]), no_env).is_err());
}

#[test]
fn test_write_output_json_shape() {
    let input = write_temp_file(fixtures::json::CENTER_PEAK, ".json").unwrap();
    let set = run(
        &args(&input, &["--start", "1", "--end", "1", "--smoothing", "0"]),
        no_env,
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("contours.json");
    write_output(&set, Some(&out), true).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["perimeter"][0], serde_json::json!([0.0, 2.0]));
    let level = &json["levels"][0];
    assert_eq!(level["level"], 1.0);
    assert_eq!(level["closedPaths"][0].as_array().unwrap().len(), 4);
    assert_eq!(level["edgePaths"].as_array().unwrap().len(), 0);
    assert!(level["fillBoundary"].is_array());
    assert_eq!(level["anomalies"].as_array().unwrap().len(), 0);
}
