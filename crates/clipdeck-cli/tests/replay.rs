use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn clipdeck(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("clipdeck").unwrap();
    cmd.env_remove("CLIPDECK_CONFIG")
        .env_remove("CLIPDECK_DEBUG_LOG")
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home);
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_str(&String::from_utf8_lossy(output)).expect("Failed to parse JSON output")
}

fn write_script(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("script.json");
    fs::write(&path, body).unwrap();
    path.to_str().unwrap().to_string()
}

fn intents_named<'a>(json: &'a Value, name: &str) -> Vec<&'a Value> {
    json["data"]["intents"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["intent"] == name)
        .collect()
}

mod replay_tests {
    use super::*;

    #[test]
    fn test_drag_and_drop_onto_folder() {
        let dir = tempdir().unwrap();
        let script = write_script(
            &dir,
            r#"[
                {"op": "down", "clip": "c1", "x": 100, "y": 100},
                {"op": "move", "x": 50, "y": 50},
                {"op": "enter", "folder": "f2"},
                {"op": "up", "x": 50, "y": 50}
            ]"#,
        );

        let output = clipdeck(dir.path())
            .args(["replay", &script, "--items", "10"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(intents_named(&json, "drag_start").len(), 1);
        let drops = intents_named(&json, "drop");
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0]["subject"], "c1");
        assert_eq!(drops[0]["target"], "f2");
    }

    #[test]
    fn test_small_movement_is_a_click() {
        let dir = tempdir().unwrap();
        let script = write_script(
            &dir,
            r#"[
                {"op": "down", "clip": "c2", "x": 10, "y": 10},
                {"op": "move", "x": 12, "y": 13},
                {"op": "enter", "folder": "f1"},
                {"op": "up", "x": 12, "y": 13}
            ]"#,
        );

        let output = clipdeck(dir.path())
            .args(["replay", &script, "--items", "5"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert!(intents_named(&json, "drag_start").is_empty());
        assert!(intents_named(&json, "drop").is_empty());
        assert!(intents_named(&json, "hover_target_changed").is_empty());
    }

    #[test]
    fn test_release_outside_zone_cancels() {
        let dir = tempdir().unwrap();
        let script = write_script(
            &dir,
            r#"[
                {"op": "down", "clip": "c1", "x": 0, "y": 0},
                {"op": "move", "x": 30, "y": 0},
                {"op": "enter", "folder": "f1"},
                {"op": "leave"},
                {"op": "up", "x": 30, "y": 0}
            ]"#,
        );

        let output = clipdeck(dir.path())
            .args(["replay", &script, "--items", "5"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(intents_named(&json, "drag_cancelled").len(), 1);
        assert!(intents_named(&json, "drop").is_empty());
    }

    #[test]
    fn test_scrolling_loads_pages_once_each() {
        let dir = tempdir().unwrap();
        let script = write_script(
            &dir,
            r#"[
                {"op": "wheel", "delta": 4000},
                {"op": "wheel", "delta": 4000},
                {"op": "wheel", "delta": 4000},
                {"op": "frames"}
            ]"#,
        );

        let output = clipdeck(dir.path())
            .args(["replay", &script, "--items", "300", "--page-size", "20"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let loaded = json["data"]["items_loaded"].as_u64().unwrap() as usize;
        assert!(loaded >= 40);
        assert_eq!(intents_named(&json, "request_more").len(), loaded / 20 - 1);
        assert!(json["data"]["offset"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_keyboard_selection() {
        let dir = tempdir().unwrap();
        let script = write_script(
            &dir,
            r#"[{"op": "next"}, {"op": "next"}, {"op": "prev"}, {"op": "select", "clip": "c4"}]"#,
        );

        let output = clipdeck(dir.path())
            .args(["replay", &script, "--items", "8"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["selected"], "c4");
    }

    #[test]
    fn test_pinned_clip_shown_first() {
        let dir = tempdir().unwrap();
        let script = write_script(&dir, r#"[{"op": "pin", "clip": "c5"}]"#);

        let output = clipdeck(dir.path())
            .args(["replay", &script, "--items", "8"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let cards = json["data"]["visible_clips"].as_array().unwrap();
        assert_eq!(cards[0]["id"], "c5");
        assert_eq!(cards[0]["pinned"], true);
        assert_eq!(cards[0]["title"], "TEXT");
        assert_eq!(cards[1]["id"], "c1");
    }

    #[test]
    fn test_search_results_are_not_paginated() {
        let dir = tempdir().unwrap();
        let script = write_script(
            &dir,
            r#"[
                {"op": "search", "query": "clip 1"},
                {"op": "wheel", "delta": 4000},
                {"op": "frames"}
            ]"#,
        );

        let output = clipdeck(dir.path())
            .args(["replay", &script, "--items", "300", "--page-size", "20"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["query"], "clip 1");
        // One capped page of matches, never extended by scrolling.
        assert_eq!(json["data"]["items_loaded"], 20);
    }

    #[test]
    fn test_missing_script_reports_error() {
        let dir = tempdir().unwrap();
        clipdeck(dir.path())
            .args(["replay", "does-not-exist.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("Failed to read script"));
    }

    #[test]
    fn test_unknown_clip_reports_error() {
        let dir = tempdir().unwrap();
        let script = write_script(&dir, r#"[{"op": "select", "clip": "c99"}]"#);
        clipdeck(dir.path())
            .args(["replay", &script, "--items", "3"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("c99"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempdir().unwrap();
        let script = write_script(&dir, "[]");
        clipdeck(dir.path())
            .args(["replay", &script, "--page-size", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("page_size"));
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let dir = tempdir().unwrap();
        let output = clipdeck(dir.path())
            .arg("config")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["drag"]["threshold_px"], 5.0);
        assert_eq!(json["data"]["window"]["item_extent"], 234.0);
        assert_eq!(json["data"]["window"]["page_size"], 100);
    }

    #[test]
    fn test_config_file_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[drag]\nthreshold_px = 8.0\n\n[window]\noverscan = 2\n").unwrap();

        let output = clipdeck(dir.path())
            .args(["config", "--config", path.to_str().unwrap()])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["drag"]["threshold_px"], 8.0);
        assert_eq!(json["data"]["window"]["overscan"], 2);
        assert_eq!(json["data"]["scroll"]["gain"], 0.52);
    }

    #[test]
    fn test_invalid_config_file_reports_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[scroll]\nconvergence = 2.0\n").unwrap();

        clipdeck(dir.path())
            .args(["config", "--config", path.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("convergence"));
    }
}
