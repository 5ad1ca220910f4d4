use std::fs;

use camino::Utf8PathBuf;
use serde_json::json;
use tempfile::tempdir;

use harbor_app_core::{ControllerOptions, SelectionPolicy};
use harbor_cli::settings::Settings;
use harbor_cli::{commands, Session};
use harbor_infra::sample_seed;

fn session() -> Session {
    Session::new(sample_seed(), ControllerOptions::default(), None)
}

#[tokio::test]
async fn types_lists_all_types_first() {
    let options = commands::cmd_types(&session()).await.unwrap();
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["All Types", "Sport", "Fishing", "Sailboat"]);
    assert_eq!(options[0].value, "");
}

#[tokio::test]
async fn search_by_type_renders_matching_rows() {
    let vm = commands::cmd_search(&session(), Some("t3")).await.unwrap();
    assert_eq!(vm.rows.len(), 1);
    assert_eq!(vm.rows[0].id.as_str(), "b3");
    assert!(!vm.is_loading);
}

#[tokio::test]
async fn search_rejects_unknown_type() {
    let err = commands::cmd_search(&session(), Some("t99"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("t99"));
}

#[tokio::test]
async fn edit_saves_and_shows_refreshed_rows() {
    let s = session();
    let vm = commands::cmd_edit(
        &s,
        None,
        "b2",
        &["Name=Montauk 170".to_string(), "Price__c=41000".to_string()],
    )
    .await
    .unwrap();

    let row = vm.rows.iter().find(|r| r.id.as_str() == "b2").unwrap();
    assert!(!row.has_draft());
    assert_eq!(row.cells[0].value, "Montauk 170");
    assert_eq!(vm.draft_rows, 0);

    let stored = s.service.boats();
    let b2 = stored.iter().find(|b| b.id.as_str() == "b2").unwrap();
    assert_eq!(b2.price, Some(41_000.0));
}

#[tokio::test]
async fn rejected_edit_surfaces_the_backend_message() {
    let s = session();
    let err = commands::cmd_edit(&s, None, "b1", &["Length=long".to_string()])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Validation error"));
}

#[tokio::test]
async fn edit_with_bad_assignment_fails_before_saving() {
    let s = session();
    let before = s.service.boats();
    assert!(commands::cmd_edit(&s, None, "b1", &["Colour=red".to_string()])
        .await
        .is_err());
    assert_eq!(s.service.boats(), before);
}

#[tokio::test]
async fn select_publishes_record_id() {
    let s = session();
    let payload = commands::cmd_select(&s, "b4").await.unwrap();
    assert_eq!(payload, json!({ "recordId": "b4" }));

    let vm = s.controller.view_model();
    let tile = vm.tiles.iter().find(|t| t.id.as_str() == "b4").unwrap();
    assert_eq!(tile.class, "tile-wrapper selected");
}

#[test]
fn settings_file_configures_controller_and_seed() {
    let dir = tempdir().unwrap();
    let seed_path = Utf8PathBuf::from_path_buf(dir.path().join("boats.json")).unwrap();
    fs::write(&seed_path, serde_json::to_string(&sample_seed()).unwrap()).unwrap();

    let settings_path = Utf8PathBuf::from_path_buf(dir.path().join("settings.json")).unwrap();
    let raw = json!({
        "data": seed_path,
        "latency_ms": 5,
        "controller": {
            "selection_policy": "rendered_only",
            "retain_edits_on_save_failure": true
        }
    });
    fs::write(&settings_path, raw.to_string()).unwrap();

    let settings = Settings::load(Some(&settings_path)).unwrap();
    assert_eq!(settings.latency_ms, Some(5));
    assert_eq!(
        settings.controller.selection_policy,
        SelectionPolicy::RenderedOnly
    );
    assert!(settings.controller.retain_edits_on_save_failure);
    assert_eq!(
        settings.controller.max_batch_rows,
        harbor_config::DEFAULT_MAX_BATCH_ROWS
    );
    assert_eq!(settings.seed().unwrap(), sample_seed());
}

#[test]
fn missing_explicit_settings_file_is_an_error() {
    let err = Settings::load(Some(camino::Utf8Path::new("/nope/settings.json"))).unwrap_err();
    assert!(err.to_string().contains("/nope/settings.json"));
}
