use std::fs;

use camino::Utf8PathBuf;
use serde_json::json;

use harbor_app_core::MessageBus;
use harbor_config::BOAT_SELECTED_TOPIC;
use harbor_infra::{load_seed, sample_seed, BroadcastBus};

#[test]
fn sample_seed_is_consistent() {
    sample_seed().validate().unwrap();
}

#[test]
fn seed_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("boats.json")).unwrap();
    fs::write(&path, serde_json::to_string_pretty(&sample_seed()).unwrap()).unwrap();

    let seed = load_seed(&path).unwrap();
    assert_eq!(seed, sample_seed());
}

#[test]
fn seed_uses_api_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("boats.json")).unwrap();
    let raw = json!({
        "categories": [{ "Id": "t9", "Name": "Pontoon" }],
        "boats": [{
            "Id": "p1",
            "Name": "Party Barge",
            "Length__c": 20.0,
            "BoatTypeId__c": "t9"
        }]
    });
    fs::write(&path, raw.to_string()).unwrap();

    let seed = load_seed(&path).unwrap();
    assert_eq!(seed.boats[0].name, "Party Barge");
    assert_eq!(seed.boats[0].length, Some(20.0));
    assert_eq!(seed.boats[0].price, None);
}

#[test]
fn seed_with_dangling_boat_type_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("boats.json")).unwrap();
    let raw = json!({
        "categories": [],
        "boats": [{ "Id": "p1", "Name": "Orphan", "BoatTypeId__c": "t404" }]
    });
    fs::write(&path, raw.to_string()).unwrap();

    let err = load_seed(&path).unwrap_err();
    assert!(format!("{err:#}").contains("t404"));
}

#[test]
fn missing_seed_file_names_the_path() {
    let err = load_seed(camino::Utf8Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[tokio::test]
async fn bus_delivers_to_topic_subscribers_only() {
    let bus = BroadcastBus::default();
    let mut selected = bus.subscribe(BOAT_SELECTED_TOPIC);
    let mut other = bus.subscribe("something-else");

    bus.publish(BOAT_SELECTED_TOPIC, json!({ "recordId": "b1" }));

    assert_eq!(selected.recv().await.unwrap(), json!({ "recordId": "b1" }));
    assert!(other.try_recv().is_err());
}

#[test]
fn publishing_without_subscribers_is_harmless() {
    let bus = BroadcastBus::default();
    bus.publish(BOAT_SELECTED_TOPIC, json!({ "recordId": "b1" }));
}
