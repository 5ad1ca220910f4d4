mod common;

use common::{boat, harness, GatedQuery, ScriptedUpdate};
use harbor_app_core::{FilterSelector, ServiceError};
use harbor_core::{Category, CategoryId, Field, Filter, RecordPatch};

#[tokio::test]
async fn rows_overlay_draft_values_on_fixed_columns() {
    let query = GatedQuery::default().with_rows("power", vec![boat("b1", "Sea Ray", "power")]);
    let h = harness(query, ScriptedUpdate::default());
    h.controller.set_filter("power").await.unwrap();
    h.controller
        .stage_edit(RecordPatch::new("b1").with(Field::Length, "12"))
        .unwrap();

    let vm = h.controller.view_model();

    let labels: Vec<_> = vm.columns.iter().map(|c| c.label).collect();
    assert_eq!(labels, vec!["Name", "Length", "Price", "Description"]);
    assert!(vm.columns.iter().all(|c| c.editable));

    let row = &vm.rows[0];
    assert!(row.has_draft());
    assert_eq!(row.cells[0].value, "Sea Ray");
    assert!(!row.cells[0].is_draft);
    assert_eq!(row.cells[1].value, "12");
    assert!(row.cells[1].is_draft);
    assert_eq!(vm.draft_rows, 1);
    assert!(vm.can_save);
    assert!(!vm.is_loading);
}

#[test]
fn selector_lists_types_and_raises_choice() {
    let mut selector = FilterSelector::new();
    selector.apply_categories(Ok(vec![Category {
        id: CategoryId::new("t1"),
        name: "Sport".into(),
    }]));

    let options = selector.options().unwrap();
    assert_eq!(options[0].label, "All Types");
    assert_eq!(options[1].value, "t1");

    let changed = selector.choose("t1").unwrap();
    assert_eq!(changed.filter, Filter::from("t1"));
    assert!(selector.choose("t404").is_none());
    assert_eq!(selector.choose("").unwrap().filter, Filter::All);
}

#[test]
fn selector_load_failure_drops_options() {
    let mut selector = FilterSelector::new();
    selector.apply_categories(Err(ServiceError::Unavailable("down".into())));

    assert!(selector.options().is_none());
    assert_eq!(selector.error(), Some("service unavailable: down"));
}
