use anyhow::{bail, Context, Result};
use tokio::sync::broadcast::error::TryRecvError;

use harbor_app_core::{FilterSelector, ResultListVm, SaveOutcome};
use harbor_config::BOAT_SELECTED_TOPIC;
use harbor_core::{Filter, FilterOption, RecordId, RecordPatch};

use crate::Session;

/// Lists the filter options, "All Types" first.
pub async fn cmd_types(session: &Session) -> Result<Vec<FilterOption>> {
    let mut selector = FilterSelector::new();
    selector.load(session.service.as_ref()).await;
    if let Some(err) = selector.error() {
        bail!("Failed to load boat types: {err}");
    }
    let options = selector.options().unwrap_or_default().to_vec();

    println!("{:<12} {:<30}", "VALUE", "LABEL");
    println!("{:-<12} {:-<30}", "", "");
    for o in &options {
        let value = if o.value.is_empty() { "-" } else { &o.value };
        println!("{:<12} {:<30}", value, o.label);
    }
    Ok(options)
}

/// Resolves `--type` through the filter selector so unknown types are
/// reported instead of silently yielding an empty list.
async fn resolve_filter(session: &Session, boat_type: Option<&str>) -> Result<Filter> {
    let Some(value) = boat_type else {
        return Ok(Filter::All);
    };
    let mut selector = FilterSelector::new();
    selector.load(session.service.as_ref()).await;
    match selector.choose(value) {
        Some(changed) => Ok(changed.filter),
        None => bail!("Unknown boat type '{value}' (see `harbor-cli types`)"),
    }
}

pub async fn cmd_search(session: &Session, boat_type: Option<&str>) -> Result<ResultListVm> {
    let filter = resolve_filter(session, boat_type).await?;
    println!(":: Searching boats ({filter})");
    session
        .controller
        .set_filter(filter)
        .await
        .context("Boat search failed")?;

    let vm = session.controller.view_model();
    print_table(&vm);
    Ok(vm)
}

/// Stages `FIELD=VALUE` assignments for one row and saves them.
pub async fn cmd_edit(
    session: &Session,
    boat_type: Option<&str>,
    id: &str,
    assignments: &[String],
) -> Result<ResultListVm> {
    if assignments.is_empty() {
        bail!("Nothing to edit: pass at least one --set FIELD=VALUE");
    }
    let filter = resolve_filter(session, boat_type).await?;
    session
        .controller
        .set_filter(filter)
        .await
        .context("Boat search failed")?;

    let mut patch = RecordPatch::new(id);
    for a in assignments {
        patch.assign(a)?;
    }
    session.controller.stage_edit(patch)?;

    let batch = session.controller.snapshot().pending.batch().to_vec();
    match session.controller.handle_save(batch).await {
        SaveOutcome::Saved { receipt, refreshed } => {
            println!(
                ":: Saved {} row(s) at {}",
                receipt.updated.len(),
                receipt.saved_at.to_rfc3339()
            );
            refreshed.context("Saved, but reloading the list failed")?;
        }
        SaveOutcome::Rejected(err) => bail!("Save rejected: {}", err.user_message()),
        SaveOutcome::NothingToSave => println!(":: Nothing to save."),
        SaveOutcome::Busy => bail!("Another save is still in progress"),
    }

    let vm = session.controller.view_model();
    print_table(&vm);
    Ok(vm)
}

/// Selects a boat and prints what subscribers of the selection topic see.
pub async fn cmd_select(session: &Session, id: &str) -> Result<serde_json::Value> {
    let mut rx = session.bus.subscribe(BOAT_SELECTED_TOPIC);
    session
        .controller
        .set_filter(Filter::All)
        .await
        .context("Boat search failed")?;
    session.controller.select(RecordId::new(id))?;

    let payload = match rx.try_recv() {
        Ok(payload) => payload,
        Err(TryRecvError::Empty) => bail!("No selection message was published"),
        Err(e) => bail!("Selection topic failed: {e}"),
    };
    println!("{BOAT_SELECTED_TOPIC}: {payload}");

    let vm = session.controller.view_model();
    for tile in &vm.tiles {
        println!("  [{}] {} ({})", tile.class, tile.name, tile.id);
    }
    Ok(payload)
}

fn print_table(vm: &ResultListVm) {
    if vm.rows.is_empty() {
        println!("No boats found.");
        return;
    }
    print!("{:<8}", "ID");
    for c in &vm.columns {
        print!(" {:<28}", c.label);
    }
    println!();
    for row in &vm.rows {
        print!("{:<8}", row.id.as_str());
        for cell in &row.cells {
            let mark = if cell.is_draft { "*" } else { "" };
            print!(" {:<28}", format!("{}{}", cell.value, mark));
        }
        println!();
    }
}
