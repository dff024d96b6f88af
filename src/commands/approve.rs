use log::info;

use crate::error::Result;
use crate::model::{ApprovalDecision, StageInfo, Status};
use crate::output::FetchProgress;
use crate::prompt::LineReader;
use crate::providers::PipelineService;
use crate::selection::{parse_selection, resolve_indices, Selection, SelectionMode};

const APPROVE_PROMPT: &str = "\nDo you want to approve these pipelines?\n\
Enter 'yes' to approve all, 'no' to cancel, 'reject' to reject all, \
a number for a specific pipeline, or provide a range or list: ";

const MESSAGE_PROMPT: &str =
    "\nOptional approval message, applied to every selected pipeline (press Enter to skip): ";

/// Approve flow: find pipelines sitting at an in-progress stage, let the user
/// pick, submit approval or rejection results.
///
/// Stage lookups run one pipeline at a time; a failure on any lookup or
/// submission aborts the rest of the batch.
pub async fn execute<S: PipelineService>(
    service: &S,
    reader: &mut dyn LineReader,
    filter: &str,
    message: Option<&str>,
) -> Result<()> {
    let names = service.list_pipeline_names(filter).await?;
    if names.is_empty() {
        println!("No pipelines found matching '{filter}'.");
        return Ok(());
    }

    let progress = FetchProgress::start("Checking pipeline stages", names.len());
    let mut pending: Vec<(String, StageInfo)> = Vec::new();
    for name in &names {
        if let Some(stage) = service.current_stage(name).await? {
            if stage.status == Status::InProgress {
                pending.push((name.clone(), stage));
            }
        }
        progress.tick();
    }
    progress.finish();

    if pending.is_empty() {
        println!("No pipelines are waiting for approval.");
        return Ok(());
    }
    info!("{} pipeline(s) pending approval", pending.len());

    println!("\nThe following pipelines have been found:");
    println!("{}", render_menu(&pending));

    let message = match message {
        Some(text) => text.to_owned(),
        None => reader.read_line(MESSAGE_PROMPT)?.trim().to_owned(),
    };

    let response = reader.read_line(APPROVE_PROMPT)?;
    let (selected, decision) =
        match parse_selection(&response, pending.len(), SelectionMode::Approve)? {
            Selection::Cancel => {
                println!("Cancelled.");
                return Ok(());
            }
            Selection::All => (pending.iter().collect::<Vec<_>>(), ApprovalDecision::Approved),
            Selection::RejectAll => {
                (pending.iter().collect::<Vec<_>>(), ApprovalDecision::Rejected)
            }
            Selection::Indices(indices) => {
                (resolve_indices(&indices, &pending)?, ApprovalDecision::Approved)
            }
        };

    let summary = if message.is_empty() {
        format!("{decision} via pipehand by {}", service.caller_identity().await?)
    } else {
        message
    };

    match decision {
        ApprovalDecision::Approved => println!("Approving pipelines..."),
        ApprovalDecision::Rejected => println!("Rejecting pipelines..."),
    }
    for (name, stage) in selected {
        service.submit_approval(name, stage, decision, &summary).await?;
        println!("{decision} {name}");
    }

    Ok(())
}

fn render_menu(pending: &[(String, StageInfo)]) -> String {
    pending
        .iter()
        .enumerate()
        .map(|(i, (name, stage))| format!("    [{}] {name} ({})", i + 1, stage.stage_name))
        .collect::<Vec<_>>()
        .join("\n")
}
