use log::info;

use crate::error::Result;
use crate::output::{pipeline_table, FetchProgress, ListRow};
use crate::providers::PipelineService;

/// List flow: one row per matching pipeline with its latest execution status,
/// current stage, last update time and source revision.
///
/// The table header renders even when nothing matches.
pub async fn execute<S: PipelineService>(service: &S, filter: &str) -> Result<()> {
    let names = service.list_pipeline_names(filter).await?;
    info!("Listing {} pipeline(s)", names.len());

    let progress = FetchProgress::start("Fetching pipeline status", names.len());
    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        let execution = service.latest_execution(&name).await?;
        let stage = service.current_stage(&name).await?;
        progress.tick();

        let (status, last_update, revision) = match execution {
            Some(execution) => (
                Some(execution.status),
                execution.last_update,
                execution.revision_summary,
            ),
            None => (None, None, None),
        };
        rows.push(ListRow {
            name,
            status,
            stage: stage.map(|s| s.stage_name),
            last_update,
            revision,
        });
    }
    progress.finish();

    println!("{}", pipeline_table(&rows));
    Ok(())
}
