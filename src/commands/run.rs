use log::info;

use crate::error::Result;
use crate::output::{execution_table, RunRow};
use crate::prompt::LineReader;
use crate::providers::PipelineService;
use crate::selection::{parse_selection, resolve_indices, Selection, SelectionMode};

const RUN_PROMPT: &str = "\nDo you want to run these pipelines?\n\
Enter 'yes' to run all, 'no' to cancel, a number for a specific pipeline, \
or provide a range or list: ";

/// Run flow: list matching pipelines, let the user pick, start executions.
///
/// A failure on any start aborts the rest of the batch.
pub async fn execute<S: PipelineService>(
    service: &S,
    reader: &mut dyn LineReader,
    filter: &str,
) -> Result<()> {
    let names = service.list_pipeline_names(filter).await?;
    if names.is_empty() {
        println!("No pipelines found matching '{filter}'.");
        return Ok(());
    }

    println!("\nThe following pipelines have been found:");
    println!("{}", render_menu(&names));

    let response = reader.read_line(RUN_PROMPT)?;
    let selected = match parse_selection(&response, names.len(), SelectionMode::Run)? {
        Selection::Cancel => {
            println!("Cancelled.");
            return Ok(());
        }
        Selection::All => names.iter().collect::<Vec<_>>(),
        Selection::Indices(indices) => resolve_indices(&indices, &names)?,
        Selection::RejectAll => unreachable!("'reject' is not parsed in run mode"),
    };

    println!("Running pipelines...");
    let mut rows = Vec::with_capacity(selected.len());
    for name in selected {
        let execution_id = service.start_execution(name).await?;
        info!("Started execution {execution_id} of {name}");
        rows.push(RunRow {
            pipeline: name.clone(),
            execution_id,
        });
    }

    println!("{}", execution_table(&rows));
    Ok(())
}

fn render_menu(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("    [{}] {name}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::StubService;
    use crate::error::PipehandError;
    use crate::prompt::ScriptedReader;
    use crate::selection::SelectionError;

    #[tokio::test]
    async fn single_number_starts_exactly_that_pipeline() {
        let service = StubService::with_pipelines(&["alpha", "beta", "gamma"]);
        let mut reader = ScriptedReader::new(&["2"]);

        execute(&service, &mut reader, "").await.unwrap();

        assert_eq!(*service.started.lock().unwrap(), vec!["beta".to_owned()]);
    }

    #[tokio::test]
    async fn yes_starts_every_listed_pipeline() {
        let service = StubService::with_pipelines(&["alpha", "beta", "gamma"]);
        let mut reader = ScriptedReader::new(&["yes"]);

        execute(&service, &mut reader, "").await.unwrap();

        assert_eq!(
            *service.started.lock().unwrap(),
            vec!["alpha".to_owned(), "beta".to_owned(), "gamma".to_owned()]
        );
    }

    #[tokio::test]
    async fn no_starts_nothing() {
        let service = StubService::with_pipelines(&["alpha", "beta"]);
        let mut reader = ScriptedReader::new(&["no"]);

        execute(&service, &mut reader, "").await.unwrap();

        assert!(service.started.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn filter_narrows_the_listing_before_selection() {
        let service = StubService::with_pipelines(&["orders-deploy", "billing-deploy", "orders-test"]);
        let mut reader = ScriptedReader::new(&["2"]);

        execute(&service, &mut reader, "orders").await.unwrap();

        // menu held only the two "orders" pipelines, so [2] is orders-test
        assert_eq!(*service.started.lock().unwrap(), vec!["orders-test".to_owned()]);
    }

    #[tokio::test]
    async fn out_of_range_selection_makes_no_remote_calls() {
        let service = StubService::with_pipelines(&["alpha", "beta"]);
        let mut reader = ScriptedReader::new(&["5"]);

        let err = execute(&service, &mut reader, "").await.unwrap_err();

        assert!(matches!(
            err,
            PipehandError::Selection(SelectionError::OutOfRange { value: 5, count: 2 })
        ));
        assert!(service.started.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn batch_aborts_on_first_start_failure() {
        let mut service = StubService::with_pipelines(&["alpha", "beta", "gamma"]);
        service.fail_start_on = Some("beta".to_owned());
        let mut reader = ScriptedReader::new(&["yes"]);

        let err = execute(&service, &mut reader, "").await.unwrap_err();

        assert!(matches!(err, PipehandError::Api(_)));
        // alpha started, beta failed, gamma never attempted
        assert_eq!(*service.started.lock().unwrap(), vec!["alpha".to_owned()]);
    }

    #[tokio::test]
    async fn empty_listing_prompts_nothing() {
        let service = StubService::with_pipelines(&[]);
        let mut reader = ScriptedReader::new(&[]);

        execute(&service, &mut reader, "nope").await.unwrap();

        assert!(reader.prompts.is_empty());
    }

    #[test]
    fn menu_enumerates_from_one() {
        let names = vec!["alpha".to_owned(), "beta".to_owned()];
        assert_eq!(render_menu(&names), "    [1] alpha\n    [2] beta");
    }
}
