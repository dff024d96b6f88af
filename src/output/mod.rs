mod progress;
mod styling;
mod tables;

pub use progress::FetchProgress;
pub use styling::{dim, magenta_bold};
pub use tables::{execution_table, pipeline_table, ListRow, RunRow};

/// Prints the pipehand banner to stderr.
///
/// Stderr so that stdout stays pipeable: tables and prompts are the only
/// things the tool writes there.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🔧 pipehand"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("AWS CodePipeline helper")
    );
}
