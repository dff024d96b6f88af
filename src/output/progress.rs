use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress over the sequential per-pipeline state lookups.
///
/// Draws to stderr and clears itself, so the tables on stdout stay clean.
pub struct FetchProgress {
    pb: ProgressBar,
}

impl FetchProgress {
    pub fn start(message: &str, total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {msg} {bar:24} {pos}/{len}")
                .unwrap(),
        );
        pb.set_message(message.to_owned());
        Self { pb }
    }

    pub fn tick(&self) {
        self.pb.inc(1);
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}
