use std::time::{Duration, Instant};

use blockfit_evaluator::progress::{SearchProgress, SearchSummary};

const REPORT_INTERVAL: Duration = Duration::from_millis(250);

/// Reports search progress on stderr, at most once per [`REPORT_INTERVAL`].
#[derive(Debug)]
pub(crate) struct StderrProgress {
    quiet: bool,
    last_report: Option<Instant>,
}

impl StderrProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        Self {
            quiet,
            last_report: None,
        }
    }
}

impl SearchProgress for StderrProgress {
    fn start(&mut self) {
        self.last_report = Some(Instant::now());
    }

    fn update(&mut self, placements_found: u64) {
        if self.quiet {
            return;
        }
        let now = Instant::now();
        if self
            .last_report
            .is_some_and(|last| now.duration_since(last) < REPORT_INTERVAL)
        {
            return;
        }
        self.last_report = Some(now);
        eprint!("\rSearching... {placements_found} placements");
    }

    fn finish(&mut self, summary: &SearchSummary) {
        if self.quiet {
            return;
        }
        let SearchSummary {
            paths,
            placements_found,
            elapsed,
        } = summary;
        match summary.throughput() {
            Some(rate) => eprintln!(
                "\rSearched {paths} paths, {placements_found} placements in {elapsed:.2?} ({rate:.0} placements/s)"
            ),
            None => eprintln!("\rSearched {paths} paths, {placements_found} placements"),
        }
    }
}
