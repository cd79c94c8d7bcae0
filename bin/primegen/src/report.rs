//! ---
//! pg_section: "05-external-interfaces"
//! pg_subsection: "binary"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Human-readable run and status reports."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use primegen_common::time::seconds_rounded;
use primegen_core::{RunReport, StoreStatus};

const PREFIX: &str = "[prime-generator]";

pub fn render_run(report: &RunReport) -> String {
    let mut lines = Vec::with_capacity(3);
    match report.largest_new() {
        Some(largest) => {
            lines.push(format!("{PREFIX} Found {} new primes.", report.found()));
            lines.push(format!("{PREFIX} Largest new prime = {largest}"));
        }
        None => lines.push(format!("{PREFIX} No new primes found during this run.")),
    }
    lines.push(format!(
        "{PREFIX} Prime generation complete in {} seconds.",
        seconds_rounded(report.elapsed)
    ));
    lines.join("\n")
}

pub fn render_status(status: &StoreStatus) -> String {
    match status.largest {
        Some(largest) => format!(
            "{PREFIX} {} primes stored in {}. Largest = {largest}",
            status.count,
            status.store.display()
        ),
        None => format!(
            "{PREFIX} No primes stored in {} yet.",
            status.store.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use primegen_core::CandidateWindow;

    fn report_with(previous: Option<u64>, new_primes: Vec<u64>) -> RunReport {
        RunReport {
            started_at: Default::default(),
            store: PathBuf::from("primes.txt"),
            previous_count: previous.map_or(0, |_| 1),
            previous_largest: previous,
            window: CandidateWindow::after(previous, 10).unwrap(),
            new_primes,
            elapsed: Duration::from_millis(42),
        }
    }

    #[test]
    fn run_report_lists_count_and_largest() {
        let rendered = render_run(&report_with(None, vec![2, 3, 5, 7, 11]));
        assert_eq!(
            rendered,
            "[prime-generator] Found 5 new primes.\n\
             [prime-generator] Largest new prime = 11\n\
             [prime-generator] Prime generation complete in 0.042 seconds."
        );
    }

    #[test]
    fn run_report_notes_empty_window() {
        let rendered = render_run(&report_with(Some(23), Vec::new()));
        assert!(rendered.starts_with("[prime-generator] No new primes found during this run."));
    }

    #[test]
    fn status_report_handles_empty_store() {
        let status = StoreStatus {
            store: PathBuf::from("primes.txt"),
            count: 0,
            largest: None,
            skipped_lines: 0,
        };
        assert_eq!(
            render_status(&status),
            "[prime-generator] No primes stored in primes.txt yet."
        );
    }
}
