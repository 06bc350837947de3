//! Subcommand implementations.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use reviewline_aggregator::{InvariantReport, aggregate_json_with, verify};
use reviewline_api::{AppState, ServerConfig, start_server};
use reviewline_types::AggregatedResult;
use tracing::{debug, info};

use crate::cli::{AggregateArgs, OutputFormat, ServeArgs};
use crate::config::ReviewlineConfig;
use crate::error::CliError;
use crate::render::SummaryView;

/// Run `reviewline aggregate`: read, fold, optionally verify, print.
pub fn aggregate(args: &AggregateArgs, config: &ReviewlineConfig) -> Result<(), CliError> {
    let text = read_input(&args.input)?;
    let policy = args.policy.unwrap_or(config.aggregation.policy);
    debug!(input = %args.input.display(), %policy, bytes = text.len(), "Aggregating document");

    let result = aggregate_json_with(&text, policy)?;

    if args.verify || config.aggregation.verify {
        check(&result)?;
    }

    let mut stdout = std::io::stdout().lock();
    write_result(&mut stdout, &result, args.format)?;
    stdout.flush()?;

    info!(
        revisions = result.revisions.len(),
        reviewers = result.reviewer_count(),
        "Aggregation complete"
    );
    Ok(())
}

/// Run `reviewline serve` until interrupted.
pub async fn serve(args: &ServeArgs, config: &ReviewlineConfig) -> Result<(), CliError> {
    let server_config = ServerConfig {
        host: args
            .host
            .clone()
            .unwrap_or_else(|| config.server.host.clone()),
        port: args.port.unwrap_or(config.server.port),
    };
    let state = Arc::new(AppState::with_policy(config.aggregation.policy));
    start_server(&server_config, state).await?;
    Ok(())
}

/// Read the whole input document; `-` means stdin.
fn read_input(path: &Path) -> Result<String, CliError> {
    let mut text = String::new();
    let outcome = if path.as_os_str() == "-" {
        std::io::stdin().lock().read_to_string(&mut text).map(drop)
    } else {
        std::fs::File::open(path).and_then(|mut file| file.read_to_string(&mut text).map(drop))
    };
    outcome.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text)
}

fn check(result: &AggregatedResult) -> Result<(), CliError> {
    match verify(result) {
        InvariantReport::Holds => Ok(()),
        InvariantReport::Violated(violations) => {
            let described: Vec<String> = violations.iter().map(ToString::to_string).collect();
            Err(CliError::Verification(described.join("; ")))
        }
    }
}

/// Write `result` to `out` in the requested format, newline-terminated.
fn write_result(
    out: &mut impl Write,
    result: &AggregatedResult,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, result)?;
            writeln!(out)?;
        }
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut *out, result)?;
            writeln!(out)?;
        }
        OutputFormat::Summary => write!(out, "{}", SummaryView(result))?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use reviewline_aggregator::aggregate;
    use reviewline_types::{
        EventKind, ManuscriptMeta, ReviewEvent, ReviewerId, ReviewerState, RevisionGroup,
        RevisionNumber,
    };

    use super::*;

    fn sample() -> AggregatedResult {
        aggregate(
            ManuscriptMeta {
                title: "Glacier Flow".to_owned(),
                ..ManuscriptMeta::default()
            },
            &[ReviewEvent {
                timestamp: 42,
                kind: EventKind::Accepted,
                revision_number: RevisionNumber(3),
                reviewer_id: ReviewerId(7),
            }],
        )
    }

    fn render(result: &AggregatedResult, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        assert!(write_result(&mut buffer, result, format).is_ok());
        String::from_utf8(buffer).unwrap_or_default()
    }

    #[test]
    fn json_output_is_one_line() {
        let text = render(&sample(), OutputFormat::Json);
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
        assert_eq!(value["title"], "Glacier Flow");
        assert_eq!(value["revisions"][0]["reviewers"][0]["acceptedAt"], 42);
    }

    #[test]
    fn pretty_output_parses_to_same_value() {
        let result = sample();
        let compact: serde_json::Value =
            serde_json::from_str(&render(&result, OutputFormat::Json)).unwrap_or_default();
        let pretty: serde_json::Value =
            serde_json::from_str(&render(&result, OutputFormat::Pretty)).unwrap_or_default();
        assert!(render(&result, OutputFormat::Pretty).lines().count() > 1);
        assert_eq!(compact, pretty);
    }

    #[test]
    fn summary_output_uses_tree_view() {
        let text = render(&sample(), OutputFormat::Summary);
        assert!(text.starts_with("Glacier Flow"));
        assert!(text.contains("Revision 3 (1 accepted)"));
    }

    #[test]
    fn check_passes_folded_results() {
        assert!(check(&sample()).is_ok());
    }

    #[test]
    fn check_reports_violations() {
        let mut result = sample();
        result.revisions.push(RevisionGroup {
            revision_number: RevisionNumber(1),
            reviewers: vec![ReviewerState::new(ReviewerId(1), 5)],
        });
        assert!(matches!(check(&result), Err(CliError::Verification(_))));
    }

    #[test]
    fn missing_input_file_names_the_path() {
        let err = read_input(Path::new("/nonexistent/reviewline/input.json"));
        let Err(CliError::Read { path, .. }) = err else {
            panic!("expected read error");
        };
        assert_eq!(path, Path::new("/nonexistent/reviewline/input.json"));
    }
}
