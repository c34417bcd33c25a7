//! Binary entrypoint: summarize a meeting transcript with a local Ollama model.
//!
//! Usage: `summarize <transcript.json> [speaker]`

use std::path::PathBuf;
use std::process::ExitCode;

use conversation_summarizer::start_summarizer;

fn main() -> ExitCode {
    start_summarizer::init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(transcript_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: summarize <transcript.json> [speaker]");
        return ExitCode::from(2);
    };
    let speaker = args.next();

    tracing::info!("Starting summarizer v{}", env!("CARGO_PKG_VERSION"));

    let backend = start_summarizer::backend_config_from_env();
    let summarizer = match start_summarizer::summarizer_config_from_env()
        .and_then(|config| start_summarizer::build_summarizer(&backend, config))
    {
        Ok(summarizer) => summarizer,
        Err(e) => {
            tracing::error!("Failed to build summarizer: {e:#}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let report = match rt.block_on(start_summarizer::summarize_transcript(
        &summarizer,
        &transcript_path,
        speaker.as_deref(),
    )) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Summarization failed: {e:#}");
            return ExitCode::from(1);
        }
    };

    println!("Speakers: {}", report.speakers.join(", "));
    println!("\nSummary:\n{}", report.summary);
    println!("\nHeadline:\n{}", report.headline);
    println!("\nKey points:\n{}", report.points);
    if let Some(scores) = &report.scores {
        println!("\nROUGE against reference:");
        for (name, score) in scores {
            println!(
                "  {name:<10} p={:.4} r={:.4} f={:.4}",
                score.precision, score.recall, score.fmeasure
            );
        }
    }

    ExitCode::SUCCESS
}
