mod settings;

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::Duration;

use clap::Parser;

use narration_review_core::alignment::domain::discrepancy::Discrepancy;
use narration_review_core::alignment::domain::position_map::UnevenReplacePolicy;
use narration_review_core::manuscript::domain::sentence_context::SentenceBoundary;
use narration_review_core::manuscript::infrastructure::plain_text_parser::PlainTextParser;
use narration_review_core::pipeline::align_manuscript_use_case::{
    AlignManuscriptUseCase, AlignedDocument,
};
use narration_review_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use narration_review_core::playback::domain::highlight::{HighlightInstruction, HighlightSink};
use narration_review_core::playback::domain::playback_session::PlaybackSession;
use narration_review_core::playback::infrastructure::simulated_transport::SimulatedTransport;
use narration_review_core::playback::infrastructure::timer_driver::TimerDriver;
use narration_review_core::report::domain::report_writer::ReportWriter;
use narration_review_core::report::infrastructure::csv_report_writer::CsvReportWriter;
use narration_review_core::report::infrastructure::json_report_writer::JsonReportWriter;
use narration_review_core::shared::constants::MANUSCRIPT_EXTENSIONS;
use narration_review_core::transcript::infrastructure::json_transcript_loader::JsonTranscriptLoader;

use settings::ReviewSettings;

/// Compare an audiobook narration transcript against its manuscript.
#[derive(Parser)]
#[command(name = "narration-review")]
struct Cli {
    /// Manuscript plain-text file.
    manuscript: PathBuf,

    /// Word-level transcript JSON (flat word list or Whisper segments).
    transcript: PathBuf,

    /// Write the review queue to this file (.csv or .json).
    #[arg(long)]
    report: Option<PathBuf>,

    /// Hide discrepancies below this confidence (0.0-1.0).
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Uneven replace handling: truncate or boundary.
    #[arg(long)]
    uneven_replace: Option<String>,

    /// Context sentence boundaries: punctuation or paragraph.
    #[arg(long)]
    sentence_boundary: Option<String>,

    /// Simulate playback and print each highlighted manuscript word.
    #[arg(long)]
    follow: bool,

    /// Playback speed multiplier for --follow.
    #[arg(long, default_value = "1.0")]
    speed: f64,

    /// Follow-along timer interval in milliseconds.
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Start --follow a few seconds before this review queue entry.
    #[arg(long)]
    from_discrepancy: Option<usize>,

    /// Start --follow at the manuscript word containing this byte offset.
    #[arg(long)]
    from_char: Option<usize>,

    /// Persist the effective settings as the new defaults.
    #[arg(long)]
    save_settings: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = effective_settings(&cli, ReviewSettings::load())?;
    if cli.save_settings {
        match settings.save()? {
            Some(path) => println!("Saved settings to {}", path.display()),
            None => log::warn!("No configuration directory; settings not saved"),
        }
    }

    let mut use_case = AlignManuscriptUseCase::new(
        Box::new(PlainTextParser::new()),
        Box::new(JsonTranscriptLoader::new()),
        settings.alignment_options(),
        Box::new(StdoutPipelineLogger::new()),
    );
    let doc = use_case.execute(&cli.manuscript, &cli.transcript)?;

    let queue: Vec<&Discrepancy> = doc
        .result
        .review_queue(settings.min_confidence)
        .map(|(_, d)| d)
        .collect();
    print_queue(&queue);

    if let Some(ref path) = cli.report {
        write_report(&doc, path, settings.min_confidence)?;
    }

    if cli.follow {
        let start = follow_start(&cli, &doc, &queue)?;
        run_follow(&doc, &settings, cli.speed, start)?;
    }

    Ok(())
}

fn effective_settings(
    cli: &Cli,
    mut settings: ReviewSettings,
) -> Result<ReviewSettings, Box<dyn std::error::Error>> {
    if let Some(min) = cli.min_confidence {
        settings.min_confidence = min;
    }
    if let Some(ref policy) = cli.uneven_replace {
        settings.uneven_replace = parse_uneven_replace(policy)?;
    }
    if let Some(ref boundary) = cli.sentence_boundary {
        settings.sentence_boundary = parse_sentence_boundary(boundary)?;
    }
    if let Some(ms) = cli.tick_ms {
        settings.tick_interval_ms = ms;
    }
    Ok(settings)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.manuscript.exists() {
        return Err(format!("Manuscript file not found: {}", cli.manuscript.display()).into());
    }
    if !cli.transcript.exists() {
        return Err(format!("Transcript file not found: {}", cli.transcript.display()).into());
    }
    if !is_manuscript(&cli.manuscript) {
        log::warn!(
            "Unexpected manuscript extension for {}; reading it as plain text",
            cli.manuscript.display()
        );
    }
    if let Some(min) = cli.min_confidence {
        if !(0.0..=1.0).contains(&min) {
            return Err(format!("Min confidence must be between 0.0 and 1.0, got {min}").into());
        }
    }
    if cli.speed <= 0.0 || !cli.speed.is_finite() {
        return Err(format!("Speed must be a positive number, got {}", cli.speed).into());
    }
    if cli.tick_ms == Some(0) {
        return Err("Tick interval must be at least 1 ms".into());
    }
    if cli.from_discrepancy.is_some() && cli.from_char.is_some() {
        return Err("--from-discrepancy and --from-char are mutually exclusive".into());
    }
    if (cli.from_discrepancy.is_some() || cli.from_char.is_some()) && !cli.follow {
        return Err("--from-discrepancy and --from-char require --follow".into());
    }
    Ok(())
}

fn is_manuscript(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MANUSCRIPT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn parse_uneven_replace(value: &str) -> Result<UnevenReplacePolicy, String> {
    match value {
        "truncate" => Ok(UnevenReplacePolicy::Truncate),
        "boundary" => Ok(UnevenReplacePolicy::Boundary),
        other => Err(format!(
            "Uneven replace must be 'truncate' or 'boundary', got '{other}'"
        )),
    }
}

fn parse_sentence_boundary(value: &str) -> Result<SentenceBoundary, String> {
    match value {
        "punctuation" => Ok(SentenceBoundary::Punctuation),
        "paragraph" => Ok(SentenceBoundary::Paragraph),
        other => Err(format!(
            "Sentence boundary must be 'punctuation' or 'paragraph', got '{other}'"
        )),
    }
}

fn print_queue(queue: &[&Discrepancy]) {
    if queue.is_empty() {
        println!("No discrepancies to review.");
        return;
    }
    for (i, d) in queue.iter().enumerate() {
        let time = d
            .start_time
            .map_or_else(|| "   --   ".to_string(), format_timestamp);
        println!(
            "[{i:>3}] {time} {:<7} '{}' -> '{}' ({:.0}%)",
            d.kind.label(),
            d.manuscript_text,
            d.narrated_text,
            d.confidence * 100.0
        );
        println!("      {}", d.context_sentence);
    }
}

fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms % 60_000) as f64 / 1000.0;
    format!("{minutes:02}:{secs:06.3}")
}

fn write_report(
    doc: &AlignedDocument,
    path: &Path,
    min_confidence: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let writer: Box<dyn ReportWriter> = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Box::new(CsvReportWriter::new()),
        _ => Box::new(JsonReportWriter::new()),
    };
    let rows = doc.result.report_rows(min_confidence);
    writer.write(path, &rows)?;
    println!("Wrote {} discrepancies to {}", rows.len(), path.display());
    Ok(())
}

enum FollowStart {
    Beginning,
    Time(f64),
    Char(usize),
}

fn follow_start(
    cli: &Cli,
    doc: &AlignedDocument,
    queue: &[&Discrepancy],
) -> Result<FollowStart, Box<dyn std::error::Error>> {
    if let Some(offset) = cli.from_char {
        if offset >= doc.manuscript.text().len() {
            return Err(format!("Character offset {offset} is past the end of the manuscript").into());
        }
        return Ok(FollowStart::Char(offset));
    }
    let Some(index) = cli.from_discrepancy else {
        return Ok(FollowStart::Beginning);
    };
    let d = queue.get(index).ok_or_else(|| {
        format!(
            "No review queue entry {index} (queue has {})",
            queue.len()
        )
    })?;
    Ok(FollowStart::Time(d.start_time.unwrap_or(0.0)))
}

/// Prints each highlighted manuscript word as playback reaches it.
struct ConsoleHighlightSink {
    text: String,
}

impl HighlightSink for ConsoleHighlightSink {
    fn apply(&mut self, instruction: &HighlightInstruction) {
        if let HighlightInstruction::Highlight {
            transcript_index,
            range,
        } = instruction
        {
            if let Some(word) = range.slice(&self.text) {
                println!("  #{transcript_index:<5} {word}");
            }
        }
    }
}

fn run_follow(
    doc: &AlignedDocument,
    settings: &ReviewSettings,
    speed: f64,
    start: FollowStart,
) -> Result<(), Box<dyn std::error::Error>> {
    let duration = doc.words.last().map_or(0.0, |w| w.end_time);
    if duration <= 0.0 {
        return Err("Transcript has no timed words to follow".into());
    }

    let mut session = PlaybackSession::new(
        &doc.words,
        doc.result.position_map(),
        Box::new(SimulatedTransport::new(duration, speed)),
        Box::new(ConsoleHighlightSink {
            text: doc.manuscript.text().to_string(),
        }),
    );

    match start {
        FollowStart::Beginning => session.play(),
        FollowStart::Time(t) => {
            session.seek(t);
            session.rewind(settings.rewind_seconds);
        }
        FollowStart::Char(offset) => {
            if session.seek_to_char(offset).is_none() {
                return Err(format!("Nothing narrated maps to character offset {offset}").into());
            }
        }
    }

    println!("Following playback ({duration:.1}s at {speed}x). Enter 'q' to stop.");
    let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
    let _keep_open = stop_tx.clone();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(l) if l.trim() == "q" => {
                    let _ = stop_tx.send(());
                    break;
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });

    let driver = TimerDriver::new(Duration::from_millis(settings.tick_interval_ms));
    let ticks = driver.run(&mut session, &stop_rx);
    session.stop();
    log::info!("Follow-along ended after {ticks} ticks");
    Ok(())
}
