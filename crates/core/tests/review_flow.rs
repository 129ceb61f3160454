use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use rstest::rstest;

use narration_review_core::alignment::domain::alignment_run::{AlignmentRun, RunKind};
use narration_review_core::alignment::domain::discrepancy::{DiscrepancyKind, ReviewStatus};
use narration_review_core::manuscript::domain::manuscript::Manuscript;
use narration_review_core::manuscript::domain::sentence_context::SentenceContextResolver;
use narration_review_core::manuscript::infrastructure::plain_text_parser::PlainTextParser;
use narration_review_core::pipeline::align_manuscript_use_case::{
    run_alignment, AlignManuscriptUseCase, AlignmentOptions,
};
use narration_review_core::pipeline::alignment_result::AlignmentResult;
use narration_review_core::pipeline::pipeline_logger::NullPipelineLogger;
use narration_review_core::report::domain::report_writer::ReportWriter;
use narration_review_core::report::infrastructure::csv_report_writer::CsvReportWriter;
use narration_review_core::report::infrastructure::json_report_writer::JsonReportWriter;
use narration_review_core::transcript::domain::transcribed_word::TranscribedWord;
use narration_review_core::transcript::infrastructure::json_transcript_loader::JsonTranscriptLoader;

fn words(timed: &[(&str, f64, f64, f64)]) -> Vec<TranscribedWord> {
    timed.iter()
        .map(|&(w, s, e, p)| TranscribedWord::new(w, s, e, p))
        .collect()
}

fn align(text: &str, narrated: &[TranscribedWord]) -> AlignmentResult {
    run_alignment(
        &Manuscript::from_text(text),
        narrated,
        AlignmentOptions::default(),
        &mut NullPipelineLogger,
    )
    .unwrap()
}

#[test]
fn exact_narration_has_no_discrepancies() {
    let result = align(
        "the cat sat",
        &words(&[("the", 0.0, 0.1, 0.9), ("cat", 0.1, 0.4, 0.95), ("sat", 0.4, 0.7, 0.99)]),
    );
    assert_eq!(result.runs(), &[AlignmentRun::new(RunKind::Equal, 0..3, 0..3)]);
    assert!(result.discrepancies().is_empty());
    assert_eq!(result.position_map().len(), 3);
}

#[test]
fn misread_word_is_a_replace() {
    let result = align(
        "the cat sat",
        &words(&[("the", 0.0, 0.1, 0.9), ("mat", 0.1, 0.4, 0.6), ("sat", 0.4, 0.7, 0.99)]),
    );
    assert!(result
        .runs()
        .contains(&AlignmentRun::new(RunKind::Replace, 1..2, 1..2)));
    let d = &result.discrepancies()[0];
    assert_eq!(result.discrepancies().len(), 1);
    assert_eq!(d.kind, DiscrepancyKind::Replace);
    assert_eq!(d.manuscript_text, "cat");
    assert_eq!(d.narrated_text, "mat");
    assert_relative_eq!(d.confidence, 0.6);
}

#[test]
fn skipped_word_is_a_delete() {
    let result = align(
        "the quick cat",
        &words(&[("the", 0.0, 0.2, 0.9), ("cat", 0.3, 0.6, 0.9)]),
    );
    assert!(result
        .runs()
        .contains(&AlignmentRun::new(RunKind::Delete, 1..2, 1..1)));
    let d = &result.discrepancies()[0];
    assert_eq!(d.kind, DiscrepancyKind::Delete);
    assert_eq!(d.narrated_text, "");
    assert_eq!(d.confidence, 1.0);
    assert_eq!(d.start_time, Some(0.2));
}

#[test]
fn context_is_the_enclosing_sentence() {
    let text = "Hello world. The cat sat! Done.";
    let offset = text.find("cat").unwrap();
    assert_eq!(
        SentenceContextResolver::default().sentence_at(text, offset),
        "The cat sat!"
    );
}

#[rstest]
#[case::both_empty("", &[], 0)]
#[case::manuscript_only("words on a page", &[], 1)]
#[case::transcript_only("", &[("spoken", 0.0, 0.5, 0.5)], 1)]
fn empty_inputs_partition_cleanly(
    #[case] text: &str,
    #[case] timed: &[(&str, f64, f64, f64)],
    #[case] expected_runs: usize,
) {
    let narrated = words(timed);
    let result = align(text, &narrated);
    assert_eq!(result.runs().len(), expected_runs);
    assert_eq!(result.discrepancies().len(), expected_runs);
    assert!(result.position_map().is_empty());
}

#[test]
fn confidences_stay_in_unit_interval() {
    let result = align(
        "alpha beta gamma delta",
        &words(&[
            ("alpha", 0.0, 0.2, 1.7),
            ("bet", 0.2, 0.4, -0.3),
            ("um", 0.4, 0.5, f64::NAN),
            ("delta", 0.5, 0.8, 0.8),
        ]),
    );
    assert!(!result.discrepancies().is_empty());
    for d in result.discrepancies() {
        assert!((0.0..=1.0).contains(&d.confidence), "{d:?}");
    }
}

#[test]
fn mapped_ranges_point_at_matching_words() {
    let text = "It was a bright cold day in April, and the clocks were striking thirteen.";
    let narrated = words(&[
        ("It", 0.0, 0.1, 0.9),
        ("was", 0.1, 0.2, 0.9),
        ("a", 0.2, 0.3, 0.9),
        ("bright", 0.3, 0.6, 0.9),
        ("day", 0.6, 0.9, 0.9),
        ("in", 0.9, 1.0, 0.9),
        ("April", 1.0, 1.4, 0.9),
        ("and", 1.5, 1.6, 0.9),
        ("the", 1.6, 1.7, 0.9),
        ("clocks", 1.7, 2.0, 0.9),
        ("were", 2.0, 2.2, 0.9),
        ("striking", 2.2, 2.6, 0.9),
        ("thirteen", 2.6, 3.1, 0.9),
    ]);
    let result = align(text, &narrated);

    for (j, range) in result.position_map().iter() {
        let written = range.slice(text).unwrap();
        assert_eq!(written.to_lowercase(), narrated[j].word.to_lowercase());
    }
    assert_eq!(result.position_map().len(), narrated.len());
    let d = &result.discrepancies()[0];
    assert_eq!(d.kind, DiscrepancyKind::Delete);
    assert_eq!(d.manuscript_text, "cold");
    assert_eq!(
        d.context_sentence,
        "It was a bright cold day in April, and the clocks were striking thirteen."
    );
}

#[test]
fn files_to_reports() {
    let dir = tempfile::tempdir().unwrap();
    let manuscript_path = dir.path().join("chapter.txt");
    let transcript_path = dir.path().join("chapter.json");
    fs::write(
        &manuscript_path,
        "  The old man sat by the sea.  \n\n\nHe waited, and waited.\n",
    )
    .unwrap();
    fs::write(
        &transcript_path,
        r#"{"segments": [
            {"words": [
                {"word": " The", "start": 0.0, "end": 0.2, "probability": 0.99},
                {"word": " old", "start": 0.2, "end": 0.4, "probability": 0.98},
                {"word": " man", "start": 0.4, "end": 0.6, "probability": 0.97},
                {"word": " sat", "start": 0.6, "end": 0.8, "probability": 0.96},
                {"word": " by", "start": 0.8, "end": 0.9, "probability": 0.95},
                {"word": " the", "start": 0.9, "end": 1.0, "probability": 0.95},
                {"word": " see.", "start": 1.0, "end": 1.3, "probability": 0.55}
            ]},
            {"words": [
                {"word": " He", "start": 2.0, "end": 2.1},
                {"word": " waited,", "start": 2.1, "end": 2.5, "probability": 0.9},
                {"word": " and", "start": 2.5, "end": 2.6, "probability": 0.9},
                {"word": " waited.", "start": 2.6, "end": 3.0, "probability": 0.9}
            ]}
        ]}"#,
    )
    .unwrap();

    let mut use_case = AlignManuscriptUseCase::new(
        Box::new(PlainTextParser::new()),
        Box::new(JsonTranscriptLoader::new()),
        AlignmentOptions::default(),
        Box::new(NullPipelineLogger),
    );
    let mut doc = use_case
        .execute(&manuscript_path, &transcript_path)
        .unwrap();

    assert_eq!(
        doc.manuscript.text(),
        "The old man sat by the sea.\n\nHe waited, and waited."
    );
    assert_eq!(doc.words.len(), 11);
    assert_eq!(doc.words[7].probability, 0.0);

    let found = doc.result.discrepancies();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].manuscript_text, "sea");
    assert_eq!(found[0].narrated_text, "see.");
    assert_eq!(found[0].start_time, Some(1.0));
    assert_eq!(found[0].context_sentence, "The old man sat by the sea.");
    assert_eq!(doc.result.position_map().len(), 11);

    let csv_path = dir.path().join("out").join("review.csv");
    CsvReportWriter::new()
        .write(&csv_path, &doc.result.report_rows(0.0))
        .unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "1.000,Replace,sea,see.,0.5500,unconfirmed,The old man sat by the sea."
    );

    doc.result.set_status(0, ReviewStatus::Ignored).unwrap();
    let json_path = dir.path().join("review.json");
    JsonReportWriter::new()
        .write(&json_path, &doc.result.report_rows(0.0))
        .unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
}

#[test]
fn missing_transcript_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let manuscript_path = dir.path().join("chapter.txt");
    fs::write(&manuscript_path, "Text.").unwrap();

    let mut use_case = AlignManuscriptUseCase::new(
        Box::new(PlainTextParser::new()),
        Box::new(JsonTranscriptLoader::new()),
        AlignmentOptions::default(),
        Box::new(NullPipelineLogger),
    );
    assert!(use_case
        .execute(&manuscript_path, Path::new("/nonexistent/words.json"))
        .is_err());
}
