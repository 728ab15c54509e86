//! End-to-end pipeline scenarios.
//!
//! Exercises the public engine surface the way a speech layer would: text
//! in, frames and grouped segments out; recognizer timestamps in, aligned
//! segments out. Uses a stub phoneme source so no external G2P model is
//! needed.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use viseme_engine::{
    AudioGroup, EngineConfig, EngineError, LipSyncEngine, PhonemeSource, RecognizedPhoneme,
    Result, Segment, TextGroup, VisualGroup,
};

const EPSILON: f64 = 1e-9;

/// Log capture for failing runs; `RUST_LOG=debug cargo test` shows stage
/// counts. Safe to call from every test, later calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Fixed-output phoneme source standing in for the external G2P model.
struct StubSource;

impl PhonemeSource for StubSource {
    fn phonemes(&self, text: &str, _language: &str) -> Result<Vec<String>> {
        let symbols: &[&str] = match text {
            // "Hello world" as a g2p would emit it, stress marks included.
            "Hello world" => &["HH", "AH0", "L", "OW1", " ", "W", "ER1", "L", "D"],
            "..." => &[".", ".", "."],
            _ => &[],
        };
        Ok(symbols.iter().map(|s| (*s).to_owned()).collect())
    }
}

fn engine() -> LipSyncEngine {
    init_tracing();
    LipSyncEngine::new(EngineConfig::default()).expect("default config is valid")
}

fn assert_contiguous<G: VisualGroup>(segments: &[Segment<G>]) {
    for pair in segments.windows(2) {
        assert!(
            (pair[0].end - pair[1].start).abs() < EPSILON,
            "segments not contiguous: {} vs {}",
            pair[0].end,
            pair[1].start
        );
    }
}

// ---------------------------------------------------------------------------
// Scenario A: "Hello world" text path
// ---------------------------------------------------------------------------

#[test]
fn hello_world_frames() {
    let frames = engine()
        .frames_from_text(&StubSource, "Hello world", "en-us")
        .expect("stub never fails");

    // 4 + inter-word silence + 4 + trailing silence
    assert_eq!(frames.len(), 10);
    assert_eq!(frames[4].phoneme, "sil");
    assert!((frames[4].duration - 0.05).abs() < EPSILON);
    assert_eq!(frames[1].phoneme, "AH");
    assert_eq!(frames[6].phoneme, "ER");

    // HH AH L OW = 0.06+0.09+0.08+0.09, space 0.05,
    // W ER L D = 0.08+0.09+0.08+0.06, trailing 0.20
    let total = frames.last().map(|f| f.start + f.duration).unwrap();
    assert!((total - 0.88).abs() < EPSILON, "total was {total}");
}

#[test]
fn hello_world_segments_are_refined_and_contiguous() {
    let segments = engine()
        .segments_from_text(&StubSource, "Hello world", "en-us")
        .expect("stub never fails");

    assert!(!segments.is_empty());
    assert!((segments[0].start).abs() < EPSILON);
    assert_contiguous(&segments);
    for s in &segments {
        assert!(s.end > s.start);
    }
    assert!(segments.last().unwrap().group.is_silence());

    // Refinement donates dropped durations, so the total is conserved.
    let total = segments.last().unwrap().end;
    assert!((total - 0.88).abs() < EPSILON, "total was {total}");
}

// ---------------------------------------------------------------------------
// Scenario B: ellipsis-only input
// ---------------------------------------------------------------------------

#[test]
fn ellipsis_collapses_to_single_pause() {
    let frames = engine()
        .frames_from_text(&StubSource, "...", "en-us")
        .expect("stub never fails");

    // One 0.50s ellipsis pause plus the 0.20s trailing silence.
    assert_eq!(frames.len(), 2);
    assert!((frames[0].duration - 0.50).abs() < EPSILON);
    assert!((frames[1].duration - 0.20).abs() < EPSILON);
    assert!(frames.iter().all(|f| f.phoneme == "sil"));
}

#[test]
fn empty_text_yields_trailing_silence_only() {
    let frames = engine()
        .frames_from_text(&StubSource, "", "en-us")
        .expect("stub never fails");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].phoneme, "sil");
    assert!((frames[0].duration - 0.20).abs() < EPSILON);
}

// ---------------------------------------------------------------------------
// Scenario C: audio path gap-fill
// ---------------------------------------------------------------------------

fn recognized(items: &[(&str, f64, f64)]) -> Vec<RecognizedPhoneme> {
    items
        .iter()
        .map(|&(phoneme, start, duration)| RecognizedPhoneme {
            phoneme: phoneme.to_owned(),
            start,
            duration,
        })
        .collect()
}

#[test]
fn gap_fill_produces_contiguous_segments() {
    let segments = engine()
        .segments_from_recognized(&recognized(&[
            ("AA", 0.00, 0.12),
            ("M", 0.16, 0.09), // 40ms gap -> silence
            ("UW", 0.25, 0.11),
        ]))
        .expect("valid timing");

    assert_contiguous(&segments);
    assert!((segments[0].start).abs() < EPSILON);
    let total = segments.last().unwrap().end;
    assert!((total - 0.36).abs() < EPSILON, "total was {total}");

    let groups: Vec<AudioGroup> = segments.iter().map(|s| s.group).collect();
    assert!(groups.contains(&AudioGroup::Silence));
    assert!(groups.contains(&AudioGroup::Pucker));
}

#[test]
fn sub_tolerance_gaps_leave_no_silence() {
    let segments = engine()
        .segments_from_recognized(&recognized(&[
            ("AA", 0.000, 0.120),
            ("M", 0.125, 0.090), // 5ms gap, within tolerance
        ]))
        .expect("valid timing");

    assert!(segments.iter().all(|s| !s.group.is_silence()));
    assert_contiguous(&segments);
    // The absorbed gap keeps the recognizer's end time.
    assert!((segments.last().unwrap().end - 0.215).abs() < EPSILON);
}

#[test]
fn misordered_recognizer_input_is_rejected() {
    let result = engine().segments_from_recognized(&recognized(&[
        ("AA", 0.30, 0.10),
        ("M", 0.10, 0.10),
    ]));
    assert!(matches!(result, Err(EngineError::RecognizerTiming(_))));
}

// ---------------------------------------------------------------------------
// Scenario D: short-segment donation
// ---------------------------------------------------------------------------

#[test]
fn flicker_segment_duration_donated_to_predecessor() {
    // A lone 0.02s neutral phone between two vowels, staged via
    // recognizer timestamps.
    let segments = engine()
        .segments_from_recognized(&recognized(&[
            ("AA", 0.00, 0.12),
            ("T", 0.12, 0.02), // Neutral group, under the 0.08 weak minimum
            ("UW", 0.14, 0.11),
        ]))
        .expect("valid timing");

    // The 0.02s Neutral segment is gone, its duration folded into AA's.
    assert!(segments.iter().all(|s| s.group != AudioGroup::Neutral));
    assert!((segments[0].end - 0.14).abs() < EPSILON);
    let total = segments.last().unwrap().end;
    assert!((total - 0.25).abs() < EPSILON, "total was {total}");
    assert_contiguous(&segments);
}

// ---------------------------------------------------------------------------
// Scenario E: timeline compression
// ---------------------------------------------------------------------------

#[test]
fn compression_scales_timestamps_proportionally() {
    let mut config = EngineConfig::default();
    config.refine.compression_scale = 0.92;
    let compressed = LipSyncEngine::new(config)
        .expect("valid config")
        .segments_from_text(&StubSource, "Hello world", "en-us")
        .expect("stub never fails");

    let baseline = engine()
        .segments_from_text(&StubSource, "Hello world", "en-us")
        .expect("stub never fails");

    assert_eq!(compressed.len(), baseline.len());
    for (c, b) in compressed.iter().zip(&baseline) {
        assert!((c.start - b.start * 0.92).abs() < EPSILON);
        assert!((c.end - b.end * 0.92).abs() < EPSILON);
        assert_eq!(c.group, b.group);
    }
    assert_contiguous(&compressed);
}

// ---------------------------------------------------------------------------
// Serialization shape
// ---------------------------------------------------------------------------

#[test]
fn segments_serialize_with_wire_group_names() {
    let segments = engine()
        .segments_from_text(&StubSource, "Hello world", "en-us")
        .expect("stub never fails");
    let json = serde_json::to_value(&segments).expect("serializable");

    let first = &json[0];
    assert!(first.get("group").is_some());
    assert!(first.get("phonemes").is_some());
    assert!(first.get("start").is_some());
    assert!(first.get("end").is_some());

    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["group"].as_str().unwrap())
        .collect();
    assert!(names.iter().all(|n| n.starts_with('g')
        || *n == "sil"
        || *n == "NEUTRAL"));
    assert_eq!(names.last().copied(), Some("sil"));
}

#[test]
fn frames_serialize_with_shape_keys() {
    let frames = engine()
        .frames_from_text(&StubSource, "Hello world", "en-us")
        .expect("stub never fails");
    let json = serde_json::to_value(&frames).expect("serializable");

    let first = &json[0]; // HH
    assert_eq!(first["phoneme"], "HH");
    assert!(first["shape_keys"]["lips"].is_object());
    assert!(first["shape_keys"]["teeth"].is_object());
}

// ---------------------------------------------------------------------------
// Group enum wire names
// ---------------------------------------------------------------------------

#[test]
fn text_group_wire_names() {
    assert_eq!(
        serde_json::to_string(&TextGroup::Open).unwrap(),
        "\"g1_OPEN\""
    );
    assert_eq!(
        serde_json::to_string(&TextGroup::Silence).unwrap(),
        "\"sil\""
    );
    assert_eq!(
        serde_json::to_string(&AudioGroup::Silence).unwrap(),
        "\"sil\""
    );
    assert_eq!(
        serde_json::to_string(&AudioGroup::Pucker).unwrap(),
        "\"pucker\""
    );
}
