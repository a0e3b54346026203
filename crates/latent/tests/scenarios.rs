//! Integration test: end-to-end record and replay through the facade.
//!
//! Covers the canonical usage scenarios: heterogeneous entries rendered
//! through the reference printf, two-phase buffer sizing, a tiny arena
//! at its exact capacity, a thousand-entry batch, teardown accounting,
//! and failure reporting.

use latent::arena::footprint_of;
use latent::prelude::*;
use latent_test_utils::{fail_when, DropLog, DropProbe, Transcript};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn rendered<P: latent::arena::TeardownPolicy>(log: &DeferredPrintf<'_, P>) -> Vec<String> {
    let mut transcript = Transcript::new();
    log.apply(transcript.sink());
    transcript.into_lines()
}

// ── Rendering ───────────────────────────────────────────────────────

#[test]
fn heterogeneous_entries_render_in_order() {
    let mut log = DeferredPrintf::new();
    record!(log, "Integer: %d", 42).unwrap();
    record!(log, "Hex: %x", 255).unwrap();
    record!(log, "Float: %.2f", 3.14159).unwrap();

    assert_eq!(
        rendered(&log),
        ["Integer: 42", "Hex: ff", "Float: 3.14"]
    );
}

#[test]
fn mixed_token_types_share_one_arena() {
    let owned = String::from("owned");
    let value = 7u8;
    let mut log = DeferredPrintf::new();
    record!(log, "Hello %d %d", 1, 2).unwrap();
    record!(log, "Test %s", "string").unwrap();
    record!(log, "%s/%s", owned.clone(), owned.as_str()).unwrap();
    record!(log, "%c %u %ld %p", 'c', value, -9i64, std::ptr::null::<u8>()).unwrap();
    record!(log, "%5.1f%%", 99.44f32).unwrap();

    assert_eq!(
        rendered(&log),
        [
            "Hello 1 2",
            "Test string",
            "owned/owned",
            "c 7 -9 (nil)",
            " 99.4%",
        ]
    );
}

#[test]
fn replay_can_target_any_writer() {
    let mut log = DeferredPrintf::new();
    record!(log, "[%s]", "a").unwrap();
    record!(log, "[%03d]", 7).unwrap();

    let mut out: Vec<u8> = Vec::new();
    let total = log.apply_with(vfprintf, &mut out);
    assert_eq!(out, b"[a][007]");
    assert_eq!(total, out.len());
}

// ── Sizing ──────────────────────────────────────────────────────────

#[test]
fn two_phase_sizing_round_trips() {
    let mut log = DeferredPrintf::new();
    record!(log, "Dynamic buffer %d %d", 5, 6).unwrap();

    let mut measure = SliceSink::measure();
    let needed = log.apply_with(vsnprintf, &mut measure);
    assert_eq!(needed, measure.required());
    assert_eq!(needed, "Dynamic buffer 5 6".len());

    let mut buf = vec![0u8; needed];
    let mut fill = SliceSink::new(&mut buf);
    assert_eq!(log.apply_with(vsnprintf, &mut fill), needed);
    assert!(!fill.is_truncated());
    assert_eq!(std::str::from_utf8(&buf).unwrap(), "Dynamic buffer 5 6");
}

#[test]
fn undersized_buffer_keeps_a_prefix() {
    let mut log = DeferredPrintf::new();
    record!(log, "%s", "abcdef").unwrap();
    let mut buf = [0u8; 4];
    let mut sink = SliceSink::new(&mut buf);
    assert_eq!(log.apply_with(vsnprintf, &mut sink), 6);
    assert!(sink.is_truncated());
    assert_eq!(sink.filled(), b"abcd");
}

// ── Capacity ────────────────────────────────────────────────────────

#[test]
fn sixty_four_byte_driver_holds_two_entries() {
    let mut log = DeferredPrintf::with_capacity(64).unwrap();
    record!(log, "Entry %d", 1).unwrap();
    record!(log, "Entry %d", 2).unwrap();
    assert_eq!(rendered(&log), ["Entry 1", "Entry 2"]);
}

#[test]
fn exact_capacity_boundary() {
    let size = footprint_of::<(i32,)>();

    let mut exact = DeferredPrintf::with_capacity(4 * size).unwrap();
    for i in 0..4 {
        record!(exact, "Entry %d", i).unwrap();
    }
    assert_eq!(exact.used_bytes(), exact.capacity());

    let mut short = DeferredPrintf::with_capacity(4 * size - 1).unwrap();
    for i in 0..3 {
        record!(short, "Entry %d", i).unwrap();
    }
    let err = record!(short, "Entry %d", 3).unwrap_err();
    assert_eq!(
        err,
        ArenaError::CapacityExceeded {
            requested: size,
            remaining: size - 1,
            capacity: 4 * size - 1,
        }
    );
    assert_eq!(short.len(), 3);
    assert_eq!(short.used_bytes(), 3 * size);
}

#[test]
fn thousand_entries_replay_in_order() {
    let mut log = DeferredPrintf::with_capacity(64 * 1024).unwrap();
    for i in 0..1000 {
        record!(log, "Log entry %d", i).unwrap();
    }
    assert_eq!(log.len(), 1000);

    let lines = rendered(&log);
    let expected: Vec<String> = (0..1000).map(|i| format!("Log entry {i}")).collect();
    assert_eq!(lines, expected);
}

#[test]
fn apply_is_idempotent() {
    let mut log = DeferredPrintf::new();
    for i in 0..10 {
        record!(log, "%d:%s", i, "x").unwrap();
    }
    let first = log.apply_report(|format: &str, args: &[Arg<'_>]| {
        vsprintf(format, args).map_or(-1, |s| s.len() as i32)
    });
    let second = log.apply_report(|format: &str, args: &[Arg<'_>]| {
        vsprintf(format, args).map_or(-1, |s| s.len() as i32)
    });
    assert_eq!(first, second);
    assert_eq!(rendered(&log), rendered(&log));
}

// ── Teardown ────────────────────────────────────────────────────────

#[test]
fn driver_drop_destroys_each_entry_once() {
    let drops = DropLog::default();
    {
        let mut log = DeferredPrintf::new();
        for id in 0..5 {
            record!(log, "probe %d", DropProbe::new(id, &drops)).unwrap();
        }
        assert_eq!(rendered(&log).len(), 5);
        assert!(drops.dropped().is_empty());
    }
    assert_eq!(drops.dropped(), [0, 1, 2, 3, 4]);
}

#[test]
fn clear_then_reuse() {
    let drops = DropLog::default();
    let mut log = DeferredPrintf::with_capacity(footprint_of::<(DropProbe,)>()).unwrap();
    record!(log, "first %d", DropProbe::new(1, &drops)).unwrap();
    assert!(record!(log, "no room %d", DropProbe::new(2, &drops)).is_err());
    log.clear();
    record!(log, "second %d", DropProbe::new(3, &drops)).unwrap();
    assert_eq!(rendered(&log), ["second 3"]);
    assert_eq!(drops.dropped(), [2, 1]);
}

#[test]
fn skip_policy_driver_replays_copy_tokens() {
    let mut log =
        DeferredPrintf::<SkipDestructors>::with_policy(ArenaConfig::new(256)).unwrap();
    record!(log, "%s %d", "copy", 1).unwrap();
    assert_eq!(rendered(&log), ["copy 1"]);
}

// ── Failures ────────────────────────────────────────────────────────

#[test]
fn failing_entries_are_reported_not_fatal() {
    init_tracing();
    let mut log = DeferredPrintf::new();
    record!(log, "fine %d", 1).unwrap();
    record!(log, "broken %d", 2).unwrap();
    record!(log, "fine %d", 3).unwrap();
    record!(log, "broken %d", 4).unwrap();

    let report = log.apply_report(fail_when("broken"));
    assert_eq!(report.replayed, 2);
    assert_eq!(report.total, 12);
    let indices: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
    assert_eq!(indices, [1, 3]);
    assert!(report.failures.iter().all(|f| f.code == -1));
}

#[test]
fn renderer_errors_surface_as_failures() {
    let mut log = DeferredPrintf::new();
    record!(log, "missing %d %d", 1).unwrap();
    record!(log, "ok").unwrap();
    let mut transcript = Transcript::new();
    let report = log.apply_report(transcript.sink());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 0);
    assert_eq!(transcript.lines(), ["ok"]);
}
