// tests/log_watcher.rs

use std::io::{BufRead, Cursor, Read};

use nodeharness::errors::HarnessError;
use nodeharness::watch::{
    NullSink, WatchBudget, WriterSink, scan_lines, scan_lines_async, watch_for, watch_for_async,
};
use nodeharness_test_utils::init_tracing;

const STREAM: &str = "a\nkeyword\nb\nkeyword\nc\n";

#[test]
fn second_match_short_circuits_after_four_lines() {
    init_tracing();

    let mut reader = Cursor::new(STREAM);
    let mut echoed = Vec::new();
    let mut sink = |line: &str| echoed.push(line.to_string());

    let found = watch_for(&mut reader, "keyword", 10, 2, &mut sink).unwrap();

    assert!(found);
    assert_eq!(echoed, vec!["a", "keyword", "b", "keyword"]);

    // The fifth line is still unread.
    let mut rest = String::new();
    reader.read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "c\n");
}

#[test]
fn end_of_stream_before_threshold_returns_false() {
    init_tracing();

    let budget = WatchBudget::new(10, 3).unwrap();
    let report = scan_lines(Cursor::new(STREAM), "keyword", &budget, &mut NullSink).unwrap();

    assert!(!report.found);
    assert_eq!(report.state.lines_consumed(), 5);
    assert_eq!(report.state.matches_seen(), 2);
}

#[test]
fn line_budget_is_limit_times_repetitions() {
    init_tracing();

    // Budget is 2 * 2 = 4 lines; the second keyword sits on line 5.
    let stream = "keyword\nx\ny\nz\nkeyword\n";
    let budget = WatchBudget::new(2, 2).unwrap();
    assert_eq!(budget.max_lines(), 4);

    let mut reader = Cursor::new(stream);
    let report = scan_lines(&mut reader, "keyword", &budget, &mut NullSink).unwrap();

    assert!(!report.found);
    assert_eq!(report.state.lines_consumed(), 4);
    assert_eq!(report.state.matches_seen(), 1);

    let mut next = String::new();
    reader.read_line(&mut next).unwrap();
    assert_eq!(next, "keyword\n");
}

#[test]
fn zero_repetitions_is_rejected_for_any_stream() {
    init_tracing();

    for stream in ["", "keyword\n", STREAM] {
        let err = watch_for(Cursor::new(stream), "keyword", 10, 0, &mut NullSink).unwrap_err();
        assert!(
            matches!(err, HarnessError::InvalidArgument(_)),
            "expected InvalidArgument, got {err:?}"
        );
    }
}

#[test]
fn zero_line_limit_and_empty_keyword_are_rejected() {
    init_tracing();

    let err = watch_for(Cursor::new(STREAM), "keyword", 0, 1, &mut NullSink).unwrap_err();
    assert!(matches!(err, HarnessError::InvalidArgument(_)));

    let err = watch_for(Cursor::new(STREAM), "", 10, 1, &mut NullSink).unwrap_err();
    assert!(matches!(err, HarnessError::InvalidArgument(_)));

    assert!(matches!(
        WatchBudget::new(usize::MAX, 2),
        Err(HarnessError::InvalidArgument(_))
    ));
}

#[test]
fn repeated_keyword_on_one_line_counts_once() {
    init_tracing();

    let found = watch_for(
        Cursor::new("keyword keyword keyword\nnothing\n"),
        "keyword",
        10,
        2,
        &mut NullSink,
    )
    .unwrap();
    assert!(!found);
}

#[test]
fn matching_is_case_sensitive() {
    init_tracing();

    let found = watch_for(Cursor::new("KEYWORD\nKeyword\n"), "keyword", 10, 1, &mut NullSink)
        .unwrap();
    assert!(!found);
}

#[test]
fn echoed_lines_have_terminators_stripped() {
    init_tracing();

    let mut sink = WriterSink::new(Vec::new());
    let found = watch_for(
        Cursor::new("first\r\nready now\r\n"),
        "ready",
        5,
        1,
        &mut sink,
    )
    .unwrap();

    assert!(found);
    assert_eq!(
        String::from_utf8(sink.into_inner()).unwrap(),
        "first\nready now\n"
    );
}

#[test]
fn invalid_utf8_lines_are_decoded_lossily() {
    init_tracing();

    let bytes: &[u8] = b"\xff\xfe garbage\nnode ready\n";
    let found = watch_for(Cursor::new(bytes), "ready", 5, 1, &mut NullSink).unwrap();
    assert!(found);
}

#[test]
fn last_line_without_newline_is_still_checked() {
    init_tracing();

    let found = watch_for(Cursor::new("a\nb\nready"), "ready", 5, 1, &mut NullSink).unwrap();
    assert!(found);
}

#[tokio::test]
async fn async_scan_matches_blocking_scan() {
    init_tracing();

    let mut echoed = Vec::new();
    let mut sink = |line: &str| echoed.push(line.to_string());
    let found = watch_for_async(STREAM.as_bytes(), "keyword", 10, 2, &mut sink)
        .await
        .unwrap();
    assert!(found);
    assert_eq!(echoed.len(), 4);

    let budget = WatchBudget::new(10, 3).unwrap();
    let report = scan_lines_async(STREAM.as_bytes(), "keyword", &budget, &mut NullSink)
        .await
        .unwrap();
    assert!(!report.found);
    assert_eq!(report.state.lines_consumed(), 5);
}

#[tokio::test]
async fn async_scan_rejects_zero_repetitions() {
    init_tracing();

    let err = watch_for_async(STREAM.as_bytes(), "keyword", 10, 0, &mut NullSink)
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::InvalidArgument(_)));
}

#[test]
fn stdout_sink_echoes_without_failing() {
    init_tracing();

    let mut sink = WriterSink::stdout();
    let found = watch_for(Cursor::new("booting\nnode ready\n"), "ready", 5, 1, &mut sink).unwrap();
    assert!(found);
}
