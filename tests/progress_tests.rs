//! Tests for the progress module functionality.
//!
//! This file covers bar styling, render sessions and the throughput tracker.

use std::io::{self, Read};
use std::time::{Duration, Instant};

use tally::progress::{
    refresh_rate_hz, BarOpts, BarState, EwmaSpeed, ProxyReader, RenderSession, StyleOptions, EWMA_WINDOW,
};
use tally::Error;

fn drain(mut reader: impl Read) {
    io::copy(&mut reader, &mut io::sink()).unwrap();
}

fn create_test_session() -> RenderSession {
    RenderSession::hidden(60, Duration::from_millis(180))
}

#[test]
fn test_style_options_default() {
    let style = StyleOptions::default();
    assert!(!style.push().clears());
    assert!(style.unpack().clears());
}

#[test]
fn test_style_options_setters() {
    let mut style = StyleOptions::default();
    style.set_push(BarOpts::unpack());
    style.set_unpack(BarOpts::transfer());

    assert!(style.push().clears());
    assert!(!style.unpack().clears());
}

#[test]
fn test_bar_opts_set_clear() {
    let mut opts = BarOpts::transfer();
    opts.set_clear(true);
    assert!(opts.clears());
    opts.set_clear(false);
    assert!(!opts.clears());
}

#[test]
fn test_bar_opts_build_styles() {
    let transfer = BarOpts::transfer();
    assert!(transfer.to_progress_style(60).is_ok());
    assert!(transfer.to_completed_style(60).unwrap().is_some());

    let unpack = BarOpts::unpack();
    assert!(unpack.to_progress_style(40).is_ok());
    assert!(unpack.to_completed_style(40).unwrap().is_none());
}

#[test]
fn test_bar_opts_rejects_short_progress_chars() {
    let opts = BarOpts::new(BarOpts::TEMPLATE_TRANSFER, "=", None, false);
    let err = opts
        .to_progress_style(60)
        .err()
        .expect("Short progress chars should be rejected");
    assert!(matches!(err, Error::ProgressChars(ref chars) if chars == "="));
}

#[test]
fn test_session_settings() {
    let session = create_test_session();
    assert_eq!(session.width(), 60);
    assert_eq!(session.refresh_interval(), Duration::from_millis(180));
    assert!(session.bars().is_empty());
}

#[test]
fn test_session_draw_rate_follows_refresh_interval() {
    let session = RenderSession::new(60, Duration::from_millis(180));
    assert_eq!(session.refresh_interval(), Duration::from_millis(180));
    assert_eq!(session.refresh_hz(), 6);

    let hidden = RenderSession::hidden(60, Duration::from_millis(500));
    assert_eq!(hidden.refresh_hz(), 2);
}

#[test]
fn test_refresh_rate_hz_bounds() {
    assert_eq!(refresh_rate_hz(Duration::from_millis(180)), 6);
    assert_eq!(refresh_rate_hz(Duration::from_millis(1000)), 1);
    assert_eq!(refresh_rate_hz(Duration::from_secs(10)), 1);
    assert_eq!(refresh_rate_hz(Duration::from_millis(1)), 255);
    assert_eq!(refresh_rate_hz(Duration::ZERO), 255);
}

#[test]
fn test_session_redraws_bars_added_after_idle() {
    let session = RenderSession::hidden(60, Duration::from_millis(10));

    let first = session.add_bar("Copying", 1, &BarOpts::transfer());
    drain(ProxyReader::new(&b"a"[..], first));
    session.wait();
    // Let the redraw thread notice the session went idle.
    std::thread::sleep(Duration::from_millis(50));

    let second = session.add_bar("Copying", 1, &BarOpts::transfer());
    assert_eq!(second.state(), BarState::Active);
    drain(ProxyReader::new(&b"b"[..], second));
    session.wait();
    assert!(session.bars().iter().all(|bar| bar.is_complete()));
}

#[test]
fn test_session_falls_back_to_hidden_bar() {
    let session = create_test_session();
    let broken = BarOpts::new(BarOpts::TEMPLATE_TRANSFER, "", None, false);

    let bar = session.add_bar("Copying", 4, &broken);

    assert_eq!(bar.state(), BarState::Active);
    assert_eq!(session.bars().len(), 1);
    assert_eq!(bar.total(), 4);
}

#[test]
fn test_session_wait_without_bars() {
    create_test_session().wait();
}

#[test]
fn test_session_println() {
    let session = create_test_session();
    session.println("between bars\n").unwrap();
}

#[test]
fn test_session_debug() {
    let session = create_test_session();
    session.add_bar("Unpacking", 1, &BarOpts::unpack());
    let debug_str = format!("{:?}", session);

    assert!(debug_str.contains("RenderSession"));
    assert!(debug_str.contains("bars: 1"));
}

#[test]
fn test_bar_debug() {
    let session = create_test_session();
    let bar = session.add_bar("Unpacking", 1, &BarOpts::unpack());
    let debug_str = format!("{:?}", bar);

    assert!(debug_str.contains("Unpacking"));
    assert!(debug_str.contains("Active"));
}

#[test]
fn test_ewma_speed_first_sample() {
    let start = Instant::now();
    let mut speed = EwmaSpeed::new(EWMA_WINDOW);
    assert_eq!(speed.rate(), None);

    speed.record(0, start);
    assert_eq!(speed.rate(), None);

    speed.record(2048, start + Duration::from_secs(2));
    assert_eq!(speed.rate(), Some(1024.0));
}

#[test]
fn test_ewma_speed_weights_new_samples() {
    let start = Instant::now();
    let mut speed = EwmaSpeed::new(1);
    speed.record(0, start);
    speed.record(100, start + Duration::from_secs(1));
    // A window of one sample follows the latest rate exactly.
    speed.record(400, start + Duration::from_secs(2));
    assert_eq!(speed.rate(), Some(300.0));

    let mut smooth = EwmaSpeed::new(EWMA_WINDOW);
    smooth.record(0, start);
    smooth.record(100, start + Duration::from_secs(1));
    smooth.record(400, start + Duration::from_secs(2));
    let rate = smooth.rate().unwrap();
    assert!(rate > 100.0 && rate < 300.0);
}

#[test]
fn test_ewma_speed_ignores_zero_elapsed() {
    let start = Instant::now();
    let mut speed = EwmaSpeed::new(EWMA_WINDOW);
    speed.record(0, start);
    speed.record(500, start);
    assert_eq!(speed.rate(), None);
}
