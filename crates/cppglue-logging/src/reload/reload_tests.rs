#![allow(non_snake_case)]

use super::*;
use tracing_subscriber::prelude::*;

#[test]
fn ReloadHandle___reload_without_handle___fails() {
    let handle = ReloadHandle::new();

    let result = handle.reload_level(LogLevel::Debug);

    assert_eq!(result.unwrap_err(), "reload handle not initialized");
}

#[test]
fn ReloadHandle___reload_with_handle___changes_filter() {
    let (filter, reload_handle) = reload::Layer::new(LevelFilter::INFO);
    let subscriber = tracing_subscriber::registry().with(filter);
    let handle = ReloadHandle::new();
    handle.set_handle(reload_handle.clone());

    tracing::subscriber::with_default(subscriber, || {
        handle.reload_level(LogLevel::Trace).unwrap();
        assert_eq!(
            reload_handle.with_current(|f| *f).unwrap(),
            LevelFilter::TRACE
        );
    });
}

#[test]
fn level_filter___maps_every_level() {
    assert_eq!(level_filter(LogLevel::Trace), LevelFilter::TRACE);
    assert_eq!(level_filter(LogLevel::Debug), LevelFilter::DEBUG);
    assert_eq!(level_filter(LogLevel::Info), LevelFilter::INFO);
    assert_eq!(level_filter(LogLevel::Warn), LevelFilter::WARN);
    assert_eq!(level_filter(LogLevel::Error), LevelFilter::ERROR);
    assert_eq!(level_filter(LogLevel::Off), LevelFilter::OFF);
}
