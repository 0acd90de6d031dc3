//! Prometheus metrics for scan cycles, instrument pipelines and the status server

use std::time::Duration;

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge,
    Opts, Registry, TextEncoder,
};

use crate::jobs::types::PipelineStage;
use crate::models::signal::SignalDirection;

pub struct Metrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub cycles_skipped_total: IntCounter,
    pub cycle_duration_seconds: Histogram,
    pub instruments_processed_total: IntCounter,
    pub signals_total: IntCounterVec,
    pub pipeline_failures_total: IntCounterVec,
    pub universe_size: IntGauge,
    pub http_requests_total: IntCounterVec,
    pub http_requests_in_flight: Gauge,
    pub http_request_duration_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles_total = IntCounter::new("pumpwatch_cycles_total", "Completed scan cycles")?;
        let cycles_skipped_total = IntCounter::new(
            "pumpwatch_cycles_skipped_total",
            "Cycles skipped because the bot is disabled or the universe is empty",
        )?;
        let cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "pumpwatch_cycle_duration_seconds",
                "Wall time of one scan cycle",
            )
            .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0, 120.0]),
        )?;
        let instruments_processed_total = IntCounter::new(
            "pumpwatch_instruments_processed_total",
            "Instrument pipelines that ran to completion",
        )?;
        let signals_total = IntCounterVec::new(
            Opts::new("pumpwatch_signals_total", "Fired signals by direction"),
            &["direction"],
        )?;
        let pipeline_failures_total = IntCounterVec::new(
            Opts::new(
                "pumpwatch_pipeline_failures_total",
                "Instrument pipeline failures by stage",
            ),
            &["stage"],
        )?;
        let universe_size = IntGauge::new(
            "pumpwatch_universe_size",
            "Symbols dispatched in the latest cycle",
        )?;
        let http_requests_total = IntCounterVec::new(
            Opts::new("pumpwatch_http_requests_total", "HTTP requests served"),
            &["route", "status"],
        )?;
        let http_requests_in_flight = Gauge::new(
            "pumpwatch_http_requests_in_flight",
            "HTTP requests currently being served",
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "pumpwatch_http_request_duration_seconds",
                "HTTP request latency",
            ),
            &["route"],
        )?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(cycles_skipped_total.clone()))?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;
        registry.register(Box::new(instruments_processed_total.clone()))?;
        registry.register(Box::new(signals_total.clone()))?;
        registry.register(Box::new(pipeline_failures_total.clone()))?;
        registry.register(Box::new(universe_size.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            cycles_skipped_total,
            cycle_duration_seconds,
            instruments_processed_total,
            signals_total,
            pipeline_failures_total,
            universe_size,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
        })
    }

    pub fn record_signal(&self, direction: SignalDirection) {
        self.signals_total
            .with_label_values(&[direction.as_str()])
            .inc();
    }

    pub fn record_failure(&self, stage: PipelineStage) {
        self.pipeline_failures_total
            .with_label_values(&[stage.as_str()])
            .inc();
    }

    pub fn record_http_request(&self, route: &str, status: u16, elapsed: Duration) {
        self.http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[route])
            .observe(elapsed.as_secs_f64());
    }

    /// Prometheus text exposition of every registered metric
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
