//! Metrics owned as values by an explicit registry.
//!
//! The synthesizer registers one latency histogram and one error counter per
//! artifact group; the runtime observes them and the metrics renderer
//! exposes them in the Prometheus text format.

use crate::{err, Result};

use indexmap::IndexMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Histogram buckets, in milliseconds.
pub const LATENCY_BUCKETS: [f64; 8] = [0.0, 5.0, 10.0, 50.0, 100.0, 250.0, 500.0, 1000.0];

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    metrics: IndexMap<String, Metric>,
}

#[derive(Debug)]
pub enum Metric {
    Histogram(Histogram),
    Counter(Counter),
}

#[derive(Debug)]
pub struct Histogram {
    help: String,
    buckets: Vec<f64>,

    /// Non-cumulative count per bucket, plus one for `+Inf`
    counts: Vec<AtomicU64>,

    /// Bits of the `f64` sum
    sum: AtomicU64,
}

#[derive(Debug)]
pub struct Counter {
    help: String,
    value: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> MetricsRegistry {
        MetricsRegistry::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    pub fn register_histogram(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
        buckets: &[f64],
    ) -> Result<&Histogram> {
        let metric = self.register(name.into(), Metric::Histogram(Histogram::new(help, buckets)))?;
        match metric {
            Metric::Histogram(histogram) => Ok(histogram),
            Metric::Counter(_) => Err(err!("metric registered with the wrong kind")),
        }
    }

    pub fn register_counter(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
    ) -> Result<&Counter> {
        let metric = self.register(name.into(), Metric::Counter(Counter::new(help)))?;
        match metric {
            Metric::Counter(counter) => Ok(counter),
            Metric::Histogram(_) => Err(err!("metric registered with the wrong kind")),
        }
    }

    fn register(&mut self, name: String, metric: Metric) -> Result<&Metric> {
        use indexmap::map::Entry;

        match self.metrics.entry(name) {
            Entry::Occupied(entry) => Err(err!("metric `{}` is already registered", entry.key())),
            Entry::Vacant(entry) => Ok(entry.insert(metric)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Metric> {
        self.metrics.get(name)
    }

    pub fn histogram(&self, name: &str) -> Option<&Histogram> {
        match self.metrics.get(name)? {
            Metric::Histogram(histogram) => Some(histogram),
            Metric::Counter(_) => None,
        }
    }

    pub fn counter(&self, name: &str) -> Option<&Counter> {
        match self.metrics.get(name)? {
            Metric::Counter(counter) => Some(counter),
            Metric::Histogram(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Metric)> + '_ {
        self.metrics
            .iter()
            .map(|(name, metric)| (name.as_str(), metric))
    }

    /// Render every metric in the Prometheus text exposition format, in
    /// registration order.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (name, metric) in &self.metrics {
            match metric {
                Metric::Histogram(histogram) => histogram.render(name, &mut out),
                Metric::Counter(counter) => counter.render(name, &mut out),
            }
        }

        out
    }
}

impl Histogram {
    fn new(help: impl Into<String>, buckets: &[f64]) -> Histogram {
        Histogram {
            help: help.into(),
            buckets: buckets.to_vec(),
            counts: (0..=buckets.len()).map(|_| AtomicU64::new(0)).collect(),
            sum: AtomicU64::new(0f64.to_bits()),
        }
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn buckets(&self) -> &[f64] {
        &self.buckets
    }

    /// Record one observation, in milliseconds
    pub fn observe(&self, value: f64) {
        let index = self
            .buckets
            .iter()
            .position(|upper| value <= *upper)
            .unwrap_or(self.buckets.len());

        self.counts[index].fetch_add(1, Ordering::Relaxed);

        let _ = self
            .sum
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some((f64::from_bits(bits) + value).to_bits())
            });
    }

    pub fn count(&self) -> u64 {
        self.counts
            .iter()
            .map(|count| count.load(Ordering::Relaxed))
            .sum()
    }

    pub fn sum(&self) -> f64 {
        f64::from_bits(self.sum.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {}", self.help);
        let _ = writeln!(out, "# TYPE {name} histogram");

        let mut cumulative = 0;
        for (upper, count) in self.buckets.iter().zip(&self.counts) {
            cumulative += count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}_bucket{{le=\"{upper}\"}} {cumulative}");
        }

        let _ = writeln!(out, "{name}_bucket{{le=\"+Inf\"}} {}", self.count());
        let _ = writeln!(out, "{name}_sum {}", self.sum());
        let _ = writeln!(out, "{name}_count {}", self.count());
    }
}

impl Counter {
    fn new(help: impl Into<String>) -> Counter {
        Counter {
            help: help.into(),
            value: AtomicU64::new(0),
        }
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {}", self.help);
        let _ = writeln!(out, "# TYPE {name} counter");
        let _ = writeln!(out, "{name} {}", self.get());
    }
}
