//! Allocation counting measurements
//!
//! Install [`INSTRUMENTED_SYSTEM`] as the global allocator in the benchmark
//! binary; otherwise every measurement reads zero.

use criterion::measurement::{Measurement, ValueFormatter};
use criterion::Throughput;
use stats_alloc::StatsAlloc;

use crate::MeshreduceMeasurement;

pub type InstrumentedSystem = StatsAlloc<std::alloc::System>;
pub use stats_alloc::INSTRUMENTED_SYSTEM;

/// Number of allocations made while the routine ran.
pub struct Allocations;

/// Bytes requested from the allocator while the routine ran.
pub struct AllocatedBytes;

impl MeshreduceMeasurement for Allocations {
    const NAME: &'static str = "allocations";
}

impl MeshreduceMeasurement for AllocatedBytes {
    const NAME: &'static str = "allocated bytes";
}

impl Measurement for Allocations {
    type Intermediate = usize;
    type Value = usize;

    fn start(&self) -> usize {
        INSTRUMENTED_SYSTEM.stats().allocations
    }

    fn end(&self, start: usize) -> usize {
        INSTRUMENTED_SYSTEM.stats().allocations - start
    }

    fn add(&self, a: &usize, b: &usize) -> usize {
        a + b
    }

    fn zero(&self) -> usize {
        0
    }

    fn to_f64(&self, value: &usize) -> f64 {
        *value as f64
    }

    fn formatter(&self) -> &dyn ValueFormatter {
        &CountFormatter
    }
}

impl Measurement for AllocatedBytes {
    type Intermediate = usize;
    type Value = usize;

    fn start(&self) -> usize {
        INSTRUMENTED_SYSTEM.stats().bytes_allocated
    }

    fn end(&self, start: usize) -> usize {
        INSTRUMENTED_SYSTEM.stats().bytes_allocated - start
    }

    fn add(&self, a: &usize, b: &usize) -> usize {
        a + b
    }

    fn zero(&self) -> usize {
        0
    }

    fn to_f64(&self, value: &usize) -> f64 {
        *value as f64
    }

    fn formatter(&self) -> &dyn ValueFormatter {
        &ByteFormatter
    }
}

struct CountFormatter;

impl ValueFormatter for CountFormatter {
    fn scale_values(&self, _: f64, _: &mut [f64]) -> &'static str {
        "allocations"
    }

    fn scale_throughputs(&self, _: f64, _: &Throughput, _: &mut [f64]) -> &'static str {
        "allocations"
    }

    fn scale_for_machines(&self, _: &mut [f64]) -> &'static str {
        "allocations"
    }
}

struct ByteFormatter;

impl ValueFormatter for ByteFormatter {
    fn scale_values(&self, typical_value: f64, values: &mut [f64]) -> &'static str {
        const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
        let magnitude = if typical_value >= 1.0 {
            ((typical_value.log2() / 10.0).floor() as usize).min(UNITS.len() - 1)
        } else {
            0
        };
        let factor = 1024f64.powi(magnitude as i32);
        for value in values {
            *value /= factor;
        }
        UNITS[magnitude]
    }

    fn scale_throughputs(&self, _: f64, _: &Throughput, _: &mut [f64]) -> &'static str {
        "B"
    }

    fn scale_for_machines(&self, _: &mut [f64]) -> &'static str {
        "B"
    }
}
