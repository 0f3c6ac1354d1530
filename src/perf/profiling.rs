/// Instrumentation infrastructure for microoptimization
/// Provides call and emission counting across meshing threads
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for the meshing hot path
pub struct FunctionCounters {
    pub mesh_chunk_calls: AtomicU64,
    pub mesh_empty_results: AtomicU64,
    pub quads_emitted: AtomicU64,
}

impl FunctionCounters {
    pub const fn new() -> Self {
        Self {
            mesh_chunk_calls: AtomicU64::new(0),
            mesh_empty_results: AtomicU64::new(0),
            quads_emitted: AtomicU64::new(0),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.mesh_chunk_calls.store(0, Ordering::Relaxed);
        self.mesh_empty_results.store(0, Ordering::Relaxed);
        self.quads_emitted.store(0, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            mesh_chunk_calls: self.mesh_chunk_calls.load(Ordering::Relaxed),
            mesh_empty_results: self.mesh_empty_results.load(Ordering::Relaxed),
            quads_emitted: self.quads_emitted.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of counter values at a point in time
#[derive(Debug, Clone, Copy)]
pub struct CounterSnapshot {
    pub mesh_chunk_calls: u64,
    pub mesh_empty_results: u64,
    pub quads_emitted: u64,
}

impl CounterSnapshot {
    /// Print formatted report
    pub fn print_report(&self) {
        println!("\n=== Meshing Counters Report ===");
        println!("  mesh_chunk calls:   {:12}", self.mesh_chunk_calls);
        println!("  empty results:      {:12}", self.mesh_empty_results);
        println!("  quads emitted:      {:12}", self.quads_emitted);
        if self.mesh_chunk_calls > 0 {
            let per_chunk = self.quads_emitted as f64 / self.mesh_chunk_calls as f64;
            println!("  quads per chunk:    {:12.1}", per_chunk);
        }
        println!();
    }
}

/// Global function counters instance
pub static FUNCTION_COUNTERS: FunctionCounters = FunctionCounters::new();

/// Macro for incrementing a counter (only when the profiling feature is enabled)
#[macro_export]
macro_rules! count_call {
    ($counter:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

/// Macro for adding to a counter (only when the profiling feature is enabled)
#[macro_export]
macro_rules! count_add {
    ($counter:expr, $value:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add($value, std::sync::atomic::Ordering::Relaxed);
        }
    };
}
