//! Plain-text tables for benchmark results.

use super::BenchmarkResult;

/// One row per order: `order  min_ms  median_ms  mean_ms`.
pub fn format_table(results: &[BenchmarkResult]) -> String {
    let mut out = format!("{:<6} {:>12} {:>12} {:>12}\n", "order", "min_ms", "median_ms", "mean_ms");
    for r in results {
        let s = r.summary();
        out.push_str(&format!(
            "{:<6} {:>12.3} {:>12.3} {:>12.3}\n",
            r.order().as_str(),
            s.min_ms(),
            s.median_ms(),
            s.mean_ms()
        ));
    }
    out
}

/// Throughput, allocations and speedup relative to the slowest order.
pub fn format_summary(results: &[BenchmarkResult]) -> String {
    let Some(slowest) = results
        .iter()
        .max_by(|x, y| x.summary().median.cmp(&y.summary().median))
    else {
        return String::new();
    };

    let mut out = format!(
        "{:<6} {:>10} {:>12} {:>10} {:>10} {:>8}\n",
        "order", "GFLOPS", "warmup_ms", "allocs", "unit-str", "speedup"
    );
    for r in results {
        out.push_str(&format!(
            "{:<6} {:>10.3} {:>12.3} {:>10.1} {:>10} {:>7.1}×\n",
            r.order().as_str(),
            r.gflops(),
            r.warmup().elapsed.as_secs_f64() * 1000.0,
            r.mean_allocations(),
            if r.order().is_unit_stride(r.layout()) { "yes" } else { "no" },
            r.speedup_over(slowest)
        ));
    }
    out
}
