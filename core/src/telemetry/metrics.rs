use std::sync::Mutex;

/// Counters tracking quantizer activity across a run.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    tables: usize,
    clamped_samples: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                tables: 0,
                clamped_samples: 0,
            }),
        }
    }

    pub fn record_table(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.tables += 1;
        }
    }

    pub fn record_clamped(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.clamped_samples += count;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.tables, metrics.clamped_samples)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_counts() {
        let recorder = MetricsRecorder::new();
        recorder.record_table();
        recorder.record_table();
        recorder.record_clamped(3);
        assert_eq!(recorder.snapshot(), (2, 3));
    }
}
