use crate::prelude::StageError;

/// Scoped buffer pool that bounds how many sample buffers a stage may hold.
pub struct BufferPool {
    idle: Vec<Vec<f32>>,
    outstanding: usize,
    max_outstanding: usize,
}

impl BufferPool {
    pub fn with_capacity(max_outstanding: usize) -> Self {
        Self {
            idle: Vec::new(),
            outstanding: 0,
            max_outstanding,
        }
    }

    /// Hands out a zeroed buffer of `length`, reusing a released one when possible.
    pub fn checkout(&mut self, length: usize) -> Result<Vec<f32>, StageError> {
        if self.outstanding >= self.max_outstanding {
            return Err(StageError::BufferExhaustion("pool depleted".to_string()));
        }
        self.outstanding += 1;
        let mut buffer = self.idle.pop().unwrap_or_default();
        buffer.clear();
        buffer.resize(length, 0.0);
        Ok(buffer)
    }

    /// Returns a buffer back to the pool for reuse.
    pub fn release(&mut self, mut buffer: Vec<f32>) {
        buffer.clear();
        self.outstanding = self.outstanding.saturating_sub(1);
        self.idle.push(buffer);
    }

    pub fn reset(&mut self) {
        self.idle.clear();
        self.outstanding = 0;
    }
}
