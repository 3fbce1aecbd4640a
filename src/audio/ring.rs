//! Fixed-capacity ring of captured mono samples.
//!
//! The capture side pushes, the frame tick copies out the most recent window.

pub struct SampleRing {
    data: Vec<f32>,
    write_idx: usize,
    filled: bool,
}

impl SampleRing {
    pub fn new(cap: usize) -> Self {
        Self {
            data: vec![0.0; cap.max(1)],
            write_idx: 0,
            filled: false,
        }
    }

    #[inline]
    pub fn push(&mut self, x: f32) {
        self.data[self.write_idx] = if x.is_finite() { x } else { 0.0 };
        self.write_idx = (self.write_idx + 1) % self.data.len();
        if self.write_idx == 0 {
            self.filled = true;
        }
    }

    pub fn extend_from_slice(&mut self, samples: &[f32]) {
        for &s in samples {
            self.push(s);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        if self.filled {
            self.data.len()
        } else {
            self.write_idx
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.filled && self.write_idx == 0
    }

    pub fn clear(&mut self) {
        self.write_idx = 0;
        self.filled = false;
    }

    /// Copy the latest `out.len()` samples into `out`, oldest first.
    ///
    /// When fewer samples have been captured the front of `out` is zero-filled.
    pub fn copy_latest(&self, out: &mut [f32]) {
        let n = out.len();
        let avail = self.len().min(n);
        let pad = n - avail;
        out[..pad].fill(0.0);

        let cap = self.data.len();
        let start = (self.write_idx + cap - avail) % cap;
        let dst = &mut out[pad..];
        if start + avail <= cap {
            dst.copy_from_slice(&self.data[start..start + avail]);
        } else {
            let first = cap - start;
            dst[..first].copy_from_slice(&self.data[start..cap]);
            dst[first..].copy_from_slice(&self.data[..avail - first]);
        }
    }
}
