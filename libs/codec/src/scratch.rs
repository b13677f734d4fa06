//! Per-thread pool of byte buffers used while packing vector rows.
//!
//! A `ScratchBuffer` is sized exactly to the requested length and goes back
//! to the pool when dropped, whichever way the owning scope exits.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

thread_local! {
    static POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

pub struct ScratchBuffer {
    buf: Vec<u8>,
    limit: usize,
}

impl ScratchBuffer {
    /// Take a zeroed buffer of exactly `len` bytes. At most `limit` idle
    /// buffers are kept per thread on release.
    pub fn acquire(len: usize, limit: usize) -> Self {
        let mut buf = POOL
            .try_with(|pool| pool.borrow_mut().pop())
            .ok()
            .flatten()
            .unwrap_or_default();
        buf.clear();
        buf.resize(len, 0);
        tracing::trace!(len, "scratch acquired");
        Self { buf, limit }
    }
}

impl Deref for ScratchBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        let buf = std::mem::take(&mut self.buf);
        let limit = self.limit;
        // The pool may already be gone during thread teardown.
        let _ = POOL.try_with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.len() < limit {
                pool.push(buf);
            }
        });
    }
}

/// Idle buffers currently pooled on this thread.
#[cfg(test)]
pub(crate) fn pooled() -> usize {
    POOL.try_with(|pool| pool.borrow().len()).unwrap_or(0)
}
