//! Fixed-size bit-per-vertex set
//!
//! Words are [`AtomicU64`] so that [`Bitmap::set_bit_atomic`] can be called
//! through a shared reference: concurrent setters on the same word never lose
//! an update because the bit is merged with a single `fetch_or`.

use crate::storage::NodeId;
use std::sync::atomic::{AtomicU64, Ordering};

const BITS: usize = u64::BITS as usize;

/// Bytes occupied by one bitmap word (the unit of bitmap memory traffic)
pub const WORD_BYTES: usize = std::mem::size_of::<u64>();

/// Bit-per-vertex set with capacity fixed at construction
///
/// # Example
///
/// ```
/// use trueno_dobfs::frontier::Bitmap;
/// use trueno_dobfs::NodeId;
///
/// let bm = Bitmap::new(100);
/// bm.set_bit_atomic(NodeId(65));
/// assert!(bm.get_bit(NodeId(65)));
/// assert!(!bm.get_bit(NodeId(64)));
/// ```
#[derive(Debug)]
pub struct Bitmap {
    words: Vec<AtomicU64>,
    len: usize,
}

impl Bitmap {
    /// Create a zero-filled bitmap with room for `len` bits
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            words: (0..len.div_ceil(BITS)).map(|_| AtomicU64::new(0)).collect(),
            len,
        }
    }

    /// Number of bits
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the bitmap has no capacity at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clear every bit
    pub fn reset(&mut self) {
        for word in &mut self.words {
            *word.get_mut() = 0;
        }
    }

    /// Whether bit `v` is set
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of bounds
    #[must_use]
    pub fn get_bit(&self, v: NodeId) -> bool {
        let (word, mask) = self.locate(v);
        self.words[word].load(Ordering::Relaxed) & mask != 0
    }

    /// Set bit `v` through exclusive access (plain read-modify-write)
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of bounds
    pub fn set_bit(&mut self, v: NodeId) {
        let (word, mask) = self.locate(v);
        *self.words[word].get_mut() |= mask;
    }

    /// Set bit `v` with an atomic `fetch_or` on the containing word
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of bounds
    pub fn set_bit_atomic(&self, v: NodeId) {
        let (word, mask) = self.locate(v);
        self.words[word].fetch_or(mask, Ordering::Relaxed);
    }

    /// Exchange contents with `other` (used to turn `next` into `front`)
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Number of set bits
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    fn locate(&self, v: NodeId) -> (usize, u64) {
        let index = v.index();
        assert!(
            index < self.len,
            "Bit index out of bounds: {index} >= {}",
            self.len
        );
        (index / BITS, 1 << (index % BITS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_is_zeroed() {
        let bm = Bitmap::new(130);
        assert_eq!(bm.len(), 130);
        assert_eq!(bm.count_ones(), 0);
        assert!((0..130).all(|v| !bm.get_bit(NodeId(v))));
    }

    #[test]
    fn test_set_and_reset() {
        let mut bm = Bitmap::new(130);
        bm.set_bit(NodeId(0));
        bm.set_bit(NodeId(63));
        bm.set_bit_atomic(NodeId(64));
        bm.set_bit_atomic(NodeId(129));

        assert!(bm.get_bit(NodeId(0)));
        assert!(bm.get_bit(NodeId(63)));
        assert!(bm.get_bit(NodeId(64)));
        assert!(bm.get_bit(NodeId(129)));
        assert_eq!(bm.count_ones(), 4);

        bm.reset();
        assert_eq!(bm.count_ones(), 0);
    }

    #[test]
    fn test_swap_exchanges_contents() {
        let mut front = Bitmap::new(10);
        let mut next = Bitmap::new(10);
        next.set_bit(NodeId(3));

        front.swap(&mut next);
        assert!(front.get_bit(NodeId(3)));
        assert!(!next.get_bit(NodeId(3)));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let bm = Bitmap::new(8);
        let _ = bm.get_bit(NodeId(8));
    }

    #[test]
    fn test_atomic_setters_never_lose_updates() {
        // All threads hammer the same word with distinct bits
        let bm = Arc::new(Bitmap::new(64));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let bm = Arc::clone(&bm);
                thread::spawn(move || {
                    for bit in (t..64).step_by(8) {
                        bm.set_bit_atomic(NodeId(bit));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(bm.count_ones(), 64);
    }
}
