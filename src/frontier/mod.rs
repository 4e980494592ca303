//! Frontier representations
//!
//! - [`SlidingQueue`]: sparse frontier for top-down (push) levels
//! - [`Bitmap`]: dense frontier for bottom-up (pull) levels

pub mod bitmap;
pub mod sliding_queue;

pub use bitmap::Bitmap;
pub use sliding_queue::{QueueBuffer, SlidingQueue};
