//! Headless testing utilities for size-aware compositions.
//!
//! Everything here is deterministic: time only moves when the test advances
//! the [`ManualScheduler`], resize events only happen when the test emits
//! them through the [`FakeResizeDetector`], and node geometry is whatever
//! the test writes into [`MemoryHost`] nodes. [`SizeTestRule`] bundles the
//! three behind the same mount/drive/assert ergonomics a windowed host
//! would offer, without needing one.

mod fake_detector;
mod manual_scheduler;
mod memory_host;
mod recording;
mod rule;

pub use fake_detector::FakeResizeDetector;
pub use manual_scheduler::ManualScheduler;
pub use memory_host::{MemoryHost, MemoryNode};
pub use recording::{FrameLog, Recording, RECORDED_KIND};
pub use rule::SizeTestRule;
