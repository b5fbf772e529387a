//! Input module - pointer-driven interaction with the board
//!
//! # Architecture
//!
//! - `selection` - Click-to-select / click-to-move ([`SelectionController`])
//! - `drag` - Press-drag-release movement ([`DragController`])
//! - `frame` - Per-frame coalescing of pointer moves ([`FrameCoalescer`])
//!
//! Both controllers share one [`crate::game::resources::GameStore`] through an
//! `Arc`. They never talk to each other: a drag start selects the piece in the
//! store, which is what the selection controller then reports.

pub mod drag;
pub mod frame;
pub mod selection;

// Re-export commonly used items
pub use drag::*;
pub use frame::*;
pub use selection::*;
