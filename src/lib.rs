// SPDX-License-Identifier: Apache-2.0

//! A byte-stream device that accumulates newline-terminated commands and
//! replays the last few of them as one flat stream.
//!
//! ## How it works
//!
//! Bytes written to a [`CommandDevice`] pass through a [`CommandAssembler`],
//! which buffers them until a newline completes a command. Each completed
//! command is committed as an immutable [`Record`] into a fixed-capacity
//! [`RecordStore`] ring; once the ring is full, every insert evicts the
//! oldest record, handed back by value so its storage is released exactly
//! once. A chunk carrying several newlines commits several records, each
//! evictable on its own.
//!
//! Reads address the concatenation of all live records, oldest first, with
//! a flat byte offset. The store translates a global offset to the record
//! holding that byte and the offset within it, and the reverse: a record
//! index plus intra-record offset to the global position where it lives. A
//! single read never crosses a record boundary; callers continue into the
//! next record with an advanced offset.
//!
//! Offsets are snapshots. Eviction shifts which bytes an offset denotes, so
//! anything sharing a device across threads holds the one [`SharedDevice`]
//! lock around each call, reads included. [`DeviceSession`] keeps a
//! per-reader cursor over such a handle and exposes the device through the
//! standard [`Read`](std::io::Read), [`Write`](std::io::Write) and
//! [`Seek`](std::io::Seek) traits.

mod assembler;
mod device;
mod error;
mod record;
mod seek;
mod session;
mod store;

pub use assembler::CommandAssembler;
pub use device::{CommandDevice, SharedDevice};
pub use error::{Error, Result};
pub use record::Record;
pub use seek::SeekOffset;
pub use session::DeviceSession;
pub use store::{Records, RecordStore};

/// The default number of command records a device retains.
pub const DEFAULT_CAPACITY: usize = 10;
