// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, Mutex};
use crate::DEFAULT_CAPACITY;
use crate::assembler::CommandAssembler;
use crate::error::Result;
use crate::seek::SeekOffset;
use crate::store::RecordStore;

/// The store and assembler pair behind one logical device: bytes written in
/// become newline-terminated records, and the last `capacity` of them read
/// back as one flat byte stream, oldest first.
///
/// The device keeps no read position of its own. Callers pass a global
/// offset to every read and track their own cursor; [`DeviceSession`] does
/// this per reader. An offset is a snapshot against the store state it was
/// resolved on, so callers re-validate after any intervening write.
///
/// [`DeviceSession`]: crate::DeviceSession
pub struct CommandDevice {
	store: RecordStore,
	assembler: CommandAssembler,
}

impl CommandDevice {
	/// Creates a device retaining the last `capacity` commands.
	///
	/// # Panics
	///
	/// Panics if `capacity` is zero.
	pub fn new(capacity: usize) -> Self {
		Self {
			store: RecordStore::with_capacity(capacity),
			assembler: CommandAssembler::new(),
		}
	}

	/// Wraps the device in a shared, lock-guarded handle for sessions to
	/// clone.
	pub fn into_shared(self) -> SharedDevice {
		Arc::new(Mutex::new(self))
	}

	/// Returns the record store.
	pub fn store(&self) -> &RecordStore { &self.store }

	/// Returns the total length in bytes of all live records.
	pub fn len(&self) -> usize { self.store.len() }

	/// Returns the number of live records.
	pub fn occupied_count(&self) -> usize { self.store.occupied_count() }

	/// Returns the number of record slots.
	pub fn capacity(&self) -> usize { self.store.capacity() }

	/// Returns `true` if no records are live.
	pub fn is_empty(&self) -> bool { self.store.is_empty() }

	/// Returns the bytes accumulated since the last completed command.
	pub fn pending(&self) -> &[u8] { self.assembler.pending() }

	/// Feeds `bytes` to the assembler, inserting each completed command
	/// into the store and releasing whatever record that displaces. Returns
	/// the number of bytes consumed, which is always all of them; partial
	/// acceptance is not modeled. On allocation failure neither the store
	/// nor the pending buffer changes.
	pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
		for record in self.assembler.append(bytes)? {
			// The displaced record drops here, releasing its storage.
			let _evicted = self.store.insert(record);
		}
		Ok(bytes.len())
	}

	/// Reads up to `max_bytes` at `global_offset` within the flat
	/// concatenation of live records. The returned slice never crosses a
	/// record boundary: a caller asking for more than the located record
	/// has left receives that record's tail, and continues into the next
	/// record with an advanced offset on its next call. An empty slice
	/// means end of data.
	pub fn read_at(&self, global_offset: usize, max_bytes: usize) -> &[u8] {
		let Some((_, record, intra_offset)) = self.store.locate(global_offset) else {
			return &[];
		};
		let tail = &record.as_bytes()[intra_offset..];
		&tail[..max_bytes.min(tail.len())]
	}

	/// Translates a record index and intra-record offset to a global
	/// offset. See [`RecordStore::seek_to_command`].
	pub fn seek_to_command(&self, index: usize, intra_offset: usize) -> Result<usize> {
		self.store.seek_to_command(index, intra_offset)
	}

	/// Resolves `offset` against the current position `pos`, returning the
	/// new global position. The end base is the total live length at call
	/// time; it moves as records are committed and evicted.
	pub fn reset_position(&self, pos: usize, offset: SeekOffset) -> usize {
		offset.to_pos(pos, self.store.len())
	}
}

impl Default for CommandDevice {
	fn default() -> Self { Self::new(DEFAULT_CAPACITY) }
}

/// A device behind the one exclusive lock all sessions share. Every call
/// into the core happens under this lock, reads and seeks included, since
/// eviction on one thread can otherwise race a read on another.
pub type SharedDevice = Arc<Mutex<CommandDevice>>;
