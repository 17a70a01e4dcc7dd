// SPDX-License-Identifier: Apache-2.0

mod index;

use std::fmt;
use std::iter::FusedIterator;
use all_asserts::debug_assert_lt;
use crate::record::Record;

/// A fixed-capacity ring of command records. Once every slot is occupied,
/// each insert displaces the oldest record and hands it back by value, so
/// the caller releases its storage explicitly and no dangling reference can
/// outlive it.
///
/// The store does no locking of its own. Callers sharing it across threads
/// hold one exclusive lock around every call, reads included, to observe a
/// consistent snapshot; see [`SharedDevice`].
///
/// [`SharedDevice`]: crate::SharedDevice
pub struct RecordStore {
	slots: Box<[Option<Record>]>,
	/// Index of the next slot to fill.
	write_cursor: usize,
	/// Index of the oldest occupied slot.
	read_cursor: usize,
	/// Set when every slot is occupied, i.e. the write cursor has wrapped
	/// around to the read cursor.
	full: bool,
	/// Total length in bytes of all live records.
	count: usize,
}

impl RecordStore {
	/// Creates an empty store with room for `capacity` records.
	///
	/// # Panics
	///
	/// Panics if `capacity` is zero.
	pub fn with_capacity(capacity: usize) -> Self {
		assert!(capacity > 0, "record store capacity should be non-zero");
		let mut slots = Vec::with_capacity(capacity);
		slots.resize_with(capacity, || None);
		Self {
			slots: slots.into_boxed_slice(),
			write_cursor: 0,
			read_cursor: 0,
			full: false,
			count: 0,
		}
	}

	/// Returns the number of record slots.
	pub fn capacity(&self) -> usize { self.slots.len() }

	/// Returns the number of live records.
	pub fn occupied_count(&self) -> usize {
		if self.full {
			self.capacity()
		} else {
			// Forward distance from the read cursor to the write cursor.
			self.wrap(self.write_cursor + self.capacity() - self.read_cursor)
		}
	}

	/// Returns the total length in bytes of all live records.
	pub fn len(&self) -> usize { self.count }

	/// Returns `true` if no records are live.
	pub fn is_empty(&self) -> bool {
		!self.full && self.read_cursor == self.write_cursor
	}

	/// Returns `true` if every slot is occupied.
	pub fn is_full(&self) -> bool { self.full }

	/// Places `record` at the write cursor and advances the cursor one
	/// slot. If the store was already full, the oldest record is displaced
	/// and returned, and the read cursor advances past it. Never fails;
	/// capacity is fixed at construction.
	pub fn insert(&mut self, record: Record) -> Option<Record> {
		self.count += record.len();
		let evicted = self.slots[self.write_cursor].replace(record);
		debug_assert!(
			evicted.is_none() || self.full,
			"only a full store should displace a record on insert"
		);

		self.write_cursor = self.wrap(self.write_cursor + 1);
		if self.full {
			// The oldest slot was just overwritten; the record after it is
			// now the oldest.
			self.read_cursor = self.write_cursor;
		}
		self.full = self.write_cursor == self.read_cursor;

		if let Some(ref displaced) = evicted {
			self.count -= displaced.len();
		}
		evicted
	}

	/// Returns the record at `index`, counted oldest-first, or `None` at or
	/// past the live record count. Indices are relative to the current
	/// ordering and shift as eviction occurs.
	pub fn get(&self, index: usize) -> Option<&Record> {
		if index < self.occupied_count() {
			self.slots[self.wrap(self.read_cursor + index)].as_ref()
		} else {
			None
		}
	}

	/// Iterates over live records, oldest to newest. A fresh call always
	/// restarts at the current oldest record.
	pub fn iter(&self) -> Records<'_> {
		Records { store: self, index: 0 }
	}

	fn wrap(&self, index: usize) -> usize {
		debug_assert_lt!(index, self.capacity() * 2);
		if index >= self.capacity() {
			index - self.capacity()
		} else {
			index
		}
	}
}

impl fmt::Debug for RecordStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

/// An iterator over live records, oldest to newest.
pub struct Records<'a> {
	store: &'a RecordStore,
	index: usize,
}

impl<'a> Iterator for Records<'a> {
	type Item = &'a Record;

	fn next(&mut self) -> Option<&'a Record> {
		let record = self.store.get(self.index)?;
		self.index += 1;
		Some(record)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.len();
		(len, Some(len))
	}
}

impl ExactSizeIterator for Records<'_> {
	fn len(&self) -> usize {
		self.store.occupied_count() - self.index
	}
}

impl FusedIterator for Records<'_> { }

impl<'a> IntoIterator for &'a RecordStore {
	type Item = &'a Record;
	type IntoIter = Records<'a>;

	fn into_iter(self) -> Records<'a> { self.iter() }
}
