// SPDX-License-Identifier: Apache-2.0

//! Offset translation over a store snapshot: a flat byte offset into the
//! oldest-first concatenation of live records maps to the record holding it,
//! and a record index plus intra-record offset maps back to the flat offset.
//! Both directions are stateless walks; offsets are only meaningful against
//! the store state they were resolved on, since eviction shifts which bytes
//! an offset denotes.

use crate::error::{Error, Result};
use crate::record::Record;
use super::RecordStore;

impl RecordStore {
	/// Locates the record containing the byte at `offset` within the
	/// logical concatenation of all live records, oldest first. Returns the
	/// record's index and the offset of the byte within it, or `None` when
	/// `offset` is at or past the end of live data.
	pub fn locate_by_global_offset(&self, offset: usize) -> Option<(usize, usize)> {
		self.locate(offset).map(|(index, _, intra_offset)| (index, intra_offset))
	}

	/// Translates a record `index`, counted oldest-first, and a byte offset
	/// within that record to the equivalent global offset: the summed
	/// length of all records ordered before it, plus `intra_offset`.
	///
	/// Fails with [`InvalidCommandIndex`] when `index` is at or past the
	/// live record count, and with [`InvalidCommandOffset`] when
	/// `intra_offset` is at or past that record's length. Neither failure
	/// mutates state.
	///
	/// [`InvalidCommandIndex`]: Error::InvalidCommandIndex
	/// [`InvalidCommandOffset`]: Error::InvalidCommandOffset
	pub fn seek_to_command(&self, index: usize, intra_offset: usize) -> Result<usize> {
		let Some(record) = self.get(index) else {
			return Err(Error::InvalidCommandIndex {
				index,
				live: self.occupied_count(),
			});
		};
		if intra_offset >= record.len() {
			return Err(Error::InvalidCommandOffset {
				offset: intra_offset,
				len: record.len(),
			});
		}

		let preceding: usize = self.iter().take(index).map(Record::len).sum();
		Ok(preceding + intra_offset)
	}

	/// Walks live records accumulating a running length total, yielding the
	/// first record whose interval contains `offset`.
	pub(crate) fn locate(&self, offset: usize) -> Option<(usize, &Record, usize)> {
		let mut start = 0;
		for (index, record) in self.iter().enumerate() {
			if offset < start + record.len() {
				return Some((index, record, offset - start));
			}
			start += record.len();
		}
		None
	}
}
