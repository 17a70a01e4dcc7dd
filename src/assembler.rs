// SPDX-License-Identifier: Apache-2.0

use crate::error::Result;
use crate::record::Record;

/// Accumulates incoming byte chunks into an in-progress command, splitting
/// off one completed [`Record`] per newline. Bytes after the last newline
/// stay buffered for the next call. Pure accumulation and splitting: the
/// assembler performs no I/O and holds no lock of its own.
///
/// Pending bytes are never shared with committed records; each commit copies
/// the terminated prefix into fresh record storage. An unterminated command
/// grows without bound here, capped only by the caller's input-size policy
/// at the transport boundary.
#[derive(Debug, Default)]
pub struct CommandAssembler {
	/// Bytes not yet terminated by a newline. Holds no newline between
	/// calls.
	pending: Vec<u8>,
}

impl CommandAssembler {
	/// Creates an assembler with nothing pending.
	pub fn new() -> Self { Self::default() }

	/// Returns the bytes buffered since the last committed newline.
	pub fn pending(&self) -> &[u8] { &self.pending }

	/// Returns `true` if an unterminated command is buffered.
	pub fn has_pending(&self) -> bool { !self.pending.is_empty() }

	/// Appends `bytes` to the pending command and commits one record per
	/// newline found, in order. Multiple commands arriving in one chunk
	/// yield multiple records, each evictable independently; any bytes
	/// after the last newline remain pending.
	///
	/// On allocation failure nothing is committed and the pending buffer is
	/// restored to its pre-call state.
	pub fn append(&mut self, bytes: &[u8]) -> Result<Vec<Record>> {
		let base = self.pending.len();
		self.pending.try_reserve(bytes.len())?;
		self.pending.extend_from_slice(bytes);

		match self.split_terminated(base) {
			Ok(records) => {
				debug_assert!(
					find_newline(&self.pending).is_none(),
					"pending bytes should hold no newline between calls"
				);
				Ok(records)
			}
			Err(error) => {
				// No partial commit: drop the appended bytes as well.
				self.pending.truncate(base);
				Err(error)
			}
		}
	}

	/// Commits one record per newline at or after `from`, draining the
	/// terminated prefix only once every record is allocated.
	fn split_terminated(&mut self, from: usize) -> Result<Vec<Record>> {
		let mut records = Vec::new();
		let mut start = 0;
		// Newlines can only appear in the appended region; everything
		// before `from` was scanned by earlier calls.
		let mut search = from;
		while let Some(found) = find_newline(&self.pending[search..]) {
			let end = search + found + 1;
			records.push(Record::copy_from(&self.pending[start..end])?);
			start = end;
			search = end;
		}

		if start > 0 {
			self.pending.drain(..start);
		}
		Ok(records)
	}
}

fn find_newline(haystack: &[u8]) -> Option<usize> {
	haystack.iter().position(|&byte| byte == b'\n')
}
