// SPDX-License-Identifier: Apache-2.0

use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::sync::MutexGuard;
use crate::device::{CommandDevice, SharedDevice};
use crate::error::Error;
use crate::seek::SeekOffset;

/// One reader/writer session over a shared device: a position cursor plus
/// the standard I/O traits, the way a process holds an open file description
/// on a device node.
///
/// Each [`read`] returns at most one record's tail and zero bytes at end of
/// data; callers keep reading to continue into the next record. Writes feed
/// the device without moving the read position. Positions are byte offsets
/// into the flat concatenation of live records, so eviction between calls
/// shifts what a position denotes. That is true of every reader of this
/// device, not just this one.
///
/// [`read`]: Read::read
pub struct DeviceSession {
	device: SharedDevice,
	pos: usize,
}

impl DeviceSession {
	/// Opens a session at position zero.
	pub fn open(device: SharedDevice) -> Self {
		Self { device, pos: 0 }
	}

	/// Returns the current position.
	pub fn pos(&self) -> usize { self.pos }

	/// Jumps to byte `intra_offset` of the live record at `index`, counted
	/// oldest-first, returning the new global position. This is the
	/// index-addressed entry point: "jump to command N, byte M".
	pub fn seek_to_command(&mut self, index: usize, intra_offset: usize) -> io::Result<usize> {
		let device = lock(&self.device)?;
		self.pos = device.seek_to_command(index, intra_offset).map_err(into_io_error)?;
		Ok(self.pos)
	}
}

impl Read for DeviceSession {
	/// Reads from the current position, advancing it by the bytes
	/// returned. A single call never crosses a record boundary.
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let device = lock(&self.device)?;
		let bytes = device.read_at(self.pos, buf.len());
		let count = bytes.len();
		buf[..count].copy_from_slice(bytes);
		self.pos += count;
		Ok(count)
	}
}

impl Write for DeviceSession {
	/// Feeds `buf` to the device, committing one record per newline. All
	/// bytes are consumed on success. The read position is unaffected.
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		let mut device = lock(&self.device)?;
		device.write(buf).map_err(into_io_error)
	}

	fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl Seek for DeviceSession {
	/// Repositions the cursor. `SeekFrom::End` resolves against the total
	/// live length at call time; seeking backward past the start saturates
	/// at zero rather than failing.
	fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
		let device = lock(&self.device)?;
		self.pos = device.reset_position(self.pos, SeekOffset::from(from));
		Ok(self.pos as u64)
	}
}

/// Borrows only the shared handle, leaving the session's cursor free to
/// update while the guard is live.
fn lock(device: &SharedDevice) -> io::Result<MutexGuard<'_, CommandDevice>> {
	device
		.lock()
		.map_err(|_| io::Error::new(ErrorKind::Other, "device lock poisoned"))
}

fn into_io_error(error: Error) -> io::Error {
	let kind = match error {
		Error::InvalidCommandIndex { .. } |
		Error::InvalidCommandOffset { .. } => ErrorKind::InvalidInput,
		Error::Allocation(_) => ErrorKind::OutOfMemory,
	};
	io::Error::new(kind, error)
}
