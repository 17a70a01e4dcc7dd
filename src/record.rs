// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;
use crate::error::Result;

/// One completed, newline-terminated command held as an immutable byte
/// sequence. A record owns its storage exclusively; no two live records
/// alias the same bytes, and the bytes never change after commit. Storage is
/// released when the record is dropped, either after eviction or when the
/// store holding it is torn down.
#[derive(Clone, Eq, PartialEq)]
pub struct Record {
	bytes: Box<[u8]>,
}

impl Record {
	/// Copies `bytes` into a new record, failing if storage cannot be
	/// allocated.
	pub fn copy_from(bytes: &[u8]) -> Result<Self> {
		let mut storage = Vec::new();
		storage.try_reserve_exact(bytes.len())?;
		storage.extend_from_slice(bytes);
		Ok(storage.into())
	}

	/// Returns the record length in bytes, newline included.
	pub fn len(&self) -> usize { self.bytes.len() }

	/// Returns `true` if the record holds no bytes.
	pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

	/// Returns the record bytes.
	pub fn as_bytes(&self) -> &[u8] { &self.bytes }
}

impl From<Vec<u8>> for Record {
	fn from(bytes: Vec<u8>) -> Self {
		Self { bytes: bytes.into_boxed_slice() }
	}
}

impl Deref for Record {
	type Target = [u8];
	fn deref(&self) -> &[u8] { &self.bytes }
}

impl AsRef<[u8]> for Record {
	fn as_ref(&self) -> &[u8] { &self.bytes }
}

impl PartialEq<[u8]> for Record {
	fn eq(&self, other: &[u8]) -> bool {
		*self.bytes == *other
	}
}

impl PartialEq<&[u8]> for Record {
	fn eq(&self, other: &&[u8]) -> bool {
		self == *other
	}
}

impl fmt::Debug for Record {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Record(b\"{}\")", self.bytes.escape_ascii())
	}
}
