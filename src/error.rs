// SPDX-License-Identifier: Apache-2.0

use std::collections::TryReserveError;
use std::result;

pub type Result<T = ()> = result::Result<T, Error>;

/// Errors reported by seek validation and record allocation. Read and seek
/// failures never mutate state; an allocation failure is fatal only to the
/// in-flight operation, committed records stay valid.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
	/// A seek named a command index at or past the live record count.
	#[error("command index {index} is out of range, {live} records are live")]
	InvalidCommandIndex {
		index: usize,
		live: usize,
	},
	/// A seek named a byte offset at or past the end of its record.
	#[error("offset {offset} is out of range of the record length {len}")]
	InvalidCommandOffset {
		offset: usize,
		len: usize,
	},
	/// Record or pending-buffer storage could not be allocated.
	#[error("failed to allocate record storage")]
	Allocation(#[from] TryReserveError),
}
