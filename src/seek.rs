// SPDX-License-Identifier: Apache-2.0

use std::io::SeekFrom;

/// A position adjustment for [`reset_position`], resolved against a current
/// position and the total live length of the store.
///
/// [`reset_position`]: crate::CommandDevice::reset_position
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SeekOffset {
	/// Reset to the start. Equivalent to `FromStart(0)`.
	Reset,
	/// Move forward by an offset.
	Forward(usize),
	/// Move back by an offset.
	Back(usize),
	/// A position from the start of live data.
	FromStart(usize),
	/// A position from the end of live data, where the end is the total
	/// length of all currently-live records at resolution time, not a fixed
	/// constant. A positive offset resolves past the end; reads there find
	/// no data until enough is written.
	FromEnd(isize),
}

impl SeekOffset {
	/// Converts to a start-based position given a current `pos` and the
	/// live length `len`. Backward resolution saturates at zero.
	pub fn to_pos(self, pos: usize, len: usize) -> usize {
		match self {
			SeekOffset::Reset => 0,
			SeekOffset::Forward(off) => pos.saturating_add(off),
			SeekOffset::Back   (off) => pos.saturating_sub(off),
			SeekOffset::FromStart(pos) => pos,
			SeekOffset::FromEnd(off @ 0..) => len.saturating_add(off as usize),
			SeekOffset::FromEnd(off      ) => len.saturating_sub(off.unsigned_abs())
		}
	}
}

impl From<SeekFrom> for SeekOffset {
	/// Converts from [`std::io`]'s seek enum.
	///
	/// # Panics
	///
	/// Panics if a 64-bit offset is too large to fit in a `usize` or `isize`
	/// value.
	fn from(value: SeekFrom) -> Self {
		fn conv(pos: u64) -> usize {
			pos.try_into()
			   .expect("u64 offset is too large to fit in a usize value")
		}

		fn conv_signed(off: i64) -> isize {
			off.try_into()
			   .expect("i64 offset is too large to fit in an isize value")
		}

		match value {
			SeekFrom::Start  (pos)       => SeekOffset::FromStart(conv(pos)),
			SeekFrom::End    (off)       => SeekOffset::FromEnd(conv_signed(off)),
			SeekFrom::Current(off @ 0..) => SeekOffset::Forward(conv(off as u64)),
			SeekFrom::Current(off      ) => SeekOffset::Back(conv(off.unsigned_abs()))
		}
	}
}

#[cfg(test)]
mod test {
	use std::io::SeekFrom;
	use super::SeekOffset;

	#[test]
	fn resolves_against_position_and_length() {
		assert_eq!(SeekOffset::Reset       .to_pos(5, 10),  0);
		assert_eq!(SeekOffset::Forward(3)  .to_pos(5, 10),  8);
		assert_eq!(SeekOffset::Back(7)     .to_pos(5, 10),  0);
		assert_eq!(SeekOffset::FromStart(12).to_pos(5, 10), 12);
		assert_eq!(SeekOffset::FromEnd(2)  .to_pos(5, 10), 12);
		assert_eq!(SeekOffset::FromEnd(-4) .to_pos(5, 10),  6);
		assert_eq!(SeekOffset::FromEnd(-20).to_pos(5, 10),  0);
	}

	#[test]
	fn converts_each_seek_from_variant() {
		assert_eq!(SeekOffset::from(SeekFrom::Start(4)),    SeekOffset::FromStart(4));
		assert_eq!(SeekOffset::from(SeekFrom::End(-2)),     SeekOffset::FromEnd(-2));
		assert_eq!(SeekOffset::from(SeekFrom::Current(3)),  SeekOffset::Forward(3));
		assert_eq!(SeekOffset::from(SeekFrom::Current(-3)), SeekOffset::Back(3));
		assert_eq!(
			SeekOffset::from(SeekFrom::Current(i64::MIN)),
			SeekOffset::Back(i64::MIN.unsigned_abs() as usize)
		);
	}
}
