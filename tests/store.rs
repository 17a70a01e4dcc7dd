// SPDX-License-Identifier: Apache-2.0

use pretty_assertions::assert_eq;
use quickcheck_macros::quickcheck;
use cmdring::{Record, RecordStore};

fn numbered(i: usize) -> Record {
	Record::from(format!("command {i}\n").into_bytes())
}

fn live_bytes(store: &RecordStore) -> Vec<Vec<u8>> {
	store.iter().map(|record| record.as_bytes().to_vec()).collect()
}

#[test]
fn starts_empty() {
	let store = RecordStore::with_capacity(4);
	assert_eq!(store.occupied_count(), 0);
	assert_eq!(store.len(), 0);
	assert!(store.is_empty());
	assert!(!store.is_full());
	assert!(store.iter().next().is_none());
	assert!(store.get(0).is_none());
}

#[test]
#[should_panic]
fn zero_capacity_panics() {
	let _ = RecordStore::with_capacity(0);
}

#[test]
fn fills_then_evicts_oldest() {
	let mut store = RecordStore::with_capacity(3);
	for i in 0..3 {
		assert!(store.insert(numbered(i)).is_none(), "no eviction before the store is full");
	}
	assert!(store.is_full());

	let evicted = store.insert(numbered(3)).expect("the oldest record should be evicted");
	assert_eq!(evicted.as_bytes(), b"command 0\n");
	assert!(store.is_full());
	assert_eq!(store.occupied_count(), 3);
	assert_eq!(
		live_bytes(&store),
		[b"command 1\n".to_vec(), b"command 2\n".to_vec(), b"command 3\n".to_vec()]
	);
}

#[test]
fn len_tracks_live_bytes() {
	let mut store = RecordStore::with_capacity(2);
	store.insert(Record::from(b"abc\n".to_vec()));
	assert_eq!(store.len(), 4);
	store.insert(Record::from(b"de\n".to_vec()));
	assert_eq!(store.len(), 7);

	// Evicting "abc\n" trades 4 bytes for 2.
	store.insert(Record::from(b"f\n".to_vec()));
	assert_eq!(store.len(), 5);
}

#[test]
fn iteration_is_restartable() {
	let mut store = RecordStore::with_capacity(3);
	for i in 0..5 {
		store.insert(numbered(i));
	}
	let first: Vec<_> = store.iter().map(Record::as_bytes).collect();
	let again: Vec<_> = store.iter().map(Record::as_bytes).collect();
	assert_eq!(first, again);
	assert_eq!(store.iter().len(), store.occupied_count());
}

#[quickcheck]
fn occupancy_never_exceeds_capacity(commands: Vec<Vec<u8>>, capacity: u8) {
	let capacity = capacity as usize % 8 + 1;
	let mut store = RecordStore::with_capacity(capacity);
	for (i, bytes) in commands.iter().enumerate() {
		store.insert(Record::from(bytes.clone()));
		assert!(store.occupied_count() <= capacity);
		assert_eq!(store.occupied_count(), (i + 1).min(capacity));
		assert_eq!(store.is_full(), store.occupied_count() == capacity);
	}
}

#[quickcheck]
fn iteration_yields_last_records_in_insertion_order(count: u8, capacity: u8) {
	let capacity = capacity as usize % 8 + 1;
	let count = count as usize;
	let mut store = RecordStore::with_capacity(capacity);
	for i in 0..count {
		store.insert(numbered(i));
	}

	let expected: Vec<_> = (count.saturating_sub(capacity)..count)
		.map(|i| format!("command {i}\n").into_bytes())
		.collect();
	assert_eq!(live_bytes(&store), expected);
}

#[quickcheck]
fn eviction_returns_exactly_the_oldest(count: u8, capacity: u8) {
	let capacity = capacity as usize % 8 + 1;
	let count = count as usize;
	let mut store = RecordStore::with_capacity(capacity);
	for i in 0..count {
		let evicted = store.insert(numbered(i));
		if i < capacity {
			assert_eq!(evicted, None);
		} else {
			let oldest = format!("command {}\n", i - capacity).into_bytes();
			assert_eq!(evicted, Some(Record::from(oldest.clone())));
			// The evicted record never shows up in later iteration.
			assert!(store.iter().all(|record| record.as_bytes() != oldest.as_slice()));
		}
	}
}

#[quickcheck]
fn total_len_is_the_sum_of_live_record_lengths(commands: Vec<Vec<u8>>, capacity: u8) {
	let capacity = capacity as usize % 8 + 1;
	let mut store = RecordStore::with_capacity(capacity);
	for bytes in commands {
		store.insert(Record::from(bytes));
		let expected: usize = store.iter().map(Record::len).sum();
		assert_eq!(store.len(), expected);
	}
}
