// SPDX-License-Identifier: Apache-2.0

use pretty_assertions::assert_eq;
use quickcheck_macros::quickcheck;
use cmdring::CommandAssembler;

#[test]
fn buffers_until_a_newline_arrives() {
	let mut assembler = CommandAssembler::new();
	assert!(assembler.append(b"abc").unwrap().is_empty());
	assert_eq!(assembler.pending(), b"abc");

	let records = assembler.append(b"def\n").unwrap();
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].as_bytes(), b"abcdef\n");
	assert!(!assembler.has_pending());

	let records = assembler.append(b"ghi\n").unwrap();
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].as_bytes(), b"ghi\n");
	assert!(!assembler.has_pending());
}

#[test]
fn splits_every_newline_in_one_chunk() {
	let mut assembler = CommandAssembler::new();
	let records = assembler.append(b"x\ny\nz").unwrap();
	assert_eq!(records.len(), 2);
	assert_eq!(records[0].as_bytes(), b"x\n");
	assert_eq!(records[1].as_bytes(), b"y\n");
	assert_eq!(assembler.pending(), b"z");
}

#[test]
fn a_lone_newline_commits_a_one_byte_record() {
	let mut assembler = CommandAssembler::new();
	let records = assembler.append(b"\n").unwrap();
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].as_bytes(), b"\n");
	assert!(!assembler.has_pending());
}

#[test]
fn unterminated_chunks_accumulate_across_calls() {
	let mut assembler = CommandAssembler::new();
	for chunk in [&b"a"[..], b"b", b"c"] {
		assert!(assembler.append(chunk).unwrap().is_empty());
	}
	assert_eq!(assembler.pending(), b"abc");

	let records = assembler.append(b"\nrest").unwrap();
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].as_bytes(), b"abc\n");
	assert_eq!(assembler.pending(), b"rest");
}

#[quickcheck]
fn committed_plus_pending_reconstructs_the_input(chunks: Vec<Vec<u8>>) {
	let mut assembler = CommandAssembler::new();
	let mut committed = Vec::new();
	for chunk in &chunks {
		for record in assembler.append(chunk).unwrap() {
			// Every committed record is newline-terminated, with that
			// newline its only one.
			assert_eq!(record.as_bytes().last(), Some(&b'\n'));
			let newlines = record.iter().filter(|&&byte| byte == b'\n').count();
			assert_eq!(newlines, 1);
			committed.extend_from_slice(&record);
		}
		assert!(!assembler.pending().contains(&b'\n'));
	}

	committed.extend_from_slice(assembler.pending());
	let input: Vec<u8> = chunks.concat();
	assert_eq!(committed, input);
}
