use segchain::{SegChainError, Segment, SegmentKind};

fn examples(start: u64, size: u64) -> Vec<Segment> {
    SegmentKind::ALL
        .iter()
        .map(|kind| Segment::example(*kind, start, size).unwrap())
        .collect()
}

#[test]
fn test_example_sizes_and_kinds() {
    for kind in SegmentKind::ALL {
        let segment = Segment::example(kind, 10, 20).unwrap();
        assert_eq!(segment.kind(), kind);
        assert_eq!(segment.start(), 10);
        assert_eq!(segment.size(), 20);
        assert_eq!(segment.stop(), 30);
        assert_eq!(segment.to_full_bytes().len(), 20);
    }
}

#[test]
fn test_example_rejects_empty() {
    for kind in SegmentKind::ALL {
        assert!(matches!(
            Segment::example(kind, 0, 0),
            Err(SegChainError::InvariantViolation { .. })
        ));
    }
}

#[test]
fn test_intersects() {
    for segment in examples(10, 20) {
        assert!(!segment.intersects(0, 5), "{segment}");
        assert!(!segment.intersects(0, 10), "adjacent on the left: {segment}");
        assert!(segment.intersects(0, 11), "{segment}");
        assert!(segment.intersects(29, 40), "{segment}");
        assert!(!segment.intersects(30, 40), "adjacent on the right: {segment}");
        assert!(segment.intersects(0, 100), "covering: {segment}");
        assert!(segment.intersects(12, 18), "inside: {segment}");
        assert!(!segment.intersects(12, 11), "reversed: {segment}");
    }
}

#[test]
fn test_intersects_zero_length() {
    for segment in examples(10, 20) {
        assert!(segment.intersects(15, 15));
        assert!(!segment.intersects(10, 10));
        assert!(!segment.intersects(30, 30));
    }
}

#[test]
fn test_intersects_segment() {
    let a = Segment::homogeneous(0, 10, b'a').unwrap();
    let b = Segment::homogeneous(10, 10, b'b').unwrap();
    let c = Segment::homogeneous(5, 10, b'c').unwrap();
    assert!(!a.intersects_segment(&b));
    assert!(a.intersects_segment(&c));
    assert!(b.intersects_segment(&c));
}

#[test]
fn test_affected_by() {
    for segment in examples(10, 20) {
        assert!(segment.affected_by(0));
        assert!(segment.affected_by(10));
        assert!(segment.affected_by(29));
        assert!(!segment.affected_by(30));
        assert!(!segment.affected_by(100));
    }
}

#[test]
fn test_cut_from_start() {
    for segment in examples(10, 20) {
        let parts = segment.cut(10, 15).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].start(), 15);
        assert_eq!(parts[0].stop(), 30);
        assert_eq!(parts[0].to_full_bytes(), segment.substring(15, 30).unwrap());
    }
}

#[test]
fn test_cut_to_end() {
    for segment in examples(10, 20) {
        let parts = segment.cut(25, 40).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].start(), 10);
        assert_eq!(parts[0].stop(), 25);
        assert_eq!(parts[0].to_full_bytes(), segment.substring(10, 25).unwrap());
    }
}

#[test]
fn test_cut_middle() {
    for segment in examples(10, 20) {
        let parts = segment.cut(15, 20).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!((parts[0].start(), parts[0].stop()), (10, 15));
        assert_eq!((parts[1].start(), parts[1].stop()), (20, 30));
        assert_eq!(parts[0].to_full_bytes(), segment.substring(10, 15).unwrap());
        assert_eq!(parts[1].to_full_bytes(), segment.substring(20, 30).unwrap());
    }
}

#[test]
fn test_cut_covering_leaves_nothing() {
    for segment in examples(10, 20) {
        assert!(segment.cut(10, 30).unwrap().is_empty());
        assert!(segment.cut(0, 100).unwrap().is_empty());
    }
}

#[test]
fn test_cut_disjoint_is_error() {
    for segment in examples(10, 20) {
        assert_eq!(
            segment.cut(0, 5),
            Err(SegChainError::InvalidRange {
                start: 0,
                stop: 5,
                segment_start: 10,
                segment_stop: 30,
            })
        );
        assert!(segment.cut(30, 35).is_err());
    }
}

#[test]
fn test_cut_at() {
    for segment in examples(10, 20) {
        let (left, right) = segment.cut_at(22).unwrap();
        let left = left.unwrap();
        let right = right.unwrap();
        assert_eq!((left.start(), left.stop()), (10, 22));
        assert_eq!((right.start(), right.stop()), (22, 30));
        let mut joined = left.to_full_bytes();
        joined.extend(right.to_full_bytes());
        assert_eq!(joined, segment.to_full_bytes());

        assert_eq!(segment.cut_at(10).unwrap(), (None, Some(segment.clone())));
        assert_eq!(segment.cut_at(30).unwrap(), (Some(segment.clone()), None));
        assert!(segment.cut_at(9).is_err());
        assert!(segment.cut_at(31).is_err());
    }
}

#[test]
fn test_copy_keeps_content() {
    for segment in examples(10, 20) {
        let moved = segment.copy(1000).unwrap();
        assert_eq!(moved.start(), 1000);
        assert_eq!(moved.size(), 20);
        assert_eq!(moved.to_full_bytes(), segment.to_full_bytes());
    }
}

#[test]
fn test_copy_overflow() {
    let segment = Segment::homogeneous(0, 10, 0).unwrap();
    assert_eq!(
        segment.copy(u64::MAX - 5),
        Err(SegChainError::OffsetOverflow {
            start: u64::MAX - 5,
            size: 10,
        })
    );
}

#[test]
fn test_substring_bounds() {
    for segment in examples(10, 20) {
        assert!(segment.substring(10, 30).is_ok());
        assert!(segment.substring(15, 15).unwrap().is_empty());
        assert!(matches!(
            segment.substring(5, 15),
            Err(SegChainError::InvalidRange { .. })
        ));
        assert!(segment.substring(20, 31).is_err());
        assert!(segment.substring(20, 19).is_err());
    }
}

#[test]
fn test_constructor_errors() {
    assert!(matches!(
        Segment::literal(0, ""),
        Err(SegChainError::InvariantViolation { .. })
    ));
    assert!(matches!(
        Segment::homogeneous(0, 0, b'x'),
        Err(SegChainError::InvariantViolation { .. })
    ));
    assert!(matches!(
        Segment::periodic(0, 5, ""),
        Err(SegChainError::InvariantViolation { .. })
    ));
    assert!(matches!(
        Segment::homogeneous(u64::MAX, 2, 0),
        Err(SegChainError::OffsetOverflow { .. })
    ));
}

#[test]
fn test_literal_content_and_search() {
    let segment = Segment::literal(5, "hello world").unwrap();
    assert_eq!(segment.stop(), 16);
    assert_eq!(segment.substring(11, 16).unwrap(), b"world");
    assert_eq!(segment.search(b"world", 0, 100, false), Ok(11));
    assert_eq!(segment.search(b"world", 0, 100, true), Ok(16));
    assert_eq!(segment.search(b"o", 10, 16, false), Ok(12));
    assert_eq!(
        segment.search(b"world", 0, 15, false),
        Err(SegChainError::NotFound { start: 0, stop: 15 })
    );
}

#[test]
fn test_homogeneous_content_and_search() {
    let segment = Segment::homogeneous(0, 10, b'x').unwrap();
    assert_eq!(segment.to_full_bytes(), b"xxxxxxxxxx");
    assert_eq!(segment.search(b"xxx", 0, 10, false), Ok(0));
    assert_eq!(segment.search(b"xx", 4, 10, true), Ok(6));
    assert!(segment.search(b"xxx", 8, 10, false).is_err());
    assert!(segment.search(b"xy", 0, 10, false).is_err());
}

#[test]
fn test_homogeneous_huge() {
    let segment = Segment::homogeneous(0, 1 << 40, b'z').unwrap();
    assert_eq!(segment.substring((1 << 40) - 3, 1 << 40).unwrap(), b"zzz");
    assert_eq!(
        segment.search(b"zzzz", (1 << 40) - 4, 1 << 40, false),
        Ok((1 << 40) - 4)
    );
}

#[test]
fn test_periodic_search() {
    let segment = Segment::periodic(3, 333, "abcd").unwrap();
    assert_eq!(segment.search(b"cdab", 3, 336, false), Ok(5));
    assert_eq!(segment.search(b"dabcdabcd", 3, 336, false), Ok(6));
    assert_eq!(segment.search(b"a", 4, 336, false), Ok(7));
    assert_eq!(segment.search(b"abcd", 300, 336, true), Ok(307));
    assert!(segment.search(b"abca", 3, 336, false).is_err());
    assert!(segment.search(b"dab", 333, 336, false).is_err());
}

#[test]
fn test_periodic_substring_matches_pattern() {
    let segment = Segment::periodic(0, 100, "abc").unwrap();
    let expected: Vec<u8> = (5..50).map(|i| b"abc"[i % 3]).collect();
    assert_eq!(segment.substring(5, 50).unwrap(), expected);
    assert_eq!(segment.substring(1, 3).unwrap(), b"bc");
}

#[test]
fn test_periodic_tail_rotates_pattern() {
    let segment = Segment::periodic(3, 10, "abcd").unwrap();
    let parts = segment.cut(3, 4).unwrap();
    assert_eq!(parts.len(), 1);
    let Segment::Periodic(tail) = &parts[0] else {
        panic!("expected a periodic segment, got {}", parts[0]);
    };
    assert_eq!(tail.pattern().as_ref(), b"bcda");
    assert_eq!(parts[0].to_full_bytes(), b"bcdabcdab");
}

#[test]
fn test_periodic_copy_does_not_rotate() {
    let segment = Segment::periodic(0, 6, "abcd").unwrap();
    let moved = segment.copy(1).unwrap();
    assert_eq!(moved.to_full_bytes(), b"abcdab");
}

#[test]
fn test_huge_periodic() {
    let size = 10 * 1024 * 1024 * 1024;
    let segment = Segment::periodic(0, size, "Hello, World!\n").unwrap();
    assert_eq!(segment.substring(0, 5).unwrap(), b"Hello");
    // 14 * 766958445 = 10737418230, ten bytes short of the end.
    assert_eq!(segment.substring(size - 10, size).unwrap(), b"Hello, Wor");
}

#[test]
fn test_read_line() {
    let segment = Segment::literal(0, "ab\ncd").unwrap();
    assert_eq!(segment.read_line(0).unwrap(), b"ab\n");
    assert_eq!(segment.read_line(2).unwrap(), b"\n");
    assert_eq!(segment.read_line(3).unwrap(), b"cd");
    assert!(segment.read_line(5).is_err());
}

#[test]
fn test_display() {
    let segment = Segment::homogeneous(1, 2, 0).unwrap();
    assert_eq!(segment.to_string(), "Homogeneous(start=1, stop=3)");
}
