use segchain::{get_budget, set_budget, MemoryBudget, SegmentChain, DEFAULT_BUDGET};

// One test per binary: the process-wide budget is shared by all tests in it.
#[test]
fn test_process_wide_budget() {
    assert_eq!(get_budget(), DEFAULT_BUDGET);
    assert_eq!(DEFAULT_BUDGET, 1024 * 1024 * 1024);

    let mut chain = SegmentChain::new();
    chain.append_literal("abcde").unwrap();
    let pinned = chain.clone().with_budget(MemoryBudget::new(1024));

    set_budget(10);
    assert_eq!(get_budget(), 10);
    assert_eq!(MemoryBudget::default().bytes(), 10);
    assert_eq!(chain.extract(0, 6).unwrap(), b"abcde");

    set_budget(5);
    assert!(chain.extract(0, 6).is_err());
    assert_eq!(pinned.extract(0, 6).unwrap(), b"abcde");

    set_budget(DEFAULT_BUDGET);
    assert_eq!(chain.to_full_bytes().unwrap(), b"abcde");
}
