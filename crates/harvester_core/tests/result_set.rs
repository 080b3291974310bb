use harvester_core::ResultSet;

#[test]
fn merging_the_same_url_twice_is_idempotent() {
    let mut once = ResultSet::new();
    once.merge(["http://x.com/a"]);

    let mut twice = ResultSet::new();
    assert_eq!(twice.merge(["http://x.com/a"]), 1);
    assert_eq!(twice.merge(["http://x.com/a"]), 0);

    assert_eq!(once.len(), twice.len());
    assert_eq!(once, twice);
}

#[test]
fn iteration_is_lexicographic() {
    let set: ResultSet = ["http://x.com/b", "http://x.com/a", "http://x.com/b"]
        .into_iter()
        .collect();

    assert_eq!(
        set.iter_sorted().collect::<Vec<_>>(),
        vec!["http://x.com/a", "http://x.com/b"]
    );
    assert!(set.contains("http://x.com/a"));
}
