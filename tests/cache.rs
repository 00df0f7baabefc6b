// tests/cache.rs
mod common;

use std::path::PathBuf;

use common::{MapTransport, BIO_BABIS, BIO_NOVAK, SESSION_INDEX};
use steno_scrape::error::CrawlError;
use steno_scrape::store::PageCache;

#[test]
fn second_fetch_is_served_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = PageCache::new(dir.path(), MapTransport::new().with(SESSION_INDEX, "<p>index</p>"));

    let a = cache.fetch(SESSION_INDEX).unwrap();
    let b = cache.fetch(SESSION_INDEX).unwrap();
    assert_eq!(a, b);
    assert_eq!(cache.transport().calls(), 1);
    assert_eq!(cache.misses(), 1);
    assert!(cache.contains(SESSION_INDEX));
}

#[test]
fn cache_survives_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut first = PageCache::new(dir.path(), MapTransport::new().with(SESSION_INDEX, "body"));
        first.fetch(SESSION_INDEX).unwrap();
    }
    // Second run has no network at all
    let mut second = PageCache::new(dir.path(), MapTransport::new());
    assert_eq!(second.fetch(SESSION_INDEX).unwrap(), "body");
    assert_eq!(second.transport().calls(), 0);
    assert_eq!(second.misses(), 0);
}

#[test]
fn failed_fetch_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = PageCache::new(dir.path(), MapTransport::new());

    let err = cache.fetch(SESSION_INDEX).unwrap_err();
    assert!(matches!(err, CrawlError::Status { status: 404, .. }));
    assert!(!err.is_fatal());
    assert!(!cache.contains(SESSION_INDEX));

    // Retried on the next call
    let _ = cache.fetch(SESSION_INDEX);
    assert_eq!(cache.transport().calls(), 2);
}

#[test]
fn paths_mirror_the_archive() {
    let cache = PageCache::new("root", MapTransport::new());
    assert_eq!(
        cache.relative_path(SESSION_INDEX).unwrap(),
        PathBuf::from("eknih/2017ps/stenprot/005schuz/index.htm#")
    );
    assert_eq!(
        cache.relative_path("http://www.psp.cz/eknih/2017ps/stenprot/005schuz/s005001.htm#r2").unwrap(),
        PathBuf::from("eknih/2017ps/stenprot/005schuz/s005001.htm#")
    );
    assert_eq!(cache.relative_path(BIO_NOVAK).unwrap(), PathBuf::from("sqw/detail.sqw_id_1#"));
    // Foreign hosts keep their host name
    assert_eq!(
        cache.relative_path(BIO_BABIS).unwrap(),
        PathBuf::from("www.vlada.cz/cz/vlada/babis/index.html#")
    );
    assert_eq!(cache.path_for(SESSION_INDEX).unwrap(), PathBuf::from("root/eknih/2017ps/stenprot/005schuz/index.htm#"));
}

#[test]
fn page_and_directory_of_the_same_name_coexist() {
    let dir = tempfile::tempdir().unwrap();
    let page = "https://www.vlada.cz/cz/vlada/babis";
    let child = "https://www.vlada.cz/cz/vlada/babis/zivotopis/";
    let mut cache = PageCache::new(dir.path(), MapTransport::new().with(page, "page").with(child, "child"));

    assert_eq!(cache.fetch(page).unwrap(), "page");
    assert_eq!(cache.fetch(child).unwrap(), "child");
    // Reverse order on a fresh root
    let other = tempfile::tempdir().unwrap();
    let mut rev = PageCache::new(other.path(), MapTransport::new().with(page, "page").with(child, "child"));
    assert_eq!(rev.fetch(child).unwrap(), "child");
    assert_eq!(rev.fetch(page).unwrap(), "page");

    assert!(cache.contains(page) && cache.contains(child));
    assert_eq!(cache.fetch(page).unwrap(), "page");
    assert_eq!(cache.transport().calls(), 2);
    assert_eq!(
        cache.relative_path(page).unwrap(),
        PathBuf::from("www.vlada.cz/cz/vlada/babis#")
    );
}

#[test]
fn parent_segments_are_rejected() {
    let cache = PageCache::new("root", MapTransport::new()).with_strip_prefix("http://x/");
    assert!(matches!(cache.relative_path("http://x/a/../../etc/passwd"), Err(CrawlError::Parse { .. })));
}

#[test]
fn disk_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    // Cache root is a regular file, so nothing can be stored below it
    let root = dir.path().join("blocked");
    std::fs::write(&root, "x").unwrap();

    let mut cache = PageCache::new(&root, MapTransport::new().with(SESSION_INDEX, "body"));
    let err = cache.fetch(SESSION_INDEX).unwrap_err();
    assert!(matches!(err, CrawlError::CacheIo { .. }));
    assert!(err.is_fatal());
}
