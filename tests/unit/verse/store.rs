use super::*;

fn collection(verses: &[&str]) -> VerseCollection {
    VerseCollection::from(verses.iter().map(|s| s.to_string()).collect::<Vec<_>>())
}

#[test]
fn from_json_parses_array_of_strings() {
    let v = VerseCollection::from_json_bytes(br#"["Prva", "Druga"]"#).unwrap();
    assert_eq!(v.len(), 2);
    assert!(!v.is_empty());
}

#[test]
fn from_json_rejects_malformed_source() {
    let err = VerseCollection::from_json_bytes(b"{not json").unwrap_err();
    assert!(matches!(err, crate::BoothError::VerseLoad(_)));

    let err = VerseCollection::from_json_bytes(br#"[1, 2, 3]"#).unwrap_err();
    assert!(matches!(err, crate::BoothError::VerseLoad(_)));
}

#[test]
fn empty_collection_is_inert() {
    let mut store = VerseStore::new(VerseCollection::default());
    assert_eq!(store.current(), None);
    assert_eq!(store.advance(), None);
    assert_eq!(store.current(), None);
}

#[test]
fn advance_wraps_cyclically() {
    let mut store = VerseStore::new(collection(&["a", "b", "c"]));
    assert_eq!(store.current(), Some("a"));
    assert_eq!(store.advance(), Some("b"));
    assert_eq!(store.advance(), Some("c"));
    assert_eq!(store.advance(), Some("a"));
}

#[test]
fn n_advances_return_to_start() {
    for n in 1..=5usize {
        let verses: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
        let mut store = VerseStore::new(VerseCollection::from(verses));
        let start = store.current().unwrap().to_string();
        for _ in 0..n {
            store.advance();
        }
        assert_eq!(store.current(), Some(start.as_str()));
    }
}

#[test]
fn k_advances_land_on_k_mod_n() {
    let n = 4usize;
    let verses: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
    for k in 0..13usize {
        let mut store = VerseStore::new(VerseCollection::from(verses.clone()));
        for _ in 0..k {
            store.advance();
        }
        assert_eq!(store.current(), Some(format!("v{}", k % n).as_str()));
    }
}
