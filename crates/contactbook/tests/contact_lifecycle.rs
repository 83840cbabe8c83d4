//! End-to-end lifecycle of a contact store through the public API.

use std::fs;

use contactbook::{filter_contacts, Contact, ContactStore, ErrorKind, IdHint};

fn store_in(dir: &tempfile::TempDir) -> ContactStore {
    ContactStore::new(dir.path().join("contacts.csv"))
}

#[test]
fn test_full_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    for (name, email) in [
        ("Edward", "ed@example.com"),
        ("Ted", "ted@example.com"),
        ("Fred", "fred@example.com"),
        ("Amy", "amy@example.com"),
    ] {
        store.create(name, email, "", IdHint::Unassigned).unwrap();
    }

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "1,Edward,ed@example.com,\n\
         2,Ted,ted@example.com,\n\
         3,Fred,fred@example.com,\n\
         4,Amy,amy@example.com,\n"
    );

    let matches = filter_contacts("ed", store.read_all().unwrap());
    let names: Vec<&str> = matches.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Edward", "Ted", "Fred"]);

    store.update(2, "Teddy", "teddy@example.com", "555").unwrap();
    assert_eq!(
        store.get(2).unwrap(),
        Contact::new(2, "Teddy", "teddy@example.com", "555")
    );

    assert!(store.delete(3).unwrap());
    let ids: Vec<i64> = store.read_all().unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, [1, 2, 4]);

    let next = store
        .create("Zoe", "zoe@example.com", "", IdHint::Unassigned)
        .unwrap();
    assert_eq!(next.id, 5);
}

#[test]
fn test_store_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let created = store_in(&dir)
        .create("Ann", "ann@example.com", "1", IdHint::Unassigned)
        .unwrap();

    let reopened = ContactStore::open(dir.path().join("contacts.csv")).unwrap();
    assert_eq!(reopened.get(created.id).unwrap(), created);
}

#[test]
fn test_error_kinds_are_distinguishable() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store
        .create("Ann", "ann@example.com", "", IdHint::Unassigned)
        .unwrap();

    let not_found = store.get(10).unwrap_err();
    assert_eq!(not_found.kind(), ErrorKind::NotFound);

    let invalid = store
        .update(1, "Ann", "ann.example.com", "")
        .unwrap_err();
    assert_eq!(invalid.kind(), ErrorKind::Validation);

    let sentinel = store
        .create("Bob", "bob@example.com", "", IdHint::from(-1))
        .unwrap();
    assert_eq!(sentinel.id, 2);
}

#[test]
fn test_unreadable_store_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be cannot be read as CSV
    let path = dir.path().join("contacts.csv");
    fs::create_dir(&path).unwrap();

    let err = ContactStore::new(&path).read_all().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
