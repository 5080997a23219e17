use planbook_core::repo::bucket_repo::{decode_item, decode_place, decode_work};
use planbook_core::{
    BucketRepository, Category, Deadline, GraphBucketRepository, GraphStore, GraphUserRepository,
    Item, OfficeWork, Place, Priority, RepoError, UserRepository,
};

fn store_with_user(user_id: &str) -> GraphStore {
    let mut store = GraphStore::open_in_memory().unwrap();
    GraphUserRepository::new(&mut store)
        .create_user("Asha", 29, user_id, "pw")
        .unwrap();
    store
}

#[test]
fn added_item_comes_back_decoded() {
    let mut store = store_with_user("asha@mail.test");
    let mut buckets = GraphBucketRepository::new(&mut store);

    let item = Item::new("rice", 2, "kg");
    buckets.add_item("asha@mail.test", &item).unwrap();

    let rows = buckets
        .list_category("asha@mail.test", Category::Shopping)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(decode_item(&rows[0]).unwrap(), item);
}

#[test]
fn removing_an_item_detaches_it_completely() {
    let mut store = store_with_user("asha@mail.test");
    let baseline_edges = store.count_edges().unwrap();
    let mut buckets = GraphBucketRepository::new(&mut store);

    buckets
        .add_item("asha@mail.test", &Item::new("rice", 2, "kg"))
        .unwrap();
    buckets.remove_item("asha@mail.test", "rice").unwrap();

    assert!(buckets
        .list_category("asha@mail.test", Category::Shopping)
        .unwrap()
        .is_empty());
    drop(buckets);
    assert_eq!(store.count_nodes("Item").unwrap(), 0);
    // The CONTAINS edge must not survive its leaf node.
    assert_eq!(store.count_edges().unwrap(), baseline_edges);
}

#[test]
fn removal_deletes_every_entry_with_the_same_key() {
    let mut store = store_with_user("asha@mail.test");
    let mut buckets = GraphBucketRepository::new(&mut store);

    buckets
        .add_item("asha@mail.test", &Item::new("rice", 2, "kg"))
        .unwrap();
    buckets
        .add_item("asha@mail.test", &Item::new("rice", 5, "kg"))
        .unwrap();
    buckets.remove_item("asha@mail.test", "rice").unwrap();

    assert!(buckets
        .list_category("asha@mail.test", Category::Shopping)
        .unwrap()
        .is_empty());
}

#[test]
fn removing_a_missing_key_under_an_existing_user_is_a_no_op() {
    let mut store = store_with_user("asha@mail.test");
    let mut buckets = GraphBucketRepository::new(&mut store);

    buckets
        .add_item("asha@mail.test", &Item::new("rice", 2, "kg"))
        .unwrap();
    buckets.remove_item("asha@mail.test", "beans").unwrap();

    assert_eq!(
        buckets
            .list_category("asha@mail.test", Category::Shopping)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn edits_for_a_missing_owner_fail_with_user_not_found() {
    let mut store = store_with_user("asha@mail.test");
    let mut buckets = GraphBucketRepository::new(&mut store);

    let err = buckets
        .add_item("ghost@mail.test", &Item::new("rice", 2, "kg"))
        .unwrap_err();
    assert!(matches!(err, RepoError::UserNotFound(_)));

    let err = buckets.remove_item("ghost@mail.test", "rice").unwrap_err();
    assert!(matches!(err, RepoError::UserNotFound(_)));
}

#[test]
fn buckets_of_different_users_stay_isolated() {
    let mut store = GraphStore::open_in_memory().unwrap();
    {
        let mut users = GraphUserRepository::new(&mut store);
        users.create_user("Asha", 29, "asha@mail.test", "pw").unwrap();
        users.create_user("Ben", 34, "ben@mail.test", "pw").unwrap();
    }
    let mut buckets = GraphBucketRepository::new(&mut store);

    buckets
        .add_item("asha@mail.test", &Item::new("rice", 2, "kg"))
        .unwrap();
    buckets
        .add_item("ben@mail.test", &Item::new("rice", 9, "kg"))
        .unwrap();
    buckets.remove_item("asha@mail.test", "rice").unwrap();

    assert!(buckets
        .list_category("asha@mail.test", Category::Shopping)
        .unwrap()
        .is_empty());
    let rows = buckets
        .list_category("ben@mail.test", Category::Shopping)
        .unwrap();
    assert_eq!(decode_item(&rows[0]).unwrap().quantity, 9);
}

#[test]
fn place_and_work_entries_round_trip_decoded() {
    let mut store = store_with_user("asha@mail.test");
    let mut buckets = GraphBucketRepository::new(&mut store);

    let place = Place::new("Paris", "France", 1200.5);
    buckets.add_place("asha@mail.test", &place).unwrap();
    let work = OfficeWork::new(
        "quarterly report",
        Priority::High,
        Deadline::parse("05-09-2026").unwrap(),
    );
    buckets.add_work("asha@mail.test", &work).unwrap();

    let travel = buckets
        .list_category("asha@mail.test", Category::Travel)
        .unwrap();
    assert_eq!(decode_place(&travel[0]).unwrap(), place);

    let works = buckets
        .list_category("asha@mail.test", Category::Work)
        .unwrap();
    assert_eq!(decode_work(&works[0]).unwrap(), work);
}

#[test]
fn invalid_entities_never_reach_the_store() {
    let mut store = store_with_user("asha@mail.test");
    let mut buckets = GraphBucketRepository::new(&mut store);

    assert!(buckets
        .add_item("asha@mail.test", &Item::new("", 2, "kg"))
        .is_err());
    assert!(buckets
        .add_item("asha@mail.test", &Item::new("rice", 0, "kg"))
        .is_err());
    assert!(buckets
        .add_place("asha@mail.test", &Place::new("Paris", "France", -1.0))
        .is_err());

    assert!(buckets
        .list_category("asha@mail.test", Category::Shopping)
        .unwrap()
        .is_empty());
    assert!(buckets
        .list_category("asha@mail.test", Category::Travel)
        .unwrap()
        .is_empty());
}
