use std::cell::RefCell;
use std::rc::Rc;
use taskboard_core::{Project, ProjectStatus, ProjectStore, Snapshot, Subscription};

fn recording_listener(store: &ProjectStore) -> (Rc<RefCell<Vec<Snapshot>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = store.subscribe(move |snapshot: &Snapshot| {
        sink.borrow_mut().push(Rc::clone(snapshot));
    });
    (seen, subscription)
}

#[test]
fn add_project_increments_count_and_starts_active() {
    let store = ProjectStore::new();
    let inputs = [
        ("Website", "Build site", 3),
        ("Docs", "Write the handbook", 1),
        ("Launch", "Plan launch event", 12),
    ];

    for (index, (title, description, people)) in inputs.into_iter().enumerate() {
        let id = store.add_project(title, description, people);
        assert_eq!(store.len(), index + 1);

        let project = store.get(id).expect("added project");
        assert_eq!(project.status(), ProjectStatus::Active);
        assert_eq!(project.title(), title);
        assert_eq!(project.description(), description);
        assert_eq!(project.people_count(), people);
    }
}

#[test]
fn add_project_publishes_full_snapshot() {
    let store = ProjectStore::new();
    let (seen, _subscription) = recording_listener(&store);

    store.add_project("a", "first", 1);
    store.add_project("b", "second", 2);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].len(), 1);
    assert_eq!(seen[1].len(), 2);
}

#[test]
fn change_status_to_same_status_does_not_publish() {
    let store = ProjectStore::new();
    let id = store.add_project("Website", "Build site", 3);
    let (seen, _subscription) = recording_listener(&store);

    assert!(!store.change_status(id, ProjectStatus::Active));
    assert!(seen.borrow().is_empty());
}

#[test]
fn change_status_on_unknown_id_is_silent_noop() {
    let store = ProjectStore::new();
    store.add_project("Website", "Build site", 3);
    let before = store.snapshot();
    let (seen, _subscription) = recording_listener(&store);

    let stranger = Project::new("Other", "Not in store", 1);
    assert!(!store.change_status(stranger.id(), ProjectStatus::Finished));

    assert!(seen.borrow().is_empty());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn remove_unknown_project_keeps_contents_but_publishes() {
    let store = ProjectStore::new();
    store.add_project("Website", "Build site", 3);
    let (seen, _subscription) = recording_listener(&store);

    let stranger = Project::new("Other", "Not in store", 1);
    assert!(!store.remove_project(&stranger));

    assert_eq!(store.len(), 1);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].len(), 1);
}

#[test]
fn remove_known_project_deletes_and_publishes() {
    let store = ProjectStore::new();
    let id = store.add_project("Website", "Build site", 3);
    let project = store.get(id).expect("added project");
    let (seen, _subscription) = recording_listener(&store);

    assert!(store.remove_project(&project));

    assert!(store.is_empty());
    assert_eq!(seen.borrow().len(), 1);
    assert!(seen.borrow()[0].is_empty());
}

#[test]
fn listeners_are_notified_in_subscription_order() {
    let store = ProjectStore::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let subscriptions: Vec<Subscription> = (0..5)
        .map(|index| {
            let order = Rc::clone(&order);
            store.subscribe(move |_: &Snapshot| order.borrow_mut().push(index))
        })
        .collect();

    store.add_project("Website", "Build site", 3);

    assert_eq!(subscriptions.len(), 5);
    assert_eq!(*order.borrow(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn delivered_snapshot_is_not_affected_by_later_mutations() {
    let store = ProjectStore::new();
    let (seen, _subscription) = recording_listener(&store);

    let id = store.add_project("Website", "Build site", 3);
    let delivered = Rc::clone(&seen.borrow()[0]);

    store.change_status(id, ProjectStatus::Finished);
    store.add_project("Docs", "Write the handbook", 1);

    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].status(), ProjectStatus::Active);
    assert_eq!(store.get(id).map(|p| p.status()), Some(ProjectStatus::Finished));
}

#[test]
fn website_scenario_add_finish_and_idempotent_refinish() {
    let store = ProjectStore::new();
    assert!(store.is_empty());
    let (seen, _subscription) = recording_listener(&store);

    let id = store.add_project("Website", "Build site", 3);
    {
        let seen = seen.borrow();
        let latest = seen.last().expect("publish after add");
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].status(), ProjectStatus::Active);
    }

    assert!(store.change_status(id, ProjectStatus::Finished));
    let calls_after_finish = seen.borrow().len();
    {
        let seen = seen.borrow();
        let latest = seen.last().expect("publish after status change");
        assert_eq!(latest.len(), 1);
        let project = &latest[0];
        assert_eq!(project.id(), id);
        assert_eq!(project.title(), "Website");
        assert_eq!(project.description(), "Build site");
        assert_eq!(project.people_count(), 3);
        assert_eq!(project.status(), ProjectStatus::Finished);
    }

    assert!(!store.change_status(id, ProjectStatus::Finished));
    assert_eq!(seen.borrow().len(), calls_after_finish);
}

#[test]
fn failing_listener_does_not_block_later_listeners() {
    let store = ProjectStore::new();
    let _failing = store.subscribe(|_: &Snapshot| panic!("listener bug"));
    let (seen, _subscription) = recording_listener(&store);

    store.add_project("Website", "Build site", 3);

    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn instance_returns_the_same_store() {
    let first = ProjectStore::instance();
    let second = ProjectStore::instance();
    assert!(Rc::ptr_eq(&first, &second));

    let id = first.add_project("Shared", "Visible through both handles", 2);
    assert!(second.get(id).is_some());
}

#[test]
fn explicit_stores_are_independent() {
    let first = ProjectStore::new();
    let second = ProjectStore::new();

    first.add_project("Website", "Build site", 3);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}
