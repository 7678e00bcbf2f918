use medrec::common::{MedrecError, PatientId};
use medrec::record::Patient;
use medrec::store::RecordStore;

use rand::seq::SliceRandom;

fn patient(id: u32) -> Patient {
    Patient::new(PatientId::new(id), format!("Patient {}", id), 30, "Flu")
}

fn ids(store: &RecordStore) -> Vec<u32> {
    store.iter().map(|p| p.id().as_u32()).collect()
}

#[test]
fn test_enumeration_ascending_for_any_insert_order() {
    let orders: [&[u32]; 4] = [
        &[1, 2, 3, 4, 5],         // right-degenerate chain
        &[5, 4, 3, 2, 1],         // left-degenerate chain
        &[3, 1, 5, 2, 4],         // balanced-ish
        &[10, 90, 20, 80, 30, 70, 40, 60, 50], // zig-zag
    ];

    for order in orders {
        let mut store = RecordStore::new();
        for &id in order {
            store.insert(patient(id)).unwrap();
        }

        let mut expected: Vec<u32> = order.to_vec();
        expected.sort_unstable();
        assert_eq!(ids(&store), expected, "order {:?}", order);
    }
}

#[test]
fn test_enumeration_ascending_under_random_insert_order() {
    let mut rng = rand::thread_rng();
    let mut order: Vec<u32> = (0..500).collect();
    order.shuffle(&mut rng);

    let mut store = RecordStore::new();
    for &id in &order {
        store.insert(patient(id)).unwrap();
    }

    let expected: Vec<u32> = (0..500).collect();
    assert_eq!(ids(&store), expected);
}

#[test]
fn test_search_after_insert() {
    let mut store = RecordStore::new();
    for id in [42, 7, 100, 55] {
        store.insert(patient(id)).unwrap();
    }

    for id in [42, 7, 100, 55] {
        let found = store.get(PatientId::new(id)).unwrap();
        assert_eq!(found.id(), PatientId::new(id));
        assert_eq!(found.name, format!("Patient {}", id));
    }
    assert!(store.get(PatientId::new(999)).is_none());
}

#[test]
fn test_remove_preserves_ascending_order() {
    let mut store = RecordStore::new();
    for id in [50, 25, 75, 10, 35, 60, 90, 30, 40] {
        store.insert(patient(id)).unwrap();
    }

    // 25 has two children; its predecessor (10's subtree max) splices in.
    store.remove(PatientId::new(25)).unwrap();
    assert!(store.get(PatientId::new(25)).is_none());
    assert_eq!(ids(&store), vec![10, 30, 35, 40, 50, 60, 75, 90]);

    // Remove the root (two children) as well.
    store.remove(PatientId::new(50)).unwrap();
    assert_eq!(ids(&store), vec![10, 30, 35, 40, 60, 75, 90]);

    let err = store.remove(PatientId::new(25)).unwrap_err();
    assert!(matches!(err, MedrecError::PatientNotFound(_)));
}

#[test]
fn test_remove_every_record_in_random_order() {
    let mut rng = rand::thread_rng();
    let mut order: Vec<u32> = (0..100).collect();
    order.shuffle(&mut rng);

    let mut store = RecordStore::new();
    for &id in &order {
        store.insert(patient(id)).unwrap();
    }

    let mut removal: Vec<u32> = (0..100).collect();
    removal.shuffle(&mut rng);

    for (i, &id) in removal.iter().enumerate() {
        store.remove(PatientId::new(id)).unwrap();
        assert_eq!(store.len(), 100 - i - 1);

        // Remaining records stay in ascending order after every removal.
        let remaining = ids(&store);
        let mut sorted = remaining.clone();
        sorted.sort_unstable();
        assert_eq!(remaining, sorted);
    }
    assert!(store.is_empty());
}

#[test]
fn test_duplicate_insert_leaves_original_intact() {
    let mut store = RecordStore::new();
    store
        .insert(Patient::new(PatientId::new(1), "Asha Rao", 34, "Flu"))
        .unwrap();

    let err = store
        .insert(Patient::new(PatientId::new(1), "Impostor", 99, "None"))
        .unwrap_err();
    assert!(matches!(err, MedrecError::DuplicateId(_)));

    let kept = store.get(PatientId::new(1)).unwrap();
    assert_eq!(kept.name, "Asha Rao");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_iterator_is_restartable() {
    let mut store = RecordStore::new();
    for id in [2, 1, 3] {
        store.insert(patient(id)).unwrap();
    }

    let first: Vec<u32> = store.iter().map(|p| p.id().as_u32()).collect();
    let second: Vec<u32> = store.iter().map(|p| p.id().as_u32()).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![1, 2, 3]);
}
