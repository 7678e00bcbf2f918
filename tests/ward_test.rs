use medrec::common::{BedSlot, MedrecError, PatientId, WardConfig, DEFAULT_WARD_CAPACITY};
use medrec::record::Patient;
use medrec::ward::BedAllocator;

fn patient(id: u32) -> Patient {
    Patient::new(PatientId::new(id), format!("Patient {}", id), 40, "Asthma")
}

#[test]
fn test_default_capacity_is_fifty() {
    let ward = BedAllocator::default();
    assert_eq!(ward.capacity(), DEFAULT_WARD_CAPACITY);
    assert_eq!(ward.available(), 50);
}

#[test]
fn test_lowest_free_slot_wins() {
    let mut ward = BedAllocator::default();
    let mut a = patient(1);
    let mut b = patient(2);
    let mut c = patient(3);

    // Slots 0 and 1 occupied; the next assignment must land on slot 2.
    ward.assign(&mut a).unwrap();
    ward.assign(&mut b).unwrap();
    assert_eq!(ward.assign(&mut c).unwrap(), BedSlot::new(2));
}

#[test]
fn test_freed_slot_is_reused_first() {
    let mut ward = BedAllocator::default();
    let mut patients: Vec<Patient> = (1..=5).map(patient).collect();
    for p in patients.iter_mut() {
        ward.assign(p).unwrap();
    }

    // Free slot 1; it is the lowest free slot and must be taken next.
    ward.discharge(&mut patients[1]).unwrap();
    let mut late = patient(6);
    assert_eq!(ward.assign(&mut late).unwrap(), BedSlot::new(1));
}

#[test]
fn test_ward_full_at_fifty_one() {
    let mut ward = BedAllocator::default();
    let mut admitted: Vec<Patient> = (1..=50).map(patient).collect();

    for (i, p) in admitted.iter_mut().enumerate() {
        let slot = ward.assign(p).unwrap();
        assert_eq!(slot, BedSlot::new(i as u16));
    }
    assert_eq!(ward.available(), 0);

    let mut unlucky = patient(51);
    let err = ward.assign(&mut unlucky).unwrap_err();
    assert!(matches!(err, MedrecError::WardFull { capacity: 50 }));
    assert_eq!(unlucky.bed(), None);

    // All prior assignments untouched.
    for (i, p) in admitted.iter().enumerate() {
        assert_eq!(p.bed(), Some(BedSlot::new(i as u16)));
        assert_eq!(ward.occupant(BedSlot::new(i as u16)), Some(p.id()));
    }
}

#[test]
fn test_assign_on_admitted_is_noop() {
    let mut ward = BedAllocator::default();
    let mut p = patient(9);

    let slot = ward.assign(&mut p).unwrap();
    let err = ward.assign(&mut p).unwrap_err();
    assert!(matches!(err, MedrecError::AlreadyAdmitted(id, s)
        if id == p.id() && s == slot));
    assert_eq!(ward.occupied(), 1);
    assert_eq!(p.bed(), Some(slot));
}

#[test]
fn test_discharge_on_non_admitted_is_noop() {
    let mut ward = BedAllocator::default();
    let mut p = patient(9);

    let err = ward.discharge(&mut p).unwrap_err();
    assert!(matches!(err, MedrecError::NotAdmitted(id) if id == p.id()));
    assert_eq!(ward.available(), ward.capacity());
}

#[test]
fn test_slot_table_and_record_stay_consistent() {
    let mut ward = BedAllocator::new(WardConfig::new(4));
    let mut patients: Vec<Patient> = (1..=4).map(patient).collect();

    for p in patients.iter_mut() {
        ward.assign(p).unwrap();
    }
    for p in patients.iter() {
        let slot = p.bed().unwrap();
        assert_eq!(ward.occupant(slot), Some(p.id()));
    }

    for p in patients.iter_mut() {
        let slot = ward.discharge(p).unwrap();
        assert_eq!(p.bed(), None);
        assert_eq!(ward.occupant(slot), None);
    }
    assert_eq!(ward.available(), 4);
}

#[test]
fn test_occupied_slots_ascending() {
    let mut ward = BedAllocator::default();
    let mut a = patient(30);
    let mut b = patient(10);
    let mut c = patient(20);

    ward.assign(&mut a).unwrap();
    ward.assign(&mut b).unwrap();
    ward.assign(&mut c).unwrap();
    ward.discharge(&mut b).unwrap();

    let occupied: Vec<(u16, u32)> = ward
        .occupied_slots()
        .map(|(slot, id)| (slot.as_u16(), id.as_u32()))
        .collect();
    assert_eq!(occupied, vec![(0, 30), (2, 20)]);
}
