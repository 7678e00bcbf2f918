use medrec::common::{PatientId, WardConfig};
use medrec::record::Patient;
use medrec::registry::PatientRegistry;

fn main() {
    println!("Medrec - patient-record store with ward bed allocation");
    println!("======================================================\n");

    let db_path = "demo_patients.txt";

    let (mut registry, report) =
        PatientRegistry::open(db_path, WardConfig::default()).expect("Failed to open database");
    println!(
        "Opened {}: {} records loaded, {} skipped\n",
        db_path,
        registry.len(),
        report.skipped.len()
    );

    // Register a few patients; registration also queues them for treatment.
    let arrivals = [
        (101, "Asha Rao", 34, "Flu"),
        (52, "Ben Adler", 58, "Fracture"),
        (207, "Carla Diaz", 41, "Appendicitis"),
    ];

    for (id, name, age, disease) in arrivals {
        let id = PatientId::new(id);
        registry
            .register(Patient::new(id, name, age, disease))
            .expect("Failed to register patient");
        println!("Registered #{} {}", id, name);
    }

    // Admit the two who need beds.
    for id in [52, 207] {
        let bed = registry
            .admit(PatientId::new(id))
            .expect("Failed to admit patient");
        println!("Admitted #{} to {}", id, bed);
    }
    println!(
        "Available beds: {} / {}\n",
        registry.available_beds(),
        registry.ward_capacity()
    );

    // Treat the waiting queue in arrival order.
    while let Some(patient) = registry.treat_next() {
        println!("Treating {} ({})", patient.name, patient.disease);
    }
    if let Some(last) = registry.last_treated() {
        println!("Last treated: {}\n", last.name);
    }

    // The database in ascending ID order.
    println!("Records:");
    for patient in registry.patients() {
        println!("  {}", patient);
    }

    let written = registry.save(db_path).expect("Failed to save database");
    println!("\nSaved {} records to {}", written, db_path);

    std::fs::remove_file(db_path).ok();
    println!("Demo completed successfully!");
}
