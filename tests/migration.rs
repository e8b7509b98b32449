use retail_etl::clean::Entity;
use retail_etl::migrate::{run_constraints, run_entity, statements_for, weight_class};
use retail_etl::storage::MemoryStorage;

#[test]
fn no_orders_foreign_key_runs_before_all_dimension_primary_keys() {
    let storage = MemoryStorage::new();

    // Full migration pass: every entity's alterations, then constraints.
    for entity in Entity::ALL {
        run_entity(&storage, entity).unwrap();
    }
    run_constraints(&storage).unwrap();

    let journal = storage.journal();
    let first_fk = journal
        .iter()
        .position(|s| s.contains("orders_table ADD CONSTRAINT"))
        .expect("foreign keys must run");
    let pk_positions: Vec<usize> = journal
        .iter()
        .enumerate()
        .filter(|(_, s)| s.contains("ADD PRIMARY KEY"))
        .map(|(i, _)| i)
        .collect();

    assert_eq!(pk_positions.len(), 5, "five dimension primary keys");
    assert!(
        pk_positions.iter().all(|&pk| pk < first_fk),
        "every primary key must precede the first foreign key"
    );
}

#[test]
fn a_failed_primary_key_blocks_the_entire_foreign_key_phase() {
    let storage = MemoryStorage::new().fail_when_contains("dim_products ADD PRIMARY KEY");
    assert!(run_constraints(&storage).is_err());
    assert!(
        storage
            .journal()
            .iter()
            .all(|s| !s.contains("FOREIGN KEY")),
        "no foreign key may run after a primary-key failure"
    );
}

#[test]
fn statement_failure_aborts_only_that_entity() {
    let storage = MemoryStorage::new().fail_when_contains("dim_card_details");

    assert!(run_entity(&storage, Entity::Cards).is_err());
    // A sibling entity still migrates in full.
    run_entity(&storage, Entity::Users).unwrap();
    let users_statements = statements_for(Entity::Users).len();
    assert_eq!(storage.journal().len(), users_statements);
}

#[test]
fn weight_class_boundaries() {
    let cases = [
        (1.5, "Light"),
        (2.0, "Mid_Sized"),
        (39.9, "Mid_Sized"),
        (40.0, "Heavy"),
        (139.9, "Heavy"),
        (140.0, "Truck_Required"),
    ];
    for (kg, expected) in cases {
        assert_eq!(weight_class(kg), expected, "weight {kg}");
    }
}

#[test]
fn weight_class_banding_matches_the_sql_statement() {
    // The derived-column statement must band on the same thresholds as the
    // Rust helper, with inclusive lower bounds.
    let update = statements_for(Entity::Products)
        .into_iter()
        .find(|s| s.contains("SET weight_class"))
        .unwrap();
    assert!(update.contains("weight < 2 THEN 'Light'"));
    assert!(update.contains("weight < 40 THEN 'Mid_Sized'"));
    assert!(update.contains("weight < 140 THEN 'Heavy'"));
    assert!(update.contains("ELSE 'Truck_Required'"));
}
