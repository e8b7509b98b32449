//! Post-load schema migration.
//!
//! After an entity is loaded, a fixed ordered statement list tightens its
//! column types (length caps, `USING` casts to DATE/UUID/SMALLINT), renames
//! the legacy product availability marker, and populates the derived
//! `weight_class` column. Key creation is a separate phase: all five
//! dimension primary keys are established first, then the fact table's
//! foreign keys. A foreign key requires a valid target key, so the phase
//! split is an ordering invariant, not a convention.
//!
//! Statements within one entity run sequentially; the first failure aborts
//! the remainder of that entity's list (no retry) and surfaces the offending
//! statement. Sibling entities are unaffected.

use crate::clean::Entity;
use crate::error::EtlResult;
use crate::storage::Storage;

/// Dates leave the cleaners in canonical `DD-MM-YYYY` form; the storage
/// casts must agree.
const DATE_FORMAT: &str = "DD-MM-YYYY";

/// The ordered alteration statements for one entity's table.
pub fn statements_for(entity: Entity) -> Vec<String> {
    match entity {
        Entity::Users => vec![
            "UPDATE dim_users SET first_name = LEFT(first_name, 255) WHERE LENGTH(first_name) > 255".to_string(),
            "UPDATE dim_users SET last_name = LEFT(last_name, 255) WHERE LENGTH(last_name) > 255".to_string(),
            "ALTER TABLE dim_users ALTER COLUMN first_name TYPE VARCHAR(255)".to_string(),
            "ALTER TABLE dim_users ALTER COLUMN last_name TYPE VARCHAR(255)".to_string(),
            format!("ALTER TABLE dim_users ALTER COLUMN date_of_birth TYPE DATE USING to_date(date_of_birth, '{DATE_FORMAT}')"),
            format!("ALTER TABLE dim_users ALTER COLUMN join_date TYPE DATE USING to_date(join_date, '{DATE_FORMAT}')"),
            "ALTER TABLE dim_users ALTER COLUMN country_code TYPE VARCHAR(3)".to_string(),
            "ALTER TABLE dim_users ALTER COLUMN user_uuid TYPE UUID USING user_uuid::UUID".to_string(),
        ],
        Entity::Cards => vec![
            "ALTER TABLE dim_card_details ALTER COLUMN card_number TYPE VARCHAR(16) USING LEFT(card_number, 16)".to_string(),
            "ALTER TABLE dim_card_details ALTER COLUMN expiry_date TYPE VARCHAR(5)".to_string(),
            format!("ALTER TABLE dim_card_details ALTER COLUMN date_payment_confirmed TYPE DATE USING to_date(date_payment_confirmed, '{DATE_FORMAT}')"),
        ],
        Entity::Stores => vec![
            "DELETE FROM dim_store_details WHERE LENGTH(store_code) > 11".to_string(),
            "ALTER TABLE dim_store_details ALTER COLUMN locality TYPE VARCHAR(255)".to_string(),
            "ALTER TABLE dim_store_details ALTER COLUMN store_code TYPE VARCHAR(11)".to_string(),
            "ALTER TABLE dim_store_details ALTER COLUMN staff_numbers TYPE SMALLINT USING staff_numbers::SMALLINT".to_string(),
            format!("ALTER TABLE dim_store_details ALTER COLUMN opening_date TYPE DATE USING to_date(opening_date, '{DATE_FORMAT}')"),
            "ALTER TABLE dim_store_details ALTER COLUMN store_type TYPE VARCHAR(255)".to_string(),
            "ALTER TABLE dim_store_details ALTER COLUMN country_code TYPE VARCHAR(2)".to_string(),
            "ALTER TABLE dim_store_details ALTER COLUMN continent TYPE VARCHAR(255)".to_string(),
        ],
        Entity::Products => vec![
            "ALTER TABLE dim_products ALTER COLUMN \"EAN\" TYPE VARCHAR(13)".to_string(),
            "ALTER TABLE dim_products ALTER COLUMN product_code TYPE VARCHAR(11)".to_string(),
            format!("ALTER TABLE dim_products ALTER COLUMN date_added TYPE DATE USING to_date(date_added, '{DATE_FORMAT}')"),
            "ALTER TABLE dim_products ALTER COLUMN uuid TYPE UUID USING uuid::UUID".to_string(),
            "ALTER TABLE dim_products RENAME COLUMN removed TO still_available".to_string(),
            // The legacy marker is misspelled in the source data.
            "ALTER TABLE dim_products ALTER COLUMN still_available TYPE BOOLEAN USING CASE WHEN still_available = 'Still_avaliable' THEN TRUE ELSE FALSE END".to_string(),
            "ALTER TABLE dim_products ADD COLUMN weight_class VARCHAR(14)".to_string(),
            "UPDATE dim_products SET weight_class = CASE WHEN weight < 2 THEN 'Light' WHEN weight < 40 THEN 'Mid_Sized' WHEN weight < 140 THEN 'Heavy' ELSE 'Truck_Required' END".to_string(),
        ],
        Entity::DateTimes => vec![
            "ALTER TABLE dim_date_times ALTER COLUMN month TYPE VARCHAR(12)".to_string(),
            "ALTER TABLE dim_date_times ALTER COLUMN year TYPE VARCHAR(30)".to_string(),
            "ALTER TABLE dim_date_times ALTER COLUMN day TYPE VARCHAR(31)".to_string(),
            "DELETE FROM dim_date_times WHERE LENGTH(time_period) > 5".to_string(),
            "ALTER TABLE dim_date_times ALTER COLUMN date_uuid TYPE UUID USING date_uuid::UUID".to_string(),
        ],
        Entity::Orders => vec![
            "UPDATE orders_table SET card_number = LEFT(card_number, 16)".to_string(),
            "UPDATE orders_table SET store_code = LEFT(store_code, 11)".to_string(),
            "UPDATE orders_table SET product_code = LEFT(product_code, 11)".to_string(),
            "ALTER TABLE orders_table ALTER COLUMN date_uuid TYPE UUID USING date_uuid::UUID".to_string(),
            "ALTER TABLE orders_table ALTER COLUMN user_uuid TYPE UUID USING user_uuid::UUID".to_string(),
            "ALTER TABLE orders_table ALTER COLUMN card_number TYPE VARCHAR(16)".to_string(),
            "ALTER TABLE orders_table ALTER COLUMN store_code TYPE VARCHAR(11)".to_string(),
            "ALTER TABLE orders_table ALTER COLUMN product_code TYPE VARCHAR(11)".to_string(),
            "UPDATE orders_table SET product_quantity = NULL WHERE LENGTH(product_quantity) > 5".to_string(),
            "ALTER TABLE orders_table ALTER COLUMN product_quantity TYPE SMALLINT USING product_quantity::SMALLINT".to_string(),
        ],
    }
}

/// Primary-key statements for the five dimensions, in load order.
pub fn dimension_primary_keys() -> Vec<String> {
    vec![
        "ALTER TABLE dim_users ADD PRIMARY KEY (user_uuid)".to_string(),
        "ALTER TABLE dim_card_details ADD PRIMARY KEY (card_number)".to_string(),
        "ALTER TABLE dim_store_details ADD PRIMARY KEY (store_code)".to_string(),
        "ALTER TABLE dim_products ADD PRIMARY KEY (product_code)".to_string(),
        "ALTER TABLE dim_date_times ADD PRIMARY KEY (date_uuid)".to_string(),
    ]
}

/// Foreign-key statements tying the fact table to each dimension.
pub fn fact_foreign_keys() -> Vec<String> {
    vec![
        "ALTER TABLE orders_table ADD CONSTRAINT fk_user_uuid FOREIGN KEY (user_uuid) REFERENCES dim_users(user_uuid)".to_string(),
        "ALTER TABLE orders_table ADD CONSTRAINT fk_card_number FOREIGN KEY (card_number) REFERENCES dim_card_details(card_number)".to_string(),
        "ALTER TABLE orders_table ADD CONSTRAINT fk_store_code FOREIGN KEY (store_code) REFERENCES dim_store_details(store_code)".to_string(),
        "ALTER TABLE orders_table ADD CONSTRAINT fk_product_code FOREIGN KEY (product_code) REFERENCES dim_products(product_code)".to_string(),
        "ALTER TABLE orders_table ADD CONSTRAINT fk_date_uuid FOREIGN KEY (date_uuid) REFERENCES dim_date_times(date_uuid)".to_string(),
    ]
}

/// Run one entity's alteration list sequentially.
///
/// Returns the first storage error; remaining statements are not attempted.
pub fn run_entity(storage: &dyn Storage, entity: Entity) -> EtlResult<()> {
    for sql in statements_for(entity) {
        storage.execute(&sql)?;
    }
    Ok(())
}

/// Run the constraint phase: all five dimension primary keys, then the five
/// fact-table foreign keys.
///
/// A primary-key failure returns before any foreign-key statement executes.
pub fn run_constraints(storage: &dyn Storage) -> EtlResult<()> {
    for sql in dimension_primary_keys() {
        storage.execute(&sql)?;
    }
    for sql in fact_foreign_keys() {
        storage.execute(&sql)?;
    }
    Ok(())
}

/// Categorize a weight in kilograms into its delivery class.
///
/// Band boundaries are inclusive on the lower bound.
pub fn weight_class(kg: f64) -> &'static str {
    if kg < 2.0 {
        "Light"
    } else if kg < 40.0 {
        "Mid_Sized"
    } else if kg < 140.0 {
        "Heavy"
    } else {
        "Truck_Required"
    }
}
