//! Entity cleaners: raw table in, canonical loadable table out.
//!
//! One authoritative cleaning routine per entity, each a pure
//! `DataSet -> DataSet` function composed from the shared contract
//! (drop fully-null rows, prune legacy columns, run the entity's
//! [`rules::ColumnRule`] table, then entity-specific row filters); see
//! the per-entity modules for specifics.
//!
//! Dispatch from destination table name to cleaner is an exhaustive
//! [`Entity`] mapping: a table name outside the six known destinations is a
//! configuration error, reported before any cleaning or upload happens.

pub mod cards;
pub mod date_times;
pub mod orders;
pub mod products;
pub mod rules;
pub mod stores;
pub mod users;

pub use rules::{ColumnRule, InvalidPolicy, Normalizer, apply_rules};

use crate::error::{EtlError, EtlResult};
use crate::types::DataSet;

/// The six destination entities of the star schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// `dim_users` dimension.
    Users,
    /// `dim_card_details` dimension.
    Cards,
    /// `dim_store_details` dimension.
    Stores,
    /// `dim_products` dimension.
    Products,
    /// `dim_date_times` dimension.
    DateTimes,
    /// `orders_table` fact.
    Orders,
}

impl Entity {
    /// All entities in load order: dimensions first, fact last.
    pub const ALL: [Entity; 6] = [
        Entity::Users,
        Entity::Cards,
        Entity::Stores,
        Entity::Products,
        Entity::DateTimes,
        Entity::Orders,
    ];

    /// Destination table name.
    pub fn table_name(self) -> &'static str {
        match self {
            Entity::Users => "dim_users",
            Entity::Cards => "dim_card_details",
            Entity::Stores => "dim_store_details",
            Entity::Products => "dim_products",
            Entity::DateTimes => "dim_date_times",
            Entity::Orders => "orders_table",
        }
    }

    /// Resolve a destination table name to its entity.
    ///
    /// An unrecognized name is a fatal configuration error: no cleaning
    /// occurs and no upload is attempted.
    pub fn from_table_name(name: &str) -> EtlResult<Self> {
        match name {
            "dim_users" => Ok(Entity::Users),
            "dim_card_details" => Ok(Entity::Cards),
            "dim_store_details" => Ok(Entity::Stores),
            "dim_products" => Ok(Entity::Products),
            "dim_date_times" => Ok(Entity::DateTimes),
            "orders_table" => Ok(Entity::Orders),
            other => Err(EtlError::UnknownTable {
                table: other.to_string(),
            }),
        }
    }

    /// `true` for the five dimension tables, `false` for the fact table.
    pub fn is_dimension(self) -> bool {
        !matches!(self, Entity::Orders)
    }
}

/// Run the cleaner for `entity` over a raw extract.
pub fn clean(entity: Entity, raw: &DataSet) -> DataSet {
    match entity {
        Entity::Users => users::clean(raw),
        Entity::Cards => cards::clean(raw),
        Entity::Stores => stores::clean(raw),
        Entity::Products => products::clean(raw),
        Entity::DateTimes => date_times::clean(raw),
        Entity::Orders => orders::clean(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::Entity;
    use crate::error::EtlError;

    #[test]
    fn table_names_round_trip() {
        for entity in Entity::ALL {
            assert_eq!(Entity::from_table_name(entity.table_name()).unwrap(), entity);
        }
    }

    #[test]
    fn unknown_table_is_a_config_error() {
        let err = Entity::from_table_name("dim_mystery").unwrap_err();
        assert!(matches!(err, EtlError::UnknownTable { table } if table == "dim_mystery"));
    }

    #[test]
    fn orders_is_the_only_fact() {
        assert!(!Entity::Orders.is_dimension());
        assert_eq!(Entity::ALL.iter().filter(|e| e.is_dimension()).count(), 5);
    }
}
