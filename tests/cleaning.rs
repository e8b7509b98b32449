use retail_etl::clean::{self, Entity};
use retail_etl::extract::csv::{dataset_from_csv_path, dataset_from_csv_str};
use retail_etl::types::Value;

#[test]
fn store_cleaner_drops_fr_and_keeps_us() {
    let raw = dataset_from_csv_str(
        "address,locality,store_code,staff_numbers,opening_date,store_type,latitude,longitude,country_code,continent\n\
         3 Rue de Lyon,Paris,FR-123A4567,12,2010-05-04,Local,48.85,2.35,FR,Europe\n\
         12 Main Street,Austin,US-834B0519,34,2006-09-03,Super Store,30.26,-97.74,US,America\n",
    )
    .unwrap();

    let cleaned = clean::clean(Entity::Stores, &raw);
    assert_eq!(cleaned.row_count(), 1);
    let code_idx = cleaned.column_index("country_code").unwrap();
    assert_eq!(cleaned.rows[0][code_idx], Value::Utf8("US".to_string()));
}

#[test]
fn store_cleaner_drops_rows_without_an_address() {
    let raw = dataset_from_csv_str(
        "address,store_code,staff_numbers,opening_date,country_code,continent\n\
         ,US-834B0519,34,2006-09-03,US,America\n",
    )
    .unwrap();
    assert_eq!(clean::clean(Entity::Stores, &raw).row_count(), 0);
}

#[test]
fn product_prices_normalize_and_empty_prices_drop() {
    let raw = dataset_from_csv_str(
        "product_name,product_price,weight,product_code\n\
         Tiramisu Dessert,£9.99,590g,C2-7287916l\n\
         Mystery Item,,1kg,Z9-0000000a\n\
         Bare Symbol,£,1kg,Z9-0000001b\n",
    )
    .unwrap();

    let cleaned = clean::clean(Entity::Products, &raw);
    assert_eq!(cleaned.row_count(), 1);
    let price_idx = cleaned.column_index("product_price").unwrap();
    assert_eq!(cleaned.rows[0][price_idx], Value::Float64(9.99));
}

#[test]
fn product_fixture_cleans_to_the_valid_rows() {
    let raw = dataset_from_csv_path("tests/fixtures/products.csv").unwrap();
    let cleaned = clean::clean(Entity::Products, &raw);

    // Three real products; the all-garbage row dies on its weight.
    assert_eq!(cleaned.row_count(), 3);
    assert!(cleaned.column_index("").is_none(), "index column must be pruned");

    let weight_idx = cleaned.column_index("weight").unwrap();
    assert_eq!(cleaned.rows[0][weight_idx], Value::Float64(1.6));
    assert_eq!(cleaned.rows[1][weight_idx], Value::Float64(0.59));
}

#[test]
fn every_cleaner_is_idempotent_on_its_own_output() {
    let jobs: Vec<(Entity, &str)> = vec![
        (
            Entity::Users,
            "date_of_birth,join_date,phone_number,user_uuid,country_code\n\
             1979 February 01,2019-10-04,+44(0)117 496 0576,93caf182-e4e9-4c58-a977-9e12914b0899,gb\n",
        ),
        (
            Entity::Cards,
            "card_number,expiry_date,card_provider,date_payment_confirmed\n\
             ??4654492346226715,09/26,VISA 16 digit,2015 November 25\n",
        ),
        (
            Entity::Stores,
            "address,store_code,staff_numbers,opening_date,country_code,continent\n\
             12 Main Street,US-834B0519,34,2006-09-03,US,eeAmerica\n",
        ),
        (
            Entity::Products,
            "product_name,product_price,weight,product_code\n\
             Tiramisu Dessert,£9.99,590g,C2-7287916l\n",
        ),
        (
            Entity::Orders,
            "date_uuid,user_uuid,card_number,store_code,product_code,product_quantity\n\
             9476f17e-5d6a-4117-874d-9cdb38ca1fa6,93caf182-e4e9-4c58-a977-9e12914b0899,4971858637664481,BL-8387506C,R7-3126933h,3\n",
        ),
        (
            Entity::DateTimes,
            "timestamp,month,year,day,time_period,date_uuid\n\
             22:00:06,9,2012,19,Evening,9476f17e-5d6a-4117-874d-9cdb38ca1fa6\n",
        ),
    ];

    for (entity, csv_text) in jobs {
        let raw = dataset_from_csv_str(csv_text).unwrap();
        let once = clean::clean(entity, &raw);
        let twice = clean::clean(entity, &once);
        assert_eq!(once, twice, "{entity:?} cleaner must be idempotent");
        assert_eq!(once.row_count(), 1, "{entity:?} sample row must survive");
    }
}
