//! Remote source collaborators.
//!
//! Three remote shapes feed the pipeline: a JSON record array (date details),
//! a delimited-text object in a storage bucket (products), and the two-call
//! store API (a count endpoint, then one JSON record per store number).
//! All requests are blocking; the pipeline is strictly sequential.
//!
//! Failures are returned as [`EtlError::Network`] carrying the URL; the
//! orchestrator reports them and carries on with an absent result.

use reqwest::blocking::Client;

use crate::error::{EtlError, EtlResult};
use crate::types::DataSet;

use super::TabularSource;
use super::{csv, json};

/// Placeholder in the store-detail URL template replaced by a store number.
pub const STORE_NUMBER_PLACEHOLDER: &str = "{store_number}";

fn get_text(client: &Client, url: &str, api_key: Option<&str>) -> EtlResult<String> {
    let mut req = client.get(url);
    if let Some(key) = api_key {
        req = req.header("x-api-key", key);
    }
    let resp = req.send().map_err(|e| EtlError::network(url, e))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(EtlError::network(url, format!("status {status}")));
    }
    resp.text().map_err(|e| EtlError::network(url, e))
}

/// A URL returning a JSON array of records.
pub struct JsonHttpSource {
    url: String,
}

impl JsonHttpSource {
    /// Fetch the record array at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TabularSource for JsonHttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> EtlResult<DataSet> {
        let text = get_text(&Client::new(), &self.url, None)?;
        json::dataset_from_json_str(&text)
    }
}

/// A URL returning delimited text (an object-storage bucket download).
pub struct CsvHttpSource {
    url: String,
}

impl CsvHttpSource {
    /// Fetch the delimited text at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TabularSource for CsvHttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> EtlResult<DataSet> {
        let text = get_text(&Client::new(), &self.url, None)?;
        csv::dataset_from_csv_str(&text)
    }
}

/// The two-call store API: a count endpoint, then one record per store.
pub struct StoreApiSource {
    count_url: String,
    detail_url_template: String,
    api_key: String,
}

impl StoreApiSource {
    /// `detail_url_template` must contain [`STORE_NUMBER_PLACEHOLDER`].
    pub fn new(
        count_url: impl Into<String>,
        detail_url_template: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            count_url: count_url.into(),
            detail_url_template: detail_url_template.into(),
            api_key: api_key.into(),
        }
    }

    fn store_count(&self, client: &Client) -> EtlResult<u64> {
        let text = get_text(client, &self.count_url, Some(&self.api_key))?;
        let v: serde_json::Value = serde_json::from_str(&text)?;
        v.get("number_stores")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| {
                EtlError::network(&self.count_url, "response carries no number_stores")
            })
    }
}

impl TabularSource for StoreApiSource {
    fn describe(&self) -> String {
        self.count_url.clone()
    }

    fn fetch(&self) -> EtlResult<DataSet> {
        let client = Client::new();
        let count = self.store_count(&client)?;

        let mut records = Vec::with_capacity(count as usize);
        for store_number in 1..=count {
            let url = self
                .detail_url_template
                .replace(STORE_NUMBER_PLACEHOLDER, &store_number.to_string());
            let text = get_text(&client, &url, Some(&self.api_key))?;
            records.push(serde_json::from_str(&text)?);
        }
        json::dataset_from_json_values(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::{STORE_NUMBER_PLACEHOLDER, StoreApiSource};
    use crate::extract::TabularSource;

    #[test]
    fn detail_template_substitutes_store_numbers() {
        let url = format!("https://api.example.com/store_details/{STORE_NUMBER_PLACEHOLDER}");
        assert_eq!(
            url.replace(STORE_NUMBER_PLACEHOLDER, "7"),
            "https://api.example.com/store_details/7"
        );
    }

    #[test]
    fn describe_names_the_count_endpoint() {
        let src = StoreApiSource::new(
            "https://api.example.com/number_stores",
            "https://api.example.com/store_details/{store_number}",
            "key",
        );
        assert_eq!(src.describe(), "https://api.example.com/number_stores");
    }
}
