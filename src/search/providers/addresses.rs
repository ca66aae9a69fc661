//! Ordnance Survey Places (addresses) provider.
//!
//! Wire format notes:
//! - entries arrive wrapped as {"DPA": {...}}
//! - the header carries the output spatial reference as e.g. "EPSG:4326"
//! - each entry is a single address line plus a point; no bounding box

use async_trait::async_trait;
use futures::future::try_join_all;
use log::{debug, warn};
use serde::Deserialize;

use crate::search::provider::{Provider, ProviderError};
use crate::search::providers::dedup_by_id;
use crate::search::types::{Envelope, Point, SearchResult, SpatialReference};

const DEFAULT_BASE_URL: &str = "https://api.ordnancesurvey.co.uk/places/v1";
const MAX_RESULTS: u32 = 25;
const OUTPUT_SRS: &str = "EPSG:4326";

// ============================================================================
// Places API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct PlacesResponse {
    #[serde(default)]
    header: Option<PlacesHeader>,
    #[serde(default)]
    results: Vec<AddressWrapper>,
}

#[derive(Deserialize, Debug)]
struct PlacesHeader {
    output_srs: Option<String>,
}

/// Each result is a single-key wrapper around the delivery point address.
#[derive(Deserialize, Debug)]
struct AddressWrapper {
    #[serde(rename = "DPA")]
    entry: Option<DeliveryPointAddress>,
}

#[derive(Deserialize, Debug)]
struct DeliveryPointAddress {
    #[serde(rename = "UPRN")]
    uprn: String,
    #[serde(rename = "ADDRESS")]
    address: String,
    #[serde(rename = "X_COORDINATE")]
    x_coordinate: f64,
    #[serde(rename = "Y_COORDINATE")]
    y_coordinate: f64,
}

// ============================================================================
// Query Classification
// ============================================================================

/// A Unique Property Reference Number is up to twelve digits.
fn is_uprn_candidate(term: &str) -> bool {
    !term.is_empty() && term.len() <= 12 && term.chars().all(|c| c.is_ascii_digit())
}

fn take_while_at(chars: &[char], at: usize, max: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut taken = 0;
    while at + taken < chars.len() && taken < max && pred(chars[at + taken]) {
        taken += 1;
    }
    taken
}

/// Accepts full or partial postcodes: one or two letters, one or two
/// digits, an optional space, then an optional digit and up to two
/// letters. "SO16", "SO16 0AS" and "EC2R" all qualify.
fn is_postcode_candidate(term: &str) -> bool {
    let chars: Vec<char> = term.chars().collect();
    let mut at = 0;

    let area = take_while_at(&chars, at, 2, |c| c.is_ascii_alphabetic());
    if area == 0 {
        return false;
    }
    at += area;

    let district = take_while_at(&chars, at, 2, |c| c.is_ascii_digit());
    if district == 0 {
        return false;
    }
    at += district;

    if at < chars.len() && chars[at] == ' ' {
        at += 1;
    }
    at += take_while_at(&chars, at, 1, |c| c.is_ascii_digit());
    at += take_while_at(&chars, at, 2, |c| c.is_ascii_alphabetic());
    at == chars.len()
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Splits a one-line address into a short display name and the remaining
/// context. The name is the first comma field, pulling in the second field
/// when the first is just a building number; an address without any comma
/// is clipped to a ten-character name with an ellipsis.
fn split_address(address: &str) -> (String, String) {
    let chars: Vec<char> = address.chars().collect();
    let first_comma = chars.iter().position(|&c| c == ',');

    if let Some(first) = first_comma {
        let number_prefix = chars[..first].iter().all(|c| c.is_ascii_digit());
        let second_comma = number_prefix
            .then(|| chars[first + 1..].iter().position(|&c| c == ','))
            .flatten()
            .map(|offset| first + 1 + offset);
        let split = second_comma.unwrap_or(first);

        let name: String = chars[..split].iter().filter(|&&c| c != ',').collect();
        let context: String = chars[split + 1..].iter().collect();
        return (name, context.trim().to_string());
    }

    let end = chars.len().saturating_sub(1);
    let cut = end.min(10);
    let name: String = chars[..cut].iter().collect();
    let context: String = chars[cut..end].iter().collect();
    (format!("{name}..."), context)
}

fn parse_spatial_reference(header: Option<&PlacesHeader>) -> Result<SpatialReference, ProviderError> {
    let srs = header
        .and_then(|h| h.output_srs.as_deref())
        .ok_or_else(|| ProviderError::Parse("missing output spatial reference".to_string()))?;
    let wkid = srs
        .to_lowercase()
        .replace("epsg:", "")
        .parse::<u32>()
        .map_err(|_| ProviderError::Parse(format!("unsupported spatial reference: {srs}")))?;
    Ok(SpatialReference::new(wkid))
}

fn entry_to_result(
    entry: &DeliveryPointAddress,
    spatial_reference: SpatialReference,
) -> SearchResult {
    let (name, context) = split_address(&entry.address);
    SearchResult::new(
        entry.uprn.clone(),
        name,
        context,
        Point::new(entry.x_coordinate, entry.y_coordinate),
        Some(Envelope::Empty),
        spatial_reference,
    )
}

fn response_to_results(response: PlacesResponse) -> Result<Vec<SearchResult>, ProviderError> {
    let spatial_reference = parse_spatial_reference(response.header.as_ref())?;
    response
        .results
        .iter()
        .map(|wrapper| match &wrapper.entry {
            Some(entry) => Ok(entry_to_result(entry, spatial_reference)),
            None => Err(ProviderError::Parse(
                "address result without a DPA entry".to_string(),
            )),
        })
        .collect()
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Remote address provider backed by the Places `addresses` endpoints.
///
/// Every query hits the free-text `find` endpoint; terms shaped like a
/// postcode or a UPRN additionally hit the matching dedicated endpoint,
/// with duplicate ids across the answers collapsed.
pub struct AddressesProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl AddressesProvider {
    /// Creates a new Places addresses provider.
    ///
    /// # Arguments
    /// * `api_key` - Places API key
    /// * `base_url` - Optional custom base URL (defaults to the public API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    async fn send_request(
        &self,
        endpoint: &str,
        mut params: Vec<(&str, String)>,
    ) -> Result<PlacesResponse, ProviderError> {
        params.push(("key", self.api_key.clone()));
        let response = self
            .client
            .get(format!("{}/addresses/{}", self.base_url, endpoint))
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Places {} response status: {}", endpoint, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Places API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<PlacesResponse>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Provider for AddressesProvider {
    fn name(&self) -> &str {
        "addresses"
    }

    async fn query(&self, term: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let mut requests = vec![self.send_request(
            "find",
            vec![
                ("query", term.to_string()),
                ("maxresults", MAX_RESULTS.to_string()),
                ("output_srs", OUTPUT_SRS.to_string()),
            ],
        )];
        if is_postcode_candidate(term) {
            requests.push(self.send_request(
                "postcode",
                vec![
                    ("postcode", term.to_string()),
                    ("maxresults", MAX_RESULTS.to_string()),
                    ("output_srs", OUTPUT_SRS.to_string()),
                ],
            ));
        }
        if is_uprn_candidate(term) {
            requests.push(self.send_request(
                "uprn",
                vec![
                    ("uprn", term.to_string()),
                    ("dataset", "dpa".to_string()),
                    ("output_srs", OUTPUT_SRS.to_string()),
                ],
            ));
        }

        let responses = try_join_all(requests).await?;
        let mut results = Vec::new();
        for response in responses {
            results.extend(response_to_results(response)?);
        }
        Ok(dedup_by_id(results))
    }
}
