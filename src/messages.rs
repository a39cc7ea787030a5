/// JSON message types for the listings API
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::query::ListingPage;

/// Body of `POST /api/listings`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub dataset: Option<String>,

    /// Form-style filter fields. Omit to get the unfiltered dataset.
    #[serde(default)]
    pub filters: Option<HashMap<String, String>>,
}

/// Messages sent from server to client
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Filtered rows in response to a listing query
    Listings(ListingPage),

    /// Registry contents
    Datasets {
        datasets: Vec<String>,
        default: String,
    },

    /// Error occurred
    Error { message: String },
}
