use serde::Deserialize;

use crate::domain::client::Client;

/// Query parameters accepted by the index page service.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Name filter typed into the search box.
    #[serde(rename = "q")]
    pub search: Option<String>,
}

/// Data required to render the main index template.
#[derive(Debug)]
pub struct IndexPageData {
    /// Clients matching the filter, in collection order.
    pub clients: Vec<Client>,
    /// Size of the whole cached collection.
    pub total: usize,
    /// Filter echoed back to the search box.
    pub search_query: String,
}
