use crate::domain::client::filter_clients;
use crate::dto::main::{IndexPageData, IndexQuery};
use crate::repository::ClientReader;
use crate::services::ServiceResult;
use crate::store::{ClientAction, ClientStore};

/// Re-fetches the whole collection and replaces the cached one.
pub fn refresh_clients<R>(repo: &R, store: &ClientStore) -> ServiceResult<()>
where
    R: ClientReader + ?Sized,
{
    let clients = repo.list_clients()?;
    store.dispatch(ClientAction::FetchAllClients(clients));
    Ok(())
}

/// Loads the clients list for the main index page.
///
/// The cache is refreshed on every load. A failed fetch is logged and the
/// page falls back to whatever the cache already holds.
pub fn load_index_page<R>(repo: &R, store: &ClientStore, query: IndexQuery) -> IndexPageData
where
    R: ClientReader + ?Sized,
{
    if let Err(err) = refresh_clients(repo, store) {
        log::error!("Failed to fetch clients: {err}");
    }

    cached_index_page(store, query)
}

/// Builds the index page from the cache alone, without fetching.
pub fn cached_index_page(store: &ClientStore, query: IndexQuery) -> IndexPageData {
    let search_query = query.search.unwrap_or_default();
    let cached = store.clients();

    IndexPageData {
        clients: filter_clients(&cached, &search_query),
        total: cached.len(),
        search_query,
    }
}
