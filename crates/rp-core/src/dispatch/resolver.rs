//! Target resolution

use super::builder::split_ids;
use crate::config::keys;
use crate::config::ConfigView;
use crate::error::ResolveError;
use crate::traits::ListingClient;
use crate::types::{Filters, Pagination, CLIENTS_LIMIT_MAX};

/// Turns explicit ids, a name filter or a search into client ids
pub struct TargetResolver<L> {
    listing: L,
}

impl<L: ListingClient> TargetResolver<L> {
    pub fn new(listing: L) -> Self {
        Self { listing }
    }

    /// Resolve the targets of one invocation
    ///
    /// Explicit ids are returned without a network call, blanks dropped; a
    /// list of only blanks counts as no ids. Otherwise a single listing query
    /// runs and disconnected clients are dropped. The result is a comma
    /// separated id list.
    pub async fn resolve<P: ConfigView + ?Sized>(&self, params: &P) -> Result<String, ResolveError> {
        let ids = split_ids(&params.read_string(keys::CLIENT_IDS, ""));
        if !ids.is_empty() {
            return Ok(ids.join(","));
        }

        let names = params.read_string(keys::CLIENT_NAMES, "");
        let search = params.read_string(keys::CLIENT_SEARCH, "");
        if names.is_empty() && search.is_empty() {
            return Err(ResolveError::NoTargetSpecified);
        }

        let filters = Filters::new().with("name", names).with("*", search);
        tracing::debug!("resolving clients by {}", filters);

        let page = self
            .listing
            .list_clients(Pagination::with_limit(CLIENTS_LIMIT_MAX), filters.clone())
            .await?;

        let mut client_ids = String::new();
        for client in &page.data {
            if !client.is_connected() {
                tracing::debug!("skipping disconnected client {}", client.id);
                continue;
            }
            client_ids.push_str(&client.id);
            client_ids.push(',');
        }
        let client_ids = client_ids.trim_matches(',').to_string();

        if client_ids.is_empty() {
            return Err(ResolveError::NoMatchingTargets {
                filter: filters.to_string(),
            });
        }

        Ok(client_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParameterBag;
    use crate::error::ApiError;
    use crate::types::{ClientSummary, ClientsPage};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockListing {
        clients: Vec<ClientSummary>,
        calls: Mutex<Vec<(Pagination, Filters)>>,
        fail: bool,
    }

    #[async_trait]
    impl ListingClient for MockListing {
        async fn list_clients(
            &self,
            pagination: Pagination,
            filters: Filters,
        ) -> Result<ClientsPage, ApiError> {
            self.calls.lock().unwrap().push((pagination, filters));
            if self.fail {
                return Err(ApiError::Request("connection refused".to_string()));
            }
            Ok(ClientsPage {
                data: self.clients.clone(),
                ..ClientsPage::default()
            })
        }
    }

    fn client(id: &str, disconnected_at: Option<&str>) -> ClientSummary {
        ClientSummary {
            id: id.to_string(),
            name: format!("client {}", id),
            disconnected_at: disconnected_at.map(String::from),
            ..ClientSummary::default()
        }
    }

    #[tokio::test]
    async fn test_no_target_specified() {
        let listing = MockListing::default();
        let resolver = TargetResolver::new(&listing);

        let err = resolver.resolve(&ParameterBag::new()).await.unwrap_err();

        assert!(matches!(err, ResolveError::NoTargetSpecified));
        assert!(listing.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_ids_skip_listing() {
        let listing = MockListing::default();
        let resolver = TargetResolver::new(&listing);
        let params = ParameterBag::from_values([(keys::CLIENT_IDS, "a,b"), (keys::CLIENT_NAMES, "x")]);

        assert_eq!(resolver.resolve(&params).await.unwrap(), "a,b");
        assert!(listing.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_ids_are_no_target() {
        let listing = MockListing::default();
        let resolver = TargetResolver::new(&listing);
        let params = ParameterBag::from_values([(keys::CLIENT_IDS, " , ,")]);

        let err = resolver.resolve(&params).await.unwrap_err();

        assert!(matches!(err, ResolveError::NoTargetSpecified));
        assert!(listing.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_ids_drop_blanks() {
        let listing = MockListing::default();
        let resolver = TargetResolver::new(&listing);
        let params = ParameterBag::from_values([(keys::CLIENT_IDS, "a, ,b,")]);

        assert_eq!(resolver.resolve(&params).await.unwrap(), "a,b");
    }

    #[tokio::test]
    async fn test_names_exclude_disconnected_clients() {
        let listing = MockListing {
            clients: vec![
                client("1", None),
                client("2", Some("2021-01-01T00:00:00Z")),
                client("3", Some("")),
            ],
            ..MockListing::default()
        };
        let resolver = TargetResolver::new(&listing);
        let params = ParameterBag::from_values([(keys::CLIENT_NAMES, "web*")]);

        assert_eq!(resolver.resolve(&params).await.unwrap(), "1,3");

        let calls = listing.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (pagination, filters) = &calls[0];
        assert_eq!(pagination.limit, CLIENTS_LIMIT_MAX);
        assert_eq!(filters.iter().collect::<Vec<_>>(), vec![("name", "web*")]);
    }

    #[tokio::test]
    async fn test_search_filter() {
        let listing = MockListing {
            clients: vec![client("9", None)],
            ..MockListing::default()
        };
        let resolver = TargetResolver::new(&listing);
        let params = ParameterBag::from_values([(keys::CLIENT_SEARCH, "ubuntu")]);

        assert_eq!(resolver.resolve(&params).await.unwrap(), "9");
        let calls = listing.calls.lock().unwrap();
        assert_eq!(calls[0].1.iter().collect::<Vec<_>>(), vec![("*", "ubuntu")]);
    }

    #[tokio::test]
    async fn test_only_disconnected_matches() {
        let listing = MockListing {
            clients: vec![client("2", Some("2021-01-01T00:00:00Z"))],
            ..MockListing::default()
        };
        let resolver = TargetResolver::new(&listing);
        let params = ParameterBag::from_values([(keys::CLIENT_NAMES, "db")]);

        let err = resolver.resolve(&params).await.unwrap_err();
        assert_eq!(err.to_string(), "no connected clients match 'name=db'");
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let listing = MockListing {
            fail: true,
            ..MockListing::default()
        };
        let resolver = TargetResolver::new(&listing);
        let params = ParameterBag::from_values([(keys::CLIENT_NAMES, "db")]);

        let err = resolver.resolve(&params).await.unwrap_err();
        assert!(matches!(err, ResolveError::Api(ApiError::Request(_))));
    }
}
