//! Node Check Service - Main application use case
//!
//! Orchestrates one query: asks every configured location resolver about
//! the address (one after another, in configured order) and checks the
//! address against the node range catalog.

use crate::domain::entities::{NodeReport, QueryRequest, RangeCatalog};
use crate::domain::ports::LocationResolver;
use std::sync::Arc;

/// Node check service - main application use case.
pub struct NodeCheckService {
    catalog: RangeCatalog,
    resolvers: Vec<Arc<dyn LocationResolver>>,
}

impl NodeCheckService {
    /// Create a new service over an already validated catalog.
    pub fn new(catalog: RangeCatalog, resolvers: Vec<Arc<dyn LocationResolver>>) -> Self {
        Self { catalog, resolvers }
    }

    /// Run a query.
    ///
    /// Resolvers are awaited sequentially; a slow backend delays the ones
    /// after it. Resolver failures only degrade their own line.
    pub async fn check(&self, request: QueryRequest) -> NodeReport {
        let mut locations = Vec::with_capacity(self.resolvers.len());
        for resolver in &self.resolvers {
            let result = resolver.resolve(request.ip).await;
            tracing::debug!("{} -> {} via {}", request.ip, result, resolver.name());
            locations.push(result);
        }

        let matched = self.catalog.find(&request.ip).copied();
        tracing::debug!(
            "{} node membership: {}",
            request.ip,
            matched.map(|r| r.to_string()).unwrap_or_else(|| "none".into())
        );

        NodeReport {
            request,
            locations,
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LocationResult;
    use crate::domain::services::CatalogLoader;
    use async_trait::async_trait;
    use std::net::IpAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedResolver {
        name: &'static str,
        result: LocationResult,
        calls: AtomicUsize,
    }

    impl FixedResolver {
        fn new(name: &'static str, result: LocationResult) -> Self {
            Self {
                name,
                result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LocationResolver for FixedResolver {
        fn name(&self) -> &str {
            self.name
        }

        async fn resolve(&self, _ip: IpAddr) -> LocationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Records call order into a shared log.
    struct OrderedResolver {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl LocationResolver for OrderedResolver {
        fn name(&self) -> &str {
            self.name
        }

        async fn resolve(&self, _ip: IpAddr) -> LocationResult {
            self.log.lock().unwrap().push(self.name);
            LocationResult::Unknown
        }
    }

    fn catalog() -> RangeCatalog {
        CatalogLoader::parse("2024-01-01\n192.168.1.0/24\n").unwrap()
    }

    #[tokio::test]
    async fn test_check_node_ip() {
        let service = NodeCheckService::new(catalog(), Vec::new());
        let report = service
            .check(QueryRequest::parse("192.168.1.10").unwrap())
            .await;
        assert!(report.is_node());
        assert_eq!(report.matched.unwrap().to_string(), "192.168.1.0/24");
        assert!(report.locations.is_empty());
    }

    #[tokio::test]
    async fn test_check_non_node_ip() {
        let service = NodeCheckService::new(catalog(), Vec::new());
        let report = service.check(QueryRequest::parse("1.2.3.4").unwrap()).await;
        assert!(!report.is_node());
    }

    #[tokio::test]
    async fn test_check_collects_every_resolver() {
        let a = Arc::new(FixedResolver::new(
            "a",
            LocationResult::Located("[China]".into()),
        ));
        let b = Arc::new(FixedResolver::new("b", LocationResult::Unknown));
        let c = Arc::new(FixedResolver::new(
            "c",
            LocationResult::Failed("failed to search: boom".into()),
        ));
        let resolvers: Vec<Arc<dyn LocationResolver>> = vec![
            a.clone() as Arc<dyn LocationResolver>,
            b.clone() as Arc<dyn LocationResolver>,
            c.clone() as Arc<dyn LocationResolver>,
        ];
        let service = NodeCheckService::new(catalog(), resolvers);

        let report = service.check(QueryRequest::parse("8.8.8.8").unwrap()).await;

        assert_eq!(report.locations.len(), 3);
        assert_eq!(report.locations[0].to_string(), "[China]");
        assert_eq!(report.locations[1], LocationResult::Unknown);
        assert_eq!(report.locations[2].to_string(), "failed to search: boom");
        assert!(!report.is_node());
        assert_eq!(a.calls.load(Ordering::SeqCst), 1);
        assert_eq!(b.calls.load(Ordering::SeqCst), 1);
        assert_eq!(c.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_check_runs_resolvers_in_configured_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let resolvers: Vec<Arc<dyn LocationResolver>> = ["mir6", "geolite2", "vore"]
            .into_iter()
            .map(|name| {
                Arc::new(OrderedResolver {
                    name,
                    log: log.clone(),
                }) as Arc<dyn LocationResolver>
            })
            .collect();
        let service = NodeCheckService::new(catalog(), resolvers);

        service.check(QueryRequest::parse("10.0.0.1").unwrap()).await;

        assert_eq!(*log.lock().unwrap(), vec!["mir6", "geolite2", "vore"]);
    }

    #[tokio::test]
    async fn test_resolve_str_unparsable_is_unknown() {
        let resolver = FixedResolver::new("a", LocationResult::Located("[China]".into()));
        assert_eq!(resolver.resolve_str("not-an-ip").await, LocationResult::Unknown);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);

        assert_eq!(
            resolver.resolve_str("1.2.3.4").await,
            LocationResult::Located("[China]".into())
        );
    }
}
