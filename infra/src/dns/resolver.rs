//! MX lookups through the hickory-resolver stack.
//!
//! Answers the registration-time deliverability probe: a domain counts as
//! able to receive mail when it has at least one MX record, or an A/AAAA
//! record under the RFC 5321 implicit MX rule. Only a definitive empty
//! answer reports `false`; resolution failures propagate so the caller can
//! decide what a probe outage means.

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

use pnr_core::errors::DomainResult;
use pnr_core::services::auth::DnsResolver;

use crate::InfrastructureError;

/// DNS resolver backed by the system configuration
pub struct HickoryDnsResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryDnsResolver {
    /// Create a resolver from /etc/resolv.conf (or the platform equivalent)
    pub fn from_system() -> Result<Self, InfrastructureError> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf()
            .map_err(|e| InfrastructureError::Dns(format!("Failed to read resolver config: {}", e)))?;
        Ok(Self { resolver })
    }

    /// Create a resolver with explicit configuration
    pub fn new(
        config: hickory_resolver::config::ResolverConfig,
        options: hickory_resolver::config::ResolverOpts,
    ) -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(config, options),
        }
    }

    /// Whether the error means "the name definitively has no such records"
    fn is_empty_answer(error: &ResolveError) -> bool {
        matches!(error.kind(), ResolveErrorKind::NoRecordsFound { .. })
    }
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn has_mail_exchanger(&self, domain: &str) -> DomainResult<bool> {
        match self.resolver.mx_lookup(domain).await {
            Ok(lookup) => {
                let found = lookup.iter().next().is_some();
                debug!(domain = %domain, found = found, "MX lookup completed");
                Ok(found)
            }
            Err(e) if Self::is_empty_answer(&e) => {
                // No MX; fall back to the implicit MX on the host record
                match self.resolver.lookup_ip(domain).await {
                    Ok(lookup) => {
                        let found = lookup.iter().next().is_some();
                        debug!(domain = %domain, found = found, "Implicit MX lookup completed");
                        Ok(found)
                    }
                    Err(e) if Self::is_empty_answer(&e) => Ok(false),
                    Err(e) => Err(InfrastructureError::Dns(format!(
                        "Host lookup failed for {}: {}",
                        domain, e
                    ))
                    .into()),
                }
            }
            Err(e) => Err(InfrastructureError::Dns(format!(
                "MX lookup failed for {}: {}",
                domain, e
            ))
            .into()),
        }
    }
}
