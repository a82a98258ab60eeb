//! DNS lookup abstraction for the optional email deliverability probe

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Resolver capable of answering whether a domain can receive mail
///
/// `has_mail_exchanger` should report `true` when the domain has at least one
/// MX record, or an A/AAAA record as the RFC 5321 implicit MX fallback.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn has_mail_exchanger(&self, domain: &str) -> DomainResult<bool>;
}

/// Resolver that treats every domain as deliverable
///
/// Used when the probe is disabled so the service type stays fully formed
/// without a real resolver behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpDnsResolver;

#[async_trait]
impl DnsResolver for NoOpDnsResolver {
    async fn has_mail_exchanger(&self, _domain: &str) -> DomainResult<bool> {
        Ok(true)
    }
}
