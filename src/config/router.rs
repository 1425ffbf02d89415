//! Routing configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::routing::Domain;

/// Routing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Enabled domains, comma-separated, in rule priority order
    #[serde(default = "default_domains")]
    pub domains: String,
}

impl RouterConfig {
    /// Parse the enabled domains, keeping their order.
    pub fn domain_list(&self) -> Result<Vec<Domain>, ValidationError> {
        let mut domains = Vec::new();
        for raw in self.domains.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let domain: Domain = raw
                .parse()
                .map_err(|_| ValidationError::UnknownDomain(raw.to_string()))?;
            if !domains.contains(&domain) {
                domains.push(domain);
            }
        }
        if domains.is_empty() {
            return Err(ValidationError::NoDomains);
        }
        Ok(domains)
    }

    /// Validate routing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.domain_list().map(|_| ())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            domains: default_domains(),
        }
    }
}

fn default_domains() -> String {
    "geometry,products".to_string()
}
