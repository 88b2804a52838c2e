//! Paymail address (`alias@domain`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spv_errors::Error;

use crate::errors::ERR_PAYMAIL_INVALID;

/// A parsed, normalized paymail address.
///
/// Alias and domain are stored lowercase; comparison is on the
/// normalized form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paymail {
    alias: String,
    domain: String,
}

impl Paymail {
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn address(&self) -> String {
        self.to_string()
    }
}

fn valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'))
}

fn valid_domain(domain: &str) -> bool {
    domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
}

impl FromStr for Paymail {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        let Some((alias, domain)) = normalized.split_once('@') else {
            return Err(ERR_PAYMAIL_INVALID.clone());
        };
        if !valid_alias(alias) || !valid_domain(domain) {
            return Err(ERR_PAYMAIL_INVALID.clone());
        }
        Ok(Paymail {
            alias: alias.to_string(),
            domain: domain.to_string(),
        })
    }
}

impl fmt::Display for Paymail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.alias, self.domain)
    }
}
