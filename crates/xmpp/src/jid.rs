//! Jabber identifiers.
//!
//! A JID names an account (`local@domain`), a server (`domain`), or a
//! single connected client (`local@domain/resource`). The local and domain
//! parts are case-insensitive on the wire and are normalized to lowercase
//! here so that map lookups and equality behave; the resource part is case
//! sensitive and kept as written.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JidError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Jid {
    local: Option<String>,
    domain: String,
    resource: Option<String>,
}

impl Jid {
    pub fn from_parts(
        local: Option<&str>,
        domain: &str,
        resource: Option<&str>,
    ) -> Result<Self, JidError> {
        if domain.is_empty() {
            return Err(JidError::EmptyDomain);
        }
        if local == Some("") {
            return Err(JidError::EmptyLocalpart);
        }
        if resource == Some("") {
            return Err(JidError::EmptyResource);
        }
        Ok(Self {
            local: local.map(|part| part.to_lowercase()),
            domain: domain.to_lowercase(),
            resource: resource.map(str::to_owned),
        })
    }

    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn is_bare(&self) -> bool {
        self.resource.is_none()
    }

    pub fn is_full(&self) -> bool {
        self.resource.is_some()
    }

    /// The same address with the resource stripped.
    pub fn to_bare(&self) -> Jid {
        Jid {
            local: self.local.clone(),
            domain: self.domain.clone(),
            resource: None,
        }
    }

    pub fn with_resource(&self, resource: &str) -> Result<Jid, JidError> {
        if resource.is_empty() {
            return Err(JidError::EmptyResource);
        }
        Ok(Jid {
            local: self.local.clone(),
            domain: self.domain.clone(),
            resource: Some(resource.to_owned()),
        })
    }

    /// Compares account identity, ignoring resources on either side.
    pub fn eq_bare(&self, other: &Jid) -> bool {
        self.local == other.local && self.domain == other.domain
    }
}

impl FromStr for Jid {
    type Err = JidError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(JidError::Empty);
        }
        // The resource separator wins over '@', so "user@host/a@b" keeps
        // the '@' inside the resource.
        let (address, resource) = match value.split_once('/') {
            Some((address, resource)) => (address, Some(resource)),
            None => (value, None),
        };
        let (local, domain) = match address.split_once('@') {
            Some((local, domain)) => (Some(local), domain),
            None => (None, address),
        };
        Jid::from_parts(local, domain, resource)
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(local) = &self.local {
            write!(f, "{local}@")?;
        }
        write!(f, "{}", self.domain)?;
        if let Some(resource) = &self.resource {
            write!(f, "/{resource}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Jid {
    type Error = JidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Jid> for String {
    fn from(jid: Jid) -> Self {
        jid.to_string()
    }
}
