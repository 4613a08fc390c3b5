//! The registrable domain value object
//!
//! Adapters read the name, nameservers and requested period from a
//! [`RegistrableDomain`] and write registration details back into it.
//! The caller owns the instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of nameserver slots on a domain record
pub const NAMESERVER_SLOTS: usize = 4;

/// A domain as seen by a registrar adapter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrableDomain {
    /// Fully-qualified domain name (e.g., "example.com")
    pub name: String,

    /// Nameserver slot 1
    pub ns1: Option<String>,
    /// Nameserver slot 2
    pub ns2: Option<String>,
    /// Nameserver slot 3
    pub ns3: Option<String>,
    /// Nameserver slot 4
    pub ns4: Option<String>,

    /// Requested registration period in years (None or 0 = registrar minimum)
    #[serde(default)]
    pub registration_period: Option<u32>,

    /// When the domain was registered
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,

    /// When the domain expires
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,

    /// Registrar lock flag
    #[serde(default)]
    pub locked: bool,

    /// WHOIS privacy flag
    #[serde(default)]
    pub privacy_enabled: bool,
}

impl RegistrableDomain {
    /// Create a domain record with only a name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set nameservers in slot order (extra entries beyond four are ignored)
    pub fn with_nameservers<I, S>(mut self, nameservers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_nameservers(nameservers.into_iter().map(|ns| Some(ns.into())));
        self
    }

    /// Set the requested registration period
    pub fn with_registration_period(mut self, years: u32) -> Self {
        self.registration_period = Some(years);
        self
    }

    /// The four nameserver slots, in order
    pub fn nameservers(&self) -> [Option<&str>; NAMESERVER_SLOTS] {
        [
            self.ns1.as_deref(),
            self.ns2.as_deref(),
            self.ns3.as_deref(),
            self.ns4.as_deref(),
        ]
    }

    /// Fill slots 1-4 from `nameservers`; slots without a value are cleared
    pub fn set_nameservers<I>(&mut self, nameservers: I)
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut values = nameservers.into_iter();
        for slot in [&mut self.ns1, &mut self.ns2, &mut self.ns3, &mut self.ns4] {
            *slot = values.next().flatten();
        }
    }
}
