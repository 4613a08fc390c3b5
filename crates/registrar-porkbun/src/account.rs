//! Account domain lookup
//!
//! Porkbun has no single-domain details endpoint. The only way to read a
//! domain's dates and flags is to page through `domain/listAll` until the
//! domain turns up.

use registrar_core::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::client::{Envelope, PorkbunClient};
use crate::convert::lenient_string;

/// Endpoint listing every domain in the account
pub const LIST_ALL_ENDPOINT: &str = "domain/listAll";

/// Records per `listAll` page
pub const PAGE_SIZE: usize = 1000;

/// Largest `start` offset requested before giving up
pub const MAX_SCAN_OFFSET: usize = 50_000;

/// One entry of the account listing, as received
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDomain {
    /// Domain name
    #[serde(default, deserialize_with = "lenient_string")]
    pub domain: Option<String>,
    /// Registry status (e.g., "ACTIVE")
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    /// Creation timestamp (`YYYY-MM-DD HH:MM:SS`)
    #[serde(default, deserialize_with = "lenient_string")]
    pub create_date: Option<String>,
    /// Expiration timestamp (`YYYY-MM-DD HH:MM:SS`)
    #[serde(default, deserialize_with = "lenient_string")]
    pub expire_date: Option<String>,
    /// "1" when the registrar lock is on
    #[serde(default, deserialize_with = "lenient_string")]
    pub security_lock: Option<String>,
    /// "1" when WHOIS privacy is on
    #[serde(default, deserialize_with = "lenient_string")]
    pub whois_privacy: Option<String>,
    /// "1" when auto-renew is on
    #[serde(default, deserialize_with = "lenient_string")]
    pub auto_renew: Option<String>,
}

impl AccountDomain {
    /// Registrar lock flag
    pub fn is_locked(&self) -> bool {
        self.security_lock.as_deref() == Some("1")
    }

    /// WHOIS privacy flag
    pub fn has_privacy(&self) -> bool {
        self.whois_privacy.as_deref() == Some("1")
    }
}

/// Find `fqdn` in the account listing
///
/// Pages through `listAll` from offset 0 in steps of [`PAGE_SIZE`]. A page
/// shorter than [`PAGE_SIZE`] is the last one.
///
/// # Returns
///
/// - `Ok(Some(record))`: First record whose name matches, case-insensitively
/// - `Ok(None)`: Listing ended without a match
/// - `Err(Error)`: A page request failed, or more than [`MAX_SCAN_OFFSET`]
///   records were scanned without reaching the end
pub async fn find_account_domain(
    client: &PorkbunClient,
    fqdn: &str,
) -> Result<Option<AccountDomain>> {
    let mut start = 0usize;

    loop {
        let payload = Envelope::from_iter([(
            "start".to_string(),
            Value::String(start.to_string()),
        )]);
        let envelope = client.post(LIST_ALL_ENDPOINT, payload).await?;

        let page = match envelope.get("domains") {
            Some(Value::Array(page)) => page.as_slice(),
            _ => &[],
        };

        if page.is_empty() {
            return Ok(None);
        }

        for entry in page {
            let Some(record) = entry.as_object() else {
                continue;
            };
            let name = record.get("domain").and_then(Value::as_str).unwrap_or_default();
            if name.eq_ignore_ascii_case(fqdn) {
                return Ok(Some(serde_json::from_value(entry.clone())?));
            }
        }

        if page.len() < PAGE_SIZE {
            return Ok(None);
        }

        start += PAGE_SIZE;
        if start > MAX_SCAN_OFFSET {
            return Err(Error::rejected(
                "Unable to locate domain in Porkbun account after scanning many records.",
            ));
        }

        tracing::debug!("{} not on this page, continuing at offset {}", fqdn, start);
    }
}
