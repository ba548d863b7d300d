use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Tcp,
}

/// A monitored endpoint. `address` is a URL for HTTP targets and
/// `host:port` for TCP targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub address: String,
    pub transport: Transport,
}

impl Target {
    pub fn http(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: url.into(),
            transport: Transport::Http,
        }
    }

    pub fn tcp(name: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: addr.into(),
            transport: Transport::Tcp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "Fully Operational")]
    Operational,
    #[serde(rename = "Experiencing Issues")]
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip)]
    pub address: String,
    pub status: Status,
    #[serde(rename = "last_check")]
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    pub fn new(target: &Target, status: Status) -> Self {
        Self {
            name: target.name.clone(),
            address: target.address.clone(),
            status,
            checked_at: Utc::now(),
        }
    }

    pub fn is_operational(&self) -> bool {
        self.status == Status::Operational
    }
}
