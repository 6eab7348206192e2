//! Health probing: one bounded request per network-facing service.
//!
//! A probe either gets a success response in time or it doesn't. Transport
//! errors, timeouts and error statuses all fold into [`Health::Unhealthy`];
//! nothing is retried and nothing is remembered between runs.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::ProbeTarget;
use crate::model::{Health, ServiceHealth};

/// Classifies a single endpoint.
pub trait Probe {
    fn probe(&self, url: &str) -> Health;
}

/// Probes over HTTP(S) with a fixed timeout.
pub struct HttpProbe {
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn client(&self) -> reqwest::Result<Client> {
        // The proxy usually serves a self-signed certificate; this is a
        // liveness check, not a trust decision.
        Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .danger_accept_invalid_certs(true)
            .build()
    }
}

impl Probe for HttpProbe {
    fn probe(&self, url: &str) -> Health {
        let response = self.client().and_then(|client| client.get(url).send());

        match response {
            Ok(r) if r.status().is_success() => Health::Healthy,
            Ok(r) => {
                debug!(url, status = %r.status(), "probe returned error status");
                Health::Unhealthy
            }
            Err(e) => {
                debug!(url, error = %e, "probe failed");
                Health::Unhealthy
            }
        }
    }
}

/// Probe every target once, in order.
pub fn probe_all(probe: &dyn Probe, targets: &[ProbeTarget]) -> Vec<ServiceHealth> {
    targets
        .iter()
        .map(|target| ServiceHealth {
            name: target.name.clone(),
            url: target.url.clone(),
            health: probe.probe(&target.url),
        })
        .collect()
}
