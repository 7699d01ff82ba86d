//! Lightning address resolution.
//!
//! Turns an identifier into two discovery fetches, keeps whatever succeeded and
//! decides which status the caller sees. Each endpoint is tracked as an explicit
//! [`FetchOutcome`] so that "answered with garbage" and "never answered" stay
//! distinct when the status is chosen.

use serde::Serialize;
use serde_json::Value;

use crate::address::LightningAddress;
use crate::error::FetchError;
use crate::fetch::DiscoveryFetcher;
use crate::metrics::UPSTREAM_FETCHES_TOTAL;
use crate::reporter::{ErrorEvent, ErrorReporter};

/// Combined discovery documents. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddressDetails {
    pub lnurlp: Option<Value>,
    pub keysend: Option<Value>,
}

/// What a single discovery fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The endpoint could not be reached at all.
    NoResponse,
    /// The endpoint answered with a status of 300 or above.
    FailureStatus(u16),
    /// The endpoint answered successfully but the body was not JSON.
    InvalidJson(u16),
    Success(Value),
}

impl FetchOutcome {
    fn from_result(result: Result<(Value, u16), FetchError>) -> Self {
        match result {
            Ok((value, _)) => FetchOutcome::Success(value),
            Err(FetchError::Unreachable { .. }) => FetchOutcome::NoResponse,
            Err(FetchError::FailureStatus { status, .. }) => FetchOutcome::FailureStatus(status),
            Err(FetchError::InvalidJson { status, .. }) => FetchOutcome::InvalidJson(status),
        }
    }

    pub fn responded(&self) -> bool {
        !matches!(self, FetchOutcome::NoResponse)
    }

    fn label(&self) -> &'static str {
        match self {
            FetchOutcome::NoResponse => "unreachable",
            FetchOutcome::FailureStatus(_) => "failure_status",
            FetchOutcome::InvalidJson(_) => "invalid_json",
            FetchOutcome::Success(_) => "success",
        }
    }

    fn into_value(self) -> Option<Value> {
        match self {
            FetchOutcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// How a resolution ended, which fixes the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The identifier is not `local@domain`.
    InvalidAddress,
    /// Neither endpoint produced a response.
    Unreachable,
    /// Both endpoints answered with failure statuses; carries lnurlp's.
    UpstreamFailed(u16),
    Ok,
}

impl Verdict {
    /// Decide from the two per-endpoint outcomes.
    pub fn decide(lnurlp: &FetchOutcome, keysend: &FetchOutcome) -> Self {
        if !lnurlp.responded() && !keysend.responded() {
            return Verdict::Unreachable;
        }
        match (lnurlp, keysend) {
            (FetchOutcome::FailureStatus(status), FetchOutcome::FailureStatus(_)) => {
                Verdict::UpstreamFailed(*status)
            }
            _ => Verdict::Ok,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Verdict::InvalidAddress | Verdict::Unreachable => 400,
            Verdict::UpstreamFailed(status) => *status,
            Verdict::Ok => 200,
        }
    }

    /// Bad-request answers are rendered compact, everything else pretty.
    pub fn pretty(&self) -> bool {
        !matches!(self, Verdict::InvalidAddress | Verdict::Unreachable)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub details: AddressDetails,
    pub verdict: Verdict,
}

impl Resolution {
    pub fn status(&self) -> u16 {
        self.verdict.status()
    }
}

/// Stateless resolver over a [`DiscoveryFetcher`].
pub struct Resolver<F> {
    fetcher: F,
    reporter: ErrorReporter,
}

impl<F: DiscoveryFetcher> Resolver<F> {
    pub fn new(fetcher: F, reporter: ErrorReporter) -> Self {
        Self { fetcher, reporter }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolve `identifier`. Never fails: every problem is folded into the verdict.
    pub async fn resolve(&self, identifier: &str) -> Resolution {
        let address = match LightningAddress::parse(identifier) {
            Ok(address) => address,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting lookup");
                return Resolution {
                    details: AddressDetails::default(),
                    verdict: Verdict::InvalidAddress,
                };
            }
        };
        let urls = address.discovery_urls();

        // Sequential on purpose: keysend is only fetched once lnurlp is settled.
        let lnurlp = self.fetch("lnurlp", &urls.lnurlp).await;
        let keysend = self.fetch("keysend", &urls.keysend).await;

        let verdict = Verdict::decide(&lnurlp, &keysend);
        tracing::debug!(
            address = %address,
            lnurlp = lnurlp.label(),
            keysend = keysend.label(),
            status = verdict.status(),
            "resolved lightning address"
        );

        Resolution {
            details: AddressDetails {
                lnurlp: lnurlp.into_value(),
                keysend: keysend.into_value(),
            },
            verdict,
        }
    }

    async fn fetch(&self, endpoint: &'static str, url: &str) -> FetchOutcome {
        let result = self.fetcher.fetch_json(url).await;
        if let Err(ref e) = result {
            tracing::error!(endpoint, error = %e, "discovery fetch failed");
            self.reporter
                .capture(ErrorEvent::error(e.kind(), e.to_string()).with_url(url));
        }
        let outcome = FetchOutcome::from_result(result);
        UPSTREAM_FETCHES_TOTAL
            .with_label_values(&[endpoint, outcome.label()])
            .inc();
        outcome
    }
}
