//! HTTP clients for the daily rate feed.
//!
//! Provides both async and blocking client variants behind feature flags.

/// URL of the CBR daily JSON feed.
const DEFAULT_FEED_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";

/// Default bound on a single feed request.
const DEFAULT_TIMEOUT: core::time::Duration = core::time::Duration::from_secs(10);

/// Generates a rate-feed client (async or blocking) with builder, fetch
/// method, and tests.
macro_rules! define_feed_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// Feed URL override (for testing).
            url: Option<String>,
            /// Per-request timeout override.
            timeout: Option<Duration>,
        }

        impl $builder {
            /// Overrides the feed URL (useful for testing with a mock server).
            #[inline]
            #[must_use]
            pub fn url<T: Into<String>>(mut self, url: T) -> Self {
                self.url = Some(url.into());
                self
            }

            /// Overrides the per-request timeout (default: 10 seconds).
            #[inline]
            #[must_use]
            pub const fn timeout(mut self, timeout: Duration) -> Self {
                self.timeout = Some(timeout);
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`KursBotError::Http`] if the HTTP client fails to
            /// build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let url = self.url.unwrap_or_else(|| DEFAULT_FEED_URL.to_owned());
                let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
                tracing::debug!(url = %url, timeout_secs = timeout.as_secs(), "building feed client");
                let http = <$http_type>::builder().timeout(timeout).build()?;

                Ok($client { http, url })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// Feed URL.
            url: String,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder {
                    url: None,
                    timeout: None,
                }
            }

            /// Fetches the daily feed and normalizes it into a [`RateTable`].
            ///
            /// # Errors
            ///
            /// Returns [`KursBotError::RateFeed`] on a non-success status,
            /// [`KursBotError::Http`] on a transport failure (including
            /// timeout), and [`KursBotError::Serialization`] on a malformed
            /// body. No retries: a failed fetch is fatal for this call only.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn fetch(&self) -> Result<RateTable> {
                tracing::debug!(url = %self.url, "fetching daily rates");
                let response: $resp_type = self
                    .http
                    .get(&self.url)
                    .send()
                    $( .$await_ext )?
                    ?;

                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    let body = response.text() $( .$await_ext )? ?;
                    tracing::trace!(body_len = body.len(), "parsing feed body");
                    let daily: DailyRates = serde_json::from_str(&body)?;
                    Ok(RateTable::from_daily(daily))
                } else {
                    let message = response
                        .text()
                        $( .$await_ext )?
                        .unwrap_or_else(|_| "unknown error".to_owned());
                    tracing::debug!(status = status.as_u16(), message = %message, "feed error");
                    Err(KursBotError::RateFeed {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
        }

    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the rate feed.

    use core::time::Duration;

    use super::{DEFAULT_FEED_URL, DEFAULT_TIMEOUT};
    use crate::error::{KursBotError, Result};
    use crate::models::{DailyRates, RateTable};

    define_feed_client! {
        client_name: RateFeedClient,
        builder_name: RateFeedClientBuilder,
        http_type: reqwest::Client,
        response_type: reqwest::Response,
        client_doc: "Async client for the daily rate feed.\n\nUse [`RateFeedClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`RateFeedClient`].",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the rate feed.

    use core::time::Duration;

    use super::{DEFAULT_FEED_URL, DEFAULT_TIMEOUT};
    use crate::error::{KursBotError, Result};
    use crate::models::{DailyRates, RateTable};

    define_feed_client! {
        client_name: RateFeedBlockingClient,
        builder_name: RateFeedBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the daily rate feed.\n\nUse [`RateFeedBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`RateFeedBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{RateFeedClient, RateFeedClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{RateFeedBlockingClient, RateFeedBlockingClientBuilder};

#[cfg(all(test, feature = "async"))]
mod fetch_tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::RateFeedClient;
    use crate::error::KursBotError;
    use crate::models::CurrencyCode;

    /// Feed body with a per-unit dollar and a per-100 forint quote.
    const FEED_BODY: &str = r#"{
        "Valute": {
            "USD": {"CharCode": "USD", "Name": "US Dollar", "Value": 90.0, "Nominal": 1},
            "HUF": {"CharCode": "HUF", "Name": "Hungarian Forint", "Value": 25.0, "Nominal": 100}
        }
    }"#;

    fn client_for(server: &MockServer) -> RateFeedClient {
        RateFeedClient::builder().url(server.uri()).build().unwrap()
    }

    #[tokio::test]
    async fn fetch_normalizes_and_injects_ruble() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
            .mount(&server)
            .await;

        let table = client_for(&server).fetch().await.unwrap();
        assert_eq!(table.len(), 3);
        let usd = table.get(&CurrencyCode::new("USD")).unwrap();
        assert!((usd.units_per_rub - 90.0).abs() < f64::EPSILON);
        let huf = table.get(&CurrencyCode::new("HUF")).unwrap();
        assert!((huf.units_per_rub - 0.25).abs() < f64::EPSILON);
        let rub = table.get(&CurrencyCode::new("RUB")).unwrap();
        assert!(rub.is_base);
    }

    #[tokio::test]
    async fn fetch_non_success_is_rate_feed_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch().await.unwrap_err();
        assert!(matches!(
            err,
            KursBotError::RateFeed { status: 503, message } if message == "maintenance"
        ));
    }

    #[tokio::test]
    async fn fetch_malformed_body_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, KursBotError::Serialization(_)));
    }
}
