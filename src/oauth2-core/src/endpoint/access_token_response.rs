// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! [Access Token Responses] and their builder.
//!
//! [Access Token Responses]: https://datatracker.ietf.org/doc/html/rfc6749#section-5.1

use crate::token::{AccessToken, TokenType};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use time::{Date, Duration, OffsetDateTime, Time};

/// Lifetime assigned to tokens without a positive `expires_in`.
///
/// `expires_in` is only RECOMMENDED in a token response. Without it, the
/// token would expire at the instant it was issued.
const MIN_LIFETIME: Duration = Duration::seconds(1);

/// Expiration used when `expires_in` overflows the representable range.
fn max_expiration() -> OffsetDateTime {
    Date::MAX.with_time(Time::MIDNIGHT).assume_utc()
}

/// A representation of an OAuth 2.0 Access Token Response.
///
/// Responses are immutable. Use [AccessTokenResponse::with_token] to create
/// one, or parse one from a token endpoint response body with
/// [AccessTokenResponse::from_json] or [AccessTokenResponse::from_form].
#[derive(Clone, PartialEq)]
pub struct AccessTokenResponse {
    access_token: AccessToken,
    additional_parameters: HashMap<String, Value>,
}

impl AccessTokenResponse {
    /// Returns a new [Builder], initialized with the provided token value.
    ///
    /// The value is not validated.
    ///
    /// # Example
    /// ```
    /// # use oauth2_core::endpoint::AccessTokenResponse;
    /// let response = AccessTokenResponse::with_token("my-token")
    ///     .with_expires_in(3600)
    ///     .with_scopes(["read", "write"])
    ///     .build();
    /// assert_eq!(response.access_token().scopes().len(), 2);
    /// ```
    pub fn with_token<T: Into<String>>(token_value: T) -> Builder {
        Builder::new(token_value)
    }

    /// Returns the [AccessToken].
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the additional parameters returned in the response.
    ///
    /// These are the response members other than the standard token fields.
    /// The map may be empty.
    pub fn additional_parameters(&self) -> &HashMap<String, Value> {
        &self.additional_parameters
    }
}

impl std::fmt::Debug for AccessTokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Extra members may carry secrets, e.g. `refresh_token`.
        let mut keys: Vec<&str> = self
            .additional_parameters
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        f.debug_struct("AccessTokenResponse")
            .field("access_token", &self.access_token)
            .field("additional_parameters", &keys)
            .finish()
    }
}

/// A builder for [AccessTokenResponse].
///
/// Every setter overwrites the previous value. [Builder::build] does not
/// consume the builder and may be called more than once; each call creates
/// an independent response issued at the current time.
#[derive(Clone)]
pub struct Builder {
    token_value: String,
    token_type: Option<TokenType>,
    expires_in: i64,
    scopes: Option<HashSet<String>>,
    additional_parameters: Option<HashMap<String, Value>>,
}

impl Builder {
    fn new<T: Into<String>>(token_value: T) -> Self {
        Self {
            token_value: token_value.into(),
            token_type: None,
            expires_in: 0,
            scopes: None,
            additional_parameters: None,
        }
    }

    /// Sets the [type][TokenType] of the token.
    ///
    /// Defaults to [TokenType::BEARER].
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Sets the lifetime of the access token, in seconds.
    ///
    /// Values of zero or less, including the default of zero, give the token
    /// a lifetime of one second.
    pub fn with_expires_in(mut self, expires_in: i64) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// Sets the scopes associated with the access token.
    ///
    /// # Example
    /// ```
    /// # use oauth2_core::endpoint::AccessTokenResponse;
    /// let response = AccessTokenResponse::with_token("my-token")
    ///     .with_scopes(["read", "read", "write"])
    ///     .build();
    /// assert!(response.access_token().scopes().contains("write"));
    /// ```
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the additional parameters returned in the response.
    ///
    /// # Example
    /// ```
    /// # use oauth2_core::endpoint::AccessTokenResponse;
    /// # use serde_json::json;
    /// let response = AccessTokenResponse::with_token("my-token")
    ///     .with_additional_parameters([("id_token", json!("header.claims.sig"))])
    ///     .build();
    /// assert_eq!(response.additional_parameters()["id_token"], json!("header.claims.sig"));
    /// ```
    pub fn with_additional_parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.additional_parameters = Some(
            parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Builds a new [AccessTokenResponse], issued at the current time.
    pub fn build(&self) -> AccessTokenResponse {
        self.build_at(OffsetDateTime::now_utc())
    }

    pub(crate) fn build_at(&self, issued_at: OffsetDateTime) -> AccessTokenResponse {
        let lifetime = if self.expires_in > 0 {
            Duration::seconds(self.expires_in)
        } else {
            // Zero is the default for responses without `expires_in`.
            if self.expires_in < 0 {
                tracing::debug!(
                    expires_in = self.expires_in,
                    "negative expires_in, using minimum token lifetime"
                );
            }
            MIN_LIFETIME
        };
        let expires_at = issued_at
            .checked_add(lifetime)
            .unwrap_or_else(max_expiration);

        AccessTokenResponse {
            access_token: AccessToken::from_parts(
                self.token_type.clone().unwrap_or_default(),
                self.token_value.clone(),
                issued_at,
                expires_at,
                self.scopes.clone(),
            ),
            additional_parameters: self.additional_parameters.clone().unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("token_value", &"[censored]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scopes", &self.scopes)
            .field(
                "additional_parameters",
                &self.additional_parameters.as_ref().map(HashMap::len),
            )
            .finish()
    }
}
