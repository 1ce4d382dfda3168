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

//! Types and functions to work with OAuth 2.0 [Access Tokens].
//!
//! [Access Tokens]: https://datatracker.ietf.org/doc/html/rfc6749#section-1.4

use crate::Result;
use crate::errors::Error;
use http::HeaderValue;
use std::borrow::Cow;
use std::collections::HashSet;
use time::{Duration, OffsetDateTime};

/// The type of an access token.
///
/// The type tells the client how to use the token when making requests. The
/// most common type is [TokenType::BEARER], which is also the default.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenType(Cow<'static, str>);

impl TokenType {
    /// A [Bearer Token](https://datatracker.ietf.org/doc/html/rfc6750).
    pub const BEARER: TokenType = TokenType(Cow::Borrowed("Bearer"));

    /// Creates a token type with the given value, kept verbatim.
    pub fn new<T: Into<String>>(value: T) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// Parses the `token_type` member of a token endpoint response.
    ///
    /// Token types are case-insensitive, so any spelling of `bearer` maps to
    /// [TokenType::BEARER]. An empty value also maps to the default. Other
    /// values are kept as received.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case(Self::BEARER.as_str()) {
            return Self::BEARER;
        }
        Self::new(value)
    }

    /// Returns the token type as it appears on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TokenType {
    fn default() -> Self {
        Self::BEARER
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An OAuth 2.0 access token.
///
/// Access tokens are credentials used to access protected resources. A token
/// has a [type][TokenType], an opaque value, the instant it was issued, the
/// instant it expires, and the scopes granted to it.
///
/// Access tokens are immutable.
#[derive(Clone, PartialEq)]
pub struct AccessToken {
    token_type: TokenType,
    token_value: String,
    issued_at: OffsetDateTime,
    expires_at: OffsetDateTime,
    scopes: HashSet<String>,
}

impl AccessToken {
    /// Creates a new access token.
    ///
    /// Returns an error if `token_value` is empty, or if `expires_at` is not
    /// after `issued_at`. A `None` value for `scopes` means the token has no
    /// scopes.
    ///
    /// # Example
    /// ```
    /// # use oauth2_core::token::{AccessToken, TokenType};
    /// # use time::{Duration, OffsetDateTime};
    /// let now = OffsetDateTime::now_utc();
    /// let token = AccessToken::new(
    ///     TokenType::BEARER,
    ///     "my-token",
    ///     now,
    ///     now + Duration::hours(1),
    ///     None,
    /// )?;
    /// assert!(token.scopes().is_empty());
    /// # Ok::<(), oauth2_core::errors::Error>(())
    /// ```
    pub fn new<T: Into<String>>(
        token_type: TokenType,
        token_value: T,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
        scopes: Option<HashSet<String>>,
    ) -> Result<Self> {
        let token_value = token_value.into();
        if token_value.is_empty() {
            return Err(Error::invalid_token("token value cannot be empty"));
        }
        if expires_at <= issued_at {
            return Err(Error::invalid_token(format!(
                "expires_at ({expires_at}) must be after issued_at ({issued_at})"
            )));
        }
        Ok(Self::from_parts(
            token_type,
            token_value,
            issued_at,
            expires_at,
            scopes,
        ))
    }

    // The response builder accepts its inputs as-is, so it skips the checks
    // in `new()`.
    pub(crate) fn from_parts(
        token_type: TokenType,
        token_value: String,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
        scopes: Option<HashSet<String>>,
    ) -> Self {
        Self {
            token_type,
            token_value,
            issued_at,
            expires_at,
            scopes: scopes.unwrap_or_default(),
        }
    }

    /// The type of the token.
    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }

    /// The token value.
    ///
    /// This is the value sent to the resource server, typically in the
    /// `Authorization:` header.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// The instant at which the token was issued.
    pub fn issued_at(&self) -> OffsetDateTime {
        self.issued_at
    }

    /// The instant at which the token expires.
    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    /// The scopes granted to the token. May be empty.
    pub fn scopes(&self) -> &HashSet<String> {
        &self.scopes
    }

    /// The time between issuance and expiration.
    pub fn lifetime(&self) -> Duration {
        self.expires_at - self.issued_at
    }

    /// Returns `true` if the token is expired at the instant `now`.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }

    /// Returns the value of an `Authorization:` header carrying this token.
    ///
    /// The header value is marked as sensitive.
    pub fn authorization_header(&self) -> Result<HeaderValue> {
        let mut value =
            HeaderValue::from_str(&format!("{} {}", self.token_type, self.token_value))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("token_value", &"[censored]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .finish()
    }
}
