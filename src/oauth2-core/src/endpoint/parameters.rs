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

//! Mapping between token endpoint response bodies and [AccessTokenResponse].

use super::access_token_response::{AccessTokenResponse, Builder};
use super::{ACCESS_TOKEN, EXPIRES_IN, SCOPE, TOKEN_TYPE};
use crate::Result;
use crate::token::TokenType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

const STANDARD_PARAMETERS: [&str; 4] = [ACCESS_TOKEN, TOKEN_TYPE, EXPIRES_IN, SCOPE];

/// The body of a successful token endpoint response, as received.
///
/// See https://datatracker.ietf.org/doc/html/rfc6749#section-5.1
#[derive(Deserialize)]
struct WireResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<ExpiresIn>,
    #[serde(default)]
    scope: Option<Scope>,
    #[serde(flatten)]
    additional_parameters: HashMap<String, Value>,
}

/// Some servers, and every form-encoded body, send `expires_in` as a string.
///
/// Values that are neither an integer nor a string land in `Other` and are
/// treated as absent, so a bad `expires_in` never fails the whole response.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(i64),
    Text(String),
    Other(Value),
}

impl ExpiresIn {
    fn seconds(self) -> i64 {
        match self {
            ExpiresIn::Seconds(seconds) => seconds,
            ExpiresIn::Text(text) if text.trim().is_empty() => 0,
            ExpiresIn::Text(text) => text.trim().parse().unwrap_or_else(|e| {
                tracing::warn!("ignoring invalid {EXPIRES_IN} value {text:?}: {e}");
                0
            }),
            // Larger than any `i64`, the expiration saturates.
            ExpiresIn::Other(value) if value.is_u64() => i64::MAX,
            ExpiresIn::Other(value) => match value.as_f64() {
                Some(f) if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&f) => {
                    f as i64
                }
                _ => {
                    tracing::warn!("ignoring invalid {EXPIRES_IN} value {value}");
                    0
                }
            },
        }
    }
}

/// `scope` is a space-delimited string, but some servers send a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scope {
    Text(String),
    List(Vec<String>),
}

impl Scope {
    fn into_scopes(self) -> Vec<String> {
        match self {
            Scope::Text(text) => text.split_whitespace().map(str::to_string).collect(),
            Scope::List(list) => list,
        }
    }
}

impl WireResponse {
    fn into_builder(self) -> Builder {
        let expires_in = self.expires_in.map(ExpiresIn::seconds).unwrap_or_default();
        tracing::debug!(
            expires_in,
            additional_parameters = self.additional_parameters.len(),
            "decoded access token response"
        );
        let mut builder = AccessTokenResponse::with_token(self.access_token)
            .with_expires_in(expires_in)
            .with_additional_parameters(self.additional_parameters);
        if let Some(token_type) = self.token_type {
            builder = builder.with_token_type(TokenType::parse(&token_type));
        }
        if let Some(scope) = self.scope {
            builder = builder.with_scopes(scope.into_scopes());
        }
        builder
    }
}

impl AccessTokenResponse {
    /// Creates a response from a JSON token endpoint response body.
    ///
    /// The `access_token` member is required. Members other than
    /// `access_token`, `token_type`, `expires_in` and `scope` are kept in the
    /// [additional parameters][AccessTokenResponse::additional_parameters].
    ///
    /// # Example
    /// ```
    /// # use oauth2_core::endpoint::AccessTokenResponse;
    /// # use oauth2_core::token::TokenType;
    /// let body = br#"{
    ///     "access_token": "my-token",
    ///     "token_type": "bearer",
    ///     "expires_in": 3600,
    ///     "refresh_token": "my-refresh-token"
    /// }"#;
    /// let response = AccessTokenResponse::from_json(body)?;
    /// assert_eq!(response.access_token().token_type(), &TokenType::BEARER);
    /// assert!(response.additional_parameters().contains_key("refresh_token"));
    /// # Ok::<(), oauth2_core::errors::Error>(())
    /// ```
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let wire: WireResponse = serde_json::from_slice(body)?;
        Ok(wire.into_builder().build())
    }

    /// Creates a response from an `application/x-www-form-urlencoded` body.
    ///
    /// Additional parameters are kept as strings. If a name repeats, the last
    /// value wins.
    pub fn from_form(body: &str) -> Result<Self> {
        let parameters = url::form_urlencoded::parse(body.as_bytes())
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        Self::from_parameters(parameters)
    }

    /// Creates a response from the members of a token endpoint response.
    pub fn from_parameters(parameters: Map<String, Value>) -> Result<Self> {
        let wire: WireResponse = serde_json::from_value(Value::Object(parameters))?;
        Ok(wire.into_builder().build())
    }

    /// Returns the response members, in the format of a token endpoint
    /// response.
    ///
    /// `expires_in` is the lifetime of the token in whole seconds. `scope`
    /// is omitted when the token has no scopes. Additional parameters that
    /// reuse a standard member name are skipped.
    pub fn to_parameters(&self) -> Map<String, Value> {
        let token = self.access_token();
        let mut parameters = Map::new();
        parameters.insert(ACCESS_TOKEN.to_string(), token.token_value().into());
        parameters.insert(TOKEN_TYPE.to_string(), token.token_type().as_str().into());
        parameters.insert(
            EXPIRES_IN.to_string(),
            token.lifetime().whole_seconds().into(),
        );
        if !token.scopes().is_empty() {
            let mut scopes: Vec<&str> = token.scopes().iter().map(String::as_str).collect();
            scopes.sort_unstable();
            parameters.insert(SCOPE.to_string(), scopes.join(" ").into());
        }
        for (name, value) in self.additional_parameters() {
            if STANDARD_PARAMETERS.contains(&name.as_str()) {
                continue;
            }
            parameters.insert(name.clone(), value.clone());
        }
        parameters
    }
}

impl<'de> Deserialize<'de> for AccessTokenResponse {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        WireResponse::deserialize(deserializer).map(|wire| wire.into_builder().build())
    }
}

impl Serialize for AccessTokenResponse {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_parameters().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::REFRESH_TOKEN;
    use crate::errors::Error;
    use serde_json::json;
    use std::collections::HashSet;
    use test_case::test_case;
    use time::Duration;

    type TestResult = anyhow::Result<()>;

    fn scopes(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_json() -> TestResult {
        let body = json!({
            "access_token": "token-test-only",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "read write",
            "refresh_token": "refresh-test-only",
            "id_token": "id-test-only",
            "custom": {"nested": [1, 2]},
        });
        let response = AccessTokenResponse::from_json(body.to_string().as_bytes())?;
        let token = response.access_token();
        assert_eq!(token.token_value(), "token-test-only");
        assert_eq!(token.token_type(), &TokenType::BEARER);
        assert_eq!(token.lifetime(), Duration::seconds(3600));
        assert_eq!(token.scopes(), &scopes(&["read", "write"]));

        let got = response.additional_parameters();
        assert_eq!(got.len(), 3, "{got:?}");
        assert_eq!(got[REFRESH_TOKEN], json!("refresh-test-only"));
        assert_eq!(got["id_token"], json!("id-test-only"));
        assert_eq!(got["custom"], json!({"nested": [1, 2]}));
        Ok(())
    }

    #[test]
    fn from_json_minimal() -> TestResult {
        let response = AccessTokenResponse::from_json(br#"{"access_token": "xyz"}"#)?;
        let token = response.access_token();
        assert_eq!(token.token_value(), "xyz");
        assert_eq!(token.token_type(), &TokenType::default());
        assert_eq!(token.lifetime(), Duration::seconds(1));
        assert!(token.scopes().is_empty(), "{token:?}");
        assert!(response.additional_parameters().is_empty());
        Ok(())
    }

    #[test_case(json!(3600), 3600 ; "number")]
    #[test_case(json!("3600"), 3600 ; "string")]
    #[test_case(json!(" 60 "), 60 ; "padded string")]
    #[test_case(json!(0), 1 ; "zero")]
    #[test_case(json!(-5), 1 ; "negative")]
    #[test_case(json!(""), 1 ; "empty string")]
    #[test_case(json!("soon"), 1 ; "invalid string")]
    #[test_case(json!(null), 1 ; "null")]
    #[test_case(json!(3600.0), 3600 ; "whole float")]
    #[test_case(json!(-5.0), 1 ; "negative whole float")]
    #[test_case(json!(1.5), 1 ; "fractional float")]
    #[test_case(json!(true), 1 ; "boolean")]
    #[test_case(json!([3600]), 1 ; "array")]
    #[test_case(json!({"seconds": 3600}), 1 ; "object")]
    fn expires_in(value: Value, want: i64) -> TestResult {
        let body = json!({"access_token": "token-test-only", "expires_in": value});
        let response = AccessTokenResponse::from_json(body.to_string().as_bytes())?;
        assert_eq!(
            response.access_token().lifetime(),
            Duration::seconds(want)
        );
        assert!(response.additional_parameters().is_empty());
        Ok(())
    }

    #[test_case("bearer", TokenType::BEARER ; "lowercase bearer")]
    #[test_case("", TokenType::BEARER ; "empty")]
    #[test_case("DPoP", TokenType::new("DPoP") ; "dpop")]
    fn token_type(value: &str, want: TokenType) -> TestResult {
        let body = json!({"access_token": "token-test-only", "token_type": value});
        let response = AccessTokenResponse::from_json(body.to_string().as_bytes())?;
        assert_eq!(response.access_token().token_type(), &want);
        Ok(())
    }

    #[test]
    fn expires_in_above_i64_saturates() -> TestResult {
        let body = json!({"access_token": "token-test-only", "expires_in": u64::MAX});
        let response = AccessTokenResponse::from_json(body.to_string().as_bytes())?;
        let token = response.access_token();
        assert!(token.lifetime() > Duration::days(365 * 1000), "{token:?}");
        assert!(response.additional_parameters().is_empty());
        Ok(())
    }

    #[test]
    fn scope_list() -> TestResult {
        let body = json!({"access_token": "token-test-only", "scope": ["read", "write", "read"]});
        let response = AccessTokenResponse::from_json(body.to_string().as_bytes())?;
        assert_eq!(
            response.access_token().scopes(),
            &scopes(&["read", "write"])
        );
        Ok(())
    }

    #[test]
    fn scope_bad_type() {
        let body = json!({"access_token": "token-test-only", "scope": 42});
        let err = AccessTokenResponse::from_json(body.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)), "{err:?}");
    }

    #[test]
    fn scope_whitespace() -> TestResult {
        let body = json!({"access_token": "token-test-only", "scope": " read  write read "});
        let response = AccessTokenResponse::from_json(body.to_string().as_bytes())?;
        assert_eq!(
            response.access_token().scopes(),
            &scopes(&["read", "write"])
        );
        Ok(())
    }

    #[test_case(json!({"token_type": "Bearer"}) ; "missing")]
    #[test_case(json!({"access_token": null}) ; "null")]
    #[test_case(json!({"access_token": 42}) ; "number")]
    fn bad_access_token(body: Value) {
        let err = AccessTokenResponse::from_json(body.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)), "{err:?}");
    }

    #[test]
    fn malformed_json() {
        let err = AccessTokenResponse::from_json(b"{\"access_token\": ").unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)), "{err:?}");
    }

    #[test]
    fn from_form() -> TestResult {
        let body = "access_token=token%2Btest&token_type=bearer&expires_in=120\
                    &scope=read+write&refresh_token=refresh-test-only";
        let response = AccessTokenResponse::from_form(body)?;
        let token = response.access_token();
        assert_eq!(token.token_value(), "token+test");
        assert_eq!(token.token_type(), &TokenType::BEARER);
        assert_eq!(token.lifetime(), Duration::seconds(120));
        assert_eq!(token.scopes(), &scopes(&["read", "write"]));
        assert_eq!(
            response.additional_parameters(),
            &HashMap::from([(REFRESH_TOKEN.to_string(), json!("refresh-test-only"))])
        );
        Ok(())
    }

    #[test]
    fn from_form_matches_json() -> TestResult {
        let form = AccessTokenResponse::from_form(
            "access_token=abc123&token_type=Bearer&expires_in=3600&scope=read%20write&state=xyz",
        )?;
        let json = AccessTokenResponse::from_json(
            json!({
                "access_token": "abc123",
                "token_type": "Bearer",
                "expires_in": 3600,
                "scope": "read write",
                "state": "xyz",
            })
            .to_string()
            .as_bytes(),
        )?;
        assert_eq!(form.access_token().token_value(), json.access_token().token_value());
        assert_eq!(form.access_token().token_type(), json.access_token().token_type());
        assert_eq!(form.access_token().lifetime(), json.access_token().lifetime());
        assert_eq!(form.access_token().scopes(), json.access_token().scopes());
        assert_eq!(form.additional_parameters(), json.additional_parameters());
        Ok(())
    }

    #[test]
    fn from_form_missing_access_token() {
        let err = AccessTokenResponse::from_form("token_type=bearer").unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)), "{err:?}");
    }

    #[test]
    fn to_parameters() {
        let response = AccessTokenResponse::with_token("abc123")
            .with_expires_in(3600)
            .with_scopes(["write", "read"])
            .with_additional_parameters([
                (REFRESH_TOKEN, json!("refresh-test-only")),
                (ACCESS_TOKEN, json!("ignored")),
                (SCOPE, json!("ignored")),
            ])
            .build();
        let got = Value::Object(response.to_parameters());
        let want = json!({
            "access_token": "abc123",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "read write",
            "refresh_token": "refresh-test-only",
        });
        assert_eq!(got, want);
    }

    #[test]
    fn to_parameters_without_scopes() {
        let response = AccessTokenResponse::with_token("xyz").build();
        let got = response.to_parameters();
        assert!(!got.contains_key(SCOPE), "{got:?}");
        assert_eq!(got[EXPIRES_IN], json!(1));
    }

    #[test]
    fn serde() -> TestResult {
        let response: AccessTokenResponse = serde_json::from_value(json!({
            "access_token": "abc123",
            "token_type": "Bearer",
            "expires_in": 600,
            "scope": "read",
            "id_token": "id-test-only",
        }))?;
        assert_eq!(response.access_token().lifetime(), Duration::seconds(600));

        let got = serde_json::to_value(&response)?;
        let want = json!({
            "access_token": "abc123",
            "token_type": "Bearer",
            "expires_in": 600,
            "scope": "read",
            "id_token": "id-test-only",
        });
        assert_eq!(got, want);
        Ok(())
    }
}
