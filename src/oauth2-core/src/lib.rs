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

//! OAuth 2.0 Core - Access Token Responses
//!
//! This crate contains the value types exchanged with an OAuth 2.0
//! [token endpoint]: the [access token][token::AccessToken] issued to a
//! client, and the [access token response][endpoint::AccessTokenResponse]
//! that carries it together with any extra response members.
//!
//! The crate performs no I/O. Callers obtain a response body from the token
//! endpoint with the HTTP client of their choice, and use this crate to turn
//! that body into typed values.
//!
//! ```
//! # use oauth2_core::endpoint::AccessTokenResponse;
//! # use oauth2_core::token::TokenType;
//! let response = AccessTokenResponse::with_token("my-token")
//!     .with_token_type(TokenType::BEARER)
//!     .with_expires_in(3600)
//!     .build();
//! assert_eq!(response.access_token().token_value(), "my-token");
//! ```
//!
//! [token endpoint]: https://datatracker.ietf.org/doc/html/rfc6749#section-3.2

pub mod errors;

pub mod endpoint;

/// Types and functions to work with OAuth 2.0 access tokens.
pub mod token;

/// A `Result` alias where the `Err` case is `oauth2_core::errors::Error`.
pub type Result<T> = std::result::Result<T, crate::errors::Error>;
