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

//! Errors reported by this crate.
//!
//! Building an [AccessTokenResponse](crate::endpoint::AccessTokenResponse)
//! never fails. Errors only come from decoding a token endpoint response
//! body, from the checked [AccessToken](crate::token::AccessToken)
//! constructor, or from rendering a token as an HTTP header.

/// Represents an error decoding or using an access token.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The token endpoint response body could not be decoded.
    ///
    /// This includes malformed JSON and a missing or ill-typed
    /// `access_token` member.
    #[error("unable to deserialize access token response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The access token fields are not valid.
    #[error("invalid access token: {0}")]
    InvalidToken(String),

    /// The access token cannot be used as an HTTP header value.
    #[error("access token is not a valid header value")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
}

impl Error {
    pub(crate) fn invalid_token<T: Into<String>>(message: T) -> Self {
        Error::InvalidToken(message.into())
    }
}
