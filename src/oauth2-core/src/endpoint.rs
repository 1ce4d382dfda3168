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

//! Token endpoint response types and the names of the response members.

pub mod access_token_response;
mod parameters;

pub use access_token_response::{AccessTokenResponse, Builder};

/// The access token issued by the authorization server.
pub const ACCESS_TOKEN: &str = "access_token";
/// The type of the token issued.
pub const TOKEN_TYPE: &str = "token_type";
/// The lifetime in seconds of the access token.
pub const EXPIRES_IN: &str = "expires_in";
/// The space-delimited scopes of the access token.
pub const SCOPE: &str = "scope";
/// The refresh token, kept with the additional parameters of a response.
pub const REFRESH_TOKEN: &str = "refresh_token";
