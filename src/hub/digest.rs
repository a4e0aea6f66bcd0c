// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Home Hub MD5 digest scheme
//!
//! Every request envelope carries an `auth-key` chained from the password
//! digest, the session nonce, the request counter and a client nonce. The
//! session cookie carries a second value with the password digest spliced
//! into it. Both must match the firmware bit for bit.

use md5::compute as md5_compute;
use rand::Rng;

/// Offset into the cookie digest at which the password digest is spliced.
const COOKIE_SPLICE_OFFSET: usize = 10;

/// Lowercase hex MD5 of a string
pub fn hex_md5(input: &str) -> String {
    hex::encode(md5_compute(input.as_bytes()).0)
}

/// Digest of the account password, the only form in which it is kept
pub fn password_digest(password: &str) -> String {
    hex_md5(password)
}

/// `auth-key` sent in the body of every request envelope.
///
/// With an empty nonce (before login) the first stage hashes
/// `user::digest`, afterwards `user:nonce:digest`.
pub fn request_auth_key(
    username: &str,
    password_digest: &str,
    nonce: &str,
    request_counter: u32,
    cnonce: u32,
    api_path: &str,
) -> String {
    let ha1 = if nonce.is_empty() {
        hex_md5(&format!("{username}::{password_digest}"))
    } else {
        hex_md5(&format!("{username}:{nonce}:{password_digest}"))
    };
    hex_md5(&format!(
        "{ha1}:{request_counter}:{cnonce}:JSON:/{api_path}"
    ))
}

/// `ha1` value carried in the session cookie.
pub fn cookie_ha1(username: &str, nonce: &str, password_digest: &str) -> String {
    let auth_key = hex_md5(&format!("{username}:{nonce}:{password_digest}"));
    let (head, tail) = auth_key.split_at(COOKIE_SPLICE_OFFSET);
    format!("{head}{password_digest}{tail}")
}

/// Fresh client nonce, a non-negative 31-bit integer
pub fn generate_cnonce() -> u32 {
    rand::thread_rng().gen_range(0..i32::MAX.unsigned_abs())
}
