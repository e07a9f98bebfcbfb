// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Locale identifier normalization
//!
//! A few languages are named differently by the Java launcher assets and by
//! Bedrock clients. The table is keyed by the Bedrock (platform) name; the
//! asset index and cache files use the upstream name.

/// (platform, upstream) pairs naming the same language
const ALIASES: &[(&str, &str)] = &[("nb_no", "no_no")];

/// Lowercase a locale identifier
pub fn normalize(locale: &str) -> String {
    locale.to_lowercase()
}

/// Whether a normalized identifier is a plain `[a-z0-9_]+` token
///
/// Identifiers come from connecting clients and name cache files, so
/// anything else is rejected before touching the filesystem.
pub fn is_valid(locale: &str) -> bool {
    !locale.is_empty()
        && locale
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Rewrite a platform identifier to the name used by upstream assets
pub fn to_upstream(locale: &str) -> String {
    let locale = normalize(locale);
    ALIASES
        .iter()
        .find(|(platform, _)| *platform == locale)
        .map(|(_, upstream)| upstream.to_string())
        .unwrap_or(locale)
}

/// Rewrite an upstream identifier to the name used by the table
pub fn to_platform(locale: &str) -> String {
    let locale = normalize(locale);
    ALIASES
        .iter()
        .find(|(_, upstream)| *upstream == locale)
        .map(|(platform, _)| platform.to_string())
        .unwrap_or(locale)
}
