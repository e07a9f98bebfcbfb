// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! mc-locale
//!
//! Fetches, caches and indexes Minecraft language files so a
//! protocol-translation proxy can render messages in a player's language.
//! Lookups never fail: unknown keys and unloaded locales echo the key.

pub mod locale;

pub use locale::{
    AssetDescriptor, AssetIndex, DownloadOutcome, FetchError, HttpSource, LoadOutcome,
    LocaleCache, LocaleConfig, LocaleError, LocaleManager, LocaleTable, ReqwestSource,
    ResolveError, StubSource, VersionDownload,
};
