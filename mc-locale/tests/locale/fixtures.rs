//! Stubbed upstream for locale tests
//!
//! Serves a version manifest, a version detail document, an asset index,
//! content-addressed language files and a client archive from memory.

use std::io::{Cursor, Write};
use std::sync::Arc;

use mc_locale::locale::compute_sha1;
use mc_locale::{LocaleConfig, LocaleManager, StubSource};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const MANIFEST_URL: &str = "https://meta.test/version_manifest.json";
pub const DETAIL_URL: &str = "https://meta.test/v1/1.20.4.json";
pub const INDEX_URL: &str = "https://meta.test/indexes/12.json";
pub const CLIENT_URL: &str = "https://meta.test/client.jar";
pub const RESOURCES_URL: &str = "https://resources.test";
pub const VERSION: &str = "1.20.4";

/// Zip archive with the given entries
pub fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Client archive containing an `en_us` language file
pub fn client_archive(en_us: &str) -> Vec<u8> {
    archive(&[
        ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n"),
        ("assets/minecraft/lang/en_us.json", en_us),
    ])
}

/// URL of a language file in the content-addressed store
pub fn resource_url(content: &str) -> String {
    let hash = compute_sha1(content.as_bytes());
    format!("{}/{}/{}", RESOURCES_URL, &hash[..2], hash)
}

/// Builder for the stubbed upstream
pub struct Upstream {
    pub source: Arc<StubSource>,
    locales: Vec<(String, String)>,
    client: Vec<u8>,
}

impl Upstream {
    pub fn new() -> Self {
        Self {
            source: Arc::new(StubSource::new()),
            locales: Vec::new(),
            client: client_archive(r#"{"menu.quit": "Quit Game"}"#),
        }
    }

    /// Publish an upstream locale with the given JSON content
    pub fn locale(mut self, upstream: &str, content: &str) -> Self {
        self.locales.push((upstream.to_string(), content.to_string()));
        self
    }

    /// Replace the client archive
    pub fn client(mut self, archive: Vec<u8>) -> Self {
        self.client = archive;
        self
    }

    /// Install every document into the stub source
    pub fn publish(self) -> Arc<StubSource> {
        let source = self.source;

        source.set(
            MANIFEST_URL,
            format!(
                r#"{{"latest": {{"release": "{v}", "snapshot": "24w03a"}},
                    "versions": [
                        {{"id": "24w03a", "type": "snapshot", "url": "https://meta.test/v1/24w03a.json"}},
                        {{"id": "{v}", "type": "release", "url": "{detail}"}}
                    ]}}"#,
                v = VERSION,
                detail = DETAIL_URL
            ),
        );

        source.set(
            DETAIL_URL,
            format!(
                r#"{{"id": "{v}",
                    "assetIndex": {{"id": "12", "sha1": "00", "size": 1, "totalSize": 1, "url": "{index}"}},
                    "downloads": {{
                        "client": {{"sha1": "{sha1}", "size": {size}, "url": "{client}"}},
                        "server": {{"sha1": "00", "size": 1, "url": "https://meta.test/server.jar"}}
                    }}}}"#,
                v = VERSION,
                index = INDEX_URL,
                sha1 = compute_sha1(&self.client),
                size = self.client.len(),
                client = CLIENT_URL
            ),
        );
        source.set(CLIENT_URL, self.client);

        let mut objects = vec![format!(
            r#""minecraft/sounds/ambient/cave/cave1.ogg": {{"hash": "{}", "size": 3}}"#,
            compute_sha1(b"ogg")
        )];
        for (locale, content) in &self.locales {
            objects.push(format!(
                r#""minecraft/lang/{}.json": {{"hash": "{}", "size": {}}}"#,
                locale,
                compute_sha1(content.as_bytes()),
                content.len()
            ));
            source.set(resource_url(content), content.clone());
        }
        source.set(INDEX_URL, format!(r#"{{"objects": {{{}}}}}"#, objects.join(",")));

        source
    }
}

/// Config pointing at the stubbed upstream
pub fn config(temp: &TempDir) -> LocaleConfig {
    LocaleConfig {
        manifest_url: MANIFEST_URL.to_string(),
        resources_url: RESOURCES_URL.to_string(),
        ..Default::default()
    }
    .with_storage_path(temp.path())
    .with_game_version(VERSION)
}

/// Manager over `source` with assets already resolved
pub fn resolved_manager(temp: &TempDir, source: Arc<StubSource>) -> LocaleManager {
    let manager = LocaleManager::new(config(temp), source).unwrap();
    manager.resolve().unwrap();
    manager
}
