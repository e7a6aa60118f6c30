use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use assetgen::errors::GenError;
use assetgen::pipeline::{AssetProducer, run_pipeline};

/// Stands in for the external tools: writes a fixed payload per symbol to the
/// scratch path, or nothing at all for symbols it has no payload for.
struct StubProducer {
    scratch: PathBuf,
    payloads: HashMap<char, Vec<u8>>,
}

impl StubProducer {
    fn new(scratch_dir: &Path, payloads: &[(char, &[u8])]) -> Self {
        Self {
            scratch: scratch_dir.join("asset.bin"),
            payloads: payloads
                .iter()
                .map(|(c, bytes)| (*c, bytes.to_vec()))
                .collect(),
        }
    }
}

impl AssetProducer for StubProducer {
    async fn produce(&mut self, symbol: char, _input: &str) -> Result<(), GenError> {
        if let Some(bytes) = self.payloads.get(&symbol) {
            fs::write(&self.scratch, bytes).unwrap();
        }
        Ok(())
    }

    fn scratch_path(&self) -> &Path {
        &self.scratch
    }
}

fn items(alphabet: &str) -> Vec<(char, String)> {
    alphabet.chars().map(|c| (c, c.to_string())).collect()
}

#[tokio::test]
async fn documents_every_symbol_as_base64() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.json");
    let mut producer = StubProducer::new(dir.path(), &[('A', b"x"), ('B', b"yy"), ('1', b"zzz")]);

    let doc = run_pipeline(items("AB1"), &mut producer, &dest).await.unwrap();
    assert_eq!(doc.len(), 3);

    let parsed: BTreeMap<String, String> =
        serde_json::from_str(&fs::read_to_string(&dest).unwrap()).unwrap();
    let expected: BTreeMap<String, String> = [
        ("A".to_string(), "eA==".to_string()),
        ("B".to_string(), "eXk=".to_string()),
        ("1".to_string(), "enp6".to_string()),
    ]
    .into();
    assert_eq!(parsed, expected);
}

#[tokio::test]
async fn missing_scratch_file_aborts_without_writing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.json");
    // No payload for 'B': the stub "tool" silently produces nothing.
    let mut producer = StubProducer::new(dir.path(), &[('A', b"x")]);

    let err = run_pipeline(items("BA"), &mut producer, &dest).await.unwrap_err();
    assert!(matches!(err, GenError::AssetRead { symbol: 'B', .. }), "got: {err}");
    assert!(!dest.exists(), "destination must not be written on failure");
}

#[tokio::test]
async fn failed_run_leaves_existing_destination_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.json");
    fs::write(&dest, r#"{"A":"eA=="}"#).unwrap();
    let mut producer = StubProducer::new(dir.path(), &[]);

    run_pipeline(items("Q"), &mut producer, &dest).await.unwrap_err();
    assert_eq!(fs::read_to_string(&dest).unwrap(), r#"{"A":"eA=="}"#);
}

#[tokio::test]
async fn rerun_is_schema_stable() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.json");
    let payloads: &[(char, &[u8])] = &[('a', b"first"), ('b', b"second")];

    let mut producer = StubProducer::new(dir.path(), payloads);
    run_pipeline(items("ab"), &mut producer, &dest).await.unwrap();
    let first: BTreeMap<String, String> =
        serde_json::from_str(&fs::read_to_string(&dest).unwrap()).unwrap();

    let mut producer = StubProducer::new(dir.path(), payloads);
    run_pipeline(items("ab"), &mut producer, &dest).await.unwrap();
    let second: BTreeMap<String, String> =
        serde_json::from_str(&fs::read_to_string(&dest).unwrap()).unwrap();

    let first_keys: Vec<&String> = first.keys().collect();
    let second_keys: Vec<&String> = second.keys().collect();
    assert_eq!(first_keys, second_keys);
    for value in second.values() {
        let decoded = STANDARD.decode(value).unwrap();
        assert!(!decoded.is_empty());
    }
}

#[tokio::test]
async fn last_scratch_write_wins_per_symbol() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.json");
    // Both symbols share one scratch path; each iteration must be recorded
    // before the next overwrite.
    let mut producer = StubProducer::new(dir.path(), &[('x', b"one"), ('y', b"two")]);

    let doc = run_pipeline(items("xy"), &mut producer, &dest).await.unwrap();
    assert_eq!(doc.get('x'), Some(STANDARD.encode(b"one").as_str()));
    assert_eq!(doc.get('y'), Some(STANDARD.encode(b"two").as_str()));
}
