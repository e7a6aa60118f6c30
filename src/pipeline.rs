use std::path::Path;

use tracing::info;

use crate::document::AssetDocument;
use crate::errors::GenError;

/// Materializes one symbol's binary asset at a reused scratch path.
///
/// Each call fully overwrites the scratch file. Implementations must verify
/// the file actually exists before returning `Ok`, so the pipeline never
/// base64-encodes a stale asset from a previous iteration.
#[allow(async_fn_in_trait)]
pub trait AssetProducer {
    /// `input` is the tool-facing form of the work item: the spoken phrase
    /// for audio, the bare symbol for glyphs.
    async fn produce(&mut self, symbol: char, input: &str) -> Result<(), GenError>;

    /// Path of the scratch file the last `produce` call wrote.
    fn scratch_path(&self) -> &Path;
}

/// Strictly sequential enumerate -> produce -> record loop with a single
/// finalize at the end. Any error aborts the run before `dest` is touched.
pub async fn run_pipeline<P, I>(items: I, producer: &mut P, dest: &Path) -> Result<AssetDocument, GenError>
where
    P: AssetProducer,
    I: IntoIterator<Item = (char, String)>,
{
    let mut doc = AssetDocument::new();
    for (symbol, input) in items {
        info!("generating asset for '{}'", symbol);
        producer.produce(symbol, &input).await?;
        doc.record(symbol, producer.scratch_path())?;
    }
    doc.finalize(dest)?;
    Ok(doc)
}
