use super::{AssembleOptions, Package, progress};
use crate::error::{ErrorKind, Result, Warning};
use crate::plan::{PlannedEntry, plan};
use crate::{OrganizationItem, check_ready};
use async_stream::stream;
use exn::ResultExt;
use futures::Stream;
use tablepack_archive::{ArchiveWriter, validate_entry_path};
use tablepack_reencode::reencode;

/// Progress events emitted by [`assemble_stream`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started), exactly once.
/// 2. [`Planned`](Self::Planned), exactly once, with the number of attached
///    files (the progress denominator).
/// 3. Per file, in item order then file order: an optional
///    [`Warning`](Self::Warning) followed by [`Written`](Self::Written), or
///    [`Skipped`](Self::Skipped) for a directory placeholder.
/// 4. [`Complete`](Self::Complete), exactly once, carrying the package.
///
/// An error terminates the stream early, in which case
/// [`Complete`](Self::Complete) is never emitted.
#[derive(Debug)]
pub enum PackageEvent {
    Started,
    Planned(u64),
    Written { path: String, size: u64, reencoded: bool, progress: u8 },
    Skipped { path: String, progress: u8 },
    Warning(Warning),
    Complete(Package),
}

/// A file ready to be written: final path and bytes.
struct Prepared<'a> {
    entry: PlannedEntry<'a>,
    data: Vec<u8>,
    warning: Option<Warning>,
}

async fn prepare<'a>(entry: &PlannedEntry<'a>, primary: &str) -> Result<Prepared<'a>> {
    let data = entry.file.read().await.or_raise(|| ErrorKind::Source(entry.context()))?;
    if !entry.reencode {
        return Ok(Prepared { entry: entry.clone(), data, warning: None });
    }
    let quality = entry.item.options.raster_quality;
    match reencode(data.clone(), quality).await {
        Ok(png) => {
            tracing::debug!(path = %entry.path, %quality, input_size = data.len(), output_size = png.len(), "re-encoded image");
            Ok(Prepared { entry: entry.clone(), data: png, warning: None })
        },
        Err(e) => {
            let warning = Warning::ReencodeFailed {
                item: entry.item.id.clone(),
                file: entry.file.name().to_string(),
                reason: (*e).to_string(),
            };
            tracing::warn!(%warning, "writing original bytes instead");
            Ok(Prepared { entry: entry.fallback(primary), data, warning: Some(warning) })
        },
    }
}

/// Writes on the blocking pool; deflating a large table file would otherwise
/// stall the executor.
async fn write(writer: ArchiveWriter, prepared: &Prepared<'_>, data: Vec<u8>) -> Result<ArchiveWriter> {
    let entry = &prepared.entry;
    validate_entry_path(&entry.path).or_raise(|| ErrorKind::InvalidPath(entry.context()))?;
    let path = entry.path.clone();
    let (writer, result) = tokio::task::spawn_blocking(move || {
        let mut writer = writer;
        let result = writer.add(&path, &data);
        (writer, result)
    })
    .await
    .or_raise(|| ErrorKind::Runtime)?;
    result.or_raise(|| ErrorKind::EntryWrite(entry.context()))?;
    Ok(writer)
}

async fn finish(writer: ArchiveWriter) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || writer.finish())
        .await
        .or_raise(|| ErrorKind::Runtime)?
        .or_raise(|| ErrorKind::Finalize)
}

/// Streams [`PackageEvent`]s while assembling the archive for `items`.
///
/// Preconditions ([`check_ready`]) are checked before anything is read. Files
/// are processed one at a time in item order, then file order, so the archive
/// layout and its bytes depend only on the input.
pub fn assemble_stream<'a>(
    items: &'a [OrganizationItem],
    primary: &'a str,
    options: &'a AssembleOptions,
) -> impl Stream<Item = Result<PackageEvent>> + 'a {
    // `rustfmt` does not format macros that use braces. Wrap in parentheses!
    stream!({
        yield Ok(PackageEvent::Started);
        if let Err(e) = check_ready(items, primary) {
            yield Err(e);
            return;
        }

        let entries = plan(items, primary);
        let total = entries.len() as u64;
        yield Ok(PackageEvent::Planned(total));

        let mut writer =
            ArchiveWriter::new(options.compression).with_store_precompressed(options.store_precompressed);
        let mut package = Package::default();
        for (index, entry) in entries.iter().enumerate() {
            if options.is_cancelled() {
                tracing::info!(written = package.entries.len(), total, "package assembly cancelled");
                yield Err(exn::Exn::from(ErrorKind::Cancelled));
                return;
            }
            let progress = progress(index as u64 + 1, total);

            if entry.is_placeholder() {
                tracing::debug!(path = %entry.path, "skipping directory placeholder");
                package.skipped.push(entry.path.clone());
                yield Ok(PackageEvent::Skipped { path: entry.path.clone(), progress });
                continue;
            }

            let mut prepared = match prepare(entry, primary).await {
                Ok(prepared) => prepared,
                Err(e) => {
                    yield Err(e);
                    return;
                },
            };
            if let Some(warning) = prepared.warning.take() {
                package.warnings.push(warning.clone());
                yield Ok(PackageEvent::Warning(warning));
            }
            let data = std::mem::take(&mut prepared.data);
            let size = data.len() as u64;
            writer = match write(writer, &prepared, data).await {
                Ok(writer) => writer,
                Err(e) => {
                    yield Err(e);
                    return;
                },
            };
            let path = prepared.entry.path.clone();
            package.entries.push(path.clone());
            yield Ok(PackageEvent::Written { path, size, reencoded: prepared.entry.reencode, progress });
        }

        match finish(writer).await {
            Ok(bytes) => {
                package.bytes = bytes;
                tracing::info!(
                    entries = package.entries.len(),
                    skipped = package.skipped.len(),
                    warnings = package.warnings.len(),
                    size = package.bytes.len(),
                    "package assembled"
                );
                yield Ok(PackageEvent::Complete(package));
            },
            Err(e) => yield Err(e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemKind, ItemOptions};
    use futures::StreamExt;
    use tablepack_source::SourceFile;

    #[tokio::test]
    async fn test_event_order() {
        let items = vec![
            OrganizationItem::new(ItemKind::Multiple)
                .with_options(ItemOptions { convert_to_raster: true, ..Default::default() })
                .with_files([
                    SourceFile::from_bytes("broken.png", b"nope".to_vec()),
                    SourceFile::from_bytes("dir", vec![]),
                    SourceFile::from_bytes("ok.txt", b"ok".to_vec()),
                ]),
        ];
        let options = AssembleOptions::default();
        let events: Vec<_> = assemble_stream(&items, "x", &options).map(|e| e.unwrap()).collect().await;
        assert_eq!(events.len(), 7);
        assert!(matches!(events[0], PackageEvent::Started));
        assert!(matches!(events[1], PackageEvent::Planned(3)));
        assert!(matches!(&events[2], PackageEvent::Warning(Warning::ReencodeFailed { file, .. }) if file == "broken.png"));
        assert!(matches!(
            &events[3],
            PackageEvent::Written { path, size: 4, reencoded: false, progress: 33 } if path == "broken.png"
        ));
        assert!(matches!(&events[4], PackageEvent::Skipped { path, progress: 67 } if path == "dir"));
        assert!(matches!(&events[5], PackageEvent::Written { path, progress: 100, .. } if path == "ok.txt"));
        match &events[6] {
            PackageEvent::Complete(package) => {
                assert_eq!(package.entries, vec!["broken.png", "ok.txt"]);
                assert_eq!(package.warnings.len(), 1);
            },
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_precondition_failure_ends_stream() {
        let options = AssembleOptions::default();
        let events: Vec<_> = assemble_stream(&[], "x", &options).collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Ok(PackageEvent::Started)));
        assert!(matches!(events[1].as_ref().map_err(|e| &**e), Err(ErrorKind::NothingToBuild)));
    }
}
