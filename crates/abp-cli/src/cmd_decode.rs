/// Implementation of `abp decode`.
///
/// Opens the input (a file, or stdin for `-`), then decodes the layout
/// record after record, printing each value with its byte offset. Ctrl-C
/// cancels the read in flight through the accumulator's cancellation
/// token, so a stalled pipe can always be abandoned cleanly.
use std::time::Duration;

use abp_reader::{
    AsyncReadSource, ByteSource, CancellationToken, PrimitiveKind, ReadError, ReadOptions,
    read_value,
};
use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::DecodeArgs;

/// Run the `abp decode` command.
///
/// # Errors
///
/// Returns an error if the layout is invalid, the input cannot be opened,
/// or the input ends or fails in the middle of a record.
pub async fn run(args: &DecodeArgs) -> Result<()> {
    let layout = parse_layout(&args.layout)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let options = ReadOptions::default()
        .with_backoff(Duration::from_millis(args.backoff_ms))
        .with_max_len(args.max_len)
        .with_cancel(cancel);

    let records = if args.all { None } else { Some(args.repeat) };

    if args.input.as_os_str() == "-" {
        let mut source = AsyncReadSource::new(tokio::io::stdin());
        decode_records(&mut source, &layout, records, &options).await
    } else {
        let file = tokio::fs::File::open(&args.input)
            .await
            .with_context(|| format!("cannot open {}", args.input.display()))?;
        let mut source = AsyncReadSource::new(file);
        decode_records(&mut source, &layout, records, &options)
            .await
            .with_context(|| format!("failed to decode {}", args.input.display()))
    }
}

/// Parse a comma-separated list of kind names.
///
/// # Errors
///
/// Returns an error for an empty layout or an unknown kind name.
pub fn parse_layout(text: &str) -> Result<Vec<PrimitiveKind>> {
    let kinds = text
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<PrimitiveKind>, _>>()?;

    if kinds.is_empty() {
        bail!("layout is empty; expected kinds such as `u32,f64`");
    }
    Ok(kinds)
}

/// Decode `records` records (or until a clean end of input when `None`).
async fn decode_records<S>(
    source: &mut S,
    layout: &[PrimitiveKind],
    records: Option<usize>,
    options: &ReadOptions,
) -> Result<()>
where
    S: ByteSource + Unpin,
{
    let mut offset = 0usize;
    let mut record = 0usize;

    while records.is_none_or(|limit| record < limit) {
        for (field, &kind) in layout.iter().enumerate() {
            let value = match read_value(source, kind, options).await {
                Ok(value) => value,
                Err(ReadError::EndOfStream { received: 0, .. })
                    if records.is_none() && field == 0 =>
                {
                    debug!(record, "input ended on a record boundary");
                    return Ok(());
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("record {record}, field {field} ({kind}) at offset {offset}"));
                }
            };

            println!("{offset:08x}  {:<5} {value}", kind.name());
            offset += kind.width();
        }
        record += 1;
    }

    Ok(())
}
