//! Row streaming
//!
//! Configured streams are drained one after another from a single session.
//! Each poll of the returned stream pulls at most one row from the engine
//! cursor.

use async_stream::stream;
use tracing::{info, warn};

use super::session::{ErpSession, RowValues, TableScan};
use crate::error::{ConnectorError, Result};
use crate::traits::catalog::{ConfiguredCatalog, SyncMode};
use crate::traits::record::Record;
use crate::traits::source::RecordStream;

/// Converts fetched rows of one stream into records.
///
/// Stops after the first error.
pub struct RowStreamer<I> {
    stream: String,
    rows: I,
    done: bool,
}

impl<I> RowStreamer<I>
where
    I: Iterator<Item = Result<RowValues>>,
{
    pub fn new(stream: impl Into<String>, rows: I) -> Self {
        Self {
            stream: stream.into(),
            rows,
            done: false,
        }
    }
}

impl<I> Iterator for RowStreamer<I>
where
    I: Iterator<Item = Result<RowValues>>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.rows.next()? {
            Ok(row) => Some(Ok(Record::from_columns(
                self.stream.as_str(),
                &row.columns,
                row.values,
            ))),
            Err(e) => {
                self.done = true;
                Some(Err(into_read_error(&self.stream, e)))
            }
        }
    }
}

fn into_read_error(stream: &str, err: ConnectorError) -> ConnectorError {
    match err {
        ConnectorError::Read { .. } => err,
        other => ConnectorError::read(stream, other.to_string()),
    }
}

/// Stream every configured table's rows as records.
///
/// The session is owned by the returned stream and dropped when it ends.
/// The first error ends the whole stream.
pub fn read_streams<S>(session: S, catalog: ConfiguredCatalog) -> RecordStream
where
    S: ErpSession + 'static,
{
    Box::pin(stream! {
        for configured in catalog.streams {
            let name = configured.stream.name;
            if configured.sync_mode == SyncMode::Incremental {
                warn!(stream = %name, "Incremental sync is not supported, reading full table");
            }
            info!(stream = %name, "Reading SAP table");

            let mut scan = match session.open_scan(&name) {
                Ok(scan) => scan,
                Err(e) => {
                    yield Err(into_read_error(&name, e));
                    return;
                }
            };
            let rows = match scan.rows() {
                Ok(rows) => rows,
                Err(e) => {
                    yield Err(into_read_error(&name, e));
                    return;
                }
            };

            let mut emitted = 0u64;
            for record in RowStreamer::new(name.as_str(), rows) {
                match record {
                    Ok(record) => {
                        emitted += 1;
                        yield Ok(record);
                    }
                    Err(e) => {
                        warn!(stream = %name, records = emitted, error = %e, "Read aborted");
                        yield Err(e);
                        return;
                    }
                }
            }
            info!(stream = %name, records = emitted, "Finished reading SAP table");
        }
    })
}
