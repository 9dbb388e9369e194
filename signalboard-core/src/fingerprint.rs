//! Content fingerprints for inputs and outputs.
//!
//! - `DatasetHash`: BLAKE3 over every bar of a `PriceSeries`.
//! - `TableHash`: BLAKE3 over every row of a `SignalTable`.
//!
//! Both are stable across runs and platforms, so a board report can be
//! matched back to the exact data that produced it.

use crate::domain::{DatasetHash, IndicatorKind, PriceSeries, TableHash};
use crate::signals::SignalTable;

impl DatasetHash {
    /// Hash dates and OHLCV values in series order.
    pub fn of(series: &PriceSeries) -> Self {
        let mut hasher = blake3::Hasher::new();
        for bar in series {
            hasher.update(bar.date.to_string().as_bytes());
            hasher.update(&bar.open.to_le_bytes());
            hasher.update(&bar.high.to_le_bytes());
            hasher.update(&bar.low.to_le_bytes());
            hasher.update(&bar.close.to_le_bytes());
            // Absent volume hashes differently from zero volume.
            match bar.volume {
                Some(v) => {
                    hasher.update(&[1]);
                    hasher.update(&v.to_le_bytes());
                }
                None => {
                    hasher.update(&[0]);
                }
            }
        }
        Self(hasher.finalize().to_hex().to_string())
    }
}

pub(crate) fn table_hash(table: &SignalTable) -> TableHash {
    let mut hasher = blake3::Hasher::new();
    for row in table.rows() {
        hasher.update(row.date.to_string().as_bytes());
        hasher.update(row.overall.label().as_bytes());
        for kind in IndicatorKind::ALL {
            hasher.update(kind.label().as_bytes());
            hasher.update(row.signal(kind).label().as_bytes());
        }
        hasher.update(&row.score.to_le_bytes());
        hasher.update(b"\n");
    }
    TableHash(hasher.finalize().to_hex().to_string())
}
