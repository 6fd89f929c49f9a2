//! Headless list output (`--list`)
//!
//! Emits one JSON object per record so the probe results can be piped into
//! other tools without the interactive selector.

use std::io::Write;

use drawer_core::prelude::*;
use drawer_core::ProbeRecord;

/// Write `records` as JSON lines, in the order given
pub fn write_json_lines<W: Write>(records: &[ProbeRecord], mut writer: W) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
