use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::EngineConstants;
use crate::study::TradeStudy;

/// Trade study together with the constants it was computed under.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub constants: &'a EngineConstants,
    #[serde(flatten)]
    pub study: &'a TradeStudy,
}

/// Write a trade study as pretty-printed JSON to a writer.
pub fn write_report<W: Write>(
    writer: &mut W,
    constants: &EngineConstants,
    study: &TradeStudy,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &Report { constants, study })?;
    writeln!(writer)?;
    Ok(())
}

/// Write trade study JSON to a file.
pub fn write_report_file(
    path: impl AsRef<Path>,
    constants: &EngineConstants,
    study: &TradeStudy,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_report(&mut file, constants, study)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::presets;

    #[test]
    fn json_report_contains_both_designs() {
        let constants = EngineConstants::default();
        let study = TradeStudy::run(&presets::optimized(), &presets::pop_out(), &constants).unwrap();

        let mut buf = Vec::new();
        write_report(&mut buf, &constants, &study).unwrap();
        let json = String::from_utf8(buf).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["optimized"]["name"], "Optimized Rocket");
        assert_eq!(value["pop_out"]["burn_time"], 10.0);
        assert_eq!(value["constants"]["payload_mass"], 250.0);
        assert!(value["delta_v_efficiency_pct"].is_number());
        assert_eq!(value["optimized"]["stack"]["stage_lengths"].as_array().map(|a| a.len()), Some(3));
    }
}
