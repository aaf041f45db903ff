//! Info command implementation.
//!
//! Print block dimensions and per-network gate counts for each code.

use anyhow::Result;
use console::style;
use qecsim_codes::{Code, GateCounts, Layout, Network};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CodeInfo {
    code: Code,
    blocks: usize,
    data_qubits: usize,
    ancilla_qubits: usize,
    encoder: GateCounts,
    decoder: GateCounts,
    corrector: Option<GateCounts>,
}

fn describe(code: Code, blocks: usize) -> Result<CodeInfo> {
    let layout = if code.supports_correction() {
        Layout::with_ancillas(code, blocks)
    } else {
        Layout::data_only(code, blocks)
    };

    let mut encoder = Network::new();
    let mut decoder = Network::new();
    for block in 0..blocks {
        encoder.extend(&code.encoder().shifted(layout.data_offset(block)));
        decoder.extend(&code.decoder().shifted(layout.data_offset(block)));
    }
    let corrector = if code.supports_correction() {
        let mut corrector = Network::new();
        for block in 0..blocks {
            let (data, ancilla) = (layout.data_offset(block), layout.ancilla_offset(block));
            corrector.extend(&code.corrector(data, ancilla)?);
        }
        Some(corrector.counts())
    } else {
        None
    };

    Ok(CodeInfo {
        code,
        blocks,
        data_qubits: layout.data_width(),
        ancilla_qubits: layout.ancilla_width(),
        encoder: encoder.counts(),
        decoder: decoder.counts(),
        corrector,
    })
}

fn format_counts(c: &GateCounts) -> String {
    format!(
        "{:>3} total  (H {}, X {}, Z {}, CX {}, MCX {})",
        c.total(),
        c.h,
        c.x,
        c.z,
        c.cx,
        c.mcx
    )
}

/// Execute the info command.
pub fn execute(code: Option<Code>, blocks: usize, json: bool) -> Result<()> {
    if blocks == 0 {
        anyhow::bail!("At least one block is required");
    }
    let codes: Vec<Code> = match code {
        Some(code) => vec![code],
        None => Code::ALL.to_vec(),
    };
    let infos = codes
        .into_iter()
        .map(|code| describe(code, blocks))
        .collect::<Result<Vec<_>>>()?;

    if json {
        let json = serde_json::to_string_pretty(&infos)
            .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    for info in &infos {
        println!(
            "{} ({} block{}, {} data + {} ancilla qubits)",
            style(info.code).cyan().bold(),
            info.blocks,
            if info.blocks == 1 { "" } else { "s" },
            info.data_qubits,
            info.ancilla_qubits
        );
        println!("  encoder    {}", format_counts(&info.encoder));
        println!("  decoder    {}", format_counts(&info.decoder));
        match &info.corrector {
            Some(c) => println!("  corrector  {}", format_counts(c)),
            None => println!("  corrector  {}", style("unsupported").dim()),
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_steane_two_blocks() {
        let info = describe(Code::Steane, 2).unwrap();
        assert_eq!(info.data_qubits, 14);
        assert_eq!(info.ancilla_qubits, 12);
        assert_eq!(info.encoder.cx, 22);
        assert_eq!(info.corrector.unwrap().mcx, 28);
    }

    #[test]
    fn test_describe_phase_flip() {
        let info = describe(Code::PhaseFlip, 1).unwrap();
        assert_eq!(info.encoder.h, 3);
        assert!(info.corrector.is_none());
        assert_eq!(info.ancilla_qubits, 0);
    }
}
