//! Verify command implementation.
//!
//! Encode every configured input, inject every single-qubit error the code is
//! meant to handle, correct, reduce to the logical qubit and compare against
//! the input.

use anyhow::{Context, Result, bail};
use console::style;
use qecsim_codes::{Code, ErrorChannel, Pauli, correct, encode};
use qecsim_state::density::{self, to_state_vector_with};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{InputState, Overrides, VerifyConfig};

/// Outcome of one encode → inject → correct run.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub code: Code,
    pub input: InputState,
    pub error: String,
    pub qubit: usize,
    pub fidelity: f64,
    /// Whether the logical density matrix was recognised as a pure state.
    pub pure: bool,
}

/// Aggregate over all cases of one code.
#[derive(Debug, Clone, Serialize)]
pub struct CodeSummary {
    pub code: Code,
    pub cases: usize,
    pub min_fidelity: f64,
    pub mean_fidelity: f64,
    pub below_threshold: usize,
    pub pure: usize,
}

/// Run one case.
fn run_case(
    code: Code,
    input: InputState,
    channel: &ErrorChannel,
    qubit: usize,
    config: &VerifyConfig,
) -> Result<CaseResult> {
    let psi = input.state();
    let mut encoded = encode(code, &[&psi])?;
    channel.apply(&mut encoded, qubit)?;
    let corrected = correct(code, &encoded)?;
    let rho = corrected.logical_density()?;
    let fidelity = density::fidelity(&psi, rho.view())?;
    let pure = to_state_vector_with(rho.view(), &config.density).is_ok();
    Ok(CaseResult {
        code,
        input,
        error: channel.to_string(),
        qubit,
        fidelity,
        pure,
    })
}

/// Run every case of `code`.
pub fn verify_code(code: Code, config: &VerifyConfig, rng: &mut StdRng) -> Result<Vec<CaseResult>> {
    let paulis = code.correctable_paulis();
    let full_correction = paulis.len() == Pauli::ALL.len();
    let mut results = Vec::new();

    for &input in &config.inputs {
        for qubit in 1..=code.block_size() {
            for &p in paulis {
                results.push(run_case(code, input, &p.into(), qubit, config)?);
            }
            if full_correction {
                for _ in 0..config.trials {
                    let channel = ErrorChannel::random_unitary(rng);
                    results.push(run_case(code, input, &channel, qubit, config)?);
                }
            }
        }
    }
    debug!(%code, cases = results.len(), "verification cases finished");
    Ok(results)
}

/// Reduce the cases of one code.
pub fn summarize(code: Code, results: &[CaseResult], threshold: f64) -> CodeSummary {
    let cases = results.len();
    let min_fidelity = results
        .iter()
        .map(|r| r.fidelity)
        .fold(f64::INFINITY, f64::min);
    let mean_fidelity = if cases == 0 {
        0.0
    } else {
        results.iter().map(|r| r.fidelity).sum::<f64>() / cases as f64
    };
    CodeSummary {
        code,
        cases,
        min_fidelity,
        mean_fidelity,
        below_threshold: results.iter().filter(|r| r.fidelity < threshold).count(),
        pure: results.iter().filter(|r| r.pure).count(),
    }
}

/// Execute the verify command.
pub fn execute(config_file: Option<&str>, overrides: &Overrides, json: bool) -> Result<()> {
    let config = VerifyConfig::load(config_file, overrides).context("Invalid configuration")?;
    info!(codes = config.codes.len(), seed = config.seed, "starting verification");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut summaries = Vec::with_capacity(config.codes.len());
    let mut failures = Vec::new();

    for &code in &config.codes {
        if !json {
            println!(
                "{} Verifying {} code",
                style("→").cyan().bold(),
                style(code).bold()
            );
        }
        let results = verify_code(code, &config, &mut rng)
            .with_context(|| format!("Verification of the {code} code failed"))?;
        failures.extend(
            results
                .iter()
                .filter(|r| r.fidelity < config.threshold)
                .cloned(),
        );
        summaries.push(summarize(code, &results, config.threshold));
    }

    if json {
        let report = serde_json::json!({
            "threshold": config.threshold,
            "seed": config.seed,
            "summaries": summaries,
            "failures": failures,
        });
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
        println!("{json}");
    } else {
        print_summaries(&summaries, config.threshold);
        print_failures(&failures);
    }

    if !failures.is_empty() {
        bail!(
            "{} case(s) fell below the fidelity threshold {}",
            failures.len(),
            config.threshold
        );
    }
    Ok(())
}

fn print_summaries(summaries: &[CodeSummary], threshold: f64) {
    println!();
    println!(
        "  {:<12} {:>6} {:>14} {:>14} {:>6}",
        style("Code").bold(),
        style("Cases").bold(),
        style("Min fidelity").bold(),
        style("Mean fidelity").bold(),
        style("Pure").bold()
    );
    for s in summaries {
        let min = format!("{:.9}", s.min_fidelity);
        let min = if s.min_fidelity < threshold {
            style(min).red()
        } else {
            style(min).green()
        };
        println!(
            "  {:<12} {:>6} {:>14} {:>14.9} {:>6}",
            s.code.name(),
            s.cases,
            min,
            s.mean_fidelity,
            s.pure
        );
    }
    println!();
}

fn print_failures(failures: &[CaseResult]) {
    if failures.is_empty() {
        println!("{} All cases passed", style("✓").green().bold());
        return;
    }
    println!("{}", style("Failing cases:").red().bold());
    for f in failures {
        println!(
            "  {} input {} with {} on qubit {}: fidelity {:.9}",
            f.code, f.input, f.error, f.qubit, f.fidelity
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config(code: Code) -> VerifyConfig {
        VerifyConfig {
            codes: vec![code],
            trials: 1,
            ..VerifyConfig::default()
        }
    }

    #[test]
    fn test_bit_flip_cases_are_paulis_only() {
        let config = quick_config(Code::BitFlip);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let results = verify_code(Code::BitFlip, &config, &mut rng).unwrap();
        // 4 inputs × 3 qubits × {I, X}
        assert_eq!(results.len(), 24);
        let summary = summarize(Code::BitFlip, &results, config.threshold);
        assert_eq!(summary.below_threshold, 0);
        assert_eq!(summary.pure, 24);
    }

    #[test]
    fn test_shor_includes_random_unitaries() {
        let config = quick_config(Code::Shor);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let results = verify_code(Code::Shor, &config, &mut rng).unwrap();
        // 4 inputs × 9 qubits × (4 Paulis + 1 unitary)
        assert_eq!(results.len(), 180);
        assert!(results.iter().any(|r| r.error == "U"));
        let summary = summarize(Code::Shor, &results, config.threshold);
        assert!(summary.min_fidelity > 1.0 - 1e-9);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = summarize(Code::Steane, &[], 0.9);
        assert_eq!(summary.cases, 0);
        assert_eq!(summary.mean_fidelity, 0.0);
    }
}
