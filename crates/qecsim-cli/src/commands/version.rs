//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - statevector simulation of quantum error-correcting codes",
        style("qecsim").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qecsim-state  Statevector engine, gate kernels, density/trace utilities");
    println!("  qecsim-codes  Bit-flip, phase-flip, Shor and Steane codes");
    println!("  qecsim-cli    Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
