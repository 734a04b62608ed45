//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Quantum Volume heavy-output analysis",
        style("Arvak QV").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  arvak-qv          Heavy-output estimator and success test");
    println!("  arvak-tomography  Pauli preparation and measurement bases");
    println!("  arvak-qv-cli      Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/hiq-lab/arvak").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
