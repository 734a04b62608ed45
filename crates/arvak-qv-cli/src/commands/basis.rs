//! Basis command implementation.
//!
//! Prints the Pauli tomography lookup table: the circuit for each label and
//! its density matrix (preparations) or outcome projectors (measurements).

use anyhow::Result;
use console::style;

use arvak_tomography::{
    BasisCircuit, Matrix2, Outcome, PauliBasis, PauliMeasurement, PauliPreparation,
};

/// Execute the basis command.
pub fn execute(label: Option<&str>, qasm: bool) -> Result<()> {
    match label {
        None => {
            println!(
                "{} {} basis",
                style("→").cyan().bold(),
                style(PauliBasis::NAME).bold()
            );
            for prep in PauliPreparation::ALL {
                print_preparation(prep, qasm);
            }
            for meas in PauliMeasurement::ALL {
                print_measurement(meas, qasm);
            }
        }
        Some(label) => {
            if let Ok(prep) = label.parse::<PauliPreparation>() {
                print_preparation(prep, qasm);
            } else {
                let meas: PauliMeasurement = label.parse().map_err(|_| {
                    anyhow::anyhow!(
                        "Unknown label: '{label}'. Available: {}, {}",
                        PauliBasis.preparation_labels().join(", "),
                        PauliBasis.measurement_labels().join(", ")
                    )
                })?;
                print_measurement(meas, qasm);
            }
        }
    }
    Ok(())
}

fn print_preparation(prep: PauliPreparation, qasm: bool) {
    println!("\n{} (preparation)", style(prep).cyan().bold());
    print_circuit(&prep.circuit(0), qasm);
    print_matrix(&prep.matrix());
}

fn print_measurement(meas: PauliMeasurement, qasm: bool) {
    println!("\n{} (measurement)", style(meas).cyan().bold());
    print_circuit(&meas.circuit(0, 0), qasm);
    for outcome in [Outcome::Zero, Outcome::One] {
        println!("  outcome {outcome}:");
        print_matrix(&meas.matrix(outcome));
    }
}

fn print_circuit(circuit: &BasisCircuit, qasm: bool) {
    if qasm {
        for line in circuit.to_qasm3().lines() {
            println!("    {line}");
        }
        return;
    }
    let mut ops: Vec<&str> = circuit.gates().iter().map(|g| g.name()).collect();
    if circuit.has_measurement() {
        ops.push("measure");
    }
    if ops.is_empty() {
        println!("  circuit: -");
    } else {
        println!("  circuit: {}", ops.join(", "));
    }
}

fn print_matrix(m: &Matrix2) {
    for row in m {
        let cells: Vec<String> = row
            .iter()
            .map(|c| format!("{:>5.2}{:+.2}i", c.re, c.im))
            .collect();
        println!("    [{}]", cells.join(", "));
    }
}
