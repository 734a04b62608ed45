//! Basis-change circuits.
//!
//! Tomography circuits only need a handful of Clifford gates and a
//! measurement, so they are kept as a flat instruction list rather than a
//! full circuit DAG. [`BasisCircuit::to_qasm3`] hands them to any backend
//! that accepts OpenQASM 3.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Gates used by Pauli basis circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasisGate {
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// Pauli-X gate.
    X,
}

impl BasisGate {
    /// OpenQASM gate name.
    pub fn name(self) -> &'static str {
        match self {
            BasisGate::H => "h",
            BasisGate::S => "s",
            BasisGate::Sdg => "sdg",
            BasisGate::X => "x",
        }
    }
}

/// One operation of a basis circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasisInstruction {
    /// Single-qubit gate.
    Gate {
        /// The gate.
        gate: BasisGate,
        /// Target qubit.
        qubit: u32,
    },
    /// Z-basis measurement into a classical bit.
    Measure {
        /// Measured qubit.
        qubit: u32,
        /// Destination classical bit.
        clbit: u32,
    },
}

/// A preparation or measurement circuit on a single qubit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisCircuit {
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<BasisInstruction>,
}

impl BasisCircuit {
    /// Create an empty circuit sized to hold `qubit` and, if given, `clbit`.
    pub fn new(qubit: u32, clbit: Option<u32>) -> Self {
        Self {
            num_qubits: qubit.saturating_add(1),
            num_clbits: clbit.map_or(0, |c| c.saturating_add(1)),
            instructions: Vec::new(),
        }
    }

    /// Apply a gate.
    pub fn gate(&mut self, gate: BasisGate, qubit: u32) -> &mut Self {
        self.num_qubits = self.num_qubits.max(qubit.saturating_add(1));
        self.instructions.push(BasisInstruction::Gate { gate, qubit });
        self
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: u32, clbit: u32) -> &mut Self {
        self.num_qubits = self.num_qubits.max(qubit.saturating_add(1));
        self.num_clbits = self.num_clbits.max(clbit.saturating_add(1));
        self.instructions
            .push(BasisInstruction::Measure { qubit, clbit });
        self
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[BasisInstruction] {
        &self.instructions
    }

    /// Gates in application order, measurements omitted.
    pub fn gates(&self) -> Vec<BasisGate> {
        self.instructions
            .iter()
            .filter_map(|inst| match inst {
                BasisInstruction::Gate { gate, .. } => Some(*gate),
                BasisInstruction::Measure { .. } => None,
            })
            .collect()
    }

    /// Whether the circuit ends in a measurement.
    pub fn has_measurement(&self) -> bool {
        self.instructions
            .iter()
            .any(|inst| matches!(inst, BasisInstruction::Measure { .. }))
    }

    /// Emit as OpenQASM 3 source.
    pub fn to_qasm3(&self) -> String {
        let mut out = String::from("OPENQASM 3.0;\n\n");
        let _ = writeln!(out, "qubit[{}] q;", self.num_qubits);
        if self.num_clbits > 0 {
            let _ = writeln!(out, "bit[{}] c;", self.num_clbits);
        }
        out.push('\n');

        for inst in &self.instructions {
            let _ = match inst {
                BasisInstruction::Gate { gate, qubit } => {
                    writeln!(out, "{} q[{qubit}];", gate.name())
                }
                BasisInstruction::Measure { qubit, clbit } => {
                    writeln!(out, "c[{clbit}] = measure q[{qubit}];")
                }
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_follow_indices() {
        let mut circuit = BasisCircuit::new(2, None);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 0);
        circuit.measure(0, 4);
        assert_eq!(circuit.num_clbits(), 5);
    }

    #[test]
    fn test_sizes_saturate_at_max_index() {
        let mut circuit = BasisCircuit::new(u32::MAX, Some(u32::MAX));
        assert_eq!(circuit.num_qubits(), u32::MAX);
        assert_eq!(circuit.num_clbits(), u32::MAX);
        circuit.gate(BasisGate::X, u32::MAX).measure(u32::MAX, u32::MAX);
        assert_eq!(circuit.num_qubits(), u32::MAX);
        assert_eq!(circuit.num_clbits(), u32::MAX);
    }

    #[test]
    fn test_qasm3_output() {
        let mut circuit = BasisCircuit::new(0, Some(0));
        circuit.gate(BasisGate::Sdg, 0).gate(BasisGate::H, 0).measure(0, 0);

        let qasm = circuit.to_qasm3();
        assert!(qasm.starts_with("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[1] q;"));
        assert!(qasm.contains("bit[1] c;"));
        assert!(qasm.contains("sdg q[0];\nh q[0];\nc[0] = measure q[0];"));
    }

    #[test]
    fn test_gates_skip_measurement() {
        let mut circuit = BasisCircuit::new(0, Some(0));
        circuit.gate(BasisGate::H, 0).measure(0, 0);
        assert_eq!(circuit.gates(), vec![BasisGate::H]);
        assert!(circuit.has_measurement());
    }
}
