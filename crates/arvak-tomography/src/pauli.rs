//! Pauli preparation and measurement basis.
//!
//! Preparation states are the six Pauli eigenstates, reached from |0⟩ with
//! Clifford gates. Measurements rotate the X or Y eigenbasis onto Z before a
//! standard measurement.
//!
//! | Label | Preparation circuit | Density matrix |
//! |-------|---------------------|----------------|
//! | `Xp`  | H                   | [[1, 1], [1, 1]] / 2 |
//! | `Xm`  | X, H                | [[1, -1], [-1, 1]] / 2 |
//! | `Yp`  | H, S                | [[1, -i], [i, 1]] / 2 |
//! | `Ym`  | X, H, S             | [[1, i], [-i, 1]] / 2 |
//! | `Zp`  | (none)              | [[1, 0], [0, 0]] |
//! | `Zm`  | X                   | [[0, 0], [0, 1]] |
//!
//! Measuring `X`, `Y` or `Z` with outcome 0 (1) projects onto the `p` (`m`)
//! eigenstate of the same axis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::circuit::{BasisCircuit, BasisGate};
use crate::error::{TomographyError, TomographyResult};
use crate::matrix::{Matrix2, from_parts};

/// Pauli measurement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliMeasurement {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

/// Pauli eigenstate to prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliPreparation {
    /// +1 eigenstate of X.
    Xp,
    /// -1 eigenstate of X.
    Xm,
    /// +1 eigenstate of Y.
    Yp,
    /// -1 eigenstate of Y.
    Ym,
    /// +1 eigenstate of Z, |0⟩.
    Zp,
    /// -1 eigenstate of Z, |1⟩.
    Zm,
}

/// Single-qubit measurement outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Outcome 0 (+1 eigenvalue).
    Zero,
    /// Outcome 1 (-1 eigenvalue).
    One,
}

impl PauliMeasurement {
    /// All measurement axes.
    pub const ALL: [PauliMeasurement; 3] =
        [PauliMeasurement::X, PauliMeasurement::Y, PauliMeasurement::Z];

    /// The label, `"X"`, `"Y"` or `"Z"`.
    pub fn label(self) -> &'static str {
        match self {
            PauliMeasurement::X => "X",
            PauliMeasurement::Y => "Y",
            PauliMeasurement::Z => "Z",
        }
    }

    /// Eigenstate selected by an outcome of this measurement.
    pub fn eigenstate(self, outcome: Outcome) -> PauliPreparation {
        match (self, outcome) {
            (PauliMeasurement::X, Outcome::Zero) => PauliPreparation::Xp,
            (PauliMeasurement::X, Outcome::One) => PauliPreparation::Xm,
            (PauliMeasurement::Y, Outcome::Zero) => PauliPreparation::Yp,
            (PauliMeasurement::Y, Outcome::One) => PauliPreparation::Ym,
            (PauliMeasurement::Z, Outcome::Zero) => PauliPreparation::Zp,
            (PauliMeasurement::Z, Outcome::One) => PauliPreparation::Zm,
        }
    }

    /// Projector onto the outcome's eigenstate.
    pub fn matrix(self, outcome: Outcome) -> Matrix2 {
        self.eigenstate(outcome).matrix()
    }

    /// Gates rotating this axis onto Z.
    pub fn basis_change(self) -> &'static [BasisGate] {
        match self {
            PauliMeasurement::X => &[BasisGate::H],
            PauliMeasurement::Y => &[BasisGate::Sdg, BasisGate::H],
            PauliMeasurement::Z => &[],
        }
    }

    /// Circuit measuring `qubit` along this axis into `clbit`.
    pub fn circuit(self, qubit: u32, clbit: u32) -> BasisCircuit {
        let mut circuit = BasisCircuit::new(qubit, Some(clbit));
        for &gate in self.basis_change() {
            circuit.gate(gate, qubit);
        }
        circuit.measure(qubit, clbit);
        circuit
    }
}

impl PauliPreparation {
    /// All preparation states.
    pub const ALL: [PauliPreparation; 6] = [
        PauliPreparation::Xp,
        PauliPreparation::Xm,
        PauliPreparation::Yp,
        PauliPreparation::Ym,
        PauliPreparation::Zp,
        PauliPreparation::Zm,
    ];

    /// The label, e.g. `"Xp"`.
    pub fn label(self) -> &'static str {
        match self {
            PauliPreparation::Xp => "Xp",
            PauliPreparation::Xm => "Xm",
            PauliPreparation::Yp => "Yp",
            PauliPreparation::Ym => "Ym",
            PauliPreparation::Zp => "Zp",
            PauliPreparation::Zm => "Zm",
        }
    }

    /// Density matrix of the eigenstate.
    pub fn matrix(self) -> Matrix2 {
        match self {
            PauliPreparation::Xp => {
                from_parts([[(0.5, 0.0), (0.5, 0.0)], [(0.5, 0.0), (0.5, 0.0)]])
            }
            PauliPreparation::Xm => {
                from_parts([[(0.5, 0.0), (-0.5, 0.0)], [(-0.5, 0.0), (0.5, 0.0)]])
            }
            PauliPreparation::Yp => {
                from_parts([[(0.5, 0.0), (0.0, -0.5)], [(0.0, 0.5), (0.5, 0.0)]])
            }
            PauliPreparation::Ym => {
                from_parts([[(0.5, 0.0), (0.0, 0.5)], [(0.0, -0.5), (0.5, 0.0)]])
            }
            PauliPreparation::Zp => {
                from_parts([[(1.0, 0.0), (0.0, 0.0)], [(0.0, 0.0), (0.0, 0.0)]])
            }
            PauliPreparation::Zm => {
                from_parts([[(0.0, 0.0), (0.0, 0.0)], [(0.0, 0.0), (1.0, 0.0)]])
            }
        }
    }

    /// Gates taking |0⟩ to this eigenstate.
    pub fn gates(self) -> &'static [BasisGate] {
        match self {
            PauliPreparation::Xp => &[BasisGate::H],
            PauliPreparation::Xm => &[BasisGate::X, BasisGate::H],
            PauliPreparation::Yp => &[BasisGate::H, BasisGate::S],
            PauliPreparation::Ym => &[BasisGate::X, BasisGate::H, BasisGate::S],
            PauliPreparation::Zp => &[],
            PauliPreparation::Zm => &[BasisGate::X],
        }
    }

    /// Circuit preparing this eigenstate on `qubit`, assumed to start in |0⟩.
    pub fn circuit(self, qubit: u32) -> BasisCircuit {
        let mut circuit = BasisCircuit::new(qubit, None);
        for &gate in self.gates() {
            circuit.gate(gate, qubit);
        }
        circuit
    }
}

fn labels<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for PauliMeasurement {
    type Err = TomographyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| TomographyError::UnknownLabel {
                kind: "measurement",
                label: s.to_string(),
                expected: labels(&Self::ALL),
            })
    }
}

impl FromStr for PauliPreparation {
    type Err = TomographyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| TomographyError::UnknownLabel {
                kind: "preparation",
                label: s.to_string(),
                expected: labels(&Self::ALL),
            })
    }
}

impl FromStr for Outcome {
    type Err = TomographyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Outcome::Zero),
            "1" => Ok(Outcome::One),
            other => Err(TomographyError::InvalidOutcome(other.to_string())),
        }
    }
}

impl TryFrom<&str> for Outcome {
    type Error = TomographyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<u8> for Outcome {
    type Error = TomographyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Zero),
            1 => Ok(Outcome::One),
            other => Err(TomographyError::InvalidOutcome(other.to_string())),
        }
    }
}

impl fmt::Display for PauliMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for PauliPreparation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Zero => f.write_str("0"),
            Outcome::One => f.write_str("1"),
        }
    }
}

/// Descriptor of the Pauli tomography basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauliBasis;

impl PauliBasis {
    /// Basis name.
    pub const NAME: &'static str = "Pauli";

    /// Measurement labels, `X`, `Y`, `Z`.
    pub fn measurement_labels(self) -> [&'static str; 3] {
        PauliMeasurement::ALL.map(PauliMeasurement::label)
    }

    /// Preparation labels, `Xp` through `Zm`.
    pub fn preparation_labels(self) -> [&'static str; 6] {
        PauliPreparation::ALL.map(PauliPreparation::label)
    }
}

/// Density matrix for a preparation label.
pub fn pauli_preparation_matrix(label: &str) -> TomographyResult<Matrix2> {
    Ok(label.parse::<PauliPreparation>()?.matrix())
}

/// Projector for a measurement label and outcome, given as `0u8`/`1u8` or
/// `"0"`/`"1"`.
pub fn pauli_measurement_matrix<O>(label: &str, outcome: O) -> TomographyResult<Matrix2>
where
    O: TryInto<Outcome, Error = TomographyError>,
{
    let measurement: PauliMeasurement = label.parse()?;
    Ok(measurement.matrix(outcome.try_into()?))
}

/// Circuit measuring `qubit` along the labelled axis.
pub fn pauli_measurement_circuit(
    label: &str,
    qubit: u32,
    clbit: u32,
) -> TomographyResult<BasisCircuit> {
    Ok(label.parse::<PauliMeasurement>()?.circuit(qubit, clbit))
}

/// Circuit preparing the labelled eigenstate on `qubit`.
pub fn pauli_preparation_circuit(label: &str, qubit: u32) -> TomographyResult<BasisCircuit> {
    Ok(label.parse::<PauliPreparation>()?.circuit(qubit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::approx_eq;

    #[test]
    fn test_labels_roundtrip() {
        for prep in PauliPreparation::ALL {
            assert_eq!(prep.label().parse::<PauliPreparation>().unwrap(), prep);
        }
        for meas in PauliMeasurement::ALL {
            assert_eq!(meas.to_string().parse::<PauliMeasurement>().unwrap(), meas);
        }
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!("zp".parse::<PauliPreparation>().is_err());
        assert!("x".parse::<PauliMeasurement>().is_err());
    }

    #[test]
    fn test_outcome_parsing() {
        assert_eq!("0".parse::<Outcome>().unwrap(), Outcome::Zero);
        assert_eq!(Outcome::try_from(1u8).unwrap(), Outcome::One);
        assert_eq!(Outcome::try_from("1").unwrap(), Outcome::One);
        assert_eq!(
            Outcome::try_from(2u8),
            Err(TomographyError::InvalidOutcome("2".into()))
        );
    }

    #[test]
    fn test_measurement_outcomes_map_to_eigenstates() {
        for meas in PauliMeasurement::ALL {
            let zero = meas.eigenstate(Outcome::Zero).label();
            let one = meas.eigenstate(Outcome::One).label();
            assert_eq!(zero, format!("{}p", meas.label()));
            assert_eq!(one, format!("{}m", meas.label()));
        }
    }

    #[test]
    fn test_y_measurement_circuit() {
        let circuit = PauliMeasurement::Y.circuit(0, 0);
        assert_eq!(circuit.gates(), vec![BasisGate::Sdg, BasisGate::H]);
        assert!(circuit.has_measurement());
    }

    #[test]
    fn test_zp_preparation_is_empty() {
        let circuit = PauliPreparation::Zp.circuit(1);
        assert!(circuit.instructions().is_empty());
        assert_eq!(circuit.num_qubits(), 2);
    }

    #[test]
    fn test_string_helpers_agree_with_enums() {
        let m = pauli_measurement_matrix("Y", 1u8).unwrap();
        assert!(approx_eq(&m, &PauliPreparation::Ym.matrix(), 0.0));
    }
}
