//! Pauli bases for single-qubit state and process tomography.
//!
//! A tomography experiment prepares each qubit in one of the six Pauli
//! eigenstates and measures it along X, Y or Z. This crate provides the
//! fixed lookup table behind that: the preparation and measurement circuits,
//! and the density matrices / projectors used when reconstructing a state
//! from the measured counts.
//!
//! ```rust
//! use arvak_tomography::{pauli_measurement_matrix, pauli_preparation_matrix};
//!
//! let zp = pauli_preparation_matrix("Zp")?;
//! assert_eq!(zp[0][0].re, 1.0);
//! assert_eq!(pauli_measurement_matrix("X", 0u8)?, pauli_preparation_matrix("Xp")?);
//! assert!(pauli_preparation_matrix("Q").is_err());
//! # Ok::<(), arvak_tomography::TomographyError>(())
//! ```

pub mod circuit;
pub mod error;
pub mod matrix;
pub mod pauli;

pub use circuit::{BasisCircuit, BasisGate, BasisInstruction};
pub use error::{TomographyError, TomographyResult};
pub use matrix::Matrix2;
pub use pauli::{
    Outcome, PauliBasis, PauliMeasurement, PauliPreparation, pauli_measurement_circuit,
    pauli_measurement_matrix, pauli_preparation_circuit, pauli_preparation_matrix,
};
