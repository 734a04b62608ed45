//! End-to-end tests of the `arvak-qv` binary.
//!
//! Input files are written to a temporary directory and the compiled binary
//! is run against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn arvak_qv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_arvak-qv"))
        .args(args)
        .env_remove("ARVAK_QV_PREFIX")
        .env_remove("ARVAK_QV_THRESHOLD")
        .env_remove("ARVAK_QV_CONFIDENCE")
        .env("HOME", std::env::temp_dir())
        .output()
        .expect("failed to run arvak-qv")
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// fit
// ============================================================================

mod fit {
    use super::*;

    const IDEAL_PROBS: &str = r#"{"qv_depth_2_trial_0": [0.4, 0.3, 0.2, 0.1]}"#;

    #[test]
    fn json_report_for_single_trial() {
        let dir = tempfile::tempdir().unwrap();
        let ideal = write(dir.path(), "ideal.json", IDEAL_PROBS);
        let counts = write(
            dir.path(),
            "counts.json",
            r#"{"qv_depth_2_trial_0": {"00": 40, "01": 30, "10": 20, "11": 10}}"#,
        );

        let output = arvak_qv(&[
            "fit",
            "--ideal",
            ideal.to_str().unwrap(),
            "--probabilities",
            "--counts",
            counts.to_str().unwrap(),
            "--format",
            "json",
        ]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));

        let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        let mean = report["statistics"][0]["heavy_output_mean"].as_f64().unwrap();
        assert!((mean - 0.7).abs() < 1e-12);
        assert_eq!(report["success"][0]["success"], false);
        assert_eq!(report["quantum_volumes"][0], 4);
        assert_eq!(report["achieved_quantum_volume"], 1);
    }

    #[test]
    fn batches_are_summed() {
        let dir = tempfile::tempdir().unwrap();
        let ideal = write(dir.path(), "ideal.json", IDEAL_PROBS);
        let first = write(dir.path(), "a.json", r#"{"qv_depth_2_trial_0": {"00": 3}}"#);
        let second = write(
            dir.path(),
            "b.json",
            r#"{"qv_depth_2_trial_0": {"00": 2, "10": 5}}"#,
        );

        let output = arvak_qv(&[
            "fit",
            "-i",
            ideal.to_str().unwrap(),
            "--probabilities",
            "-c",
            first.to_str().unwrap(),
            "-c",
            second.to_str().unwrap(),
            "-f",
            "json",
        ]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));

        let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["num_batches"], 2);
        let mean = report["statistics"][0]["heavy_output_mean"].as_f64().unwrap();
        assert!((mean - 0.5).abs() < 1e-12);
    }

    #[test]
    fn statevector_input_and_table_output() {
        let dir = tempfile::tempdir().unwrap();
        let ideal = write(
            dir.path(),
            "ideal.json",
            r#"{"qv_depth_1_trial_0": [[0.6, 0.0], [0.0, 0.8]]}"#,
        );
        let counts = write(dir.path(), "counts.json", r#"{"qv_depth_1_trial_0": {"1": 9, "0": 1}}"#);
        let report_path = dir.path().join("report.json");

        let output = arvak_qv(&[
            "fit",
            "--ideal",
            ideal.to_str().unwrap(),
            "--counts",
            counts.to_str().unwrap(),
            "--output",
            report_path.to_str().unwrap(),
        ]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains("Achieved quantum volume"));

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
        let mean = saved["statistics"][0]["heavy_output_mean"].as_f64().unwrap();
        assert!((mean - 0.9).abs() < 1e-12);
    }

    #[test]
    fn counts_without_ideal_fail() {
        let dir = tempfile::tempdir().unwrap();
        let ideal = write(dir.path(), "ideal.json", IDEAL_PROBS);
        let counts = write(dir.path(), "counts.json", r#"{"qv_depth_2_trial_1": {"00": 1}}"#);

        let output = arvak_qv(&[
            "fit",
            "-i",
            ideal.to_str().unwrap(),
            "--probabilities",
            "-c",
            counts.to_str().unwrap(),
        ]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("must be added before its counts"));
    }

    #[test]
    fn config_file_sets_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let ideal = write(dir.path(), "ideal.json", r#"{"lab_depth_1_trial_0": [0.9, 0.1]}"#);
        let counts = write(dir.path(), "counts.json", r#"{"lab_depth_1_trial_0": {"0": 10}}"#);
        let config = write(dir.path(), "qv.yaml", "prefix: lab\n");

        let output = arvak_qv(&[
            "fit",
            "-i",
            ideal.to_str().unwrap(),
            "--probabilities",
            "-c",
            counts.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "-f",
            "json",
        ]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["statistics"][0]["depth"], 1);
    }

    #[test]
    fn missing_file_fails() {
        let output = arvak_qv(&["fit", "-i", "/nonexistent/ideal.json", "-c", "x.json"]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("File not found"));
    }

    #[test]
    fn counts_are_required() {
        let output = arvak_qv(&["fit", "-i", "ideal.json"]);
        assert!(!output.status.success());
    }
}

// ============================================================================
// basis
// ============================================================================

mod basis {
    use super::*;

    #[test]
    fn full_table_lists_every_label() {
        let output = arvak_qv(&["basis"]);
        assert!(output.status.success());
        let text = stdout(&output);
        for label in ["Xp", "Xm", "Yp", "Ym", "Zp", "Zm", "X", "Y", "Z"] {
            assert!(text.contains(label), "missing {label}");
        }
    }

    #[test]
    fn single_label_as_qasm() {
        let output = arvak_qv(&["basis", "--label", "Y", "--qasm"]);
        assert!(output.status.success());
        let text = stdout(&output);
        assert!(text.contains("OPENQASM 3.0;"));
        assert!(text.contains("sdg q[0];"));
        assert!(text.contains("c[0] = measure q[0];"));
    }

    #[test]
    fn unknown_label_fails() {
        let output = arvak_qv(&["basis", "--label", "Q"]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("Unknown label"));
    }
}

// ============================================================================
// version
// ============================================================================

#[test]
fn version_prints_components() {
    let output = arvak_qv(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("arvak-tomography"));
}
