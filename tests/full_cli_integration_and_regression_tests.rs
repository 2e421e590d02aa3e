use std::path::Path;
use std::process::{Command, Output};

fn run_command(args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_pendulum-lab"))
        .args(args)
        .output()
        .expect("failed to execute process");
    assert!(
        output.status.success(),
        "Command {:?} failed:\n{}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn data_rows(text: &str) -> Vec<Vec<f64>> {
    text.lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| {
            line.split_whitespace()
                .map(|field| field.parse().expect("non-numeric field"))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_to_stdout() {
        let output = run_command(&[
            "exponential",
            "./tests/param_files/exponential_tiny.prm",
            "--method",
            "euler",
        ]);
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.starts_with("# Time  y  y_exact\n"));
        assert!(stdout.contains("# stepsize = 0.25\n"));

        let rows = data_rows(&stdout);
        let times: Vec<f64> = rows.iter().map(|row| row[0]).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75]);
        // Euler: y_{n+1} = (1 + k h) y_n
        assert_eq!(rows[1][1], 1.0825);
    }

    #[test]
    fn test_double_pendulum_save() {
        run_command(&[
            "double-pendulum",
            "./tests/param_files/double_pendulum_tiny.prm",
            "--save",
        ]);
        let directory = Path::new("out/double_pendulum/double_pendulum_tiny");
        let table = std::fs::read_to_string(directory.join("double_pendulum_tiny.dat")).unwrap();
        let record: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(directory.join("double_pendulum_tiny.json")).unwrap(),
        )
        .unwrap();
        assert!(directory.join("double_pendulum_tiny_diagnostics.txt").exists());

        assert_eq!(record["problem"], "double-pendulum");
        assert_eq!(record["method"], "rk4");
        assert_eq!(record["summary"]["steps"], 16);
        assert_eq!(record["summary"]["samples"], 4);

        let rows = data_rows(&table);
        assert_eq!(rows.len(), 4);
        let energy_0 = rows[0][5];
        for row in &rows {
            assert_eq!(row.len(), 6);
            assert!((row[5] - energy_0).abs() < 1e-4 * energy_0);
        }
    }

    #[test]
    fn test_params_with_missing_file() {
        let output = run_command(&["params", "pendulum", "./tests/param_files/missing.prm"]);
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert_eq!(stdout.lines().count(), 7);
        assert!(stdout.contains("# omega = 1\n"));

        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("Using default parameters"));
    }
}
