use std::{error::Error, fs};

use assert_cmd::Command;

use predicates::prelude::*;

#[test]
fn test_file_missing() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("lipidscorer")?;

    cmd.arg("not_real.json").arg("-o").arg("-");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));
    Ok(())
}

#[test]
fn test_malformed_rt_range() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("lipidscorer")?;

    cmd.arg("not_real.json").arg("-o").arg("-").args(["-r", "5-z"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "Failed to parse retention time range end invalid float literal",
    ));

    let mut cmd = Command::cargo_bin("lipidscorer")?;

    cmd.arg("not_real.json").arg("-o").arg("-").args(["-r", "a-5"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "Failed to parse retention time range start invalid float literal",
    ));

    Ok(())
}

#[test]
fn test_malformed_input() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("lipidscorer")?;
    cmd.arg("-").write_stdin("[{\"lipid\": 1}]");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("MalformedInput"));
    Ok(())
}

#[test]
fn test_run() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("lipidscorer")?;
    cmd.env("RUST_LOG", "info");
    cmd.arg("./tests/data/triacylglycerols.json").args(["-o", "-"]);
    let result = cmd.assert().success();
    result
        .stderr(predicate::str::contains("Annotations: 3"))
        .stderr(predicate::str::contains(
            "Companions Detected: 3 | Defaulted: 0 | Preassigned: 0",
        ))
        .stderr(predicate::str::contains("Rule Firings: 3 | Penalties: 0"))
        .stdout(predicate::str::contains("\"[M+Na]+\""))
        .stdout(predicate::str::contains("\"[M+H-H2O]+\""))
        .stdout(predicate::str::contains("\"[M+2H]2+\""))
        .stdout(predicate::str::contains("\"normalized_score\": 0.5"));
    Ok(())
}

#[test]
fn test_run_subset_from_stdin() -> Result<(), Box<dyn Error>> {
    let input = fs::read_to_string("./tests/data/triacylglycerols.json")?;
    let mut cmd = Command::cargo_bin("lipidscorer")?;
    cmd.env("RUST_LOG", "info");
    cmd.args(["-", "-o", "-", "-r", "9.5-12"]).write_stdin(input);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Annotations: 2"))
        .stderr(predicate::str::contains("Out of Range: 1"))
        .stderr(predicate::str::contains("Rule Firings: 1 | Penalties: 0"))
        .stdout(predicate::str::contains("TG 52:3").not());
    Ok(())
}

#[test]
fn test_print_config_overrides() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("lipidscorer")?;
    cmd.args([
        "-",
        "--print-config",
        "--positive-scoring",
        "false",
        "--rule",
        "carbon-count",
        "--config-file",
        "./tests/data/strict_detection.toml",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("companion_ppm = 0"))
        .stdout(predicate::str::contains("deisotope_ppm = 5"))
        .stdout(predicate::str::contains("positive_scoring_enabled = false"))
        .stdout(predicate::str::contains(r#"rules = ["carbon-count"]"#));
    Ok(())
}

#[test]
fn test_print_config_from_env() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("lipidscorer")?;
    cmd.env("LIPIDSCORER_SCORING__POSITIVE_SCORING_ENABLED", "false")
        .env("LIPIDSCORER_DETECTION__DEISOTOPE_PPM", "7");
    cmd.args(["-", "--print-config"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("deisotope_ppm = 7"))
        .stdout(predicate::str::contains("positive_scoring_enabled = false"));
    Ok(())
}

#[test]
fn test_missing_config_file() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("lipidscorer")?;
    cmd.args(["-", "--print-config", "--config-file", "not_real.toml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not_real.toml"));
    Ok(())
}
