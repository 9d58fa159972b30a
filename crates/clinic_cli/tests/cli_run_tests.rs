use std::fs;
use std::process::Command;

use serde_json::json;
use tempfile::TempDir;

fn write_inputs(dir: &TempDir) {
    let people: Vec<_> = (0..40)
        .map(|i| {
            json!({
                "id": i,
                "nome": format!("Pessoa {i}"),
                "idade": 30 + i,
                "profissao": "Professor",
                "morada": {"distrito": if i % 3 == 0 { "Faro" } else { "Braga" }},
                "descrição": "gripe",
            })
        })
        .collect();
    fs::write(dir.path().join("pessoas.json"), json!(people).to_string()).expect("dataset");
    fs::write(
        dir.path().join("config.json"),
        json!({"lambda_rate": 30, "num_doctors": 2, "simulation_time": 180, "seed": 8}).to_string(),
    )
    .expect("config");
}

fn clinic(dir: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_clinic"));
    command.current_dir(dir.path()).env("RUST_LOG", "warn");
    command
}

#[test]
fn prints_the_report_and_writes_outputs() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir);

    let output = clinic(&dir)
        .args(["--output-json", "out/run.json", "--output-csv", "timeline.csv"])
        .output()
        .expect("run clinic");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Doentes atendidos:"));
    assert!(stdout.contains("M1 [CLIN]"));
    assert!(stdout.contains("Braga"));

    let run: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out/run.json")).expect("json"))
            .expect("parse");
    assert_eq!(run["fila_sizes"].as_array().map(Vec::len), Some(180));
    let timeline = fs::read_to_string(dir.path().join("timeline.csv")).expect("csv");
    assert_eq!(timeline.lines().count(), 181);
}

#[test]
fn same_seed_gives_the_same_report() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir);

    let first = clinic(&dir).output().expect("run clinic");
    let second = clinic(&dir).output().expect("run clinic");
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn invalid_overrides_fail_before_running() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir);

    let output = clinic(&dir)
        .args(["--num-doctors", "0"])
        .output()
        .expect("run clinic");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("num_doctors"));
    assert!(output.stdout.is_empty());
}

#[test]
fn overflowing_uniform_mean_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir);

    let output = clinic(&dir)
        .args(["--service-distribution", "uniform", "--mean-service-time", "1.5e308"])
        .output()
        .expect("run clinic");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("mean_service_time"));
    assert!(output.stdout.is_empty());
}
