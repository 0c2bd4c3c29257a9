//! CLI command integration tests.
//! Each test uses a temp directory via HM_DATA_DIR for full isolation.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hm_cmd(data_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("hm").unwrap();
    cmd.env("HM_DATA_DIR", data_dir.path());
    cmd
}

fn extract_stat_value(output: &str, prefix: &str) -> String {
    output
        .lines()
        .find(|l| l.contains(prefix))
        .unwrap_or_else(|| panic!("stat line containing '{prefix}' not found in output:\n{output}"))
        .split_whitespace()
        .last()
        .unwrap()
        .to_string()
}

fn stats(dir: &TempDir, collection: &str) -> String {
    let output = hm_cmd(dir)
        .args(["stats", "--collection", collection])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_jsonl(dir: &TempDir, name: &str, count: usize) -> std::path::PathBuf {
    let mut lines = String::new();
    for i in 0..count {
        let embedding: Vec<f32> = (0..6)
            .map(|d| (((i * 5 + d * 3) % 11) as f32 - 5.0) / 5.0)
            .collect();
        let category = if i % 2 == 0 { "even" } else { "odd" };
        lines.push_str(
            &serde_json::json!({
                "id": format!("doc-{i}"),
                "embedding": embedding,
                "metadata": { "category": category, "text_preview": format!("document {i}") }
            })
            .to_string(),
        );
        lines.push('\n');
    }
    let path = dir.path().join(name);
    std::fs::write(&path, lines).unwrap();
    path
}

#[test]
fn stats_fresh_collection() {
    let dir = TempDir::new().unwrap();
    hm_cmd(&dir)
        .args(["stats", "--collection", "fresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("collection: fresh"))
        .stdout(predicate::str::contains("items:      0"))
        .stdout(predicate::str::contains("dimension:  -"));
}

#[test]
fn insert_then_search() {
    let dir = TempDir::new().unwrap();
    hm_cmd(&dir)
        .args([
            "insert",
            "--collection",
            "songs",
            "--id",
            "graceland",
            "--embedding",
            "[0.9, -0.1, 0.4, 0.3]",
            "--category",
            "music",
            "--preview",
            "Paul Simon",
            "--valence",
            "0.8",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("inserted graceland"));
    hm_cmd(&dir)
        .args([
            "insert",
            "--collection",
            "songs",
            "--id",
            "other",
            "--embedding",
            "[-0.9, 0.7, -0.4, 0.1]",
        ])
        .assert()
        .success();

    hm_cmd(&dir)
        .args([
            "search",
            "--collection",
            "songs",
            "--embedding",
            "[0.9, -0.1, 0.4, 0.3]",
            "--top-k",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. graceland"))
        .stdout(predicate::str::contains("[music]"))
        .stdout(predicate::str::contains("Paul Simon"));

    assert_eq!(extract_stat_value(&stats(&dir, "songs"), "items:"), "2");
    assert_eq!(extract_stat_value(&stats(&dir, "songs"), "dimension:"), "4");
}

#[test]
fn insert_without_id_generates_uuid() {
    let dir = TempDir::new().unwrap();
    let output = hm_cmd(&dir)
        .args(["insert", "--embedding", "[0.1, 0.2]"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let id = stdout.trim().strip_prefix("inserted ").unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(id.matches('-').count(), 4);
}

#[test]
fn insert_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    hm_cmd(&dir)
        .args(["insert", "--embedding", "not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("embedding"));
    hm_cmd(&dir)
        .args(["insert", "--embedding", "[]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
    hm_cmd(&dir)
        .args(["insert", "--embedding", "[0.1]", "--valence", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valence"));
}

#[test]
fn dimension_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    hm_cmd(&dir)
        .args(["insert", "--id", "a", "--embedding", "[0.1, 0.2, 0.3]"])
        .assert()
        .success();
    hm_cmd(&dir)
        .args(["insert", "--id", "b", "--embedding", "[0.1, 0.2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dimension mismatch"));
    hm_cmd(&dir)
        .args(["search", "--embedding", "[0.1]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dimension mismatch"));
}

#[test]
fn ingest_then_filtered_json_search() {
    let dir = TempDir::new().unwrap();
    let file = write_jsonl(&dir, "docs.jsonl", 20);

    hm_cmd(&dir)
        .args(["ingest", "--collection", "docs"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("20 items"))
        .stdout(predicate::str::contains("done. items=20"));

    let output = hm_cmd(&dir)
        .args([
            "search",
            "--collection",
            "docs",
            "--embedding",
            "[0.2, -0.4, 0.6, 0.0, -1.0, 0.8]",
            "--top-k",
            "50",
            "--category",
            "odd",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let hits: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(hits.len(), 10);
    for hit in &hits {
        assert_eq!(hit["metadata"]["category"], "odd");
    }
    let scores: Vec<f64> = hits.iter().map(|h| h["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn ingest_reports_bad_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.jsonl");
    std::fs::write(&path, "{\"id\": \"ok\", \"embedding\": [0.1]}\n{oops}\n").unwrap();
    hm_cmd(&dir)
        .arg("ingest")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.jsonl:2"));
}

#[test]
fn search_modes_and_harmonics_parse() {
    let dir = TempDir::new().unwrap();
    let file = write_jsonl(&dir, "docs.jsonl", 8);
    hm_cmd(&dir).arg("ingest").arg(&file).assert().success();

    for mode in ["neutral", "happy", "raw", "graceland", "focused"] {
        hm_cmd(&dir)
            .args(["search", "--embedding", "[0.1, 0.1, 0.1, 0.1, 0.1, 0.1]"])
            .args(["--mode", mode, "--harmonic", "octave"])
            .assert()
            .success();
    }
    hm_cmd(&dir)
        .args(["search", "--embedding", "[0.1]", "--mode", "elvis"])
        .assert()
        .failure();
}

#[test]
fn search_vibe_favors_matching_valence() {
    let dir = TempDir::new().unwrap();
    for (id, embedding, valence) in [
        ("gloomy", "[0.5, 0.5, 0.5]", "-0.9"),
        ("sunny", "[0.5, 0.5, 0.45]", "0.9"),
    ] {
        hm_cmd(&dir)
            .args(["insert", "--id", id, "--embedding", embedding, "--valence", valence])
            .assert()
            .success();
    }

    let top = |extra: &[&str]| -> String {
        let output = hm_cmd(&dir)
            .args(["search", "--embedding", "[0.5, 0.5, 0.5]", "--json"])
            .args(extra)
            .output()
            .unwrap();
        assert!(output.status.success());
        let hits: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
        hits[0]["id"].as_str().unwrap().to_string()
    };
    assert_eq!(top(&[]), "gloomy");
    assert_eq!(top(&["--vibe", "0.9"]), "sunny");

    hm_cmd(&dir)
        .args(["search", "--embedding", "[0.5, 0.5, 0.5]", "--vibe", "-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("vibe"));
}

#[test]
fn import_rejects_conflicting_dimension() {
    let dir = TempDir::new().unwrap();
    hm_cmd(&dir)
        .args(["insert", "--id", "a", "--embedding", "[0.1, 0.2]"])
        .assert()
        .success();
    let export_path = dir.path().join("two.json");
    hm_cmd(&dir).arg("export").arg(&export_path).assert().success();

    std::fs::write(dir.path().join("config.toml"), "[index]\ndimension = 3\n").unwrap();
    hm_cmd(&dir)
        .args(["import", "--collection", "three"])
        .arg(&export_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("dimension mismatch"));
    assert_eq!(extract_stat_value(&stats(&dir, "three"), "items:"), "0");
}

#[test]
fn search_empty_collection() {
    let dir = TempDir::new().unwrap();
    hm_cmd(&dir)
        .args(["search", "--embedding", "[0.5, 0.5]"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no results)"));
}

#[test]
fn remove_and_compact() {
    let dir = TempDir::new().unwrap();
    let file = write_jsonl(&dir, "docs.jsonl", 12);
    hm_cmd(&dir).arg("ingest").arg(&file).assert().success();

    hm_cmd(&dir)
        .args(["remove", "doc-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed doc-3"));
    hm_cmd(&dir)
        .args(["remove", "doc-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item not found"));

    let out = stats(&dir, "default");
    assert_eq!(extract_stat_value(&out, "items:"), "11");
    assert_eq!(extract_stat_value(&out, "tombstones:"), "1");

    hm_cmd(&dir)
        .arg("compact")
        .assert()
        .success()
        .stdout(predicate::str::contains("dropped 1 tombstones"));
    let out = stats(&dir, "default");
    assert_eq!(extract_stat_value(&out, "items:"), "11");
    assert_eq!(extract_stat_value(&out, "tombstones:"), "0");

    let output = hm_cmd(&dir)
        .args(["search", "--embedding", "[0.2, -0.4, 0.6, 0.0, -1.0, 0.8]"])
        .args(["--top-k", "20", "--json"])
        .output()
        .unwrap();
    let hits: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(hits.len(), 11);
    assert!(hits.iter().all(|h| h["id"] != "doc-3"));
}

#[test]
fn export_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    let file = write_jsonl(&dir, "docs.jsonl", 15);
    hm_cmd(&dir)
        .args(["ingest", "--collection", "src"])
        .arg(&file)
        .assert()
        .success();

    let export_path = dir.path().join("export.json");
    hm_cmd(&dir)
        .args(["export", "--collection", "src"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));
    assert!(export_path.exists());

    hm_cmd(&dir)
        .args(["import", "--collection", "dst"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("items=15"));

    let a = stats(&dir, "src");
    let b = stats(&dir, "dst");
    for key in ["items:", "layers:", "avg_degree:", "dimension:"] {
        assert_eq!(extract_stat_value(&a, key), extract_stat_value(&b, key));
    }
}

#[test]
fn search_persists_reinforcement() {
    let dir = TempDir::new().unwrap();
    hm_cmd(&dir)
        .args(["insert", "--id", "x", "--embedding", "[0.3, 0.6]"])
        .assert()
        .success();

    let score = |dir: &TempDir| -> f64 {
        let output = hm_cmd(dir)
            .args(["search", "--embedding", "[0.3, 0.6]", "--json"])
            .output()
            .unwrap();
        let hits: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
        hits[0]["score"].as_f64().unwrap()
    };
    let first = score(&dir);
    let second = score(&dir);
    assert!(second > first, "reinforcement should carry across runs: {first} -> {second}");
}

#[test]
fn config_toml_is_applied() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[index]\nm = 1\n").unwrap();
    hm_cmd(&dir)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
