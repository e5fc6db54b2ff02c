//! Integration tests: run drivers over JSON-lines fixtures written on the fly.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tp_core::Error;
use tp_io::OutputFile;
use tp_perf::{PerfConfig, build_hists, fill_peters_hists};

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("tagperf_pipeline_{}_{}_{}", std::process::id(), nanos, name));
    std::fs::create_dir_all(&p).unwrap();
    p
}

fn small_config() -> PerfConfig {
    PerfConfig { n_bins: 50, n_2d_bins: 10, peter_n_2d_bins: 10, ..PerfConfig::default() }
}

/// Two events: a central 55 GeV b-jet, a 10 GeV light jet (fails pt),
/// a forward charm jet (fails eta), and a data-like label.
fn full_events() -> String {
    let ev0 = serde_json::json!({
        "jet_pt": [55e3, 10e3],
        "jet_eta": [0.5, 0.1],
        "jet_MV1": [0.99, 0.1], "jet_MV1c": [0.9, 0.1], "jet_MV2c00": [0.9, 0.1],
        "jet_MV2c10": [0.9, 0.1], "jet_MV2c20": [0.9, 0.1], "jet_MVb": [0.9, 0.1],
        "jet_flavor_truth_label": [5, 0],
        "gaia": {"pu": [0.1, 0.8], "pc": [0.1, 0.1], "pb": [0.8, 0.1]},
        "jfit": {"pu": [0.1, 0.8], "pc": [0.1, 0.1], "pb": [0.8, 0.1]},
        "jfc": {"pu": [0.1, 0.8], "pc": [0.1, 0.1], "pb": [0.8, 0.1]},
        "jet_gaia_isValid": [1, 1],
    });
    let ev1 = serde_json::json!({
        "jet_pt": [80e3, 30e3],
        "jet_eta": [2.7, 1.0],
        "jet_MV1": [0.5, 0.5], "jet_MV1c": [0.5, 0.5], "jet_MV2c00": [0.5, 0.5],
        "jet_MV2c10": [0.5, 0.5], "jet_MV2c20": [0.5, 0.5], "jet_MVb": [0.5, 0.5],
        "jet_flavor_truth_label": [4, -1],
        "gaia": {"pu": [0.0, 0.3], "pc": [0.0, 0.3], "pb": [0.0, 0.4]},
        "jfit": {"pu": [0.3, 0.3], "pc": [0.3, 0.3], "pb": [0.4, 0.4]},
        "jfc": {"pu": [0.3, 0.3], "pc": [0.3, 0.3], "pb": [0.4, 0.4]},
        "jet_gaia_isValid": [0, 1],
    });
    format!("{ev0}\n{ev1}\n")
}

fn reduced_event(labels: &[i32], pts: &[f64], etas: &[f64], jvfs: &[f64]) -> String {
    let jfc = serde_json::json!({
        "pu": vec![0.1; labels.len()], "pc": vec![0.6; labels.len()], "pb": vec![0.3; labels.len()],
    });
    serde_json::json!({
        "nJets": labels.len(),
        "jet_pt": pts, "jet_eta": etas, "jet_JVF": jvfs,
        "jet_flavor_truth_label": labels,
        "jfit": jfc.clone(), "jfc": jfc,
    })
    .to_string()
}

#[test]
fn build_hists_selects_and_writes() {
    let dir = tmp_dir("build");
    let input = dir.join("events.jsonl");
    std::fs::write(&input, full_events()).unwrap();
    let out = dir.join("perf.json");

    let summary = build_hists(&[&input], &out, small_config()).unwrap();
    assert_eq!(summary.events, 2);
    assert_eq!(summary.total_jets, 4);
    // the b-jet and the unlabelled jet pass the selection; the latter is dropped on fill
    assert_eq!(summary.selected_jets, 2);

    let tree = OutputFile::read(&out).unwrap();
    assert_eq!(tree.dataset("B/btag/all/mv1").unwrap().entries, 1);
    assert_eq!(tree.dataset("B/btag/ptBins/50-60/gaiaAntiU").unwrap().entries, 1);
    assert_eq!(tree.dataset("B/btag/ptBins/60-75/gaiaAntiU").unwrap().entries, 0);
    assert_eq!(tree.dataset("C/btag/all/mv1").unwrap().entries, 0);
    assert_eq!(tree.dataset("U/btag/all/mv1").unwrap().entries, 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn existing_output_is_refused_before_reading() {
    let dir = tmp_dir("exists");
    let out = dir.join("perf.json");
    std::fs::write(&out, "keep").unwrap();
    let missing = dir.join("does-not-exist.jsonl");

    let err = build_hists(&[&missing], &out, small_config()).unwrap_err();
    assert!(matches!(err, Error::OutputExists(_)), "{err}");
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "keep");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn bad_jet_index_aborts_run_without_output() {
    let dir = tmp_dir("bad_index");
    let input = dir.join("events.jsonl");
    // claims two jets, carries one
    let mut event: serde_json::Value =
        serde_json::from_str(&reduced_event(&[5], &[30e3], &[0.0], &[0.9])).unwrap();
    event["nJets"] = serde_json::json!(2);
    std::fs::write(&input, format!("{event}\n")).unwrap();
    let out = dir.join("peter.json");

    let err = fill_peters_hists(&[&input], &out, small_config()).unwrap_err();
    assert!(matches!(err, Error::BadJetIndex { event: 0, index: 1, n_jets: 2 }), "{err}");
    assert!(!out.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn peters_hists_apply_jvf_and_test_mode() {
    let dir = tmp_dir("peter");
    let input = dir.join("events.jsonl");
    let lines: Vec<String> = (0..150)
        .map(|_| {
            reduced_event(
                &[4, 4, 4, 0],
                &[30e3, 30e3, 60e3, 30e3],
                &[0.0, 0.0, 0.0, 2.45],
                &[0.9, 0.1, 0.1, 0.1],
            )
        })
        .collect();
    std::fs::write(&input, lines.join("\n")).unwrap();
    let out = dir.join("peter.json");

    let config = PerfConfig { test_mode: true, ..small_config() };
    let summary = fill_peters_hists(&[&input], &out, config).unwrap();
    assert_eq!(summary.events, 100);
    assert_eq!(summary.total_jets, 400);
    // per event: good-JVF charm, hard charm, forward light pass; soft low-JVF charm fails
    assert_eq!(summary.selected_jets, 300);

    let tree = OutputFile::read(&out).unwrap();
    assert_eq!(tree.dataset("C/jfc").unwrap().entries, 200);
    assert_eq!(tree.dataset("C/efficiency/pass").unwrap().entries, 200);
    assert_eq!(tree.dataset("C/efficiency/fail").unwrap().entries, 0);
    assert_eq!(tree.dataset("U/jfit").unwrap().entries, 100);
    assert_eq!(tree.dataset("B/jfc").unwrap().entries, 0);

    let fields = std::fs::read_to_string(dir.join("required_branches.txt")).unwrap();
    assert!(fields.lines().any(|l| l == "jet_JVF"));
    assert!(fields.lines().any(|l| l == "nJets"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn input_past_the_event_limit_is_never_read() {
    let dir = tmp_dir("corrupt_tail");
    let input = dir.join("events.jsonl");
    let good = reduced_event(&[4], &[30e3], &[0.0], &[0.9]);
    let mut bytes = format!("{good}\n").repeat(150).into_bytes();
    bytes.extend_from_slice(&[0xff, 0xfe, 0xfd, b'\n']);
    std::fs::write(&input, bytes).unwrap();
    let out = dir.join("peter.json");

    let config = PerfConfig { test_mode: true, ..small_config() };
    let summary = fill_peters_hists(&[&input], &out, config).unwrap();
    assert_eq!(summary.events, 100);
    assert_eq!(summary.selected_jets, 100);

    // a full run reaches the bad line and fails
    let err = fill_peters_hists(&[&input], &dir.join("full.json"), small_config()).unwrap_err();
    assert!(matches!(err, Error::Json(_)), "{err}");

    let _ = std::fs::remove_dir_all(&dir);
}
