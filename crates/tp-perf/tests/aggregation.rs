//! Integration tests: routing, layout and serialization of the aggregation tree.

use approx::assert_relative_eq;
use proptest::prelude::*;
use tp_core::{Flavor, JetRecord, TagTriple};
use tp_io::{Group, OutputFile};
use tp_perf::{JetPerfHists, PerfConfig};

const GEV_EDGES: [f64; 13] =
    [0.0, 20.0, 30.0, 40.0, 50.0, 60.0, 75.0, 90.0, 110.0, 150.0, 200.0, 600.0, f64::INFINITY];

fn small_config() -> PerfConfig {
    PerfConfig {
        n_bins: 40,
        n_2d_bins: 8,
        peter_n_2d_bins: 8,
        pt_edges: GEV_EDGES.to_vec(),
        pt_label_scale: 1.0,
        ..PerfConfig::default()
    }
}

fn bottom_jet() -> JetRecord {
    JetRecord {
        pt: 55.0,
        eta: 0.4,
        valid: true,
        truth_label: Flavor::from_truth_label(5),
        gaia: TagTriple::new(0.1, 0.1, 0.8),
        jfit: TagTriple::new(0.2, 0.3, 0.5),
        jfc: TagTriple::new(0.2, 0.5, 0.3),
        gaia_valid: true,
        ..JetRecord::default()
    }
}

fn written(hists: &JetPerfHists) -> Group {
    let mut root = Group::default();
    hists.write_to(&mut root).unwrap();
    root
}

fn total_entries(group: &Group) -> u64 {
    group.datasets().iter().map(|(_, d)| d.entries).sum()
}

#[test]
fn single_bottom_jet_end_to_end() {
    let mut hists = JetPerfHists::new(small_config()).unwrap();
    hists.fill(&bottom_jet(), 1.0).unwrap();
    let root = written(&hists);

    let all = root.dataset("B/btag/all/gaiaAntiU").unwrap();
    assert_eq!(all.entries, 1);
    assert_relative_eq!(all.sum_of_weights(), 1.0);
    let binned = root.dataset("B/btag/ptBins/50-60/gaiaAntiU").unwrap();
    assert_eq!(binned, all);

    let b = hists.flavor(Flavor::B).unwrap();
    let (name, anti_u) = b.btag().histograms()[6];
    assert_eq!(name, "gaiaAntiU");
    assert_eq!(anti_u.value_at(&[8.0f64.ln()]), Some(1.0));

    for (path, ds) in root.datasets() {
        let in_b_bin_or_all = path.starts_with("B/btag/all/")
            || path.starts_with("B/btag/ptBins/50-60/")
            || path.starts_with("B/ctag/all/");
        let expected = if in_b_bin_or_all { 1 } else { 0 };
        assert_eq!(ds.entries, expected, "{path}");
    }
}

#[test]
fn output_layout() {
    let root = written(&JetPerfHists::new(small_config()).unwrap());
    assert_eq!(root.names().collect::<Vec<_>>(), ["B", "C", "T", "U"]);
    let bins: Vec<_> = root.group("U/btag/ptBins").unwrap().names().map(String::from).collect();
    assert_eq!(bins.len(), 12);
    assert!(bins.contains(&"90-110".to_string()));
    assert!(bins.contains(&"600-INF".to_string()));
    for name in ["gaia", "jfc", "jfit", "gaiaC"] {
        assert!(root.dataset(&format!("T/ctag/all/{name}")).is_some(), "{name}");
    }
    assert_eq!(root.dataset("C/ctag/all/jfc").unwrap().shape, vec![10, 10]);
}

#[test]
fn data_and_error_jets_are_dropped() {
    let mut hists = JetPerfHists::new(small_config()).unwrap();
    for flavor in [Flavor::Data, Flavor::Error] {
        let jet = JetRecord { truth_label: flavor, ..bottom_jet() };
        hists.fill(&jet, 1.0).unwrap();
    }
    assert_eq!(total_entries(&written(&hists)), 0);
}

#[test]
fn repeated_fill_doubles_counts() {
    let mut once = JetPerfHists::new(small_config()).unwrap();
    once.fill(&bottom_jet(), 0.75).unwrap();
    let mut twice = JetPerfHists::new(small_config()).unwrap();
    twice.fill(&bottom_jet(), 0.75).unwrap();
    twice.fill(&bottom_jet(), 0.75).unwrap();

    let (a, b) = (written(&once), written(&twice));
    for ((pa, da), (pb, db)) in a.datasets().into_iter().zip(b.datasets()) {
        assert_eq!(pa, pb);
        assert_eq!(db.entries, 2 * da.entries, "{pa}");
        for (va, vb) in da.values.iter().zip(&db.values) {
            assert_eq!(*vb, 2.0 * va, "{pa}");
        }
    }
}

#[test]
fn serialization_is_deterministic() {
    let mut hists = JetPerfHists::new(small_config()).unwrap();
    for (i, code) in [5, 4, 0, 15, 5, 3].into_iter().enumerate() {
        let jet = JetRecord {
            pt: 10.0 + 45.0 * i as f64,
            truth_label: Flavor::from_truth_label(code),
            ..bottom_jet()
        };
        hists.fill(&jet, 1.0 + i as f64).unwrap();
    }

    let dir = std::env::temp_dir().join(format!("tagperf_det_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let (path_a, path_b) = (dir.join("a.json"), dir.join("b.json"));
    let _ = std::fs::remove_file(&path_a);
    let _ = std::fs::remove_file(&path_b);
    for path in [&path_a, &path_b] {
        let mut out = OutputFile::create(path).unwrap();
        hists.write_to(out.root_mut()).unwrap();
        out.close().unwrap();
    }
    assert_eq!(std::fs::read(&path_a).unwrap(), std::fs::read(&path_b).unwrap());
    assert_eq!(OutputFile::read(&path_a).unwrap(), written(&hists));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn writing_twice_into_one_group_fails() {
    let hists = JetPerfHists::new(small_config()).unwrap();
    let mut root = Group::default();
    hists.write_to(&mut root).unwrap();
    assert!(hists.write_to(&mut root).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_fill_routes_by_truth_label(code in -2i32..20, pt in -100.0f64..1e4, w in 0.0f64..5.0) {
        let mut hists = JetPerfHists::new(small_config()).unwrap();
        let jet = JetRecord { pt, truth_label: Flavor::from_truth_label(code), ..bottom_jet() };
        hists.fill(&jet, w).unwrap();
        let root = written(&hists);
        for flavor in Flavor::SIMULATED {
            let entries = total_entries(root.group(flavor.group_name().unwrap()).unwrap());
            if flavor == jet.truth_label {
                prop_assert!(entries > 0);
            } else {
                prop_assert_eq!(entries, 0);
            }
        }
    }
}

#[test]
fn oversized_config_binning_is_rejected() {
    let cfg: PerfConfig = serde_json::from_str(r#"{"n_bins": 18446744073709551615}"#).unwrap();
    let err = JetPerfHists::new(cfg).unwrap_err();
    assert!(matches!(err, tp_core::Error::Histogram(_)), "{err}");

    let cfg: PerfConfig = serde_json::from_str(r#"{"peter_n_2d_bins": 4294967296}"#).unwrap();
    assert!(tp_perf::peter::FlavoredHists::new(cfg).is_err());
}
