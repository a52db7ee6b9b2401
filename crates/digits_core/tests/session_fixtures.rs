use digits_core::script::Session;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn load_fixtures() -> Vec<(String, Session)> {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixture_dir())
        .unwrap_or_else(|err| panic!("failed to read fixture dir: {err}"))
        .map(|entry| entry.expect("readable dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let source = fs::read_to_string(&path)
                .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
            let session = Session::from_toml_str(&source)
                .unwrap_or_else(|err| panic!("failed to load {name}: {err}"));
            (name, session)
        })
        .collect()
}

#[test]
fn every_fixture_meets_its_expectations() {
    let fixtures = load_fixtures();
    assert!(!fixtures.is_empty(), "no fixtures found");

    let mut failures = Vec::new();
    for (name, session) in &fixtures {
        let expect = session
            .expect
            .as_ref()
            .unwrap_or_else(|| panic!("fixture {name} has no [expect] table"));
        let outcome = session
            .run()
            .unwrap_or_else(|err| panic!("fixture {name} failed to run: {err}"));
        for mismatch in outcome.mismatches(expect) {
            failures.push(format!("{name}: {mismatch}"));
        }
    }

    assert!(failures.is_empty(), "fixture failures:\n{}", failures.join("\n"));
}

#[test]
fn replays_are_deterministic() {
    for (name, session) in load_fixtures() {
        let first = session.run().unwrap();
        let second = session.run().unwrap();
        assert_eq!(first, second, "{name}");
    }
}
