use std::path::PathBuf;

use grouping_core::{group_by, Cluster};

#[derive(Debug, Clone, PartialEq)]
struct Frame {
    name: String,
    brightness: f64,
}

fn load_fixture_frames() -> Vec<Frame> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("frame-brightness.csv");

    let content = std::fs::read_to_string(path).expect("fixture should be readable");
    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|line| {
            let (name, brightness) = line.split_once(',').expect("fixture rows have two fields");
            Frame {
                name: name.to_string(),
                brightness: brightness.trim().parse().expect("brightness should parse"),
            }
        })
        .collect()
}

fn fnv1a_64(input: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in input.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn group_fixture(tolerance: f64) -> Vec<Cluster<Frame>> {
    group_by(
        load_fixture_frames(),
        |frame: &Frame| frame.brightness,
        tolerance,
    )
    .expect("fixture keys are finite")
}

#[test]
fn brightness_fixture_signature_is_stable() {
    let clusters = group_fixture(8.0);

    let signature = clusters
        .iter()
        .map(|c| format!("{:.6}|{:.6}|{:.6}|{}", c.mean(), c.min(), c.max(), c.len()))
        .collect::<Vec<_>>()
        .join("\n");

    assert_eq!(clusters.len(), 7);
    assert_eq!(fnv1a_64(&signature), 0xf43cfe52cf909786);
}

#[test]
fn brightness_fixture_members_keep_arrival_order() {
    let clusters = group_fixture(8.0);
    let names = |cluster: &Cluster<Frame>| {
        cluster
            .iter()
            .map(|frame| frame.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };

    assert_eq!(names(&clusters[0]), "frame-021");
    assert_eq!(
        names(&clusters[1]),
        "frame-004 frame-008 frame-012 frame-016"
    );
    assert_eq!(
        names(&clusters[3]),
        "frame-000 frame-001 frame-003 frame-006 frame-013 frame-019"
    );
    assert_eq!(names(&clusters[6]), "frame-020");
    assert_eq!(clusters[6].mean(), 0.0);
}

#[test]
fn brightness_fixture_covers_every_frame() {
    let frames = load_fixture_frames();
    let clusters = group_fixture(8.0);

    let total: usize = clusters.iter().map(Cluster::len).sum();
    assert_eq!(total, frames.len());
    for frame in &frames {
        let hits = clusters
            .iter()
            .filter(|c| c.members().contains(frame))
            .count();
        assert_eq!(hits, 1, "{} should be in exactly one cluster", frame.name);
    }
}

#[test]
fn brightness_fixture_single_cluster_with_unbounded_tolerance() {
    let frames = load_fixture_frames();
    let clusters = group_fixture(f64::INFINITY);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].members(), frames.as_slice());
    assert_eq!(clusters[0].min(), 0.0);
    assert_eq!(clusters[0].max(), 210.8);
}
