use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use face_assets::{
    AssetCategory, AssetError, DescriptorFormat, ExtractCommand, ExtractOptions, MalformedAsset,
    Pipeline, PipelineBuilder,
};
use serde_json::{Value, json};
use tempfile::TempDir;

const HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:svg="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"
     viewBox="0 0 210 210">
  <sodipodi:namedview id="base"/>
  <g inkscape:groupmode="layer" inkscape:label="guide_left" style="display:none">
    <rect x="40" y="60" width="50" height="30"/>
  </g>
  <g inkscape:groupmode="layer" inkscape:label="guide_right" style="display:none">
    <path d="m 120,60 50,0 0,30 -50,0 z"/>
  </g>
  <g inkscape:groupmode="layer" inkscape:label="1_left"><path d="M 45 70 L 80 70" style="stroke:#000000"/></g>
  <g inkscape:groupmode="layer" inkscape:label="1_right"><path d="M 125 70 L 160 70"/></g>
  <g inkscape:groupmode="layer" inkscape:label="2_left"><circle cx="60" cy="75" r="5"/></g>
  <g inkscape:groupmode="layer" inkscape:label="2_right"><circle cx="140" cy="75" r="5"/></g>
  <g inkscape:groupmode="layer" inkscape:label="skull_round" style="display:none">
    <circle inkscape:label="eyeball_left" cx="65" cy="75" r="10"/>
    <circle inkscape:label="eyeball_right" cx="145" cy="75" r="10"/>
    <rect inkscape:label="ear_left" x="10" y="20" width="5" height="5"/>
    <rect inkscape:label="ear_right" x="195" y="20" width="5" height="5"/>
    <rect inkscape:label="mouth" x="80" y="150" width="50" height="20"/>
    <rect inkscape:label="nose" x="95" y="100" width="20" height="30"/>
    <rect inkscape:label="hair" x="20" y="0" width="170" height="50"/>
    <path inkscape:label="skull" d="M 105 5 L 200 100 L 105 205 L 10 100 Z"/>
  </g>
  <g inkscape:groupmode="layer" inkscape:label="Assets">
    <g inkscape:label="nose_button" style="display:none"><path d="M 0 0 L 3 3"/></g>
    <g inkscape:label="eyes_1_back" sodipodi:insensitive="true"><circle r="4"/></g>
  </g>
</svg>"#;

fn write_source(dir: &Path) -> PathBuf {
    let path = dir.join("head.svg");
    fs::write(&path, HEAD).expect("Should write source");
    path
}

/// Every file under `root`, keyed by relative path
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).expect("Should list") {
            let path = entry.expect("Should read entry").path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let relative = path.strip_prefix(root).expect("Should be under root").to_path_buf();
                out.insert(relative, fs::read(&path).expect("Should read file"));
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("Should read")).expect("Should be JSON")
}

fn full_pipeline(format: DescriptorFormat) -> Pipeline {
    [
        ExtractCommand::Features,
        ExtractCommand::Skulls,
        ExtractCommand::Assets { categories: vec![] },
    ]
    .iter()
    .fold(PipelineBuilder::new(), |builder, command| command.apply(builder))
    .descriptor_format(format)
    .build()
}

#[test]
fn test_output_layout() {
    let temp = TempDir::new().expect("Should create temp dir");
    let source = write_source(temp.path());
    let out = temp.path().join("out");

    full_pipeline(DescriptorFormat::Tagged)
        .process_file(&source, &out)
        .expect("Should process successfully");

    let files: Vec<_> = snapshot(&out).into_keys().collect();
    let expected: Vec<PathBuf> = [
        "eyes/1_back.svg",
        "head/1_left.json",
        "head/1_left.svg",
        "head/1_right.json",
        "head/1_right.svg",
        "head/2_left.json",
        "head/2_left.svg",
        "head/2_right.json",
        "head/2_right.svg",
        "nose/button.svg",
        "skulls/round/skull.json",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(files, expected);

    // Empty categories still get a clean directory
    for category in ["face", "ears", "mouth", "eyebrows", "hair"] {
        assert!(out.join(category).is_dir(), "{} should exist", category);
    }
}

#[test]
fn test_tagged_descriptors() {
    let temp = TempDir::new().expect("Should create temp dir");
    let source = write_source(temp.path());
    let out = temp.path().join("out");
    full_pipeline(DescriptorFormat::Tagged)
        .process_file(&source, &out)
        .expect("Should process successfully");

    let left = read_json(&out.join("head/2_left.json"));
    assert_eq!(left, json!({"kind": "quad", "coords": [40.0, 60.0, 90.0, 60.0, 90.0, 90.0, 40.0, 90.0]}));
    let right = read_json(&out.join("head/1_right.json"));
    assert_eq!(right["coords"], json!([120.0, 60.0, 170.0, 60.0, 170.0, 90.0, 120.0, 90.0]));

    let skull = read_json(&out.join("skulls/round/skull.json"));
    assert_eq!(skull["schema"], "outline");
    assert_eq!(skull["ear_left"]["coords"], json!([10.0, 20.0, 15.0, 20.0, 15.0, 25.0, 10.0, 25.0]));
    assert_eq!(skull["eyeball_right"], json!({"kind": "circle", "center": [145.0, 75.0], "radius": 10.0}));
    assert_eq!(skull["outline"]["points"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_legacy_descriptors() {
    let temp = TempDir::new().expect("Should create temp dir");
    let source = write_source(temp.path());
    let out = temp.path().join("out");
    full_pipeline(DescriptorFormat::Legacy)
        .process_file(&source, &out)
        .expect("Should process successfully");

    let left = read_json(&out.join("head/1_left.json"));
    assert_eq!(left, json!([40.0, 60.0, 90.0, 60.0, 90.0, 90.0, 40.0, 90.0]));

    let skull = read_json(&out.join("skulls/round/skull.json"));
    assert_eq!(skull["eyeball_left"], json!([[65.0, 75.0], 10.0]));
    assert_eq!(skull["nose"], json!([95.0, 100.0, 115.0, 100.0, 115.0, 130.0, 95.0, 130.0]));
    assert_eq!(skull["outline"][1], json!([105.0, 5.0]));
}

#[test]
fn test_rerun_is_byte_identical() {
    let temp = TempDir::new().expect("Should create temp dir");
    let source = write_source(temp.path());
    let out = temp.path().join("out");
    let pipeline = full_pipeline(DescriptorFormat::Tagged);

    pipeline.process_file(&source, &out).expect("Should process successfully");
    let first = snapshot(&out);

    // Stray files in owned directories do not survive a rerun
    fs::write(out.join("head").join("3_left.svg"), "stale").expect("Should write");

    pipeline.process_file(&source, &out).expect("Should process successfully");
    assert_eq!(first, snapshot(&out));
}

#[test]
fn test_fragments_are_standalone() {
    let temp = TempDir::new().expect("Should create temp dir");
    let source = write_source(temp.path());
    let out = temp.path().join("out");
    full_pipeline(DescriptorFormat::Tagged)
        .process_file(&source, &out)
        .expect("Should process successfully");

    let feature = fs::read_to_string(out.join("head/1_left.svg")).expect("Should read");
    assert!(feature.contains(r#"inkscape:label="1_left""#));
    assert!(feature.contains(r#"xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape""#));
    assert!(feature.contains("stroke:#000000"));
    assert!(!feature.contains("sodipodi"));
    roxmltree::Document::parse(&feature).expect("Feature fragment should be well-formed");

    let asset = fs::read_to_string(out.join("eyes/1_back.svg")).expect("Should read");
    assert!(asset.contains(r#"style="display:inline""#));
    assert!(asset.contains("xmlns:sodipodi"));
    roxmltree::Document::parse(&asset).expect("Asset fragment should be well-formed");

    let nose = fs::read_to_string(out.join("nose/button.svg")).expect("Should read");
    assert!(!nose.contains("display:none"));
}

#[test]
fn test_wrapped_fragments() {
    let temp = TempDir::new().expect("Should create temp dir");
    let source = write_source(temp.path());
    let out = temp.path().join("out");
    let options = ExtractOptions {
        wrap_fragments: true,
        viewport: 300,
        ..ExtractOptions::default()
    };
    PipelineBuilder::new()
        .with_assets(vec![AssetCategory::Nose])
        .with_options(options)
        .build()
        .process_file(&source, &out)
        .expect("Should process successfully");

    let nose = fs::read_to_string(out.join("nose/button.svg")).expect("Should read");
    assert!(nose.starts_with(r#"<svg viewBox="0 0 300 300""#));
    assert!(nose.contains("<!--palette-->"));
    let document = roxmltree::Document::parse(&nose).expect("Wrapped fragment should be well-formed");
    assert_eq!(document.root_element().children().filter(|n| n.is_element()).count(), 1);
}

#[test]
fn test_failure_leaves_previous_output() {
    let temp = TempDir::new().expect("Should create temp dir");
    let source = write_source(temp.path());
    let out = temp.path().join("out");
    let pipeline = full_pipeline(DescriptorFormat::Tagged);
    pipeline.process_file(&source, &out).expect("Should process successfully");
    let before = snapshot(&out);

    // The skull loses its nose after the features were already fine
    fs::write(&source, HEAD.replace(r#"inkscape:label="nose" "#, "")).expect("Should write");
    let err = pipeline.process_file(&source, &out).expect_err("Should fail");
    assert!(matches!(
        err,
        AssetError::Malformed(MalformedAsset::MissingComponent { ref component, .. }) if component == "nose"
    ));
    assert_eq!(before, snapshot(&out));
}

fn write_drawing(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let text = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg"
            xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">{}</svg>"#,
        body
    );
    fs::write(&path, text).expect("Should write source");
    path
}

#[test]
fn test_back_layers_are_emitted() {
    let temp = TempDir::new().expect("Should create temp dir");
    let source = write_drawing(
        temp.path(),
        "mouths.svg",
        r#"<g inkscape:groupmode="layer" inkscape:label="guide"><rect x="1" y="2" width="4" height="2"/></g>
           <g inkscape:groupmode="layer" inkscape:label="1"><path d="M 0 0 L 1 0"/></g>
           <g inkscape:groupmode="layer" inkscape:label="1_back"><path d="M 0 1 L 1 1"/></g>"#,
    );
    let out = temp.path().join("out");
    PipelineBuilder::build_features()
        .process_file(&source, &out)
        .expect("Should process successfully");

    let files: Vec<_> = snapshot(&out).into_keys().collect();
    let expected: Vec<PathBuf> = ["mouths/1.json", "mouths/1.svg", "mouths/1_back.json", "mouths/1_back.svg"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(files, expected);
    assert_eq!(
        read_json(&out.join("mouths/1_back.json")),
        read_json(&out.join("mouths/1.json"))
    );
}

#[test]
fn test_template_names_cannot_leave_the_destination() {
    let temp = TempDir::new().expect("Should create temp dir");
    let source = write_drawing(
        temp.path(),
        "skulls.svg",
        r#"<g inkscape:groupmode="layer" inkscape:label="skull_../../escaped">
             <circle inkscape:label="eyeball_left" r="1"/>
             <circle inkscape:label="eyeball_right" r="1"/>
             <rect inkscape:label="ear_left" width="1" height="1"/>
             <rect inkscape:label="ear_right" width="1" height="1"/>
             <rect inkscape:label="mouth" width="1" height="1"/>
             <rect inkscape:label="nose" width="1" height="1"/>
             <rect inkscape:label="hair" width="1" height="1"/>
             <path inkscape:label="skull" d="M 0 0 L 1 0 L 1 1 Z"/>
           </g>"#,
    );
    let out = temp.path().join("a").join("b");
    let err = PipelineBuilder::build_skulls()
        .process_file(&source, &out)
        .expect_err("Should reject the template name");
    assert!(matches!(
        err,
        AssetError::Malformed(MalformedAsset::InvalidIdentifier { ref label, .. }) if label == "skull_../../escaped"
    ));
    assert!(!temp.path().join("a").join("escaped").exists());
    assert!(!out.exists());
}
