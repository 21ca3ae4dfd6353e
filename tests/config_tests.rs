//! Config tests: load render settings from TOML files.

use drillsheet::renderer::LayoutOptions;
use drillsheet::{Color, DrillError, Field, RenderConfig};
use pretty_assertions::assert_eq;

fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("drill.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
fn load_preset_and_style_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r##"
[field]
preset = "nfl"

[style]
arrow_width = 6.0
rank_color = "#202080"
rank_label_background = "none"

[layout]
columns = 4
"##,
    );

    let (field, style, layout) = RenderConfig::load(&path).unwrap().into_parts().unwrap();
    assert_eq!(field, Field::nfl());
    assert_eq!(style.arrow_width, 6.0);
    assert_eq!(style.rank_color, Color::rgb(0x20, 0x20, 0x80));
    assert_eq!(style.rank_label_background, None);
    assert_eq!(style.rank_end_diameter, 5.0);
    assert_eq!(
        layout,
        LayoutOptions {
            columns: 4,
            ..LayoutOptions::default()
        }
    );
}

#[test]
fn explicit_field_dimensions() {
    let (field, _, _) = RenderConfig::from_toml_str(
        r#"
[field]
length = 240.0
height = 120.0
endzone_width = 15.0
sideline_width = 10.0
increment = 7.5
major_increment_frequency = 4
minor_increment_frequency = 2
hashes = [40.0, 80.0]
"#,
    )
    .unwrap()
    .into_parts()
    .unwrap();

    assert_eq!(field.total_length(), 270.0);
    assert_eq!(field.total_height(), 140.0);
    assert_eq!(field.hashes, vec![40.0, 80.0]);
}

#[test]
fn invalid_values_are_rejected() {
    let err = RenderConfig::from_toml_str("[field]\npreset = \"college\"\nlength = -1.0\n")
        .unwrap()
        .into_parts()
        .unwrap_err();
    assert!(matches!(err, DrillError::Configuration(_)));

    let err = RenderConfig::from_toml_str("[field]\npreset = \"college\"\n[style]\ngrid_width = 0.0\n")
        .unwrap()
        .into_parts()
        .unwrap_err();
    assert!(matches!(err, DrillError::Configuration(_)));

    let err = RenderConfig::from_toml_str("[field]\npreset = \"college\"\n[layout]\ncolumns = 0\n")
        .unwrap()
        .into_parts()
        .unwrap_err();
    assert!(matches!(err, DrillError::Configuration(_)));
}

#[test]
fn unknown_keys_and_missing_files_are_errors() {
    let err = RenderConfig::from_toml_str("[style]\narrow_size = 3.0\n").unwrap_err();
    assert!(matches!(err, DrillError::ConfigParse(_)));

    let dir = tempfile::tempdir().unwrap();
    let err = RenderConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, DrillError::Io(_)));
}
