use std::fs;
use std::path::Path;
use tempfile::tempdir;
use world_dash::charts::{build_bar_chart, build_bubble_chart, build_world_map};
use world_dash::geo::{Boundary, Geometry};
use world_dash::stats::top_n_populous;
use world_dash::viz::{self, RenderOptions};
use world_dash::{Boundaries, ChartSpec, Continent, Dataset};

fn assert_non_empty(path: &Path) {
    let meta = fs::metadata(path).expect("file created");
    assert!(meta.len() > 0, "{} has content", path.display());
}

fn boundaries() -> Boundaries {
    let mut b = Boundaries::default();
    for (code, x, y) in [("DEU", 6.0, 47.0), ("FRA", -4.0, 43.0), ("CHN", 75.0, 20.0)] {
        b.insert(
            code,
            Boundary {
                name: None,
                geometry: Geometry::Polygon(vec![vec![
                    [x, y],
                    [x + 9.0, y],
                    [x + 9.0, y + 8.0],
                    [x, y + 8.0],
                    [x, y],
                ]]),
            },
        );
    }
    b
}

fn all_specs() -> Vec<(&'static str, ChartSpec)> {
    let data = Dataset::bundled().unwrap();
    let top = top_n_populous(data.records(), Continent::Asia, 2007, 5);
    vec![
        ("map", build_world_map(data.records(), &boundaries(), 20.0, 0.0).into()),
        ("bar", build_bar_chart(&top).into()),
        ("bubble", build_bubble_chart(data.records(), Continent::Europe, 2007).into()),
    ]
}

#[test]
fn every_kind_renders_to_svg() {
    let dir = tempdir().unwrap();
    for (name, spec) in all_specs() {
        let path = dir.path().join(format!("{name}.svg"));
        viz::render_chart(&spec, &path, &RenderOptions::for_spec(&spec)).unwrap();
        assert_non_empty(&path);
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }
}

#[test]
fn bar_svg_shows_locale_formatted_values() {
    let dir = tempdir().unwrap();
    let data = Dataset::bundled().unwrap();
    let top = top_n_populous(data.records(), Continent::Europe, 2007, 3);
    let spec: ChartSpec = build_bar_chart(&top).into();

    let path = dir.path().join("bar_de.svg");
    viz::render_chart(&spec, &path, &RenderOptions::default().with_locale("de")).unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("82.400.996"));
    assert!(svg.contains("Germany"));
}

#[test]
fn empty_specs_still_render() {
    let dir = tempdir().unwrap();
    let data = Dataset::bundled().unwrap();
    let specs: Vec<(&str, ChartSpec)> = vec![
        ("map", build_world_map(data.records(), &Boundaries::default(), 0.0, 0.0).into()),
        ("bar", build_bar_chart(&[]).into()),
        ("bubble", build_bubble_chart(data.records(), Continent::Oceania, 1990).into()),
    ];
    for (name, spec) in specs {
        let path = dir.path().join(format!("empty_{name}.svg"));
        viz::render_chart(&spec, &path, &RenderOptions::default()).unwrap();
        assert_non_empty(&path);
    }
}

#[test]
fn non_svg_extension_renders_png() {
    let dir = tempdir().unwrap();
    let data = Dataset::bundled().unwrap();
    let spec: ChartSpec = build_bubble_chart(data.records(), Continent::Americas, 2007).into();
    let path = dir.path().join("bubble.png");
    let opts = RenderOptions {
        width: 640,
        height: 400,
        ..RenderOptions::default()
    };
    viz::render_chart(&spec, &path, &opts).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}
