use world_dash::charts::{
    BUBBLE_SIZE_MAX, BUBBLE_X_RANGE, MAP_HEIGHT, MAP_WIDTH, MAP_ZOOM, build_bar_chart,
    build_bar_chart_with_scale, build_bubble_chart, build_world_map,
};
use world_dash::geo::{Boundary, Geometry};
use world_dash::palette::{SET1, set1};
use world_dash::stats::top_n_populous;
use world_dash::{Boundaries, ChartSpec, ColorScale, Continent, Dataset, Record};

fn rec(country: &str, code: &str, continent: Continent, year: i32, population: u64) -> Record {
    Record {
        country: country.into(),
        continent,
        year,
        life_expectancy: 65.0,
        population,
        gdp_per_capita: 3_000.0,
        country_code: code.into(),
        iso_num: 0,
    }
}

fn square(x: f64, y: f64) -> Boundary {
    Boundary {
        name: None,
        geometry: Geometry::Polygon(vec![vec![
            [x, y],
            [x + 1.0, y],
            [x + 1.0, y + 1.0],
            [x, y + 1.0],
            [x, y],
        ]]),
    }
}

#[test]
fn join_miss_is_left_out_without_error() {
    let mut boundaries = Boundaries::default();
    boundaries.insert("AAA", square(0.0, 0.0));
    boundaries.insert("BBB", square(5.0, 5.0));
    let rows = vec![
        rec("Aland", "AAA", Continent::Europe, 2007, 10),
        rec("Nowhere", "XXX", Continent::Europe, 2007, 99),
        rec("Bland", "BBB", Continent::Asia, 2007, 30),
    ];

    let spec = build_world_map(&rows, &boundaries, 20.0, 0.0);
    assert_eq!(spec.unmatched, 1);
    assert!(spec.features.iter().all(|f| f.country_code != "XXX"));
    assert!(!spec.regions.contains_key("XXX"));
    let codes: Vec<&str> = spec.features.iter().map(|f| f.country_code.as_str()).collect();
    assert_eq!(codes, ["AAA", "BBB"]);
    assert_eq!(spec.color_domain, (10.0, 30.0));
}

#[test]
fn map_carries_fixed_encodings() {
    let mut boundaries = Boundaries::default();
    boundaries.insert("AAA", square(0.0, 0.0));
    let rows = vec![rec("Aland", "AAA", Continent::Europe, 2007, 10)];
    let spec = build_world_map(&rows, &boundaries, 45.5, -12.0);
    assert_eq!(spec.title, "World map");
    assert_eq!(spec.legend_title, "Population");
    assert_eq!(spec.color_scale, ColorScale::Sunsetdark);
    assert_eq!((spec.center.lat, spec.center.lon), (45.5, -12.0));
    assert_eq!(spec.zoom, MAP_ZOOM);
    assert_eq!(spec.opacity, 1.0);
    assert_eq!((spec.width, spec.height), (MAP_WIDTH, MAP_HEIGHT));
}

#[test]
fn map_with_no_boundaries_is_empty() {
    let data = Dataset::bundled().unwrap();
    let spec = build_world_map(data.records(), &Boundaries::default(), 20.0, 0.0);
    assert!(spec.features.is_empty());
    assert!(spec.regions.is_empty());
    assert_eq!(spec.unmatched, data.len());
}

#[test]
fn bar_chart_follows_top_n_order() {
    let data = Dataset::bundled().unwrap();
    let top = top_n_populous(data.records(), Continent::Europe, 2007, 5);
    let spec = build_bar_chart(&top);
    assert_eq!(spec.title, "Top 5 most populous countries in 2007");
    assert_eq!((spec.x_title.as_str(), spec.y_title.as_str()), ("Countries", "Population"));
    assert!(spec.show_values);
    let names: Vec<&str> = spec.bars.iter().map(|b| b.country.as_str()).collect();
    assert_eq!(names, ["Germany", "Turkey", "France", "United Kingdom", "Italy"]);
    // Largest bar takes the top of the scale.
    assert_eq!(spec.bars[0].color, ColorScale::Sunsetdark.at(1.0));
    assert_eq!(spec.bars[4].color, ColorScale::Sunsetdark.at(0.0));
}

#[test]
fn bar_chart_scale_is_selectable_and_empty_input_is_fine() {
    let rows = vec![rec("Aland", "AAA", Continent::Europe, 1952, 10)];
    let spec = build_bar_chart_with_scale(&rows, ColorScale::Viridis);
    assert_eq!(spec.color_scale, ColorScale::Viridis);
    assert_eq!(spec.title, "Top 1 most populous countries in 1952");

    let empty = build_bar_chart(&[]);
    assert!(empty.bars.is_empty());
    assert_eq!(empty.title, "Most populous countries");
}

#[test]
fn bubbles_are_area_sized_and_colored_in_order() {
    let rows = vec![
        rec("Big", "BIG", Continent::Africa, 2007, 400),
        rec("Quarter", "QRT", Continent::Africa, 2007, 100),
        rec("Elsewhere", "ELS", Continent::Asia, 2007, 10_000),
        rec("Big", "BIG", Continent::Africa, 1952, 50),
    ];
    let spec = build_bubble_chart(&rows, Continent::Africa, 2007);
    assert_eq!(spec.x_range, BUBBLE_X_RANGE);
    assert!(spec.log_y);
    assert_eq!(spec.legend_title, "Countries");
    assert_eq!(spec.bubbles.len(), 2);
    assert_eq!(spec.bubbles[0].diameter, BUBBLE_SIZE_MAX);
    assert!((spec.bubbles[1].diameter - BUBBLE_SIZE_MAX / 2.0).abs() < 1e-9);
    assert_eq!(spec.bubbles[0].color, set1(0));
    assert_eq!(spec.bubbles[1].color, set1(1));
}

#[test]
fn bubble_colors_cycle_through_set1() {
    let data = Dataset::bundled().unwrap();
    let spec = build_bubble_chart(data.records(), Continent::Africa, 2007);
    assert_eq!(spec.bubbles.len(), 52);
    assert_eq!(spec.bubbles[SET1.len()].color, SET1[0]);
    assert!(spec.bubbles.iter().all(|b| b.diameter > 0.0 && b.diameter <= BUBBLE_SIZE_MAX));

    let none = build_bubble_chart(data.records(), Continent::Africa, 1990);
    assert!(none.bubbles.is_empty());
}

#[test]
fn specs_serialize_with_a_kind_tag() {
    let rows = vec![rec("Aland", "AAA", Continent::Europe, 2007, 10)];
    let spec: ChartSpec = build_bar_chart(&rows).into();
    let v = serde_json::to_value(&spec).unwrap();
    assert_eq!(v["kind"], "bar");
    assert_eq!(v["bars"][0]["country"], "Aland");

    let back: ChartSpec = serde_json::from_value(v).unwrap();
    assert_eq!(back, spec);
}
