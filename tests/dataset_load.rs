use std::fs;
use tempfile::tempdir;
use world_dash::{Continent, DashError, Dataset, Record};

const HEADER: &str = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n";

fn rec(country: &str, year: i32) -> Record {
    Record {
        country: country.into(),
        continent: Continent::Europe,
        year,
        life_expectancy: 75.0,
        population: 1_000,
        gdp_per_capita: 20_000.0,
        country_code: "ABC".into(),
        iso_num: 1,
    }
}

#[test]
fn csv_with_gapminder_header_loads_sorted() {
    let text = format!(
        "{HEADER}Norway,Europe,2007,80.196,4627926,49357.19017,NOR,578\n\
         Germany,Europe,2007,79.406,82400996,32170.37442,DEU,276\n\
         Germany,Europe,1952,67.5,69145952,7144.114393,DEU,276\n"
    );
    let ds = Dataset::from_csv_reader(text.as_bytes()).unwrap();
    let keys: Vec<(&str, i32)> = ds
        .records()
        .iter()
        .map(|r| (r.country.as_str(), r.year))
        .collect();
    assert_eq!(keys, [("Germany", 1952), ("Germany", 2007), ("Norway", 2007)]);
    assert_eq!(ds.filter(Continent::Europe, 2007).len(), 2);
    assert_eq!(ds.records()[1].population, 82_400_996);
}

#[test]
fn continent_names_parse_case_insensitively_in_csv() {
    let text = format!("{HEADER}Chad,africa,2007,50.651,10238807,1704.063724,TCD,148\n");
    let ds = Dataset::from_csv_reader(text.as_bytes()).unwrap();
    assert_eq!(ds.records()[0].continent, Continent::Africa);
}

#[test]
fn duplicate_country_year_is_rejected() {
    let err = Dataset::new(vec![rec("Dup", 2007), rec("Other", 2007), rec("Dup", 2007)]).unwrap_err();
    match err {
        DashError::DuplicateRecord { country, year } => {
            assert_eq!(country, "Dup");
            assert_eq!(year, 2007);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_positive_metrics_and_bad_codes_are_invalid() {
    let mut zero_gdp = rec("Zero", 2007);
    zero_gdp.gdp_per_capita = 0.0;
    assert!(matches!(
        Dataset::new(vec![zero_gdp]),
        Err(DashError::InvalidRecord { .. })
    ));

    let mut nan_life = rec("Nan", 2007);
    nan_life.life_expectancy = f64::NAN;
    assert!(matches!(
        Dataset::new(vec![nan_life]),
        Err(DashError::InvalidRecord { .. })
    ));

    let mut bad_code = rec("Code", 2007);
    bad_code.country_code = "D1".into();
    assert!(matches!(
        Dataset::new(vec![bad_code]),
        Err(DashError::InvalidRecord { .. })
    ));
}

#[test]
fn missing_file_is_a_missing_resource() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.csv");
    let err = Dataset::from_csv_path(&path).unwrap_err();
    match err {
        DashError::MissingResource { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unparsable_file_is_a_missing_resource() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(&path, format!("{HEADER}Chad,Africa,not-a-year,50,1,1,TCD,148\n")).unwrap();
    assert!(matches!(
        Dataset::from_csv_path(&path),
        Err(DashError::MissingResource { .. })
    ));
}

#[test]
fn clones_share_records() {
    let ds = Dataset::bundled().unwrap();
    let copy = ds.clone();
    assert!(std::ptr::eq(ds.records(), copy.records()));
}
