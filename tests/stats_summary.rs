use world_dash::stats::global_summary;
use world_dash::{Continent, Dataset, Record};

#[test]
fn population_is_the_sum_over_the_year() {
    let data = Dataset::bundled().unwrap();
    let manual: u64 = data
        .records()
        .iter()
        .filter(|r| r.year == 2007)
        .map(|r| r.population)
        .sum();
    let s = global_summary(data.records(), 2007);
    assert_eq!(s.year, 2007);
    assert_eq!(s.population, manual);
    assert_eq!(s.continents, 5);
}

#[test]
fn country_count_does_not_depend_on_year() {
    let data = Dataset::bundled().unwrap();
    let counts: Vec<usize> = [1952, 2007, 1800, 2050]
        .into_iter()
        .map(|y| global_summary(data.records(), y).countries)
        .collect();
    assert!(counts.iter().all(|&c| c == 142), "{counts:?}");
}

#[test]
fn absent_year_sums_to_zero() {
    let rows = vec![Record {
        country: "Solo".into(),
        continent: Continent::Americas,
        year: 2007,
        life_expectancy: 75.0,
        population: 42,
        gdp_per_capita: 9_000.0,
        country_code: "SOL".into(),
        iso_num: 1,
    }];
    let s = global_summary(&rows, 1990);
    assert_eq!(s.population, 0);
    assert_eq!(s.countries, 1);
    assert_eq!(s.continents, 1);

    let empty = global_summary(&[], 2007);
    assert_eq!((empty.population, empty.countries, empty.continents), (0, 0, 0));
}
