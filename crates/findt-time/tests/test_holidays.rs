//! Integration tests for holiday-aware queries: business days, holiday
//! tables and monthly business-day buckets.

use std::io::Write;

use findt_core::Error;
use findt_time::{Date, DaySelection, HolidayFormat, HolidaySource, Period};
use tempfile::NamedTempFile;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// 2013 Brazilian bank holidays, as exported from the ANBIMA spreadsheet.
const FERIADOS_2013: &str = "\
01/01/2013;terça-feira;Confraternização Universal
11/02/2013;segunda-feira;Carnaval
12/02/2013;terça-feira;Carnaval
29/03/2013;sexta-feira;Paixão de Cristo
21/04/2013;domingo;Tiradentes
01/05/2013;quarta-feira;Dia do Trabalho
30/05/2013;quinta-feira;Corpus Christi
07/09/2013;sábado;Independência do Brasil
12/10/2013;sábado;Nossa Sr.a Aparecida - Padroeira do Brasil
02/11/2013;sábado;Finados
15/11/2013;sexta-feira;Proclamação da República
25/12/2013;quarta-feira;Natal
";

/// Write `text` encoded as Windows-1252, the way the spreadsheet export does.
fn holiday_file(text: &str) -> NamedTempFile {
    let (bytes, _, unmappable) = encoding_rs::WINDOWS_1252.encode(text);
    assert!(!unmappable);
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();
    file
}

fn period(start: &str, end: &str, file: &NamedTempFile) -> Period {
    Period::builder()
        .with_start(start)
        .with_end(end)
        .with_holidays(file.path())
        .build()
        .unwrap()
}

#[test]
fn business_days_drop_weekday_holidays() {
    let file = holiday_file(FERIADOS_2013);
    let p = period("01/01/2013", "28/02/2013", &file);
    let weekdays = p.days(DaySelection::Weekdays).unwrap();
    let business = p.days(DaySelection::Business).unwrap();
    assert_eq!(weekdays.len(), 43);
    assert_eq!(business.len(), 40);
    for holiday in [date(2013, 1, 1), date(2013, 2, 11), date(2013, 2, 12)] {
        assert!(weekdays.contains(&holiday));
        assert!(!business.contains(&holiday));
    }
}

#[test]
fn holidays_are_restricted_and_ordered() {
    let file = holiday_file(FERIADOS_2013);
    let p = period("01/03/2013", "30/06/2013", &file);
    let text = p.holidays_text().unwrap();
    let dates: Vec<&str> = text.iter().map(|(d, _)| d.as_str()).collect();
    assert_eq!(dates, vec!["29/03/2013", "21/04/2013", "01/05/2013", "30/05/2013"]);
}

#[test]
fn descriptions_keep_accents() {
    let file = holiday_file(FERIADOS_2013);
    let p = period("01/11/2013", "30/11/2013", &file);
    let load = p.holidays().unwrap();
    assert_eq!(
        load.table.get(date(2013, 11, 15)),
        Some("Proclamação da República")
    );
    assert_eq!(load.table.get(date(2013, 11, 2)), Some("Finados"));
}

#[test]
fn monthly_buckets_for_a_full_year() {
    let file = holiday_file(FERIADOS_2013);
    let p = period("01/01/2013", "31/12/2013", &file);
    let by_month = p.business_days_by_month().unwrap();
    let expected = [
        ("01/2013", 22),
        ("02/2013", 18),
        ("03/2013", 20),
        ("04/2013", 22),
        ("05/2013", 21),
        ("06/2013", 20),
        ("07/2013", 23),
        ("08/2013", 22),
        ("09/2013", 21),
        ("10/2013", 23),
        ("11/2013", 20),
        ("12/2013", 21),
    ];
    let got: Vec<(&str, usize)> = by_month.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(got, expected);
    let total: usize = by_month.values().sum();
    assert_eq!(total, p.count(DaySelection::Business).unwrap());
}

#[test]
fn buckets_clamp_to_start_and_close_at_end() {
    let file = holiday_file(FERIADOS_2013);
    // Starts mid-January, ends mid-February (before Carnaval).
    let p = period("15/01/2013", "08/02/2013", &file);
    let by_month = p.business_days_by_month().unwrap();
    assert_eq!(by_month.len(), 2);
    assert_eq!(by_month["01/2013"], 13);
    assert_eq!(by_month["02/2013"], 6);
    let total: usize = by_month.values().sum();
    assert_eq!(total, p.count(DaySelection::Business).unwrap());
}

#[test]
fn single_day_period_bucket() {
    let file = holiday_file(FERIADOS_2013);
    let holiday = period("15/11/2013", "15/11/2013", &file);
    assert_eq!(holiday.business_days_by_month().unwrap()["11/2013"], 0);
    let ordinary = period("14/11/2013", "14/11/2013", &file);
    assert_eq!(ordinary.business_days_by_month().unwrap()["11/2013"], 1);
}

#[test]
fn cross_year_buckets_partition_business_days() {
    let file = holiday_file(FERIADOS_2013);
    let p = Period::builder()
        .with_start("10/01/2013")
        .with_count(-30)
        .with_holidays(file.path())
        .build()
        .unwrap();
    assert_eq!(p.start(), date(2012, 12, 12));
    let by_month = p.business_days_by_month().unwrap();
    // Keys sort as text, so January precedes December.
    let keys: Vec<&String> = by_month.keys().collect();
    assert_eq!(keys, vec!["01/2013", "12/2012"]);
    assert_eq!(by_month["12/2012"], 14);
    assert_eq!(by_month["01/2013"], 7);
    let total: usize = by_month.values().sum();
    assert_eq!(total, p.count(DaySelection::Business).unwrap());
}

#[test]
fn missing_file_is_observable_but_not_fatal() {
    let p = Period::builder()
        .with_start("01/01/2013")
        .with_end("31/01/2013")
        .with_holidays("/nowhere/feriados.csv")
        .build()
        .unwrap();
    let selected = p.select(DaySelection::Business).unwrap();
    assert!(matches!(selected.warning, Some(Error::Resource { .. })));
    assert_eq!(selected.dates.len(), 23);
    let monthly = p.monthly_business_days().unwrap();
    assert!(matches!(monthly.warning, Some(Error::Resource { .. })));
    assert_eq!(monthly.counts["01/2013"], 23);
}

#[test]
fn readable_file_leaves_monthly_counts_clean() {
    let file = holiday_file(FERIADOS_2013);
    let p = period("01/01/2013", "28/02/2013", &file);
    let monthly = p.monthly_business_days().unwrap();
    assert_eq!(monthly.warning, None);
    assert_eq!(monthly.counts, p.business_days_by_month().unwrap());
}

#[test]
fn malformed_row_fails_every_holiday_query() {
    let file = holiday_file("01/01/2013;terça-feira;Confraternização\n1/5/2013;x;Trabalho\n");
    let p = period("01/01/2013", "31/01/2013", &file);
    assert!(matches!(
        p.days(DaySelection::Business),
        Err(Error::MalformedRow { row: 2, .. })
    ));
    assert!(p.business_days_by_month().is_err());
    // Calendar and weekday selections never read the file.
    assert_eq!(p.count(DaySelection::Weekdays).unwrap(), 23);
}

#[test]
fn subperiod_keeps_holiday_source() {
    let file = holiday_file(FERIADOS_2013);
    let p = period("01/01/2013", "31/03/2013", &file);
    let sub = p
        .subperiod(Some("01/02/2013".into()), Some("28/02/2013".into()))
        .unwrap();
    assert_eq!(sub.count(DaySelection::Business).unwrap(), 18);
}

#[test]
fn custom_layout() {
    let file = holiday_file("Feriado,Data\nNatal,25-12-2013\n");
    let format = HolidayFormat::default()
        .with_delimiter(b',')
        .with_header(true)
        .with_date_column(1)
        .with_description_column(0);
    let p = Period::builder()
        .with_start("01/12/2013")
        .with_end("31/12/2013")
        .with_holidays(HolidaySource::new(file.path()).with_format(format))
        .build()
        .unwrap();
    let holidays = p.holidays_text().unwrap();
    assert_eq!(holidays, vec![("25/12/2013".to_string(), "Natal".to_string())]);
    assert_eq!(p.count(DaySelection::Business).unwrap(), 21);
}
