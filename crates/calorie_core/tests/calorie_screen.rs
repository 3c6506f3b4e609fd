use calorie_core::db::open_db_in_memory;
use calorie_core::{
    CalorieScreen, CalorieService, EntriesChanged, EntryChange, SqliteCalorieRepository,
};
use chrono::Utc;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn added_entry_reaches_list_and_chart() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();
    let mut service = CalorieService::new(repo);

    let screen = Rc::new(RefCell::new(CalorieScreen::with_time_zone(
        &service.entries(),
        Utc,
    )));
    let sink = Rc::clone(&screen);
    service.subscribe(move |event: &EntriesChanged| sink.borrow_mut().apply(event));

    service.create_entry("500").unwrap();

    let screen = screen.borrow();
    assert_eq!(screen.rows().len(), 1);
    assert_eq!(screen.rows()[0].title, "Calorie: 500");
    assert!(screen.rows()[0].detail.is_some());
    assert_eq!(screen.chart().values, vec![500.0]);
}

#[test]
fn chart_values_follow_row_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();
    let mut service = CalorieService::new(repo);

    let screen = Rc::new(RefCell::new(CalorieScreen::with_time_zone(&[], Utc)));
    let sink = Rc::clone(&screen);
    service.subscribe(move |event: &EntriesChanged| sink.borrow_mut().apply(event));

    for (amount, ts) in [(300, 30_000), (100, 10_000), (200, 20_000), (0, 20_000)] {
        service.record_amount_at(amount, ts).unwrap();
    }

    let screen = screen.borrow();
    let row_amounts: Vec<f64> = screen.rows().iter().map(|row| f64::from(row.amount)).collect();
    assert_eq!(row_amounts, vec![100.0, 200.0, 0.0, 300.0]);
    assert_eq!(screen.chart().values, row_amounts);
}

#[test]
fn observers_get_one_event_per_mutation_until_unsubscribed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();
    let mut service = CalorieService::new(repo);

    let events = Rc::new(RefCell::new(Vec::<EntriesChanged>::new()));
    let sink = Rc::clone(&events);
    let id = service.subscribe(move |event: &EntriesChanged| sink.borrow_mut().push(event.clone()));

    service.create_entry("abc").unwrap();
    service.create_entry("250").unwrap();
    assert!(service.unsubscribe(id));
    service.create_entry("1").unwrap();

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].changes, vec![EntryChange::Inserted { index: 0 }]);
    assert_eq!(events[0].entries[0].amount, 0);
    assert_eq!(events[1].entries.len(), 2);
    assert_eq!(service.count().unwrap(), 3);
}

#[test]
fn reset_empties_store_and_screen() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();
    let mut service = CalorieService::new(repo);

    service.record_amount(10).unwrap();
    service.record_amount(20).unwrap();

    let screen = Rc::new(RefCell::new(CalorieScreen::with_time_zone(
        &service.entries(),
        Utc,
    )));
    let events = Rc::new(RefCell::new(Vec::<EntryChange>::new()));
    let (screen_sink, event_sink) = (Rc::clone(&screen), Rc::clone(&events));
    service.subscribe(move |event: &EntriesChanged| {
        screen_sink.borrow_mut().apply(event);
        event_sink.borrow_mut().extend(event.changes.iter().copied());
    });

    assert_eq!(service.reset().unwrap(), 2);
    assert!(service.entries().is_empty());
    assert!(screen.borrow().is_empty());
    assert!(screen.borrow().chart().is_empty());
    assert_eq!(*events.borrow(), vec![EntryChange::Reset { removed: 2 }]);
}

#[test]
fn chart_series_serializes_for_ui_shells() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();
    let mut service = CalorieService::new(repo);
    service.record_amount_at(500, 1_000).unwrap();

    let screen = CalorieScreen::with_time_zone(&service.entries(), Utc);
    let json = serde_json::to_value(screen.chart()).unwrap();

    assert_eq!(json["values"], serde_json::json!([500.0]));
    assert_eq!(json["colors"]["zero_level"], serde_json::json!(-1.0));
    assert_eq!(json["colors"]["above"], serde_json::json!([76, 217, 100]));
}

#[test]
fn chart_matches_list_at_amount_limits() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();
    let mut service = CalorieService::new(repo);

    for text in ["2147483647", "-2147483648", "9007199254740993", "2147483648"] {
        service.create_entry(text).unwrap();
    }

    let screen = CalorieScreen::with_time_zone(&service.entries(), Utc);
    let amounts: Vec<i32> = screen.rows().iter().map(|row| row.amount).collect();
    assert_eq!(amounts, vec![i32::MAX, i32::MIN, 0, 0]);
    assert_eq!(screen.rows()[0].title, "Calorie: 2147483647");

    assert_eq!(screen.chart().len(), screen.rows().len());
    for (value, row) in screen.chart().values.iter().zip(screen.rows()) {
        assert_eq!(*value as i64, i64::from(row.amount));
    }
}
