use lunchly_core::db::open_db_in_memory;
use lunchly_core::{
    Customer, CustomerRepository, CustomerService, NameFilter, Reservation,
    ReservationRepository, SqliteCustomerRepository, SqliteReservationRepository,
    BEST_CUSTOMERS_LIMIT,
};
use rusqlite::Connection;

fn service(
    conn: &Connection,
) -> CustomerService<SqliteCustomerRepository<'_>, SqliteReservationRepository<'_>> {
    CustomerService::new(
        SqliteCustomerRepository::new(conn),
        SqliteReservationRepository::new(conn),
    )
}

fn seed(conn: &Connection, names: &[(&str, &str)]) -> Vec<Customer> {
    let service = service(conn);
    names
        .iter()
        .map(|(first, last)| {
            let mut customer = Customer::new(*first, *last);
            service.save_customer(&mut customer).unwrap();
            customer
        })
        .collect()
}

fn full_names(customers: &[Customer]) -> Vec<String> {
    customers.iter().map(Customer::full_name).collect()
}

fn book(conn: &Connection, customer: &Customer, count: usize) {
    let repo = SqliteReservationRepository::new(conn);
    for slot in 0..count {
        let start_at = 1_700_000_000_000 + (slot as i64) * 3_600_000;
        repo.create_reservation(&Reservation::new(customer.id.unwrap(), start_at, 2))
            .unwrap();
    }
}

#[test]
fn two_terms_match_first_and_last_name_together() {
    let conn = open_db_in_memory().unwrap();
    seed(
        &conn,
        &[
            ("Ann", "Smith"),
            ("Joanna", "Goldsmith"),
            ("Ann", "Jones"),
            ("Bob", "Smith"),
            ("Smith", "Annan"),
        ],
    );

    let found = service(&conn).filter_by_name("ANN", Some("smith")).unwrap();
    assert_eq!(full_names(&found), vec!["Joanna Goldsmith", "Ann Smith"]);
}

#[test]
fn matching_folds_case_beyond_ascii() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("Élodie", "Öztürk"), ("Elodie", "Ozturk"), ("Ann", "Smith")]);
    let service = service(&conn);

    for (term1, term2) in [
        ("élodie", None),
        ("ÉLODIE", None),
        ("Élodie", None),
        ("élodie", Some("öztürk")),
        ("LODIE", Some("ÖZT")),
        ("", Some("ÜRK")),
    ] {
        let found = service.filter_by_name(term1, term2).unwrap();
        assert_eq!(
            full_names(&found),
            vec!["Élodie Öztürk"],
            "terms {term1:?} / {term2:?}"
        );
    }
}

#[test]
fn non_ascii_fold_does_not_conflate_accented_letters() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("Élodie", "Öztürk"), ("Elodie", "Ozturk")]);

    let found = service(&conn).filter_by_name("elodie", None).unwrap();
    assert_eq!(full_names(&found), vec!["Elodie Ozturk"]);
}

#[test]
fn single_term_matches_either_name() {
    let conn = open_db_in_memory().unwrap();
    seed(
        &conn,
        &[
            ("Ann", "Smith"),
            ("Bob", "Hannigan"),
            ("Carl", "Jones"),
            ("Joanne", "Baker"),
        ],
    );

    let found = service(&conn).filter_by_name("aNn", None).unwrap();
    assert_eq!(
        full_names(&found),
        vec!["Joanne Baker", "Bob Hannigan", "Ann Smith"]
    );
}

#[test]
fn no_matches_is_an_empty_result_not_an_error() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("Ann", "Smith")]);

    let found = service(&conn).filter_by_name("zed", Some("smith")).unwrap();
    assert!(found.is_empty());
}

#[test]
fn blank_terms_return_every_customer() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("Ann", "Smith"), ("Bob", "Jones")]);

    let found = service(&conn).filter_by_name("  ", None).unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn like_metacharacters_in_terms_match_literally() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("Ann", "Smith"), ("Al_x", "Percent%Man")]);
    let repo = SqliteCustomerRepository::new(&conn);

    let underscore = repo
        .filter_by_name(&NameFilter::Either("_".to_string()))
        .unwrap();
    assert_eq!(full_names(&underscore), vec!["Al_x Percent%Man"]);

    let percent = repo
        .filter_by_name(&NameFilter::Either("%".to_string()))
        .unwrap();
    assert_eq!(full_names(&percent), vec!["Al_x Percent%Man"]);
}

#[test]
fn best_customers_are_ranked_by_reservation_count() {
    let conn = open_db_in_memory().unwrap();
    let customers = seed(
        &conn,
        &[("Ann", "Smith"), ("Bob", "Jones"), ("Carl", "Baker")],
    );
    book(&conn, &customers[0], 1);
    book(&conn, &customers[1], 3);
    book(&conn, &customers[2], 2);

    let best = service(&conn).best_customers().unwrap();
    let ranked: Vec<(String, i64)> = best
        .iter()
        .map(|ranking| (ranking.customer.full_name(), ranking.reservation_count))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("Bob Jones".to_string(), 3),
            ("Carl Baker".to_string(), 2),
            ("Ann Smith".to_string(), 1),
        ]
    );
}

#[test]
fn best_customers_excludes_customers_without_reservations() {
    let conn = open_db_in_memory().unwrap();
    let customers = seed(&conn, &[("Ann", "Smith"), ("Bob", "Jones")]);
    book(&conn, &customers[1], 1);

    let best = service(&conn).best_customers().unwrap();
    assert_eq!(best.len(), 1);
    assert_eq!(best[0].customer, customers[1]);
}

#[test]
fn best_customers_caps_at_limit_and_breaks_ties_by_name() {
    let conn = open_db_in_memory().unwrap();
    let names: Vec<(String, String)> = (0..12)
        .map(|index| (format!("Guest{index:02}"), "Regular".to_string()))
        .collect();
    let name_refs: Vec<(&str, &str)> = names
        .iter()
        .map(|(first, last)| (first.as_str(), last.as_str()))
        .collect();
    let customers = seed(&conn, &name_refs);
    for customer in &customers {
        book(&conn, customer, 1);
    }
    book(&conn, &customers[11], 1);

    let best = service(&conn).best_customers().unwrap();
    assert_eq!(best.len(), BEST_CUSTOMERS_LIMIT as usize);
    assert_eq!(best[0].customer.first_name, "Guest11");
    assert_eq!(best[0].reservation_count, 2);
    assert_eq!(best[1].customer.first_name, "Guest00");
    assert!(best
        .windows(2)
        .all(|pair| pair[0].reservation_count >= pair[1].reservation_count));
}

#[test]
fn best_customers_on_empty_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    assert!(service(&conn).best_customers().unwrap().is_empty());
}
