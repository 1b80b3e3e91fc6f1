use lazy_static::lazy_static;
use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};

lazy_static! {
    pub static ref LOGINS_COUNTER: CounterVec = register_counter_vec!(
        "api_logins_total",
        "Login attempts by status",
        &["status"]
    )
    .unwrap();

    pub static ref BALLOTS_COUNTER: CounterVec = register_counter_vec!(
        "api_ballots_submitted_total",
        "Ballots submitted by type",
        &["type"]
    )
    .unwrap();

    pub static ref MENUS_LOCKED_COUNTER: Counter = register_counter!(
        "api_menus_locked_total",
        "Menus locked by an admin"
    )
    .unwrap();

    pub static ref GENERATIONS_COUNTER: CounterVec = register_counter_vec!(
        "api_menu_generations_total",
        "Menu generation runs by kind",
        &["kind"]
    )
    .unwrap();
}
