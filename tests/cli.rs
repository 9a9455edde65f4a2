use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn write(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// January 2024: salary 100000, food 40000, transport 20000, plus one
/// February expense and a food budget of 45000 for January
fn january_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");

    write(
        &data.join("categories.json"),
        &json!([
            {"id": "salary", "name": "Salary", "type": "income", "isDefault": true},
            {"id": "food", "name": "Food", "type": "expense", "icon": "restaurant"},
            {"id": "transport", "name": "Transport", "type": "expense"}
        ]),
    );
    write(
        &data.join("transactions.json"),
        &json!([
            {"id": "t1", "userId": "u1", "type": "income", "amount": 100000,
             "date": {"seconds": 1704412800, "nanoseconds": 0}, "categoryId": "salary",
             "description": "January pay"},
            {"id": "t2", "userId": "u1", "type": "expense", "amount": "40000",
             "date": "2024-01-10T12:00:00Z", "categoryId": "food", "description": "Groceries"},
            {"id": "t3", "userId": "u1", "type": "expense", "amount": 20000,
             "date": 1705708800000_i64, "categoryId": "transport"},
            {"id": "t4", "userId": "u1", "type": "expense", "amount": 500,
             "date": "2024-02-02", "categoryId": "food"}
        ]),
    );
    write(
        &data.join("budgets.json"),
        &json!([
            {"id": "b1", "categoryId": "food", "amount": 45000, "period": "monthly",
             "startDate": "2024-01-01T00:00:00Z", "endDate": "2024-01-31T23:59:59Z",
             "isActive": true}
        ]),
    );

    dir
}

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env_remove("FINTRACK_DATA_DIR")
        .env_remove("FINTRACK_LOG")
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn stats_for_january() {
    let dir = january_fixture();

    fintrack(&dir)
        .args(["stats", "--month", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance:  $40,000.00"))
        .stdout(predicate::str::contains("66.7%"));
}

#[test]
fn stats_json_with_date_range() {
    let dir = january_fixture();

    let stats = stdout_json(fintrack(&dir).args([
        "stats", "--start", "2024-01-01", "--end", "2024-01-31", "--json",
    ]));

    assert_eq!(stats["total_income"], 100000.0);
    assert_eq!(stats["total_expense"], 60000.0);
    assert_eq!(stats["balance"], 40000.0);
    assert_eq!(stats["expenses_by_category"]["food"], 40000.0);
}

#[test]
fn stats_filtered_by_category_name() {
    let dir = january_fixture();

    let stats = stdout_json(fintrack(&dir).args(["stats", "--category", "Food", "--json"]));

    assert_eq!(stats["total_expense"], 40500.0);
    assert_eq!(stats["transaction_count"], 2);
}

#[test]
fn unknown_category_fails() {
    let dir = january_fixture();

    fintrack(&dir)
        .args(["stats", "--category", "rent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found: rent"));
}

#[test]
fn invalid_month_fails() {
    let dir = january_fixture();

    fintrack(&dir)
        .args(["stats", "--month", "2024-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn monthly_totals_in_order() {
    let dir = january_fixture();

    let months = stdout_json(fintrack(&dir).args(["monthly", "--json"]));
    let months = months.as_array().unwrap();

    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["month"], 1);
    assert_eq!(months[0]["balance"], 40000.0);
    assert_eq!(months[1]["month"], 2);
    assert_eq!(months[1]["total_expense"], 500.0);
}

#[test]
fn trend_points_and_range() {
    let dir = january_fixture();

    let trend = stdout_json(fintrack(&dir).args([
        "trend", "--month", "2024-01", "--series", "expense", "--json",
    ]));

    let points = trend["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[2]["cumulative_balance"], 40000.0);
    assert_eq!(trend["minValue"], 0.0);
    assert_eq!(trend["maxValue"], 60000.0);
}

#[test]
fn alerts_warn_for_current_budget() {
    let dir = january_fixture();

    let alerts = stdout_json(fintrack(&dir).args(["alerts", "--at", "2024-01-15", "--json"]));
    let alerts = alerts.as_array().unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["type"], "warning");
    assert_eq!(alerts[0]["percentage"], 89);
    assert_eq!(alerts[0]["category_name"], "Food");

    fintrack(&dir)
        .args(["alerts", "--at", "2024-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget nearly exhausted for Food"));
}

#[test]
fn alerts_skip_expired_budgets() {
    let dir = january_fixture();

    fintrack(&dir)
        .args(["alerts", "--at", "2024-02-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All budgets are within limits."));
}

#[test]
fn alerts_include_budget_starting_later_that_day() {
    let dir = january_fixture();
    write(
        &dir.path().join("data").join("budgets.json"),
        &json!([
            {"id": "b2", "categoryId": "food", "amount": 40000, "period": "monthly",
             "startDate": "2024-01-15T18:00:00Z", "endDate": "2024-01-31T23:59:59Z"}
        ]),
    );

    let alerts = stdout_json(fintrack(&dir).args(["alerts", "--at", "2024-01-15", "--json"]));
    let alerts = alerts.as_array().unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["type"], "danger");
    assert_eq!(alerts[0]["percentage"], 100);
}

#[test]
fn mistyped_record_does_not_fail_the_load() {
    let dir = january_fixture();
    write(
        &dir.path().join("data").join("transactions.json"),
        &json!([
            {"id": "ok", "type": "expense", "amount": 10.25, "date": "2024-01-05", "categoryId": "food"},
            {"id": "bad", "type": "expense", "amount": 3, "date": "2024-01-05", "categoryId": 42},
            ["not", "a", "record"]
        ]),
    );

    let output = fintrack(&dir)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipped 2 malformed records"))
        .get_output()
        .stdout
        .clone();

    let stats: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(stats["total_expense"], 10.25);
}

#[test]
fn export_json_to_file() {
    let dir = january_fixture();
    let output = dir.path().join("january.json");

    fintrack(&dir)
        .args(["export", "--month", "2024-01", "--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported January 2024"));

    let dataset: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(dataset["summary"]["periodLabel"], "January 2024");
    assert_eq!(dataset["categoryBreakdown"][0]["categoryName"], "Food");
    assert_eq!(dataset["categoryBreakdown"][0]["formattedPercentage"], "66.7%");
    assert_eq!(dataset["categoryBreakdown"][1]["formattedPercentage"], "33.3%");
    assert_eq!(dataset["transactionDetails"][2]["description"], "(no description)");
}

#[test]
fn export_csv_to_default_location() {
    let dir = january_fixture();

    fintrack(&dir)
        .args(["export", "--month", "2024-01"])
        .assert()
        .success();

    let csv = fs::read_to_string(dir.path().join("exports").join("fintrack-2024-01.csv")).unwrap();
    assert!(csv.starts_with("Period,January 2024"));
    assert!(csv.contains("Groceries"));
}

#[test]
fn malformed_records_are_reported_not_fatal() {
    let dir = january_fixture();
    write(
        &dir.path().join("data").join("transactions.json"),
        &json!([
            {"id": "ok", "type": "expense", "amount": 10, "date": "2024-01-05", "categoryId": "food"},
            {"id": "bad", "type": "expense", "amount": "ten", "date": "2024-01-05", "categoryId": "food"}
        ]),
    );

    let output = fintrack(&dir)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipped 1 malformed record"))
        .get_output()
        .stdout
        .clone();

    let stats: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(stats["total_expense"], 10.0);
}

#[test]
fn empty_data_dir() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["monthly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alert thresholds: warning 80%, danger 100%"));

    assert!(dir.path().join("config.json").exists());
}
