//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn trivia(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("TRIVIA_BASE_URL")
        .env_remove("TRIVIA_USERNAME")
        .env_remove("RUST_LOG");
    cmd
}

fn payload() -> serde_json::Value {
    serde_json::json!({
        "response_code": 0,
        "results": [
            {
                "category": "Geography",
                "question": "Capital%20of%20Italy%3F",
                "correct_answer": "Rome",
                "incorrect_answers": ["Milan", "Turin", "Naples"]
            },
            {
                "category": "Science",
                "question": "Chemical%20symbol%20for%20gold%3F",
                "correct_answer": "Au",
                "incorrect_answers": ["Ag", "Gd", "Go"]
            },
            {
                "category": "Music",
                "question": "How%20many%20strings%20on%20a%20violin%3F",
                "correct_answer": "4",
                "incorrect_answers": ["5", "6", "3"]
            }
        ]
    })
}

#[test]
fn help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    trivia(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn init_creates_config_once() {
    let home = tempfile::tempdir().unwrap();
    trivia(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created trivia.toml"));
    assert!(home.path().join("trivia.toml").exists());

    trivia(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn play_with_missing_config_fails() {
    let home = tempfile::tempdir().unwrap();
    trivia(&home)
        .args(["play", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn play_rejects_zero_questions() {
    let home = tempfile::tempdir().unwrap();
    trivia(&home)
        .args(["play", "--questions", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_questions"));
}

#[tokio::test(flavor = "multi_thread")]
async fn plays_a_quiz_against_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload()))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    trivia(&home)
        .args(["play", "--base-url", &server.uri()])
        .args(["--questions", "3", "--username", "tester"])
        .write_stdin("1\n9\nabc\n2\n3\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Capital of Italy?"))
        .stdout(predicate::str::contains("Please enter a number between 1 and 4."))
        .stdout(predicate::str::contains("Quiz complete! Your score:"))
        .stdout(predicate::str::contains("/3"))
        .stdout(predicate::str::contains("Score history for tester"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_service_reports_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("trivia.toml"),
        "max_attempts = 1\nbase_delay_ms = 1\nusername = \"tester\"\n",
    )
    .unwrap();

    trivia(&home)
        .args(["play", "--base-url", &server.uri()])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: could not load any questions"))
        .stdout(predicate::str::contains("No completed quizzes this session."));
}

#[tokio::test(flavor = "multi_thread")]
async fn end_of_input_abandons_quiz() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload()))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    trivia(&home)
        .args(["play", "--base-url", &server.uri(), "--username", "tester"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz abandoned."));
}
