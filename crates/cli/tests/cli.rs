use assert_cmd::Command;

fn catalog() -> Command {
    let mut cmd = Command::cargo_bin("catalog").unwrap();
    cmd.env_remove("CATALOG_ENV").env_remove("CATALOG_CONFIG_DIR");
    cmd
}

#[test]
fn seed_prints_fixed_catalog() {
    let output = catalog().arg("seed").assert().success().get_output().clone();
    let books: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 7);
    assert_eq!(books[6]["id"], 7);
    assert_eq!(books[6]["title"], "CS 1107");
}

#[test]
fn config_prints_effective_settings() {
    let output = catalog()
        .arg("config")
        .env("CATALOG_SERVER__PORT", "9321")
        .assert()
        .success()
        .get_output()
        .clone();
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 9321);
    assert_eq!(settings["environment"], "local");
}

#[test]
fn unknown_environment_fails() {
    catalog().arg("config").env("CATALOG_ENV", "qa").assert().failure();
}
