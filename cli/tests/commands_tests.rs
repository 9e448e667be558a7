//! Command tests against a temporary data directory:
//! allocations.json → plan → verify / authz / daodao / grant / rows / analyze.

use btsg_cli::commands;
use btsg_cli::{CliError, RebalanceConfig};
use btsg_messages::{DaodaoTx, MessagesFile, MsgExec};
use btsg_types::{OperationKind, Timestamp};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ALLOCATIONS: &str = r#"{
    "delegations": [
        {
            "address": "bitsongvaloper1a",
            "name": "Alpha",
            "total_amount": 100,
            "new_delegations": 80,
            "delegators": [
                { "address": "bitsong1d1", "amount": 100, "rewards": 15 }
            ]
        },
        {
            "address": "bitsongvaloper1b",
            "name": "Beta",
            "total_amount": 50,
            "new_delegations": 70,
            "delegators": [
                { "address": "bitsong1d2", "amount": 50, "rewards": 0.5 }
            ]
        },
        {
            "address": "bitsongvaloper1c",
            "name": "Gamma",
            "total_amount": 0,
            "new_delegations": 10,
            "delegators": []
        }
    ]
}"#;

fn setup(allocations: &str) -> (tempfile::TempDir, RebalanceConfig) {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("allocations.json"), allocations).expect("write allocations");
    let config = RebalanceConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    (dir, config)
}

fn read(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).expect("read")).expect("json")
}

// ---------------------------------------------------------------------------
// plan + verify
// ---------------------------------------------------------------------------

#[test]
fn plan_writes_messages_that_verify() {
    let (_dir, config) = setup(ALLOCATIONS);
    let plan = commands::plan::run(&config).expect("plan");
    assert!(plan.is_complete());
    assert_eq!(plan.withdraw.item_count(), 1);

    let messages: MessagesFile =
        serde_json::from_value(read(&config.messages_path())).expect("messages.json");
    assert_eq!(messages.withdraw.item_count(), 1);
    assert_eq!(messages.staking.item_count(), 2);

    let report = commands::verify::run(&config).expect("verify");
    assert!(report.all_matched());
    assert!(commands::verify::ensure_matched(&report).is_ok());

    let table = commands::verify::render(&report, config.scale().expect("scale"));
    assert!(table.contains("OK"));
    assert!(table.contains("bitsong1d1: 5.000000 BTSG"));
}

#[test]
fn tampered_messages_fail_verification() {
    let (_dir, config) = setup(ALLOCATIONS);
    commands::plan::run(&config).expect("plan");

    let mut messages = read(&config.messages_path());
    messages["staking"] = serde_json::json!({});
    std::fs::write(config.messages_path(), messages.to_string()).expect("write");

    let report = commands::verify::run(&config).expect("verify still runs");
    assert!(!report.all_matched());
    assert!(matches!(
        commands::verify::ensure_matched(&report),
        Err(CliError::Mismatch { mismatched: 3, total: 3 })
    ));
}

#[test]
fn unmet_plan_is_still_written() {
    let short = ALLOCATIONS.replace(r#""new_delegations": 10"#, r#""new_delegations": 40"#);
    let (_dir, config) = setup(&short);
    let plan = commands::plan::run(&config).expect("unmet targets are not an error");
    assert!(!plan.is_complete());
    assert_eq!(plan.unmet.len(), 2);
    assert_eq!(plan.unmet[0].validator.as_str(), "bitsongvaloper1c");
    assert_eq!(plan.unmet[0].shortfall.raw(), 5_000_000);
    assert!(plan.stranded.is_empty());
    assert!(config.messages_path().exists());

    let report = commands::verify::run(&config).expect("verify");
    assert_eq!(report.mismatched().count(), 2);
}

#[test]
fn malformed_allocations_abort_before_planning() {
    let (_dir, config) = setup(r#"{ "delegations": [ { "address": 5 } ] }"#);
    assert!(matches!(commands::plan::run(&config), Err(CliError::Io(_))));
    assert!(!config.messages_path().exists());
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

#[test]
fn authz_writes_exec_arrays() {
    let (_dir, config) = setup(ALLOCATIONS);
    commands::plan::run(&config).expect("plan");

    let written = commands::authz::run(&config, true).expect("authz");
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert!(names.contains(&"tx-1.json".to_string()));
    assert!(names.contains(&"tx-2.json".to_string()));
    assert!(names.contains(&"withdraw-bitsong1d1.json".to_string()));
    assert!(names.contains(&"staking-bitsong1d1.json".to_string()));

    let tx1: Vec<MsgExec> =
        serde_json::from_value(read(&config.data_path("tx-1.json"))).expect("tx-1");
    assert_eq!(tx1.len(), 1);
    assert_eq!(tx1[0].grantee(), "bitsong1d1");
}

#[test]
fn daodao_actions_use_decimals() {
    let (_dir, mut config) = setup(ALLOCATIONS);
    config.chain_id = "bitsong-test".to_string();
    commands::plan::run(&config).expect("plan");
    commands::daodao::run(&config).expect("daodao");

    let tx: DaodaoTx =
        serde_json::from_value(read(&config.data_path("daodao-tx-2.json"))).expect("tx-2");
    assert_eq!(tx.actions.len(), 1);
    let json = serde_json::to_value(&tx).expect("serialize");
    let first = &json["actions"][0]["data"]["_actionData"][0]["data"];
    assert_eq!(first["chainId"], "bitsong-test");
    assert_eq!(first["type"], "redelegate");
    assert_eq!(first["amount"], 20.0);
}

#[test]
fn grants_are_written_per_withdrawing_delegator() {
    let (_dir, config) = setup(ALLOCATIONS);
    commands::plan::run(&config).expect("plan");
    let written =
        commands::grant::run(&config, "bitsong1bot", Timestamp::new(1_000)).expect("grant");
    assert_eq!(written, vec![config.data_path("grant-bitsong1d1.json")]);

    let grants = read(&written[0]);
    assert_eq!(grants.as_array().map(Vec::len), Some(4));
    assert_eq!(grants[0]["value"]["grantee"], "bitsong1bot");
}

#[test]
fn rows_list_withdrawals_first() {
    let (_dir, config) = setup(ALLOCATIONS);
    commands::plan::run(&config).expect("plan");
    let rows = commands::rows::run(&config).expect("rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].kind, OperationKind::Withdraw);
    assert!(config.data_path(commands::rows::ROWS_FILE).exists());
}

#[test]
fn analyze_writes_summary_rows() {
    let (_dir, config) = setup(ALLOCATIONS);
    let summary = commands::analyze::run(&config).expect("analyze");
    let scale = config.scale().expect("scale");
    assert_eq!(scale.to_display(summary.current), 150.0);
    assert_eq!(scale.to_display(summary.target), 160.0);
    assert_eq!(scale.to_display(summary.rewards), 15.5);

    let rows = read(&config.data_path(commands::analyze::SUMMARY_FILE));
    assert_eq!(rows[0]["ValidatorName"], "Alpha");
    assert_eq!(rows[2]["Difference"], 10.0);
}
