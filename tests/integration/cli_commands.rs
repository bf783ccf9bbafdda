//! CLI route table against a temporary sled store

use super::test_utils::{fixture_path, IsolatedEnv, PORTCHANNEL_EXPECTED};
use clap::Parser;
use netview::cli::{Cli, Commands, RunContext};
use netview::error::{StatusCode, ViewError};

/// One run context per test: the sled store stays open across commands.
fn context(env: &IsolatedEnv) -> RunContext {
    RunContext::new(env.dir.path(), None, Some(env.dir.path().join("store")))
        .unwrap_or_else(|e| panic!("Failed to open run context: {}", e))
}

fn run(ctx: &RunContext, args: &[&str]) -> Result<String, ViewError> {
    let mut argv = vec!["netview"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    ctx.execute(&cli.command)
}

fn load(ctx: &RunContext, db: &str, fixture: &str) {
    let path = fixture_path(fixture);
    let output = run(ctx, &["load", db, path.to_str().unwrap()]).unwrap();
    assert!(output.starts_with("Loaded "), "unexpected output: {}", output);
}

fn load_portchannels(ctx: &RunContext) {
    load(ctx, "CONFIG_DB", "PORTCHANNEL_EXPECTED.json");
    load(ctx, "STATE_DB", "LAG_TABLE_STATE_EXPECTED.json");
    load(ctx, "APPL_DB", "LAG_TABLE_APPL_EXPECTED.json");
    load(ctx, "state", "LAG_MEMBER_TABLE_STATE_EXPECTED.json");
    load(ctx, "appl", "LAG_MEMBER_TABLE_APPL_EXPECTED.json");
}

#[test]
fn test_load_then_get() {
    let env = IsolatedEnv::new();
    let ctx = context(&env);
    load_portchannels(&ctx);
    assert_eq!(
        run(&ctx, &["get", "interface/portchannel"]).unwrap(),
        PORTCHANNEL_EXPECTED
    );
}

#[test]
fn test_show_text_and_json() {
    let env = IsolatedEnv::new();
    let ctx = context(&env);
    load_portchannels(&ctx);

    let text = run(&ctx, &["show", "portchannel"]).unwrap();
    assert!(text.starts_with("Flags:"));
    assert!(text.contains("Ethernet0(S) Ethernet8(D)"));

    let json = run(&ctx, &["show", "portchannel", "--format", "json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["102"]["Protocol"], "LACP(A)(Dw)");
}

#[test]
fn test_show_alias() {
    let env = IsolatedEnv::new();
    let ctx = context(&env);
    load_portchannels(&ctx);
    load(&ctx, "CONFIG_DB", "PORT_ALIAS.json");

    let json = run(&ctx, &["show", "portchannel", "--format", "json", "--alias"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["101"]["Ports"], "etp1(S)");

    // Without --alias the configured naming mode applies again
    let json = run(&ctx, &["get", "interface/portchannel"]).unwrap();
    assert_eq!(json, PORTCHANNEL_EXPECTED);
}

#[test]
fn test_flush_clears_database() {
    let env = IsolatedEnv::new();
    let ctx = context(&env);
    load_portchannels(&ctx);
    assert_eq!(run(&ctx, &["flush", "CONFIG_DB"]).unwrap(), "Flushed CONFIG_DB");
    assert_eq!(run(&ctx, &["get", "interface/portchannel"]).unwrap(), "{}");
}

#[test]
fn test_loaded_rows_survive_a_new_context() {
    let env = IsolatedEnv::new();
    {
        let ctx = context(&env);
        load_portchannels(&ctx);
    }

    // sled releases its file lock asynchronously after drop
    let mut reopened = None;
    for _ in 0..50 {
        match RunContext::new(env.dir.path(), None, Some(env.dir.path().join("store"))) {
            Ok(ctx) => {
                reopened = Some(ctx);
                break;
            }
            Err(_) => std::thread::sleep(std::time::Duration::from_millis(20)),
        }
    }
    let ctx = reopened.expect("store lock was never released");
    assert_eq!(
        run(&ctx, &["get", "interface/portchannel"]).unwrap(),
        PORTCHANNEL_EXPECTED
    );
}

#[test]
fn test_unknown_database_and_path() {
    let env = IsolatedEnv::new();
    let ctx = context(&env);
    let err = run(&ctx, &["flush", "COUNTERS_DB"]).unwrap_err();
    assert!(err.to_string().contains("Unknown database: COUNTERS_DB"));

    let err = run(&ctx, &["get", "interface/status"]).unwrap_err();
    assert_eq!(err.status(), StatusCode::NotFound);
}

#[test]
fn test_views_and_config_commands() {
    let env = IsolatedEnv::new();
    let ctx = context(&env);
    assert_eq!(
        run(&ctx, &["views"]).unwrap(),
        "interface/neighbor/expected\ninterface/portchannel"
    );
    let config = run(&ctx, &["config"]).unwrap();
    assert!(config.contains(env.dir.path().join("store").to_str().unwrap()));
}

#[test]
fn test_invalid_config_is_rejected_before_opening_store() {
    let env = IsolatedEnv::new();
    let explicit = env.dir.path().join("bad.toml");
    std::fs::write(&explicit, "[logging]\nformat = \"xml\"\n").unwrap();
    let cli = Cli::try_parse_from(["netview", "--config", explicit.to_str().unwrap(), "views"])
        .unwrap();
    assert!(matches!(cli.command, Commands::Views));

    let err = RunContext::new(env.dir.path(), cli.config.as_deref(), None)
        .err()
        .unwrap();
    assert_eq!(err.status(), StatusCode::InvalidArgument);
    assert!(err.to_string().contains("Unknown format 'xml'"));
}
