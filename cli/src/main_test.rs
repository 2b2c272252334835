use super::*;

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/catalog.json");

fn scratch(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cake-cli-{}.json", Uuid::new_v4()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn offline(config: Option<PathBuf>) -> OfflineArgs {
    OfflineArgs { catalog: PathBuf::from(CATALOG), config, shape: None }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn parses_session_edit() {
    let cli = Cli::try_parse_from([
        "cake",
        "session",
        "edit",
        "00000000-0000-0000-0000-000000000000",
        "--json",
        r#"{"op":"add_tier"}"#,
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Command::Session(SessionCommand { command: SessionSubcommand::Edit { .. } })
    ));
}

#[test]
fn price_default_config() {
    let value = run_price(&offline(None), false).unwrap();
    assert_eq!(value["price"], 660);
}

#[test]
fn price_breakdown_itemizes() {
    let value = run_price(&offline(None), true).unwrap();
    assert_eq!(value["total"], 660);
    assert_eq!(value["base"], 300.0);
}

#[test]
fn price_from_config_file() {
    let catalog = load_catalog(Path::new(CATALOG)).unwrap();
    let config = CakeConfig::default_for(&catalog).with_message_text("Happy Birthday");
    let path = scratch(&serde_json::to_string(&config).unwrap());
    let value = run_price(&offline(Some(path.clone())), false).unwrap();
    std::fs::remove_file(path).unwrap();
    assert_eq!(value["price"], 710);
}

#[test]
fn invalid_config_file_is_rejected() {
    let catalog = load_catalog(Path::new(CATALOG)).unwrap();
    let mut config = CakeConfig::default_for(&catalog);
    config.layers.clear();
    let path = scratch(&serde_json::to_string(&config).unwrap());
    let err = run_price(&offline(Some(path.clone())), false).unwrap_err();
    std::fs::remove_file(path).unwrap();
    assert!(matches!(err, CliError::Config(_)));
}

#[test]
fn missing_catalog_names_the_path() {
    let args = OfflineArgs { catalog: PathBuf::from("/no/such/catalog.json"), config: None, shape: None };
    let err = run_price(&args, false).unwrap_err();
    assert!(err.to_string().contains("/no/such/catalog.json"));
}

#[test]
fn plan_is_reproducible_for_a_seed() {
    let a = run_plan(&offline(None), 5, false).unwrap();
    let b = run_plan(&offline(None), 5, false).unwrap();
    assert_eq!(a, b);
    assert_eq!(a["elements"].as_array().map(Vec::len), Some(2));
}

#[test]
fn parse_edit_rejects_unknown_op() {
    assert!(parse_edit(r#"{"op":"add_tier"}"#).is_ok());
    assert!(matches!(parse_edit(r#"{"op":"bake"}"#), Err(CliError::InvalidJson(_))));
}

#[test]
fn url_joins_without_double_slash() {
    assert_eq!(url("http://x:3000/", "/healthz"), "http://x:3000/healthz");
}

#[test]
fn config_file_toppings_follow_catalog() {
    let catalog = load_catalog(Path::new(CATALOG)).unwrap();
    let mut config = CakeConfig::default_for(&catalog);
    config.toppings.insert("Rainbow Sprinkles".into(), cake::ToppingValue::Toggle(true));
    config.toppings.insert("Cherries".into(), cake::ToppingValue::Count(4));
    let path = scratch(&serde_json::to_string(&config).unwrap());
    let price = run_price(&offline(Some(path.clone())), false).unwrap();
    let pieces = run_plan(&offline(Some(path.clone())), 5, true).unwrap();
    std::fs::remove_file(path).unwrap();
    assert_eq!(price["price"], 680);
    assert_eq!(pieces["Cherries"], 4);
    assert!(pieces.get("Rainbow Sprinkles").is_none());
}

#[test]
fn plan_pieces_lists_every_catalog_topping() {
    let value = run_plan(&offline(None), 5, true).unwrap();
    let counts = value.as_object().unwrap();
    assert_eq!(counts.len(), 6);
    assert!(counts.values().all(|v| v == 0));
}

#[test]
fn shape_override_is_lenient() {
    let catalog = load_catalog(Path::new(CATALOG)).unwrap();
    let heart = OfflineArgs { shape: Some(" HEART ".into()), ..offline(None) };
    assert_eq!(load_config(&heart, &catalog).unwrap().shape, CakeShape::Heart);
    let unknown = OfflineArgs { shape: Some("Hexagon".into()), ..offline(None) };
    assert_eq!(load_config(&unknown, &catalog).unwrap().shape, CakeShape::Round);
}

#[test]
fn parses_plan_pieces_flag() {
    let cli = Cli::try_parse_from(["cake", "plan", "--catalog", CATALOG, "--shape", "square", "--pieces"]).unwrap();
    assert!(matches!(cli.command, Command::Plan { pieces: true, .. }));
}
