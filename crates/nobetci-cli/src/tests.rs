use super::*;

#[test]
fn parses_list_command_with_default_prefix() {
    let cli = Cli::try_parse_from(["nobetci-cli", "list"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::List { ref link_prefix } if link_prefix.is_empty()
    ));
}

#[test]
fn parses_list_command_with_link_prefix() {
    let cli = Cli::try_parse_from([
        "nobetci-cli",
        "list",
        "--link-prefix",
        "https://api.example.org/detail?link=",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::List { ref link_prefix } if link_prefix == "https://api.example.org/detail?link="
    ));
}

#[test]
fn parses_detail_command() {
    let cli = Cli::try_parse_from(["nobetci-cli", "detail", "/eczane/ana-eczane"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Detail { ref link } if link == "/eczane/ana-eczane"
    ));
}

#[test]
fn detail_requires_a_link() {
    assert!(Cli::try_parse_from(["nobetci-cli", "detail"]).is_err());
}

#[test]
fn parses_cities_command() {
    let cli = Cli::try_parse_from(["nobetci-cli", "cities"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Cities));
}

#[test]
fn city_flag_is_accepted_before_and_after_subcommand() {
    let before = Cli::try_parse_from(["nobetci-cli", "--city", "izmir", "list"]).unwrap();
    let after = Cli::try_parse_from(["nobetci-cli", "list", "--city", "İzmir"]).unwrap();

    assert_eq!(before.city.as_deref(), Some("izmir"));
    assert_eq!(after.city.as_deref(), Some("İzmir"));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["nobetci-cli"]).is_err());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["nobetci-cli", "collect"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
