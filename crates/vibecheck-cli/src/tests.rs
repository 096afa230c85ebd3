use super::*;

#[test]
fn parses_check_with_default_max_posts() {
    let cli = Cli::try_parse_from(["vibecheck-cli", "check", "@coffee.page"])
        .expect("expected valid cli args");

    match cli.command {
        Commands::Check { link, max_posts } => {
            assert_eq!(link, "@coffee.page");
            assert_eq!(max_posts, 12);
        }
        Commands::Status => panic!("expected check command"),
    }
}

#[test]
fn parses_check_with_max_posts() {
    let cli = Cli::try_parse_from([
        "vibecheck-cli",
        "check",
        "https://instagram.com/coffee.page",
        "--max-posts",
        "3",
    ])
    .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Check { max_posts: 3, .. }));
}

#[test]
fn rejects_max_posts_above_limit() {
    let result = Cli::try_parse_from(["vibecheck-cli", "check", "someone", "--max-posts", "51"]);
    assert!(result.is_err());
}

#[test]
fn check_requires_link() {
    assert!(Cli::try_parse_from(["vibecheck-cli", "check"]).is_err());
}

#[test]
fn parses_status_command() {
    let cli = Cli::try_parse_from(["vibecheck-cli", "status"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Status));
}
