//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_gateway_options() {
        let cli = Cli::parse_from_iter([
            "whatsapi",
            "--base-url",
            "http://localhost:8080",
            "--api-key",
            "secret",
            "--instance",
            "main",
            "--timeout",
            "10",
            "--max-retries",
            "5",
            "status",
        ]);

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.api_key.as_deref(), Some("secret"));
        assert_eq!(cli.instance.as_deref(), Some("main"));
        assert_eq!(cli.timeout, Some(10));
        assert_eq!(cli.max_retries, Some(5));
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from_iter(["whatsapi", "status", "-v", "-c", "gw.toml"]);

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("gw.toml")));
    }

    #[test]
    fn defaults_are_unset() {
        let cli = Cli::parse_from_iter(["whatsapi", "status"]);

        assert!(cli.base_url.is_none());
        assert!(cli.timeout.is_none());
        assert!(cli.max_retries.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(<Cli as clap::Parser>::try_parse_from(["whatsapi"]).is_err());
    }
}

mod commands {
    use super::*;

    #[test]
    fn init_default_output() {
        let cli = Cli::parse_from_iter(["whatsapi", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Command::Init { output } => assert_eq!(output, PathBuf::from("whatsapi.toml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn send_text() {
        let cli = Cli::parse_from_iter(["whatsapi", "send-text", "+1555000", "hello there"]);

        match cli.command {
            Command::SendText { to, text } => {
                assert_eq!(to, "+1555000");
                assert_eq!(text, "hello there");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn send_media_with_options() {
        let cli = Cli::parse_from_iter([
            "whatsapi",
            "send-media",
            "1555000",
            "https://cdn.example.com/r.pdf",
            "document",
            "--caption",
            "report",
            "--file-name",
            "r.pdf",
        ]);

        match cli.command {
            Command::SendMedia {
                to,
                url,
                media_type,
                caption,
                mime_type,
                file_name,
            } => {
                assert_eq!(to, "1555000");
                assert_eq!(url, "https://cdn.example.com/r.pdf");
                assert_eq!(media_type, "document");
                assert_eq!(caption.as_deref(), Some("report"));
                assert!(mime_type.is_none());
                assert_eq!(file_name.as_deref(), Some("r.pdf"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn setup_webhook_with_events() {
        let cli = Cli::parse_from_iter([
            "whatsapi",
            "setup-webhook",
            "https://bot.example.com/hook",
            "--no-by-events",
            "--event",
            "MESSAGES_UPSERT",
            "--event",
            "SEND_MESSAGE",
        ]);

        match cli.command {
            Command::SetupWebhook {
                url,
                no_by_events,
                base64,
                events,
            } => {
                assert_eq!(url, "https://bot.example.com/hook");
                assert!(no_by_events);
                assert!(!base64);
                assert_eq!(events, vec!["MESSAGES_UPSERT", "SEND_MESSAGE"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn react_from_me() {
        let cli = Cli::parse_from_iter(["whatsapi", "react", "MSG1", "1555000", "👍", "--from-me"]);

        match cli.command {
            Command::React {
                id,
                to,
                emoji,
                from_me,
            } => {
                assert_eq!(id, "MSG1");
                assert_eq!(to, "1555000");
                assert_eq!(emoji, "👍");
                assert!(from_me);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn gateway_requirement() {
        let translate = Cli::parse_from_iter(["whatsapi", "translate", "payload.json"]);
        let init = Cli::parse_from_iter(["whatsapi", "init"]);
        let delete = Cli::parse_from_iter(["whatsapi", "delete-message", "MSG1", "1555000"]);
        let picture = Cli::parse_from_iter(["whatsapi", "profile-picture", "1555000"]);

        assert!(!translate.command.needs_gateway());
        assert!(!init.command.needs_gateway());
        assert!(delete.command.needs_gateway());
        assert!(picture.command.needs_gateway());
    }
}
