//! Play command handler
//!
//! Line-oriented game loop: each input line is one command applied to the
//! session, followed by the updated view.

use crate::cli::{init_logging, FeedArgs, LocationArgs};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::text::TextFormatter;
use crate::format::url::UrlFormatter;
use crate::format::{Listing, OutputFormatter};
use crate::poi::feed;
use crate::quiz::AnswerOutcome;
use crate::session::Session;
use clap::Args;
use std::io::{BufRead, Write};
use std::str::FromStr;

const HELP: &str = "\
Commands:
  pos <lat> <lng>   set your position
  nofix             forget your position
  list              show unsolved places, nearest first
  select <id>       pick a place and show its question
  answer <text>     answer the selected place's question
  route             directions link to the nearest place
  status            show progress
  restart           start over with every place unsolved
  help              show this help
  quit              leave the game";

/// Play command arguments
#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub feed: FeedArgs,
}

/// One line of player input
#[derive(Debug, Clone, PartialEq)]
pub enum PlayCommand {
    Position(Coordinates),
    NoFix,
    List,
    Select(String),
    Answer(String),
    Route,
    Status,
    Restart,
    Help,
    Quit,
}

impl FromStr for PlayCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (s, ""),
        };

        match word.to_lowercase().as_str() {
            "pos" | "position" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(lat), Some(lng), None) => {
                        let lat = lat.parse().map_err(|_| format!("Invalid latitude: {}", lat))?;
                        let lng = lng.parse().map_err(|_| format!("Invalid longitude: {}", lng))?;
                        Ok(Self::Position(Coordinates::new(lat, lng)))
                    }
                    _ => Err("Usage: pos <lat> <lng>".to_string()),
                }
            }
            "nofix" => Ok(Self::NoFix),
            "list" | "ls" => Ok(Self::List),
            "select" | "sel" => {
                if rest.is_empty() {
                    Err("Usage: select <id>".to_string())
                } else {
                    Ok(Self::Select(rest.to_string()))
                }
            }
            "answer" | "a" => Ok(Self::Answer(rest.to_string())),
            "route" => Ok(Self::Route),
            "status" => Ok(Self::Status),
            "restart" => Ok(Self::Restart),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("Unknown command: {} (type `help`)", other)),
        }
    }
}

/// Run the play command
pub async fn run(args: PlayArgs) -> Result<()> {
    init_logging("warn");
    let config = Config::load()?;

    let source = args.feed.source(&config)?;
    let points = feed::load(&source).await?;
    let mut session = Session::with_points(points)?;

    if let Some(coords) = args.location.resolve().await? {
        session.update_position(coords)?;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play(&mut session, &config, stdin.lock(), stdout.lock())
}

/// Drive a session from `input` until `quit` or end of input
pub fn play<R: BufRead, W: Write>(
    session: &mut Session,
    config: &Config,
    input: R,
    mut out: W,
) -> Result<()> {
    writeln!(
        out,
        "Find the places around you and answer their questions. {} places to go.",
        session.quiz().total()
    )?;
    writeln!(out, "Type `help` for commands.")?;
    print_listing(session, config, &mut out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<PlayCommand>() {
            Ok(PlayCommand::Quit) => break,
            Ok(command) => match execute(session, config, command, &mut out) {
                Ok(()) => {}
                Err(e) if e.is_invalid_input() || matches!(e, Error::NotFound(_)) => {
                    writeln!(out, "Error: {}", e)?;
                }
                Err(e) => return Err(e),
            },
            Err(message) => writeln!(out, "{}", message)?,
        }
        out.flush()?;
    }

    Ok(())
}

fn execute<W: Write>(
    session: &mut Session,
    config: &Config,
    command: PlayCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        PlayCommand::Position(coords) => {
            session.update_position(coords)?;
            print_listing(session, config, out)?;
        }
        PlayCommand::NoFix => {
            session.clear_position();
            writeln!(out, "Position cleared.")?;
        }
        PlayCommand::List => print_listing(session, config, out)?,
        PlayCommand::Select(id) => {
            let point = session.select_point(&id)?;
            writeln!(out, "{}: {}", point.name, point.question)?;
        }
        PlayCommand::Answer(text) => {
            let Some(id) = session.quiz().active().map(|p| p.id.to_string()) else {
                writeln!(out, "Select a place first (`select <id>`).")?;
                return Ok(());
            };

            match session.submit_answer(&id, &text)? {
                AnswerOutcome::Correct => {
                    writeln!(out, "Correct!")?;
                    if session.is_complete() {
                        writeln!(
                            out,
                            "Congratulations, you answered all {} questions! Type `restart` to play again.",
                            session.quiz().total()
                        )?;
                    } else {
                        print_listing(session, config, out)?;
                    }
                }
                AnswerOutcome::AlreadySolved => writeln!(out, "Already solved.")?,
                AnswerOutcome::Incorrect => writeln!(out, "Incorrect, try again.")?,
            }
        }
        PlayCommand::Route => {
            let listing = Listing::from_session(session, config.game.reveal_radius(), None);
            writeln!(out, "{}", UrlFormatter.format(&listing, config)?)?;
        }
        PlayCommand::Status => {
            let report = session.progress_report();
            writeln!(
                out,
                "Solved {}/{} ({} remaining){}",
                report.solved,
                report.total,
                report.remaining,
                if report.complete { ", complete" } else { "" }
            )?;
        }
        PlayCommand::Restart => {
            session.restart();
            writeln!(out, "All places are unsolved again.")?;
            print_listing(session, config, out)?;
        }
        PlayCommand::Help => writeln!(out, "{}", HELP)?,
        PlayCommand::Quit => {}
    }

    Ok(())
}

fn print_listing<W: Write>(session: &Session, config: &Config, out: &mut W) -> Result<()> {
    let listing = Listing::from_session(
        session,
        config.game.reveal_radius(),
        config.game.list_limit(),
    );
    write!(out, "{}", TextFormatter.format(&listing, config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::{PlaceId, PointOfInterest};
    use std::io::Cursor;

    fn session() -> Session {
        Session::with_points(vec![
            PointOfInterest::new(
                PlaceId::new("schloss").unwrap(),
                Coordinates::new(48.7768, 9.1829),
                "Schlossplatz",
                "Which duke commissioned the New Palace?",
            )
            .with_answer("Karl Eugen"),
            PointOfInterest::new(
                PlaceId::new("tower").unwrap(),
                Coordinates::new(48.7858, 9.1829),
                "Killesberg Tower",
                "How tall is the tower in meters?",
            )
            .with_answer("40"),
        ])
        .unwrap()
    }

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        play(session, &Config::default(), Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "pos 48.7758 -9.18".parse::<PlayCommand>().unwrap(),
            PlayCommand::Position(Coordinates::new(48.7758, -9.18))
        );
        assert_eq!("LIST".parse::<PlayCommand>().unwrap(), PlayCommand::List);
        assert_eq!(
            "select  schloss ".parse::<PlayCommand>().unwrap(),
            PlayCommand::Select("schloss".to_string())
        );
        assert_eq!(
            "answer Karl Eugen".parse::<PlayCommand>().unwrap(),
            PlayCommand::Answer("Karl Eugen".to_string())
        );
        assert_eq!(
            "answer".parse::<PlayCommand>().unwrap(),
            PlayCommand::Answer(String::new())
        );
        assert_eq!("q".parse::<PlayCommand>().unwrap(), PlayCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("pos 48.7".parse::<PlayCommand>().is_err());
        assert!("pos north east".parse::<PlayCommand>().is_err());
        assert!("select".parse::<PlayCommand>().is_err());
        assert!("dance".parse::<PlayCommand>().is_err());
    }

    #[test]
    fn test_full_game() {
        let mut session = session();
        let output = run_script(
            &mut session,
            "pos 48.7758 9.1829\n\
             select schloss\n\
             answer Stuttgart\n\
             answer  karl eugen \n\
             select tower\n\
             answer 40\n\
             quit\n",
        );

        assert!(output.contains("1. Schlossplatz"));
        assert!(output.contains("Schlossplatz: Which duke commissioned the New Palace?"));
        assert!(output.contains("Incorrect, try again."));
        assert!(output.contains("Correct!"));
        assert!(output.contains("you answered all 2 questions"));
        assert!(session.is_complete());
    }

    #[test]
    fn test_answer_without_selection() {
        let mut session = session();
        let output = run_script(&mut session, "answer Karl Eugen\n");

        assert!(output.contains("Select a place first"));
        assert_eq!(session.quiz().solved_count(), 0);
    }

    #[test]
    fn test_recoverable_errors_are_reported() {
        let mut session = session();
        let output = run_script(&mut session, "select nowhere\npos 95 0\nfly\nstatus\n");

        assert!(output.contains("Error: Not found: Unknown place id: nowhere"));
        assert!(output.contains("Error: Invalid coordinates"));
        assert!(output.contains("Unknown command: fly"));
        assert!(output.contains("Solved 0/2 (2 remaining)"));
    }

    #[test]
    fn test_restart_and_route() {
        let mut session = session();
        let output = run_script(
            &mut session,
            "pos 48.7758 9.1829\nselect schloss\nanswer karl eugen\nroute\nrestart\nstatus\n",
        );

        assert!(output.contains("destination=48.7858,9.1829"));
        assert!(output.contains("All places are unsolved again."));
        assert!(output.contains("Solved 0/2"));
        assert_eq!(session.quiz().solved_count(), 0);
    }

    #[test]
    fn test_waits_for_fix() {
        let mut session = session();
        let output = run_script(&mut session, "list\n");
        assert!(output.contains("Waiting for a location fix."));
    }
}
