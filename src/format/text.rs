//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{Listing, OutputFormatter};

/// Text formatter - numbered list, nearest first
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, listing: &Listing<'_>, _config: &Config) -> Result<String> {
        let mut output = String::new();
        let progress = &listing.progress;

        match listing.origin {
            Some(origin) => output.push_str(&format!("Position: {}\n", origin)),
            None => output.push_str("Position: no location fix\n"),
        }
        output.push_str(&format!(
            "Solved: {}/{}{}\n\n",
            progress.solved,
            progress.total,
            if progress.complete { " - all places found!" } else { "" }
        ));

        if listing.points.is_empty() {
            if listing.origin.is_none() {
                output.push_str("Waiting for a location fix.\n");
            } else if !progress.complete {
                output.push_str("No unsolved places nearby.\n");
            }
            return Ok(output);
        }

        for (i, ranked) in listing.points.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} - {:.1} meters [{}]\n",
                i + 1,
                ranked.point.name,
                ranked.distance_meters,
                ranked.point.id
            ));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::session_with_fix;
    use crate::session::Session;

    #[test]
    fn test_text_format() {
        let session = session_with_fix();
        let listing = Listing::from_session(&session, None, None);

        let output = TextFormatter.format(&listing, &Config::default()).unwrap();

        assert!(output.contains("Position: (48.775800, 9.182900)"));
        assert!(output.contains("Solved: 0/3"));
        assert!(output.contains("1. Schlossplatz - 111.2 meters [schloss]"));
        assert!(output.contains("2. Schloss Rosenstein"));
        assert!(output.contains("3. Killesberg"));
    }

    #[test]
    fn test_text_format_without_fix() {
        let mut session = session_with_fix();
        session.clear_position();
        let listing = Listing::from_session(&session, None, None);

        let output = TextFormatter.format(&listing, &Config::default()).unwrap();

        assert!(output.contains("no location fix"));
        assert!(output.contains("Waiting for a location fix."));
    }

    #[test]
    fn test_text_format_complete() {
        let mut session = session_with_fix();
        session.submit_answer("schloss", "karl eugen").unwrap();
        session.submit_answer("rosenstein", "natural history museum").unwrap();
        session.submit_answer("killesberg", "40").unwrap();
        let listing = Listing::from_session(&session, None, None);

        let output = TextFormatter.format(&listing, &Config::default()).unwrap();

        assert!(output.contains("Solved: 3/3 - all places found!"));
        assert!(!output.contains("1."));
    }

    #[test]
    fn test_text_format_empty_session() {
        let session = Session::new();
        let listing = Listing::from_session(&session, None, None);
        let output = TextFormatter.format(&listing, &Config::default()).unwrap();
        assert!(output.contains("Solved: 0/0"));
    }
}
