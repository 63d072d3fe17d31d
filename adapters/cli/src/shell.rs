//! Line-driven loop that feeds intents to a session and prints the outcome.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use ghost_catcher_core::{Event, FailureReason, GenerationError};
use ghost_catcher_session::{difficulty, Session};
use tracing::{debug, warn};

use crate::{
    ads::{AdKind, AdService},
    board,
    config::AdsConfig,
    intent::{parse_line, Intent},
};

/// Whether the loop should keep reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Text front end over a single session.
pub(crate) struct Shell<A> {
    session: Session,
    ads: A,
    ads_config: AdsConfig,
    show_board: bool,
}

impl<A: AdService> Shell<A> {
    pub(crate) fn new(session: Session, mut ads: A, ads_config: AdsConfig, show_board: bool) -> Self {
        if ads_config.enabled {
            let _ = ads.load_ad();
        }
        Self {
            session,
            ads,
            ads_config,
            show_board,
        }
    }

    pub(crate) fn ads(&self) -> &A {
        &self.ads
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    /// Reads intents until end of input or `quit`.
    pub(crate) fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line.context("failed to read input")?;
            let intent = match parse_line(&line) {
                Ok(Some(intent)) => intent,
                Ok(None) => continue,
                Err(error) => {
                    warn!(line = index + 1, %error, "unreadable intent");
                    writeln!(out, "line {}: {error}", index + 1)?;
                    continue;
                }
            };

            if self.execute(intent, out)? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    fn execute<W: Write>(&mut self, intent: Intent, out: &mut W) -> Result<Flow> {
        debug!(?intent, "executing intent");
        let outcome = match intent {
            Intent::Start => self.session.start_game(),
            Intent::Place(position) => self.session.place_talisman(position),
            Intent::Pause => self.session.pause(),
            Intent::Resume => self.session.resume(),
            Intent::Retry => self.session.retry_level(),
            Intent::Reset => self.session.reset_level(),
            Intent::Advance => self.session.advance_level(),
            Intent::Menu => self.session.return_to_menu(),
            Intent::Show => Ok(Vec::new()),
            Intent::Difficulty(level) => {
                let parameters = difficulty(level);
                writeln!(
                    out,
                    "level {level}: {} tier, {} pots, {} obstacles, {} talismans",
                    parameters.tier.label(),
                    parameters.pots,
                    parameters.obstacles,
                    parameters.max_talismans
                )?;
                return Ok(Flow::Continue);
            }
            Intent::Quit => return Ok(Flow::Quit),
        };

        match outcome {
            Ok(events) => self.report(&events, out)?,
            Err(error) => self.report_generation_error(&error, out)?,
        }
        self.print_status(out)?;
        Ok(Flow::Continue)
    }

    fn report<W: Write>(&mut self, events: &[Event], out: &mut W) -> Result<()> {
        for event in events {
            match event {
                Event::GhostTrapped { at } => {
                    writeln!(out, "the ghost is boxed in at ({}, {})", at.column(), at.row())?;
                }
                Event::LevelCompleted {
                    level,
                    awarded,
                    score,
                } => {
                    writeln!(out, "level {level} complete: +{awarded} (score {score})")?;
                    if self.ads_config.enabled && self.ads_config.show_interstitial_after_level {
                        let shown = self.ads.show_ad(AdKind::Interstitial);
                        debug!(level, shown, "interstitial after level");
                    }
                }
                Event::LevelFailed { level, reason } => {
                    let cause = match reason {
                        FailureReason::Escaped => "the ghost escaped",
                        FailureReason::BudgetExhausted => "out of talismans",
                    };
                    writeln!(out, "level {level} failed: {cause}")?;
                    if self.ads_config.enabled
                        && self.ads_config.show_rewarded_on_failure
                        && self.ads.show_ad(AdKind::Rewarded)
                        && self.ads.reward_granted()
                    {
                        writeln!(out, "reward granted")?;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn report_generation_error<W: Write>(
        &self,
        error: &GenerationError,
        out: &mut W,
    ) -> Result<()> {
        warn!(%error, "level generation failed");
        writeln!(out, "error: {error}")?;
        Ok(())
    }

    fn print_status<W: Write>(&self, out: &mut W) -> Result<()> {
        let session = &self.session;
        match session.snapshot() {
            Some(snapshot) => {
                writeln!(
                    out,
                    "state: {:?} | level {} ({}) | talismans {}/{} | score {}",
                    session.state(),
                    snapshot.level,
                    snapshot.tier.label(),
                    snapshot.talismans_used,
                    snapshot.max_talismans,
                    session.score()
                )?;
                if self.show_board {
                    write!(out, "{}", board::render(&snapshot))?;
                }
            }
            None => {
                writeln!(
                    out,
                    "state: {:?} | score {}",
                    session.state(),
                    session.score()
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::MockAdService;
    use ghost_catcher_core::{GameConfig, GameState};

    fn shell(ads_config: AdsConfig, show_board: bool) -> Shell<MockAdService> {
        Shell::new(
            Session::new(GameConfig::default(), Some(17)),
            MockAdService::default(),
            ads_config,
            show_board,
        )
    }

    fn run(shell: &mut Shell<MockAdService>, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).expect("script runs");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn script_drives_the_session() {
        let mut shell = shell(AdsConfig::default(), true);

        let output = run(&mut shell, "# opening\nstart\npause\n");

        assert_eq!(shell.session().state(), GameState::Paused);
        assert!(output.contains("state: Playing | level 1 (easy) | talismans 0/22 | score 0"));
        assert!(output.contains("state: Paused"));
        assert_eq!(output.matches('G').count(), 2);
    }

    #[test]
    fn quit_stops_reading() {
        let mut shell = shell(AdsConfig::default(), false);

        let _ = run(&mut shell, "quit\nstart\n");

        assert_eq!(shell.session().state(), GameState::Menu);
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let mut shell = shell(AdsConfig::default(), false);

        let output = run(&mut shell, "fly\nstart\n");

        assert!(output.contains("line 1: unknown command `fly`"));
        assert_eq!(shell.session().state(), GameState::Playing);
    }

    #[test]
    fn difficulty_is_printed_without_a_level() {
        let mut shell = shell(AdsConfig::default(), false);

        let output = run(&mut shell, "difficulty 70\n");

        assert_eq!(output, "level 70: hard tier, 1 pots, 2 obstacles, 42 talismans\n");
        assert_eq!(shell.session().state(), GameState::Menu);
    }

    #[test]
    fn failures_show_a_rewarded_ad_when_enabled() {
        let mut shell = shell(AdsConfig::default(), false);
        let mut out = Vec::new();
        let events = [Event::LevelFailed {
            level: 3,
            reason: FailureReason::BudgetExhausted,
        }];

        shell.report(&events, &mut out).expect("report");

        let output = String::from_utf8(out).expect("utf-8 output");
        assert!(output.contains("level 3 failed: out of talismans"));
        assert!(output.contains("reward granted"));
        assert_eq!(shell.ads().shown(), 1);
    }

    #[test]
    fn disabled_ads_are_never_shown() {
        let mut shell = shell(
            AdsConfig {
                enabled: false,
                ..AdsConfig::default()
            },
            false,
        );
        let mut out = Vec::new();
        let events = [Event::LevelCompleted {
            level: 1,
            awarded: 4,
            score: 4,
        }];

        shell.report(&events, &mut out).expect("report");

        assert_eq!(shell.ads().shown(), 0);
        assert_eq!(shell.ads().loads(), 0);
    }

    #[test]
    fn completions_show_an_interstitial_when_enabled() {
        let mut shell = shell(AdsConfig::default(), false);
        let mut out = Vec::new();
        let events = [Event::LevelCompleted {
            level: 2,
            awarded: 9,
            score: 15,
        }];

        shell.report(&events, &mut out).expect("report");

        let output = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(output, "level 2 complete: +9 (score 15)\n");
        assert_eq!(shell.ads().shown(), 1);
        assert!(!shell.ads().reward_granted());
    }
}
