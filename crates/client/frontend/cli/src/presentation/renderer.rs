//! Event sink that prints the battle to a console.
use std::io::Write;
use std::time::Duration;

use game_core::{ActionReport, BattleSnapshot, GameConfig, Outcome, Side};
use runtime::{BattleEvent, EventSink};

use super::art;
use super::theme::{Theme, Tone};

pub struct ConsoleRenderer<W> {
    out: W,
    theme: Theme,
    animation_delay: Duration,
    names: [String; 2],
}

impl ConsoleRenderer<std::io::Stdout> {
    pub fn stdout(theme: Theme, animation_delay: Duration) -> Self {
        Self::new(std::io::stdout(), theme, animation_delay)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, theme: Theme, animation_delay: Duration) -> Self {
        Self {
            out,
            theme,
            animation_delay,
            names: [String::from("player"), String::from("enemy")],
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn name(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.names[0],
            Side::Enemy => &self.names[1],
        }
    }

    fn remember(&mut self, snapshot: &BattleSnapshot) {
        self.names = [snapshot.player.name.clone(), snapshot.enemy.name.clone()];
    }

    fn line(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "{text}")
    }

    fn painted(&mut self, text: &str, tone: Tone) -> std::io::Result<()> {
        let painted = self.theme.paint(text, tone);
        self.line(&painted)
    }

    fn status_boxes(&mut self, snapshot: &BattleSnapshot) -> std::io::Result<()> {
        for side in [Side::Player, Side::Enemy] {
            let rendered = art::status_box(snapshot.combatant(side));
            self.painted(&rendered, Tone::Side(side))?;
        }
        Ok(())
    }

    fn action(&mut self, report: &ActionReport) -> std::io::Result<()> {
        match report {
            ActionReport::Attack(attack) => {
                let frames = art::attack_frames(
                    self.name(attack.attacker),
                    self.name(attack.defender),
                    attack.damage,
                );
                for frame in frames {
                    self.painted(&frame, Tone::Side(attack.attacker))?;
                    self.out.flush()?;
                    if !self.animation_delay.is_zero() {
                        std::thread::sleep(self.animation_delay);
                    }
                }
                Ok(())
            }
            ActionReport::Cast(cast) => {
                let text = format!(
                    "{} casts {}! {} {}: {} -> {} (+{} exp, {} exp total)",
                    self.name(cast.caster),
                    cast.spell,
                    self.name(cast.target),
                    cast.outcome.kind,
                    cast.outcome.old,
                    cast.outcome.new,
                    GameConfig::SPELL_EXPERIENCE,
                    cast.experience,
                );
                self.painted(&text, Tone::Side(cast.caster))
            }
        }
    }

    fn render(&mut self, event: &BattleEvent) -> std::io::Result<()> {
        match event {
            BattleEvent::RoundStarted { round, snapshot } => {
                self.remember(snapshot);
                let header = art::round_header(*round);
                self.line("")?;
                self.painted(&header, Tone::Header)?;
                self.status_boxes(snapshot)
            }
            BattleEvent::ActionResolved {
                report, snapshot, ..
            } => {
                self.remember(snapshot);
                self.action(report)
            }
            BattleEvent::ActionRejected { error, .. } => {
                self.painted(&format!("Cannot do that: {error}"), Tone::Warning)
            }
            BattleEvent::DecisionOverridden {
                actor,
                proposed,
                fallback,
                ..
            } => {
                let text = format!(
                    "{} cannot {proposed} and falls back to {fallback}.",
                    self.name(*actor)
                );
                self.painted(&text, Tone::Warning)
            }
            BattleEvent::Narration { text, .. } => {
                self.painted(&format!("  ~ {text}"), Tone::Narration)
            }
            BattleEvent::NarratorEventApplied { target, hp, mana } => {
                let text = format!(
                    "  ~ {}: HP {} -> {}, Mana {} -> {}",
                    self.name(*target),
                    hp.old,
                    hp.new,
                    mana.old,
                    mana.new
                );
                self.painted(&text, Tone::Narration)
            }
            BattleEvent::ResourcesExhausted { .. } => self.painted(
                "Both sides have exhausted their resources!",
                Tone::Warning,
            ),
            BattleEvent::RoundEnded { .. } => Ok(()),
            BattleEvent::BattleEnded {
                outcome, snapshot, ..
            } => {
                self.remember(snapshot);
                let banner = art::banner(*outcome);
                self.line("")?;
                self.painted(&banner, Tone::Outcome(*outcome))?;
                let summary = match outcome {
                    Outcome::Victory => format!(
                        "{} wins! {} is defeated.",
                        snapshot.player.name, snapshot.enemy.name
                    ),
                    Outcome::Defeat => format!("{} has fallen...", snapshot.player.name),
                    Outcome::Draw => "Neither side can win this fight.".to_string(),
                };
                self.line(&summary)?;
                self.line(&snapshot.player.to_string())?;
                self.line(&snapshot.enemy.to_string())
            }
        }
    }
}

impl<W: Write + Send> EventSink for ConsoleRenderer<W> {
    fn publish(&mut self, event: &BattleEvent) {
        if let Err(err) = self.render(event).and_then(|_| self.out.flush()) {
            tracing::warn!(%err, "failed to write to console");
        }
    }
}
