use std::io::Write;

use async_trait::async_trait;
use game_core::{BattleState, Side};
use runtime::{ActionProvider, Decision, ProviderKind, RuntimeError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

use super::menu::{ActionMenu, parse_yes_no};

struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    fn write(&mut self, kind: ProviderKind, text: &str) -> runtime::Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|source| RuntimeError::ActionSource { kind, source })
    }

    /// `None` at end of input.
    async fn read_line(&mut self, kind: ProviderKind) -> runtime::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|source| RuntimeError::ActionSource { kind, source })?;
        Ok((read > 0).then_some(line))
    }
}

/// Action provider that reads numbered menu choices from a console.
///
/// Invalid input re-prompts without side effects. End of input surfaces as
/// [`RuntimeError::ActionSourceClosed`].
pub struct ConsoleActionProvider<R, W> {
    console: Mutex<Console<R, W>>,
    basic_attack_damage: u32,
}

impl ConsoleActionProvider<BufReader<Stdin>, std::io::Stdout> {
    pub fn stdio(basic_attack_damage: u32) -> Self {
        Self::new(
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
            basic_attack_damage,
        )
    }
}

impl<R, W> ConsoleActionProvider<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(reader: R, writer: W, basic_attack_damage: u32) -> Self {
        Self {
            console: Mutex::new(Console { reader, writer }),
            basic_attack_damage,
        }
    }

    /// Asks a yes/no question until it gets an answer.
    pub async fn confirm(&self, question: &str) -> runtime::Result<bool> {
        let kind = ProviderKind::Player;
        let mut console = self.console.lock().await;
        loop {
            console.write(kind, &format!("{question} [y/n] "))?;
            let Some(line) = console.read_line(kind).await? else {
                return Err(RuntimeError::ActionSourceClosed { kind });
            };
            match parse_yes_no(&line) {
                Ok(answer) => return Ok(answer),
                Err(err) => console.write(kind, &format!("{err}\n"))?,
            }
        }
    }

    pub fn into_parts(self) -> (R, W) {
        let console = self.console.into_inner();
        (console.reader, console.writer)
    }
}

#[async_trait]
impl<R, W> ActionProvider for ConsoleActionProvider<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn provide_action(&self, side: Side, state: &BattleState) -> runtime::Result<Decision> {
        let kind = ProviderKind::from(side);
        let menu = ActionMenu::for_side(state, side, self.basic_attack_damage);
        let name = state.combatants.get(side).name();

        let mut console = self.console.lock().await;
        loop {
            console.write(kind, &format!("\n{name}, choose an action:\n{}> ", menu.render()))?;
            let Some(line) = console.read_line(kind).await? else {
                return Err(RuntimeError::ActionSourceClosed { kind });
            };
            match menu.select(&line) {
                Ok(action) => return Ok(action.clone().into()),
                Err(err) => {
                    tracing::debug!(%err, input = line.trim(), "invalid menu choice");
                    console.write(kind, &format!("{err}\n"))?;
                }
            }
        }
    }
}
