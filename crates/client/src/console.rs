//! Line-based terminal front end.
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use revenge_core::{GameState, Item, ItemId, Phase};
use revenge_runtime::{InputEvent, InputOutcome, RuntimeHandle};

/// A parsed console line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Input(InputEvent),
    /// Enter on an empty line: whatever confirm the current phase expects.
    Strike,
    Status,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Some(Self::Strike);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "a" | "prev" | "left" => Self::Input(InputEvent::SelectPrevious),
            "d" | "next" | "right" => Self::Input(InputEvent::SelectNext),
            "c" | "confirm" => Self::Input(InputEvent::ConfirmItem),
            "u" | "use" => Self::Input(InputEvent::UseCurrentItem),
            "attack" => Self::Input(InputEvent::ConfirmAttack),
            "defend" => Self::Input(InputEvent::ConfirmDefense),
            "r" | "reset" => Self::Input(InputEvent::ResetCombat),
            "restart" => Self::Input(InputEvent::Restart),
            "new" => Self::Input(InputEvent::StartNewGame),
            "tick" => {
                let dt = words.next()?.parse::<f32>().ok()?;
                Self::Input(InputEvent::Tick(dt))
            }
            "s" | "status" => Self::Status,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => {
                let slot = other.parse::<u16>().ok().filter(|slot| *slot > 0)?;
                Self::Input(InputEvent::SelectItem(ItemId(slot - 1)))
            }
        };
        Some(command)
    }
}

/// Input that an empty line stands for in `phase`.
pub fn strike_for(phase: Phase) -> InputEvent {
    match phase {
        Phase::ItemSelect => InputEvent::UseCurrentItem,
        Phase::AttackTiming => InputEvent::ConfirmAttack,
        Phase::DefenseTiming => InputEvent::ConfirmDefense,
        Phase::Defeat | Phase::GameClear => InputEvent::Restart,
    }
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run(handle: RuntimeHandle, items: Vec<Item>) -> Result<()> {
    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            println!("Unknown command `{}`. Type `help`.", line.trim());
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Status => print_status(&handle.query_state().await?, &items),
            Command::Strike => {
                let phase = handle.query_state().await?.phase();
                let event = strike_for(phase);
                report(event, handle.send(event).await?);
            }
            Command::Input(event) => report(event, handle.send(event).await?),
        }
    }

    tracing::info!("Console input closed");
    Ok(())
}

fn report(event: InputEvent, outcome: InputOutcome) {
    match outcome {
        InputOutcome::Applied => {}
        InputOutcome::Ignored => {
            tracing::debug!(input = event.name(), "Ignored");
        }
        InputOutcome::Rejected(error) => println!("! {error}"),
    }
}

fn print_status(state: &GameState, items: &[Item]) {
    let name_of = |id: ItemId| {
        items
            .iter()
            .find(|item| item.id == id)
            .map_or_else(|| id.to_string(), |item| item.name.clone())
    };

    println!(
        "Stage {} | {}",
        state.stages.current_index() + 1,
        state.phase()
    );
    if let Some(player) = state.player() {
        println!("  You  HP {:.0}/{:.0}", player.hp(), player.max_hp());
    }
    if let Some(enemy) = state.enemy() {
        println!(
            "  {} ({}) HP {:.0}/{:.0}",
            enemy.name,
            enemy.rank.title(),
            enemy.combatant.hp(),
            enemy.combatant.max_hp()
        );
    }

    let selection = &state.combat.selection;
    for (slot, id) in selection.available().iter().enumerate() {
        let marker = if slot == selection.cursor() { '>' } else { ' ' };
        let pending = if selection.pending() == Some(*id) { " (selected)" } else { "" };
        println!("  {marker} {}. {}{pending}", id.0 + 1, name_of(*id));
    }

    match state.phase() {
        Phase::AttackTiming => println!("  bar {:+.0}", state.combat.attack_bar.position()),
        Phase::DefenseTiming => println!("  bar {:+.0}", state.combat.defense_bar.position()),
        _ => {}
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <enter>        act: use item / stop attack bar / stop defense bar / restart");
    println!("  a, d           previous / next item");
    println!("  1-9            select item by number, then `c` to confirm");
    println!("  reset          reset the current fight");
    println!("  restart, new   leave a finished game / start over with no progress");
    println!("  tick <secs>    advance the timing bar manually");
    println!("  status, quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_strikes() {
        assert_eq!(Command::parse(""), Some(Command::Strike));
        assert_eq!(Command::parse("   "), Some(Command::Strike));
    }

    #[test]
    fn item_slots_are_one_based() {
        assert_eq!(
            Command::parse("3"),
            Some(Command::Input(InputEvent::SelectItem(ItemId(2))))
        );
        assert_eq!(Command::parse("0"), None);
    }

    #[test]
    fn tick_needs_a_duration() {
        assert_eq!(
            Command::parse("tick 0.25"),
            Some(Command::Input(InputEvent::Tick(0.25)))
        );
        assert_eq!(Command::parse("tick"), None);
        assert_eq!(Command::parse("dance"), None);
    }

    #[test]
    fn strike_follows_phase() {
        assert_eq!(strike_for(Phase::ItemSelect), InputEvent::UseCurrentItem);
        assert_eq!(strike_for(Phase::DefenseTiming), InputEvent::ConfirmDefense);
        assert_eq!(strike_for(Phase::Defeat), InputEvent::Restart);
    }
}
