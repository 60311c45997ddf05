//! Fixed command script that plays the player squad through the handle.
//!
//! Each activation shoots or strikes the weakest enemy it can, then goes on
//! overwatch, falling back to ending the activation. The script never moves;
//! it only exercises the command surface the way an interactive client would.

use anyhow::Result;
use tactics_core::{Faction, Position};
use tactics_runtime::{ActionKind, Command, CommandOutcome, RuntimeHandle};
use tracing::debug;

/// Plays the activation the session is currently waiting on.
pub async fn play_activation(handle: &RuntimeHandle) -> Result<()> {
    let snapshot = handle.snapshot().await?;
    let Some(unit) = snapshot.active_unit else {
        return Ok(());
    };

    let mut enemies: Vec<(u32, Position)> = snapshot
        .state
        .living(Faction::Enemy)
        .map(|enemy| (enemy.hp, enemy.position))
        .collect();
    enemies.sort_unstable_by_key(|(hp, _)| *hp);

    send(handle, Command::SelectUnit(unit)).await?;

    for action in [ActionKind::Shoot, ActionKind::Melee] {
        if !send(handle, Command::RequestAction(action)).await?.is_accepted() {
            continue;
        }
        let mut fired = false;
        for (_, position) in &enemies {
            if send(handle, Command::RequestTarget(*position)).await?.is_accepted() {
                fired = true;
                break;
            }
        }
        if !fired {
            send(handle, Command::Cancel).await?;
        }
    }

    if !send(handle, Command::RequestAction(ActionKind::Overwatch))
        .await?
        .is_accepted()
    {
        send(handle, Command::RequestAction(ActionKind::EndTurn)).await?;
    }
    Ok(())
}

async fn send(handle: &RuntimeHandle, command: Command) -> Result<CommandOutcome> {
    let outcome = handle.submit(command).await?;
    debug!(?command, ?outcome, "scripted command");
    Ok(outcome)
}
