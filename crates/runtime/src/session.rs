//! Session bootstrap: from a validated map to a scheduler ready to start.

use tactics_content::MapDefinition;
use tactics_core::{Faction, GameConfig, Grid, SessionState};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::scheduler::{Controller, TurnScheduler};

/// Assembles a [`TurnScheduler`] for one skirmish.
///
/// Each faction's squad takes the first `squad_size` walkable tiles of its
/// spawn zone (row-major), player squad first. A zone that cannot hold the
/// whole squad aborts the build; no partial session is ever returned.
///
/// ```rust,ignore
/// let scheduler = SessionBuilder::new(config)
///     .map(&definition)?
///     .seed(7)
///     .controller(Faction::Player, Controller::Human)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    config: GameConfig,
    grid: Option<Grid>,
    seed: u64,
    controllers: Vec<(Faction, Controller)>,
}

impl SessionBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            grid: None,
            seed: 0,
            controllers: Vec::new(),
        }
    }

    /// Builds the board from a map definition, validating it against the
    /// configured bounds.
    pub fn map(mut self, definition: &MapDefinition) -> Result<Self> {
        let grid = definition.build_grid(&self.config.map_bounds)?;
        debug!(map = %definition.name, width = grid.width(), height = grid.height(), "board built");
        self.grid = Some(grid);
        Ok(self)
    }

    /// Uses an already built board.
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn controller(mut self, faction: Faction, controller: Controller) -> Self {
        self.controllers.push((faction, controller));
        self
    }

    pub fn build(self) -> Result<TurnScheduler> {
        let grid = self.grid.ok_or(RuntimeError::MissingSession)?;
        let mut state = SessionState::new(grid);
        let required = self.config.squad_size;

        for faction in Faction::ALL {
            let tiles: Vec<_> = state
                .grid
                .spawn_tiles(faction)
                .into_iter()
                .filter(|&position| state.grid.is_walkable(position))
                .collect();
            if tiles.len() < required {
                return Err(RuntimeError::SpawnZoneTooSmall {
                    faction,
                    available: tiles.len(),
                    required,
                });
            }
            for position in tiles.into_iter().take(required) {
                state.spawn_unit(faction, position, &self.config.unit)?;
            }
        }

        info!(
            seed = self.seed,
            squad_size = required,
            width = state.grid.width(),
            height = state.grid.height(),
            "session assembled"
        );

        let mut scheduler = TurnScheduler::new(state, self.config, self.seed);
        for (faction, controller) in self.controllers {
            scheduler = scheduler.with_controller(faction, controller);
        }
        Ok(scheduler)
    }
}
