//! Level definitions and the catalog that looks them up by name.
//!
//! A level is a sparse list of placed cells on an otherwise empty grid.
//! Positions a level does not mention are `Empty`.

use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, Coordinate, EngineConfig, EngineResult, Grid};
use crate::engine::Game;

/// A cell placed at a grid position.
///
/// Serialises flat, e.g. `{"type":"Rock","row":3,"col":3}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDefinition {
    #[serde(flatten)]
    pub cell: Cell,
    pub row: usize,
    pub col: usize,
}

impl CellDefinition {
    #[must_use]
    pub fn new(row: usize, col: usize, cell: Cell) -> Self {
        Self { cell, row, col }
    }

    /// Place `cell` at `coord`.
    #[must_use]
    pub fn at(coord: Coordinate, cell: Cell) -> Self {
        Self::new(coord.row, coord.col, cell)
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.row, self.col)
    }
}

/// A single puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub name: String,
    pub difficulty: u32,
    pub cells: Vec<CellDefinition>,
}

impl Puzzle {
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty: u32) -> Self {
        Self {
            name: name.into(),
            difficulty,
            cells: Vec::new(),
        }
    }

    /// Place a fixed cell.
    #[must_use]
    pub fn with_cell(mut self, row: usize, col: usize, cell: Cell) -> Self {
        self.cells.push(CellDefinition::new(row, col, cell));
        self
    }

    /// Build a stopped engine for this puzzle.
    pub fn build(&self, config: &EngineConfig) -> EngineResult<Game> {
        build_game(&self.name, &self.cells, config)
    }
}

/// Named group of puzzles, shown together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u32>,
    pub puzzles: Vec<Puzzle>,
}

impl PuzzleGroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            difficulty: None,
            puzzles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn with_puzzle(mut self, puzzle: Puzzle) -> Self {
        self.puzzles.push(puzzle);
        self
    }
}

/// Build a stopped engine from a sparse cell list.
///
/// The grid is `default_height × default_width` cells of `Empty`. Cells are
/// placed in order, so a later definition at the same position wins.
///
/// ```
/// use railmix::core::{Cell, Coordinate, EngineConfig};
/// use railmix::levels::{build_game, CellDefinition};
///
/// let cells = [CellDefinition::new(3, 3, Cell::Rock)];
/// let game = build_game("rocky", &cells, &EngineConfig::default()).unwrap();
/// assert_eq!(game.grid().get(Coordinate::new(3, 3)), Some(&Cell::Rock));
/// assert_eq!(game.grid().height(), 7);
/// ```
pub fn build_game(
    level: &str,
    cells: &[CellDefinition],
    config: &EngineConfig,
) -> EngineResult<Game> {
    let mut grid = Grid::empty(config.default_height, config.default_width)?;
    for def in cells {
        grid = grid.with_cell(def.coordinate(), def.cell.clone())?;
    }
    Ok(Game::with_config(level, grid, config))
}

/// Registry of puzzles, grouped, looked up by name.
///
/// ## Example
///
/// ```
/// use railmix::core::{Cell, Color, Edge};
/// use railmix::levels::{LevelCatalog, Puzzle, PuzzleGroup};
///
/// let mut catalog = LevelCatalog::new();
/// catalog.register(PuzzleGroup::new("Intro").with_puzzle(
///     Puzzle::new("Red Line", 1)
///         .with_cell(3, 1, Cell::source(Edge::Right, [Color::Red]))
///         .with_cell(3, 5, Cell::target(Edge::Left, [Color::Red])),
/// ));
///
/// assert_eq!(catalog.get("Red Line").unwrap().difficulty, 1);
/// assert_eq!(catalog.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LevelCatalog {
    groups: Vec<PuzzleGroup>,
    by_name: FxHashMap<String, (usize, usize)>,
}

impl LevelCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding `groups` in order.
    pub fn from_groups(groups: impl IntoIterator<Item = PuzzleGroup>) -> Self {
        let mut catalog = Self::new();
        for group in groups {
            catalog.register(group);
        }
        catalog
    }

    /// Parse a JSON array of puzzle groups.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let groups: Vec<PuzzleGroup> = serde_json::from_str(json)?;
        Ok(Self::from_groups(groups))
    }

    /// Add a group of puzzles.
    ///
    /// If a name is already taken, the earlier puzzle stays the one found by
    /// [`LevelCatalog::get`].
    pub fn register(&mut self, group: PuzzleGroup) {
        let group_index = self.groups.len();
        for (puzzle_index, puzzle) in group.puzzles.iter().enumerate() {
            if self.by_name.contains_key(&puzzle.name) {
                warn!("level '{}' registered twice; keeping first", puzzle.name);
                continue;
            }
            self.by_name.insert(puzzle.name.clone(), (group_index, puzzle_index));
        }
        self.groups.push(group);
    }

    /// Look up a puzzle by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Puzzle> {
        let &(group, puzzle) = self.by_name.get(name)?;
        self.groups.get(group)?.puzzles.get(puzzle)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Groups in registration order.
    #[must_use]
    pub fn groups(&self) -> &[PuzzleGroup] {
        &self.groups
    }

    /// Every puzzle, group by group.
    pub fn puzzles(&self) -> impl Iterator<Item = &Puzzle> {
        self.groups.iter().flat_map(|g| g.puzzles.iter())
    }

    /// Find puzzles matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Puzzle>
    where
        F: Fn(&Puzzle) -> bool,
    {
        self.puzzles().filter(move |p| predicate(p))
    }

    /// Number of distinct puzzle names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
