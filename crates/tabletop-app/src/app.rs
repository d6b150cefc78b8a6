//! Application shell: builds the demo table and replays pointer gestures.

use tabletop_core::{ConfigError, Coordinate, DragError, DropOutcome, SceneError, Stage, StageConfig};
use tabletop_render::{OutlineRenderer, Renderer, RendererError, SceneSnapshot};
use thiserror::Error;

use crate::demo::{DemoTable, Gesture, center_of};

/// Padding in pixels around the table when fitting the view.
const VIEW_PADDING: f64 = 20.0;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("Drag error: {0}")]
    Drag(#[from] DragError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Component not found: {0}")]
    MissingComponent(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Text produced by one run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub outcomes: Vec<String>,
    pub outline: String,
    pub snapshot_json: String,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.outline)?;
        writeln!(f)?;
        write!(f, "{}", self.snapshot_json)
    }
}

/// The application.
pub struct App {
    stage: Stage,
    table: DemoTable,
    renderer: OutlineRenderer,
}

impl App {
    pub fn new(config: StageConfig) -> AppResult<Self> {
        let mut stage = Stage::new(config);
        let table = DemoTable::build(&mut stage)?;
        stage.fit_view(VIEW_PADDING);
        log::debug!(
            "View fitted: offset {:?}, scale {}",
            stage.viewport().offset(),
            stage.viewport().scale()
        );
        Ok(Self {
            stage,
            table,
            renderer: OutlineRenderer::new(),
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn table(&self) -> &DemoTable {
        &self.table
    }

    /// Press, move and release along `gesture`. Returns `None` if nothing
    /// could be grabbed at the start point.
    pub fn replay(&mut self, gesture: Gesture) -> AppResult<Option<DropOutcome>> {
        let points = gesture.screen_points(&self.stage);
        let Some((press, moves)) = points.split_first() else {
            return Ok(None);
        };
        if self.stage.pointer_down(*press)?.is_none() {
            log::warn!("Nothing to grab at {}", gesture.from);
            return Ok(None);
        }
        for point in moves {
            self.stage.pointer_move(*point)?;
        }
        let release = moves.last().unwrap_or(press);
        Ok(self.stage.pointer_up(*release)?)
    }

    /// Deal the top card into the hand, the next onto the board, and drop the
    /// last one on the empty table.
    pub fn script(&self) -> AppResult<Vec<Gesture>> {
        let scene = self.stage.scene();
        let center = |id, name: &str| center_of(scene, id).ok_or_else(|| AppError::MissingComponent(name.to_string()));
        let pile = center(self.table.draw_pile, "draw pile")?;
        let hand = center(self.table.hand, "hand")?;
        let board = center(self.table.board, "board")?;
        let empty = scene
            .scene_bounds()
            .map(|bounds| Coordinate::new(bounds.x1 + 100.0, bounds.y1 + 100.0))
            .unwrap_or(pile);
        Ok(vec![Gesture::new(pile, hand), Gesture::new(pile, board), Gesture::new(pile, empty)])
    }

    /// Run the scripted gestures and report the final table.
    pub fn run(&mut self) -> AppResult<Report> {
        let mut report = Report::default();
        for gesture in self.script()? {
            let line = match self.replay(gesture)? {
                Some(outcome) => self.describe(&outcome),
                None => format!("nothing to grab at {}", gesture.from),
            };
            log::info!("{line}");
            report.outcomes.push(line);
        }

        let snapshot = SceneSnapshot::capture(self.stage.scene());
        self.renderer.render(&snapshot)?;
        log::debug!("Rendered with {} renderer", self.renderer.name());
        report.outline = self.renderer.take_output();
        report.snapshot_json = serde_json::to_string_pretty(&snapshot)?;
        Ok(report)
    }

    fn describe(&self, outcome: &DropOutcome) -> String {
        let scene = self.stage.scene();
        let name = |id| scene.get(id).map(|c| c.name().to_string()).unwrap_or_else(|| id.to_string());
        match outcome {
            DropOutcome::Committed { dragged, targets } => {
                let targets: Vec<String> = targets.iter().map(|id| name(*id)).collect();
                format!("{} dropped on {}", name(*dragged), targets.join(", "))
            }
            DropOutcome::RolledBack { dragged } => format!("{} returned to its place", name(*dragged)),
        }
    }
}
