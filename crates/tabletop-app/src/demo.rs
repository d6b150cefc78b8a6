//! Demo table: a draw pile, a hand and a board grid.

use std::rc::Rc;

use kurbo::Point;
use tabletop_core::{
    Alignment, Component, ComponentId, Coordinate, DragEvent, DropEvent, GridPane, LinearLayout, Orientation,
    Scene, SceneResult, Stage,
};

const CARD_WIDTH: f64 = 50.0;
const CARD_HEIGHT: f64 = 80.0;
const CARD_COUNT: usize = 3;

/// Ids of the demo table's containers and cards.
#[derive(Debug, Clone)]
pub struct DemoTable {
    pub draw_pile: ComponentId,
    pub hand: ComponentId,
    pub board: ComponentId,
    /// Bottom to top of the draw pile.
    pub cards: Vec<ComponentId>,
}

impl DemoTable {
    /// Build the table inside `stage`'s scene.
    pub fn build(stage: &mut Stage) -> SceneResult<Self> {
        let scene = stage.scene_mut();

        let draw_pile = scene.spawn_root(
            Component::card_stack(CARD_WIDTH + 10.0, CARD_HEIGHT + 10.0, Alignment::Center)
                .named("draw pile")
                .at(20.0, 20.0),
        )?;

        let hand = scene.spawn_root(
            Component::linear_layout(
                3.0 * CARD_WIDTH,
                CARD_HEIGHT,
                LinearLayout::new(8.0, Orientation::Horizontal, Alignment::CenterLeft),
            )
            .named("hand")
            .at(120.0, 25.0),
        )?;
        let hand_handlers = scene.component_mut(hand)?.handlers_mut();
        hand_handlers.drop_acceptor = Some(Rc::new(move |scene: &Scene, event: &DragEvent| {
            scene.parent(event.dragged) != Some(hand)
        }));
        hand_handlers.on_drag_dropped = Some(Rc::new(move |scene: &mut Scene, event: &DragEvent| {
            take_into_hand(scene, hand, event.dragged)
        }));

        let board = scene.spawn_root(Component::grid_pane(GridPane::new(3, 2, 4.0)?).named("board").at(20.0, 140.0))?;
        scene.update_grid(board, |grid| {
            grid.fill_column_widths(CARD_WIDTH + 10.0)?;
            grid.fill_row_heights(CARD_HEIGHT + 10.0)
        })?;
        let board_handlers = scene.component_mut(board)?.handlers_mut();
        board_handlers.drop_acceptor = Some(Rc::new(move |scene: &Scene, _: &DragEvent| {
            first_free_cell(scene, board).is_some()
        }));
        board_handlers.on_drag_dropped = Some(Rc::new(move |scene: &mut Scene, event: &DragEvent| {
            place_on_board(scene, board, event.dragged)
        }));

        let mut cards = Vec::with_capacity(CARD_COUNT);
        for index in 0..CARD_COUNT {
            let card = scene.insert(
                Component::leaf(CARD_WIDTH, CARD_HEIGHT)
                    .named(format!("card {}", index + 1))
                    .draggable()
                    .on_drag_gesture_ended(|scene: &mut Scene, event: &DropEvent, accepted: bool| {
                        let name = scene.get(event.dragged).map(|card| card.name().to_string());
                        log::info!(
                            "{} released, accepted: {accepted}, targets: {}",
                            name.unwrap_or_default(),
                            event.targets.len()
                        );
                    }),
            )?;
            scene.push(draw_pile, card)?;
            cards.push(card);
        }

        Ok(Self {
            draw_pile,
            hand,
            board,
            cards,
        })
    }
}

fn take_into_hand(scene: &mut Scene, hand: ComponentId, card: ComponentId) {
    let result = scene.detach(card).and_then(|_| scene.add_child(hand, card));
    if let Err(err) = result {
        log::warn!("Could not move {card} into the hand: {err}");
    }
}

fn first_free_cell(scene: &Scene, board: ComponentId) -> Option<(usize, usize)> {
    let pane = scene.grid_pane(board).ok()?;
    pane.grid()
        .iter()
        .find(|cell| cell.occupant.is_none())
        .map(|cell| (cell.column, cell.row))
}

fn place_on_board(scene: &mut Scene, board: ComponentId, card: ComponentId) {
    let Some((column, row)) = first_free_cell(scene, board) else {
        log::warn!("Board is full");
        return;
    };
    let result = scene
        .detach(card)
        .and_then(|_| scene.set_position(card, Coordinate::ORIGIN))
        .and_then(|_| scene.set_cell(board, column, row, Some(card)));
    if let Err(err) = result {
        log::warn!("Could not place {card} on the board: {err}");
    }
}

/// A scripted pointer gesture in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub from: Coordinate,
    pub to: Coordinate,
    /// Intermediate pointer moves between press and release.
    pub steps: usize,
}

impl Gesture {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self { from, to, steps: 4 }
    }

    /// Screen points for press, each move and release.
    pub fn screen_points(&self, stage: &Stage) -> Vec<Point> {
        let steps = self.steps.max(1);
        (0..=steps)
            .map(|step| {
                let t = step as f64 / steps as f64;
                let scene_point = self.from + (self.to - self.from) * t;
                stage.viewport().scene_to_screen(scene_point)
            })
            .collect()
    }
}

/// Scene-space center of a component.
pub fn center_of(scene: &Scene, id: ComponentId) -> Option<Coordinate> {
    let component = scene.get(id)?;
    scene.local_to_scene(id, Coordinate::new(component.width() / 2.0, component.height() / 2.0))
}
