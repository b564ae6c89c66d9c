use wasm_bindgen::prelude::*;

use rotchess_core::{
    ClickOutcome, Game, GameConfig, PieceRecord, Point, SetupMode, Skin,
};
use serde::Serialize;

/// Initialize panic hook for readable error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsPiece {
    x: f64,
    y: f64,
    angle: f64,
    preview_angle: Option<f64>,
    side: u8,
    piece: &'static str,
    asset: String,
    selected: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsClick {
    kind: &'static str,
    captured: Vec<JsCaptured>,
    promoted: bool,
    selected: usize,
}

#[derive(Serialize)]
struct JsCaptured {
    x: f64,
    y: f64,
    side: u8,
    piece: &'static str,
}

impl From<&PieceRecord> for JsCaptured {
    fn from(record: &PieceRecord) -> Self {
        Self {
            x: record.x,
            y: record.y,
            side: record.side.to_code(),
            piece: record.piece_type.name(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDial {
    visible: bool,
    confirm_visible: bool,
    cancel_visible: bool,
    center_x: f64,
    center_y: f64,
    radius: f64,
    selected_point: Option<Point>,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Rotating chess session exported to the browser front end.
#[wasm_bindgen]
pub struct RotChess {
    game: Game,
}

#[wasm_bindgen]
impl RotChess {
    /// Create a new game (0=Standard, 1=Chess960). `multiSelect` lets several pieces rotate together.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: u8, multi_select: bool) -> Result<RotChess, JsError> {
        let setup = SetupMode::from_code(mode)
            .ok_or_else(|| JsError::new("invalid mode: expected 0 or 1"))?;
        let config = GameConfig::default()
            .with_setup(setup)
            .with_multi_select(multi_select);
        Ok(Self {
            game: Game::new(config),
        })
    }

    /// Create a game from a JSON config such as `{"setup": "chess960", "collision_radius": 15}`.
    #[wasm_bindgen(js_name = "fromConfig")]
    pub fn from_config(json: &str) -> Result<RotChess, JsError> {
        let config = GameConfig::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self {
            game: Game::new(config),
        })
    }

    /// Handle a board click. Returns `{ kind, captured, promoted, selected }`
    /// where kind is "moved", "selection" or "none".
    pub fn click(&mut self, x: f64, y: f64) -> Result<JsValue, JsError> {
        let outcome = self
            .game
            .click(x, y)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let selected = self.game.board().selected().len();
        let result = match outcome {
            ClickOutcome::Moved(moved) => JsClick {
                kind: "moved",
                captured: moved.captured.iter().map(JsCaptured::from).collect(),
                promoted: moved.promoted,
                selected,
            },
            ClickOutcome::SelectionChanged { .. } => JsClick {
                kind: "selection",
                captured: Vec::new(),
                promoted: false,
                selected,
            },
            ClickOutcome::Nothing => JsClick {
                kind: "none",
                captured: Vec::new(),
                promoted: false,
                selected,
            },
        };
        to_js(&result)
    }

    /// Press or drag on the rotation dial. Returns true if the dial took the input.
    #[wasm_bindgen(js_name = "dragRotation")]
    pub fn drag_rotation(&mut self, x: f64, y: f64) -> bool {
        self.game.drag_rotation(x, y)
    }

    #[wasm_bindgen(js_name = "releaseRotation")]
    pub fn release_rotation(&mut self) {
        self.game.release_rotation();
    }

    #[wasm_bindgen(js_name = "confirmRotation")]
    pub fn confirm_rotation(&mut self) -> Result<bool, JsError> {
        self.game
            .confirm_rotation()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = "cancelRotation")]
    pub fn cancel_rotation(&mut self) -> bool {
        self.game.cancel_rotation()
    }

    pub fn first(&mut self) -> bool {
        self.game.first()
    }

    pub fn prev(&mut self) -> bool {
        self.game.prev()
    }

    pub fn next(&mut self) -> bool {
        self.game.next()
    }

    pub fn last(&mut self) -> bool {
        self.game.last()
    }

    #[wasm_bindgen(js_name = "goTo")]
    pub fn go_to(&mut self, index: usize) -> Result<bool, JsError> {
        self.game
            .go_to(index)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Fraction of the timeline up to the shown turn, for the progress bar.
    pub fn progress(&self) -> f64 {
        self.game.progress()
    }

    #[wasm_bindgen(js_name = "turnCount")]
    pub fn turn_count(&self) -> usize {
        self.game.history().len()
    }

    #[wasm_bindgen(js_name = "exportSave")]
    pub fn export_save(&self) -> Result<String, JsError> {
        self.game
            .export_save()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = "importSave")]
    pub fn import_save(&mut self, text: &str) -> Result<(), JsError> {
        self.game
            .import_save(text)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Every live piece as `{ x, y, angle, previewAngle, side, piece, asset, selected }`.
    pub fn pieces(&self) -> Result<JsValue, JsError> {
        let skin: Skin = self.game.config().skin;
        let pieces: Vec<JsPiece> = self
            .game
            .board()
            .pieces()
            .iter()
            .map(|piece| JsPiece {
                x: piece.x(),
                y: piece.y(),
                angle: piece.angle(),
                preview_angle: piece.preview_angle(),
                side: piece.side().to_code(),
                piece: piece.piece_type().name(),
                asset: piece.piece_type().asset_name(piece.side(), skin),
                selected: piece.is_selected(),
            })
            .collect();
        to_js(&pieces)
    }

    /// Capture and move points of the sole selected piece, as `[{ x, y }]`.
    #[wasm_bindgen(js_name = "reachablePoints")]
    pub fn reachable_points(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.reachable_points())
    }

    pub fn dial(&self) -> Result<JsValue, JsError> {
        let dial = self.game.dial();
        to_js(&JsDial {
            visible: dial.is_visible(),
            confirm_visible: dial.confirm_visible(),
            cancel_visible: dial.cancel_visible(),
            center_x: dial.center().x,
            center_y: dial.center().y,
            radius: dial.radius(),
            selected_point: dial.selected_point(),
        })
    }
}
