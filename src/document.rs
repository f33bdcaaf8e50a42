use crate::color::Color;
use crate::compositor;
use crate::error::{EditorError, EditorResult};
use crate::fill;
use crate::grid::Grid;
use crate::history::History;
use crate::layer::{Layer, LayerId};
use crate::persistence::{Drawing, DrawingLayer};
use crate::stroke::{Stroke, StrokeCommit};
use crate::tool::Tool;

/// Largest allowed canvas side, in cells
pub const MAX_DIMENSION: usize = 64;

/// Canvas side used for new documents
pub const DEFAULT_DIMENSION: usize = 16;

/// Per-document editing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentSettings {
    /// Maximum number of undo snapshots, unlimited when `None`
    pub history_limit: Option<usize>,
    /// Maximum number of layers, unlimited when `None`
    pub max_layers: Option<usize>,
    /// How freehand drags are recorded in history
    pub stroke_commit: StrokeCommit,
}

/// The undoable part of a layer. Visibility is view state and lives only on the live layer.
#[derive(Debug, Clone, PartialEq)]
struct LayerSnapshot {
    id: LayerId,
    name: String,
    grid: Grid,
}

type Snapshot = Vec<LayerSnapshot>;

fn validate_dimensions(width: usize, height: usize) -> EditorResult<()> {
    if (1..=MAX_DIMENSION).contains(&width) && (1..=MAX_DIMENSION).contains(&height) {
        Ok(())
    } else {
        Err(EditorError::InvalidDimensions { width, height })
    }
}

/// The drawing being edited: canvas size, layer stack, selection state and history.
///
/// Every pixel change goes through this type, so each one is recorded in the shared history
/// exactly once.
#[derive(Debug, Clone)]
pub struct Document {
    width: usize,
    height: usize,
    /// Back to front: index 0 is the bottom layer
    layers: Vec<Layer>,
    active_layer: LayerId,
    tool: Tool,
    color: Color,
    history: History<Snapshot>,
    /// Open pencil/eraser drag, if any
    stroke: Option<Stroke>,
    settings: DocumentSettings,
    /// Number used for the next "Layer N" name
    next_layer_number: usize,
}

impl Document {
    /// Creates a document with a single blank layer
    pub fn new(width: usize, height: usize) -> EditorResult<Self> {
        Self::with_settings(width, height, DocumentSettings::default())
    }

    pub fn with_settings(
        width: usize,
        height: usize,
        settings: DocumentSettings,
    ) -> EditorResult<Self> {
        validate_dimensions(width, height)?;
        let layer = Layer::new(width, height, "Layer 1");
        Ok(Self::from_layers(width, height, vec![layer], settings))
    }

    fn from_layers(
        width: usize,
        height: usize,
        layers: Vec<Layer>,
        settings: DocumentSettings,
    ) -> Self {
        let active_layer = layers.last().map(|layer| layer.id).unwrap_or_default();
        let next_layer_number = layers.len() + 1;
        let mut document = Self {
            width,
            height,
            layers,
            active_layer,
            tool: Tool::default(),
            color: Color::BLACK,
            history: History::new(Vec::new()),
            stroke: None,
            settings,
            next_layer_number,
        };
        document.history = History::with_limit(document.snapshot(), settings.history_limit);
        document
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the canvas
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    fn position_of(&self, id: LayerId) -> EditorResult<usize> {
        self.layers
            .iter()
            .position(|layer| layer.id == id)
            .ok_or(EditorError::UnknownLayer(id))
    }

    pub fn active_layer_id(&self) -> LayerId {
        self.active_layer
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layer(self.active_layer)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn settings(&self) -> DocumentSettings {
        self.settings
    }

    /// The drag currently in progress, if any
    pub fn stroke(&self) -> Option<&Stroke> {
        self.stroke.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.stroke_is_pending()
    }

    pub fn can_redo(&self) -> bool {
        !self.stroke_is_pending() && self.history.can_redo()
    }

    /// Number of history entries, including the initial state
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn stroke_is_pending(&self) -> bool {
        self.settings.stroke_commit == StrokeCommit::PerStroke
            && self.stroke.as_ref().is_some_and(|stroke| stroke.changed() > 0)
    }

    // ---- view and selection state (never recorded in history) ----

    pub fn set_tool(&mut self, tool: Tool) {
        self.end_stroke();
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.end_stroke();
        self.color = color;
    }

    pub fn set_active_layer(&mut self, id: LayerId) -> EditorResult<()> {
        self.position_of(id)?;
        self.end_stroke();
        self.active_layer = id;
        Ok(())
    }

    /// Flips a layer's visibility and returns the new value
    pub fn toggle_visibility(&mut self, id: LayerId) -> EditorResult<bool> {
        let index = self.position_of(id)?;
        let layer = &mut self.layers[index];
        layer.set_visible(!layer.visible);
        log::debug!("layer {} visible: {}", layer.name, layer.visible);
        Ok(layer.visible)
    }

    // ---- composite ----

    /// The flattened image; cells no visible layer paints are transparent
    pub fn composite(&self) -> Grid {
        compositor::composite(self.width, self.height, &self.layers)
    }

    /// The flattened image with `background` shown through transparent cells
    pub fn composite_with_background(&self, background: Color) -> Grid {
        compositor::with_background(&self.composite(), background)
    }

    // ---- pixel edits ----

    /// Applies the active tool at `index` on the active layer.
    ///
    /// Returns whether anything changed. A change is committed to history as one step; a no-op
    /// leaves history alone.
    pub fn paint_at(&mut self, index: usize) -> EditorResult<bool> {
        self.check_index(index)?;
        self.end_stroke();
        let changed = self.apply_tool(index)?;
        if changed {
            self.commit();
        }
        Ok(changed)
    }

    /// [`Self::paint_at`] addressed by column and row
    pub fn paint_at_cell(&mut self, col: usize, row: usize) -> EditorResult<bool> {
        let index = self.index_of(col, row)?;
        self.paint_at(index)
    }

    /// Index of the cell at `(col, row)`
    pub fn index_of(&self, col: usize, row: usize) -> EditorResult<usize> {
        if col < self.width && row < self.height {
            Ok(row * self.width + col)
        } else {
            Err(EditorError::OutOfRange {
                index: row.saturating_mul(self.width).saturating_add(col),
                len: self.cell_count(),
            })
        }
    }

    /// Fails without touching anything when `index` is outside the canvas
    fn check_index(&self, index: usize) -> EditorResult<()> {
        let len = self.cell_count();
        if index < len {
            Ok(())
        } else {
            Err(EditorError::OutOfRange { index, len })
        }
    }

    /// Replaces the active layer's grid with the result of the active tool. Does not commit.
    fn apply_tool(&mut self, index: usize) -> EditorResult<bool> {
        let position = self.position_of(self.active_layer)?;
        let layer = &self.layers[position];
        let paint = self.tool.paint_color(self.color);

        let grid = match self.tool {
            Tool::Fill => fill::fill_layer(layer.grid(), index, paint)?,
            Tool::Pencil | Tool::Eraser => {
                if layer.grid().get(index)? == paint {
                    return Ok(false);
                }
                layer.grid().with_cell(index, paint)?
            }
        };

        if &grid == layer.grid() {
            return Ok(false);
        }
        self.layers[position] = layer.with_grid(grid);
        Ok(true)
    }

    /// Pointer pressed on `index`.
    ///
    /// Fill applies immediately. Pencil and eraser start a stroke and paint the first cell.
    pub fn begin_stroke(&mut self, index: usize) -> EditorResult<bool> {
        self.check_index(index)?;
        self.end_stroke();
        if !self.tool.is_freehand() {
            return self.paint_at(index);
        }

        let mut stroke = Stroke::new(self.active_layer, self.tool.paint_color(self.color));
        let changed = self.stroke_cell(&mut stroke, index)?;
        self.stroke = Some(stroke);
        Ok(changed)
    }

    /// Pointer dragged onto `index` while pressed. Ignored when no stroke is open.
    pub fn continue_stroke(&mut self, index: usize) -> EditorResult<bool> {
        let Some(mut stroke) = self.stroke.take() else {
            return Ok(false);
        };
        let result = self.stroke_cell(&mut stroke, index);
        self.stroke = Some(stroke);
        result
    }

    /// Pointer released, inside or outside the canvas. Always finalizes what was painted.
    ///
    /// Returns whether the stroke changed anything.
    pub fn end_stroke(&mut self) -> bool {
        let Some(stroke) = self.stroke.take() else {
            return false;
        };
        if stroke.changed() > 0 && self.settings.stroke_commit == StrokeCommit::PerStroke {
            self.commit();
        }
        log::debug!("stroke ended, {} cells changed", stroke.changed());
        stroke.changed() > 0
    }

    fn stroke_cell(&mut self, stroke: &mut Stroke, index: usize) -> EditorResult<bool> {
        self.check_index(index)?;
        if !stroke.enter_cell(index) {
            return Ok(false);
        }

        let position = self.position_of(stroke.layer())?;
        let layer = &self.layers[position];
        if layer.grid().get(index)? == stroke.color() {
            return Ok(false);
        }

        self.layers[position] = layer.paint(index, stroke.color())?;
        stroke.record_change();
        if self.settings.stroke_commit == StrokeCommit::PerCell {
            self.commit();
        }
        Ok(true)
    }

    // ---- layers ----

    /// Appends a blank layer on top and makes it active
    pub fn add_layer(&mut self) -> EditorResult<LayerId> {
        if let Some(max) = self.settings.max_layers {
            if self.layers.len() >= max {
                return Err(EditorError::PreconditionFailed(format!(
                    "a drawing can have at most {max} layers"
                )));
            }
        }

        self.end_stroke();
        let name = format!("Layer {}", self.next_layer_number);
        self.next_layer_number += 1;
        let layer = Layer::new(self.width, self.height, &name);
        let id = layer.id;
        self.layers.push(layer);
        self.active_layer = id;
        self.commit();
        log::debug!("added {name}");
        Ok(id)
    }

    /// Removes a layer. The last remaining layer cannot be removed.
    pub fn remove_layer(&mut self, id: LayerId) -> EditorResult<()> {
        let index = self.position_of(id)?;
        if self.layers.len() == 1 {
            return Err(EditorError::LastLayer);
        }

        self.end_stroke();
        let removed = self.layers.remove(index);
        if self.active_layer == id {
            self.activate_top_layer();
        }
        self.commit();
        log::debug!("removed {}", removed.name);
        Ok(())
    }

    pub fn rename_layer(&mut self, id: LayerId, name: &str) -> EditorResult<()> {
        let index = self.position_of(id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }
        if self.layers[index].name == name {
            return Ok(());
        }

        self.end_stroke();
        self.layers[index].set_name(name.to_owned());
        self.commit();
        Ok(())
    }

    fn activate_top_layer(&mut self) {
        if let Some(top) = self.layers.last() {
            self.active_layer = top.id;
        }
    }

    // ---- history ----

    fn snapshot(&self) -> Snapshot {
        self.layers
            .iter()
            .map(|layer| LayerSnapshot {
                id: layer.id,
                name: layer.name.clone(),
                grid: layer.grid().clone(),
            })
            .collect()
    }

    fn commit(&mut self) {
        self.history.commit(self.snapshot());
        log::debug!(
            "committed history entry {} of {}",
            self.history.cursor() + 1,
            self.history.len()
        );
    }

    /// Rebuilds the live layers from a snapshot, keeping the visibility of layers that survive
    fn restore(&mut self, snapshot: Snapshot) {
        let layers = snapshot
            .into_iter()
            .map(|saved| {
                let visible = self.layer(saved.id).is_none_or(|layer| layer.visible);
                let mut layer = Layer::from_grid(&saved.name, saved.grid);
                layer.id = saved.id;
                layer.set_visible(visible);
                layer
            })
            .collect();
        self.layers = layers;

        if self.layer(self.active_layer).is_none() {
            self.activate_top_layer();
        }
    }

    /// Steps back one history entry. Returns false when already at the oldest state.
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Steps forward one history entry. Returns false when already at the newest state.
    pub fn redo(&mut self) -> bool {
        self.end_stroke();
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    // ---- canvas size ----

    /// Starts a new canvas: one blank layer at the given size and a fresh history
    pub fn reset(&mut self, width: usize, height: usize) -> EditorResult<()> {
        validate_dimensions(width, height)?;
        let layer = Layer::new(width, height, "Layer 1");
        *self = Self::from_layers(width, height, vec![layer], self.settings)
            .keeping_selection(self.tool, self.color);
        Ok(())
    }

    /// Changes the canvas size. Layers keep their id, name and visibility but start blank;
    /// pixels are not carried over. History starts fresh.
    pub fn resize(&mut self, width: usize, height: usize) -> EditorResult<()> {
        validate_dimensions(width, height)?;
        let layers = self
            .layers
            .iter()
            .map(|layer| layer.with_grid(Grid::new(width, height)))
            .collect();
        let active = self.active_layer;
        let next_layer_number = self.next_layer_number;
        *self = Self::from_layers(width, height, layers, self.settings)
            .keeping_selection(self.tool, self.color);
        self.active_layer = active;
        self.next_layer_number = next_layer_number;
        Ok(())
    }

    fn keeping_selection(mut self, tool: Tool, color: Color) -> Self {
        self.tool = tool;
        self.color = color;
        self
    }

    /// This document with the tool and color selected in `other`
    pub fn with_selection_of(self, other: &Document) -> Self {
        self.keeping_selection(other.tool, other.color)
    }

    // ---- persistence ----

    /// The saveable form of this document
    pub fn to_drawing(&self, name: &str) -> Drawing {
        Drawing {
            name: name.to_owned(),
            width: self.width,
            height: self.height,
            layers: self
                .layers
                .iter()
                .map(|layer| DrawingLayer {
                    name: layer.name.clone(),
                    pixels: layer.grid().cells().to_vec(),
                })
                .collect(),
            pixels: None,
        }
    }

    /// Validates a stored drawing and builds a document from it.
    ///
    /// Rejects bad dimensions, a missing layer list and layers whose pixel count does not
    /// match the canvas. The loaded state is the first history entry.
    pub fn from_drawing(drawing: &Drawing, settings: DocumentSettings) -> EditorResult<Self> {
        let Drawing { width, height, .. } = *drawing;
        validate_dimensions(width, height)
            .map_err(|e| EditorError::MalformedDrawing(e.to_string()))?;

        let saved_layers = drawing.layers();
        if saved_layers.is_empty() {
            return Err(EditorError::MalformedDrawing(
                "drawing has no layers".to_owned(),
            ));
        }

        let layers = saved_layers
            .into_iter()
            .enumerate()
            .map(|(i, saved)| -> EditorResult<Layer> {
                let grid = Grid::from_cells(width, height, saved.pixels).map_err(|e| {
                    EditorError::MalformedDrawing(format!("layer {}: {e}", i + 1))
                })?;
                let name = match saved.name.trim() {
                    "" => format!("Layer {}", i + 1),
                    name => name.to_owned(),
                };
                Ok(Layer::from_grid(&name, grid))
            })
            .collect::<EditorResult<Vec<_>>>()?;

        Ok(Self::from_layers(width, height, layers, settings))
    }
}

impl Default for Document {
    fn default() -> Self {
        let layer = Layer::new(DEFAULT_DIMENSION, DEFAULT_DIMENSION, "Layer 1");
        Self::from_layers(
            DEFAULT_DIMENSION,
            DEFAULT_DIMENSION,
            vec![layer],
            DocumentSettings::default(),
        )
    }
}
