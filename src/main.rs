#![warn(clippy::all, rust_2018_idioms)]

use pixel_paint::color::DEFAULT_PALETTE;
use pixel_paint::{CanvasPos, Color, EditorConfig, FileStore, InputEvent, PaintApp, Tool};
use pixel_paint::{CanvasMapping, EditorError, route_event};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  new W H            start a blank W x H canvas
  tool NAME          pencil, eraser or fill
  color #RRGGBB      set the active color
  palette N          pick palette color N (1-10)
  click COL ROW      apply the tool to one cell
  down/move COL ROW  press or drag the pointer over a cell
  up                 release the pointer
  undo | redo
  layer add | layer remove N | layer hide N | layer select N
  layers             list layers, top first
  show               print the canvas
  save [NAME] | load NAME | list
  quit";

/// Outcome of one shell command
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, thiserror::Error)]
enum ShellError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("{0}")]
    Usage(String),
}

fn usage(message: impl Into<String>) -> ShellError {
    ShellError::Usage(message.into())
}

fn number(arg: Option<&str>, what: &str) -> Result<usize, ShellError> {
    arg.ok_or_else(|| usage(format!("missing {what}")))?
        .parse()
        .map_err(|_| usage(format!("{what} must be a number")))
}

/// Centre of a cell in canvas pixels
fn cell_center(mapping: &CanvasMapping, col: usize, row: usize) -> CanvasPos {
    let size = mapping.pixel_size();
    CanvasPos::new(
        (col as f32 + 0.5) * size,
        (row as f32 + 0.5) * size,
    )
}

fn cell_arg(args: &[&str]) -> Result<(usize, usize), ShellError> {
    Ok((
        number(args.first().copied(), "column")?,
        number(args.get(1).copied(), "row")?,
    ))
}

/// Resolves a 1-based layer position (bottom layer is 1)
fn layer_arg(app: &PaintApp, arg: Option<&str>) -> Result<pixel_paint::LayerId, ShellError> {
    let n = number(arg, "layer number")?;
    app.document()
        .layers()
        .get(n.wrapping_sub(1))
        .map(|layer| layer.id)
        .ok_or_else(|| usage(format!("no layer {n}")))
}

fn print_canvas(app: &PaintApp) {
    for row in app.view().rows() {
        let line: Vec<String> = row.iter().map(Color::to_string).collect();
        println!("{}", line.join(" "));
    }
}

fn print_layers(app: &PaintApp) {
    let document = app.document();
    for (i, layer) in document.layers().iter().enumerate().rev() {
        let active = if layer.id == document.active_layer_id() { '*' } else { ' ' };
        let visible = if layer.visible { "" } else { " (hidden)" };
        println!("{active} {} {}{visible}", i + 1, layer.name);
    }
}

fn run_command(
    app: &mut PaintApp,
    mapping: &CanvasMapping,
    line: &str,
) -> Result<Flow, ShellError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Flow::Continue);
    };
    let args: Vec<&str> = words.collect();

    match command {
        "help" => println!("{HELP}"),
        "quit" | "exit" => return Ok(Flow::Quit),
        "new" => {
            let (width, height) = cell_arg(&args)?;
            app.new_canvas(width, height)?;
        }
        "tool" => {
            let tool: Tool = args
                .first()
                .ok_or_else(|| usage("missing tool name"))?
                .parse()
                .map_err(|e| usage(format!("{e}")))?;
            app.document_mut().set_tool(tool);
        }
        "color" => {
            let color: Color = args
                .first()
                .ok_or_else(|| usage("missing color"))?
                .parse()
                .map_err(|e| usage(format!("{e}")))?;
            app.document_mut().set_color(color);
        }
        "palette" => {
            let n = number(args.first().copied(), "palette index")?;
            let color = DEFAULT_PALETTE
                .get(n.wrapping_sub(1))
                .copied()
                .ok_or_else(|| usage(format!("palette has {} colors", DEFAULT_PALETTE.len())))?;
            app.document_mut().set_color(color);
        }
        "click" => {
            let (col, row) = cell_arg(&args)?;
            if !app.document_mut().paint_at_cell(col, row)? {
                println!("nothing changed");
            }
        }
        "down" | "move" => {
            let (col, row) = cell_arg(&args)?;
            let position = cell_center(mapping, col, row);
            let event = if command == "down" {
                InputEvent::PointerDown { position }
            } else {
                InputEvent::PointerMove {
                    position,
                    pressed: true,
                }
            };
            route_event(&event, app.document_mut(), mapping)?;
        }
        "up" => {
            route_event(&InputEvent::PointerLeave, app.document_mut(), mapping)?;
        }
        "undo" => {
            if !app.document_mut().undo() {
                println!("nothing to undo");
            }
        }
        "redo" => {
            if !app.document_mut().redo() {
                println!("nothing to redo");
            }
        }
        "layer" => match args.first().copied() {
            Some("add") => {
                app.document_mut().add_layer()?;
            }
            Some("remove") => {
                let id = layer_arg(app, args.get(1).copied())?;
                app.document_mut().remove_layer(id)?;
            }
            Some("hide") => {
                let id = layer_arg(app, args.get(1).copied())?;
                app.document_mut().toggle_visibility(id)?;
            }
            Some("select") => {
                let id = layer_arg(app, args.get(1).copied())?;
                app.document_mut().set_active_layer(id)?;
            }
            _ => return Err(usage("expected layer add|remove N|hide N|select N")),
        },
        "layers" => print_layers(app),
        "show" => print_canvas(app),
        "save" => {
            let message = match args.first() {
                Some(name) => app.save(name)?,
                None => app.save_current()?,
            };
            println!("{message}");
        }
        "load" => {
            let name = args.first().ok_or_else(|| usage("missing drawing name"))?;
            app.load(name)?;
        }
        "list" => {
            for name in app.list_drawings()? {
                println!("{name}");
            }
        }
        other => return Err(usage(format!("unknown command {other:?}, try help"))),
    }
    Ok(Flow::Continue)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EditorConfig::from_env()?;
    let store = FileStore::new(config.store_dir.clone());
    let mut app = PaintApp::new(config, Box::new(store))?;
    let mapping = CanvasMapping::default();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match run_command(&mut app, &mapping, line.trim()) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}
