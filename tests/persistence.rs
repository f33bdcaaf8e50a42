use pixel_paint::persistence::DrawingLayer;
use pixel_paint::{
    Color, Drawing, DrawingStore, EditorConfig, EditorError, FileStore, MemoryStore, PaintApp,
    Tool,
};

fn file_app(dir: &std::path::Path) -> PaintApp {
    let config = EditorConfig {
        store_dir: dir.to_owned(),
        default_width: 4,
        default_height: 4,
        ..Default::default()
    };
    let store = FileStore::new(config.store_dir.clone());
    PaintApp::new(config, Box::new(store)).unwrap()
}

#[test]
fn test_save_and_load_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = file_app(dir.path());

    app.document_mut().set_color(Color::RED);
    app.document_mut().paint_at(5).unwrap();
    let top = app.document_mut().add_layer().unwrap();
    app.document_mut().set_color(Color::BLUE);
    app.document_mut().paint_at(6).unwrap();
    app.document_mut().rename_layer(top, "Ink").unwrap();
    let expected = app.document().composite();

    app.save("robot").unwrap();
    assert!(dir.path().join("robot.json").exists());

    app.new_canvas(8, 8).unwrap();
    app.load("robot").unwrap();

    let doc = app.document();
    assert_eq!((doc.width(), doc.height()), (4, 4));
    assert_eq!(doc.layers().len(), 2);
    assert_eq!(doc.layers()[1].name, "Ink");
    assert_eq!(doc.composite(), expected);
    assert_eq!(app.list_drawings().unwrap(), vec!["robot"]);
}

#[test]
fn test_save_current_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = file_app(dir.path());
    app.save("sketch").unwrap();
    app.document_mut().paint_at(0).unwrap();
    app.save_current().unwrap();

    app.load("sketch").unwrap();
    assert_eq!(app.document().composite().get(0), Ok(Color::BLACK));
    assert_eq!(app.list_drawings().unwrap().len(), 1);
}

#[test]
fn test_malformed_drawing_keeps_open_document() {
    let store = MemoryStore::new();
    store
        .save_drawing(&Drawing {
            name: "broken".to_owned(),
            width: 2,
            height: 2,
            layers: vec![DrawingLayer {
                name: "Layer 1".to_owned(),
                pixels: vec![Color::RED; 3],
            }],
            pixels: None,
        })
        .unwrap();

    let mut app = PaintApp::new(EditorConfig::default(), Box::new(store)).unwrap();
    app.document_mut().set_tool(Tool::Pencil);
    app.document_mut().paint_at(0).unwrap();

    let err = app.load("broken").unwrap_err();
    assert!(matches!(err, EditorError::MalformedDrawing(_)));
    assert_eq!(app.document().width(), 16);
    assert_eq!(app.document().composite().get(0), Ok(Color::BLACK));
    assert!(app.document().can_undo());
    assert!(app.drawing_name().is_none());
}

#[test]
fn test_legacy_single_layer_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("old.json"),
        r##"{"name": "old", "width": 2, "height": 1, "pixels": ["#FF0000", "#FFFFFF"]}"##,
    )
    .unwrap();

    let mut app = file_app(dir.path());
    app.load("old").unwrap();
    let doc = app.document();
    assert_eq!(doc.layers().len(), 1);
    assert_eq!(doc.layers()[0].name, "Layer 1");
    assert_eq!(doc.composite().cells(), &[Color::RED, Color::WHITE]);
}

#[test]
fn test_corrupt_file_is_a_store_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("junk.json"), "not json").unwrap();
    let mut app = file_app(dir.path());
    let err = app.load("junk").unwrap_err();
    assert!(matches!(err, EditorError::PersistenceUnavailable(_)));
    assert!(!err.is_precondition());
}

#[test]
fn test_bad_pixel_value_is_a_malformed_drawing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pink.json"),
        r#"{"name": "pink", "width": 1, "height": 1, "layers": [{"name": "L", "pixels": ["pink"]}]}"#,
    )
    .unwrap();

    let mut app = file_app(dir.path());
    app.document_mut().paint_at(0).unwrap();
    let err = app.load("pink").unwrap_err();
    assert!(matches!(err, EditorError::MalformedDrawing(_)));
    assert!(err.is_precondition());
    assert_eq!(app.document().composite().get(0), Ok(Color::BLACK));
}

#[test]
fn test_bad_names_in_store_directory_are_not_listed() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = file_app(dir.path());
    app.save("good").unwrap();
    std::fs::write(dir.path().join(".hidden.json"), "{}").unwrap();
    std::fs::write(dir.path().join("trailing .json"), "{}").unwrap();

    assert_eq!(app.list_drawings().unwrap(), vec!["good"]);
}
