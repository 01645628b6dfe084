//! Example: walk through every mode and state on a mock surface.
//!
//! Run with: `cargo run --example cycle_modes`

use diyha_matrix_core::{
    Color, DisplayEngine, Dispatcher, EngineConfig, MatrixError, MockSurface, TopicRouter,
};

fn print_frame(label: &str, mock: &MockSurface) {
    let state = mock.state();
    println!("{label} (brightness {:.1})", state.brightness);
    for y in 0..8 {
        let row: String = (0..8)
            .map(|x| match state.cells[x][y] {
                Color::Off => '.',
                Color::Green => 'G',
                Color::Red => 'R',
                Color::Yellow => 'Y',
            })
            .collect();
        println!("  {row}");
    }
}

fn main() -> Result<(), MatrixError> {
    // Initialize logging (optional)
    env_logger::init();

    let mock = MockSurface::new();
    let mut engine = DisplayEngine::new(mock.clone(), EngineConfig::immediate());
    let dispatcher = Dispatcher::new(TopicRouter::new("diy"), engine.handle());

    let script: [(&str, &[u8]); 8] = [
        ("diy/system/demo", b"ON"),
        ("diy/system/fire", b"ON"),
        ("diy/system/fire", b"OFF"),
        ("diy/system/panic", b"ON"),
        ("diy/system/panic", b"OFF"),
        ("diy/system/silent", b"ON"),
        ("diy/system/security", b"ON"),
        ("diy/system/security", b"OFF"),
    ];

    for (topic, payload) in script {
        dispatcher.handle(topic, payload);
        for frame in 0..3 {
            engine.step()?;
            print_frame(
                &format!("{topic} {} #{frame}", String::from_utf8_lossy(payload)),
                &mock,
            );
        }
    }

    // Inject faults until the render loop gives up.
    mock.fail_next(usize::MAX);
    match engine.run() {
        Ok(never) => match never {},
        Err(err) => println!("render loop stopped: {err}"),
    }

    Ok(())
}
