use std::time::Duration;

use stride::{
    PlayerLayer,
    demo::{self, ReportLayer, ScriptedInputLayer},
    prelude::*,
};
use stride_engine::{ApplicationBuilder, layers::InputLayer};

const FRAME_RATE: u32 = 60;
const DEMO_SECONDS: u64 = 5;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_module("stride", log::LevelFilter::Debug)
        .filter_module("stride_engine", log::LevelFilter::Info)
        .init();

    let mut app = ApplicationBuilder::new()
        .add_layer(|context| {
            let layer = ScriptedInputLayer::new(context, demo::default_script())?;
            Ok(Box::new(layer) as Box<dyn Layer>)
        })
        .add_layer(|context| Ok(Box::new(InputLayer::new(context)?) as Box<dyn Layer>))
        .add_layer(|context| Ok(Box::new(PlayerLayer::new(context)?) as Box<dyn Layer>))
        .add_layer(|_context| Ok(Box::new(ReportLayer::new(FRAME_RATE as u64)) as Box<dyn Layer>))
        .build();

    app.spawn("Camera", Camera::main())?;
    app.spawn(
        "Player",
        (
            Transform::from_position(Point3::new(0.0, 1.0, 0.0)),
            CapsuleController::new(2.0, 0.5),
            LocomotionSettings::default(),
        ),
    )?;

    app.start()?;
    app.run_for(
        DEMO_SECONDS * FRAME_RATE as u64,
        Duration::from_secs_f64(1.0 / FRAME_RATE as f64),
    )?;
    app.shutdown();

    Ok(())
}
