//! Trace replay entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting EdgeResize replay");

    let trace = match std::env::args().nth(1) {
        Some(path) => match edgeresize_app::load_trace(&path) {
            Ok(trace) => trace,
            Err(err) => {
                log::error!("{}", err);
                std::process::exit(1);
            }
        },
        None => {
            log::info!("No trace given, replaying the built-in right-edge drag");
            edgeresize_app::sample_trace()
        }
    };

    match edgeresize_app::replay(&trace) {
        Ok(snapshots) => match serde_json::to_string_pretty(&snapshots) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                log::error!("Failed to encode snapshots: {}", err);
                std::process::exit(1);
            }
        },
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
