use clap::Parser;

mod app;
mod args;
mod texture;

use app::App;
use args::Args;

fn main() {
    let args = Args::parse();

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    app.run(args);
}
