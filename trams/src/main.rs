use clap::Parser;
use trams::app::TramsApp;

fn main() {
    env_logger::init();
    let args = TramsApp::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("trams failed: {e}");
            std::process::exit(1);
        }
    }
}
