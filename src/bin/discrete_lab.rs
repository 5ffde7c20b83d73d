use clap::Parser;
use discrete_lab::{about, app, logging};
use eframe::{NativeOptions, egui};

#[derive(Parser, Debug)]
#[command(name = "discrete_lab", version = about::DISCRETE_DISPLAY_VERSION)]
#[command(about = "Interactive explorer for number bases, sets, searching and sorting")]
struct Args {
    /// Settings file read at start-up and written when settings change
    #[arg(long, default_value = ".discrete_lab_state.json")]
    state: String,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Discrete Lab",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(app::DiscreteLabApp::new_with_settings(Some(
                args.state.as_str(),
            ))))
        }),
    )
}
