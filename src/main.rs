use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use ticktop::app::App;
use ticktop::config::{self, load_config, load_config_from_path};
use ticktop::event::{Event, EventHandler};
use ticktop::{action, ui};

#[derive(Parser)]
#[command(
    name = "ticktop",
    about = "Terminal process monitor driven by /proc tick-counter deltas"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Delay between the paired counter reads, in milliseconds (50ms floor)
    #[arg(long)]
    sample_delay: Option<u64>,

    /// Sort mode: cpu, memory, pid
    #[arg(long)]
    sort: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "sample-tracing")]
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms);
    let mut app = App::new(config);
    let mut events = EventHandler::new(tick_rate);

    app.refresh_data().await;
    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            let mut should_draw = false;
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        if action == action::Action::Refresh {
                            app.refresh_data().await;
                        } else {
                            app.dispatch(action);
                        }
                        should_draw = true;
                    }
                }
                Event::Tick => {
                    if !app.paused {
                        app.refresh_data().await;
                        should_draw = true;
                    }
                }
                Event::Resize => {
                    should_draw = true;
                }
            }
            if should_draw {
                terminal.draw(|frame| ui::draw(frame, &mut app))?;
            }
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(delay) = cli.sample_delay {
        config.general.sample_delay_ms = delay;
    }
    if let Some(ref sort) = cli.sort {
        config.general.default_sort = sort.clone();
    }

    config
}
