use std::future::Future;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use chrono_tz::Tz;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::cli::{Args, Command};
use crate::components::{render_dashboard, RenderOptions};
use crate::models::EnergyReading;
use crate::state::{DashboardState, FetchTicket};

type FetchResult = (FetchTicket, Result<Vec<EnergyReading>, ApiError>);

pub fn render_options(args: &Args) -> anyhow::Result<RenderOptions> {
    let timezone = args
        .timezone
        .parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("unknown timezone '{}': {}", args.timezone, e))?;

    Ok(RenderOptions {
        timezone,
        locale: args.locale,
        currency: args.currency.clone(),
        ..Default::default()
    })
}

/// Fetch the selected view once and return the rendered dashboard. A failed
/// fetch is rendered like any other state: empty data plus the error line.
pub async fn render_once(client: &ApiClient, args: &Args) -> anyhow::Result<String> {
    let options = render_options(args)?;
    let mut state = DashboardState::new(args.view);
    let ticket = state.refresh();

    let result = client.get_energy_usage(ticket.granularity).await;
    state.apply(ticket, result);

    Ok(render_dashboard(&state, &options))
}

/// Interactive dashboard on the process stdin, until `q`, EOF or Ctrl+C.
pub async fn run(client: ApiClient, args: Args) -> anyhow::Result<()> {
    let lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
    run_with(client, args, lines, ctrl_c()).await
}

/// Tab switches and refreshes each spawn a fetch; results come back over a
/// channel and only the newest one is shown. Returns once `shutdown`
/// resolves, a quit command arrives, or input ends with no refresh timer.
pub async fn run_with<F>(
    client: ApiClient,
    args: Args,
    mut lines: mpsc::Receiver<String>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let options = render_options(&args)?;
    let mut state = DashboardState::new(args.view);
    let (tx, mut rx) = mpsc::channel::<FetchResult>(16);

    let mut ticker = args.refresh_secs.filter(|s| *s > 0).map(|secs| {
        let mut ticker = interval(Duration::from_secs(secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });
    if let Some(ticker) = ticker.as_mut() {
        // The first tick fires immediately; the initial fetch already covers it
        ticker.tick().await;
    }

    tokio::pin!(shutdown);
    let mut input_open = true;

    spawn_fetch(&client, state.refresh(), tx.clone());
    draw(&state, &options);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, exiting");
                break;
            }
            Some((ticket, result)) = rx.recv() => {
                if state.apply(ticket, result) {
                    draw(&state, &options);
                }
            }
            line = lines.recv(), if input_open => {
                match line {
                    Some(line) => match Command::parse(&line) {
                        Some(Command::Show(tab)) => {
                            spawn_fetch(&client, state.select(tab), tx.clone());
                            draw(&state, &options);
                        }
                        Some(Command::Refresh) => {
                            spawn_fetch(&client, state.refresh(), tx.clone());
                            draw(&state, &options);
                        }
                        Some(Command::Quit) => break,
                        None => warn!(input = %line.trim(), "Unknown command"),
                    },
                    None => {
                        input_open = false;
                        if ticker.is_none() {
                            break;
                        }
                    }
                }
            }
            _ = next_tick(&mut ticker) => {
                spawn_fetch(&client, state.refresh(), tx.clone());
            }
        }
    }

    Ok(())
}

/// Reads lines on a plain OS thread and forwards them over a channel. The
/// thread is never joined; a read blocked on it must not hold up exit.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });
    rx
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

fn spawn_fetch(client: &ApiClient, ticket: FetchTicket, tx: mpsc::Sender<FetchResult>) {
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.get_energy_usage(ticket.granularity).await;
        // The receiver is gone once the dashboard has exited
        let _ = tx.send((ticket, result)).await;
    });
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn draw(state: &DashboardState, options: &RenderOptions) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "\x1b[2J\x1b[H{}", render_dashboard(state, options));
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_render_options_from_args() {
        let args = Args::try_parse_from([
            "energy-monitor",
            "--timezone",
            "Europe/Berlin",
            "--currency",
            "EUR",
        ])
        .unwrap();
        let options = render_options(&args).unwrap();

        assert_eq!(options.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(options.currency, "EUR");
    }

    fn offline_args() -> Args {
        Args::try_parse_from(["energy-monitor", "--api-url", "http://127.0.0.1:1"]).unwrap()
    }

    #[test]
    fn test_line_reader_forwards_lines_then_closes() {
        let mut lines = spawn_line_reader(std::io::Cursor::new("d\nm\n"));

        assert_eq!(lines.blocking_recv().as_deref(), Some("d"));
        assert_eq!(lines.blocking_recv().as_deref(), Some("m"));
        assert_eq!(lines.blocking_recv(), None);
    }

    #[tokio::test]
    async fn test_shutdown_exits_while_input_stays_open() {
        let args = offline_args();
        let client = ApiClient::new(&args.api_url).unwrap();
        // Sender kept alive: input neither delivers a line nor reaches EOF
        let (_input_tx, input_rx) = mpsc::channel::<String>(1);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            run_with(client, args, input_rx, async {}),
        )
        .await;

        assert!(matches!(result, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_quit_command_exits() {
        let args = offline_args();
        let client = ApiClient::new(&args.api_url).unwrap();
        let (input_tx, input_rx) = mpsc::channel::<String>(1);
        input_tx.send("q".to_string()).await.unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            run_with(client, args, input_rx, std::future::pending::<()>()),
        )
        .await;

        assert!(matches!(result, Ok(Ok(()))));
    }

    #[test]
    fn test_render_options_rejects_unknown_timezone() {
        let args = Args::try_parse_from(["energy-monitor", "--timezone", "Atlantis/Central"])
            .unwrap();
        assert!(render_options(&args).is_err());
    }
}
