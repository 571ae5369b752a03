//! Price Watch
//!
//! Keeps a price grid on screen while the auto-refresh runs. Input lines
//! switch the category (`popular`, `crypto`, `borsa`), an empty line
//! refreshes now and `q` quits. Closed input only stops the key handling;
//! the watch itself runs until `shutdown` resolves.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::dashboard::Dashboard;
use crate::models::Category;
use crate::render::Render;

const REDRAW_INTERVAL: Duration = Duration::from_millis(500);

pub async fn watch_prices<R, W, S>(
    dashboard: &Dashboard,
    render: &dyn Render,
    category: Category,
    interval: Duration,
    input: R,
    out: &mut W,
    shutdown: S,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future,
{
    let prices = dashboard.prices();
    let _ = prices.select_category(category).await;
    let refresh = prices.start_auto_refresh(interval);

    let mut lines = input.lines();
    let mut input_open = true;
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    let mut last = String::new();
    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            _ = redraw.tick() => {
                let output = {
                    let state = dashboard.state().read().await;
                    render.price_grid(&state, state.active_category)
                };
                if output != last {
                    if let Err(e) = writeln!(out, "{}", output).and_then(|_| out.flush()) {
                        break Err(e);
                    }
                    last = output;
                }
            }
            line = lines.next_line(), if input_open => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        tracing::debug!("Watch input closed");
                        input_open = false;
                        continue;
                    }
                    Err(e) => break Err(e),
                };
                let input = line.trim();
                if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
                    break Ok(());
                }
                if input.is_empty() {
                    let _ = prices.refresh_active().await;
                    continue;
                }
                match input.parse::<Category>() {
                    Ok(next) => {
                        let _ = prices.select_category(next).await;
                    }
                    Err(e) => tracing::warn!(input = %input, error = %e, "Unknown category"),
                }
            }
            _ = &mut shutdown => break Ok(()),
        }
    };

    refresh.abort();
    tracing::debug!("Price watch stopped");
    result
}
