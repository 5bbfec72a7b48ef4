//! Async event-stream loop
//!
//! Reads client lines from any async reader and writes server lines to any
//! async writer, ticking the engine at a fixed timestep in between. The binary
//! wires it to stdin/stdout; tests use in-memory buffers.

use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::engine::{BoardEngine, EngineConfig, EngineStats};
use crate::protocol::{encode_server_message, ServerMessage};
use crate::session::Session;
use crate::types::TICK_MS;

async fn write_messages<W>(out: &mut W, msgs: &[ServerMessage]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    if msgs.is_empty() {
        return Ok(());
    }
    for msg in msgs {
        let line = encode_server_message(msg)?;
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.flush().await?;
    Ok(())
}

/// Run one session until the input reaches EOF.
///
/// A cascade still running at EOF is resolved without pauses before the final
/// `bye` line is written.
pub async fn run_session<I, O>(config: EngineConfig, input: I, mut output: O) -> Result<EngineStats>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let engine = BoardEngine::new(&config)?;
    let mut session = Session::new(engine, config);
    write_messages(&mut output, &session.start()).await?;
    info!(
        rows = session.engine().grid().rows(),
        columns = session.engine().grid().columns(),
        "session started"
    );

    let mut lines = input.lines();
    let mut ticker = time::interval(Duration::from_millis(TICK_MS as u64));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        let msgs = session.handle_line(&line);
                        write_messages(&mut output, &msgs).await?;
                    }
                    None => {
                        debug!("input closed");
                        break;
                    }
                }
            }
            _ = ticker.tick() => {
                let elapsed = last_tick.elapsed().as_millis().min(u32::MAX as u128) as u32;
                last_tick = Instant::now();
                let msgs = session.tick(elapsed);
                write_messages(&mut output, &msgs).await?;
            }
        }
    }

    write_messages(&mut output, &session.finish()).await?;
    let stats = session.engine().stats();
    info!(?stats, level = session.engine().level(), "session finished");
    Ok(stats)
}
