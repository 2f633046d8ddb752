//! Clock demo: The main thread counts on a 20x4 "LCD" while a flush
//! actor draws it on the terminal.
//!
//! Run with `cargo run --example clock`.

use crossterm::{
    cursor,
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use dispbuff::{DisplayConfig, FlushActor, TerminalTransport};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DisplayConfig {
        flush_interval: Duration::from_millis(33),
        ..DisplayConfig::with_size(20, 4)
    };

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, terminal::Clear(terminal::ClearType::All))?;

    let buffer = Arc::new(config.shared_buffer()?);
    let transport = TerminalTransport::stdout().with_origin(2, 1);
    let actor = FlushActor::with_config(Arc::clone(&buffer), transport, &config);

    let start = Instant::now();
    for tick in 0u32..60 {
        let elapsed = start.elapsed();
        let width = usize::from(config.width);

        let title = b"  dispbuff  clock  ";
        let time = format!("t = {:>6.2}s", elapsed.as_secs_f32());
        let frame = format!("frame {tick:>4}");
        let filled = (tick as usize * width / 60).min(width);
        let bar: Vec<u8> = (0..width).map(|i| if i < filled { b'#' } else { b'.' }).collect();

        buffer.puts(0, 0, width, title);
        buffer.puts(0, 1, width, format!("{time:<20}").as_bytes());
        buffer.puts(0, 2, width, format!("{frame:<20}").as_bytes());
        buffer.puts(0, 3, width, &bar);
        buffer.swap();

        std::thread::sleep(Duration::from_millis(50));
    }

    actor.flush_now()?;
    std::thread::sleep(Duration::from_millis(100));
    let stats = actor.stats();
    actor.join();

    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    println!(
        "{} frames flushed, {} bytes, avg {}us per flush",
        stats.frames, stats.bytes_written, stats.avg_flush_us
    );
    Ok(())
}
