use crate::app::App;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use slide_core::{Arrangement, Board, Transition};
use std::io;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, _term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    let n = app.dimension();
    let cell_width = (n * n).to_string().len() as u16 + 2;
    let board_width = cell_width * n as u16 + 2;
    let gap: u16 = 6;

    // Center both boards horizontally
    let total_width = board_width * 2 + gap;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y: u16 = 2;

    for (i, board) in [Board::One, Board::Two].into_iter().enumerate() {
        let x = start_x + i as u16 * (board_width + gap);
        let last = match board {
            Board::One => app.last_one,
            Board::Two => app.last_two,
        };
        render_board(stdout, app, board, last, x, start_y, cell_width)?;
    }

    let info_y = start_y + n as u16 + 6;
    render_info(stdout, app, start_x, info_y)?;
    render_controls(stdout, app, start_x, info_y + 3)?;

    execute!(stdout, ResetColor, Show)?;
    Ok(())
}

fn render_board(
    stdout: &mut io::Stdout,
    app: &App,
    board: Board,
    last: Option<Transition>,
    x: u16,
    y: u16,
    cell_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let arrangement: &Arrangement = &app.pair.board(board).arrangement;
    let n = arrangement.dimension();
    let inner = cell_width as usize * n;

    let role = if board == app.pair.lead { "lead" } else { "follower" };
    let title_color = if arrangement.is_solved() {
        theme.success
    } else {
        theme.fg
    };
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(title_color),
        Print(format!("Board {} ({})", board.number(), role))
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 1),
        SetForegroundColor(theme.border),
        Print(format!("┌{}┐", "─".repeat(inner)))
    )?;

    for row in 1..=n {
        let line_y = y + 1 + row as u16;
        execute!(
            stdout,
            MoveTo(x, line_y),
            SetForegroundColor(theme.border),
            Print("│")
        )?;

        for col in 1..=n {
            let tile = arrangement.tile_at(row, col);
            let coord = slide_core::to_linear(row, col, n);

            if tile == arrangement.empty_tile() {
                execute!(
                    stdout,
                    SetBackgroundColor(theme.empty_bg),
                    Print(" ".repeat(cell_width as usize)),
                    SetBackgroundColor(theme.bg)
                )?;
                continue;
            }

            let color = match last {
                Some(t) if t.tile == tile && t.wraps => theme.wrap,
                Some(t) if t.tile == tile => theme.slide,
                _ if tile == coord => theme.placed,
                _ => theme.misplaced,
            };
            execute!(
                stdout,
                SetForegroundColor(color),
                Print(format!("{:^width$}", tile, width = cell_width as usize))
            )?;
        }

        execute!(stdout, SetForegroundColor(theme.border), Print("│"))?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 2 + n as u16),
        SetForegroundColor(theme.border),
        Print(format!("└{}┘", "─".repeat(inner)))
    )?;

    let misplaced = arrangement
        .misplaced()
        .map_or_else(|| "-".to_string(), |m| m.to_string());
    execute!(
        stdout,
        MoveTo(x, y + 3 + n as u16),
        SetForegroundColor(theme.info),
        Print(format!(
            "misplaced {:>3}  left {:>3}",
            misplaced,
            arrangement.remaining_steps()
        ))
    )?;

    Ok(())
}

fn render_info(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let state = if app.pair.is_built() {
        ("rebuilt", theme.success)
    } else if app.paused {
        ("paused", theme.key)
    } else {
        ("rebuilding", theme.fg)
    };

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.info),
        Print(format!(
            "tick {:>4}   delta {}   in sync {}   {} ms/step   ",
            app.ticks,
            app.pair.delta,
            if app.pair.in_sync() { "yes" } else { "no" },
            app.tick_rate().as_millis()
        )),
        SetForegroundColor(state.1),
        Print(state.0)
    )?;

    if let Some(ref msg) = app.message {
        execute!(
            stdout,
            MoveTo(x, y + 1),
            SetForegroundColor(theme.fg),
            Print(msg)
        )?;
    }
    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let controls: [(&str, &str); 6] = [
        ("Space", "pause"),
        ("N", "step"),
        ("←↑↓→", "move board 1"),
        ("R", "reshuffle"),
        ("+/-", "speed"),
        ("Q", "quit"),
    ];

    execute!(stdout, MoveTo(x, y))?;
    for (key, label) in controls {
        execute!(
            stdout,
            SetForegroundColor(app.theme.key),
            Print(key),
            SetForegroundColor(app.theme.info),
            Print(format!(" {}  ", label))
        )?;
    }
    Ok(())
}
