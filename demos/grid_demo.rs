//! Five boxes with draggable borders, a log panel and a line editor.
//!
//! Drag a border with the mouse, or Ctrl-click / double-click it and move it
//! with the arrow keys or the wheel (Enter or Esc to finish). Type a line and
//! press Enter to log it; click the header or press F1 for a log record of
//! your own. Ctrl-L or F5 repaints, Ctrl-D quits.

use room_grid::{
    Anchor, Attr, BoxSpec, Grid, GridConfig, Key, LayoutError, LogLevel, LogWindow, Logger,
    QueueSink, Runtime, RuntimeConfig, Style, SurfaceError, TerminalGuard, WindowId,
};

const TARGET: &str = "demo";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (sink, records) = QueueSink::new();
    let logger = Logger::new(sink).with_min_level(LogLevel::Debug);
    let mut config = RuntimeConfig::default();
    config.logger = Some(logger.clone());
    config.enable_metrics();

    let mut rt = Runtime::stdio(config)?;
    let guard = TerminalGuard::enter(rt.terminal())?;

    let help = logger.clone();
    rt.hotkeys_mut().bind(Key::Function(1), move |key| {
        let _ = help.log(LogLevel::Info, TARGET, &format!("{key}: drag a border to resize"));
    });

    let root = rt.screen().root();
    let mut grid = Grid::new(&mut rt, root, GridConfig::default())?;
    let builder_logger = logger.clone();
    grid.register_builder(&mut rt, move |grid, rt| {
        build_layout(grid, rt, &builder_logger)
    })?;

    let mut panel = LogWindow::new(records, grid.find("log").unwrap_or(root));
    let outcome = run(&mut rt, &mut grid, &mut panel, &logger);
    rt.emit_metrics();
    guard.leave();
    outcome
}

fn build_layout(grid: &mut Grid, rt: &mut Runtime, logger: &Logger) -> room_grid::Result<()> {
    let header = grid.place(
        rt,
        BoxSpec::new("header", 3, 0)
            .top(Anchor::Grid)
            .left(Anchor::Grid)
            .right(Anchor::Grid),
    )?;
    let input = grid.place(
        rt,
        BoxSpec::new("input", 3, 0)
            .bottom(Anchor::Grid)
            .left(Anchor::Grid)
            .right(Anchor::Grid),
    )?;
    let side = (grid.size().width as i32 / 5).max(12);
    let nav = grid.place(
        rt,
        BoxSpec::new("nav", 0, side)
            .top2b(header)
            .bottom2t(input)
            .left(Anchor::Grid),
    )?;
    let info = grid.place(
        rt,
        BoxSpec::new("info", 0, side)
            .top2b(header)
            .bottom2t(input)
            .right(Anchor::Grid),
    )?;
    grid.place(
        rt,
        BoxSpec::new("log", 0, 0)
            .top2b(header)
            .bottom2t(input)
            .left2r(nav)
            .right2l(info),
    )?;

    label(
        rt,
        header,
        &["room_grid: drag borders, Ctrl-click + arrows, F1 help, Ctrl-D quits"],
        Style::new().attr(Attr::BOLD),
    )?;
    label(rt, nav, &["nav", "", "click the", "header"], Style::new())?;
    label(rt, info, &["info"], Style::new())?;

    let (y, x) = rt.screen().window(header)?.getbegyx();
    let (_, cols) = rt.screen().window(header)?.getmaxyx();
    let clicks = logger.clone();
    rt.mouse_handlers_mut().clear();
    rt.mouse_handlers_mut().add(y, x, cols, move |mouse| {
        let _ = clicks.log(
            LogLevel::Info,
            TARGET,
            &format!("header clicked at x={}", mouse.x),
        );
        true
    });

    grid.redraw(rt)
}

/// Write `lines` from the top of `win`, cut to the window width.
fn label(rt: &mut Runtime, win: WindowId, lines: &[&str], style: Style) -> room_grid::Result<()> {
    let window = rt.screen_mut().window_mut(win)?;
    let (rows, cols) = window.getmaxyx();
    for (y, line) in lines.iter().enumerate().take(rows as usize) {
        let text: String = line.chars().take(cols.saturating_sub(1) as usize).collect();
        window.mvaddstr(y as u16, 0, &text, style)?;
    }
    Ok(())
}

fn run(
    rt: &mut Runtime,
    grid: &mut Grid,
    panel: &mut LogWindow,
    logger: &Logger,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut count = 0usize;
    loop {
        let (Some(log), Some(input), Some(info)) =
            (grid.find("log"), grid.find("input"), grid.find("info"))
        else {
            return Err("layout is missing a box".into());
        };
        if panel.window() != log {
            panel.retarget(log);
        }
        panel.drain(rt.screen_mut())?;
        let status = format!("lines: {count}");
        label(rt, info, &["info", "", status.as_str()], Style::new())?;
        rt.screen_mut().window_mut(input)?.erase();
        grid.refresh(rt)?;

        match rt.getline(grid, input) {
            Ok(Some(line)) => {
                count += 1;
                logger.log(LogLevel::Info, TARGET, &format!("line {count}: {line}"))?;
            }
            Ok(None) => return Ok(()),
            // the terminal was resized mid-line and the boxes were rebuilt
            Err(LayoutError::Surface(SurfaceError::NoSuchWindow(_))) => continue,
            Err(err @ LayoutError::OutOfBounds { .. }) => {
                logger.log(LogLevel::Warn, TARGET, &err.to_string())?;
            }
            Err(err) => return Err(err.into()),
        }
    }
}
