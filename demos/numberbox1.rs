//!
//! Shows the number boxes of a small patch.
//!
//! Up/Down change the selected box, Tab selects the next one,
//! Ctrl-Q quits.
//!

use anyhow::anyhow;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, error};
use rat_numberbox::gui::Gui;
use rat_numberbox::numberbox::{Numberbox, NumberboxState};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{StatefulWidget, Widget};
use ratatui::Terminal;
use std::fs;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::time::Duration;

const PATCH: &str = "\
#N canvas 0 50 450 300 12;
#X floatatom 14 14 5 0 0 1 freq - freq-out;
#X floatatom 14 56 8 0 127 1 cutoff cut-in cut-out;
#X floatatom 14 98 3 0 0 1 narrow - -;
#X floatatom 14 140 0 -1 1 3 pan - -;
#X obj 210 14 osc~ 440;
#X floatatom 210 56 x 0 0 0 - - -;
";

struct State {
    gui: Gui,
    boxes: Vec<NumberboxState>,
    selected: usize,
    status: String,
    quit: bool,
}

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut gui = Gui::new();
    gui.set_parent_area(Rect::new(0, 0, 64, 20));

    let mut state = State {
        gui,
        boxes: Vec::new(),
        selected: 0,
        status: String::new(),
        quit: false,
    };
    load_patch(PATCH, &mut state);

    run_ui(&mut state)
}

/// Split the patch into atom lines and create all number boxes.
fn load_patch(patch: &str, state: &mut State) {
    let mut failed = 0;
    for line in patch.split(";\n") {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        match tokens.get(1).copied() {
            Some("floatatom") => {}
            _ => continue,
        }
        match NumberboxState::from_atom_line(&tokens, &mut state.gui) {
            Ok(v) => state.boxes.push(v),
            Err(e) => {
                debug!("skip {:?}: {}", line, e);
                failed += 1;
            }
        }
    }
    state.status = format!("{} boxes, {} skipped", state.boxes.len(), failed);
}

fn handle(event: &Event, state: &mut State) -> bool {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return false;
    };

    match (code, *modifiers) {
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
            state.quit = true;
            false
        }
        (KeyCode::Tab, _) => {
            if !state.boxes.is_empty() {
                state.selected = (state.selected + 1) % state.boxes.len();
            }
            true
        }
        (KeyCode::Up, m) | (KeyCode::Down, m) => {
            let step = if m.contains(KeyModifiers::SHIFT) {
                0.01
            } else {
                1.0
            };
            let step = if *code == KeyCode::Up { step } else { -step };
            if let Some(b) = state.boxes.get_mut(state.selected) {
                b.set_value(b.value() + step);
            }
            true
        }
        _ => false,
    }
}

fn repaint(buf: &mut Buffer, area: Rect, state: &mut State) {
    let l = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);

    for (i, b) in state.boxes.iter_mut().enumerate() {
        let style = if i == state.selected {
            Style::new().black().on_yellow()
        } else {
            Style::new().black().on_gray()
        };
        let box_area = b.preferred_area().intersection(l[0]);
        Numberbox::new()
            .style(style)
            .label_style(Style::new().cyan())
            .render(box_area, buf, b);
    }

    Line::from(format!(
        "Ctrl-Q to quit | Tab next | Up/Down +-1 (Shift +-0.01) | {}",
        state.status
    ))
    .white()
    .on_blue()
    .render(l[1], buf);
}

fn run_ui(state: &mut State) -> Result<(), anyhow::Error> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    repaint_ui(&mut terminal, state)?;

    let r = 'l: loop {
        let changed = match crossterm::event::poll(Duration::from_millis(10)) {
            Ok(true) => {
                let event = match crossterm::event::read() {
                    Ok(v) => v,
                    Err(e) => break 'l Err(anyhow!(e)),
                };
                handle(&event, state)
            }
            Ok(false) => continue,
            Err(e) => {
                state.status = format!("{}", e);
                true
            }
        };

        if state.quit {
            break 'l Ok(());
        }

        if changed {
            if let Err(e) = repaint_ui(&mut terminal, state) {
                break 'l Err(e);
            }
        }
    };

    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    r
}

fn repaint_ui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut State,
) -> Result<(), anyhow::Error> {
    terminal.hide_cursor()?;
    terminal.draw(|frame| {
        let area = frame.area();
        repaint(frame.buffer_mut(), area, state);
    })?;
    Ok(())
}

fn setup_logging() -> Result<(), anyhow::Error> {
    let log = PathBuf::from("numberbox.log");
    if log.exists() {
        fs::remove_file(&log)?;
    }
    if let Err(e) = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{} {}", record.level(), message))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log)?)
        .apply()
    {
        error!("logging: {}", e);
    }
    Ok(())
}
