mod game;
mod input;
mod num;
mod time;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use game::AtomGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use time::FrameClock;

/// Query the grid container's bounding rect and convert pixel coordinates to
/// a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = f64::from(mouse_x) - rect.left();
    let click_y = f64::from(mouse_y) - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn performance_now() -> Option<f64> {
    web_sys::window()?.performance().map(|p| p.now())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = match AtomGame::new() {
        Ok(game) => game,
        Err(e) => {
            let message = format!("atom-clicker: invalid catalog, refusing to start: {e}");
            web_sys::console::error_1(&message.clone().into());
            return Err(io::Error::new(io::ErrorKind::InvalidData, message));
        }
    };
    let game = Rc::new(RefCell::new(game));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(FrameClock::new()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    // Mouse/touch handler: hit-test the tapped cell against the targets the
    // last render pass registered.
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.kind != MouseEventKind::ButtonDown(MouseButton::Left) {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            // ratzilla delivers the tapped cell directly in terminal-grid
            // coordinates.
            let (col, row) = (mouse_event.col, mouse_event.row);
            let Some(action) = cs.hit_test(col, row) else {
                return;
            };
            let col_offset = i32::from(col) as i16 - (cs.terminal_cols / 2) as i16;
            drop(cs);

            game.borrow_mut()
                .handle_input(&InputEvent::Click { action, col_offset });
        }
    });

    // Keyboard handler.
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    });

    // Frame loop: measure the frame rate, advance the economy, redraw.
    terminal.draw_web({
        let game = game.clone();
        let click_state = click_state.clone();
        move |f| {
            if let Some(now) = performance_now() {
                if let Some(fps) = clock.borrow_mut().update(now) {
                    game.borrow_mut().tick(fps);
                }
            }

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            game.borrow().render(f, size, &click_state);
        }
    });

    web_sys::console::log_1(&"Game started.".into());
    Ok(())
}
