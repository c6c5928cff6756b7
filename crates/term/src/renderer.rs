//! Encodes framebuffers into crossterm command streams.
//!
//! Full redraws paint every cell; diff redraws only touch runs of cells that
//! changed since the previous presented frame.

use std::io;

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, FrameBuffer, Rgb};

type Style = (Rgb, Rgb);

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current_style: Option<Style> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(i32::from(x), i32::from(y)).unwrap_or_default();
            print_cell(out, cell, &mut current_style)?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    let mut current_style: Option<Style> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next
                .get(i32::from(x + dx), i32::from(y))
                .unwrap_or_default();
            print_cell(out, cell, &mut current_style)?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn print_cell(out: &mut Vec<u8>, cell: Cell, current: &mut Option<Style>) -> io::Result<()> {
    let style = (cell.fg, cell.bg);
    if *current != Some(style) {
        out.queue(SetForegroundColor(rgb_to_color(cell.fg)))?;
        out.queue(SetBackgroundColor(rgb_to_color(cell.bg)))?;
        *current = Some(style);
    }
    out.queue(Print(cell.ch))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> io::Result<()>,
) -> io::Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();
    let prev_cells = prev.cells();
    let next_cells = next.cells();

    for y in 0..h {
        let row = y as usize * w as usize;
        let mut x = 0;
        while x < w {
            if prev_cells[row + x as usize] == next_cells[row + x as usize] {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev_cells[row + x as usize] != next_cells[row + x as usize] {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
