use log::debug;

use crate::models::{BitMatrix, GrayBuffer, Segment, SegmentList};

/// Trace directions, in the order they are tried from each seed pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    DownRight,
    Down,
    DownLeft,
}

impl Direction {
    /// Try order from every seed
    pub const ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
    ];

    /// Step as (dx, dy)
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Right => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::Down => (0, 1),
            Direction::DownLeft => (-1, 1),
        }
    }
}

/// Walk from (x, y) along `dir`, clearing every pixel stepped onto.
/// Returns the last pixel reached.
fn walk(edges: &mut BitMatrix, x: usize, y: usize, dir: Direction) -> (usize, usize) {
    let (dx, dy) = dir.delta();
    let (mut cx, mut cy) = (x, y);
    loop {
        let (Some(nx), Some(ny)) = (cx.checked_add_signed(dx), cy.checked_add_signed(dy)) else {
            break;
        };
        if !edges.get(nx, ny) {
            break;
        }
        edges.set(nx, ny, false);
        cx = nx;
        cy = ny;
    }
    (cx, cy)
}

/// A walk only counts when it moved along every axis its direction steps on
fn moved(dir: Direction, start: (usize, usize), end: (usize, usize)) -> bool {
    let (dx, dy) = dir.delta();
    (dx == 0 || end.0 != start.0) && (dy == 0 || end.1 != start.1)
}

/// Trace straight runs of white pixels in `mask` into segments
///
/// Seeds are visited column by column (x outer, y inner, both ascending) over
/// `1..width-1` × `1..height-1`. From every seed that is still white, the four
/// [`Direction::ORDER`] walks run in turn; pixels a walk steps onto are cleared
/// so they cannot seed or extend later runs. The seed itself is never cleared.
pub fn trace_segments(mask: &GrayBuffer) -> SegmentList {
    let mut edges = BitMatrix::from_white_pixels(mask);
    let mut segments = SegmentList::new();
    let (width, height) = (edges.width(), edges.height());

    for x in 1..width.saturating_sub(1) {
        for y in 1..height.saturating_sub(1) {
            if !edges.get(x, y) {
                continue;
            }
            for dir in Direction::ORDER {
                let end = walk(&mut edges, x, y, dir);
                if moved(dir, (x, y), end) {
                    segments.push(Segment::new(x as i32, y as i32, end.0 as i32, end.1 as i32));
                }
            }
        }
    }

    debug!(
        "traced {} segments from {}x{} mask ({} edge pixels left)",
        segments.len(),
        width,
        height,
        edges.count_ones()
    );
    segments
}
