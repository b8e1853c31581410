use crate::config::Config;
use crate::hud;
use crate::map::Tile;
use crate::raycast::{self, Billboard, Column};
use crate::session::GameSession;

/// Which of the two views draws the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    FirstPerson,
    TopDown,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::FirstPerson => ViewMode::TopDown,
            ViewMode::TopDown => ViewMode::FirstPerson,
        }
    }
}

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

#[inline]
pub fn unpack_rgb(c: u32) -> (u8, u8, u8) {
    ((c >> 16) as u8, (c >> 8) as u8, c as u8)
}

pub const SKY: u32 = pack_rgb(30, 30, 70);
pub const GROUND: u32 = pack_rgb(40, 40, 40);
pub const WALL_LIGHT: (u8, u8, u8) = (210, 205, 190);

pub const PLAYER_COLOR: u32 = pack_rgb(0x34, 0x98, 0xdb);
pub const MONSTER_COLOR: u32 = pack_rgb(0xe7, 0x4c, 0x3c);
pub const PORTAL_COLOR: u32 = pack_rgb(0x2e, 0xcc, 0x71);

const GRID_WALL: u32 = pack_rgb(0x22, 0x22, 0x22);
const GRID_OPEN: u32 = pack_rgb(0xff, 0xff, 0xff);
const GRID_LINE: u32 = pack_rgb(0xee, 0xee, 0xee);
const TEXT: u32 = pack_rgb(0xff, 0xff, 0xff);

/// Darkest a wall slice gets, so far walls stay distinguishable from the sky.
const MIN_WALL_LIGHT: f32 = 0.12;
const MINIMAP_MARGIN: usize = 8;

pub fn render_frame(
    buf: &mut [u32],
    width: usize,
    height: usize,
    session: &GameSession,
    view: ViewMode,
    cfg: &Config,
) {
    match view {
        ViewMode::FirstPerson => {
            render_first_person(buf, width, height, session, cfg);
            draw_minimap(buf, width, height, session, cfg.minimap_cell);
        }
        ViewMode::TopDown => render_top_down(buf, width, height, session, cfg.grid_cell),
    }

    if let Some(msg) = session.status().message() {
        draw_banner(buf, width, height, msg);
    }
}

pub fn render_first_person(
    buf: &mut [u32],
    width: usize,
    height: usize,
    session: &GameSession,
    cfg: &Config,
) {
    // Clear background
    let mid = height / 2;
    buf[..mid * width].fill(SKY);
    buf[mid * width..width * height].fill(GROUND);

    let columns = raycast::cast_view(&session.map, &session.player, cfg);
    draw_columns(buf, width, height, &columns);

    // Sprites are not depth-tested against the walls; draw far to near.
    let mut sprites: Vec<(Billboard, u32)> = [
        (session.portal.pos, PORTAL_COLOR),
        (session.monster.pos, MONSTER_COLOR),
    ]
    .into_iter()
    .filter_map(|(pos, color)| {
        raycast::project_billboard(&session.player, pos, cfg).map(|b| (b, color))
    })
    .collect();
    sprites.sort_by(|a, b| b.0.distance.total_cmp(&a.0.distance));

    for (b, color) in sprites {
        fill_circle(buf, width, height, b.center_x, b.center_y, b.radius, color);
    }
}

fn draw_columns(buf: &mut [u32], width: usize, height: usize, columns: &[Column]) {
    let n = columns.len();
    if n == 0 {
        return;
    }
    let screen_h = height as f32;

    for (i, col) in columns.iter().enumerate() {
        // Each slice also covers one extra pixel to hide seams.
        let x0 = i * width / n;
        let x1 = ((i + 1) * width / n + 1).min(width);

        let top = ((screen_h - col.height) * 0.5).floor().max(0.0) as usize;
        let bottom = ((screen_h + col.height) * 0.5).ceil().min(screen_h) as usize;

        let color = wall_color(col.shade);
        for y in top..bottom {
            let row = y * width;
            buf[row + x0..row + x1].fill(color);
        }
    }
}

/// Wall color for a brightness in [0, 1].
pub fn wall_color(shade: f32) -> u32 {
    let light = MIN_WALL_LIGHT + (1.0 - MIN_WALL_LIGHT) * shade.clamp(0.0, 1.0);
    let (r, g, b) = WALL_LIGHT;
    pack_rgb(
        (r as f32 * light) as u8,
        (g as f32 * light) as u8,
        (b as f32 * light) as u8,
    )
}

/// Scaled-down overhead map in the top-left corner.
pub fn draw_minimap(
    buf: &mut [u32],
    width: usize,
    height: usize,
    session: &GameSession,
    cell: usize,
) {
    let map = &session.map;
    let ox = MINIMAP_MARGIN;
    let oy = MINIMAP_MARGIN;
    if ox + map.width() * cell > width || oy + map.height() * cell > height {
        return;
    }

    for (col, row, tile) in map.cells() {
        let color = match tile {
            Tile::Wall => pack_rgb(20, 20, 24),
            Tile::Open => pack_rgb(150, 150, 150),
        };
        fill_rect(buf, width, height, ox + col * cell, oy + row * cell, cell, cell, color);
    }

    let to_screen = |p: [f32; 2]| {
        (
            ox as f32 + p[0] * cell as f32,
            oy as f32 + p[1] * cell as f32,
        )
    };
    let marker = 0.4 * cell as f32;

    let (px, py) = to_screen(session.portal.pos);
    fill_circle(buf, width, height, px, py, marker, PORTAL_COLOR);
    let (mx, my) = to_screen(session.monster.pos);
    fill_circle(buf, width, height, mx, my, marker, MONSTER_COLOR);

    let (x, y) = to_screen(session.player.pos);
    let [fx, fy] = session.player.forward();
    let len = 1.5 * cell as f32;
    draw_line(buf, width, height, (x, y), (x + fx * len, y + fy * len), PLAYER_COLOR);
    fill_circle(buf, width, height, x, y, marker, PLAYER_COLOR);
}

/// The flat 2D view: the whole maze at `cell` pixels per tile.
pub fn render_top_down(
    buf: &mut [u32],
    width: usize,
    height: usize,
    session: &GameSession,
    cell: usize,
) {
    buf[..width * height].fill(GRID_WALL);

    for (col, row, tile) in session.map.cells() {
        let x = col * cell;
        let y = row * cell;
        let color = match tile {
            Tile::Wall => GRID_WALL,
            Tile::Open => GRID_OPEN,
        };
        fill_rect(buf, width, height, x, y, cell, cell, color);
        stroke_rect(buf, width, height, x, y, cell, cell, GRID_LINE);
    }

    let c = cell as f32;
    let (pc, pr) = session.portal.cell();
    if pc >= 0 && pr >= 0 && cell > 12 {
        fill_rect(
            buf,
            width,
            height,
            pc as usize * cell + 6,
            pr as usize * cell + 6,
            cell - 12,
            cell - 12,
            PORTAL_COLOR,
        );
    }

    let (mc, mr) = session.monster.cell();
    fill_circle(
        buf,
        width,
        height,
        (mc as f32 + 0.5) * c,
        (mr as f32 + 0.5) * c,
        (c / 2.0 - 6.0).max(1.0),
        MONSTER_COLOR,
    );

    let (pc, pr) = session.player.cell();
    fill_circle(
        buf,
        width,
        height,
        (pc as f32 + 0.5) * c,
        (pr as f32 + 0.5) * c,
        (c / 2.0 - 8.0).max(1.0),
        PLAYER_COLOR,
    );
}

/// Darkened band across the middle of the frame with the outcome text.
pub fn draw_banner(buf: &mut [u32], width: usize, height: usize, message: &str) {
    let band = 80.min(height);
    let y0 = height / 2 - band / 2;
    for px in &mut buf[y0 * width..(y0 + band) * width] {
        *px = darken(*px, 0.4);
    }

    let big = 4;
    let small = 2;
    let gap = 6;
    let block = hud::text_height(big) + gap + hud::text_height(small);
    let ty = (height / 2) as i32 - block as i32 / 2;
    hud::draw_text_centered(buf, width, height, ty, message, TEXT, big);
    hud::draw_text_centered(
        buf,
        width,
        height,
        ty + (hud::text_height(big) + gap) as i32,
        "PRESS R TO RESTART",
        TEXT,
        small,
    );
}

/// Scale each channel by `keep`.
#[inline]
pub fn darken(c: u32, keep: f32) -> u32 {
    let (r, g, b) = unpack_rgb(c);
    let k = keep.clamp(0.0, 1.0);
    pack_rgb(
        (r as f32 * k) as u8,
        (g as f32 * k) as u8,
        (b as f32 * k) as u8,
    )
}

fn fill_rect(
    buf: &mut [u32],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    color: u32,
) {
    let x1 = (x + w).min(width);
    let y1 = (y + h).min(height);
    if x >= x1 {
        return;
    }
    for yy in y..y1 {
        let row = yy * width;
        buf[row + x..row + x1].fill(color);
    }
}

fn stroke_rect(
    buf: &mut [u32],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    color: u32,
) {
    if w == 0 || h == 0 {
        return;
    }
    fill_rect(buf, width, height, x, y, w, 1, color);
    fill_rect(buf, width, height, x, y + h - 1, w, 1, color);
    fill_rect(buf, width, height, x, y, 1, h, color);
    fill_rect(buf, width, height, x + w - 1, y, 1, h, color);
}

pub fn fill_circle(
    buf: &mut [u32],
    width: usize,
    height: usize,
    cx: f32,
    cy: f32,
    r: f32,
    color: u32,
) {
    if r <= 0.0 {
        return;
    }
    let y0 = (cy - r).floor().max(0.0) as usize;
    let y1 = ((cy + r).ceil().max(0.0) as usize).min(height);
    let r2 = r * r;
    for y in y0..y1 {
        let dy = y as f32 + 0.5 - cy;
        let span2 = r2 - dy * dy;
        if span2 < 0.0 {
            continue;
        }
        let span = span2.sqrt();
        let x0 = (cx - span).round().max(0.0) as usize;
        let x1 = ((cx + span).round().max(0.0) as usize).min(width);
        if x0 < x1 {
            let row = y * width;
            buf[row + x0..row + x1].fill(color);
        }
    }
}

fn draw_line(
    buf: &mut [u32],
    width: usize,
    height: usize,
    a: (f32, f32),
    b: (f32, f32),
    color: u32,
) {
    let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        let x = a.0 + (b.0 - a.0) * t;
        let y = a.1 + (b.1 - a.1) * t;
        if x >= 0.0 && y >= 0.0 && (x as usize) < width && (y as usize) < height {
            buf[y as usize * width + x as usize] = color;
        }
    }
}
