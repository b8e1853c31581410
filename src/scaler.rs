use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

const BAR: u32 = 0;

/// Where the scaled frame lands inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letterbox {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

/// Largest rectangle with the source aspect ratio that fits the window, centred.
pub fn fit(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Letterbox {
    if dst_w == 0 || dst_h == 0 || src_w == 0 || src_h == 0 {
        return Letterbox {
            x: 0,
            y: 0,
            w: 0,
            h: 0,
        };
    }
    // Compare dst_w/src_w with dst_h/src_h without floats.
    let (w, h) = if dst_w * src_h <= dst_h * src_w {
        (dst_w, (dst_w * src_h / src_w).max(1))
    } else {
        ((dst_h * src_w / src_h).max(1), dst_h)
    };
    Letterbox {
        x: (dst_w - w) / 2,
        y: (dst_h - h) / 2,
        w,
        h,
    }
}

/// Precomputed mapping from window pixels to frame neighbours + weights.
pub struct Upscaler {
    dst_w: usize,
    dst_h: usize,
    src_w: usize,
    view: Letterbox,
    x0: Vec<usize>,
    x1: Vec<usize>,
    wx: Vec<u16>,
    y0: Vec<usize>,
    y1: Vec<usize>,
    wy: Vec<u16>,
}

impl Upscaler {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        let view = fit(dst_w, dst_h, src_w, src_h);
        let (x0, x1, wx) = axis_lut(view.w, src_w);
        let (y0, y1, wy) = axis_lut(view.h, src_h);
        Self {
            dst_w,
            dst_h,
            src_w,
            view,
            x0,
            x1,
            wx,
            y0,
            y1,
            wy,
        }
    }

    #[inline]
    pub fn dst_size(&self) -> (usize, usize) {
        (self.dst_w, self.dst_h)
    }

    #[inline]
    pub fn view(&self) -> Letterbox {
        self.view
    }

    /// Bilinear upscale of `src` into the letterbox, bars cleared to black.
    /// Rows are processed in parallel.
    pub fn blit(&self, dst: &mut [u32], src: &[u32]) {
        let v = self.view;
        let sw = self.src_w;
        if self.dst_w == 0 {
            return;
        }

        dst.par_chunks_mut(self.dst_w)
            .take(self.dst_h)
            .enumerate()
            .for_each(|(y, dst_row)| {
                if y < v.y || y >= v.y + v.h {
                    dst_row.fill(BAR);
                    return;
                }
                dst_row[..v.x].fill(BAR);
                dst_row[v.x + v.w..].fill(BAR);

                let ly = y - v.y;
                let wy = self.wy[ly] as u32;
                let row0 = self.y0[ly] * sw;
                let row1 = self.y1[ly] * sw;

                for (lx, out) in dst_row[v.x..v.x + v.w].iter_mut().enumerate() {
                    let x0 = self.x0[lx];
                    let x1 = self.x1[lx];
                    let wx = self.wx[lx] as u32;

                    let top = lerp_color_u32(src[row0 + x0], src[row0 + x1], wx);
                    let bot = lerp_color_u32(src[row1 + x0], src[row1 + x1], wx);
                    *out = lerp_color_u32(top, bot, wy);
                }
            });
    }
}

/// Per destination index: left/right source index and 8.8 fixed-point weight.
fn axis_lut(dst: usize, src: usize) -> (Vec<usize>, Vec<usize>, Vec<u16>) {
    let mut i0 = vec![0; dst];
    let mut i1 = vec![0; dst];
    let mut w = vec![0; dst];
    if dst == 0 || src == 0 {
        return (i0, i1, w);
    }

    let s = src as f32 / dst as f32;
    let last = src as isize - 1;
    for d in 0..dst {
        // Sample at pixel centres.
        let f = ((d as f32 + 0.5) * s - 0.5).max(0.0);
        let a = (f.floor() as isize).min(last);
        let b = (a + 1).min(last);
        i0[d] = a as usize;
        i1[d] = b as usize;
        w[d] = ((f - a as f32).clamp(0.0, 1.0) * 256.0).round() as u16;
    }
    (i0, i1, w)
}

#[inline]
fn lerp_color_u32(a: u32, b: u32, w256: u32) -> u32 {
    // w256 in [0, 256]; inv = 256 - w256
    let inv = 256 - w256;
    // R and B share one multiply (00RR00BB), G goes alone
    let rb = (((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8) & 0x00FF00FF;
    let g = (((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8) & 0x0000FF00;
    rb | g
}
