use crate::scene::Scene;
use ab_glyph::{Font, FontRef, Glyph, PxScale, ScaleFont, point};
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use string_cache::DefaultAtom as Atom;
use stroop_core::Rect as UiRect;
use stroop_timing::Timer;
use tiny_skia::{Color, Paint, Pixmap, PremultipliedColorU8, Rect, Transform};
use tracing::{debug, trace};

static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Rasterized strings kept before the cache starts over
const MAX_CACHED_TEXTS: usize = 512;

/// Drawing surface the scene is painted onto
pub trait Renderer {
    fn fill_rect(&mut self, rect: UiRect, color: [u8; 3]);
    /// Draws `text` centered on `center`
    fn draw_text(&mut self, text: &str, center: (f32, f32), size: f32, color: [u8; 3]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TextKey {
    size_tenths: u32,
    color: [u8; 3],
}

struct TextCache {
    font: FontRef<'static>,
    map: HashMap<(Atom, TextKey), Arc<Pixmap>>,
}

impl TextCache {
    fn new(font: FontRef<'static>) -> Self {
        Self {
            font,
            map: HashMap::new(),
        }
    }

    fn get_or_render(&mut self, text: &str, size: f32, color: [u8; 3]) -> Option<Arc<Pixmap>> {
        let key = TextKey {
            size_tenths: (size * 10.0).round() as u32,
            color,
        };
        let atom = Atom::from(text);
        if let Some(p) = self.map.get(&(atom.clone(), key)) {
            return Some(Arc::clone(p));
        }
        let pm = Arc::new(render_text_pixmap(
            text,
            size,
            &self.font,
            Color::from_rgba8(color[0], color[1], color[2], 255),
        )?);
        if self.map.len() >= MAX_CACHED_TEXTS {
            debug!(entries = self.map.len(), "text cache full, clearing");
            self.map.clear();
        }
        trace!(text, size, cached = self.map.len() + 1, "text rasterized");
        self.map.insert((atom, key), Arc::clone(&pm));
        Some(pm)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

/// Rasterizes a single line of text into a tight, transparent pixmap
pub fn render_text_pixmap(
    text: &str,
    font_size: f32,
    font: &FontRef<'static>,
    color: Color,
) -> Option<Pixmap> {
    let scale = PxScale::from(font_size);
    let sf = font.as_scaled(scale);

    // Baseline at ascent
    let mut pen_x = 0.0f32;
    let mut glyphs = Vec::<Glyph>::new();
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = glyphs.last() {
            pen_x += sf.kern(prev.id, id);
        }
        glyphs.push(Glyph {
            id,
            scale,
            position: point(pen_x, sf.ascent()),
        });
        pen_x += sf.h_advance(id);
    }

    let outlines: Vec<_> = glyphs
        .into_iter()
        .filter_map(|g| font.outline_glyph(g))
        .collect();
    if outlines.is_empty() {
        return Pixmap::new(1, 1);
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for out in &outlines {
        let b = out.px_bounds();
        min_x = min_x.min(b.min.x);
        min_y = min_y.min(b.min.y);
        max_x = max_x.max(b.max.x);
        max_y = max_y.max(b.max.y);
    }

    let w = (max_x.ceil() - min_x.floor()).max(1.0) as u32;
    let h = (max_y.ceil() - min_y.floor()).max(1.0) as u32;
    let mut pm = Pixmap::new(w, h)?;
    let stride = w as usize;
    let dst = pm.pixels_mut();

    let cu = [
        (color.red() * 255.0) as u8,
        (color.green() * 255.0) as u8,
        (color.blue() * 255.0) as u8,
        (color.alpha() * 255.0) as u8,
    ];

    for out in &outlines {
        let b = out.px_bounds();
        out.draw(|x, y, cov| {
            if cov <= f32::EPSILON {
                return;
            }
            let ix = (x as f32 + b.min.x - min_x).floor() as i32;
            let iy = (y as f32 + b.min.y - min_y).floor() as i32;
            if ix < 0 || iy < 0 || ix >= w as i32 || iy >= h as i32 {
                return;
            }
            let i = iy as usize * stride + ix as usize;

            let a_lin = (cov * cu[3] as f32 / 255.0).clamp(0.0, 1.0);
            let sa = (a_lin * 255.0) as u8;
            let src = [
                (cu[0] as f32 * a_lin) as u8,
                (cu[1] as f32 * a_lin) as u8,
                (cu[2] as f32 * a_lin) as u8,
                sa,
            ];
            // Neighbouring glyphs may overlap; composite source-over
            if let Some(px) = over(src, dst[i]) {
                dst[i] = px;
            }
        });
    }

    Some(pm)
}

fn over(src: [u8; 4], bg: PremultipliedColorU8) -> Option<PremultipliedColorU8> {
    let inv = 255 - src[3] as u32;
    let mix = |s: u8, d: u8| (s as u32 + (d as u32 * inv + 127) / 255).min(255) as u8;
    let a = mix(src[3], bg.alpha());
    PremultipliedColorU8::from_rgba(
        mix(src[0], bg.red()).min(a),
        mix(src[1], bg.green()).min(a),
        mix(src[2], bg.blue()).min(a),
        a,
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTimings {
    pub clear: Duration,
    pub paint: Duration,
    pub copy: Duration,
    pub total: Duration,
    pub dirty_count: usize,
}

/// CPU rasterizer that redraws only what changed between frames
pub struct SkiaRenderer {
    width: u32,
    height: u32,
    text_cache: TextCache,
    background: [u8; 3],

    canvas: Pixmap,
    dirty_regions: Vec<Rect>,
    first_frame: bool,
    clear_buffer: Vec<u8>,
}

impl SkiaRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let font = FontRef::try_from_slice(FONT_DATA).context("bundled font is invalid")?;
        let background = crate::scene::BACKGROUND;
        let renderer = SkiaRenderer {
            width,
            height,
            text_cache: TextCache::new(font),
            background,
            canvas: blank_canvas(width, height, background)?,
            dirty_regions: Vec::with_capacity(32),
            first_frame: true,
            clear_buffer: clear_buffer(width, height, background),
        };
        debug!(width, height, "renderer ready");
        Ok(renderer)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn cached_texts(&self) -> usize {
        self.text_cache.len()
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.canvas = blank_canvas(width, height, self.background)?;
        self.clear_buffer = clear_buffer(width, height, self.background);
        self.dirty_regions.clear();
        self.first_frame = true;
        // Font sizes follow the surface, so old rasterizations are stale
        self.text_cache.clear();
        debug!(width, height, "renderer resized");
        Ok(())
    }

    fn set_background(&mut self, background: [u8; 3]) {
        self.background = background;
        self.clear_buffer = clear_buffer(self.width, self.height, background);
        self.first_frame = true;
    }

    /// Clamped pixel span of `rect`, or `None` when it is off the canvas
    fn span(&self, rect: &Rect) -> Option<(usize, usize, usize, usize)> {
        let x0 = rect.x().floor().max(0.0).min(self.width as f32) as usize;
        let y0 = rect.y().floor().max(0.0).min(self.height as f32) as usize;
        let x1 = rect.right().ceil().max(0.0).min(self.width as f32) as usize;
        let y1 = rect.bottom().ceil().max(0.0).min(self.height as f32) as usize;
        (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
    }

    fn clear_dirty(&mut self, dirty: &[Rect]) {
        let stride = self.width as usize * 4;
        for rect in dirty {
            let Some((x0, y0, x1, y1)) = self.span(rect) else {
                continue;
            };
            let canvas_data = self.canvas.data_mut();
            for y in y0..y1 {
                let range = y * stride + x0 * 4..y * stride + x1 * 4;
                canvas_data[range.clone()].copy_from_slice(&self.clear_buffer[range]);
            }
        }
    }

    fn copy_dirty_region(&self, dirty: &Rect, frame_buffer: &mut [u8]) {
        let Some((x0, y0, x1, y1)) = self.span(dirty) else {
            return;
        };
        let stride = self.width as usize * 4;
        let canvas_data = self.canvas.data();
        for y in y0..y1 {
            let range = y * stride + x0 * 4..y * stride + x1 * 4;
            frame_buffer[range.clone()].copy_from_slice(&canvas_data[range]);
        }
    }

    /// Merges rects on the same row that touch, in place
    fn coalesce_dirty(rects: &mut Vec<Rect>) {
        rects.sort_by(|a, b| a.y().total_cmp(&b.y()).then(a.x().total_cmp(&b.x())));
        let mut out: Vec<Rect> = Vec::with_capacity(rects.len());
        for r in rects.drain(..) {
            if let Some(last) = out.last_mut() {
                let same_row =
                    (r.y() - last.y()).abs() < 1.0 && (r.height() - last.height()).abs() < 1.0;
                let touching = r.x() <= last.right() + 1.0;
                if same_row && touching {
                    let nx = last.x().min(r.x());
                    let nx2 = last.right().max(r.right());
                    if let Some(merged) = Rect::from_xywh(nx, last.y(), nx2 - nx, last.height()) {
                        *last = merged;
                        continue;
                    }
                }
            }
            out.push(r);
        }
        *rects = out;
    }

    /// Paints `scene` and copies every changed pixel into `frame_buffer` (RGBA8)
    pub fn render_frame<T: Timer>(
        &mut self,
        scene: &Scene,
        frame_buffer: &mut [u8],
        timer: &mut T,
    ) -> Result<FrameTimings> {
        let expected = self.width as usize * self.height as usize * 4;
        if frame_buffer.len() != expected {
            bail!(
                "frame buffer holds {} bytes, expected {} for {}x{}",
                frame_buffer.len(),
                expected,
                self.width,
                self.height
            );
        }

        if scene.background != self.background {
            self.set_background(scene.background);
        }
        if self.first_frame {
            self.first_frame = false;
            self.canvas.data_mut().copy_from_slice(&self.clear_buffer);
            frame_buffer.copy_from_slice(&self.clear_buffer);
            self.dirty_regions.clear();
        }

        let old_dirty = std::mem::take(&mut self.dirty_regions);

        let t = timer.now();
        self.clear_dirty(&old_dirty);
        let clear = timer.elapsed(t);

        let t = timer.now();
        scene.paint(self);
        let paint = timer.elapsed(t);

        let dirty_count = self.dirty_regions.len();
        let mut present = old_dirty;
        present.extend_from_slice(&self.dirty_regions);
        Self::coalesce_dirty(&mut present);

        let t = timer.now();
        for rect in &present {
            self.copy_dirty_region(rect, frame_buffer);
        }
        let copy = timer.elapsed(t);

        let total = clear + paint + copy;
        timer.record_frame(total);

        Ok(FrameTimings {
            clear,
            paint,
            copy,
            total,
            dirty_count,
        })
    }

    /// Composites a premultiplied pixmap with its top-left at (x, y)
    fn blit(&mut self, pm: &Pixmap, x: i32, y: i32) {
        let (cw, ch) = (self.width as i32, self.height as i32);
        let (w, h) = (pm.width() as i32, pm.height() as i32);
        if x + w <= 0 || y + h <= 0 || x >= cw || y >= ch {
            return;
        }

        let dst_x = x.max(0);
        let dst_y = y.max(0);
        let copy_w = (x + w).min(cw) - dst_x;
        let copy_h = (y + h).min(ch) - dst_y;
        let (src_x, src_y) = (dst_x - x, dst_y - y);

        let src = pm.pixels();
        let dst = self.canvas.pixels_mut();
        for row in 0..copy_h {
            let s0 = ((src_y + row) * w + src_x) as usize;
            let d0 = ((dst_y + row) * cw + dst_x) as usize;
            for i in 0..copy_w as usize {
                let s = src[s0 + i];
                if s.alpha() == 0 {
                    continue;
                }
                let px = [s.red(), s.green(), s.blue(), s.alpha()];
                if let Some(out) = over(px, dst[d0 + i]) {
                    dst[d0 + i] = out;
                }
            }
        }

        if let Some(r) = Rect::from_xywh(dst_x as f32, dst_y as f32, copy_w as f32, copy_h as f32) {
            self.dirty_regions.push(r);
        }
    }
}

impl Renderer for SkiaRenderer {
    fn fill_rect(&mut self, rect: UiRect, color: [u8; 3]) {
        let Some(r) = Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let mut paint = Paint::default();
        paint.anti_alias = false;
        paint.set_color_rgba8(color[0], color[1], color[2], 255);
        self.canvas.fill_rect(r, &paint, Transform::identity(), None);
        self.dirty_regions.push(r);
    }

    fn draw_text(&mut self, text: &str, center: (f32, f32), size: f32, color: [u8; 3]) {
        let Some(pm) = self.text_cache.get_or_render(text, size, color) else {
            return;
        };
        let x = (center.0 - pm.width() as f32 * 0.5) as i32;
        let y = (center.1 - pm.height() as f32 * 0.5) as i32;
        self.blit(&pm, x, y);
    }
}

fn blank_canvas(width: u32, height: u32, background: [u8; 3]) -> Result<Pixmap> {
    let mut canvas = Pixmap::new(width, height)
        .with_context(|| format!("cannot allocate {width}x{height} canvas"))?;
    canvas.fill(Color::from_rgba8(background[0], background[1], background[2], 255));
    Ok(canvas)
}

fn clear_buffer(width: u32, height: u32, background: [u8; 3]) -> Vec<u8> {
    [background[0], background[1], background[2], 255]
        .into_iter()
        .cycle()
        .take(width as usize * height as usize * 4)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawItem;
    use stroop_timing::ManualTimer;

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    fn square(x: f32, color: [u8; 3]) -> Scene {
        let mut scene = Scene::new();
        scene.items.push(DrawItem::Rect {
            rect: UiRect::from_xywh(x, 10.0, 20.0, 20.0),
            color,
        });
        scene
    }

    #[test]
    fn first_frame_fills_background() {
        let mut r = SkiaRenderer::new(64, 48).expect("renderer");
        let mut fb = vec![0u8; 64 * 48 * 4];
        let mut timer = ManualTimer::new();
        r.render_frame(&Scene::new(), &mut fb, &mut timer).expect("frame");
        assert!(fb.chunks(4).all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn moved_rect_leaves_no_trail() {
        let mut r = SkiaRenderer::new(100, 40).expect("renderer");
        let mut fb = vec![0u8; 100 * 40 * 4];
        let mut timer = ManualTimer::new();

        let stats = r
            .render_frame(&square(5.0, [255, 0, 0]), &mut fb, &mut timer)
            .expect("frame");
        assert_eq!(stats.dirty_count, 1);
        assert_eq!(pixel(&fb, 100, 10, 15), [255, 0, 0, 255]);

        r.render_frame(&square(60.0, [0, 0, 255]), &mut fb, &mut timer)
            .expect("frame");
        assert_eq!(pixel(&fb, 100, 10, 15), [255, 255, 255, 255]);
        assert_eq!(pixel(&fb, 100, 65, 15), [0, 0, 255, 255]);
    }

    #[test]
    fn text_is_cached_by_content_size_and_color() {
        let mut r = SkiaRenderer::new(200, 80).expect("renderer");
        let mut fb = vec![0u8; 200 * 80 * 4];
        let mut timer = ManualTimer::new();
        let mut scene = Scene::new();
        for color in [[0, 0, 0], [0, 0, 0], [255, 0, 0]] {
            scene.items.push(DrawItem::Text {
                text: "Красный".into(),
                center: (100.0, 40.0),
                size: 24.0,
                color,
            });
        }
        r.render_frame(&scene, &mut fb, &mut timer).expect("frame");
        assert_eq!(r.cached_texts(), 2);
        // Some ink landed near the middle
        assert!(fb.chunks(4).any(|p| p[0] > 128 && p[1] < 100));
    }

    #[test]
    fn mismatched_frame_buffer_is_an_error() {
        let mut r = SkiaRenderer::new(10, 10).expect("renderer");
        let mut fb = vec![0u8; 16];
        let mut timer = ManualTimer::new();
        assert!(r.render_frame(&Scene::new(), &mut fb, &mut timer).is_err());
    }

    #[test]
    fn resize_redraws_everything() {
        let mut r = SkiaRenderer::new(10, 10).expect("renderer");
        r.resize(20, 8).expect("resize");
        assert_eq!(r.size(), (20, 8));
        let mut fb = vec![0u8; 20 * 8 * 4];
        let mut timer = ManualTimer::new();
        r.render_frame(&Scene::new(), &mut fb, &mut timer).expect("frame");
        assert!(fb.chunks(4).all(|p| p == [255, 255, 255, 255]));
    }

    fn label(text: &str, size: f32) -> Scene {
        let mut scene = Scene::new();
        scene.items.push(DrawItem::Text {
            text: text.into(),
            center: (50.0, 20.0),
            size,
            color: [0, 0, 0],
        });
        scene
    }

    #[test]
    fn resize_drops_cached_text() {
        let mut r = SkiaRenderer::new(100, 40).expect("renderer");
        let mut fb = vec![0u8; 100 * 40 * 4];
        let mut timer = ManualTimer::new();
        r.render_frame(&label("Play", 18.0), &mut fb, &mut timer)
            .expect("frame");
        assert_eq!(r.cached_texts(), 1);

        r.resize(200, 80).expect("resize");
        assert_eq!(r.cached_texts(), 0);
    }

    #[test]
    fn text_cache_is_bounded() {
        let mut r = SkiaRenderer::new(100, 40).expect("renderer");
        let mut fb = vec![0u8; 100 * 40 * 4];
        let mut timer = ManualTimer::new();
        for i in 0..MAX_CACHED_TEXTS + 10 {
            r.render_frame(&label(".", 10.0 + i as f32), &mut fb, &mut timer)
                .expect("frame");
            assert!(r.cached_texts() <= MAX_CACHED_TEXTS);
        }
        assert_eq!(r.cached_texts(), 10);
    }

    #[test]
    fn frame_times_land_in_the_callers_timer() {
        let mut r = SkiaRenderer::new(100, 40).expect("renderer");
        let mut fb = vec![0u8; 100 * 40 * 4];
        let mut timer = ManualTimer::new();
        for x in 0..5 {
            r.render_frame(&square(x as f32 * 10.0, [0, 0, 255]), &mut fb, &mut timer)
                .expect("frame");
        }
        assert_eq!(timer.frame_stats().samples, 5);
    }

    #[test]
    fn coalesce_merges_touching_rects_on_a_row() {
        let mut rects = vec![
            Rect::from_xywh(30.0, 0.0, 10.0, 5.0).expect("rect"),
            Rect::from_xywh(0.0, 0.0, 10.0, 5.0).expect("rect"),
            Rect::from_xywh(10.0, 0.0, 20.0, 5.0).expect("rect"),
            Rect::from_xywh(0.0, 50.0, 10.0, 5.0).expect("rect"),
        ];
        SkiaRenderer::coalesce_dirty(&mut rects);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].width(), 40.0);
    }
}
