use stroop_core::StroopColor;
use tiny_skia::{Paint, Pixmap, Rect, Transform};

/// Window icon: the six answer colors on a 3x2 grid, as straight RGBA8
pub fn icon_rgba(size: u32) -> Option<Vec<u8>> {
    let mut pm = Pixmap::new(size, size)?;
    let cell_w = size as f32 / 3.0;
    let cell_h = size as f32 / 2.0;
    let mut paint = Paint::default();
    paint.anti_alias = false;

    for (i, color) in StroopColor::ALL.iter().enumerate() {
        let [r, g, b] = color.rgb();
        paint.set_color_rgba8(r, g, b, 255);
        let col = (i % 3) as f32;
        let row = (i / 3) as f32;
        let cell = Rect::from_xywh(col * cell_w, row * cell_h, cell_w, cell_h)?;
        pm.fill_rect(cell, &paint, Transform::identity(), None);
    }
    // Fully opaque, so premultiplied and straight alpha agree
    Some(pm.take())
}
