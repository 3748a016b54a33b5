//! Canvas 画布模块 - 核心渲染接口

use crate::{Color, Paint, PaintStyle, Path, Point, Rect};

/// 画布 - 主要渲染接口
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }

    /// 获取像素数据引用
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// 清空画布
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// 设置像素（带 alpha 混合）
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        let idx = (y as u32 * self.width + x as u32) as usize;
        if color.a == 255 {
            self.pixels[idx] = color;
        } else if color.a > 0 {
            self.pixels[idx] = color.blend(&self.pixels[idx]);
        }
    }

    /// 设置像素（带抗锯齿 coverage）
    fn set_pixel_aa(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        let a = (color.a as f32 * coverage.min(1.0)) as u8;
        self.set_pixel(x, y, Color::new(color.r, color.g, color.b, a));
    }

    /// 绘制矩形
    pub fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        match paint.style {
            PaintStyle::Fill => self.fill_rect(rect, &paint.color),
            PaintStyle::Stroke => self.stroke_rect(rect, paint),
            PaintStyle::FillAndStroke => {
                self.fill_rect(rect, &paint.color);
                self.stroke_rect(rect, paint);
            }
        }
    }

    fn fill_rect(&mut self, rect: &Rect, color: &Color) {
        let x0 = rect.x.max(0.0) as i32;
        let y0 = rect.y.max(0.0) as i32;
        let x1 = rect.right().min(self.width as f32) as i32;
        let y1 = rect.bottom().min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, *color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: &Rect, paint: &Paint) {
        let w = paint.stroke_width;
        self.fill_rect(&Rect::new(rect.x, rect.y, rect.width, w), &paint.color);
        self.fill_rect(&Rect::new(rect.x, rect.bottom() - w, rect.width, w), &paint.color);
        self.fill_rect(&Rect::new(rect.x, rect.y, w, rect.height), &paint.color);
        self.fill_rect(&Rect::new(rect.right() - w, rect.y, w, rect.height), &paint.color);
    }

    /// 绘制线段
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        if paint.anti_alias {
            self.draw_line_aa(x0, y0, x1, y1, paint);
        } else {
            self.draw_line_bresenham(x0 as i32, y0 as i32, x1 as i32, y1 as i32, paint);
        }
    }

    /// Bresenham 直线算法
    fn draw_line_bresenham(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, paint: &Paint) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, paint.color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// 抗锯齿直线 (Wu's algorithm)
    fn draw_line_aa(&mut self, mut x0: f32, mut y0: f32, mut x1: f32, mut y1: f32, paint: &Paint) {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let gradient = if dx == 0.0 { 1.0 } else { dy / dx };

        let xend = x0.round();
        let yend = y0 + gradient * (xend - x0);
        let xpxl1 = xend as i32;
        let mut intery = yend + gradient;

        let xend = x1.round();
        let xpxl2 = xend as i32;

        for x in xpxl1..=xpxl2 {
            let y = intery.floor() as i32;
            let frac = intery - intery.floor();

            if steep {
                self.set_pixel_aa(y, x, paint.color, 1.0 - frac);
                self.set_pixel_aa(y + 1, x, paint.color, frac);
            } else {
                self.set_pixel_aa(x, y, paint.color, 1.0 - frac);
                self.set_pixel_aa(x, y + 1, paint.color, frac);
            }
            intery += gradient;
        }
    }

    /// 绘制路径
    pub fn draw_path(&mut self, path: &Path, paint: &Paint) {
        let contours = path.flatten();

        match paint.style {
            PaintStyle::Fill => self.fill_path(&contours, paint),
            PaintStyle::Stroke => self.stroke_path(&contours, paint),
            PaintStyle::FillAndStroke => {
                self.fill_path(&contours, paint);
                self.stroke_path(&contours, paint);
            }
        }
    }

    /// 填充路径（扫描线算法，支持抗锯齿）
    fn fill_path(&mut self, contours: &[Vec<Point>], paint: &Paint) {
        if contours.is_empty() {
            return;
        }

        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for contour in contours {
            for p in contour {
                min_y = min_y.min(p.y);
                max_y = max_y.max(p.y);
            }
        }

        let y0 = (min_y - 1.0).floor() as i32;
        let y1 = (max_y + 1.0).ceil() as i32;

        // 每行取若干子扫描线，按覆盖率混合；sub_samples = 1 即无抗锯齿
        let sub_samples = if paint.anti_alias { 4 } else { 1 };

        for y in y0..=y1 {
            let mut all_intersections: Vec<Vec<f32>> = Vec::new();

            for sub in 0..sub_samples {
                let scan_y = y as f32 + (sub as f32 + 0.5) / sub_samples as f32;
                let mut intersections = Vec::new();

                for contour in contours {
                    for i in 0..contour.len() {
                        let p0 = &contour[i];
                        let p1 = &contour[(i + 1) % contour.len()];

                        if (p0.y <= scan_y && p1.y > scan_y) || (p1.y <= scan_y && p0.y > scan_y) {
                            let t = (scan_y - p0.y) / (p1.y - p0.y);
                            intersections.push(p0.x + t * (p1.x - p0.x));
                        }
                    }
                }

                intersections.sort_by(|a, b| a.partial_cmp(b).unwrap());
                all_intersections.push(intersections);
            }

            let mut x_min = f32::MAX;
            let mut x_max = f32::MIN;
            for intersections in &all_intersections {
                for &x in intersections {
                    x_min = x_min.min(x);
                    x_max = x_max.max(x);
                }
            }

            if x_min > x_max {
                continue;
            }

            let x0 = (x_min - 1.0).floor() as i32;
            let x1 = (x_max + 1.0).ceil() as i32;

            for x in x0..=x1 {
                let px = x as f32;
                let mut coverage = 0.0;

                for intersections in &all_intersections {
                    for pair in intersections.chunks(2) {
                        if pair.len() == 2 {
                            let left = pair[0];
                            let right = pair[1];
                            let overlap = (px + 1.0).min(right) - px.max(left);
                            if overlap > 0.0 {
                                coverage += overlap.min(1.0);
                            }
                        }
                    }
                }

                coverage /= sub_samples as f32;

                if coverage > 0.0 {
                    self.set_pixel_aa(x, y, paint.color, coverage.min(1.0));
                }
            }
        }
    }

    /// 描边路径
    fn stroke_path(&mut self, contours: &[Vec<Point>], paint: &Paint) {
        for contour in contours {
            for i in 0..contour.len().saturating_sub(1) {
                self.draw_line(
                    contour[i].x,
                    contour[i].y,
                    contour[i + 1].x,
                    contour[i + 1].y,
                    paint,
                );
            }
        }
    }

    /// 导出为 RGBA 字节数组
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity((self.width * self.height * 4) as usize);
        for pixel in &self.pixels {
            data.push(pixel.r);
            data.push(pixel.g);
            data.push(pixel.b);
            data.push(pixel.a);
        }
        data
    }

    /// 保存为 PNG
    pub fn save_png(&self, path: &str) -> Result<(), String> {
        use image::{ImageBuffer, Rgba};

        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_raw(self.width, self.height, self.to_rgba())
                .ok_or("Failed to create image buffer")?;

        img.save(path).map_err(|e| e.to_string())
    }
}
