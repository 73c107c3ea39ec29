use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Fill projected rings with the even-odd rule, sampling pixel centers.
/// Holes and multi-part shapes are just more rings.
pub fn fill_rings(canvas: &mut BrailleCanvas, rings: &[Vec<(i32, i32)>]) {
    let (min_y, max_y) = rings
        .iter()
        .flatten()
        .fold((i32::MAX, i32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    if min_y > max_y {
        return;
    }

    let max_px = canvas.pixel_width() as i32 - 1;
    let y_start = min_y.max(0);
    let y_end = max_y.min(canvas.pixel_height() as i32 - 1);
    let mut crossings: Vec<f64> = Vec::new();

    for y in y_start..=y_end {
        let scan = y as f64 + 0.5;
        crossings.clear();

        for ring in rings.iter().filter(|r| r.len() >= 3) {
            let n = ring.len();
            for i in 0..n {
                let (ax, ay) = ring[i];
                let (bx, by) = ring[(i + 1) % n];
                let (ay, by) = (ay as f64, by as f64);
                if (ay <= scan) != (by <= scan) {
                    let t = (scan - ay) / (by - ay);
                    crossings.push(ax as f64 + t * (bx - ax) as f64);
                }
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let x0 = ((span[0] - 0.5).ceil() as i32).max(0);
            let x1 = ((span[1] - 0.5).floor() as i32).min(max_px);
            for x in x0..=x1 {
                canvas.set_pixel_signed(x, y);
            }
        }
    }
}

/// Even-odd point-in-polygon test over geographic rings
pub fn rings_contain(rings: &[Vec<(f64, f64)>], lon: f64, lat: f64) -> bool {
    let mut inside = false;
    for ring in rings {
        let n = ring.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];
            if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert!((0..10).all(|x| canvas.is_set(x, 0)));
        assert!(!canvas.is_set(0, 1));
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert!((0..8).all(|y| canvas.is_set(0, y)));
        assert!(!canvas.is_set(1, 3));
    }

    #[test]
    fn test_fill_square() {
        let mut canvas = BrailleCanvas::new(8, 4);
        let square = vec![(2, 2), (10, 2), (10, 10), (2, 10), (2, 2)];
        fill_rings(&mut canvas, &[square]);
        assert!(canvas.is_set(2, 2));
        assert!(canvas.is_set(6, 6));
        assert!(canvas.is_set(9, 9));
        assert!(!canvas.is_set(10, 6));
        assert!(!canvas.is_set(1, 6));
        assert!(!canvas.is_set(6, 12));
    }

    #[test]
    fn test_fill_respects_hole() {
        let mut canvas = BrailleCanvas::new(8, 4);
        let outer = vec![(0, 0), (16, 0), (16, 16), (0, 16)];
        let hole = vec![(6, 6), (10, 6), (10, 10), (6, 10)];
        fill_rings(&mut canvas, &[outer, hole]);
        assert!(canvas.is_set(2, 2));
        assert!(!canvas.is_set(8, 8));
        assert!(canvas.is_set(12, 8));
    }

    #[test]
    fn test_fill_clips_offscreen() {
        let mut canvas = BrailleCanvas::new(2, 1);
        let big = vec![(-50, -50), (50, -50), (50, 50), (-50, 50)];
        fill_rings(&mut canvas, &[big]);
        assert_eq!(canvas.to_string(), "⣿⣿");
    }

    #[test]
    fn test_rings_contain() {
        let square = vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)];
        let hole = vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)];
        let rings = vec![square, hole];
        assert!(rings_contain(&rings, 3.0, 3.0));
        assert!(!rings_contain(&rings, 1.5, 1.5));
        assert!(!rings_contain(&rings, 5.0, 1.0));
    }
}
