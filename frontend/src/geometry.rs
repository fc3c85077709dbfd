// Pure layout math shared by the scroll and pointer features.

/// Fraction of the document scrolled, 0 when the page cannot scroll.
pub fn scroll_fraction(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    let fraction = scroll_top / scrollable;
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn parallax_offset(scroll_y: f64, factor: f64) -> f64 {
    scroll_y * factor
}

pub fn parallax_transform(scroll_y: f64, factor: f64) -> String {
    format!("translate3d(0, {}px, 0)", parallax_offset(scroll_y, factor))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Rotation around the X and Y axes, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rx: f64,
    pub ry: f64,
}

impl Tilt {
    pub fn rx_property(&self) -> String {
        format!("{:.2}", self.rx)
    }

    pub fn ry_property(&self) -> String {
        format!("{:.2}", self.ry)
    }
}

/// Maps a pointer position over `rect` to a tilt, `max_deg` at the edges.
/// Returns None for collapsed rects.
pub fn tilt_angles(client_x: f64, client_y: f64, rect: &Rect, max_deg: f64) -> Option<Tilt> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let x = ((client_x - rect.left) / rect.width * 2.0 - 1.0).clamp(-1.0, 1.0);
    let y = ((client_y - rect.top) / rect.height * 2.0 - 1.0).clamp(-1.0, 1.0);
    // + 0.0 folds negative zero so the centre reads "0.00"
    Some(Tilt {
        rx: y * -max_deg + 0.0,
        ry: x * max_deg + 0.0,
    })
}

/// Scroll offset that puts an element `gap` pixels below the viewport top.
pub fn anchor_destination(rect_top: f64, scroll_y: f64, gap: f64) -> f64 {
    (rect_top + scroll_y - gap).max(0.0)
}

/// A marquee track loops seamlessly only when its content spans two viewports.
pub fn marquee_needs_clone(child_widths: &[f64], viewport_width: f64) -> bool {
    let total: f64 = child_widths.iter().sum();
    total < viewport_width * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scroll_fraction_handles_short_pages() {
        assert_eq!(scroll_fraction(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(40.0, 600.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(600.0, 2000.0, 800.0), 0.5);
        assert_eq!(scroll_fraction(1300.0, 2000.0, 800.0), 1.0);
        assert_eq!(format!("{:.4}", scroll_fraction(1.0, 3.0, 0.0)), "0.3333");
    }

    #[test]
    fn parallax_moves_with_scroll() {
        assert_eq!(parallax_offset(200.0, 0.25), 50.0);
        assert_eq!(parallax_offset(200.0, -0.5), -100.0);
        assert_eq!(parallax_transform(100.0, 0.5), "translate3d(0, 50px, 0)");
        assert_eq!(parallax_transform(0.0, 0.15), "translate3d(0, 0px, 0)");
    }

    #[test]
    fn tilt_follows_pointer_quadrant() {
        let rect = Rect { left: 100.0, top: 50.0, width: 200.0, height: 100.0 };

        let centre = tilt_angles(200.0, 100.0, &rect, 6.0).unwrap();
        assert_eq!(centre.rx_property(), "0.00");
        assert_eq!(centre.ry_property(), "0.00");

        let top_right = tilt_angles(300.0, 50.0, &rect, 6.0).unwrap();
        assert_eq!(top_right, Tilt { rx: 6.0, ry: 6.0 });

        let bottom_left = tilt_angles(100.0, 150.0, &rect, 6.0).unwrap();
        assert_eq!(bottom_left.rx_property(), "-6.00");
        assert_eq!(bottom_left.ry_property(), "-6.00");
    }

    #[test]
    fn tilt_ignores_collapsed_cards() {
        let rect = Rect { left: 0.0, top: 0.0, width: 0.0, height: 40.0 };
        assert_eq!(tilt_angles(10.0, 10.0, &rect, 6.0), None);
    }

    #[test]
    fn anchor_keeps_visual_gap() {
        assert_eq!(anchor_destination(400.0, 1000.0, 12.0), 1388.0);
        assert_eq!(anchor_destination(-300.0, 1000.0, 12.0), 688.0);
        assert_eq!(anchor_destination(5.0, 0.0, 12.0), 0.0);
    }

    #[test]
    fn marquee_clones_short_tracks_only() {
        assert!(marquee_needs_clone(&[120.0, 80.0, 150.0], 400.0));
        assert!(!marquee_needs_clone(&[400.0, 400.0], 400.0));
        assert!(marquee_needs_clone(&[], 320.0));
    }
}
